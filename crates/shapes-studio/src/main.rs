//! Shapes studio: shows (or captures) one demo scene.
//!
//! Usage: `shapes-studio [SCENE] [--texture PATH] [--capture OUT.png] [--size WxH] [--clear RRGGBB[AA]] [--list]`

mod scenes;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{Key, NamedKey};

use shapes_engine::core::{App, AppControl, FrameCtx};
use shapes_engine::device::{GpuInit, Headless, OffscreenTarget};
use shapes_engine::logging::{init_logging, LoggingConfig};
use shapes_engine::render::{self, RenderTarget, ShapeRenderer, Texture};
use shapes_engine::window::{Runtime, RuntimeConfig};
use shapes_engine::{Color, Element, OrthoWorld, Viewport};

use scenes::Scene;

struct Options {
    scene: Scene,
    texture: Option<PathBuf>,
    capture: Option<PathBuf>,
    size: (u32, u32),
    clear: Color,
}

impl Options {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Option<Self>> {
        let mut opts = Options {
            scene: Scene::Box,
            texture: None,
            capture: None,
            size: (320, 480),
            clear: Color::gray(0x20),
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--list" => {
                    for scene in Scene::ALL {
                        println!("{scene}");
                    }
                    return Ok(None);
                }
                "--texture" => {
                    opts.texture = Some(args.next().context("--texture needs a path")?.into());
                }
                "--capture" => {
                    opts.capture = Some(args.next().context("--capture needs a path")?.into());
                }
                "--size" => {
                    let v = args.next().context("--size needs WxH")?;
                    opts.size = parse_size(&v)?;
                }
                "--clear" => {
                    let v = args.next().context("--clear needs a hex color")?;
                    opts.clear = Color::from_hex(&v).with_context(|| format!("bad color {v:?}"))?;
                }
                flag if flag.starts_with("--") => bail!("unknown option {flag}"),
                name => opts.scene = name.parse()?,
            }
        }

        Ok(Some(opts))
    }
}

fn parse_size(v: &str) -> Result<(u32, u32)> {
    let (w, h) = v.split_once('x').context("size must look like WxH")?;
    let w: u32 = w.parse().with_context(|| format!("bad width in {v:?}"))?;
    let h: u32 = h.parse().with_context(|| format!("bad height in {v:?}"))?;
    anyhow::ensure!(w > 0 && h > 0, "size must be non-zero");
    Ok((w, h))
}

fn load_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    path: Option<&Path>,
) -> Result<Arc<Texture>> {
    let texture = match path {
        Some(path) => Texture::from_path(device, queue, path)?,
        None => Texture::from_image(device, queue, &scenes::checker_image(), Some("checker"))?,
    };
    Ok(Arc::new(texture))
}

/// Windowed scene viewer. Shapes are rebuilt whenever the surface size changes.
struct StudioApp {
    opts: Options,
    texture: Option<Arc<Texture>>,
    shapes: Vec<Element>,
    built_for: Option<Viewport>,
}

impl StudioApp {
    fn new(opts: Options) -> Self {
        Self {
            opts,
            texture: None,
            shapes: Vec::new(),
            built_for: None,
        }
    }

    fn rebuild(&mut self, ctx: &FrameCtx<'_, '_>, viewport: Viewport) -> Result<()> {
        if self.opts.scene.needs_texture() && self.texture.is_none() {
            self.texture = Some(load_texture(ctx.device(), ctx.queue(), self.opts.texture.as_deref())?);
        }

        let world = OrthoWorld::from_viewport(viewport);
        self.shapes = self.opts.scene.build(&world, self.texture.as_ref());
        self.built_for = Some(viewport);
        log::info!("scene {} built for {}x{}", self.opts.scene, viewport.width, viewport.height);
        Ok(())
    }
}

impl App for StudioApp {
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        match event {
            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed
                    && event.logical_key == Key::Named(NamedKey::Escape) =>
            {
                AppControl::Exit
            }
            _ => AppControl::Continue,
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let viewport = ctx.viewport();
        if !viewport.is_valid() {
            return AppControl::Continue;
        }

        if self.built_for != Some(viewport) {
            if let Err(e) = self.rebuild(ctx, viewport) {
                log::error!("failed to build scene: {e:#}");
                return AppControl::Exit;
            }
        }

        let shapes = &self.shapes;
        ctx.render(self.opts.clear, |painter, _viewport| {
            for shape in shapes {
                painter.draw(shape);
            }
        })
    }
}

/// Renders the scene offscreen and writes it as a PNG.
fn capture(opts: &Options, out: &Path) -> Result<()> {
    let gpu = pollster::block_on(Headless::new(&GpuInit::default()))?;
    let (w, h) = opts.size;
    let target = OffscreenTarget::new(gpu.device(), w, h)?;

    let texture = if opts.scene.needs_texture() {
        Some(load_texture(gpu.device(), gpu.queue(), opts.texture.as_deref())?)
    } else {
        None
    };

    let rctx = gpu.render_ctx(&target);
    let world = OrthoWorld::from_viewport(rctx.viewport);
    let shapes = opts.scene.build(&world, texture.as_ref());

    let rt = RenderTarget::new(target.view());
    render::clear(&rctx, &rt, opts.clear);

    let mut renderer = ShapeRenderer::new();
    let painter = renderer.painter(&rctx, &rt);
    for shape in &shapes {
        painter.draw(shape);
    }

    let img = gpu.capture(&target)?;
    img.save(out)
        .with_context(|| format!("failed to write {}", out.display()))?;
    log::info!(
        "scene {} captured to {} on {}",
        opts.scene,
        out.display(),
        gpu.adapter_info().name
    );
    Ok(())
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let Some(opts) = Options::parse(std::env::args().skip(1))? else {
        return Ok(());
    };

    if let Some(out) = opts.capture.clone() {
        return capture(&opts, &out);
    }

    let (w, h) = opts.size;
    let config = RuntimeConfig {
        title: format!("shapes: {}", opts.scene),
        initial_size: winit::dpi::LogicalSize::new(f64::from(w), f64::from(h)),
    };

    Runtime::run(config, GpuInit::default(), StudioApp::new(opts))
}
