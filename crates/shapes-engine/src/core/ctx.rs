use winit::window::Window;

use crate::coords::Viewport;
use crate::device::{Gpu, SurfaceErrorAction};
use crate::paint::Color;
use crate::render::{self, Painter, RenderTarget, ShapeRenderer};

use super::app::AppControl;

/// Per-frame context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: &'a Window,
    pub gpu: &'a mut Gpu<'w>,
    pub renderer: &'a mut ShapeRenderer,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Surface size in physical pixels.
    pub fn viewport(&self) -> Viewport {
        let size = self.gpu.size();
        Viewport::from_pixels(size.width, size.height)
    }

    pub fn device(&self) -> &wgpu::Device {
        self.gpu.device()
    }

    pub fn queue(&self) -> &wgpu::Queue {
        self.gpu.queue()
    }

    /// Clears the surface with `clear`, calls `draw` with a [`Painter`] for the
    /// surface and its viewport, then presents the frame.
    ///
    /// A skipped frame (transient surface error) does not call `draw`.
    pub fn render<F>(&mut self, clear: Color, draw: F) -> AppControl
    where
        F: FnOnce(&Painter<'_>, Viewport),
    {
        let frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                log::debug!("surface error: {err}");
                let action = self.gpu.handle_surface_error(err);
                if action == SurfaceErrorAction::Fatal {
                    log::error!("fatal surface error, exiting");
                    return AppControl::Exit;
                }
                return AppControl::Continue;
            }
        };

        let rctx = self.gpu.render_ctx();
        let target = RenderTarget::new(&frame.view);

        render::clear(&rctx, &target, clear);
        {
            let painter = self.renderer.painter(&rctx, &target);
            draw(&painter, rctx.viewport);
        }

        self.window.pre_present_notify();
        self.gpu.present(frame);

        AppControl::Continue
    }
}
