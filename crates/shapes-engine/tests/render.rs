//! Offscreen rendering checks. Each test is skipped when the machine has no
//! usable GPU adapter (software adapters count).

use std::sync::Arc;

use image::RgbaImage;
use shapes_engine::device::{GpuInit, Headless, OffscreenTarget};
use shapes_engine::render::{self, RenderTarget, ShapeRenderer, Texture};
use shapes_engine::{BoxShape, Color, Element, Group, OrthoWorld, Segment, Shape};

const SIZE: u32 = 64;
const CLEAR: Color = Color::BLACK;

fn headless() -> Option<Headless> {
    match pollster::block_on(Headless::new(&GpuInit::default())) {
        Ok(gpu) => Some(gpu),
        Err(e) => {
            eprintln!("skipping GPU test: {e:#}");
            None
        }
    }
}

fn world() -> OrthoWorld {
    OrthoWorld::new(SIZE as f32, SIZE as f32)
}

fn render(gpu: &Headless, shapes: &[Element]) -> RgbaImage {
    let target = OffscreenTarget::new(gpu.device(), SIZE, SIZE).unwrap();
    let rctx = gpu.render_ctx(&target);
    let rt = RenderTarget::new(target.view());
    render::clear(&rctx, &rt, CLEAR);

    let mut renderer = ShapeRenderer::new();
    let painter = renderer.painter(&rctx, &rt);
    for shape in shapes {
        painter.draw(shape);
    }

    gpu.capture(&target).unwrap()
}

/// Pixel under world point `(x, y)`: columns follow x, rows grow downwards
/// from y = SIZE / 2.
fn at(img: &RgbaImage, x: f32, y: f32) -> [u8; 4] {
    let col = x as u32;
    let row = (SIZE as f32 / 2.0 - y) as u32;
    img.get_pixel(col, row).0
}

fn rgba(c: Color) -> [u8; 4] {
    [c.r, c.g, c.b, c.a]
}

#[test]
fn box_fills_its_area_only() {
    let Some(gpu) = headless() else { return };

    let mut b = BoxShape::new(20.0, 20.0);
    b.set_position(32.0, 0.0);
    b.attach_to_world(&world());

    let img = render(&gpu, &[b.into()]);
    assert_eq!(at(&img, 32.0, 0.0), rgba(Color::BLUE));
    assert_eq!(at(&img, 40.0, 8.0), rgba(Color::BLUE));
    assert_eq!(at(&img, 4.0, 28.0), rgba(CLEAR));
    assert_eq!(at(&img, 48.0, 0.0), rgba(CLEAR));
}

#[test]
fn unattached_box_draws_nothing() {
    let Some(gpu) = headless() else { return };

    let mut b = BoxShape::new(20.0, 20.0);
    b.set_position(32.0, 0.0);

    let img = render(&gpu, &[b.into()]);
    assert_eq!(at(&img, 32.0, 0.0), rgba(CLEAR));
}

#[test]
fn rotated_box_leaves_corners_empty() {
    let Some(gpu) = headless() else { return };

    let mut b = BoxShape::with_color(30.0, 30.0, Color::YELLOW);
    b.set_position(32.0, 0.0);
    b.rotate(45.0);
    b.attach_to_world(&world());

    let img = render(&gpu, &[b.into()]);
    assert_eq!(at(&img, 32.0, 0.0), rgba(Color::YELLOW));
    // Unrotated corner region, now outside the diamond.
    assert_eq!(at(&img, 19.0, 13.0), rgba(CLEAR));
    // Diamond tip reaches past the unrotated half-extent.
    assert_eq!(at(&img, 32.0, 18.0), rgba(Color::YELLOW));
}

#[test]
fn segment_draws_a_line() {
    let Some(gpu) = headless() else { return };

    let mut s = Segment::with_color(8.0, 0.5, 56.0, 0.5, Color::WHITE);
    s.attach_to_world(&world());

    let img = render(&gpu, &[s.into()]);
    let lit = (30..=33).any(|row| img.get_pixel(32, row).0 == rgba(Color::WHITE));
    assert!(lit, "no white pixel on the segment's column");
    assert_eq!(at(&img, 32.0, 20.0), rgba(CLEAR));
}

#[test]
fn texture_is_upright() {
    let Some(gpu) = headless() else { return };

    // Top half red, bottom half green.
    let img = RgbaImage::from_fn(8, 8, |_, y| {
        if y < 4 {
            image::Rgba([0xff, 0, 0, 0xff])
        } else {
            image::Rgba([0, 0xff, 0, 0xff])
        }
    });
    let texture = Texture::from_image(gpu.device(), gpu.queue(), &img, Some("halves")).unwrap();

    let mut b = BoxShape::new(40.0, 40.0);
    b.set_position(32.0, 0.0);
    b.set_texture(
        Arc::new(texture),
        [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]],
    );
    b.attach_to_world(&world());

    let out = render(&gpu, &[b.into()]);
    assert_eq!(at(&out, 32.0, 15.0), rgba(Color::RED));
    assert_eq!(at(&out, 32.0, -15.0), rgba(Color::GREEN));
}

#[test]
fn cleared_texture_falls_back_to_color() {
    let Some(gpu) = headless() else { return };

    let img = RgbaImage::from_pixel(4, 4, image::Rgba([0xff, 0, 0, 0xff]));
    let texture = Texture::from_image(gpu.device(), gpu.queue(), &img, Some("red")).unwrap();

    let mut b = BoxShape::with_color(40.0, 40.0, Color::GREEN);
    b.set_position(32.0, 0.0);
    b.set_texture(Arc::new(texture), [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]]);
    b.clear_texture();
    assert!(b.texture().is_none());
    b.attach_to_world(&world());

    let out = render(&gpu, &[b.into()]);
    assert_eq!(at(&out, 32.0, 0.0), rgba(Color::GREEN));
}

#[test]
fn group_rotates_rigidly() {
    let Some(gpu) = headless() else { return };

    let mut left = BoxShape::with_color(12.0, 12.0, Color::RED);
    left.set_position(16.0, 0.0);
    let mut right = BoxShape::with_color(12.0, 12.0, Color::GREEN);
    right.set_position(48.0, 0.0);

    let mut group = Group::new();
    group.append(left);
    group.append(right);
    group.attach_to_world(&world());
    group.rotate(90.0);

    let img = render(&gpu, &[group.into()]);
    assert_eq!(at(&img, 32.0, -16.0), rgba(Color::RED));
    assert_eq!(at(&img, 32.0, 16.0), rgba(Color::GREEN));
    assert_eq!(at(&img, 16.0, 0.0), rgba(CLEAR));
}

#[test]
fn later_children_draw_on_top() {
    let Some(gpu) = headless() else { return };

    let mut below = BoxShape::with_color(30.0, 30.0, Color::RED);
    below.set_position(32.0, 0.0);
    let mut above = BoxShape::with_color(10.0, 10.0, Color::GREEN);
    above.set_position(32.0, 0.0);

    let mut group = Group::new();
    group.append(below);
    group.append(above);
    group.attach_to_world(&world());

    let img = render(&gpu, &[group.into()]);
    assert_eq!(at(&img, 32.0, 0.0), rgba(Color::GREEN));
    assert_eq!(at(&img, 22.0, 0.0), rgba(Color::RED));
}

#[test]
fn scaled_box_stretches_about_its_center() {
    let Some(gpu) = headless() else { return };

    let mut b = BoxShape::new(10.0, 10.0);
    b.set_position(32.0, 0.0);
    b.scale(2.0, 1.0);
    b.attach_to_world(&world());

    let img = render(&gpu, &[b.into()]);
    assert_eq!(at(&img, 40.0, 0.0), rgba(Color::BLUE));
    assert_eq!(at(&img, 23.0, 0.0), rgba(Color::BLUE));
    assert_eq!(at(&img, 18.0, 0.0), rgba(CLEAR));
    assert_eq!(at(&img, 32.0, 8.0), rgba(CLEAR));
}

#[test]
fn nested_group_rotates_as_one_body() {
    let Some(gpu) = headless() else { return };

    let mut b1 = BoxShape::with_color(8.0, 8.0, Color::RED);
    b1.set_position(24.0, 0.0);
    let mut b2 = BoxShape::with_color(8.0, 8.0, Color::GREEN);
    b2.set_position(40.0, 0.0);
    let mut inner = Group::new();
    inner.append(b1);
    inner.append(b2);

    let mut b3 = BoxShape::with_color(8.0, 8.0, Color::WHITE);
    b3.set_position(32.0, 16.0);

    let mut outer = Group::new();
    outer.append(inner);
    outer.append(b3);
    outer.attach_to_world(&world());

    // Bounds span x 20..44, y -4..20: quarter turn about (32, 8).
    outer.rotate(90.0);

    let img = render(&gpu, &[outer.into()]);
    assert_eq!(at(&img, 40.0, 0.0), rgba(Color::RED));
    assert_eq!(at(&img, 40.0, 16.0), rgba(Color::GREEN));
    assert_eq!(at(&img, 24.0, 8.0), rgba(Color::WHITE));
    assert_eq!(at(&img, 24.0, 0.0), rgba(CLEAR));
}

#[test]
fn oversized_texture_is_an_error() {
    let Some(gpu) = headless() else { return };

    let max = gpu.device().limits().max_texture_dimension_2d;
    let rgba = vec![0xff; (max as usize + 1) * 4];
    let res = Texture::from_rgba(gpu.device(), gpu.queue(), &rgba, (max + 1, 1), Some("too wide"));
    assert!(res.is_err());
}

#[test]
fn oversized_offscreen_target_is_an_error() {
    let Some(gpu) = headless() else { return };

    let max = gpu.device().limits().max_texture_dimension_2d;
    assert!(OffscreenTarget::new(gpu.device(), max + 1, 1).is_err());
    assert!(OffscreenTarget::new(gpu.device(), 1, max + 1).is_err());
}
