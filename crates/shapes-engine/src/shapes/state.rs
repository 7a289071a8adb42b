use core::fmt;

use glam::{Mat4, Vec3};

use crate::coords::{Rect, Vec2};
use crate::paint::Color;
use crate::world::World;

/// Per-instance state shared by every leaf shape.
///
/// Invariant: `model` is rebuilt from scratch on each transform call, never
/// updated incrementally. `set_position` yields `T · S`, `rotate` and `scale`
/// yield `T · R · S`, where `S` is the identity until `scale` is called.
/// `rotated` records whether the current model carries `R`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ShapeState {
    center: Vec2,
    size: Vec2,
    scale: Vec2,
    angle: f32,
    rotated: bool,

    color: Color,
    ncolor: [f32; 4],

    model: Mat4,
    view: Mat4,
    projection: Mat4,
}

impl ShapeState {
    pub(crate) fn new(center: Vec2, size: Vec2, color: Color) -> Self {
        Self {
            center,
            size,
            scale: Vec2::splat(1.0),
            angle: 0.0,
            rotated: false,
            color,
            ncolor: color.normalized(),
            model: Mat4::from_translation(center.extend(0.0)),
            // No world attached yet: draws produce nothing visible.
            view: Mat4::ZERO,
            projection: Mat4::ZERO,
        }
    }

    // ── color ─────────────────────────────────────────────────────────────

    pub(crate) fn set_color(&mut self, color: Color) {
        self.color = color;
        self.ncolor = color.normalized();
    }

    #[inline]
    pub(crate) fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub(crate) fn ncolor(&self) -> [f32; 4] {
        self.ncolor
    }

    // ── transform ─────────────────────────────────────────────────────────

    /// Moves the shape; the model matrix loses any rotation (the stored angle
    /// is kept and reported by `angle`).
    pub(crate) fn set_position(&mut self, x: f32, y: f32) {
        self.center = Vec2::new(x, y);
        self.rotated = false;
        self.rebuild();
    }

    /// Rotates around the current center to `angle` degrees.
    pub(crate) fn rotate(&mut self, angle: f32) {
        self.angle = angle;
        self.rotated = true;
        self.rebuild();
    }

    pub(crate) fn scale(&mut self, sx: f32, sy: f32) {
        self.scale = Vec2::new(sx, sy);
        self.rotated = true;
        self.rebuild();
    }

    /// Moves the center by `delta`; the model keeps its current rotation (or
    /// lack of it).
    pub(crate) fn translate_by(&mut self, delta: Vec2) {
        self.center = self.center + delta;
        self.rebuild();
    }

    /// Sets the scale factor without changing whether the model is rotated.
    pub(crate) fn rescale(&mut self, sx: f32, sy: f32) {
        self.scale = Vec2::new(sx, sy);
        self.rebuild();
    }

    /// Angle the model matrix actually rotates by: the stored angle, or 0
    /// after `set_position` dropped the rotation.
    #[inline]
    pub(crate) fn rendered_angle(&self) -> f32 {
        if self.rotated { self.angle } else { 0.0 }
    }

    fn rebuild(&mut self) {
        let t = Mat4::from_translation(self.center.extend(0.0));
        self.model = if self.rotated {
            t * Mat4::from_rotation_z(self.angle.to_radians()) * self.scale_matrix()
        } else {
            t * self.scale_matrix()
        };
    }

    fn scale_matrix(&self) -> Mat4 {
        Mat4::from_scale(Vec3::new(self.scale.x, self.scale.y, 1.0))
    }

    // ── world ─────────────────────────────────────────────────────────────

    pub(crate) fn attach_to_world(&mut self, world: &dyn World) {
        self.projection = world.projection();
        self.view = world.view();
    }

    // ── accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub(crate) fn center(&self) -> Vec2 {
        self.center
    }

    /// Size after scaling.
    #[inline]
    pub(crate) fn size(&self) -> Vec2 {
        self.size.mul_elem(self.scale).abs()
    }

    #[inline]
    pub(crate) fn scale_factor(&self) -> Vec2 {
        self.scale
    }

    #[inline]
    pub(crate) fn angle(&self) -> f32 {
        self.angle
    }

    #[inline]
    pub(crate) fn bounds(&self) -> Rect {
        Rect::from_center_size(self.center, self.size())
    }

    #[inline]
    pub(crate) fn model(&self) -> Mat4 {
        self.model
    }

    #[inline]
    pub(crate) fn view(&self) -> Mat4 {
        self.view
    }

    #[inline]
    pub(crate) fn projection(&self) -> Mat4 {
        self.projection
    }
}

impl fmt::Display for ShapeState {
    /// `(cx,cy)-(w,h)` with six fractional digits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.center, self.size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::OrthoWorld;
    use glam::Vec4;

    fn state() -> ShapeState {
        ShapeState::new(Vec2::zero(), Vec2::new(10.0, 20.0), Color::BLUE)
    }

    fn apply(m: Mat4, x: f32, y: f32) -> Vec2 {
        let p = m * Vec4::new(x, y, 0.0, 1.0);
        Vec2::new(p.x, p.y)
    }

    fn near(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4
    }

    #[test]
    fn matrices_are_zero_until_attached() {
        let mut s = state();
        assert_eq!(s.projection(), Mat4::ZERO);
        assert_eq!(s.view(), Mat4::ZERO);

        let world = OrthoWorld::new(100.0, 100.0);
        s.attach_to_world(&world);
        assert_eq!(s.projection(), world.projection());
        assert_eq!(s.view(), world.view());
    }

    #[test]
    fn position_is_pure_translation() {
        let mut s = state();
        s.set_position(10.0, 20.0);
        assert_eq!(s.model(), Mat4::from_translation(Vec3::new(10.0, 20.0, 0.0)));
    }

    #[test]
    fn rotate_composes_translation_and_rotation() {
        let mut s = state();
        s.set_position(10.0, 20.0);
        s.rotate(90.0);
        // Local +X lands on world +Y around the center.
        assert!(near(apply(s.model(), 1.0, 0.0), Vec2::new(10.0, 21.0)));
        assert_eq!(s.center(), Vec2::new(10.0, 20.0));
    }

    #[test]
    fn position_after_rotate_drops_rotation() {
        let mut s = state();
        s.rotate(45.0);
        s.set_position(3.0, 4.0);
        assert_eq!(s.model(), Mat4::from_translation(Vec3::new(3.0, 4.0, 0.0)));
        assert_eq!(s.angle(), 45.0);
    }

    #[test]
    fn scale_multiplies_size_and_geometry() {
        let mut s = state();
        s.set_position(50.0, 0.0);
        s.scale(1.5, 2.0);
        assert_eq!(s.size(), Vec2::new(15.0, 40.0));
        assert!(near(apply(s.model(), 5.0, 10.0), Vec2::new(57.5, 20.0)));
    }

    #[test]
    fn translate_by_keeps_dropped_rotation_dropped() {
        let mut s = state();
        s.rotate(20.0);
        s.set_position(30.0, 0.0);
        s.translate_by(Vec2::new(70.0, 5.0));
        assert_eq!(s.model(), Mat4::from_translation(Vec3::new(100.0, 5.0, 0.0)));
        assert_eq!(s.rendered_angle(), 0.0);
        assert_eq!(s.angle(), 20.0);
    }

    #[test]
    fn translate_by_keeps_applied_rotation() {
        let mut s = state();
        s.rotate(90.0);
        s.translate_by(Vec2::new(10.0, 20.0));
        assert!(near(apply(s.model(), 1.0, 0.0), Vec2::new(10.0, 21.0)));
        assert_eq!(s.rendered_angle(), 90.0);
    }

    #[test]
    fn rescale_does_not_restore_rotation() {
        let mut s = state();
        s.rotate(45.0);
        s.set_position(0.0, 0.0);
        s.rescale(2.0, 2.0);
        assert_eq!(s.model(), Mat4::from_scale(Vec3::new(2.0, 2.0, 1.0)));
    }

    #[test]
    fn display_formats_center_and_size() {
        let mut s = state();
        s.set_position(5.0, 10.0);
        assert_eq!(s.to_string(), "(5.000000,10.000000)-(10.000000,20.000000)");
    }
}
