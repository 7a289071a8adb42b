use core::fmt;

use glam::Mat4;

use crate::coords::Vec2;
use crate::paint::Color;
use crate::render::programs::{Matrices, SegmentDraw};
use crate::render::Painter;
use crate::world::World;

use super::state::ShapeState;
use super::{Shape, DEFAULT_COLOR};

/// Straight line between two points.
///
/// The center is the midpoint and the size is the bounding box of the two
/// endpoints. Vertices are stored relative to the midpoint and the initial
/// model matrix translates them back, so an untouched segment is drawn exactly
/// between the endpoints it was built from.
#[derive(Debug, Clone)]
pub struct Segment {
    state: ShapeState,
    endpoints: [Vec2; 2],
    vertices: [[f32; 2]; 2],
}

impl Segment {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self::with_color(x1, y1, x2, y2, DEFAULT_COLOR)
    }

    pub fn with_color(x1: f32, y1: f32, x2: f32, y2: f32, color: Color) -> Self {
        let a = Vec2::new(x1, y1);
        let b = Vec2::new(x2, y2);
        let mid = (a + b) / 2.0;
        let size = (a - b).abs();
        let (la, lb) = (a - mid, b - mid);

        Self {
            state: ShapeState::new(mid, size, color),
            endpoints: [a, b],
            vertices: [[la.x, la.y], [lb.x, lb.y]],
        }
    }

    /// Endpoints as given at construction.
    pub fn endpoints(&self) -> [Vec2; 2] {
        self.endpoints
    }

    /// Local-space vertices (relative to the midpoint).
    pub fn vertices(&self) -> &[[f32; 2]; 2] {
        &self.vertices
    }

    pub fn model_matrix(&self) -> Mat4 {
        self.state.model()
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.state.view()
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.state.projection()
    }

    pub(crate) fn translate_by(&mut self, delta: Vec2) {
        self.state.translate_by(delta);
    }

    pub(crate) fn rescale(&mut self, sx: f32, sy: f32) {
        self.state.rescale(sx, sy);
    }

    pub(crate) fn rendered_angle(&self) -> f32 {
        self.state.rendered_angle()
    }
}

impl Shape for Segment {
    fn set_position(&mut self, x: f32, y: f32) {
        self.state.set_position(x, y);
    }

    fn rotate(&mut self, angle: f32) {
        self.state.rotate(angle);
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.state.scale(sx, sy);
    }

    fn set_color(&mut self, color: Color) {
        self.state.set_color(color);
    }

    fn color(&self) -> Color {
        self.state.color()
    }

    fn ncolor(&self) -> [f32; 4] {
        self.state.ncolor()
    }

    fn attach_to_world(&mut self, world: &dyn World) {
        self.state.attach_to_world(world);
    }

    fn center(&self) -> Vec2 {
        self.state.center()
    }

    fn size(&self) -> Vec2 {
        self.state.size()
    }

    fn angle(&self) -> f32 {
        self.state.angle()
    }

    fn scale_factor(&self) -> Vec2 {
        self.state.scale_factor()
    }

    fn draw(&self, painter: &Painter<'_>) {
        painter.programs().segment_program.draw(
            painter.ctx(),
            painter.target(),
            &SegmentDraw {
                vertices: &self.vertices,
                color: self.state.ncolor(),
                matrices: Matrices {
                    model: self.model_matrix(),
                    view: self.view_matrix(),
                    projection: self.projection_matrix(),
                },
            },
        );
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.state, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    fn world_point(seg: &Segment, v: [f32; 2]) -> Vec2 {
        let p = seg.model_matrix() * Vec4::new(v[0], v[1], 0.0, 1.0);
        Vec2::new(p.x, p.y)
    }

    #[test]
    fn center_is_midpoint_and_size_is_delta() {
        let s = Segment::new(10.0, 15.0, 20.0, 20.0);
        assert_eq!(s.center(), Vec2::new(15.0, 17.5));
        assert_eq!(s.size(), Vec2::new(10.0, 5.0));
    }

    #[test]
    fn size_is_absolute_for_reversed_endpoints() {
        let s = Segment::new(20.0, 20.0, 10.0, 15.0);
        assert_eq!(s.size(), Vec2::new(10.0, 5.0));
        assert_eq!(s.center(), Vec2::new(15.0, 17.5));
    }

    #[test]
    fn initial_model_places_vertices_on_endpoints() {
        let s = Segment::new(81.5, -40.0, 238.5, 44.0);
        let [a, b] = s.endpoints();
        assert_eq!(world_point(&s, s.vertices()[0]), a);
        assert_eq!(world_point(&s, s.vertices()[1]), b);
    }

    #[test]
    fn moving_keeps_length() {
        let mut s = Segment::new(0.0, 0.0, 10.0, 0.0);
        s.set_position(100.0, 50.0);
        assert_eq!(world_point(&s, s.vertices()[0]), Vec2::new(95.0, 50.0));
        assert_eq!(world_point(&s, s.vertices()[1]), Vec2::new(105.0, 50.0));
    }

    #[test]
    fn default_color_is_blue() {
        assert_eq!(Segment::new(0.0, 0.0, 1.0, 1.0).color(), DEFAULT_COLOR);
        let red = Segment::with_color(0.0, 0.0, 1.0, 1.0, Color::RED);
        assert_eq!(red.ncolor(), [1.0, 0.0, 0.0, 1.0]);
    }
}
