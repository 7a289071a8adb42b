use core::fmt;
use std::sync::Arc;

use glam::Mat4;

use crate::coords::Vec2;
use crate::paint::Color;
use crate::render::programs::{BoxDraw, BoxTexturing, Matrices};
use crate::render::{Painter, Texture};
use crate::world::World;

use super::state::ShapeState;
use super::{Shape, DEFAULT_COLOR};

/// Axis-aligned rectangle built around its center, optionally textured.
///
/// Vertices are fixed at construction, in triangle-strip order:
/// bottom-left, bottom-right, top-left, top-right.
#[derive(Debug, Clone)]
pub struct BoxShape {
    state: ShapeState,
    vertices: [[f32; 2]; 4],
    texture: Option<Arc<Texture>>,
    tex_coords: [[f32; 2]; 4],
}

impl BoxShape {
    /// Creates a `width` x `height` box centered at the origin, in
    /// [`DEFAULT_COLOR`].
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_color(width, height, DEFAULT_COLOR)
    }

    pub fn with_color(width: f32, height: f32, color: Color) -> Self {
        let (hw, hh) = (width / 2.0, height / 2.0);
        Self {
            state: ShapeState::new(Vec2::zero(), Vec2::new(width, height), color),
            vertices: [[-hw, -hh], [hw, -hh], [-hw, hh], [hw, hh]],
            texture: None,
            tex_coords: [[0.0; 2]; 4],
        }
    }

    /// Maps `texture` onto the box; `tex_coords` holds one UV pair per vertex,
    /// in vertex order. The texture fully replaces the vertex color.
    pub fn set_texture(&mut self, texture: Arc<Texture>, tex_coords: [[f32; 2]; 4]) {
        self.texture = Some(texture);
        self.tex_coords = tex_coords;
    }

    /// Returns to plain vertex coloring.
    pub fn clear_texture(&mut self) {
        self.texture = None;
        self.tex_coords = [[0.0; 2]; 4];
    }

    pub fn texture(&self) -> Option<&Arc<Texture>> {
        self.texture.as_ref()
    }

    pub fn tex_coords(&self) -> Option<&[[f32; 2]; 4]> {
        self.texture.as_ref().map(|_| &self.tex_coords)
    }

    /// Local-space vertices.
    pub fn vertices(&self) -> &[[f32; 2]; 4] {
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

    fn matrices(&self) -> Matrices {
        Matrices {
            model: self.model_matrix(),
            view: self.view_matrix(),
            projection: self.projection_matrix(),
        }
    }
}

impl Shape for BoxShape {
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
        let texturing = self.texture.as_deref().map(|texture| BoxTexturing {
            texture,
            tex_coords: &self.tex_coords,
        });

        painter.programs().box_program.draw(
            painter.ctx(),
            painter.target(),
            &BoxDraw {
                vertices: &self.vertices,
                color: self.state.ncolor(),
                matrices: self.matrices(),
                texturing,
            },
        );
    }
}

impl fmt::Display for BoxShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.state, f)
    }
}
