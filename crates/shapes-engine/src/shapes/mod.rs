//! Transformable, colorable, drawable 2D shapes.
//!
//! Leaf shapes (`BoxShape`, `Segment`) share their transform/color state
//! through a composed `ShapeState`. `Group` holds an ordered list of
//! `Element`s (a closed set of shape kinds) and moves them as one rigid body.
//!
//! Extending the set of shapes:
//! - add a shape module here, composing `ShapeState`
//! - add a program under `render::programs`
//! - add an `Element` variant and its `From` impl

mod box_shape;
mod group;
mod segment;
mod state;

pub use box_shape::BoxShape;
pub use group::{Element, Group};
pub use segment::Segment;

use crate::coords::{Rect, Vec2};
use crate::paint::Color;
use crate::render::Painter;
use crate::world::World;

/// Color given to new shapes unless a color is passed explicitly.
pub const DEFAULT_COLOR: Color = Color::BLUE;

/// Capability set shared by every shape kind.
///
/// None of these operations fail. A shape drawn before `attach_to_world`
/// renders with zero projection/view matrices (nothing visible).
pub trait Shape {
    /// Places the shape center at `(x, y)`.
    ///
    /// For leaf shapes the model matrix becomes a pure translation: a previous
    /// rotation is dropped from the matrix even though `angle` keeps reporting
    /// it.
    fn set_position(&mut self, x: f32, y: f32);

    /// Rotates around the current center to `angle` degrees (absolute, not
    /// cumulative).
    fn rotate(&mut self, angle: f32);

    /// Sets the per-axis scale factor (absolute, not cumulative).
    fn scale(&mut self, sx: f32, sy: f32);

    fn set_color(&mut self, color: Color);

    fn color(&self) -> Color;

    /// Color channels scaled to `[0, 1]`.
    fn ncolor(&self) -> [f32; 4] {
        self.color().normalized()
    }

    /// Copies the world's current projection and view matrices.
    fn attach_to_world(&mut self, world: &dyn World);

    fn center(&self) -> Vec2;

    /// Width and height, after scaling.
    fn size(&self) -> Vec2;

    /// Current angle in degrees.
    fn angle(&self) -> f32;

    fn scale_factor(&self) -> Vec2;

    /// Axis-aligned `center ± size / 2`.
    fn bounds(&self) -> Rect {
        Rect::from_center_size(self.center(), self.size())
    }

    /// Renders the shape; returns once the GPU has finished the draw.
    fn draw(&self, painter: &Painter<'_>);
}
