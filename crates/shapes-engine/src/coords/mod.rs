//! Coordinate and geometry types shared by shapes and renderers.
//!
//! Shape space:
//! - world units (the provided worlds map one unit to one pixel)
//! - +X right, +Y up
//!
//! Projection to clip space is owned by the `World` a shape is attached to.

mod rect;
mod vec2;
mod viewport;

pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
