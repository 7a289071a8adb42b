//! 2D shapes on the GPU.
//!
//! Boxes, segments and groups of shapes are positioned, rotated, scaled and
//! colored in world coordinates, then drawn through a [`render::Painter`]
//! using the projection and view matrices of a [`world::World`].
//!
//! Shapes are plain CPU-side values; only drawing needs a device. The window
//! runtime (`window`, `core`) and the offscreen path (`device::Headless`) both
//! hand out painters.

pub mod coords;
pub mod core;
pub mod device;
pub mod logging;
pub mod paint;
pub mod render;
pub mod shapes;
pub mod window;
pub mod world;

pub use coords::{Rect, Vec2, Viewport};
pub use paint::Color;
pub use shapes::{BoxShape, Element, Group, Segment, Shape};
pub use world::{OrthoWorld, World};
