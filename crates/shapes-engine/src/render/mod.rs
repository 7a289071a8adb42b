//! GPU rendering subsystem.
//!
//! Shapes hold CPU-side state only; drawing goes through a [`Painter`], which
//! carries the device, the target and the per-kind programs.
//!
//! Convention:
//! - shape geometry is in world units, +Y up
//! - vertex shaders compute `projection * model * view * pos`
//! - every draw is submitted and waited on before it returns

mod ctx;
mod painter;
pub(crate) mod programs;
mod texture;

pub use ctx::{clear, RenderCtx, RenderTarget};
pub use painter::{Painter, ShapeRenderer};
pub use texture::Texture;
