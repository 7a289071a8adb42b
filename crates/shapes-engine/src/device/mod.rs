//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain)
//! - offscreen targets with CPU readback

mod error;
mod frame;
mod gpu;
mod headless;
mod offscreen;
mod surface;

pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use gpu::{Gpu, GpuInit};
pub use headless::Headless;
pub use offscreen::OffscreenTarget;
