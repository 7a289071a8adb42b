//! Color model shared by shapes and renderers.

pub mod color;

pub use color::Color;
