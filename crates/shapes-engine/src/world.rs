//! Camera-like suppliers of projection and view matrices.

pub use glam::Mat4;

use crate::coords::Viewport;

/// Source of the matrices a shape is rendered with.
///
/// Shapes copy both matrices when attached; later changes to the world are not
/// seen until the shape is attached again.
pub trait World {
    /// Projection matrix used to render the objects in the world.
    fn projection(&self) -> Mat4;

    /// View matrix (camera point of view).
    fn view(&self) -> Mat4;
}

/// Orthographic world for a `width` x `height` surface.
///
/// X spans `[0, width]` left to right; Y spans `[-height/2, height/2]` bottom
/// to top. A shape placed at `(width/2, 0)` is drawn in the middle of the
/// surface. One world unit maps to one pixel.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OrthoWorld {
    width: f32,
    height: f32,
    projection: Mat4,
    view: Mat4,
}

impl OrthoWorld {
    pub fn new(width: f32, height: f32) -> Self {
        let half_h = height / 2.0;
        Self {
            width,
            height,
            projection: Mat4::orthographic_rh(0.0, width, -half_h, half_h, -1.0, 1.0),
            view: Mat4::IDENTITY,
        }
    }

    pub fn from_viewport(viewport: Viewport) -> Self {
        Self::new(viewport.width, viewport.height)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// World-space point at the middle of the surface.
    #[inline]
    pub fn center(&self) -> crate::coords::Vec2 {
        crate::coords::Vec2::new(self.width / 2.0, 0.0)
    }
}

impl World for OrthoWorld {
    fn projection(&self) -> Mat4 {
        self.projection
    }

    fn view(&self) -> Mat4 {
        self.view
    }
}
