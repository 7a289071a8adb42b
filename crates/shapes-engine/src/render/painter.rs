use crate::coords::Viewport;
use crate::paint::Color;
use crate::shapes::Shape;

use super::programs::ShapePrograms;
use super::{RenderCtx, RenderTarget};

/// Owns the shape programs and rebuilds them when the target format changes.
///
/// Programs are created on first use, so a renderer can be constructed before
/// any device exists.
#[derive(Default)]
pub struct ShapeRenderer {
    programs_format: Option<wgpu::TextureFormat>,
    programs: Option<ShapePrograms>,
}

impl ShapeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a painter drawing into `target`.
    pub fn painter<'a>(
        &'a mut self,
        ctx: &'a RenderCtx<'a>,
        target: &'a RenderTarget<'a>,
    ) -> Painter<'a> {
        let programs = self.ensure_programs(ctx);
        Painter {
            ctx,
            target,
            programs,
        }
    }

    fn ensure_programs(&mut self, ctx: &RenderCtx<'_>) -> &ShapePrograms {
        if self.programs_format != Some(ctx.surface_format) {
            self.programs = None;
            self.programs_format = Some(ctx.surface_format);
        }
        self.programs.get_or_insert_with(|| ShapePrograms::new(ctx))
    }
}

/// Draw context handed to [`Shape::draw`].
pub struct Painter<'a> {
    ctx: &'a RenderCtx<'a>,
    target: &'a RenderTarget<'a>,
    programs: &'a ShapePrograms,
}

impl<'a> Painter<'a> {
    /// Draws `shape` (and, for groups, all of its children).
    #[inline]
    pub fn draw(&self, shape: &impl Shape) {
        shape.draw(self);
    }

    /// Clears the whole target to `color`.
    pub fn clear(&self, color: Color) {
        super::clear(self.ctx, self.target, color);
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.ctx.viewport
    }

    #[inline]
    pub fn ctx(&self) -> &RenderCtx<'a> {
        self.ctx
    }

    #[inline]
    pub(crate) fn target(&self) -> &RenderTarget<'a> {
        self.target
    }

    #[inline]
    pub(crate) fn programs(&self) -> &ShapePrograms {
        self.programs
    }
}
