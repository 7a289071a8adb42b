//! Per-kind GPU programs (pipeline + bind group layout) for shapes.

mod box_program;
mod common;
mod segment_program;

pub(crate) use box_program::{BoxDraw, BoxProgram, BoxTexturing};
pub(crate) use common::{submit_and_wait, Matrices};
pub(crate) use segment_program::{SegmentDraw, SegmentProgram};

use crate::render::RenderCtx;

/// Programs for every shape kind, built for one target format.
pub(crate) struct ShapePrograms {
    pub box_program: BoxProgram,
    pub segment_program: SegmentProgram,
}

impl ShapePrograms {
    pub(crate) fn new(ctx: &RenderCtx<'_>) -> Self {
        Self {
            box_program: BoxProgram::new(ctx),
            segment_program: SegmentProgram::new(ctx),
        }
    }
}
