//! Shared GPU types and utilities used by the shape programs.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::render::{RenderCtx, RenderTarget};

// ── blend ─────────────────────────────────────────────────────────────────

/// Fragments overwrite the target, matching GL's default (blending off).
pub(super) fn color_target(format: wgpu::TextureFormat) -> wgpu::ColorTargetState {
    wgpu::ColorTargetState {
        format,
        blend: Some(wgpu::BlendState::REPLACE),
        write_mask: wgpu::ColorWrites::ALL,
    }
}

// ── matrix uniform ────────────────────────────────────────────────────────

/// Matrices a shape is drawn with.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct Matrices {
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
}

impl Matrices {
    pub(super) fn uniform(&self, tex_ratio: f32) -> ShapeUniform {
        ShapeUniform {
            model: self.model.to_cols_array_2d(),
            view: self.view.to_cols_array_2d(),
            projection: self.projection.to_cols_array_2d(),
            tex_ratio,
            _pad: [0.0; 3],
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct ShapeUniform {
    pub model: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub tex_ratio: f32,
    pub _pad: [f32; 3], // 16-byte alignment
}

/// Returns the `wgpu` minimum binding size for the shape uniform buffer.
pub(super) fn shape_ubo_min_binding_size() -> std::num::NonZeroU64 {
    std::num::NonZeroU64::new(std::mem::size_of::<ShapeUniform>() as u64)
        .expect("ShapeUniform has non-zero size by construction")
}

pub(super) fn uniform_entry(visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding: 0,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: Some(shape_ubo_min_binding_size()),
        },
        count: None,
    }
}

// ── vertex streams ────────────────────────────────────────────────────────

/// `pos` attribute: one `vec2` per vertex.
pub(super) const POS_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];
/// `color` attribute: normalized RGBA per vertex.
pub(super) const COLOR_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x4];
/// `texIn` attribute: UV per vertex.
pub(super) const TEX_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![2 => Float32x2];

pub(super) fn stream_layout(
    attributes: &'static [wgpu::VertexAttribute],
    stride: usize,
) -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: stride as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes,
    }
}

/// Same normalized color repeated for `N` vertices.
pub(super) fn repeat_color<const N: usize>(color: [f32; 4]) -> [[f32; 4]; N] {
    [color; N]
}

pub(super) fn vertex_buffer(ctx: &RenderCtx<'_>, label: &str, contents: &[u8]) -> wgpu::Buffer {
    use wgpu::util::DeviceExt;

    ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents,
        usage: wgpu::BufferUsages::VERTEX,
    })
}

pub(super) fn uniform_buffer(ctx: &RenderCtx<'_>, label: &str, uniform: &ShapeUniform) -> wgpu::Buffer {
    use wgpu::util::DeviceExt;

    ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::bytes_of(uniform),
        usage: wgpu::BufferUsages::UNIFORM,
    })
}

// ── passes ────────────────────────────────────────────────────────────────

/// Begins a pass that keeps the existing target contents.
pub(super) fn begin_load_pass<'e>(
    encoder: &'e mut wgpu::CommandEncoder,
    target: &RenderTarget<'_>,
    label: &str,
) -> wgpu::RenderPass<'e> {
    encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target.color_view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Load,
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
        multiview_mask: None,
    })
}

/// Submits `encoder` and blocks until the GPU has executed it.
///
/// Every draw ends here, so a draw call returns only once its pixels are in
/// the target. Screenshots taken right after a draw are deterministic.
pub(crate) fn submit_and_wait(ctx: &RenderCtx<'_>, encoder: wgpu::CommandEncoder) {
    ctx.queue.submit(std::iter::once(encoder.finish()));
    if let Err(err) = ctx.device.poll(wgpu::PollType::wait_indefinitely()) {
        log::warn!("waiting for GPU work failed: {err}");
    }
}
