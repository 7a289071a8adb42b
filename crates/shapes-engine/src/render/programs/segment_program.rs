use crate::render::{RenderCtx, RenderTarget};

use super::common::{
    begin_load_pass, color_target, repeat_color, stream_layout, submit_and_wait, uniform_buffer,
    uniform_entry, vertex_buffer, Matrices, COLOR_ATTRS, POS_ATTRS,
};

/// Per-draw inputs for [`SegmentProgram::draw`].
pub(crate) struct SegmentDraw<'a> {
    pub vertices: &'a [[f32; 2]; 2],
    pub color: [f32; 4],
    pub matrices: Matrices,
}

/// Program for single line segments (position + color, no texture).
pub(crate) struct SegmentProgram {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
}

impl SegmentProgram {
    pub(crate) fn new(ctx: &RenderCtx<'_>) -> Self {
        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shapes segment shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/segment.wgsl").into()),
        });

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("shapes segment bgl"),
                    entries: &[uniform_entry(wgpu::ShaderStages::VERTEX)],
                });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("shapes segment pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("shapes segment pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[
                    stream_layout(&POS_ATTRS, std::mem::size_of::<[f32; 2]>()),
                    stream_layout(&COLOR_ATTRS, std::mem::size_of::<[f32; 4]>()),
                ],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(color_target(ctx.surface_format))],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!("segment program built for {:?}", ctx.surface_format);

        Self {
            pipeline,
            bind_group_layout,
        }
    }

    /// Draws one segment into `target` and waits for completion.
    pub(crate) fn draw(
        &self,
        ctx: &RenderCtx<'_>,
        target: &RenderTarget<'_>,
        segment: &SegmentDraw<'_>,
    ) {
        let colors: [[f32; 4]; 2] = repeat_color(segment.color);

        let pos_vbo = vertex_buffer(ctx, "shapes segment pos", bytemuck::cast_slice(segment.vertices));
        let color_vbo = vertex_buffer(ctx, "shapes segment color", bytemuck::cast_slice(&colors));
        let ubo = uniform_buffer(ctx, "shapes segment ubo", &segment.matrices.uniform(0.0));

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("shapes segment bind group"),
            layout: &self.bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.as_entire_binding(),
            }],
        });

        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("shapes segment encoder"),
            });

        {
            let mut rpass = begin_load_pass(&mut encoder, target, "shapes segment pass");
            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &bind_group, &[]);
            rpass.set_vertex_buffer(0, pos_vbo.slice(..));
            rpass.set_vertex_buffer(1, color_vbo.slice(..));
            rpass.draw(0..2, 0..1);
        }

        log::trace!("segment drawn");
        submit_and_wait(ctx, encoder);
    }
}
