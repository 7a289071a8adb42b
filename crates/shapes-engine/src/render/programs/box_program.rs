use crate::render::{RenderCtx, RenderTarget, Texture};

use super::common::{
    begin_load_pass, color_target, repeat_color, stream_layout, submit_and_wait, uniform_buffer,
    uniform_entry, vertex_buffer, Matrices, COLOR_ATTRS, POS_ATTRS, TEX_ATTRS,
};

/// Texture sampling inputs for a box draw.
#[derive(Copy, Clone)]
pub(crate) struct BoxTexturing<'a> {
    pub texture: &'a Texture,
    pub tex_coords: &'a [[f32; 2]; 4],
}

/// Per-draw inputs for [`BoxProgram::draw`].
pub(crate) struct BoxDraw<'a> {
    pub vertices: &'a [[f32; 2]; 4],
    pub color: [f32; 4],
    pub matrices: Matrices,
    pub texturing: Option<BoxTexturing<'a>>,
}

/// Program for filled, optionally textured quads drawn as a 4-vertex
/// triangle strip.
///
/// Bindings:
/// - 0: matrices + `tex_ratio` uniform
/// - 1: texture (a white pixel when the box has none)
/// - 2: sampler
pub(crate) struct BoxProgram {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    blank: Texture,
}

impl BoxProgram {
    pub(crate) fn new(ctx: &RenderCtx<'_>) -> Self {
        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shapes box shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/box.wgsl").into()),
        });

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("shapes box bgl"),
                    entries: &[
                        uniform_entry(wgpu::ShaderStages::VERTEX_FRAGMENT),
                        wgpu::BindGroupLayoutEntry {
                            binding: 1,
                            visibility: wgpu::ShaderStages::FRAGMENT,
                            ty: wgpu::BindingType::Texture {
                                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                                view_dimension: wgpu::TextureViewDimension::D2,
                                multisampled: false,
                            },
                            count: None,
                        },
                        wgpu::BindGroupLayoutEntry {
                            binding: 2,
                            visibility: wgpu::ShaderStages::FRAGMENT,
                            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                            count: None,
                        },
                    ],
                });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("shapes box pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("shapes box pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[
                    stream_layout(&POS_ATTRS, std::mem::size_of::<[f32; 2]>()),
                    stream_layout(&COLOR_ATTRS, std::mem::size_of::<[f32; 4]>()),
                    stream_layout(&TEX_ATTRS, std::mem::size_of::<[f32; 2]>()),
                ],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(color_target(ctx.surface_format))],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
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

        log::debug!("box program built for {:?}", ctx.surface_format);

        Self {
            pipeline,
            bind_group_layout,
            blank: Texture::white_pixel(ctx.device, ctx.queue),
        }
    }

    /// Draws one box into `target` and waits for completion.
    pub(crate) fn draw(&self, ctx: &RenderCtx<'_>, target: &RenderTarget<'_>, box_draw: &BoxDraw<'_>) {
        let (texture, tex_coords, tex_ratio) = match box_draw.texturing {
            Some(t) => (t.texture, *t.tex_coords, 1.0),
            None => (&self.blank, [[0.0; 2]; 4], 0.0),
        };

        let colors: [[f32; 4]; 4] = repeat_color(box_draw.color);

        let pos_vbo = vertex_buffer(ctx, "shapes box pos", bytemuck::cast_slice(box_draw.vertices));
        let color_vbo = vertex_buffer(ctx, "shapes box color", bytemuck::cast_slice(&colors));
        let tex_vbo = vertex_buffer(ctx, "shapes box tex", bytemuck::cast_slice(&tex_coords));
        let ubo = uniform_buffer(ctx, "shapes box ubo", &box_draw.matrices.uniform(tex_ratio));

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("shapes box bind group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&texture.sampler),
                },
            ],
        });

        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("shapes box encoder"),
            });

        {
            let mut rpass = begin_load_pass(&mut encoder, target, "shapes box pass");
            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &bind_group, &[]);
            rpass.set_vertex_buffer(0, pos_vbo.slice(..));
            rpass.set_vertex_buffer(1, color_vbo.slice(..));
            rpass.set_vertex_buffer(2, tex_vbo.slice(..));
            rpass.draw(0..4, 0..1);
        }

        log::trace!("box drawn (textured: {})", box_draw.texturing.is_some());
        submit_and_wait(ctx, encoder);
    }
}
