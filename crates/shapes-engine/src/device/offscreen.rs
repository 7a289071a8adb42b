use std::sync::mpsc;

use anyhow::{Context, Result};

use crate::coords::Viewport;
use crate::render::RenderTarget;

const BYTES_PER_PIXEL: u32 = 4;

/// Color texture that can be rendered into and read back.
pub struct OffscreenTarget {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    width: u32,
    height: u32,
}

impl OffscreenTarget {
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Result<Self> {
        anyhow::ensure!(
            width > 0 && height > 0,
            "invalid offscreen target size {width}x{height}"
        );
        let max = device.limits().max_texture_dimension_2d;
        anyhow::ensure!(
            width <= max && height <= max,
            "offscreen target {width}x{height} exceeds the device limit of {max} pixels per side"
        );

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("shapes offscreen target"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Ok(Self {
            texture,
            view,
            width,
            height,
        })
    }

    #[inline]
    pub fn format(&self) -> wgpu::TextureFormat {
        Self::FORMAT
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        Viewport::from_pixels(self.width, self.height)
    }

    #[inline]
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    #[inline]
    pub fn target(&self) -> RenderTarget<'_> {
        RenderTarget::new(&self.view)
    }

    /// Copies the texture into host memory, blocking until the copy is done.
    pub fn read_rgba(&self, device: &wgpu::Device, queue: &wgpu::Queue) -> Result<image::RgbaImage> {
        let unpadded = self.width * BYTES_PER_PIXEL;
        let padded = padded_bytes_per_row(self.width);

        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("shapes readback buffer"),
            size: u64::from(padded) * u64::from(self.height),
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("shapes readback encoder"),
        });
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded),
                    rows_per_image: Some(self.height),
                },
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );
        queue.submit(Some(encoder.finish()));

        let slice = buffer.slice(..);
        let (tx, rx) = mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        device
            .poll(wgpu::PollType::wait_indefinitely())
            .context("device poll failed during readback")?;
        rx.recv()
            .context("readback callback dropped")?
            .context("failed to map readback buffer")?;

        let mut pixels = Vec::with_capacity((unpadded * self.height) as usize);
        {
            let mapped = slice.get_mapped_range();
            for row in mapped.chunks_exact(padded as usize) {
                pixels.extend_from_slice(&row[..unpadded as usize]);
            }
        }
        buffer.unmap();

        image::RgbaImage::from_raw(self.width, self.height, pixels)
            .context("readback buffer does not match target size")
    }
}

fn padded_bytes_per_row(width: u32) -> u32 {
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    (width * BYTES_PER_PIXEL).div_ceil(align) * align
}
