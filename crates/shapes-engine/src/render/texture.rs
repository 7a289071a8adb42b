//! Texture loading for textured boxes.

use std::path::Path;

use anyhow::{Context, Result};

/// Bytes per pixel for RGBA textures.
const BYTES_PER_PIXEL: u32 = 4;

/// A GPU texture with its view and sampler.
///
/// Boxes hold textures through `Arc<Texture>`; the texture lives as long as
/// the last box (or caller) referencing it.
#[derive(Debug)]
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    /// Decodes an image file (PNG, JPEG, BMP) into a texture.
    pub fn from_path(device: &wgpu::Device, queue: &wgpu::Queue, path: &Path) -> Result<Self> {
        let img = image::open(path)
            .with_context(|| format!("failed to decode texture image {}", path.display()))?;
        let label = path.to_string_lossy();
        Self::from_image(device, queue, &img.to_rgba8(), Some(&label))
    }

    /// Uploads a decoded RGBA image.
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        img: &image::RgbaImage,
        label: Option<&str>,
    ) -> Result<Self> {
        Self::from_rgba(device, queue, img.as_raw(), img.dimensions(), label)
    }

    /// Creates a texture from raw, tightly packed RGBA bytes (first row on top).
    pub fn from_rgba(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        rgba: &[u8],
        (width, height): (u32, u32),
        label: Option<&str>,
    ) -> Result<Self> {
        anyhow::ensure!(
            width > 0 && height > 0,
            "invalid texture dimensions {width}x{height}"
        );

        let max = device.limits().max_texture_dimension_2d;
        anyhow::ensure!(
            width <= max && height <= max,
            "texture {width}x{height} exceeds the device limit of {max} pixels per side"
        );

        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(BYTES_PER_PIXEL as usize))
            .context("texture dimensions overflow")?;
        anyhow::ensure!(
            rgba.len() == expected,
            "texture buffer size mismatch: expected {expected} bytes, got {}",
            rgba.len()
        );

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label,
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            // Unconverted texels, like GL ES 2 without sRGB extensions.
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(BYTES_PER_PIXEL * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("shapes texture sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        log::debug!("texture {:?} uploaded ({width}x{height})", label.unwrap_or("<unnamed>"));

        Ok(Self {
            texture,
            view,
            sampler,
            width,
            height,
        })
    }

    /// 1x1 opaque white texture.
    pub fn white_pixel(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let size = wgpu::Extent3d {
            width: 1,
            height: 1,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("shapes white pixel"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &[0xff; BYTES_PER_PIXEL as usize],
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(BYTES_PER_PIXEL),
                rows_per_image: Some(1),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("shapes white pixel sampler"),
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
            width: 1,
            height: 1,
        }
    }
}
