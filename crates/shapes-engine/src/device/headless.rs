use anyhow::{Context, Result};

use crate::render::RenderCtx;

use super::{GpuInit, OffscreenTarget};

/// Device and queue without a window.
///
/// Used for offscreen rendering: captures and GPU tests.
pub struct Headless {
    _instance: wgpu::Instance,
    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,
}

impl Headless {
    /// Requests any adapter, falling back to a software one if no hardware
    /// adapter is available.
    pub async fn new(init: &GpuInit) -> Result<Self> {
        let instance = init.instance();

        let mut adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .ok();

        if adapter.is_none() {
            log::debug!("no hardware adapter, trying fallback adapter");
            adapter = instance
                .request_adapter(&wgpu::RequestAdapterOptions {
                    power_preference: wgpu::PowerPreference::LowPower,
                    compatible_surface: None,
                    force_fallback_adapter: true,
                })
                .await
                .ok();
        }

        let adapter = adapter.context("no GPU adapter available for offscreen rendering")?;

        let info = adapter.get_info();
        log::info!("headless adapter {} ({:?})", info.name, info.backend);

        let (device, queue) = init.request_device(&adapter, "shapes headless device").await?;

        Ok(Self {
            _instance: instance,
            adapter,
            device,
            queue,
        })
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn adapter_info(&self) -> wgpu::AdapterInfo {
        self.adapter.get_info()
    }

    /// Render context sized and formatted for `target`.
    pub fn render_ctx(&self, target: &OffscreenTarget) -> RenderCtx<'_> {
        RenderCtx::new(&self.device, &self.queue, target.format(), target.viewport())
    }

    /// Reads `target` back into an image (first row on top).
    pub fn capture(&self, target: &OffscreenTarget) -> Result<image::RgbaImage> {
        target.read_rgba(&self.device, &self.queue)
    }
}
