use anyhow::{Context, Result};

use super::GpuInit;

/// Device and queue shared by the surfaces of one backend.
///
/// Instance and adapter are only known when the context was created here;
/// a host-supplied device comes without them.
pub struct GpuContext {
    instance: Option<wgpu::Instance>,
    adapter: Option<wgpu::Adapter>,
    device: wgpu::Device,
    queue: wgpu::Queue,
}

impl GpuContext {
    /// Creates an instance on every available platform backend.
    pub fn create_instance() -> wgpu::Instance {
        wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        })
    }

    /// Acquires an adapter, device and queue from `instance`.
    ///
    /// `compatible_surface` is the presented surface, if any. Adapter/device
    /// acquisition is asynchronous under wgpu.
    pub async fn request(
        instance: wgpu::Instance,
        init: &GpuInit,
        compatible_surface: Option<&wgpu::Surface<'_>>,
    ) -> Result<Self> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: init.power_preference,
                compatible_surface,
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("vista-engine device"),
                required_features: init.features,
                required_limits: init.limits.clone(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        log::debug!("using GPU adapter {:?}", adapter.get_info().name);

        Ok(Self {
            instance: Some(instance),
            adapter: Some(adapter),
            device,
            queue,
        })
    }

    /// Wraps a device and queue owned by the host application.
    #[cfg(feature = "external-rendering")]
    pub fn from_host(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        Self {
            instance: None,
            adapter: None,
            device,
            queue,
        }
    }

    pub fn instance(&self) -> Option<&wgpu::Instance> {
        self.instance.as_ref()
    }

    pub fn adapter(&self) -> Option<&wgpu::Adapter> {
        self.adapter.as_ref()
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }
}
