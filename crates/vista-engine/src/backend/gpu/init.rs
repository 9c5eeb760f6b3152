/// Device request for [`GpuBackend`](super::GpuBackend).
///
/// Captures never need more than the defaults; `presentation` only matters
/// for backends created with a window.
#[derive(Debug, Clone)]
pub struct GpuInit {
    pub power_preference: wgpu::PowerPreference,
    pub features: wgpu::Features,
    pub limits: wgpu::Limits,
    pub presentation: Presentation,
}

impl GpuInit {
    /// Low-power adapter with downlevel limits, for offscreen captures on
    /// integrated or software adapters.
    pub fn offscreen() -> Self {
        Self {
            power_preference: wgpu::PowerPreference::LowPower,
            limits: wgpu::Limits::downlevel_defaults(),
            ..Self::default()
        }
    }
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            power_preference: wgpu::PowerPreference::HighPerformance,
            features: wgpu::Features::empty(),
            limits: wgpu::Limits::default(),
            presentation: Presentation::default(),
        }
    }
}

/// Swapchain settings of a `Native` window.
#[derive(Debug, Clone)]
pub struct Presentation {
    /// Pick an sRGB swapchain format when the surface offers one. The capture
    /// target stays `Rgba8Unorm` regardless.
    pub prefer_srgb: bool,
    pub mode: wgpu::PresentMode,
    /// Falls back to the first supported mode when unsupported or `None`.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,
    /// Frames queued ahead of the display.
    pub frame_latency: u32,
}

impl Default for Presentation {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            frame_latency: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offscreen_keeps_presentation_defaults() {
        let init = GpuInit::offscreen();
        assert_eq!(init.power_preference, wgpu::PowerPreference::LowPower);
        assert!(init.features.is_empty());
        assert_eq!(init.presentation.mode, wgpu::PresentMode::Fifo);
        assert_eq!(init.presentation.frame_latency, 2);
    }
}
