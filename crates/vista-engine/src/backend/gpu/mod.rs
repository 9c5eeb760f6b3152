//! wgpu backend.
//!
//! Frames are drawn into an offscreen `Rgba8Unorm` texture that captures read
//! back. When the host hands over a winit window, `Native` windows also
//! present each frame and route title, size, position, icon and focus
//! requests to it.

mod context;
mod init;
mod present;
mod surface;
mod target;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use anyhow::{Context, Result};
use winit::window::Window;

pub use context::GpuContext;
pub use init::{GpuInit, Presentation};
pub use present::SurfaceErrorAction;
pub use surface::GpuSurface;

use present::Presenter;

use crate::engine::{Backend, Renderer, RendererKind, Surface, WindowType};
use crate::renderer;

pub struct GpuBackend {
    ctx: Rc<GpuContext>,
    /// Swapchain waiting for the `Native` surface, handed over once.
    presenter: RefCell<Option<Presenter>>,
}

impl GpuBackend {
    /// Creates an offscreen-only backend.
    pub fn new(init: GpuInit) -> Result<Self> {
        let instance = GpuContext::create_instance();
        let ctx = pollster::block_on(GpuContext::request(instance, &init, None))?;
        Ok(Self {
            ctx: Rc::new(ctx),
            presenter: RefCell::new(None),
        })
    }

    /// Creates a backend presenting `Native` windows to `window`.
    pub fn with_window(window: Arc<Window>, init: GpuInit) -> Result<Self> {
        let instance = GpuContext::create_instance();
        let surface = instance
            .create_surface(window.clone())
            .context("failed to create wgpu surface")?;
        let ctx = pollster::block_on(GpuContext::request(instance, &init, Some(&surface)))?;
        let presenter = Presenter::new(&ctx, window, surface, &init.presentation)?;
        Ok(Self {
            ctx: Rc::new(ctx),
            presenter: RefCell::new(Some(presenter)),
        })
    }

    /// Renders with a device and queue owned by the host application.
    #[cfg(feature = "external-rendering")]
    pub fn from_host(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        Self {
            ctx: Rc::new(GpuContext::from_host(device, queue)),
            presenter: RefCell::new(None),
        }
    }

    pub fn context(&self) -> &GpuContext {
        &self.ctx
    }
}

impl Backend for GpuBackend {
    fn create_surface(&self, window_type: WindowType) -> Result<Box<dyn Surface>> {
        let presenter = match window_type {
            WindowType::Native => {
                let presenter = self.presenter.borrow_mut().take();
                if presenter.is_none() {
                    log::warn!("no window to present to, rendering offscreen");
                }
                presenter
            }
            WindowType::None | WindowType::NativeOffscreen | WindowType::External => None,
        };
        log::debug!("creating GPU surface for {window_type} window");
        Ok(Box::new(GpuSurface::new(
            self.ctx.clone(),
            window_type,
            presenter,
        )))
    }

    fn create_renderer(&self, kind: RendererKind) -> Renderer {
        renderer::create(kind)
    }
}
