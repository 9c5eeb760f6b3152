use std::rc::Rc;

use anyhow::{Context, Result, ensure};
use image::RgbaImage;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::window::Icon;

use crate::backend::headless::DEFAULT_SIZE;
use crate::coords::Viewport;
use crate::engine::{
    CaptureFormat, FramePlan, Framebuffer, RendererId, RowOrder, SceneRenderer, Surface,
    WindowType,
};

use super::GpuContext;
use super::present::{Presenter, SurfaceErrorAction};
use super::target::OffscreenTarget;

/// Surface drawing into an offscreen texture, optionally presented to a
/// winit window.
pub struct GpuSurface {
    ctx: Rc<GpuContext>,
    window_type: WindowType,
    presenter: Option<Presenter>,
    target: OffscreenTarget,
    position: (i32, i32),
    attached: Option<RendererId>,
}

impl GpuSurface {
    pub(crate) fn new(
        ctx: Rc<GpuContext>,
        window_type: WindowType,
        presenter: Option<Presenter>,
    ) -> Self {
        let (width, height) = match &presenter {
            Some(p) => (p.size().width, p.size().height),
            None => DEFAULT_SIZE,
        };
        let target = OffscreenTarget::new(ctx.device(), width, height);
        Self {
            ctx,
            window_type,
            presenter,
            target,
            position: (0, 0),
            attached: None,
        }
    }

    pub fn window_type(&self) -> WindowType {
        self.window_type
    }

    fn ensure_attached(&self, renderer: &dyn SceneRenderer) -> Result<()> {
        ensure!(
            self.attached == Some(renderer.id()),
            "renderer {} is not attached to this surface",
            renderer.id()
        );
        Ok(())
    }

    /// Records the frame into the offscreen target and returns the encoder.
    fn encode_offscreen(&self, plan: &FramePlan, alpha: f64) -> wgpu::CommandEncoder {
        let mut encoder = self
            .ctx
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("vista offscreen encoder"),
            });
        clear_pass(&mut encoder, self.target.view(), plan.background, alpha);
        encoder
    }

    fn present(&mut self, plan: &FramePlan) {
        let Some(presenter) = self.presenter.as_mut() else {
            return;
        };

        let frame = match presenter.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                log::debug!("skipping presentation: {err}");
                let action = presenter.handle_surface_error(self.ctx.device(), err);
                if action == SurfaceErrorAction::Fatal {
                    log::error!("window surface cannot be presented anymore");
                }
                return;
            }
        };

        let mut encoder = self
            .ctx
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("vista present encoder"),
            });
        clear_pass(&mut encoder, &frame.view, plan.background, 1.0);
        self.ctx.queue().submit(std::iter::once(encoder.finish()));
        presenter.present(frame);
    }
}

impl Surface for GpuSurface {
    fn size(&self) -> (u32, u32) {
        self.target.size()
    }

    fn set_size(&mut self, width: u32, height: u32) {
        if let Some(presenter) = self.presenter.as_mut() {
            let _ = presenter.window().request_inner_size(PhysicalSize::new(width, height));
            presenter.resize(self.ctx.device(), PhysicalSize::new(width, height));
        }
        if self.target.size() != (width.max(1), height.max(1)) {
            self.target = OffscreenTarget::new(self.ctx.device(), width, height);
        }
    }

    fn position(&self) -> (i32, i32) {
        self.presenter
            .as_ref()
            .and_then(|p| p.window().outer_position().ok())
            .map(|p| (p.x, p.y))
            .unwrap_or(self.position)
    }

    fn set_position(&mut self, x: i32, y: i32) {
        self.position = (x, y);
        if let Some(presenter) = &self.presenter {
            presenter
                .window()
                .set_outer_position(PhysicalPosition::new(x, y));
        }
    }

    fn set_title(&mut self, title: &str) {
        if let Some(presenter) = &self.presenter {
            presenter.window().set_title(title);
        }
    }

    fn set_icon(&mut self, icon: &RgbaImage) -> Result<()> {
        let Some(presenter) = &self.presenter else {
            return Ok(());
        };
        let (width, height) = icon.dimensions();
        let icon = Icon::from_rgba(icon.as_raw().clone(), width, height)
            .context("invalid window icon")?;
        presenter.window().set_window_icon(Some(icon));
        Ok(())
    }

    fn is_offscreen(&self) -> bool {
        self.presenter.is_none()
    }

    fn attach(&mut self, renderer: &mut dyn SceneRenderer) {
        let (width, height) = self.target.size();
        renderer.set_viewport(Viewport::new(width, height));
        self.attached = Some(renderer.id());
    }

    fn detach(&mut self, renderer: &mut dyn SceneRenderer) {
        if self.attached == Some(renderer.id()) {
            self.attached = None;
        }
    }

    fn attached(&self) -> Option<RendererId> {
        self.attached
    }

    fn render(&mut self, renderer: &mut dyn SceneRenderer) -> Result<()> {
        self.ensure_attached(renderer)?;
        let plan = renderer.begin_frame();

        let encoder = self.encode_offscreen(&plan, 1.0);
        self.ctx.queue().submit(std::iter::once(encoder.finish()));
        self.present(&plan);
        Ok(())
    }

    fn capture(
        &mut self,
        renderer: &mut dyn SceneRenderer,
        format: CaptureFormat,
    ) -> Result<Framebuffer> {
        self.ensure_attached(renderer)?;
        let plan = renderer.begin_frame();

        let alpha = match format {
            CaptureFormat::Rgb => 1.0,
            CaptureFormat::Rgba => 0.0,
        };
        let mut encoder = self.encode_offscreen(&plan, alpha);
        self.target.record_copy(&mut encoder);
        self.ctx.queue().submit(std::iter::once(encoder.finish()));

        let rgba = self.target.read(self.ctx.device())?;
        let pixels = match format {
            CaptureFormat::Rgba => rgba,
            CaptureFormat::Rgb => rgba
                .chunks_exact(4)
                .flat_map(|px| [px[0], px[1], px[2]])
                .collect(),
        };

        let (width, height) = self.target.size();
        Ok(Framebuffer {
            width,
            height,
            channels: format.channels(),
            row_order: RowOrder::TopDown,
            pixels,
        })
    }

    fn raise(&mut self) {
        if let Some(presenter) = &self.presenter {
            presenter.window().focus_window();
        }
    }
}

fn clear_pass(
    encoder: &mut wgpu::CommandEncoder,
    view: &wgpu::TextureView,
    rgb: [f64; 3],
    alpha: f64,
) {
    let _rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("vista background"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(wgpu::Color {
                    r: rgb[0],
                    g: rgb[1],
                    b: rgb[2],
                    a: alpha,
                }),
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
        multiview_mask: None,
    });
}
