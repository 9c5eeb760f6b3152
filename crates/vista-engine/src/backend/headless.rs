//! CPU backend without any window.
//!
//! The surface keeps the window attributes it is given and produces frames
//! filled with the renderer's background color. It is what tests and
//! GPU-less environments render with.

use anyhow::{Result, ensure};
use image::RgbaImage;

use crate::coords::Viewport;
use crate::engine::{
    Backend, CaptureFormat, Framebuffer, Renderer, RendererId, RendererKind, RowOrder,
    SceneRenderer, Surface, WindowType,
};
use crate::renderer;

/// Size of a freshly created surface.
pub const DEFAULT_SIZE: (u32, u32) = (300, 300);

#[derive(Debug, Default, Copy, Clone)]
pub struct HeadlessBackend;

impl Backend for HeadlessBackend {
    fn create_surface(&self, window_type: WindowType) -> Result<Box<dyn Surface>> {
        log::debug!("creating headless surface for {window_type} window");
        Ok(Box::new(HeadlessSurface::new(window_type)))
    }

    fn create_renderer(&self, kind: RendererKind) -> Renderer {
        renderer::create(kind)
    }
}

#[derive(Debug)]
pub struct HeadlessSurface {
    window_type: WindowType,
    width: u32,
    height: u32,
    position: (i32, i32),
    title: String,
    icon_size: Option<(u32, u32)>,
    raised: u32,
    attached: Option<RendererId>,
    frames: u64,
}

impl HeadlessSurface {
    pub fn new(window_type: WindowType) -> Self {
        let (width, height) = DEFAULT_SIZE;
        Self {
            window_type,
            width,
            height,
            position: (0, 0),
            title: String::new(),
            icon_size: None,
            raised: 0,
            attached: None,
            frames: 0,
        }
    }

    pub fn window_type(&self) -> WindowType {
        self.window_type
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn icon_size(&self) -> Option<(u32, u32)> {
        self.icon_size
    }

    /// Number of times the surface was brought to the foreground.
    pub fn raise_count(&self) -> u32 {
        self.raised
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    fn ensure_attached(&self, renderer: &dyn SceneRenderer) -> Result<()> {
        ensure!(
            self.attached == Some(renderer.id()),
            "renderer {} is not attached to this surface",
            renderer.id()
        );
        Ok(())
    }
}

impl Surface for HeadlessSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn position(&self) -> (i32, i32) {
        self.position
    }

    fn set_position(&mut self, x: i32, y: i32) {
        self.position = (x, y);
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn set_icon(&mut self, icon: &RgbaImage) -> Result<()> {
        self.icon_size = Some(icon.dimensions());
        Ok(())
    }

    fn is_offscreen(&self) -> bool {
        true
    }

    fn attach(&mut self, renderer: &mut dyn SceneRenderer) {
        renderer.set_viewport(Viewport::new(self.width, self.height));
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
        renderer.begin_frame();
        self.frames += 1;
        Ok(())
    }

    fn capture(
        &mut self,
        renderer: &mut dyn SceneRenderer,
        format: CaptureFormat,
    ) -> Result<Framebuffer> {
        self.ensure_attached(renderer)?;
        let plan = renderer.begin_frame();
        self.frames += 1;

        let mut texel = plan.background.map(to_unorm8).to_vec();
        if format == CaptureFormat::Rgba {
            // Background is transparent.
            texel.push(0);
        }
        let count = self.width as usize * self.height as usize;

        Ok(Framebuffer {
            width: self.width,
            height: self.height,
            channels: format.channels(),
            row_order: RowOrder::BottomUp,
            pixels: texel.repeat(count),
        })
    }

    fn raise(&mut self) {
        self.raised += 1;
    }
}

pub(crate) fn to_unorm8(c: f64) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::renderer::StandardRenderer;

    fn attached_renderer(surface: &mut HeadlessSurface) -> StandardRenderer {
        let mut renderer = StandardRenderer::new();
        surface.attach(&mut renderer);
        renderer.initialize("+Y");
        renderer
    }

    #[test]
    fn attach_sets_renderer_viewport() {
        let mut surface = HeadlessSurface::new(WindowType::None);
        surface.set_size(64, 32);
        let renderer = attached_renderer(&mut surface);
        assert_eq!(renderer.viewport(), Viewport::new(64, 32));
        assert_eq!(surface.attached(), Some(renderer.id()));
    }

    #[test]
    fn refuses_to_render_detached_renderer() {
        let mut surface = HeadlessSurface::new(WindowType::None);
        let mut renderer = StandardRenderer::new();
        assert!(surface.render(&mut renderer).is_err());
    }

    #[test]
    fn capture_fills_background() {
        let mut surface = HeadlessSurface::new(WindowType::None);
        surface.set_size(4, 2);
        let mut renderer = attached_renderer(&mut surface);
        renderer.set_background_color([1.0, 0.0, 0.2]);

        let fb = surface.capture(&mut renderer, CaptureFormat::Rgb).unwrap();
        assert_eq!(fb.channels, 3);
        assert_eq!(fb.pixels.len(), 4 * 2 * 3);
        assert_eq!(&fb.pixels[..3], &[255, 0, 51]);

        let fb = surface.capture(&mut renderer, CaptureFormat::Rgba).unwrap();
        assert_eq!(fb.channels, 4);
        assert_eq!(&fb.pixels[..4], &[255, 0, 51, 0]);
        assert_eq!(surface.frames_rendered(), 2);
    }

    #[test]
    fn detach_ignores_other_renderers() {
        let mut surface = HeadlessSurface::new(WindowType::None);
        let renderer = attached_renderer(&mut surface);
        let mut other = StandardRenderer::new();
        surface.detach(&mut other);
        assert_eq!(surface.attached(), Some(renderer.id()));
    }
}
