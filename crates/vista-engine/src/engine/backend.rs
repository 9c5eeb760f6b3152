use super::{Renderer, RendererKind, Surface, WindowType};

/// Factory for the surface and renderers of one window.
pub trait Backend {
    /// Creates the surface for `window_type`.
    ///
    /// Only called once the window has validated that the type is supported by
    /// the build.
    fn create_surface(&self, window_type: WindowType) -> anyhow::Result<Box<dyn Surface>>;

    /// Creates a fresh, unattached renderer of the requested variant.
    fn create_renderer(&self, kind: RendererKind) -> Renderer;
}
