//! Built-in renderers and the renderer selection policy.
//!
//! [`StandardRenderer`] and [`StandardColoringRenderer`] implement the engine
//! traits without touching the GPU: they hold the option state, answer
//! projection queries from their camera, and derive the [`FramePlan`] that a
//! surface draws.
//!
//! [`FramePlan`]: crate::engine::FramePlan

mod axis;
mod coloring;
pub mod selector;
mod standard;
mod up;

pub use axis::AxisWidget;
pub use coloring::StandardColoringRenderer;
pub use selector::{Selection, select};
pub use standard::StandardRenderer;
pub use up::{Axis, InvalidUpDirection, UpDirection};

use crate::engine::{Renderer, RendererKind};

/// Creates a built-in renderer of the given variant.
pub fn create(kind: RendererKind) -> Renderer {
    match kind {
        RendererKind::Plain => Renderer::Plain(Box::new(StandardRenderer::new())),
        RendererKind::Coloring => Renderer::Coloring(Box::new(StandardColoringRenderer::new())),
    }
}
