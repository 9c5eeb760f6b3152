//! Contracts between the window and a rendering engine.
//!
//! The window owns one [`Surface`] and at most one [`Renderer`], both created
//! through a [`Backend`]. Renderers come in two variants sharing the
//! [`SceneRenderer`] surface; the coloring-capable one adds
//! [`ColoringRenderer`].

mod backend;
mod coloring;
mod renderer;
mod settings;
mod surface;

pub use backend::Backend;
pub use coloring::{ColoringSource, DataArrayInfo};
pub use renderer::{ColoringRenderer, Renderer, RendererId, RendererKind, SceneRenderer};
pub use settings::{
    BackgroundSettings, ColorSource, ColoringPlan, EffectSettings, FramePlan, GridSettings,
    InteractionSettings, LightSetup, MaterialSettings, MaterialTextures, Overlay, PrimitiveStyle,
    RaytracingSettings, RenderPass, Representation, ScalarColoring, UiSettings,
};
pub use surface::{CaptureFormat, Framebuffer, RowOrder, Surface, WindowType};
