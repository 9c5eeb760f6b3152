use std::fmt;
use std::path::Path;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::camera::SharedCameraState;
use crate::coords::{Projector, Viewport};

use super::{
    BackgroundSettings, ColoringSource, EffectSettings, FramePlan, GridSettings,
    InteractionSettings, MaterialSettings, PrimitiveStyle, RaytracingSettings, Representation,
    ScalarColoring, UiSettings,
};

/// Process-unique renderer identity.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct RendererId(u64);

impl RendererId {
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for RendererId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Renderer variant.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum RendererKind {
    Plain,
    Coloring,
}

impl RendererKind {
    pub fn for_coloring(with_coloring: bool) -> Self {
        if with_coloring {
            RendererKind::Coloring
        } else {
            RendererKind::Plain
        }
    }

    pub fn has_coloring(self) -> bool {
        self == RendererKind::Coloring
    }
}

impl fmt::Display for RendererKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RendererKind::Plain => f.write_str("plain"),
            RendererKind::Coloring => f.write_str("coloring"),
        }
    }
}

/// Capabilities shared by both renderer variants.
///
/// Mutators are grouped the way options are: one call per option group.
pub trait SceneRenderer: Projector {
    fn id(&self) -> RendererId;

    /// Projection state bound to the window camera.
    fn camera_state(&self) -> SharedCameraState;

    /// Directory for persisted intermediate artifacts.
    fn set_cache_path(&mut self, path: &Path);

    /// Builds the renderer's scene graph. `up_direction` is e.g. `"+Y"` or `"-Z"`.
    fn initialize(&mut self, up_direction: &str);

    /// Drawable size, updated by the surface on attach and resize.
    fn set_viewport(&mut self, viewport: Viewport);

    /// Creates the lights if they do not exist yet.
    fn update_lights(&mut self);

    /// Recomputes derived state (actor visibility, passes, lighting).
    fn update_actors(&mut self);

    /// Axis orientation widget. It references the renderer and must be
    /// disabled before the renderer is released.
    fn show_axis(&mut self, show: bool);
    fn is_axis_visible(&self) -> bool;

    fn set_interaction(&mut self, interaction: InteractionSettings);
    fn set_primitive_style(&mut self, style: PrimitiveStyle);
    fn set_ui(&mut self, ui: UiSettings);
    fn set_raytracing(&mut self, raytracing: RaytracingSettings);
    fn set_effects(&mut self, effects: EffectSettings);
    fn set_background(&mut self, background: BackgroundSettings);
    /// Overrides the background color only.
    fn set_background_color(&mut self, rgb: [f64; 3]);
    fn set_light_intensity(&mut self, intensity: f64);
    fn set_font_file(&mut self, path: &str);
    fn set_grid(&mut self, grid: GridSettings);

    /// State derived by the last `update_actors`.
    fn plan(&self) -> &FramePlan;

    /// Called by the surface right before drawing a frame.
    fn begin_frame(&mut self) -> FramePlan;

    /// Human-readable description of the scene and camera.
    fn scene_description(&self) -> String;
}

/// Additional capabilities of the coloring-capable renderer.
pub trait ColoringRenderer: SceneRenderer {
    fn set_material(&mut self, material: MaterialSettings);
    fn set_scalar_coloring(&mut self, coloring: ScalarColoring);
    fn set_representation(&mut self, representation: Representation);

    /// Scene data used to resolve the coloring array.
    fn set_importer(&mut self, source: Option<Rc<dyn ColoringSource>>);

    /// Human-readable description of the active coloring; empty when coloring
    /// is not requested.
    fn coloring_description(&self) -> String;
}

/// The renderer attached to a window, tagged by variant.
///
/// Changing variant always means dropping this value and creating another.
pub enum Renderer {
    Plain(Box<dyn SceneRenderer>),
    Coloring(Box<dyn ColoringRenderer>),
}

impl Renderer {
    pub fn kind(&self) -> RendererKind {
        match self {
            Renderer::Plain(_) => RendererKind::Plain,
            Renderer::Coloring(_) => RendererKind::Coloring,
        }
    }

    pub fn id(&self) -> RendererId {
        self.scene().id()
    }

    pub fn scene(&self) -> &dyn SceneRenderer {
        match self {
            Renderer::Plain(r) => r.as_ref(),
            Renderer::Coloring(r) => r.as_ref(),
        }
    }

    pub fn scene_mut(&mut self) -> &mut (dyn SceneRenderer + 'static) {
        match self {
            Renderer::Plain(r) => r.as_mut(),
            Renderer::Coloring(r) => r.as_mut(),
        }
    }

    pub fn coloring(&self) -> Option<&dyn ColoringRenderer> {
        match self {
            Renderer::Plain(_) => None,
            Renderer::Coloring(r) => Some(r.as_ref()),
        }
    }

    pub fn coloring_mut(&mut self) -> Option<&mut (dyn ColoringRenderer + 'static)> {
        match self {
            Renderer::Plain(_) => None,
            Renderer::Coloring(r) => Some(r.as_mut()),
        }
    }
}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderer")
            .field("kind", &self.kind())
            .field("id", &self.id())
            .finish()
    }
}
