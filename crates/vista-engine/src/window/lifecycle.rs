use std::path::{Path, PathBuf};
use std::rc::Rc;

use glam::DVec3;

use crate::camera::Camera;
use crate::coords::{self, Viewport};
use crate::engine::{Backend, ColoringSource, Renderer, RendererKind, Surface, WindowType};
use crate::logging::{self, VerboseLevel};
use crate::options::OptionsProvider;
use crate::renderer::{Selection, select};
use crate::{Capabilities, WindowError};

use super::sync;

/// The render window: one surface, at most one renderer, and the camera
/// bound to it.
///
/// Initialization is lazy. The first call needing a renderer creates a plain
/// one; [`initialize`](Self::initialize) swaps variants when the coloring
/// capability changes.
pub struct Window {
    pub(super) options: Rc<dyn OptionsProvider>,
    pub(super) backend: Box<dyn Backend>,
    pub(super) capabilities: Capabilities,
    pub(super) window_type: WindowType,
    pub(super) surface: Box<dyn Surface>,
    pub(super) renderer: Option<Renderer>,
    pub(super) camera: Camera,
    pub(super) initialized: bool,
    pub(super) cache_path: Option<PathBuf>,
}

impl Window {
    /// Creates a window with the capabilities of this build.
    pub fn new(
        options: Rc<dyn OptionsProvider>,
        window_type: WindowType,
        backend: Box<dyn Backend>,
    ) -> Result<Self, WindowError> {
        Self::with_capabilities(options, window_type, backend, Capabilities::for_build())
    }

    pub fn with_capabilities(
        options: Rc<dyn OptionsProvider>,
        window_type: WindowType,
        backend: Box<dyn Backend>,
        capabilities: Capabilities,
    ) -> Result<Self, WindowError> {
        if window_type == WindowType::External && !capabilities.external_rendering {
            return Err(WindowError::NoWindow(
                "external rendering is not supported by this build".to_string(),
            ));
        }

        let surface = backend.create_surface(window_type)?;
        log::debug!("created {window_type} window");

        Ok(Self {
            options,
            backend,
            capabilities,
            window_type,
            surface,
            renderer: None,
            camera: Camera::new(),
            initialized: false,
            cache_path: None,
        })
    }

    /// Attaches a renderer with or without coloring support and (re)builds it.
    ///
    /// A renderer of the matching variant is reused; otherwise the current one
    /// is released before its replacement is created.
    pub fn initialize(&mut self, with_coloring: bool) -> Result<(), WindowError> {
        let up = self.options.get_as_string("scene.up-direction")?;
        if let Some(path) = &self.cache_path {
            create_cache_dir(path)?;
        }

        if let Some(current) = self.renderer.as_mut() {
            current.scene_mut().show_axis(false);
            self.surface.detach(current.scene_mut());
            log::debug!("detached renderer {}", current.id());
        }

        let selection = select(self.renderer.as_ref().map(Renderer::kind), with_coloring);
        let mut renderer = match (selection, self.renderer.take()) {
            (Selection::Reuse, Some(existing)) => {
                log::debug!("reusing {} renderer {}", existing.kind(), existing.id());
                existing
            }
            (selection, previous) => {
                drop(previous);
                let kind = selection
                    .created_kind()
                    .unwrap_or_else(|| RendererKind::for_coloring(with_coloring));
                let created = self.backend.create_renderer(kind);
                log::debug!("created {kind} renderer {}", created.id());
                created
            }
        };

        if let Some(path) = &self.cache_path {
            renderer.scene_mut().set_cache_path(path);
        }
        self.camera.bind(renderer.id(), renderer.scene().camera_state());
        self.surface.attach(renderer.scene_mut());
        renderer.scene_mut().initialize(&up);

        self.renderer = Some(renderer);
        self.initialized = true;

        if self.capabilities.raise_on_initialize {
            self.surface.raise();
        }
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Makes sure a renderer is attached, creating a plain one if needed.
    ///
    /// The viewport is refreshed from the surface, which may have been resized
    /// behind the window's back.
    pub(super) fn ensure_initialized(&mut self) -> Result<&mut Renderer, WindowError> {
        if !self.initialized {
            self.initialize(false)?;
        }
        let (width, height) = self.surface.size();
        let renderer = self.renderer.as_mut().ok_or_else(missing_renderer)?;
        renderer.scene_mut().set_viewport(Viewport::new(width, height));
        Ok(renderer)
    }

    pub fn window_type(&self) -> WindowType {
        self.window_type
    }

    /// The camera, bound to the attached renderer. Initializes the window with
    /// a plain renderer when called first.
    pub fn camera(&mut self) -> Result<&mut Camera, WindowError> {
        self.ensure_initialized()?;
        Ok(&mut self.camera)
    }

    pub fn renderer(&self) -> Option<&Renderer> {
        self.renderer.as_ref()
    }

    pub fn surface(&self) -> &dyn Surface {
        self.surface.as_ref()
    }

    /// Changes made here reach the renderer on its next use.
    pub fn surface_mut(&mut self) -> &mut dyn Surface {
        self.surface.as_mut()
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn width(&self) -> u32 {
        self.surface.size().0
    }

    pub fn height(&self) -> u32 {
        self.surface.size().1
    }

    pub fn set_size(&mut self, width: u32, height: u32) -> &mut Self {
        self.surface.set_size(width, height);
        let (width, height) = self.surface.size();
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.scene_mut().set_viewport(Viewport::new(width, height));
        }
        self
    }

    pub fn position(&self) -> (i32, i32) {
        self.surface.position()
    }

    pub fn set_position(&mut self, x: i32, y: i32) -> &mut Self {
        self.surface.set_position(x, y);
        self
    }

    /// Sets the window icon from PNG, ICO or BMP bytes.
    ///
    /// Ignored when the platform has no window icons.
    pub fn set_icon(&mut self, bytes: &[u8]) -> Result<&mut Self, WindowError> {
        if !self.capabilities.window_icon {
            return Ok(self);
        }
        let icon = image::load_from_memory(bytes)?.to_rgba8();
        self.surface.set_icon(&icon)?;
        Ok(self)
    }

    pub fn set_window_name(&mut self, name: &str) -> &mut Self {
        self.surface.set_title(name);
        self
    }

    /// Directory for renderer caches, created on the next initialization.
    pub fn set_cache_path(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.cache_path = Some(path.into());
        self
    }

    pub fn cache_path(&self) -> Option<&Path> {
        self.cache_path.as_deref()
    }

    /// Unprojects a display point. Degenerate projections give the origin.
    pub fn world_from_display(&mut self, display: DVec3) -> Result<DVec3, WindowError> {
        let renderer = self.ensure_initialized()?;
        Ok(coords::world_from_display(renderer.scene(), display))
    }

    pub fn display_from_world(&mut self, world: DVec3) -> Result<DVec3, WindowError> {
        let renderer = self.ensure_initialized()?;
        Ok(coords::display_from_world(renderer.scene(), world))
    }

    /// Hands the scene data to the renderer if it can color by it.
    pub fn set_importer_for_coloring(&mut self, importer: Option<Rc<dyn ColoringSource>>) {
        if let Some(coloring) = self.renderer.as_mut().and_then(Renderer::coloring_mut) {
            coloring.set_importer(importer);
        }
    }

    pub fn print_scene_description(&self, level: VerboseLevel) {
        if let Some(renderer) = &self.renderer {
            logging::print(level, &renderer.scene().scene_description());
        }
    }

    /// Prints nothing unless the renderer colors by data.
    pub fn print_coloring_description(&self, level: VerboseLevel) {
        let Some(coloring) = self.renderer.as_ref().and_then(Renderer::coloring) else {
            return;
        };
        let description = coloring.coloring_description();
        if !description.is_empty() {
            logging::print(level, &description);
        }
    }

    /// Pushes the current options into the renderer.
    pub(super) fn synchronize(&mut self) -> Result<(), WindowError> {
        self.ensure_initialized()?;
        let options = Rc::clone(&self.options);
        if let Some(renderer) = self.renderer.as_mut() {
            sync::synchronize(renderer, options.as_ref())?;
        }
        Ok(())
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        // The axis widget goes before the renderer it follows.
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.scene_mut().show_axis(false);
            self.surface.detach(renderer.scene_mut());
        }
    }
}

pub(super) fn missing_renderer() -> WindowError {
    WindowError::Engine(anyhow::anyhow!("window has no renderer"))
}

fn create_cache_dir(path: &Path) -> Result<(), WindowError> {
    if path.is_dir() {
        return Ok(());
    }
    std::fs::create_dir_all(path).map_err(|source| WindowError::CacheDirectory {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("created cache directory {}", path.display());
    Ok(())
}
