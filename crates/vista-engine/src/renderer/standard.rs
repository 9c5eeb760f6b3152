use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use glam::{DVec3, DVec4};
use twox_hash::XxHash64;

use crate::camera::{CameraState, SharedCameraState};
use crate::coords::{Projector, Viewport};
use crate::engine::{
    BackgroundSettings, EffectSettings, FramePlan, GridSettings, InteractionSettings, LightSetup,
    Overlay, PrimitiveStyle, RaytracingSettings, RenderPass, RendererId, SceneRenderer, UiSettings,
};
use crate::time::{FrameClock, FrameTime};

use super::{AxisWidget, UpDirection};

/// Key, fill, head and two back lights.
const LIGHT_KIT_SIZE: usize = 5;

/// Changing it orphans every cached environment map.
const HDRI_CACHE_SEED: u64 = 0;

/// Plain renderer: geometry, widgets and post-processing, no data coloring.
#[derive(Debug)]
pub struct StandardRenderer {
    id: RendererId,
    camera: SharedCameraState,
    viewport: Viewport,
    cache_path: Option<PathBuf>,
    up: UpDirection,
    initialized: bool,

    axis: Option<AxisWidget>,
    interaction: InteractionSettings,
    style: PrimitiveStyle,
    ui: UiSettings,
    raytracing: RaytracingSettings,
    effects: EffectSettings,
    background: BackgroundSettings,
    light_intensity: f64,
    font_file: String,
    grid: GridSettings,

    lights: usize,
    clock: FrameClock,
    last_frame: Option<FrameTime>,
    plan: FramePlan,
}

impl StandardRenderer {
    pub fn new() -> Self {
        Self {
            id: RendererId::next(),
            camera: CameraState::default().into_shared(),
            viewport: Viewport::default(),
            cache_path: None,
            up: UpDirection::default(),
            initialized: false,
            axis: None,
            interaction: InteractionSettings::default(),
            style: PrimitiveStyle::default(),
            ui: UiSettings::default(),
            raytracing: RaytracingSettings::default(),
            effects: EffectSettings::default(),
            background: BackgroundSettings::default(),
            light_intensity: 1.0,
            font_file: String::new(),
            grid: GridSettings::default(),
            lights: 0,
            clock: FrameClock::new(),
            last_frame: None,
            plan: FramePlan::default(),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn up_direction(&self) -> UpDirection {
        self.up
    }

    pub fn cache_path(&self) -> Option<&Path> {
        self.cache_path.as_deref()
    }

    pub fn axis_widget(&self) -> Option<&AxisWidget> {
        self.axis.as_ref()
    }

    pub fn primitive_style(&self) -> &PrimitiveStyle {
        &self.style
    }

    pub fn font_file(&self) -> &str {
        &self.font_file
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Ticks the frame clock; shared with the coloring renderer.
    pub(crate) fn tick(&mut self) {
        let ft = self.clock.tick();
        self.last_frame = Some(ft);
    }

    fn passes(&self) -> Vec<RenderPass> {
        let mut passes = Vec::new();

        if self.raytracing.enable {
            passes.push(RenderPass::Raytracing {
                samples: self.raytracing.samples,
                denoise: self.raytracing.denoise,
            });
        } else {
            passes.push(RenderPass::Raster);
            if self.effects.translucency_support {
                passes.push(RenderPass::DepthPeeling);
            }
            if self.effects.ambient_occlusion {
                passes.push(RenderPass::AmbientOcclusion);
            }
            if self.background.blur {
                passes.push(RenderPass::BackgroundBlur {
                    coc: self.background.blur_coc,
                });
            }
        }

        if self.effects.tone_mapping {
            passes.push(RenderPass::ToneMapping);
        }
        if self.effects.anti_aliasing {
            passes.push(RenderPass::AntiAliasing);
        }
        passes
    }

    fn overlays(&self) -> Vec<Overlay> {
        let toggles = [
            (self.axis.is_some(), Overlay::Axis),
            (self.ui.fps, Overlay::Timer),
            (self.ui.filename, Overlay::Filename),
            (self.ui.metadata, Overlay::Metadata),
            (self.ui.cheatsheet, Overlay::CheatSheet),
            (self.ui.dropzone, Overlay::DropZone),
            (self.grid.enable, Overlay::Grid),
        ];
        toggles
            .into_iter()
            .filter_map(|(on, overlay)| on.then_some(overlay))
            .collect()
    }

    fn hdri(&self) -> Option<PathBuf> {
        (!self.background.hdri.is_empty()).then(|| PathBuf::from(&self.background.hdri))
    }

    /// Cache file for the environment lighting precomputed from `hdri`.
    fn hdri_cache(&self, hdri: &Path) -> Option<PathBuf> {
        let dir = self.cache_path.as_ref()?;
        let hash = XxHash64::oneshot(HDRI_CACHE_SEED, hdri.as_os_str().as_encoded_bytes());
        Some(dir.join(format!("{hash:016x}.envmap")))
    }

    fn display_scale(&self) -> (f64, f64) {
        (
            self.viewport.width.max(1) as f64,
            self.viewport.height.max(1) as f64,
        )
    }
}

impl Default for StandardRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Projector for StandardRenderer {
    fn display_to_world(&self, display: DVec3) -> DVec4 {
        let (w, h) = self.display_scale();
        let ndc = DVec4::new(
            2.0 * display.x / w - 1.0,
            2.0 * display.y / h - 1.0,
            2.0 * display.z - 1.0,
            1.0,
        );
        let composite = self.camera.borrow().composite_matrix(self.viewport);
        composite.inverse() * ndc
    }

    fn world_to_display(&self, world: DVec4) -> DVec3 {
        let (w, h) = self.display_scale();
        let clip = self.camera.borrow().composite_matrix(self.viewport) * world;
        let ndc = if clip.w != 0.0 {
            clip.truncate() / clip.w
        } else {
            clip.truncate()
        };
        DVec3::new(
            (ndc.x + 1.0) * 0.5 * w,
            (ndc.y + 1.0) * 0.5 * h,
            (ndc.z + 1.0) * 0.5,
        )
    }
}

impl SceneRenderer for StandardRenderer {
    fn id(&self) -> RendererId {
        self.id
    }

    fn camera_state(&self) -> SharedCameraState {
        self.camera.clone()
    }

    fn set_cache_path(&mut self, path: &Path) {
        self.cache_path = Some(path.to_path_buf());
    }

    fn initialize(&mut self, up_direction: &str) {
        self.up = up_direction.parse().unwrap_or_else(|err| {
            log::warn!("{err}, using {}", UpDirection::default());
            UpDirection::default()
        });

        *self.camera.borrow_mut() = CameraState {
            position: self.up.front(),
            view_up: self.up.vector(),
            ..CameraState::default()
        };

        // Lights are rebuilt by the next `update_lights`.
        self.lights = 0;
        self.clock.reset();
        self.last_frame = None;
        self.initialized = true;
        log::debug!("renderer {} initialized with up direction {}", self.id, self.up);
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn update_lights(&mut self) {
        if self.lights == 0 {
            self.lights = LIGHT_KIT_SIZE;
        }
    }

    fn update_actors(&mut self) {
        let hdri = self.hdri();
        self.plan = FramePlan {
            background: self.background.color,
            hdri_cache: hdri.as_deref().and_then(|h| self.hdri_cache(h)),
            hdri,
            passes: self.passes(),
            overlays: self.overlays(),
            lights: LightSetup {
                count: self.lights,
                intensity: self.light_intensity,
            },
            coloring: None,
        };
    }

    fn show_axis(&mut self, show: bool) {
        self.interaction.axis = show;
        match (show, self.axis.is_some()) {
            (true, false) => self.axis = Some(AxisWidget::new(&self.camera)),
            (false, true) => self.axis = None,
            _ => {}
        }
    }

    fn is_axis_visible(&self) -> bool {
        self.axis.is_some()
    }

    fn set_interaction(&mut self, interaction: InteractionSettings) {
        self.show_axis(interaction.axis);
        self.interaction = interaction;
    }

    fn set_primitive_style(&mut self, style: PrimitiveStyle) {
        self.style = style;
    }

    fn set_ui(&mut self, ui: UiSettings) {
        self.ui = ui;
    }

    fn set_raytracing(&mut self, raytracing: RaytracingSettings) {
        self.raytracing = raytracing;
    }

    fn set_effects(&mut self, effects: EffectSettings) {
        self.effects = effects;
    }

    fn set_background(&mut self, background: BackgroundSettings) {
        self.background = background;
    }

    fn set_background_color(&mut self, rgb: [f64; 3]) {
        self.background.color = rgb;
        self.plan.background = rgb;
    }

    fn set_light_intensity(&mut self, intensity: f64) {
        self.light_intensity = intensity;
    }

    fn set_font_file(&mut self, path: &str) {
        self.font_file = path.to_string();
    }

    fn set_grid(&mut self, grid: GridSettings) {
        self.grid = grid;
    }

    fn plan(&self) -> &FramePlan {
        &self.plan
    }

    fn begin_frame(&mut self) -> FramePlan {
        self.tick();
        self.plan.clone()
    }

    fn scene_description(&self) -> String {
        let camera = self.camera.borrow();
        let mut out = String::new();
        let _ = writeln!(out, "Camera position: {}", fmt_vec(camera.position));
        let _ = writeln!(out, "Camera focal point: {}", fmt_vec(camera.focal_point));
        let _ = writeln!(out, "Camera view up: {}", fmt_vec(camera.view_up));
        let _ = writeln!(out, "Camera view angle: {}", camera.view_angle);
        if self.ui.fps {
            if let Some(ft) = self.last_frame.filter(|ft| ft.fps > 0.0) {
                let _ = writeln!(out, "Frame rate: {:.1} fps", ft.fps);
            }
        }
        out
    }
}

fn fmt_vec(v: DVec3) -> String {
    format!("{},{},{}", v.x, v.y, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::coords::{display_from_world, world_from_display};

    fn initialized() -> StandardRenderer {
        let mut r = StandardRenderer::new();
        r.set_viewport(Viewport::new(300, 200));
        r.initialize("+Y");
        r
    }

    #[test]
    fn world_display_round_trip() {
        let r = initialized();
        for p in [
            DVec3::ZERO,
            DVec3::new(0.1, 0.05, 0.0),
            DVec3::new(-0.2, 0.1, -3.0),
        ] {
            let display = display_from_world(&r, p);
            let back = world_from_display(&r, display);
            assert!((back - p).length() < 1e-6, "{p} -> {display} -> {back}");
        }
    }

    #[test]
    fn focal_point_lands_in_viewport_center() {
        let r = initialized();
        let display = display_from_world(&r, DVec3::ZERO);
        assert!((display.x - 150.0).abs() < 1e-9);
        assert!((display.y - 100.0).abs() < 1e-9);
        assert!(display.z > 0.0 && display.z < 1.0);
    }

    #[test]
    fn point_behind_camera_is_degenerate() {
        let r = initialized();
        // Display point whose unprojection ends up behind the eye.
        let display = r.world_to_display(DVec4::new(0.0, 0.0, 5.0, 1.0));
        assert_eq!(world_from_display(&r, display), DVec3::ZERO);
    }

    #[test]
    fn initialize_orients_camera_from_up_direction() {
        let mut r = StandardRenderer::new();
        r.initialize("+Z");
        let camera = r.camera_state();
        assert_eq!(camera.borrow().view_up, DVec3::Z);
        assert_eq!(camera.borrow().position, DVec3::NEG_Y);
    }

    #[test]
    fn invalid_up_direction_falls_back_to_y() {
        let mut r = StandardRenderer::new();
        r.initialize("sideways");
        assert_eq!(r.up_direction(), UpDirection::default());
        assert!(r.is_initialized());
    }

    #[test]
    fn axis_widget_follows_toggle() {
        let mut r = initialized();
        r.show_axis(true);
        assert!(r.axis_widget().is_some());
        r.show_axis(false);
        assert!(r.axis_widget().is_none());
    }

    #[test]
    fn passes_follow_effects_and_raytracing() {
        let mut r = initialized();
        r.set_effects(EffectSettings {
            ambient_occlusion: true,
            anti_aliasing: true,
            tone_mapping: true,
            translucency_support: true,
        });
        r.update_actors();
        assert_eq!(
            r.plan().passes,
            vec![
                RenderPass::Raster,
                RenderPass::DepthPeeling,
                RenderPass::AmbientOcclusion,
                RenderPass::ToneMapping,
                RenderPass::AntiAliasing,
            ]
        );

        r.set_raytracing(RaytracingSettings {
            enable: true,
            samples: 8,
            denoise: true,
        });
        r.update_actors();
        assert_eq!(
            r.plan().passes[0],
            RenderPass::Raytracing {
                samples: 8,
                denoise: true
            }
        );
        assert!(!r.plan().passes.contains(&RenderPass::AmbientOcclusion));
    }

    #[test]
    fn hdri_cache_lives_in_cache_directory() {
        let mut r = initialized();
        r.set_cache_path(Path::new("/tmp/vista-cache"));
        r.set_background(BackgroundSettings {
            hdri: "studio.hdr".to_string(),
            ..BackgroundSettings::default()
        });
        r.update_actors();

        let plan = r.plan();
        assert_eq!(plan.hdri.as_deref(), Some(Path::new("studio.hdr")));
        let cache = plan.hdri_cache.as_ref().unwrap();
        assert_eq!(cache, Path::new("/tmp/vista-cache/780996b68d85de1e.envmap"));
    }

    #[test]
    fn lights_are_created_once_per_initialization() {
        let mut r = initialized();
        r.update_lights();
        r.update_actors();
        assert_eq!(r.plan().lights.count, LIGHT_KIT_SIZE);

        r.initialize("+Y");
        r.update_actors();
        assert_eq!(r.plan().lights.count, 0);
    }

    #[test]
    fn scene_description_lists_camera() {
        let r = initialized();
        let text = r.scene_description();
        assert!(text.contains("Camera position: 0,0,1"));
        assert!(text.contains("Camera view angle: 30"));
    }
}
