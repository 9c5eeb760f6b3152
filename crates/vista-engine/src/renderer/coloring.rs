use std::fmt;
use std::path::Path;
use std::rc::Rc;

use glam::{DVec3, DVec4};

use crate::camera::SharedCameraState;
use crate::coords::{Projector, Viewport};
use crate::engine::{
    BackgroundSettings, ColorSource, ColoringPlan, ColoringRenderer, ColoringSource,
    DataArrayInfo, EffectSettings, FramePlan, GridSettings, InteractionSettings,
    MaterialSettings, MaterialTextures, Overlay, PrimitiveStyle, RaytracingSettings, RendererId,
    Representation, ScalarColoring, SceneRenderer, UiSettings,
};

use super::StandardRenderer;

/// Renderer variant able to color geometry by material and scalar data.
pub struct StandardColoringRenderer {
    base: StandardRenderer,
    material: MaterialSettings,
    scalars: ScalarColoring,
    representation: Representation,
    source: Option<Rc<dyn ColoringSource>>,
    plan: FramePlan,
}

impl StandardColoringRenderer {
    pub fn new() -> Self {
        Self {
            base: StandardRenderer::new(),
            material: MaterialSettings::default(),
            scalars: ScalarColoring::default(),
            representation: Representation::default(),
            source: None,
            plan: FramePlan::default(),
        }
    }

    pub fn material(&self) -> &MaterialSettings {
        &self.material
    }

    pub fn scalar_coloring(&self) -> &ScalarColoring {
        &self.scalars
    }

    pub fn has_importer(&self) -> bool {
        self.source.is_some()
    }

    /// Array selected by the scalar coloring options, if the scene has it.
    fn resolve_array(&self) -> Option<DataArrayInfo> {
        if self.scalars.array_name.is_empty() {
            return None;
        }
        let source = self.source.as_ref()?;
        source
            .arrays(self.scalars.cells)
            .into_iter()
            .find(|array| array.name == self.scalars.array_name)
    }

    /// Control points of the colormap. A trailing partial quadruplet is dropped.
    fn colormap(&self) -> Vec<[f64; 4]> {
        let chunks = self.scalars.colormap.chunks_exact(4);
        if !chunks.remainder().is_empty() {
            log::warn!(
                "colormap has {} values, ignoring the trailing {}",
                self.scalars.colormap.len(),
                chunks.remainder().len()
            );
        }
        chunks.map(|p| [p[0], p[1], p[2], p[3]]).collect()
    }

    fn color_source(&self, array: Option<&DataArrayInfo>) -> ColorSource {
        match array {
            Some(array) => {
                let range = match self.scalars.range.as_slice() {
                    &[min, max] => [min, max],
                    _ => array.range,
                };
                ColorSource::Scalars {
                    cells: self.scalars.cells,
                    array_name: array.name.clone(),
                    component: self.scalars.component,
                    range,
                    colormap: self.colormap(),
                }
            }
            None => ColorSource::Solid {
                color: self.material.color,
                opacity: self.material.opacity,
            },
        }
    }
}

impl Default for StandardColoringRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StandardColoringRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StandardColoringRenderer")
            .field("base", &self.base)
            .field("material", &self.material)
            .field("scalars", &self.scalars)
            .field("representation", &self.representation)
            .field("has_importer", &self.source.is_some())
            .finish()
    }
}

impl Projector for StandardColoringRenderer {
    fn display_to_world(&self, display: DVec3) -> DVec4 {
        self.base.display_to_world(display)
    }

    fn world_to_display(&self, world: DVec4) -> DVec3 {
        self.base.world_to_display(world)
    }
}

impl SceneRenderer for StandardColoringRenderer {
    fn id(&self) -> RendererId {
        self.base.id()
    }

    fn camera_state(&self) -> SharedCameraState {
        self.base.camera_state()
    }

    fn set_cache_path(&mut self, path: &Path) {
        self.base.set_cache_path(path);
    }

    fn initialize(&mut self, up_direction: &str) {
        self.base.initialize(up_direction);
        self.plan = self.base.plan().clone();
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.base.set_viewport(viewport);
    }

    fn update_lights(&mut self) {
        self.base.update_lights();
    }

    fn update_actors(&mut self) {
        self.base.update_actors();

        let array = self.resolve_array();
        if !self.scalars.array_name.is_empty() && array.is_none() {
            log::debug!(
                "no {} array named {:?} to color with",
                if self.scalars.cells { "cell" } else { "point" },
                self.scalars.array_name
            );
        }

        let mut plan = self.base.plan().clone();
        if self.scalars.scalar_bar && array.is_some() {
            plan.overlays.push(Overlay::ScalarBar);
        }
        plan.coloring = Some(ColoringPlan {
            source: self.color_source(array.as_ref()),
            representation: self.representation.clone(),
            textures: MaterialTextures::from_material(&self.material),
        });
        self.plan = plan;
    }

    fn show_axis(&mut self, show: bool) {
        self.base.show_axis(show);
    }

    fn is_axis_visible(&self) -> bool {
        self.base.is_axis_visible()
    }

    fn set_interaction(&mut self, interaction: InteractionSettings) {
        self.base.set_interaction(interaction);
    }

    fn set_primitive_style(&mut self, style: PrimitiveStyle) {
        self.base.set_primitive_style(style);
    }

    fn set_ui(&mut self, ui: UiSettings) {
        self.base.set_ui(ui);
    }

    fn set_raytracing(&mut self, raytracing: RaytracingSettings) {
        self.base.set_raytracing(raytracing);
    }

    fn set_effects(&mut self, effects: EffectSettings) {
        self.base.set_effects(effects);
    }

    fn set_background(&mut self, background: BackgroundSettings) {
        self.base.set_background(background);
    }

    fn set_background_color(&mut self, rgb: [f64; 3]) {
        self.base.set_background_color(rgb);
        self.plan.background = rgb;
    }

    fn set_light_intensity(&mut self, intensity: f64) {
        self.base.set_light_intensity(intensity);
    }

    fn set_font_file(&mut self, path: &str) {
        self.base.set_font_file(path);
    }

    fn set_grid(&mut self, grid: GridSettings) {
        self.base.set_grid(grid);
    }

    fn plan(&self) -> &FramePlan {
        &self.plan
    }

    fn begin_frame(&mut self) -> FramePlan {
        self.base.tick();
        self.plan.clone()
    }

    fn scene_description(&self) -> String {
        self.base.scene_description()
    }
}

impl ColoringRenderer for StandardColoringRenderer {
    fn set_material(&mut self, material: MaterialSettings) {
        self.material = material;
    }

    fn set_scalar_coloring(&mut self, coloring: ScalarColoring) {
        self.scalars = coloring;
    }

    fn set_representation(&mut self, representation: Representation) {
        self.representation = representation;
    }

    fn set_importer(&mut self, source: Option<Rc<dyn ColoringSource>>) {
        self.source = source;
    }

    fn coloring_description(&self) -> String {
        if self.scalars.array_name.is_empty() {
            return String::new();
        }
        match self.resolve_array() {
            Some(array) => {
                let data = if self.scalars.cells { "cell" } else { "point" };
                let component = match self.scalars.component {
                    -2 => "Direct Scalars".to_string(),
                    -1 => "Magnitude".to_string(),
                    n => format!("Component #{n}"),
                };
                format!(
                    "Coloring using {data} array named {}, {component}\n",
                    array.name
                )
            }
            None => "Not coloring\n".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Arrays(Vec<DataArrayInfo>);

    impl ColoringSource for Arrays {
        fn arrays(&self, cells: bool) -> Vec<DataArrayInfo> {
            if cells { Vec::new() } else { self.0.clone() }
        }
    }

    fn renderer_with_pressure() -> StandardColoringRenderer {
        let mut r = StandardColoringRenderer::new();
        r.initialize("+Y");
        r.set_importer(Some(Rc::new(Arrays(vec![DataArrayInfo {
            name: "pressure".to_string(),
            components: 1,
            range: [0.0, 4.0],
        }]))));
        r
    }

    fn color_by(name: &str) -> ScalarColoring {
        ScalarColoring {
            array_name: name.to_string(),
            scalar_bar: true,
            ..ScalarColoring::default()
        }
    }

    #[test]
    fn solid_color_without_array() {
        let mut r = renderer_with_pressure();
        r.update_actors();
        let coloring = r.plan().coloring.as_ref().unwrap();
        assert!(matches!(coloring.source, ColorSource::Solid { .. }));
        assert!(!r.plan().overlays.contains(&Overlay::ScalarBar));
        assert_eq!(r.coloring_description(), "");
    }

    #[test]
    fn scalars_use_array_range_by_default() {
        let mut r = renderer_with_pressure();
        r.set_scalar_coloring(color_by("pressure"));
        r.update_actors();

        let coloring = r.plan().coloring.as_ref().unwrap();
        match &coloring.source {
            ColorSource::Scalars { range, component, .. } => {
                assert_eq!(*range, [0.0, 4.0]);
                assert_eq!(*component, -1);
            }
            other => panic!("unexpected source {other:?}"),
        }
        assert!(r.plan().overlays.contains(&Overlay::ScalarBar));
        assert_eq!(
            r.coloring_description(),
            "Coloring using point array named pressure, Magnitude\n"
        );
    }

    #[test]
    fn explicit_range_overrides_array_range() {
        let mut r = renderer_with_pressure();
        r.set_scalar_coloring(ScalarColoring {
            range: vec![1.0, 2.0],
            component: 0,
            ..color_by("pressure")
        });
        r.update_actors();

        let coloring = r.plan().coloring.as_ref().unwrap();
        match &coloring.source {
            ColorSource::Scalars { range, .. } => assert_eq!(*range, [1.0, 2.0]),
            other => panic!("unexpected source {other:?}"),
        }
        assert!(r.coloring_description().ends_with("Component #0\n"));
    }

    #[test]
    fn colormap_and_textures_reach_the_plan() {
        let mut r = renderer_with_pressure();
        r.set_scalar_coloring(ScalarColoring {
            colormap: vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.5],
            ..color_by("pressure")
        });
        r.set_material(MaterialSettings {
            normal_texture: "bumps.png".to_string(),
            ..MaterialSettings::default()
        });
        r.update_actors();

        let coloring = r.plan().coloring.as_ref().unwrap();
        match &coloring.source {
            ColorSource::Scalars { colormap, .. } => {
                assert_eq!(*colormap, vec![[0.0, 0.0, 0.0, 1.0], [1.0, 1.0, 0.0, 0.0]]);
            }
            other => panic!("unexpected source {other:?}"),
        }
        assert_eq!(
            coloring.textures,
            MaterialTextures {
                normal: Some("bumps.png".into()),
                ..MaterialTextures::default()
            }
        );
    }

    #[test]
    fn missing_array_is_not_colored() {
        let mut r = renderer_with_pressure();
        r.set_scalar_coloring(ScalarColoring {
            cells: true,
            ..color_by("pressure")
        });
        r.update_actors();
        assert!(!r.plan().overlays.contains(&Overlay::ScalarBar));
        assert_eq!(r.coloring_description(), "Not coloring\n");
    }

    #[test]
    fn background_override_reaches_the_plan() {
        let mut r = renderer_with_pressure();
        r.update_actors();
        r.set_background_color([0.0, 0.0, 0.0]);
        assert_eq!(r.begin_frame().background, [0.0, 0.0, 0.0]);
    }
}
