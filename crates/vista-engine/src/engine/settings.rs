//! Option groups pushed into a renderer, and the derived frame plan.
//!
//! Each group maps onto one renderer mutator. Defaults mirror the option
//! defaults of [`Options`](crate::options::Options).

use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionSettings {
    pub axis: bool,
    pub trackball: bool,
    pub invert_zoom: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveStyle {
    pub line_width: f64,
    pub point_size: f64,
    pub show_edges: bool,
}

impl Default for PrimitiveStyle {
    fn default() -> Self {
        Self {
            line_width: 1.0,
            point_size: 10.0,
            show_edges: false,
        }
    }
}

/// On-screen widgets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiSettings {
    pub fps: bool,
    pub filename: bool,
    pub filename_info: String,
    pub metadata: bool,
    pub cheatsheet: bool,
    pub dropzone: bool,
    pub dropzone_info: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RaytracingSettings {
    pub enable: bool,
    pub samples: i32,
    pub denoise: bool,
}

impl Default for RaytracingSettings {
    fn default() -> Self {
        Self {
            enable: false,
            samples: 5,
            denoise: false,
        }
    }
}

/// Screen-space post-processing passes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectSettings {
    pub ambient_occlusion: bool,
    pub anti_aliasing: bool,
    pub tone_mapping: bool,
    pub translucency_support: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundSettings {
    pub color: [f64; 3],
    pub blur: bool,
    /// Circle of confusion radius of the background blur.
    pub blur_coc: f64,
    /// Image-based lighting file; empty for none.
    pub hdri: String,
}

impl Default for BackgroundSettings {
    fn default() -> Self {
        Self {
            color: [0.2, 0.2, 0.2],
            blur: false,
            blur_coc: 20.0,
            hdri: String::new(),
        }
    }
}

/// Infinite ground grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSettings {
    /// Size of a unit square; 0 lets the renderer pick one from the scene size.
    pub unit: f64,
    pub subdivisions: i32,
    pub absolute: bool,
    pub enable: bool,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            unit: 0.0,
            subdivisions: 10,
            absolute: false,
            enable: false,
        }
    }
}

/// Surface appearance of the coloring-capable renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialSettings {
    pub color: [f64; 3],
    pub opacity: f64,
    pub base_color_texture: String,
    pub roughness: f64,
    pub metallic: f64,
    pub material_texture: String,
    pub emissive_texture: String,
    pub emissive_factor: [f64; 3],
    pub normal_texture: String,
    pub normal_scale: f64,
    pub matcap_texture: String,
}

impl Default for MaterialSettings {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            opacity: 1.0,
            base_color_texture: String::new(),
            roughness: 0.3,
            metallic: 0.0,
            material_texture: String::new(),
            emissive_texture: String::new(),
            emissive_factor: [1.0, 1.0, 1.0],
            normal_texture: String::new(),
            normal_scale: 1.0,
            matcap_texture: String::new(),
        }
    }
}

/// Scalar-field coloring and its legend.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarColoring {
    /// Color by cell data instead of point data.
    pub cells: bool,
    /// Array to color by; empty disables coloring.
    pub array_name: String,
    /// Component index, `-1` for the magnitude, `-2` for direct scalars.
    pub component: i32,
    /// Explicit `[min, max]`; empty for the array range.
    pub range: Vec<f64>,
    /// Flat `(value, r, g, b)` quadruplets.
    pub colormap: Vec<f64>,
    pub scalar_bar: bool,
}

impl Default for ScalarColoring {
    fn default() -> Self {
        Self {
            cells: false,
            array_name: String::new(),
            component: -1,
            range: Vec::new(),
            colormap: Vec::new(),
            scalar_bar: false,
        }
    }
}

/// How the geometry is drawn by the coloring-capable renderer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Representation {
    pub point_sprites: bool,
    pub volume: bool,
    /// Inverts the volume opacity transfer function.
    pub inverse_opacity: bool,
}

/// Ordered render passes of a frame.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderPass {
    Raytracing { samples: i32, denoise: bool },
    Raster,
    DepthPeeling,
    AmbientOcclusion,
    BackgroundBlur { coc: f64 },
    ToneMapping,
    AntiAliasing,
}

/// Widgets drawn over the scene.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Overlay {
    Axis,
    Timer,
    Filename,
    Metadata,
    CheatSheet,
    DropZone,
    Grid,
    ScalarBar,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LightSetup {
    pub count: usize,
    pub intensity: f64,
}

/// Where the surface color of a frame comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorSource {
    /// Solid material color.
    Solid { color: [f64; 3], opacity: f64 },
    /// Mapped from a scalar array through the colormap.
    Scalars {
        cells: bool,
        array_name: String,
        component: i32,
        range: [f64; 2],
        /// `(value, r, g, b)` control points; empty for the default map.
        colormap: Vec<[f64; 4]>,
    },
}

/// Material texture files. Unset slots are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialTextures {
    pub base_color: Option<PathBuf>,
    pub material: Option<PathBuf>,
    pub emissive: Option<PathBuf>,
    pub normal: Option<PathBuf>,
    pub matcap: Option<PathBuf>,
}

impl MaterialTextures {
    pub fn from_material(material: &MaterialSettings) -> Self {
        let path = |file: &str| (!file.is_empty()).then(|| PathBuf::from(file));
        Self {
            base_color: path(&material.base_color_texture),
            material: path(&material.material_texture),
            emissive: path(&material.emissive_texture),
            normal: path(&material.normal_texture),
            matcap: path(&material.matcap_texture),
        }
    }
}

/// Derived coloring state of a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ColoringPlan {
    pub source: ColorSource,
    pub representation: Representation,
    pub textures: MaterialTextures,
}

/// Everything a surface needs to draw one frame, recomputed by
/// `update_actors` after the options were applied.
#[derive(Debug, Clone, PartialEq)]
pub struct FramePlan {
    pub background: [f64; 3],
    /// Environment lighting and skybox file.
    pub hdri: Option<PathBuf>,
    /// Precomputed environment lighting, inside the renderer cache directory.
    pub hdri_cache: Option<PathBuf>,
    pub passes: Vec<RenderPass>,
    pub overlays: Vec<Overlay>,
    pub lights: LightSetup,
    /// Set only by coloring-capable renderers.
    pub coloring: Option<ColoringPlan>,
}

impl Default for FramePlan {
    fn default() -> Self {
        Self {
            background: BackgroundSettings::default().color,
            hdri: None,
            hdri_cache: None,
            passes: vec![RenderPass::Raster],
            overlays: Vec::new(),
            lights: LightSetup {
                count: 0,
                intensity: 1.0,
            },
            coloring: None,
        }
    }
}
