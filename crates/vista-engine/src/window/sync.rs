//! Pushes the option snapshot into the attached renderer before each frame.
//!
//! Options are grouped the way renderer mutators are. Every group is a
//! [`Binding`]: the keys it reads and the function applying them. Nothing is
//! memoized, the whole snapshot is re-read on every pass.

use crate::engine::{
    BackgroundSettings, ColoringRenderer, EffectSettings, GridSettings, InteractionSettings,
    MaterialSettings, PrimitiveStyle, RaytracingSettings, Renderer, Representation,
    ScalarColoring, SceneRenderer, UiSettings,
};
use crate::options::{OptionError, OptionKind, OptionsProvider};

type Apply<R> = fn(&mut R, &dyn OptionsProvider) -> Result<(), OptionError>;

/// One renderer mutator and the option keys feeding it.
pub struct Binding<R: ?Sized> {
    pub keys: &'static [&'static str],
    apply: Apply<R>,
}

impl<R: ?Sized> Binding<R> {
    pub fn apply(
        &self,
        renderer: &mut R,
        options: &dyn OptionsProvider,
    ) -> Result<(), OptionError> {
        (self.apply)(renderer, options)
    }
}

/// Bindings applied to every renderer, in order.
pub const SCENE_BINDINGS: &[Binding<dyn SceneRenderer>] = &[
    Binding {
        keys: &["interactor.axis", "interactor.trackball", "interactor.invert-zoom"],
        apply: |r, o| {
            r.set_interaction(InteractionSettings {
                axis: o.get_as_bool("interactor.axis")?,
                trackball: o.get_as_bool("interactor.trackball")?,
                invert_zoom: o.get_as_bool("interactor.invert-zoom")?,
            });
            Ok(())
        },
    },
    Binding {
        keys: &["render.line-width", "render.point-size", "render.show-edges"],
        apply: |r, o| {
            r.set_primitive_style(PrimitiveStyle {
                line_width: o.get_as_double("render.line-width")?,
                point_size: o.get_as_double("render.point-size")?,
                show_edges: o.get_as_bool("render.show-edges")?,
            });
            Ok(())
        },
    },
    Binding {
        keys: &[
            "ui.fps",
            "ui.filename",
            "ui.filename-info",
            "ui.metadata",
            "ui.cheatsheet",
            "ui.dropzone",
            "ui.dropzone-info",
        ],
        apply: |r, o| {
            r.set_ui(UiSettings {
                fps: o.get_as_bool("ui.fps")?,
                filename: o.get_as_bool("ui.filename")?,
                filename_info: o.get_as_string("ui.filename-info")?,
                metadata: o.get_as_bool("ui.metadata")?,
                cheatsheet: o.get_as_bool("ui.cheatsheet")?,
                dropzone: o.get_as_bool("ui.dropzone")?,
                dropzone_info: o.get_as_string("ui.dropzone-info")?,
            });
            Ok(())
        },
    },
    Binding {
        keys: &[
            "render.raytracing.enable",
            "render.raytracing.samples",
            "render.raytracing.denoise",
        ],
        apply: |r, o| {
            r.set_raytracing(RaytracingSettings {
                enable: o.get_as_bool("render.raytracing.enable")?,
                samples: o.get_as_int("render.raytracing.samples")?,
                denoise: o.get_as_bool("render.raytracing.denoise")?,
            });
            Ok(())
        },
    },
    Binding {
        keys: &[
            "render.effect.ambient-occlusion",
            "render.effect.anti-aliasing",
            "render.effect.tone-mapping",
            "render.effect.translucency-support",
        ],
        apply: |r, o| {
            r.set_effects(EffectSettings {
                ambient_occlusion: o.get_as_bool("render.effect.ambient-occlusion")?,
                anti_aliasing: o.get_as_bool("render.effect.anti-aliasing")?,
                tone_mapping: o.get_as_bool("render.effect.tone-mapping")?,
                translucency_support: o.get_as_bool("render.effect.translucency-support")?,
            });
            Ok(())
        },
    },
    Binding {
        keys: &[
            "render.background.color",
            "render.background.blur",
            "render.background.blur.coc",
            "render.background.hdri",
        ],
        apply: |r, o| {
            r.set_background(BackgroundSettings {
                color: triple(o, "render.background.color")?,
                blur: o.get_as_bool("render.background.blur")?,
                blur_coc: o.get_as_double("render.background.blur.coc")?,
                hdri: o.get_as_string("render.background.hdri")?,
            });
            Ok(())
        },
    },
    Binding {
        keys: &["render.light.intensity"],
        apply: |r, o| {
            r.set_light_intensity(o.get_as_double("render.light.intensity")?);
            Ok(())
        },
    },
    Binding {
        keys: &["ui.font-file"],
        apply: |r, o| {
            r.set_font_file(&o.get_as_string("ui.font-file")?);
            Ok(())
        },
    },
    Binding {
        keys: &[
            "render.grid.unit",
            "render.grid.subdivisions",
            "render.grid.absolute",
            "render.grid.enable",
        ],
        apply: |r, o| {
            r.set_grid(GridSettings {
                unit: o.get_as_double("render.grid.unit")?,
                subdivisions: o.get_as_int("render.grid.subdivisions")?,
                absolute: o.get_as_bool("render.grid.absolute")?,
                enable: o.get_as_bool("render.grid.enable")?,
            });
            Ok(())
        },
    },
];

/// Bindings applied only to coloring-capable renderers, after the scene ones.
pub const COLORING_BINDINGS: &[Binding<dyn ColoringRenderer>] = &[
    Binding {
        keys: &[
            "model.color.rgb",
            "model.color.opacity",
            "model.color.texture",
            "model.material.roughness",
            "model.material.metallic",
            "model.material.texture",
            "model.emissive.texture",
            "model.emissive.factor",
            "model.normal.texture",
            "model.normal.scale",
            "model.matcap.texture",
        ],
        apply: |r, o| {
            r.set_material(MaterialSettings {
                color: triple(o, "model.color.rgb")?,
                opacity: o.get_as_double("model.color.opacity")?,
                base_color_texture: o.get_as_string("model.color.texture")?,
                roughness: o.get_as_double("model.material.roughness")?,
                metallic: o.get_as_double("model.material.metallic")?,
                material_texture: o.get_as_string("model.material.texture")?,
                emissive_texture: o.get_as_string("model.emissive.texture")?,
                emissive_factor: triple(o, "model.emissive.factor")?,
                normal_texture: o.get_as_string("model.normal.texture")?,
                normal_scale: o.get_as_double("model.normal.scale")?,
                matcap_texture: o.get_as_string("model.matcap.texture")?,
            });
            Ok(())
        },
    },
    Binding {
        keys: &[
            "model.scivis.cells",
            "model.scivis.array-name",
            "model.scivis.component",
            "model.scivis.range",
            "model.scivis.colormap",
            "ui.bar",
        ],
        apply: |r, o| {
            r.set_scalar_coloring(ScalarColoring {
                cells: o.get_as_bool("model.scivis.cells")?,
                array_name: o.get_as_string("model.scivis.array-name")?,
                component: o.get_as_int("model.scivis.component")?,
                range: o.get_as_double_vector("model.scivis.range")?,
                colormap: o.get_as_double_vector("model.scivis.colormap")?,
                scalar_bar: o.get_as_bool("ui.bar")?,
            });
            Ok(())
        },
    },
    Binding {
        keys: &[
            "model.point-sprites.enable",
            "model.volume.enable",
            "model.volume.inverse",
        ],
        apply: |r, o| {
            r.set_representation(Representation {
                point_sprites: o.get_as_bool("model.point-sprites.enable")?,
                volume: o.get_as_bool("model.volume.enable")?,
                inverse_opacity: o.get_as_bool("model.volume.inverse")?,
            });
            Ok(())
        },
    },
];

/// Applies the whole snapshot to `renderer`.
///
/// Lights are created first, derived state is recomputed last.
pub fn synchronize(
    renderer: &mut Renderer,
    options: &dyn OptionsProvider,
) -> Result<(), OptionError> {
    renderer.scene_mut().update_lights();

    for binding in SCENE_BINDINGS {
        binding.apply(renderer.scene_mut(), options)?;
    }

    if let Some(coloring) = renderer.coloring_mut() {
        for binding in COLORING_BINDINGS {
            binding.apply(coloring, options)?;
        }
    }

    renderer.scene_mut().update_actors();
    Ok(())
}

/// Reads a three-component vector option.
fn triple(options: &dyn OptionsProvider, key: &str) -> Result<[f64; 3], OptionError> {
    let values = options.get_as_double_vector(key)?;
    <[f64; 3]>::try_from(values.as_slice()).map_err(|_| OptionError::Incompatible {
        key: key.to_string(),
        expected: OptionKind::DoubleVector,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::engine::{ColorSource, Overlay, RenderPass, RendererKind};
    use crate::options::Options;
    use crate::renderer;

    fn initialized(kind: RendererKind) -> Renderer {
        let mut r = renderer::create(kind);
        r.scene_mut().initialize("+Y");
        r
    }

    #[test]
    fn every_bound_key_has_a_default() {
        let defaults = Options::default();
        let keys = SCENE_BINDINGS
            .iter()
            .flat_map(|b| b.keys)
            .chain(COLORING_BINDINGS.iter().flat_map(|b| b.keys));
        for key in keys {
            assert!(defaults.get(key).is_some(), "no default for {key}");
        }
    }

    #[test]
    fn options_reach_the_plan() {
        let mut options = Options::default();
        options
            .set("render.background.color", [0.0, 0.5, 1.0])
            .unwrap()
            .set("interactor.axis", true)
            .unwrap()
            .set("render.effect.tone-mapping", true)
            .unwrap();

        let mut r = initialized(RendererKind::Plain);
        synchronize(&mut r, &options).unwrap();

        let plan = r.scene().plan();
        assert_eq!(plan.background, [0.0, 0.5, 1.0]);
        assert!(plan.overlays.contains(&Overlay::Axis));
        assert!(plan.passes.contains(&RenderPass::ToneMapping));
        assert!(plan.lights.count > 0);
        assert!(plan.coloring.is_none());
    }

    #[test]
    fn coloring_options_only_reach_coloring_renderers() {
        let mut options = Options::default();
        options.set("model.color.rgb", [1.0, 0.0, 0.0]).unwrap();

        let mut r = initialized(RendererKind::Coloring);
        synchronize(&mut r, &options).unwrap();
        let coloring = r.scene().plan().coloring.clone().unwrap();
        assert_eq!(
            coloring.source,
            ColorSource::Solid {
                color: [1.0, 0.0, 0.0],
                opacity: 1.0
            }
        );
    }

    #[test]
    fn plain_renderer_ignores_missing_coloring_keys() {
        let mut options = Options::default();
        options.remove("model.color.rgb");

        let mut r = initialized(RendererKind::Plain);
        assert!(synchronize(&mut r, &options).is_ok());

        let mut r = initialized(RendererKind::Coloring);
        assert_eq!(
            synchronize(&mut r, &options),
            Err(OptionError::Inexistent("model.color.rgb".to_string()))
        );
    }

    #[test]
    fn mistyped_option_is_propagated() {
        let mut options = Options::new();
        options.set("interactor.axis", 1).unwrap();

        let mut r = initialized(RendererKind::Plain);
        assert_eq!(
            synchronize(&mut r, &options),
            Err(OptionError::Incompatible {
                key: "interactor.axis".to_string(),
                expected: OptionKind::Bool,
            })
        );
    }

    #[test]
    fn short_color_vector_is_incompatible() {
        let mut options = Options::default();
        options.set("render.background.color", vec![1.0, 0.0]).unwrap();

        let mut r = initialized(RendererKind::Plain);
        assert!(matches!(
            synchronize(&mut r, &options),
            Err(OptionError::Incompatible { key, .. }) if key == "render.background.color"
        ));
    }

    #[test]
    fn synchronizing_twice_is_idempotent() {
        let options = Options::default();
        let mut r = initialized(RendererKind::Coloring);
        synchronize(&mut r, &options).unwrap();
        let once = r.scene().plan().clone();
        synchronize(&mut r, &options).unwrap();
        assert_eq!(r.scene().plan(), &once);
    }
}
