use std::collections::BTreeMap;

use super::{OptionError, OptionKind, OptionValue, OptionsProvider};

/// Viewer defaults for every key read by the window.
const DEFAULTS: &[(&str, fn() -> OptionValue)] = &[
    ("scene.up-direction", || "+Y".into()),
    ("interactor.axis", || false.into()),
    ("interactor.trackball", || false.into()),
    ("interactor.invert-zoom", || false.into()),
    ("render.line-width", || 1.0.into()),
    ("render.point-size", || 10.0.into()),
    ("render.show-edges", || false.into()),
    ("ui.fps", || false.into()),
    ("ui.filename", || false.into()),
    ("ui.filename-info", || "".into()),
    ("ui.metadata", || false.into()),
    ("ui.cheatsheet", || false.into()),
    ("ui.dropzone", || false.into()),
    ("ui.dropzone-info", || "".into()),
    ("ui.bar", || false.into()),
    ("ui.font-file", || "".into()),
    ("render.raytracing.enable", || false.into()),
    ("render.raytracing.samples", || 5.into()),
    ("render.raytracing.denoise", || false.into()),
    ("render.effect.ambient-occlusion", || false.into()),
    ("render.effect.anti-aliasing", || false.into()),
    ("render.effect.tone-mapping", || false.into()),
    ("render.effect.translucency-support", || false.into()),
    ("render.background.color", || [0.2, 0.2, 0.2].into()),
    ("render.background.blur", || false.into()),
    ("render.background.blur.coc", || 20.0.into()),
    ("render.background.hdri", || "".into()),
    ("render.light.intensity", || 1.0.into()),
    ("render.grid.unit", || 0.0.into()),
    ("render.grid.subdivisions", || 10.into()),
    ("render.grid.absolute", || false.into()),
    ("render.grid.enable", || false.into()),
    ("model.color.rgb", || [1.0, 1.0, 1.0].into()),
    ("model.color.opacity", || 1.0.into()),
    ("model.color.texture", || "".into()),
    ("model.material.roughness", || 0.3.into()),
    ("model.material.metallic", || 0.0.into()),
    ("model.material.texture", || "".into()),
    ("model.emissive.texture", || "".into()),
    ("model.emissive.factor", || [1.0, 1.0, 1.0].into()),
    ("model.normal.texture", || "".into()),
    ("model.normal.scale", || 1.0.into()),
    ("model.matcap.texture", || "".into()),
    ("model.scivis.cells", || false.into()),
    ("model.scivis.array-name", || "".into()),
    ("model.scivis.component", || (-1).into()),
    ("model.scivis.range", || Vec::<f64>::new().into()),
    (
        "model.scivis.colormap",
        || {
            vec![
                0.0, 0.0, 0.0, 0.0, //
                0.4, 0.9, 0.0, 0.0, //
                0.8, 0.9, 0.9, 0.0, //
                1.0, 1.0, 1.0, 1.0,
            ]
            .into()
        },
    ),
    ("model.point-sprites.enable", || false.into()),
    ("model.volume.enable", || false.into()),
    ("model.volume.inverse", || false.into()),
];

/// In-memory option snapshot.
///
/// `Options::default()` holds the viewer defaults; `Options::new()` is empty.
/// Setting an existing key with a value of another type is rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    values: BTreeMap<String, OptionValue>,
}

impl Options {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Sets `key`, keeping the type of an existing value.
    pub fn set(
        &mut self,
        key: impl Into<String>,
        value: impl Into<OptionValue>,
    ) -> Result<&mut Self, OptionError> {
        let key = key.into();
        let value = value.into();

        if let Some(current) = self.values.get(&key) {
            if current.kind() != value.kind() {
                return Err(OptionError::Incompatible {
                    key,
                    expected: current.kind(),
                });
            }
        }

        self.values.insert(key, value);
        Ok(self)
    }

    /// Removes `key`, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<OptionValue> {
        self.values.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.values.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    fn lookup(&self, key: &str) -> Result<&OptionValue, OptionError> {
        self.values
            .get(key)
            .ok_or_else(|| OptionError::Inexistent(key.to_string()))
    }
}

fn incompatible(key: &str, expected: OptionKind) -> OptionError {
    OptionError::Incompatible {
        key: key.to_string(),
        expected,
    }
}

impl Default for Options {
    fn default() -> Self {
        let values = DEFAULTS
            .iter()
            .map(|(key, value)| (key.to_string(), value()))
            .collect();
        Self { values }
    }
}

impl OptionsProvider for Options {
    fn get_as_bool(&self, key: &str) -> Result<bool, OptionError> {
        match self.lookup(key)? {
            OptionValue::Bool(v) => Ok(*v),
            _ => Err(incompatible(key, OptionKind::Bool)),
        }
    }

    fn get_as_int(&self, key: &str) -> Result<i32, OptionError> {
        match self.lookup(key)? {
            OptionValue::Int(v) => Ok(*v),
            _ => Err(incompatible(key, OptionKind::Int)),
        }
    }

    fn get_as_double(&self, key: &str) -> Result<f64, OptionError> {
        match self.lookup(key)? {
            OptionValue::Double(v) => Ok(*v),
            _ => Err(incompatible(key, OptionKind::Double)),
        }
    }

    fn get_as_string(&self, key: &str) -> Result<String, OptionError> {
        match self.lookup(key)? {
            OptionValue::String(v) => Ok(v.clone()),
            _ => Err(incompatible(key, OptionKind::String)),
        }
    }

    fn get_as_double_vector(&self, key: &str) -> Result<Vec<f64>, OptionError> {
        match self.lookup(key)? {
            OptionValue::DoubleVector(v) => Ok(v.clone()),
            _ => Err(incompatible(key, OptionKind::DoubleVector)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_up_direction_and_background() {
        let options = Options::default();
        assert_eq!(options.get_as_string("scene.up-direction").unwrap(), "+Y");
        assert_eq!(
            options.get_as_double_vector("render.background.color").unwrap(),
            vec![0.2, 0.2, 0.2]
        );
        assert_eq!(options.get_as_int("model.scivis.component").unwrap(), -1);
    }

    #[test]
    fn missing_key_is_inexistent() {
        let options = Options::new();
        assert_eq!(
            options.get_as_bool("ui.fps"),
            Err(OptionError::Inexistent("ui.fps".to_string()))
        );
    }

    #[test]
    fn mistyped_read_is_incompatible() {
        let options = Options::default();
        let err = options.get_as_double("ui.fps").unwrap_err();
        assert_eq!(
            err,
            OptionError::Incompatible {
                key: "ui.fps".to_string(),
                expected: OptionKind::Double,
            }
        );
    }

    #[test]
    fn every_getter_rejects_other_kinds() {
        let options = Options::default();
        let incompatible = |expected| {
            Err::<(), _>(OptionError::Incompatible {
                key: "scene.up-direction".to_string(),
                expected,
            })
        };
        let key = "scene.up-direction";
        assert_eq!(options.get_as_bool(key).map(drop), incompatible(OptionKind::Bool));
        assert_eq!(options.get_as_int(key).map(drop), incompatible(OptionKind::Int));
        assert_eq!(
            options.get_as_double_vector(key).map(drop),
            incompatible(OptionKind::DoubleVector)
        );
        assert_eq!(
            options.get_as_string("render.background.color"),
            Err(OptionError::Incompatible {
                key: "render.background.color".to_string(),
                expected: OptionKind::String,
            })
        );
    }

    #[test]
    fn set_keeps_existing_type() {
        let mut options = Options::default();
        options.set("render.line-width", 3.0).unwrap();
        assert_eq!(options.get_as_double("render.line-width").unwrap(), 3.0);

        assert!(options.set("render.line-width", "wide").is_err());
        assert_eq!(options.get_as_double("render.line-width").unwrap(), 3.0);
    }

    #[test]
    fn set_on_empty_snapshot_inserts() {
        let mut options = Options::new();
        options.set("custom.flag", true).unwrap().set("custom.count", 2).unwrap();
        assert!(options.get_as_bool("custom.flag").unwrap());
        assert_eq!(options.get_as_int("custom.count").unwrap(), 2);
        assert_eq!(options.keys().count(), 2);
    }

    #[test]
    fn refcell_provider_sees_later_changes() {
        let shared = std::cell::RefCell::new(Options::default());
        let provider: &dyn OptionsProvider = &shared;
        assert!(!provider.get_as_bool("ui.fps").unwrap());

        shared.borrow_mut().set("ui.fps", true).unwrap();
        assert!(provider.get_as_bool("ui.fps").unwrap());
    }
}
