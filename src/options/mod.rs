//! Camera options with TOML file support.
//!
//! Starting pose, distance limits, motion tuning, and mouse behavior are
//! consolidated here. Options serialize to/from TOML so a host can keep
//! camera presets next to its other settings.

mod camera;
mod input;

use std::path::Path;

pub use camera::CameraOptions;
pub use input::InputOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::OrbitError;

/// Top-level options container. Both sections use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[input]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Pose, limits, and damping parameters.
    pub camera: CameraOptions,
    /// Mouse behavior.
    pub input: InputOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`OrbitError::Io`] if the file cannot be read and
    /// [`OrbitError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, OrbitError> {
        let content = std::fs::read_to_string(path).map_err(OrbitError::Io)?;
        let options = toml::from_str(&content)
            .map_err(|e| OrbitError::OptionsParse(e.to_string()))?;
        log::info!("loaded camera options from {}", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`OrbitError::OptionsParse`] if serialization fails and
    /// [`OrbitError::Io`] if the file or its parent cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), OrbitError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| OrbitError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(OrbitError::Io)?;
        }
        std::fs::write(path, content).map_err(OrbitError::Io)?;
        log::info!("saved camera options to {}", path.display());
        Ok(())
    }

    /// Copy with out-of-range values replaced: non-finite or negative
    /// distances, a maximum below the minimum, friction outside
    /// `[0.001, 0.999]`, and a non-finite wheel scale.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let mut options = self.clone();
        options.camera.sanitize();
        options.input.sanitize();
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{DragAction, RotationMode};

    #[test]
    fn test_default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let toml_str = r#"
[input]
rotation_mode = "suppress_roll"

[input.drag_bindings]
right = "pan"
"#;
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.input.rotation_mode, RotationMode::SuppressRoll);
        assert_eq!(opts.input.drag_bindings.right, DragAction::Pan);
        // Everything else should be default
        assert_eq!(opts.input.drag_bindings.left, DragAction::Rotate);
        assert!(opts.input.reset_on_double_click);
        assert_eq!(opts.camera, CameraOptions::default());
    }

    #[test]
    fn test_sanitized_repairs_bad_values() {
        let mut opts = Options::default();
        opts.camera.distance = -5.0;
        opts.camera.minimum_distance = 10.0;
        opts.camera.maximum_distance = 2.0;
        opts.camera.friction = 3.0;
        opts.input.wheel_scale = f64::NAN;

        let fixed = opts.sanitized();
        assert_eq!(fixed.camera.distance, 100.0);
        assert_eq!(fixed.camera.minimum_distance, 10.0);
        assert_eq!(fixed.camera.maximum_distance, f64::MAX);
        assert_eq!(
            fixed.camera.friction,
            crate::animation::DampedAction::MAX_FRICTION
        );
        assert_eq!(fixed.input.wheel_scale, 1.0);

        // valid options pass through untouched
        assert_eq!(Options::default().sanitized(), Options::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = std::env::temp_dir()
            .join(format!("orbitcam-options-{}", std::process::id()));
        let path = dir.join("presets").join("close.toml");
        let mut opts = Options::default();
        opts.camera.distance = 12.5;
        opts.input.wheel_scale = -2.0;

        opts.save(&path).unwrap();
        let loaded = Options::load(&path).unwrap();
        assert_eq!(loaded, opts);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_errors() {
        let missing = std::env::temp_dir().join("orbitcam-does-not-exist.toml");
        assert!(matches!(Options::load(&missing), Err(OrbitError::Io(_))));

        let dir = std::env::temp_dir()
            .join(format!("orbitcam-bad-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.toml");
        std::fs::write(&path, "[camera]\ndistance = \"far\"\n").unwrap();
        let err = Options::load(&path).unwrap_err();
        assert!(matches!(err, OrbitError::OptionsParse(_)));
        assert!(err.to_string().starts_with("options parse error"));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();
        assert!(props.contains_key("camera"));
        assert!(props.contains_key("input"));

        let camera = &props["camera"]["properties"];
        assert!(camera.get("friction").is_some());
        assert!(camera.get("distance").is_some());
        assert!(camera.get("center").is_none());

        let input = &props["input"]["properties"];
        assert!(input.get("wheel_scale").is_some());
        assert!(input.get("drag_bindings").is_none());
    }
}
