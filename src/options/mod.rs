//! Centralized engine options with TOML preset support.
//!
//! Every tunable the camera engine uses (distance limits, transition speed,
//! framing geometry, geodetic constants, startup location) lives here.
//! Options serialize to/from TOML so a deployment can ship a preset file.

mod bootstrap;
mod camera;
mod framing;
mod globe;

use std::path::Path;

pub use bootstrap::BootstrapOptions;
pub use camera::CameraOptions;
pub use framing::FramingOptions;
pub use globe::GlobeOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::GlobeCamError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[camera]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera distance limits and transition timing.
    pub camera: CameraOptions,
    /// Entity framing geometry.
    pub framing: FramingOptions,
    /// Geodetic mapping constants.
    #[schemars(skip)]
    pub globe: GlobeOptions,
    /// Startup location lookup.
    pub bootstrap: BootstrapOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, GlobeCamError> {
        let content =
            std::fs::read_to_string(path).map_err(GlobeCamError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, GlobeCamError> {
        toml::from_str(content)
            .map_err(|e| GlobeCamError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), GlobeCamError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| GlobeCamError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(GlobeCamError::Io)?;
        }
        std::fs::write(path, content).map_err(GlobeCamError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::easing::EasingFunction;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[camera]
transition_rate = 2.0
";
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.camera.transition_rate, 2.0);
        assert_eq!(opts.camera.default_distance, 2.5);
        assert_eq!(opts.bootstrap.timeout_secs, 5.0);
        assert_eq!(opts.camera.easing, EasingFunction::CubicOut);
    }

    #[test]
    fn easing_parses_from_toml() {
        let toml_str = r#"
[camera]
easing = "linear"
"#;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.camera.easing, EasingFunction::Linear);
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let err = Options::from_toml("[camera\nmin_distance = ").unwrap_err();
        assert!(matches!(err, GlobeCamError::OptionsParse(_)));
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir().join("globecam-options-test");
        let path = dir.join("preset.toml");
        let mut opts = Options::default();
        opts.bootstrap.fallback_lat = 51.47;
        opts.bootstrap.fallback_lon = -0.4543;
        opts.save(&path).unwrap();
        let loaded = Options::load(&path).unwrap();
        assert_eq!(loaded, opts);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("camera"));
        assert!(props.contains_key("framing"));
        assert!(props.contains_key("bootstrap"));
        assert!(!props.contains_key("globe"));

        let camera = &props["camera"]["properties"];
        assert!(camera.get("transition_rate").is_some());
        assert!(camera.get("min_distance").is_none());
        assert!(camera.get("easing").is_none());
    }
}
