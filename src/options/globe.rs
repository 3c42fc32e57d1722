use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Geodetic mapping constants shared by the camera and entity renderers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Globe", inline)]
#[serde(default)]
pub struct GlobeOptions {
    /// Sphere radius added per foot of altitude.
    #[schemars(skip)]
    pub altitude_scale: f64,
    /// Heading offset (degrees) between true heading and the nose
    /// direction of entity models.
    #[schemars(skip)]
    pub model_heading_offset_deg: f64,
}

impl Default for GlobeOptions {
    fn default() -> Self {
        Self {
            altitude_scale: 2e-6,
            model_heading_offset_deg: 90.0,
        }
    }
}
