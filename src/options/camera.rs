use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::easing::EasingFunction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera distance limits and transition timing.
pub struct CameraOptions {
    /// Minimum distance from the sphere center while the camera is at rest.
    #[schemars(skip)]
    pub min_distance: f32,
    /// Standard viewing distance used when pulling back with nothing to
    /// return to.
    #[schemars(title = "Default Distance", range(min = 1.2, max = 6.0), extend("step" = 0.1))]
    pub default_distance: f32,
    /// Transition progress per second. `1.0 / rate` is the transition
    /// length in seconds.
    #[schemars(title = "Transition Speed", range(min = 0.25, max = 5.0), extend("step" = 0.05))]
    pub transition_rate: f32,
    /// Easing curve applied to transition progress.
    #[schemars(skip)]
    pub easing: EasingFunction,
    /// Orbit rotation in radians per unit of drag.
    #[schemars(title = "Rotate Speed", range(min = 0.001, max = 0.02), extend("step" = 0.001))]
    pub rotate_speed: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            min_distance: 1.02,
            default_distance: 2.5,
            transition_rate: 1.2,
            easing: EasingFunction::CubicOut,
            rotate_speed: 0.005,
        }
    }
}
