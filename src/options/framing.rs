use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Framing", inline)]
#[serde(default)]
/// How far and from which angle selected entities are framed.
pub struct FramingOptions {
    /// Aircraft view distance before the speed term is added.
    #[schemars(title = "Aircraft Distance", range(min = 0.01, max = 0.5), extend("step" = 0.01))]
    pub aircraft_base_distance: f32,
    /// View distance added per knot of ground speed.
    #[schemars(skip)]
    pub aircraft_speed_factor: f32,
    /// Lower bound of the aircraft view distance.
    #[schemars(skip)]
    pub aircraft_min_distance: f32,
    /// Upper bound of the aircraft view distance.
    #[schemars(skip)]
    pub aircraft_max_distance: f32,
    /// Height above the aircraft as a fraction of the view distance.
    #[schemars(title = "Aircraft Elevation", range(min = 0.0, max = 2.0), extend("step" = 0.05))]
    pub aircraft_elevation: f32,
    /// Fixed view distance for airports.
    #[schemars(title = "Airport Distance", range(min = 0.01, max = 0.5), extend("step" = 0.01))]
    pub airport_view_distance: f32,
    /// Height above the airport as a fraction of the view distance.
    #[schemars(title = "Airport Elevation", range(min = 0.0, max = 3.0), extend("step" = 0.05))]
    pub airport_elevation: f32,
    /// Focus requests closer than this (degrees, per axis) to the previous
    /// one are duplicates.
    #[schemars(skip)]
    pub focus_epsilon_deg: f64,
}

impl FramingOptions {
    /// View distance for an aircraft moving at `speed` knots.
    #[must_use]
    pub fn aircraft_view_distance(&self, speed: f32) -> f32 {
        let speed = if speed.is_finite() { speed.max(0.0) } else { 0.0 };
        (self.aircraft_base_distance + speed * self.aircraft_speed_factor)
            .clamp(self.aircraft_min_distance, self.aircraft_max_distance)
    }
}

impl Default for FramingOptions {
    fn default() -> Self {
        Self {
            aircraft_base_distance: 0.05,
            aircraft_speed_factor: 0.000_1,
            aircraft_min_distance: 0.06,
            aircraft_max_distance: 0.3,
            aircraft_elevation: 0.5,
            airport_view_distance: 0.12,
            airport_elevation: 1.0,
            focus_epsilon_deg: 1e-4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_distance_scales_with_speed() {
        let opts = FramingOptions::default();
        let slow = opts.aircraft_view_distance(150.0);
        let fast = opts.aircraft_view_distance(500.0);
        assert!(fast > slow);
        assert!((fast - 0.1).abs() < 1e-6);
    }

    #[test]
    fn view_distance_is_clamped() {
        let opts = FramingOptions::default();
        assert_eq!(opts.aircraft_view_distance(0.0), opts.aircraft_min_distance);
        assert_eq!(
            opts.aircraft_view_distance(100_000.0),
            opts.aircraft_max_distance
        );
        assert_eq!(
            opts.aircraft_view_distance(f32::NAN),
            opts.aircraft_min_distance
        );
    }
}
