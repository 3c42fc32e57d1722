use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Startup location lookup and first camera placement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Startup", inline)]
#[serde(default)]
pub struct BootstrapOptions {
    /// How long to wait for a location fix before using the fallback.
    #[schemars(skip)]
    pub timeout_secs: f32,
    /// Fallback latitude in degrees.
    #[schemars(skip)]
    pub fallback_lat: f64,
    /// Fallback longitude in degrees.
    #[schemars(skip)]
    pub fallback_lon: f64,
    /// Camera distance from the sphere center for the first view.
    #[schemars(title = "Start Zoom", range(min = 1.05, max = 4.0), extend("step" = 0.05))]
    pub city_zoom_distance: f32,
    /// IP geolocation endpoint returning `{"lat": .., "lon": ..}` JSON.
    #[schemars(skip)]
    pub geoip_url: String,
}

impl BootstrapOptions {
    /// Lookup timeout as a [`Duration`]. Invalid values fall back to zero.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::try_from_secs_f32(self.timeout_secs).unwrap_or(Duration::ZERO)
    }
}

impl Default for BootstrapOptions {
    fn default() -> Self {
        Self {
            timeout_secs: 5.0,
            fallback_lat: 40.7128,
            fallback_lon: -74.0060,
            city_zoom_distance: 1.3,
            geoip_url: "http://ip-api.com/json/?fields=status,lat,lon".into(),
        }
    }
}
