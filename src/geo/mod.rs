//! Geodetic math on the unit globe.
//!
//! Converts latitude/longitude/altitude into positions on (or just above)
//! a unit sphere and back, and builds local tangent frames and heading
//! orientations for anything placed on it.
//!
//! Coordinate convention (y-up):
//!
//! ```text
//! x = r·cos(lat)·cos(lon)
//! y = r·sin(lat)
//! z = r·cos(lat)·sin(lon)
//! ```
//!
//! where `r = 1 + altitude · altitude_scale`. Trigonometry runs in `f64`
//! and is narrowed to `f32` at the end so the poles and the ±180° seam stay
//! clean.

mod frame;

use glam::{DVec3, Vec3};
use serde::{Deserialize, Serialize};

pub use frame::{
    heading_to_forward, orientation_from_heading, tangent_frame,
    HeadingConvention, TangentFrame,
};

/// Default sphere radius added per foot of altitude.
pub const DEFAULT_ALTITUDE_SCALE: f64 = 2e-6;

/// A geographic location in degrees, with altitude in feet.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees, positive north.
    pub lat: f64,
    /// Longitude in degrees, positive east.
    pub lon: f64,
    /// Altitude above the surface in feet.
    pub alt: f64,
}

impl GeoPoint {
    /// A point on the surface.
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon, alt: 0.0 }
    }

    /// A point at the given altitude.
    #[must_use]
    pub const fn with_alt(lat: f64, lon: f64, alt: f64) -> Self {
        Self { lat, lon, alt }
    }

    /// Normalize into the valid coordinate domain.
    ///
    /// Returns `None` if any component is non-finite. Latitude is clamped
    /// into `[-90, 90]`, longitude wrapped into `(-180, 180]`, and negative
    /// altitude is raised to the surface.
    #[must_use]
    pub fn sanitize(self) -> Option<Self> {
        if !(self.lat.is_finite() && self.lon.is_finite() && self.alt.is_finite())
        {
            return None;
        }
        Some(Self {
            lat: self.lat.clamp(-90.0, 90.0),
            lon: wrap_longitude(self.lon),
            alt: self.alt.max(0.0),
        })
    }

    /// Whether two points match within `epsilon` degrees on both axes.
    ///
    /// Longitudes are compared across the seam, so `180` and `-180` match.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        let dlon = wrap_longitude(self.lon - other.lon).abs();
        (self.lat - other.lat).abs() <= epsilon && dlon <= epsilon
    }
}

/// Wrap a longitude into `(-180, 180]`.
///
/// Values already in range are returned unchanged.
#[must_use]
pub fn wrap_longitude(lon: f64) -> f64 {
    if lon > -180.0 && lon <= 180.0 {
        return lon;
    }
    let wrapped = lon.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Unit direction from the sphere center toward `(lat, lon)`.
#[must_use]
pub fn direction(lat: f64, lon: f64) -> Vec3 {
    unit_position(lat, lon).as_vec3()
}

/// Double-precision unit position for `(lat, lon)`.
pub(crate) fn unit_position(lat: f64, lon: f64) -> DVec3 {
    let (sin_lat, cos_lat) = lat.to_radians().sin_cos();
    let (sin_lon, cos_lon) = lon.to_radians().sin_cos();
    DVec3::new(cos_lat * cos_lon, sin_lat, cos_lat * sin_lon)
}

/// Maps geographic coordinates onto the unit globe.
#[derive(Debug, Clone, PartialEq)]
pub struct Globe {
    altitude_scale: f64,
}

impl Default for Globe {
    fn default() -> Self {
        Self::new(DEFAULT_ALTITUDE_SCALE)
    }
}

impl Globe {
    /// Create a mapping with the given radius-per-foot scale factor.
    #[must_use]
    pub fn new(altitude_scale: f64) -> Self {
        let altitude_scale = if altitude_scale.is_finite() && altitude_scale >= 0.0 {
            altitude_scale
        } else {
            DEFAULT_ALTITUDE_SCALE
        };
        Self { altitude_scale }
    }

    /// Radius-per-foot scale factor.
    #[must_use]
    pub fn altitude_scale(&self) -> f64 {
        self.altitude_scale
    }

    /// Sphere radius at the given altitude.
    #[must_use]
    pub fn radius_at(&self, alt: f64) -> f64 {
        1.0 + alt.max(0.0) * self.altitude_scale
    }

    /// Position of `(lat, lon, alt)` in globe space.
    #[must_use]
    pub fn to_vec3(&self, lat: f64, lon: f64, alt: f64) -> Vec3 {
        (unit_position(lat, lon) * self.radius_at(alt)).as_vec3()
    }

    /// Position of a [`GeoPoint`] in globe space.
    #[must_use]
    pub fn point_to_vec3(&self, point: &GeoPoint) -> Vec3 {
        self.to_vec3(point.lat, point.lon, point.alt)
    }

    /// Recover geographic coordinates from a globe-space position.
    ///
    /// The zero vector maps to `(0, 0, 0)`. Points inside the unit sphere
    /// report zero altitude.
    #[must_use]
    pub fn vec3_to_point(&self, position: Vec3) -> GeoPoint {
        let p = position.as_dvec3();
        let r = p.length();
        if r <= f64::EPSILON || !r.is_finite() {
            return GeoPoint::default();
        }
        let lat = (p.y / r).clamp(-1.0, 1.0).asin().to_degrees();
        let lon = if p.x.abs() <= f64::EPSILON && p.z.abs() <= f64::EPSILON {
            0.0
        } else {
            wrap_longitude(p.z.atan2(p.x).to_degrees())
        };
        let alt = if self.altitude_scale > 0.0 {
            ((r - 1.0) / self.altitude_scale).max(0.0)
        } else {
            0.0
        };
        GeoPoint { lat, lon, alt }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn norm_matches_radius_everywhere() {
        let globe = Globe::default();
        for alt in [0.0, 10_000.0, 45_000.0] {
            let expected = globe.radius_at(alt) as f32;
            let mut lat = -90.0;
            while lat <= 90.0 {
                let mut lon = -179.5;
                while lon <= 180.0 {
                    let v = globe.to_vec3(lat, lon, alt);
                    assert!(
                        (v.length() - expected).abs() < 1e-5,
                        "lat={lat} lon={lon} alt={alt} len={}",
                        v.length()
                    );
                    lon += 7.25;
                }
                lat += 5.0;
            }
        }
    }

    #[test]
    fn seam_maps_to_same_point() {
        let globe = Globe::default();
        let east = globe.to_vec3(33.0, 180.0, 0.0);
        let west = globe.to_vec3(33.0, -180.0, 0.0);
        assert!((east - west).length() < 1e-6);
    }

    #[test]
    fn poles_are_finite_and_on_axis() {
        let globe = Globe::default();
        for lon in [-180.0, -45.0, 0.0, 123.0] {
            let north = globe.to_vec3(90.0, lon, 0.0);
            let south = globe.to_vec3(-90.0, lon, 0.0);
            assert!(north.is_finite() && south.is_finite());
            assert!((north - Vec3::Y).length() < 1e-6);
            assert!((south + Vec3::Y).length() < 1e-6);
        }
    }

    #[test]
    fn axis_convention() {
        let globe = Globe::default();
        assert!((globe.to_vec3(0.0, 0.0, 0.0) - Vec3::X).length() < 1e-6);
        assert!((globe.to_vec3(0.0, 90.0, 0.0) - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn vec3_to_point_inverts_to_vec3() {
        let globe = Globe::default();
        let point = GeoPoint::with_alt(-33.9, 151.2, 12_000.0);
        let back = globe.vec3_to_point(globe.point_to_vec3(&point));
        assert!((back.lat - point.lat).abs() < 1e-3);
        assert!((back.lon - point.lon).abs() < 1e-3);
        // f32 narrowing limits altitude precision to a few feet
        assert!((back.alt - point.alt).abs() < 10.0);
    }

    #[test]
    fn vec3_to_point_handles_degenerate_input() {
        let globe = Globe::default();
        assert_eq!(globe.vec3_to_point(Vec3::ZERO), GeoPoint::default());
        let pole = globe.vec3_to_point(Vec3::Y * 2.0);
        assert!((pole.lat - 90.0).abs() < 1e-9);
        assert_eq!(pole.lon, 0.0);
    }

    #[test]
    fn sanitize_rejects_nan_and_clamps() {
        assert!(GeoPoint::new(f64::NAN, 0.0).sanitize().is_none());
        assert!(GeoPoint::new(0.0, f64::INFINITY).sanitize().is_none());

        let p = GeoPoint::with_alt(95.0, 190.0, -5.0).sanitize().unwrap();
        assert_eq!(p.lat, 90.0);
        assert!((p.lon + 170.0).abs() < 1e-9);
        assert_eq!(p.alt, 0.0);
    }

    #[test]
    fn wrap_longitude_range() {
        assert_eq!(wrap_longitude(180.0), 180.0);
        assert_eq!(wrap_longitude(-180.0), 180.0);
        assert!((wrap_longitude(540.0) - 180.0).abs() < 1e-9);
        assert!((wrap_longitude(-190.0) - 170.0).abs() < 1e-9);
        assert_eq!(wrap_longitude(-74.006), -74.006);
        assert_eq!(wrap_longitude(-179.999), -179.999);
        assert_eq!(wrap_longitude(0.0), 0.0);
    }

    #[test]
    fn sanitize_keeps_in_range_coordinates_exact() {
        let p = GeoPoint::new(40.7128, -74.006);
        assert_eq!(p.sanitize(), Some(p));
    }

    #[test]
    fn approx_eq_across_seam() {
        let a = GeoPoint::new(10.0, 179.99998);
        let b = GeoPoint::new(10.0, -179.99998);
        assert!(a.approx_eq(&b, 1e-4));
        assert!(!a.approx_eq(&GeoPoint::new(10.001, 179.99998), 1e-4));
    }

    #[test]
    fn invalid_scale_falls_back_to_default() {
        assert_eq!(Globe::new(f64::NAN).altitude_scale(), DEFAULT_ALTITUDE_SCALE);
        assert_eq!(Globe::new(-1.0).altitude_scale(), DEFAULT_ALTITUDE_SCALE);
    }
}
