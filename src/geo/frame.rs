//! Local tangent frames and heading orientations.

use glam::{Mat3, Quat, Vec3};

use super::unit_position;

/// Orthonormal local frame at a point on the globe.
///
/// `(north, east, up)` is right-handed: `north × east = up`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TangentFrame {
    /// Unit vector toward increasing latitude, tangent to the sphere.
    pub north: Vec3,
    /// Unit vector toward increasing longitude, tangent to the sphere.
    pub east: Vec3,
    /// Outward surface normal.
    pub up: Vec3,
}

/// Build the local tangent frame at `(lat, lon)`.
///
/// North starts from the latitude partial derivative and is
/// Gram-Schmidt'ed against `up`; east is `up × north`, and north is then
/// rebuilt as `east × up`. The second pass keeps the frame orthonormal near
/// the poles where a single cross product drifts. The latitude partial
/// never vanishes, so the poles themselves produce a finite frame.
#[must_use]
pub fn tangent_frame(lat: f64, lon: f64) -> TangentFrame {
    let up = unit_position(lat, lon).normalize();

    let (sin_lat, cos_lat) = lat.to_radians().sin_cos();
    let (sin_lon, cos_lon) = lon.to_radians().sin_cos();
    let d_lat =
        glam::DVec3::new(-sin_lat * cos_lon, cos_lat, -sin_lat * sin_lon);

    let north = (d_lat - up * d_lat.dot(up)).normalize();
    let east = up.cross(north).normalize();
    let north = east.cross(up).normalize();

    TangentFrame {
        north: north.as_vec3(),
        east: east.as_vec3(),
        up: up.as_vec3(),
    }
}

/// Maps a heading in degrees onto directions in the tangent plane.
///
/// Heading 0 points north and 90 points east. `offset_deg` is added before
/// evaluation; renderers whose assets face a different axis than true
/// heading configure it instead of patching the math.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadingConvention {
    /// Degrees added to every heading.
    pub offset_deg: f64,
}

impl HeadingConvention {
    /// True heading, no offset.
    pub const TRUE_HEADING: Self = Self { offset_deg: 0.0 };

    /// Convention with the given offset.
    #[must_use]
    pub const fn with_offset(offset_deg: f64) -> Self {
        Self { offset_deg }
    }

    /// Unit forward vector for `heading` at `(lat, lon)`.
    #[must_use]
    pub fn forward(&self, lat: f64, lon: f64, heading: f64) -> Vec3 {
        let frame = tangent_frame(lat, lon);
        self.forward_in(&frame, heading)
    }

    /// Unit forward vector for `heading` in an existing frame.
    #[must_use]
    pub fn forward_in(&self, frame: &TangentFrame, heading: f64) -> Vec3 {
        let (sin_h, cos_h) = (heading + self.offset_deg).to_radians().sin_cos();
        (frame.north * cos_h as f32 + frame.east * sin_h as f32).normalize()
    }

    /// Rotation taking model space (+X right, +Y up, +Z nose) to an
    /// entity at `(lat, lon)` flying `heading`.
    #[must_use]
    pub fn orientation(&self, lat: f64, lon: f64, heading: f64) -> Quat {
        let frame = tangent_frame(lat, lon);
        let forward = self.forward_in(&frame, heading);
        let right = frame.up.cross(forward).normalize();
        Quat::from_mat3(&Mat3::from_cols(right, frame.up, forward)).normalize()
    }
}

impl Default for HeadingConvention {
    fn default() -> Self {
        Self::TRUE_HEADING
    }
}

/// Unit forward vector for a true heading at `(lat, lon)`.
#[must_use]
pub fn heading_to_forward(lat: f64, lon: f64, heading: f64) -> Vec3 {
    HeadingConvention::TRUE_HEADING.forward(lat, lon, heading)
}

/// Model orientation for a true heading at `(lat, lon)`.
#[must_use]
pub fn orientation_from_heading(lat: f64, lon: f64, heading: f64) -> Quat {
    HeadingConvention::TRUE_HEADING.orientation(lat, lon, heading)
}
