//! Target poses for each framing mode.

use glam::{Quat, Vec3};

use super::registry::EntityState;
use crate::camera::Pose;
use crate::geo::{direction, tangent_frame, GeoPoint, Globe, HeadingConvention};
use crate::options::{FramingOptions, Options};

/// Computes where the camera should go for each kind of request.
#[derive(Debug, Clone)]
pub struct Framer {
    globe: Globe,
    framing: FramingOptions,
    default_distance: f32,
    model_heading: HeadingConvention,
}

impl Framer {
    /// Build from engine options.
    #[must_use]
    pub fn new(options: &Options) -> Self {
        Self {
            globe: Globe::new(options.globe.altitude_scale),
            framing: options.framing.clone(),
            default_distance: options.camera.default_distance,
            model_heading: HeadingConvention::with_offset(
                options.globe.model_heading_offset_deg,
            ),
        }
    }

    /// Geodetic mapping in use.
    #[must_use]
    pub fn globe(&self) -> &Globe {
        &self.globe
    }

    /// Heading convention of the entity models the renderer draws.
    #[must_use]
    pub fn model_heading(&self) -> HeadingConvention {
        self.model_heading
    }

    /// Orientation for an entity model at `state`, using the configured
    /// model heading offset.
    #[must_use]
    pub fn model_orientation(&self, state: &EntityState) -> Quat {
        self.model_heading.orientation(state.lat, state.lon, state.heading)
    }

    /// Focus-request duplicate tolerance in degrees.
    #[must_use]
    pub fn focus_epsilon(&self) -> f64 {
        self.framing.focus_epsilon_deg
    }

    /// Behind-and-above chase view of an aircraft.
    ///
    /// The view distance grows with ground speed so fast aircraft get a
    /// wider frame.
    #[must_use]
    pub fn aircraft_pose(&self, state: &EntityState) -> Pose {
        let distance = self.framing.aircraft_view_distance(state.speed);
        self.chase_pose(state, distance, self.framing.aircraft_elevation)
    }

    /// Elevated view of an airport at a fixed distance.
    #[must_use]
    pub fn airport_pose(&self, state: &EntityState) -> Pose {
        self.chase_pose(
            state,
            self.framing.airport_view_distance,
            self.framing.airport_elevation,
        )
    }

    fn chase_pose(&self, state: &EntityState, distance: f32, elevation: f32) -> Pose {
        let anchor = self.globe.to_vec3(state.lat, state.lon, state.alt);
        let frame = tangent_frame(state.lat, state.lon);
        let forward = HeadingConvention::TRUE_HEADING.forward_in(&frame, state.heading);
        let position = anchor + frame.up * (distance * elevation) - forward * distance;
        Pose::new(position, anchor)
    }

    /// Pull back along the current view to the standard viewing distance,
    /// looking at the center.
    #[must_use]
    pub fn pull_back_pose(&self, current: &Pose) -> Pose {
        overview_pose_along(current.position, self.default_distance)
    }

    /// Swing to `point` keeping the current distance from the center.
    #[must_use]
    pub fn focus_pose(&self, current: &Pose, point: &GeoPoint) -> Pose {
        overview_pose(point, current.distance())
    }
}

/// Overhead view of `point` from `distance`, looking at the center.
#[must_use]
pub fn overview_pose(point: &GeoPoint, distance: f32) -> Pose {
    Pose::looking_at_center(direction(point.lat, point.lon) * distance)
}

fn overview_pose_along(position: Vec3, distance: f32) -> Pose {
    let dir = position.try_normalize().unwrap_or(Vec3::Z);
    Pose::looking_at_center(dir * distance)
}
