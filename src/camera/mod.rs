//! Camera state for globe viewing.
//!
//! Provides the camera pose, the session that animates it between framing
//! targets, and the pivot controller used for modifier-held orbiting.

/// Orbit pivot selection and pivot-relative rotation.
pub mod orbit;
/// Camera pose type.
pub mod pose;
/// Animated camera session with a one-slot saved pose.
pub mod session;

pub use orbit::{OrbitMode, OrbitPivotController, OrbitState};
pub use pose::Pose;
pub use session::CameraSession;
