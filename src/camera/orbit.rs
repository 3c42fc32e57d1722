//! Pivot selection for modifier-held orbiting.
//!
//! While the orbit modifier is held, rotation input orbits the camera around
//! a pivot on the globe instead of the globe center. The pivot is picked
//! once on key-down and dropped on key-up; the camera transition state is
//! never touched.

use glam::{Quat, Vec2, Vec3};

use super::pose::Pose;

/// Whether rotation input orbits the globe center or a locked pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrbitMode {
    /// Rotation orbits the sphere center.
    #[default]
    Free,
    /// Rotation orbits the pivot picked on modifier-down.
    PivotLocked,
}

/// Snapshot of the pivot the rotation control should use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitState {
    /// Whether a pivot other than the center is active.
    pub pivot_active: bool,
    /// Point rotation orbits around.
    pub pivot: Vec3,
}

/// Tracks the orbit modifier and the pivot it installs.
#[derive(Debug, Clone, Default)]
pub struct OrbitPivotController {
    mode: OrbitMode,
    pivot: Vec3,
}

impl OrbitPivotController {
    /// Start in [`OrbitMode::Free`] around the sphere center.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Modifier pressed: lock a pivot.
    ///
    /// The pivot is the selected aircraft when there is one, otherwise the
    /// point the camera looks at on the globe, otherwise (looking past the
    /// globe) the surface point nearest the camera. Repeated presses while
    /// locked keep the existing pivot.
    pub fn modifier_down(
        &mut self,
        camera: &Pose,
        selected_aircraft: Option<Vec3>,
    ) -> Vec3 {
        if self.mode == OrbitMode::PivotLocked {
            return self.pivot;
        }

        let pivot = selected_aircraft
            .filter(|p| p.is_finite())
            .unwrap_or_else(|| globe_pivot(camera));

        log::debug!("orbit pivot locked at {pivot:?}");
        self.mode = OrbitMode::PivotLocked;
        self.pivot = pivot;
        pivot
    }

    /// Modifier released: back to orbiting the sphere center.
    pub fn modifier_up(&mut self) {
        if self.mode == OrbitMode::PivotLocked {
            log::debug!("orbit pivot released");
        }
        self.mode = OrbitMode::Free;
        self.pivot = Vec3::ZERO;
    }

    /// Current mode.
    #[must_use]
    pub fn mode(&self) -> OrbitMode {
        self.mode
    }

    /// Current pivot (the sphere center when free).
    #[must_use]
    pub fn pivot(&self) -> Vec3 {
        self.pivot
    }

    /// Pivot snapshot for the rotation control.
    #[must_use]
    pub fn state(&self) -> OrbitState {
        OrbitState {
            pivot_active: self.mode == OrbitMode::PivotLocked,
            pivot: self.pivot,
        }
    }

    /// Orbit `pose` around the current pivot by a drag `delta`.
    ///
    /// Horizontal drag yaws around the pivot's radial axis, vertical drag
    /// pitches around the camera's right vector. Both eye and look-at
    /// swing with the rotation so the view stays locked on the pivot.
    #[must_use]
    pub fn rotate_pose(&self, pose: &Pose, delta: Vec2, rotate_speed: f32) -> Pose {
        let axis = self.pivot.try_normalize().unwrap_or(Vec3::Y);
        let yaw = Quat::from_axis_angle(axis, -delta.x * rotate_speed);

        let offset = yaw * (pose.position - self.pivot);
        let look = yaw * (pose.look_at - self.pivot);

        let view = (look - offset).try_normalize().unwrap_or(-axis);
        let Some(right) = view.cross(axis).try_normalize() else {
            // looking straight along the axis: pitch is undefined
            return Pose::new(self.pivot + offset, self.pivot + look);
        };
        let pitch = Quat::from_axis_angle(right, -delta.y * rotate_speed);

        Pose::new(self.pivot + pitch * offset, self.pivot + pitch * look)
    }
}

/// Pivot on the globe for a camera with nothing selected.
fn globe_pivot(camera: &Pose) -> Vec3 {
    camera
        .view_direction()
        .and_then(|dir| ray_sphere_intersection(camera.position, dir, 1.0))
        .unwrap_or_else(|| camera.position.try_normalize().unwrap_or(Vec3::Z))
}

/// First intersection of a ray with a sphere centered at the origin.
///
/// `direction` must be normalized. Returns the entry point, or the exit
/// point when the origin is inside the sphere; `None` when the ray misses
/// or the sphere lies behind the origin.
#[must_use]
pub fn ray_sphere_intersection(origin: Vec3, direction: Vec3, radius: f32) -> Option<Vec3> {
    let b = origin.dot(direction);
    let c = origin.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let root = discriminant.sqrt();
    let near = -b - root;
    let t = if near >= 0.0 { near } else { -b + root };
    (t >= 0.0).then(|| origin + direction * t)
}
