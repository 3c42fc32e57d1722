use glam::Vec3;

/// Camera position and look-at point in globe space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Eye (camera) position.
    pub position: Vec3,
    /// Point the camera looks at.
    pub look_at: Vec3,
}

impl Pose {
    /// Create a pose from an eye position and look-at point.
    #[must_use]
    pub const fn new(position: Vec3, look_at: Vec3) -> Self {
        Self { position, look_at }
    }

    /// A pose at `position` looking at the sphere center.
    #[must_use]
    pub const fn looking_at_center(position: Vec3) -> Self {
        Self {
            position,
            look_at: Vec3::ZERO,
        }
    }

    /// Distance from the eye to the sphere center.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.position.length()
    }

    /// Unit view direction, or `None` when eye and target coincide.
    #[must_use]
    pub fn view_direction(&self) -> Option<Vec3> {
        (self.look_at - self.position).try_normalize()
    }

    /// Linear blend of both points toward `other`.
    #[inline]
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            position: self.position.lerp(other.position, t),
            look_at: self.look_at.lerp(other.look_at, t),
        }
    }

    /// Whether every component is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.look_at.is_finite()
    }

    /// Whether both points lie within `tolerance` of `other`'s.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, tolerance: f32) -> bool {
        self.position.distance(other.position) <= tolerance
            && self.look_at.distance(other.look_at) <= tolerance
    }

    /// Push the eye out to `min_distance` from the center if it is closer.
    ///
    /// An eye exactly at the center is moved out along +Z.
    #[must_use]
    pub fn with_distance_floor(self, min_distance: f32) -> Self {
        let distance = self.distance();
        if distance >= min_distance {
            return self;
        }
        let dir = self.position.try_normalize().unwrap_or(Vec3::Z);
        Self {
            position: dir * min_distance,
            look_at: self.look_at,
        }
    }
}
