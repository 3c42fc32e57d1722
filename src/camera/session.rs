//! Camera pose state and frame-by-frame transitions.

use glam::Vec3;

use super::pose::Pose;
use crate::options::CameraOptions;
use crate::util::easing::EasingFunction;

/// The single camera the engine steers.
///
/// Holds the current pose, one saved pose to return to, and the state of
/// the in-flight transition. The saved pose is a single slot: the first
/// [`save`](Self::save) wins until [`consume_saved`](Self::consume_saved)
/// empties it.
#[derive(Debug, Clone)]
pub struct CameraSession {
    current: Pose,
    start: Pose,
    target: Pose,
    saved: Option<Pose>,
    animating: bool,
    returning: bool,
    progress: f32,
    placed: bool,

    min_distance: f32,
    transition_rate: f32,
    easing: EasingFunction,
}

impl CameraSession {
    /// Create an unplaced session. The pose is a placeholder until the
    /// first [`snap_to`](Self::snap_to).
    #[must_use]
    pub fn new(options: &CameraOptions) -> Self {
        let pose = Pose::looking_at_center(Vec3::Z * options.default_distance);
        Self {
            current: pose,
            start: pose,
            target: pose,
            saved: None,
            animating: false,
            returning: false,
            progress: 1.0,
            placed: false,
            min_distance: options.min_distance,
            transition_rate: options.transition_rate,
            easing: options.easing,
        }
    }

    /// Apply updated camera options. An in-flight transition keeps its
    /// start and target but advances at the new rate.
    pub fn set_options(&mut self, options: &CameraOptions) {
        self.min_distance = options.min_distance;
        self.transition_rate = options.transition_rate;
        self.easing = options.easing;
    }

    /// Place the camera immediately, cancelling any transition.
    pub fn snap_to(&mut self, pose: Pose) {
        if !pose.is_finite() {
            log::warn!("ignoring non-finite snap pose {pose:?}");
            return;
        }
        self.current = pose;
        self.start = pose;
        self.target = pose;
        self.animating = false;
        self.returning = false;
        self.progress = 1.0;
        self.placed = true;
    }

    /// Start a transition from the current (possibly mid-flight) pose to
    /// `target`, replacing any transition already running.
    ///
    /// Returns `false` and leaves the camera alone if `target` is not
    /// finite.
    pub fn begin_animation(&mut self, target: Pose, returning: bool) -> bool {
        if !target.is_finite() {
            log::warn!("rejecting non-finite camera target {target:?}");
            return false;
        }
        if self.animating {
            log::debug!(
                "redirecting camera transition at progress {:.2}",
                self.progress
            );
        }
        self.start = self.current;
        self.target = target;
        self.progress = 0.0;
        self.animating = true;
        self.returning = returning;
        true
    }

    /// Advance the transition by `dt` seconds and return the new pose.
    ///
    /// At rest the pose is only held above the distance floor. Negative or
    /// non-finite deltas count as zero.
    pub fn tick(&mut self, dt: f32) -> Pose {
        if !self.animating {
            self.current = self.current.with_distance_floor(self.min_distance);
            return self.current;
        }

        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.progress = (self.progress + dt * self.transition_rate).min(1.0);

        if self.progress >= 1.0 {
            self.current = self.target.with_distance_floor(self.min_distance);
            self.animating = false;
            self.returning = false;
        } else {
            let eased = self.easing.evaluate(self.progress);
            self.current = self.start.lerp(&self.target, eased);
        }
        self.current
    }

    /// Remember the current pose, unless a pose is already saved.
    ///
    /// Returns whether the slot was filled by this call.
    pub fn save(&mut self) -> bool {
        if self.saved.is_some() {
            return false;
        }
        self.saved = Some(self.current);
        true
    }

    /// Take the saved pose, leaving the slot empty.
    pub fn consume_saved(&mut self) -> Option<Pose> {
        self.saved.take()
    }

    /// Current pose.
    #[must_use]
    pub fn current(&self) -> Pose {
        self.current
    }

    /// Pose the running (or last) transition heads for.
    #[must_use]
    pub fn target(&self) -> Pose {
        self.target
    }

    /// Saved pose, if any.
    #[must_use]
    pub fn saved(&self) -> Option<Pose> {
        self.saved
    }

    /// Whether a transition is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Whether the in-flight transition returns to a saved view.
    #[must_use]
    pub fn is_returning(&self) -> bool {
        self.returning
    }

    /// Raw transition progress in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Whether the camera has been placed by a snap.
    #[must_use]
    pub fn is_placed(&self) -> bool {
        self.placed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f32 = 1.0 / 60.0;

    fn session_at(position: Vec3) -> CameraSession {
        let mut session = CameraSession::new(&CameraOptions::default());
        session.snap_to(Pose::looking_at_center(position));
        session
    }

    fn run_to_rest(session: &mut CameraSession) -> Pose {
        let mut pose = session.current();
        for _ in 0..600 {
            pose = session.tick(FRAME);
            if !session.is_animating() {
                break;
            }
        }
        pose
    }

    #[test]
    fn new_session_is_unplaced() {
        let session = CameraSession::new(&CameraOptions::default());
        assert!(!session.is_placed());
        assert!(!session.is_animating());
    }

    #[test]
    fn snap_places_and_stops() {
        let mut session = session_at(Vec3::X * 2.0);
        assert!(session.begin_animation(
            Pose::looking_at_center(Vec3::Y * 2.0),
            false
        ));
        session.snap_to(Pose::looking_at_center(Vec3::Z * 3.0));
        assert!(session.is_placed());
        assert!(!session.is_animating());
        assert_eq!(session.target(), session.current());
    }

    #[test]
    fn tick_reaches_target_in_about_083_seconds() {
        let mut session = session_at(Vec3::X * 2.0);
        let target = Pose::looking_at_center(Vec3::Y * 2.0);
        assert!(session.begin_animation(target, true));
        assert!(session.is_returning());

        let mut frames = 0;
        while session.is_animating() {
            let _ = session.tick(FRAME);
            frames += 1;
            assert!(frames < 1000);
        }
        // 1 / 1.2 s at 60 fps
        assert!((49..=51).contains(&frames), "took {frames} frames");
        assert!(session.current().approx_eq(&target, 1e-6));
        assert!(!session.is_returning());
    }

    #[test]
    fn tick_uses_cubic_ease_out() {
        let mut session = session_at(Vec3::X * 2.0);
        let target = Pose::looking_at_center(Vec3::new(4.0, 0.0, 0.0));
        assert!(session.begin_animation(target, false));
        // progress 0.5 after 0.5 / 1.2 seconds
        let pose = session.tick(0.5 / 1.2);
        assert!((session.progress() - 0.5).abs() < 1e-5);
        // eased 0.875 → x = 2 + 2 * 0.875
        assert!((pose.position.x - 3.75).abs() < 1e-4);
    }

    #[test]
    fn redirect_starts_from_interpolated_pose() {
        let mut session = session_at(Vec3::X * 2.0);
        assert!(session.begin_animation(
            Pose::looking_at_center(Vec3::Y * 2.0),
            false
        ));
        for _ in 0..10 {
            let _ = session.tick(FRAME);
        }
        let mid = session.current();
        let t2 = Pose::looking_at_center(Vec3::Z * 2.0);
        assert!(session.begin_animation(t2, false));
        assert_eq!(session.progress(), 0.0);

        let next = session.tick(FRAME);
        let full = mid.position.distance(t2.position);
        let step = mid.position.distance(next.position);
        let one_frame = EasingFunction::CubicOut.evaluate(FRAME * 1.2);
        assert!(step <= full * one_frame + 1e-5, "jumped {step}");
        assert!(step > 0.0);
    }

    #[test]
    fn first_save_wins() {
        let mut session = session_at(Vec3::X * 2.0);
        assert!(session.save());
        session.snap_to(Pose::looking_at_center(Vec3::Y * 3.0));
        assert!(!session.save());
        let saved = session.consume_saved().unwrap();
        assert!((saved.position - Vec3::X * 2.0).length() < 1e-6);
        assert!(session.consume_saved().is_none());
        assert!(session.save());
    }

    #[test]
    fn rest_pose_respects_floor() {
        let mut session = session_at(Vec3::X * 2.0);
        assert!(session.begin_animation(
            Pose::looking_at_center(Vec3::X * 0.5),
            false
        ));
        let pose = run_to_rest(&mut session);
        assert!((pose.distance() - 1.02).abs() < 1e-5);
    }

    #[test]
    fn non_finite_target_is_rejected() {
        let mut session = session_at(Vec3::X * 2.0);
        let bad = Pose::looking_at_center(Vec3::new(f32::NAN, 0.0, 0.0));
        assert!(!session.begin_animation(bad, false));
        assert!(!session.is_animating());
        assert_eq!(session.tick(FRAME), session.current());
    }

    #[test]
    fn bad_delta_does_not_advance() {
        let mut session = session_at(Vec3::X * 2.0);
        assert!(session.begin_animation(
            Pose::looking_at_center(Vec3::Y * 2.0),
            false
        ));
        let _ = session.tick(f32::NAN);
        let _ = session.tick(-1.0);
        assert_eq!(session.progress(), 0.0);
        assert!(session.is_animating());
    }
}
