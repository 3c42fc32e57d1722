//! The camera engine facade.
//!
//! [`GlobeCameraEngine`] owns one of each camera component (session,
//! framing policy, orbit pivot, startup lookup) and runs the per-frame
//! step. Consumers sample their state into a
//! [`FrameSnapshot`](crate::framing::FrameSnapshot) every frame, call
//! [`frame`](GlobeCameraEngine::frame) and hand the returned pose to the
//! renderer camera.

mod command;
mod options;

use glam::{Quat, Vec3};
use web_time::Instant;

pub use command::CameraCommand;

use crate::bootstrap::{
    Bootstrap, LocationFix, LocationGate, LocationProvider,
};
use crate::camera::{
    CameraSession, OrbitPivotController, OrbitState, Pose,
};
use crate::error::GlobeCamError;
use crate::framing::{
    overview_pose, EntityRegistry, EntityState, FrameSnapshot, FramingPolicy,
    SelectionRef,
};
use crate::geo::GeoPoint;
use crate::options::{BootstrapOptions, Options};

/// Camera orchestration for the globe view.
///
/// The camera has no pose until a startup location is applied, either
/// from a [`LocationProvider`] started with
/// [`start_bootstrap`](Self::start_bootstrap) or directly through
/// [`place_at`](Self::place_at). Until then [`frame`](Self::frame)
/// returns `None` and no framing decisions are made.
#[derive(Debug)]
pub struct GlobeCameraEngine {
    options: Options,
    session: CameraSession,
    policy: FramingPolicy,
    orbit: OrbitPivotController,
    bootstrap: Option<Bootstrap>,
    startup_fix: Option<LocationFix>,
    gate: LocationGate,
}

impl GlobeCameraEngine {
    /// Create an engine with no camera placement and no lookup running.
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self {
            session: CameraSession::new(&options.camera),
            policy: FramingPolicy::new(&options),
            orbit: OrbitPivotController::new(),
            bootstrap: None,
            startup_fix: None,
            gate: LocationGate::new(),
            options,
        }
    }

    /// Create an engine and immediately start the startup lookup.
    ///
    /// # Errors
    ///
    /// Returns [`GlobeCamError::ThreadSpawn`] if the lookup thread fails to
    /// spawn.
    pub fn with_provider<P: LocationProvider>(
        options: Options,
        provider: P,
    ) -> Result<Self, GlobeCamError> {
        let mut engine = Self::new(options);
        engine.start_bootstrap(provider)?;
        Ok(engine)
    }

    /// Start the one-shot startup lookup on a background thread.
    ///
    /// Does nothing if the camera is already placed or a lookup is already
    /// running.
    ///
    /// # Errors
    ///
    /// Returns [`GlobeCamError::ThreadSpawn`] if the lookup thread fails to
    /// spawn.
    pub fn start_bootstrap<P: LocationProvider>(
        &mut self,
        provider: P,
    ) -> Result<(), GlobeCamError> {
        if self.session.is_placed() || self.bootstrap.is_some() {
            log::debug!("startup lookup already done or running");
            return Ok(());
        }
        self.bootstrap =
            Some(Bootstrap::spawn(provider, &self.options.bootstrap)?);
        Ok(())
    }

    /// Place the camera over `point` at city zoom and open the location
    /// gate.
    ///
    /// Only the first successful call has any effect. Returns whether this
    /// call placed the camera.
    pub fn place_at(&mut self, point: &GeoPoint) -> bool {
        if self.session.is_placed() {
            return false;
        }
        let Some(point) = point.sanitize() else {
            log::warn!("ignoring startup location {point:?}");
            return false;
        };

        let zoom = self.options.bootstrap.city_zoom_distance;
        let zoom = if zoom.is_finite() && zoom > 0.0 {
            zoom
        } else {
            BootstrapOptions::default().city_zoom_distance
        };
        self.session.snap_to(overview_pose(&point, zoom));

        if self.gate.open() {
            log::info!(
                "camera placed over ({:.4}, {:.4}), location ready",
                point.lat,
                point.lon
            );
        }
        true
    }

    /// Run one frame: apply a pending startup fix, react to changes in
    /// `snapshot`, and advance the camera by `dt` seconds.
    ///
    /// Returns the pose to render, or `None` while the camera is unplaced.
    pub fn frame(
        &mut self,
        dt: f32,
        snapshot: &FrameSnapshot,
        registry: &dyn EntityRegistry,
    ) -> Option<Pose> {
        self.frame_at(Instant::now(), dt, snapshot, registry)
    }

    /// [`frame`](Self::frame) against an explicit clock reading for the
    /// startup timeout.
    pub fn frame_at(
        &mut self,
        now: Instant,
        dt: f32,
        snapshot: &FrameSnapshot,
        registry: &dyn EntityRegistry,
    ) -> Option<Pose> {
        self.poll_bootstrap(now);
        if !self.session.is_placed() {
            return None;
        }

        let current = self.session.current();
        let action = self.policy.observe(snapshot, registry, &current);
        if action.apply(&mut self.session) {
            log::debug!("camera transition started");
        }
        Some(self.session.tick(dt))
    }

    fn poll_bootstrap(&mut self, now: Instant) {
        let Some(fix) = self.bootstrap.as_mut().and_then(|b| b.poll_at(now))
        else {
            return;
        };
        self.bootstrap = None;
        let _ = self.place_at(&fix.point);
        self.startup_fix = Some(fix);
    }

    /// World position of the selected aircraft, if one is tracked and has
    /// usable coordinates.
    fn selected_aircraft_position(
        &self,
        registry: &dyn EntityRegistry,
    ) -> Option<Vec3> {
        let id = self.policy.tracked().aircraft()?;
        let state = registry.aircraft(id)?.sanitize()?;
        Some(self.policy.framer().globe().point_to_vec3(&state.point()))
    }

    // ── Accessors ──

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Camera pose, or `None` while unplaced.
    #[must_use]
    pub fn pose(&self) -> Option<Pose> {
        self.session.is_placed().then(|| self.session.current())
    }

    /// The camera session (pose, saved slot, transition state).
    #[must_use]
    pub fn session(&self) -> &CameraSession {
        &self.session
    }

    /// Selection the camera is currently framing.
    #[must_use]
    pub fn tracked(&self) -> &SelectionRef {
        self.policy.tracked()
    }

    /// Orbit pivot for the rotation control.
    #[must_use]
    pub fn orbit_state(&self) -> OrbitState {
        self.orbit.state()
    }

    /// Current orbit pivot (the sphere center when no modifier is held).
    #[must_use]
    pub fn pivot(&self) -> Vec3 {
        self.orbit.pivot()
    }

    /// Orientation for an entity model, with the configured model heading
    /// offset applied.
    #[must_use]
    pub fn model_orientation(&self, state: &EntityState) -> Quat {
        self.policy.framer().model_orientation(state)
    }

    /// Handle to the "location ready" gate for data-loading threads.
    #[must_use]
    pub fn location_gate(&self) -> LocationGate {
        self.gate.clone()
    }

    /// The startup fix, once the lookup has finished.
    #[must_use]
    pub fn startup_fix(&self) -> Option<&LocationFix> {
        self.startup_fix.as_ref()
    }
}
