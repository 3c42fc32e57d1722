//! Demo binary that drives the globe camera engine through a scripted sequence.

use std::path::Path;

use glam::Vec2;
use globecam::engine::{CameraCommand, GlobeCameraEngine};
use globecam::error::GlobeCamError;
use globecam::framing::{
    AircraftId, AirportId, EntityState, EntityTable, FocusRequest,
    FrameSnapshot, SelectionRef,
};
use globecam::geo::Globe;
use globecam::options::Options;
use globecam::util::frame_timing::FrameTiming;
use web_time::{Duration, Instant};

/// Target FPS limit
const TARGET_FPS: u32 = 60;

/// How long each scripted step runs. Longer than one camera transition.
const STEP_SECONDS: f32 = 1.5;

/// One scripted change to the outside world.
enum Step {
    Select(SelectionRef),
    Despawn(AircraftId),
    Focus(FocusRequest),
    ClearFocus,
    Restore,
    PivotOrbit(Vec2),
}

fn script() -> Vec<(&'static str, Step)> {
    vec![
        ("select UAL123", Step::Select(SelectionRef::Aircraft("UAL123".into()))),
        ("switch to BAW45", Step::Select(SelectionRef::Aircraft("BAW45".into()))),
        ("deselect", Step::Select(SelectionRef::None)),
        ("search Paris", Step::Focus(FocusRequest::new(48.8566, 2.3522, "paris"))),
        ("search Paris again", Step::Focus(FocusRequest::new(48.8566, 2.3522, "paris"))),
        ("search Tokyo", Step::Focus(FocusRequest::new(35.6762, 139.6503, "tokyo"))),
        ("clear search", Step::ClearFocus),
        ("restore", Step::Restore),
        ("select KJFK", Step::Select(SelectionRef::Airport("KJFK".into()))),
        ("orbit around pivot", Step::PivotOrbit(Vec2::new(60.0, -20.0))),
        ("select DAL9", Step::Select(SelectionRef::Aircraft("DAL9".into()))),
        ("DAL9 lands", Step::Despawn("DAL9".into())),
    ]
}

fn demo_traffic() -> EntityTable {
    let mut table = EntityTable::new();
    table.upsert_aircraft(
        AircraftId::from("UAL123"),
        EntityState {
            lat: 41.2,
            lon: -87.1,
            alt: 35_000.0,
            heading: 95.0,
            speed: 460.0,
        },
    );
    table.upsert_aircraft(
        AircraftId::from("BAW45"),
        EntityState {
            lat: 51.1,
            lon: -20.4,
            alt: 38_000.0,
            heading: 255.0,
            speed: 510.0,
        },
    );
    table.upsert_aircraft(
        AircraftId::from("DAL9"),
        EntityState {
            lat: 40.5,
            lon: -73.6,
            alt: 2_500.0,
            heading: 220.0,
            speed: 160.0,
        },
    );
    table.upsert_airport(
        AirportId::from("KJFK"),
        EntityState::stationary(40.6413, -73.7781),
    );
    table
}

#[cfg(feature = "geoip")]
fn start_engine(options: Options) -> Result<GlobeCameraEngine, GlobeCamError> {
    let locator = globecam::bootstrap::IpLocator::new(
        options.bootstrap.geoip_url.clone(),
        options.bootstrap.timeout(),
    );
    GlobeCameraEngine::with_provider(options, locator)
}

#[cfg(not(feature = "geoip"))]
fn start_engine(options: Options) -> Result<GlobeCameraEngine, GlobeCamError> {
    use globecam::bootstrap::GeolocationError;

    GlobeCameraEngine::with_provider(options, || {
        Err(GeolocationError::Unavailable(
            "built without the geoip feature".into(),
        ))
    })
}

struct Demo {
    engine: GlobeCameraEngine,
    table: EntityTable,
    snapshot: FrameSnapshot,
    timing: FrameTiming,
}

impl Demo {
    /// Run frames until `done` or `limit` elapses.
    fn run_until(&mut self, limit: Duration, done: impl Fn(&Self) -> bool) {
        let give_up = Instant::now() + limit;
        while !done(self) && Instant::now() < give_up {
            if !self.timing.should_render() {
                std::thread::sleep(self.timing.until_next_frame());
                continue;
            }
            let dt = self.timing.end_frame();
            let _ = self.engine.frame(dt, &self.snapshot, &self.table);
        }
    }

    fn apply(&mut self, step: Step) {
        match step {
            Step::Select(selection) => self.snapshot.selection = selection,
            Step::Despawn(id) => {
                let _ = self.table.remove_aircraft(&id);
            }
            Step::Focus(request) => self.snapshot.focus = Some(request),
            Step::ClearFocus => self.snapshot.focus = None,
            Step::Restore => self.snapshot.restore = self.snapshot.restore.next(),
            Step::PivotOrbit(drag) => {
                self.engine.execute(
                    CameraCommand::PivotModifier { held: true },
                    &self.table,
                );
                log::info!("  pivot {:?}", self.engine.orbit_state());
                for _ in 0..10 {
                    self.engine
                        .execute(CameraCommand::Orbit { delta: drag / 10.0 }, &self.table);
                }
                self.engine.execute(
                    CameraCommand::PivotModifier { held: false },
                    &self.table,
                );
            }
        }
    }

    fn report(&self, label: &str) {
        let Some(pose) = self.engine.pose() else {
            log::warn!("{label}: camera not placed");
            return;
        };
        let scale = self.engine.options().globe.altitude_scale;
        let over = Globe::new(scale).vec3_to_point(pose.position);
        log::info!(
            "{label}: over ({:.2}, {:.2}) at distance {:.3}, \
             looking at [{:.3}, {:.3}, {:.3}], saved: {}, {:.0} fps",
            over.lat,
            over.lon,
            pose.distance(),
            pose.look_at.x,
            pose.look_at.y,
            pose.look_at.z,
            self.engine.session().saved().is_some(),
            self.timing.fps()
        );
    }
}

fn main() {
    env_logger::init();

    let options = match std::env::args().nth(1) {
        Some(path) => match Options::load(Path::new(&path)) {
            Ok(options) => options,
            Err(e) => {
                log::error!("Failed to load options from {path}: {e}");
                std::process::exit(1);
            }
        },
        None => Options::default(),
    };
    let startup_limit =
        options.bootstrap.timeout() + Duration::from_secs(1);

    let engine = match start_engine(options) {
        Ok(engine) => engine,
        Err(e) => {
            log::error!("Failed to start camera engine: {e}");
            std::process::exit(1);
        }
    };

    let mut demo = Demo {
        engine,
        table: demo_traffic(),
        snapshot: FrameSnapshot::default(),
        timing: FrameTiming::new(TARGET_FPS),
    };

    let gate = demo.engine.location_gate();
    demo.run_until(startup_limit, |_| gate.is_ready());
    if let Some(fix) = demo.engine.startup_fix() {
        log::info!("startup location {:?} ({:?})", fix.point, fix.source);
    }
    demo.report("startup");

    let step_time = Duration::from_secs_f32(STEP_SECONDS);
    for (label, step) in script() {
        demo.apply(step);
        demo.run_until(step_time, |_| false);
        demo.report(label);
    }
}
