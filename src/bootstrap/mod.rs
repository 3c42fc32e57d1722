//! Startup location lookup.
//!
//! The globe opens over the user's city. A [`LocationProvider`] runs once
//! on a background thread; the frame loop polls [`Bootstrap`] without
//! blocking and gets exactly one [`LocationFix`], either the provider's
//! answer or the configured fallback when the provider fails or the
//! timeout elapses.

mod gate;
mod ip;

use std::fmt;
use std::sync::mpsc;

use web_time::{Duration, Instant};

pub use gate::LocationGate;
#[cfg(feature = "geoip")]
pub use ip::IpLocator;
pub use ip::parse_ip_response;

use crate::error::GlobeCamError;
use crate::geo::GeoPoint;
use crate::options::BootstrapOptions;

const MAX_TIMEOUT: Duration = Duration::from_secs(24 * 60 * 60);

/// Why a location lookup produced no usable fix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeolocationError {
    /// The provider could not answer (network, service error, no hardware).
    Unavailable(String),
    /// The user or platform refused location access.
    Denied,
    /// No answer arrived within the configured timeout.
    Timeout,
    /// The provider answered with non-finite or missing coordinates.
    InvalidFix,
    /// The provider thread exited without answering.
    ProviderLost,
}

impl fmt::Display for GeolocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(msg) => write!(f, "location unavailable: {msg}"),
            Self::Denied => write!(f, "location access denied"),
            Self::Timeout => write!(f, "location lookup timed out"),
            Self::InvalidFix => write!(f, "location fix was not a valid coordinate"),
            Self::ProviderLost => {
                write!(f, "location provider exited without answering")
            }
        }
    }
}

impl std::error::Error for GeolocationError {}

/// Source of a one-shot startup location.
///
/// `locate` may block; it is always called off the frame thread.
pub trait LocationProvider: Send + 'static {
    /// Look up the current location. Altitude is ignored.
    fn locate(&self) -> Result<GeoPoint, GeolocationError>;
}

impl<F> LocationProvider for F
where
    F: Fn() -> Result<GeoPoint, GeolocationError> + Send + 'static,
{
    fn locate(&self) -> Result<GeoPoint, GeolocationError> {
        self()
    }
}

/// Provider that always answers with the same point.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub GeoPoint);

impl LocationProvider for FixedLocation {
    fn locate(&self) -> Result<GeoPoint, GeolocationError> {
        Ok(self.0)
    }
}

/// Where a [`LocationFix`] came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixSource {
    /// The provider answered in time.
    Located,
    /// The configured fallback, with the reason it was used.
    Fallback(GeolocationError),
}

/// The startup location, delivered once.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationFix {
    /// Where to open the globe; altitude is always zero.
    pub point: GeoPoint,
    /// Provider answer or fallback.
    pub source: FixSource,
}

impl LocationFix {
    /// Whether this fix is the fallback coordinate.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, FixSource::Fallback(_))
    }
}

/// Pending startup lookup running on a background thread.
pub struct Bootstrap {
    result_rx: mpsc::Receiver<Result<GeoPoint, GeolocationError>>,
    deadline: Instant,
    fallback: GeoPoint,
    finished: bool,
}

impl Bootstrap {
    /// Spawn the lookup thread.
    ///
    /// # Errors
    ///
    /// Returns [`GlobeCamError::ThreadSpawn`] if the thread fails to spawn.
    pub fn spawn<P: LocationProvider>(
        provider: P,
        options: &BootstrapOptions,
    ) -> Result<Self, GlobeCamError> {
        let (result_tx, result_rx) = mpsc::channel();

        // Detached: a provider stuck past the deadline is abandoned.
        let _ = std::thread::Builder::new()
            .name("geolocation".into())
            .spawn(move || {
                let _ = result_tx.send(provider.locate());
            })
            .map_err(GlobeCamError::ThreadSpawn)?;

        let fallback = GeoPoint::new(options.fallback_lat, options.fallback_lon)
            .sanitize()
            .unwrap_or_else(|| {
                let defaults = BootstrapOptions::default();
                GeoPoint::new(defaults.fallback_lat, defaults.fallback_lon)
            });

        Ok(Self::from_parts(result_rx, options.timeout(), fallback))
    }

    fn from_parts(
        result_rx: mpsc::Receiver<Result<GeoPoint, GeolocationError>>,
        timeout: Duration,
        fallback: GeoPoint,
    ) -> Self {
        log::info!("locating user, {:.1}s timeout", timeout.as_secs_f32());
        let now = Instant::now();
        Self {
            result_rx,
            deadline: now
                .checked_add(timeout)
                .unwrap_or_else(|| now + MAX_TIMEOUT),
            fallback,
            finished: false,
        }
    }

    /// Non-blocking check for the startup location.
    ///
    /// Returns `Some` exactly once.
    pub fn poll(&mut self) -> Option<LocationFix> {
        self.poll_at(Instant::now())
    }

    /// [`poll`](Self::poll) against an explicit clock reading.
    pub fn poll_at(&mut self, now: Instant) -> Option<LocationFix> {
        if self.finished {
            return None;
        }

        let fix = match self.result_rx.try_recv() {
            Ok(Ok(point)) => match point.sanitize() {
                Some(point) => LocationFix {
                    point: GeoPoint::new(point.lat, point.lon),
                    source: FixSource::Located,
                },
                None => self.fallback_fix(GeolocationError::InvalidFix),
            },
            Ok(Err(e)) => self.fallback_fix(e),
            Err(mpsc::TryRecvError::Disconnected) => {
                self.fallback_fix(GeolocationError::ProviderLost)
            }
            Err(mpsc::TryRecvError::Empty) => {
                if now < self.deadline {
                    return None;
                }
                self.fallback_fix(GeolocationError::Timeout)
            }
        };

        match &fix.source {
            FixSource::Located => log::info!(
                "located user at ({:.4}, {:.4})",
                fix.point.lat,
                fix.point.lon
            ),
            FixSource::Fallback(reason) => log::warn!(
                "{reason}; using fallback ({:.4}, {:.4})",
                fix.point.lat,
                fix.point.lon
            ),
        }

        self.finished = true;
        Some(fix)
    }

    fn fallback_fix(&self, reason: GeolocationError) -> LocationFix {
        LocationFix {
            point: self.fallback,
            source: FixSource::Fallback(reason),
        }
    }

    /// When the lookup gives up and the fallback is used.
    #[must_use]
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Whether the fix has already been delivered.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl fmt::Debug for Bootstrap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bootstrap")
            .field("deadline", &self.deadline)
            .field("fallback", &self.fallback)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wait_for_fix(bootstrap: &mut Bootstrap) -> LocationFix {
        let give_up = Instant::now() + Duration::from_secs(10);
        loop {
            if let Some(fix) = bootstrap.poll() {
                return fix;
            }
            assert!(Instant::now() < give_up, "no fix delivered");
            std::thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn provider_answer_is_delivered_once() {
        let options = BootstrapOptions::default();
        let mut bootstrap =
            Bootstrap::spawn(FixedLocation(GeoPoint::new(35.68, 139.69)), &options)
                .unwrap();

        let fix = wait_for_fix(&mut bootstrap);
        assert_eq!(fix.source, FixSource::Located);
        assert_eq!(fix.point, GeoPoint::new(35.68, 139.69));
        assert!(bootstrap.is_finished());
        assert_eq!(bootstrap.poll(), None);
    }

    #[test]
    fn provider_error_uses_fallback() {
        let options = BootstrapOptions::default();
        let mut bootstrap =
            Bootstrap::spawn(|| Err(GeolocationError::Denied), &options).unwrap();

        let fix = wait_for_fix(&mut bootstrap);
        assert_eq!(fix.source, FixSource::Fallback(GeolocationError::Denied));
        assert_eq!(fix.point, GeoPoint::new(40.7128, -74.0060));
    }

    #[test]
    fn invalid_fix_uses_fallback() {
        let options = BootstrapOptions::default();
        let mut bootstrap =
            Bootstrap::spawn(|| Ok(GeoPoint::new(f64::NAN, 0.0)), &options).unwrap();

        let fix = wait_for_fix(&mut bootstrap);
        assert_eq!(fix.source, FixSource::Fallback(GeolocationError::InvalidFix));
    }

    #[test]
    fn lost_provider_uses_fallback() {
        let (result_tx, result_rx) = mpsc::channel();
        drop(result_tx);
        let mut bootstrap = Bootstrap::from_parts(
            result_rx,
            Duration::from_secs(5),
            GeoPoint::new(1.0, 2.0),
        );

        let fix = bootstrap.poll().unwrap();
        assert_eq!(fix.source, FixSource::Fallback(GeolocationError::ProviderLost));
        assert_eq!(fix.point, GeoPoint::new(1.0, 2.0));
    }

    #[test]
    fn altitude_is_dropped() {
        let options = BootstrapOptions::default();
        let mut bootstrap = Bootstrap::spawn(
            FixedLocation(GeoPoint::with_alt(47.6, -122.3, 500.0)),
            &options,
        )
        .unwrap();
        assert_eq!(wait_for_fix(&mut bootstrap).point.alt, 0.0);
    }

    #[test]
    fn silent_provider_times_out() {
        let (_release, blocked) = mpsc::channel::<()>();
        let options = BootstrapOptions::default();
        let mut bootstrap = Bootstrap::spawn(
            move || {
                let _ = blocked.recv();
                Err(GeolocationError::Unavailable("released".into()))
            },
            &options,
        )
        .unwrap();

        let deadline = bootstrap.deadline();
        assert_eq!(
            bootstrap.poll_at(deadline - Duration::from_millis(1)),
            None
        );
        let fix = bootstrap.poll_at(deadline).unwrap();
        assert_eq!(fix.source, FixSource::Fallback(GeolocationError::Timeout));
        assert_eq!(fix.point, GeoPoint::new(40.7128, -74.0060));
        assert_eq!(bootstrap.poll_at(deadline + Duration::from_secs(1)), None);
    }

    #[test]
    fn invalid_fallback_option_uses_default() {
        let options = BootstrapOptions {
            fallback_lat: f64::NAN,
            timeout_secs: 0.0,
            ..BootstrapOptions::default()
        };
        let (_release, blocked) = mpsc::channel::<()>();
        let mut bootstrap = Bootstrap::spawn(
            move || {
                let _ = blocked.recv();
                Err(GeolocationError::Timeout)
            },
            &options,
        )
        .unwrap();

        let fix = bootstrap.poll_at(bootstrap.deadline()).unwrap();
        assert!(fix.is_fallback());
        assert_eq!(fix.point, GeoPoint::new(40.7128, -74.0060));
    }
}
