//! Per-frame view of the external state the camera reacts to.

use crate::geo::GeoPoint;

/// Aircraft identifier (e.g. ICAO 24-bit address in hex).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AircraftId(pub String);

/// Airport identifier (e.g. ICAO location code).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AirportId(pub String);

impl From<&str> for AircraftId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<&str> for AirportId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// What the user has selected. Aircraft and airport selection are
/// mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SelectionRef {
    /// Nothing selected.
    #[default]
    None,
    /// A tracked aircraft.
    Aircraft(AircraftId),
    /// A selected airport.
    Airport(AirportId),
}

impl SelectionRef {
    /// Whether an entity is selected.
    #[must_use]
    pub fn is_some(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// The selected aircraft, if the selection is one.
    #[must_use]
    pub fn aircraft(&self) -> Option<&AircraftId> {
        match self {
            Self::Aircraft(id) => Some(id),
            _ => None,
        }
    }
}

/// Request to look at a location without changing zoom distance.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusRequest {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// Altitude in feet.
    pub alt: f64,
    /// Producer-side identity of the request (e.g. the search result
    /// label). Duplicates are detected by coordinates, not by key.
    pub key: String,
}

impl FocusRequest {
    /// A surface focus request.
    #[must_use]
    pub fn new(lat: f64, lon: f64, key: impl Into<String>) -> Self {
        Self {
            lat,
            lon,
            alt: 0.0,
            key: key.into(),
        }
    }

    /// Requested location.
    #[must_use]
    pub fn point(&self) -> GeoPoint {
        GeoPoint::with_alt(self.lat, self.lon, self.alt)
    }
}

/// Monotonic restore counter. Every change is one "go back" request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RestoreToken(pub u64);

impl RestoreToken {
    /// The next token value.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Everything the framing policy looks at, sampled once per frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameSnapshot {
    /// Current selection.
    pub selection: SelectionRef,
    /// Entity under the cursor. Carried for the selection producer; the
    /// camera ignores it.
    pub hovered: SelectionRef,
    /// Active location focus, if any.
    pub focus: Option<FocusRequest>,
    /// Restore counter.
    pub restore: RestoreToken,
}
