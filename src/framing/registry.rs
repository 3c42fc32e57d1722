//! Entity lookup seam between live data and the camera.

use rustc_hash::FxHashMap;

use super::snapshot::{AircraftId, AirportId, SelectionRef};
use crate::geo::GeoPoint;

/// Live state of an entity the camera can frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EntityState {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// Altitude in feet.
    pub alt: f64,
    /// True heading in degrees.
    pub heading: f64,
    /// Ground speed in knots.
    pub speed: f32,
}

impl EntityState {
    /// A stationary entity on the surface, heading north.
    #[must_use]
    pub const fn stationary(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            alt: 0.0,
            heading: 0.0,
            speed: 0.0,
        }
    }

    /// Location of the entity.
    #[must_use]
    pub fn point(&self) -> GeoPoint {
        GeoPoint::with_alt(self.lat, self.lon, self.alt)
    }

    /// Normalize coordinates, or `None` if any are non-finite.
    #[must_use]
    pub fn sanitize(self) -> Option<Self> {
        let point = self.point().sanitize()?;
        if !self.heading.is_finite() {
            return None;
        }
        Some(Self {
            lat: point.lat,
            lon: point.lon,
            alt: point.alt,
            heading: self.heading,
            speed: if self.speed.is_finite() { self.speed.max(0.0) } else { 0.0 },
        })
    }
}

/// Read access to live entities.
///
/// `None` means the entity is gone (despawned or filtered out).
pub trait EntityRegistry {
    /// Look up an aircraft.
    fn aircraft(&self, id: &AircraftId) -> Option<EntityState>;

    /// Look up an airport.
    fn airport(&self, id: &AirportId) -> Option<EntityState>;

    /// Look up whatever `selection` refers to.
    fn lookup(&self, selection: &SelectionRef) -> Option<EntityState> {
        match selection {
            SelectionRef::None => None,
            SelectionRef::Aircraft(id) => self.aircraft(id),
            SelectionRef::Airport(id) => self.airport(id),
        }
    }
}

/// In-memory entity registry.
#[derive(Debug, Clone, Default)]
pub struct EntityTable {
    aircraft: FxHashMap<AircraftId, EntityState>,
    airports: FxHashMap<AirportId, EntityState>,
}

impl EntityTable {
    /// Empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an aircraft.
    pub fn upsert_aircraft(&mut self, id: AircraftId, state: EntityState) {
        let _ = self.aircraft.insert(id, state);
    }

    /// Insert or replace an airport.
    pub fn upsert_airport(&mut self, id: AirportId, state: EntityState) {
        let _ = self.airports.insert(id, state);
    }

    /// Remove an aircraft, returning its last state.
    pub fn remove_aircraft(&mut self, id: &AircraftId) -> Option<EntityState> {
        self.aircraft.remove(id)
    }

    /// Number of aircraft.
    #[must_use]
    pub fn aircraft_count(&self) -> usize {
        self.aircraft.len()
    }
}

impl EntityRegistry for EntityTable {
    fn aircraft(&self, id: &AircraftId) -> Option<EntityState> {
        self.aircraft.get(id).copied()
    }

    fn airport(&self, id: &AirportId) -> Option<EntityState> {
        self.airports.get(id).copied()
    }
}
