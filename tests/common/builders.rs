//! Test builders: ergonomic constructors for `EventRecord` and `Observation`.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

use battlemap_core::{EventRecord, Observation, RawField};

// ---------------------------------------------------------------------------
// RecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`EventRecord`] fixtures.
///
/// # Example
///
/// ```rust
/// let record = RecordBuilder::new("Gettysburg")
///     .route(2)
///     .date(1863, "July", 3)
///     .time("15:00:00")
///     .at(39.81, -77.23)
///     .note("Pickett's Charge")
///     .build();
/// ```
pub struct RecordBuilder {
    battle_name: String,
    route_id: i64,
    year: RawField,
    month: RawField,
    day: RawField,
    time: RawField,
    latitude: f64,
    longitude: f64,
    key_event_notes: String,
}

impl RecordBuilder {
    pub fn new(battle: impl Into<String>) -> Self {
        Self {
            battle_name: battle.into(),
            route_id: 0,
            year: RawField::Number(1863),
            month: RawField::from("July"),
            day: RawField::Number(1),
            time: RawField::from("12:00:00"),
            latitude: 0.0,
            longitude: 0.0,
            key_event_notes: String::new(),
        }
    }

    pub fn route(mut self, route_id: i64) -> Self {
        self.route_id = route_id;
        self
    }

    pub fn date(
        mut self,
        year: impl Into<RawField>,
        month: impl Into<RawField>,
        day: impl Into<RawField>,
    ) -> Self {
        self.year = year.into();
        self.month = month.into();
        self.day = day.into();
        self
    }

    pub fn time(mut self, time: impl Into<RawField>) -> Self {
        self.time = time.into();
        self
    }

    pub fn at(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = latitude;
        self.longitude = longitude;
        self
    }

    pub fn note(mut self, note: &str) -> Self {
        self.key_event_notes = note.to_string();
        self
    }

    pub fn build(self) -> EventRecord {
        EventRecord {
            battle_name: self.battle_name,
            route_id: self.route_id,
            year: self.year,
            month: self.month,
            day: self.day,
            time: self.time,
            latitude: self.latitude,
            longitude: self.longitude,
            key_event_notes: self.key_event_notes,
        }
    }
}

// ---------------------------------------------------------------------------
// Observations
// ---------------------------------------------------------------------------

/// An already-normalised observation on `route_id` at `(lat, lon)` with no
/// timestamp, for renderer tests that do not care about dates.
pub fn observation(route_id: i64, lat: f64, lon: f64) -> Observation {
    Observation {
        index: 0,
        battle_name: "Test".to_string(),
        route_id,
        latitude: lat,
        longitude: lon,
        key_event_notes: String::new(),
        date_time: None,
    }
}
