//! Core types for battlemap-core.
//!
//! This module defines the records as they arrive from the dataset file
//! ([`EventRecord`]), the raw split date fields they carry ([`RawField`]), and
//! the normalised [`Observation`] every later layer works with.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Display format for normalised timestamps (slider values, tooltips).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A split date field exactly as it appeared in the dataset.
///
/// Datasets mix `"Year": 23`, `"Year": "2023"`, `"Day": 4.0` and `null`
/// freely. Deserialisation accepts every shape so that one odd record never
/// rejects the whole file; the normaliser decides validity per record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawField {
    Number(i64),
    Float(f64),
    Text(String),
    Null,
}

impl RawField {
    /// The field rendered as it appeared in the input, for error messages.
    pub fn as_display(&self) -> String {
        match self {
            RawField::Number(n) => n.to_string(),
            RawField::Float(f) => f.to_string(),
            RawField::Text(s) => s.clone(),
            RawField::Null => "null".to_string(),
        }
    }

    /// The field as a whole number, if it is numeric and integral.
    ///
    /// `4.0` yields `4`; `4.5`, text and `null` yield `None`.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            RawField::Number(n) => Some(*n),
            RawField::Float(f) if f.is_finite() && f.fract() == 0.0 => {
                i64::try_from(*f as i128).ok()
            }
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawField::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// A field absent from the record reads as empty text.
impl Default for RawField {
    fn default() -> Self {
        RawField::Text(String::new())
    }
}

impl From<i64> for RawField {
    fn from(n: i64) -> Self {
        RawField::Number(n)
    }
}

impl From<f64> for RawField {
    fn from(f: f64) -> Self {
        RawField::Float(f)
    }
}

impl From<&str> for RawField {
    fn from(s: &str) -> Self {
        RawField::Text(s.to_string())
    }
}

/// One observation exactly as it appears in the dataset file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(rename = "BattleName")]
    pub battle_name: String,
    #[serde(rename = "RouteID")]
    pub route_id: i64,
    #[serde(rename = "Year", default)]
    pub year: RawField,
    #[serde(rename = "Month", default)]
    pub month: RawField,
    #[serde(rename = "Day", default)]
    pub day: RawField,
    #[serde(rename = "Time", default)]
    pub time: RawField,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
    #[serde(rename = "KeyEventNotes", default)]
    pub key_event_notes: String,
}

/// A record after date normalisation.
///
/// `date_time` is `None` when the split date fields could not be combined into
/// a valid timestamp. Such observations still render on the map but take no
/// part in time-based selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    /// Position of the record in the input file.
    pub index: usize,
    pub battle_name: String,
    pub route_id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub key_event_notes: String,
    pub date_time: Option<NaiveDateTime>,
}

impl Observation {
    /// The timestamp formatted as `YYYY-MM-DD HH:MM:SS`, if one was resolved.
    pub fn formatted_time(&self) -> Option<String> {
        self.date_time
            .map(|dt| dt.format(TIMESTAMP_FORMAT).to_string())
    }
}
