//! Date normaliser: combines the split `Year`/`Month`/`Day`/`Time` fields of
//! an [`EventRecord`] into a single [`NaiveDateTime`].
//!
//! Every record is normalised independently. A record whose fields cannot be
//! combined keeps `date_time: None` and is listed in the
//! [`NormalizationReport`]; the rest of the batch is unaffected.
//!
//! # Field rules
//!
//! | Field | Rule |
//! |-------|------|
//! | `Month` | full English month name, case-insensitive → `1..=12` |
//! | `Year`  | 4 digits kept as-is; `0..=99` → `2000..=2099` |
//! | `Day`   | zero-padded to width 2 |
//! | `Time`  | `HH:MM[:SS[.fff]]` or `h:MM[:SS] AM/PM`; empty means midnight |
//!
//! Numbers written as integral floats (`4.0`) count as integers. `null`,
//! fractional numbers and text where a number is needed all fail the record.

use crate::error::DateParseError;
use crate::types::{EventRecord, Observation, RawField};
use chrono::{NaiveDate, NaiveDateTime};

static MONTHS: phf::Map<&'static str, u32> = phf::phf_map! {
    "january" => 1,
    "february" => 2,
    "march" => 3,
    "april" => 4,
    "may" => 5,
    "june" => 6,
    "july" => 7,
    "august" => 8,
    "september" => 9,
    "october" => 10,
    "november" => 11,
    "december" => 12,
};

/// Layouts tried, in order, against the composed `YYYY-MM-DD <time>` string.
const DATETIME_LAYOUTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %I:%M:%S %p",
    "%Y-%m-%d %I:%M %p",
];

// ---------------------------------------------------------------------------
// Field normalisation
// ---------------------------------------------------------------------------

/// Map a full English month name to its number.
pub fn month_number(name: &str) -> Result<u32, DateParseError> {
    MONTHS
        .get(name.trim().to_ascii_lowercase().as_str())
        .copied()
        .ok_or_else(|| DateParseError::UnknownMonth(name.to_string()))
}

/// Normalise a year to four digits.
///
/// A value written with exactly four digits is kept. Anything else is read as
/// a two-digit year in the 2000s, so only `0..=99` is accepted there.
pub fn normalize_year(raw: &RawField) -> Result<i32, DateParseError> {
    let invalid = || DateParseError::InvalidYear(raw.as_display());

    let digits = match raw {
        RawField::Text(s) => s.trim().to_string(),
        other => match other.as_integer() {
            Some(n) if n >= 0 => n.to_string(),
            _ => return Err(invalid()),
        },
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let value: i32 = digits.parse().map_err(|_| invalid())?;
    match digits.len() {
        4 => Ok(value),
        1 | 2 => Ok(2000 + value),
        _ => Err(invalid()),
    }
}

/// Zero-pad a day number to width 2 (`4` → `"04"`, `17` → `"17"`).
pub fn pad_day(day: u32) -> String {
    format!("{day:02}")
}

fn normalize_day(raw: &RawField) -> Result<String, DateParseError> {
    let invalid = || DateParseError::InvalidDay(raw.as_display());
    let day = match raw {
        RawField::Text(s) => s.trim().parse::<u32>().map_err(|_| invalid())?,
        other => other
            .as_integer()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(invalid)?,
    };
    Ok(pad_day(day))
}

fn normalize_month(raw: &RawField) -> Result<u32, DateParseError> {
    match raw.as_text() {
        Some(name) => month_number(name),
        None => Err(DateParseError::UnknownMonth(raw.as_display())),
    }
}

// ---------------------------------------------------------------------------
// Composition
// ---------------------------------------------------------------------------

/// Parse an already composed `YYYY-MM-DD <time>` string.
pub fn parse_composed(composed: &str) -> Result<NaiveDateTime, DateParseError> {
    let composed = composed.trim();
    let invalid = || DateParseError::InvalidTimestamp {
        composed: composed.to_string(),
    };

    if !composed.contains(' ') {
        return NaiveDate::parse_from_str(composed, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .ok_or_else(invalid);
    }

    DATETIME_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(composed, layout).ok())
        .ok_or_else(invalid)
}

/// Resolve the timestamp of a single record.
pub fn normalize_record(record: &EventRecord) -> Result<NaiveDateTime, DateParseError> {
    let month = normalize_month(&record.month)?;
    let year = normalize_year(&record.year)?;
    let day = normalize_day(&record.day)?;
    let date = format!("{year:04}-{month:02}-{day}");
    match record.time.as_text() {
        Some(time) => parse_composed(&format!("{date} {}", time.trim())),
        None => Err(DateParseError::InvalidTimestamp {
            composed: format!("{date} {}", record.time.as_display()),
        }),
    }
}

// ---------------------------------------------------------------------------
// Batch
// ---------------------------------------------------------------------------

/// A record whose timestamp could not be resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizationFailure {
    /// Position of the record in the input file.
    pub index: usize,
    pub battle_name: String,
    pub error: DateParseError,
}

/// Outcome of normalising a whole dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizationReport {
    /// Every input record, in input order, with `date_time` resolved where possible.
    pub observations: Vec<Observation>,
    /// Records whose `date_time` is `None`, with the reason.
    pub failures: Vec<NormalizationFailure>,
}

impl NormalizationReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// One user-facing line describing every failure, or `None` if there were none.
    pub fn summary(&self) -> Option<String> {
        let first = self.failures.first()?;
        let total = self.observations.len();
        let failed = self.failures.len();
        Some(format!(
            "Error parsing DateTime: {failed} of {total} records have no usable timestamp \
             (first: record {} in {:?}: {})",
            first.index, first.battle_name, first.error
        ))
    }
}

/// Normalise every record, isolating failures per record.
pub fn normalize_all(records: Vec<EventRecord>) -> NormalizationReport {
    let mut report = NormalizationReport::default();

    for (index, record) in records.into_iter().enumerate() {
        let date_time = match normalize_record(&record) {
            Ok(dt) => Some(dt),
            Err(error) => {
                tracing::warn!(index, battle = %record.battle_name, %error, "unusable timestamp");
                report.failures.push(NormalizationFailure {
                    index,
                    battle_name: record.battle_name.clone(),
                    error,
                });
                None
            }
        };

        report.observations.push(Observation {
            index,
            battle_name: record.battle_name,
            route_id: record.route_id,
            latitude: record.latitude,
            longitude: record.longitude,
            key_event_notes: record.key_event_notes,
            date_time,
        });
    }

    report
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
