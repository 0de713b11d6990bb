//! Dataset: the loaded, normalised, immutable record set and the selection
//! logic the sidebar controls drive.
//!
//! A [`Dataset`] is built once at startup and owned by whoever presents it (the
//! TUI shell or headless mode). Every user interaction builds a [`Selection`]
//! and calls [`Dataset::select`]; nothing in here is mutated after load.

use crate::error::DatasetError;
use crate::normalizer::{self, NormalizationReport};
use crate::render::{self, MapView};
use crate::types::{EventRecord, Observation};
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use std::path::Path;

// ---------------------------------------------------------------------------
// View modes
// ---------------------------------------------------------------------------

/// The three ways of narrowing one battle's records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Show the records carrying one chosen note.
    SelectNote,
    /// Show every record of the battle.
    AllNotes,
    /// Show the records at one chosen timestamp.
    SelectTime,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::SelectNote, ViewMode::AllNotes, ViewMode::SelectTime];

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::SelectNote => "Select KeyEventNote",
            ViewMode::AllNotes => "Show All KeyEventNotes",
            ViewMode::SelectTime => "Select Time",
        }
    }

    pub fn next(self) -> Self {
        match self {
            ViewMode::SelectNote => ViewMode::AllNotes,
            ViewMode::AllNotes => ViewMode::SelectTime,
            ViewMode::SelectTime => ViewMode::SelectNote,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ViewMode::SelectNote => ViewMode::SelectTime,
            ViewMode::AllNotes => ViewMode::SelectNote,
            ViewMode::SelectTime => ViewMode::AllNotes,
        }
    }
}

impl std::str::FromStr for ViewMode {
    type Err = String;

    /// Accepts the short names used by the command bar and CLI.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "note" | "notes" | "select_note" => Ok(ViewMode::SelectNote),
            "all" | "all_notes" => Ok(ViewMode::AllNotes),
            "time" | "select_time" => Ok(ViewMode::SelectTime),
            other => Err(format!("unknown view mode {other:?} (expected note, all or time)")),
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// The second-level filter applied inside one battle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewFilter {
    AllNotes,
    /// Exact match on `KeyEventNotes`.
    Note(String),
    /// Exact match on the `YYYY-MM-DD HH:MM:SS` form of `DateTime`.
    Time(String),
}

impl ViewFilter {
    pub fn mode(&self) -> ViewMode {
        match self {
            ViewFilter::AllNotes => ViewMode::AllNotes,
            ViewFilter::Note(_) => ViewMode::SelectNote,
            ViewFilter::Time(_) => ViewMode::SelectTime,
        }
    }
}

/// What the user has chosen in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub battle: String,
    pub view: ViewFilter,
}

impl Selection {
    pub fn all(battle: impl Into<String>) -> Self {
        Self {
            battle: battle.into(),
            view: ViewFilter::AllNotes,
        }
    }

    pub fn note(battle: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            battle: battle.into(),
            view: ViewFilter::Note(note.into()),
        }
    }

    pub fn time(battle: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            battle: battle.into(),
            view: ViewFilter::Time(time.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// The immutable, normalised record set.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    report: NormalizationReport,
}

impl Dataset {
    /// Read and normalise a JSON array of event records from disk.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let text = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_json_str(&text)?;
        tracing::info!(
            path = %path.display(),
            records = dataset.len(),
            battles = dataset.battle_names().len(),
            failures = dataset.report.failures.len(),
            "dataset loaded"
        );
        Ok(dataset)
    }

    pub fn from_json_str(text: &str) -> Result<Self, DatasetError> {
        let records: Vec<EventRecord> = serde_json::from_str(text)?;
        Ok(Self::from_records(records))
    }

    pub fn from_records(records: Vec<EventRecord>) -> Self {
        Self {
            report: normalizer::normalize_all(records),
        }
    }

    pub fn observations(&self) -> &[Observation] {
        &self.report.observations
    }

    pub fn report(&self) -> &NormalizationReport {
        &self.report
    }

    /// The inline error message for records with unusable timestamps.
    pub fn error_message(&self) -> Option<String> {
        self.report.summary()
    }

    pub fn len(&self) -> usize {
        self.report.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.report.observations.is_empty()
    }

    fn in_battle<'a>(&'a self, battle: &'a str) -> impl Iterator<Item = &'a Observation> + 'a {
        self.report
            .observations
            .iter()
            .filter(move |o| o.battle_name == battle)
    }

    /// Distinct battle names in first-appearance order.
    pub fn battle_names(&self) -> Vec<String> {
        distinct(self.report.observations.iter().map(|o| o.battle_name.as_str()))
    }

    /// Distinct notes within one battle in first-appearance order.
    pub fn notes(&self, battle: &str) -> Vec<String> {
        distinct(self.in_battle(battle).map(|o| o.key_event_notes.as_str()))
    }

    /// Distinct timestamps within one battle, formatted and sorted ascending.
    ///
    /// Records without a usable timestamp contribute nothing.
    pub fn time_options(&self, battle: &str) -> Vec<String> {
        self.in_battle(battle)
            .filter_map(Observation::formatted_time)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Observations matching a selection, in input order.
    ///
    /// An unknown battle or a filter value with no matches yields an empty
    /// vector; that is an empty map, not an error.
    pub fn select(&self, selection: &Selection) -> Vec<&Observation> {
        let selected: Vec<&Observation> = self
            .report
            .observations
            .iter()
            .filter(|o| o.battle_name == selection.battle)
            .filter(|o| match &selection.view {
                ViewFilter::AllNotes => true,
                ViewFilter::Note(note) => &o.key_event_notes == note,
                ViewFilter::Time(time) => o.formatted_time().as_deref() == Some(time.as_str()),
            })
            .collect();
        tracing::debug!(
            battle = %selection.battle,
            view = ?selection.view,
            matched = selected.len(),
            "selection applied"
        );
        selected
    }

    /// Filter and render in one step.
    pub fn render(&self, selection: &Selection) -> MapView {
        render::render(self.select(selection))
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"[
        {"BattleName":"Gettysburg","RouteID":1,"Year":1863,"Month":"July","Day":1,"Time":"08:00:00",
         "Latitude":39.82,"Longitude":-77.23,"KeyEventNotes":"Buford holds the ridge"},
        {"BattleName":"Gettysburg","RouteID":2,"Year":1863,"Month":"July","Day":1,"Time":"08:00:00",
         "Latitude":39.85,"Longitude":-77.25,"KeyEventNotes":"Heth advances"},
        {"BattleName":"Gettysburg","RouteID":1,"Year":1863,"Month":"July","Day":2,"Time":"16:00",
         "Latitude":39.79,"Longitude":-77.24,"KeyEventNotes":"Little Round Top"},
        {"BattleName":"Midway","RouteID":0,"Year":"42","Month":"June","Day":4,"Time":"07:00",
         "Latitude":30.0,"Longitude":-178.0,"KeyEventNotes":"Strike launched"},
        {"BattleName":"Gettysburg","RouteID":2,"Year":1863,"Month":"Julyy","Day":3,"Time":"13:00",
         "Latitude":39.81,"Longitude":-77.22,"KeyEventNotes":"Heth advances"}
    ]"#;

    fn sample() -> Dataset {
        Dataset::from_json_str(SAMPLE).unwrap()
    }

    #[test]
    fn battle_names_keep_first_appearance_order() {
        assert_eq!(sample().battle_names(), vec!["Gettysburg", "Midway"]);
    }

    #[test]
    fn notes_are_distinct_within_battle() {
        assert_eq!(
            sample().notes("Gettysburg"),
            vec!["Buford holds the ridge", "Heth advances", "Little Round Top"]
        );
    }

    #[test]
    fn time_options_are_sorted_and_skip_bad_timestamps() {
        assert_eq!(
            sample().time_options("Gettysburg"),
            vec!["1863-07-01 08:00:00", "1863-07-02 16:00:00"]
        );
        assert_eq!(sample().time_options("Midway"), vec!["2042-06-04 07:00:00"]);
    }

    #[test]
    fn select_by_time_matches_exactly() {
        let ds = sample();
        let hits = ds.select(&Selection::time("Gettysburg", "1863-07-01 08:00:00"));
        assert_eq!(hits.iter().map(|o| o.index).collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn select_by_note_includes_records_without_timestamp() {
        let ds = sample();
        let hits = ds.select(&Selection::note("Gettysburg", "Heth advances"));
        assert_eq!(hits.iter().map(|o| o.index).collect::<Vec<_>>(), vec![1, 4]);
        assert!(hits[1].date_time.is_none());
    }

    #[test]
    fn empty_selection_is_not_an_error() {
        let ds = sample();
        assert!(ds.select(&Selection::all("Waterloo")).is_empty());
        assert!(ds.select(&Selection::time("Midway", "1999-01-01 00:00:00")).is_empty());
        assert!(ds.render(&Selection::all("Waterloo")).is_empty());
    }

    #[test]
    fn failures_surface_as_one_message() {
        let ds = sample();
        assert_eq!(ds.report().failures.len(), 1);
        let msg = ds.error_message().unwrap();
        assert!(msg.contains("1 of 5"));
        assert!(msg.contains("Julyy"));
    }

    #[test]
    fn malformed_json_is_a_dataset_error() {
        let err = Dataset::from_json_str("{\"not\": \"an array\"}").unwrap_err();
        assert!(matches!(err, DatasetError::Json { .. }));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Dataset::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }

    #[test]
    fn load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        std::fs::write(&path, SAMPLE).unwrap();
        let ds = Dataset::load(&path).unwrap();
        assert_eq!(ds.len(), 5);
        assert!(!ds.is_empty());
    }

    #[test]
    fn view_mode_parsing_and_cycling() {
        assert_eq!("time".parse::<ViewMode>(), Ok(ViewMode::SelectTime));
        assert_eq!("ALL".parse::<ViewMode>(), Ok(ViewMode::AllNotes));
        assert!("map".parse::<ViewMode>().is_err());
        for mode in ViewMode::ALL {
            assert_eq!(mode.next().prev(), mode);
        }
        assert_eq!(ViewFilter::Time("x".into()).mode(), ViewMode::SelectTime);
    }
}
