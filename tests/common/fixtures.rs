//! Static datasets used across harnesses.

use battlemap_core::Dataset;
use std::path::{Path, PathBuf};

/// Three Gettysburg routes over three days, two Midway records (one with a
/// 2-digit year) and one record with a misspelled month.
pub const SAMPLE_JSON: &str = r#"[
  {"BattleName": "Gettysburg", "RouteID": 1, "Year": 1863, "Month": "July", "Day": 1,
   "Time": "07:30:00", "Latitude": 39.8890, "Longitude": -77.2290,
   "KeyEventNotes": "Buford's cavalry engages"},
  {"BattleName": "Gettysburg", "RouteID": 1, "Year": 1863, "Month": "July", "Day": 1,
   "Time": "14:00:00", "Latitude": 39.8310, "Longitude": -77.2310,
   "KeyEventNotes": "Union falls back to Cemetery Hill"},
  {"BattleName": "Gettysburg", "RouteID": 2, "Year": 1863, "Month": "July", "Day": 2,
   "Time": "16:00:00", "Latitude": 39.7920, "Longitude": -77.2360,
   "KeyEventNotes": "Little Round Top"},
  {"BattleName": "Gettysburg", "RouteID": 20, "Year": 1863, "Month": "July", "Day": 2,
   "Time": "16:00:00", "Latitude": 39.8000, "Longitude": -77.2450,
   "KeyEventNotes": "Little Round Top"},
  {"BattleName": "Gettysburg", "RouteID": 3, "Year": "1863", "Month": "july", "Day": "3",
   "Time": "3:00 PM", "Latitude": 39.8130, "Longitude": -77.2350,
   "KeyEventNotes": "Pickett's Charge"},
  {"BattleName": "Gettysburg", "RouteID": 3, "Year": 1863, "Month": "Julyy", "Day": 3,
   "Time": "16:00:00", "Latitude": 39.8140, "Longitude": -77.2300, "KeyEventNotes": "Repulse"},
  {"BattleName": "Midway", "RouteID": 7, "Year": 42, "Month": "June", "Day": 4,
   "Time": "07:00:00", "Latitude": 30.0, "Longitude": -178.0, "KeyEventNotes": "Carrier strike"},
  {"BattleName": "Midway", "RouteID": 7, "Year": 1942, "Month": "June", "Day": 4,
   "Time": "10:25:00", "Latitude": 30.4, "Longitude": -177.4, "KeyEventNotes": "Dive bombers"}
]"#;

pub fn sample_dataset() -> Dataset {
    Dataset::from_json_str(SAMPLE_JSON).expect("sample dataset must parse")
}

/// Write `json` as `battles.json` under `dir` and return its path.
pub fn write_dataset(dir: &Path, json: &str) -> PathBuf {
    let path = dir.join("battles.json");
    std::fs::write(&path, json).expect("write dataset fixture");
    path
}
