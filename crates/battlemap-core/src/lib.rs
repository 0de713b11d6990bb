//! battlemap-core: dataset, date normalisation and map rendering.
//!
//! This crate holds everything that does not touch a terminal: loading the
//! event dataset, resolving each record's timestamp, narrowing records to a
//! user selection, and turning a selection into a drawable [`MapView`].
//!
//! # Architecture
//!
//! ```text
//! JSON ──► normalizer ──► Dataset ──► select ──► render ──► MapView
//!                            │                                 │
//!                            └── NormalizationReport           └──► TUI / headless
//! ```
//!
//! Data flows one way. The [`Dataset`] is built once and never mutated; each
//! interaction re-runs selection and rendering against it.

pub mod config;
pub mod dataset;
pub mod error;
pub mod normalizer;
pub mod render;
pub mod types;

pub use dataset::{Dataset, Selection, ViewFilter, ViewMode};
pub use error::{DatasetError, DateParseError};
pub use normalizer::{NormalizationFailure, NormalizationReport};
pub use render::{Bounds, MapView, Marker, RouteColor, RoutePath, Viewport};
pub use types::{EventRecord, Observation, RawField, TIMESTAMP_FORMAT};
