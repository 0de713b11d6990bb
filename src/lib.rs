//! battlemap: terminal dashboard for dated, geolocated battle key events.
//!
//! The binary is a thin shell: it loads configuration and the dataset, then
//! hands them to the TUI or to [`headless`] mode. Everything interesting
//! lives in `battlemap-core` (loading, date normalization, selection and
//! rendering) and `battlemap-tui`.

pub mod headless;

pub use battlemap_core::{
    Dataset, MapView, Selection, ViewFilter, ViewMode, config::Config,
};
