//! Headless mode: render one selection and print it as JSON.
//!
//! Runs the same selection and render pipeline as the TUI without a
//! terminal. Normalization failures go to the error writer as the single
//! summary line the UI shows in its banner; the map goes to the output writer
//! as pretty-printed JSON. An empty map is centred on the configured default
//! viewport, the same one the TUI falls back to.

use battlemap_core::{Dataset, MapView, Selection, ViewMode, Viewport};
use std::io::Write;

/// What to render, as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessRequest {
    /// Battle name; the first battle in the dataset when absent.
    pub event: Option<String>,
    pub mode: ViewMode,
    /// Note to show in note mode; the battle's first note when absent.
    pub note: Option<String>,
    /// Timestamp to show in time mode; the battle's earliest when absent.
    pub time: Option<String>,
}

impl Default for HeadlessRequest {
    fn default() -> Self {
        Self {
            event: None,
            mode: ViewMode::AllNotes,
            note: None,
            time: None,
        }
    }
}

/// Resolve a request against the dataset, filling in defaults.
///
/// `None` means nothing can be selected (empty dataset, or a battle with no
/// notes or no timestamps for the requested mode) and the map is empty.
pub fn resolve(dataset: &Dataset, req: &HeadlessRequest) -> Option<Selection> {
    let battle = match &req.event {
        Some(event) => event.clone(),
        None => dataset.battle_names().into_iter().next()?,
    };
    let selection = match req.mode {
        ViewMode::AllNotes => Selection::all(battle),
        ViewMode::SelectNote => {
            let note = match &req.note {
                Some(note) => note.clone(),
                None => dataset.notes(&battle).into_iter().next()?,
            };
            Selection::note(battle, note)
        }
        ViewMode::SelectTime => {
            let time = match &req.time {
                Some(time) => time.clone(),
                None => dataset.time_options(&battle).into_iter().next()?,
            };
            Selection::time(battle, time)
        }
    };
    Some(selection)
}

/// Render `req`; an empty result shows `empty_view`.
pub fn render(dataset: &Dataset, req: &HeadlessRequest, empty_view: Viewport) -> MapView {
    let mut view = match resolve(dataset, req) {
        Some(selection) => dataset.render(&selection),
        None => MapView::empty(),
    };
    if view.is_empty() {
        view.viewport = empty_view;
    }
    view
}

/// Render `req` and write the JSON map to `out`, failures to `err`.
pub fn run<O: Write, E: Write>(
    dataset: &Dataset,
    req: &HeadlessRequest,
    empty_view: Viewport,
    out: &mut O,
    err: &mut E,
) -> anyhow::Result<()> {
    if let Some(message) = dataset.error_message() {
        writeln!(err, "{message}")?;
    }
    let view = render(dataset, req, empty_view);
    tracing::debug!(
        request = ?req,
        markers = view.markers.len(),
        paths = view.paths.len(),
        "headless render"
    );
    serde_json::to_writer_pretty(&mut *out, &view)?;
    writeln!(out)?;
    Ok(())
}
