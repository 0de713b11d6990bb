//! battlemap TUI: ratatui application shell.

pub mod app;
pub mod commands;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::App;

use battlemap_core::{Dataset, config::Config};

/// Start the TUI over an already loaded dataset.
pub fn run(dataset: Dataset, config: Config) -> anyhow::Result<()> {
    let theme = theme::Theme::by_name(&config.ui.theme);
    App::new(dataset, config, theme).run()
}
