//! Ratatui widgets for the battlemap TUI.

pub mod command_bar;
pub mod error_banner;
pub mod help;
pub mod map_canvas;
pub mod marker_detail;
pub mod mode_picker;
pub mod select_list;
pub mod status_bar;
pub mod time_slider;
