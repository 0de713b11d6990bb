// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

use crate::{app::AppState, theme::Theme};
use battlemap_core::ViewMode;

/// A parsed, validated command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Close the app
    Quit,
    // Display help
    Help,
    // Change theme
    Theme(String),
    // Toggle timestamp labels on the map
    Labels,
    // Jump to an event by name
    Event(String),
    // Switch display mode
    Mode(ViewMode),
    // Show one timestamp of the current event
    Time(String),
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    ///
    /// Returns `Ok(cmd)` on success, `Err(message)` on failure. An empty
    /// string returns `Err("")` as a sentinel meaning "close without acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "q" | "quit" | "q!" | "quit!" => Ok(Command::Quit),
            "help" => Ok(Command::Help),
            "labels" | "ts" => Ok(Command::Labels),
            "theme" => {
                if rest.is_empty() {
                    Err("usage: theme <default|gruvbox>".to_string())
                } else {
                    Ok(Command::Theme(rest.to_string()))
                }
            }
            "event" | "e" => {
                if rest.is_empty() {
                    Err("usage: event <name>".to_string())
                } else {
                    Ok(Command::Event(rest.to_string()))
                }
            }
            "time" => {
                if rest.is_empty() {
                    Err("usage: time <YYYY-MM-DD HH:MM:SS>".to_string())
                } else {
                    Ok(Command::Time(rest.to_string()))
                }
            }
            "mode" => {
                if rest.is_empty() {
                    Err("usage: mode <note|all|time>".to_string())
                } else {
                    rest.parse::<ViewMode>().map(Command::Mode)
                }
            }
            other => Err(format!("unknown command: {other}")),
        }
    }
}

/// Execute a parsed [`Command`] against the application state.
///
/// Returns an error message when the command is well-formed but cannot be
/// applied (an event name that is not in the dataset, or a timestamp the
/// current event does not have).
pub fn execute_command(s: &mut AppState, cmd: Command) -> Result<(), String> {
    match cmd {
        Command::Quit => {
            s.quit = true;
        }
        Command::Help => {
            s.show_help = !s.show_help;
        }
        Command::Theme(name) => {
            s.theme = Theme::by_name(&name);
        }
        Command::Labels => {
            s.map.show_labels = !s.map.show_labels;
        }
        Command::Event(name) => {
            if !s.select_event_named(&name) {
                return Err(format!("no event named {name:?}"));
            }
        }
        Command::Mode(mode) => {
            s.set_mode(mode);
        }
        Command::Time(time) => {
            if !s.select_time_value(&time) {
                let battle = s.battle().unwrap_or_default();
                return Err(format!("no time {time:?} in {battle:?}"));
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
