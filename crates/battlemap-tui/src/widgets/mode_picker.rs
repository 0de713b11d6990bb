//! View-mode radio group: "Select KeyEventNote", "Show All KeyEventNotes",
//! "Select Time".

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use battlemap_core::ViewMode;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

/// Apply a navigation event to the mode. Returns the new mode when it changed.
pub fn handle(mode: ViewMode, event: &AppEvent) -> Option<ViewMode> {
    let next = match event {
        AppEvent::Nav(Direction::Up) => mode.prev(),
        AppEvent::Nav(Direction::Down) | AppEvent::Enter => mode.next(),
        AppEvent::Home => ViewMode::ALL[0],
        AppEvent::End => ViewMode::ALL[ViewMode::ALL.len() - 1],
        _ => return None,
    };
    (next != mode).then(|| {
        tracing::debug!(mode = ?next, "view mode changed");
        next
    })
}

pub struct ModePicker<'a> {
    mode: ViewMode,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> ModePicker<'a> {
    pub fn new(mode: ViewMode, focused: bool, theme: &'a Theme) -> Self {
        Self {
            mode,
            focused,
            theme,
        }
    }
}

impl Widget for ModePicker<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title("Display")
            .border_style(self.theme.border(self.focused));

        let lines: Vec<Line> = ViewMode::ALL
            .iter()
            .map(|m| {
                if *m == self.mode {
                    let style = if self.focused {
                        self.theme.list_cursor
                    } else {
                        self.theme.list_selected
                    };
                    Line::from(Span::styled(format!("(•) {}", m.label()), style))
                } else {
                    Line::from(format!("( ) {}", m.label()))
                }
            })
            .collect();

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
