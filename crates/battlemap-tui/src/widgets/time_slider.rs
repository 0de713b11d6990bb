//! Time slider: steps through one battle's distinct timestamps in
//! chronological order.
//!
//! `←`/`→` (or `↑`/`↓`) step one position, `PageUp`/`PageDown` step a tenth of
//! the range, `Home`/`End` jump to the first or last timestamp. Every step
//! changes the selection immediately.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone)]
pub struct TimeSliderState {
    /// Formatted timestamps, ascending.
    pub options: Vec<String>,
    pub index: usize,
}

impl TimeSliderState {
    pub fn new(options: Vec<String>) -> Self {
        Self { options, index: 0 }
    }

    pub fn current(&self) -> Option<&str> {
        self.options.get(self.index).map(String::as_str)
    }

    fn page(&self) -> usize {
        (self.options.len() / 10).max(1)
    }

    /// Handle an [`AppEvent`]. Returns `true` when the slider moved.
    pub fn handle(&mut self, event: &AppEvent) -> bool {
        let last = self.options.len().saturating_sub(1);
        let before = self.index;
        self.index = match event {
            AppEvent::Nav(Direction::Left | Direction::Up) => self.index.saturating_sub(1),
            AppEvent::Nav(Direction::Right | Direction::Down) => (self.index + 1).min(last),
            AppEvent::PageUp => self.index.saturating_sub(self.page()),
            AppEvent::PageDown => (self.index + self.page()).min(last),
            AppEvent::Home => 0,
            AppEvent::End => last,
            _ => return false,
        };
        if self.index != before {
            tracing::debug!(index = self.index, time = ?self.current(), "slider moved");
        }
        self.index != before
    }

    /// Move to the option equal to `time`, if present.
    pub fn select_time(&mut self, time: &str) -> bool {
        match self.options.iter().position(|o| o == time) {
            Some(idx) => {
                self.index = idx;
                true
            }
            None => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct TimeSlider<'a> {
    state: &'a TimeSliderState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> TimeSlider<'a> {
    pub fn new(state: &'a TimeSliderState, focused: bool, theme: &'a Theme) -> Self {
        Self {
            state,
            focused,
            theme,
        }
    }
}

/// Track with a knob at `index` out of `count` positions, `width` cells wide.
fn track(index: usize, count: usize, width: usize) -> String {
    if width < 3 {
        return "●".repeat(width.min(1));
    }
    let inner = width - 2;
    let knob = if count <= 1 {
        0
    } else {
        index * (inner - 1) / (count - 1)
    };
    let mut s = String::with_capacity(width * 3);
    s.push('├');
    for i in 0..inner {
        s.push(if i == knob { '●' } else { '─' });
    }
    s.push('┤');
    s
}

impl Widget for TimeSlider<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title("Select DateTime")
            .border_style(self.theme.border(self.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        let Some(current) = self.state.current() else {
            Paragraph::new(Line::from(Span::styled(
                "no timestamped events",
                self.theme.status_hint,
            )))
            .render(inner, buf);
            return;
        };

        let count = self.state.options.len();
        let value_style = if self.focused {
            self.theme.list_cursor
        } else {
            self.theme.list_selected
        };
        let mut lines = vec![
            Line::from(vec![
                Span::styled(current.to_string(), value_style),
                Span::styled(
                    format!("  {}/{}", self.state.index + 1, count),
                    self.theme.status_hint,
                ),
            ]),
            Line::from(track(self.state.index, count, inner.width as usize)),
        ];
        if let (Some(first), Some(last)) = (self.state.options.first(), self.state.options.last()) {
            lines.push(Line::from(Span::styled(
                format!("{first} .. {last}"),
                self.theme.status_hint,
            )));
        }

        Paragraph::new(lines).render(inner, buf);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
