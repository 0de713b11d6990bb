//! Single-select list: the battle picker and the note picker in the sidebar.
//!
//! # Navigation
//! - `↑`/`k` and `↓`/`j` move the cursor.
//! - `Home`/`End` and `PageUp`/`PageDown` jump.
//! - `Enter` commits the entry under the cursor as the selection.
//!
//! The committed selection is what filters the map; moving the cursor alone
//! changes nothing until `Enter`.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

const PAGE: usize = 10;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone)]
pub struct SelectListState {
    pub items: Vec<String>,
    /// Index under the cursor.
    pub cursor: usize,
    /// Index of the committed choice.
    pub selected: usize,
}

impl SelectListState {
    /// A list whose first entry is both under the cursor and selected.
    pub fn new(items: Vec<String>) -> Self {
        Self {
            items,
            cursor: 0,
            selected: 0,
        }
    }

    pub fn selected_item(&self) -> Option<&str> {
        self.items.get(self.selected).map(String::as_str)
    }

    /// Move cursor and selection to the entry equal to `item`, if present.
    pub fn select_item(&mut self, item: &str) -> bool {
        match self.items.iter().position(|i| i == item) {
            Some(idx) => {
                self.cursor = idx;
                self.selected = idx;
                true
            }
            None => false,
        }
    }

    /// Handle an [`AppEvent`]. Returns `true` when the committed selection
    /// changed.
    pub fn handle(&mut self, event: &AppEvent) -> bool {
        let last = self.items.len().saturating_sub(1);
        match event {
            AppEvent::Nav(Direction::Up) => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            AppEvent::Nav(Direction::Down) => {
                self.cursor = (self.cursor + 1).min(last);
            }
            AppEvent::PageUp => self.cursor = self.cursor.saturating_sub(PAGE),
            AppEvent::PageDown => self.cursor = (self.cursor + PAGE).min(last),
            AppEvent::Home => self.cursor = 0,
            AppEvent::End => self.cursor = last,
            AppEvent::Enter => {
                if self.items.is_empty() || self.cursor == self.selected {
                    return false;
                }
                self.selected = self.cursor;
                tracing::debug!(item = ?self.selected_item(), "list: selection committed");
                return true;
            }
            _ => return false,
        }
        tracing::debug!(cursor = self.cursor, "list: cursor moved");
        false
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct SelectList<'a> {
    title: &'a str,
    state: &'a SelectListState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> SelectList<'a> {
    pub fn new(
        title: &'a str,
        state: &'a SelectListState,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            title,
            state,
            focused,
            theme,
        }
    }
}

impl Widget for SelectList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(self.title)
            .border_style(self.theme.border(self.focused));

        let inner = block.inner(area);
        block.render(area, buf);

        if self.state.items.is_empty() {
            Paragraph::new(Line::from(Span::styled("(none)", self.theme.status_hint)))
                .render(inner, buf);
            return;
        }

        let items: Vec<ListItem> = self
            .state
            .items
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let label = if label.is_empty() { "(blank)" } else { label.as_str() };
                if i == self.state.selected {
                    ListItem::new(Line::from(Span::styled(
                        format!("● {label}"),
                        self.theme.list_selected,
                    )))
                } else {
                    ListItem::new(Line::from(format!("○ {label}")))
                }
            })
            .collect();

        let mut list = List::new(items);
        if self.focused {
            list = list.highlight_style(self.theme.list_cursor);
        }

        let mut list_state = ListState::default().with_selected(Some(self.state.cursor));
        StatefulWidget::render(list, inner, buf, &mut list_state);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
