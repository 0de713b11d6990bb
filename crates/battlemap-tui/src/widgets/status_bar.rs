//! Status bar: the 1-line strip at the top of the screen.

use crate::theme::Theme;
use battlemap_core::ViewMode;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::Widget,
};

/// Renders the title, the selected event and view mode, and marker/route
/// counts. Keybinding hints (`q:quit  ?:help`) are right-aligned in the same
/// row.
pub struct StatusBar<'a> {
    battle: Option<&'a str>,
    mode: ViewMode,
    markers: usize,
    routes: usize,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(
        battle: Option<&'a str>,
        mode: ViewMode,
        markers: usize,
        routes: usize,
        theme: &'a Theme,
    ) -> Self {
        Self {
            battle,
            mode,
            markers,
            routes,
            theme,
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, self.theme.status_bar);

        let line = Line::from(vec![
            Span::styled(
                " Battle Events Map ",
                self.theme.status_bar.add_modifier(Modifier::BOLD),
            ),
            Span::styled("│ ", self.theme.status_bar),
            Span::styled(
                format!("{} ", self.battle.unwrap_or("no events loaded")),
                self.theme.status_bar,
            ),
            Span::styled("│ ", self.theme.status_bar),
            Span::styled(format!("{} ", self.mode.label()), self.theme.status_bar),
            Span::styled("│ ", self.theme.status_bar),
            Span::styled(
                format!("{} markers, {} routes", self.markers, self.routes),
                self.theme.status_bar,
            ),
        ]);
        buf.set_line(area.x, area.y, &line, area.width);

        // Keybinding hints at the right edge
        let hint = " q:quit  ?:help ";
        let hint_x = area.right().saturating_sub(hint.len() as u16);
        buf.set_string(
            hint_x,
            area.y,
            hint,
            self.theme.status_bar.patch(self.theme.status_hint),
        );
    }
}
