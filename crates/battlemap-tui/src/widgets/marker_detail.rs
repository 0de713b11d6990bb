//! Marker detail pane: the popup text of the focused marker.
//!
//! This is where a click on a marker would open its popup: route, colour and
//! timestamp on the first line, the key event note below.

use crate::theme::Theme;
use battlemap_core::MapView;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget, Wrap},
};

pub struct MarkerDetail<'a> {
    view: &'a MapView,
    focused: usize,
    theme: &'a Theme,
}

impl<'a> MarkerDetail<'a> {
    pub fn new(view: &'a MapView, focused: usize, theme: &'a Theme) -> Self {
        Self {
            view,
            focused,
            theme,
        }
    }
}

impl Widget for MarkerDetail<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title("Marker")
            .border_style(self.theme.border_unfocused);

        let Some(marker) = self.view.markers.get(self.focused) else {
            Paragraph::new(Line::from(Span::styled(
                "No key events match this selection.",
                self.theme.status_hint,
            )))
            .block(block)
            .render(area, buf);
            return;
        };

        let header = Line::from(vec![
            Span::styled(
                format!("{}/{} ", self.focused + 1, self.view.markers.len()),
                self.theme.status_hint,
            ),
            Span::styled(
                format!("Route {} ", marker.route_id),
                self.theme
                    .route_style(marker.color)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(
                "({}) at {:.4}, {:.4}  {}",
                marker.color, marker.location[0], marker.location[1], marker.tooltip
            )),
        ]);
        let note = if marker.popup.is_empty() {
            Line::from(Span::styled("(no note)", self.theme.status_hint))
        } else {
            Line::from(marker.popup.as_str())
        };

        Paragraph::new(vec![header, note])
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
