//! Inline error banner shown above the sidebar while the dataset has records
//! whose timestamp could not be resolved.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block, Paragraph, Widget, Wrap},
};

pub struct ErrorBanner<'a> {
    message: &'a str,
    theme: &'a Theme,
}

impl<'a> ErrorBanner<'a> {
    pub fn new(message: &'a str, theme: &'a Theme) -> Self {
        Self { message, theme }
    }
}

impl Widget for ErrorBanner<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title("Error")
            .border_style(self.theme.error_banner);
        Paragraph::new(self.message)
            .style(self.theme.error_banner)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
