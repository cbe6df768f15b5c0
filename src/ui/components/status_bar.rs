//! Status bar component

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Bottom status line: transient messages on the left, key hints on
/// the right.
pub struct StatusBar {
    message: Option<String>,
}

impl StatusBar {
    pub fn new() -> Self {
        Self { message: None }
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub fn clear(&mut self) {
        self.message = None;
    }

    pub fn render(&self, f: &mut Frame, rect: Rect) {
        let hints = "Tab: next field  Ctrl+T: type  Ctrl+A: advanced  Ctrl+Q: quit";
        let left = self.message.clone().unwrap_or_default();
        let padding = (rect.width as usize).saturating_sub(left.len() + hints.len());
        let line = Line::from(vec![
            Span::styled(left, Style::default().fg(Color::Yellow)),
            Span::raw(" ".repeat(padding)),
            Span::styled(hints, Style::default().fg(Color::DarkGray)),
        ]);
        f.render_widget(Paragraph::new(line), rect);
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}
