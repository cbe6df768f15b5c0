//! Keyword input with type filter and suggestion chips.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::i18n;
use crate::search::SearchType;
use crate::ui::core::{actions::Action, Component};

/// Column span a suggestion chip occupied during the last render.
#[derive(Debug, Clone, Copy)]
struct SuggestionArea {
    index: usize,
    x_start: u16,
    x_end: u16,
    row: u16,
}

pub struct SearchBar {
    pub keyword: String,
    pub search_type: SearchType,
    suggestions: Vec<String>,
    focused: bool,
    suggestion_areas: Vec<SuggestionArea>,
}

impl SearchBar {
    pub fn new() -> Self {
        Self {
            keyword: String::new(),
            search_type: SearchType::All,
            suggestions: Vec::new(),
            focused: false,
            suggestion_areas: Vec::new(),
        }
    }

    pub fn set_suggestions(&mut self, suggestions: Vec<String>) {
        self.suggestions = suggestions;
    }

    /// Append a picked suggestion to the keyword, space separated,
    /// trimming like the original suggestion click handler.
    pub fn apply_suggestion(&mut self, suggestion: &str) {
        self.keyword = format!("{} {}", self.keyword, suggestion).trim().to_string();
    }

    /// Fixed height of the bar: input row plus suggestion row.
    pub fn height(&self) -> u16 {
        4
    }
}

impl Default for SearchBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for SearchBar {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char('t') = key.code {
                self.search_type = self.search_type.next();
            }
            return Action::None;
        }
        match key.code {
            KeyCode::Enter => Action::SubmitSearch,
            KeyCode::Backspace => {
                self.keyword.pop();
                Action::None
            }
            KeyCode::Char(c) => {
                self.keyword.push(c);
                Action::None
            }
            _ => Action::None,
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Action {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Action::None;
        }
        let hit = self.suggestion_areas.iter().find(|area| {
            mouse.row == area.row && mouse.column >= area.x_start && mouse.column <= area.x_end
        });
        match hit.and_then(|area| self.suggestions.get(area.index)) {
            Some(suggestion) => Action::SuggestionPicked(suggestion.clone()),
            None => Action::None,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };
        let title = format!(
            "{} [{}]",
            i18n::t("search.title"),
            i18n::t(&self.search_type.label_key())
        );
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(title);
        let inner = block.inner(rect);

        let input_text = if self.keyword.is_empty() && !self.focused {
            Span::styled(
                i18n::t("search.placeholder"),
                Style::default().fg(Color::DarkGray),
            )
        } else {
            Span::raw(self.keyword.clone())
        };
        f.render_widget(Paragraph::new(Line::from(input_text)).block(block), rect);

        // Suggestion chips on the row below the input
        self.suggestion_areas.clear();
        if inner.height > 1 && !self.suggestions.is_empty() {
            let row = inner.y + 1;
            let mut cursor = inner.x;
            let mut spans: Vec<Span> = Vec::new();
            for (index, suggestion) in self.suggestions.iter().enumerate() {
                let text = format!(" {suggestion} ");
                let width = Span::raw(text.as_str()).width() as u16;
                if cursor.saturating_add(width) > inner.x + inner.width {
                    break;
                }
                self.suggestion_areas.push(SuggestionArea {
                    index,
                    x_start: cursor,
                    x_end: cursor.saturating_add(width.saturating_sub(1)),
                    row,
                });
                spans.push(Span::styled(
                    text,
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::DarkGray)
                        .add_modifier(Modifier::DIM),
                ));
                spans.push(Span::raw(" "));
                cursor = cursor.saturating_add(width + 1);
            }
            let area = Rect::new(inner.x, row, inner.width, 1);
            f.render_widget(Paragraph::new(Line::from(spans)), area);
        }

        if self.focused {
            let cursor_x = inner.x + self.keyword.chars().count() as u16;
            f.set_cursor_position((cursor_x.min(inner.x + inner.width), inner.y));
        }
    }

    fn on_focus(&mut self) {
        self.focused = true;
    }

    fn on_blur(&mut self) {
        self.focused = false;
    }
}
