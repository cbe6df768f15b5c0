//! Search results list with pagination links.

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::i18n;
use crate::search::{Pagination, ResultItem};
use crate::ui::core::{actions::Action, Component};

pub struct ResultsList {
    results: Vec<ResultItem>,
    pagination: Pagination,
    list_state: ListState,
    loading: bool,
    error: Option<String>,
    focused: bool,
    has_searched: bool,
    prev_area: Rect,
    next_area: Rect,
}

impl ResultsList {
    pub fn new() -> Self {
        Self {
            results: Vec::new(),
            pagination: Pagination::default(),
            list_state: ListState::default(),
            loading: false,
            error: None,
            focused: false,
            has_searched: false,
            prev_area: Rect::default(),
            next_area: Rect::default(),
        }
    }

    pub fn set_loading(&mut self) {
        self.loading = true;
        self.error = None;
        self.has_searched = true;
    }

    pub fn set_results(&mut self, results: Vec<ResultItem>, pagination: Pagination) {
        self.results = results;
        self.pagination = pagination;
        self.loading = false;
        self.error = None;
        self.list_state
            .select(if self.results.is_empty() { None } else { Some(0) });
    }

    pub fn set_error(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
        self.results.clear();
        self.pagination = Pagination::default();
    }

    fn selected_result(&self) -> Option<&ResultItem> {
        self.list_state.selected().and_then(|i| self.results.get(i))
    }

    fn move_selection(&mut self, down: bool) {
        if self.results.is_empty() {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0);
        let next = if down {
            (current + 1).min(self.results.len() - 1)
        } else {
            current.saturating_sub(1)
        };
        self.list_state.select(Some(next));
    }

    fn result_line(item: &ResultItem, selected: bool) -> ListItem<'_> {
        let type_style = Style::default().fg(match item.result_type.as_str() {
            "ticket" => Color::Yellow,
            "user" => Color::Green,
            "organization" => Color::Magenta,
            _ => Color::Gray,
        });
        let mut spans = vec![
            Span::styled(format!("[{}] ", item.result_type), type_style),
            Span::raw(item.title.clone()),
        ];
        if !item.description.is_empty() {
            spans.push(Span::styled(
                format!("  {}", item.description),
                Style::default().fg(Color::DarkGray),
            ));
        }
        let style = if selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        ListItem::new(Line::from(spans)).style(style)
    }
}

impl Default for ResultsList {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for ResultsList {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_selection(true);
                Action::None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_selection(false);
                Action::None
            }
            KeyCode::Enter => match self.selected_result() {
                Some(item) if item.result_type == "ticket" => match item.id {
                    Some(id) => Action::OpenTicket(id),
                    None => Action::None,
                },
                _ => Action::None,
            },
            KeyCode::Char('n') => match self.pagination.next_page.clone() {
                Some(url) => Action::SearchPage(url),
                None => Action::None,
            },
            KeyCode::Char('p') => match self.pagination.previous_page.clone() {
                Some(url) => Action::SearchPage(url),
                None => Action::None,
            },
            _ => Action::None,
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Action {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Action::None;
        }
        let inside = |area: Rect| {
            mouse.column >= area.x
                && mouse.column < area.x + area.width
                && mouse.row >= area.y
                && mouse.row < area.y + area.height
        };
        if inside(self.prev_area) {
            if let Some(url) = self.pagination.previous_page.clone() {
                return Action::SearchPage(url);
            }
        }
        if inside(self.next_area) {
            if let Some(url) = self.pagination.next_page.clone() {
                return Action::SearchPage(url);
            }
        }
        Action::None
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(self.pagination.count_label.clone())
            .title_alignment(Alignment::Left);
        let inner = block.inner(rect);

        self.prev_area = Rect::default();
        self.next_area = Rect::default();

        if self.loading {
            f.render_widget(
                Paragraph::new(i18n::t("app.loading")).block(block),
                rect,
            );
            return;
        }
        if let Some(error) = &self.error {
            let lines = vec![
                Line::from(Span::styled(
                    i18n::t("global.error.title"),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
                Line::from(error.clone()),
            ];
            f.render_widget(Paragraph::new(lines).block(block), rect);
            return;
        }
        if self.results.is_empty() {
            let message = if self.has_searched {
                i18n::t("search.no_results")
            } else {
                i18n::t("search.placeholder")
            };
            f.render_widget(Paragraph::new(message).block(block), rect);
            return;
        }

        let page_footer = self.pagination.is_paged && inner.height > 1;
        let list_height = if page_footer { inner.height - 1 } else { inner.height };
        let list_area = Rect::new(inner.x, inner.y, inner.width, list_height);

        let selected = self.list_state.selected();
        let items: Vec<ListItem> = self
            .results
            .iter()
            .enumerate()
            .map(|(i, item)| Self::result_line(item, selected == Some(i)))
            .collect();
        f.render_widget(block, rect);
        f.render_stateful_widget(List::new(items), list_area, &mut self.list_state);

        if page_footer {
            let row = inner.y + inner.height - 1;
            let prev_text = "« prev";
            let next_text = "next »";
            let mut spans = Vec::new();
            let mut cursor = inner.x;
            if self.pagination.previous_page.is_some() {
                self.prev_area = Rect::new(cursor, row, prev_text.len() as u16, 1);
                spans.push(Span::styled(prev_text, Style::default().fg(Color::Cyan)));
                spans.push(Span::raw("  "));
                cursor += prev_text.len() as u16 + 2;
            }
            if self.pagination.next_page.is_some() {
                self.next_area = Rect::new(cursor, row, next_text.len() as u16, 1);
                spans.push(Span::styled(next_text, Style::default().fg(Color::Cyan)));
            }
            let footer_area = Rect::new(inner.x, row, inner.width, 1);
            f.render_widget(Paragraph::new(Line::from(spans)), footer_area);
        }
    }

    fn on_focus(&mut self) {
        self.focused = true;
    }

    fn on_blur(&mut self) {
        self.focused = false;
    }
}
