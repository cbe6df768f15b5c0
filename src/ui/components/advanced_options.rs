//! Advanced search options: ticket-field expression, created range,
//! assignee, brand, and the ticket-status multi-select.

use chrono::{Duration, Local};
use crossterm::event::{KeyCode, KeyEvent, MouseEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::constants::TAG_SURFACE_HEIGHT;
use crate::i18n;
use crate::search::{AssigneeChoice, BrandChoice, FieldFilter, RangeFilter};
use crate::ui::components::dropdown_with_tags::{DropdownWithTags, SharedOptions};
use crate::ui::core::{actions::Action, Component};

/// Preset created-date ranges offered instead of free-form dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangePreset {
    #[default]
    Any,
    PastWeek,
    PastMonth,
}

impl RangePreset {
    fn next(self) -> Self {
        match self {
            RangePreset::Any => RangePreset::PastWeek,
            RangePreset::PastWeek => RangePreset::PastMonth,
            RangePreset::PastMonth => RangePreset::Any,
        }
    }

    fn label(self) -> &'static str {
        match self {
            RangePreset::Any => "any time",
            RangePreset::PastWeek => "past week",
            RangePreset::PastMonth => "past month",
        }
    }

    /// Lower bound date for the preset, `created>from` style.
    fn from_date(self) -> Option<String> {
        let days = match self {
            RangePreset::Any => return None,
            RangePreset::PastWeek => 7,
            RangePreset::PastMonth => 30,
        };
        Some((Local::now() - Duration::days(days)).format("%Y-%m-%d").to_string())
    }
}

/// Which row of the section has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Row {
    #[default]
    FieldExpr,
    Range,
    Assignee,
    Brand,
    Status,
}

pub struct AdvancedOptions {
    pub field_expr: String,
    pub range: RangePreset,
    assignees: Vec<AssigneeChoice>,
    assignee_index: Option<usize>,
    assignees_loaded: bool,
    brands: Vec<BrandChoice>,
    has_multiple_brands: bool,
    brand_index: Option<usize>,
    status_dropdown: DropdownWithTags,
    row: Row,
    focused: bool,
}

impl AdvancedOptions {
    /// `status_options` is shared with the panel, which reads the
    /// selection back when assembling the query.
    pub fn new(status_options: SharedOptions) -> Self {
        Self {
            field_expr: String::new(),
            range: RangePreset::default(),
            assignees: Vec::new(),
            assignee_index: None,
            assignees_loaded: false,
            brands: Vec::new(),
            has_multiple_brands: false,
            brand_index: None,
            status_dropdown: DropdownWithTags::new(status_options, i18n::t("search.label.status")),
            row: Row::default(),
            focused: false,
        }
    }

    pub fn set_brands(&mut self, brands: Vec<BrandChoice>, has_multiple: bool) {
        self.brand_index = brands.iter().position(|brand| brand.selected);
        self.brands = brands;
        self.has_multiple_brands = has_multiple;
    }

    pub fn set_assignees(&mut self, assignees: Vec<AssigneeChoice>) {
        self.assignees = assignees;
        self.assignees_loaded = true;
    }

    pub fn assignees_loaded(&self) -> bool {
        self.assignees_loaded
    }

    pub fn status_dropdown(&self) -> &DropdownWithTags {
        &self.status_dropdown
    }

    pub fn status_dropdown_mut(&mut self) -> &mut DropdownWithTags {
        &mut self.status_dropdown
    }

    /// Drain the dropdown's deferred focus check. Called by the panel
    /// after every dispatched event.
    pub fn run_deferred_checks(&mut self) {
        self.status_dropdown.run_deferred_checks();
    }

    pub fn selected_assignee(&self) -> Option<&AssigneeChoice> {
        self.assignee_index.and_then(|i| self.assignees.get(i))
    }

    pub fn selected_brand(&self) -> Option<&BrandChoice> {
        self.brand_index.and_then(|i| self.brands.get(i))
    }

    pub fn has_multiple_brands(&self) -> bool {
        self.has_multiple_brands
    }

    /// Parse the free-form field expression into the platform's
    /// field/condition/value triple, e.g. `priority>normal`.
    pub fn field_filter(&self) -> FieldFilter {
        for operator in [':', '>', '<', '='] {
            if let Some(at) = self.field_expr.find(operator) {
                let (field, rest) = self.field_expr.split_at(at);
                let mut chars = rest.chars();
                let condition = chars.next().map(String::from).unwrap_or_default();
                return FieldFilter {
                    field: field.trim().to_string(),
                    condition,
                    value: chars.as_str().trim().to_string(),
                };
            }
        }
        FieldFilter::default()
    }

    pub fn range_filter(&self) -> RangeFilter {
        match self.range.from_date() {
            Some(from) => RangeFilter {
                field: "created".to_string(),
                from,
                to: String::new(),
            },
            None => RangeFilter::default(),
        }
    }

    /// Height of the section: four form rows plus the dropdown.
    pub fn height(&self) -> u16 {
        let menu = if self.status_dropdown.is_expanded() {
            crate::constants::MENU_MAX_HEIGHT
        } else {
            0
        };
        4 + TAG_SURFACE_HEIGHT + menu
    }

    fn move_row(&mut self, down: bool) {
        let order = [Row::FieldExpr, Row::Range, Row::Assignee, Row::Brand, Row::Status];
        let current = order.iter().position(|r| *r == self.row).unwrap_or(0);
        let next = if down {
            (current + 1).min(order.len() - 1)
        } else {
            current.saturating_sub(1)
        };
        let next = order[next];
        if self.row == Row::Status && next != Row::Status {
            self.status_dropdown.on_blur();
        }
        if next == Row::Status && self.row != Row::Status {
            self.status_dropdown.on_focus();
        }
        self.row = next;
    }

    fn cycle(&mut self, forward: bool) {
        match self.row {
            Row::Range => {
                self.range = if forward { self.range.next() } else { self.range.next().next() };
            }
            Row::Assignee => {
                self.assignee_index = cycle_index(self.assignee_index, self.assignees.len(), forward);
            }
            Row::Brand => {
                self.brand_index = cycle_index(self.brand_index, self.brands.len(), forward);
            }
            _ => {}
        }
    }

    fn form_row_line(&self, row: Row, label: &str, value: String) -> Line<'static> {
        let marker = if self.focused && self.row == row { "› " } else { "  " };
        let style = if self.focused && self.row == row {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        Line::from(vec![
            Span::styled(format!("{marker}{label}: "), style),
            Span::raw(value),
        ])
    }
}

impl Component for AdvancedOptions {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        // The status dropdown owns its keys while menu navigation is
        // in progress; Up from its surface returns to the form rows.
        if self.row == Row::Status {
            use crate::ui::components::dropdown_with_tags::FocusTarget;
            if key.code == KeyCode::Up
                && self.status_dropdown.focus_target() == FocusTarget::TagSurface
            {
                self.move_row(false);
                return Action::None;
            }
            return self.status_dropdown.handle_key_events(key);
        }

        match key.code {
            KeyCode::Down => self.move_row(true),
            KeyCode::Up => self.move_row(false),
            KeyCode::Left => self.cycle(false),
            KeyCode::Right => self.cycle(true),
            KeyCode::Backspace if self.row == Row::FieldExpr => {
                self.field_expr.pop();
            }
            KeyCode::Char(c) if self.row == Row::FieldExpr => {
                self.field_expr.push(c);
            }
            _ => {}
        }
        Action::None
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Action {
        self.status_dropdown.handle_mouse(mouse)
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let assignee = self
            .selected_assignee()
            .map(|a| a.name.clone())
            .unwrap_or_else(|| "anyone".to_string());
        let brand = if self.has_multiple_brands {
            self.selected_brand()
                .map(|b| b.name.clone())
                .unwrap_or_else(|| "all brands".to_string())
        } else {
            "–".to_string()
        };

        let lines = vec![
            self.form_row_line(Row::FieldExpr, "Field", self.field_expr.clone()),
            self.form_row_line(
                Row::Range,
                &i18n::t("search.label.created"),
                self.range.label().to_string(),
            ),
            self.form_row_line(Row::Assignee, &i18n::t("search.label.assignee"), assignee),
            self.form_row_line(Row::Brand, &i18n::t("search.label.brand"), brand),
        ];
        let form_area = Rect::new(rect.x, rect.y, rect.width, 4.min(rect.height));
        f.render_widget(Paragraph::new(lines), form_area);

        if rect.height > 4 {
            let dropdown_area =
                Rect::new(rect.x, rect.y + 4, rect.width, rect.height - 4);
            self.status_dropdown.render(f, dropdown_area);
        }
    }

    fn on_focus(&mut self) {
        self.focused = true;
        if self.row == Row::Status {
            self.status_dropdown.on_focus();
        }
    }

    fn on_blur(&mut self) {
        self.focused = false;
        self.status_dropdown.on_blur();
    }
}

fn cycle_index(current: Option<usize>, len: usize, forward: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match (current, forward) {
        (None, true) => 0,
        (None, false) => len - 1,
        (Some(i), true) => (i + 1) % len,
        (Some(i), false) => (i + len - 1) % len,
    })
}
