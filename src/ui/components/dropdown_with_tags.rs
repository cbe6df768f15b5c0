//! Multi-select dropdown with tag chips.
//!
//! The control owns a collapsible menu listing a fixed set of options
//! and an always-visible tag surface showing one chip per selected
//! option. The option vector is shared with the host through a
//! [`SharedOptions`] handle and mutated in place, so the host's own
//! reads of `is_selected` keep working after any interaction.
//!
//! Interaction model:
//! - focusing or clicking the tag surface expands the menu
//! - activating an unchecked menu item selects it; an already-checked
//!   item is a guarded no-op (deselection never happens menu-side)
//! - activating a tag chip or its remove glyph deselects the option
//!   and force-collapses the menu
//! - focus leaving the surface or a menu item schedules a deferred
//!   collapse check, resolved only after the paired focus gain has
//!   been applied

use std::cell::RefCell;
use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::constants::{MENU_MAX_HEIGHT, TAG_SURFACE_HEIGHT};
use crate::ui::core::{actions::Action, Component};
use crate::utils::text::escape_special_chars;

/// One selectable entry. The vector passed at construction is the
/// authoritative selection state, jointly owned by the host and the
/// control; only `is_selected` is ever mutated, and order is never
/// changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownOption {
    pub label: String,
    pub value: String,
    pub is_selected: bool,
}

impl DropdownOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>, is_selected: bool) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            is_selected,
        }
    }
}

/// Shared handle to the caller-owned option vector.
pub type SharedOptions = Rc<RefCell<Vec<DropdownOption>>>;

/// Which element of the control currently has focus, as far as the
/// control can observe. `Outside` covers everything that is not part
/// of this control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusTarget {
    #[default]
    Outside,
    TagSurface,
    MenuItem(usize),
    Tag(usize),
}

/// Rendered handle for one option. The set is fixed at construction;
/// only `checked` changes afterwards.
#[derive(Debug)]
struct MenuItem {
    index: usize,
    label: String,
    checked: bool,
}

/// One chip of the tag strip. The strip is regenerated wholesale on
/// every selection change, never patched.
#[derive(Debug)]
struct TagChip {
    index: usize,
    label: String,
}

/// Column span a tag chip occupied during the last render; the remove
/// glyph sits in the last cell.
#[derive(Debug, Clone, Copy)]
struct TagArea {
    index: usize,
    x_start: u16,
    x_end: u16,
    row: u16,
}

pub struct DropdownWithTags {
    options: SharedOptions,
    label: String,
    menu_items: Vec<MenuItem>,
    tags: Vec<TagChip>,
    expanded: bool,
    focus: FocusTarget,
    collapse_check_pending: bool,
    // areas recorded at render time for mouse hit testing
    surface_inner: Rect,
    menu_inner: Rect,
    tag_areas: Vec<TagArea>,
}

impl DropdownWithTags {
    /// Build the control from the shared option vector and a display
    /// label. Menu items are created once here, labels escaped, and
    /// the initial tag strip reflects the incoming `is_selected`
    /// values. The menu starts collapsed. Empty option sets are fine.
    pub fn new(options: SharedOptions, label: impl Into<String>) -> Self {
        let menu_items = options
            .borrow()
            .iter()
            .enumerate()
            .map(|(index, option)| MenuItem {
                index,
                label: escape_special_chars(&option.label),
                checked: option.is_selected,
            })
            .collect();

        let mut control = Self {
            options,
            label: label.into(),
            menu_items,
            tags: Vec::new(),
            expanded: false,
            focus: FocusTarget::Outside,
            collapse_check_pending: false,
            surface_inner: Rect::default(),
            menu_inner: Rect::default(),
            tag_areas: Vec::new(),
        };
        control.render_tags();
        control
    }

    /// The `value` of every selected option, in option order. Reads
    /// the shared vector directly, so it is never stale.
    pub fn selected_values(&self) -> Vec<String> {
        self.options
            .borrow()
            .iter()
            .filter(|option| option.is_selected)
            .map(|option| option.value.clone())
            .collect()
    }

    /// Machine-readable menu visibility flag.
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn focus_target(&self) -> FocusTarget {
        self.focus
    }

    /// Whether a deferred collapse check is waiting to run.
    pub fn has_pending_focus_check(&self) -> bool {
        self.collapse_check_pending
    }

    /// Number of tag chips currently rendered.
    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    /// The rendered menu as (option index, escaped label, checked)
    /// triples. The set is fixed at construction; indices never
    /// change.
    pub fn menu_snapshot(&self) -> Vec<(usize, String, bool)> {
        self.menu_items
            .iter()
            .map(|item| (item.index, item.label.clone(), item.checked))
            .collect()
    }

    /// The rendered tag strip as (option index, escaped label) pairs,
    /// in option order.
    pub fn tag_snapshot(&self) -> Vec<(usize, String)> {
        self.tags
            .iter()
            .map(|chip| (chip.index, chip.label.clone()))
            .collect()
    }

    pub fn expand(&mut self) {
        self.expanded = true;
    }

    pub fn collapse(&mut self) {
        self.expanded = false;
    }

    /// Move focus to `next`, dispatching the control's focus
    /// semantics: leaving the surface or a menu item schedules the
    /// deferred collapse check, and gaining the surface expands the
    /// menu.
    pub fn set_focus(&mut self, next: FocusTarget) {
        if next != self.focus
            && matches!(
                self.focus,
                FocusTarget::TagSurface | FocusTarget::MenuItem(_)
            )
        {
            // Focus-gain is only observable after the loss event has
            // been dispatched; the collapse decision is deferred.
            self.collapse_check_pending = true;
        }
        self.focus = next;
        if next == FocusTarget::TagSurface {
            self.expand();
        }
    }

    /// Run the deferred collapse check, if one is scheduled. Called by
    /// the host after the event that moved focus has been fully
    /// dispatched, i.e. after the new target has its focus. Collapses
    /// unless focus now sits on a tag or a menu item of this control.
    pub fn run_deferred_checks(&mut self) {
        if !self.collapse_check_pending {
            return;
        }
        self.collapse_check_pending = false;
        match self.focus {
            // Stale indices mean the node is gone; treat as focus lost.
            FocusTarget::Tag(index) if index < self.tags.len() => {}
            FocusTarget::MenuItem(index) if index < self.menu_items.len() => {}
            _ => self.collapse(),
        }
    }

    /// Select the option at `index`: check the menu item, flip the
    /// shared option, regenerate the tag strip. Re-activating a
    /// checked item is a guarded no-op; only tag-side interaction
    /// deselects. Out-of-range indices are defensive no-ops.
    pub fn select(&mut self, index: usize) {
        let Some(item) = self.menu_items.get_mut(index) else {
            return;
        };
        if item.checked {
            return;
        }
        item.checked = true;
        if let Some(option) = self.options.borrow_mut().get_mut(index) {
            option.is_selected = true;
        }
        self.render_tags();
    }

    /// Deselect the option at `index`: uncheck the menu item, collapse
    /// the menu (deselecting always closes it, unlike select), flip
    /// the shared option, regenerate the tag strip. Out-of-range
    /// indices are defensive no-ops.
    pub fn deselect(&mut self, index: usize) {
        if index >= self.menu_items.len() {
            return;
        }
        if let Some(item) = self.menu_items.get_mut(index) {
            item.checked = false;
        }
        self.collapse();
        if let Some(option) = self.options.borrow_mut().get_mut(index) {
            option.is_selected = false;
        }
        self.render_tags();
        // The activated chip no longer exists; focus falls outside
        // without re-dispatching focus semantics.
        if matches!(self.focus, FocusTarget::Tag(_)) {
            self.focus = FocusTarget::Outside;
        }
    }

    /// Regenerate the tag strip from the shared options. Exactly one
    /// chip per selected option, in option order.
    fn render_tags(&mut self) {
        let options = self.options.borrow();
        self.tags = options
            .iter()
            .enumerate()
            .filter(|(_, option)| option.is_selected)
            .map(|(index, option)| TagChip {
                index,
                label: escape_special_chars(&option.label),
            })
            .collect();
    }

    /// Resolve a click position to the owning tag. Any hit inside a
    /// chip's span resolves to that chip's option index; the last cell
    /// is the remove glyph, which deselects identically.
    fn resolve_tag_hit(&self, column: u16, row: u16) -> Option<usize> {
        self.tag_areas
            .iter()
            .find(|area| row == area.row && column >= area.x_start && column <= area.x_end)
            .map(|area| area.index)
    }

    /// Whether a screen position falls inside the control (tag surface
    /// or, when expanded, the menu region). Lets the host tell clicks
    /// inside the control apart from focus moving away from it.
    pub fn hit_test(&self, column: u16, row: u16) -> bool {
        Self::contains(self.surface_inner, column, row)
            || (self.expanded && Self::contains(self.menu_inner, column, row))
    }

    fn contains(area: Rect, column: u16, row: u16) -> bool {
        column >= area.x
            && column < area.x.saturating_add(area.width)
            && row >= area.y
            && row < area.y.saturating_add(area.height)
    }

    /// Activate whatever currently has keyboard focus.
    fn activate_focused(&mut self) {
        match self.focus {
            FocusTarget::TagSurface => self.expand(),
            FocusTarget::MenuItem(index) => self.select(index),
            FocusTarget::Tag(index) => self.deselect(index),
            FocusTarget::Outside => {}
        }
    }

    fn tag_chip_text(chip: &TagChip) -> String {
        format!(" {} ✕", chip.label)
    }
}

impl Component for DropdownWithTags {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => self.activate_focused(),
            KeyCode::Down => match self.focus {
                FocusTarget::TagSurface | FocusTarget::Tag(_) => {
                    if !self.menu_items.is_empty() {
                        self.expand();
                        self.set_focus(FocusTarget::MenuItem(0));
                    }
                }
                FocusTarget::MenuItem(index) => {
                    if index + 1 < self.menu_items.len() {
                        self.set_focus(FocusTarget::MenuItem(index + 1));
                    }
                }
                FocusTarget::Outside => {}
            },
            KeyCode::Up => match self.focus {
                FocusTarget::MenuItem(0) => self.set_focus(FocusTarget::TagSurface),
                FocusTarget::MenuItem(index) => self.set_focus(FocusTarget::MenuItem(index - 1)),
                _ => {}
            },
            KeyCode::Right => match self.focus {
                FocusTarget::TagSurface if !self.tags.is_empty() => {
                    self.set_focus(FocusTarget::Tag(0));
                }
                FocusTarget::Tag(index) if index + 1 < self.tags.len() => {
                    self.set_focus(FocusTarget::Tag(index + 1));
                }
                _ => {}
            },
            KeyCode::Left => match self.focus {
                FocusTarget::Tag(0) => self.set_focus(FocusTarget::TagSurface),
                FocusTarget::Tag(index) => self.set_focus(FocusTarget::Tag(index - 1)),
                _ => {}
            },
            KeyCode::Delete | KeyCode::Backspace => {
                if let FocusTarget::Tag(position) = self.focus {
                    // Tag focus is positional within the strip; map to
                    // the owning option index.
                    if let Some(chip) = self.tags.get(position) {
                        let index = chip.index;
                        self.deselect(index);
                    }
                }
            }
            KeyCode::Esc => self.collapse(),
            _ => return Action::None,
        }
        Action::None
    }

    /// One delegated handler classifies every click into exactly one
    /// of: expand, select, deselect-via-tag, deselect-via-remove.
    fn handle_mouse(&mut self, mouse: MouseEvent) -> Action {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Action::None;
        }
        let (column, row) = (mouse.column, mouse.row);

        if Self::contains(self.surface_inner, column, row) {
            if let Some(index) = self.resolve_tag_hit(column, row) {
                // Tag body and remove glyph resolve identically.
                if let Some(position) = self.tags.iter().position(|chip| chip.index == index) {
                    self.set_focus(FocusTarget::Tag(position));
                }
                self.deselect(index);
            } else {
                self.set_focus(FocusTarget::TagSurface);
            }
            return Action::None;
        }

        if self.expanded && Self::contains(self.menu_inner, column, row) {
            let offset = (row - self.menu_inner.y) as usize;
            if offset < self.menu_items.len() {
                self.set_focus(FocusTarget::MenuItem(offset));
                self.select(offset);
            }
            return Action::None;
        }

        Action::None
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let focused_inside = self.focus != FocusTarget::Outside;
        let border_style = if focused_inside {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };

        // Tag surface
        let surface_height = TAG_SURFACE_HEIGHT.min(rect.height);
        let surface_area = Rect::new(rect.x, rect.y, rect.width, surface_height);
        let surface_block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(self.label.clone());
        self.surface_inner = surface_block.inner(surface_area);

        let mut spans: Vec<Span> = Vec::new();
        self.tag_areas.clear();
        let mut cursor = self.surface_inner.x;
        for (position, chip) in self.tags.iter().enumerate() {
            let text = Self::tag_chip_text(chip);
            let width = Span::raw(text.as_str()).width() as u16;
            let style = if self.focus == FocusTarget::Tag(position) {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Black).bg(Color::Gray)
            };
            self.tag_areas.push(TagArea {
                index: chip.index,
                x_start: cursor,
                x_end: cursor.saturating_add(width.saturating_sub(1)),
                row: self.surface_inner.y,
            });
            spans.push(Span::styled(text, style));
            spans.push(Span::raw(" "));
            cursor = cursor.saturating_add(width + 1);
        }

        let surface = Paragraph::new(Line::from(spans)).block(surface_block);
        f.render_widget(surface, surface_area);

        // Menu region; skipped entirely while collapsed, the
        // `expanded` flag stays queryable either way
        if self.expanded && rect.height > surface_height {
            let available = rect.height - surface_height;
            let menu_height = (self.menu_items.len() as u16 + 2)
                .min(MENU_MAX_HEIGHT)
                .min(available);
            let menu_area = Rect::new(rect.x, rect.y + surface_height, rect.width, menu_height);
            let menu_block = Block::default()
                .borders(Borders::ALL)
                .border_style(border_style);
            self.menu_inner = menu_block.inner(menu_area);

            let items: Vec<ListItem> = self
                .menu_items
                .iter()
                .map(|item| {
                    let marker = if item.checked { "✓ " } else { "  " };
                    let style = if self.focus == FocusTarget::MenuItem(item.index) {
                        Style::default()
                            .fg(Color::Black)
                            .bg(Color::White)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    };
                    ListItem::new(Line::from(vec![
                        Span::raw(marker),
                        Span::styled(item.label.clone(), style),
                    ]))
                })
                .collect();

            f.render_widget(List::new(items).block(menu_block), menu_area);
        } else {
            self.menu_inner = Rect::default();
        }
    }

    fn on_focus(&mut self) {
        self.set_focus(FocusTarget::TagSurface);
    }

    fn on_blur(&mut self) {
        self.set_focus(FocusTarget::Outside);
    }
}
