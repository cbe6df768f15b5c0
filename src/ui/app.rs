//! The search panel: component composition, focus routing, and
//! app-level action handling.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    Frame,
};

use crate::config::Config;
use crate::constants::{RECENT_QUERIES_MAX, STORAGE_KEY_ADVANCED_OPEN, STORAGE_KEY_RECENT_QUERIES};
use crate::i18n;
use crate::platform::PlatformClient;
use crate::search::{self, SearchParams, SearchService};
use crate::storage::Storage;
use crate::ui::components::{
    AdvancedOptions, DropdownOption, ResultsList, SearchBar, SharedOptions, StatusBar,
};
use crate::ui::core::{
    actions::{Action, BootstrapData},
    event_handler::EventType,
    Component,
};

/// Panel region that currently receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Region {
    #[default]
    SearchBar,
    Advanced,
    Results,
}

pub struct SearchPanel {
    search_bar: SearchBar,
    advanced: AdvancedOptions,
    results: ResultsList,
    status_bar: StatusBar,
    status_options: SharedOptions,

    region: Region,
    advanced_open: bool,

    client: Arc<dyn PlatformClient>,
    service: SearchService,
    storage: Option<Storage>,
    config: Config,
    subdomain: String,

    last_query: Option<String>,
    should_quit: bool,
}

impl SearchPanel {
    pub fn new(config: Config, client: Arc<dyn PlatformClient>) -> Self {
        let status_options = default_status_options();
        let service = SearchService::new(
            config.search.per_page,
            config.search.max_page_requests,
            config.search.context_ticket_id,
        );
        let storage = Storage::open(crate::constants::STORAGE_NAMESPACE)
            .map_err(|e| log::warn!("storage unavailable: {e}"))
            .ok();
        let advanced_open = storage
            .as_ref()
            .and_then(|s| s.get::<bool>(STORAGE_KEY_ADVANCED_OPEN))
            .unwrap_or(false);

        Self {
            search_bar: SearchBar::new(),
            advanced: AdvancedOptions::new(Rc::clone(&status_options)),
            results: ResultsList::new(),
            status_bar: StatusBar::new(),
            status_options,
            region: Region::SearchBar,
            advanced_open,
            client,
            service,
            storage,
            subdomain: config.platform.subdomain.clone(),
            config,
            last_query: None,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Values currently selected in the ticket-status dropdown, in
    /// option order.
    pub fn selected_statuses(&self) -> Vec<String> {
        self.advanced.status_dropdown().selected_values()
    }

    /// Fetch the data the form is built from. Failures surface on the
    /// results pane like any request failure.
    pub async fn bootstrap(&mut self) -> Action {
        self.search_bar.on_focus();

        let custom_field_ids = parse_custom_field_ids(&self.config.search.custom_fields);
        let context = match self
            .service
            .fetch_context_ticket(self.client.as_ref(), &custom_field_ids)
            .await
        {
            Ok(context) => context,
            Err(e) => return Action::BootstrapFailed(e.localized_message()),
        };

        let context_brand = context.as_ref().and_then(|t| t.brand_id.clone());
        let (brands, has_multiple_brands) = match self
            .service
            .fetch_brands(self.client.as_ref(), context_brand.as_deref())
            .await
        {
            Ok(result) => result,
            Err(e) => return Action::BootstrapFailed(e.localized_message()),
        };

        let suggestions = search::build_suggestions(
            context.as_ref().map(|t| t.subject.as_str()),
            context
                .as_ref()
                .map(|t| t.custom_field_values.as_slice())
                .unwrap_or_default(),
            self.config.search.related_tickets,
        );

        Action::BootstrapLoaded(BootstrapData {
            brands,
            has_multiple_brands,
            suggestions,
            context_ticket: context,
        })
    }

    /// Synchronous event dispatch: classify the event, mutate
    /// component state, and hand back any action that needs app-level
    /// (async) handling. The deferred focus check is drained after
    /// every event, once the focus gains it produced are in place.
    pub fn handle_event(&mut self, event: EventType) -> Action {
        let action = match event {
            EventType::Key(key) => self.handle_key(key),
            EventType::Mouse(mouse) => self.handle_mouse_event(mouse),
            _ => Action::None,
        };
        self.advanced.run_deferred_checks();
        action
    }

    fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('q') | KeyCode::Char('c') => {
                    self.should_quit = true;
                    return Action::Quit;
                }
                KeyCode::Char('a') => return self.toggle_advanced(),
                _ => {}
            }
        }
        match key.code {
            KeyCode::Tab => {
                self.cycle_region(true);
                Action::None
            }
            KeyCode::BackTab => {
                self.cycle_region(false);
                Action::None
            }
            _ => match self.region {
                Region::SearchBar => self.search_bar.handle_key_events(key),
                Region::Advanced => self.advanced.handle_key_events(key),
                Region::Results => self.results.handle_key_events(key),
            },
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Action {
        // A click outside the status dropdown is a focus loss for it;
        // the collapse decision itself stays deferred.
        if self.advanced_open
            && !self
                .advanced
                .status_dropdown()
                .hit_test(mouse.column, mouse.row)
        {
            use crate::ui::components::FocusTarget;
            if self.advanced.status_dropdown().focus_target() != FocusTarget::Outside {
                self.advanced.status_dropdown_mut().on_blur();
            }
        }

        let action = self.search_bar.handle_mouse(mouse);
        if !matches!(action, Action::None) {
            return action;
        }
        if self.advanced_open {
            let action = self.advanced.handle_mouse(mouse);
            if !matches!(action, Action::None) {
                return action;
            }
        }
        self.results.handle_mouse(mouse)
    }

    fn cycle_region(&mut self, forward: bool) {
        let order: Vec<Region> = if self.advanced_open {
            vec![Region::SearchBar, Region::Advanced, Region::Results]
        } else {
            vec![Region::SearchBar, Region::Results]
        };
        let current = order.iter().position(|r| *r == self.region).unwrap_or(0);
        let next = if forward {
            order[(current + 1) % order.len()]
        } else {
            order[(current + order.len() - 1) % order.len()]
        };
        self.region_component_mut(self.region).on_blur();
        self.region = next;
        self.region_component_mut(next).on_focus();
    }

    fn region_component_mut(&mut self, region: Region) -> &mut dyn Component {
        match region {
            Region::SearchBar => &mut self.search_bar,
            Region::Advanced => &mut self.advanced,
            Region::Results => &mut self.results,
        }
    }

    fn toggle_advanced(&mut self) -> Action {
        self.advanced_open = !self.advanced_open;
        if let Some(storage) = &self.storage {
            if let Err(e) = storage.set(STORAGE_KEY_ADVANCED_OPEN, &self.advanced_open) {
                log::warn!("failed to persist advanced toggle: {e}");
            }
        }
        if !self.advanced_open {
            if self.region == Region::Advanced {
                self.cycle_region(true);
            }
            self.advanced.on_blur();
            self.advanced.run_deferred_checks();
            return Action::None;
        }
        // Assignees load lazily the first time the section opens
        if !self.advanced.assignees_loaded() {
            return Action::LoadAssignees;
        }
        Action::None
    }

    /// Assemble search params from the current form state.
    fn collect_params(&self) -> SearchParams {
        SearchParams {
            keyword: self.search_bar.keyword.clone(),
            search_type: self.search_bar.search_type,
            advanced: self.advanced_open,
            field_filter: self.advanced.field_filter(),
            range_filter: self.advanced.range_filter(),
            assignee: self
                .advanced
                .selected_assignee()
                .map(|a| a.name.clone())
                .unwrap_or_default(),
            brand_id: self.advanced.selected_brand().map(|b| b.id.clone()),
            has_multiple_brands: self.advanced.has_multiple_brands(),
            // The options vector is jointly owned; the host's direct
            // read stays in sync with every dropdown interaction.
            statuses: self
                .status_options
                .borrow()
                .iter()
                .filter(|option| option.is_selected)
                .map(|option| option.value.clone())
                .collect(),
        }
    }

    fn remember_query(&mut self, query: &str) {
        let Some(storage) = &self.storage else { return };
        let mut recent: Vec<String> = storage.get(STORAGE_KEY_RECENT_QUERIES).unwrap_or_default();
        recent.retain(|q| q != query);
        recent.insert(0, query.to_string());
        recent.truncate(RECENT_QUERIES_MAX);
        if let Err(e) = storage.set(STORAGE_KEY_RECENT_QUERIES, &recent) {
            log::warn!("failed to persist recent queries: {e}");
        }
    }

    /// Handle actions that need the platform client. Runs on the event
    /// loop task after synchronous dispatch.
    pub async fn handle_app_action(&mut self, action: Action) -> Action {
        match action {
            Action::SubmitSearch => {
                // Only fire with a keyword, like the original form
                if self.search_bar.keyword.is_empty() {
                    return Action::None;
                }
                let query = self.collect_params().build_query();
                self.run_search(Some(query), None).await
            }
            Action::SearchPage(url) => self.run_search(None, Some(url)).await,
            Action::SuggestionPicked(suggestion) => {
                // Picking a suggestion searches immediately
                self.search_bar.apply_suggestion(&suggestion);
                if self.search_bar.keyword.is_empty() {
                    return Action::None;
                }
                let query = self.collect_params().build_query();
                self.run_search(Some(query), None).await
            }
            Action::SearchCompleted(data) => {
                self.results.set_results(data.results, data.pagination);
                Action::None
            }
            Action::SearchFailed(message) => {
                self.results.set_error(message);
                Action::None
            }
            Action::LoadAssignees => {
                match self.service.fetch_assignees(self.client.as_ref()).await {
                    Ok(assignees) => {
                        log::info!("loaded {} assignable agents", assignees.len());
                        self.advanced.set_assignees(assignees);
                    }
                    Err(e) => self.status_bar.set_message(e.localized_message()),
                }
                Action::None
            }
            Action::BootstrapLoaded(data) => {
                self.advanced.set_brands(data.brands, data.has_multiple_brands);
                self.search_bar.set_suggestions(data.suggestions);
                Action::None
            }
            Action::BootstrapFailed(message) => {
                self.results.set_error(message);
                Action::None
            }
            Action::OpenTicket(id) => {
                self.status_bar.set_message(format!(
                    "https://{}.zendesk.com/agent/tickets/{}",
                    self.subdomain, id
                ));
                Action::None
            }
            other => other,
        }
    }

    async fn run_search(&mut self, query: Option<String>, page_url: Option<String>) -> Action {
        self.results.set_loading();
        self.status_bar.clear();
        let query = query.or_else(|| self.last_query.clone()).unwrap_or_default();
        let outcome = self
            .service
            .execute(self.client.as_ref(), &query, page_url.as_deref())
            .await;
        match outcome {
            Ok(data) => {
                if page_url.is_none() {
                    self.remember_query(&query);
                }
                self.last_query = Some(query);
                self.results.set_results(data.results, data.pagination);
            }
            Err(e) => {
                log::error!("search failed: {e}");
                self.results.set_error(e.localized_message());
            }
        }
        Action::None
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect) {
        let advanced_height = if self.advanced_open {
            self.advanced.height()
        } else {
            0
        };
        let chunks = Layout::vertical([
            Constraint::Length(self.search_bar.height()),
            Constraint::Length(advanced_height),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

        self.search_bar.render(f, chunks[0]);
        if self.advanced_open {
            self.advanced.render(f, chunks[1]);
        }
        self.results.render(f, chunks[2]);
        self.status_bar.render(f, chunks[3]);
    }
}

/// The six ticket statuses of the platform; `new` starts selected.
pub fn default_status_options() -> SharedOptions {
    Rc::new(RefCell::new(vec![
        DropdownOption::new(i18n::t("search.value.new"), "new", true),
        DropdownOption::new(i18n::t("search.value.open"), "open", false),
        DropdownOption::new(i18n::t("search.value.pending"), "pending", false),
        DropdownOption::new(i18n::t("search.value.onhold"), "hold", false),
        DropdownOption::new(i18n::t("search.value.solved"), "solved", false),
        DropdownOption::new(i18n::t("search.value.closed"), "closed", false),
    ]))
}

/// Parse the `custom_fields` config value, e.g. "10023 10045".
fn parse_custom_field_ids(raw: &str) -> Vec<u64> {
    raw.split(|c: char| !c.is_ascii_digit())
        .filter(|part| !part.is_empty())
        .filter_map(|part| part.parse().ok())
        .collect()
}
