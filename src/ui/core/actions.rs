use crate::search::{AssigneeChoice, BrandChoice, ContextTicket, SearchData};

/// Initial data the panel form is built from.
#[derive(Debug, Clone, Default)]
pub struct BootstrapData {
    pub brands: Vec<BrandChoice>,
    pub has_multiple_brands: bool,
    pub suggestions: Vec<String>,
    pub context_ticket: Option<ContextTicket>,
}

#[derive(Debug, Clone)]
pub enum Action {
    // Search operations
    SubmitSearch,
    /// Follow a prev/next page link verbatim
    SearchPage(String),
    SearchCompleted(SearchData),
    SearchFailed(String),
    SuggestionPicked(String),

    // Bootstrap
    BootstrapLoaded(BootstrapData),
    BootstrapFailed(String),
    LoadAssignees,
    AssigneesLoaded(Vec<AssigneeChoice>),

    // Form operations
    ToggleAdvanced,
    /// Show a result's platform URL in the status line
    OpenTicket(u64),

    // Focus movement between panel regions
    FocusNext,
    FocusPrevious,

    // App control
    Quit,
    None,
}
