//! Constants used throughout the application
//!
//! This module centralizes API endpoints, limits, and UI text to
//! improve maintainability and consistency.

// Platform API endpoints (relative to the account base URL)
pub const API_BRANDS: &str = "/api/v2/brands.json";
pub const API_ASSIGNABLE_USERS: &str = "/api/v2/group_memberships/assignable.json?include=users";
pub const API_SEARCH: &str = "/api/v2/search.json";

// Search limits
/// Results requested per search page
pub const SEARCH_PER_PAGE: u32 = 10;
/// Upper bound on pages followed by the paginated fetch helper
pub const MAX_PAGE_REQUESTS: u32 = 100;
/// Ticket descriptions longer than this are truncated in result lists
pub const DESCRIPTION_MAX_CHARS: usize = 140;

// Storage keys
pub const STORAGE_NAMESPACE: &str = "ticketscout";
pub const STORAGE_KEY_RECENT_QUERIES: &str = "recent_queries";
pub const STORAGE_KEY_ADVANCED_OPEN: &str = "advanced_open";
/// How many recent queries are remembered between runs
pub const RECENT_QUERIES_MAX: usize = 10;

// UI Messages
pub const CONFIG_GENERATED: &str = "✅ Generated default configuration file";
pub const ERROR_NO_API_TOKEN: &str = "❌ Error: ZENDESK_API_TOKEN environment variable not set";

// UI Layout Constants
/// Minimum panel width in columns to preserve usability
pub const PANEL_MIN_WIDTH: u16 = 40;
/// Height of the tag surface row including its border
pub const TAG_SURFACE_HEIGHT: u16 = 3;
/// Maximum rows the dropdown menu may occupy when expanded
pub const MENU_MAX_HEIGHT: u16 = 8;
