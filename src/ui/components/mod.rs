//! UI components for the search panel.

pub mod advanced_options;
pub mod dropdown_with_tags;
pub mod results_list;
pub mod search_bar;
pub mod status_bar;

pub use advanced_options::AdvancedOptions;
pub use dropdown_with_tags::{DropdownOption, DropdownWithTags, FocusTarget, SharedOptions};
pub use results_list::ResultsList;
pub use search_bar::SearchBar;
pub use status_bar::StatusBar;
