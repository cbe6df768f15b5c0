//! Search query assembly.
//!
//! Turns the panel's form state into the platform's search syntax:
//! keyword first, then `type:`, ticket-field, created-range, assignee,
//! brand and status terms, space separated.

use serde::{Deserialize, Serialize};

/// Result type filter of the search form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SearchType {
    #[default]
    All,
    Ticket,
    User,
    Organization,
}

impl SearchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchType::All => "all",
            SearchType::Ticket => "ticket",
            SearchType::User => "user",
            SearchType::Organization => "organization",
        }
    }

    /// Catalog key for the filter's display label.
    pub fn label_key(&self) -> String {
        format!("search.type.{}", self.as_str())
    }

    pub fn next(&self) -> Self {
        match self {
            SearchType::All => SearchType::Ticket,
            SearchType::Ticket => SearchType::User,
            SearchType::User => SearchType::Organization,
            SearchType::Organization => SearchType::All,
        }
    }
}

/// A ticket-field condition triple, e.g. `priority` `>` `normal`.
#[derive(Debug, Clone, Default)]
pub struct FieldFilter {
    pub field: String,
    pub condition: String,
    pub value: String,
}

impl FieldFilter {
    fn is_complete(&self) -> bool {
        !self.field.is_empty() && !self.condition.is_empty() && !self.value.is_empty()
    }
}

/// A created/updated date range.
#[derive(Debug, Clone, Default)]
pub struct RangeFilter {
    /// The date field being constrained, e.g. `created`
    pub field: String,
    pub from: String,
    pub to: String,
}

/// Everything the query is assembled from.
#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    pub keyword: String,
    pub search_type: SearchType,
    /// Advanced options visible; terms below only apply when set
    pub advanced: bool,
    pub field_filter: FieldFilter,
    pub range_filter: RangeFilter,
    pub assignee: String,
    pub brand_id: Option<String>,
    /// Only accounts with more than one brand filter by brand
    pub has_multiple_brands: bool,
    /// Ticket statuses read from the status dropdown
    pub statuses: Vec<String>,
}

impl SearchParams {
    fn ticket_fields_apply(&self) -> bool {
        self.search_type == SearchType::Ticket
    }

    /// Concatenate the search terms string.
    pub fn build_query(&self) -> String {
        let mut params: Vec<String> = Vec::new();

        if self.search_type != SearchType::All {
            params.push(format!("type:{}", self.search_type.as_str()));
        }

        if self.advanced {
            if self.ticket_fields_apply() && self.field_filter.is_complete() {
                params.push(format!(
                    "{}{}{}",
                    self.field_filter.field, self.field_filter.condition, self.field_filter.value
                ));
            }

            let range = &self.range_filter;
            if !range.field.is_empty() && !range.from.is_empty() {
                params.push(format!("{}>{}", range.field, range.from));
            }
            if !range.field.is_empty() && !range.to.is_empty() {
                params.push(format!("{}<{}", range.field, range.to));
            }

            if self.ticket_fields_apply() && !self.assignee.is_empty() {
                params.push(format!("assignee:\"{}\"", self.assignee));
            }

            if self.has_multiple_brands {
                if let Some(brand_id) = self.brand_id.as_deref() {
                    if !brand_id.is_empty() {
                        params.push(format!("brand_id:\"{brand_id}\""));
                    }
                }
            }
        }

        if self.ticket_fields_apply() {
            for status in &self.statuses {
                params.push(format!("status:{status}"));
            }
        }

        if params.is_empty() {
            return self.keyword.clone();
        }
        format!("{} {}", self.keyword, params.join(" "))
    }
}

/// Build the search endpoint path for a query.
pub fn search_path(query: &str, per_page: u32) -> String {
    format!(
        "{}?per_page={}&query={}",
        crate::constants::API_SEARCH,
        per_page,
        encode_component(query)
    )
}

/// Percent-encode a query-string component.
pub fn encode_component(input: &str) -> String {
    let mut encoded = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char);
            }
            other => {
                encoded.push_str(&format!("%{other:02X}"));
            }
        }
    }
    encoded
}
