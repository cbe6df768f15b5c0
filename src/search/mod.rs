//! Search feature: query execution, result shaping, and the bootstrap
//! data the panel form is built from (brands, assignees, suggestions).
//!
//! Everything network-shaped goes through the [`PlatformClient`]
//! boundary; this module owns what is asked for and how responses are
//! shaped for the panel.

pub mod pagination;
pub mod query;

use serde::Deserialize;
use serde_json::Value;

use crate::constants::{API_ASSIGNABLE_USERS, API_BRANDS, API_SEARCH, DESCRIPTION_MAX_CHARS};
use crate::i18n;
use crate::platform::{PlatformClient, PlatformError};
use crate::utils::text::{keywords_from_subject, truncate_chars};

pub use pagination::{fetch_all_pages, Pagination};
pub use query::{FieldFilter, RangeFilter, SearchParams, SearchType};

/// One entry of the results list.
#[derive(Debug, Clone)]
pub struct ResultItem {
    pub result_type: String,
    pub id: Option<u64>,
    pub title: String,
    pub description: String,
}

/// A shaped search response.
#[derive(Debug, Clone, Default)]
pub struct SearchData {
    pub results: Vec<ResultItem>,
    pub pagination: Pagination,
}

/// A brand available for filtering.
#[derive(Debug, Clone)]
pub struct BrandChoice {
    pub id: String,
    pub name: String,
    pub selected: bool,
}

/// An assignable agent.
#[derive(Debug, Clone)]
pub struct AssigneeChoice {
    pub id: String,
    pub name: String,
}

/// The ticket the panel is anchored to, when configured.
#[derive(Debug, Clone)]
pub struct ContextTicket {
    pub id: u64,
    pub subject: String,
    pub brand_id: Option<String>,
    /// Values of the configured custom fields, suggestion fodder
    pub custom_field_values: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Value>,
    #[serde(default)]
    count: u64,
    next_page: Option<String>,
    previous_page: Option<String>,
}

/// Search operations against the platform.
pub struct SearchService {
    per_page: u32,
    max_pages: u32,
    context_ticket_id: Option<u64>,
}

impl SearchService {
    pub fn new(per_page: u32, max_pages: u32, context_ticket_id: Option<u64>) -> Self {
        Self {
            per_page,
            max_pages,
            context_ticket_id,
        }
    }

    /// Run a search. `page_url` reuses a prev/next link verbatim;
    /// otherwise the endpoint is composed from the query string.
    pub async fn execute(
        &self,
        client: &dyn PlatformClient,
        search_query: &str,
        page_url: Option<&str>,
    ) -> Result<SearchData, PlatformError> {
        let path = match page_url {
            Some(url) => url.to_string(),
            None => query::search_path(search_query, self.per_page),
        };
        log::info!("searching: {path}");

        let raw = client.request(&path).await?;
        let response: SearchResponse = serde_json::from_value(raw)
            .map_err(|e| PlatformError::InvalidResponse(e.to_string()))?;

        let results = response
            .results
            .iter()
            .filter_map(|entry| self.shape_result(entry))
            .collect();

        Ok(SearchData {
            results,
            pagination: Pagination::from_response(
                response.count,
                response.previous_page,
                response.next_page,
            ),
        })
    }

    /// Shape one raw result entry; returns `None` for the context
    /// ticket, which is dropped from its own related-search results.
    fn shape_result(&self, entry: &Value) -> Option<ResultItem> {
        let result_type = entry
            .get("result_type")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string();
        let id = entry.get("id").and_then(Value::as_u64);

        if result_type == "ticket" {
            if id.is_some() && id == self.context_ticket_id {
                return None;
            }
            let description = entry
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or_default();
            Some(ResultItem {
                result_type,
                id,
                title: entry
                    .get("subject")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                description: truncate_chars(description, DESCRIPTION_MAX_CHARS),
            })
        } else {
            Some(ResultItem {
                result_type,
                id,
                title: entry
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                description: String::new(),
            })
        }
    }

    /// Fetch all brands. The context ticket's brand starts selected.
    /// Returns the choices and whether the account has multiple brands.
    pub async fn fetch_brands(
        &self,
        client: &dyn PlatformClient,
        context_brand_id: Option<&str>,
    ) -> Result<(Vec<BrandChoice>, bool), PlatformError> {
        let raw = fetch_all_pages(client, API_BRANDS, "brands", self.max_pages).await?;
        let brands: Vec<BrandChoice> = raw
            .iter()
            .filter_map(|brand| {
                let id = brand.get("id").and_then(Value::as_u64)?.to_string();
                let name = brand.get("name").and_then(Value::as_str)?.to_string();
                let selected = context_brand_id == Some(id.as_str());
                Some(BrandChoice { id, name, selected })
            })
            .collect();
        let has_multiple = brands.len() > 1;
        Ok((brands, has_multiple))
    }

    /// Fetch assignable agents. Loaded lazily the first time the
    /// advanced options open.
    pub async fn fetch_assignees(
        &self,
        client: &dyn PlatformClient,
    ) -> Result<Vec<AssigneeChoice>, PlatformError> {
        let raw = fetch_all_pages(client, API_ASSIGNABLE_USERS, "users", self.max_pages).await?;
        Ok(raw
            .iter()
            .filter_map(|user| {
                let id = user.get("id").and_then(Value::as_u64)?.to_string();
                let name = user.get("name").and_then(Value::as_str)?.to_string();
                Some(AssigneeChoice { id, name })
            })
            .collect())
    }

    /// Fetch the context ticket, when one is configured.
    /// `custom_field_ids` selects which custom field values become
    /// keyword suggestions.
    pub async fn fetch_context_ticket(
        &self,
        client: &dyn PlatformClient,
        custom_field_ids: &[u64],
    ) -> Result<Option<ContextTicket>, PlatformError> {
        let Some(id) = self.context_ticket_id else {
            return Ok(None);
        };
        let response = client.request(&format!("/api/v2/tickets/{id}.json")).await?;
        let ticket = response
            .get("ticket")
            .ok_or_else(|| PlatformError::InvalidResponse("missing ticket".to_string()))?;

        let custom_field_values = ticket
            .get("custom_fields")
            .and_then(Value::as_array)
            .map(|fields| {
                fields
                    .iter()
                    .filter(|field| {
                        field
                            .get("id")
                            .and_then(Value::as_u64)
                            .is_some_and(|field_id| custom_field_ids.contains(&field_id))
                    })
                    .filter_map(|field| field.get("value").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Some(ContextTicket {
            id,
            subject: ticket
                .get("subject")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            brand_id: ticket
                .get("brand_id")
                .and_then(Value::as_u64)
                .map(|b| b.to_string()),
            custom_field_values,
        }))
    }

    /// Endpoint used for searches; exposed for the status line.
    pub fn endpoint(&self) -> &'static str {
        API_SEARCH
    }
}

/// Build keyword suggestions: custom-field values first, then words of
/// the context ticket subject minus stopwords, deduplicated in
/// insertion order.
pub fn build_suggestions(
    subject: Option<&str>,
    custom_field_values: &[String],
    related_tickets_enabled: bool,
) -> Vec<String> {
    let mut suggestions: Vec<String> = Vec::new();

    for value in custom_field_values {
        if !value.is_empty() && !suggestions.iter().any(|s| s == value) {
            suggestions.push(value.clone());
        }
    }

    if related_tickets_enabled {
        if let Some(subject) = subject {
            let stopwords = i18n::stopwords();
            let stopword_refs: Vec<&str> = stopwords.iter().map(String::as_str).collect();
            for word in keywords_from_subject(subject, &stopword_refs) {
                if !suggestions.iter().any(|s| s == &word) {
                    suggestions.push(word);
                }
            }
        }
    }

    suggestions
}
