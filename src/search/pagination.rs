//! Pagination model and the paginated fetch helper.

use serde_json::Value;

use crate::i18n;
use crate::platform::{PlatformClient, PlatformError};

/// Pagination state of the last search response.
#[derive(Debug, Clone, Default)]
pub struct Pagination {
    pub is_paged: bool,
    pub previous_page: Option<String>,
    pub next_page: Option<String>,
    /// Localized "N results" label
    pub count_label: String,
}

impl Pagination {
    pub fn from_response(
        count: u64,
        previous_page: Option<String>,
        next_page: Option<String>,
    ) -> Self {
        Self {
            is_paged: previous_page.is_some() || next_page.is_some(),
            previous_page,
            next_page,
            count_label: i18n::t_with("search.results", &[("count", &count.to_string())]),
        }
    }
}

/// Fetch every page of a paginated collection endpoint, following
/// `next_page` links and concatenating the `entity` array of each
/// response. Bounded by `max_pages` so a misbehaving cursor cannot
/// loop forever.
pub async fn fetch_all_pages(
    client: &dyn PlatformClient,
    path: &str,
    entity: &str,
    max_pages: u32,
) -> Result<Vec<Value>, PlatformError> {
    let mut results = Vec::new();
    let mut next = Some(path.to_string());
    let mut loaded_pages = 0;

    while let Some(url) = next {
        if loaded_pages >= max_pages {
            log::warn!("stopping pagination after {loaded_pages} pages of {entity}");
            break;
        }
        loaded_pages += 1;

        let response = client.request(&url).await?;
        if let Some(items) = response.get(entity).and_then(Value::as_array) {
            results.extend(items.iter().cloned());
        }
        next = response
            .get("next_page")
            .and_then(Value::as_str)
            .map(str::to_string);
    }

    Ok(results)
}
