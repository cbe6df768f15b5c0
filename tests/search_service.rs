use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{json, Value};

use ticketscout::constants::{API_ASSIGNABLE_USERS, API_BRANDS};
use ticketscout::i18n;
use ticketscout::platform::{PlatformClient, PlatformError};
use ticketscout::search::{build_suggestions, fetch_all_pages, SearchService};

/// Serves canned responses keyed by request path.
struct ScriptedClient {
    responses: HashMap<String, Value>,
}

impl ScriptedClient {
    fn new(responses: &[(&str, Value)]) -> Self {
        Self {
            responses: responses
                .iter()
                .map(|(path, value)| (path.to_string(), value.clone()))
                .collect(),
        }
    }
}

#[async_trait]
impl PlatformClient for ScriptedClient {
    async fn request(&self, path: &str) -> Result<Value, PlatformError> {
        self.responses
            .get(path)
            .cloned()
            .ok_or_else(|| PlatformError::InvalidResponse(format!("unexpected path {path}")))
    }
}

#[tokio::test]
async fn test_execute_shapes_results() {
    i18n::load_translations("en").unwrap();
    let long_description = "x".repeat(200);
    let client = ScriptedClient::new(&[(
        "/api/v2/search.json?per_page=10&query=printer",
        json!({
            "results": [
                {"result_type": "ticket", "id": 101, "subject": "Printer down",
                 "description": long_description},
                {"result_type": "user", "id": 7, "name": "Ada Lovelace"},
            ],
            "count": 2,
            "next_page": "/api/v2/search.json?page=2",
            "previous_page": null,
        }),
    )]);
    let service = SearchService::new(10, 100, None);

    let data = service.execute(&client, "printer", None).await.unwrap();
    assert_eq!(data.results.len(), 2);

    let ticket = &data.results[0];
    assert_eq!(ticket.result_type, "ticket");
    assert_eq!(ticket.title, "Printer down");
    assert_eq!(ticket.description.chars().count(), 143);
    assert!(ticket.description.ends_with("..."));

    let user = &data.results[1];
    assert_eq!(user.title, "Ada Lovelace");
    assert!(user.description.is_empty());

    assert!(data.pagination.is_paged);
    assert_eq!(
        data.pagination.next_page.as_deref(),
        Some("/api/v2/search.json?page=2")
    );
    assert!(data.pagination.previous_page.is_none());
    assert_eq!(data.pagination.count_label, "2 results");
}

#[tokio::test]
async fn test_execute_drops_the_context_ticket() {
    i18n::load_translations("en").unwrap();
    let client = ScriptedClient::new(&[(
        "/api/v2/search.json?per_page=10&query=printer",
        json!({
            "results": [
                {"result_type": "ticket", "id": 77, "subject": "The ticket being viewed",
                 "description": "itself"},
                {"result_type": "ticket", "id": 78, "subject": "A related ticket",
                 "description": "kept"},
            ],
            "count": 2,
            "next_page": null,
            "previous_page": null,
        }),
    )]);
    let service = SearchService::new(10, 100, Some(77));

    let data = service.execute(&client, "printer", None).await.unwrap();
    assert_eq!(data.results.len(), 1);
    assert_eq!(data.results[0].id, Some(78));
    assert!(!data.pagination.is_paged);
}

#[tokio::test]
async fn test_execute_reuses_page_links_verbatim() {
    i18n::load_translations("en").unwrap();
    let client = ScriptedClient::new(&[(
        "/api/v2/search.json?page=2&query=printer",
        json!({"results": [], "count": 0, "next_page": null, "previous_page": null}),
    )]);
    let service = SearchService::new(10, 100, None);

    let data = service
        .execute(&client, "printer", Some("/api/v2/search.json?page=2&query=printer"))
        .await
        .unwrap();
    assert!(data.results.is_empty());
}

#[tokio::test]
async fn test_fetch_all_pages_follows_next_links() {
    let client = ScriptedClient::new(&[
        (
            API_BRANDS,
            json!({"brands": [{"id": 1, "name": "Acme"}], "next_page": "/api/v2/brands.json?page=2"}),
        ),
        (
            "/api/v2/brands.json?page=2",
            json!({"brands": [{"id": 2, "name": "Umbrella"}], "next_page": null}),
        ),
    ]);

    let brands = fetch_all_pages(&client, API_BRANDS, "brands", 100)
        .await
        .unwrap();
    assert_eq!(brands.len(), 2);
    assert_eq!(brands[1]["name"], "Umbrella");
}

#[tokio::test]
async fn test_fetch_all_pages_is_bounded() {
    // A cursor that points back at itself must not loop forever
    let client = ScriptedClient::new(&[(
        "/loop",
        json!({"things": [{"id": 1}], "next_page": "/loop"}),
    )]);

    let things = fetch_all_pages(&client, "/loop", "things", 5).await.unwrap();
    assert_eq!(things.len(), 5);
}

#[tokio::test]
async fn test_fetch_brands_marks_context_brand_selected() {
    let client = ScriptedClient::new(&[(
        API_BRANDS,
        json!({"brands": [
            {"id": 1, "name": "Acme"},
            {"id": 2, "name": "Umbrella"},
        ], "next_page": null}),
    )]);
    let service = SearchService::new(10, 100, None);

    let (brands, has_multiple) = service.fetch_brands(&client, Some("2")).await.unwrap();
    assert!(has_multiple);
    assert!(!brands[0].selected);
    assert!(brands[1].selected);
}

#[tokio::test]
async fn test_fetch_brands_single_brand_account() {
    let client = ScriptedClient::new(&[(
        API_BRANDS,
        json!({"brands": [{"id": 1, "name": "Acme"}], "next_page": null}),
    )]);
    let service = SearchService::new(10, 100, None);

    let (brands, has_multiple) = service.fetch_brands(&client, None).await.unwrap();
    assert_eq!(brands.len(), 1);
    assert!(!has_multiple);
    assert!(!brands[0].selected);
}

#[tokio::test]
async fn test_fetch_assignees() {
    let client = ScriptedClient::new(&[(
        API_ASSIGNABLE_USERS,
        json!({"users": [
            {"id": 10, "name": "Ada Lovelace"},
            {"id": 11, "name": "Grace Hopper"},
        ], "next_page": null}),
    )]);
    let service = SearchService::new(10, 100, None);

    let assignees = service.fetch_assignees(&client).await.unwrap();
    assert_eq!(assignees.len(), 2);
    assert_eq!(assignees[0].id, "10");
    assert_eq!(assignees[1].name, "Grace Hopper");
}

#[tokio::test]
async fn test_fetch_context_ticket_extracts_custom_fields() {
    let client = ScriptedClient::new(&[(
        "/api/v2/tickets/77.json",
        json!({"ticket": {
            "id": 77,
            "subject": "Printer offline in building B",
            "brand_id": 2,
            "custom_fields": [
                {"id": 10023, "value": "hardware"},
                {"id": 10045, "value": "printers"},
                {"id": 99999, "value": "ignored"},
                {"id": 10023, "value": null},
            ],
        }}),
    )]);
    let service = SearchService::new(10, 100, Some(77));

    let ticket = service
        .fetch_context_ticket(&client, &[10023, 10045])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(ticket.subject, "Printer offline in building B");
    assert_eq!(ticket.brand_id.as_deref(), Some("2"));
    assert_eq!(ticket.custom_field_values, vec!["hardware", "printers"]);
}

#[tokio::test]
async fn test_fetch_context_ticket_without_configuration() {
    let client = ScriptedClient::new(&[]);
    let service = SearchService::new(10, 100, None);
    let ticket = service.fetch_context_ticket(&client, &[]).await.unwrap();
    assert!(ticket.is_none());
}

#[test]
fn test_build_suggestions_prefers_custom_fields() {
    i18n::load_translations("en").unwrap();
    let values = vec!["hardware".to_string(), "printers".to_string()];
    let suggestions =
        build_suggestions(Some("Printer offline in building B"), &values, true);

    assert_eq!(suggestions[0], "hardware");
    assert_eq!(suggestions[1], "printers");
    // Subject keywords follow, stopwords removed
    assert!(suggestions.contains(&"printer".to_string()));
    assert!(suggestions.contains(&"offline".to_string()));
    assert!(!suggestions.contains(&"in".to_string()));
}

#[test]
fn test_build_suggestions_without_related_tickets() {
    i18n::load_translations("en").unwrap();
    let values = vec!["hardware".to_string()];
    let suggestions = build_suggestions(Some("Printer offline"), &values, false);
    assert_eq!(suggestions, vec!["hardware"]);
}

#[test]
fn test_build_suggestions_deduplicates_across_sources() {
    i18n::load_translations("en").unwrap();
    let values = vec!["printer".to_string(), String::new()];
    let suggestions = build_suggestions(Some("Printer printer broken"), &values, true);
    assert_eq!(suggestions, vec!["printer", "broken"]);
}
