use ticketscout::config::Config;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert!(config.ui.mouse_enabled);
    assert_eq!(config.ui.panel_min_width, 40);
    assert_eq!(config.ui.locale, "en");
    assert_eq!(config.search.per_page, 10);
    assert_eq!(config.search.max_page_requests, 100);
    assert!(config.search.related_tickets);
    assert!(config.search.custom_fields.is_empty());
    assert!(config.search.context_ticket_id.is_none());
    assert_eq!(config.platform.api_token_env, "ZENDESK_API_TOKEN");
    assert!(!config.logging.enabled);
}

#[test]
fn test_config_validation() {
    let mut config = Config::default();

    // Valid config should pass
    assert!(config.validate().is_ok());

    // Panel too narrow should fail
    config.ui.panel_min_width = 10;
    assert!(config.validate().is_err());

    // Reset and test invalid page size
    config.ui.panel_min_width = 40;
    config.search.per_page = 0;
    assert!(config.validate().is_err());
    config.search.per_page = 101;
    assert!(config.validate().is_err());

    // Reset and test the pagination bound
    config.search.per_page = 10;
    config.search.max_page_requests = 0;
    assert!(config.validate().is_err());

    // Reset and test log level whitelist
    config.search.max_page_requests = 100;
    config.logging.level = "verbose".to_string();
    assert!(config.validate().is_err());
    config.logging.level = "debug".to_string();
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_serialization() {
    let config = Config::default();
    let toml_str = toml::to_string_pretty(&config).unwrap();
    assert!(toml_str.contains("per_page = 10"));
    assert!(toml_str.contains("panel_min_width = 40"));
    assert!(toml_str.contains("api_token_env = \"ZENDESK_API_TOKEN\""));
}

#[test]
fn test_partial_config_deserialization() {
    // Test that partial TOML configs merge with defaults
    let partial_toml = r#"
[search]
per_page = 25
context_ticket_id = 77

[platform]
subdomain = "acme"
"#;

    let config: Config = toml::from_str(partial_toml).unwrap();

    // Check that specified values are used
    assert_eq!(config.search.per_page, 25);
    assert_eq!(config.search.context_ticket_id, Some(77));
    assert_eq!(config.platform.subdomain, "acme");

    // Check that unspecified values use defaults
    assert!(config.ui.mouse_enabled); // default value
    assert_eq!(config.search.max_page_requests, 100); // default value
    assert_eq!(config.platform.api_token_env, "ZENDESK_API_TOKEN"); // default value
}

#[test]
fn test_invalid_toml_is_rejected() {
    let bad = "[search]\nper_page = \"lots\"\n";
    assert!(toml::from_str::<Config>(bad).is_err());
}
