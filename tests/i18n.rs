use ticketscout::i18n;

#[test]
fn test_lookup_after_load() {
    i18n::load_translations("en").unwrap();
    assert_eq!(i18n::t("search.value.new"), "New");
    assert_eq!(i18n::t("search.label.status"), "Ticket Status");
    assert_eq!(i18n::t("global.error.title"), "Something went wrong");
}

#[test]
fn test_missing_key_returned_verbatim() {
    i18n::load_translations("en").unwrap();
    assert_eq!(i18n::t("search.value.bogus"), "search.value.bogus");
}

#[test]
fn test_placeholder_substitution() {
    i18n::load_translations("en").unwrap();
    assert_eq!(
        i18n::t_with("search.results", &[("count", "42")]),
        "42 results"
    );
    // Unknown placeholders are left in place
    assert_eq!(
        i18n::t_with("search.value.open", &[("count", "42")]),
        "Open"
    );
}

#[test]
fn test_unknown_locale_falls_back_to_english() {
    i18n::load_translations("xx-YY").unwrap();
    assert_eq!(i18n::t("search.value.pending"), "Pending");
}

#[test]
fn test_stopwords() {
    i18n::load_translations("en").unwrap();
    let words = i18n::stopwords();
    assert!(words.contains(&"the".to_string()));
    assert!(words.contains(&"in".to_string()));
    assert!(!words.contains(&"printer".to_string()));
    assert!(words.iter().all(|w| !w.is_empty()));
}
