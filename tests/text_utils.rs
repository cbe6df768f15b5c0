use ticketscout::utils::text::{escape_special_chars, keywords_from_subject, truncate_chars};

#[test]
fn test_escape_special_chars() {
    assert_eq!(
        escape_special_chars("<script>alert(\"hi\")</script>"),
        "&lt;script&gt;alert(&quot;hi&quot;)&lt;/script&gt;"
    );
    assert_eq!(escape_special_chars("Tom & Jerry"), "Tom &amp; Jerry");
    assert_eq!(escape_special_chars("a='b'"), "a&#x3D;&#x27;b&#x27;");
    assert_eq!(escape_special_chars("`backtick`"), "&#x60;backtick&#x60;");
}

#[test]
fn test_escape_leaves_plain_text_alone() {
    assert_eq!(escape_special_chars("Pending review"), "Pending review");
    assert_eq!(escape_special_chars(""), "");
    // Already-escaped input is escaped again, not recognized
    assert_eq!(escape_special_chars("&amp;"), "&amp;amp;");
}

#[test]
fn test_truncate_chars() {
    assert_eq!(truncate_chars("short", 140), "short");
    assert_eq!(truncate_chars("abcdef", 6), "abcdef");
    assert_eq!(truncate_chars("abcdef", 5), "abcde...");
}

#[test]
fn test_truncate_chars_counts_characters_not_bytes() {
    // Multi-byte characters count once each
    assert_eq!(truncate_chars("héllo wörld", 11), "héllo wörld");
    assert_eq!(truncate_chars("héllo wörld", 5), "héllo...");
}

#[test]
fn test_keywords_from_subject() {
    let words = keywords_from_subject("Printer broken: paper-jam in tray!", &["in"]);
    assert_eq!(words, vec!["printer", "broken", "paper", "jam", "tray"]);
}

#[test]
fn test_keywords_deduplicate_in_first_seen_order() {
    let words = keywords_from_subject("Login login LOGIN failure, login failure", &[]);
    assert_eq!(words, vec!["login", "failure"]);
}

#[test]
fn test_keywords_drop_exclusions_after_lowercasing() {
    let words = keywords_from_subject("The printer and THE scanner", &["the", "and"]);
    assert_eq!(words, vec!["printer", "scanner"]);
}

#[test]
fn test_keywords_from_punctuation_only_subject() {
    assert!(keywords_from_subject("!!! ---", &[]).is_empty());
    assert!(keywords_from_subject("", &[]).is_empty());
}
