//! Text helpers: escaping option labels, truncating descriptions, and
//! extracting suggestion keywords.

/// Escape characters that are unsafe to embed in markup: `&`, `<`, `>`,
/// `"`, `'`, `` ` `` and `=`.
///
/// Option labels come straight from platform data and may contain
/// markup fragments; they are escaped before being placed into menu
/// items or tag chips so embedded markup never renders as-is.
pub fn escape_special_chars(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            '`' => escaped.push_str("&#x60;"),
            '=' => escaped.push_str("&#x3D;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Truncate `input` to at most `max` characters, appending `...` when
/// anything was cut. Works on character boundaries, not bytes.
pub fn truncate_chars(input: &str, max: usize) -> String {
    if input.chars().count() <= max {
        return input.to_string();
    }
    let truncated: String = input.chars().take(max).collect();
    format!("{truncated}...")
}

/// Extract suggestion keywords from a ticket subject.
///
/// Lower-cases the subject, strips punctuation, collapses whitespace,
/// and drops any word found in `exclusions`. Order of first occurrence
/// is preserved and duplicates are removed.
pub fn keywords_from_subject(subject: &str, exclusions: &[&str]) -> Vec<String> {
    const PUNCTUATION: &[char] = &[
        '.', ',', '-', '/', '#', '!', '$', '?', '%', '^', '&', '*', ';', ':', '{', '}', '=', '_',
        '`', '~', '(', ')',
    ];

    let cleaned: String = subject
        .to_lowercase()
        .chars()
        .map(|c| if PUNCTUATION.contains(&c) { ' ' } else { c })
        .collect();

    let mut seen = Vec::new();
    for word in cleaned.split_whitespace() {
        if word.is_empty() || exclusions.contains(&word) {
            continue;
        }
        if !seen.iter().any(|w| w == word) {
            seen.push(word.to_string());
        }
    }
    seen
}
