//! Translation lookup.
//!
//! Catalogs are JSON documents whose nested objects are flattened into
//! dot-joined keys (`search.value.new`). The English catalog is
//! embedded in the binary; additional locales can be dropped next to it
//! and selected at load time. Lookups never fail: a missing key is
//! returned verbatim so untranslated UI stays debuggable.

use std::collections::HashMap;
use std::sync::RwLock;

use once_cell::sync::Lazy;
use serde_json::Value;

static CATALOG: Lazy<RwLock<HashMap<String, String>>> = Lazy::new(|| RwLock::new(HashMap::new()));

const EN_CATALOG: &str = include_str!("../assets/translations/en.json");

/// Load the catalog for `locale`, falling back to English for unknown
/// locales. Safe to call more than once; the last load wins.
pub fn load_translations(locale: &str) -> anyhow::Result<()> {
    let raw = match locale {
        "en" | "en-US" | "en-GB" => EN_CATALOG,
        other => {
            log::warn!("no catalog for locale {other}, falling back to en");
            EN_CATALOG
        }
    };
    let document: Value = serde_json::from_str(raw)?;
    let mut flat = HashMap::new();
    flatten("", &document, &mut flat);
    if let Ok(mut catalog) = CATALOG.write() {
        *catalog = flat;
    }
    Ok(())
}

/// Look up a translation by dot-joined key. Returns the key itself
/// when it is missing from the catalog.
pub fn t(key: &str) -> String {
    CATALOG
        .read()
        .ok()
        .and_then(|catalog| catalog.get(key).cloned())
        .unwrap_or_else(|| key.to_string())
}

/// Look up a translation and substitute `{{name}}` placeholders.
pub fn t_with(key: &str, substitutions: &[(&str, &str)]) -> String {
    let mut text = t(key);
    for (name, value) in substitutions {
        text = text.replace(&format!("{{{{{name}}}}}"), value);
    }
    text
}

/// The comma-separated stopword list used for keyword suggestions.
pub fn stopwords() -> Vec<String> {
    t("stopwords.exclusions")
        .split(',')
        .map(|w| w.trim().to_string())
        .filter(|w| !w.is_empty())
        .collect()
}

fn flatten(prefix: &str, value: &Value, out: &mut HashMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let joined = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&joined, child, out);
            }
        }
        Value::String(text) => {
            out.insert(prefix.to_string(), text.clone());
        }
        other => {
            out.insert(prefix.to_string(), other.to_string());
        }
    }
}
