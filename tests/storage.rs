use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use serde_json::{json, Value};

use ticketscout::storage::Storage;

fn temp_store(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("ticketscout-test-{}-{name}.json", std::process::id()))
}

#[test]
fn test_set_then_get_round_trip() {
    let path = temp_store("round-trip");
    let storage = Storage::with_path("ticketscout", &path);

    storage.set("advanced_open", &true).unwrap();
    storage
        .set("recent_queries", &vec!["printer".to_string()])
        .unwrap();

    assert_eq!(storage.get::<bool>("advanced_open"), Some(true));
    assert_eq!(
        storage.get::<Vec<String>>("recent_queries"),
        Some(vec!["printer".to_string()])
    );

    let _ = fs::remove_file(path);
}

#[test]
fn test_missing_key_is_none() {
    let path = temp_store("missing");
    let storage = Storage::with_path("ticketscout", &path);
    assert_eq!(storage.get::<bool>("never_written"), None);
    let _ = fs::remove_file(path);
}

#[test]
fn test_namespaces_do_not_collide() {
    let path = temp_store("namespaces");
    let left = Storage::with_path("left", &path);
    let right = Storage::with_path("right", &path);

    left.set("flag", &true).unwrap();
    right.set("flag", &false).unwrap();

    assert_eq!(left.get::<bool>("flag"), Some(true));
    assert_eq!(right.get::<bool>("flag"), Some(false));

    // Both live in one document under qualified keys
    let raw = fs::read_to_string(&path).unwrap();
    let document: BTreeMap<String, Value> = serde_json::from_str(&raw).unwrap();
    assert!(document.contains_key("left:flag"));
    assert!(document.contains_key("right:flag"));

    let _ = fs::remove_file(path);
}

#[test]
fn test_set_all_writes_every_key() {
    let path = temp_store("set-all");
    let storage = Storage::with_path("ticketscout", &path);

    let mut values = BTreeMap::new();
    values.insert("advanced_open".to_string(), json!(true));
    values.insert("recent_queries".to_string(), json!(["printer", "vpn"]));
    storage.set_all(&values).unwrap();

    assert_eq!(storage.get::<bool>("advanced_open"), Some(true));
    assert_eq!(
        storage.get::<Vec<String>>("recent_queries"),
        Some(vec!["printer".to_string(), "vpn".to_string()])
    );

    let _ = fs::remove_file(path);
}

#[test]
fn test_type_mismatch_reads_as_absent() {
    let path = temp_store("mismatch");
    let storage = Storage::with_path("ticketscout", &path);

    storage.set("advanced_open", &"yes").unwrap();
    // A schema change must not wedge the app
    assert_eq!(storage.get::<bool>("advanced_open"), None);
    assert_eq!(
        storage.get::<String>("advanced_open"),
        Some("yes".to_string())
    );

    let _ = fs::remove_file(path);
}

#[test]
fn test_overwrite_keeps_other_keys() {
    let path = temp_store("overwrite");
    let storage = Storage::with_path("ticketscout", &path);

    storage.set("a", &1u32).unwrap();
    storage.set("b", &2u32).unwrap();
    storage.set("a", &3u32).unwrap();

    assert_eq!(storage.get::<u32>("a"), Some(3));
    assert_eq!(storage.get::<u32>("b"), Some(2));

    let _ = fs::remove_file(path);
}
