//! JSON file store tests

use crate::helpers::TestTemplateBuilder;
use fieldmap::host::{JsonFileStore, MappingStore};
use fieldmap::{Rect, Template};
use serde_json::json;
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> JsonFileStore {
    JsonFileStore::new(dir.path().join("template.json"))
}

#[test]
fn test_round_trip_preserves_everything() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    let template = TestTemplateBuilder::new("invoice.pdf")
        .with_example_data(json!({ "righe": [{ "sezione": "A" }] }))
        .with_text(0, Rect::new(100, 100, 200, 20), "$.name")
        .with_loop(0, Rect::new(50, 50, 300, 20), "$.righe", 6)
        .with_loop_field("$.sezione", Rect::new(10, 2, 80, 16))
        .with_loop_page(1, Rect::new(50, 40, 300, 20), 13)
        .build();

    store.save(&template).unwrap();
    assert_eq!(store.load().unwrap(), template);
}

#[test]
fn test_save_overwrites_and_leaves_no_temp_files() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);

    store.save(&Template::new("first.pdf")).unwrap();
    store.save(&Template::new("second.pdf")).unwrap();

    assert_eq!(store.load().unwrap().document, "second.pdf");
    let entries = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(entries, 1);
}

#[test]
fn test_output_is_pretty_json() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    store.save(&Template::new("invoice.pdf")).unwrap();

    let raw = std::fs::read_to_string(store.path()).unwrap();
    assert!(raw.contains("\n  \"document\": \"invoice.pdf\""));
}
