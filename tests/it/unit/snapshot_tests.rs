//! Snapshot tests for the persisted template format.
//!
//! Snapshots are inline. To update them after an intentional format change:
//!
//! ```bash
//! cargo insta test --accept
//! ```

use crate::helpers::TestTemplateBuilder;
use fieldmap::{FieldMapping, Rect, Template};
use serde_json::json;

#[test]
fn test_text_mapping_format() {
    let mapping = FieldMapping::text(0, Rect::new(100, 100, 200, 20), "$.name");
    insta::assert_json_snapshot!(mapping, @r###"
    {
      "kind": "text",
      "path": "$.name",
      "page": 0,
      "area": {
        "x": 100,
        "y": 100,
        "width": 200,
        "height": 20
      }
    }
    "###);
}

#[test]
fn test_loop_with_field_and_continuation_format() {
    let template = TestTemplateBuilder::new("invoice.pdf")
        .with_loop(0, Rect::new(50, 50, 300, 20), "$.righe", 6)
        .with_loop_field("$.sezione", Rect::new(10, 2, 80, 16))
        .with_loop_page(1, Rect::new(50, 40, 300, 20), 13)
        .build();
    insta::assert_json_snapshot!(template, @r###"
    {
      "document": "invoice.pdf",
      "example_data": null,
      "mappings": [
        {
          "kind": "loop",
          "path": "$.righe",
          "page": 0,
          "area": {
            "x": 50,
            "y": 50,
            "width": 300,
            "height": 20
          },
          "rows": 6,
          "fields": [
            {
              "path": "$.sezione",
              "x": 10,
              "y": 2,
              "width": 80,
              "height": 16
            }
          ],
          "continuations": [
            {
              "page": 1,
              "area": {
                "x": 50,
                "y": 40,
                "width": 300,
                "height": 20
              },
              "rows": 13
            }
          ]
        }
      ]
    }
    "###);
}

#[test]
fn test_minimal_document_loads_with_defaults() {
    let template: Template = serde_json::from_value(json!({
        "document": "invoice.pdf",
        "mappings": [
            { "kind": "loop", "path": "$.righe", "page": 0,
              "area": { "x": 50, "y": 50, "width": 300, "height": 20 }, "rows": 2 }
        ]
    }))
    .unwrap();

    let l = template.mappings()[0].as_loop().unwrap();
    assert!(l.fields.is_empty());
    assert!(l.continuations.is_empty());
    assert!(template.example_data.is_null());
}

#[test]
fn test_unknown_kind_is_rejected() {
    let result: Result<FieldMapping, _> = serde_json::from_value(json!({
        "kind": "barcode", "path": "$.x", "page": 0,
        "area": { "x": 0, "y": 0, "width": 10, "height": 10 }
    }));
    assert!(result.is_err());
}
