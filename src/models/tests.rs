use serde_json::json;

use super::*;

// ==================== Document Tests ====================

#[test]
fn test_document_from_value_rejects_non_objects() {
    assert!(Document::from_value(json!(null)).is_none());
    assert!(Document::from_value(json!("text")).is_none());
    assert!(Document::from_value(json!([1, 2])).is_none());
    assert!(Document::from_value(json!({"a": 1})).is_some());
}

#[test]
fn test_document_identity_accessors() {
    let doc = Document::from_value(json!({"_id": "d1", "_rev": "3-abc", "x": 1})).unwrap();
    assert_eq!(doc.id(), Some("d1"));
    assert_eq!(doc.rev(), Some("3-abc"));

    let bare = Document::from_value(json!({"x": 1})).unwrap();
    assert!(bare.id().is_none());
    assert!(bare.rev().is_none());
}

#[test]
fn test_document_merge_is_shallow() {
    let mut doc =
        Document::from_value(json!({"x": 1, "nested": {"a": 1, "b": 2}})).unwrap();
    let fields = Document::from_value(json!({"x": 2, "nested": {"a": 9}})).unwrap();

    doc.merge(fields.0);

    // Nested objects are replaced wholesale, not deep-merged
    assert_eq!(doc.into_value(), json!({"x": 2, "nested": {"a": 9}}));
}

#[test]
fn test_document_serde_is_transparent() {
    let value = json!({"_id": "d1", "name": "carol"});
    let doc: Document = serde_json::from_value(value.clone()).unwrap();
    assert_eq!(serde_json::to_value(&doc).unwrap(), value);
}

// ==================== Response Model Tests ====================

#[test]
fn test_view_response_optional_fields() {
    let resp: ViewResponse =
        serde_json::from_value(json!({"rows": [{"id": "a"}]})).unwrap();
    assert_eq!(resp.rows.as_ref().map(Vec::len), Some(1));
    assert!(resp.offset.is_none());
    assert!(resp.total_rows.is_none());

    let resp: ViewResponse =
        serde_json::from_value(json!({"rows": [], "offset": 10, "total_rows": 42})).unwrap();
    assert_eq!(resp.offset, Some(10));
    assert_eq!(resp.total_rows, Some(42));
}

#[test]
fn test_search_response_shape() {
    let resp: SearchResponse = serde_json::from_value(json!({
        "rows": [{"id": "r1", "fields": {"a": 1}}],
        "bookmark": "g2wAAA",
        "total_rows": 7
    }))
    .unwrap();
    assert_eq!(resp.bookmark.as_deref(), Some("g2wAAA"));
    assert_eq!(resp.total_rows, Some(7));
}

#[test]
fn test_document_ref_deserialization() {
    let doc_ref: DocumentRef =
        serde_json::from_value(json!({"ok": true, "id": "d1", "rev": "1-abc"})).unwrap();
    assert!(doc_ref.ok);
    assert_eq!(doc_ref.id, "d1");
    assert_eq!(doc_ref.rev, "1-abc");
}

#[test]
fn test_envelope_serialization_omits_absent_fields() {
    let envelope = ResultEnvelope::new(json!([1, 2, 3]));
    let serialized = serde_json::to_value(&envelope).unwrap();
    assert_eq!(serialized, json!({"data": [1, 2, 3]}));

    let full = ResultEnvelope {
        data: json!([]),
        total: Some(5),
        offset: Some(2),
        bookmark: None,
    };
    let serialized = serde_json::to_value(&full).unwrap();
    assert_eq!(serialized, json!({"data": [], "total": 5, "offset": 2}));
}
