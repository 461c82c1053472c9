//! Result-shape normalization for read queries.
//!
//! Raw view, search, and list responses come back in three different shapes;
//! this module reshapes all of them into the uniform [`ResultEnvelope`] so
//! callers never see which query mechanism produced a result.
//!
//! Presence rule: `offset`, `total`, and `bookmark` are copied into the
//! envelope only when the raw response carried a truthy value. A legitimate
//! offset or total of exactly 0 is therefore dropped — a known quirk of the
//! envelope contract, preserved for compatibility.

use serde_json::Value as JsonValue;

use crate::error::{CouchLinkError, Result};
use crate::models::{Query, ResultEnvelope, SearchResponse, ViewResponse};

/// Truthiness in the query-option sense: null, false, 0, and the empty
/// string count as absent.
pub(crate) fn is_truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        JsonValue::String(s) => !s.is_empty(),
        JsonValue::Array(_) | JsonValue::Object(_) => true,
    }
}

/// Envelope for a raw view response: `{data: rows, offset?, total?}`.
///
/// A response without rows does not have the expected view shape and
/// reports [`CouchLinkError::NotFound`].
pub(crate) fn view_envelope(response: ViewResponse) -> Result<ResultEnvelope> {
    let rows = response.rows.ok_or(CouchLinkError::NotFound)?;
    Ok(ResultEnvelope {
        data: JsonValue::Array(rows),
        offset: response.offset.filter(|&n| n != 0),
        total: response.total_rows.filter(|&n| n != 0),
        bookmark: None,
    })
}

/// Envelope for a raw search response: `{data: flattened rows, bookmark?,
/// total?}`.
///
/// Each raw row is flattened into `id` plus the contents of its `doc`
/// (when the query asked for `include_docs`) or its `fields` subset. Any
/// structural mismatch — a row that is not an object, has no `id`, or whose
/// selected source is missing or not an object — fails the whole call with
/// the single stable kind [`CouchLinkError::FailInSearch`] rather than a
/// shape-dependent error.
pub(crate) fn search_envelope(response: SearchResponse, query: &Query) -> Result<ResultEnvelope> {
    let rows = response.rows.ok_or(CouchLinkError::NotFound)?;
    let include_docs = query.get("include_docs").map(is_truthy).unwrap_or(false);
    let source_key = if include_docs { "doc" } else { "fields" };

    let mut data = Vec::with_capacity(rows.len());
    for row in &rows {
        data.push(flatten_row(row, source_key).ok_or(CouchLinkError::FailInSearch)?);
    }

    Ok(ResultEnvelope {
        data: JsonValue::Array(data),
        bookmark: response.bookmark.filter(|b| !b.is_empty()),
        total: response.total_rows.filter(|&n| n != 0),
        offset: None,
    })
}

fn flatten_row(row: &JsonValue, source_key: &str) -> Option<JsonValue> {
    let row = row.as_object()?;
    let id = row.get("id")?;
    let source = row.get(source_key)?.as_object()?;

    let mut flat = serde_json::Map::with_capacity(source.len() + 1);
    flat.insert("id".to_string(), id.clone());
    for (field, value) in source {
        flat.insert(field.clone(), value.clone());
    }
    Some(JsonValue::Object(flat))
}

/// Envelope for a view-through-list response.
///
/// List functions control their own output shape: when the response carries
/// rows they become `data` (with `total` under the usual presence rule);
/// otherwise the raw response is passed through as `data` verbatim,
/// unreshaped.
pub(crate) fn view_list_envelope(response: JsonValue) -> Result<ResultEnvelope> {
    if response.is_null() {
        return Err(CouchLinkError::NotFound);
    }

    let rows = response
        .get("rows")
        .filter(|rows| is_truthy(rows))
        .cloned();

    match rows {
        Some(rows) => {
            let total = response
                .get("total")
                .and_then(JsonValue::as_u64)
                .filter(|&n| n != 0);
            Ok(ResultEnvelope {
                data: rows,
                total,
                offset: None,
                bookmark: None,
            })
        }
        None => Ok(ResultEnvelope::new(response)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn query_with(key: &str, value: JsonValue) -> Query {
        let mut query = Query::new();
        query.insert(key.to_string(), value);
        query
    }

    // ==================== View ====================

    #[test]
    fn test_view_envelope_copies_rows_in_order() {
        let response: ViewResponse = serde_json::from_value(json!({
            "rows": [{"id": "b", "key": 2}, {"id": "a", "key": 1}],
            "offset": 3,
            "total_rows": 10
        }))
        .unwrap();

        let envelope = view_envelope(response).unwrap();
        assert_eq!(envelope.data, json!([{"id": "b", "key": 2}, {"id": "a", "key": 1}]));
        assert_eq!(envelope.offset, Some(3));
        assert_eq!(envelope.total, Some(10));
    }

    #[test]
    fn test_view_envelope_zero_counts_are_omitted() {
        let response: ViewResponse = serde_json::from_value(json!({
            "rows": [{"id": "a"}],
            "offset": 0,
            "total_rows": 0
        }))
        .unwrap();

        let envelope = view_envelope(response).unwrap();
        assert!(envelope.offset.is_none());
        assert!(envelope.total.is_none());
    }

    #[test]
    fn test_view_envelope_missing_rows_is_not_found() {
        let response: ViewResponse = serde_json::from_value(json!({"total_rows": 4})).unwrap();
        assert!(matches!(
            view_envelope(response),
            Err(CouchLinkError::NotFound)
        ));
    }

    // ==================== Search ====================

    #[test]
    fn test_search_envelope_flattens_indexed_fields() {
        let response: SearchResponse = serde_json::from_value(json!({
            "rows": [{"id": "r1", "fields": {"a": 1, "b": 2}}],
            "bookmark": "g2wAAA",
            "total_rows": 7
        }))
        .unwrap();

        let envelope = search_envelope(response, &Query::new()).unwrap();
        // The raw `fields` wrapper is never exposed
        assert_eq!(envelope.data, json!([{"id": "r1", "a": 1, "b": 2}]));
        assert_eq!(envelope.bookmark.as_deref(), Some("g2wAAA"));
        assert_eq!(envelope.total, Some(7));
    }

    #[test]
    fn test_search_envelope_include_docs_flattens_document() {
        let response: SearchResponse = serde_json::from_value(json!({
            "rows": [{"id": "r1", "fields": {"a": 1}, "doc": {"_id": "r1", "name": "carol"}}]
        }))
        .unwrap();

        let query = query_with("include_docs", json!(true));
        let envelope = search_envelope(response, &query).unwrap();
        assert_eq!(envelope.data, json!([{"id": "r1", "_id": "r1", "name": "carol"}]));
    }

    #[test]
    fn test_search_envelope_falsy_include_docs_uses_fields() {
        let response: SearchResponse = serde_json::from_value(json!({
            "rows": [{"id": "r1", "fields": {"a": 1}, "doc": {"name": "carol"}}]
        }))
        .unwrap();

        let query = query_with("include_docs", json!(false));
        let envelope = search_envelope(response, &query).unwrap();
        assert_eq!(envelope.data, json!([{"id": "r1", "a": 1}]));
    }

    #[test]
    fn test_search_envelope_malformed_row_fails_in_search() {
        // Row lacking both doc and fields
        let response: SearchResponse =
            serde_json::from_value(json!({"rows": [{"id": "r1"}]})).unwrap();
        assert!(matches!(
            search_envelope(response, &Query::new()),
            Err(CouchLinkError::FailInSearch)
        ));

        // Row that is not an object at all
        let response: SearchResponse =
            serde_json::from_value(json!({"rows": ["bogus"]})).unwrap();
        assert!(matches!(
            search_envelope(response, &Query::new()),
            Err(CouchLinkError::FailInSearch)
        ));
    }

    #[test]
    fn test_search_envelope_missing_rows_is_not_found() {
        let response: SearchResponse = serde_json::from_value(json!({"bookmark": "x"})).unwrap();
        assert!(matches!(
            search_envelope(response, &Query::new()),
            Err(CouchLinkError::NotFound)
        ));
    }

    // ==================== View-through-list ====================

    #[test]
    fn test_view_list_envelope_with_rows() {
        let envelope = view_list_envelope(json!({
            "rows": [{"id": "a"}],
            "total": 5
        }))
        .unwrap();
        assert_eq!(envelope.data, json!([{"id": "a"}]));
        assert_eq!(envelope.total, Some(5));
    }

    #[test]
    fn test_view_list_envelope_zero_total_is_omitted() {
        let envelope = view_list_envelope(json!({"rows": [], "total": 0})).unwrap();
        assert!(envelope.total.is_none());
    }

    #[test]
    fn test_view_list_envelope_passthrough_without_rows() {
        // A list function may emit any shape; it is passed through verbatim
        let raw = json!({"custom": "payload", "values": [1, 2]});
        let envelope = view_list_envelope(raw.clone()).unwrap();
        assert_eq!(envelope.data, raw);
        assert!(envelope.total.is_none());
    }

    #[test]
    fn test_view_list_envelope_null_is_not_found() {
        assert!(matches!(
            view_list_envelope(JsonValue::Null),
            Err(CouchLinkError::NotFound)
        ));
    }

    // ==================== Truthiness ====================

    #[test]
    fn test_is_truthy_matches_query_option_semantics() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!("yes")));
        assert!(is_truthy(&json!({})));
    }
}
