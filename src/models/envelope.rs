use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Normalized result shape returned by all read operations.
///
/// `data` is always present and preserves the underlying response order —
/// rows are never reordered or deduplicated. The optional fields appear only
/// when the raw response supplied them; a raw `offset` or `total_rows` of 0
/// is treated as absent and dropped (a documented quirk of the envelope,
/// kept for compatibility).
///
/// # Examples
///
/// ```rust
/// use couch_link::ResultEnvelope;
/// use serde_json::json;
///
/// let envelope = ResultEnvelope::new(json!([{"id": "a", "key": 1}]));
/// assert!(envelope.total.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultEnvelope {
    /// Rows for view/search; the raw response verbatim for a list function
    /// that emitted something other than rows.
    pub data: JsonValue,

    /// Total row count, when the raw response carried a non-zero one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,

    /// Index offset, when the raw response carried a non-zero one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,

    /// Pagination token (search results only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookmark: Option<String>,
}

impl ResultEnvelope {
    /// Envelope with data only.
    pub fn new(data: JsonValue) -> Self {
        Self {
            data,
            total: None,
            offset: None,
            bookmark: None,
        }
    }
}
