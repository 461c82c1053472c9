use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Raw response from a server-side search index query.
///
/// Each row is an object carrying `id` plus either `fields` (the indexed
/// subset) or `doc` (the full document, when `include_docs` was requested).
/// Rows stay opaque JSON here; the normalizer flattens them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Search hits, in relevance order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<JsonValue>>,

    /// Opaque token for fetching the next page of results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookmark: Option<String>,

    /// Total number of matching rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_rows: Option<u64>,
}
