use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Raw response from a server-side view query.
///
/// Rows are kept as opaque JSON: the façade passes them through unreshaped,
/// in store order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewResponse {
    /// View rows. Absent when the response does not have the expected shape.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<JsonValue>>,

    /// Offset of the first returned row within the full index.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,

    /// Total number of rows in the index.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_rows: Option<u64>,
}
