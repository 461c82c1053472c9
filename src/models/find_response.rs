use serde::{Deserialize, Serialize};

use super::document::Document;

/// Raw response from the store's selector-based `_find` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindResponse {
    /// Matching documents, in store order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs: Option<Vec<Document>>,

    /// Opaque pagination token, when the store supplies one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookmark: Option<String>,
}
