use serde::{Deserialize, Serialize};

/// Reference to a stored document, as returned by the store's insert endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentRef {
    /// Whether the store accepted the write.
    #[serde(default)]
    pub ok: bool,

    /// Identifier of the stored document.
    pub id: String,

    /// Revision token assigned by this write.
    pub rev: String,
}
