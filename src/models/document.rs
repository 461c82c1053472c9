use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Identity field assigned by the store.
pub const ID_FIELD: &str = "_id";

/// Revision token field; required by the store to accept an update or delete.
pub const REV_FIELD: &str = "_rev";

/// Lifecycle stamp written by `create` when timestamp tracking is enabled.
pub const CREATION_DATE_FIELD: &str = "_creationDate";

/// Lifecycle stamp written by `update` when timestamp tracking is enabled.
pub const LAST_MODIFICATION_DATE_FIELD: &str = "_lastModificationDate";

/// A single document as stored by the remote service.
///
/// Just a JSON object; `_id` and `_rev` are ordinary fields once the store
/// has assigned them. Documents are transient here — constructed per call
/// and never cached across operations.
///
/// # Examples
///
/// ```rust
/// use couch_link::Document;
/// use serde_json::json;
///
/// let doc = Document::from_value(json!({"_id": "a", "_rev": "1-x", "name": "carol"}))
///     .expect("object");
/// assert_eq!(doc.id(), Some("a"));
/// assert_eq!(doc.rev(), Some("1-x"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Document(pub serde_json::Map<String, JsonValue>);

impl Document {
    /// Wrap a JSON value, returning `None` unless it is an object.
    pub fn from_value(value: JsonValue) -> Option<Self> {
        match value {
            JsonValue::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// The store-assigned identifier, if present.
    pub fn id(&self) -> Option<&str> {
        self.0.get(ID_FIELD).and_then(JsonValue::as_str)
    }

    /// The current revision token, if present.
    pub fn rev(&self) -> Option<&str> {
        self.0.get(REV_FIELD).and_then(JsonValue::as_str)
    }

    /// Set a field, replacing any existing value.
    pub fn set(&mut self, field: &str, value: JsonValue) {
        self.0.insert(field.to_string(), value);
    }

    /// Shallow-merge `fields` into this document, field by field.
    ///
    /// An existing field is overwritten wholesale; nested objects are
    /// replaced, not deep-merged.
    pub fn merge(&mut self, fields: serde_json::Map<String, JsonValue>) {
        for (key, value) in fields {
            self.0.insert(key, value);
        }
    }

    /// Consume the wrapper, yielding the underlying JSON object.
    pub fn into_value(self) -> JsonValue {
        JsonValue::Object(self.0)
    }
}
