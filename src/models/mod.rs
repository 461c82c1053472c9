//! Data models for the couch-link client library.
//!
//! Defines the document wrapper, the raw store response shapes, and the
//! normalized result envelope returned by read operations.

pub mod document;
pub mod document_ref;
pub mod envelope;
pub mod find_response;
pub mod search_response;
pub mod view_response;

#[cfg(test)]
mod tests;

pub use document::Document;
pub use document_ref::DocumentRef;
pub use envelope::ResultEnvelope;
pub use find_response::FindResponse;
pub use search_response::SearchResponse;
pub use view_response::ViewResponse;

/// Query options passed through to the store's query engine.
///
/// Opaque to this layer except for `include_docs`, which the search
/// normalizer inspects to decide which part of each row to flatten.
pub type Query = serde_json::Map<String, serde_json::Value>;
