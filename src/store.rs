//! Remote store adapter seam.
//!
//! The façade talks to the store exclusively through [`DocumentStore`], so
//! tests can swap in an in-process implementation and the retry/normalization
//! semantics stay independent of the HTTP transport.

pub mod http;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::error::Result;
use crate::models::{Document, DocumentRef, FindResponse, Query, SearchResponse, ViewResponse};

pub use http::HttpStore;

/// Primitive operations of the remote document store.
///
/// One method per store endpoint, no policy: retries, lookups, and result
/// reshaping all live above this trait. Errors out of these methods are
/// store-native and pass through the façade uninterpreted.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Persist a document, keyed by `id` when given (update-insert),
    /// otherwise letting the store assign one.
    async fn insert(&self, doc: &Document, id: Option<&str>) -> Result<DocumentRef>;

    /// Remove the document with the given id at the given revision.
    async fn destroy(&self, id: &str, rev: &str) -> Result<JsonValue>;

    /// Selector-based lookup; `body` is the full find request
    /// (selector, limit, ...).
    async fn find(&self, body: JsonValue) -> Result<FindResponse>;

    /// Query a server-side view.
    async fn view(&self, ddoc: &str, view: &str, query: &Query) -> Result<ViewResponse>;

    /// Query a server-side search index.
    async fn search(&self, ddoc: &str, index: &str, query: &Query) -> Result<SearchResponse>;

    /// Query a view through a server-side list transform. The list function
    /// controls the output shape, so the response stays raw JSON.
    async fn view_with_list(
        &self,
        ddoc: &str,
        view: &str,
        list: &str,
        query: &Query,
    ) -> Result<JsonValue>;
}
