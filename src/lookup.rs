//! Point lookup of a document's current stored state.

use log::debug;
use serde_json::json;

use crate::error::{CouchLinkError, Result};
use crate::models::Document;
use crate::store::DocumentStore;

/// Resolve `id` to the currently stored document via a selector lookup.
///
/// Update and delete need the current revision token, which callers do not
/// track; fetching a fresh copy immediately before the mutation shrinks
/// (but cannot close) the window for stale-revision conflicts.
///
/// A store error, a response without docs, and an empty result set all
/// collapse to [`CouchLinkError::NotFound`].
pub(crate) async fn find_by_id(store: &dyn DocumentStore, id: &str) -> Result<Document> {
    let body = json!({
        "selector": { "_id": id },
        "limit": 1,
    });

    let response = match store.find(body).await {
        Ok(response) => response,
        Err(err) => {
            debug!("[FIND_BY_ID] lookup for id={} failed: {}", id, err);
            return Err(CouchLinkError::NotFound);
        }
    };

    match response.docs {
        Some(mut docs) if !docs.is_empty() => Ok(docs.remove(0)),
        _ => {
            debug!("[FIND_BY_ID] no document with id={}", id);
            Err(CouchLinkError::NotFound)
        }
    }
}
