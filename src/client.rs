//! Main couch-link client with builder pattern.
//!
//! Provides the public façade combining retries, document lookup, and
//! result normalization over the store primitives.

use crate::{
    auth::AuthProvider,
    error::{CouchLinkError, Result},
    lookup,
    models::{
        document::{CREATION_DATE_FIELD, ID_FIELD, LAST_MODIFICATION_DATE_FIELD, REV_FIELD},
        Document, DocumentRef, Query, ResultEnvelope,
    },
    normalize, retry,
    store::{DocumentStore, HttpStore},
};
use serde_json::{json, Value as JsonValue};
use std::{sync::Arc, time::Duration};

/// Retry budget for mutating operations: 1 initial attempt + 5 retries.
const MUTATION_RETRIES: u32 = 5;

/// Client façade over a remote document store.
///
/// Use [`CouchLinkClientBuilder`] to construct instances with custom
/// configuration. The client holds only immutable configuration — every
/// call is independent, and a failed call does not poison later ones.
///
/// # Examples
///
/// ```rust,no_run
/// use couch_link::CouchLinkClient;
/// use serde_json::json;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = CouchLinkClient::builder()
///     .base_url("http://localhost:5984")
///     .database("inventory")
///     .timestamp(true)
///     .build()?;
///
/// let doc_ref = client.create(json!({"sku": "A-100", "count": 3})).await?;
/// println!("stored as {} rev {}", doc_ref.id, doc_ref.rev);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct CouchLinkClient {
    store: Arc<dyn DocumentStore>,
    timestamp: bool,
}

impl CouchLinkClient {
    /// Create a new builder for configuring the client
    pub fn builder() -> CouchLinkClientBuilder {
        CouchLinkClientBuilder::new()
    }

    /// Persist a new document.
    ///
    /// Fails with `INVALID_DATA` unless `doc` is a JSON object. When the
    /// client was built with `.timestamp(true)`, `_creationDate` is stamped
    /// with the current epoch milliseconds before insertion. The insert is
    /// re-issued with the same payload up to 5 times on failure; after
    /// that, the store's last error surfaces unmodified.
    pub async fn create(&self, doc: JsonValue) -> Result<DocumentRef> {
        let mut doc = Document::from_value(doc).ok_or(CouchLinkError::InvalidData)?;
        if self.timestamp {
            doc.set(CREATION_DATE_FIELD, json!(now_millis()));
        }

        log::debug!("[CREATE] inserting document (timestamp={})", self.timestamp);
        retry::with_attempts("create", MUTATION_RETRIES, || self.store.insert(&doc, None)).await
    }

    /// Merge `fields` into the document stored under `id`.
    ///
    /// Fails with `INVALID_DATA` if `id` is empty or `fields` is not a JSON
    /// object. The current document is fetched first (propagating
    /// `NOT_FOUND`); any `_id`/`_rev` in `fields` is stripped so
    /// caller-supplied identity can never override the stored one, and the
    /// rest is shallow-merged — nested objects are replaced wholesale, not
    /// deep-merged. No lock spans the fetch and the write, so a concurrent
    /// mutation can still make the store reject the write for a stale
    /// revision; that error surfaces after the retry budget.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use serde_json::json;
    /// # async fn example(client: couch_link::CouchLinkClient) -> couch_link::Result<()> {
    /// let doc_ref = client.update("item-42", json!({"count": 4})).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn update(&self, id: &str, fields: JsonValue) -> Result<DocumentRef> {
        if id.is_empty() {
            return Err(CouchLinkError::InvalidData);
        }
        let fields = Document::from_value(fields).ok_or(CouchLinkError::InvalidData)?;

        let mut doc = lookup::find_by_id(self.store.as_ref(), id).await?;

        let mut fields = fields.0;
        fields.remove(ID_FIELD);
        fields.remove(REV_FIELD);
        doc.merge(fields);

        if self.timestamp {
            doc.set(LAST_MODIFICATION_DATE_FIELD, json!(now_millis()));
        }

        log::debug!("[UPDATE] writing id={} rev={:?}", id, doc.rev());
        retry::with_attempts("update", MUTATION_RETRIES, || {
            self.store.insert(&doc, Some(id))
        })
        .await
    }

    /// Remove the document stored under `id`.
    ///
    /// Fails with `INVALID_DATA` if `id` is empty. The current document is
    /// fetched first to obtain its revision token (propagating `NOT_FOUND`).
    /// Returns `true` on success, never the store's raw destroy response.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        if id.is_empty() {
            return Err(CouchLinkError::InvalidData);
        }

        let doc = lookup::find_by_id(self.store.as_ref(), id).await?;
        let rev = doc.rev().unwrap_or_default().to_string();

        log::debug!("[DELETE] destroying id={} rev={}", id, rev);
        retry::with_attempts("delete", MUTATION_RETRIES, || self.store.destroy(id, &rev))
            .await?;
        Ok(true)
    }

    /// Query a server-side view, normalized to a [`ResultEnvelope`].
    ///
    /// Fails with `INVALID_DATA` if either name is empty, before any store
    /// call. A store error passes through; a response without rows reports
    /// `NOT_FOUND`. See [`ResultEnvelope`] for the zero-as-absent rule on
    /// `offset`/`total`.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # async fn example(client: couch_link::CouchLinkClient) -> couch_link::Result<()> {
    /// let envelope = client.view("catalog", "by_sku", None).await?;
    /// println!("rows: {}", envelope.data);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn view(
        &self,
        ddoc_name: &str,
        view_name: &str,
        query: Option<Query>,
    ) -> Result<ResultEnvelope> {
        if ddoc_name.is_empty() || view_name.is_empty() {
            return Err(CouchLinkError::InvalidData);
        }
        let query = query.unwrap_or_default();

        log::debug!("[VIEW] {}/{}", ddoc_name, view_name);
        let response = self.store.view(ddoc_name, view_name, &query).await?;
        normalize::view_envelope(response)
    }

    /// Query a server-side search index, normalized to a [`ResultEnvelope`].
    ///
    /// Each result row is flattened to `id` plus either the full document
    /// (when the query carries a truthy `include_docs`) or the indexed
    /// field subset. A row that cannot be reshaped fails the whole call
    /// with `FAIL_IN_SEARCH`.
    pub async fn search(
        &self,
        ddoc_name: &str,
        search_name: &str,
        query: Option<Query>,
    ) -> Result<ResultEnvelope> {
        if ddoc_name.is_empty() || search_name.is_empty() {
            return Err(CouchLinkError::InvalidData);
        }
        let query = query.unwrap_or_default();

        log::debug!("[SEARCH] {}/{}", ddoc_name, search_name);
        let response = self.store.search(ddoc_name, search_name, &query).await?;
        normalize::search_envelope(response, &query)
    }

    /// Query a view through a server-side list transform.
    ///
    /// Fails with `INVALID_DATA` if the ddoc or view name is empty; the
    /// list name is passed through unvalidated. When the list function
    /// emits rows they become the envelope's `data`; anything else is
    /// passed through verbatim.
    pub async fn view_list(
        &self,
        ddoc_name: &str,
        view_name: &str,
        list_name: &str,
        query: Option<Query>,
    ) -> Result<ResultEnvelope> {
        if ddoc_name.is_empty() || view_name.is_empty() {
            return Err(CouchLinkError::InvalidData);
        }
        let query = query.unwrap_or_default();

        log::debug!("[VIEW_LIST] {}/{} via {}", ddoc_name, view_name, list_name);
        let response = self
            .store
            .view_with_list(ddoc_name, view_name, list_name, &query)
            .await?;
        normalize::view_list_envelope(response)
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Builder for configuring [`CouchLinkClient`] instances.
pub struct CouchLinkClientBuilder {
    base_url: Option<String>,
    database: Option<String>,
    auth: AuthProvider,
    timeout: Duration,
    connect_timeout: Duration,
    timestamp: bool,
    store: Option<Arc<dyn DocumentStore>>,
}

impl CouchLinkClientBuilder {
    fn new() -> Self {
        Self {
            base_url: None,
            database: None,
            auth: AuthProvider::none(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            timestamp: false,
            store: None,
        }
    }

    /// Set the base URL of the store service
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the database name within the store
    pub fn database(mut self, name: impl Into<String>) -> Self {
        self.database = Some(name.into());
        self
    }

    /// Set authentication credentials
    pub fn auth(mut self, auth: AuthProvider) -> Self {
        self.auth = auth;
        self
    }

    /// Set request timeout (for HTTP requests)
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set connection timeout (TCP + TLS handshake)
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Enable lifecycle timestamp tracking: `create` stamps
    /// `_creationDate` and `update` stamps `_lastModificationDate`,
    /// both as epoch milliseconds.
    pub fn timestamp(mut self, enabled: bool) -> Self {
        self.timestamp = enabled;
        self
    }

    /// Use a custom store implementation instead of the HTTP transport.
    ///
    /// When set, `base_url` and `database` are not required. This is the
    /// seam tests use to drive the façade against an in-process store.
    pub fn store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<CouchLinkClient> {
        if let Some(store) = self.store {
            return Ok(CouchLinkClient {
                store,
                timestamp: self.timestamp,
            });
        }

        let base_url = self
            .base_url
            .ok_or_else(|| CouchLinkError::Configuration("base_url is required".into()))?;
        let database = self
            .database
            .ok_or_else(|| CouchLinkError::Configuration("database is required".into()))?;

        // Keep-alive pooling: these calls issue many small requests
        let http_client = reqwest::Client::builder()
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| CouchLinkError::Configuration(e.to_string()))?;

        log::debug!("[CLIENT] connecting to {}/{}", base_url, database);
        Ok(CouchLinkClient {
            store: Arc::new(HttpStore::new(base_url, database, http_client, self.auth)),
            timestamp: self.timestamp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_pattern() {
        let result = CouchLinkClient::builder()
            .base_url("http://localhost:5984")
            .database("inventory")
            .timeout(Duration::from_secs(10))
            .auth(AuthProvider::basic_auth("alice".into(), "secret".into()))
            .timestamp(true)
            .build();

        assert!(result.is_ok());
    }

    #[test]
    fn test_builder_missing_url() {
        let result = CouchLinkClient::builder().build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_missing_database() {
        let result = CouchLinkClient::builder()
            .base_url("http://localhost:5984")
            .build();
        assert!(matches!(result, Err(CouchLinkError::Configuration(_))));
    }
}
