//! HTTP transport for the store primitives.

use async_trait::async_trait;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::time::Instant;

use crate::auth::AuthProvider;
use crate::error::{CouchLinkError, Result};
use crate::models::{Document, DocumentRef, FindResponse, Query, SearchResponse, ViewResponse};
use crate::store::DocumentStore;

/// [`DocumentStore`] implementation over the CouchDB/Cloudant REST API.
///
/// Holds a shared `reqwest::Client`; all timeout behavior is the HTTP
/// client's own — this layer adds no timeouts of its own.
#[derive(Clone)]
pub struct HttpStore {
    base_url: String,
    database: String,
    http_client: reqwest::Client,
    auth: AuthProvider,
}

/// Error body shape returned by CouchDB-style services.
#[derive(Debug, Deserialize)]
struct StoreErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    reason: Option<String>,
}

impl HttpStore {
    pub(crate) fn new(
        base_url: String,
        database: String,
        http_client: reqwest::Client,
        auth: AuthProvider,
    ) -> Self {
        Self {
            base_url,
            database,
            http_client,
            auth,
        }
    }

    fn db_url(&self) -> String {
        format!("{}/{}", self.base_url, self.database)
    }

    /// Serialize query options to URL parameters: string values pass
    /// through verbatim, everything else is JSON-encoded (the store's
    /// convention for keys, booleans, and numbers).
    fn query_params(query: &Query) -> Vec<(String, String)> {
        let mut params = Vec::with_capacity(query.len());
        for (key, value) in query {
            let rendered = match value {
                JsonValue::String(s) => s.clone(),
                other => other.to_string(),
            };
            params.push((key.clone(), rendered));
        }
        params
    }

    async fn send<T: DeserializeOwned>(
        &self,
        op: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T> {
        let start = Instant::now();
        let response = self.auth.apply_to_request(request).send().await?;
        let status = response.status();
        debug!(
            "[STORE_HTTP] {} response: status={} duration_ms={}",
            op,
            status,
            start.elapsed().as_millis()
        );

        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        let message = match serde_json::from_str::<StoreErrorBody>(&error_text) {
            Ok(body) => body.reason.or(body.error).unwrap_or(error_text),
            Err(_) => error_text,
        };
        warn!(
            "[STORE_HTTP] {} failed: status={} message=\"{}\"",
            op, status, message
        );
        Err(CouchLinkError::Server {
            status_code: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl DocumentStore for HttpStore {
    async fn insert(&self, doc: &Document, id: Option<&str>) -> Result<DocumentRef> {
        match id {
            Some(id) => {
                let url = format!("{}/{}", self.db_url(), id);
                debug!("[STORE_HTTP] PUT {}", url);
                self.send("insert", self.http_client.put(&url).json(doc)).await
            }
            None => {
                let url = self.db_url();
                debug!("[STORE_HTTP] POST {}", url);
                self.send("insert", self.http_client.post(&url).json(doc)).await
            }
        }
    }

    async fn destroy(&self, id: &str, rev: &str) -> Result<JsonValue> {
        let url = format!("{}/{}", self.db_url(), id);
        debug!("[STORE_HTTP] DELETE {} rev={}", url, rev);
        self.send(
            "destroy",
            self.http_client.delete(&url).query(&[("rev", rev)]),
        )
        .await
    }

    async fn find(&self, body: JsonValue) -> Result<FindResponse> {
        let url = format!("{}/_find", self.db_url());
        debug!("[STORE_HTTP] POST {}", url);
        self.send("find", self.http_client.post(&url).json(&body)).await
    }

    async fn view(&self, ddoc: &str, view: &str, query: &Query) -> Result<ViewResponse> {
        let url = format!("{}/_design/{}/_view/{}", self.db_url(), ddoc, view);
        debug!("[STORE_HTTP] GET {}", url);
        self.send(
            "view",
            self.http_client.get(&url).query(&Self::query_params(query)),
        )
        .await
    }

    async fn search(&self, ddoc: &str, index: &str, query: &Query) -> Result<SearchResponse> {
        let url = format!("{}/_design/{}/_search/{}", self.db_url(), ddoc, index);
        debug!("[STORE_HTTP] GET {}", url);
        self.send(
            "search",
            self.http_client.get(&url).query(&Self::query_params(query)),
        )
        .await
    }

    async fn view_with_list(
        &self,
        ddoc: &str,
        view: &str,
        list: &str,
        query: &Query,
    ) -> Result<JsonValue> {
        let url = format!("{}/_design/{}/_list/{}/{}", self.db_url(), ddoc, list, view);
        debug!("[STORE_HTTP] GET {}", url);
        self.send(
            "view_with_list",
            self.http_client.get(&url).query(&Self::query_params(query)),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_params_rendering() {
        let mut query = Query::new();
        query.insert("startkey".to_string(), json!("\"a\""));
        query.insert("limit".to_string(), json!(10));
        query.insert("include_docs".to_string(), json!(true));

        let params = HttpStore::query_params(&query);

        // String values pass through verbatim, others are JSON-encoded
        assert!(params.contains(&("startkey".to_string(), "\"a\"".to_string())));
        assert!(params.contains(&("limit".to_string(), "10".to_string())));
        assert!(params.contains(&("include_docs".to_string(), "true".to_string())));
    }

    #[test]
    fn test_store_error_body_parsing() {
        let body: StoreErrorBody =
            serde_json::from_str(r#"{"error":"conflict","reason":"Document update conflict."}"#)
                .unwrap();
        assert_eq!(body.reason.as_deref(), Some("Document update conflict."));
        assert_eq!(body.error.as_deref(), Some("conflict"));
    }
}
