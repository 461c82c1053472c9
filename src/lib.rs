//! Thin async client façade over CouchDB/Cloudant-style document stores.
//!
//! Normalizes CRUD mutations, server-side view/search/list queries, and
//! bounded-retry semantics into a small uniform API:
//!
//! - mutations (`create`/`update`/`delete`) are re-issued with the same
//!   payload up to 5 times on failure, with the store's last error
//!   surfacing unmodified once the budget is exhausted;
//! - reads (`view`/`search`/`view_list`) all return the same
//!   [`ResultEnvelope`] shape regardless of which query mechanism
//!   produced them.
//!
//! The remote store is reached through the [`DocumentStore`] trait;
//! [`store::HttpStore`] is the bundled reqwest-backed implementation.
//!
//! ```rust,no_run
//! use couch_link::CouchLinkClient;
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = CouchLinkClient::builder()
//!     .base_url("http://localhost:5984")
//!     .database("inventory")
//!     .build()?;
//!
//! let doc_ref = client.create(json!({"sku": "A-100"})).await?;
//! let envelope = client.view("catalog", "by_sku", None).await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod store;

mod lookup;
mod normalize;
mod retry;

pub use auth::AuthProvider;
pub use client::{CouchLinkClient, CouchLinkClientBuilder};
pub use error::{CouchLinkError, Result};
pub use models::{Document, DocumentRef, Query, ResultEnvelope};
pub use store::DocumentStore;
