//! Authentication credentials for the remote store.
//!
//! CouchDB-style services accept HTTP Basic Auth (a Cloudant legacy API key
//! is just a generated username/password pair). The provider attaches the
//! appropriate Authorization header to outgoing requests; no credential
//! setup or session management happens at this layer.

/// Credentials applied to every store request.
///
/// # Examples
///
/// ```rust
/// use couch_link::AuthProvider;
///
/// // HTTP Basic Auth (also covers legacy API keys)
/// let auth = AuthProvider::basic_auth("alice".to_string(), "secret".to_string());
///
/// // No authentication (local development server)
/// let auth = AuthProvider::none();
/// ```
#[derive(Debug, Clone)]
pub enum AuthProvider {
    /// HTTP Basic Auth (username, password)
    BasicAuth(String, String),

    /// No authentication
    None,
}

impl AuthProvider {
    /// Create HTTP Basic Auth credentials.
    pub fn basic_auth(username: String, password: String) -> Self {
        Self::BasicAuth(username, password)
    }

    /// No authentication.
    pub fn none() -> Self {
        Self::None
    }

    /// Attach the Authorization header to an HTTP request builder.
    pub fn apply_to_request(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self {
            Self::BasicAuth(username, password) => request.basic_auth(username, Some(password)),
            Self::None => request,
        }
    }

    /// Check if credentials are configured.
    pub fn is_authenticated(&self) -> bool {
        !matches!(self, Self::None)
    }
}
