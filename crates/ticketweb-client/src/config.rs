//! Client configuration.
//!
//! Built once at startup and passed explicitly to whatever builds requests.
//! Nothing is read from the environment or the token store here; the caller
//! resolves those and hands in plain values.

/// API root used when none is configured.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api/";

/// Connection settings for the remote API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root. Always ends with `/` so relative paths resolve beneath it.
    base_url: String,
    /// Bearer credential. `None` when logged out.
    token: Option<String>,
    /// OAuth2 application id for the password grant.
    pub client_id: Option<String>,
    /// OAuth2 application secret for the password grant.
    pub client_secret: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl ClientConfig {
    /// Configuration for the API rooted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self { base_url, token: None, client_id: None, client_secret: None }
    }

    /// Set the bearer credential. Empty strings count as no credential.
    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.set_token(token);
        self
    }

    /// Set the OAuth2 application credentials used by login.
    #[must_use]
    pub fn with_oauth_client(
        mut self,
        client_id: Option<String>,
        client_secret: Option<String>,
    ) -> Self {
        self.client_id = client_id;
        self.client_secret = client_secret;
        self
    }

    /// Replace the bearer credential. Empty strings count as no credential.
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token.filter(|t| !t.trim().is_empty());
    }

    /// API root, ending with `/`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Current bearer credential. `None` when logged out.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// `Authorization` header value. `None` when there is no credential.
    pub fn authorization(&self) -> Option<String> {
        self.token.as_ref().map(|token| format!("Bearer {token}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_trailing_slash() {
        let config = ClientConfig::new("http://localhost:8000/api");
        assert_eq!(config.base_url(), "http://localhost:8000/api/");
        assert_eq!(ClientConfig::default().base_url(), DEFAULT_API_URL);
    }

    #[test]
    fn empty_token_means_logged_out() {
        let config = ClientConfig::default().with_token(Some("  ".into()));
        assert_eq!(config.token(), None);
        assert_eq!(config.authorization(), None);
    }

    #[test]
    fn bearer_header_value() {
        let config = ClientConfig::default().with_token(Some("abc".into()));
        assert_eq!(config.authorization().as_deref(), Some("Bearer abc"));
    }
}
