//! HTTP transport abstraction.
//!
//! The [`Transport`] trait decouples the endpoint directory from a specific
//! HTTP stack. [`HttpTransport`] is the production implementation on
//! `reqwest`; tests substitute a recording transport.

use std::future::Future;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use url::Url;

use crate::{ClientConfig, ClientError, HttpRequest, Method};

/// Executes request descriptors against the remote API.
///
/// One call is one outgoing request: implementations must not retry,
/// deduplicate or cache. There is no deadline; a pending call resolves
/// whenever the underlying stack resolves it.
pub trait Transport: Send + Sync {
    /// Send the request and return the decoded JSON body.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Transport`] if no response arrived
    /// - [`ClientError::Status`] if the server answered with a non-2xx status
    /// - [`ClientError::Decode`] if the body was not JSON
    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<Value, ClientError>> + Send;
}

/// `reqwest`-backed transport rooted at the configured API URL.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    /// Transport for the API root in `config`.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let base_url = Url::parse(config.base_url())?;
        let http = reqwest::Client::builder().build()?;
        Ok(Self { http, base_url })
    }

    /// API root requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Join `path` onto the API root.
    ///
    /// Dot segments, encoded or not, would let a path parameter climb out of
    /// its segment during the join, so they are refused.
    fn resolve(&self, path: &str) -> Result<Url, ClientError> {
        if path.split('/').any(is_dot_segment) {
            return Err(ClientError::InvalidUrl { reason: format!("dot segment in `{path}`") });
        }
        Ok(self.base_url.join(path)?)
    }

    fn headers(request: &HttpRequest) -> Result<HeaderMap, ClientError> {
        let mut headers = HeaderMap::with_capacity(request.headers.len());
        for (name, value) in &request.headers {
            let invalid = || ClientError::InvalidHeader { name: name.clone() };
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
            let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
            headers.insert(header_name, header_value);
        }
        Ok(headers)
    }
}

impl Transport for HttpTransport {
    async fn execute(&self, request: HttpRequest) -> Result<Value, ClientError> {
        let url = self.resolve(&request.path)?;
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
        };

        let mut builder =
            self.http.request(method, url).headers(Self::headers(&request)?).query(&request.query);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode { reason: e.to_string() })
    }
}

fn is_dot_segment(segment: &str) -> bool {
    matches!(
        segment.to_ascii_lowercase().as_str(),
        "." | ".." | "%2e" | ".%2e" | "%2e." | "%2e%2e"
    )
}
