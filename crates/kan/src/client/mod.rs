//! HTTP transport for the Kan REST API.
//!
//! [`KanClient`] performs one authenticated round trip per call and
//! classifies the outcome:
//!
//! - no response, or a body cut off mid-read: [`Error::Transport`], passed
//!   through unchanged
//! - non-2xx status: [`Error::Api`] carrying the status and raw body
//! - 2xx without a JSON content type: the marker `{"success": true}`
//! - 2xx JSON: the parsed body, whatever shape the service returned
//!
//! Handlers talk to the transport through the [`KanApi`] trait so they can
//! be exercised against [`MockApi`] in tests.

mod trace;

#[cfg(any(test, feature = "test-util"))]
mod mock;

#[cfg(any(test, feature = "test-util"))]
pub use mock::MockApi;
pub use trace::{MAX_LOG_CHARS, TRACE_TARGET, loggable, to_log_string, truncate_for_log};

use crate::config::{self, KanConfig};
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use serde_json::{Value, json};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use trace::RequestTrace;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// HTTP methods used by the Kan API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

impl Method {
    /// Upper-case method name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
            Method::Delete => Self::DELETE,
        }
    }
}

/// One request to the Kan API, built by a handler and consumed by the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Path below the base URL, starting with `/`.
    pub path: String,
    /// Query parameters, form-urlencoded onto the URL in order.
    pub query: Vec<(String, String)>,
    /// JSON body. `None` sends no body and no content type.
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Build a request without query or body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// `GET path`
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// `POST path` with a JSON body.
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Post, path).with_body(body)
    }

    /// `PUT path`, body optional.
    pub fn put(path: impl Into<String>, body: Option<Value>) -> Self {
        Self {
            body,
            ..Self::new(Method::Put, path)
        }
    }

    /// `DELETE path`
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Attach a JSON body.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Append a query parameter.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

/// Executes requests against the Kan API.
///
/// Implementations must be `Send + Sync`; one instance is shared by every
/// tool invocation.
#[async_trait]
pub trait KanApi: Send + Sync {
    /// Perform one round trip and return the classified response.
    ///
    /// # Errors
    ///
    /// [`Error::Transport`] when no complete response arrives, [`Error::Api`] for a
    /// non-success status, [`Error::Json`] for an undecodable JSON body.
    async fn execute(&self, request: ApiRequest) -> Result<Value>;

    /// `GET path`
    ///
    /// # Errors
    ///
    /// See [`KanApi::execute`].
    async fn get(&self, path: &str) -> Result<Value> {
        self.execute(ApiRequest::get(path)).await
    }

    /// `POST path` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`KanApi::execute`].
    async fn post(&self, path: &str, body: Value) -> Result<Value> {
        self.execute(ApiRequest::post(path, body)).await
    }

    /// `PUT path` with an optional JSON body.
    ///
    /// # Errors
    ///
    /// See [`KanApi::execute`].
    async fn put(&self, path: &str, body: Option<Value>) -> Result<Value> {
        self.execute(ApiRequest::put(path, body)).await
    }

    /// `DELETE path`
    ///
    /// # Errors
    ///
    /// See [`KanApi::execute`].
    async fn delete(&self, path: &str) -> Result<Value> {
        self.execute(ApiRequest::delete(path)).await
    }
}

/// Authenticated HTTP client for the Kan API.
pub struct KanClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    debug: bool,
    last_request_id: AtomicU64,
}

impl KanClient {
    /// Create a client for the default base URL.
    ///
    /// The debug flag is read from `KAN_DEBUG` here, once.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if the HTTP client cannot be initialised.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::from_config(&KanConfig::new(api_key).with_debug(config::debug_enabled_from_env()))
    }

    /// Create a client from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if the HTTP client cannot be initialised.
    pub fn from_config(config: &KanConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("kan-mcp/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            debug: config.debug,
            last_request_id: AtomicU64::new(0),
        })
    }

    /// Base URL every path is appended to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether request tracing is on.
    #[must_use]
    pub fn debug_enabled(&self) -> bool {
        self.debug
    }

    fn next_request_id(&self) -> u64 {
        self.last_request_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn url_for(&self, request: &ApiRequest) -> Result<Url> {
        let raw = format!("{}{}", self.base_url, request.path);
        let mut url = Url::parse(&raw).map_err(|e| Error::InvalidUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }
        Ok(url)
    }
}

#[async_trait]
impl KanApi for KanClient {
    async fn execute(&self, request: ApiRequest) -> Result<Value> {
        let url = self.url_for(&request)?;
        let url_text = url.as_str().to_string();
        let trace = RequestTrace::start(
            self.next_request_id(),
            request.method,
            &url_text,
            self.debug,
        );
        trace.dispatched(request.body.as_ref());

        let mut builder = self
            .http
            .request(request.method.into(), url)
            .header(API_KEY_HEADER, &self.api_key);
        if let Some(body) = &request.body {
            // Sets Content-Type: application/json.
            builder = builder.json(body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                trace.failed(&e);
                return Err(Error::Transport(e));
            }
        };

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        trace.completed(status.as_u16(), content_type.as_deref());

        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    trace.failed(&e);
                    return Err(Error::Transport(e));
                }
            };
            trace.error_body(&body);
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        if !content_type.is_some_and(|ct| ct.contains("application/json")) {
            trace.non_json();
            return Ok(json!({ "success": true }));
        }

        let bytes = response.bytes().await?;
        let value: Value = serde_json::from_slice(&bytes)?;
        trace.response_body(&value);
        Ok(value)
    }
}
