use super::{ApiRequest, KanApi};
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Mutex, PoisonError};

/// Recording implementation of [`KanApi`] for tests.
///
/// Every executed [`ApiRequest`] is stored, and each call is answered with
/// the reply chosen at construction (an empty JSON object by default). No network
/// traffic is generated.
///
/// ```rust,ignore
/// // [dev-dependencies]
/// // kan = { path = "...", features = ["test-util"] }
///
/// use kan::client::MockApi;
///
/// let api = MockApi::new();
/// kan::handlers::lists::dispatch(&api, params).await?;
/// assert_eq!(api.call_count(), 1);
/// ```
#[derive(Default)]
pub struct MockApi {
    requests: Mutex<Vec<ApiRequest>>,
    reply: Option<MockReply>,
}

#[derive(Clone)]
enum MockReply {
    Value(Value),
    Api { status: u16, body: String },
}

impl MockApi {
    /// A mock answering every call with `{}`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock answering every call with `value`.
    #[must_use]
    pub fn with_response(value: Value) -> Self {
        Self {
            reply: Some(MockReply::Value(value)),
            ..Self::default()
        }
    }

    /// A mock failing every call with an API error.
    #[must_use]
    pub fn failing_with(status: u16, body: impl Into<String>) -> Self {
        Self {
            reply: Some(MockReply::Api {
                status,
                body: body.into(),
            }),
            ..Self::default()
        }
    }

    /// Every request executed so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent request, if any.
    #[must_use]
    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests().pop()
    }

    /// Number of requests executed.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl KanApi for MockApi {
    async fn execute(&self, request: ApiRequest) -> Result<Value> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);

        match self.reply.clone() {
            None => Ok(Value::Object(serde_json::Map::new())),
            Some(MockReply::Value(value)) => Ok(value),
            Some(MockReply::Api { status, body }) => Err(Error::Api { status, body }),
        }
    }
}
