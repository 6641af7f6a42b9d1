//! Request tracing.
//!
//! Every call gets a sequence number so the dispatch and completion lines of
//! one request can be paired when calls interleave. Lines are emitted as
//! `tracing` debug events under [`TRACE_TARGET`], and only when the owning
//! client was built with debugging enabled.

use super::Method;
use serde_json::Value;
use std::time::Instant;
use tracing::debug;

/// Target of all request trace events.
pub const TRACE_TARGET: &str = "kan::trace";

/// Longest string logged verbatim.
pub const MAX_LOG_CHARS: usize = 1000;

/// Cut `value` to `max` characters, noting how many were dropped.
#[must_use]
pub fn truncate_for_log(value: &str, max: usize) -> String {
    match value.char_indices().nth(max) {
        None => value.to_string(),
        Some((cut, _)) => {
            let omitted = value[cut..].chars().count();
            format!("{}... [truncated {omitted} chars]", &value[..cut])
        }
    }
}

/// Render an optional JSON value for a log line.
///
/// Strings are logged raw, everything else as compact JSON, and an absent
/// value as `undefined`. Serialization failures become a placeholder.
#[must_use]
pub fn to_log_string(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(Value::String(s)) => truncate_for_log(s, MAX_LOG_CHARS),
        Some(other) => loggable(other),
    }
}

/// Render any serializable value for a log line.
#[must_use]
pub fn loggable<T: serde::Serialize + ?Sized>(value: &T) -> String {
    match serde_json::to_string(value) {
        Ok(json) => truncate_for_log(&json, MAX_LOG_CHARS),
        Err(e) => format!("[unserializable: {e}]"),
    }
}

/// Lifecycle of one traced request.
pub(crate) struct RequestTrace<'a> {
    id: u64,
    method: Method,
    url: &'a str,
    started: Instant,
    enabled: bool,
}

impl<'a> RequestTrace<'a> {
    pub(crate) fn start(id: u64, method: Method, url: &'a str, enabled: bool) -> Self {
        Self {
            id,
            method,
            url,
            started: Instant::now(),
            enabled,
        }
    }

    fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    pub(crate) fn dispatched(&self, body: Option<&Value>) {
        if !self.enabled {
            return;
        }
        debug!(
            target: TRACE_TARGET,
            request_id = self.id,
            method = %self.method,
            url = self.url,
            body = %to_log_string(body),
            "-> {} {}", self.method, self.url
        );
    }

    pub(crate) fn failed(&self, error: &reqwest::Error) {
        if !self.enabled {
            return;
        }
        debug!(
            target: TRACE_TARGET,
            request_id = self.id,
            method = %self.method,
            url = self.url,
            duration_ms = self.elapsed_ms(),
            error = %error,
            "xx {} {} transport failure", self.method, self.url
        );
    }

    pub(crate) fn completed(&self, status: u16, content_type: Option<&str>) {
        if !self.enabled {
            return;
        }
        debug!(
            target: TRACE_TARGET,
            request_id = self.id,
            method = %self.method,
            url = self.url,
            status,
            duration_ms = self.elapsed_ms(),
            content_type = content_type.unwrap_or("none"),
            "<- {} {}", self.method, self.url
        );
    }

    pub(crate) fn error_body(&self, body: &str) {
        if !self.enabled {
            return;
        }
        debug!(
            target: TRACE_TARGET,
            request_id = self.id,
            error_body = %truncate_for_log(body, MAX_LOG_CHARS),
            "!! error response"
        );
    }

    pub(crate) fn non_json(&self) {
        if !self.enabled {
            return;
        }
        debug!(target: TRACE_TARGET, request_id = self.id, "<- non-JSON response");
    }

    pub(crate) fn response_body(&self, body: &Value) {
        if !self.enabled {
            return;
        }
        debug!(
            target: TRACE_TARGET,
            request_id = self.id,
            response_body = %loggable(body),
            "<- response body"
        );
    }
}
