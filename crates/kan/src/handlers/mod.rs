//! Resource handlers.
//!
//! One module per resource family. Each exposes the same three layers:
//!
//! 1. a flat `*Params` bag, the shape tool callers send (an `action`
//!    discriminator plus every field any action might use);
//! 2. a typed `*Action` enum whose variants carry only their action's
//!    fields, obtained from the bag with `TryFrom`, which is where missing
//!    required fields are reported;
//! 3. `into_request`, deriving the single [`ApiRequest`] for an action, and
//!    `handle` / `dispatch`, which send it through a [`KanApi`].
//!
//! Handlers hold no state and never call each other.
//!
//! [`ApiRequest`]: crate::client::ApiRequest
//! [`KanApi`]: crate::client::KanApi

pub mod boards;
pub mod card_actions;
pub mod cards;
pub mod labels;
pub mod lists;
pub mod workspaces;

use crate::error::{Error, Result};
use serde_json::{Map, Value};

/// Take a required string field, rejecting absent and empty values.
pub(crate) fn require(
    value: Option<String>,
    field: &'static str,
    action: &'static str,
) -> Result<String> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(Error::Validation { field, action })
}

/// JSON object builder that only writes fields the caller supplied.
#[derive(Debug, Default)]
pub(crate) struct Body(Map<String, Value>);

impl Body {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    /// Present values are written as-is, including `false` and `""`.
    pub(crate) fn optional(self, key: &str, value: Option<impl Into<Value>>) -> Self {
        match value {
            Some(value) => self.field(key, value),
            None => self,
        }
    }

    pub(crate) fn build(self) -> Value {
        Value::Object(self.0)
    }
}
