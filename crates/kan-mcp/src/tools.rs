//! MCP tool implementations.
//!
//! Each tool checks schema limits, hands its parameter bag to the matching
//! `kan` handler, and returns the API's JSON response untouched.

use crate::error::Result;
use crate::models::Constraints;
use kan::client::KanApi;
use kan::handlers::boards::{self, BoardsParams};
use kan::handlers::card_actions::{
    self, CardCommentsParams, CardLabelsParams, CardMembersParams,
};
use kan::handlers::cards::{self, CardsParams};
use kan::handlers::labels::{self, LabelsParams};
use kan::handlers::lists::{self, ListsParams};
use kan::handlers::workspaces::{self, WorkspacesParams};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Tool implementations for the Kan MCP server.
pub struct Tools {
    api: Arc<dyn KanApi>,
}

impl Tools {
    /// Create a new Tools instance backed by `api`.
    pub fn new(api: Arc<dyn KanApi>) -> Self {
        Self { api }
    }

    /// Manage workspaces.
    ///
    /// # Errors
    ///
    /// Returns an error if a schema limit is violated, a required field is
    /// missing, or the API call fails.
    pub async fn workspaces(&self, params: WorkspacesParams) -> Result<Value> {
        params.check()?;
        debug!(action = params.action.as_str(), "workspaces");
        Ok(workspaces::dispatch(self.api.as_ref(), params).await?)
    }

    /// Manage boards.
    ///
    /// # Errors
    ///
    /// Returns an error if a schema limit is violated, a required field is
    /// missing, or the API call fails.
    pub async fn boards(&self, params: BoardsParams) -> Result<Value> {
        params.check()?;
        debug!(action = params.action.as_str(), "boards");
        Ok(boards::dispatch(self.api.as_ref(), params).await?)
    }

    /// Manage lists.
    ///
    /// # Errors
    ///
    /// Returns an error if a schema limit is violated, a required field is
    /// missing, or the API call fails.
    pub async fn lists(&self, params: ListsParams) -> Result<Value> {
        params.check()?;
        debug!(action = params.action.as_str(), "lists");
        Ok(lists::dispatch(self.api.as_ref(), params).await?)
    }

    /// Manage cards.
    ///
    /// # Errors
    ///
    /// Returns an error if a schema limit is violated, a required field is
    /// missing, or the API call fails.
    pub async fn cards(&self, params: CardsParams) -> Result<Value> {
        params.check()?;
        debug!(action = params.action.as_str(), "cards");
        Ok(cards::dispatch(self.api.as_ref(), params).await?)
    }

    /// Manage board labels.
    ///
    /// # Errors
    ///
    /// Returns an error if a schema limit is violated, a required field is
    /// missing, or the API call fails.
    pub async fn labels(&self, params: LabelsParams) -> Result<Value> {
        params.check()?;
        debug!(action = params.action.as_str(), "labels");
        Ok(labels::dispatch(self.api.as_ref(), params).await?)
    }

    /// Manage comments on a card.
    ///
    /// # Errors
    ///
    /// Returns an error if a schema limit is violated, a required field is
    /// missing, or the API call fails.
    pub async fn card_comments(&self, params: CardCommentsParams) -> Result<Value> {
        params.check()?;
        debug!(action = params.action.as_str(), "card_comments");
        Ok(card_actions::dispatch_comment(self.api.as_ref(), params).await?)
    }

    /// Toggle a workspace member on a card.
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is missing or the API call fails.
    pub async fn card_members(&self, params: CardMembersParams) -> Result<Value> {
        params.check()?;
        debug!(action = params.action.as_str(), "card_members");
        Ok(card_actions::dispatch_member(self.api.as_ref(), params).await?)
    }

    /// Toggle a label on a card.
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is missing or the API call fails.
    pub async fn card_labels(&self, params: CardLabelsParams) -> Result<Value> {
        params.check()?;
        debug!(action = params.action.as_str(), "card_labels");
        Ok(card_actions::dispatch_label(self.api.as_ref(), params).await?)
    }
}

/// Render a tool result as the text block returned to the caller.
///
/// # Errors
///
/// Returns an error if `value` cannot be serialized.
pub fn render(value: &Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
