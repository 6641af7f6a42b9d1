//! Board operations: list, get, create, update and delete.

use super::{Body, require};
use crate::client::{ApiRequest, KanApi};
use crate::error::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lists a new board starts with unless the caller names its own.
pub const DEFAULT_LISTS: [&str; 3] = ["do", "doing", "done"];

/// Operation selector for the `boards` tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum BoardOp {
    /// List the boards of a workspace.
    List,
    /// Fetch one board.
    Get,
    /// Create a board in a workspace.
    Create,
    /// Change name, slug, visibility or favorite status.
    Update,
    /// Delete a board.
    Delete,
}

impl BoardOp {
    /// Lower-case name, as callers spell it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Get => "get",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// Who can see a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Anyone with the link.
    Public,
    /// Workspace members only.
    Private,
}

impl Visibility {
    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
        }
    }
}

impl From<Visibility> for Value {
    fn from(visibility: Visibility) -> Self {
        Self::String(visibility.as_str().to_string())
    }
}

/// Parameters of the `boards` tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BoardsParams {
    /// Operation to perform
    pub action: BoardOp,
    /// Workspace ID (required for list, create)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_public_id: Option<String>,
    /// Board ID (required for get, update, delete)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board_public_id: Option<String>,
    /// Board name (required for create)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(length(min = 1, max = 100))]
    pub name: Option<String>,
    /// Board slug (for update)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Board visibility (for update)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    /// Favorite status (for update)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,
    /// Initial list names (for create, default: do, doing, done)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lists: Option<Vec<String>>,
    /// Initial label names (for create, default: none)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
}

/// Fields an update may change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardChanges {
    /// New name.
    pub name: Option<String>,
    /// New slug.
    pub slug: Option<String>,
    /// New visibility.
    pub visibility: Option<Visibility>,
    /// New favorite flag.
    pub favorite: Option<bool>,
}

/// A validated board operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardAction {
    /// `GET /workspaces/:id/boards`
    List {
        /// Workspace whose boards to list.
        workspace_public_id: String,
    },
    /// `GET /boards/:id`
    Get {
        /// Board to fetch.
        board_public_id: String,
    },
    /// `POST /workspaces/:id/boards`
    Create {
        /// Workspace to create the board in.
        workspace_public_id: String,
        /// Board name.
        name: String,
        /// Initial lists, in order.
        lists: Vec<String>,
        /// Initial labels.
        labels: Vec<String>,
    },
    /// `PUT /boards/:id`
    Update {
        /// Board to change.
        board_public_id: String,
        /// Fields to change.
        changes: BoardChanges,
    },
    /// `DELETE /boards/:id`
    Delete {
        /// Board to delete.
        board_public_id: String,
    },
}

impl TryFrom<BoardsParams> for BoardAction {
    type Error = crate::Error;

    fn try_from(params: BoardsParams) -> Result<Self> {
        let action = params.action.as_str();
        let workspace = |value| require(value, "workspacePublicId", action);
        let board = |value| require(value, "boardPublicId", action);

        Ok(match params.action {
            BoardOp::List => Self::List {
                workspace_public_id: workspace(params.workspace_public_id)?,
            },
            BoardOp::Get => Self::Get {
                board_public_id: board(params.board_public_id)?,
            },
            BoardOp::Create => Self::Create {
                workspace_public_id: workspace(params.workspace_public_id)?,
                name: require(params.name, "name", action)?,
                lists: params
                    .lists
                    .unwrap_or_else(|| DEFAULT_LISTS.iter().map(ToString::to_string).collect()),
                labels: params.labels.unwrap_or_default(),
            },
            BoardOp::Update => Self::Update {
                board_public_id: board(params.board_public_id)?,
                changes: BoardChanges {
                    name: params.name,
                    slug: params.slug,
                    visibility: params.visibility,
                    favorite: params.favorite,
                },
            },
            BoardOp::Delete => Self::Delete {
                board_public_id: board(params.board_public_id)?,
            },
        })
    }
}

impl BoardAction {
    /// The request this action maps to.
    #[must_use]
    pub fn into_request(self) -> ApiRequest {
        match self {
            Self::List {
                workspace_public_id,
            } => ApiRequest::get(format!("/workspaces/{workspace_public_id}/boards")),
            Self::Get { board_public_id } => ApiRequest::get(format!("/boards/{board_public_id}")),
            Self::Create {
                workspace_public_id,
                name,
                lists,
                labels,
            } => ApiRequest::post(
                format!("/workspaces/{workspace_public_id}/boards"),
                Body::new()
                    .field("name", name)
                    .field("lists", lists)
                    .field("labels", labels)
                    .build(),
            ),
            Self::Update {
                board_public_id,
                changes,
            } => ApiRequest::put(
                format!("/boards/{board_public_id}"),
                Some(
                    Body::new()
                        .optional("name", changes.name)
                        .optional("slug", changes.slug)
                        .optional("visibility", changes.visibility)
                        .optional("favorite", changes.favorite)
                        .build(),
                ),
            ),
            Self::Delete { board_public_id } => {
                ApiRequest::delete(format!("/boards/{board_public_id}"))
            }
        }
    }
}

/// Execute a validated board action.
///
/// # Errors
///
/// Passes through transport and API errors from `api`.
pub async fn handle(api: &dyn KanApi, action: BoardAction) -> Result<Value> {
    api.execute(action.into_request()).await
}

/// Validate `params` and execute the resulting action.
///
/// # Errors
///
/// Returns [`crate::Error::Validation`] without touching `api` when a
/// required field is missing; otherwise passes through errors from `api`.
pub async fn dispatch(api: &dyn KanApi, params: BoardsParams) -> Result<Value> {
    handle(api, BoardAction::try_from(params)?).await
}
