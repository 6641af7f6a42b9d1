//! List operations within a board: create, update (rename/reorder) and delete.

use super::{Body, require};
use crate::client::{ApiRequest, KanApi};
use crate::error::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Operation selector for the `lists` tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ListOp {
    /// Add a list to a board.
    Create,
    /// Rename or move a list.
    Update,
    /// Delete a list.
    Delete,
}

impl ListOp {
    /// Lower-case name, as callers spell it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// Parameters of the `lists` tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListsParams {
    /// Operation to perform
    pub action: ListOp,
    /// List ID (required for update, delete)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_public_id: Option<String>,
    /// Board ID (required for create)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board_public_id: Option<String>,
    /// List name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(length(min = 1))]
    pub name: Option<String>,
    /// List position index (for reordering)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
}

/// A validated list operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListAction {
    /// `POST /lists`
    Create {
        /// Board to add the list to.
        board_public_id: String,
        /// List name.
        name: String,
    },
    /// `PUT /lists/:id`
    Update {
        /// List to change.
        list_public_id: String,
        /// New name.
        name: Option<String>,
        /// New position among the board's lists.
        index: Option<u32>,
    },
    /// `DELETE /lists/:id`
    Delete {
        /// List to delete.
        list_public_id: String,
    },
}

impl TryFrom<ListsParams> for ListAction {
    type Error = crate::Error;

    fn try_from(params: ListsParams) -> Result<Self> {
        let action = params.action.as_str();

        Ok(match params.action {
            ListOp::Create => Self::Create {
                board_public_id: require(params.board_public_id, "boardPublicId", action)?,
                name: require(params.name, "name", action)?,
            },
            ListOp::Update => Self::Update {
                list_public_id: require(params.list_public_id, "listPublicId", action)?,
                name: params.name,
                index: params.index,
            },
            ListOp::Delete => Self::Delete {
                list_public_id: require(params.list_public_id, "listPublicId", action)?,
            },
        })
    }
}

impl ListAction {
    /// The request this action maps to.
    #[must_use]
    pub fn into_request(self) -> ApiRequest {
        match self {
            Self::Create {
                board_public_id,
                name,
            } => ApiRequest::post(
                "/lists",
                Body::new()
                    .field("name", name)
                    .field("boardPublicId", board_public_id)
                    .build(),
            ),
            Self::Update {
                list_public_id,
                name,
                index,
            } => ApiRequest::put(
                format!("/lists/{list_public_id}"),
                Some(
                    Body::new()
                        .optional("name", name)
                        .optional("index", index)
                        .build(),
                ),
            ),
            Self::Delete { list_public_id } => ApiRequest::delete(format!("/lists/{list_public_id}")),
        }
    }
}

/// Execute a validated list action.
///
/// # Errors
///
/// Passes through transport and API errors from `api`.
pub async fn handle(api: &dyn KanApi, action: ListAction) -> Result<Value> {
    api.execute(action.into_request()).await
}

/// Validate `params` and execute the resulting action.
///
/// # Errors
///
/// Returns [`crate::Error::Validation`] without touching `api` when a
/// required field is missing; otherwise passes through errors from `api`.
pub async fn dispatch(api: &dyn KanApi, params: ListsParams) -> Result<Value> {
    handle(api, ListAction::try_from(params)?).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockApi;
    use rstest::rstest;
    use serde_json::json;

    fn params(value: Value) -> ListsParams {
        serde_json::from_value(value).expect("valid lists params")
    }

    fn request(value: Value) -> ApiRequest {
        ListAction::try_from(params(value))
            .expect("params should validate")
            .into_request()
    }

    #[test]
    fn create_posts_name_and_board() {
        let req = request(json!({"action": "create", "boardPublicId": "bd_1", "name": "Review"}));
        assert_eq!(
            req,
            ApiRequest::post("/lists", json!({"name": "Review", "boardPublicId": "bd_1"}))
        );
    }

    #[test]
    fn update_reorders_without_renaming() {
        let req = request(json!({"action": "update", "listPublicId": "ls_1", "index": 0}));
        assert_eq!(req, ApiRequest::put("/lists/ls_1", Some(json!({"index": 0}))));
    }

    #[test]
    fn update_renames_and_moves() {
        let req = request(json!({
            "action": "update",
            "listPublicId": "ls_1",
            "name": "Done",
            "index": 3
        }));
        assert_eq!(req.body, Some(json!({"name": "Done", "index": 3})));
    }

    #[test]
    fn delete_addresses_list_by_id() {
        let req = request(json!({"action": "delete", "listPublicId": "ls_1"}));
        assert_eq!(req, ApiRequest::delete("/lists/ls_1"));
    }

    #[rstest]
    #[case::create_without_board(json!({"action": "create", "name": "x"}), "boardPublicId required for create")]
    #[case::create_without_name(json!({"action": "create", "boardPublicId": "bd_1"}), "name required for create")]
    #[case::update(json!({"action": "update", "index": 1}), "listPublicId required for update")]
    #[case::delete(json!({"action": "delete", "boardPublicId": "bd_1"}), "listPublicId required for delete")]
    #[tokio::test]
    async fn missing_required_field_never_reaches_api(#[case] input: Value, #[case] message: &str) {
        let api = MockApi::new();
        let err = dispatch(&api, params(input)).await.unwrap_err();
        assert_eq!(err.to_string(), message);
        assert_eq!(api.call_count(), 0);
    }
}
