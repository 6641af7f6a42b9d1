//! Actions on a single card: comments, member assignment and label assignment.
//!
//! Members and labels are attached through toggle endpoints. `PUT` on
//! `/cards/:id/members/:memberId` (or `/labels/:labelId`) adds the member
//! when absent and removes it when present; the server decides. The `add` and
//! `remove` actions therefore issue the identical request and only document
//! the caller's intent. No membership state is tracked here.

use super::{Body, require};
use crate::client::{ApiRequest, KanApi};
use crate::error::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ========== Comments ==========

/// Operation selector for the `card_comments` tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CommentOp {
    /// Add a comment.
    Create,
    /// Edit a comment.
    Update,
    /// Delete a comment.
    Delete,
}

impl CommentOp {
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

/// Parameters of the `card_comments` tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CardCommentsParams {
    /// Operation to perform
    pub action: CommentOp,
    /// Card ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_public_id: Option<String>,
    /// Comment ID (required for update, delete)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_public_id: Option<String>,
    /// Comment text (required for create, update)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(length(min = 1))]
    pub comment: Option<String>,
}

/// A validated comment operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentAction {
    /// `POST /cards/:id/comments`
    Create {
        /// Card to comment on.
        card_public_id: String,
        /// Comment text.
        comment: String,
    },
    /// `PUT /cards/:id/comments/:commentId`
    Update {
        /// Card the comment belongs to.
        card_public_id: String,
        /// Comment to edit.
        comment_public_id: String,
        /// Replacement text.
        comment: String,
    },
    /// `DELETE /cards/:id/comments/:commentId`
    Delete {
        /// Card the comment belongs to.
        card_public_id: String,
        /// Comment to delete.
        comment_public_id: String,
    },
}

impl TryFrom<CardCommentsParams> for CommentAction {
    type Error = crate::Error;

    fn try_from(params: CardCommentsParams) -> Result<Self> {
        let action = params.action.as_str();
        let card_public_id = require(params.card_public_id, "cardPublicId", action)?;

        Ok(match params.action {
            CommentOp::Create => Self::Create {
                card_public_id,
                comment: require(params.comment, "comment", action)?,
            },
            CommentOp::Update => Self::Update {
                card_public_id,
                comment_public_id: require(params.comment_public_id, "commentPublicId", action)?,
                comment: require(params.comment, "comment", action)?,
            },
            CommentOp::Delete => Self::Delete {
                card_public_id,
                comment_public_id: require(params.comment_public_id, "commentPublicId", action)?,
            },
        })
    }
}

impl CommentAction {
    /// The request this action maps to.
    #[must_use]
    pub fn into_request(self) -> ApiRequest {
        match self {
            Self::Create {
                card_public_id,
                comment,
            } => ApiRequest::post(
                format!("/cards/{card_public_id}/comments"),
                Body::new().field("comment", comment).build(),
            ),
            Self::Update {
                card_public_id,
                comment_public_id,
                comment,
            } => ApiRequest::put(
                format!("/cards/{card_public_id}/comments/{comment_public_id}"),
                Some(Body::new().field("comment", comment).build()),
            ),
            Self::Delete {
                card_public_id,
                comment_public_id,
            } => ApiRequest::delete(format!(
                "/cards/{card_public_id}/comments/{comment_public_id}"
            )),
        }
    }
}

/// Execute a validated comment action.
///
/// # Errors
///
/// Passes through transport and API errors from `api`.
pub async fn handle_comment(api: &dyn KanApi, action: CommentAction) -> Result<Value> {
    api.execute(action.into_request()).await
}

/// Validate comment `params` and execute the resulting action.
///
/// # Errors
///
/// Returns [`crate::Error::Validation`] without touching `api` when a
/// required field is missing; otherwise passes through errors from `api`.
pub async fn dispatch_comment(api: &dyn KanApi, params: CardCommentsParams) -> Result<Value> {
    handle_comment(api, CommentAction::try_from(params)?).await
}

// ========== Toggles ==========

/// Caller intent for a member or label toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ToggleOp {
    /// Attach to the card.
    Add,
    /// Detach from the card.
    Remove,
}

impl ToggleOp {
    /// Lower-case name, as callers spell it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
        }
    }
}

/// Parameters of the `card_members` tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CardMembersParams {
    /// Whether to add or remove the member
    pub action: ToggleOp,
    /// Card ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_public_id: Option<String>,
    /// Workspace member ID to add or remove
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_member_public_id: Option<String>,
}

/// Parameters of the `card_labels` tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CardLabelsParams {
    /// Whether to add or remove the label
    pub action: ToggleOp,
    /// Card ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_public_id: Option<String>,
    /// Label ID to add or remove
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_public_id: Option<String>,
}

/// A validated member toggle: `PUT /cards/:id/members/:memberId`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberToggle {
    /// Caller intent; does not affect the request.
    pub op: ToggleOp,
    /// Card to change.
    pub card_public_id: String,
    /// Workspace member to toggle.
    pub workspace_member_public_id: String,
}

/// A validated label toggle: `PUT /cards/:id/labels/:labelId`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelToggle {
    /// Caller intent; does not affect the request.
    pub op: ToggleOp,
    /// Card to change.
    pub card_public_id: String,
    /// Label to toggle.
    pub label_public_id: String,
}

impl TryFrom<CardMembersParams> for MemberToggle {
    type Error = crate::Error;

    fn try_from(params: CardMembersParams) -> Result<Self> {
        let action = params.action.as_str();
        Ok(Self {
            op: params.action,
            card_public_id: require(params.card_public_id, "cardPublicId", action)?,
            workspace_member_public_id: require(
                params.workspace_member_public_id,
                "workspaceMemberPublicId",
                action,
            )?,
        })
    }
}

impl TryFrom<CardLabelsParams> for LabelToggle {
    type Error = crate::Error;

    fn try_from(params: CardLabelsParams) -> Result<Self> {
        let action = params.action.as_str();
        Ok(Self {
            op: params.action,
            card_public_id: require(params.card_public_id, "cardPublicId", action)?,
            label_public_id: require(params.label_public_id, "labelPublicId", action)?,
        })
    }
}

impl MemberToggle {
    /// The request this toggle maps to, identical for add and remove.
    #[must_use]
    pub fn into_request(self) -> ApiRequest {
        ApiRequest::put(
            format!(
                "/cards/{}/members/{}",
                self.card_public_id, self.workspace_member_public_id
            ),
            None,
        )
    }
}

impl LabelToggle {
    /// The request this toggle maps to, identical for add and remove.
    #[must_use]
    pub fn into_request(self) -> ApiRequest {
        ApiRequest::put(
            format!("/cards/{}/labels/{}", self.card_public_id, self.label_public_id),
            None,
        )
    }
}

/// Execute a validated member toggle.
///
/// # Errors
///
/// Passes through transport and API errors from `api`.
pub async fn handle_member(api: &dyn KanApi, toggle: MemberToggle) -> Result<Value> {
    api.execute(toggle.into_request()).await
}

/// Validate member `params` and execute the toggle.
///
/// # Errors
///
/// Returns [`crate::Error::Validation`] without touching `api` when a
/// required field is missing; otherwise passes through errors from `api`.
pub async fn dispatch_member(api: &dyn KanApi, params: CardMembersParams) -> Result<Value> {
    handle_member(api, MemberToggle::try_from(params)?).await
}

/// Execute a validated label toggle.
///
/// # Errors
///
/// Passes through transport and API errors from `api`.
pub async fn handle_label(api: &dyn KanApi, toggle: LabelToggle) -> Result<Value> {
    api.execute(toggle.into_request()).await
}

/// Validate label `params` and execute the toggle.
///
/// # Errors
///
/// Returns [`crate::Error::Validation`] without touching `api` when a
/// required field is missing; otherwise passes through errors from `api`.
pub async fn dispatch_label(api: &dyn KanApi, params: CardLabelsParams) -> Result<Value> {
    handle_label(api, LabelToggle::try_from(params)?).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockApi;
    use rstest::rstest;
    use serde_json::json;

    fn comment_request(value: Value) -> ApiRequest {
        let params: CardCommentsParams = serde_json::from_value(value).unwrap();
        CommentAction::try_from(params).unwrap().into_request()
    }

    #[test]
    fn comment_create_posts_text() {
        let req = comment_request(json!({
            "action": "create",
            "cardPublicId": "cd_1",
            "comment": "Looks good"
        }));
        assert_eq!(
            req,
            ApiRequest::post("/cards/cd_1/comments", json!({"comment": "Looks good"}))
        );
    }

    #[test]
    fn comment_update_puts_text() {
        let req = comment_request(json!({
            "action": "update",
            "cardPublicId": "cd_1",
            "commentPublicId": "cm_1",
            "comment": "Edited"
        }));
        assert_eq!(
            req,
            ApiRequest::put("/cards/cd_1/comments/cm_1", Some(json!({"comment": "Edited"})))
        );
    }

    #[test]
    fn comment_delete_addresses_comment() {
        let req = comment_request(json!({
            "action": "delete",
            "cardPublicId": "cd_1",
            "commentPublicId": "cm_1"
        }));
        assert_eq!(req, ApiRequest::delete("/cards/cd_1/comments/cm_1"));
    }

    #[rstest]
    #[case::create_without_card(json!({"action": "create", "comment": "x"}), "cardPublicId required for create")]
    #[case::delete_without_card(json!({"action": "delete", "commentPublicId": "cm_1"}), "cardPublicId required for delete")]
    #[case::create_without_comment(json!({"action": "create", "cardPublicId": "cd_1"}), "comment required for create")]
    #[case::update_without_id(
        json!({"action": "update", "cardPublicId": "cd_1", "comment": "x"}),
        "commentPublicId required for update"
    )]
    #[case::update_without_comment(
        json!({"action": "update", "cardPublicId": "cd_1", "commentPublicId": "cm_1"}),
        "comment required for update"
    )]
    #[case::delete_without_id(json!({"action": "delete", "cardPublicId": "cd_1"}), "commentPublicId required for delete")]
    #[tokio::test]
    async fn comment_missing_field_never_reaches_api(#[case] input: Value, #[case] message: &str) {
        let api = MockApi::new();
        let params: CardCommentsParams = serde_json::from_value(input).unwrap();
        let err = dispatch_comment(&api, params).await.unwrap_err();
        assert_eq!(err.to_string(), message);
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn member_add_and_remove_hit_the_same_endpoint() {
        let api = MockApi::new();
        for action in ["add", "remove"] {
            let params: CardMembersParams = serde_json::from_value(json!({
                "action": action,
                "cardPublicId": "cd_1",
                "workspaceMemberPublicId": "wm_1"
            }))
            .unwrap();
            dispatch_member(&api, params).await.unwrap();
        }

        let requests = api.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0], requests[1]);
        assert_eq!(requests[0], ApiRequest::put("/cards/cd_1/members/wm_1", None));
    }

    #[tokio::test]
    async fn label_add_and_remove_hit_the_same_endpoint() {
        let api = MockApi::new();
        for action in ["add", "remove"] {
            let params: CardLabelsParams = serde_json::from_value(json!({
                "action": action,
                "cardPublicId": "cd_1",
                "labelPublicId": "lb_1"
            }))
            .unwrap();
            dispatch_label(&api, params).await.unwrap();
        }

        let requests = api.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0], requests[1]);
        assert_eq!(requests[0], ApiRequest::put("/cards/cd_1/labels/lb_1", None));
    }

    #[rstest]
    #[case::member_without_card(json!({"action": "add", "workspaceMemberPublicId": "wm_1"}), "cardPublicId required for add")]
    #[case::member_without_member(json!({"action": "remove", "cardPublicId": "cd_1"}), "workspaceMemberPublicId required for remove")]
    #[tokio::test]
    async fn member_missing_field_never_reaches_api(#[case] input: Value, #[case] message: &str) {
        let api = MockApi::new();
        let params: CardMembersParams = serde_json::from_value(input).unwrap();
        let err = dispatch_member(&api, params).await.unwrap_err();
        assert_eq!(err.to_string(), message);
        assert_eq!(api.call_count(), 0);
    }

    #[rstest]
    #[case::label_without_card(json!({"action": "remove", "labelPublicId": "lb_1"}), "cardPublicId required for remove")]
    #[case::label_without_label(json!({"action": "add", "cardPublicId": "cd_1"}), "labelPublicId required for add")]
    #[tokio::test]
    async fn label_missing_field_never_reaches_api(#[case] input: Value, #[case] message: &str) {
        let api = MockApi::new();
        let params: CardLabelsParams = serde_json::from_value(input).unwrap();
        let err = dispatch_label(&api, params).await.unwrap_err();
        assert_eq!(err.to_string(), message);
        assert_eq!(api.call_count(), 0);
    }

    #[test]
    fn toggle_keeps_caller_intent() {
        let params: CardMembersParams = serde_json::from_value(json!({
            "action": "remove",
            "cardPublicId": "cd_1",
            "workspaceMemberPublicId": "wm_1"
        }))
        .unwrap();
        let toggle = MemberToggle::try_from(params).unwrap();
        assert_eq!(toggle.op, ToggleOp::Remove);
    }
}
