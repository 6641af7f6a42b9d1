//! Board label operations: get, create, update and delete.

use super::{Body, require};
use crate::client::{ApiRequest, KanApi};
use crate::error::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Operation selector for the `labels` tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum LabelOp {
    /// Fetch one label.
    Get,
    /// Create a label on a board.
    Create,
    /// Rename or recolour a label.
    Update,
    /// Delete a label.
    Delete,
}

impl LabelOp {
    /// Lower-case name, as callers spell it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// Parameters of the `labels` tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LabelsParams {
    /// Operation to perform
    pub action: LabelOp,
    /// Label ID (required for get, update, delete)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_public_id: Option<String>,
    /// Board ID (required for create)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board_public_id: Option<String>,
    /// Label name (required for create, 1-36 chars)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(length(min = 1, max = 36))]
    pub name: Option<String>,
    /// 7-char hex colour e.g. #ff0000 (required for create)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(regex(pattern = r"^#[0-9a-fA-F]{6}$"))]
    pub colour_code: Option<String>,
}

/// A validated label operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelAction {
    /// `GET /labels/:id`
    Get {
        /// Label to fetch.
        label_public_id: String,
    },
    /// `POST /labels`
    Create {
        /// Board the label belongs to.
        board_public_id: String,
        /// Label name.
        name: String,
        /// `#rrggbb` colour.
        colour_code: String,
    },
    /// `PUT /labels/:id`
    Update {
        /// Label to change.
        label_public_id: String,
        /// New name.
        name: Option<String>,
        /// New colour.
        colour_code: Option<String>,
    },
    /// `DELETE /labels/:id`
    Delete {
        /// Label to delete.
        label_public_id: String,
    },
}

impl TryFrom<LabelsParams> for LabelAction {
    type Error = crate::Error;

    fn try_from(params: LabelsParams) -> Result<Self> {
        let action = params.action.as_str();
        let label = |value| require(value, "labelPublicId", action);

        Ok(match params.action {
            LabelOp::Get => Self::Get {
                label_public_id: label(params.label_public_id)?,
            },
            LabelOp::Create => Self::Create {
                board_public_id: require(params.board_public_id, "boardPublicId", action)?,
                name: require(params.name, "name", action)?,
                colour_code: require(params.colour_code, "colourCode", action)?,
            },
            LabelOp::Update => Self::Update {
                label_public_id: label(params.label_public_id)?,
                name: params.name,
                colour_code: params.colour_code,
            },
            LabelOp::Delete => Self::Delete {
                label_public_id: label(params.label_public_id)?,
            },
        })
    }
}

impl LabelAction {
    /// The request this action maps to.
    #[must_use]
    pub fn into_request(self) -> ApiRequest {
        match self {
            Self::Get { label_public_id } => ApiRequest::get(format!("/labels/{label_public_id}")),
            Self::Create {
                board_public_id,
                name,
                colour_code,
            } => ApiRequest::post(
                "/labels",
                Body::new()
                    .field("name", name)
                    .field("boardPublicId", board_public_id)
                    .field("colourCode", colour_code)
                    .build(),
            ),
            Self::Update {
                label_public_id,
                name,
                colour_code,
            } => ApiRequest::put(
                format!("/labels/{label_public_id}"),
                Some(
                    Body::new()
                        .optional("name", name)
                        .optional("colourCode", colour_code)
                        .build(),
                ),
            ),
            Self::Delete { label_public_id } => {
                ApiRequest::delete(format!("/labels/{label_public_id}"))
            }
        }
    }
}

/// Execute a validated label action.
///
/// # Errors
///
/// Passes through transport and API errors from `api`.
pub async fn handle(api: &dyn KanApi, action: LabelAction) -> Result<Value> {
    api.execute(action.into_request()).await
}

/// Validate `params` and execute the resulting action.
///
/// # Errors
///
/// Returns [`crate::Error::Validation`] without touching `api` when a
/// required field is missing; otherwise passes through errors from `api`.
pub async fn dispatch(api: &dyn KanApi, params: LabelsParams) -> Result<Value> {
    handle(api, LabelAction::try_from(params)?).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockApi;
    use rstest::rstest;
    use serde_json::json;

    fn params(value: Value) -> LabelsParams {
        serde_json::from_value(value).expect("valid labels params")
    }

    fn request(value: Value) -> ApiRequest {
        LabelAction::try_from(params(value))
            .expect("params should validate")
            .into_request()
    }

    #[test]
    fn get_addresses_label_by_id() {
        let req = request(json!({"action": "get", "labelPublicId": "lb_1"}));
        assert_eq!(req, ApiRequest::get("/labels/lb_1"));
    }

    #[test]
    fn create_posts_name_board_and_colour() {
        let req = request(json!({
            "action": "create",
            "boardPublicId": "bd_1",
            "name": "Bug",
            "colourCode": "#ff0000"
        }));
        assert_eq!(
            req,
            ApiRequest::post(
                "/labels",
                json!({"name": "Bug", "boardPublicId": "bd_1", "colourCode": "#ff0000"})
            )
        );
    }

    #[test]
    fn update_recolours_only() {
        let req = request(json!({
            "action": "update",
            "labelPublicId": "lb_1",
            "colourCode": "#00ff00"
        }));
        assert_eq!(
            req,
            ApiRequest::put("/labels/lb_1", Some(json!({"colourCode": "#00ff00"})))
        );
    }

    #[test]
    fn delete_addresses_label_by_id() {
        let req = request(json!({"action": "delete", "labelPublicId": "lb_1"}));
        assert_eq!(req, ApiRequest::delete("/labels/lb_1"));
    }

    #[rstest]
    #[case::get(json!({"action": "get"}), "labelPublicId required for get")]
    #[case::update(json!({"action": "update", "name": "x"}), "labelPublicId required for update")]
    #[case::delete(json!({"action": "delete"}), "labelPublicId required for delete")]
    #[case::create_without_board(
        json!({"action": "create", "name": "Bug", "colourCode": "#ff0000"}),
        "boardPublicId required for create"
    )]
    #[case::create_without_name(
        json!({"action": "create", "boardPublicId": "bd_1", "colourCode": "#ff0000"}),
        "name required for create"
    )]
    #[case::create_without_colour(
        json!({"action": "create", "boardPublicId": "bd_1", "name": "Bug"}),
        "colourCode required for create"
    )]
    #[tokio::test]
    async fn missing_required_field_never_reaches_api(#[case] input: Value, #[case] message: &str) {
        let api = MockApi::new();
        let err = dispatch(&api, params(input)).await.unwrap_err();
        assert_eq!(err.to_string(), message);
        assert_eq!(api.call_count(), 0);
    }
}
