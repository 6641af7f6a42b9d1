//! Workspace operations: list, get, create, update, delete and search.

use super::{Body, require};
use crate::client::{ApiRequest, KanApi};
use crate::error::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Operation selector for the `workspaces` tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum WorkspaceOp {
    /// List every workspace the key can see.
    List,
    /// Fetch one workspace.
    Get,
    /// Create a workspace.
    Create,
    /// Rename or re-describe a workspace.
    Update,
    /// Delete a workspace.
    Delete,
    /// Search boards and cards within a workspace.
    Search,
}

impl WorkspaceOp {
    /// Lower-case name, as callers spell it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Get => "get",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Search => "search",
        }
    }
}

/// Parameters of the `workspaces` tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkspacesParams {
    /// Operation to perform
    pub action: WorkspaceOp,
    /// Workspace ID (required for get, update, delete, search)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_public_id: Option<String>,
    /// Workspace name (required for create)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(length(min = 1, max = 64))]
    pub name: Option<String>,
    /// URL-safe workspace slug
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(length(min = 3, max = 64))]
    pub slug: Option<String>,
    /// Workspace description (for update)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Search query text (required for search)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(length(min = 1, max = 100))]
    pub query: Option<String>,
    /// Max search results (1-50)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1, max = 50))]
    pub limit: Option<u32>,
}

/// Fields an update may change. Absent fields are left untouched remotely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkspaceChanges {
    /// New name.
    pub name: Option<String>,
    /// New slug.
    pub slug: Option<String>,
    /// New description.
    pub description: Option<String>,
}

/// A validated workspace operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceAction {
    /// `GET /workspaces`
    List,
    /// `GET /workspaces/:id`
    Get {
        /// Workspace to fetch.
        workspace_public_id: String,
    },
    /// `POST /workspaces`
    Create {
        /// Workspace name.
        name: String,
        /// Optional slug.
        slug: Option<String>,
    },
    /// `PUT /workspaces/:id`
    Update {
        /// Workspace to change.
        workspace_public_id: String,
        /// Fields to change.
        changes: WorkspaceChanges,
    },
    /// `DELETE /workspaces/:id`
    Delete {
        /// Workspace to delete.
        workspace_public_id: String,
    },
    /// `GET /workspaces/:id/search?query=&limit=`
    Search {
        /// Workspace to search in.
        workspace_public_id: String,
        /// Search text.
        query: String,
        /// Result cap.
        limit: Option<u32>,
    },
}

impl TryFrom<WorkspacesParams> for WorkspaceAction {
    type Error = crate::Error;

    fn try_from(params: WorkspacesParams) -> Result<Self> {
        let action = params.action.as_str();
        let id = |value| require(value, "workspacePublicId", action);

        Ok(match params.action {
            WorkspaceOp::List => Self::List,
            WorkspaceOp::Get => Self::Get {
                workspace_public_id: id(params.workspace_public_id)?,
            },
            WorkspaceOp::Create => Self::Create {
                name: require(params.name, "name", action)?,
                slug: params.slug,
            },
            WorkspaceOp::Update => Self::Update {
                workspace_public_id: id(params.workspace_public_id)?,
                changes: WorkspaceChanges {
                    name: params.name,
                    slug: params.slug,
                    description: params.description,
                },
            },
            WorkspaceOp::Delete => Self::Delete {
                workspace_public_id: id(params.workspace_public_id)?,
            },
            WorkspaceOp::Search => Self::Search {
                workspace_public_id: id(params.workspace_public_id)?,
                query: require(params.query, "query", action)?,
                limit: params.limit,
            },
        })
    }
}

impl WorkspaceAction {
    /// The request this action maps to.
    #[must_use]
    pub fn into_request(self) -> ApiRequest {
        match self {
            Self::List => ApiRequest::get("/workspaces"),
            Self::Get {
                workspace_public_id,
            } => ApiRequest::get(format!("/workspaces/{workspace_public_id}")),
            Self::Create { name, slug } => ApiRequest::post(
                "/workspaces",
                Body::new()
                    .field("name", name)
                    .optional("slug", slug)
                    .build(),
            ),
            Self::Update {
                workspace_public_id,
                changes,
            } => ApiRequest::put(
                format!("/workspaces/{workspace_public_id}"),
                Some(
                    Body::new()
                        .optional("name", changes.name)
                        .optional("slug", changes.slug)
                        .optional("description", changes.description)
                        .build(),
                ),
            ),
            Self::Delete {
                workspace_public_id,
            } => ApiRequest::delete(format!("/workspaces/{workspace_public_id}")),
            Self::Search {
                workspace_public_id,
                query,
                limit,
            } => {
                let request = ApiRequest::get(format!("/workspaces/{workspace_public_id}/search"))
                    .with_query("query", query);
                match limit {
                    Some(limit) => request.with_query("limit", limit.to_string()),
                    None => request,
                }
            }
        }
    }
}

/// Execute a validated workspace action.
///
/// # Errors
///
/// Passes through transport and API errors from `api`.
pub async fn handle(api: &dyn KanApi, action: WorkspaceAction) -> Result<Value> {
    api.execute(action.into_request()).await
}

/// Validate `params` and execute the resulting action.
///
/// # Errors
///
/// Returns [`crate::Error::Validation`] without touching `api` when a
/// required field is missing; otherwise passes through errors from `api`.
pub async fn dispatch(api: &dyn KanApi, params: WorkspacesParams) -> Result<Value> {
    handle(api, WorkspaceAction::try_from(params)?).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{Method, MockApi};
    use rstest::rstest;
    use serde_json::json;

    fn params(value: Value) -> WorkspacesParams {
        serde_json::from_value(value).expect("valid workspaces params")
    }

    fn request(value: Value) -> ApiRequest {
        WorkspaceAction::try_from(params(value))
            .expect("params should validate")
            .into_request()
    }

    #[test]
    fn list_gets_all_workspaces() {
        let req = request(json!({"action": "list"}));
        assert_eq!(req, ApiRequest::get("/workspaces"));
    }

    #[test]
    fn get_addresses_workspace_by_id() {
        let req = request(json!({"action": "get", "workspacePublicId": "ws_1"}));
        assert_eq!(req, ApiRequest::get("/workspaces/ws_1"));
    }

    #[test]
    fn create_sends_name_only_when_slug_absent() {
        let req = request(json!({"action": "create", "name": "Acme"}));
        assert_eq!(req, ApiRequest::post("/workspaces", json!({"name": "Acme"})));
    }

    #[test]
    fn create_forwards_slug_when_present() {
        let req = request(json!({"action": "create", "name": "Acme", "slug": "acme"}));
        assert_eq!(req.body, Some(json!({"name": "Acme", "slug": "acme"})));
    }

    #[test]
    fn update_sends_only_supplied_fields() {
        let req = request(json!({
            "action": "update",
            "workspacePublicId": "ws_1",
            "description": ""
        }));
        assert_eq!(req.method, Method::Put);
        assert_eq!(req.path, "/workspaces/ws_1");
        assert_eq!(req.body, Some(json!({"description": ""})));
    }

    #[test]
    fn delete_addresses_workspace_by_id() {
        let req = request(json!({"action": "delete", "workspacePublicId": "ws_1"}));
        assert_eq!(req, ApiRequest::delete("/workspaces/ws_1"));
    }

    #[test]
    fn search_builds_query_string() {
        let req = request(json!({
            "action": "search",
            "workspacePublicId": "ws_1",
            "query": "login bug",
            "limit": 10
        }));
        assert_eq!(req.path, "/workspaces/ws_1/search");
        assert_eq!(
            req.query,
            vec![
                ("query".to_string(), "login bug".to_string()),
                ("limit".to_string(), "10".to_string())
            ]
        );
        assert_eq!(req.body, None);
    }

    #[test]
    fn search_omits_absent_limit() {
        let req = request(json!({"action": "search", "workspacePublicId": "ws_1", "query": "x"}));
        assert_eq!(req.query, vec![("query".to_string(), "x".to_string())]);
    }

    #[rstest]
    #[case::get(json!({"action": "get"}), "workspacePublicId required for get")]
    #[case::update(json!({"action": "update", "name": "x"}), "workspacePublicId required for update")]
    #[case::delete(json!({"action": "delete"}), "workspacePublicId required for delete")]
    #[case::create(json!({"action": "create", "slug": "acme"}), "name required for create")]
    #[case::create_empty_name(json!({"action": "create", "name": ""}), "name required for create")]
    #[case::search_without_workspace(json!({"action": "search", "query": "x"}), "workspacePublicId required for search")]
    #[case::search_without_query(json!({"action": "search", "workspacePublicId": "ws_1"}), "query required for search")]
    #[tokio::test]
    async fn missing_required_field_never_reaches_api(#[case] input: Value, #[case] message: &str) {
        let api = MockApi::new();
        let err = dispatch(&api, params(input)).await.unwrap_err();
        assert_eq!(err.to_string(), message);
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn list_returns_api_response_verbatim() {
        let api = MockApi::with_response(json!({"workspaces": []}));
        let value = dispatch(&api, params(json!({"action": "list"}))).await.unwrap();
        assert_eq!(value, json!({"workspaces": []}));
        assert_eq!(api.last_request(), Some(ApiRequest::get("/workspaces")));
    }

    #[tokio::test]
    async fn api_errors_pass_through() {
        let api = MockApi::failing_with(404, r#"{"message":"Not found"}"#);
        let err = dispatch(&api, params(json!({"action": "get", "workspacePublicId": "nope"})))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(404));
    }
}
