//! MCP server implementation.
//!
//! This module contains the main server setup using rmcp.

use crate::tools::{Tools, render};
use kan::client::KanApi;
use kan::handlers::boards::BoardsParams;
use kan::handlers::card_actions::{CardCommentsParams, CardLabelsParams, CardMembersParams};
use kan::handlers::cards::CardsParams;
use kan::handlers::labels::LabelsParams;
use kan::handlers::lists::ListsParams;
use kan::handlers::workspaces::WorkspacesParams;
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::transport::stdio;
use rmcp::{
    ErrorData as McpError, ServiceExt, handler::server::ServerHandler, tool, tool_handler,
    tool_router,
};
use serde_json::Value;
use std::sync::Arc;

/// The Kan MCP server.
///
/// Provides MCP protocol handling over stdio transport.
#[derive(Clone)]
pub struct KanMcpServer {
    /// Tool implementations.
    tools: Arc<Tools>,
    /// Tool router for MCP dispatch.
    tool_router: ToolRouter<Self>,
}

/// Wrap a tool outcome in an MCP result.
fn respond(result: crate::Result<Value>) -> Result<CallToolResult, McpError> {
    match result.and_then(|value| render(&value)) {
        Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
        Err(e) => Err(e.into()),
    }
}

#[tool_router]
impl KanMcpServer {
    /// Manage workspaces.
    #[tool(
        description = "Manage Kan workspaces: list all, get one, create, update, delete, or search boards/cards within a workspace."
    )]
    async fn workspaces(
        &self,
        Parameters(params): Parameters<WorkspacesParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.tools.workspaces(params).await)
    }

    /// Manage boards.
    #[tool(
        description = "Manage Kan boards: list workspace boards, get, create (with initial lists), update (name/slug/visibility/favorite), or delete."
    )]
    async fn boards(
        &self,
        Parameters(params): Parameters<BoardsParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.tools.boards(params).await)
    }

    /// Manage lists.
    #[tool(description = "Manage Kan lists within a board: create, rename/reorder (update), or delete.")]
    async fn lists(
        &self,
        Parameters(params): Parameters<ListsParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.tools.lists(params).await)
    }

    /// Manage cards.
    #[tool(
        description = "Manage Kan cards: get, create (in a list), update (title/description/list/position/due date), or delete."
    )]
    async fn cards(
        &self,
        Parameters(params): Parameters<CardsParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.tools.cards(params).await)
    }

    /// Manage labels.
    #[tool(description = "Manage Kan labels on a board: get, create (with hex colour), update, or delete.")]
    async fn labels(
        &self,
        Parameters(params): Parameters<LabelsParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.tools.labels(params).await)
    }

    /// Manage card comments.
    #[tool(description = "Add, edit, or delete comments on a Kan card.")]
    async fn card_comments(
        &self,
        Parameters(params): Parameters<CardCommentsParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.tools.card_comments(params).await)
    }

    /// Toggle card members.
    #[tool(
        description = "Add or remove a workspace member from a card. NOTE: The Kan API uses a single PUT toggle endpoint for both operations; 'action' is semantic only and both call the same endpoint. The API adds the member if not assigned, or removes them if they are."
    )]
    async fn card_members(
        &self,
        Parameters(params): Parameters<CardMembersParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.tools.card_members(params).await)
    }

    /// Toggle card labels.
    #[tool(
        description = "Add or remove a label from a card. NOTE: The Kan API uses a single PUT toggle endpoint for both operations; 'action' is semantic only and both call the same endpoint. The API adds the label if not applied, or removes it if it is."
    )]
    async fn card_labels(
        &self,
        Parameters(params): Parameters<CardLabelsParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.tools.card_labels(params).await)
    }
}

impl KanMcpServer {
    /// Create a new Kan MCP server backed by `api`.
    #[must_use]
    pub fn new(api: Arc<dyn KanApi>) -> Self {
        Self {
            tools: Arc::new(Tools::new(api)),
            tool_router: Self::tool_router(),
        }
    }

    /// Get a reference to the tools.
    #[must_use]
    pub fn tools(&self) -> &Arc<Tools> {
        &self.tools
    }

    /// Serve MCP over stdin/stdout until the client disconnects.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport fails to initialize or terminates abnormally.
    pub async fn run(self) -> anyhow::Result<()> {
        let service = self.serve(stdio()).await.inspect_err(|e| {
            tracing::error!(error = %e, "MCP serve error");
        })?;

        let quit_reason = service.waiting().await?;
        tracing::info!(reason = ?quit_reason, "kan-mcp server stopped");
        Ok(())
    }
}

#[tool_handler]
impl ServerHandler for KanMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "kan".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Kan MCP server for boards, lists, cards and labels. Every tool takes an 'action' \
                 plus the IDs that action needs; start with workspaces/list to discover IDs. \
                 card_members and card_labels toggle: the API decides add vs remove."
                    .into(),
            ),
        }
    }
}
