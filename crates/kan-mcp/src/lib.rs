//! MCP server for Kan boards.
//!
//! This crate exposes the Kan REST API to AI assistants as MCP
//! (Model Context Protocol) tools. Each tool takes an `action` plus the
//! fields that action needs, and returns the API's JSON response as
//! pretty-printed text.
//!
//! # Architecture
//!
//! The server uses the `rmcp` crate for MCP protocol handling over stdio and
//! delegates every call to the resource handlers of the `kan` crate, which
//! validate parameters and issue exactly one HTTP request.
//!
//! # Tools
//!
//! - `workspaces` - list, get, create, update, delete, search
//! - `boards` - list, get, create, update, delete
//! - `lists` - create, update, delete
//! - `cards` - get, create, update, delete
//! - `labels` - get, create, update, delete
//! - `card_comments` - create, update, delete
//! - `card_members` - add, remove (server-side toggle)
//! - `card_labels` - add, remove (server-side toggle)

pub mod error;
pub mod logging;
pub mod models;
pub mod server;
pub mod tools;

pub use error::{Error, Result};
pub use server::KanMcpServer;
