//! Client and resource handlers for the Kan board REST API.
//!
//! This crate is the request/response bridge between structured tool calls
//! and the remote Kan service. It has two layers:
//!
//! - [`client`]: the transport. One authenticated HTTP round trip per call,
//!   JSON negotiation, optional request tracing and uniform error
//!   classification.
//! - [`handlers`]: one module per resource family. Each turns a flat
//!   parameter bag into a typed action, validates the fields that action
//!   requires and derives exactly one [`client::ApiRequest`] from it.
//!
//! The remote service owns all state. Nothing here caches, retries or
//! remembers anything between calls.
//!
//! # Example
//!
//! ```no_run
//! use kan::client::KanClient;
//! use kan::handlers::boards::{self, BoardAction};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> kan::Result<()> {
//!     let client = KanClient::new("kan_secret")?;
//!     let boards = boards::handle(
//!         &client,
//!         BoardAction::List { workspace_public_id: "ws_1".to_string() },
//!     )
//!     .await?;
//!     println!("{boards:#}");
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod error;
pub mod handlers;

pub use client::{ApiRequest, KanApi, KanClient, Method};
pub use config::KanConfig;
pub use error::{Error, Result};
