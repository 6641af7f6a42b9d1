//! Card operations: get, create, update (including moves between lists) and delete.

use super::{Body, require};
use crate::client::{ApiRequest, KanApi};
use crate::error::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Operation selector for the `cards` tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CardOp {
    /// Fetch one card.
    Get,
    /// Create a card in a list.
    Create,
    /// Edit, move or reorder a card.
    Update,
    /// Delete a card.
    Delete,
}

impl CardOp {
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

/// Where a new card is inserted in its list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CardPosition {
    /// Top of the list.
    Start,
    /// Bottom of the list.
    #[default]
    End,
}

impl CardPosition {
    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
        }
    }
}

impl From<CardPosition> for Value {
    fn from(position: CardPosition) -> Self {
        Self::String(position.as_str().to_string())
    }
}

/// Parameters of the `cards` tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CardsParams {
    /// Operation to perform
    pub action: CardOp,
    /// Card ID (required for get, update, delete)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_public_id: Option<String>,
    /// List ID (required for create; use in update to move card between lists)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_public_id: Option<String>,
    /// Card title (required for create)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(length(min = 1, max = 2000))]
    pub title: Option<String>,
    /// Card description (markdown supported)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(length(max = 10000))]
    pub description: Option<String>,
    /// Where to insert card in list (default: end)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<CardPosition>,
    /// Due date in ISO 8601 format e.g. 2026-03-15
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    /// Card position index within list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
}

/// Fields an update may change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardChanges {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// Destination list when moving the card.
    pub list_public_id: Option<String>,
    /// New position within its list.
    pub index: Option<u32>,
    /// New due date.
    pub due_date: Option<String>,
}

/// Contents of a new card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCard {
    /// List to create the card in.
    pub list_public_id: String,
    /// Card title.
    pub title: String,
    /// Markdown description, empty when not given.
    pub description: String,
    /// Insert position.
    pub position: CardPosition,
    /// Optional due date.
    pub due_date: Option<String>,
}

/// A validated card operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardAction {
    /// `GET /cards/:id`
    Get {
        /// Card to fetch.
        card_public_id: String,
    },
    /// `POST /cards`
    Create(NewCard),
    /// `PUT /cards/:id`
    Update {
        /// Card to change.
        card_public_id: String,
        /// Fields to change.
        changes: CardChanges,
    },
    /// `DELETE /cards/:id`
    Delete {
        /// Card to delete.
        card_public_id: String,
    },
}

impl TryFrom<CardsParams> for CardAction {
    type Error = crate::Error;

    fn try_from(params: CardsParams) -> Result<Self> {
        let action = params.action.as_str();
        let card = |value| require(value, "cardPublicId", action);

        Ok(match params.action {
            CardOp::Get => Self::Get {
                card_public_id: card(params.card_public_id)?,
            },
            CardOp::Create => Self::Create(NewCard {
                list_public_id: require(params.list_public_id, "listPublicId", action)?,
                title: require(params.title, "title", action)?,
                description: params.description.unwrap_or_default(),
                position: params.position.unwrap_or_default(),
                due_date: params.due_date,
            }),
            CardOp::Update => Self::Update {
                card_public_id: card(params.card_public_id)?,
                changes: CardChanges {
                    title: params.title,
                    description: params.description,
                    list_public_id: params.list_public_id,
                    index: params.index,
                    due_date: params.due_date,
                },
            },
            CardOp::Delete => Self::Delete {
                card_public_id: card(params.card_public_id)?,
            },
        })
    }
}

impl CardAction {
    /// The request this action maps to.
    #[must_use]
    pub fn into_request(self) -> ApiRequest {
        match self {
            Self::Get { card_public_id } => ApiRequest::get(format!("/cards/{card_public_id}")),
            Self::Create(card) => ApiRequest::post(
                "/cards",
                Body::new()
                    .field("title", card.title)
                    .field("listPublicId", card.list_public_id)
                    .field("description", card.description)
                    .field("position", card.position)
                    .field("labelPublicIds", Vec::<Value>::new())
                    .field("memberPublicIds", Vec::<Value>::new())
                    .optional("dueDate", card.due_date)
                    .build(),
            ),
            Self::Update {
                card_public_id,
                changes,
            } => ApiRequest::put(
                format!("/cards/{card_public_id}"),
                Some(
                    Body::new()
                        .optional("title", changes.title)
                        .optional("description", changes.description)
                        .optional("listPublicId", changes.list_public_id)
                        .optional("index", changes.index)
                        .optional("dueDate", changes.due_date)
                        .build(),
                ),
            ),
            Self::Delete { card_public_id } => ApiRequest::delete(format!("/cards/{card_public_id}")),
        }
    }
}

/// Execute a validated card action.
///
/// # Errors
///
/// Passes through transport and API errors from `api`.
pub async fn handle(api: &dyn KanApi, action: CardAction) -> Result<Value> {
    api.execute(action.into_request()).await
}

/// Validate `params` and execute the resulting action.
///
/// # Errors
///
/// Returns [`crate::Error::Validation`] without touching `api` when a
/// required field is missing; otherwise passes through errors from `api`.
pub async fn dispatch(api: &dyn KanApi, params: CardsParams) -> Result<Value> {
    handle(api, CardAction::try_from(params)?).await
}
