//! Schema-layer constraints for tool parameters.
//!
//! The handlers in `kan` only check that required fields are present. Length
//! limits, numeric ranges and formats belong to the tool schemas and are
//! enforced here, before a parameter bag reaches its handler.

use crate::error::{Error, Result};
use kan::handlers::boards::BoardsParams;
use kan::handlers::card_actions::{CardCommentsParams, CardLabelsParams, CardMembersParams};
use kan::handlers::cards::CardsParams;
use kan::handlers::labels::LabelsParams;
use kan::handlers::lists::ListsParams;
use kan::handlers::workspaces::WorkspacesParams;

/// Parameters with limits beyond "field present".
pub trait Constraints {
    /// Check every supplied field against its schema limits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for the first violation found.
    fn check(&self) -> Result<()>;
}

/// Check a string's length in characters, when present.
fn check_length(
    field: &'static str,
    value: Option<&str>,
    min: usize,
    max: Option<usize>,
    valid_values: &'static str,
) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    let len = value.chars().count();
    if len < min || max.is_some_and(|max| len > max) {
        return Err(Error::InvalidArgument {
            field,
            value: value.to_string(),
            valid_values,
        });
    }
    Ok(())
}

/// True for `#` followed by exactly six hex digits.
#[must_use]
pub fn is_hex_colour(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

impl Constraints for WorkspacesParams {
    fn check(&self) -> Result<()> {
        check_length("name", self.name.as_deref(), 1, Some(64), "1-64 characters")?;
        check_length("slug", self.slug.as_deref(), 3, Some(64), "3-64 characters")?;
        check_length("query", self.query.as_deref(), 1, Some(100), "1-100 characters")?;
        if let Some(limit) = self.limit
            && !(1..=50).contains(&limit)
        {
            return Err(Error::InvalidArgument {
                field: "limit",
                value: limit.to_string(),
                valid_values: "1-50",
            });
        }
        Ok(())
    }
}

impl Constraints for BoardsParams {
    fn check(&self) -> Result<()> {
        check_length("name", self.name.as_deref(), 1, Some(100), "1-100 characters")
    }
}

impl Constraints for ListsParams {
    fn check(&self) -> Result<()> {
        check_length("name", self.name.as_deref(), 1, None, "at least 1 character")
    }
}

impl Constraints for CardsParams {
    fn check(&self) -> Result<()> {
        check_length("title", self.title.as_deref(), 1, Some(2000), "1-2000 characters")?;
        check_length(
            "description",
            self.description.as_deref(),
            0,
            Some(10_000),
            "at most 10000 characters",
        )
    }
}

impl Constraints for LabelsParams {
    fn check(&self) -> Result<()> {
        check_length("name", self.name.as_deref(), 1, Some(36), "1-36 characters")?;
        if let Some(colour) = &self.colour_code
            && !is_hex_colour(colour)
        {
            return Err(Error::InvalidArgument {
                field: "colourCode",
                value: colour.clone(),
                valid_values: "'#' followed by 6 hex digits, e.g. #ff0000",
            });
        }
        Ok(())
    }
}

impl Constraints for CardCommentsParams {
    fn check(&self) -> Result<()> {
        check_length("comment", self.comment.as_deref(), 1, None, "at least 1 character")
    }
}

impl Constraints for CardMembersParams {
    fn check(&self) -> Result<()> {
        Ok(())
    }
}

impl Constraints for CardLabelsParams {
    fn check(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde::de::DeserializeOwned;
    use serde_json::{Value, json};

    fn parse<T: DeserializeOwned>(value: Value) -> T {
        serde_json::from_value(value).expect("valid params")
    }

    #[rstest]
    #[case::lower("#ff0000", true)]
    #[case::upper("#ABCDEF", true)]
    #[case::mixed("#a1B2c3", true)]
    #[case::no_hash("ff0000", false)]
    #[case::short("#fff", false)]
    #[case::long("#ff00000", false)]
    #[case::non_hex("#gg0000", false)]
    #[case::empty("", false)]
    fn test_is_hex_colour(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(is_hex_colour(input), expected);
    }

    #[rstest]
    #[case::zero(0, false)]
    #[case::one(1, true)]
    #[case::fifty(50, true)]
    #[case::fifty_one(51, false)]
    fn workspace_search_limit_bounds(#[case] limit: u32, #[case] ok: bool) {
        let params: WorkspacesParams = parse(json!({
            "action": "search",
            "workspacePublicId": "ws_1",
            "query": "x",
            "limit": limit
        }));
        assert_eq!(params.check().is_ok(), ok);
    }

    #[test]
    fn workspace_slug_too_short() {
        let params: WorkspacesParams = parse(json!({"action": "create", "name": "A", "slug": "ab"}));
        let err = params.check().unwrap_err();
        assert_eq!(err.to_string(), "Invalid slug: 'ab'. Valid values: 3-64 characters");
    }

    #[test]
    fn absent_fields_are_not_checked() {
        let params: WorkspacesParams = parse(json!({"action": "list"}));
        assert!(params.check().is_ok());
    }

    #[test]
    fn board_name_limit() {
        let params: BoardsParams = parse(json!({"action": "update", "name": "x".repeat(101)}));
        assert!(params.check().is_err());
        let params: BoardsParams = parse(json!({"action": "update", "name": "x".repeat(100)}));
        assert!(params.check().is_ok());
    }

    #[test]
    fn card_description_may_be_empty_but_bounded() {
        let params: CardsParams = parse(json!({"action": "update", "description": ""}));
        assert!(params.check().is_ok());
        let params: CardsParams = parse(json!({"action": "update", "description": "d".repeat(10_001)}));
        assert!(params.check().is_err());
    }

    #[test]
    fn card_title_counts_characters() {
        let params: CardsParams = parse(json!({"action": "update", "title": "é".repeat(2000)}));
        assert!(params.check().is_ok());
    }

    #[test]
    fn label_colour_is_validated() {
        let params: LabelsParams = parse(json!({"action": "update", "colourCode": "red"}));
        let err = params.check().unwrap_err();
        assert!(err.to_string().contains("colourCode"));
    }

    #[test]
    fn label_name_limit() {
        let params: LabelsParams = parse(json!({"action": "update", "name": "n".repeat(37)}));
        assert!(params.check().is_err());
    }

    #[test]
    fn empty_comment_is_rejected() {
        let params: CardCommentsParams = parse(json!({"action": "create", "cardPublicId": "cd_1", "comment": ""}));
        assert!(params.check().is_err());
    }

    #[test]
    fn empty_list_name_is_rejected() {
        let params: ListsParams = parse(json!({"action": "update", "listPublicId": "ls_1", "name": ""}));
        assert!(params.check().is_err());
    }
}
