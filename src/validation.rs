//! Input validation for notes, tags and groups.
//!
//! Lengths are counted in characters. The schema CHECK constraints test emptiness with
//! `<> ''` rather than `length()`, because SQLite's `length()` stops at the first NUL and
//! would reject text these validators accept. Its upper bounds can only undercount, so
//! anything that passes here also passes the schema.

use crate::error::{StoreError, StoreResult};

pub const MAX_NOTE_TEXT_LENGTH: usize = 1000;
pub const MAX_TAG_TEXT_LENGTH: usize = 30;
pub const MAX_GROUP_NAME_LENGTH: usize = 100;

/// Note text must be non-empty and at most [`MAX_NOTE_TEXT_LENGTH`] characters.
pub fn validate_note_text(text: &str) -> StoreResult<()> {
    validate_required(text, "text", MAX_NOTE_TEXT_LENGTH)
}

/// Tag text may be empty but no longer than [`MAX_TAG_TEXT_LENGTH`] characters.
pub fn validate_tags(tags: &[String]) -> StoreResult<()> {
    for tag in tags {
        let len = tag.chars().count();
        if len > MAX_TAG_TEXT_LENGTH {
            return Err(StoreError::validation(
                "tags",
                format!(
                    "tag '{}' is {} characters, maximum is {}",
                    tag, len, MAX_TAG_TEXT_LENGTH
                ),
            ));
        }
    }
    Ok(())
}

/// Group names are required and at most [`MAX_GROUP_NAME_LENGTH`] characters.
pub fn validate_group_name(name: &str) -> StoreResult<()> {
    validate_required(name, "name", MAX_GROUP_NAME_LENGTH)
}

fn validate_required(value: &str, field: &'static str, max: usize) -> StoreResult<()> {
    if value.is_empty() {
        return Err(StoreError::validation(field, "must not be empty"));
    }
    let len = value.chars().count();
    if len > max {
        return Err(StoreError::validation(
            field,
            format!("{} characters exceeds maximum of {}", len, max),
        ));
    }
    Ok(())
}
