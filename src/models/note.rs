use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A short text note with its tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub text: String,
    /// The group this note belongs to, if any.
    pub group_id: Option<Uuid>,
    /// Tags in the order they were attached.
    pub tags: Vec<Tag>,
}

impl Note {
    /// Tag texts in attachment order.
    pub fn tag_texts(&self) -> Vec<&str> {
        self.tags.iter().map(|t| t.text.as_str()).collect()
    }
}

/// A free-text label owned by exactly one note.
///
/// Tags have no identity beyond their note: replacing a note's tags deletes the old rows
/// and creates new ones with fresh ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    pub note_id: Uuid,
    pub text: String,
}

/// Input for creating a note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNoteInput {
    pub text: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Input for updating a note. `None` leaves a field untouched.
///
/// `tags: Some(vec![])` is not the same as `tags: None`: the former removes every tag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateNoteInput {
    pub text: Option<String>,
    pub tags: Option<Vec<String>>,
}
