use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named collection of notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    /// Ids of member notes, in the order the notes were created.
    pub note_ids: Vec<Uuid>,
}

/// Input for creating a group.
///
/// Ids that do not resolve to an existing note are skipped. Notes already in another
/// group are moved into the new one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGroupInput {
    pub name: String,
    #[serde(default)]
    pub note_ids: Vec<Uuid>,
}

/// Input for updating a group. All fields are optional for partial updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateGroupInput {
    pub name: Option<String>,
    /// Replaces the full membership when present, including with an empty list.
    pub note_ids: Option<Vec<Uuid>>,
}
