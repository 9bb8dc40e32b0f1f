//! Transactional stores for notes and groups.
//!
//! Each public operation runs in exactly one [`Database::unit_of_work`] and returns fully
//! materialized entities. Relationship wiring that an ORM would hide lives here explicitly:
//! deleting a note removes its tags, and deleting a group first clears `note.group_id` on
//! its members.
//!
//! [`Database::unit_of_work`]: crate::db::Database

mod group_store;
mod note_store;

pub use group_store::GroupStore;
pub use note_store::NoteStore;
