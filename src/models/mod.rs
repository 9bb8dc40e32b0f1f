//! Domain models for the notes service.
//!
//! # Ownership
//!
//! - [`Note`]: owns its [`Tag`]s. Tags never outlive their note and are never shared.
//! - [`Group`]: a named collection of notes. A note belongs to at most one group; deleting
//!   a group leaves its notes in place without a group.
//!
//! Every entity returned from a store is fully materialized: a note carries its tags and a
//! group carries the ids of its members.

mod group;
mod note;

pub use group::*;
pub use note::*;
