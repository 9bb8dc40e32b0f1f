use std::collections::HashMap;

use rusqlite::{Connection, OptionalExtension};
use uuid::Uuid;

use crate::db::{optional_uuid_column, uuid_column, Database};
use crate::error::{StoreError, StoreResult};
use crate::models::{CreateNoteInput, Note, Tag, UpdateNoteInput};
use crate::validation::{validate_note_text, validate_tags};

/// Create, read, update and delete notes together with their tags.
#[derive(Clone)]
pub struct NoteStore {
    db: Database,
}

impl NoteStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Read every note, or exactly the note with `id`.
    ///
    /// Notes come back in creation order. An explicit id that matches nothing is
    /// [`StoreError::NotFound`].
    pub fn read(&self, id: Option<Uuid>) -> StoreResult<Vec<Note>> {
        tracing::debug!(?id, "Reading notes");
        self.db.unit_of_work(|tx| match id {
            Some(id) => {
                let note = load_note(tx, id)?.ok_or_else(|| StoreError::note_not_found(id))?;
                Ok(vec![note])
            }
            None => load_all_notes(tx),
        })
    }

    pub fn create(&self, input: CreateNoteInput) -> StoreResult<Note> {
        validate_note_text(&input.text)?;
        validate_tags(&input.tags)?;

        let note = self.db.unit_of_work(|tx| {
            let id = Uuid::new_v4();
            tx.execute(
                "INSERT INTO note (id, text) VALUES (?1, ?2)",
                (id.to_string(), &input.text),
            )?;
            let tags = insert_tags(tx, id, &input.tags)?;

            Ok(Note {
                id,
                text: input.text,
                group_id: None,
                tags,
            })
        })?;

        tracing::debug!(id = %note.id, tags = note.tags.len(), "Created note");
        Ok(note)
    }

    /// Apply a partial update.
    ///
    /// When `input.tags` is present every existing tag is deleted and replaced by fresh
    /// tags, even if the texts are unchanged.
    ///
    /// A missing note is reported as [`StoreError::NotFound`] before the input is validated.
    pub fn update(&self, id: Uuid, input: UpdateNoteInput) -> StoreResult<Note> {
        self.db.unit_of_work(|tx| {
            if !note_exists(tx, id)? {
                return Err(StoreError::note_not_found(id));
            }
            if let Some(text) = &input.text {
                validate_note_text(text)?;
            }
            if let Some(tags) = &input.tags {
                validate_tags(tags)?;
            }

            if let Some(text) = &input.text {
                tx.execute(
                    "UPDATE note SET text = ?1 WHERE id = ?2",
                    (text, id.to_string()),
                )?;
            }

            if let Some(tags) = &input.tags {
                delete_tags(tx, id)?;
                insert_tags(tx, id, tags)?;
            }

            tracing::debug!(
                %id,
                text_changed = input.text.is_some(),
                tags_replaced = input.tags.is_some(),
                "Updated note"
            );
            load_note(tx, id)?.ok_or_else(|| StoreError::note_not_found(id))
        })
    }

    /// Delete a note and all of its tags. Returns `false` if the note does not exist.
    pub fn delete(&self, id: Uuid) -> StoreResult<bool> {
        self.db.unit_of_work(|tx| {
            if !note_exists(tx, id)? {
                return Ok(false);
            }

            let tags = delete_tags(tx, id)?;
            tx.execute("DELETE FROM note WHERE id = ?1", [id.to_string()])?;

            tracing::debug!(%id, tags, "Deleted note");
            Ok(true)
        })
    }
}

pub(super) fn note_exists(conn: &Connection, id: Uuid) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT 1 FROM note WHERE id = ?1",
        [id.to_string()],
        |_| Ok(()),
    )
    .optional()
    .map(|found| found.is_some())
}

fn load_note(conn: &Connection, id: Uuid) -> StoreResult<Option<Note>> {
    let row = conn
        .query_row(
            "SELECT id, text, group_id FROM note WHERE id = ?1",
            [id.to_string()],
            |row| {
                Ok((
                    uuid_column(row, 0)?,
                    row.get::<_, String>(1)?,
                    optional_uuid_column(row, 2)?,
                ))
            },
        )
        .optional()?;

    let Some((id, text, group_id)) = row else {
        return Ok(None);
    };

    let mut stmt = conn.prepare("SELECT id, note_id, text FROM tag WHERE note_id = ?1 ORDER BY rowid")?;
    let tags = stmt
        .query_map([id.to_string()], tag_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(Note {
        id,
        text,
        group_id,
        tags,
    }))
}

fn load_all_notes(conn: &Connection) -> StoreResult<Vec<Note>> {
    let mut stmt = conn.prepare("SELECT id, note_id, text FROM tag ORDER BY rowid")?;
    let mut tags_by_note: HashMap<Uuid, Vec<Tag>> = HashMap::new();
    for tag in stmt.query_map([], tag_from_row)? {
        let tag = tag?;
        tags_by_note.entry(tag.note_id).or_default().push(tag);
    }

    let mut stmt = conn.prepare("SELECT id, text, group_id FROM note ORDER BY rowid")?;
    let notes = stmt
        .query_map([], |row| {
            let id = uuid_column(row, 0)?;
            Ok(Note {
                id,
                text: row.get(1)?,
                group_id: optional_uuid_column(row, 2)?,
                tags: tags_by_note.remove(&id).unwrap_or_default(),
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(notes)
}

fn tag_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Tag> {
    Ok(Tag {
        id: uuid_column(row, 0)?,
        note_id: uuid_column(row, 1)?,
        text: row.get(2)?,
    })
}

fn insert_tags(conn: &Connection, note_id: Uuid, texts: &[String]) -> rusqlite::Result<Vec<Tag>> {
    let mut stmt = conn.prepare("INSERT INTO tag (id, note_id, text) VALUES (?1, ?2, ?3)")?;
    let mut tags = Vec::with_capacity(texts.len());
    for text in texts {
        let id = Uuid::new_v4();
        stmt.execute((id.to_string(), note_id.to_string(), text))?;
        tags.push(Tag {
            id,
            note_id,
            text: text.clone(),
        });
    }
    Ok(tags)
}

fn delete_tags(conn: &Connection, note_id: Uuid) -> rusqlite::Result<usize> {
    conn.execute("DELETE FROM tag WHERE note_id = ?1", [note_id.to_string()])
}
