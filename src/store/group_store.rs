use std::collections::HashMap;

use rusqlite::{Connection, OptionalExtension};
use uuid::Uuid;

use super::note_store::note_exists;
use crate::db::{uuid_column, Database};
use crate::error::{StoreError, StoreResult};
use crate::models::{CreateGroupInput, Group, UpdateGroupInput};
use crate::validation::validate_group_name;

/// Create, read, update and delete groups and manage which notes belong to them.
///
/// Membership is stored on the note (`note.group_id`), so a note can only ever be in one
/// group. Attaching a note to a group moves it out of whatever group it was in before.
#[derive(Clone)]
pub struct GroupStore {
    db: Database,
}

impl GroupStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Read every group, or exactly the group with `id`.
    pub fn read(&self, id: Option<Uuid>) -> StoreResult<Vec<Group>> {
        tracing::debug!(?id, "Reading groups");
        self.db.unit_of_work(|tx| match id {
            Some(id) => {
                let group = load_group(tx, id)?.ok_or_else(|| StoreError::group_not_found(id))?;
                Ok(vec![group])
            }
            None => load_all_groups(tx),
        })
    }

    pub fn create(&self, input: CreateGroupInput) -> StoreResult<Group> {
        validate_group_name(&input.name)?;

        let group = self.db.unit_of_work(|tx| {
            let id = Uuid::new_v4();
            tx.execute(
                r#"INSERT INTO "group" (id, name) VALUES (?1, ?2)"#,
                (id.to_string(), &input.name),
            )?;
            attach_notes(tx, id, &input.note_ids)?;

            Ok(Group {
                id,
                name: input.name,
                note_ids: member_ids(tx, id)?,
            })
        })?;

        tracing::debug!(id = %group.id, members = group.note_ids.len(), "Created group");
        Ok(group)
    }

    /// Apply a partial update.
    ///
    /// When `input.note_ids` is present, every current member is detached first and the
    /// listed notes that exist become the new membership. A missing group is reported as
    /// [`StoreError::NotFound`] before the input is validated.
    pub fn update(&self, id: Uuid, input: UpdateGroupInput) -> StoreResult<Group> {
        self.db.unit_of_work(|tx| {
            if !group_exists(tx, id)? {
                return Err(StoreError::group_not_found(id));
            }
            if let Some(name) = &input.name {
                validate_group_name(name)?;
            }

            if let Some(name) = &input.name {
                tx.execute(
                    r#"UPDATE "group" SET name = ?1 WHERE id = ?2"#,
                    (name, id.to_string()),
                )?;
            }

            if let Some(note_ids) = &input.note_ids {
                let detached = detach_members(tx, id)?;
                let attached = attach_notes(tx, id, note_ids)?;
                tracing::debug!(%id, detached, attached, "Replaced group membership");
            }

            load_group(tx, id)?.ok_or_else(|| StoreError::group_not_found(id))
        })
    }

    /// Delete a group. Member notes are kept and left without a group.
    ///
    /// Returns `false` if the group does not exist.
    pub fn delete(&self, id: Uuid) -> StoreResult<bool> {
        self.db.unit_of_work(|tx| {
            if !group_exists(tx, id)? {
                return Ok(false);
            }

            let detached = detach_members(tx, id)?;
            tx.execute(r#"DELETE FROM "group" WHERE id = ?1"#, [id.to_string()])?;

            tracing::debug!(%id, detached, "Deleted group");
            Ok(true)
        })
    }
}

fn group_exists(conn: &Connection, id: Uuid) -> rusqlite::Result<bool> {
    conn.query_row(
        r#"SELECT 1 FROM "group" WHERE id = ?1"#,
        [id.to_string()],
        |_| Ok(()),
    )
    .optional()
    .map(|found| found.is_some())
}

fn load_group(conn: &Connection, id: Uuid) -> StoreResult<Option<Group>> {
    let name = conn
        .query_row(
            r#"SELECT name FROM "group" WHERE id = ?1"#,
            [id.to_string()],
            |row| row.get::<_, String>(0),
        )
        .optional()?;

    match name {
        Some(name) => Ok(Some(Group {
            id,
            name,
            note_ids: member_ids(conn, id)?,
        })),
        None => Ok(None),
    }
}

fn load_all_groups(conn: &Connection) -> StoreResult<Vec<Group>> {
    let mut stmt =
        conn.prepare("SELECT group_id, id FROM note WHERE group_id IS NOT NULL ORDER BY rowid")?;
    let mut members: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    let rows = stmt.query_map([], |row| Ok((uuid_column(row, 0)?, uuid_column(row, 1)?)))?;
    for row in rows {
        let (group_id, note_id) = row?;
        members.entry(group_id).or_default().push(note_id);
    }

    let mut stmt = conn.prepare(r#"SELECT id, name FROM "group" ORDER BY rowid"#)?;
    let groups = stmt
        .query_map([], |row| {
            let id = uuid_column(row, 0)?;
            Ok(Group {
                id,
                name: row.get(1)?,
                note_ids: members.remove(&id).unwrap_or_default(),
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(groups)
}

fn member_ids(conn: &Connection, group_id: Uuid) -> rusqlite::Result<Vec<Uuid>> {
    let mut stmt = conn.prepare("SELECT id FROM note WHERE group_id = ?1 ORDER BY rowid")?;
    let ids = stmt
        .query_map([group_id.to_string()], |row| uuid_column(row, 0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ids)
}

/// Point each existing note at `group_id`, skipping ids with no note behind them.
fn attach_notes(conn: &Connection, group_id: Uuid, note_ids: &[Uuid]) -> rusqlite::Result<usize> {
    let mut attached = 0;
    for &note_id in note_ids {
        if !note_exists(conn, note_id)? {
            tracing::debug!(%note_id, %group_id, "Skipping unknown note");
            continue;
        }
        attached += conn.execute(
            "UPDATE note SET group_id = ?1 WHERE id = ?2",
            (group_id.to_string(), note_id.to_string()),
        )?;
    }
    Ok(attached)
}

fn detach_members(conn: &Connection, group_id: Uuid) -> rusqlite::Result<usize> {
    conn.execute(
        "UPDATE note SET group_id = NULL WHERE group_id = ?1",
        [group_id.to_string()],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateNoteInput;
    use crate::store::NoteStore;

    fn setup() -> (Database, NoteStore, GroupStore) {
        let db = Database::open_memory().unwrap();
        db.migrate().unwrap();
        (db.clone(), NoteStore::new(db.clone()), GroupStore::new(db))
    }

    fn note(notes: &NoteStore, text: &str) -> Uuid {
        notes
            .create(CreateNoteInput {
                text: text.to_string(),
                tags: vec![],
            })
            .unwrap()
            .id
    }

    #[test]
    fn test_failed_update_keeps_previous_members() {
        let (db, notes, groups) = setup();
        let member = note(&notes, "member");
        let blocked = note(&notes, "boom");
        let group = groups
            .create(CreateGroupInput {
                name: "Home".to_string(),
                note_ids: vec![member],
            })
            .unwrap();

        // Fail the attach step, after the current members were already detached
        db.lock()
            .execute_batch(
                "CREATE TRIGGER fail_attach BEFORE UPDATE OF group_id ON note
                 WHEN NEW.group_id IS NOT NULL AND NEW.text = 'boom'
                 BEGIN SELECT RAISE(ABORT, 'attach failed'); END;",
            )
            .unwrap();

        let result = groups.update(
            group.id,
            UpdateGroupInput {
                name: Some("Renamed".to_string()),
                note_ids: Some(vec![blocked]),
            },
        );
        assert!(matches!(result, Err(StoreError::Database(_))));

        let stored = groups.read(Some(group.id)).unwrap().remove(0);
        assert_eq!(stored.name, "Home");
        assert_eq!(stored.note_ids, vec![member]);
        assert_eq!(
            notes.read(Some(member)).unwrap()[0].group_id,
            Some(group.id)
        );
    }
}
