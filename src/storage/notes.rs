use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, OptionalExtension, Row};

use super::SqliteStore;
use crate::entity::{Note, NoteView, PublicFilter};
use crate::error::{NotedeckError, Result};

/// Update payload for a note
#[derive(Debug, Default)]
pub struct NoteUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_public: Option<bool>,
    pub topic: Option<Option<String>>, // Some(None) to clear, Some(Some(s)) to set
    pub image_filename: Option<Option<String>>,
}

const NOTE_COLUMNS: &str =
    "n.id, n.user_id, n.title, n.content, n.image_filename, n.topic, n.is_public, n.created_at";

const VIEW_SELECT: &str = "SELECT n.id, n.user_id, n.title, n.content, n.image_filename, n.topic,
        n.is_public, n.created_at, u.username,
        COALESCE((SELECT SUM(CASE v.vote_type WHEN 'up' THEN 1 ELSE -1 END)
                  FROM votes v WHERE v.note_id = n.id), 0) AS score
     FROM notes n
     JOIN users u ON u.id = n.user_id";

fn row_to_note(row: &Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        content: row.get(3)?,
        image_filename: row.get(4)?,
        topic: row.get(5)?,
        is_public: row.get(6)?,
        created_at: row.get(7)?,
    })
}

fn row_to_view(row: &Row<'_>) -> rusqlite::Result<NoteView> {
    Ok(NoteView {
        note: row_to_note(row)?,
        author: row.get(8)?,
        score: row.get(9)?,
    })
}

/// Build a LIKE pattern matching `text` anywhere, with wildcards escaped
fn like_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

impl SqliteStore {
    /// Insert a note and return its id
    pub fn add_note(&self, note: &Note) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO notes (user_id, title, content, image_filename, topic, is_public, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                note.user_id,
                note.title,
                note.content,
                note.image_filename,
                note.topic,
                note.is_public,
                note.created_at,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get_note(&self, id: i64) -> Result<Option<Note>> {
        let note = self
            .conn
            .query_row(
                &format!("SELECT {NOTE_COLUMNS} FROM notes n WHERE n.id = ?1"),
                [id],
                row_to_note,
            )
            .optional()?;
        Ok(note)
    }

    pub fn get_note_view(&self, id: i64) -> Result<Option<NoteView>> {
        let view = self
            .conn
            .query_row(&format!("{VIEW_SELECT} WHERE n.id = ?1"), [id], row_to_view)
            .optional()?;
        Ok(view)
    }

    pub fn list_notes_for_user(&self, user_id: i64) -> Result<Vec<NoteView>> {
        let mut stmt = self.conn.prepare(&format!(
            "{VIEW_SELECT} WHERE n.user_id = ?1 ORDER BY n.created_at DESC, n.id DESC"
        ))?;

        let notes = stmt
            .query_map([user_id], row_to_view)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(notes)
    }

    pub fn list_all_notes(&self) -> Result<Vec<NoteView>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{VIEW_SELECT} ORDER BY n.created_at DESC, n.id DESC"))?;

        let notes = stmt
            .query_map([], row_to_view)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(notes)
    }

    /// Public notes only, newest first, optionally narrowed by text and topic
    pub fn list_public_notes(&self, filter: &PublicFilter, limit: usize) -> Result<Vec<NoteView>> {
        let mut sql = format!("{VIEW_SELECT} WHERE n.is_public = 1");
        let mut values: Vec<Value> = Vec::new();

        if let Some(text) = filter.text.as_deref().filter(|t| !t.is_empty()) {
            // SQLite folds ASCII case only; fold the pattern in SQL as well.
            let pattern = like_pattern(text);
            sql.push_str(
                " AND (LOWER(n.title) LIKE LOWER(?) ESCAPE '\\' \
                 OR LOWER(n.content) LIKE LOWER(?) ESCAPE '\\')",
            );
            values.push(Value::Text(pattern.clone()));
            values.push(Value::Text(pattern));
        }

        if let Some(topic) = filter.topic.as_deref().filter(|t| !t.is_empty()) {
            sql.push_str(" AND n.topic = ?");
            values.push(Value::Text(topic.to_string()));
        }

        sql.push_str(" ORDER BY n.created_at DESC, n.id DESC LIMIT ?");
        values.push(Value::Integer(limit as i64));

        let mut stmt = self.conn.prepare(&sql)?;
        let notes = stmt
            .query_map(params_from_iter(values), row_to_view)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(notes)
    }

    pub fn count_notes(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM notes", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn update_note(&self, id: i64, updates: NoteUpdate) -> Result<()> {
        let mut note = self
            .get_note(id)?
            .ok_or_else(|| NotedeckError::NotFound(format!("Note {}", id)))?;

        if let Some(title) = updates.title {
            note.title = title;
        }
        if let Some(content) = updates.content {
            note.content = content;
        }
        if let Some(is_public) = updates.is_public {
            note.is_public = is_public;
        }
        if let Some(topic) = updates.topic {
            note.topic = topic;
        }
        if let Some(image_filename) = updates.image_filename {
            note.image_filename = image_filename;
        }

        self.conn.execute(
            "UPDATE notes SET title = ?1, content = ?2, is_public = ?3, topic = ?4, image_filename = ?5
             WHERE id = ?6",
            params![
                note.title,
                note.content,
                note.is_public,
                note.topic,
                note.image_filename,
                id,
            ],
        )?;

        Ok(())
    }

    /// Delete a note; its votes go with it
    pub fn delete_note(&self, id: i64) -> Result<bool> {
        let changed = self.conn.execute("DELETE FROM notes WHERE id = ?1", [id])?;
        Ok(changed > 0)
    }
}
