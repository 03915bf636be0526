use rusqlite::{params, Row};

use super::SqliteStore;
use crate::entity::Upload;
use crate::error::Result;

fn row_to_upload(row: &Row<'_>) -> rusqlite::Result<Upload> {
    let kind: String = row.get(3)?;
    Ok(Upload {
        id: row.get(0)?,
        user_id: row.get(1)?,
        filename: row.get(2)?,
        kind: kind.parse().map_err(|e: String| {
            rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, e.into())
        })?,
        category: row.get(4)?,
        created_at: row.get(5)?,
    })
}

impl SqliteStore {
    /// Record an uploaded file and return its id
    pub fn add_upload(&self, upload: &Upload) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO uploads (user_id, filename, kind, category, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                upload.user_id,
                upload.filename,
                upload.kind.to_string(),
                upload.category,
                upload.created_at,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn list_uploads_for_user(&self, user_id: i64) -> Result<Vec<Upload>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, filename, kind, category, created_at
             FROM uploads WHERE user_id = ?1 ORDER BY id",
        )?;

        let uploads = stmt
            .query_map([user_id], row_to_upload)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(uploads)
    }

    /// True while an upload row or a note image still names `filename`
    pub fn media_in_use(&self, filename: &str) -> Result<bool> {
        let in_use: bool = self.conn.query_row(
            "SELECT EXISTS (SELECT 1 FROM uploads WHERE filename = ?1)
                 OR EXISTS (SELECT 1 FROM notes WHERE image_filename = ?1)",
            [filename],
            |row| row.get(0),
        )?;
        Ok(in_use)
    }

    pub fn count_uploads(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM uploads", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
