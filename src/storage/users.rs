use rusqlite::{params, OptionalExtension, Row};

use super::{is_constraint_violation, SqliteStore};
use crate::entity::{Theme, User};
use crate::error::{NotedeckError, Result};

const USER_COLUMNS: &str = "id, username, password_hash, is_admin, theme, avatar_url, bio";

fn row_to_user(row: &Row<'_>) -> rusqlite::Result<User> {
    let theme: String = row.get(4)?;
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        password_hash: row.get(2)?,
        is_admin: row.get(3)?,
        theme: theme.parse().unwrap_or_default(),
        avatar_url: row.get(5)?,
        bio: row.get(6)?,
    })
}

impl SqliteStore {
    /// Insert a user and return its id
    pub fn add_user(&self, user: &User) -> Result<i64> {
        let result = self.conn.execute(
            "INSERT INTO users (username, password_hash, is_admin, theme, avatar_url, bio)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                user.username,
                user.password_hash,
                user.is_admin,
                user.theme.to_string(),
                user.avatar_url,
                user.bio,
            ],
        );

        match result {
            Ok(_) => Ok(self.conn.last_insert_rowid()),
            Err(e) if is_constraint_violation(&e) => {
                Err(NotedeckError::UsernameTaken(user.username.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn get_user(&self, id: i64) -> Result<Option<User>> {
        let user = self
            .conn
            .query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
                [id],
                row_to_user,
            )
            .optional()?;
        Ok(user)
    }

    pub fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = self
            .conn
            .query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?1"),
                [username],
                row_to_user,
            )
            .optional()?;
        Ok(user)
    }

    pub fn list_users(&self) -> Result<Vec<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY id"))?;

        let users = stmt
            .query_map([], row_to_user)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(users)
    }

    pub fn count_users(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Rename a user and optionally replace the password hash
    pub fn update_user_credentials(
        &self,
        id: i64,
        username: &str,
        password_hash: Option<&str>,
    ) -> Result<()> {
        let result = match password_hash {
            Some(hash) => self.conn.execute(
                "UPDATE users SET username = ?1, password_hash = ?2 WHERE id = ?3",
                params![username, hash, id],
            ),
            None => self.conn.execute(
                "UPDATE users SET username = ?1 WHERE id = ?2",
                params![username, id],
            ),
        };

        match result {
            Ok(0) => Err(NotedeckError::NotFound(format!("User {}", id))),
            Ok(_) => Ok(()),
            Err(e) if is_constraint_violation(&e) => {
                Err(NotedeckError::UsernameTaken(username.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn set_theme(&self, id: i64, theme: Theme) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE users SET theme = ?1 WHERE id = ?2",
            params![theme.to_string(), id],
        )?;
        if changed == 0 {
            return Err(NotedeckError::NotFound(format!("User {}", id)));
        }
        Ok(())
    }

    /// Update profile fields; `None` leaves a field unchanged
    pub fn update_profile(&self, id: i64, avatar_url: Option<&str>, bio: Option<&str>) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE users SET avatar_url = COALESCE(?1, avatar_url), bio = COALESCE(?2, bio)
             WHERE id = ?3",
            params![avatar_url, bio, id],
        )?;
        if changed == 0 {
            return Err(NotedeckError::NotFound(format!("User {}", id)));
        }
        Ok(())
    }

    pub fn set_admin(&self, id: i64, is_admin: bool) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE users SET is_admin = ?1 WHERE id = ?2",
            params![is_admin, id],
        )?;
        if changed == 0 {
            return Err(NotedeckError::NotFound(format!("User {}", id)));
        }
        Ok(())
    }

    /// Delete a user and, through cascades, everything they own
    pub fn delete_user(&self, id: i64) -> Result<bool> {
        let changed = self.conn.execute("DELETE FROM users WHERE id = ?1", [id])?;
        Ok(changed > 0)
    }

    /// Create the seed admin account unless a user with that name exists.
    /// Returns true when an account was created.
    pub fn ensure_admin(&self, username: &str, password_hash: &str) -> Result<bool> {
        if self.find_user_by_username(username)?.is_some() {
            return Ok(false);
        }

        let mut admin = User::new(username.to_string(), password_hash.to_string());
        admin.is_admin = true;
        self.add_user(&admin)?;
        Ok(true)
    }
}
