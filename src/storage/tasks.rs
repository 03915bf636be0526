use rusqlite::{params, OptionalExtension, Row};

use super::SqliteStore;
use crate::entity::Task;
use crate::error::{NotedeckError, Result};

/// Update payload for a task
#[derive(Debug, Default)]
pub struct TaskUpdate {
    pub description: Option<String>,
    pub category: Option<String>,
}

const TASK_COLUMNS: &str = "id, user_id, description, category, created_at";

fn row_to_task(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        user_id: row.get(1)?,
        description: row.get(2)?,
        category: row.get(3)?,
        created_at: row.get(4)?,
    })
}

impl SqliteStore {
    /// Insert a task and return its id
    pub fn add_task(&self, task: &Task) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO tasks (user_id, description, category, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![task.user_id, task.description, task.category, task.created_at],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get_task(&self, id: i64) -> Result<Option<Task>> {
        let task = self
            .conn
            .query_row(
                &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"),
                [id],
                row_to_task,
            )
            .optional()?;
        Ok(task)
    }

    pub fn list_tasks_for_user(&self, user_id: i64) -> Result<Vec<Task>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE user_id = ?1 ORDER BY id"
        ))?;

        let tasks = stmt
            .query_map([user_id], row_to_task)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(tasks)
    }

    pub fn list_all_tasks(&self) -> Result<Vec<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {TASK_COLUMNS} FROM tasks ORDER BY category, id"))?;

        let tasks = stmt
            .query_map([], row_to_task)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(tasks)
    }

    pub fn count_tasks(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM tasks", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn update_task(&self, id: i64, updates: TaskUpdate) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE tasks SET description = COALESCE(?1, description), category = COALESCE(?2, category)
             WHERE id = ?3",
            params![updates.description, updates.category, id],
        )?;
        if changed == 0 {
            return Err(NotedeckError::NotFound(format!("Task {}", id)));
        }
        Ok(())
    }

    pub fn delete_task(&self, id: i64) -> Result<bool> {
        let changed = self.conn.execute("DELETE FROM tasks WHERE id = ?1", [id])?;
        Ok(changed > 0)
    }

    /// Delete all of a user's tasks in one category, returning how many went
    pub fn delete_tasks_in_category(&self, user_id: i64, category: &str) -> Result<usize> {
        let changed = self.conn.execute(
            "DELETE FROM tasks WHERE user_id = ?1 AND category = ?2",
            params![user_id, category],
        )?;
        Ok(changed)
    }
}
