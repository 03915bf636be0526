use rusqlite::{params, OptionalExtension};

use super::SqliteStore;
use crate::entity::{VoteDirection, VoteOutcome};
use crate::error::{NotedeckError, Result};

impl SqliteStore {
    /// Current vote of `user_id` on `note_id`, if any
    pub fn get_vote(&self, user_id: i64, note_id: i64) -> Result<Option<VoteDirection>> {
        let vote: Option<String> = self
            .conn
            .query_row(
                "SELECT vote_type FROM votes WHERE user_id = ?1 AND note_id = ?2",
                params![user_id, note_id],
                |row| row.get(0),
            )
            .optional()?;

        vote.map(|v| v.parse().map_err(NotedeckError::Storage))
            .transpose()
    }

    /// Apply a vote toggle.
    ///
    /// No vote stores `direction`; the same direction again removes the vote;
    /// the opposite direction flips it. The read and the write share one
    /// transaction.
    pub fn toggle_vote(
        &self,
        user_id: i64,
        note_id: i64,
        direction: VoteDirection,
    ) -> Result<VoteOutcome> {
        let tx = self.conn.unchecked_transaction()?;

        let existing: Option<String> = tx
            .query_row(
                "SELECT vote_type FROM votes WHERE user_id = ?1 AND note_id = ?2",
                params![user_id, note_id],
                |row| row.get(0),
            )
            .optional()?;

        let outcome = match existing.as_deref() {
            None => {
                tx.execute(
                    "INSERT INTO votes (user_id, note_id, vote_type) VALUES (?1, ?2, ?3)",
                    params![user_id, note_id, direction.as_str()],
                )?;
                VoteOutcome::Added
            }
            Some(current) if current == direction.as_str() => {
                tx.execute(
                    "DELETE FROM votes WHERE user_id = ?1 AND note_id = ?2",
                    params![user_id, note_id],
                )?;
                VoteOutcome::Removed
            }
            Some(_) => {
                tx.execute(
                    "UPDATE votes SET vote_type = ?1 WHERE user_id = ?2 AND note_id = ?3",
                    params![direction.as_str(), user_id, note_id],
                )?;
                VoteOutcome::Switched
            }
        };

        tx.commit()?;
        Ok(outcome)
    }

    /// Up votes minus down votes
    pub fn note_score(&self, note_id: i64) -> Result<i64> {
        let score: i64 = self.conn.query_row(
            "SELECT COALESCE(SUM(CASE vote_type WHEN 'up' THEN 1 ELSE -1 END), 0)
             FROM votes WHERE note_id = ?1",
            [note_id],
            |row| row.get(0),
        )?;
        Ok(score)
    }
}
