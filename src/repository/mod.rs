mod embedded;
#[cfg(test)]
pub mod memory;
mod postgres;

pub use postgres::Repository;

use async_trait::async_trait;

use crate::models::Note;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] tokio_postgres::Error),

    #[error("migration error: {0}")]
    Migration(#[from] refinery::Error),
}

/// CRUD over the `notes` table.
///
/// Ids are assigned by the store, strictly increasing and never handed out
/// twice, even after the note that held them is deleted.
#[async_trait]
pub trait NoteStore: Send + Sync {
    async fn create_note(&self, content: String) -> Result<Note, StoreError>;

    async fn get_one_note(&self, id: i64) -> Result<Option<Note>, StoreError>;

    /// All notes, ordered by ascending id.
    async fn get_all_notes(&self) -> Result<Vec<Note>, StoreError>;

    async fn update_note(&self, id: i64, content: String) -> Result<Option<Note>, StoreError>;

    /// Returns `false` when no note had this id.
    async fn delete_note(&self, id: i64) -> Result<bool, StoreError>;
}
