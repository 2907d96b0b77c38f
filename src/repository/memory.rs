use async_trait::async_trait;
use tokio::sync::Mutex;

use std::collections::BTreeMap;

use super::{NoteStore, StoreError};
use crate::models::Note;

/// In-process store for router tests. Mirrors the identity column: ids start
/// at 1 and are never reused.
#[derive(Default)]
pub struct MemoryRepository {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    last_id: i64,
    notes: BTreeMap<i64, String>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NoteStore for MemoryRepository {
    async fn create_note(&self, content: String) -> Result<Note, StoreError> {
        let mut inner = self.inner.lock().await;
        inner.last_id += 1;
        let id = inner.last_id;
        inner.notes.insert(id, content.clone());
        Ok(Note { id, content })
    }

    async fn get_one_note(&self, id: i64) -> Result<Option<Note>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.notes.get(&id).map(|content| Note {
            id,
            content: content.clone(),
        }))
    }

    async fn get_all_notes(&self) -> Result<Vec<Note>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .notes
            .iter()
            .map(|(id, content)| Note {
                id: *id,
                content: content.clone(),
            })
            .collect())
    }

    async fn update_note(&self, id: i64, content: String) -> Result<Option<Note>, StoreError> {
        let mut inner = self.inner.lock().await;
        Ok(inner.notes.get_mut(&id).map(|stored| {
            stored.clone_from(&content);
            Note { id, content }
        }))
    }

    async fn delete_note(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.inner.lock().await.notes.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let repo = MemoryRepository::new();

        let first = repo.create_note("first".into()).await.unwrap();
        assert!(repo.delete_note(first.id).await.unwrap());

        let second = repo.create_note("second".into()).await.unwrap();
        assert!(second.id > first.id);
        assert!(repo.get_one_note(first.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_of_missing_note_returns_none() {
        let repo = MemoryRepository::new();
        assert!(repo.update_note(7, "x".into()).await.unwrap().is_none());
        assert!(!repo.delete_note(7).await.unwrap());
    }
}
