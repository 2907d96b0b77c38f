use crate::{
    dto::{CreateNoteRequest, MessageResponse, NoteResponse, SummaryResponse, UpdateNoteRequest},
    repository::{NoteStore, StoreError},
    summarizer::{Summarizer, SummarizerError, bound_summary},
};

use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum SummarizeError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Summarizer(#[from] SummarizerError),
}

#[derive(Clone, Copy, Debug)]
pub struct SummaryBounds {
    pub max_length: u32,
    pub min_length: u32,
}

#[derive(Clone)]
pub struct NoteService {
    repo: Arc<dyn NoteStore>,
    summarizer: Arc<dyn Summarizer>,
    bounds: SummaryBounds,
}

impl NoteService {
    pub fn new(
        repo: Arc<dyn NoteStore>,
        summarizer: Arc<dyn Summarizer>,
        bounds: SummaryBounds,
    ) -> Self {
        Self {
            repo,
            summarizer,
            bounds,
        }
    }

    pub async fn create_note(&self, request: CreateNoteRequest) -> Result<NoteResponse, StoreError> {
        self.repo
            .create_note(request.content)
            .await
            .map(NoteResponse::from)
    }

    pub async fn update_note(
        &self,
        id: i64,
        request: UpdateNoteRequest,
    ) -> Result<Option<NoteResponse>, StoreError> {
        self.repo
            .update_note(id, request.content)
            .await
            .map(|note| note.map(NoteResponse::from))
    }

    pub async fn delete_note(&self, id: i64) -> Result<Option<MessageResponse>, StoreError> {
        let deleted = self.repo.delete_note(id).await?;

        Ok(deleted.then(|| MessageResponse {
            message: "Note deleted".to_string(),
        }))
    }

    pub async fn get_one_note(&self, id: i64) -> Result<Option<NoteResponse>, StoreError> {
        self.repo
            .get_one_note(id)
            .await
            .map(|note| note.map(NoteResponse::from))
    }

    pub async fn get_all_notes(&self) -> Result<Vec<NoteResponse>, StoreError> {
        self.repo
            .get_all_notes()
            .await
            .map(|notes| notes.into_iter().map(NoteResponse::from).collect())
    }

    /// Summarizes the note's current content. `Ok(None)` when the note does
    /// not exist.
    pub async fn summarize_note(&self, id: i64) -> Result<Option<SummaryResponse>, SummarizeError> {
        let Some(note) = self.repo.get_one_note(id).await? else {
            return Ok(None);
        };

        let SummaryBounds {
            max_length,
            min_length,
        } = self.bounds;

        tracing::debug!("Summarizing note {} ({} bytes)", id, note.content.len());

        let summary = self
            .summarizer
            .summarize(&note.content, max_length, min_length)
            .await?;

        Ok(Some(SummaryResponse {
            summary: bound_summary(&summary, max_length),
        }))
    }
}
