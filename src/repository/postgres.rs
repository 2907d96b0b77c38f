use async_trait::async_trait;
use tokio_postgres::{Client, NoTls, Row};

use super::{NoteStore, StoreError, embedded::migrations};
use crate::models::Note;

pub struct Repository {
    client: Client,
}

fn note_from_row(row: &Row) -> Note {
    Note {
        id: row.get("id"),
        content: row.get("content"),
    }
}

impl Repository {
    pub async fn new(database_dsn: &str) -> Result<Self, StoreError> {
        let (client, con) = tokio_postgres::connect(database_dsn, NoTls).await?;

        tokio::spawn(async move {
            if let Err(e) = con.await {
                tracing::error!("connection error: {}", e);
            }
        });

        Ok(Self { client })
    }

    /// Applies pending embedded migrations. Safe to run on every start.
    pub async fn migrate(&mut self) -> Result<(), StoreError> {
        let migrations_report = migrations::runner().run_async(&mut self.client).await?;

        for migration in migrations_report.applied_migrations() {
            tracing::info!(
                "Migration Applied -  Name: {}, Version: {}",
                migration.name(),
                migration.version()
            );
        }

        tracing::info!("DB migrations finished!");

        Ok(())
    }
}

#[async_trait]
impl NoteStore for Repository {
    async fn create_note(&self, content: String) -> Result<Note, StoreError> {
        let row = self
            .client
            .query_one(
                "INSERT INTO notes (content) VALUES ($1) RETURNING id, content",
                &[&content],
            )
            .await?;

        Ok(note_from_row(&row))
    }

    async fn get_one_note(&self, id: i64) -> Result<Option<Note>, StoreError> {
        let row = self
            .client
            .query_opt("SELECT id, content FROM notes WHERE id = $1", &[&id])
            .await?;

        Ok(row.as_ref().map(note_from_row))
    }

    async fn get_all_notes(&self) -> Result<Vec<Note>, StoreError> {
        let rows = self
            .client
            .query("SELECT id, content FROM notes ORDER BY id", &[])
            .await?;

        Ok(rows.iter().map(note_from_row).collect())
    }

    async fn update_note(&self, id: i64, content: String) -> Result<Option<Note>, StoreError> {
        let row = self
            .client
            .query_opt(
                "UPDATE notes SET content = $1 WHERE id = $2 RETURNING id, content",
                &[&content, &id],
            )
            .await?;

        Ok(row.as_ref().map(note_from_row))
    }

    async fn delete_note(&self, id: i64) -> Result<bool, StoreError> {
        let rows = self
            .client
            .execute("DELETE FROM notes WHERE id = $1", &[&id])
            .await?;

        Ok(rows == 1)
    }
}
