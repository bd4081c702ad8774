// src/api/mod.rs
//! Notion API interaction: one call per endpoint, raw documents out.
//!
//! Responses are returned as decoded JSON [`Document`]s; reshaping them is
//! the job of [`crate::document`], applied by the caller.

pub mod client;
pub mod requests;
pub mod responses;

use crate::document::extract_database_title;
use crate::error::AppError;
use crate::model::Document;
use crate::types::NotionId;
use requests::{DatabaseQuery, ObjectType, PageArgs};
use responses::PaginatedResponse;

/// The ability to call the Notion API.
///
/// Callers depend on this trait rather than on HTTP details, so tests and
/// alternative transports can stand in for [`NotionHttpClient`].
#[async_trait::async_trait]
pub trait NotionApi: Send + Sync {
    /// `GET /users/{id}`
    async fn retrieve_user(&self, id: &NotionId) -> Result<Document, AppError>;

    /// `GET /users`
    async fn list_users(&self) -> Result<Document, AppError>;

    /// `GET /databases/{id}`
    async fn retrieve_database(&self, id: &NotionId) -> Result<Document, AppError>;

    /// `GET /blocks/{id}/children`; a page ID lists the page's content.
    async fn retrieve_block_children(
        &self,
        id: &NotionId,
        args: &PageArgs,
    ) -> Result<Document, AppError>;

    /// `POST /databases/{id}/query`
    async fn query_database(
        &self,
        id: &NotionId,
        query: &DatabaseQuery,
    ) -> Result<Document, AppError>;

    /// `GET /pages/{id}`
    async fn retrieve_page(&self, id: &NotionId) -> Result<Document, AppError>;

    /// `POST /search`, newest edits first.
    async fn search(
        &self,
        query: &str,
        object_type: Option<ObjectType>,
    ) -> Result<Document, AppError>;

    /// Finds the database whose title is exactly `title`.
    ///
    /// Scans the database search results in order and returns the first
    /// exact match, or `None` when nothing matches.
    async fn search_database_by_title(&self, title: &str) -> Result<Option<Document>, AppError> {
        let response = self.search(title, Some(ObjectType::Database)).await?;
        let candidates = PaginatedResponse::from_document(response)?;
        log::debug!(
            "Scanning {} search result(s) for database '{}'",
            candidates.results.len(),
            title
        );

        Ok(candidates
            .results
            .into_iter()
            .find(|database| extract_database_title(database).as_deref() == Some(title)))
    }
}

pub use client::NotionHttpClient;
