// src/api/client.rs
//! Pure HTTP client wrapper for Notion API.
//!
//! This module provides a thin wrapper around reqwest for making
//! HTTP requests to the Notion API. It handles authentication, endpoint
//! URLs and status checking; it does not reshape responses.

use super::requests::{DatabaseQuery, ObjectType, PageArgs, SearchRequest};
use super::NotionApi;
use crate::config::ClientConfig;
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::AppError;
use crate::model::Document;
use crate::types::{NotionId, ValidatedUrl, ValidationError};
use reqwest::{header, Client, Response, StatusCode};
use serde::Serialize;

/// A thin wrapper around reqwest Client for Notion API requests.
#[derive(Debug, Clone)]
pub struct NotionHttpClient {
    client: Client,
    base_url: ValidatedUrl,
}

impl NotionHttpClient {
    /// Creates a new HTTP client with Notion API authentication.
    pub fn new(config: &ClientConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(config)?)
            .pool_max_idle_per_host(0)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Creates the default headers for Notion API requests.
    fn create_headers(config: &ClientConfig) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", config.api_key.as_str());
        let mut auth_value = header::HeaderValue::from_str(&auth_header).map_err(|e| {
            ValidationError::InvalidApiKey {
                reason: format!("not usable as a header value: {}", e),
            }
        })?;
        auth_value.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth_value);

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_str(config.notion_version.as_str()).map_err(|e| {
                ValidationError::InvalidNotionVersion {
                    version: config.notion_version.as_str().to_string(),
                    reason: format!("not usable as a header value: {}", e),
                }
            })?,
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    /// Makes a GET request to the specified endpoint.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - The API endpoint path (without base URL)
    /// * `query` - Query-string pairs, possibly empty
    pub async fn get(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<Document, AppError> {
        let url = self.base_url.join_endpoint(endpoint);
        log::debug!("GET {}", url);

        let response = self.client.get(&url).query(query).send().await?;
        into_document(response).await
    }

    /// Makes a POST request with JSON body to the specified endpoint.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - The API endpoint path (without base URL)
    /// * `body` - The request body to serialize as JSON
    pub async fn post<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &T,
    ) -> Result<Document, AppError> {
        let url = self.base_url.join_endpoint(endpoint);
        log::debug!("POST {}", url);
        if log::log_enabled!(log::Level::Trace) {
            log::trace!(
                "   body: {}",
                serde_json::to_string(body).unwrap_or_else(|_| "<unserializable>".to_string())
            );
        }

        let response = self.client.post(&url).json(body).send().await?;
        into_document(response).await
    }
}

/// Decodes a response body, treating any status other than 200 as failure.
///
/// The failed body is kept on the error so callers can see what Notion said.
pub async fn into_document(response: Response) -> Result<Document, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    log::info!("{} -> {}", url, status);

    if status != StatusCode::OK {
        log::warn!(
            "Notion request failed ({}): {}",
            status,
            preview(&text, ERROR_BODY_PREVIEW_LENGTH)
        );
        return Err(AppError::from_failed_response(status, &url, text));
    }

    serde_json::from_str(&text).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);
        AppError::MalformedResponse(format!(
            "{} (body: {})",
            e,
            preview(&text, ERROR_BODY_PREVIEW_LENGTH)
        ))
    })
}

/// Truncates `text` to at most `max_chars` characters for logging.
fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[async_trait::async_trait]
impl NotionApi for NotionHttpClient {
    async fn retrieve_user(&self, id: &NotionId) -> Result<Document, AppError> {
        self.get(&format!("users/{}", id.to_hyphenated()), &[]).await
    }

    async fn list_users(&self) -> Result<Document, AppError> {
        self.get("users", &[]).await
    }

    async fn retrieve_database(&self, id: &NotionId) -> Result<Document, AppError> {
        self.get(&format!("databases/{}", id.to_hyphenated()), &[])
            .await
    }

    async fn retrieve_block_children(
        &self,
        id: &NotionId,
        args: &PageArgs,
    ) -> Result<Document, AppError> {
        let query = args.to_query()?;
        self.get(&format!("blocks/{}/children", id.to_hyphenated()), &query)
            .await
    }

    async fn query_database(
        &self,
        id: &NotionId,
        query: &DatabaseQuery,
    ) -> Result<Document, AppError> {
        let body = query.to_body()?;
        self.post(&format!("databases/{}/query", id.to_hyphenated()), &body)
            .await
    }

    async fn retrieve_page(&self, id: &NotionId) -> Result<Document, AppError> {
        self.get(&format!("pages/{}", id.to_hyphenated()), &[]).await
    }

    async fn search(
        &self,
        query: &str,
        object_type: Option<ObjectType>,
    ) -> Result<Document, AppError> {
        self.post("search", &SearchRequest::new(query, object_type))
            .await
    }
}
