// src/api/responses.rs
//! Typed views over list-shaped API responses.

use crate::error::AppError;
use crate::model::Document;
use serde::{Deserialize, Serialize};

/// Generic paginated response wrapper
///
/// Notion's list endpoints (`/users`, `/search`, block children, database
/// queries) share this envelope. Callers pass `next_cursor` back in to
/// read the next page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T = Document> {
    pub object: String,
    pub results: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

impl PaginatedResponse {
    /// Reads the envelope out of a decoded list response.
    pub fn from_document(document: Document) -> Result<Self, AppError> {
        Ok(serde_json::from_value(document)?)
    }
}

impl<T> PaginatedResponse<T> {
    /// The cursor to request next, if Notion reported more results.
    pub fn continuation(&self) -> Option<&str> {
        if self.has_more {
            self.next_cursor.as_deref()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_list_envelope() {
        let page = PaginatedResponse::from_document(json!({
            "object": "list",
            "results": [{"object": "page", "id": "01000398-5d75-4a61-acc6-743d6971c0f1"}],
            "next_cursor": "3ddadb8a-08c6-4d9f-ac84-a1e86f5d8b63",
            "has_more": true
        }))
        .unwrap();

        assert_eq!(page.results.len(), 1);
        assert_eq!(
            page.continuation(),
            Some("3ddadb8a-08c6-4d9f-ac84-a1e86f5d8b63")
        );
    }

    #[test]
    fn last_page_has_no_continuation() {
        let page = PaginatedResponse::from_document(json!({
            "object": "list",
            "results": [],
            "next_cursor": null,
            "has_more": false
        }))
        .unwrap();
        assert_eq!(page.continuation(), None);
    }

    #[test]
    fn non_list_document_is_malformed() {
        let err = PaginatedResponse::from_document(json!({"object": "page"})).unwrap_err();
        assert!(matches!(err, AppError::MalformedResponse(_)));
    }
}
