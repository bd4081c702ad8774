//! Records produced from Notion documents.
//!
//! Everything the API returns is kept as an untyped [`Document`]; the types
//! here are the small projections the extractors build from one.

use crate::types::Color;
use serde::{Deserialize, Serialize};

/// A decoded JSON payload from the Notion API.
pub type Document = serde_json::Value;

/// One choice of a select or multi-select property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub id: String,
    pub name: String,
    pub color: Color,
}

/// The fields of a page most callers actually display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplifiedPage {
    pub page_id: String,
    /// Cover image URL, empty when the page has none.
    pub cover: String,
    pub title: String,
    pub created_time: String,
}

impl SimplifiedPage {
    pub fn has_cover(&self) -> bool {
        !self.cover.is_empty()
    }
}
