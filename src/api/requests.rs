// src/api/requests.rs
//! Request parameters and bodies for the Notion endpoints.
//!
//! Validation happens here, before anything touches the network.

use crate::constants::{
    DEFAULT_QUERY_PAGE_SIZE, DEFAULT_SORT_DIRECTION, DEFAULT_SORT_TIMESTAMP,
    NOTION_API_MAX_PAGE_SIZE,
};
use crate::types::ValidationError;
use serde::Serialize;
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;

/// The kinds of object a search can be narrowed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    Page,
    Database,
}

impl ObjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Page => "page",
            ObjectType::Database => "database",
        }
    }

    /// Parses an optional filter value; `None` means "no filter".
    pub fn parse_optional(value: Option<&str>) -> Result<Option<Self>, ValidationError> {
        value.map(str::parse::<ObjectType>).transpose()
    }
}

impl FromStr for ObjectType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "page" => Ok(ObjectType::Page),
            "database" => Ok(ObjectType::Database),
            other => Err(ValidationError::InvalidObjectType(other.to_string())),
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn validate_page_size(page_size: u32) -> Result<u32, ValidationError> {
    if (1..=NOTION_API_MAX_PAGE_SIZE).contains(&page_size) {
        Ok(page_size)
    } else {
        Err(ValidationError::OutOfBounds {
            value: page_size,
            min: 1,
            max: NOTION_API_MAX_PAGE_SIZE,
        })
    }
}

/// The "most recently edited first" ordering used when none is given.
pub fn default_sort() -> Value {
    json!({
        "direction": DEFAULT_SORT_DIRECTION,
        "timestamp": DEFAULT_SORT_TIMESTAMP,
    })
}

/// Cursor and page size for block-children listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageArgs {
    pub start_cursor: Option<String>,
    pub page_size: Option<u32>,
}

impl PageArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_start_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.start_cursor = Some(cursor.into());
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Query-string pairs; only the parameters that were set appear.
    pub fn to_query(&self) -> Result<Vec<(&'static str, String)>, ValidationError> {
        let mut query = Vec::new();
        if let Some(cursor) = &self.start_cursor {
            query.push(("start_cursor", cursor.clone()));
        }
        if let Some(page_size) = self.page_size {
            query.push(("page_size", validate_page_size(page_size)?.to_string()));
        }
        Ok(query)
    }
}

/// Parameters of a database query.
///
/// `sort` and `filter` are passed through as raw JSON in Notion's own
/// filter/sort syntax.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatabaseQuery {
    pub sort: Option<Value>,
    pub filter: Option<Value>,
    pub start_cursor: Option<String>,
    pub page_size: Option<u32>,
}

impl DatabaseQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sort(mut self, sort: Value) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_filter(mut self, filter: Value) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_start_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.start_cursor = Some(cursor.into());
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Builds the JSON body, filling in the default sort and page size.
    pub fn to_body(&self) -> Result<Value, ValidationError> {
        let page_size = validate_page_size(self.page_size.unwrap_or(DEFAULT_QUERY_PAGE_SIZE))?;
        let mut body = json!({
            "sort": self.sort.clone().unwrap_or_else(default_sort),
            "page_size": page_size,
        });
        if let Some(filter) = &self.filter {
            body["filter"] = filter.clone();
        }
        if let Some(cursor) = &self.start_cursor {
            body["start_cursor"] = json!(cursor);
        }
        Ok(body)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
struct SearchFilter {
    value: ObjectType,
    property: &'static str,
}

/// Body of `POST /search`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SearchRequest {
    query: String,
    sort: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<SearchFilter>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, object_type: Option<ObjectType>) -> Self {
        Self {
            query: query.into(),
            sort: default_sort(),
            filter: object_type.map(|value| SearchFilter {
                value,
                property: "object",
            }),
        }
    }
}
