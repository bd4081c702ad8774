// src/lib.rs
//! notion-sdk library: a thin, authenticated client for the Notion API.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `ExtractError`, `ValidationError`
//! - **Configuration**: `ClientConfig`, `ConfigOverrides`
//! - **API client**: `NotionApi`, `NotionHttpClient`, request builders
//! - **Documents**: nested-key lookup and field extractors

pub mod api;
pub mod config;
pub mod constants;
pub mod document;
pub mod error;
pub mod model;
pub mod types;

// --- Error Handling ---
pub use crate::error::{AppError, ExtractError, NotionErrorCode};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{ClientConfig, ConfigOverrides};

// --- Domain Model ---
pub use crate::model::{Document, SelectOption, SimplifiedPage};

// --- Domain Types ---
pub use crate::types::{ApiKey, Color, NotionId, NotionVersion, ValidatedUrl};

// --- API Client ---
pub use crate::api::{
    requests::{DatabaseQuery, ObjectType, PageArgs, SearchRequest},
    responses::PaginatedResponse,
    NotionApi, NotionHttpClient,
};

// --- Documents ---
pub use crate::document::{
    exists, extract_database_title, extract_select_options, extract_title, resolve,
    simplify_page, KeyPath, PathSegment,
};
