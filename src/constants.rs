// src/constants.rs
//! Domain constants that define the operational boundaries of the client.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// Page size sent with a database query when the caller gives none.
pub const DEFAULT_QUERY_PAGE_SIZE: u32 = 10;

/// The largest page size the Notion API accepts on paginated endpoints.
pub const NOTION_API_MAX_PAGE_SIZE: u32 = 100;

/// Timestamp used for the default "most recently edited first" ordering.
pub const DEFAULT_SORT_TIMESTAMP: &str = "last_edited_time";

/// Direction used for the default ordering.
pub const DEFAULT_SORT_DIRECTION: &str = "descending";

// ---------------------------------------------------------------------------
// Document shape
// ---------------------------------------------------------------------------

/// The property key the title extractor looks at before scanning by type.
pub const TITLE_PROPERTY_NAME: &str = "Name";

// ---------------------------------------------------------------------------
// Configuration sources
// ---------------------------------------------------------------------------

/// Environment variable holding the integration token.
pub const ENV_API_TOKEN: &str = "API_TOKEN";

/// Environment variable holding the `Notion-Version` header value.
pub const ENV_NOTION_VERSION: &str = "NOTION_VERSION";

/// Environment variable holding the API base URL.
pub const ENV_NOTION_BASE_URL: &str = "NOTION_BASE_URL";

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when logging error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
