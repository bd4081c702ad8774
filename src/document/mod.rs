//! Reading semi-structured Notion documents.
//!
//! [`path`] answers "is this nested field there?" without failing;
//! [`extract`] builds typed values on top of it for the handful of shapes
//! callers need (titles, select options, simplified pages).

pub mod extract;
pub mod path;

pub use extract::{extract_database_title, extract_select_options, extract_title, simplify_page};
pub use path::{exists, resolve, KeyPath, PathSegment};
