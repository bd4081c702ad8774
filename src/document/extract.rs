// src/document/extract.rs
//! Field extractors for page and database documents.
//!
//! Each extractor states which fields it requires and which it treats as
//! optional. Required fields that are absent produce an [`ExtractError`];
//! optional ones fall back to an empty value.

use super::path::{exists, resolve, KeyPath};
use crate::constants::TITLE_PROPERTY_NAME;
use crate::error::ExtractError;
use crate::model::{Document, SelectOption, SimplifiedPage};
use serde::Deserialize;
use serde_json::Value;

/// Property-schema keys whose `options` array holds [`SelectOption`]s.
const OPTION_BEARING_TYPES: [&str; 2] = ["select", "multi_select"];

fn missing(path: &KeyPath) -> ExtractError {
    ExtractError::MissingField {
        path: path.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Reads a string that must be present at `path`.
fn required_str<'a>(document: &'a Document, path: &KeyPath) -> Result<&'a str, ExtractError> {
    match resolve(path, document) {
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(ExtractError::MalformedField {
            path: path.to_string(),
            reason: format!("expected a string, found {}", json_kind(other)),
        }),
        None => Err(missing(path)),
    }
}

/// Reads a string at `path` if one is there.
fn optional_str<'a>(document: &'a Document, path: &KeyPath) -> Option<&'a str> {
    resolve(path, document).and_then(Value::as_str)
}

/// Finds the key path of the page's title property.
///
/// `properties.Name` wins when it carries a `title` array; otherwise the
/// first property declaring `"type": "title"` is used.
fn title_property(document: &Document) -> Result<KeyPath, ExtractError> {
    let properties = KeyPath::from(["properties"]);
    let named = properties.join(TITLE_PROPERTY_NAME);

    if exists(&named.join("title"), document) {
        return Ok(named);
    }

    resolve(&properties, document)
        .and_then(Value::as_object)
        .and_then(|props| {
            props
                .iter()
                .find(|(_, property)| property.get("type").and_then(Value::as_str) == Some("title"))
        })
        .map(|(name, _)| properties.join(name.as_str()))
        .ok_or_else(|| missing(&named.join("title")))
}

/// Extracts the page title from the first rich-text run of its title property.
pub fn extract_title(document: &Document) -> Result<String, ExtractError> {
    let content = title_property(document)?
        .join("title")
        .join(0usize)
        .join("text")
        .join("content");

    required_str(document, &content).map(str::to_string)
}

/// Lists the options declared by a select or multi-select property.
///
/// `property_name` must exist under `properties`. A property of another
/// type yields an empty list.
pub fn extract_select_options(
    document: &Document,
    property_name: &str,
) -> Result<Vec<SelectOption>, ExtractError> {
    let property = KeyPath::from(["properties"]).join(property_name);
    if !exists(&property, document) {
        return Err(ExtractError::UnknownProperty {
            name: property_name.to_string(),
        });
    }

    for kind in OPTION_BEARING_TYPES {
        let options_path = property.join(kind).join("options");
        let Some(Value::Array(options)) = resolve(&options_path, document) else {
            continue;
        };

        return options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                SelectOption::deserialize(option).map_err(|e| ExtractError::MalformedField {
                    path: options_path.join(i).to_string(),
                    reason: e.to_string(),
                })
            })
            .collect();
    }

    log::debug!(
        "Property '{}' declares no select options; returning none",
        property_name
    );
    Ok(Vec::new())
}

/// Reduces a page document to its id, cover, title and creation time.
pub fn simplify_page(document: &Document) -> Result<SimplifiedPage, ExtractError> {
    let cover = ["external", "file"]
        .into_iter()
        .find_map(|hosting| optional_str(document, &KeyPath::from(["cover", hosting, "url"])))
        .unwrap_or_default()
        .to_string();

    Ok(SimplifiedPage {
        page_id: required_str(document, &KeyPath::from(["id"]))?.to_string(),
        cover,
        title: extract_title(document)?,
        created_time: required_str(document, &KeyPath::from(["created_time"]))?.to_string(),
    })
}

/// Joins the `plain_text` of every run in a database's title.
///
/// Returns `None` when the title is absent or empty.
pub fn extract_database_title(document: &Document) -> Option<String> {
    let runs = resolve(&KeyPath::from(["title"]), document)?.as_array()?;
    if runs.is_empty() {
        return None;
    }

    Some(
        runs.iter()
            .filter_map(|run| {
                run.get("plain_text")
                    .or_else(|| run.get("text").and_then(|text| text.get("content")))
                    .and_then(Value::as_str)
            })
            .collect(),
    )
}
