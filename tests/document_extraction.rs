//! Extraction against full Notion payloads.
//!
//! Fixtures are real response shapes for a page in a database and the
//! database's schema.

use notion_sdk::{
    exists, extract_database_title, extract_select_options, extract_title, resolve,
    simplify_page, Color, Document, ExtractError, KeyPath, SimplifiedPage,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn fixture(json: &str) -> Document {
    serde_json::from_str(json).expect("fixture should be valid JSON")
}

fn resume_page() -> Document {
    fixture(include_str!("fixtures/api_responses/page_resume.json"))
}

fn media_database() -> Document {
    fixture(include_str!("fixtures/api_responses/database_media.json"))
}

#[test]
fn simplifies_page_with_external_cover() {
    let page = simplify_page(&resume_page()).expect("page should simplify");

    assert_eq!(
        page,
        SimplifiedPage {
            page_id: "a2442b8e-d1f4-4784-86f3-6b7840401422".to_string(),
            cover: "https://images.unsplash.com/photo-1627483262769-04d0a1401487?ixlib=rb-1.2.1&q=85&fm=jpg&crop=entropy&cs=srgb".to_string(),
            title: "个人简历（as 开发）".to_string(),
            created_time: "2020-02-14T07:08:00.000Z".to_string(),
        }
    );
}

#[test]
fn probes_optional_page_structure() {
    let page = resume_page();

    assert!(exists(&"cover.external.url".parse().unwrap(), &page));
    assert!(!exists(&"cover.file.url".parse().unwrap(), &page));
    assert!(!exists(&"icon.emoji".parse().unwrap(), &page));
    assert!(!exists(
        &"properties.Property.rich_text[0].plain_text".parse().unwrap(),
        &page
    ));
    assert_eq!(
        resolve(&"properties.Category.select.name".parse().unwrap(), &page),
        Some(&json!("tech"))
    );
}

#[test]
fn empty_path_never_resolves() {
    assert!(!exists(&KeyPath::default(), &resume_page()));
}

#[test]
fn page_select_value_has_no_options() {
    // On a page, `select` holds the chosen option rather than the schema
    let options = extract_select_options(&resume_page(), "Category").unwrap();
    assert!(options.is_empty());
}

#[test]
fn reads_database_select_options_in_order() {
    let options = extract_select_options(&media_database(), "Publisher").unwrap();

    let names: Vec<&str> = options.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, vec!["NYT", "Netflix", "Indie"]);
    assert_eq!(options[1].color, Color::Blue);
    assert_eq!(options[2].id, "f3533637-278f-4501-b394-d9753bf3c101");
}

#[test]
fn reads_database_multi_select_options() {
    let options = extract_select_options(&media_database(), "Author").unwrap();
    assert_eq!(options.len(), 2);
    assert_eq!(options[0].name, "Spencer Greenberg");
}

#[test]
fn unknown_database_property_is_rejected() {
    assert_eq!(
        extract_select_options(&media_database(), "Score /5"),
        Err(ExtractError::UnknownProperty {
            name: "Score /5".to_string()
        })
    );
}

#[test]
fn database_schema_title_property_has_no_text() {
    // The schema declares the title column but carries no rich-text runs
    assert!(matches!(
        extract_title(&media_database()),
        Err(ExtractError::MissingField { .. })
    ));
    assert_eq!(
        extract_database_title(&media_database()).as_deref(),
        Some("Media")
    );
}

#[test]
fn page_without_name_property_fails_to_simplify() {
    let mut page = resume_page();
    page["properties"]
        .as_object_mut()
        .unwrap()
        .remove("Name");

    assert_eq!(
        simplify_page(&page),
        Err(ExtractError::MissingField {
            path: "properties.Name.title".to_string()
        })
    );
}

#[test]
fn renamed_title_property_is_found_by_type() {
    let mut page = resume_page();
    let properties = page["properties"].as_object_mut().unwrap();
    let title = properties.remove("Name").unwrap();
    properties.insert("Document".to_string(), title);

    assert_eq!(extract_title(&page).unwrap(), "个人简历（as 开发）");
}
