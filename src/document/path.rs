// src/document/path.rs
//! Nested-key lookup over decoded JSON documents.
//!
//! Notion's property schema changes shape per property type, so callers
//! probe optional structure (`cover.external.url`, `title[0]`) before
//! reading it. Lookups here never fail: a missing key, an out-of-range
//! index, or an attempt to descend into a scalar all mean "not found".

use crate::types::ValidationError;
use serde_json::Value;
use std::fmt;
use std::iter::Peekable;
use std::str::{Chars, FromStr};

/// One step of a [`KeyPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// An object key. Decimal keys also address array positions.
    Key(String),
    /// An array position.
    Index(usize),
}

impl PathSegment {
    /// Steps from `value` into the child this segment names.
    fn step<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        match (self, value) {
            (PathSegment::Key(key), Value::Object(map)) => map.get(key),
            (PathSegment::Key(key), Value::Array(items)) => {
                key.parse::<usize>().ok().and_then(|i| items.get(i))
            }
            (PathSegment::Index(i), Value::Array(items)) => items.get(*i),
            _ => None,
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

impl PathSegment {
    /// Keys that would not read back as a single bare segment.
    fn needs_quoting(&self) -> bool {
        match self {
            PathSegment::Key(key) => {
                key.is_empty() || key.contains(|c: char| matches!(c, '.' | '[' | ']' | '"' | '\\'))
            }
            PathSegment::Index(_) => false,
        }
    }
}

/// Bare keys print as-is; keys containing path syntax print as `["..."]`.
impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) if self.needs_quoting() => {
                write!(f, "[\"")?;
                for c in key.chars() {
                    if matches!(c, '"' | '\\') {
                        write!(f, "\\")?;
                    }
                    write!(f, "{}", c)?;
                }
                write!(f, "\"]")
            }
            PathSegment::Key(key) => write!(f, "{}", key),
            PathSegment::Index(i) => write!(f, "[{}]", i),
        }
    }
}

/// An ordered traversal route into a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeyPath(Vec<PathSegment>);

impl KeyPath {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PathSegment>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Returns a new path with `segment` appended.
    pub fn join(&self, segment: impl Into<PathSegment>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<S: Into<PathSegment>, const N: usize> From<[S; N]> for KeyPath {
    fn from(segments: [S; N]) -> Self {
        Self::new(segments)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 && matches!(segment, PathSegment::Key(_)) && !segment.needs_quoting() {
                write!(f, ".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

/// Reads the segment after a `[`: either an index or a quoted key.
fn bracket_segment(chars: &mut Peekable<Chars<'_>>) -> Result<PathSegment, &'static str> {
    if chars.next_if_eq(&'"').is_some() {
        let mut key = String::new();
        loop {
            match chars.next() {
                Some('\\') => key.push(chars.next().ok_or("unterminated quoted key")?),
                Some('"') => break,
                Some(c) => key.push(c),
                None => return Err("unterminated quoted key"),
            }
        }
        return match chars.next() {
            Some(']') => Ok(PathSegment::Key(key)),
            _ => Err("unclosed '['"),
        };
    }

    let mut digits = String::new();
    loop {
        match chars.next() {
            Some(']') => break,
            Some(c) => digits.push(c),
            None => return Err("unclosed '['"),
        }
    }
    digits
        .parse::<usize>()
        .map(PathSegment::Index)
        .map_err(|_| "index must be a non-negative integer")
}

/// Parses dotted paths such as `cover.external.url`, `title[0].plain_text`
/// or `title.0.plain_text`. Keys containing `.` or brackets are written
/// quoted, as in `properties["Score /5.0"].number`.
impl FromStr for KeyPath {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ValidationError::InvalidKeyPath {
            path: s.to_string(),
            reason: reason.to_string(),
        };

        if s.trim().is_empty() {
            return Err(invalid("path is empty"));
        }

        let mut segments = Vec::new();
        let mut chars = s.chars().peekable();
        // True at the start and after each '.'
        let mut expect_segment = true;

        loop {
            match chars.peek() {
                None if expect_segment => return Err(invalid("empty segment")),
                None => break,
                Some('[') => {
                    chars.next();
                    segments.push(bracket_segment(&mut chars).map_err(invalid)?);
                    expect_segment = false;
                    match chars.peek() {
                        None | Some('[') => {}
                        Some('.') => {
                            chars.next();
                            expect_segment = true;
                        }
                        Some(_) => return Err(invalid("unexpected text after ']'")),
                    }
                }
                Some('.') => return Err(invalid("empty segment")),
                Some(_) => {
                    let mut key = String::new();
                    while let Some(c) = chars.next_if(|c| *c != '.' && *c != '[') {
                        key.push(c);
                    }
                    segments.push(PathSegment::Key(key));
                    expect_segment = chars.next_if_eq(&'.').is_some();
                }
            }
        }

        Ok(Self(segments))
    }
}

/// Follows `path` through `document`, returning the value at its end.
///
/// An empty path resolves to nothing.
pub fn resolve<'a>(path: &KeyPath, document: &'a Value) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }
    path.segments()
        .iter()
        .try_fold(document, |current, segment| segment.step(current))
}

/// Whether every segment of `path` resolves in `document`.
pub fn exists(path: &KeyPath, document: &Value) -> bool {
    resolve(path, document).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page() -> Value {
        json!({
            "cover": {"type": "external", "external": {"url": "http://x"}},
            "icon": null,
            "properties": {
                "Name": {"title": [{"text": {"content": "Hello"}}]},
                "Property": {"rich_text": []}
            }
        })
    }

    #[test]
    fn present_paths_exist() {
        let doc = page();
        assert!(exists(&KeyPath::from(["cover"]), &doc));
        assert!(exists(&KeyPath::from(["cover", "external", "url"]), &doc));
        assert!(exists(
            &KeyPath::new::<_, PathSegment>([
                "properties".into(),
                "Name".into(),
                "title".into(),
                0usize.into(),
                "text".into(),
                "content".into(),
            ]),
            &doc
        ));
    }

    #[test]
    fn null_leaf_still_exists() {
        assert!(exists(&KeyPath::from(["icon"]), &page()));
    }

    #[test]
    fn missing_intermediate_key_is_false() {
        let doc = page();
        assert!(!exists(&KeyPath::from(["cover", "file", "url"]), &doc));
        assert!(!exists(&KeyPath::from(["missing", "deeper"]), &doc));
    }

    #[test]
    fn empty_path_is_false() {
        assert!(!exists(&KeyPath::default(), &page()));
        assert!(!exists(&KeyPath::default(), &json!({})));
    }

    #[test]
    fn type_mismatch_is_false() {
        let doc = page();
        // "url" is a string; descending further must not panic
        assert!(!exists(
            &KeyPath::from(["cover", "external", "url", "host"]),
            &doc
        ));
        // Object addressed by index, null addressed by key
        assert!(!exists(&KeyPath::new([PathSegment::from("cover"), PathSegment::Index(0)]), &doc));
        assert!(!exists(&KeyPath::from(["icon", "emoji"]), &doc));
    }

    #[test]
    fn out_of_range_index_is_false() {
        let doc = page();
        let path: KeyPath = "properties.Property.rich_text[0]".parse().unwrap();
        assert!(!exists(&path, &doc));
    }

    #[test]
    fn numeric_key_addresses_array() {
        let doc = page();
        let path: KeyPath = "properties.Name.title.0.text.content".parse().unwrap();
        assert_eq!(resolve(&path, &doc), Some(&json!("Hello")));
    }

    #[test]
    fn parse_and_display() {
        let path: KeyPath = "properties.Name.title[0].text.content".parse().unwrap();
        assert_eq!(path.len(), 6);
        assert_eq!(path.segments()[3], PathSegment::Index(0));
        assert_eq!(path.to_string(), "properties.Name.title[0].text.content");

        let nested: KeyPath = "rows[1][2]".parse().unwrap();
        assert_eq!(nested.segments()[2], PathSegment::Index(2));
    }

    #[test]
    fn parse_rejects_malformed_paths() {
        assert!("".parse::<KeyPath>().is_err());
        assert!("a..b".parse::<KeyPath>().is_err());
        assert!("title[x]".parse::<KeyPath>().is_err());
        assert!("title[0".parse::<KeyPath>().is_err());
        assert!("title[0]x".parse::<KeyPath>().is_err());
    }

    #[test]
    fn keys_with_path_syntax_are_quoted() {
        let path = KeyPath::from(["properties", "Score /5.0", "number"]);
        assert_eq!(path.to_string(), r#"properties["Score /5.0"].number"#);
        assert_eq!(path.to_string().parse::<KeyPath>().unwrap(), path);

        let odd = KeyPath::new([
            PathSegment::from("properties"),
            PathSegment::from(r#"Tags [a"b\c]"#),
            PathSegment::Index(1),
        ]);
        assert_eq!(odd.to_string().parse::<KeyPath>().unwrap(), odd);
    }

    #[test]
    fn parse_rejects_unterminated_quoted_key() {
        assert!(r#"properties["Score"#.parse::<KeyPath>().is_err());
        assert!(r#"properties["Score"x]"#.parse::<KeyPath>().is_err());
    }

    #[test]
    fn join_extends_without_mutating() {
        let base = KeyPath::from(["properties"]);
        let joined = base.join("Status").join(0usize);
        assert_eq!(base.len(), 1);
        assert_eq!(joined.to_string(), "properties.Status[0]");
    }
}
