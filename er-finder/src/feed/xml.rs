//! XML-to-tree conversion and envelope extraction.
//!
//! Feed documents are converted into an untyped [`serde_json::Value`] tree:
//! - an element with child elements becomes an object keyed by tag name
//! - an element with only text (or nothing) becomes a string
//! - a tag repeated under one parent becomes an array, in document order
//! - attributes are dropped
//!
//! The last rule is what makes `item` a list for many results and a bare
//! object for one; [`extract_items`] coerces both to a `Vec` so nothing
//! downstream has to care.

use quick_xml::Reader;
use quick_xml::events::Event;
use serde_json::{Map, Value};

use super::FeedKind;
use super::error::FormatError;

/// Path from the document root to the repeated record element.
pub const ITEM_PATH: [&str; 4] = ["response", "body", "items", "item"];

/// Error converting a document into a tree.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TreeError {
    #[error("malformed XML: {0}")]
    Malformed(String),

    #[error("unclosed element <{0}>")]
    Unclosed(String),

    #[error("document has no root element")]
    NoRoot,
}

struct Frame {
    name: String,
    children: Map<String, Value>,
    text: String,
}

impl Frame {
    fn new(name: String) -> Self {
        Self {
            name,
            children: Map::new(),
            text: String::new(),
        }
    }

    fn into_value(self) -> (String, Value) {
        let value = if self.children.is_empty() {
            Value::String(self.text)
        } else {
            Value::Object(self.children)
        };
        (self.name, value)
    }
}

/// Insert a child, turning repeated tags into an array.
fn insert_child(map: &mut Map<String, Value>, name: String, value: Value) {
    match map.get_mut(&name) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            map.insert(name, value);
        }
    }
}

/// Parse an XML document into a tree rooted at an object with one key,
/// the root element's name.
pub fn parse_tree(xml: &str) -> Result<Value, TreeError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<Map<String, Value>> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                stack.push(Frame::new(name));
            }
            Ok(Event::Empty(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                let value = Value::String(String::new());
                match stack.last_mut() {
                    Some(parent) => insert_child(&mut parent.children, name, value),
                    None => {
                        root.get_or_insert_with(Map::new).insert(name, value);
                    }
                }
            }
            Ok(Event::Text(e)) => {
                if let Some(frame) = stack.last_mut() {
                    // Unknown entities such as `&nbsp;` are kept as written
                    let text = match e.unescape() {
                        Ok(text) => text,
                        Err(err) => {
                            tracing::debug!(
                                element = %frame.name,
                                error = %err,
                                "keeping raw text"
                            );
                            String::from_utf8_lossy(&e)
                        }
                    };
                    frame.text.push_str(&text);
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&String::from_utf8_lossy(e.as_ref()));
                }
            }
            Ok(Event::End(_)) => {
                let Some(frame) = stack.pop() else {
                    return Err(TreeError::Malformed("unexpected closing tag".to_string()));
                };
                let (name, value) = frame.into_value();
                match stack.last_mut() {
                    Some(parent) => insert_child(&mut parent.children, name, value),
                    None => {
                        root.get_or_insert_with(Map::new).insert(name, value);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(TreeError::Malformed(e.to_string())),
            _ => {}
        }
    }

    if let Some(open) = stack.pop() {
        return Err(TreeError::Unclosed(open.name));
    }

    root.map(Value::Object).ok_or(TreeError::NoRoot)
}

/// Walk [`ITEM_PATH`] and return the records as a sequence.
///
/// A lone `item` object is wrapped into a one-element vector.
pub fn items_from_tree(feed: FeedKind, tree: &Value) -> Result<Vec<Value>, FormatError> {
    let mut node = tree;
    for (depth, segment) in ITEM_PATH.iter().enumerate() {
        node = node.get(*segment).ok_or_else(|| {
            let path = ITEM_PATH[..=depth].join(".");
            FormatError::new(feed, format!("missing {path}"), &tree.to_string())
        })?;
    }

    Ok(match node {
        Value::Array(items) => items.clone(),
        other => vec![other.clone()],
    })
}

/// Parse a feed body and return its records.
pub fn extract_items(feed: FeedKind, body: &str) -> Result<Vec<Value>, FormatError> {
    let tree = parse_tree(body).map_err(|e| FormatError::new(feed, e.to_string(), body))?;
    items_from_tree(feed, &tree)
}
