/*
 * Converts between the external JSON representation of a jump list and the typed
 * model. Parsing is all or nothing: one malformed category or item rejects the
 * whole list, which makes the update abort with `ArgumentError`.
 *
 * Category object: `type` ("tasks" | "frequent" | "recent" | "custom"), `name`,
 * `items`. Without a `type` the category is custom when it has a name and tasks
 * otherwise. Item object: `type` ("task" | "separator" | "file") plus `program`,
 * `arguments`, `title`, `description`, `iconPath`, `iconIndex` for tasks and
 * `path` for files.
 */
use super::models::{JumpListCategory, JumpListCategoryKind, JumpListItem, JumpListItemKind};
use serde_json::{Map, Value, json};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    NotAnArray,
    NotAnObject,
    MissingField(&'static str),
    WrongFieldType {
        field: &'static str,
        expected: &'static str,
    },
    EmptyField(&'static str),
    UnknownType(String),
    Category {
        index: usize,
        source: Box<ParseError>,
    },
    Item {
        index: usize,
        source: Box<ParseError>,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::NotAnArray => write!(f, "expected an array"),
            ParseError::NotAnObject => write!(f, "expected an object"),
            ParseError::MissingField(field) => write!(f, "missing field '{field}'"),
            ParseError::WrongFieldType { field, expected } => {
                write!(f, "field '{field}' must be {expected}")
            }
            ParseError::EmptyField(field) => write!(f, "field '{field}' must not be empty"),
            ParseError::UnknownType(name) => write!(f, "unknown type '{name}'"),
            ParseError::Category { index, source } => write!(f, "category {index}: {source}"),
            ParseError::Item { index, source } => write!(f, "item {index}: {source}"),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Category { source, .. } | ParseError::Item { source, .. } => {
                Some(source.as_ref())
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;

fn as_object(value: &Value) -> Result<&Map<String, Value>> {
    value.as_object().ok_or(ParseError::NotAnObject)
}

// Absent and `null` fields are treated the same.
fn optional_string(object: &Map<String, Value>, field: &'static str) -> Result<Option<String>> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(_) => Err(ParseError::WrongFieldType {
            field,
            expected: "a string",
        }),
    }
}

fn required_non_empty_string(object: &Map<String, Value>, field: &'static str) -> Result<String> {
    let text = optional_string(object, field)?.ok_or(ParseError::MissingField(field))?;
    if text.is_empty() {
        return Err(ParseError::EmptyField(field));
    }
    Ok(text)
}

fn parse_item_kind(value: &Value) -> Result<JumpListItemKind> {
    match value.as_str() {
        Some("task") => Ok(JumpListItemKind::Task),
        Some("separator") => Ok(JumpListItemKind::Separator),
        Some("file") => Ok(JumpListItemKind::File),
        Some(other) => Err(ParseError::UnknownType(other.to_string())),
        None => Err(ParseError::WrongFieldType {
            field: "type",
            expected: "a string",
        }),
    }
}

fn parse_category_kind(value: &Value) -> Result<JumpListCategoryKind> {
    match value.as_str() {
        Some("tasks") => Ok(JumpListCategoryKind::Tasks),
        Some("frequent") => Ok(JumpListCategoryKind::Frequent),
        Some("recent") => Ok(JumpListCategoryKind::Recent),
        Some("custom") => Ok(JumpListCategoryKind::Custom),
        Some(other) => Err(ParseError::UnknownType(other.to_string())),
        None => Err(ParseError::WrongFieldType {
            field: "type",
            expected: "a string",
        }),
    }
}

pub fn parse_item(value: &Value) -> Result<JumpListItem> {
    let object = as_object(value)?;
    let kind = parse_item_kind(object.get("type").ok_or(ParseError::MissingField("type"))?)?;

    match kind {
        JumpListItemKind::Task => {
            let program = required_non_empty_string(object, "program")?;
            let title = required_non_empty_string(object, "title")?;
            let mut item = JumpListItem::task(program, title)
                .with_arguments(optional_string(object, "arguments")?.unwrap_or_default())
                .with_description(optional_string(object, "description")?.unwrap_or_default());

            if let Some(icon_path) = optional_string(object, "iconPath")? {
                let icon_index = object
                    .get("iconIndex")
                    .ok_or(ParseError::MissingField("iconIndex"))?
                    .as_i64()
                    .and_then(|index| i32::try_from(index).ok())
                    .ok_or(ParseError::WrongFieldType {
                        field: "iconIndex",
                        expected: "an integer",
                    })?;
                item = item.with_icon(icon_path, icon_index);
            }
            Ok(item)
        }
        JumpListItemKind::Separator => Ok(JumpListItem::separator()),
        JumpListItemKind::File => Ok(JumpListItem::file(required_non_empty_string(
            object, "path",
        )?)),
    }
}

fn parse_entries(entries: &[Value]) -> Result<Vec<JumpListItem>> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            parse_item(entry).map_err(|e| ParseError::Item {
                index,
                source: Box::new(e),
            })
        })
        .collect()
}

fn parse_items(value: Option<&Value>) -> Result<Vec<JumpListItem>> {
    let entries = value
        .ok_or(ParseError::MissingField("items"))?
        .as_array()
        .ok_or(ParseError::WrongFieldType {
            field: "items",
            expected: "an array",
        })?;
    parse_entries(entries)
}

/// Parses a bare array of items, the shape of a user tasks list.
pub fn parse_item_array(value: &Value) -> Result<Vec<JumpListItem>> {
    parse_entries(value.as_array().ok_or(ParseError::NotAnArray)?)
}

pub fn parse_category(value: &Value) -> Result<JumpListCategory> {
    let object = as_object(value)?;

    let name = optional_string(object, "name")?;
    if name.as_deref() == Some("") {
        return Err(ParseError::EmptyField("name"));
    }

    let kind = match object.get("type") {
        Some(kind) => parse_category_kind(kind)?,
        None if name.is_some() => JumpListCategoryKind::Custom,
        None => JumpListCategoryKind::Tasks,
    };

    match kind {
        JumpListCategoryKind::Custom => {
            let name = name.ok_or(ParseError::MissingField("name"))?;
            Ok(JumpListCategory::custom(name, parse_items(object.get("items"))?))
        }
        JumpListCategoryKind::Tasks => Ok(JumpListCategory::tasks(parse_items(
            object.get("items"),
        )?)),
        JumpListCategoryKind::Frequent => Ok(JumpListCategory::frequent()),
        JumpListCategoryKind::Recent => Ok(JumpListCategory::recent()),
    }
}

pub fn parse_categories(value: &Value) -> Result<Vec<JumpListCategory>> {
    value
        .as_array()
        .ok_or(ParseError::NotAnArray)?
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            parse_category(entry).map_err(|e| ParseError::Category {
                index,
                source: Box::new(e),
            })
        })
        .collect()
}

fn path_text(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Encodes an item in the external shape, e.g. to hand removed items to a provider.
pub fn item_to_value(item: &JumpListItem) -> Value {
    match item.kind {
        JumpListItemKind::Task => json!({
            "type": "task",
            "program": path_text(&item.path),
            "arguments": item.arguments,
            "title": item.title,
            "iconPath": item.icon_path.as_deref().map(path_text).unwrap_or_default(),
            "iconIndex": item.icon_index,
            "description": item.description,
        }),
        JumpListItemKind::Separator => json!({ "type": "separator" }),
        JumpListItemKind::File => json!({
            "type": "file",
            "path": path_text(&item.path),
        }),
    }
}

pub fn items_to_value(items: &[JumpListItem]) -> Value {
    Value::Array(items.iter().map(item_to_value).collect())
}
