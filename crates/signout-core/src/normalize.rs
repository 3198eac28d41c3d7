//! Text normalization for list-type hand-off fields.
//!
//! Action items, situational-awareness notes, and contingency plans may be
//! typed as one block of text or sent as a list. Both collapse to the same
//! canonical form: an ordered list of trimmed, non-empty items.

use serde_json::Value;

use crate::error::SignoutError;

/// The two accepted shapes of a list field at the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListInput {
    /// Newline-separated text, one item per line.
    TextBlock(String),
    /// Items already split by the client.
    StringList(Vec<String>),
}

impl ListInput {
    /// Resolve a JSON value into a list input.
    ///
    /// `null` means the field was omitted. Numbers, booleans, objects, and
    /// lists holding anything other than strings are rejected.
    pub fn from_json(field: &'static str, value: Value) -> Result<Option<Self>, SignoutError> {
        match value {
            Value::Null => Ok(None),
            Value::String(text) => Ok(Some(ListInput::TextBlock(text))),
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s),
                    _ => Err(SignoutError::InvalidFieldShape { field }),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(|items| Some(ListInput::StringList(items))),
            _ => Err(SignoutError::InvalidFieldShape { field }),
        }
    }
}

/// Characters that end a line in a text block. `\r\n` leaves an empty piece,
/// which the blank filter drops.
const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\u{0b}', '\u{0c}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{85}', '\u{2028}',
    '\u{2029}',
];

/// Collapse a list field into its canonical ordered items.
pub fn normalize(value: Option<&ListInput>) -> Vec<String> {
    match value {
        None => Vec::new(),
        Some(ListInput::TextBlock(text)) => clean(text.split(&LINE_BREAKS[..])),
        Some(ListInput::StringList(items)) => clean(items.iter().map(String::as_str)),
    }
}

/// Resolve and normalize a raw JSON field in one step.
pub fn normalize_json(field: &'static str, value: Value) -> Result<Vec<String>, SignoutError> {
    let input = ListInput::from_json(field, value)?;
    Ok(normalize(input.as_ref()))
}

fn clean<'a>(items: impl Iterator<Item = &'a str>) -> Vec<String> {
    items
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
