//! Content capabilities consumed by the helpers.
//!
//! The helpers never talk to a CMS directly. They see two narrow traits:
//!
//! - [`ContentNode`]: an already-fetched content or media item with an id, a
//!   URL and named properties. Property reads return `Result` so "not defined
//!   on this content type" is an ordinary branch, not an exception.
//! - [`ContentRepository`]: resolves a media or content identifier to a node.
//!   Malformed identifiers resolve to `None`.
//!
//! [`MediaRef`] is the argument type of the media helpers. It accepts a
//! numeric id, a string id (numeric, UDI or GUID) or a node the view already
//! holds, and normalizes blank input to the root id before lookup.
//!
//! [`crate::store::ContentStore`] is the in-crate adapter implementing both
//! traits over JSON data.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use thiserror::Error;

/// Id of the content root. Repositories resolve it to "not found".
pub const ROOT_ID: &str = "0";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PropertyError {
    #[error("property '{0}' is not defined on this node")]
    Missing(String),
    #[error("property '{alias}' cannot be read as {expected}")]
    TypeMismatch {
        alias: String,
        expected: &'static str,
    },
}

/// A stored property value.
///
/// Reads are lenient in the way CMS property converters are: numbers and
/// flags render as text, numeric text and whole decimals parse as integers,
/// and `"1"`/`"0"` read as flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Flag(bool),
    Integer(i64),
    Decimal(f64),
    Text(String),
}

impl PropertyValue {
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            PropertyValue::Text(s) => Cow::Borrowed(s),
            PropertyValue::Integer(n) => Cow::Owned(n.to_string()),
            PropertyValue::Decimal(n) => Cow::Owned(n.to_string()),
            PropertyValue::Flag(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            PropertyValue::Integer(n) => Some(*n),
            // Only whole values; 4.5 is not an integer.
            PropertyValue::Decimal(n) if n.is_finite() && n.fract() == 0.0 => Some(*n as i64),
            PropertyValue::Decimal(_) => None,
            PropertyValue::Text(s) => s.trim().parse().ok(),
            PropertyValue::Flag(_) => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            PropertyValue::Flag(b) => Some(*b),
            PropertyValue::Integer(0) => Some(false),
            PropertyValue::Integer(1) => Some(true),
            PropertyValue::Integer(_) | PropertyValue::Decimal(_) => None,
            PropertyValue::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "" | "0" | "false" => Some(false),
                "1" | "true" => Some(true),
                _ => None,
            },
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Text(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Integer(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Decimal(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Flag(value)
    }
}

/// A resolved content or media item.
pub trait ContentNode {
    fn id(&self) -> &str;

    /// Resolved URL, absolute or site-relative.
    fn url(&self) -> &str;

    /// Raw property lookup by alias.
    fn property(&self, alias: &str) -> Result<&PropertyValue, PropertyError>;

    /// URL of a named crop of this media item, if the crop is defined.
    fn crop_url(&self, _alias: &str) -> Option<String> {
        None
    }

    fn text(&self, alias: &str) -> Result<String, PropertyError> {
        Ok(self.property(alias)?.as_text().into_owned())
    }

    fn integer(&self, alias: &str) -> Result<i64, PropertyError> {
        self.property(alias)?
            .as_integer()
            .ok_or_else(|| PropertyError::TypeMismatch {
                alias: alias.to_string(),
                expected: "an integer",
            })
    }

    fn flag(&self, alias: &str) -> Result<bool, PropertyError> {
        self.property(alias)?
            .as_flag()
            .ok_or_else(|| PropertyError::TypeMismatch {
                alias: alias.to_string(),
                expected: "a flag",
            })
    }
}

/// Resolves identifiers into nodes.
///
/// Implementations must return `None` for unknown, root or malformed ids.
pub trait ContentRepository {
    fn media(&self, id: &str) -> Option<&dyn ContentNode>;
    fn content(&self, id: &str) -> Option<&dyn ContentNode>;
}

/// Reads a text property, treating any property error as an empty string.
pub(crate) fn text_or_empty(node: &dyn ContentNode, alias: &str) -> String {
    node.text(alias).unwrap_or_else(|err| {
        tracing::debug!(node = node.id(), "{err}");
        String::new()
    })
}

/// A reference to a media item as passed in from a view.
#[derive(Clone, Copy)]
pub enum MediaRef<'a> {
    Id(i64),
    /// Numeric string, UDI (`umb://media/...`) or GUID key.
    Key(&'a str),
    Node(&'a dyn ContentNode),
    Missing,
}

impl<'a> MediaRef<'a> {
    /// The identifier handed to the repository. Blank keys and missing
    /// references become [`ROOT_ID`].
    pub fn lookup_id(&self) -> Option<Cow<'a, str>> {
        match *self {
            MediaRef::Id(id) => Some(Cow::Owned(id.to_string())),
            MediaRef::Key(key) if key.trim().is_empty() => Some(Cow::Borrowed(ROOT_ID)),
            MediaRef::Key(key) => Some(Cow::Borrowed(key.trim())),
            MediaRef::Missing => Some(Cow::Borrowed(ROOT_ID)),
            MediaRef::Node(_) => None,
        }
    }

    /// Resolve to a node, looking ids up in the media section of `repo`.
    pub fn resolve(self, repo: &'a dyn ContentRepository) -> Option<&'a dyn ContentNode> {
        if let MediaRef::Node(node) = self {
            return Some(node);
        }
        let id = self.lookup_id()?;
        let node = repo.media(&id);
        if node.is_none() {
            tracing::debug!(id = %id, "media reference did not resolve");
        }
        node
    }
}

impl fmt::Debug for MediaRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaRef::Id(id) => f.debug_tuple("Id").field(id).finish(),
            MediaRef::Key(key) => f.debug_tuple("Key").field(key).finish(),
            MediaRef::Node(node) => f.debug_tuple("Node").field(&node.id()).finish(),
            MediaRef::Missing => f.write_str("Missing"),
        }
    }
}

impl From<i64> for MediaRef<'_> {
    fn from(id: i64) -> Self {
        MediaRef::Id(id)
    }
}

impl<'a> From<&'a str> for MediaRef<'a> {
    fn from(key: &'a str) -> Self {
        MediaRef::Key(key)
    }
}

impl<'a> From<&'a String> for MediaRef<'a> {
    fn from(key: &'a String) -> Self {
        MediaRef::Key(key)
    }
}

impl<'a> From<Option<&'a str>> for MediaRef<'a> {
    fn from(key: Option<&'a str>) -> Self {
        key.map_or(MediaRef::Missing, MediaRef::Key)
    }
}

impl<'a> From<&'a dyn ContentNode> for MediaRef<'a> {
    fn from(node: &'a dyn ContentNode) -> Self {
        MediaRef::Node(node)
    }
}

impl<'a> From<Option<&'a dyn ContentNode>> for MediaRef<'a> {
    fn from(node: Option<&'a dyn ContentNode>) -> Self {
        node.map_or(MediaRef::Missing, MediaRef::Node)
    }
}
