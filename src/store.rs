//! In-memory content repository loaded from JSON.
//!
//! [`ContentStore`] is the adapter the crate ships for the
//! [`ContentRepository`] capability: a static export of the media and content
//! trees, used for fixtures, prerendered sites and tests.
//!
//! ```json
//! {
//!   "media": [
//!     {
//!       "id": 1101,
//!       "key": "9f3c2a4e-0b1d-4c55-a0e2-6d8f1b7c3e90",
//!       "url": "/media/1101/harbour.jpg",
//!       "properties": { "altText": "Harbour at dawn", "umbracoWidth": 2400 },
//!       "crops": { "hero": { "width": 1600, "height": 600 } },
//!       "focal_point": { "left": 0.5, "top": 0.3 }
//!     }
//!   ],
//!   "content": [
//!     { "id": 1050, "url": "/", "properties": { "seoNoindex": false } }
//!   ]
//! }
//! ```
//!
//! ## Identifiers
//!
//! Lookups accept a decimal id (`"1101"`), a UDI (`"umb://media/9f3c…"`, the
//! entity type must match the tree) or a bare GUID key. The root id `"0"`,
//! blank input and anything else resolve to `None`.

use crate::content::{ContentNode, ContentRepository, PropertyError, PropertyValue, ROOT_ID};
use crate::crop::{self, Crop, FocalPoint};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate {tree} id or key: {id}")]
    DuplicateId { tree: &'static str, id: String },
    #[error("{tree} id 0 is reserved for the root")]
    ReservedId { tree: &'static str },
}

/// A media or content item held by [`ContentStore`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawNode")]
pub struct StoredNode {
    id: String,
    key: Option<String>,
    url: String,
    properties: BTreeMap<String, PropertyValue>,
    crops: BTreeMap<String, Crop>,
    focal_point: Option<FocalPoint>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawNode {
    id: i64,
    #[serde(default)]
    key: Option<String>,
    url: String,
    #[serde(default)]
    properties: BTreeMap<String, PropertyValue>,
    #[serde(default)]
    crops: BTreeMap<String, Crop>,
    #[serde(default)]
    focal_point: Option<FocalPoint>,
}

impl From<RawNode> for StoredNode {
    fn from(raw: RawNode) -> Self {
        Self {
            id: raw.id.to_string(),
            key: raw.key.as_deref().map(normalize_key),
            url: raw.url,
            properties: raw.properties,
            crops: raw.crops,
            focal_point: raw.focal_point,
        }
    }
}

impl StoredNode {
    pub fn new(id: i64, url: impl Into<String>) -> Self {
        Self {
            id: id.to_string(),
            key: None,
            url: url.into(),
            properties: BTreeMap::new(),
            crops: BTreeMap::new(),
            focal_point: None,
        }
    }

    pub fn with_key(mut self, key: &str) -> Self {
        self.key = Some(normalize_key(key));
        self
    }

    pub fn with_property(mut self, alias: &str, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(alias.to_string(), value.into());
        self
    }

    pub fn with_crop(mut self, alias: &str, crop: Crop) -> Self {
        self.crops.insert(alias.to_string(), crop);
        self
    }

    pub fn with_focal_point(mut self, left: f64, top: f64) -> Self {
        self.focal_point = Some(FocalPoint { left, top });
        self
    }

    /// GUID key, lowercase without dashes.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }
}

impl ContentNode for StoredNode {
    fn id(&self) -> &str {
        &self.id
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn property(&self, alias: &str) -> Result<&PropertyValue, PropertyError> {
        self.properties
            .get(alias)
            .ok_or_else(|| PropertyError::Missing(alias.to_string()))
    }

    fn crop_url(&self, alias: &str) -> Option<String> {
        let crop = self.crops.get(alias)?;
        Some(crop::crop_url(&self.url, crop, self.focal_point.as_ref()))
    }
}

/// One tree (media or content) with id and key indexes.
#[derive(Debug, Default)]
struct Tree {
    nodes: Vec<StoredNode>,
    by_id: HashMap<String, usize>,
    by_key: HashMap<String, usize>,
}

impl Tree {
    fn insert(&mut self, tree: &'static str, node: StoredNode) -> Result<(), StoreError> {
        if node.id == ROOT_ID {
            return Err(StoreError::ReservedId { tree });
        }
        if self.by_id.contains_key(&node.id) {
            return Err(StoreError::DuplicateId {
                tree,
                id: node.id.clone(),
            });
        }
        if let Some(key) = &node.key {
            if self.by_key.contains_key(key) {
                return Err(StoreError::DuplicateId {
                    tree,
                    id: key.clone(),
                });
            }
            self.by_key.insert(key.clone(), self.nodes.len());
        }
        self.by_id.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        Ok(())
    }

    fn get(&self, udi_type: &str, id: &str) -> Option<&StoredNode> {
        let id = id.trim();
        if id.is_empty() || id == ROOT_ID {
            return None;
        }
        let index = if id.parse::<i64>().is_ok() {
            self.by_id.get(id)
        } else if let Some(rest) = id.strip_prefix("umb://") {
            let (entity, key) = rest.split_once('/')?;
            if !entity.eq_ignore_ascii_case(udi_type) || !is_guid(key) {
                return None;
            }
            self.by_key.get(&normalize_key(key))
        } else if is_guid(id) {
            self.by_key.get(&normalize_key(id))
        } else {
            None
        };
        index.map(|&i| &self.nodes[i])
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct StoreFile {
    #[serde(default)]
    media: Vec<StoredNode>,
    #[serde(default)]
    content: Vec<StoredNode>,
}

/// Media and content trees held in memory.
#[derive(Debug, Default)]
pub struct ContentStore {
    media: Tree,
    content: Tree,
}

impl ContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a store from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let file: StoreFile = serde_json::from_str(json)?;
        let mut store = Self::new();
        for node in file.media {
            store.insert_media(node)?;
        }
        for node in file.content {
            store.insert_content(node)?;
        }
        Ok(store)
    }

    /// Load a store from a JSON file.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn insert_media(&mut self, node: StoredNode) -> Result<(), StoreError> {
        self.media.insert("media", node)
    }

    pub fn insert_content(&mut self, node: StoredNode) -> Result<(), StoreError> {
        self.content.insert("content", node)
    }

    pub fn media_count(&self) -> usize {
        self.media.nodes.len()
    }

    pub fn content_count(&self) -> usize {
        self.content.nodes.len()
    }
}

impl ContentRepository for ContentStore {
    fn media(&self, id: &str) -> Option<&dyn ContentNode> {
        self.media
            .get("media", id)
            .map(|node| node as &dyn ContentNode)
    }

    fn content(&self, id: &str) -> Option<&dyn ContentNode> {
        self.content
            .get("document", id)
            .map(|node| node as &dyn ContentNode)
    }
}

/// GUIDs are compared lowercase with dashes removed, the form UDIs use.
fn normalize_key(key: &str) -> String {
    key.trim()
        .chars()
        .filter(|c| *c != '-')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn is_guid(value: &str) -> bool {
    let hex: Vec<char> = value.chars().filter(|c| *c != '-').collect();
    hex.len() == 32 && hex.iter().all(|c| c.is_ascii_hexdigit())
}
