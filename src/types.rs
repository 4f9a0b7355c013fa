//! Input records for notegraph
//!
//! These mirror the shapes returned by the notes API. Decoding is lenient:
//! missing or malformed fields degrade to empty values instead of failing,
//! so a single bad record never prevents the rest of a snapshot from being
//! graphed.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::path::Path;

use crate::error::Result;

/// Identifier of a note record
pub type NoteId = i64;

/// Identifier of a tag record
pub type TagId = i64;

/// Identifier of an image record
pub type ImageId = i64;

/// A note as returned by the notes API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Note identifier; `None` when the record carried no usable id
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<NoteId>,
    /// Note title, used as the node label
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    /// Outgoing wikilinks
    #[serde(default, deserialize_with = "lenient_ids")]
    pub linked_notes: Vec<NoteId>,
    /// Notes that link to this one
    #[serde(default, deserialize_with = "lenient_ids")]
    pub backlinks: Vec<NoteId>,
    /// Tags attached to the note
    #[serde(default, deserialize_with = "lenient_records")]
    pub tags: Vec<Tag>,
    /// Images attached to the note
    #[serde(default, deserialize_with = "lenient_ids")]
    pub image_ids: Vec<ImageId>,
}

impl Note {
    pub fn new(id: NoteId, title: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_links(mut self, linked_notes: Vec<NoteId>) -> Self {
        self.linked_notes = linked_notes;
        self
    }

    pub fn with_backlinks(mut self, backlinks: Vec<NoteId>) -> Self {
        self.backlinks = backlinks;
        self
    }

    pub fn with_tag(mut self, id: TagId, name: impl Into<String>) -> Self {
        self.tags.push(Tag::new(id, name));
        self
    }

    pub fn with_images(mut self, image_ids: Vec<ImageId>) -> Self {
        self.image_ids = image_ids;
        self
    }
}

/// A tag record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<TagId>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
}

impl Tag {
    pub fn new(id: TagId, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
        }
    }
}

/// An image record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Image {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<ImageId>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub filename: String,
}

impl Image {
    pub fn new(id: ImageId, filename: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            filename: filename.into(),
        }
    }
}

/// A fetched collection of notes, tags and images
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, deserialize_with = "lenient_records")]
    pub notes: Vec<Note>,
    #[serde(default, deserialize_with = "lenient_records")]
    pub tags: Vec<Tag>,
    #[serde(default, deserialize_with = "lenient_records")]
    pub images: Vec<Image>,
}

impl Snapshot {
    /// Parse a snapshot from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a snapshot file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }
}

fn value_to_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        _ => None,
    }
}

fn lenient_id<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_id(&value))
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        _ => Ok(String::new()),
    }
}

/// Non-array values decode to empty; non-numeric elements are skipped.
fn lenient_ids<'de, D>(deserializer: D) -> std::result::Result<Vec<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items.iter().filter_map(value_to_id).collect()),
        _ => Ok(Vec::new()),
    }
}

/// Non-array values decode to empty; elements that fail to decode are skipped.
fn lenient_records<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect()),
        _ => Ok(Vec::new()),
    }
}
