//! In-memory chunk tree handed to the chunk codec.
//!
//! A [`ChunkNode`] is a named record of typed items plus ordered child
//! chunks. Items and children are addressed by name and, when repeated,
//! by a zero-based index. Setting an item that already exists under the
//! same address replaces it in place.

mod builder;
mod guid;

pub use builder::{
    GHPYTHON_SCRIPT_ID, INPUT_PARAM_ID, OUTPUT_PARAM_ID, build_user_object,
};
pub use guid::{GuidSource, RandomGuids};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Serialize, Serializer};
use uuid::Uuid;

/// Name of both the root chunk and the nested script body chunk.
pub const USER_OBJECT: &str = "UserObject";

/// A typed scalar stored on a chunk.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ChunkValue {
    String(String),
    Int32(i32),
    Boolean(bool),
    #[serde(serialize_with = "serialize_base64")]
    ByteArray(Vec<u8>),
    Guid(Uuid),
}

fn serialize_base64<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&STANDARD.encode(bytes))
}

/// A named, optionally indexed value.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChunkItem {
    pub name: String,
    pub index: Option<u32>,
    #[serde(flatten)]
    pub value: ChunkValue,
}

/// A named record holding typed items and nested chunks.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ChunkNode {
    name: String,
    index: Option<u32>,
    items: Vec<ChunkItem>,
    chunks: Vec<ChunkNode>,
}

impl ChunkNode {
    /// Creates an empty chunk.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Creates an empty indexed chunk.
    pub fn indexed(name: impl Into<String>, index: u32) -> Self {
        Self {
            name: name.into(),
            index: Some(index),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn index(&self) -> Option<u32> {
        self.index
    }

    pub fn items(&self) -> &[ChunkItem] {
        &self.items
    }

    pub fn chunks(&self) -> &[ChunkNode] {
        &self.chunks
    }

    fn set(&mut self, name: &str, index: Option<u32>, value: ChunkValue) {
        match self
            .items
            .iter_mut()
            .find(|item| item.name == name && item.index == index)
        {
            Some(item) => item.value = value,
            None => self.items.push(ChunkItem {
                name: name.to_string(),
                index,
                value,
            }),
        }
    }

    pub fn set_string(&mut self, name: &str, value: impl Into<String>) {
        self.set(name, None, ChunkValue::String(value.into()));
    }

    pub fn set_int32(&mut self, name: &str, value: i32) {
        self.set(name, None, ChunkValue::Int32(value));
    }

    pub fn set_boolean(&mut self, name: &str, value: bool) {
        self.set(name, None, ChunkValue::Boolean(value));
    }

    pub fn set_byte_array(&mut self, name: &str, value: Vec<u8>) {
        self.set(name, None, ChunkValue::ByteArray(value));
    }

    pub fn set_guid(&mut self, name: &str, value: Uuid) {
        self.set(name, None, ChunkValue::Guid(value));
    }

    /// Sets the `index`-th GUID of a repeated item.
    pub fn set_guid_at(&mut self, name: &str, index: u32, value: Uuid) {
        self.set(name, Some(index), ChunkValue::Guid(value));
    }

    /// Appends a child chunk and returns it for population.
    pub fn create_chunk(&mut self, name: &str) -> &mut ChunkNode {
        self.push_chunk(ChunkNode::new(name))
    }

    /// Appends an indexed child chunk and returns it for population.
    pub fn create_chunk_at(&mut self, name: &str, index: u32) -> &mut ChunkNode {
        self.push_chunk(ChunkNode::indexed(name, index))
    }

    /// Appends an already built child chunk.
    pub fn push_chunk(&mut self, chunk: ChunkNode) -> &mut ChunkNode {
        self.chunks.push(chunk);
        let last = self.chunks.len() - 1;
        &mut self.chunks[last]
    }

    /// Looks up an item by name and index.
    pub fn item_at(&self, name: &str, index: Option<u32>) -> Option<&ChunkValue> {
        self.items
            .iter()
            .find(|item| item.name == name && item.index == index)
            .map(|item| &item.value)
    }

    /// Looks up an unindexed item.
    pub fn item(&self, name: &str) -> Option<&ChunkValue> {
        self.item_at(name, None)
    }

    pub fn get_string(&self, name: &str) -> Option<&str> {
        match self.item(name)? {
            ChunkValue::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn get_int32(&self, name: &str) -> Option<i32> {
        match self.item(name)? {
            ChunkValue::Int32(value) => Some(*value),
            _ => None,
        }
    }

    pub fn get_boolean(&self, name: &str) -> Option<bool> {
        match self.item(name)? {
            ChunkValue::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    pub fn get_byte_array(&self, name: &str) -> Option<&[u8]> {
        match self.item(name)? {
            ChunkValue::ByteArray(value) => Some(value),
            _ => None,
        }
    }

    pub fn get_guid(&self, name: &str) -> Option<Uuid> {
        self.get_guid_at(name, None)
    }

    pub fn get_guid_at(&self, name: &str, index: Option<u32>) -> Option<Uuid> {
        match self.item_at(name, index)? {
            ChunkValue::Guid(value) => Some(*value),
            _ => None,
        }
    }

    /// Looks up a child chunk by name and index.
    pub fn chunk_at(&self, name: &str, index: Option<u32>) -> Option<&ChunkNode> {
        self.chunks
            .iter()
            .find(|chunk| chunk.name == name && chunk.index == index)
    }

    /// Looks up an unindexed child chunk.
    pub fn chunk(&self, name: &str) -> Option<&ChunkNode> {
        self.chunk_at(name, None)
    }

    /// Detaches an unindexed child chunk.
    pub fn take_chunk(&mut self, name: &str) -> Option<ChunkNode> {
        let position = self
            .chunks
            .iter()
            .position(|chunk| chunk.name == name && chunk.index.is_none())?;
        Some(self.chunks.remove(position))
    }
}
