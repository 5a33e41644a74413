//! The flat tag-to-value mapping produced by the builder.
//!
//! A [`CifDocument`] keeps tags in first-insertion order. Re-inserting a
//! tag replaces its entry in place (last write wins, original position
//! kept). Two reserved keys sit outside the tag namespace: [`BLOCK_NAME_KEY`]
//! for the `data_` header name and [`GARBAGE_KEY`] for values that could not
//! be attributed to any tag. Tags always start with `_`, so neither reserved
//! key can collide with one.

use rustc_hash::FxHashMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Reserved key holding the block name from the `data_` header.
pub const BLOCK_NAME_KEY: &str = "data_";

/// Reserved key holding orphaned values.
pub const GARBAGE_KEY: &str = "garbage_";

/// Value stored under a tag.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(untagged)]
pub enum CifEntry {
    /// A tag/value pair outside any loop.
    Scalar(String),
    /// One column of a `loop_`, values in row order.
    Column(Vec<String>),
}

impl CifEntry {
    /// The scalar value, if this is a scalar entry.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            CifEntry::Scalar(value) => Some(value),
            CifEntry::Column(_) => None,
        }
    }

    /// The column values, if this is a loop column.
    pub fn as_column(&self) -> Option<&[String]> {
        match self {
            CifEntry::Column(values) => Some(values),
            CifEntry::Scalar(_) => None,
        }
    }
}

/// Result of looking up any key, reserved keys included.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lookup<'a> {
    /// A single value: a scalar tag or the block name.
    Value(&'a str),
    /// An ordered list: a loop column or the garbage list.
    List(&'a [String]),
}

/// Flat mapping from tag name to scalar or column.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CifDocument {
    block_name: Option<String>,
    entries: Vec<(String, CifEntry)>,
    index: FxHashMap<String, usize>,
    garbage: Vec<String>,
}

impl CifDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Name from the last `data_` header, if any.
    pub fn block_name(&self) -> Option<&str> {
        self.block_name.as_deref()
    }

    /// Values that could not be attributed to a tag, in source order.
    pub fn garbage(&self) -> &[String] {
        &self.garbage
    }

    /// Entry stored under `tag`. Reserved keys are not tags; see [`Self::lookup`].
    pub fn get(&self, tag: &str) -> Option<&CifEntry> {
        self.index.get(tag).map(|&i| &self.entries[i].1)
    }

    /// Scalar value stored under `tag`.
    pub fn scalar(&self, tag: &str) -> Option<&str> {
        self.get(tag).and_then(CifEntry::as_scalar)
    }

    /// Column stored under `tag`.
    pub fn column(&self, tag: &str) -> Option<&[String]> {
        self.get(tag).and_then(CifEntry::as_column)
    }

    /// Look up any key, including [`BLOCK_NAME_KEY`] and [`GARBAGE_KEY`].
    pub fn lookup(&self, key: &str) -> Option<Lookup<'_>> {
        match key {
            BLOCK_NAME_KEY => self.block_name().map(Lookup::Value),
            GARBAGE_KEY => Some(Lookup::List(&self.garbage)),
            _ => self.get(key).map(|entry| match entry {
                CifEntry::Scalar(value) => Lookup::Value(value),
                CifEntry::Column(values) => Lookup::List(values),
            }),
        }
    }

    /// Returns `true` if `tag` has an entry.
    pub fn contains_tag(&self, tag: &str) -> bool {
        self.index.contains_key(tag)
    }

    /// Tags in document order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(tag, _)| tag.as_str())
    }

    /// All keys in document order: the block name key (when a header was
    /// seen), every tag, then the garbage key.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.block_name
            .as_ref()
            .map(|_| BLOCK_NAME_KEY)
            .into_iter()
            .chain(self.tags())
            .chain(std::iter::once(GARBAGE_KEY))
    }

    /// Tag entries in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CifEntry)> {
        self.entries.iter().map(|(tag, entry)| (tag.as_str(), entry))
    }

    /// Number of tag entries. Reserved keys are not counted.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no tag has an entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // ─── Construction (builder only) ────────────────────────────────

    pub(crate) fn set_block_name(&mut self, name: &str) {
        self.block_name = Some(name.to_owned());
    }

    /// Store `entry` under `tag`, replacing any earlier entry in place.
    pub(crate) fn insert(&mut self, tag: &str, entry: CifEntry) {
        if let Some(&i) = self.index.get(tag) {
            self.entries[i].1 = entry;
        } else {
            self.index.insert(tag.to_owned(), self.entries.len());
            self.entries.push((tag.to_owned(), entry));
        }
    }

    pub(crate) fn push_garbage(&mut self, value: &str) {
        self.garbage.push(value.to_owned());
    }
}

/// Serializes as a map in [`CifDocument::keys`] order: scalars as strings,
/// columns and garbage as sequences.
impl Serialize for CifDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let reserved = 1 + usize::from(self.block_name.is_some());
        let mut map = serializer.serialize_map(Some(self.entries.len() + reserved))?;
        if let Some(name) = &self.block_name {
            map.serialize_entry(BLOCK_NAME_KEY, name)?;
        }
        for (tag, entry) in &self.entries {
            map.serialize_entry(tag, entry)?;
        }
        map.serialize_entry(GARBAGE_KEY, &self.garbage)?;
        map.end()
    }
}

#[cfg(test)]
mod tests;
