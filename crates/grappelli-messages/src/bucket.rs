//! Bucket model shared by the three flash buffers
//!
//! A [`Bucket`] maps a [`Level`] to its [`Entries`]. The same shape backs
//! all three buffers the store reconciles: messages carried over from the
//! previous request, messages staged during the current request, and the
//! merged view used for reads and rendering.

use crate::levels::Level;
use indexmap::IndexMap;
use serde::de::{Deserializer, Error as DeError, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Key of a single bucket entry.
///
/// Entries conflate indexed-list and keyed-map semantics: messages added one
/// at a time get sequential integer keys, messages added as an associative
/// set keep their string keys. Both kinds coexist inside one [`Entries`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryKey {
	Index(u64),
	Name(String),
}

impl Serialize for EntryKey {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			EntryKey::Index(index) => serializer.collect_str(index),
			EntryKey::Name(name) => serializer.serialize_str(name),
		}
	}
}

impl<'de> Deserialize<'de> for EntryKey {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		struct KeyVisitor;

		impl Visitor<'_> for KeyVisitor {
			type Value = EntryKey;

			fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
				f.write_str("an entry key string")
			}

			fn visit_str<E: DeError>(self, value: &str) -> Result<EntryKey, E> {
				// Digit-only keys round-trip back to list indices
				if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
					if let Ok(index) = value.parse::<u64>() {
						return Ok(EntryKey::Index(index));
					}
				}
				Ok(EntryKey::Name(value.to_string()))
			}
		}

		deserializer.deserialize_str(KeyVisitor)
	}
}

/// Ordered collection of message strings under one level.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Entries {
	items: IndexMap<EntryKey, String>,
	#[serde(skip)]
	next_index: u64,
}

impl Entries {
	/// Append `text` under the next list index.
	pub fn push(&mut self, text: impl Into<String>) {
		let key = EntryKey::Index(self.next_index);
		self.next_index += 1;
		self.items.insert(key, text.into());
	}

	/// Insert `text` under a string key, overwriting any previous value.
	pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
		self.items.insert(EntryKey::Name(key.into()), text.into());
	}

	/// Key-based union with `other`; incoming entries win on collision.
	pub fn merge(&mut self, other: Entries) {
		for (key, value) in other.items {
			if let EntryKey::Index(index) = key {
				self.next_index = self.next_index.max(index + 1);
			}
			self.items.insert(key, value);
		}
	}

	/// Whether an entry is stored *under the key* `text`.
	pub fn contains_name(&self, text: &str) -> bool {
		self.items
			.keys()
			.any(|key| matches!(key, EntryKey::Name(name) if name == text))
	}

	/// Remove the entry whose key or value equals `message`.
	///
	/// Returns `true` if an entry was removed. Remaining entries keep their
	/// relative order.
	pub fn remove(&mut self, message: &str) -> bool {
		let position = self.items.iter().position(|(key, value)| {
			matches!(key, EntryKey::Name(name) if name == message) || value == message
		});
		match position {
			Some(index) => {
				self.items.shift_remove_index(index);
				true
			}
			None => false,
		}
	}

	/// Message strings in insertion order.
	pub fn values(&self) -> impl Iterator<Item = &str> {
		self.items.values().map(String::as_str)
	}

	/// Iterate `(key, message)` pairs in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&EntryKey, &str)> {
		self.items.iter().map(|(key, value)| (key, value.as_str()))
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}
}

impl<'de> Deserialize<'de> for Entries {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let items = IndexMap::<EntryKey, String>::deserialize(deserializer)?;
		let next_index = items
			.keys()
			.filter_map(|key| match key {
				EntryKey::Index(index) => Some(index + 1),
				EntryKey::Name(_) => None,
			})
			.max()
			.unwrap_or(0);
		Ok(Self { items, next_index })
	}
}

/// Mapping from message level to its entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bucket {
	slots: IndexMap<Level, Entries>,
}

impl Bucket {
	/// Pure overlay merge: `current` overlaid with `new`, per level, with
	/// `new` entries taking precedence on key collision.
	pub fn overlay(current: &Bucket, new: &Bucket) -> Bucket {
		let mut merged = current.clone();
		for (level, entries) in &new.slots {
			merged.slot_mut(level.clone()).merge(entries.clone());
		}
		merged
	}

	/// Entries stored under `level`, if the slot exists.
	pub fn entries(&self, level: &Level) -> Option<&Entries> {
		self.slots.get(level)
	}

	/// Entries under `level`, creating the slot on first use.
	pub fn slot_mut(&mut self, level: Level) -> &mut Entries {
		self.slots.entry(level).or_default()
	}

	/// Whether `level` holds at least one message.
	pub fn has(&self, level: &Level) -> bool {
		self.slots.get(level).is_some_and(|entries| !entries.is_empty())
	}

	/// Levels present in the bucket, in insertion order.
	pub fn levels(&self) -> Vec<Level> {
		self.slots.keys().cloned().collect()
	}

	/// Remove the `message` entry under `level`, by key or value.
	/// Absent slots and absent entries are silently ignored.
	pub fn remove_message(&mut self, level: &Level, message: &str) {
		if let Some(entries) = self.slots.get_mut(level) {
			entries.remove(message);
		}
	}

	/// Drop the whole slot for `level`.
	pub fn clear_level(&mut self, level: &Level) {
		self.slots.shift_remove(level);
	}

	/// Drop every slot.
	pub fn clear(&mut self) {
		self.slots.clear();
	}

	/// True when no slot holds any message.
	pub fn is_empty(&self) -> bool {
		self.slots.values().all(Entries::is_empty)
	}
}
