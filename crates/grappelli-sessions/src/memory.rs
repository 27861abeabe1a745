//! In-memory session backend

use crate::{SessionBackend, SessionError};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;

/// Process-local session store.
///
/// Values live in a `RwLock`-guarded map, so a single backend instance can
/// be shared behind an `Arc` across sequential request cycles.
///
/// # Examples
///
/// ```
/// use grappelli_sessions::{MemoryBackend, SessionBackend};
/// use serde_json::json;
///
/// let backend = MemoryBackend::new();
/// backend.set("flash", json!({"info": {"0": "hello"}})).unwrap();
/// assert!(backend.get("flash").unwrap().is_some());
/// ```
#[derive(Debug, Default)]
pub struct MemoryBackend {
	values: RwLock<HashMap<String, Value>>,
}

impl MemoryBackend {
	/// Create an empty backend.
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of stored keys.
	pub fn len(&self) -> usize {
		let values = self.values.read().unwrap_or_else(|e| e.into_inner());
		values.len()
	}

	/// Whether the backend holds no values at all.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl SessionBackend for MemoryBackend {
	fn get(&self, key: &str) -> Result<Option<Value>, SessionError> {
		let values = self.values.read().unwrap_or_else(|e| e.into_inner());
		Ok(values.get(key).cloned())
	}

	fn set(&self, key: &str, value: Value) -> Result<(), SessionError> {
		let mut values = self.values.write().unwrap_or_else(|e| e.into_inner());
		values.insert(key.to_string(), value);
		Ok(())
	}

	fn remove(&self, key: &str) -> Result<(), SessionError> {
		let mut values = self.values.write().unwrap_or_else(|e| e.into_inner());
		values.remove(key);
		Ok(())
	}
}
