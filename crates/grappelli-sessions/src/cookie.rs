//! Cookie-value session backend

use crate::{SessionBackend, SessionError};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::warn;

/// Session backend that keeps values as RFC 6265-safe cookie strings.
///
/// Values are serialized to JSON, percent-encoded, and checked against a
/// size limit before being stored. Reads resolve malformed stored data to
/// `None`.
pub struct CookieBackend {
	jar: RwLock<HashMap<String, String>>,
	max_size: usize,
}

impl CookieBackend {
	/// Default maximum cookie size (4KB).
	pub const DEFAULT_MAX_SIZE: usize = 4096;

	/// Create a backend with the default size limit.
	pub fn new() -> Self {
		Self {
			jar: RwLock::new(HashMap::new()),
			max_size: Self::DEFAULT_MAX_SIZE,
		}
	}

	/// Set the maximum encoded size accepted by [`SessionBackend::set`].
	pub fn with_max_size(mut self, size: usize) -> Self {
		self.max_size = size;
		self
	}

	/// Maximum encoded value size.
	pub fn max_size(&self) -> usize {
		self.max_size
	}

	/// Raw encoded value under `key`, as it would appear in a `Set-Cookie`
	/// header.
	pub fn cookie_value(&self, key: &str) -> Option<String> {
		let jar = self.jar.read().unwrap_or_else(|e| e.into_inner());
		jar.get(key).cloned()
	}

	/// Percent-encode the characters RFC 6265 forbids in cookie values.
	///
	/// # Examples
	///
	/// ```
	/// use grappelli_sessions::CookieBackend;
	///
	/// let encoded = CookieBackend::encode(r#"a,b;c\d"e"#);
	/// assert!(!encoded.contains(','));
	/// assert!(!encoded.contains(';'));
	/// ```
	pub fn encode(text: &str) -> String {
		let mut result = String::with_capacity(text.len() * 2);
		for c in text.chars() {
			match c {
				',' => result.push_str("%2C"),
				';' => result.push_str("%3B"),
				'\\' => result.push_str("%5C"),
				'"' => result.push_str("%22"),
				_ => result.push(c),
			}
		}
		result
	}

	/// Reverse [`CookieBackend::encode`].
	pub fn decode(text: &str) -> String {
		text.replace("%2C", ",")
			.replace("%3B", ";")
			.replace("%5C", "\\")
			.replace("%22", "\"")
	}
}

impl Default for CookieBackend {
	fn default() -> Self {
		Self::new()
	}
}

impl SessionBackend for CookieBackend {
	fn get(&self, key: &str) -> Result<Option<Value>, SessionError> {
		let encoded = {
			let jar = self.jar.read().unwrap_or_else(|e| e.into_inner());
			jar.get(key).cloned()
		};
		let Some(encoded) = encoded else {
			return Ok(None);
		};

		// Bad cookie data means no messages, not an error
		match serde_json::from_str(&Self::decode(&encoded)) {
			Ok(value) => Ok(Some(value)),
			Err(error) => {
				warn!(%key, %error, "discarding malformed cookie session data");
				Ok(None)
			}
		}
	}

	fn set(&self, key: &str, value: Value) -> Result<(), SessionError> {
		let encoded = Self::encode(&serde_json::to_string(&value)?);
		if encoded.len() > self.max_size {
			return Err(SessionError::ValueTooLarge {
				size: encoded.len(),
				limit: self.max_size,
			});
		}

		let mut jar = self.jar.write().unwrap_or_else(|e| e.into_inner());
		jar.insert(key.to_string(), encoded);
		Ok(())
	}

	fn remove(&self, key: &str) -> Result<(), SessionError> {
		let mut jar = self.jar.write().unwrap_or_else(|e| e.into_inner());
		jar.remove(key);
		Ok(())
	}
}
