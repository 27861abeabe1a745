//! Session persistence seam for grappelli
//!
//! Flash messages survive a redirect by being written into a user-scoped
//! session store between requests. This crate defines the [`SessionBackend`]
//! contract that the message store consumes, plus two backends:
//!
//! - [`MemoryBackend`]: process-local key-value store, the default for tests
//!   and single-process applications
//! - [`CookieBackend`]: serializes values into RFC 6265-safe cookie strings
//!   with a size limit
//!
//! Backends use interior mutability so one instance can be shared across
//! sequential request cycles behind an `Arc`.

pub mod cookie;
pub mod memory;

use serde_json::Value;
use thiserror::Error;

/// Errors raised by session backends.
#[derive(Debug, Error)]
pub enum SessionError {
	/// The underlying store could not be reached or refused the operation.
	#[error("session backend unavailable: {0}")]
	Unavailable(String),

	/// The serialized value does not fit the backend's size limit.
	#[error("session value of {size} bytes exceeds the {limit} byte limit")]
	ValueTooLarge { size: usize, limit: usize },

	/// The value could not be serialized for storage.
	#[error("session value serialization failed: {0}")]
	Serialization(#[from] serde_json::Error),
}

/// Key-value persistence scoped to a user session.
///
/// The contract is deliberately small: `get` resolves to `None` for absent
/// keys rather than an error, and `set` wholesale-replaces any existing
/// value under the key.
pub trait SessionBackend: Send + Sync {
	/// Read the value stored under `key`, if any.
	fn get(&self, key: &str) -> Result<Option<Value>, SessionError>;

	/// Store `value` under `key`, replacing any previous value.
	fn set(&self, key: &str, value: Value) -> Result<(), SessionError>;

	/// Delete the value stored under `key`. Absent keys are a no-op.
	fn remove(&self, key: &str) -> Result<(), SessionError>;
}

pub use cookie::CookieBackend;
pub use memory::MemoryBackend;
