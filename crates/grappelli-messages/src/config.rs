//! Flash store configuration
//!
//! Configuration maps message levels to template identifiers and names the
//! session variable buckets persist under. Values load from TOML, with an
//! environment override for deployments that cannot ship a config file.

use crate::error::FlashError;
use crate::levels::Level;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Environment variable overriding [`FlashConfig::session_key`].
pub const ENV_SESSION_KEY: &str = "GRAPPELLI_SESSION_KEY";

/// Template identifier used when a level has no configured template.
pub const DEFAULT_TEMPLATE: &str = "default";

/// Configuration surface of the flash store.
///
/// ```toml
/// session_key = "flash"
///
/// [templates]
/// error = "messages/error"
/// success = "messages/success"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlashConfig {
	/// Session variable the buckets are persisted under.
	pub session_key: String,
	/// Level name to template identifier; empty or absent falls back to
	/// [`DEFAULT_TEMPLATE`].
	pub templates: IndexMap<String, String>,
}

impl Default for FlashConfig {
	fn default() -> Self {
		Self {
			session_key: "flash".to_string(),
			templates: IndexMap::new(),
		}
	}
}

impl FlashConfig {
	/// Parse a configuration from a TOML document.
	pub fn from_toml_str(source: &str) -> Result<Self, FlashError> {
		Ok(toml::from_str(source)?)
	}

	/// Load a configuration from a TOML file.
	pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FlashError> {
		Self::from_toml_str(&fs::read_to_string(path)?)
	}

	/// Default configuration with environment overrides applied.
	pub fn from_env() -> Self {
		Self::default().apply_env()
	}

	/// Apply environment overrides (`GRAPPELLI_SESSION_KEY`) on top of
	/// this configuration.
	pub fn apply_env(mut self) -> Self {
		if let Ok(session_key) = env::var(ENV_SESSION_KEY)
			&& !session_key.is_empty()
		{
			self.session_key = session_key;
		}
		self
	}

	/// Template identifier configured for `level`, falling back to
	/// [`DEFAULT_TEMPLATE`] when unset or empty.
	pub fn template_for(&self, level: &Level) -> &str {
		match self.templates.get(level.as_str()) {
			Some(template) if !template.is_empty() => template,
			_ => DEFAULT_TEMPLATE,
		}
	}
}
