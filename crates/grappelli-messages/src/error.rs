//! Error types for the flash message framework

use grappelli_sessions::SessionError;
use thiserror::Error;

/// Errors surfaced by the flash store and its collaborators.
///
/// Absent messages are never an error: reads resolve to empty collections,
/// renders to `Ok(None)`. These variants cover collaborator faults only.
#[derive(Debug, Error)]
pub enum FlashError {
	#[error("session backend error: {0}")]
	Session(#[from] SessionError),

	#[error("template rendering failed: {0}")]
	Template(#[from] tera::Error),

	#[error("configuration parse error: {0}")]
	Config(#[from] toml::de::Error),

	#[error("configuration file error: {0}")]
	Io(#[from] std::io::Error),

	#[error("bucket serialization failed: {0}")]
	Serialization(#[from] serde_json::Error),
}
