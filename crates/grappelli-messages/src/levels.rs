//! Message level definitions

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Severity/category tag classifying a flash message.
///
/// Four levels are predefined; anything else (for example a level introduced
/// through configuration) is carried as [`Level::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Level {
	Success,
	Error,
	Notice,
	Info,
	Custom(String),
}

impl Level {
	/// Returns the string representation of the level
	///
	/// # Examples
	///
	/// ```
	/// use grappelli_messages::Level;
	///
	/// assert_eq!(Level::Success.as_str(), "success");
	/// assert_eq!(Level::Error.as_str(), "error");
	/// assert_eq!(Level::Notice.as_str(), "notice");
	/// assert_eq!(Level::Info.as_str(), "info");
	/// ```
	pub fn as_str(&self) -> &str {
		match self {
			Level::Success => "success",
			Level::Error => "error",
			Level::Notice => "notice",
			Level::Info => "info",
			Level::Custom(name) => name,
		}
	}
}

impl From<&str> for Level {
	/// Parses a level from a string (case-insensitive for the predefined
	/// four); unknown names become [`Level::Custom`].
	///
	/// # Examples
	///
	/// ```
	/// use grappelli_messages::Level;
	///
	/// assert_eq!(Level::from("success"), Level::Success);
	/// assert_eq!(Level::from("INFO"), Level::Info);
	/// assert_eq!(Level::from("alert"), Level::Custom("alert".to_string()));
	/// ```
	fn from(s: &str) -> Self {
		match s.to_lowercase().as_str() {
			"success" => Level::Success,
			"error" => Level::Error,
			"notice" => Level::Notice,
			"info" => Level::Info,
			_ => Level::Custom(s.to_string()),
		}
	}
}

impl From<String> for Level {
	fn from(s: String) -> Self {
		Level::from(s.as_str())
	}
}

impl Default for Level {
	fn default() -> Self {
		Level::Info
	}
}

impl fmt::Display for Level {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl Serialize for Level {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(self.as_str())
	}
}

impl<'de> Deserialize<'de> for Level {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let name = String::deserialize(deserializer)?;
		Ok(Level::from(name))
	}
}
