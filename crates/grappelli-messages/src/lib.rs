//! Flash message framework core
//!
//! Short-lived user-facing notifications that survive exactly one
//! request/redirect cycle via a session store.
//!
//! ## Features
//!
//! - **Three-buffer reconciliation**: messages from the previous request,
//!   messages staged this request, and the merged view reads consume
//! - **Read-once delivery**: `get`/`render` drain what they return;
//!   `peek` variants inspect without consuming
//! - **Template rendering**: Tera-backed markup with per-level template
//!   configuration and a translation hook
//! - **Pluggable persistence**: any [`grappelli_sessions::SessionBackend`]
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use grappelli_messages::{FlashError, FlashStore, Level};
//! use grappelli_sessions::MemoryBackend;
//!
//! # fn main() -> Result<(), FlashError> {
//! let backend = Arc::new(MemoryBackend::new());
//! let mut store = FlashStore::new(backend)?;
//! store.init()?;
//!
//! store.success("Profile updated");
//! store.add(["name is required", "email is invalid"], Level::Error, true);
//!
//! if let Some(html) = store.render_all()? {
//!     assert!(html.contains("Profile updated"));
//! }
//! # Ok(())
//! # }
//! ```

pub mod bucket;
pub mod config;
pub mod error;
pub mod levels;
pub mod payload;
pub mod render;
pub mod store;

pub use bucket::{Bucket, Entries, EntryKey};
pub use config::FlashConfig;
pub use error::FlashError;
pub use levels::Level;
pub use payload::Payload;
pub use render::{IdentityTranslator, TemplateRenderer, TeraRenderer, Translator};
pub use store::FlashStore;

/// Re-export commonly used types
pub mod prelude {
	pub use crate::bucket::*;
	pub use crate::config::*;
	pub use crate::error::*;
	pub use crate::levels::*;
	pub use crate::payload::*;
	pub use crate::render::*;
	pub use crate::store::*;
}
