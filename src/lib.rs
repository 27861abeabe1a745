//! # Grappelli
//!
//! Session-backed flash messages for Rust web applications: notifications
//! added during one request survive the redirect and are consumed (rendered
//! once, then discarded) on the next.
//!
//! The framework is split into two crates, re-exported here:
//!
//! - [`grappelli_messages`]: the [`FlashStore`] lifecycle, message levels,
//!   bucket model, configuration, and template rendering
//! - [`grappelli_sessions`]: the [`SessionBackend`] persistence seam and
//!   the bundled memory/cookie backends
//!
//! ## Quick start
//!
//! ```
//! use std::sync::Arc;
//! use grappelli::prelude::*;
//!
//! # fn main() -> Result<(), FlashError> {
//! // One backend per user session, shared across request cycles
//! let backend: Arc<dyn SessionBackend> = Arc::new(MemoryBackend::new());
//!
//! // Request 1: handle a form post, flash a message, redirect
//! let mut store = FlashStore::new(Arc::clone(&backend))?;
//! store.init()?;
//! store.success("Saved!");
//!
//! // Request 2: render the surviving message into the page
//! let mut store = FlashStore::new(backend)?;
//! store.init()?;
//! let html = store.render(&Level::Success)?.unwrap();
//! assert!(html.contains("Saved!"));
//! # Ok(())
//! # }
//! ```

pub use grappelli_messages::{
	Bucket, Entries, EntryKey, FlashConfig, FlashError, FlashStore, IdentityTranslator, Level,
	Payload, TemplateRenderer, TeraRenderer, Translator,
};
pub use grappelli_sessions::{CookieBackend, MemoryBackend, SessionBackend, SessionError};

/// Re-export commonly used types
pub mod prelude {
	pub use grappelli_messages::prelude::*;
	pub use grappelli_sessions::{CookieBackend, MemoryBackend, SessionBackend, SessionError};
}
