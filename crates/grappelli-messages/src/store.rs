//! Session-backed flash message store
//!
//! [`FlashStore`] reconciles three buckets across a request cycle:
//!
//! - `current`: messages loaded from the session (the previous request's
//!   surviving messages)
//! - `pending`: messages added during this request, not yet persisted
//! - `merged`: `current` overlaid with `pending`, the view reads and
//!   renders consume
//!
//! A store is a per-request value: construct it with the session backend
//! for the request, call [`FlashStore::init`], and let it go out of scope
//! at end-of-request. One backend instance shared behind an `Arc` carries
//! messages from one request cycle to the next.

use crate::bucket::{Bucket, Entries};
use crate::config::FlashConfig;
use crate::error::FlashError;
use crate::levels::Level;
use crate::payload::Payload;
use crate::render::{TemplateRenderer, TeraRenderer};
use grappelli_sessions::SessionBackend;
use std::sync::Arc;
use tracing::{debug, warn};

/// Flash message store for one request cycle.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use grappelli_messages::{FlashError, FlashStore, Level};
/// use grappelli_sessions::MemoryBackend;
///
/// # fn main() -> Result<(), FlashError> {
/// let backend = Arc::new(MemoryBackend::new());
/// let mut store = FlashStore::new(backend)?;
/// store.init()?;
///
/// store.add("Saved!", Level::Success, true);
/// assert!(store.has(&Level::Success));
///
/// let messages = store.get(&Level::Success);
/// assert_eq!(messages.values().collect::<Vec<_>>(), ["Saved!"]);
/// # Ok(())
/// # }
/// ```
pub struct FlashStore {
	backend: Arc<dyn SessionBackend>,
	config: FlashConfig,
	renderer: Box<dyn TemplateRenderer>,
	current: Bucket,
	pending: Bucket,
	merged: Bucket,
	loaded: bool,
}

impl FlashStore {
	/// Create a store with the default configuration and renderer.
	pub fn new(backend: Arc<dyn SessionBackend>) -> Result<Self, FlashError> {
		Self::with_config(backend, FlashConfig::default())
	}

	/// Create a store with `config` and the default renderer.
	pub fn with_config(
		backend: Arc<dyn SessionBackend>,
		config: FlashConfig,
	) -> Result<Self, FlashError> {
		let renderer = Box::new(TeraRenderer::new()?);
		Ok(Self::with_renderer(backend, config, renderer))
	}

	/// Create a store with a fully custom renderer.
	pub fn with_renderer(
		backend: Arc<dyn SessionBackend>,
		config: FlashConfig,
		renderer: Box<dyn TemplateRenderer>,
	) -> Self {
		Self {
			backend,
			config,
			renderer,
			current: Bucket::default(),
			pending: Bucket::default(),
			merged: Bucket::default(),
			loaded: false,
		}
	}

	/// Load messages surviving from the previous request.
	///
	/// Idempotent: after the first successful call this is a no-op until
	/// [`FlashStore::reset`]. An absent session value leaves `current`
	/// empty; backend faults propagate.
	pub fn init(&mut self) -> Result<(), FlashError> {
		if self.loaded {
			return Ok(());
		}
		self.load_current()?;
		self.sync();
		self.loaded = true;
		debug!(session_key = %self.config.session_key, "flash store initialized");
		Ok(())
	}

	/// Whether [`FlashStore::init`] has run.
	pub fn is_loaded(&self) -> bool {
		self.loaded
	}

	/// Active configuration.
	pub fn config(&self) -> &FlashConfig {
		&self.config
	}

	/// Stage one message or a collection of messages under `level`.
	///
	/// Collections merge key-wise into the staged bucket, incoming entries
	/// winning on collision. A single message is appended unless its text
	/// is already present as a key in the staged slot.
	///
	/// With `autosave` the staged messages are written through to the
	/// session immediately, best-effort: a backend fault is logged and
	/// swallowed so `add` always succeeds.
	pub fn add(&mut self, payload: impl Into<Payload>, level: Level, autosave: bool) {
		match payload.into() {
			Payload::Text(text) => {
				let entries = self.pending.slot_mut(level);
				if !entries.contains_name(&text) {
					entries.push(text);
				}
			}
			Payload::List(list) => {
				let mut incoming = Entries::default();
				for text in list {
					incoming.push(text);
				}
				self.pending.slot_mut(level).merge(incoming);
			}
			Payload::Map(map) => {
				let mut incoming = Entries::default();
				for (key, text) in map {
					incoming.insert(key, text);
				}
				self.pending.slot_mut(level).merge(incoming);
			}
		}
		self.sync();

		if autosave
			&& let Err(error) = self.save()
		{
			warn!(%error, "autosave failed; messages stay buffered in memory");
		}
	}

	/// Stage a success message and write it through.
	pub fn success(&mut self, message: impl Into<String>) {
		self.add(message.into(), Level::Success, true);
	}

	/// Stage an error message and write it through.
	pub fn error(&mut self, message: impl Into<String>) {
		self.add(message.into(), Level::Error, true);
	}

	/// Stage a notice message and write it through.
	pub fn notice(&mut self, message: impl Into<String>) {
		self.add(message.into(), Level::Notice, true);
	}

	/// Stage an info message and write it through.
	pub fn info(&mut self, message: impl Into<String>) {
		self.add(message.into(), Level::Info, true);
	}

	/// Persist the staged messages, wholesale replacing the session value.
	///
	/// Anything previously in the session that was not re-added this
	/// request is dropped. Afterwards `current` is reloaded from the
	/// session, so the just-saved state reads as "current" for the rest of
	/// the request. Returns `Ok(false)` without touching the session when
	/// nothing is staged.
	pub fn save(&mut self) -> Result<bool, FlashError> {
		if self.pending.is_empty() {
			return Ok(false);
		}

		let value = serde_json::to_value(&self.pending)?;
		self.backend.set(&self.config.session_key, value)?;
		self.load_current()?;
		debug!(session_key = %self.config.session_key, "staged messages saved to session");
		Ok(true)
	}

	/// Persist current and staged messages combined.
	///
	/// Unlike [`FlashStore::save`], messages carried over from the
	/// previous request survive into the next one even if they were not
	/// re-added. Returns `Ok(false)` when nothing is staged.
	pub fn save_all(&mut self) -> Result<bool, FlashError> {
		if self.pending.is_empty() {
			return Ok(false);
		}

		self.sync();
		let value = serde_json::to_value(&self.merged)?;
		self.backend.set(&self.config.session_key, value)?;
		debug!(session_key = %self.config.session_key, "merged messages saved to session");
		Ok(true)
	}

	/// Drain all messages of `level`.
	///
	/// Returns the merged entries for the level (empty if absent) and
	/// clears that level from every bucket in memory. The session is not
	/// touched: a saved bucket still survives into the next request.
	pub fn get(&mut self, level: &Level) -> Entries {
		let Some(entries) = self.merged.entries(level).cloned() else {
			return Entries::default();
		};
		self.clear_buckets(Some(level));
		entries
	}

	/// Drain every message.
	///
	/// Returns the whole merged bucket and clears all buckets in memory.
	pub fn get_all(&mut self) -> Bucket {
		let bucket = std::mem::take(&mut self.merged);
		self.current.clear();
		self.pending.clear();
		bucket
	}

	/// Messages of `level` without draining them.
	pub fn peek(&self, level: &Level) -> Entries {
		self.merged.entries(level).cloned().unwrap_or_default()
	}

	/// The merged bucket without draining it.
	pub fn peek_all(&self) -> &Bucket {
		&self.merged
	}

	/// Whether any message of `level` is present.
	pub fn has(&self, level: &Level) -> bool {
		self.merged.has(level)
	}

	/// Whether any of `levels` has at least one message.
	pub fn has_any(&self, levels: &[Level]) -> bool {
		levels.iter().any(|level| self.has(level))
	}

	/// Remove `message` under `level` from every bucket.
	///
	/// Matches an entry by key or value; absent entries are silently
	/// ignored in each bucket independently.
	pub fn remove(&mut self, level: &Level, message: &str) {
		self.merged.remove_message(level, message);
		self.pending.remove_message(level, message);
		self.current.remove_message(level, message);
	}

	/// Empty the `level` slot (or every slot) across all buckets.
	///
	/// With `persist` the clearing is propagated through [`FlashStore::save`],
	/// which still skips the session when nothing is staged.
	pub fn clear(&mut self, level: Option<&Level>, persist: bool) -> Result<(), FlashError> {
		self.clear_buckets(level);
		if persist {
			self.save()?;
		}
		Ok(())
	}

	/// Forget all in-memory state and the loaded flag, so the next
	/// [`FlashStore::init`] reloads from the session.
	pub fn reset(&mut self) {
		self.clear_buckets(None);
		self.loaded = false;
	}

	/// Render all messages, in bucket insertion order, draining them.
	///
	/// Returns `Ok(None)` when there is nothing to render.
	pub fn render_all(&mut self) -> Result<Option<String>, FlashError> {
		if self.merged.is_empty() {
			return Ok(None);
		}

		let mut html = String::new();
		for level in self.merged.levels() {
			if let Some(fragment) = self.render(&level)? {
				html.push_str(&fragment);
			}
		}
		Ok(Some(html))
	}

	/// Render the messages of `level`, draining them.
	///
	/// This is consumption, not a peek: the rendered messages are removed
	/// from the store. Uses the template configured for the level, falling
	/// back to the default template. Returns `Ok(None)` when the level has
	/// no messages.
	pub fn render(&mut self, level: &Level) -> Result<Option<String>, FlashError> {
		let entries = self.get(level);
		if entries.is_empty() {
			return Ok(None);
		}

		let template = self.config.template_for(level);
		let messages: Vec<String> = entries.values().map(str::to_string).collect();
		let html = self.renderer.render(template, &messages, level)?;
		Ok(Some(html))
	}

	/// Reload `current` from the session.
	fn load_current(&mut self) -> Result<(), FlashError> {
		let value = self.backend.get(&self.config.session_key)?;
		self.current = match value {
			Some(value) => serde_json::from_value(value).unwrap_or_else(|error| {
				warn!(%error, "discarding malformed session bucket");
				Bucket::default()
			}),
			None => Bucket::default(),
		};
		Ok(())
	}

	/// Recompute the merged view. Invoked on every mutation.
	fn sync(&mut self) {
		self.merged = Bucket::overlay(&self.current, &self.pending);
	}

	fn clear_buckets(&mut self, level: Option<&Level>) {
		match level {
			None => {
				self.merged.clear();
				self.pending.clear();
				self.current.clear();
			}
			Some(level) => {
				self.merged.clear_level(level);
				self.pending.clear_level(level);
				self.current.clear_level(level);
			}
		}
	}
}
