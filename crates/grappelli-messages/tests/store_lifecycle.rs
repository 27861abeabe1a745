//! Flash store lifecycle integration tests
//!
//! Exercises the full request-cycle contract: staging, write-through,
//! reconciliation with the previous request's messages, read-once
//! delivery, and rendering.

use grappelli_messages::{FlashConfig, FlashError, FlashStore, Level, TeraRenderer};
use grappelli_sessions::{MemoryBackend, SessionBackend, SessionError};
use serde_json::{Value, json};
use std::sync::Arc;

fn store_with(backend: &Arc<MemoryBackend>) -> FlashStore {
	FlashStore::new(Arc::clone(backend) as Arc<dyn SessionBackend>).unwrap()
}

fn seeded_backend(value: Value) -> Arc<MemoryBackend> {
	let backend = Arc::new(MemoryBackend::new());
	backend.set("flash", value).unwrap();
	backend
}

fn values(store: &mut FlashStore, level: &Level) -> Vec<String> {
	store
		.get(level)
		.values()
		.map(str::to_string)
		.collect::<Vec<_>>()
}

/// Backend stub that refuses every operation.
struct FailingBackend;

impl SessionBackend for FailingBackend {
	fn get(&self, _key: &str) -> Result<Option<Value>, SessionError> {
		Err(SessionError::Unavailable("store offline".to_string()))
	}

	fn set(&self, _key: &str, _value: Value) -> Result<(), SessionError> {
		Err(SessionError::Unavailable("store offline".to_string()))
	}

	fn remove(&self, _key: &str) -> Result<(), SessionError> {
		Err(SessionError::Unavailable("store offline".to_string()))
	}
}

#[test]
fn test_init_loads_previous_request_messages() {
	let backend = seeded_backend(json!({"info": {"0": "carried over"}}));
	let mut store = store_with(&backend);
	store.init().unwrap();

	assert!(store.has(&Level::Info));
	assert_eq!(values(&mut store, &Level::Info), ["carried over"]);
}

#[test]
fn test_init_is_idempotent() {
	let backend = seeded_backend(json!({"info": {"0": "first"}}));
	let mut store = store_with(&backend);
	store.init().unwrap();

	// A later session change is not picked up by a repeated init
	backend
		.set("flash", json!({"info": {"0": "second"}}))
		.unwrap();
	store.init().unwrap();

	assert_eq!(values(&mut store, &Level::Info), ["first"]);
}

#[test]
fn test_init_with_empty_session() {
	let backend = Arc::new(MemoryBackend::new());
	let mut store = store_with(&backend);
	store.init().unwrap();

	assert!(store.peek_all().is_empty());
	assert!(!store.has(&Level::Error));
}

#[test]
fn test_add_with_autosave_writes_session() {
	let backend = Arc::new(MemoryBackend::new());
	let mut store = store_with(&backend);
	store.init().unwrap();

	store.add("created", Level::Success, true);

	let stored = backend.get("flash").unwrap().unwrap();
	assert_eq!(stored, json!({"success": {"0": "created"}}));
}

#[test]
fn test_add_without_autosave_keeps_session_untouched() {
	let backend = Arc::new(MemoryBackend::new());
	let mut store = store_with(&backend);
	store.init().unwrap();

	store.add("staged only", Level::Info, false);

	assert!(store.has(&Level::Info));
	assert!(backend.get("flash").unwrap().is_none());
}

#[test]
fn test_list_then_scalar_add_keeps_relative_order() {
	let backend = Arc::new(MemoryBackend::new());
	let mut store = store_with(&backend);
	store.init().unwrap();

	store.add(["a", "b"], Level::Info, false);
	assert!(backend.get("flash").unwrap().is_none());

	store.add("c", Level::Info, true);
	assert!(backend.get("flash").unwrap().is_some());

	assert_eq!(values(&mut store, &Level::Info), ["a", "b", "c"]);
}

#[test]
fn test_scalar_add_skips_text_already_staged_as_key() {
	let backend = Arc::new(MemoryBackend::new());
	let mut store = store_with(&backend);
	store.init().unwrap();

	store.add([("name", "name is required")], Level::Error, false);
	store.add("name", Level::Error, false);

	// "name" is already a key in the staged slot, so the scalar is dropped
	assert_eq!(values(&mut store, &Level::Error), ["name is required"]);
}

#[test]
fn test_scalar_adds_do_not_dedupe_against_list_values() {
	let backend = Arc::new(MemoryBackend::new());
	let mut store = store_with(&backend);
	store.init().unwrap();

	// The duplicate probe checks keys, not values
	store.add("twice", Level::Info, false);
	store.add("twice", Level::Info, false);

	assert_eq!(values(&mut store, &Level::Info), ["twice", "twice"]);
}

#[test]
fn test_collection_add_overwrites_on_key_collision() {
	let backend = Arc::new(MemoryBackend::new());
	let mut store = store_with(&backend);
	store.init().unwrap();

	store.add([("field", "first")], Level::Error, false);
	store.add([("field", "second")], Level::Error, false);

	assert_eq!(values(&mut store, &Level::Error), ["second"]);
}

#[test]
fn test_save_is_noop_when_nothing_staged() {
	let backend = seeded_backend(json!({"notice": {"0": "keep me"}}));
	let mut store = store_with(&backend);
	store.init().unwrap();

	assert!(!store.save().unwrap());

	let stored = backend.get("flash").unwrap().unwrap();
	assert_eq!(stored, json!({"notice": {"0": "keep me"}}));
}

#[test]
fn test_save_replaces_session_wholesale() {
	let backend = seeded_backend(json!({"error": {"0": "stale"}}));
	let mut store = store_with(&backend);
	store.init().unwrap();

	store.add("fresh", Level::Info, false);
	assert!(store.save().unwrap());

	// The staged bucket is now the entire persisted state
	let stored = backend.get("flash").unwrap().unwrap();
	assert_eq!(stored, json!({"info": {"0": "fresh"}}));
}

#[test]
fn test_staged_entries_shadow_carried_entries_on_key_collision() {
	let backend = seeded_backend(json!({"info": {"0": "old"}}));
	let mut store = store_with(&backend);
	store.init().unwrap();

	// The staged entry lands under index 0, colliding with the carried
	// entry's key; staged entries win the merge
	store.add("new", Level::Info, true);

	assert_eq!(values(&mut store, &Level::Info), ["new"]);
	let stored = backend.get("flash").unwrap().unwrap();
	assert_eq!(stored, json!({"info": {"0": "new"}}));
}

#[test]
fn test_carried_keyed_entries_stay_readable_after_autosave() {
	let backend = seeded_backend(json!({"info": {"carried": "old"}}));
	let mut store = store_with(&backend);
	store.init().unwrap();

	// Autosave replaces the session with the staged bucket only, but the
	// carried entry stays readable in this request's merged view
	store.add("new", Level::Info, true);

	assert_eq!(values(&mut store, &Level::Info), ["old", "new"]);
	let stored = backend.get("flash").unwrap().unwrap();
	assert_eq!(stored, json!({"info": {"0": "new"}}));
}

#[test]
fn test_save_all_persists_current_and_staged() {
	let backend = seeded_backend(json!({"info": {"carried": "old"}}));
	let mut store = store_with(&backend);
	store.init().unwrap();

	store.add("new", Level::Info, false);
	assert!(store.save_all().unwrap());

	// A fresh request cycle sees the union as its current messages
	let mut next = store_with(&backend);
	next.init().unwrap();
	assert_eq!(values(&mut next, &Level::Info), ["old", "new"]);
}

#[test]
fn test_save_all_is_noop_when_nothing_staged() {
	let backend = seeded_backend(json!({"info": {"0": "old"}}));
	let mut store = store_with(&backend);
	store.init().unwrap();

	assert!(!store.save_all().unwrap());
	let stored = backend.get("flash").unwrap().unwrap();
	assert_eq!(stored, json!({"info": {"0": "old"}}));
}

#[test]
fn test_get_drains_the_level() {
	let backend = Arc::new(MemoryBackend::new());
	let mut store = store_with(&backend);
	store.init().unwrap();

	store.add("once", Level::Notice, false);

	assert_eq!(values(&mut store, &Level::Notice), ["once"]);
	assert!(store.get(&Level::Notice).is_empty());
	assert!(!store.has(&Level::Notice));
}

#[test]
fn test_get_absent_level_returns_empty() {
	let backend = Arc::new(MemoryBackend::new());
	let mut store = store_with(&backend);
	store.init().unwrap();

	assert!(store.get(&Level::Error).is_empty());
}

#[test]
fn test_get_all_drains_everything() {
	let backend = seeded_backend(json!({"notice": {"0": "from session"}}));
	let mut store = store_with(&backend);
	store.init().unwrap();
	store.add("added now", Level::Success, false);

	let bucket = store.get_all();
	assert!(bucket.has(&Level::Notice));
	assert!(bucket.has(&Level::Success));

	assert!(store.peek_all().is_empty());
	assert!(store.get_all().is_empty());
}

#[test]
fn test_peek_does_not_consume() {
	let backend = Arc::new(MemoryBackend::new());
	let mut store = store_with(&backend);
	store.init().unwrap();
	store.add("still here", Level::Info, false);

	assert_eq!(store.peek(&Level::Info).len(), 1);
	assert_eq!(store.peek(&Level::Info).len(), 1);
	assert!(store.has(&Level::Info));
}

#[test]
fn test_has_any_short_circuits_across_levels() {
	let backend = Arc::new(MemoryBackend::new());
	let mut store = store_with(&backend);
	store.init().unwrap();
	store.add("boom", Level::Error, false);

	assert!(store.has(&Level::Error));
	assert!(!store.has(&Level::Success));
	assert!(store.has_any(&[Level::Notice, Level::Error]));
	assert!(!store.has_any(&[Level::Notice, Level::Success]));
	assert!(!store.has_any(&[]));
}

#[test]
fn test_remove_clears_message_from_all_buckets() {
	let backend = seeded_backend(json!({"error": {"0": "Invalid input"}}));
	let mut store = store_with(&backend);
	store.init().unwrap();
	store.add("Invalid input", Level::Error, false);

	store.remove(&Level::Error, "Invalid input");

	assert!(!store.has(&Level::Error));
	// Nothing staged is left either, so save has nothing to write
	assert!(!store.save().unwrap());
}

#[test]
fn test_remove_missing_message_is_silent() {
	let backend = Arc::new(MemoryBackend::new());
	let mut store = store_with(&backend);
	store.init().unwrap();
	store.add("present", Level::Info, false);

	store.remove(&Level::Info, "absent");
	store.remove(&Level::Error, "absent");

	assert_eq!(values(&mut store, &Level::Info), ["present"]);
}

#[test]
fn test_clear_level_spares_other_levels() {
	let backend = Arc::new(MemoryBackend::new());
	let mut store = store_with(&backend);
	store.init().unwrap();
	store.add("drop me", Level::Info, false);
	store.add("keep me", Level::Error, false);

	store.clear(Some(&Level::Info), false).unwrap();

	assert!(!store.has(&Level::Info));
	assert!(store.has(&Level::Error));
}

#[test]
fn test_clear_with_persist_skips_session_when_nothing_staged() {
	let backend = seeded_backend(json!({"info": {"0": "survivor"}}));
	let mut store = store_with(&backend);
	store.init().unwrap();

	store.clear(None, true).unwrap();

	// In-memory state is gone, but with an empty staged bucket the save
	// had nothing to write; the session value survives
	assert!(store.peek_all().is_empty());
	let stored = backend.get("flash").unwrap().unwrap();
	assert_eq!(stored, json!({"info": {"0": "survivor"}}));
}

#[test]
fn test_reset_allows_reinit() {
	let backend = seeded_backend(json!({"info": {"0": "first"}}));
	let mut store = store_with(&backend);
	store.init().unwrap();
	assert!(store.is_loaded());

	store.reset();
	assert!(!store.is_loaded());

	backend
		.set("flash", json!({"info": {"0": "second"}}))
		.unwrap();
	store.init().unwrap();
	assert_eq!(values(&mut store, &Level::Info), ["second"]);
}

#[test]
fn test_render_scenario() {
	let backend = Arc::new(MemoryBackend::new());
	let mut store = store_with(&backend);
	store.init().unwrap();

	store.add("Saved!", Level::Success, true);
	assert!(store.has(&Level::Success));

	let html = store.render(&Level::Success).unwrap().unwrap();
	assert!(html.contains("<div class=\"success\">"));
	assert!(html.contains("<p>Saved!</p>"));

	// Render consumed the messages
	assert!(store.get(&Level::Success).is_empty());
	assert!(store.render(&Level::Success).unwrap().is_none());
}

#[test]
fn test_render_all_concatenates_in_insertion_order() {
	let backend = Arc::new(MemoryBackend::new());
	let mut store = store_with(&backend);
	store.init().unwrap();

	store.add("heads up", Level::Notice, false);
	store.add("done", Level::Success, false);

	let html = store.render_all().unwrap().unwrap();
	let notice = html.find("class=\"notice\"").unwrap();
	let success = html.find("class=\"success\"").unwrap();
	assert!(notice < success);

	// Everything was drained
	assert!(store.render_all().unwrap().is_none());
}

#[test]
fn test_render_empty_store_returns_none() {
	let backend = Arc::new(MemoryBackend::new());
	let mut store = store_with(&backend);
	store.init().unwrap();

	assert!(store.render_all().unwrap().is_none());
	assert!(store.render(&Level::Error).unwrap().is_none());
}

#[test]
fn test_render_uses_configured_template() {
	let mut config = FlashConfig::default();
	config
		.templates
		.insert("success".to_string(), "banner".to_string());

	let mut renderer = TeraRenderer::new().unwrap();
	renderer
		.add_template("banner", "<strong class=\"{{ type }}\">{{ messages | first }}</strong>")
		.unwrap();

	let backend = Arc::new(MemoryBackend::new());
	let mut store = FlashStore::with_renderer(
		Arc::clone(&backend) as Arc<dyn SessionBackend>,
		config,
		Box::new(renderer),
	);
	store.init().unwrap();

	store.add("Saved!", Level::Success, false);
	store.add("plain", Level::Info, false);

	let html = store.render(&Level::Success).unwrap().unwrap();
	assert_eq!(html, "<strong class=\"success\">Saved!</strong>");

	// Unconfigured levels fall back to the default template
	let html = store.render(&Level::Info).unwrap().unwrap();
	assert!(html.contains("<div class=\"info\">"));
}

#[test]
fn test_custom_session_key() {
	let config = FlashConfig {
		session_key: "notices".to_string(),
		..FlashConfig::default()
	};

	let backend = Arc::new(MemoryBackend::new());
	let mut store =
		FlashStore::with_config(Arc::clone(&backend) as Arc<dyn SessionBackend>, config).unwrap();
	store.init().unwrap();
	store.notice("filed under a different key");

	assert!(backend.get("flash").unwrap().is_none());
	assert!(backend.get("notices").unwrap().is_some());
}

#[test]
fn test_convenience_methods_write_through() {
	let backend = Arc::new(MemoryBackend::new());
	let mut store = store_with(&backend);
	store.init().unwrap();

	store.success("s");
	store.error("e");
	store.notice("n");
	store.info("i");

	assert!(store.has_any(&[
		Level::Success,
		Level::Error,
		Level::Notice,
		Level::Info,
	]));
	assert!(backend.get("flash").unwrap().is_some());
}

#[test]
fn test_malformed_session_value_reads_as_empty() {
	let backend = seeded_backend(json!("definitely not a bucket"));
	let mut store = store_with(&backend);
	store.init().unwrap();

	assert!(store.peek_all().is_empty());
}

#[test]
fn test_init_propagates_backend_failure() {
	let mut store = FlashStore::new(Arc::new(FailingBackend)).unwrap();
	assert!(matches!(store.init(), Err(FlashError::Session(_))));
	assert!(!store.is_loaded());
}

#[test]
fn test_autosave_swallows_backend_failure() {
	let mut store = FlashStore::new(Arc::new(FailingBackend)).unwrap();

	// add never fails, even with the backend down
	store.add("buffered", Level::Info, true);
	assert!(store.has(&Level::Info));

	// an explicit save still reports the fault
	assert!(matches!(store.save(), Err(FlashError::Session(_))));
}
