use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;
use crate::context::ContextValues;

fn tag(text: &str) -> Tag {
	Tag::parse(text).unwrap()
}

fn high_low() -> TagValueEngine {
	let mut engine = TagValueEngine::new();
	engine.register_repository(MemoryRepository::new("High", 200));
	engine.register_repository(MemoryRepository::new("Low", 50));
	engine
}

fn record(engine: &mut TagValueEngine) -> Arc<Mutex<Vec<ChangeEvent>>> {
	let events = Arc::new(Mutex::new(Vec::new()));
	let sink = events.clone();
	engine.on_change(move |event| sink.lock().unwrap().push(event.clone()));
	events
}

#[test]
fn set_then_get_in_same_repository() {
	let mut engine = TagValueEngine::with_baseline();
	engine.set("Character.Speed", 3.5, Some("Runtime")).unwrap();
	assert_eq!(engine.get("Character.Speed", 0.0, None), 3.5);
	assert_eq!(
		engine.repository("Runtime").unwrap().get(&tag("Character.Speed")),
		Some(Value::Float(3.5))
	);
}

#[test]
fn exact_match_in_low_priority_beats_parent_in_high_priority() {
	let mut engine = high_low();
	engine.set("A.B", 1i64, Some("High")).unwrap();
	engine.set("A.B.C", 2i64, Some("Low")).unwrap();

	let resolved = engine.resolve(&tag("A.B.C"), None).unwrap();
	assert_eq!(resolved.value, Value::Int(2));
	assert_eq!(resolved.matched, tag("A.B.C"));
	assert_eq!(resolved.source, ValueSource::Repository("Low".into()));
}

#[test]
fn higher_priority_wins_at_same_tag() {
	let mut engine = high_low();
	engine.set("A.B", 1i64, Some("Low")).unwrap();
	engine.set("A.B", 9i64, Some("High")).unwrap();
	assert_eq!(engine.get("A.B", 0i64, None), 9);
}

#[test]
fn falls_back_to_ancestor_tags() {
	let mut engine = high_low();
	engine.set("A", true, Some("Low")).unwrap();

	let resolved = engine.resolve(&tag("A.B.C"), None).unwrap();
	assert_eq!(resolved.matched, tag("A"));
	assert!(engine.has("A.B.C", None));
	assert!(!engine.has("Other.B", None));
}

#[test]
fn context_value_wins_regardless_of_repositories() {
	let mut engine = high_low();
	engine.set("A.B", 1i64, Some("High")).unwrap();
	let ctx = ContextValues::new().with(tag("A.B"), 77i64);

	assert_eq!(engine.get("A.B", 0i64, Some(&ctx)), 77);
	assert_eq!(
		engine.resolve(&tag("A.B"), Some(&ctx)).unwrap().source,
		ValueSource::Context
	);
}

#[test]
fn context_is_not_walked_for_ancestors() {
	let mut engine = high_low();
	engine.set("A.B", 1i64, Some("Low")).unwrap();
	let ctx = ContextValues::new().with(tag("A"), 77i64);

	// The context only holds the parent; the repositories still answer.
	assert_eq!(engine.get("A.B", 0i64, Some(&ctx)), 1);
	// Nothing anywhere for A.X except the context's A, which is not consulted.
	assert_eq!(engine.get("A.X", 0i64, Some(&ctx)), 0);
	assert!(engine.has("A", Some(&ctx)));
}

#[test]
fn mismatched_context_value_yields_default() {
	let mut engine = high_low();
	engine.set("A", 5i64, Some("High")).unwrap();
	let ctx = ContextValues::new().with(tag("A"), "five");
	assert_eq!(engine.get("A", 42i64, Some(&ctx)), 42);
}

#[test]
fn type_mismatch_falls_back_to_default() {
	let mut engine = TagValueEngine::with_baseline();
	engine.set("Flag", true, None).unwrap();
	assert_eq!(engine.get("Flag", 42i64, None), 42);
	assert!(engine.get("Flag", false, None));
}

#[test]
fn get_checked_reports_type_mismatch() {
	let mut engine = TagValueEngine::with_baseline();
	engine.set("Flag", true, None).unwrap();

	let err = engine.get_checked::<i64>(&tag("Flag"), None).unwrap_err();
	assert_eq!(
		err,
		TagValueError::TypeMismatch {
			tag: tag("Flag"),
			expected: crate::ValueType::Int,
			found: crate::ValueType::Bool,
		}
	);
	assert_eq!(engine.get_checked::<bool>(&tag("Flag"), None), Ok(Some(true)));
	assert_eq!(engine.get_checked::<bool>(&tag("Missing"), None), Ok(None));
}

#[test]
fn set_without_repository_targets_highest_priority() {
	let mut engine = TagValueEngine::with_baseline();
	engine.set("A", 1i64, None).unwrap();
	assert!(engine.repository("Config").unwrap().has(&tag("A")));
	assert!(!engine.repository("Default").unwrap().has(&tag("A")));
}

#[test]
fn set_into_unknown_repository_fails_without_side_effects() {
	let mut engine = TagValueEngine::with_baseline();
	let events = record(&mut engine);
	let err = engine.set("A", 1i64, Some("Missing")).unwrap_err();
	assert_eq!(err, TagValueError::RepositoryNotFound("Missing".into()));
	assert!(!engine.has("A", None));
	assert!(events.lock().unwrap().is_empty());
}

#[test]
fn set_with_empty_chain_fails() {
	let mut engine = TagValueEngine::new();
	assert_eq!(engine.set("A", 1i64, None), Err(TagValueError::NoRepositoryAvailable));
}

#[test]
fn invalid_tag_text_is_rejected_everywhere() {
	let mut engine = TagValueEngine::with_baseline();
	assert!(matches!(
		engine.set("A..B", 1i64, None),
		Err(TagValueError::InvalidTag(_))
	));
	assert!(!engine.has("", None));
	assert_eq!(engine.get("", 5i64, None), 5);
	assert!(!engine.remove(" ", None));
	assert!(engine.all_tags().is_empty());
}

#[test]
fn remove_then_has_is_false() {
	let mut engine = TagValueEngine::with_baseline();
	engine.set("A.B", 1i64, Some("Default")).unwrap();
	assert!(engine.remove("A.B", None));
	assert!(!engine.has("A.B", None));
	assert!(!engine.remove("A.B", None));
}

#[test]
fn remove_from_named_repository_only() {
	let mut engine = TagValueEngine::with_baseline();
	engine.set("A", 1i64, Some("Default")).unwrap();
	engine.set("A", 2i64, Some("Runtime")).unwrap();

	assert!(!engine.remove("A", Some("Config")));
	assert!(engine.remove("A", Some("Default")));
	assert_eq!(engine.get("A", 0i64, None), 2);
	assert!(!engine.remove("A", Some("Missing")));
}

#[test]
fn remove_everywhere_notifies_per_repository() {
	let mut engine = TagValueEngine::with_baseline();
	engine.set("A", 1i64, Some("Default")).unwrap();
	engine.set("A", 2i64, Some("Runtime")).unwrap();
	let events = record(&mut engine);

	assert!(engine.remove("A", None));
	let events = events.lock().unwrap();
	let touched: Vec<String> = events.iter().map(|e| e.repository.to_string()).collect();
	assert_eq!(touched, ["Default", "Runtime"]);
	assert!(events.iter().all(|e| e.new.is_none() && e.kind() == ChangeKind::Removed));
}

#[test]
fn clear_is_idempotent() {
	let mut engine = TagValueEngine::with_baseline();
	engine.set("A", 1i64, Some("Config")).unwrap();
	engine.set("B", 2i64, Some("Runtime")).unwrap();

	assert_eq!(engine.clear(None), 2);
	let names_after_first = engine.chain().names();
	assert_eq!(engine.clear(None), 0);
	assert_eq!(engine.chain().names(), names_after_first);
	assert!(engine.all_tags().is_empty());
	assert_eq!(engine.repositories().len(), 3);
}

#[test]
fn clear_all_notifies_each_entry_in_priority_order() {
	let mut engine = TagValueEngine::with_baseline();
	engine.set("B", 2i64, Some("Runtime")).unwrap();
	engine.set("A", 1i64, Some("Config")).unwrap();
	engine.set("C", true, Some("Config")).unwrap();
	let events = record(&mut engine);

	assert_eq!(engine.clear(None), 3);
	assert_eq!(
		*events.lock().unwrap(),
		vec![
			ChangeEvent::removed(tag("A"), "Config".into(), Value::Int(1)),
			ChangeEvent::removed(tag("C"), "Config".into(), Value::Bool(true)),
			ChangeEvent::removed(tag("B"), "Runtime".into(), Value::Int(2)),
		]
	);
	assert!(events.lock().unwrap().iter().all(|e| e.new.is_none()));

	events.lock().unwrap().clear();
	assert_eq!(engine.clear(None), 0);
	assert!(events.lock().unwrap().is_empty());
}

#[test]
fn clear_named_repository_notifies_each_entry() {
	let mut engine = TagValueEngine::with_baseline();
	engine.set("B", 2i64, Some("Default")).unwrap();
	engine.set("A", 1i64, Some("Default")).unwrap();
	engine.set("A", 3i64, Some("Runtime")).unwrap();
	let events = record(&mut engine);

	assert_eq!(engine.clear(Some("Default")), 2);
	assert_eq!(engine.clear(Some("Missing")), 0);
	let events = events.lock().unwrap();
	assert_eq!(
		*events,
		vec![
			ChangeEvent::removed(tag("A"), "Default".into(), Value::Int(1)),
			ChangeEvent::removed(tag("B"), "Default".into(), Value::Int(2)),
		]
	);
	assert_eq!(engine.get("A", 0i64, None), 3);
}

#[test]
fn first_set_fires_one_insert_notification() {
	let mut engine = TagValueEngine::with_baseline();
	let events = record(&mut engine);
	engine.set("A.B", 1i64, Some("Default")).unwrap();

	let events = events.lock().unwrap();
	assert_eq!(events.len(), 1);
	assert_eq!(
		events[0],
		ChangeEvent {
			tag: tag("A.B"),
			repository: "Default".into(),
			old: None,
			new: Some(Value::Int(1)),
		}
	);
	assert_eq!(events[0].kind(), ChangeKind::Inserted);
}

#[test]
fn overwrite_reports_old_value() {
	let mut engine = TagValueEngine::with_baseline();
	engine.set("A", 1i64, Some("Default")).unwrap();
	let events = record(&mut engine);
	engine.set("A", 2i64, Some("Default")).unwrap();

	let events = events.lock().unwrap();
	assert_eq!(events[0].old, Some(Value::Int(1)));
	assert_eq!(events[0].kind(), ChangeKind::Updated);
}

#[test]
fn removed_listener_stops_receiving() {
	let mut engine = TagValueEngine::with_baseline();
	let count = Arc::new(Mutex::new(0usize));
	let sink = count.clone();
	let id = engine.on_change(move |_| *sink.lock().unwrap() += 1);

	engine.set("A", 1i64, None).unwrap();
	assert!(engine.remove_listener(id));
	assert!(!engine.remove_listener(id));
	engine.set("A", 2i64, None).unwrap();
	assert_eq!(*count.lock().unwrap(), 1);
	assert_eq!(engine.listener_count(), 0);
}

#[test]
fn from_config_rejects_invalid_layouts() {
	let blank = EngineConfig::empty().with_repository("  ", 10);
	assert!(matches!(
		TagValueEngine::from_config(&blank),
		Err(ConfigError::EmptyName { index: 0 })
	));

	let duplicated = EngineConfig::empty()
		.with_repository("Save", 10)
		.with_repository("Save", 20);
	assert!(matches!(
		TagValueEngine::from_config(&duplicated),
		Err(ConfigError::DuplicateName(name)) if name == "Save"
	));

	let engine = TagValueEngine::from_config(&EngineConfig::empty().with_repository(" Save ", 10)).unwrap();
	assert_eq!(engine.chain().names(), ["Save"]);
}

#[test]
fn unregistered_repository_no_longer_resolves() {
	let mut engine = high_low();
	engine.set("A", 1i64, Some("High")).unwrap();
	engine.set("A", 2i64, Some("Low")).unwrap();

	assert!(engine.unregister_repository("High").is_some());
	assert!(engine.unregister_repository("High").is_none());
	assert_eq!(engine.get("A", 0i64, None), 2);
}

#[test]
fn re_registering_replaces_contents() {
	let mut engine = high_low();
	engine.set("A", 1i64, Some("High")).unwrap();
	let old = engine.register_repository(MemoryRepository::new("High", 200));
	assert!(old.is_some());
	assert!(!engine.has("A", None));
}

#[test]
fn all_tags_are_unique_and_sorted() {
	let mut engine = TagValueEngine::with_baseline();
	engine.set("B", 1i64, Some("Config")).unwrap();
	engine.set("A", 1i64, Some("Default")).unwrap();
	engine.set("B", 2i64, Some("Runtime")).unwrap();
	assert_eq!(engine.all_tags(), vec![tag("A"), tag("B")]);
}

#[test]
fn teardown_drops_everything_silently() {
	let mut engine = TagValueEngine::with_baseline();
	engine.set("A", 1i64, None).unwrap();
	let events = record(&mut engine);
	engine.teardown();
	assert!(engine.repositories().is_empty());
	assert_eq!(engine.listener_count(), 0);
	assert!(events.lock().unwrap().is_empty());
}

fn arb_tag() -> impl Strategy<Value = String> {
	prop::collection::vec("[A-Z][a-z]{0,5}", 1..5).prop_map(|segments| segments.join("."))
}

proptest! {
	/// A value written to any repository reads back unless a
	/// higher-priority repository holds the same exact tag.
	#[test]
	fn prop_set_then_get_roundtrip(text in arb_tag(), value in any::<i64>(), repo in 0usize..3) {
		let names = ["Config", "Default", "Runtime"];
		let mut engine = TagValueEngine::with_baseline();
		engine.set(&text, value, Some(names[repo])).unwrap();
		prop_assert_eq!(engine.get(&text, value.wrapping_add(1), None), value);
		prop_assert_eq!(
			engine.repository(names[repo]).unwrap().get(&tag(&text)),
			Some(Value::Int(value))
		);
	}

	/// A descendant of a set tag always resolves to the ancestor's value
	/// when nothing more specific exists.
	#[test]
	fn prop_descendants_inherit(parent in arb_tag(), child in "[A-Z][a-z]{0,5}", value in any::<i64>()) {
		let mut engine = TagValueEngine::with_baseline();
		engine.set(&parent, value, Some("Runtime")).unwrap();
		let descendant = format!("{parent}.{child}");
		let resolved = engine.resolve(&tag(&descendant), None).unwrap();
		prop_assert_eq!(resolved.matched, tag(&parent));
		prop_assert_eq!(resolved.value, Value::Int(value));
	}
}
