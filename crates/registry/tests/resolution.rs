//! End-to-end resolution through the public API.

use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};
use tagval_registry::{
	Contextual, EngineConfig, MemoryRepository, ObjectRef, Repository, RepositoryName, Tag,
	TagValueEngine, Transform, Value, ValueSource, Vec3,
};

fn init_tracing() {
	let _ = tracing_subscriber::fmt()
		.with_test_writer()
		.with_max_level(tracing::Level::TRACE)
		.try_init();
}

fn tag(text: &str) -> Tag {
	Tag::parse(text).unwrap()
}

#[fixture]
fn engine() -> TagValueEngine {
	init_tracing();
	let mut engine = TagValueEngine::with_baseline();
	engine.set("Character.Health", 100i64, Some("Default")).unwrap();
	engine.set("Character.Health.Max", 150i64, Some("Runtime")).unwrap();
	engine
}

#[rstest]
#[case("Character.Health.Max", 150, "Runtime", "Character.Health.Max")]
#[case("Character.Health", 100, "Default", "Character.Health")]
#[case("Character.Health.Regen", 100, "Default", "Character.Health")]
#[case("Character.Health.Max.Bonus", 150, "Runtime", "Character.Health.Max")]
fn baseline_scenario(
	engine: TagValueEngine,
	#[case] query: &str,
	#[case] expected: i64,
	#[case] repository: &str,
	#[case] matched: &str,
) {
	let resolved = engine.resolve(&tag(query), None).unwrap();
	assert_eq!(resolved.value, Value::Int(expected));
	assert_eq!(resolved.source, ValueSource::Repository(RepositoryName::new(repository)));
	assert_eq!(resolved.matched, tag(matched));
}

#[rstest]
fn unrelated_tags_resolve_to_default(engine: TagValueEngine) {
	assert_eq!(engine.get("Character", -1i64, None), -1);
	assert_eq!(engine.get("Weapon.Damage", -1i64, None), -1);
}

#[rstest]
fn config_overrides_default_at_same_level(mut engine: TagValueEngine) {
	engine.set("Character.Health", 120i64, Some("Config")).unwrap();
	assert_eq!(engine.get("Character.Health", 0i64, None), 120);
	assert_eq!(engine.get("Character.Health.Regen", 0i64, None), 120);
	// The exact Runtime value still wins over the Config parent.
	assert_eq!(engine.get("Character.Health.Max", 0i64, None), 150);
}

/// An actor-like object that overrides a few tags for itself.
struct Hero {
	overrides: BTreeMap<String, Value>,
}

impl Contextual for Hero {
	fn has_tag_value(&self, tag: &Tag) -> bool {
		self.overrides.contains_key(tag.as_str())
	}

	fn tag_value(&self, tag: &Tag) -> Option<Value> {
		self.overrides.get(tag.as_str()).cloned()
	}
}

#[rstest]
fn context_short_circuits_for_exact_tags(engine: TagValueEngine) {
	let hero = Hero {
		overrides: BTreeMap::from([("Character.Health.Max".to_string(), Value::Int(999))]),
	};
	assert_eq!(engine.get("Character.Health.Max", 0i64, Some(&hero)), 999);
	assert_eq!(engine.get("Character.Health", 0i64, Some(&hero)), 100);
	assert!(engine.has("Character.Health.Max", Some(&hero)));
}

/// A read-mostly backend with a fixed table, standing in for an external store.
struct Fixed {
	name: RepositoryName,
	entries: BTreeMap<Tag, Value>,
}

impl Repository for Fixed {
	fn name(&self) -> &RepositoryName {
		&self.name
	}

	fn priority(&self) -> i32 {
		75
	}

	fn has(&self, tag: &Tag) -> bool {
		self.entries.contains_key(tag)
	}

	fn get(&self, tag: &Tag) -> Option<Value> {
		self.entries.get(tag).cloned()
	}

	fn set(&mut self, tag: Tag, value: Value) -> Option<Value> {
		self.entries.insert(tag, value)
	}

	fn remove(&mut self, tag: &Tag) -> Option<Value> {
		self.entries.remove(tag)
	}

	fn clear(&mut self) -> Vec<(Tag, Value)> {
		std::mem::take(&mut self.entries).into_iter().collect()
	}

	fn all_tags(&self) -> Vec<Tag> {
		self.entries.keys().cloned().collect()
	}
}

#[rstest]
fn custom_backends_slot_into_priority_order(mut engine: TagValueEngine) {
	let spawn = Transform::from_position(Vec3::new(10.0, 0.0, 2.5));
	engine.register_repository(Fixed {
		name: RepositoryName::new("Level"),
		entries: BTreeMap::from([
			(tag("Character.Spawn"), Value::Transform(spawn)),
			(tag("Character.Mesh"), Value::ObjectRef(ObjectRef::new("/Game/Hero/Mesh"))),
		]),
	});

	let order: Vec<String> = engine.repositories().iter().map(|r| r.name().to_string()).collect();
	assert_eq!(order, ["Config", "Default", "Level", "Runtime"]);

	assert_eq!(engine.get("Character.Spawn.Offset", Transform::IDENTITY, None), spawn);
	assert_eq!(
		engine.get("Character.Mesh", ObjectRef::null(), None).as_str(),
		"/Game/Hero/Mesh"
	);
	assert_eq!(engine.clear(Some("Level")), 2);
	assert!(!engine.has("Character.Spawn", None));
}

#[test]
fn custom_layout_from_toml() {
	init_tracing();
	let config = EngineConfig::from_toml_str(
		r#"
[[repositories]]
name = "Save"
priority = 10

[[repositories]]
name = "Mods"
priority = 300
"#,
	)
	.unwrap();
	let mut engine = TagValueEngine::from_config(&config).unwrap();
	engine.set("Game.Difficulty", "hard", None).unwrap();

	assert!(engine.repository("Mods").unwrap().has(&tag("Game.Difficulty")));
	assert_eq!(engine.get("Game.Difficulty.Enemies", String::new(), None), "hard");
}

#[test]
fn seeded_memory_repository() {
	let mut engine = TagValueEngine::new();
	engine.register_repository(
		MemoryRepository::new("Defaults", 0)
			.with_value(tag("Audio.Volume"), 0.8)
			.with_value(tag("Audio.Muted"), false),
	);
	assert_eq!(engine.get("Audio.Volume.Music", 0.0, None), 0.8);
	assert!(!engine.get("Audio.Muted", true, None));
}
