use rustc_hash::FxHashMap as HashMap;
use tagval_primitives::Tag;

use super::{Repository, RepositoryName};
use crate::value::Value;

/// In-memory [`Repository`] backed by a hash map.
#[derive(Debug, Clone)]
pub struct MemoryRepository {
	name: RepositoryName,
	priority: i32,
	values: HashMap<Tag, Value>,
}

impl MemoryRepository {
	pub fn new(name: impl Into<RepositoryName>, priority: i32) -> Self {
		Self {
			name: name.into(),
			priority,
			values: HashMap::default(),
		}
	}

	/// Builder-style insert, for seeding a repository before registration.
	pub fn with_value(mut self, tag: Tag, value: impl Into<Value>) -> Self {
		self.values.insert(tag, value.into());
		self
	}

	/// Iterates stored entries in no particular order.
	pub fn iter(&self) -> impl Iterator<Item = (&Tag, &Value)> {
		self.values.iter()
	}
}

impl Repository for MemoryRepository {
	fn name(&self) -> &RepositoryName {
		&self.name
	}

	fn priority(&self) -> i32 {
		self.priority
	}

	fn has(&self, tag: &Tag) -> bool {
		self.values.contains_key(tag)
	}

	fn get(&self, tag: &Tag) -> Option<Value> {
		self.values.get(tag).cloned()
	}

	fn set(&mut self, tag: Tag, value: Value) -> Option<Value> {
		self.values.insert(tag, value)
	}

	fn remove(&mut self, tag: &Tag) -> Option<Value> {
		self.values.remove(tag)
	}

	fn clear(&mut self) -> Vec<(Tag, Value)> {
		self.values.drain().collect()
	}

	fn all_tags(&self) -> Vec<Tag> {
		self.values.keys().cloned().collect()
	}

	fn len(&self) -> usize {
		self.values.len()
	}
}
