//! Named, prioritized exact-match stores.
//!
//! A [`Repository`] only ever answers for the exact tag it is asked about.
//! Ancestor fallback belongs to the engine, which keeps backends simple.

use std::borrow::Borrow;
use std::sync::Arc;

use tagval_primitives::Tag;

use crate::value::Value;

mod memory;


pub use memory::MemoryRepository;

/// Priority of the baseline `Config` repository.
pub const CONFIG_PRIORITY: i32 = 200;
/// Priority of the baseline `Default` repository.
pub const DEFAULT_PRIORITY: i32 = 100;
/// Priority of the baseline `Runtime` repository.
pub const RUNTIME_PRIORITY: i32 = 50;

/// Name of a repository, unique within a chain.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RepositoryName(Arc<str>);

impl RepositoryName {
	pub const CONFIG: &'static str = "Config";
	pub const DEFAULT: &'static str = "Default";
	pub const RUNTIME: &'static str = "Runtime";

	pub fn new(name: impl AsRef<str>) -> Self {
		Self(Arc::from(name.as_ref()))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl Borrow<str> for RepositoryName {
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl AsRef<str> for RepositoryName {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl PartialEq<str> for RepositoryName {
	fn eq(&self, other: &str) -> bool {
		&*self.0 == other
	}
}

impl PartialEq<&str> for RepositoryName {
	fn eq(&self, other: &&str) -> bool {
		&*self.0 == *other
	}
}

impl From<&str> for RepositoryName {
	fn from(name: &str) -> Self {
		Self::new(name)
	}
}

impl From<String> for RepositoryName {
	fn from(name: String) -> Self {
		Self(Arc::from(name))
	}
}

impl core::fmt::Debug for RepositoryName {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		write!(f, "{:?}", &*self.0)
	}
}

impl core::fmt::Display for RepositoryName {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.write_str(&self.0)
	}
}

/// A storage backend holding values for exact tags.
///
/// Values cross the boundary by value: `set` takes ownership and `get`
/// returns a copy, so no two repositories ever share a stored value.
pub trait Repository: Send + Sync {
	/// Repository name, unique within a chain.
	fn name(&self) -> &RepositoryName;

	/// Lookup priority; higher is consulted first.
	fn priority(&self) -> i32;

	/// Returns true if a value is stored for exactly `tag`.
	fn has(&self, tag: &Tag) -> bool;

	/// Returns a copy of the value stored for exactly `tag`.
	fn get(&self, tag: &Tag) -> Option<Value>;

	/// Stores `value` for `tag`, returning the value it replaced.
	fn set(&mut self, tag: Tag, value: Value) -> Option<Value>;

	/// Removes the value for `tag`, returning it if one existed.
	fn remove(&mut self, tag: &Tag) -> Option<Value>;

	/// Removes every entry, returning what was stored.
	fn clear(&mut self) -> Vec<(Tag, Value)>;

	/// Snapshot of every stored tag, in no particular order.
	fn all_tags(&self) -> Vec<Tag>;

	fn len(&self) -> usize {
		self.all_tags().len()
	}

	fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl core::fmt::Debug for dyn Repository + '_ {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("Repository")
			.field("name", self.name())
			.field("priority", &self.priority())
			.field("len", &self.len())
			.finish()
	}
}
