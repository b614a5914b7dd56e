//! Per-call contextual overrides.
//!
//! A [`Contextual`] object can answer for a tag before the repository chain
//! is consulted. The engine borrows it for a single call and never stores
//! it. Contexts own their fallback semantics; the engine does not walk tag
//! ancestry on their behalf.

use rustc_hash::FxHashMap as HashMap;
use tagval_primitives::Tag;

use crate::value::{Value, ValuePayload};

/// Capability implemented by objects that carry their own tag values.
pub trait Contextual {
	/// Returns true if this context holds a value for `tag`.
	fn has_tag_value(&self, tag: &Tag) -> bool;

	/// Returns a copy of this context's value for `tag`.
	fn tag_value(&self, tag: &Tag) -> Option<Value>;

	/// Returns this context's value for `tag` if it is a `T`.
	fn tag_value_as<T: ValuePayload>(&self, tag: &Tag) -> Option<T>
	where
		Self: Sized,
	{
		self.tag_value(tag)?.try_into_payload().ok()
	}
}

impl dyn Contextual + '_ {
	/// Returns this context's value for `tag` if it is a `T`.
	///
	/// Counterpart of [`Contextual::tag_value_as`] for borrowed trait objects.
	pub fn tag_value_as<T: ValuePayload>(&self, tag: &Tag) -> Option<T> {
		self.tag_value(tag)?.try_into_payload().ok()
	}
}

/// A plain exact-match set of tag values usable as a [`Contextual`].
#[derive(Debug, Clone, Default)]
pub struct ContextValues {
	values: HashMap<Tag, Value>,
}

impl ContextValues {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder-style insert.
	pub fn with(mut self, tag: Tag, value: impl Into<Value>) -> Self {
		self.values.insert(tag, value.into());
		self
	}

	/// Stores `value` for `tag`, returning the value it replaced.
	pub fn set(&mut self, tag: Tag, value: impl Into<Value>) -> Option<Value> {
		self.values.insert(tag, value.into())
	}

	pub fn remove(&mut self, tag: &Tag) -> Option<Value> {
		self.values.remove(tag)
	}

	pub fn clear(&mut self) {
		self.values.clear();
	}

	pub fn tags(&self) -> Vec<Tag> {
		self.values.keys().cloned().collect()
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}
}

impl Contextual for ContextValues {
	fn has_tag_value(&self, tag: &Tag) -> bool {
		self.values.contains_key(tag)
	}

	fn tag_value(&self, tag: &Tag) -> Option<Value> {
		self.values.get(tag).cloned()
	}
}
