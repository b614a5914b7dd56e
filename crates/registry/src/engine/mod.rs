//! Tag-value resolution.
//!
//! The [`TagValueEngine`] combines a contextual override, the tag hierarchy
//! and the repository chain into one deterministic lookup.
//!
//! # Resolution Order
//!
//! 1. Context value for the exact tag, if a context is supplied and holds it
//! 2. For the tag, then each ancestor (`A.B.C` -> `A.B` -> `A`):
//!    every repository in descending priority
//! 3. Not found
//!
//! Each hierarchy level is searched across all repositories before moving to
//! a shallower tag, so an exact match in a low-priority repository beats a
//! parent-tag match in a high-priority one.

use std::collections::BTreeSet;

use tagval_primitives::Tag;
use tracing::{debug, warn};

use crate::chain::RepositoryChain;
use crate::config::{ConfigError, EngineConfig};
use crate::context::Contextual;
use crate::error::{Result, TagValueError};
use crate::repository::{MemoryRepository, Repository, RepositoryName};
use crate::value::{Value, ValuePayload};

mod change;

#[cfg(test)]
mod tests;

use change::ChangeListeners;
pub use change::{ChangeEvent, ChangeKind, ListenerId};

/// Where a resolved value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource {
	/// The per-call contextual override.
	Context,
	/// A repository in the chain.
	Repository(RepositoryName),
}

impl core::fmt::Display for ValueSource {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		match self {
			ValueSource::Context => f.write_str("context"),
			ValueSource::Repository(name) => write!(f, "repository:{name}"),
		}
	}
}

/// A successful lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
	pub value: Value,
	/// The tag level the value was found at: the requested tag or an ancestor.
	pub matched: Tag,
	pub source: ValueSource,
}

/// Resolves tag values through a prioritized repository chain.
///
/// One engine is created per session and handed to whoever needs it; there
/// is no global instance. All operations are synchronous. Change listeners
/// run on the caller's stack before the mutating call returns.
#[derive(Default)]
pub struct TagValueEngine {
	chain: RepositoryChain,
	listeners: ChangeListeners,
}

impl TagValueEngine {
	/// Creates an engine with no repositories.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates an engine with the baseline `Config`/`Default`/`Runtime` repositories.
	pub fn with_baseline() -> Self {
		Self::with_layout(&EngineConfig::default())
	}

	/// Creates an engine with an in-memory repository per configured entry.
	///
	/// The layout is validated first, so blank or duplicate names are
	/// rejected instead of registering an unnamed or replaced repository.
	pub fn from_config(config: &EngineConfig) -> core::result::Result<Self, ConfigError> {
		config.validate()?;
		Ok(Self::with_layout(config))
	}

	fn with_layout(config: &EngineConfig) -> Self {
		let mut engine = Self::new();
		for repository in &config.repositories {
			engine.register_repository(MemoryRepository::new(
				repository.name.trim(),
				repository.priority,
			));
		}
		engine
	}

	/// Registers a repository, replacing any with the same name.
	pub fn register_repository(
		&mut self,
		repository: impl Repository + 'static,
	) -> Option<Box<dyn Repository>> {
		self.register_boxed(Box::new(repository))
	}

	pub fn register_boxed(&mut self, repository: Box<dyn Repository>) -> Option<Box<dyn Repository>> {
		let name = repository.name().clone();
		let priority = repository.priority();
		let replaced = self.chain.register(repository);
		debug!(
			domain = "tagval",
			repository = %name,
			priority,
			replaced = replaced.is_some(),
			"registered repository",
		);
		replaced
	}

	/// Removes the named repository and returns it. No-op if absent.
	pub fn unregister_repository(&mut self, name: &str) -> Option<Box<dyn Repository>> {
		let removed = self.chain.unregister(name);
		if removed.is_some() {
			debug!(domain = "tagval", repository = name, "unregistered repository");
		}
		removed
	}

	pub fn repository(&self, name: &str) -> Option<&dyn Repository> {
		self.chain.find(name)
	}

	/// Registered repositories in resolution order.
	pub fn repositories(&self) -> Vec<&dyn Repository> {
		self.chain.ordered()
	}

	pub fn chain(&self) -> &RepositoryChain {
		&self.chain
	}

	/// Drops every repository and listener without raising notifications.
	pub fn teardown(&mut self) {
		self.chain.clear();
		self.listeners.clear();
	}

	/// Returns true if the context or any repository holds `tag` or an ancestor.
	pub fn has_value(&self, tag: &Tag, context: Option<&dyn Contextual>) -> bool {
		if let Some(context) = context
			&& context.has_tag_value(tag)
		{
			return true;
		}
		self.walk(tag, |repository, level| repository.has(level).then_some(()))
			.is_some()
	}

	/// Returns the most specific, highest-priority value for `tag`.
	pub fn get_raw(&self, tag: &Tag, context: Option<&dyn Contextual>) -> Option<Value> {
		self.resolve(tag, context).map(|resolved| resolved.value)
	}

	/// Like [`get_raw`](Self::get_raw), also reporting where the value was found.
	pub fn resolve(&self, tag: &Tag, context: Option<&dyn Contextual>) -> Option<Resolved> {
		if let Some(context) = context
			&& context.has_tag_value(tag)
			&& let Some(value) = context.tag_value(tag)
		{
			return Some(Resolved {
				value,
				matched: tag.clone(),
				source: ValueSource::Context,
			});
		}
		self.walk(tag, |repository, level| {
			repository.get(level).map(|value| Resolved {
				value,
				matched: level.clone(),
				source: ValueSource::Repository(repository.name().clone()),
			})
		})
	}

	/// Resolves `tag` as a `T`, returning `default` when absent.
	///
	/// A value of another type is treated the same as no value. A context
	/// that holds the tag wins outright, so a mismatched context value also
	/// yields `default` rather than falling through to the repositories.
	pub fn get_typed<T: ValuePayload>(
		&self,
		tag: &Tag,
		default: T,
		context: Option<&dyn Contextual>,
	) -> T {
		let Some(resolved) = self.resolve(tag, context) else {
			return default;
		};
		let source = resolved.source;
		match resolved.value.try_into_payload::<T>() {
			Ok(value) => value,
			Err(found) => {
				debug!(
					domain = "tagval",
					tag = %tag,
					source = %source,
					expected = T::VALUE_TYPE.name(),
					got = found.type_name(),
					"tag value type mismatch; falling back to default",
				);
				default
			}
		}
	}

	/// Resolves `tag` as a `T`, reporting a type mismatch as an error.
	pub fn get_checked<T: ValuePayload>(
		&self,
		tag: &Tag,
		context: Option<&dyn Contextual>,
	) -> Result<Option<T>> {
		let Some(resolved) = self.resolve(tag, context) else {
			return Ok(None);
		};
		resolved
			.value
			.try_into_payload::<T>()
			.map(Some)
			.map_err(|found| TagValueError::TypeMismatch {
				tag: tag.clone(),
				expected: T::VALUE_TYPE,
				found: found.value_type(),
			})
	}

	/// Writes `value` for the exact `tag`.
	///
	/// The target is the named repository, or the highest-priority one when
	/// `repository` is `None`. Raises one change notification on success and
	/// leaves all state untouched on failure.
	pub fn set_value(&mut self, tag: Tag, value: Value, repository: Option<&str>) -> Result<()> {
		let target = match repository {
			Some(name) => self
				.chain
				.find_mut(name)
				.ok_or_else(|| TagValueError::RepositoryNotFound(RepositoryName::new(name)))?,
			None => self
				.chain
				.highest_mut()
				.ok_or(TagValueError::NoRepositoryAvailable)?,
		};
		let old = target.set(tag.clone(), value.clone());
		let event = ChangeEvent {
			tag,
			repository: target.name().clone(),
			old,
			new: Some(value),
		};
		self.listeners.emit(&event);
		Ok(())
	}

	/// Removes the exact `tag` from the named repository, or from every
	/// repository holding it when `repository` is `None`.
	///
	/// Raises one notification per removal. Returns true if anything was removed.
	pub fn remove_value(&mut self, tag: &Tag, repository: Option<&str>) -> bool {
		let mut removed = false;
		match repository {
			Some(name) => {
				if let Some(target) = self.chain.find_mut(name)
					&& let Some(old) = target.remove(tag)
				{
					let event = ChangeEvent::removed(tag.clone(), target.name().clone(), old);
					self.listeners.emit(&event);
					removed = true;
				}
			}
			None => {
				for target in self.chain.iter_mut() {
					if let Some(old) = target.remove(tag) {
						let event = ChangeEvent::removed(tag.clone(), target.name().clone(), old);
						self.listeners.emit(&event);
						removed = true;
					}
				}
			}
		}
		removed
	}

	/// Clears the named repository, or every repository when `repository` is
	/// `None`. Raises one notification per entry that was present.
	///
	/// Returns the number of entries removed.
	pub fn clear(&mut self, repository: Option<&str>) -> usize {
		match repository {
			Some(name) => match self.chain.find_mut(name) {
				Some(target) => drain(target, &mut self.listeners),
				None => {
					debug!(domain = "tagval", repository = name, "clear of unknown repository");
					0
				}
			},
			None => self
				.chain
				.iter_mut()
				.map(|target| drain(target, &mut self.listeners))
				.sum(),
		}
	}

	/// Every tag stored in any repository, sorted and deduplicated.
	pub fn all_tags(&self) -> Vec<Tag> {
		let tags: BTreeSet<Tag> = self.chain.iter().flat_map(|r| r.all_tags()).collect();
		tags.into_iter().collect()
	}

	/// Subscribes `listener` to change notifications.
	///
	/// Listeners must be `Send + Sync` so the engine can sit behind a
	/// [`SharedEngine`](crate::SharedEngine).
	pub fn on_change<F>(&mut self, listener: F) -> ListenerId
	where
		F: FnMut(&ChangeEvent) + Send + Sync + 'static,
	{
		self.listeners.subscribe(Box::new(listener))
	}

	/// Unsubscribes a listener. Returns false if it was not subscribed.
	pub fn remove_listener(&mut self, id: ListenerId) -> bool {
		self.listeners.unsubscribe(id)
	}

	pub fn listener_count(&self) -> usize {
		self.listeners.len()
	}

	/// Returns true if `tag` parses and resolves to a value.
	pub fn has(&self, tag: &str, context: Option<&dyn Contextual>) -> bool {
		parse_tag(tag).is_some_and(|tag| self.has_value(&tag, context))
	}

	/// Resolves `tag` as a `T`, returning `default` when the tag is invalid,
	/// absent or of another type.
	pub fn get<T: ValuePayload>(&self, tag: &str, default: T, context: Option<&dyn Contextual>) -> T {
		match parse_tag(tag) {
			Some(tag) => self.get_typed(&tag, default, context),
			None => default,
		}
	}

	/// Writes `value` for `tag`. See [`set_value`](Self::set_value).
	pub fn set(&mut self, tag: &str, value: impl Into<Value>, repository: Option<&str>) -> Result<()> {
		let tag = Tag::parse(tag)?;
		self.set_value(tag, value.into(), repository)
	}

	/// Removes `tag`. See [`remove_value`](Self::remove_value).
	pub fn remove(&mut self, tag: &str, repository: Option<&str>) -> bool {
		parse_tag(tag).is_some_and(|tag| self.remove_value(&tag, repository))
	}

	/// Visits `tag` and its ancestors, asking every repository in priority
	/// order at each level. Returns the first hit.
	fn walk<R>(&self, tag: &Tag, mut probe: impl FnMut(&dyn Repository, &Tag) -> Option<R>) -> Option<R> {
		for level in tag.ancestors() {
			for repository in self.chain.iter() {
				if let Some(hit) = probe(repository, &level) {
					return Some(hit);
				}
			}
		}
		None
	}
}

impl core::fmt::Debug for TagValueEngine {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("TagValueEngine")
			.field("chain", &self.chain)
			.field("listeners", &self.listeners.len())
			.finish()
	}
}

fn drain(target: &mut dyn Repository, listeners: &mut ChangeListeners) -> usize {
	let repository = target.name().clone();
	let mut entries = target.clear();
	entries.sort_by(|a, b| a.0.cmp(&b.0));
	let count = entries.len();
	for (tag, old) in entries {
		listeners.emit(&ChangeEvent::removed(tag, repository.clone(), old));
	}
	count
}

fn parse_tag(text: &str) -> Option<Tag> {
	match Tag::parse(text) {
		Ok(tag) => Some(tag),
		Err(error) => {
			warn!(domain = "tagval", %error, "rejected tag");
			None
		}
	}
}
