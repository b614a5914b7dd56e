//! Thread-safe handle to a single engine.
//!
//! The whole engine sits behind one coarse [`RwLock`], so a hierarchy walk
//! never observes a half-applied write. Change listeners run while the write
//! lock is held and must not call back into the same [`SharedEngine`].

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::context::Contextual;
use crate::engine::{ChangeEvent, ListenerId, TagValueEngine};
use crate::error::Result;
use crate::value::{Value, ValuePayload};

/// Cloneable, lock-guarded [`TagValueEngine`].
#[derive(Clone, Default)]
pub struct SharedEngine {
	inner: Arc<RwLock<TagValueEngine>>,
}

impl SharedEngine {
	pub fn new(engine: TagValueEngine) -> Self {
		Self {
			inner: Arc::new(RwLock::new(engine)),
		}
	}

	/// Locks the engine for a batch of reads.
	pub fn read(&self) -> RwLockReadGuard<'_, TagValueEngine> {
		self.inner.read()
	}

	/// Locks the engine for a batch of writes.
	pub fn write(&self) -> RwLockWriteGuard<'_, TagValueEngine> {
		self.inner.write()
	}

	pub fn has(&self, tag: &str, context: Option<&dyn Contextual>) -> bool {
		self.inner.read().has(tag, context)
	}

	pub fn get<T: ValuePayload>(&self, tag: &str, default: T, context: Option<&dyn Contextual>) -> T {
		self.inner.read().get(tag, default, context)
	}

	pub fn set(&self, tag: &str, value: impl Into<Value>, repository: Option<&str>) -> Result<()> {
		self.inner.write().set(tag, value, repository)
	}

	pub fn remove(&self, tag: &str, repository: Option<&str>) -> bool {
		self.inner.write().remove(tag, repository)
	}

	pub fn clear(&self, repository: Option<&str>) -> usize {
		self.inner.write().clear(repository)
	}

	pub fn on_change<F>(&self, listener: F) -> ListenerId
	where
		F: FnMut(&ChangeEvent) + Send + Sync + 'static,
	{
		self.inner.write().on_change(listener)
	}

	pub fn remove_listener(&self, id: ListenerId) -> bool {
		self.inner.write().remove_listener(id)
	}
}

impl From<TagValueEngine> for SharedEngine {
	fn from(engine: TagValueEngine) -> Self {
		Self::new(engine)
	}
}
