//! Change notification.

use tagval_primitives::Tag;
use tracing::trace;

use crate::repository::RepositoryName;
use crate::value::Value;

/// What happened to a tag in one repository.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEvent {
	pub tag: Tag,
	pub repository: RepositoryName,
	/// Value stored before the change, `None` if the tag was absent.
	pub old: Option<Value>,
	/// Value stored after the change, `None` if the tag was removed.
	pub new: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
	Inserted,
	Updated,
	Removed,
}

impl ChangeEvent {
	pub(crate) fn removed(tag: Tag, repository: RepositoryName, old: Value) -> Self {
		Self {
			tag,
			repository,
			old: Some(old),
			new: None,
		}
	}

	pub fn kind(&self) -> ChangeKind {
		match (&self.old, &self.new) {
			(None, Some(_)) => ChangeKind::Inserted,
			(Some(_), Some(_)) => ChangeKind::Updated,
			(_, None) => ChangeKind::Removed,
		}
	}
}

/// Handle returned by [`TagValueEngine::on_change`](super::TagValueEngine::on_change).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&ChangeEvent) + Send + Sync>;

/// Subscribed change listeners, invoked in subscription order.
#[derive(Default)]
pub(crate) struct ChangeListeners {
	next_id: u64,
	listeners: Vec<(ListenerId, Listener)>,
}

impl ChangeListeners {
	pub(crate) fn subscribe(&mut self, listener: Listener) -> ListenerId {
		let id = ListenerId(self.next_id);
		self.next_id += 1;
		self.listeners.push((id, listener));
		id
	}

	pub(crate) fn unsubscribe(&mut self, id: ListenerId) -> bool {
		let before = self.listeners.len();
		self.listeners.retain(|(existing, _)| *existing != id);
		self.listeners.len() != before
	}

	pub(crate) fn emit(&mut self, event: &ChangeEvent) {
		trace!(
			domain = "tagval",
			tag = %event.tag,
			repository = %event.repository,
			kind = ?event.kind(),
			"tag value changed",
		);
		for (_, listener) in &mut self.listeners {
			listener(event);
		}
	}

	pub(crate) fn len(&self) -> usize {
		self.listeners.len()
	}

	pub(crate) fn clear(&mut self) {
		self.listeners.clear();
	}
}
