//! Priority-ordered directory of repositories.
//!
//! The chain never interprets values; it only keeps repositories sorted by
//! descending priority. Equal priorities keep registration order, and a
//! repository that replaces a same-named entry inherits that entry's slot in
//! the tie-break.

use crate::repository::{Repository, RepositoryName};


struct ChainEntry {
	repository: Box<dyn Repository>,
	/// Registration sequence number, used to break priority ties.
	seq: u64,
}

/// Repositories sorted by descending priority.
#[derive(Default)]
pub struct RepositoryChain {
	entries: Vec<ChainEntry>,
	next_seq: u64,
}

impl RepositoryChain {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `repository`, replacing any entry with the same name.
	///
	/// Returns the replaced repository, if any.
	pub fn register(&mut self, repository: Box<dyn Repository>) -> Option<Box<dyn Repository>> {
		let replaced = match self.position(repository.name().as_str()) {
			Some(index) => {
				let entry = &mut self.entries[index];
				Some(std::mem::replace(&mut entry.repository, repository))
			}
			None => {
				let seq = self.next_seq;
				self.next_seq += 1;
				self.entries.push(ChainEntry { repository, seq });
				None
			}
		};
		self.sort();
		replaced
	}

	/// Removes the named repository. No-op if it is not registered.
	pub fn unregister(&mut self, name: &str) -> Option<Box<dyn Repository>> {
		let index = self.position(name)?;
		Some(self.entries.remove(index).repository)
	}

	/// Looks up a repository by name.
	pub fn find(&self, name: &str) -> Option<&dyn Repository> {
		self.position(name).map(|i| &*self.entries[i].repository)
	}

	pub fn find_mut(&mut self, name: &str) -> Option<&mut dyn Repository> {
		let index = self.position(name)?;
		let repository: &mut dyn Repository = &mut *self.entries[index].repository;
		Some(repository)
	}

	/// The repository consulted first, if any.
	pub fn highest(&self) -> Option<&dyn Repository> {
		self.entries.first().map(|e| &*e.repository)
	}

	pub fn highest_mut(&mut self) -> Option<&mut dyn Repository> {
		self.entries
			.first_mut()
			.map(|e| &mut *e.repository as &mut dyn Repository)
	}

	/// Members in resolution order.
	pub fn ordered(&self) -> Vec<&dyn Repository> {
		self.iter().collect()
	}

	/// Iterates members in resolution order.
	pub fn iter(&self) -> impl ExactSizeIterator<Item = &dyn Repository> + '_ {
		self.entries.iter().map(|e| &*e.repository)
	}

	pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut dyn Repository> + '_ {
		self.entries.iter_mut().map(|e| &mut *e.repository as &mut dyn Repository)
	}

	/// Member names in resolution order.
	pub fn names(&self) -> Vec<RepositoryName> {
		self.iter().map(|r| r.name().clone()).collect()
	}

	pub fn contains(&self, name: &str) -> bool {
		self.position(name).is_some()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Drops every repository.
	pub fn clear(&mut self) {
		self.entries.clear();
	}

	fn position(&self, name: &str) -> Option<usize> {
		self.entries
			.iter()
			.position(|e| e.repository.name().as_str() == name)
	}

	fn sort(&mut self) {
		self.entries.sort_by(|a, b| {
			b.repository
				.priority()
				.cmp(&a.repository.priority())
				.then(a.seq.cmp(&b.seq))
		});
	}
}

impl core::fmt::Debug for RepositoryChain {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_list().entries(self.iter()).finish()
	}
}
