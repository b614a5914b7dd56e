use tagval_primitives::{InvalidTag, Tag};

use crate::repository::RepositoryName;
use crate::value::ValueType;

/// Errors reported by the tag-value engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TagValueError {
	/// The tag text was empty or malformed.
	#[error(transparent)]
	InvalidTag(#[from] InvalidTag),

	/// A named repository was requested but is not registered.
	#[error("repository not found: {0}")]
	RepositoryNotFound(RepositoryName),

	/// A write had no explicit target and the chain is empty.
	#[error("no repository available for write")]
	NoRepositoryAvailable,

	/// A value exists for the tag but is not of the requested type.
	#[error("type mismatch for tag '{tag}': expected {expected}, got {found}")]
	TypeMismatch {
		tag: Tag,
		expected: ValueType,
		found: ValueType,
	},
}

pub type Result<T, E = TagValueError> = std::result::Result<T, E>;
