//! Path-like soft references to types and objects.
//!
//! These are identifiers only; nothing here resolves or loads the target.
//! The empty path is the null reference.

use serde::{Deserialize, Serialize};

macro_rules! soft_path {
	($(#[$meta:meta])* $name:ident) => {
		$(#[$meta])*
		#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(Box<str>);

		impl $name {
			/// Creates a reference from a path. Surrounding whitespace is trimmed.
			pub fn new(path: impl AsRef<str>) -> Self {
				Self(path.as_ref().trim().into())
			}

			/// The null reference.
			pub fn null() -> Self {
				Self::default()
			}

			/// Returns true for the null reference.
			pub fn is_null(&self) -> bool {
				self.0.is_empty()
			}

			/// Returns the path text.
			pub fn as_str(&self) -> &str {
				&self.0
			}
		}

		impl core::fmt::Display for $name {
			fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
				f.write_str(&self.0)
			}
		}

		impl From<&str> for $name {
			fn from(path: &str) -> Self {
				Self::new(path)
			}
		}

		impl From<String> for $name {
			fn from(path: String) -> Self {
				Self::new(path)
			}
		}
	};
}

soft_path!(
	/// Reference to a type by path, e.g. `/Game/Blueprints/Hero.Hero_C`.
	TypeRef
);

soft_path!(
	/// Reference to an object instance or asset by path.
	ObjectRef
);
