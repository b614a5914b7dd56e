//! Hierarchical tag-value resolution.
//!
//! Values are stored against dotted [`Tag`]s in named, prioritized
//! [`Repository`] backends. A lookup returns the most specific,
//! highest-priority value: the exact tag is searched across every repository
//! before falling back to its parent, and so on up to the root.
//!
//! ```
//! use tagval_registry::TagValueEngine;
//!
//! let mut engine = TagValueEngine::with_baseline();
//! engine.set("Character.Health", 100i64, Some("Default")).unwrap();
//! engine.set("Character.Health.Max", 150i64, Some("Runtime")).unwrap();
//!
//! assert_eq!(engine.get("Character.Health.Max", 0i64, None), 150);
//! assert_eq!(engine.get("Character.Health.Regen", 0i64, None), 100);
//! ```
//!
//! # Modules
//!
//! - [`value`] - The closed [`Value`] type and text parsing
//! - [`repository`] - The [`Repository`] trait and [`MemoryRepository`]
//! - [`chain`] - Priority-ordered [`RepositoryChain`]
//! - [`context`] - Per-call [`Contextual`] overrides
//! - [`engine`] - The [`TagValueEngine`] and change notification
//! - [`config`] - Starting repository layout

pub mod chain;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod repository;
pub mod shared;
pub mod value;

pub use chain::RepositoryChain;
pub use config::{ConfigError, EngineConfig, RepositoryConfig};
pub use context::{ContextValues, Contextual};
pub use engine::{ChangeEvent, ChangeKind, ListenerId, Resolved, TagValueEngine, ValueSource};
pub use error::TagValueError;
pub use repository::{
	CONFIG_PRIORITY, DEFAULT_PRIORITY, MemoryRepository, RUNTIME_PRIORITY, Repository,
	RepositoryName,
};
pub use shared::SharedEngine;
pub use tagval_primitives::{InvalidTag, ObjectRef, Quat, Tag, Transform, TypeRef, Vec3};
pub use value::parse::{ParseValueError, parse_value_for_type};
pub use value::{Value, ValuePayload, ValueType};
