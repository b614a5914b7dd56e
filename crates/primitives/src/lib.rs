//! Plain value types shared by the tag-value engine: tags and payloads.

/// Soft references to types and objects.
pub mod path;
/// Hierarchical dotted identifiers.
pub mod tag;
/// Position/rotation/scale payload.
pub mod transform;

pub use path::{ObjectRef, TypeRef};
pub use tag::{Ancestors, InvalidTag, InvalidTagReason, Tag};
pub use transform::{Quat, Transform, Vec3};
