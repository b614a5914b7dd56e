//! The closed set of values that can be stored against a tag.

use serde::{Deserialize, Serialize};
use tagval_primitives::{ObjectRef, Transform, TypeRef};

pub mod parse;


/// A value stored against a tag.
///
/// Exactly one payload case is active. Values are never mutated in place:
/// updating a tag stores a new `Value`, and repositories hand out clones.
/// Values of different cases never compare equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
	/// Boolean value.
	Bool(bool),
	/// Signed integer value.
	Int(i64),
	/// Floating point value.
	Float(f64),
	/// String value.
	String(String),
	/// Position, rotation and scale.
	Transform(Transform),
	/// Soft reference to a type.
	TypeRef(TypeRef),
	/// Soft reference to an object.
	ObjectRef(ObjectRef),
}

/// Identifies which case of [`Value`] is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
	Bool,
	Int,
	Float,
	String,
	Transform,
	TypeRef,
	ObjectRef,
}

impl ValueType {
	/// All value types in declaration order.
	pub const ALL: [ValueType; 7] = [
		ValueType::Bool,
		ValueType::Int,
		ValueType::Float,
		ValueType::String,
		ValueType::Transform,
		ValueType::TypeRef,
		ValueType::ObjectRef,
	];

	/// Returns the lowercase name of this type.
	pub const fn name(self) -> &'static str {
		match self {
			ValueType::Bool => "bool",
			ValueType::Int => "int",
			ValueType::Float => "float",
			ValueType::String => "string",
			ValueType::Transform => "transform",
			ValueType::TypeRef => "type-ref",
			ValueType::ObjectRef => "object-ref",
		}
	}
}

impl core::fmt::Display for ValueType {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.write_str(self.name())
	}
}

impl Value {
	/// Returns the type identity of the active case.
	pub fn value_type(&self) -> ValueType {
		match self {
			Value::Bool(_) => ValueType::Bool,
			Value::Int(_) => ValueType::Int,
			Value::Float(_) => ValueType::Float,
			Value::String(_) => ValueType::String,
			Value::Transform(_) => ValueType::Transform,
			Value::TypeRef(_) => ValueType::TypeRef,
			Value::ObjectRef(_) => ValueType::ObjectRef,
		}
	}

	/// Returns the type name of the active case.
	pub fn type_name(&self) -> &'static str {
		self.value_type().name()
	}

	/// Returns true if this value matches the given type.
	pub fn matches_type(&self, ty: ValueType) -> bool {
		self.value_type() == ty
	}

	/// Borrows the payload as `T` if `T` is the active case.
	///
	/// No coercion is performed: asking an `Int` value for `f64` yields `None`.
	pub fn try_get<T: ValuePayload>(&self) -> Option<&T> {
		T::from_value(self)
	}

	/// Converts into the payload `T`, returning `self` unchanged on mismatch.
	pub fn try_into_payload<T: ValuePayload>(self) -> Result<T, Value> {
		T::try_from_value(self)
	}

	/// Returns the boolean value if this is a `Bool` variant.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Value::Bool(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the integer value if this is an `Int` variant.
	pub fn as_int(&self) -> Option<i64> {
		match self {
			Value::Int(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the float value if this is a `Float` variant.
	pub fn as_float(&self) -> Option<f64> {
		match self {
			Value::Float(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the string value if this is a `String` variant.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::String(v) => Some(v),
			_ => None,
		}
	}

	pub fn as_transform(&self) -> Option<&Transform> {
		self.try_get()
	}

	pub fn as_type_ref(&self) -> Option<&TypeRef> {
		self.try_get()
	}

	pub fn as_object_ref(&self) -> Option<&ObjectRef> {
		self.try_get()
	}
}

impl core::fmt::Display for Value {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		match self {
			Value::Bool(v) => write!(f, "{v}"),
			Value::Int(v) => write!(f, "{v}"),
			Value::Float(v) => write!(f, "{v}"),
			Value::String(v) => write!(f, "{v:?}"),
			Value::Transform(t) => {
				let (p, r, s) = (t.position, t.rotation, t.scale);
				write!(
					f,
					"{},{},{};{},{},{},{};{},{},{}",
					p.x, p.y, p.z, r.x, r.y, r.z, r.w, s.x, s.y, s.z
				)
			}
			Value::TypeRef(v) => write!(f, "type:{v}"),
			Value::ObjectRef(v) => write!(f, "object:{v}"),
		}
	}
}

// Seal the ValuePayload trait to the closed payload set.
mod sealed {
	pub trait Sealed {}
	impl Sealed for bool {}
	impl Sealed for i64 {}
	impl Sealed for f64 {}
	impl Sealed for String {}
	impl Sealed for tagval_primitives::Transform {}
	impl Sealed for tagval_primitives::TypeRef {}
	impl Sealed for tagval_primitives::ObjectRef {}
}

/// Rust types that are exactly one case of [`Value`].
pub trait ValuePayload: sealed::Sealed + Clone + Sized {
	/// The [`ValueType`] this Rust type corresponds to.
	const VALUE_TYPE: ValueType;

	/// Borrows the payload, returning `None` if another case is active.
	fn from_value(value: &Value) -> Option<&Self>;

	/// Takes the payload out of `value`, handing the value back on mismatch.
	fn try_from_value(value: Value) -> Result<Self, Value>;

	/// Wraps the payload in its [`Value`] case.
	fn into_value(self) -> Value;
}

macro_rules! impl_payload {
	($ty:ty, $variant:ident) => {
		impl ValuePayload for $ty {
			const VALUE_TYPE: ValueType = ValueType::$variant;

			fn from_value(value: &Value) -> Option<&Self> {
				match value {
					Value::$variant(v) => Some(v),
					_ => None,
				}
			}

			fn try_from_value(value: Value) -> Result<Self, Value> {
				match value {
					Value::$variant(v) => Ok(v),
					other => Err(other),
				}
			}

			fn into_value(self) -> Value {
				Value::$variant(self)
			}
		}

		impl From<$ty> for Value {
			fn from(v: $ty) -> Self {
				Value::$variant(v)
			}
		}
	};
}

impl_payload!(bool, Bool);
impl_payload!(i64, Int);
impl_payload!(f64, Float);
impl_payload!(String, String);
impl_payload!(Transform, Transform);
impl_payload!(TypeRef, TypeRef);
impl_payload!(ObjectRef, ObjectRef);

impl From<i32> for Value {
	fn from(v: i32) -> Self {
		Value::Int(i64::from(v))
	}
}

impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Value::String(v.to_string())
	}
}
