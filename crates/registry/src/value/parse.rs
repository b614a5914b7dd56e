//! Text parsing for values of a known type.
//!
//! Used by adapters that receive values as strings (command lines, tabular
//! rows) and know which [`ValueType`] a tag expects.

use tagval_primitives::{ObjectRef, Quat, Transform, TypeRef, Vec3};

use super::{Value, ValueType};

/// Error returned when text does not parse as the requested type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {expected} value {input:?}: {reason}")]
pub struct ParseValueError {
	pub expected: ValueType,
	pub input: String,
	pub reason: String,
}

impl ParseValueError {
	fn new(expected: ValueType, input: &str, reason: impl Into<String>) -> Self {
		Self {
			expected,
			input: input.to_string(),
			reason: reason.into(),
		}
	}
}

/// Parse a string value into a [`Value`] for a known type.
pub fn parse_value_for_type(value: &str, ty: ValueType) -> Result<Value, ParseValueError> {
	let err = |reason: String| ParseValueError::new(ty, value, reason);
	match ty {
		ValueType::Bool => parse_bool(value).map(Value::Bool).map_err(err),
		ValueType::Int => parse_int(value).map(Value::Int).map_err(err),
		ValueType::Float => parse_float(value).map(Value::Float).map_err(err),
		ValueType::String => Ok(Value::String(value.to_string())),
		ValueType::Transform => parse_transform(value).map(Value::Transform).map_err(err),
		ValueType::TypeRef => Ok(Value::TypeRef(TypeRef::new(value))),
		ValueType::ObjectRef => Ok(Value::ObjectRef(ObjectRef::new(value))),
	}
}

/// Parse a boolean value from common string representations.
pub fn parse_bool(value: &str) -> Result<bool, String> {
	match value.trim().to_lowercase().as_str() {
		"true" | "1" | "yes" | "on" => Ok(true),
		"false" | "0" | "no" | "off" => Ok(false),
		_ => Err(format!(
			"invalid boolean: '{value}' (expected true/false, yes/no, on/off, 1/0)"
		)),
	}
}

/// Parse an integer value.
pub fn parse_int(value: &str) -> Result<i64, String> {
	value
		.trim()
		.parse::<i64>()
		.map_err(|_| format!("invalid integer: '{value}'"))
}

/// Parse a floating point value. Non-finite results are rejected.
pub fn parse_float(value: &str) -> Result<f64, String> {
	match value.trim().parse::<f64>() {
		Ok(v) if v.is_finite() => Ok(v),
		_ => Err(format!("invalid float: '{value}'")),
	}
}

/// Parse a transform written as `px,py,pz;rx,ry,rz,rw;sx,sy,sz`.
///
/// `identity` is accepted as a shorthand for [`Transform::IDENTITY`].
pub fn parse_transform(value: &str) -> Result<Transform, String> {
	let value = value.trim();
	if value.eq_ignore_ascii_case("identity") {
		return Ok(Transform::IDENTITY);
	}

	let groups: Vec<&str> = value.split(';').collect();
	let [position, rotation, scale] = groups.as_slice() else {
		return Err(format!(
			"invalid transform: '{value}' (expected 'px,py,pz;rx,ry,rz,rw;sx,sy,sz')"
		));
	};

	let [px, py, pz] = components::<3>(position)?;
	let [rx, ry, rz, rw] = components::<4>(rotation)?;
	let [sx, sy, sz] = components::<3>(scale)?;
	Ok(Transform::new(
		Vec3::new(px, py, pz),
		Quat::new(rx, ry, rz, rw),
		Vec3::new(sx, sy, sz),
	))
}

fn components<const N: usize>(group: &str) -> Result<[f64; N], String> {
	let mut out = [0.0; N];
	let mut parts = group.split(',');
	for slot in &mut out {
		let part = parts
			.next()
			.ok_or_else(|| format!("expected {N} components in '{group}'"))?;
		*slot = parse_float(part)?;
	}
	if parts.next().is_some() {
		return Err(format!("expected {N} components in '{group}'"));
	}
	Ok(out)
}
