//! Spatial transform payload: position, rotation and scale.

use serde::{Deserialize, Serialize};

/// A three-component vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
	pub x: f64,
	pub y: f64,
	pub z: f64,
}

impl Vec3 {
	pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
	pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

	pub const fn new(x: f64, y: f64, z: f64) -> Self {
		Self { x, y, z }
	}
}

/// A rotation quaternion in `(x, y, z, w)` order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quat {
	pub x: f64,
	pub y: f64,
	pub z: f64,
	pub w: f64,
}

impl Quat {
	pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

	pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
		Self { x, y, z, w }
	}
}

impl Default for Quat {
	fn default() -> Self {
		Self::IDENTITY
	}
}

/// Position, rotation and scale.
///
/// The default is [`Transform::IDENTITY`]: origin, no rotation, unit scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
	pub position: Vec3,
	pub rotation: Quat,
	pub scale: Vec3,
}

impl Transform {
	pub const IDENTITY: Self = Self::new(Vec3::ZERO, Quat::IDENTITY, Vec3::ONE);

	pub const fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
		Self {
			position,
			rotation,
			scale,
		}
	}

	/// Identity transform moved to `position`.
	pub const fn from_position(position: Vec3) -> Self {
		Self::new(position, Quat::IDENTITY, Vec3::ONE)
	}
}

impl Default for Transform {
	fn default() -> Self {
		Self::IDENTITY
	}
}
