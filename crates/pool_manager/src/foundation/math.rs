//! Math utilities and types
//!
//! Provides the placement types used when taking objects from a pool.

pub use nalgebra::{
    Vector3,
    Quaternion,
    Unit,
};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Half of the largest coordinate the world can address on any axis
pub const HALF_WORLD_MAX: f32 = 1_048_576.0;

/// Tolerance used to keep far-away placements just inside the world bounds
pub const THRESH_VECTOR_NORMALIZED: f32 = 0.01;

/// Almost the farthest location on every axis, used to park returned actors
pub fn far_away_location() -> Vec3 {
    let extent = HALF_WORLD_MAX - HALF_WORLD_MAX * THRESH_VECTOR_NORMALIZED;
    Vec3::new(extent, extent, extent)
}

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }
}
