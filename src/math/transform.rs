use crate::math::{Vector2, Rotation};
use nalgebra as na;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// A rigid transformation in 2D space (translation and rotation)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Transform {
    /// Position in 2D space
    pub position: Vector2,

    /// Rotation about the origin
    pub rotation: Rotation,
}

impl Transform {
    /// Creates a new transform with the given position and rotation
    #[inline]
    pub fn new(position: Vector2, rotation: Rotation) -> Self {
        Self { position, rotation }
    }

    /// Creates a new identity transform
    #[inline]
    pub fn identity() -> Self {
        Self {
            position: Vector2::zero(),
            rotation: Rotation::identity(),
        }
    }

    /// Creates a new transform from just a position
    #[inline]
    pub fn from_position(position: Vector2) -> Self {
        Self {
            position,
            rotation: Rotation::identity(),
        }
    }

    /// Creates a new transform from a position and an angle in radians
    #[inline]
    pub fn from_position_angle(position: Vector2, angle: f32) -> Self {
        Self {
            position,
            rotation: Rotation::from_angle(angle),
        }
    }

    /// Transforms a point by this transform
    #[inline]
    pub fn transform_point(&self, point: Vector2) -> Vector2 {
        self.rotation.rotate_vector(point) + self.position
    }

    /// Transforms a point by the inverse of this transform
    #[inline]
    pub fn inverse_transform_point(&self, point: Vector2) -> Vector2 {
        self.rotation.inverse_rotate_vector(point - self.position)
    }

    /// Transforms a direction vector by this transform (ignoring translation)
    #[inline]
    pub fn transform_direction(&self, direction: Vector2) -> Vector2 {
        self.rotation.rotate_vector(direction)
    }

    /// Inverts this transform
    pub fn inverse(&self) -> Self {
        let inv_rotation = self.rotation.conjugate();
        Self {
            position: -inv_rotation.rotate_vector(self.position),
            rotation: inv_rotation,
        }
    }

    /// Computes `inverse(self) * other`, the transform of `other` expressed in this frame
    pub fn mul_transpose(&self, other: &Self) -> Self {
        Self {
            rotation: self.rotation.mul_transpose(&other.rotation),
            position: self.rotation.inverse_rotate_vector(other.position - self.position),
        }
    }

    /// Combines this transform with another, applying `other` first
    pub fn combine(&self, other: &Self) -> Self {
        Self {
            rotation: self.rotation * other.rotation,
            position: self.rotation.rotate_vector(other.position) + self.position,
        }
    }

    /// Converts the transform to a nalgebra isometry
    pub fn to_nalgebra(&self) -> na::Isometry2<f32> {
        na::Isometry2::new(self.position.to_nalgebra(), self.rotation.angle())
    }

    /// Creates a transform from a nalgebra isometry
    pub fn from_nalgebra(isometry: &na::Isometry2<f32>) -> Self {
        Self::from_position_angle(
            Vector2::from_nalgebra(&isometry.translation.vector),
            isometry.rotation.angle(),
        )
    }
}
