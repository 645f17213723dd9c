use crate::math::{Aabb, Transform, Vector2};

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// A solid circle collision shape
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct CircleShape {
    /// The center of the circle in body space
    pub position: Vector2,

    /// The radius of the circle
    pub radius: f32,
}

impl CircleShape {
    /// Creates a new circle centered on the body origin
    pub fn new(radius: f32) -> Self {
        Self {
            position: Vector2::zero(),
            radius: radius.max(0.0),
        }
    }

    /// Creates a new circle at an offset from the body origin
    pub fn with_position(position: Vector2, radius: f32) -> Self {
        Self {
            position,
            radius: radius.max(0.0),
        }
    }

    /// Returns the world space bounding box
    pub fn compute_aabb(&self, transform: &Transform) -> Aabb {
        let center = transform.transform_point(self.position);
        Aabb::from_center_half_extents(center, Vector2::new(self.radius, self.radius))
    }
}
