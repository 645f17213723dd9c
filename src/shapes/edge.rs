use crate::core::settings::POLYGON_RADIUS;
use crate::math::{Aabb, Transform, Vector2};

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// A line segment collision shape.
///
/// Edges are two-sided unless they carry ghost vertices, which is how chain
/// children are materialized. A one-sided edge only collides on its right
/// side (the side its normal `(e.y, -e.x)` points to) and uses the ghost
/// vertices to suppress collisions against internal chain vertices.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct EdgeShape {
    /// Ghost vertex preceding `vertex1`, meaningful when `one_sided`
    pub vertex0: Vector2,

    /// First vertex of the segment
    pub vertex1: Vector2,

    /// Second vertex of the segment
    pub vertex2: Vector2,

    /// Ghost vertex following `vertex2`, meaningful when `one_sided`
    pub vertex3: Vector2,

    /// Whether the ghost vertices are in use
    pub one_sided: bool,

    /// Skin radius
    pub radius: f32,
}

impl EdgeShape {
    /// Creates a two-sided segment
    pub fn new(vertex1: Vector2, vertex2: Vector2) -> Self {
        Self {
            vertex0: Vector2::zero(),
            vertex1,
            vertex2,
            vertex3: Vector2::zero(),
            one_sided: false,
            radius: POLYGON_RADIUS,
        }
    }

    /// Creates a one-sided segment with ghost vertices for smooth collision
    pub fn new_one_sided(vertex0: Vector2, vertex1: Vector2, vertex2: Vector2, vertex3: Vector2) -> Self {
        Self {
            vertex0,
            vertex1,
            vertex2,
            vertex3,
            one_sided: true,
            radius: POLYGON_RADIUS,
        }
    }

    /// Returns the world space bounding box, inflated by the skin radius
    pub fn compute_aabb(&self, transform: &Transform) -> Aabb {
        let v1 = transform.transform_point(self.vertex1);
        let v2 = transform.transform_point(self.vertex2);

        Aabb::new(v1.min(&v2), v1.max(&v2)).expand(self.radius)
    }
}
