use crate::core::settings::{LINEAR_SLOP, POLYGON_RADIUS};
use crate::error::PhysicsError;
use crate::math::Vector2;
use crate::shapes::EdgeShape;
use crate::Result;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// A free-form sequence of line segments.
///
/// A chain has one child edge per segment. Child edges are handed to the
/// narrow phase with their neighbours as ghost vertices so that shapes slide
/// across interior vertices without snagging.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct ChainShape {
    /// Chain vertices. A loop repeats its first vertex at the end.
    vertices: Vec<Vector2>,

    /// Ghost vertex before the first vertex
    prev_vertex: Option<Vector2>,

    /// Ghost vertex after the last vertex
    next_vertex: Option<Vector2>,

    is_loop: bool,

    /// Skin radius
    pub radius: f32,
}

impl ChainShape {
    /// Creates a closed loop. The last vertex connects back to the first.
    pub fn new_loop(vertices: &[Vector2]) -> Result<Self> {
        if vertices.len() < 3 {
            return Err(PhysicsError::InvalidParameter(format!(
                "a chain loop needs at least 3 vertices, got {}",
                vertices.len()
            )));
        }
        check_spacing(vertices)?;

        let count = vertices.len();
        if vertices[count - 1].distance_squared(&vertices[0]) <= LINEAR_SLOP * LINEAR_SLOP {
            return Err(PhysicsError::InvalidParameter(
                "chain loop closes on a vertex that duplicates its start".to_string(),
            ));
        }

        let mut closed = vertices.to_vec();
        closed.push(vertices[0]);

        Ok(Self {
            prev_vertex: Some(closed[count - 1]),
            next_vertex: Some(closed[1]),
            vertices: closed,
            is_loop: true,
            radius: POLYGON_RADIUS,
        })
    }

    /// Creates an open chain with optional ghost vertices at either end
    pub fn new_chain(
        vertices: &[Vector2],
        prev_vertex: Option<Vector2>,
        next_vertex: Option<Vector2>,
    ) -> Result<Self> {
        if vertices.len() < 2 {
            return Err(PhysicsError::InvalidParameter(format!(
                "a chain needs at least 2 vertices, got {}",
                vertices.len()
            )));
        }
        check_spacing(vertices)?;

        Ok(Self {
            vertices: vertices.to_vec(),
            prev_vertex,
            next_vertex,
            is_loop: false,
            radius: POLYGON_RADIUS,
        })
    }

    /// Returns the chain vertices
    pub fn vertices(&self) -> &[Vector2] {
        &self.vertices
    }

    pub fn prev_vertex(&self) -> Option<Vector2> {
        self.prev_vertex
    }

    pub fn next_vertex(&self) -> Option<Vector2> {
        self.next_vertex
    }

    pub fn is_loop(&self) -> bool {
        self.is_loop
    }

    /// Returns the number of child edges
    pub fn child_count(&self) -> usize {
        self.vertices.len() - 1
    }

    /// Materializes the child edge at `index`.
    ///
    /// The edge is one-sided when both of its neighbouring vertices are known,
    /// which is always the case for loops and for interior edges.
    pub fn child_edge(&self, index: usize) -> EdgeShape {
        assert!(
            index < self.child_count(),
            "chain child index {} out of range ({} children)",
            index,
            self.child_count()
        );

        let count = self.vertices.len();
        let vertex1 = self.vertices[index];
        let vertex2 = self.vertices[index + 1];

        let vertex0 = if index > 0 {
            Some(self.vertices[index - 1])
        } else {
            self.prev_vertex
        };

        let vertex3 = if index + 2 < count {
            Some(self.vertices[index + 2])
        } else {
            self.next_vertex
        };

        match (vertex0, vertex3) {
            (Some(v0), Some(v3)) => EdgeShape {
                radius: self.radius,
                ..EdgeShape::new_one_sided(v0, vertex1, vertex2, v3)
            },
            _ => EdgeShape {
                radius: self.radius,
                ..EdgeShape::new(vertex1, vertex2)
            },
        }
    }
}

fn check_spacing(vertices: &[Vector2]) -> Result<()> {
    for pair in vertices.windows(2) {
        if pair[0].distance_squared(&pair[1]) <= LINEAR_SLOP * LINEAR_SLOP {
            return Err(PhysicsError::InvalidParameter(
                "chain vertices are too close together".to_string(),
            ));
        }
    }

    Ok(())
}
