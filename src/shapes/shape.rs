use crate::math::{Aabb, Transform};
use crate::shapes::{ChainShape, CircleShape, EdgeShape, PolygonShape};

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// The kind of a collision shape.
///
/// The set is closed: contact dispatch tables are indexed by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum ShapeType {
    /// A solid circle
    Circle,

    /// A line segment
    Edge,

    /// A solid convex polygon
    Polygon,

    /// A free-form sequence of line segments
    Chain,
}

impl ShapeType {
    /// The number of shape types
    pub const COUNT: usize = 4;

    /// Every shape type, in dispatch order
    pub const ALL: [ShapeType; ShapeType::COUNT] =
        [ShapeType::Circle, ShapeType::Edge, ShapeType::Polygon, ShapeType::Chain];

    /// Returns the dispatch index of this shape type
    #[inline]
    pub fn index(self) -> usize {
        match self {
            ShapeType::Circle => 0,
            ShapeType::Edge => 1,
            ShapeType::Polygon => 2,
            ShapeType::Chain => 3,
        }
    }
}

/// A collision shape attached to a fixture
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Shape {
    Circle(CircleShape),
    Edge(EdgeShape),
    Polygon(PolygonShape),
    Chain(ChainShape),
}

impl Shape {
    /// Returns the type of the shape
    pub fn shape_type(&self) -> ShapeType {
        match self {
            Shape::Circle(_) => ShapeType::Circle,
            Shape::Edge(_) => ShapeType::Edge,
            Shape::Polygon(_) => ShapeType::Polygon,
            Shape::Chain(_) => ShapeType::Chain,
        }
    }

    /// Returns the radius of the shape. For polygons, edges and chains this is the skin radius.
    pub fn radius(&self) -> f32 {
        match self {
            Shape::Circle(circle) => circle.radius,
            Shape::Edge(edge) => edge.radius,
            Shape::Polygon(polygon) => polygon.radius(),
            Shape::Chain(chain) => chain.radius,
        }
    }

    /// Returns the number of child primitives. Only chains have more than one.
    pub fn child_count(&self) -> usize {
        match self {
            Shape::Chain(chain) => chain.child_count(),
            _ => 1,
        }
    }

    /// Returns the world space bounding box of a child primitive
    pub fn compute_aabb(&self, transform: &Transform, child_index: usize) -> Aabb {
        match self {
            Shape::Circle(circle) => circle.compute_aabb(transform),
            Shape::Edge(edge) => edge.compute_aabb(transform),
            Shape::Polygon(polygon) => polygon.compute_aabb(transform),
            Shape::Chain(chain) => chain.child_edge(child_index).compute_aabb(transform),
        }
    }

    /// Returns the circle if this shape is one
    pub fn as_circle(&self) -> Option<&CircleShape> {
        match self {
            Shape::Circle(circle) => Some(circle),
            _ => None,
        }
    }

    /// Returns the edge if this shape is one
    pub fn as_edge(&self) -> Option<&EdgeShape> {
        match self {
            Shape::Edge(edge) => Some(edge),
            _ => None,
        }
    }

    /// Returns the polygon if this shape is one
    pub fn as_polygon(&self) -> Option<&PolygonShape> {
        match self {
            Shape::Polygon(polygon) => Some(polygon),
            _ => None,
        }
    }

    /// Returns the chain if this shape is one
    pub fn as_chain(&self) -> Option<&ChainShape> {
        match self {
            Shape::Chain(chain) => Some(chain),
            _ => None,
        }
    }
}

impl From<CircleShape> for Shape {
    fn from(circle: CircleShape) -> Self {
        Shape::Circle(circle)
    }
}

impl From<EdgeShape> for Shape {
    fn from(edge: EdgeShape) -> Self {
        Shape::Edge(edge)
    }
}

impl From<PolygonShape> for Shape {
    fn from(polygon: PolygonShape) -> Self {
        Shape::Polygon(polygon)
    }
}

impl From<ChainShape> for Shape {
    fn from(chain: ChainShape) -> Self {
        Shape::Chain(chain)
    }
}
