//! Narrow-phase collision routines and the data they produce.
//!
//! Every routine fills the geometric part of a [`Manifold`] (points, normal,
//! feature ids) and leaves the impulses to the contact layer.

mod manifold;
mod collide_circle;
mod collide_polygon;
mod collide_edge;
mod distance;
mod collision_filter;

pub use self::manifold::{
    clip_segment_to_line, get_point_states, ClipVertex, ContactFeature, ContactId, FeatureType,
    Manifold, ManifoldPoint, ManifoldType, PointState, WorldManifold,
};
pub use self::collide_circle::{collide_circles, collide_polygon_and_circle};
pub use self::collide_polygon::collide_polygons;
pub use self::collide_edge::{collide_edge_and_circle, collide_edge_and_polygon};
pub use self::distance::{distance, test_overlap, DistanceInput, DistanceOutput, DistanceProxy};
pub use self::collision_filter::{
    CollisionGroup, CollisionMask, ContactFilter, DefaultContactFilter, Filter,
};
