//! Engine-wide constants shared by the narrow phase and the contact layer.

/// The maximum number of contact points between two convex shapes
pub const MAX_MANIFOLD_POINTS: usize = 2;

/// The maximum number of vertices on a convex polygon
pub const MAX_POLYGON_VERTICES: usize = 8;

/// A small length used as a collision and constraint tolerance, in meters
pub const LINEAR_SLOP: f32 = 0.005;

/// The radius of the polygon/edge skin. Should be a multiple of the linear slop.
pub const POLYGON_RADIUS: f32 = 2.0 * LINEAR_SLOP;

/// Machine epsilon used by the narrow phase
pub const EPSILON: f32 = f32::EPSILON;

/// Fattening applied to child AABBs when deciding whether a pair still overlaps
pub const AABB_EXTENSION: f32 = 0.1;
