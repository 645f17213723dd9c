use crate::core::settings::{EPSILON, MAX_MANIFOLD_POINTS};
use crate::math::{Transform, Vector2};

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// The kind of geometric feature that produced a contact point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum FeatureType {
    #[default]
    Vertex = 0,
    Face = 1,
}

/// The features that intersect to form a contact point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct ContactFeature {
    /// Feature index on shape A
    pub index_a: u8,

    /// Feature index on shape B
    pub index_b: u8,

    /// Feature type on shape A
    pub type_a: FeatureType,

    /// Feature type on shape B
    pub type_b: FeatureType,
}

impl ContactFeature {
    /// Exchanges the A and B sides of the feature pair
    pub fn swapped(self) -> Self {
        Self {
            index_a: self.index_b,
            index_b: self.index_a,
            type_a: self.type_b,
            type_b: self.type_a,
        }
    }
}

/// Identifies a contact point across time steps so impulses can be carried forward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct ContactId {
    pub feature: ContactFeature,
}

impl ContactId {
    /// Creates an id from its feature pair
    pub fn new(index_a: u8, index_b: u8, type_a: FeatureType, type_b: FeatureType) -> Self {
        Self {
            feature: ContactFeature {
                index_a,
                index_b,
                type_a,
                type_b,
            },
        }
    }

    /// Packs the feature pair into a single integer
    pub fn key(&self) -> u32 {
        let f = &self.feature;
        (f.index_a as u32)
            | (f.index_b as u32) << 8
            | (f.type_a as u32) << 16
            | (f.type_b as u32) << 24
    }
}

/// A contact point belonging to a manifold.
///
/// The meaning of `local_point` depends on the manifold type:
/// - `Circles`: the local center of circle B
/// - `FaceA`: the local center of circle B or the clip point of polygon B
/// - `FaceB`: the clip point of polygon A
///
/// The impulses are solver state. The narrow phase never writes them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct ManifoldPoint {
    pub local_point: Vector2,
    pub normal_impulse: f32,
    pub tangent_impulse: f32,
    pub id: ContactId,
}

/// How a manifold's local data is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum ManifoldType {
    #[default]
    Circles,
    FaceA,
    FaceB,
}

/// Contact points for two touching convex shapes, stored in local coordinates
/// so that they stay valid while the bodies move.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Manifold {
    /// Contact points. Entries past `point_count` are stale.
    pub points: [ManifoldPoint; MAX_MANIFOLD_POINTS],

    /// Not used for `Circles`
    pub local_normal: Vector2,

    /// Usage depends on the manifold type
    pub local_point: Vector2,

    pub manifold_type: ManifoldType,

    pub point_count: usize,
}

impl Manifold {
    /// Creates an empty manifold
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the live contact points
    pub fn points(&self) -> &[ManifoldPoint] {
        &self.points[..self.point_count]
    }

    /// Returns the live contact points mutably
    pub fn points_mut(&mut self) -> &mut [ManifoldPoint] {
        &mut self.points[..self.point_count]
    }

    /// Returns the first live point carrying `id`
    pub fn find_point(&self, id: ContactId) -> Option<&ManifoldPoint> {
        self.points().iter().find(|p| p.id == id)
    }
}

/// A manifold reconstructed in world coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WorldManifold {
    /// World vector pointing from A to B
    pub normal: Vector2,

    /// World contact points, halfway between the two surfaces
    pub points: [Vector2; MAX_MANIFOLD_POINTS],

    /// Negative values indicate overlap
    pub separations: [f32; MAX_MANIFOLD_POINTS],
}

impl WorldManifold {
    /// Evaluates a manifold against the current transforms and shape radii
    pub fn new(
        manifold: &Manifold,
        xf_a: &Transform,
        radius_a: f32,
        xf_b: &Transform,
        radius_b: f32,
    ) -> Self {
        let mut world = Self::default();
        if manifold.point_count == 0 {
            return world;
        }

        match manifold.manifold_type {
            ManifoldType::Circles => {
                let mut normal = Vector2::new(1.0, 0.0);
                let point_a = xf_a.transform_point(manifold.local_point);
                let point_b = xf_b.transform_point(manifold.points[0].local_point);
                if point_a.distance_squared(&point_b) > EPSILON * EPSILON {
                    normal = (point_b - point_a).normalize();
                }

                let c_a = point_a + radius_a * normal;
                let c_b = point_b - radius_b * normal;
                world.normal = normal;
                world.points[0] = 0.5 * (c_a + c_b);
                world.separations[0] = (c_b - c_a).dot(&normal);
            }

            ManifoldType::FaceA => {
                let normal = xf_a.transform_direction(manifold.local_normal);
                let plane_point = xf_a.transform_point(manifold.local_point);

                for (i, point) in manifold.points().iter().enumerate() {
                    let clip_point = xf_b.transform_point(point.local_point);
                    let c_a = clip_point + (radius_a - (clip_point - plane_point).dot(&normal)) * normal;
                    let c_b = clip_point - radius_b * normal;
                    world.points[i] = 0.5 * (c_a + c_b);
                    world.separations[i] = (c_b - c_a).dot(&normal);
                }
                world.normal = normal;
            }

            ManifoldType::FaceB => {
                let normal = xf_b.transform_direction(manifold.local_normal);
                let plane_point = xf_b.transform_point(manifold.local_point);

                for (i, point) in manifold.points().iter().enumerate() {
                    let clip_point = xf_a.transform_point(point.local_point);
                    let c_b = clip_point + (radius_b - (clip_point - plane_point).dot(&normal)) * normal;
                    let c_a = clip_point - radius_a * normal;
                    world.points[i] = 0.5 * (c_a + c_b);
                    world.separations[i] = (c_a - c_b).dot(&normal);
                }

                // Ensure normal points from A to B
                world.normal = -normal;
            }
        }

        world
    }
}

/// Persistence of a contact point between two manifolds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointState {
    /// Point does not exist
    #[default]
    Null,

    /// Point was added in the update
    Add,

    /// Point persisted across the update
    Persist,

    /// Point was removed in the update
    Remove,
}

/// Classifies the points of two consecutive manifolds.
///
/// The first array describes `old` points (`Persist` or `Remove`), the second
/// describes `new` points (`Add` or `Persist`).
pub fn get_point_states(
    old: &Manifold,
    new: &Manifold,
) -> ([PointState; MAX_MANIFOLD_POINTS], [PointState; MAX_MANIFOLD_POINTS]) {
    let mut state1 = [PointState::Null; MAX_MANIFOLD_POINTS];
    let mut state2 = [PointState::Null; MAX_MANIFOLD_POINTS];

    for (i, point) in old.points().iter().enumerate() {
        state1[i] = if new.find_point(point.id).is_some() {
            PointState::Persist
        } else {
            PointState::Remove
        };
    }

    for (i, point) in new.points().iter().enumerate() {
        state2[i] = if old.find_point(point.id).is_some() {
            PointState::Persist
        } else {
            PointState::Add
        };
    }

    (state1, state2)
}

/// A segment end point used while clipping
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClipVertex {
    pub v: Vector2,
    pub id: ContactId,
}

/// Sutherland-Hodgman clipping of a segment against the half plane
/// `dot(normal, x) <= offset`.
///
/// Returns the clipped segment and the number of valid end points. A point
/// created on the clip plane takes `vertex_index_a` as its A feature.
pub fn clip_segment_to_line(
    v_in: &[ClipVertex; 2],
    normal: Vector2,
    offset: f32,
    vertex_index_a: u8,
) -> ([ClipVertex; 2], usize) {
    let mut v_out = [ClipVertex::default(); 2];
    let mut count = 0;

    let distance0 = normal.dot(&v_in[0].v) - offset;
    let distance1 = normal.dot(&v_in[1].v) - offset;

    // Points behind the plane are kept
    if distance0 <= 0.0 {
        v_out[count] = v_in[0];
        count += 1;
    }
    if distance1 <= 0.0 {
        v_out[count] = v_in[1];
        count += 1;
    }

    // The points straddle the plane
    if distance0 * distance1 < 0.0 {
        let interp = distance0 / (distance0 - distance1);
        v_out[count].v = v_in[0].v + interp * (v_in[1].v - v_in[0].v);
        v_out[count].id = ContactId::new(
            vertex_index_a,
            v_in[0].id.feature.index_b,
            FeatureType::Vertex,
            FeatureType::Face,
        );
        count += 1;
    }

    (v_out, count)
}
