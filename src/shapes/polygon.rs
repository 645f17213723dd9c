use crate::core::settings::{EPSILON, LINEAR_SLOP, MAX_POLYGON_VERTICES, POLYGON_RADIUS};
use crate::error::PhysicsError;
use crate::math::{Aabb, Rotation, Transform, Vector2};
use crate::Result;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// A solid convex polygon with counter-clockwise winding.
///
/// Polygons carry a small skin radius so that resting contact is established
/// slightly before the cores touch.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct PolygonShape {
    /// The vertices of the hull in body space
    vertices: Vec<Vector2>,

    /// Outward unit normal of the edge starting at the vertex with the same index
    normals: Vec<Vector2>,

    /// Area centroid in body space
    centroid: Vector2,

    /// Skin radius
    radius: f32,
}

impl PolygonShape {
    /// Creates an axis aligned box centered on the body origin
    pub fn new_box(half_width: f32, half_height: f32) -> Self {
        Self {
            vertices: vec![
                Vector2::new(-half_width, -half_height),
                Vector2::new(half_width, -half_height),
                Vector2::new(half_width, half_height),
                Vector2::new(-half_width, half_height),
            ],
            normals: vec![
                Vector2::new(0.0, -1.0),
                Vector2::new(1.0, 0.0),
                Vector2::new(0.0, 1.0),
                Vector2::new(-1.0, 0.0),
            ],
            centroid: Vector2::zero(),
            radius: POLYGON_RADIUS,
        }
    }

    /// Creates a box with the given center and rotation in body space
    pub fn new_oriented_box(half_width: f32, half_height: f32, center: Vector2, angle: f32) -> Self {
        let mut polygon = Self::new_box(half_width, half_height);
        let transform = Transform::new(center, Rotation::from_angle(angle));

        for (vertex, normal) in polygon.vertices.iter_mut().zip(polygon.normals.iter_mut()) {
            *vertex = transform.transform_point(*vertex);
            *normal = transform.transform_direction(*normal);
        }
        polygon.centroid = center;

        polygon
    }

    /// Builds the convex hull of a point cloud.
    ///
    /// Points closer than half the linear slop are welded together and at most
    /// `MAX_POLYGON_VERTICES` input points are considered. Collinear points
    /// are dropped from the hull.
    pub fn from_points(points: &[Vector2]) -> Result<Self> {
        let count = points.len().min(MAX_POLYGON_VERTICES);
        if count < 3 {
            return Err(PhysicsError::InvalidParameter(format!(
                "a polygon needs at least 3 points, got {}",
                points.len()
            )));
        }

        let weld_distance_sq = (0.5 * LINEAR_SLOP) * (0.5 * LINEAR_SLOP);
        let mut welded: Vec<Vector2> = Vec::with_capacity(count);
        for point in &points[..count] {
            if welded.iter().all(|p| p.distance_squared(point) >= weld_distance_sq) {
                welded.push(*point);
            }
        }

        let hull = gift_wrap(&welded);
        if hull.len() < 3 {
            log::warn!(
                "rejecting degenerate polygon: {} points produced a hull of {} vertices",
                points.len(),
                hull.len()
            );
            return Err(PhysicsError::InvalidParameter(
                "polygon points are degenerate (too close or collinear)".to_string(),
            ));
        }

        let mut normals = Vec::with_capacity(hull.len());
        for i in 0..hull.len() {
            let next = if i + 1 < hull.len() { i + 1 } else { 0 };
            let edge = hull[next] - hull[i];
            if edge.length_squared() <= EPSILON * EPSILON {
                return Err(PhysicsError::InvalidParameter(
                    "polygon has a zero length edge".to_string(),
                ));
            }
            normals.push(edge.cross_scalar(1.0).normalize());
        }

        let centroid = compute_centroid(&hull);

        Ok(Self {
            vertices: hull,
            normals,
            centroid,
            radius: POLYGON_RADIUS,
        })
    }

    /// Returns the hull vertices in counter-clockwise order
    pub fn vertices(&self) -> &[Vector2] {
        &self.vertices
    }

    /// Returns the outward edge normals
    pub fn normals(&self) -> &[Vector2] {
        &self.normals
    }

    /// Returns the number of vertices
    pub fn count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the area centroid
    pub fn centroid(&self) -> Vector2 {
        self.centroid
    }

    /// Returns the skin radius
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Checks that the hull is convex with counter-clockwise winding
    pub fn validate(&self) -> bool {
        let count = self.vertices.len();
        for i1 in 0..count {
            let i2 = if i1 + 1 < count { i1 + 1 } else { 0 };
            let p = self.vertices[i1];
            let e = self.vertices[i2] - p;

            for (j, vertex) in self.vertices.iter().enumerate() {
                if j == i1 || j == i2 {
                    continue;
                }

                if e.cross(&(*vertex - p)) < 0.0 {
                    return false;
                }
            }
        }

        true
    }

    /// Returns the world space bounding box, inflated by the skin radius
    pub fn compute_aabb(&self, transform: &Transform) -> Aabb {
        let mut lower = transform.transform_point(self.vertices[0]);
        let mut upper = lower;

        for vertex in self.vertices.iter().skip(1) {
            let v = transform.transform_point(*vertex);
            lower = lower.min(&v);
            upper = upper.max(&v);
        }

        Aabb::new(lower, upper).expand(self.radius)
    }
}

/// Gift wrapping starting from the right-most (lowest on ties) point
fn gift_wrap(points: &[Vector2]) -> Vec<Vector2> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let mut i0 = 0;
    let mut x0 = points[0].x;
    for (i, point) in points.iter().enumerate().skip(1) {
        if point.x > x0 || (point.x == x0 && point.y < points[i0].y) {
            i0 = i;
            x0 = point.x;
        }
    }

    let mut hull: Vec<usize> = Vec::with_capacity(n);
    let mut ih = i0;

    loop {
        hull.push(ih);

        let mut ie = 0;
        for j in 1..n {
            if ie == ih {
                ie = j;
                continue;
            }

            let r = points[ie] - points[ih];
            let v = points[j] - points[ih];
            let c = r.cross(&v);
            if c < 0.0 {
                ie = j;
            }

            // Collinearity check
            if c == 0.0 && v.length_squared() > r.length_squared() {
                ie = j;
            }
        }

        ih = ie;
        if ie == i0 || hull.len() > n {
            break;
        }
    }

    hull.into_iter().map(|i| points[i]).collect()
}

fn compute_centroid(vertices: &[Vector2]) -> Vector2 {
    let count = vertices.len();
    let mut c = Vector2::zero();
    let mut area = 0.0;

    // Reference point keeps the triangle fan well conditioned
    let s = vertices[0];
    let inv3 = 1.0 / 3.0;

    for i in 0..count {
        let p1 = vertices[0] - s;
        let p2 = vertices[i] - s;
        let p3 = if i + 1 < count { vertices[i + 1] } else { vertices[0] } - s;

        let e1 = p2 - p1;
        let e2 = p3 - p1;

        let triangle_area = 0.5 * e1.cross(&e2);
        area += triangle_area;

        c += triangle_area * inv3 * (p1 + p2 + p3);
    }

    c * (1.0 / area) + s
}
