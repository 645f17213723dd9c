use crate::collision::manifold::{clip_segment_to_line, ClipVertex, ContactId, FeatureType, Manifold, ManifoldType};
use crate::core::settings::MAX_POLYGON_VERTICES;
use crate::math::{Transform, Vector2};
use crate::shapes::{CircleShape, EdgeShape, PolygonShape};

/// Computes the manifold between an edge and a circle.
///
/// The circle center is classified against the Voronoi regions of the
/// segment. For one-sided edges the ghost vertices reject vertex contacts that
/// belong to a neighbouring edge.
pub fn collide_edge_and_circle(
    manifold: &mut Manifold,
    edge_a: &EdgeShape,
    xf_a: &Transform,
    circle_b: &CircleShape,
    xf_b: &Transform,
) {
    manifold.point_count = 0;

    // Circle center in the edge frame
    let q = xf_a.inverse_transform_point(xf_b.transform_point(circle_b.position));

    let a = edge_a.vertex1;
    let b = edge_a.vertex2;
    let e = b - a;

    // Normal points to the right for a CCW winding
    let mut n = Vector2::new(e.y, -e.x);
    let offset = n.dot(&(q - a));

    let one_sided = edge_a.one_sided;
    if one_sided && offset < 0.0 {
        return;
    }

    // Barycentric coordinates
    let u = e.dot(&(b - q));
    let v = e.dot(&(q - a));

    let radius = edge_a.radius + circle_b.radius;

    // Region A
    if v <= 0.0 {
        if q.distance_squared(&a) > radius * radius {
            return;
        }

        // Is there an edge connected to A?
        if one_sided {
            let e1 = a - edge_a.vertex0;
            if e1.dot(&(a - q)) > 0.0 {
                // Q is in the region of the previous edge
                return;
            }
        }

        set_vertex_point(manifold, a, 0, circle_b.position);
        return;
    }

    // Region B
    if u <= 0.0 {
        if q.distance_squared(&b) > radius * radius {
            return;
        }

        // Is there an edge connected to B?
        if one_sided {
            let e2 = edge_a.vertex3 - b;
            if e2.dot(&(q - b)) > 0.0 {
                // Q is in the region of the next edge
                return;
            }
        }

        set_vertex_point(manifold, b, 1, circle_b.position);
        return;
    }

    // Region AB
    let den = e.dot(&e);
    assert!(den > 0.0, "edge has zero length");
    let p = (1.0 / den) * (u * a + v * b);
    if q.distance_squared(&p) > radius * radius {
        return;
    }

    if offset < 0.0 {
        n = -n;
    }

    manifold.point_count = 1;
    manifold.manifold_type = ManifoldType::FaceA;
    manifold.local_normal = n.normalize();
    manifold.local_point = a;
    manifold.points[0].id = ContactId::new(0, 0, FeatureType::Face, FeatureType::Vertex);
    manifold.points[0].local_point = circle_b.position;
}

fn set_vertex_point(manifold: &mut Manifold, vertex: Vector2, index: u8, circle_center: Vector2) {
    manifold.point_count = 1;
    manifold.manifold_type = ManifoldType::Circles;
    manifold.local_normal = Vector2::zero();
    manifold.local_point = vertex;
    manifold.points[0].id = ContactId::new(index, 0, FeatureType::Vertex, FeatureType::Vertex);
    manifold.points[0].local_point = circle_center;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AxisType {
    Unknown,
    EdgeA,
    EdgeB,
}

/// A candidate separating axis
#[derive(Debug, Clone, Copy)]
struct Axis {
    normal: Vector2,
    axis_type: AxisType,
    index: usize,
    separation: f32,
}

impl Axis {
    fn none(axis_type: AxisType) -> Self {
        Self {
            normal: Vector2::zero(),
            axis_type,
            index: 0,
            separation: -f32::MAX,
        }
    }
}

/// Polygon B expressed in the edge frame
struct TempPolygon {
    vertices: [Vector2; MAX_POLYGON_VERTICES],
    normals: [Vector2; MAX_POLYGON_VERTICES],
    count: usize,
}

impl TempPolygon {
    fn vertices(&self) -> &[Vector2] {
        &self.vertices[..self.count]
    }

    fn normals(&self) -> &[Vector2] {
        &self.normals[..self.count]
    }
}

/// Reference face used for clipping
struct ReferenceFace {
    i1: usize,
    i2: usize,
    v1: Vector2,
    v2: Vector2,
    normal: Vector2,
    side_normal1: Vector2,
    side_offset1: f32,
    side_normal2: Vector2,
    side_offset2: f32,
}

fn compute_edge_separation(polygon_b: &TempPolygon, v1: Vector2, normal1: Vector2) -> Axis {
    let mut axis = Axis::none(AxisType::EdgeA);

    let axes = [normal1, -normal1];

    // Find the axis with the least overlap (min-max problem)
    for (j, candidate) in axes.iter().enumerate() {
        let sj = polygon_b
            .vertices()
            .iter()
            .map(|v| candidate.dot(&(*v - v1)))
            .fold(f32::MAX, f32::min);

        if sj > axis.separation {
            axis.index = j;
            axis.separation = sj;
            axis.normal = *candidate;
        }
    }

    axis
}

fn compute_polygon_separation(polygon_b: &TempPolygon, v1: Vector2, v2: Vector2) -> Axis {
    let mut axis = Axis::none(AxisType::Unknown);

    for (i, (normal, vertex)) in polygon_b.normals().iter().zip(polygon_b.vertices()).enumerate() {
        let n = -*normal;

        let s1 = n.dot(&(*vertex - v1));
        let s2 = n.dot(&(*vertex - v2));
        let s = s1.min(s2);

        if s > axis.separation {
            axis.axis_type = AxisType::EdgeB;
            axis.index = i;
            axis.separation = s;
            axis.normal = n;
        }
    }

    axis
}

/// Computes the manifold between an edge and a polygon.
///
/// One-sided edges reject contacts from behind and use the ghost vertices to
/// clamp the collision normal into the edge's admissible cone, which lets
/// polygons slide across chain vertices.
pub fn collide_edge_and_polygon(
    manifold: &mut Manifold,
    edge_a: &EdgeShape,
    xf_a: &Transform,
    polygon_b: &PolygonShape,
    xf_b: &Transform,
) {
    manifold.point_count = 0;

    let xf = xf_a.mul_transpose(xf_b);

    let centroid_b = xf.transform_point(polygon_b.centroid());

    let v1 = edge_a.vertex1;
    let v2 = edge_a.vertex2;

    let edge1 = (v2 - v1).normalize();

    // Normal points to the right for a CCW winding
    let normal1 = Vector2::new(edge1.y, -edge1.x);
    let offset1 = normal1.dot(&(centroid_b - v1));

    let one_sided = edge_a.one_sided;
    if one_sided && offset1 < 0.0 {
        return;
    }

    // Get polygon B in frame A
    let mut temp_polygon_b = TempPolygon {
        vertices: [Vector2::zero(); MAX_POLYGON_VERTICES],
        normals: [Vector2::zero(); MAX_POLYGON_VERTICES],
        count: polygon_b.count(),
    };
    for (i, (vertex, normal)) in polygon_b.vertices().iter().zip(polygon_b.normals()).enumerate() {
        temp_polygon_b.vertices[i] = xf.transform_point(*vertex);
        temp_polygon_b.normals[i] = xf.transform_direction(*normal);
    }

    let radius = polygon_b.radius() + edge_a.radius;

    let edge_axis = compute_edge_separation(&temp_polygon_b, v1, normal1);
    if edge_axis.separation > radius {
        return;
    }

    let polygon_axis = compute_polygon_separation(&temp_polygon_b, v1, v2);
    if polygon_axis.separation > radius {
        return;
    }

    // Use hysteresis for jitter reduction
    const K_RELATIVE_TOL: f32 = 0.98;
    const K_ABSOLUTE_TOL: f32 = 0.001;

    let mut primary_axis = if polygon_axis.separation - radius
        > K_RELATIVE_TOL * (edge_axis.separation - radius) + K_ABSOLUTE_TOL
    {
        polygon_axis
    } else {
        edge_axis
    };

    if one_sided {
        // Smooth collision
        let edge0 = (v1 - edge_a.vertex0).normalize();
        let normal0 = Vector2::new(edge0.y, -edge0.x);
        let convex1 = edge0.cross(&edge1) >= 0.0;

        let edge2 = (edge_a.vertex3 - v2).normalize();
        let normal2 = Vector2::new(edge2.y, -edge2.x);
        let convex2 = edge1.cross(&edge2) >= 0.0;

        const SIN_TOL: f32 = 0.1;
        let side1 = primary_axis.normal.dot(&edge1) <= 0.0;

        // Check Gauss Map
        if side1 {
            if convex1 {
                if primary_axis.normal.cross(&normal0) > SIN_TOL {
                    // Skip region
                    return;
                }
            } else {
                // Snap region
                primary_axis = edge_axis;
            }
        } else if convex2 {
            if normal2.cross(&primary_axis.normal) > SIN_TOL {
                // Skip region
                return;
            }
        } else {
            // Snap region
            primary_axis = edge_axis;
        }
    }

    let clip_points: [ClipVertex; 2];
    let mut reference: ReferenceFace;

    if primary_axis.axis_type == AxisType::EdgeA {
        manifold.manifold_type = ManifoldType::FaceA;

        // Search for the polygon normal that is most anti-parallel to the edge normal
        let mut best_index = 0;
        let mut best_value = primary_axis.normal.dot(&temp_polygon_b.normals[0]);
        for i in 1..temp_polygon_b.count {
            let value = primary_axis.normal.dot(&temp_polygon_b.normals[i]);
            if value < best_value {
                best_value = value;
                best_index = i;
            }
        }

        let i1 = best_index;
        let i2 = if i1 + 1 < temp_polygon_b.count { i1 + 1 } else { 0 };

        clip_points = [
            ClipVertex {
                v: temp_polygon_b.vertices[i1],
                id: ContactId::new(0, i1 as u8, FeatureType::Face, FeatureType::Vertex),
            },
            ClipVertex {
                v: temp_polygon_b.vertices[i2],
                id: ContactId::new(0, i2 as u8, FeatureType::Face, FeatureType::Vertex),
            },
        ];

        reference = ReferenceFace {
            i1: 0,
            i2: 1,
            v1,
            v2,
            normal: primary_axis.normal,
            side_normal1: -edge1,
            side_offset1: 0.0,
            side_normal2: edge1,
            side_offset2: 0.0,
        };
    } else {
        manifold.manifold_type = ManifoldType::FaceB;

        let index = primary_axis.index as u8;
        clip_points = [
            ClipVertex {
                v: v2,
                id: ContactId::new(1, index, FeatureType::Vertex, FeatureType::Face),
            },
            ClipVertex {
                v: v1,
                id: ContactId::new(0, index, FeatureType::Vertex, FeatureType::Face),
            },
        ];

        let i1 = primary_axis.index;
        let i2 = if i1 + 1 < temp_polygon_b.count { i1 + 1 } else { 0 };
        let normal = temp_polygon_b.normals[i1];

        // CCW winding
        let side_normal1 = Vector2::new(normal.y, -normal.x);

        reference = ReferenceFace {
            i1,
            i2,
            v1: temp_polygon_b.vertices[i1],
            v2: temp_polygon_b.vertices[i2],
            normal,
            side_normal1,
            side_offset1: 0.0,
            side_normal2: -side_normal1,
            side_offset2: 0.0,
        };
    }

    reference.side_offset1 = reference.side_normal1.dot(&reference.v1);
    reference.side_offset2 = reference.side_normal2.dot(&reference.v2);

    // Clip incident edge against reference face side planes
    let (clip_points1, np) = clip_segment_to_line(
        &clip_points,
        reference.side_normal1,
        reference.side_offset1,
        reference.i1 as u8,
    );
    if np < 2 {
        return;
    }

    let (clip_points2, np) = clip_segment_to_line(
        &clip_points1,
        reference.side_normal2,
        reference.side_offset2,
        reference.i2 as u8,
    );
    if np < 2 {
        return;
    }

    if primary_axis.axis_type == AxisType::EdgeA {
        manifold.local_normal = reference.normal;
        manifold.local_point = reference.v1;
    } else {
        manifold.local_normal = polygon_b.normals()[reference.i1];
        manifold.local_point = polygon_b.vertices()[reference.i1];
    }

    let mut point_count = 0;
    for clip in &clip_points2 {
        let separation = reference.normal.dot(&(clip.v - reference.v1));

        if separation <= radius {
            let cp = &mut manifold.points[point_count];

            if primary_axis.axis_type == AxisType::EdgeA {
                cp.local_point = xf.inverse_transform_point(clip.v);
                cp.id = clip.id;
            } else {
                cp.local_point = clip.v;
                cp.id.feature = clip.id.feature.swapped();
            }

            point_count += 1;
        }
    }

    manifold.point_count = point_count;
}
