use crate::collision::manifold::{clip_segment_to_line, ClipVertex, ContactId, FeatureType, Manifold, ManifoldType};
use crate::core::settings::LINEAR_SLOP;
use crate::math::Transform;
use crate::shapes::PolygonShape;

/// Finds the edge normal of `poly1` with the largest separation from `poly2`
fn find_max_separation(
    poly1: &PolygonShape,
    xf1: &Transform,
    poly2: &PolygonShape,
    xf2: &Transform,
) -> (f32, usize) {
    let xf = xf2.mul_transpose(xf1);

    let mut best_index = 0;
    let mut max_separation = -f32::MAX;

    for (i, (n1, v1)) in poly1.normals().iter().zip(poly1.vertices()).enumerate() {
        // poly1 normal and vertex in the frame of poly2
        let n = xf.transform_direction(*n1);
        let v1 = xf.transform_point(*v1);

        let si = poly2
            .vertices()
            .iter()
            .map(|v2| n.dot(&(*v2 - v1)))
            .fold(f32::MAX, f32::min);

        if si > max_separation {
            max_separation = si;
            best_index = i;
        }
    }

    (max_separation, best_index)
}

/// Finds the edge of `poly2` most anti-parallel to the reference edge of `poly1`
fn find_incident_edge(
    poly1: &PolygonShape,
    xf1: &Transform,
    edge1: usize,
    poly2: &PolygonShape,
    xf2: &Transform,
) -> [ClipVertex; 2] {
    // Reference edge normal in the frame of poly2
    let normal1 = xf2
        .rotation
        .inverse_rotate_vector(xf1.rotation.rotate_vector(poly1.normals()[edge1]));

    let mut index = 0;
    let mut min_dot = f32::MAX;
    for (i, n2) in poly2.normals().iter().enumerate() {
        let dot = normal1.dot(n2);
        if dot < min_dot {
            min_dot = dot;
            index = i;
        }
    }

    let count2 = poly2.count();
    let i1 = index;
    let i2 = if i1 + 1 < count2 { i1 + 1 } else { 0 };

    [
        ClipVertex {
            v: xf2.transform_point(poly2.vertices()[i1]),
            id: ContactId::new(edge1 as u8, i1 as u8, FeatureType::Face, FeatureType::Vertex),
        },
        ClipVertex {
            v: xf2.transform_point(poly2.vertices()[i2]),
            id: ContactId::new(edge1 as u8, i2 as u8, FeatureType::Face, FeatureType::Vertex),
        },
    ]
}

/// Computes the manifold between two convex polygons.
///
/// The reference face is the face of maximum separation; polygon B's face is
/// preferred only when it is clearly better, which keeps the reference stable
/// between frames. The incident edge is clipped against the reference face's
/// side planes and points beyond the combined skin radius are discarded.
pub fn collide_polygons(
    manifold: &mut Manifold,
    poly_a: &PolygonShape,
    xf_a: &Transform,
    poly_b: &PolygonShape,
    xf_b: &Transform,
) {
    manifold.point_count = 0;
    let total_radius = poly_a.radius() + poly_b.radius();

    let (separation_a, edge_a) = find_max_separation(poly_a, xf_a, poly_b, xf_b);
    if separation_a > total_radius {
        return;
    }

    let (separation_b, edge_b) = find_max_separation(poly_b, xf_b, poly_a, xf_a);
    if separation_b > total_radius {
        return;
    }

    const K_TOL: f32 = 0.1 * LINEAR_SLOP;

    let (poly1, poly2, xf1, xf2, edge1, flip) = if separation_b > separation_a + K_TOL {
        manifold.manifold_type = ManifoldType::FaceB;
        (poly_b, poly_a, xf_b, xf_a, edge_b, true)
    } else {
        manifold.manifold_type = ManifoldType::FaceA;
        (poly_a, poly_b, xf_a, xf_b, edge_a, false)
    };

    let incident_edge = find_incident_edge(poly1, xf1, edge1, poly2, xf2);

    let count1 = poly1.count();
    let vertices1 = poly1.vertices();

    let iv1 = edge1;
    let iv2 = if edge1 + 1 < count1 { edge1 + 1 } else { 0 };

    let mut v11 = vertices1[iv1];
    let mut v12 = vertices1[iv2];

    let local_tangent = (v12 - v11).normalize();
    let local_normal = local_tangent.cross_scalar(1.0);
    let plane_point = 0.5 * (v11 + v12);

    let tangent = xf1.transform_direction(local_tangent);
    let normal = tangent.cross_scalar(1.0);

    v11 = xf1.transform_point(v11);
    v12 = xf1.transform_point(v12);

    // Face offset
    let front_offset = normal.dot(&v11);

    // Side offsets, extended by the polygon skin thickness
    let side_offset1 = -tangent.dot(&v11) + total_radius;
    let side_offset2 = tangent.dot(&v12) + total_radius;

    let (clip_points1, np) = clip_segment_to_line(&incident_edge, -tangent, side_offset1, iv1 as u8);
    if np < 2 {
        return;
    }

    let (clip_points2, np) = clip_segment_to_line(&clip_points1, tangent, side_offset2, iv2 as u8);
    if np < 2 {
        return;
    }

    manifold.local_normal = local_normal;
    manifold.local_point = plane_point;

    let mut point_count = 0;
    for clip in &clip_points2 {
        let separation = normal.dot(&clip.v) - front_offset;

        if separation <= total_radius {
            let cp = &mut manifold.points[point_count];
            cp.local_point = xf2.inverse_transform_point(clip.v);
            cp.id = clip.id;
            if flip {
                cp.id.feature = cp.id.feature.swapped();
            }
            point_count += 1;
        }
    }

    manifold.point_count = point_count;
}
