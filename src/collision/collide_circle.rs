use crate::collision::manifold::{ContactId, Manifold, ManifoldType};
use crate::core::settings::EPSILON;
use crate::math::{Transform, Vector2};
use crate::shapes::{CircleShape, PolygonShape};

/// Computes the manifold between two circles
pub fn collide_circles(
    manifold: &mut Manifold,
    circle_a: &CircleShape,
    xf_a: &Transform,
    circle_b: &CircleShape,
    xf_b: &Transform,
) {
    manifold.point_count = 0;

    let p_a = xf_a.transform_point(circle_a.position);
    let p_b = xf_b.transform_point(circle_b.position);

    let radius = circle_a.radius + circle_b.radius;
    if p_a.distance_squared(&p_b) > radius * radius {
        return;
    }

    manifold.manifold_type = ManifoldType::Circles;
    manifold.local_point = circle_a.position;
    manifold.local_normal = Vector2::zero();
    manifold.point_count = 1;

    manifold.points[0].local_point = circle_b.position;
    manifold.points[0].id = ContactId::default();
}

/// Computes the manifold between a polygon and a circle
pub fn collide_polygon_and_circle(
    manifold: &mut Manifold,
    polygon_a: &PolygonShape,
    xf_a: &Transform,
    circle_b: &CircleShape,
    xf_b: &Transform,
) {
    manifold.point_count = 0;

    // Circle center in the polygon frame
    let c = xf_b.transform_point(circle_b.position);
    let c_local = xf_a.inverse_transform_point(c);

    let radius = polygon_a.radius() + circle_b.radius;
    let vertices = polygon_a.vertices();
    let normals = polygon_a.normals();
    let count = polygon_a.count();

    // Find the min separating edge
    let mut normal_index = 0;
    let mut separation = -f32::MAX;
    for i in 0..count {
        let s = normals[i].dot(&(c_local - vertices[i]));
        if s > radius {
            // Early out
            return;
        }

        if s > separation {
            separation = s;
            normal_index = i;
        }
    }

    let vert_index1 = normal_index;
    let vert_index2 = if vert_index1 + 1 < count { vert_index1 + 1 } else { 0 };
    let v1 = vertices[vert_index1];
    let v2 = vertices[vert_index2];

    // Center inside the polygon
    if separation < EPSILON {
        set_single_point(
            manifold,
            normals[normal_index],
            0.5 * (v1 + v2),
            circle_b.position,
        );
        return;
    }

    // Voronoi regions of the reference face
    let u1 = (c_local - v1).dot(&(v2 - v1));
    let u2 = (c_local - v2).dot(&(v1 - v2));

    if u1 <= 0.0 {
        if c_local.distance_squared(&v1) > radius * radius {
            return;
        }
        set_single_point(manifold, (c_local - v1).normalize(), v1, circle_b.position);
    } else if u2 <= 0.0 {
        if c_local.distance_squared(&v2) > radius * radius {
            return;
        }
        set_single_point(manifold, (c_local - v2).normalize(), v2, circle_b.position);
    } else {
        let face_center = 0.5 * (v1 + v2);
        let s = (c_local - face_center).dot(&normals[vert_index1]);
        if s > radius {
            return;
        }
        set_single_point(manifold, normals[vert_index1], face_center, circle_b.position);
    }
}

fn set_single_point(manifold: &mut Manifold, local_normal: Vector2, local_point: Vector2, circle_center: Vector2) {
    manifold.point_count = 1;
    manifold.manifold_type = ManifoldType::FaceA;
    manifold.local_normal = local_normal;
    manifold.local_point = local_point;
    manifold.points[0].local_point = circle_center;
    manifold.points[0].id = ContactId::default();
}
