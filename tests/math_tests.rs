use phys_contact::math::{Vector2, Aabb, Transform, Rotation};
use std::f32::consts::PI;
use approx::assert_relative_eq;

#[test]
fn test_vector2_operations() {
    let v1 = Vector2::new(1.0, 2.0);
    let v2 = Vector2::new(4.0, 5.0);

    // Addition
    let sum = v1 + v2;
    assert_eq!(sum.x, 5.0);
    assert_eq!(sum.y, 7.0);

    // Subtraction
    let diff = v2 - v1;
    assert_eq!(diff.x, 3.0);
    assert_eq!(diff.y, 3.0);

    // Scalar multiplication, both sides
    assert_eq!(v1 * 2.0, Vector2::new(2.0, 4.0));
    assert_eq!(2.0 * v1, Vector2::new(2.0, 4.0));

    // Dot product
    assert_eq!(v1.dot(&v2), 1.0 * 4.0 + 2.0 * 5.0);

    // Cross product
    assert_eq!(v1.cross(&v2), 1.0 * 5.0 - 2.0 * 4.0);

    // Length
    let length = v1.length();
    assert_relative_eq!(length, 5.0f32.sqrt());

    // Normalize
    let normalized = v1.normalize();
    assert_relative_eq!(normalized.length(), 1.0);
    assert_relative_eq!(normalized.x, v1.x / length);
    assert_relative_eq!(normalized.y, v1.y / length);
}

#[test]
fn test_scalar_cross_products() {
    let v = Vector2::new(1.0, 0.0);

    // v x 1 turns clockwise, 1 x v turns counter-clockwise
    assert_eq!(v.cross_scalar(1.0), Vector2::new(0.0, -1.0));
    assert_eq!(Vector2::scalar_cross(1.0, v), Vector2::new(0.0, 1.0));

    // Zero vectors normalize to zero instead of NaN
    let mut zero = Vector2::zero();
    assert_eq!(zero.normalize_mut(), 0.0);
    assert!(zero.is_valid());
}

#[test]
fn test_rotation() {
    let r = Rotation::from_angle(PI / 2.0);
    let rotated = r.rotate_vector(Vector2::new(1.0, 0.0));
    assert_relative_eq!(rotated.x, 0.0, epsilon = 1e-6);
    assert_relative_eq!(rotated.y, 1.0, epsilon = 1e-6);

    let back = r.inverse_rotate_vector(rotated);
    assert_relative_eq!(back, Vector2::new(1.0, 0.0), epsilon = 1e-6);

    assert_relative_eq!(r.angle(), PI / 2.0, epsilon = 1e-6);
}

#[test]
fn test_transform_round_trip_and_relative() {
    let xf_a = Transform::from_position_angle(Vector2::new(1.0, 2.0), 0.3);
    let xf_b = Transform::from_position_angle(Vector2::new(-3.0, 0.5), -1.1);

    let p = Vector2::new(0.7, -0.2);
    let world = xf_a.transform_point(p);
    assert_relative_eq!(xf_a.inverse_transform_point(world), p, epsilon = 1e-5);

    // mul_transpose expresses B in A's frame
    let relative = xf_a.mul_transpose(&xf_b);
    let expected = xf_a.inverse_transform_point(xf_b.transform_point(p));
    assert_relative_eq!(relative.transform_point(p), expected, epsilon = 1e-5);

    // Combining back gives B
    let combined = xf_a.combine(&relative);
    assert_relative_eq!(combined.transform_point(p), xf_b.transform_point(p), epsilon = 1e-5);
}

#[test]
fn test_aabb_operations() {
    let a = Aabb::new(Vector2::new(0.0, 0.0), Vector2::new(2.0, 1.0));
    let b = Aabb::new(Vector2::new(1.5, 0.5), Vector2::new(3.0, 3.0));
    let c = Aabb::new(Vector2::new(2.5, 0.0), Vector2::new(3.0, 0.4));

    assert!(a.intersects(&b));
    assert!(!a.intersects(&c));

    // Fattening can make disjoint boxes overlap
    assert!(a.expand(0.3).intersects(&c.expand(0.3)));

    let union = a.union(&b);
    assert_eq!(union.min, Vector2::new(0.0, 0.0));
    assert_eq!(union.max, Vector2::new(3.0, 3.0));
    assert_relative_eq!(a.perimeter(), 6.0);
    assert!(a.contains_point(Vector2::new(1.0, 0.5)));

    let from_points = Aabb::from_points(&[Vector2::new(1.0, -1.0), Vector2::new(-2.0, 4.0)]);
    assert_eq!(
        from_points,
        Some(Aabb::new(Vector2::new(-2.0, -1.0), Vector2::new(1.0, 4.0)))
    );
    assert_eq!(Aabb::from_points(&[]), None);
}

#[test]
fn test_nalgebra_interop() {
    let xf = Transform::from_position_angle(Vector2::new(2.0, -1.0), 0.4);
    let isometry = xf.to_nalgebra();

    let p = Vector2::new(0.5, 1.5);
    let expected = xf.transform_point(p);
    let transformed = isometry.transform_point(&nalgebra::Point2::new(p.x, p.y));
    assert_relative_eq!(transformed.x, expected.x, epsilon = 1e-5);
    assert_relative_eq!(transformed.y, expected.y, epsilon = 1e-5);

    let back = Transform::from_nalgebra(&isometry);
    assert_relative_eq!(back.transform_point(p), expected, epsilon = 1e-5);

    let v: Vector2 = nalgebra::Vector2::new(3.0, 4.0).into();
    assert_eq!(v, Vector2::new(3.0, 4.0));
}
