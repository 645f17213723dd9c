use crate::core::settings::EPSILON;
use crate::math::{Transform, Vector2};
use crate::shapes::Shape;

/// Maximum number of GJK iterations
const MAX_ITERATIONS: usize = 20;

/// A convex vertex cloud with a radius, as seen by the distance routine
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceProxy {
    vertices: Vec<Vector2>,
    radius: f32,
}

impl DistanceProxy {
    /// Builds a proxy for one child primitive of a shape
    pub fn new(shape: &Shape, index: usize) -> Self {
        match shape {
            Shape::Circle(circle) => Self {
                vertices: vec![circle.position],
                radius: circle.radius,
            },
            Shape::Polygon(polygon) => Self {
                vertices: polygon.vertices().to_vec(),
                radius: polygon.radius(),
            },
            Shape::Edge(edge) => Self {
                vertices: vec![edge.vertex1, edge.vertex2],
                radius: edge.radius,
            },
            Shape::Chain(chain) => {
                let edge = chain.child_edge(index);
                Self {
                    vertices: vec![edge.vertex1, edge.vertex2],
                    radius: chain.radius,
                }
            }
        }
    }

    /// Returns the index of the vertex furthest along `direction`
    pub fn support(&self, direction: Vector2) -> usize {
        let mut best_index = 0;
        let mut best_value = self.vertices[0].dot(&direction);
        for (i, vertex) in self.vertices.iter().enumerate().skip(1) {
            let value = vertex.dot(&direction);
            if value > best_value {
                best_index = i;
                best_value = value;
            }
        }

        best_index
    }

    pub fn vertex(&self, index: usize) -> Vector2 {
        self.vertices[index]
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

/// Input of [`distance`]
#[derive(Debug, Clone)]
pub struct DistanceInput {
    pub proxy_a: DistanceProxy,
    pub proxy_b: DistanceProxy,
    pub transform_a: Transform,
    pub transform_b: Transform,

    /// Whether the proxy radii are subtracted from the core distance
    pub use_radii: bool,
}

/// Output of [`distance`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceOutput {
    /// Closest point on shape A
    pub point_a: Vector2,

    /// Closest point on shape B
    pub point_b: Vector2,

    pub distance: f32,

    /// Number of GJK iterations used
    pub iterations: usize,
}

#[derive(Debug, Clone, Copy, Default)]
struct SimplexVertex {
    /// Support point in proxy A
    w_a: Vector2,
    /// Support point in proxy B
    w_b: Vector2,
    /// `w_b - w_a`
    w: Vector2,
    /// Barycentric coordinate for the closest point
    a: f32,
    index_a: usize,
    index_b: usize,
}

impl SimplexVertex {
    fn new(input: &DistanceInput, index_a: usize, index_b: usize) -> Self {
        let w_a = input.transform_a.transform_point(input.proxy_a.vertex(index_a));
        let w_b = input.transform_b.transform_point(input.proxy_b.vertex(index_b));
        Self {
            w_a,
            w_b,
            w: w_b - w_a,
            a: 1.0,
            index_a,
            index_b,
        }
    }
}

/// A point, segment or triangle on the Minkowski difference `B - A`
#[derive(Debug, Clone, Default)]
struct Simplex {
    v: [SimplexVertex; 3],
    count: usize,
}

impl Simplex {
    fn search_direction(&self) -> Vector2 {
        match self.count {
            1 => -self.v[0].w,
            2 => {
                let e12 = self.v[1].w - self.v[0].w;
                let sgn = e12.cross(&(-self.v[0].w));
                if sgn > 0.0 {
                    // Origin is left of e12
                    Vector2::scalar_cross(1.0, e12)
                } else {
                    // Origin is right of e12
                    e12.cross_scalar(1.0)
                }
            }
            _ => Vector2::zero(),
        }
    }

    fn witness_points(&self) -> (Vector2, Vector2) {
        match self.count {
            1 => (self.v[0].w_a, self.v[0].w_b),
            2 => (
                self.v[0].a * self.v[0].w_a + self.v[1].a * self.v[1].w_a,
                self.v[0].a * self.v[0].w_b + self.v[1].a * self.v[1].w_b,
            ),
            3 => {
                let p = self.v[0].a * self.v[0].w_a
                    + self.v[1].a * self.v[1].w_a
                    + self.v[2].a * self.v[2].w_a;
                (p, p)
            }
            _ => (Vector2::zero(), Vector2::zero()),
        }
    }

    /// Closest point on a segment to the origin, in barycentric coordinates
    fn solve2(&mut self) {
        let w1 = self.v[0].w;
        let w2 = self.v[1].w;
        let e12 = w2 - w1;

        // w1 region
        let d12_2 = -w1.dot(&e12);
        if d12_2 <= 0.0 {
            self.v[0].a = 1.0;
            self.count = 1;
            return;
        }

        // w2 region
        let d12_1 = w2.dot(&e12);
        if d12_1 <= 0.0 {
            self.v[1].a = 1.0;
            self.count = 1;
            self.v[0] = self.v[1];
            return;
        }

        // Must be in e12 region
        let inv_d12 = 1.0 / (d12_1 + d12_2);
        self.v[0].a = d12_1 * inv_d12;
        self.v[1].a = d12_2 * inv_d12;
        self.count = 2;
    }

    /// Closest point on a triangle to the origin, by Voronoi region tests
    fn solve3(&mut self) {
        let w1 = self.v[0].w;
        let w2 = self.v[1].w;
        let w3 = self.v[2].w;

        let e12 = w2 - w1;
        let d12_1 = w2.dot(&e12);
        let d12_2 = -w1.dot(&e12);

        let e13 = w3 - w1;
        let d13_1 = w3.dot(&e13);
        let d13_2 = -w1.dot(&e13);

        let e23 = w3 - w2;
        let d23_1 = w3.dot(&e23);
        let d23_2 = -w2.dot(&e23);

        // Triangle123
        let n123 = e12.cross(&e13);
        let d123_1 = n123 * w2.cross(&w3);
        let d123_2 = n123 * w3.cross(&w1);
        let d123_3 = n123 * w1.cross(&w2);

        // w1 region
        if d12_2 <= 0.0 && d13_2 <= 0.0 {
            self.v[0].a = 1.0;
            self.count = 1;
            return;
        }

        // e12
        if d12_1 > 0.0 && d12_2 > 0.0 && d123_3 <= 0.0 {
            let inv_d12 = 1.0 / (d12_1 + d12_2);
            self.v[0].a = d12_1 * inv_d12;
            self.v[1].a = d12_2 * inv_d12;
            self.count = 2;
            return;
        }

        // e13
        if d13_1 > 0.0 && d13_2 > 0.0 && d123_2 <= 0.0 {
            let inv_d13 = 1.0 / (d13_1 + d13_2);
            self.v[0].a = d13_1 * inv_d13;
            self.v[2].a = d13_2 * inv_d13;
            self.count = 2;
            self.v[1] = self.v[2];
            return;
        }

        // w2 region
        if d12_1 <= 0.0 && d23_2 <= 0.0 {
            self.v[1].a = 1.0;
            self.count = 1;
            self.v[0] = self.v[1];
            return;
        }

        // w3 region
        if d13_1 <= 0.0 && d23_1 <= 0.0 {
            self.v[2].a = 1.0;
            self.count = 1;
            self.v[0] = self.v[2];
            return;
        }

        // e23
        if d23_1 > 0.0 && d23_2 > 0.0 && d123_1 <= 0.0 {
            let inv_d23 = 1.0 / (d23_1 + d23_2);
            self.v[1].a = d23_1 * inv_d23;
            self.v[2].a = d23_2 * inv_d23;
            self.count = 2;
            self.v[0] = self.v[2];
            return;
        }

        // Must be in triangle123
        let inv_d123 = 1.0 / (d123_1 + d123_2 + d123_3);
        self.v[0].a = d123_1 * inv_d123;
        self.v[1].a = d123_2 * inv_d123;
        self.v[2].a = d123_3 * inv_d123;
        self.count = 3;
    }
}

/// Computes the closest points between two convex proxies with GJK
pub fn distance(input: &DistanceInput) -> DistanceOutput {
    let mut simplex = Simplex {
        v: [SimplexVertex::new(input, 0, 0), SimplexVertex::default(), SimplexVertex::default()],
        count: 1,
    };

    // Support indices of the previous simplex, for duplicate detection
    let mut save_a = [0usize; 3];
    let mut save_b = [0usize; 3];

    let mut iterations = 0;
    while iterations < MAX_ITERATIONS {
        let save_count = simplex.count;
        for i in 0..save_count {
            save_a[i] = simplex.v[i].index_a;
            save_b[i] = simplex.v[i].index_b;
        }

        match simplex.count {
            2 => simplex.solve2(),
            3 => simplex.solve3(),
            _ => {}
        }

        // The origin is inside the triangle
        if simplex.count == 3 {
            break;
        }

        let d = simplex.search_direction();

        // The origin is probably contained by a segment or triangle
        if d.length_squared() < EPSILON * EPSILON {
            break;
        }

        let index_a = input
            .proxy_a
            .support(input.transform_a.rotation.inverse_rotate_vector(-d));
        let index_b = input
            .proxy_b
            .support(input.transform_b.rotation.inverse_rotate_vector(d));

        iterations += 1;

        // Stop on a repeated support point, the main termination criterion
        let duplicate = (0..save_count).any(|i| save_a[i] == index_a && save_b[i] == index_b);
        if duplicate {
            break;
        }

        simplex.v[simplex.count] = SimplexVertex::new(input, index_a, index_b);
        simplex.count += 1;
    }

    let (mut point_a, mut point_b) = simplex.witness_points();
    let mut dist = point_a.distance(&point_b);

    if input.use_radii {
        if dist < EPSILON {
            // Shapes are too close to safely compute a normal
            let p = 0.5 * (point_a + point_b);
            point_a = p;
            point_b = p;
            dist = 0.0;
        } else {
            let r_a = input.proxy_a.radius();
            let r_b = input.proxy_b.radius();
            let normal = (point_b - point_a).normalize();
            dist = (dist - r_a - r_b).max(0.0);
            point_a += r_a * normal;
            point_b -= r_b * normal;
        }
    }

    DistanceOutput {
        point_a,
        point_b,
        distance: dist,
        iterations,
    }
}

/// Tests whether two child primitives overlap, including their radii
pub fn test_overlap(
    shape_a: &Shape,
    index_a: usize,
    shape_b: &Shape,
    index_b: usize,
    xf_a: &Transform,
    xf_b: &Transform,
) -> bool {
    let input = DistanceInput {
        proxy_a: DistanceProxy::new(shape_a, index_a),
        proxy_b: DistanceProxy::new(shape_b, index_b),
        transform_a: *xf_a,
        transform_b: *xf_b,
        use_radii: true,
    };

    distance(&input).distance < 10.0 * EPSILON
}
