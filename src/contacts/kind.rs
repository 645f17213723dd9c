use crate::collision::{
    collide_circles, collide_edge_and_circle, collide_edge_and_polygon, collide_polygon_and_circle,
    collide_polygons, Manifold,
};
use crate::contacts::{Contact, FixtureRef};
use crate::math::Transform;
use crate::shapes::{Shape, ShapeType};

/// The supported shape pairs.
///
/// Each kind binds an ordered pair of shape types to the narrow-phase routine
/// that handles it. Chain kinds collide one child edge of the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactKind {
    CircleCircle,
    PolygonCircle,
    PolygonPolygon,
    EdgeCircle,
    EdgePolygon,
    ChainCircle,
    ChainPolygon,
}

impl ContactKind {
    /// Every contact kind
    pub const ALL: [ContactKind; 7] = [
        ContactKind::CircleCircle,
        ContactKind::PolygonCircle,
        ContactKind::PolygonPolygon,
        ContactKind::EdgeCircle,
        ContactKind::EdgePolygon,
        ContactKind::ChainCircle,
        ContactKind::ChainPolygon,
    ];

    /// Returns the shape types this kind expects, in argument order
    pub fn shape_types(self) -> (ShapeType, ShapeType) {
        match self {
            ContactKind::CircleCircle => (ShapeType::Circle, ShapeType::Circle),
            ContactKind::PolygonCircle => (ShapeType::Polygon, ShapeType::Circle),
            ContactKind::PolygonPolygon => (ShapeType::Polygon, ShapeType::Polygon),
            ContactKind::EdgeCircle => (ShapeType::Edge, ShapeType::Circle),
            ContactKind::EdgePolygon => (ShapeType::Edge, ShapeType::Polygon),
            ContactKind::ChainCircle => (ShapeType::Chain, ShapeType::Circle),
            ContactKind::ChainPolygon => (ShapeType::Chain, ShapeType::Polygon),
        }
    }

    pub fn create_circle_contact(fixture_a: FixtureRef<'_>, fixture_b: FixtureRef<'_>) -> Contact {
        Self::create(ContactKind::CircleCircle, fixture_a, fixture_b)
    }

    pub fn create_polygon_circle_contact(fixture_a: FixtureRef<'_>, fixture_b: FixtureRef<'_>) -> Contact {
        Self::create(ContactKind::PolygonCircle, fixture_a, fixture_b)
    }

    pub fn create_polygon_contact(fixture_a: FixtureRef<'_>, fixture_b: FixtureRef<'_>) -> Contact {
        Self::create(ContactKind::PolygonPolygon, fixture_a, fixture_b)
    }

    pub fn create_edge_circle_contact(fixture_a: FixtureRef<'_>, fixture_b: FixtureRef<'_>) -> Contact {
        Self::create(ContactKind::EdgeCircle, fixture_a, fixture_b)
    }

    pub fn create_edge_polygon_contact(fixture_a: FixtureRef<'_>, fixture_b: FixtureRef<'_>) -> Contact {
        Self::create(ContactKind::EdgePolygon, fixture_a, fixture_b)
    }

    pub fn create_chain_circle_contact(fixture_a: FixtureRef<'_>, fixture_b: FixtureRef<'_>) -> Contact {
        Self::create(ContactKind::ChainCircle, fixture_a, fixture_b)
    }

    pub fn create_chain_polygon_contact(fixture_a: FixtureRef<'_>, fixture_b: FixtureRef<'_>) -> Contact {
        Self::create(ContactKind::ChainPolygon, fixture_a, fixture_b)
    }

    fn create(kind: ContactKind, fixture_a: FixtureRef<'_>, fixture_b: FixtureRef<'_>) -> Contact {
        let (type_a, type_b) = kind.shape_types();
        assert_eq!(
            fixture_a.fixture.shape_type(),
            type_a,
            "{:?} contact created with a wrong first shape",
            kind
        );
        assert_eq!(
            fixture_b.fixture.shape_type(),
            type_b,
            "{:?} contact created with a wrong second shape",
            kind
        );

        Contact::new(kind, fixture_a, fixture_b)
    }

    /// Destroy hook shared by every kind. Contacts own no external resources.
    pub fn destroy(contact: Contact) {
        log::trace!(
            "destroyed {:?} contact between {:?} and {:?}",
            contact.kind(),
            contact.fixture_a(),
            contact.fixture_b()
        );
    }

    /// Runs the narrow phase for this kind.
    ///
    /// `index_a` selects the child edge of a chain. Only the geometric part of
    /// the manifold is written.
    pub fn evaluate(
        self,
        manifold: &mut Manifold,
        shape_a: &Shape,
        index_a: usize,
        xf_a: &Transform,
        shape_b: &Shape,
        xf_b: &Transform,
    ) {
        match (self, shape_a, shape_b) {
            (ContactKind::CircleCircle, Shape::Circle(a), Shape::Circle(b)) => {
                collide_circles(manifold, a, xf_a, b, xf_b)
            }
            (ContactKind::PolygonCircle, Shape::Polygon(a), Shape::Circle(b)) => {
                collide_polygon_and_circle(manifold, a, xf_a, b, xf_b)
            }
            (ContactKind::PolygonPolygon, Shape::Polygon(a), Shape::Polygon(b)) => {
                collide_polygons(manifold, a, xf_a, b, xf_b)
            }
            (ContactKind::EdgeCircle, Shape::Edge(a), Shape::Circle(b)) => {
                collide_edge_and_circle(manifold, a, xf_a, b, xf_b)
            }
            (ContactKind::EdgePolygon, Shape::Edge(a), Shape::Polygon(b)) => {
                collide_edge_and_polygon(manifold, a, xf_a, b, xf_b)
            }
            (ContactKind::ChainCircle, Shape::Chain(chain), Shape::Circle(b)) => {
                let edge = chain.child_edge(index_a);
                collide_edge_and_circle(manifold, &edge, xf_a, b, xf_b)
            }
            (ContactKind::ChainPolygon, Shape::Chain(chain), Shape::Polygon(b)) => {
                let edge = chain.child_edge(index_a);
                collide_edge_and_polygon(manifold, &edge, xf_a, b, xf_b)
            }
            (kind, a, b) => panic!(
                "{:?} contact evaluated with {:?} and {:?} shapes",
                kind,
                a.shape_type(),
                b.shape_type()
            ),
        }
    }
}
