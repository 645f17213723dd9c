use std::fmt;

use crate::contacts::{Contact, ContactKind, FixtureRef};
use crate::core::{BodyStorage, FixtureStorage};
use crate::shapes::ShapeType;
use crate::Result;

/// Builds a contact from two fixtures ordered the way the kind expects
pub type ContactCreateFn = for<'a, 'b> fn(FixtureRef<'a>, FixtureRef<'b>) -> Contact;

/// Releases a contact
pub type ContactDestroyFn = fn(Contact);

/// A cell of the dispatch table
#[derive(Clone, Copy)]
pub struct ContactRegistration {
    pub create: ContactCreateFn,
    pub destroy: ContactDestroyFn,

    /// False for the mirrored cell of a pair, whose factory expects the
    /// fixtures in the opposite order
    pub primary: bool,
}

impl fmt::Debug for ContactRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContactRegistration")
            .field("primary", &self.primary)
            .finish_non_exhaustive()
    }
}

/// Double dispatch over shape type pairs.
///
/// Each supported unordered pair is registered once and mirrored, so every
/// ordered pair of shape types resolves to the same factory.
#[derive(Clone)]
pub struct ContactRegistry {
    table: [[Option<ContactRegistration>; ShapeType::COUNT]; ShapeType::COUNT],
    initialized: bool,
}

impl ContactRegistry {
    /// Creates an empty registry. Call [`ContactRegistry::initialize`] before use.
    pub fn new() -> Self {
        Self {
            table: [[None; ShapeType::COUNT]; ShapeType::COUNT],
            initialized: false,
        }
    }

    /// Creates a registry populated with every supported shape pair
    pub fn with_default_types() -> Self {
        let mut registry = Self::new();
        registry.initialize();
        registry
    }

    /// Registers the supported shape pairs. Calling it again has no effect.
    pub fn initialize(&mut self) {
        if self.initialized {
            return;
        }

        self.add_type(ContactKind::create_circle_contact, ContactKind::destroy, ShapeType::Circle, ShapeType::Circle);
        self.add_type(ContactKind::create_polygon_circle_contact, ContactKind::destroy, ShapeType::Polygon, ShapeType::Circle);
        self.add_type(ContactKind::create_polygon_contact, ContactKind::destroy, ShapeType::Polygon, ShapeType::Polygon);
        self.add_type(ContactKind::create_edge_circle_contact, ContactKind::destroy, ShapeType::Edge, ShapeType::Circle);
        self.add_type(ContactKind::create_edge_polygon_contact, ContactKind::destroy, ShapeType::Edge, ShapeType::Polygon);
        self.add_type(ContactKind::create_chain_circle_contact, ContactKind::destroy, ShapeType::Chain, ShapeType::Circle);
        self.add_type(ContactKind::create_chain_polygon_contact, ContactKind::destroy, ShapeType::Chain, ShapeType::Polygon);

        self.initialized = true;

        log::debug!(
            "contact registry initialized with {} ordered shape pairs",
            self.table.iter().flatten().filter(|cell| cell.is_some()).count()
        );
    }

    /// Returns whether the supported pairs have been registered
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Registers `create`/`destroy` for `(type1, type2)` and mirrors the entry
    /// for `(type2, type1)`
    pub fn add_type(
        &mut self,
        create: ContactCreateFn,
        destroy: ContactDestroyFn,
        type1: ShapeType,
        type2: ShapeType,
    ) {
        self.table[type1.index()][type2.index()] = Some(ContactRegistration {
            create,
            destroy,
            primary: true,
        });

        if type1 != type2 {
            self.table[type2.index()][type1.index()] = Some(ContactRegistration {
                create,
                destroy,
                primary: false,
            });
        }
    }

    /// Looks up the registration of an ordered shape pair
    pub fn registration(&self, type_a: ShapeType, type_b: ShapeType) -> Option<&ContactRegistration> {
        self.table[type_a.index()][type_b.index()].as_ref()
    }

    /// Creates a contact for two fixtures, or `None` when the pair is not supported.
    ///
    /// For mirrored pairs the fixtures are swapped so the factory receives them
    /// in the order it expects; the returned contact then has `fixture_b` as
    /// its A side.
    pub fn create(&self, fixture_a: FixtureRef<'_>, fixture_b: FixtureRef<'_>) -> Option<Contact> {
        assert!(self.initialized, "contact registry used before initialization");

        let type_a = fixture_a.fixture.shape_type();
        let type_b = fixture_b.fixture.shape_type();

        let registration = self.registration(type_a, type_b)?;
        let contact = if registration.primary {
            (registration.create)(fixture_a, fixture_b)
        } else {
            (registration.create)(fixture_b, fixture_a)
        };

        log::trace!(
            "created {:?} contact between {:?} and {:?}",
            contact.kind(),
            contact.fixture_a(),
            contact.fixture_b()
        );

        Some(contact)
    }

    /// Destroys a contact.
    ///
    /// A solid contact that still holds manifold points wakes both bodies,
    /// since losing it may release them from equilibrium.
    pub fn destroy(&self, contact: Contact, fixtures: &FixtureStorage, bodies: &mut BodyStorage) -> Result<()> {
        assert!(self.initialized, "contact registry used before initialization");

        let fixture_a = fixtures.try_get(contact.fixture_a())?;
        let fixture_b = fixtures.try_get(contact.fixture_b())?;

        if contact.manifold().point_count > 0 && !fixture_a.is_sensor() && !fixture_b.is_sensor() {
            bodies.try_get_mut(fixture_a.body())?.set_awake(true);
            bodies.try_get_mut(fixture_b.body())?.set_awake(true);
        }

        let type_a = fixture_a.shape_type();
        let type_b = fixture_b.shape_type();

        let registration = match self.registration(type_a, type_b) {
            Some(registration) => registration,
            None => panic!("no contact registration for {:?} and {:?}", type_a, type_b),
        };
        (registration.destroy)(contact);

        Ok(())
    }
}

impl Default for ContactRegistry {
    fn default() -> Self {
        Self::with_default_types()
    }
}

impl fmt::Debug for ContactRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContactRegistry")
            .field("initialized", &self.initialized)
            .finish_non_exhaustive()
    }
}
