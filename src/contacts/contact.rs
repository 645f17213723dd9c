use crate::bodies::{mix_friction, mix_restitution, Fixture};
use crate::collision::{test_overlap, Manifold, WorldManifold};
use crate::contacts::{ContactEdge, ContactFlags, ContactKind, ContactListener, EdgeSide};
use crate::core::{BodyStorage, ContactHandle, FixtureHandle, FixtureStorage};
use crate::math::Transform;
use crate::shapes::Shape;
use crate::Result;

/// A fixture together with the child primitive taking part in a contact
#[derive(Debug, Clone, Copy)]
pub struct FixtureRef<'a> {
    pub handle: FixtureHandle,
    pub fixture: &'a Fixture,
    pub child_index: usize,
}

impl<'a> FixtureRef<'a> {
    pub fn new(handle: FixtureHandle, fixture: &'a Fixture, child_index: usize) -> Self {
        Self {
            handle,
            fixture,
            child_index,
        }
    }
}

/// The persistent contact between two fixture children.
///
/// A contact exists while the fattened bounding boxes of its children
/// overlap, so it may hold an empty manifold. The manifold points keep the
/// solver impulses of the previous step for warm starting.
#[derive(Debug, Clone)]
pub struct Contact {
    pub(crate) flags: ContactFlags,

    kind: ContactKind,

    fixture_a: FixtureHandle,
    fixture_b: FixtureHandle,
    index_a: usize,
    index_b: usize,

    manifold: Manifold,

    friction: f32,
    restitution: f32,
    tangent_speed: f32,

    // Material values of the two fixtures, the inputs of the mixing laws.
    // Copied at creation; fixture materials are fixed once the fixture exists.
    friction_a: f32,
    friction_b: f32,
    restitution_a: f32,
    restitution_b: f32,

    toi: f32,
    toi_count: u32,

    /// Edge threaded through body A's contact list, pointing at body B
    pub(crate) node_a: ContactEdge,

    /// Edge threaded through body B's contact list, pointing at body A
    pub(crate) node_b: ContactEdge,

    /// Links of the world contact list
    pub(crate) prev: Option<ContactHandle>,
    pub(crate) next: Option<ContactHandle>,
}

impl Contact {
    /// Creates a contact for an ordered fixture pair, mixing their materials
    pub fn new(kind: ContactKind, fixture_a: FixtureRef<'_>, fixture_b: FixtureRef<'_>) -> Self {
        let friction_a = fixture_a.fixture.friction();
        let friction_b = fixture_b.fixture.friction();
        let restitution_a = fixture_a.fixture.restitution();
        let restitution_b = fixture_b.fixture.restitution();

        Self {
            flags: ContactFlags::ENABLED,
            kind,
            fixture_a: fixture_a.handle,
            fixture_b: fixture_b.handle,
            index_a: fixture_a.child_index,
            index_b: fixture_b.child_index,
            manifold: Manifold::default(),
            friction: mix_friction(friction_a, friction_b),
            restitution: mix_restitution(restitution_a, restitution_b),
            tangent_speed: 0.0,
            friction_a,
            friction_b,
            restitution_a,
            restitution_b,
            toi: 0.0,
            toi_count: 0,
            node_a: ContactEdge::new(fixture_b.fixture.body()),
            node_b: ContactEdge::new(fixture_a.fixture.body()),
            prev: None,
            next: None,
        }
    }

    /// Gets the kind of this contact
    pub fn kind(&self) -> ContactKind {
        self.kind
    }

    /// Gets the contact manifold. Do not modify it unless you understand the
    /// internals of the solver.
    pub fn manifold(&self) -> &Manifold {
        &self.manifold
    }

    pub fn manifold_mut(&mut self) -> &mut Manifold {
        &mut self.manifold
    }

    /// Gets the world manifold for the current body transforms
    pub fn world_manifold(&self, fixtures: &FixtureStorage, bodies: &BodyStorage) -> Result<WorldManifold> {
        let fixture_a = fixtures.try_get(self.fixture_a)?;
        let fixture_b = fixtures.try_get(self.fixture_b)?;
        let xf_a = bodies.try_get(fixture_a.body())?.transform();
        let xf_b = bodies.try_get(fixture_b.body())?.transform();

        Ok(WorldManifold::new(
            &self.manifold,
            xf_a,
            fixture_a.shape().radius(),
            xf_b,
            fixture_b.shape().radius(),
        ))
    }

    /// Returns whether the shapes were touching at the last update
    pub fn is_touching(&self) -> bool {
        self.flags.contains(ContactFlags::TOUCHING)
    }

    /// Enables or disables the contact.
    ///
    /// This only lasts until the next [`Contact::update`], which re-enables the
    /// contact before evaluating it. Disable from `pre_solve` to keep the
    /// contact out of the current step.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.flags.set(ContactFlags::ENABLED, enabled);
    }

    pub fn is_enabled(&self) -> bool {
        self.flags.contains(ContactFlags::ENABLED)
    }

    /// Gets the raw contact flags
    pub fn flags(&self) -> ContactFlags {
        self.flags
    }

    pub fn fixture_a(&self) -> FixtureHandle {
        self.fixture_a
    }

    pub fn fixture_b(&self) -> FixtureHandle {
        self.fixture_b
    }

    /// Gets the child primitive index on fixture A
    pub fn child_index_a(&self) -> usize {
        self.index_a
    }

    /// Gets the child primitive index on fixture B
    pub fn child_index_b(&self) -> usize {
        self.index_b
    }

    /// Gets the next contact in the world contact list
    pub fn next(&self) -> Option<ContactHandle> {
        self.next
    }

    /// Gets the previous contact in the world contact list
    pub fn prev(&self) -> Option<ContactHandle> {
        self.prev
    }

    /// Gets one of the two graph edges
    pub fn node(&self, side: EdgeSide) -> &ContactEdge {
        match side {
            EdgeSide::A => &self.node_a,
            EdgeSide::B => &self.node_b,
        }
    }

    pub(crate) fn node_mut(&mut self, side: EdgeSide) -> &mut ContactEdge {
        match side {
            EdgeSide::A => &mut self.node_a,
            EdgeSide::B => &mut self.node_b,
        }
    }

    /// Overrides the mixed friction. The value persists until reset.
    pub fn set_friction(&mut self, friction: f32) {
        self.friction = friction;
    }

    pub fn friction(&self) -> f32 {
        self.friction
    }

    /// Restores the friction mixed from the two fixtures
    pub fn reset_friction(&mut self) {
        self.friction = mix_friction(self.friction_a, self.friction_b);
    }

    /// Overrides the mixed restitution. The value persists until reset.
    pub fn set_restitution(&mut self, restitution: f32) {
        self.restitution = restitution;
    }

    pub fn restitution(&self) -> f32 {
        self.restitution
    }

    /// Restores the restitution mixed from the two fixtures
    pub fn reset_restitution(&mut self) {
        self.restitution = mix_restitution(self.restitution_a, self.restitution_b);
    }

    /// Sets the desired tangent speed for a conveyor belt behavior, in m/s
    pub fn set_tangent_speed(&mut self, speed: f32) {
        self.tangent_speed = speed;
    }

    pub fn tangent_speed(&self) -> f32 {
        self.tangent_speed
    }

    /// Marks the contact for re-filtering at the next collide phase
    pub fn flag_for_filtering(&mut self) {
        self.flags.insert(ContactFlags::FILTER);
    }

    pub fn is_flagged_for_filtering(&self) -> bool {
        self.flags.contains(ContactFlags::FILTER)
    }

    /// Gets the cached time of impact, if valid
    pub fn toi(&self) -> Option<f32> {
        self.flags.contains(ContactFlags::TOI_VALID).then_some(self.toi)
    }

    /// Caches a time of impact and counts the attempt
    pub fn set_toi(&mut self, toi: f32) {
        self.toi = toi;
        self.toi_count += 1;
        self.flags.insert(ContactFlags::TOI_VALID);
    }

    /// Clears the cached time of impact and the attempt counter
    pub fn reset_toi(&mut self) {
        self.toi = 1.0;
        self.toi_count = 0;
        self.flags.remove(ContactFlags::TOI_VALID | ContactFlags::ISLAND);
    }

    pub fn toi_count(&self) -> u32 {
        self.toi_count
    }

    pub fn is_bullet_hit(&self) -> bool {
        self.flags.contains(ContactFlags::BULLET_HIT)
    }

    pub fn set_bullet_hit(&mut self, hit: bool) {
        self.flags.set(ContactFlags::BULLET_HIT, hit);
    }

    /// Returns whether the contact has been added to an island during the current search
    pub fn is_in_island(&self) -> bool {
        self.flags.contains(ContactFlags::ISLAND)
    }

    /// Recomputes the manifold geometry for the given shapes and transforms.
    /// Impulses are left untouched.
    pub fn evaluate(&mut self, shape_a: &Shape, xf_a: &Transform, shape_b: &Shape, xf_b: &Transform) {
        self.kind
            .evaluate(&mut self.manifold, shape_a, self.index_a, xf_a, shape_b, xf_b);
    }

    /// Updates the contact manifold and touching status, then notifies the listener.
    ///
    /// The contact is re-enabled before evaluation. Sensors only test for
    /// overlap and never hold manifold points. Impulses are carried over to new
    /// points whose id matches a point of the previous manifold. Both bodies
    /// are woken when a solid contact starts or stops touching.
    ///
    /// Listener callbacks fire in this order: `begin_contact` when touching
    /// starts, `end_contact` when it stops, then `pre_solve` on every update
    /// of a touching solid contact.
    pub fn update(
        &mut self,
        fixtures: &FixtureStorage,
        bodies: &mut BodyStorage,
        listener: Option<&mut (dyn ContactListener + '_)>,
    ) -> Result<()> {
        let old_manifold = self.manifold;

        // Re-enable this contact
        self.flags.insert(ContactFlags::ENABLED);

        let was_touching = self.is_touching();

        let fixture_a = fixtures.try_get(self.fixture_a)?;
        let fixture_b = fixtures.try_get(self.fixture_b)?;
        let sensor = fixture_a.is_sensor() || fixture_b.is_sensor();

        let body_a = fixture_a.body();
        let body_b = fixture_b.body();
        let xf_a = *bodies.try_get(body_a)?.transform();
        let xf_b = *bodies.try_get(body_b)?.transform();

        let touching;
        if sensor {
            touching = test_overlap(
                fixture_a.shape(),
                self.index_a,
                fixture_b.shape(),
                self.index_b,
                &xf_a,
                &xf_b,
            );

            // Sensors don't generate manifolds
            self.manifold.point_count = 0;
        } else {
            self.evaluate(fixture_a.shape(), &xf_a, fixture_b.shape(), &xf_b);
            touching = self.manifold.point_count > 0;

            carry_impulses(&mut self.manifold, &old_manifold);

            if touching != was_touching {
                bodies.try_get_mut(body_a)?.set_awake(true);
                bodies.try_get_mut(body_b)?.set_awake(true);
            }
        }

        self.flags.set(ContactFlags::TOUCHING, touching);

        if !was_touching && touching {
            log::trace!("contact between {:?} and {:?} began touching", self.fixture_a, self.fixture_b);
        } else if was_touching && !touching {
            log::trace!("contact between {:?} and {:?} stopped touching", self.fixture_a, self.fixture_b);
        }

        if let Some(listener) = listener {
            if !was_touching && touching {
                listener.begin_contact(self);
            }

            if was_touching && !touching {
                listener.end_contact(self);
            }

            if !sensor && touching {
                listener.pre_solve(self, &old_manifold);
            }
        }

        Ok(())
    }
}

/// Warm starting: copies impulses from `old_manifold` onto the points of
/// `manifold` with the same id. Points without a match start from zero. The
/// first matching old point wins.
pub fn carry_impulses(manifold: &mut Manifold, old_manifold: &Manifold) {
    for point in manifold.points_mut() {
        point.normal_impulse = 0.0;
        point.tangent_impulse = 0.0;

        if let Some(old_point) = old_manifold.find_point(point.id) {
            point.normal_impulse = old_point.normal_impulse;
            point.tangent_impulse = old_point.tangent_impulse;
        }
    }
}
