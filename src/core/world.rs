use crate::bodies::{Body, Fixture, FixtureDef};
use crate::collision::{ContactFilter, DefaultContactFilter, Filter, WorldManifold};
use crate::contacts::{
    link_contact, unlink_contact, BodyContacts, Contact, ContactFlags, ContactListener, ContactRegistry,
    FixtureRef,
};
use crate::core::{
    build_islands, BodyHandle, BodyStorage, ContactConfig, ContactHandle, ContactStorage, FixtureHandle,
    FixtureStorage, Island,
};
use crate::error::PhysicsError;
use crate::math::{Aabb, Transform};
use crate::Result;

/// Owns bodies, fixtures and contacts, and drives the contact lifecycle.
///
/// A step runs two serial phases: [`ContactWorld::find_new_contacts`] creates
/// contacts for newly overlapping fixture pairs, then
/// [`ContactWorld::collide`] updates every live contact and destroys the ones
/// whose pair no longer overlaps or no longer passes filtering.
pub struct ContactWorld {
    /// All bodies in the world
    bodies: BodyStorage,

    /// All fixtures in the world
    fixtures: FixtureStorage,

    /// All live contacts
    contacts: ContactStorage,

    /// Head of the world contact list, most recently created first
    contact_list: Option<ContactHandle>,

    /// Shape pair dispatch
    registry: ContactRegistry,

    /// Decides whether two fixtures may form a contact
    contact_filter: Box<dyn ContactFilter>,

    /// Configuration for contact management
    config: ContactConfig,
}

impl ContactWorld {
    /// Creates a new contact world with default settings
    pub fn new() -> Self {
        Self::with_config(ContactConfig::default())
    }

    /// Creates a new contact world with the given configuration
    pub fn with_config(config: ContactConfig) -> Self {
        Self {
            bodies: BodyStorage::new(),
            fixtures: FixtureStorage::new(),
            contacts: ContactStorage::new(),
            contact_list: None,
            registry: ContactRegistry::with_default_types(),
            contact_filter: Box::new(DefaultContactFilter),
            config,
        }
    }

    /// Returns a reference to the configuration
    pub fn config(&self) -> &ContactConfig {
        &self.config
    }

    /// Returns a mutable reference to the configuration
    pub fn config_mut(&mut self) -> &mut ContactConfig {
        &mut self.config
    }

    /// Replaces the contact filter
    pub fn set_contact_filter(&mut self, filter: Box<dyn ContactFilter>) {
        self.contact_filter = filter;
    }

    /// Returns the shape pair registry
    pub fn registry(&self) -> &ContactRegistry {
        &self.registry
    }

    /// Adds a body to the world and returns its handle
    pub fn create_body(&mut self, body: Body) -> BodyHandle {
        self.bodies.add(body)
    }

    /// Gets a body by its handle
    pub fn body(&self, handle: BodyHandle) -> Result<&Body> {
        self.bodies.try_get(handle)
    }

    /// Gets a mutable body by its handle
    pub fn body_mut(&mut self, handle: BodyHandle) -> Result<&mut Body> {
        self.bodies.try_get_mut(handle)
    }

    /// Returns the body storage
    pub fn bodies(&self) -> &BodyStorage {
        &self.bodies
    }

    /// Moves a body and wakes it up
    pub fn set_transform(&mut self, handle: BodyHandle, transform: Transform) -> Result<()> {
        let body = self.bodies.try_get_mut(handle)?;
        body.set_transform(transform);
        body.set_awake(true);
        Ok(())
    }

    /// Destroys a body together with its fixtures and contacts
    pub fn destroy_body(&mut self, handle: BodyHandle) -> Result<()> {
        let body = self.bodies.try_get(handle)?;

        let mut edge = body.contact_list;
        while let Some(edge_handle) = edge {
            let contact = self.contacts.try_get(edge_handle.contact)?;
            edge = contact.node(edge_handle.side).next;
            self.destroy_contact(edge_handle.contact)?;
        }

        let fixtures = std::mem::take(&mut self.bodies.try_get_mut(handle)?.fixtures);
        for fixture in fixtures {
            self.fixtures.remove(fixture);
        }

        self.bodies.remove(handle);
        Ok(())
    }

    /// Attaches a fixture to a body
    pub fn create_fixture(&mut self, body: BodyHandle, def: FixtureDef) -> Result<FixtureHandle> {
        if !self.bodies.contains(body) {
            return Err(PhysicsError::ResourceNotFound(format!(
                "Body with handle {:?} not found",
                body
            )));
        }

        let handle = self.fixtures.add(Fixture::new(body, def));
        self.bodies.try_get_mut(body)?.fixtures.push(handle);
        Ok(handle)
    }

    /// Gets a fixture by its handle
    pub fn fixture(&self, handle: FixtureHandle) -> Result<&Fixture> {
        self.fixtures.try_get(handle)
    }

    /// Returns the fixture storage
    pub fn fixtures(&self) -> &FixtureStorage {
        &self.fixtures
    }

    /// Destroys a fixture and every contact it takes part in
    pub fn destroy_fixture(&mut self, handle: FixtureHandle) -> Result<()> {
        let body_handle = self.fixtures.try_get(handle)?.body();

        for contact in self.fixture_contacts(body_handle, handle)? {
            self.destroy_contact(contact)?;
        }

        let body = self.bodies.try_get_mut(body_handle)?;
        body.fixtures.retain(|f| *f != handle);
        self.fixtures.remove(handle);
        Ok(())
    }

    /// Changes the filtering data of a fixture. Its contacts are re-filtered
    /// during the next collide phase.
    pub fn set_filter_data(&mut self, handle: FixtureHandle, filter: Filter) -> Result<()> {
        self.fixtures.try_get_mut(handle)?.filter = filter;
        self.refilter(handle)
    }

    /// Turns a fixture into a sensor or back into a solid fixture
    pub fn set_sensor(&mut self, handle: FixtureHandle, is_sensor: bool) -> Result<()> {
        let fixture = self.fixtures.try_get_mut(handle)?;
        if fixture.is_sensor == is_sensor {
            return Ok(());
        }

        fixture.is_sensor = is_sensor;
        let body = fixture.body();
        self.bodies.try_get_mut(body)?.set_awake(true);
        self.refilter(handle)
    }

    /// Flags every contact of a fixture for filtering
    fn refilter(&mut self, handle: FixtureHandle) -> Result<()> {
        let body = self.fixtures.try_get(handle)?.body();
        for contact in self.fixture_contacts(body, handle)? {
            self.contacts.try_get_mut(contact)?.flag_for_filtering();
        }
        Ok(())
    }

    /// Collects the contacts of `body` that involve `fixture`
    fn fixture_contacts(&self, body: BodyHandle, fixture: FixtureHandle) -> Result<Vec<ContactHandle>> {
        let mut result = Vec::new();
        for edge in self.body_contacts(body)? {
            let contact = self.contacts.try_get(edge.contact)?;
            if contact.fixture_a() == fixture || contact.fixture_b() == fixture {
                result.push(edge.contact);
            }
        }
        Ok(result)
    }

    /// Creates a contact for a pair of fixture children reported as
    /// overlapping, unless one already exists or the pair is rejected.
    ///
    /// Pairs are rejected when both fixtures belong to the same body, when
    /// neither body is dynamic, when the contact filter refuses them, or when
    /// no contact kind handles their shape types.
    pub fn add_pair(
        &mut self,
        fixture_a: FixtureHandle,
        index_a: usize,
        fixture_b: FixtureHandle,
        index_b: usize,
    ) -> Result<Option<ContactHandle>> {
        let f_a = self.fixtures.try_get(fixture_a)?;
        let f_b = self.fixtures.try_get(fixture_b)?;

        let body_a = f_a.body();
        let body_b = f_b.body();

        // Are the fixtures on the same body?
        if body_a == body_b {
            return Ok(None);
        }

        // Does a contact already exist?
        for edge in self.body_contacts(body_b)? {
            if edge.other != body_a {
                continue;
            }

            let contact = self.contacts.try_get(edge.contact)?;
            let (c_a, c_b) = (contact.fixture_a(), contact.fixture_b());
            let (i_a, i_b) = (contact.child_index_a(), contact.child_index_b());

            if c_a == fixture_a && c_b == fixture_b && i_a == index_a && i_b == index_b {
                return Ok(None);
            }

            if c_a == fixture_b && c_b == fixture_a && i_a == index_b && i_b == index_a {
                return Ok(None);
            }
        }

        if !self.bodies.try_get(body_b)?.should_collide(self.bodies.try_get(body_a)?) {
            return Ok(None);
        }

        if !self.contact_filter.should_collide(f_a, f_b) {
            return Ok(None);
        }

        // Creation may swap the fixtures
        let contact = match self.registry.create(
            FixtureRef::new(fixture_a, f_a, index_a),
            FixtureRef::new(fixture_b, f_b, index_b),
        ) {
            Some(contact) => contact,
            None => return Ok(None),
        };

        let handle = self.contacts.add(contact);

        // Insert into the world
        if let Some(head) = self.contact_list {
            self.contacts.try_get_mut(head)?.prev = Some(handle);
        }
        self.contacts.try_get_mut(handle)?.next = self.contact_list;
        self.contact_list = Some(handle);

        // Connect to the contact graph
        link_contact(&mut self.contacts, &mut self.bodies, handle)?;

        Ok(Some(handle))
    }

    /// Pairs every fixture child with every other one whose fattened bounding
    /// box overlaps it, and returns the number of contacts created.
    pub fn find_new_contacts(&mut self) -> Result<usize> {
        let mut proxies: Vec<(FixtureHandle, usize, Aabb)> = Vec::new();
        for (handle, fixture) in self.fixtures.iter() {
            let transform = self.bodies.try_get(fixture.body())?.transform();
            for child in 0..fixture.shape().child_count() {
                let aabb = fixture
                    .compute_aabb(transform, child)
                    .expand(self.config.aabb_extension);
                proxies.push((handle, child, aabb));
            }
        }

        let mut created = 0;
        for (i, (fixture_a, index_a, aabb_a)) in proxies.iter().enumerate() {
            for (fixture_b, index_b, aabb_b) in &proxies[i + 1..] {
                if !aabb_a.intersects(aabb_b) {
                    continue;
                }

                if self.add_pair(*fixture_a, *index_a, *fixture_b, *index_b)?.is_some() {
                    created += 1;
                }
            }
        }

        Ok(created)
    }

    /// Removes a contact from the world list and the contact graph, then destroys it
    pub fn destroy_contact(&mut self, handle: ContactHandle) -> Result<()> {
        let contact = self.contacts.try_get(handle)?;
        let (prev, next) = (contact.prev, contact.next);

        // Remove from the world
        if let Some(prev) = prev {
            self.contacts.try_get_mut(prev)?.next = next;
        }
        if let Some(next) = next {
            self.contacts.try_get_mut(next)?.prev = prev;
        }
        if self.contact_list == Some(handle) {
            self.contact_list = next;
        }

        // Remove from the bodies' contact lists
        unlink_contact(&mut self.contacts, &mut self.bodies, handle)?;

        let contact = self
            .contacts
            .remove(handle)
            .ok_or_else(|| PhysicsError::InternalError(format!("contact {:?} vanished during destruction", handle)))?;

        self.registry.destroy(contact, &self.fixtures, &mut self.bodies)
    }

    /// The collide phase: updates every live contact in list order.
    ///
    /// Contacts flagged for filtering are re-checked first and destroyed when
    /// rejected. Contacts between two sleeping or static bodies are skipped
    /// while sleeping is allowed. Contacts whose fattened bounding boxes no
    /// longer overlap are destroyed.
    pub fn collide(&mut self, mut listener: Option<&mut (dyn ContactListener + '_)>) -> Result<()> {
        let mut next = self.contact_list;

        while let Some(handle) = next {
            let contact = self.contacts.try_get(handle)?;
            next = contact.next;

            let fixture_a = self.fixtures.try_get(contact.fixture_a())?;
            let fixture_b = self.fixtures.try_get(contact.fixture_b())?;
            let index_a = contact.child_index_a();
            let index_b = contact.child_index_b();
            let body_a = self.bodies.try_get(fixture_a.body())?;
            let body_b = self.bodies.try_get(fixture_b.body())?;

            // Is this contact flagged for filtering?
            if contact.is_flagged_for_filtering() {
                if !body_b.should_collide(body_a) || !self.contact_filter.should_collide(fixture_a, fixture_b) {
                    log::debug!("destroying contact {:?} rejected by filtering", handle);
                    self.destroy_contact(handle)?;
                    continue;
                }

                self.contacts.try_get_mut(handle)?.flags.remove(ContactFlags::FILTER);
            }

            // At least one body must be awake and it must be dynamic or kinematic
            let active_a = body_a.is_awake();
            let active_b = body_b.is_awake();
            if self.config.allow_sleeping && !active_a && !active_b {
                continue;
            }

            let extension = self.config.aabb_extension;
            let aabb_a = fixture_a.compute_aabb(body_a.transform(), index_a).expand(extension);
            let aabb_b = fixture_b.compute_aabb(body_b.transform(), index_b).expand(extension);

            // The pair no longer overlaps
            if !aabb_a.intersects(&aabb_b) {
                self.destroy_contact(handle)?;
                continue;
            }

            // The contact persists
            self.contacts
                .try_get_mut(handle)?
                .update(&self.fixtures, &mut self.bodies, listener.as_deref_mut())?;
        }

        Ok(())
    }

    /// Updates a single contact
    pub fn update_contact(
        &mut self,
        handle: ContactHandle,
        listener: Option<&mut (dyn ContactListener + '_)>,
    ) -> Result<()> {
        self.contacts
            .try_get_mut(handle)?
            .update(&self.fixtures, &mut self.bodies, listener)
    }

    /// Builds the islands of the contact graph for the current step
    pub fn build_islands(&mut self) -> Result<Vec<Island>> {
        build_islands(&mut self.bodies, &self.fixtures, &mut self.contacts)
    }

    /// Iterates over the live contacts, most recently created first
    pub fn contacts(&self) -> impl Iterator<Item = (ContactHandle, &Contact)> + '_ {
        let mut next = self.contact_list;
        std::iter::from_fn(move || {
            let handle = next?;
            let contact = self.contacts.get(handle)?;
            next = contact.next;
            Some((handle, contact))
        })
    }

    /// Gets the head of the world contact list
    pub fn contact_list(&self) -> Option<ContactHandle> {
        self.contact_list
    }

    /// Returns the number of live contacts
    pub fn contact_count(&self) -> usize {
        self.contacts.len()
    }

    /// Gets a contact by its handle
    pub fn contact(&self, handle: ContactHandle) -> Result<&Contact> {
        self.contacts.try_get(handle)
    }

    /// Gets a mutable contact by its handle
    pub fn contact_mut(&mut self, handle: ContactHandle) -> Result<&mut Contact> {
        self.contacts.try_get_mut(handle)
    }

    /// Iterates over the contact edges of a body
    pub fn body_contacts(&self, body: BodyHandle) -> Result<BodyContacts<'_>> {
        let head = self.bodies.try_get(body)?.contact_list;
        Ok(BodyContacts::new(&self.contacts, head))
    }

    /// Gets the world manifold of a contact
    pub fn world_manifold(&self, handle: ContactHandle) -> Result<WorldManifold> {
        self.contacts
            .try_get(handle)?
            .world_manifold(&self.fixtures, &self.bodies)
    }
}

impl Default for ContactWorld {
    fn default() -> Self {
        Self::new()
    }
}
