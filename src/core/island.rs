use crate::bodies::{body_flags::BodyFlags, BodyType};
use crate::contacts::ContactFlags;
use crate::core::{BodyHandle, BodyStorage, ContactHandle, ContactStorage, FixtureStorage};
use crate::Result;

/// A set of bodies connected through touching contacts
#[derive(Debug, Default, Clone)]
pub struct Island {
    /// The bodies in the island, in discovery order
    pub bodies: Vec<BodyHandle>,

    /// The contacts in the island, in discovery order
    pub contacts: Vec<ContactHandle>,
}

impl Island {
    /// Creates a new empty island
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a body to the island
    pub fn add_body(&mut self, body: BodyHandle) {
        self.bodies.push(body);
    }

    /// Adds a contact to the island
    pub fn add_contact(&mut self, contact: ContactHandle) {
        self.contacts.push(contact);
    }

    /// Returns whether the island contains a specific body
    pub fn contains_body(&self, body: BodyHandle) -> bool {
        self.bodies.contains(&body)
    }

    /// Returns whether the island contains a specific contact
    pub fn contains_contact(&self, contact: ContactHandle) -> bool {
        self.contacts.contains(&contact)
    }

    /// Returns the number of bodies in the island
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Returns the number of contacts in the island
    pub fn contact_count(&self) -> usize {
        self.contacts.len()
    }

    /// Returns whether the island is empty
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

/// Flood-fills the contact graph into islands.
///
/// Seeds are awake, non-static bodies. The search crosses contacts that are
/// enabled, touching and not sensors. Static bodies join an island but do not
/// propagate it, and may appear in several islands. Every body reached is
/// woken up.
pub fn build_islands(
    bodies: &mut BodyStorage,
    fixtures: &FixtureStorage,
    contacts: &mut ContactStorage,
) -> Result<Vec<Island>> {
    for (_, body) in bodies.iter_mut() {
        body.flags.remove(BodyFlags::ISLAND);
    }
    for (_, contact) in contacts.iter_mut() {
        contact.flags.remove(ContactFlags::ISLAND);
    }

    let mut islands = Vec::new();
    let mut stack: Vec<BodyHandle> = Vec::new();

    for seed in bodies.handles() {
        let body = bodies.try_get_mut(seed)?;
        if body.is_in_island() || !body.is_awake() || body.body_type() == BodyType::Static {
            continue;
        }

        let mut island = Island::new();
        body.flags.insert(BodyFlags::ISLAND);
        stack.push(seed);

        while let Some(handle) = stack.pop() {
            island.add_body(handle);

            let body = bodies.try_get_mut(handle)?;

            // Don't propagate islands across static bodies
            if body.body_type() == BodyType::Static {
                continue;
            }
            body.set_awake(true);

            let mut edge = body.contact_list;
            while let Some(edge_handle) = edge {
                let contact = contacts.try_get_mut(edge_handle.contact)?;
                let contact_edge = contact.node(edge_handle.side).clone();
                edge = contact_edge.next;

                // Has this contact already been added to an island?
                if contact.is_in_island() {
                    continue;
                }

                // Is this contact solid and touching?
                if !contact.is_enabled() || !contact.is_touching() {
                    continue;
                }

                let sensor_a = fixtures.try_get(contact.fixture_a())?.is_sensor();
                let sensor_b = fixtures.try_get(contact.fixture_b())?.is_sensor();
                if sensor_a || sensor_b {
                    continue;
                }

                contact.flags.insert(ContactFlags::ISLAND);
                island.add_contact(edge_handle.contact);

                let other = bodies.try_get_mut(contact_edge.other)?;

                // Was the other body already added to this island?
                if other.is_in_island() {
                    continue;
                }

                other.flags.insert(BodyFlags::ISLAND);
                stack.push(contact_edge.other);
            }
        }

        // Allow static bodies to participate in other islands
        for handle in &island.bodies {
            let body = bodies.try_get_mut(*handle)?;
            if body.body_type() == BodyType::Static {
                body.flags.remove(BodyFlags::ISLAND);
            }
        }

        islands.push(island);
    }

    Ok(islands)
}
