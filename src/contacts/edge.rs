use crate::core::{BodyHandle, BodyStorage, ContactHandle, ContactStorage};
use crate::Result;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Which of a contact's two edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum EdgeSide {
    /// The edge threaded through body A's list
    A,
    /// The edge threaded through body B's list
    B,
}

impl EdgeSide {
    pub fn opposite(self) -> Self {
        match self {
            EdgeSide::A => EdgeSide::B,
            EdgeSide::B => EdgeSide::A,
        }
    }
}

/// Addresses a contact edge inside the contact arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct ContactEdgeHandle {
    pub contact: ContactHandle,
    pub side: EdgeSide,
}

/// A node of a body's contact list.
///
/// Contacts own both of their edges. Bodies only hold the handle of the first
/// edge of their list, and edges link to each other by handle.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactEdge {
    /// The body on the other side of the contact
    pub other: BodyHandle,

    /// The contact owning this edge
    pub contact: ContactHandle,

    /// The previous edge in the body's contact list
    pub prev: Option<ContactEdgeHandle>,

    /// The next edge in the body's contact list
    pub next: Option<ContactEdgeHandle>,
}

impl ContactEdge {
    /// Creates an unlinked edge pointing at `other`
    pub fn new(other: BodyHandle) -> Self {
        Self {
            other,
            contact: ContactHandle::NULL,
            prev: None,
            next: None,
        }
    }
}

fn edge_mut(contacts: &mut ContactStorage, handle: ContactEdgeHandle) -> Result<&mut ContactEdge> {
    Ok(contacts.try_get_mut(handle.contact)?.node_mut(handle.side))
}

/// Splices both edges of a contact at the head of its bodies' contact lists
pub fn link_contact(contacts: &mut ContactStorage, bodies: &mut BodyStorage, handle: ContactHandle) -> Result<()> {
    for side in [EdgeSide::A, EdgeSide::B] {
        let edge_handle = ContactEdgeHandle { contact: handle, side };

        // Edge A lives in body A's list and points at body B
        let owner = contacts.try_get(handle)?.node(side.opposite()).other;
        let body = bodies.try_get_mut(owner)?;
        let head = body.contact_list;

        {
            let edge = edge_mut(contacts, edge_handle)?;
            edge.contact = handle;
            edge.prev = None;
            edge.next = head;
        }

        if let Some(head) = head {
            edge_mut(contacts, head)?.prev = Some(edge_handle);
        }

        body.contact_list = Some(edge_handle);
    }

    Ok(())
}

/// Removes both edges of a contact from its bodies' contact lists
pub fn unlink_contact(contacts: &mut ContactStorage, bodies: &mut BodyStorage, handle: ContactHandle) -> Result<()> {
    for side in [EdgeSide::A, EdgeSide::B] {
        let edge_handle = ContactEdgeHandle { contact: handle, side };

        let contact = contacts.try_get(handle)?;
        let owner = contact.node(side.opposite()).other;
        let edge = contact.node(side).clone();

        if let Some(prev) = edge.prev {
            edge_mut(contacts, prev)?.next = edge.next;
        }

        if let Some(next) = edge.next {
            edge_mut(contacts, next)?.prev = edge.prev;
        }

        let body = bodies.try_get_mut(owner)?;
        if body.contact_list == Some(edge_handle) {
            body.contact_list = edge.next;
        }

        let edge = edge_mut(contacts, edge_handle)?;
        edge.prev = None;
        edge.next = None;
    }

    Ok(())
}

/// Iterates over the contact edges of one body, most recent contact first
pub struct BodyContacts<'a> {
    contacts: &'a ContactStorage,
    current: Option<ContactEdgeHandle>,
}

impl<'a> BodyContacts<'a> {
    pub fn new(contacts: &'a ContactStorage, head: Option<ContactEdgeHandle>) -> Self {
        Self { contacts, current: head }
    }
}

impl<'a> Iterator for BodyContacts<'a> {
    type Item = &'a ContactEdge;

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.current?;
        let edge = self.contacts.get(handle.contact)?.node(handle.side);
        self.current = edge.next;
        Some(edge)
    }
}
