//! Persistent contacts between fixture pairs.
//!
//! A [`Contact`] is created by the [`ContactRegistry`] when two fixtures start
//! overlapping and lives until their bounding boxes separate. Every step the
//! contact re-evaluates its manifold, carries solver impulses over to points
//! that persisted, and reports touching transitions to a [`ContactListener`].

mod contact;
mod kind;
mod registry;
mod edge;
mod listener;
mod events;

pub use self::contact::{carry_impulses, Contact, FixtureRef};
pub use self::kind::ContactKind;
pub use self::registry::{ContactCreateFn, ContactDestroyFn, ContactRegistration, ContactRegistry};
pub use self::edge::{link_contact, unlink_contact, BodyContacts, ContactEdge, ContactEdgeHandle, EdgeSide};
pub use self::listener::ContactListener;
pub use self::events::{ContactEvent, ContactEventQueue, ContactEventType};

/// Flags describing the state of a contact
pub mod contact_flags {
    use bitflags::bitflags;

    bitflags! {
        /// State bits of a contact
        #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
        pub struct ContactFlags: u32 {
            /// Used when crawling the contact graph to form islands
            const ISLAND = 0x01;

            /// Set when the shapes are touching
            const TOUCHING = 0x02;

            /// This contact can be disabled by the user for one step
            const ENABLED = 0x04;

            /// This contact needs filtering because a fixture filter was changed
            const FILTER = 0x08;

            /// This bullet contact had a time of impact event
            const BULLET_HIT = 0x10;

            /// This contact has a valid time of impact cached
            const TOI_VALID = 0x20;
        }
    }
}

pub use self::contact_flags::ContactFlags;
