use crate::collision::Manifold;
use crate::contacts::{Contact, ContactListener};
use crate::core::FixtureHandle;
use std::collections::VecDeque;

/// Types of contact events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactEventType {
    /// Fixtures have just started touching
    Begin,

    /// Fixtures have just stopped touching
    End,

    /// A touching contact is about to be solved
    PreSolve,
}

/// A contact event between two fixtures
#[derive(Debug, Clone, PartialEq)]
pub struct ContactEvent {
    /// The type of contact event
    pub event_type: ContactEventType,

    /// The first fixture of the contact
    pub fixture_a: FixtureHandle,

    /// The second fixture of the contact
    pub fixture_b: FixtureHandle,

    /// Child index on the first fixture
    pub child_index_a: usize,

    /// Child index on the second fixture
    pub child_index_b: usize,

    /// Number of manifold points when the event fired
    pub point_count: usize,

    /// Number of points in the previous manifold (PreSolve only)
    pub old_point_count: Option<usize>,
}

impl ContactEvent {
    fn new(event_type: ContactEventType, contact: &Contact, old_manifold: Option<&Manifold>) -> Self {
        Self {
            event_type,
            fixture_a: contact.fixture_a(),
            fixture_b: contact.fixture_b(),
            child_index_a: contact.child_index_a(),
            child_index_b: contact.child_index_b(),
            point_count: contact.manifold().point_count,
            old_point_count: old_manifold.map(|m| m.point_count),
        }
    }

    /// Returns whether the event involves `fixture`
    pub fn involves(&self, fixture: FixtureHandle) -> bool {
        self.fixture_a == fixture || self.fixture_b == fixture
    }
}

/// A listener that records contact events in the order they fire
#[derive(Debug, Default)]
pub struct ContactEventQueue {
    events: VecDeque<ContactEvent>,
}

impl ContactEventQueue {
    /// Creates a new empty event queue
    pub fn new() -> Self {
        Self {
            events: VecDeque::new(),
        }
    }

    /// Adds an event to the queue
    pub fn push(&mut self, event: ContactEvent) {
        self.events.push_back(event);
    }

    /// Gets the next event from the queue
    pub fn next_event(&mut self) -> Option<ContactEvent> {
        self.events.pop_front()
    }

    /// Returns the number of queued events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Clears all events from the queue
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Iterates over the queued events in firing order
    pub fn iter(&self) -> impl Iterator<Item = &ContactEvent> + '_ {
        self.events.iter()
    }

    /// Gets the sequence of event types, in firing order
    pub fn event_types(&self) -> Vec<ContactEventType> {
        self.events.iter().map(|e| e.event_type).collect()
    }

    /// Gets all events of a specific type
    pub fn events_of_type(&self, event_type: ContactEventType) -> Vec<&ContactEvent> {
        self.events
            .iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// Gets all events involving a specific fixture
    pub fn events_for_fixture(&self, fixture: FixtureHandle) -> Vec<&ContactEvent> {
        self.events
            .iter()
            .filter(|e| e.involves(fixture))
            .collect()
    }
}

impl ContactListener for ContactEventQueue {
    fn begin_contact(&mut self, contact: &mut Contact) {
        self.push(ContactEvent::new(ContactEventType::Begin, contact, None));
    }

    fn end_contact(&mut self, contact: &mut Contact) {
        self.push(ContactEvent::new(ContactEventType::End, contact, None));
    }

    fn pre_solve(&mut self, contact: &mut Contact, old_manifold: &Manifold) {
        self.push(ContactEvent::new(ContactEventType::PreSolve, contact, Some(old_manifold)));
    }
}
