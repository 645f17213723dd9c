use crate::bodies::{body_flags::BodyFlags, BodyType};
use crate::contacts::ContactEdgeHandle;
use crate::core::FixtureHandle;
use crate::math::Transform;

/// A body as seen by the contact layer: a transform, a sleep state, the
/// fixtures attached to it and the head of its contact edge list.
#[derive(Debug, Clone)]
pub struct Body {
    /// The body's transform in world space
    transform: Transform,

    /// The body's type (static, kinematic or dynamic)
    body_type: BodyType,

    /// The body's flags
    pub(crate) flags: BodyFlags,

    /// Head of the list of contact edges touching this body
    pub(crate) contact_list: Option<ContactEdgeHandle>,

    /// Fixtures attached to this body
    pub(crate) fixtures: Vec<FixtureHandle>,
}

impl Body {
    /// Creates a new body. Non-static bodies start awake.
    pub fn new(transform: Transform, body_type: BodyType) -> Self {
        let mut flags = BodyFlags::AUTO_SLEEP;
        if body_type != BodyType::Static {
            flags |= BodyFlags::AWAKE;
        }

        Self {
            transform,
            body_type,
            flags,
            contact_list: None,
            fixtures: Vec::new(),
        }
    }

    /// Gets the body's transform
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Sets the body's transform. Existing contacts pick it up on their next update.
    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    /// Gets the body type
    pub fn body_type(&self) -> BodyType {
        self.body_type
    }

    /// Returns whether the body is awake
    pub fn is_awake(&self) -> bool {
        self.flags.contains(BodyFlags::AWAKE)
    }

    /// Wakes the body up or puts it to sleep. Static bodies are never awake.
    pub fn set_awake(&mut self, awake: bool) {
        if self.body_type == BodyType::Static {
            return;
        }

        if awake {
            self.flags.insert(BodyFlags::AWAKE);
        } else {
            self.flags.remove(BodyFlags::AWAKE);
        }
    }

    /// Returns whether the body may fall asleep
    pub fn is_sleeping_allowed(&self) -> bool {
        self.flags.contains(BodyFlags::AUTO_SLEEP)
    }

    /// Allows or forbids sleeping. Forbidding sleep wakes the body.
    pub fn set_sleeping_allowed(&mut self, allowed: bool) {
        if allowed {
            self.flags.insert(BodyFlags::AUTO_SLEEP);
        } else {
            self.flags.remove(BodyFlags::AUTO_SLEEP);
            self.set_awake(true);
        }
    }

    /// Returns whether this body may collide with `other`.
    /// At least one of the two must be dynamic.
    pub fn should_collide(&self, other: &Body) -> bool {
        self.body_type == BodyType::Dynamic || other.body_type == BodyType::Dynamic
    }

    /// Gets the head of the body's contact edge list
    pub fn contact_list(&self) -> Option<ContactEdgeHandle> {
        self.contact_list
    }

    /// Gets the fixtures attached to the body
    pub fn fixtures(&self) -> &[FixtureHandle] {
        &self.fixtures
    }

    /// Returns whether the body has been visited by the current island search
    pub fn is_in_island(&self) -> bool {
        self.flags.contains(BodyFlags::ISLAND)
    }
}
