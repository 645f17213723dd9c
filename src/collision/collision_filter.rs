use bitflags::bitflags;
use crate::bodies::Fixture;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

bitflags! {
    /// A bit mask representing a collision category
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
    pub struct CollisionGroup: u16 {
        /// Default category
        const DEFAULT    = 0x0001;

        /// Static world geometry
        const STATIC     = 0x0002;

        /// Dynamic objects
        const DYNAMIC    = 0x0004;

        /// Kinematic objects
        const KINEMATIC  = 0x0008;

        /// Character objects
        const CHARACTER  = 0x0010;

        /// Projectile objects
        const PROJECTILE = 0x0020;

        /// Sensor/trigger volumes
        const SENSOR     = 0x0040;

        /// Debris objects
        const DEBRIS     = 0x0080;

        /// All categories
        const ALL        = 0xFFFF;
    }
}

impl Default for CollisionGroup {
    fn default() -> Self {
        CollisionGroup::DEFAULT
    }
}

/// Type alias for a collision mask (which categories a fixture accepts)
pub type CollisionMask = CollisionGroup;

/// Collision filtering data carried by every fixture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Filter {
    /// The categories this fixture belongs to
    pub category_bits: CollisionGroup,

    /// The categories this fixture accepts collisions with
    pub mask_bits: CollisionMask,

    /// Fixtures sharing a non-zero group always collide (positive) or never
    /// collide (negative). Zero defers to the category and mask bits.
    pub group_index: i16,
}

impl Default for Filter {
    fn default() -> Self {
        Self {
            category_bits: CollisionGroup::DEFAULT,
            mask_bits: CollisionMask::ALL,
            group_index: 0,
        }
    }
}

impl Filter {
    /// Applies the group override, then the two-way category/mask test
    pub fn accepts(&self, other: &Filter) -> bool {
        if self.group_index == other.group_index && self.group_index != 0 {
            return self.group_index > 0;
        }

        self.mask_bits.intersects(other.category_bits) && other.mask_bits.intersects(self.category_bits)
    }
}

/// Decides whether two fixtures may form a contact
pub trait ContactFilter {
    /// Returns whether the two fixtures should be tested for collision
    fn should_collide(&self, fixture_a: &Fixture, fixture_b: &Fixture) -> bool;
}

/// A filter based on each fixture's [`Filter`] data
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultContactFilter;

impl ContactFilter for DefaultContactFilter {
    fn should_collide(&self, fixture_a: &Fixture, fixture_b: &Fixture) -> bool {
        fixture_a.filter().accepts(fixture_b.filter())
    }
}
