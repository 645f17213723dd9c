pub mod world;
pub mod config;
pub mod settings;
pub mod storage;
mod island;

pub use self::world::ContactWorld;
pub use self::config::ContactConfig;
pub use self::storage::{Handle, Storage, BodyStorage, FixtureStorage, ContactStorage};
pub use self::island::{Island, build_islands};

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// A unique identifier for a body in the contact world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct BodyHandle(pub(crate) u32);

/// A unique identifier for a fixture in the contact world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct FixtureHandle(pub(crate) u32);

/// A unique identifier for a contact in the contact world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct ContactHandle(pub(crate) u32);

impl ContactHandle {
    /// Placeholder for edges that are not linked into the contact graph yet
    pub(crate) const NULL: ContactHandle = ContactHandle(0);
}
