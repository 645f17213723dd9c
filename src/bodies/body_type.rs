#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Type of body, determining how it takes part in contacts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum BodyType {
    /// Static bodies never move and never wake up
    #[default]
    Static,

    /// Kinematic bodies are moved programmatically and only collide with dynamic bodies
    Kinematic,

    /// Dynamic bodies are fully simulated
    Dynamic,
}
