use crate::core::settings::AABB_EXTENSION;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Configuration parameters for contact management
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct ContactConfig {
    /// Margin added around every child AABB when pairing fixtures and when
    /// deciding whether an existing pair still overlaps
    pub aabb_extension: f32,

    /// Whether sleeping bodies are skipped by the collide phase.
    /// When false every contact is updated each step.
    pub allow_sleeping: bool,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            aabb_extension: AABB_EXTENSION,
            allow_sleeping: true,
        }
    }
}
