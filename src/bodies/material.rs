#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Surface properties of a fixture
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Material {
    /// Coulomb friction coefficient, usually in [0, 1]
    pub friction: f32,

    /// Coefficient of restitution (bounciness), usually in [0, 1]
    pub restitution: f32,

    /// Density in kg/m^2
    pub density: f32,
}

impl Material {
    /// Creates a new material with the specified properties
    pub fn new(density: f32, friction: f32, restitution: f32) -> Self {
        Self {
            density,
            friction,
            restitution,
        }
    }

    /// Creates a material for ice (almost no friction)
    pub fn ice() -> Self {
        Self::new(900.0, 0.02, 0.1)
    }

    /// Creates a material for rubber (grippy and bouncy)
    pub fn rubber() -> Self {
        Self::new(1200.0, 0.9, 0.8)
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            density: 0.0,
            friction: 0.2,
            restitution: 0.0,
        }
    }
}

/// Friction mixing law. The geometric mean lets either surface drive the
/// pair's friction towards zero.
#[inline]
pub fn mix_friction(friction1: f32, friction2: f32) -> f32 {
    (friction1 * friction2).sqrt()
}

/// Restitution mixing law. Either surface can make the pair bounce.
#[inline]
pub fn mix_restitution(restitution1: f32, restitution2: f32) -> f32 {
    restitution1.max(restitution2)
}
