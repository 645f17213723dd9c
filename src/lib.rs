pub mod math;
pub mod core;
pub mod bodies;
pub mod shapes;
pub mod collision;
pub mod contacts;

/// Re-export common types for easier usage
pub use crate::core::{ContactWorld, ContactConfig, BodyHandle, FixtureHandle, ContactHandle};
pub use crate::bodies::{Body, BodyType, Fixture, FixtureDef, Material};
pub use crate::contacts::{Contact, ContactListener, ContactRegistry};
pub use crate::collision::{Manifold, WorldManifold};
pub use crate::math::Vector2;

/// Error types for the contact layer
pub mod error {
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum PhysicsError {
        #[error("Invalid parameter: {0}")]
        InvalidParameter(String),

        #[error("Resource not found: {0}")]
        ResourceNotFound(String),

        #[error("Internal error: {0}")]
        InternalError(String),
    }
}

/// Result type for contact layer operations
pub type Result<T> = std::result::Result<T, error::PhysicsError>;

/// Crate version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
