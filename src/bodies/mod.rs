mod body;
mod fixture;
mod material;
mod body_type;

pub use self::body::Body;
pub use self::fixture::{Fixture, FixtureDef};
pub use self::material::{mix_friction, mix_restitution, Material};
pub use self::body_type::BodyType;

/// Flags for controlling body behavior
pub mod body_flags {
    use bitflags::bitflags;

    bitflags! {
        /// Flags for the sleep and island state of bodies
        #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
        pub struct BodyFlags: u32 {
            /// Body is awake and takes part in the collide phase
            const AWAKE = 0x01;

            /// Body has been added to an island during the current search
            const ISLAND = 0x02;

            /// Body may fall asleep when at rest
            const AUTO_SLEEP = 0x04;
        }
    }
}
