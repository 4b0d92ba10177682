// Physics system using rapier2d

pub mod backend;
pub mod body;
mod collision;
mod world;

pub use backend::PhysicsBackend;
pub use body::{presets, ColliderHandle, RigidBodyHandle};
pub use collision::{ColliderTag, CollisionLayer, EntityId};
pub use world::PhysicsWorld;

// Re-export commonly used rapier types for convenience
pub use rapier2d::prelude::Group;
