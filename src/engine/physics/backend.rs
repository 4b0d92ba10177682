// The slice of the physics world the character controller depends on

use super::collision::EntityId;
use glam::Vec2;
use rapier2d::prelude::{ColliderHandle, Group, RigidBodyHandle};

/// Physics operations consumed by gameplay code
///
/// `PhysicsWorld` implements this on top of rapier. Keeping the controller
/// behind this trait lets the controller be driven by a scripted world in
/// tests, and keeps every physics call on the simulation thread.
pub trait PhysicsBackend {
    fn has_body(&self, body: RigidBodyHandle) -> bool;

    fn has_collider(&self, collider: ColliderHandle) -> bool;

    /// Body a collider is attached to, if any
    fn collider_parent(&self, collider: ColliderHandle) -> Option<RigidBodyHandle>;

    fn translation(&self, body: RigidBodyHandle) -> Option<Vec2>;

    fn linear_velocity(&self, body: RigidBodyHandle) -> Option<Vec2>;

    fn set_linear_velocity(&mut self, body: RigidBodyHandle, velocity: Vec2);

    fn set_angular_velocity(&mut self, body: RigidBodyHandle, angvel: f32);

    /// Instantaneous impulse, velocity change scales with the body's mass
    fn apply_impulse(&mut self, body: RigidBodyHandle, impulse: Vec2);

    /// Move a body to `position` without sweeping through the world
    fn teleport(&mut self, body: RigidBodyHandle, position: Vec2);

    /// Enable or disable a collider's collision response
    fn set_collider_enabled(&mut self, collider: ColliderHandle, enabled: bool);

    /// Shrink the collider's bounds by `inset` and sweep them downward by
    /// `distance`. True iff anything in `mask` is hit.
    fn cast_bounds_down(
        &self,
        collider: ColliderHandle,
        inset: Vec2,
        distance: f32,
        mask: Group,
    ) -> bool;

    /// Distinct entities with a collider in `mask` overlapping the circle
    fn overlap_circle(&self, center: Vec2, radius: f32, mask: Group) -> Vec<EntityId>;
}
