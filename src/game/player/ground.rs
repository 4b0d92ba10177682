// Ground probe

use crate::engine::physics::{ColliderHandle, Group, PhysicsBackend};
use glam::Vec2;

/// Shape-cast ground check
///
/// The character's bounds are shrunk by `inset` so walls touching the sides
/// don't count as ground, then swept down by `distance` against the ground
/// layers. Runs once per fixed tick; the caller keeps the result for that tick.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundProbe {
    pub inset: Vec2,
    pub distance: f32,
    pub mask: Group,
}

impl GroundProbe {
    pub fn new(inset: Vec2, distance: f32, mask: Group) -> Self {
        Self {
            inset,
            distance,
            mask,
        }
    }

    pub fn is_grounded<P: PhysicsBackend>(&self, physics: &P, collider: ColliderHandle) -> bool {
        physics.cast_bounds_down(collider, self.inset, self.distance, self.mask)
    }
}
