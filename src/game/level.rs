// Demo level layout

use crate::engine::physics::{
    presets, ColliderHandle, ColliderTag, CollisionLayer, PhysicsWorld, RigidBodyHandle,
};
use crate::game::enemy::EnemyRoster;
use glam::Vec2;

pub const PLAYER_WIDTH: f32 = 0.8;
pub const PLAYER_HEIGHT: f32 = 1.6;

pub const SPIKE_DAMAGE: i32 = 1;
pub const ENEMY_HEALTH: i32 = 3;

/// Handles the frame loop needs after building a level
#[derive(Debug, Clone)]
pub struct Level {
    pub player_body: RigidBodyHandle,
    pub player_collider: ColliderHandle,
    /// Mid-level checkpoint, activated once the player passes its x
    pub checkpoint: Vec2,
}

fn platform(physics: &mut PhysicsWorld, center: Vec2, size: Vec2) {
    let body = physics.add_rigid_body(presets::static_body(center.x, center.y));
    physics.add_tagged_collider(
        presets::ground_collider(size.x, size.y),
        body,
        ColliderTag::Ground,
    );
}

fn trigger(
    physics: &mut PhysicsWorld,
    center: Vec2,
    size: Vec2,
    layer: CollisionLayer,
    tag: ColliderTag,
) {
    let body = physics.add_rigid_body(presets::static_body(center.x, center.y));
    physics.add_tagged_collider(presets::trigger_collider(size.x, size.y, layer), body, tag);
}

/// Ground, a gap over a kill zone, spikes, two enemies and a goal
pub fn build_demo_level(physics: &mut PhysicsWorld, enemies: &mut EnemyRoster) -> Level {
    // Floor segments, top surface at y = 0
    platform(physics, Vec2::new(0.0, -0.5), Vec2::new(20.0, 1.0));
    platform(physics, Vec2::new(24.0, -0.5), Vec2::new(16.0, 1.0));
    platform(physics, Vec2::new(14.0, 2.5), Vec2::new(3.0, 0.5));

    // Catches anything that falls through the gap between the floors
    trigger(
        physics,
        Vec2::new(12.0, -8.0),
        Vec2::new(60.0, 2.0),
        CollisionLayer::KillZone,
        ColliderTag::KillZone,
    );

    trigger(
        physics,
        Vec2::new(6.0, 0.25),
        Vec2::new(1.0, 0.5),
        CollisionLayer::Hazard,
        ColliderTag::Hazard {
            damage: SPIKE_DAMAGE,
        },
    );

    trigger(
        physics,
        Vec2::new(30.0, 1.0),
        Vec2::new(1.0, 2.0),
        CollisionLayer::Goal,
        ColliderTag::Goal,
    );

    enemies.spawn(physics, 4.0, 0.4, ENEMY_HEALTH);
    enemies.spawn(physics, 22.0, 0.4, ENEMY_HEALTH);

    let spawn = Vec2::new(-8.0, PLAYER_HEIGHT / 2.0);
    let player_body = physics.add_rigid_body(presets::player_body(spawn.x, spawn.y));
    let player_collider =
        physics.add_collider(presets::player_collider(PLAYER_WIDTH, PLAYER_HEIGHT), player_body);

    physics.refresh_queries();
    log::info!("Demo level built");

    Level {
        player_body,
        player_collider,
        checkpoint: Vec2::new(18.0, PLAYER_HEIGHT / 2.0),
    }
}
