// Shots fired by the character
//
// A shot is a kinematic sensor flying at a constant velocity. It passes
// through the character that fired it, damages any enemy it enters, and is
// removed on the first thing it touches or when its lifetime runs out.

use crate::engine::physics::{
    presets, ColliderHandle, ColliderTag, EntityId, PhysicsWorld, RigidBodyHandle,
};
use crate::engine::timers::DeferredQueue;
use crate::game::player::DamageSink;
use glam::Vec2;

pub const PROJECTILE_RADIUS: f32 = 0.15;

/// A shot the character wants fired
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotRequest {
    pub origin: Vec2,
    pub velocity: Vec2,
    /// Seconds before the shot is removed on its own
    pub lifetime: f32,
    pub damage: i32,
}

/// Why a shot left the world
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileEvent {
    /// Touched something. `enemy` is set when that something was an enemy.
    Hit {
        id: EntityId,
        enemy: Option<EntityId>,
    },
    Expired {
        id: EntityId,
    },
}

#[derive(Debug)]
struct Projectile {
    id: EntityId,
    body: RigidBodyHandle,
    collider: ColliderHandle,
    damage: i32,
}

/// Every shot currently in flight
#[derive(Debug, Default)]
pub struct ProjectileRoster {
    projectiles: Vec<Projectile>,
    next_id: EntityId,
    expiring: DeferredQueue<EntityId>,
    events: Vec<ProjectileEvent>,
}

impl ProjectileRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a shot into the physics world and start its lifetime
    pub fn spawn(&mut self, physics: &mut PhysicsWorld, shot: ShotRequest) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;

        let body = physics.add_rigid_body(presets::projectile_body(
            shot.origin.x,
            shot.origin.y,
            shot.velocity.x,
            shot.velocity.y,
        ));
        let collider = physics.add_collider(presets::projectile_collider(PROJECTILE_RADIUS), body);

        self.expiring.schedule(shot.lifetime, id);
        self.projectiles.push(Projectile {
            id,
            body,
            collider,
            damage: shot.damage,
        });
        log::debug!("Shot {id} fired from {} at {}", shot.origin, shot.velocity);

        id
    }

    pub fn count(&self) -> usize {
        self.projectiles.len()
    }

    /// Resolve what each shot touched during the last physics step, then
    /// remove the ones whose lifetime ran out
    pub fn update(&mut self, dt: f32, physics: &mut PhysicsWorld, enemies: &mut dyn DamageSink) {
        let mut i = 0;
        while i < self.projectiles.len() {
            let touched = physics.triggers_for(self.projectiles[i].collider);
            if touched.is_empty() {
                i += 1;
                continue;
            }

            let shot = self.projectiles.remove(i);
            let mut enemy = None;
            for tag in touched {
                if let ColliderTag::Enemy(target) = tag {
                    enemies.apply_damage(target, shot.damage);
                    enemy.get_or_insert(target);
                }
            }
            physics.remove_rigid_body(shot.body);
            self.events.push(ProjectileEvent::Hit { id: shot.id, enemy });
        }

        // Shots that already hit something are no longer in the list
        for id in self.expiring.advance(dt) {
            if let Some(pos) = self.projectiles.iter().position(|p| p.id == id) {
                let shot = self.projectiles.remove(pos);
                physics.remove_rigid_body(shot.body);
                self.events.push(ProjectileEvent::Expired { id });
            }
        }
    }

    /// Take every event emitted since the last call
    pub fn drain_events(&mut self) -> Vec<ProjectileEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::PhysicsBackend;
    use crate::game::enemy::{EnemyEvent, EnemyRoster};

    const DT: f32 = 1.0 / 60.0;

    fn shot(origin: Vec2, velocity: Vec2) -> ShotRequest {
        ShotRequest {
            origin,
            velocity,
            lifetime: 4.0,
            damage: 1,
        }
    }

    fn run(
        steps: usize,
        physics: &mut PhysicsWorld,
        shots: &mut ProjectileRoster,
        enemies: &mut EnemyRoster,
    ) {
        for _ in 0..steps {
            physics.step();
            shots.update(DT, physics, enemies);
        }
    }

    #[test]
    fn test_shot_flies_at_launch_velocity() {
        let mut physics = PhysicsWorld::new();
        let mut shots = ProjectileRoster::new();
        let mut enemies = EnemyRoster::new(1);

        shots.spawn(&mut physics, shot(Vec2::ZERO, Vec2::new(20.0, 0.0)));
        run(30, &mut physics, &mut shots, &mut enemies);

        let body = shots.projectiles[0].body;
        let position = physics.translation(body).unwrap();
        assert!((position.x - 10.0).abs() < 0.1, "x = {}", position.x);
        assert_eq!(position.y, 0.0);
    }

    #[test]
    fn test_shot_damages_enemy_and_disappears() {
        let mut physics = PhysicsWorld::new();
        let mut shots = ProjectileRoster::new();
        let mut enemies = EnemyRoster::new(1);
        let enemy = enemies.spawn(&mut physics, 3.0, 0.0, 3);

        let id = shots.spawn(&mut physics, shot(Vec2::ZERO, Vec2::new(20.0, 0.0)));
        run(20, &mut physics, &mut shots, &mut enemies);

        assert_eq!(shots.count(), 0);
        assert_eq!(
            enemies.drain_events(),
            vec![EnemyEvent::Hurt {
                id: enemy,
                health: 2
            }]
        );
        assert_eq!(
            shots.drain_events(),
            vec![ProjectileEvent::Hit {
                id,
                enemy: Some(enemy)
            }]
        );
    }

    #[test]
    fn test_shot_removed_by_level_geometry() {
        let mut physics = PhysicsWorld::new();
        let mut shots = ProjectileRoster::new();
        let mut enemies = EnemyRoster::new(1);
        let wall = physics.add_rigid_body(presets::static_body(-2.0, 0.0));
        physics.add_tagged_collider(presets::ground_collider(1.0, 4.0), wall, ColliderTag::Ground);

        let id = shots.spawn(&mut physics, shot(Vec2::ZERO, Vec2::new(-20.0, 0.0)));
        run(20, &mut physics, &mut shots, &mut enemies);

        assert_eq!(shots.count(), 0);
        assert_eq!(
            shots.drain_events(),
            vec![ProjectileEvent::Hit { id, enemy: None }]
        );
    }

    #[test]
    fn test_shot_passes_through_player() {
        let mut physics = PhysicsWorld::new();
        let mut shots = ProjectileRoster::new();
        let mut enemies = EnemyRoster::new(1);
        let player = physics.add_rigid_body(presets::player_body(0.0, 0.0));
        physics.add_collider(presets::player_collider(0.8, 1.6), player);

        shots.spawn(&mut physics, shot(Vec2::new(0.35, 0.02), Vec2::new(20.0, 0.0)));
        run(5, &mut physics, &mut shots, &mut enemies);

        assert_eq!(shots.count(), 1);
        assert!(shots.drain_events().is_empty());
    }

    #[test]
    fn test_shot_expires_after_lifetime() {
        let mut physics = PhysicsWorld::new();
        let mut shots = ProjectileRoster::new();
        let mut enemies = EnemyRoster::new(1);

        let id = shots.spawn(
            &mut physics,
            ShotRequest {
                lifetime: 0.1,
                ..shot(Vec2::ZERO, Vec2::new(20.0, 0.0))
            },
        );
        let body = shots.projectiles[0].body;

        run(5, &mut physics, &mut shots, &mut enemies);
        assert_eq!(shots.count(), 1);

        run(2, &mut physics, &mut shots, &mut enemies);
        assert_eq!(shots.count(), 0);
        assert!(!physics.has_body(body));
        assert_eq!(shots.drain_events(), vec![ProjectileEvent::Expired { id }]);
    }
}
