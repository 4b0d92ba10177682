// Enemies: independent health models that receive melee damage

use crate::engine::physics::{presets, ColliderTag, EntityId, PhysicsWorld, RigidBodyHandle};
use crate::engine::timers::DeferredQueue;
use crate::game::player::{DamageSink, Health};

/// Time an enemy stays in the world after its last hit point is gone
pub const DEATH_FLASH_DELAY: f32 = 0.1;

pub const ENEMY_WIDTH: f32 = 0.8;
pub const ENEMY_HEIGHT: f32 = 0.8;

/// Something happened to an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyEvent {
    Hurt { id: EntityId, health: i32 },
    Died { id: EntityId },
}

#[derive(Debug)]
pub struct Enemy {
    pub id: EntityId,
    pub body: RigidBodyHandle,
    pub health: Health,
}

/// Every live enemy in the level
#[derive(Debug, Default)]
pub struct EnemyRoster {
    enemies: Vec<Enemy>,
    next_id: EntityId,
    dying: DeferredQueue<EntityId>,
    events: Vec<EnemyEvent>,
}

impl EnemyRoster {
    /// Ids are handed out from `first_id` upward
    pub fn new(first_id: EntityId) -> Self {
        Self {
            next_id: first_id,
            ..Self::default()
        }
    }

    /// Create an enemy body in the physics world
    pub fn spawn(
        &mut self,
        physics: &mut PhysicsWorld,
        x: f32,
        y: f32,
        max_health: i32,
    ) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;

        let body = physics.add_rigid_body(presets::enemy_body(x, y));
        physics.add_tagged_collider(
            presets::enemy_collider(ENEMY_WIDTH, ENEMY_HEIGHT),
            body,
            ColliderTag::Enemy(id),
        );
        physics.set_entity_mapping(body, id);

        self.enemies.push(Enemy {
            id,
            body,
            health: Health::new(max_health),
        });
        log::debug!("Spawned enemy {id} at ({x}, {y})");

        id
    }

    pub fn count(&self) -> usize {
        self.enemies.len()
    }

    pub fn alive_count(&self) -> usize {
        self.enemies.iter().filter(|e| e.health.is_alive()).count()
    }

    /// Advance hit-flash timers and remove enemies whose delay ran out.
    /// Returns the ids removed this step.
    pub fn update(&mut self, dt: f32, physics: &mut PhysicsWorld) -> Vec<EntityId> {
        let removed = self.dying.advance(dt);

        for &id in &removed {
            if let Some(pos) = self.enemies.iter().position(|e| e.id == id) {
                let enemy = self.enemies.remove(pos);
                physics.remove_rigid_body(enemy.body);
                log::info!("Enemy {id} died");
                self.events.push(EnemyEvent::Died { id });
            }
        }

        removed
    }

    /// Take every event emitted since the last call
    pub fn drain_events(&mut self) -> Vec<EnemyEvent> {
        std::mem::take(&mut self.events)
    }
}

impl DamageSink for EnemyRoster {
    fn apply_damage(&mut self, entity: EntityId, amount: i32) {
        let Some(enemy) = self.enemies.iter_mut().find(|e| e.id == entity) else {
            log::debug!("Damage for unknown enemy {entity} ignored");
            return;
        };
        if !enemy.health.is_alive() {
            return;
        }

        let outcome = enemy.health.take_damage(amount);
        self.events.push(EnemyEvent::Hurt {
            id: entity,
            health: outcome.current,
        });

        if outcome.died {
            self.dying.schedule(DEATH_FLASH_DELAY, entity);
        }
    }
}
