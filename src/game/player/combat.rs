// Melee combat resolver

use crate::core::math::facing_offset;
use crate::engine::physics::{EntityId, Group, PhysicsBackend};
use glam::Vec2;

/// Anything that can take damage on behalf of an entity found by an attack
pub trait DamageSink {
    fn apply_damage(&mut self, entity: EntityId, amount: i32);
}

/// Attack geometry and damage
#[derive(Debug, Clone, PartialEq)]
pub struct CombatResolver {
    /// Radius of the hit circle
    pub range: f32,
    pub damage: i32,
    /// Circle centre relative to the attacker when facing right
    pub offset: Vec2,
    pub enemy_mask: Group,
}

/// What one swing hit
#[derive(Debug, Clone, PartialEq)]
pub struct AttackReport {
    pub center: Vec2,
    pub hits: Vec<EntityId>,
}

impl CombatResolver {
    /// Centre of the hit circle for an attacker at `origin`
    pub fn attack_point(&self, origin: Vec2, facing_right: bool) -> Vec2 {
        origin + facing_offset(self.offset, facing_right)
    }

    /// Query the enemy layers around the attack point and damage each entity once
    ///
    /// The attacker never hits itself: its own layer is not in the enemy mask.
    pub fn resolve<P: PhysicsBackend>(
        &self,
        physics: &P,
        origin: Vec2,
        facing_right: bool,
        sink: &mut dyn DamageSink,
    ) -> AttackReport {
        let center = self.attack_point(origin, facing_right);
        let hits = physics.overlap_circle(center, self.range, self.enemy_mask);

        for &entity in &hits {
            log::debug!("Attack hit entity {entity} for {} damage", self.damage);
            sink.apply_damage(entity, self.damage);
        }

        AttackReport { center, hits }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::{presets, CollisionLayer, PhysicsWorld};
    use approx::assert_relative_eq;

    #[derive(Default)]
    struct RecordingSink {
        hits: Vec<(EntityId, i32)>,
    }

    impl DamageSink for RecordingSink {
        fn apply_damage(&mut self, entity: EntityId, amount: i32) {
            self.hits.push((entity, amount));
        }
    }

    fn resolver() -> CombatResolver {
        CombatResolver {
            range: 0.6,
            damage: 2,
            offset: Vec2::new(0.8, 0.0),
            enemy_mask: CollisionLayer::Enemy.group(),
        }
    }

    fn world_with_enemy(x: f32, id: EntityId) -> PhysicsWorld {
        let mut world = PhysicsWorld::new();
        let body = world.add_rigid_body(presets::enemy_body(x, 0.0));
        world.add_collider(presets::enemy_collider(0.5, 0.5), body);
        world.set_entity_mapping(body, id);
        world.refresh_queries();
        world
    }

    #[test]
    fn test_attack_point_mirrors_with_facing() {
        let r = resolver();
        let right = r.attack_point(Vec2::ZERO, true);
        assert_relative_eq!(right.x, 0.8);
        assert_relative_eq!(right.y, 0.0);

        let left = r.attack_point(Vec2::new(1.0, 2.0), false);
        assert_relative_eq!(left.x, 0.2);
        assert_relative_eq!(left.y, 2.0);
    }

    #[test]
    fn test_hits_enemy_in_front() {
        let world = world_with_enemy(1.0, 42);
        let mut sink = RecordingSink::default();

        let report = resolver().resolve(&world, Vec2::ZERO, true, &mut sink);

        assert_eq!(report.hits, vec![42]);
        assert_eq!(sink.hits, vec![(42, 2)]);
    }

    #[test]
    fn test_misses_enemy_behind() {
        let world = world_with_enemy(1.0, 42);
        let mut sink = RecordingSink::default();

        let report = resolver().resolve(&world, Vec2::ZERO, false, &mut sink);

        assert!(report.hits.is_empty());
        assert!(sink.hits.is_empty());
    }

    #[test]
    fn test_attacker_not_hit() {
        let mut world = PhysicsWorld::new();
        let body = world.add_rigid_body(presets::player_body(0.8, 0.0));
        world.add_collider(presets::player_collider(1.0, 2.0), body);
        world.set_entity_mapping(body, 1);
        world.refresh_queries();

        let mut sink = RecordingSink::default();
        let report = resolver().resolve(&world, Vec2::ZERO, true, &mut sink);
        assert!(report.hits.is_empty());
    }
}
