use rapier2d::prelude::*;
use std::sync::{Arc, Mutex};

/// Entity identifier attached to bodies in the physics world
pub type EntityId = u64;

/// Collision layers for filtering contacts and queries
///
/// The ground probe and the melee query both filter on these, so the
/// character's own shape never shows up in either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionLayer {
    /// Interacts with everything
    Default = 0b0000_0001,

    /// The controlled character
    Player = 0b0000_0010,

    /// Walkable ground and platforms
    Ground = 0b0000_0100,

    /// Enemies that can be hit by melee attacks
    Enemy = 0b0000_1000,

    /// Damaging regions (spikes)
    Hazard = 0b0001_0000,

    /// Regions that send the character back to a checkpoint
    KillZone = 0b0010_0000,

    /// Level completion region
    Goal = 0b0100_0000,

    /// Generic trigger zones
    Sensor = 0b1000_0000,

    /// Shots fired by the character
    Projectile = 0b1_0000_0000,
}

impl CollisionLayer {
    /// Single-layer group
    pub fn group(self) -> Group {
        Group::from_bits_truncate(self as u32)
    }

    /// Union of several layers, for query masks
    pub fn mask(layers: &[CollisionLayer]) -> Group {
        layers
            .iter()
            .fold(Group::empty(), |acc, layer| acc | layer.group())
    }

    /// Convert to rapier2d's InteractionGroups
    pub fn to_interaction_groups(self) -> InteractionGroups {
        use CollisionLayer::*;

        let filter = match self {
            // The character touches the level and every trigger, never itself
            Player => Self::mask(&[Ground, Enemy, Hazard, KillZone, Goal, Sensor]),

            Ground => Self::mask(&[Player, Enemy, Ground, Projectile]),

            Enemy => Self::mask(&[Ground, Player, Projectile]),

            // Shots pass through the character that fired them
            Projectile => Self::mask(&[Ground, Enemy]),

            // Trigger regions only care about the character
            Hazard | KillZone | Goal => Player.group(),

            Sensor | Default => Group::ALL,
        };

        InteractionGroups::new(self.group(), filter)
    }
}

/// What a collider represents to gameplay code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColliderTag {
    Ground,
    Enemy(EntityId),
    KillZone,
    Goal,
    Hazard { damage: i32 },
}

/// Contact notification copied out of the physics step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionEvent {
    /// Two colliders started touching (or a sensor started intersecting)
    Started {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
    },

    /// Two colliders stopped touching
    Stopped {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
    },
}

impl CollisionEvent {
    /// If this is a start event involving `collider`, the other collider
    pub fn started_with(&self, collider: ColliderHandle) -> Option<ColliderHandle> {
        match *self {
            CollisionEvent::Started {
                collider1,
                collider2,
            } if collider1 == collider => Some(collider2),
            CollisionEvent::Started {
                collider1,
                collider2,
            } if collider2 == collider => Some(collider1),
            _ => None,
        }
    }
}

/// Queue for collision events produced during a physics step
///
/// rapier may report events from its solver threads, so they land behind a
/// mutex and are copied back out on the simulation thread.
pub struct CollisionEventQueue {
    events: Arc<Mutex<Vec<CollisionEvent>>>,
}

impl CollisionEventQueue {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::with_capacity(32))),
        }
    }

    /// Clear all events (call at start of physics step)
    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }

    /// Snapshot of the events from the last step
    pub fn events(&self) -> Vec<CollisionEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub(crate) fn push(&self, event: CollisionEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl Default for CollisionEventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for CollisionEventQueue {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: rapier2d::prelude::CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        match event {
            rapier2d::prelude::CollisionEvent::Started(h1, h2, _flags) => {
                self.push(CollisionEvent::Started {
                    collider1: h1,
                    collider2: h2,
                });
            }
            rapier2d::prelude::CollisionEvent::Stopped(h1, h2, _flags) => {
                self.push(CollisionEvent::Stopped {
                    collider1: h1,
                    collider2: h2,
                });
            }
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_LAYERS: [CollisionLayer; 9] = [
        CollisionLayer::Default,
        CollisionLayer::Player,
        CollisionLayer::Ground,
        CollisionLayer::Enemy,
        CollisionLayer::Hazard,
        CollisionLayer::KillZone,
        CollisionLayer::Goal,
        CollisionLayer::Sensor,
        CollisionLayer::Projectile,
    ];

    #[test]
    fn test_layer_bits_unique() {
        for (i, a) in ALL_LAYERS.iter().enumerate() {
            for (j, b) in ALL_LAYERS.iter().enumerate() {
                if i != j {
                    assert_ne!(*a as u32, *b as u32, "Layers must have unique bits");
                }
            }
        }
    }

    #[test]
    fn test_player_ignores_player() {
        let groups = CollisionLayer::Player.to_interaction_groups();
        assert!(!groups.filter.contains(groups.memberships));
    }

    #[test]
    fn test_triggers_only_see_player() {
        for layer in [
            CollisionLayer::Hazard,
            CollisionLayer::KillZone,
            CollisionLayer::Goal,
        ] {
            let groups = layer.to_interaction_groups();
            assert_eq!(groups.filter, CollisionLayer::Player.group());
        }
    }

    #[test]
    fn test_projectile_hits_level_and_enemies_only() {
        let shot = CollisionLayer::Projectile.to_interaction_groups();
        for layer in [CollisionLayer::Ground, CollisionLayer::Enemy] {
            assert!(shot.test(layer.to_interaction_groups()), "{layer:?}");
        }
        for layer in [
            CollisionLayer::Player,
            CollisionLayer::Hazard,
            CollisionLayer::Goal,
            CollisionLayer::Projectile,
        ] {
            assert!(!shot.test(layer.to_interaction_groups()), "{layer:?}");
        }
    }

    #[test]
    fn test_mask_union() {
        let mask = CollisionLayer::mask(&[CollisionLayer::Ground, CollisionLayer::Enemy]);
        assert!(mask.contains(CollisionLayer::Ground.group()));
        assert!(mask.contains(CollisionLayer::Enemy.group()));
        assert!(!mask.contains(CollisionLayer::Player.group()));
    }

    #[test]
    fn test_started_with() {
        let a = ColliderHandle::from_raw_parts(1, 0);
        let b = ColliderHandle::from_raw_parts(2, 0);
        let c = ColliderHandle::from_raw_parts(3, 0);

        let started = CollisionEvent::Started {
            collider1: a,
            collider2: b,
        };
        assert_eq!(started.started_with(a), Some(b));
        assert_eq!(started.started_with(b), Some(a));
        assert_eq!(started.started_with(c), None);

        let stopped = CollisionEvent::Stopped {
            collider1: a,
            collider2: b,
        };
        assert_eq!(stopped.started_with(a), None);
    }

    #[test]
    fn test_event_queue() {
        let queue = CollisionEventQueue::new();
        let a = ColliderHandle::from_raw_parts(1, 0);
        let b = ColliderHandle::from_raw_parts(2, 0);
        queue.push(CollisionEvent::Started {
            collider1: a,
            collider2: b,
        });
        assert_eq!(queue.events().len(), 1);
        queue.clear();
        assert!(queue.events().is_empty());
    }
}
