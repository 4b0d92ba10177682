// Semantic events for animation and audio collaborators

use super::movement::JumpKind;
use crate::engine::physics::EntityId;
use glam::Vec2;

/// Something happened to the character that presentation code may care about
///
/// The controller only emits these; it never touches animation parameters
/// or audio clips itself.
#[derive(Debug, Clone, PartialEq)]
pub enum CharacterEvent {
    Jumped { kind: JumpKind },
    Landed,
    FacingChanged { facing_right: bool },
    Attacked { hits: Vec<EntityId> },
    /// A shot left the muzzle at `origin`
    Fired { origin: Vec2, facing_right: bool },
    Hurt { amount: i32, health: i32 },
    Died,
    /// Teleported to `position`, invulnerability window started
    RespawnStarted { position: Vec2 },
    /// Invulnerability window over
    Respawned,
    ReachedGoal,
}

/// Receiver for character events. A missing sink is not an error; events
/// simply go unobserved.
pub trait EventSink {
    fn notify(&mut self, event: &CharacterEvent);
}

/// Sink that writes every event to the log
#[derive(Debug, Default)]
pub struct LogEventSink;

impl EventSink for LogEventSink {
    fn notify(&mut self, event: &CharacterEvent) {
        match event {
            CharacterEvent::Jumped { kind } => log::info!("Jumped ({kind:?})"),
            CharacterEvent::Landed => log::debug!("Landed"),
            CharacterEvent::FacingChanged { facing_right } => {
                log::debug!("Facing {}", if *facing_right { "right" } else { "left" });
            }
            CharacterEvent::Attacked { hits } => log::info!("Attacked, hit {hits:?}"),
            CharacterEvent::Fired {
                origin,
                facing_right,
            } => log::info!("Fired from {origin} (facing right: {facing_right})"),
            CharacterEvent::Hurt { amount, health } => {
                log::info!("Hurt for {amount}, {health} health left");
            }
            CharacterEvent::Died => log::info!("Died"),
            CharacterEvent::RespawnStarted { position } => {
                log::info!("Respawn started at {position}");
            }
            CharacterEvent::Respawned => log::info!("Respawned"),
            CharacterEvent::ReachedGoal => log::info!("Reached the goal"),
        }
    }
}

/// Hand every event to every sink, in order
pub fn dispatch(events: &[CharacterEvent], sinks: &mut [&mut dyn EventSink]) {
    for event in events {
        for sink in sinks.iter_mut() {
            sink.notify(event);
        }
    }
}
