// Player character
//
// `PlayerController` owns every piece of per-character state and drives the
// smaller models below it:
// - `GroundProbe`: shape-cast ground check, once per fixed step
// - `MovementState`: coyote time, jump buffering, air-jump budget
// - `CombatResolver`: melee area query against the enemy layers
// - `Health`: clamped health with a one-way death transition
// - `RespawnSequencer`: one respawn in flight at a time
//
// Shots leave the controller as `ShotRequest`s through `take_shots`; the
// caller owns the projectiles.

pub mod combat;
pub mod config;
pub mod controller;
pub mod events;
pub mod ground;
pub mod health;
pub mod movement;
pub mod respawn;

pub use combat::DamageSink;
pub use config::ControllerConfig;
pub use controller::PlayerController;
pub use events::{CharacterEvent, LogEventSink};
pub use health::Health;
pub use movement::MovementPhase;
