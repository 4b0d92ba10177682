// Gameplay: the player controller, enemies, shots, game flow and level layout

pub mod enemy;
pub mod level;
pub mod lifecycle;
pub mod player;
pub mod projectile;
pub mod session;
