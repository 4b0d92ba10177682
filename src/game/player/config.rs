// Character controller configuration

use crate::core::error::ConfigError;
use crate::engine::physics::{CollisionLayer, Group};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Every tunable of the character controller
///
/// Missing fields in a config file fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    // Movement
    /// Horizontal speed at full axis deflection (units/second)
    pub move_speed: f32,
    /// Upward impulse applied on every jump
    pub jump_impulse: f32,
    /// Extra jumps available while airborne (0 = no double jump)
    pub max_air_jumps: u32,
    /// Grace period after leaving ground during which a jump still counts as grounded
    pub coyote_time: f32,
    /// How long an early jump press is remembered
    pub jump_buffer_time: f32,

    // Ground probe
    /// How far the shrunk bounds are swept downward
    pub ground_probe_distance: f32,
    /// How much the bounds are shrunk on each axis before sweeping
    pub ground_probe_inset: Vec2,

    // Combat
    /// Radius of the melee hit area
    pub attack_range: f32,
    /// Damage dealt to each enemy caught by an attack
    pub attack_damage: i32,
    /// Centre of the hit area relative to the body, for a right-facing character
    pub attack_offset: Vec2,
    /// Where shots appear relative to the body, for a right-facing character
    pub shot_offset: Vec2,
    /// Shot speed along the facing direction (units/second)
    pub shot_speed: f32,
    /// Seconds a shot flies before it is removed
    pub shot_lifetime: f32,
    /// Damage a shot deals to the enemy it hits
    pub shot_damage: i32,

    // Health
    pub max_health: i32,
    /// Delay between death and the game-over report
    pub death_delay: f32,

    // Respawn
    /// Falling below this height sends the character back
    pub fall_y_threshold: f32,
    /// Collision is disabled this long after a respawn
    pub respawn_invulnerability_time: f32,
    /// Where to respawn. Without one, the character is dropped back at
    /// its current x and `respawn_fallback_height`.
    pub respawn_checkpoint: Option<Vec2>,
    pub respawn_fallback_height: f32,

    // Query layers
    #[serde(skip, default = "default_ground_layers")]
    pub ground_layers: Vec<CollisionLayer>,
    #[serde(skip, default = "default_enemy_layers")]
    pub enemy_layers: Vec<CollisionLayer>,
}

fn default_ground_layers() -> Vec<CollisionLayer> {
    vec![CollisionLayer::Ground]
}

fn default_enemy_layers() -> Vec<CollisionLayer> {
    vec![CollisionLayer::Enemy]
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            move_speed: 8.0,
            jump_impulse: 14.0,
            max_air_jumps: 0,
            coyote_time: 0.1,
            jump_buffer_time: 0.1,

            ground_probe_distance: 0.08,
            ground_probe_inset: Vec2::new(0.05, 0.1),

            attack_range: 0.6,
            attack_damage: 1,
            attack_offset: Vec2::new(0.8, 0.0),
            shot_offset: Vec2::new(0.35, 0.02),
            shot_speed: 20.0,
            shot_lifetime: 4.0,
            shot_damage: 1,

            max_health: 5,
            death_delay: 1.0,

            fall_y_threshold: -10.0,
            respawn_invulnerability_time: 0.2,
            respawn_checkpoint: None,
            respawn_fallback_height: 0.0,

            ground_layers: default_ground_layers(),
            enemy_layers: default_enemy_layers(),
        }
    }
}

impl ControllerConfig {
    /// Parse a RON document, then validate it
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a RON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&source)
    }

    /// Reject values no character could be built from
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_health <= 0 {
            return Err(ConfigError::Invalid(format!(
                "max_health must be positive, got {}",
                self.max_health
            )));
        }

        let non_negative = [
            ("move_speed", self.move_speed),
            ("jump_impulse", self.jump_impulse),
            ("coyote_time", self.coyote_time),
            ("jump_buffer_time", self.jump_buffer_time),
            ("ground_probe_distance", self.ground_probe_distance),
            ("attack_range", self.attack_range),
            ("shot_speed", self.shot_speed),
            ("shot_lifetime", self.shot_lifetime),
            ("death_delay", self.death_delay),
            ("respawn_invulnerability_time", self.respawn_invulnerability_time),
        ];
        for (name, value) in non_negative {
            if value.is_nan() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be zero or positive, got {value}"
                )));
            }
        }

        for (name, value) in [
            ("attack_damage", self.attack_damage),
            ("shot_damage", self.shot_damage),
        ] {
            if value < 0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be zero or positive, got {value}"
                )));
            }
        }

        Ok(())
    }

    pub fn ground_mask(&self) -> Group {
        CollisionLayer::mask(&self.ground_layers)
    }

    pub fn enemy_mask(&self) -> Group {
        CollisionLayer::mask(&self.enemy_layers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ControllerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.move_speed, 8.0);
        assert_eq!(config.max_air_jumps, 0);
        assert_eq!(config.respawn_checkpoint, None);
    }

    #[test]
    fn test_partial_ron_keeps_defaults() {
        let config = ControllerConfig::from_ron_str("(max_air_jumps: 1, max_health: 10)").unwrap();
        assert_eq!(config.max_air_jumps, 1);
        assert_eq!(config.max_health, 10);
        assert_eq!(config.jump_impulse, 14.0);
        assert_eq!(config.ground_layers, vec![CollisionLayer::Ground]);
    }

    #[test]
    fn test_checkpoint_from_ron() {
        let config =
            ControllerConfig::from_ron_str("(respawn_checkpoint: Some((2.0, 3.5)))").unwrap();
        assert_eq!(config.respawn_checkpoint, Some(Vec2::new(2.0, 3.5)));
    }

    #[test]
    fn test_invalid_max_health_rejected() {
        let result = ControllerConfig::from_ron_str("(max_health: 0)");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_negative_duration_rejected() {
        let result = ControllerConfig::from_ron_str("(coyote_time: -0.5)");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_negative_shot_damage_rejected() {
        let result = ControllerConfig::from_ron_str("(shot_damage: -1)");
        assert!(matches!(result, Err(ConfigError::Invalid(msg)) if msg.contains("shot_damage")));
    }

    #[test]
    fn test_shot_defaults() {
        let config = ControllerConfig::default();
        assert_eq!(config.shot_speed, 20.0);
        assert_eq!(config.shot_lifetime, 4.0);
    }

    #[test]
    fn test_malformed_ron_is_parse_error() {
        let result = ControllerConfig::from_ron_str("(move_speed: fast)");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = ControllerConfig::load("does/not/exist.ron");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_masks() {
        let config = ControllerConfig::default();
        assert_eq!(config.ground_mask(), CollisionLayer::Ground.group());
        assert_eq!(config.enemy_mask(), CollisionLayer::Enemy.group());
    }
}
