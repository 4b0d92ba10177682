// Respawn sequencer

use glam::Vec2;

/// Respawn sub-state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RespawnPhase {
    #[default]
    Idle,
    /// Teleported, collision disabled until the invulnerability window ends
    Respawning,
}

/// At most one respawn in flight
///
/// The sequencer only tracks the phase. The controller performs the
/// teleport and schedules the end of the invulnerability window against the
/// simulation clock.
#[derive(Debug, Clone, Default)]
pub struct RespawnSequencer {
    phase: RespawnPhase,
    completed: u32,
}

impl RespawnSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_respawning(&self) -> bool {
        self.phase == RespawnPhase::Respawning
    }

    /// Enter `Respawning`. Returns false (and changes nothing) if a respawn
    /// is already in flight.
    pub fn try_begin(&mut self) -> bool {
        if self.is_respawning() {
            return false;
        }
        self.phase = RespawnPhase::Respawning;
        true
    }

    /// Return to `Idle`. Returns false if no respawn was in flight.
    pub fn complete(&mut self) -> bool {
        if !self.is_respawning() {
            return false;
        }
        self.phase = RespawnPhase::Idle;
        self.completed += 1;
        true
    }

    /// Respawns completed so far
    pub fn completed(&self) -> u32 {
        self.completed
    }
}

/// Where a respawn puts the character: the checkpoint if one is set,
/// otherwise straight up (or down) to `fallback_height` at the current x
pub fn respawn_target(checkpoint: Option<Vec2>, current: Vec2, fallback_height: f32) -> Vec2 {
    checkpoint.unwrap_or(Vec2::new(current.x, fallback_height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_idle() {
        let seq = RespawnSequencer::new();
        assert_eq!(seq.phase, RespawnPhase::Idle);
        assert!(!seq.is_respawning());
    }

    #[test]
    fn test_begin_and_complete() {
        let mut seq = RespawnSequencer::new();
        assert!(seq.try_begin());
        assert!(seq.is_respawning());
        assert!(seq.complete());
        assert_eq!(seq.phase, RespawnPhase::Idle);
        assert_eq!(seq.completed(), 1);
    }

    #[test]
    fn test_reentrant_begin_dropped() {
        let mut seq = RespawnSequencer::new();
        assert!(seq.try_begin());
        assert!(!seq.try_begin());
        assert!(seq.is_respawning());
        assert!(seq.complete());
        assert_eq!(seq.completed(), 1);
    }

    #[test]
    fn test_complete_when_idle_is_noop() {
        let mut seq = RespawnSequencer::new();
        assert!(!seq.complete());
        assert_eq!(seq.completed(), 0);
    }

    #[test]
    fn test_respawn_target() {
        let current = Vec2::new(12.0, -15.0);
        assert_eq!(
            respawn_target(Some(Vec2::new(1.0, 2.0)), current, 0.0),
            Vec2::new(1.0, 2.0)
        );
        assert_eq!(respawn_target(None, current, 0.0), Vec2::new(12.0, 0.0));
    }
}
