// Game session: owns the simulation clock and receives game-flow events

use crate::engine::clock::SimulationClock;
use crate::game::lifecycle::GameFlow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Paused,
    GameOver,
    Won,
}

impl SessionState {
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::GameOver | Self::Won)
    }
}

/// Top-level game flow
///
/// Pausing stops the clock, which stops every fixed-step consumer at once.
/// Game over and level won stop it too and can only be left through `retry`.
#[derive(Debug)]
pub struct GameSession {
    clock: SimulationClock,
    state: SessionState,
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            clock: SimulationClock::new(),
            state: SessionState::Running,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut SimulationClock {
        &mut self.clock
    }

    /// Pause or unpause. Ignored once the session is finished.
    pub fn toggle_pause(&mut self) {
        match self.state {
            SessionState::Running => {
                self.clock.pause();
                self.state = SessionState::Paused;
            }
            SessionState::Paused => {
                self.clock.resume();
                self.state = SessionState::Running;
            }
            SessionState::GameOver | SessionState::Won => {
                log::debug!("Pause toggle ignored, session is {:?}", self.state);
            }
        }
    }

    /// Back to running; the caller rebuilds the level
    pub fn retry(&mut self) {
        log::info!("Retrying level");
        self.state = SessionState::Running;
        self.clock.resume();
    }

    fn finish(&mut self, state: SessionState) {
        if self.state.is_finished() {
            return;
        }
        self.state = state;
        self.clock.pause();
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameFlow for GameSession {
    fn on_game_over(&mut self) {
        log::info!("Game over");
        self.finish(SessionState::GameOver);
    }

    fn on_level_won(&mut self) {
        log::info!("Level won");
        self.finish(SessionState::Won);
    }
}
