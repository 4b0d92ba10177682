// Held-source / just-pressed bookkeeping for actions

use super::action::{Action, InputSource};
use std::collections::{HashMap, HashSet};

/// Per-frame action state with edge detection
///
/// Several physical sources can drive one action (A and ArrowLeft both move
/// left), so holds are tracked per source. An action is held while any of
/// its sources is down, and every source going from up to down is an edge.
#[derive(Debug, Default)]
pub struct ActionState {
    /// Sources currently down, with the action each one drives
    held: HashMap<InputSource, Action>,

    /// Actions whose press edge happened since the last `end_frame`
    just_pressed: HashSet<Action>,
}

impl ActionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pressed(&self, action: Action) -> bool {
        self.held.values().any(|held| *held == action)
    }

    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Register a source going down. A source that is already down never
    /// produces a second edge.
    pub fn press(&mut self, source: InputSource, action: Action) {
        if self.held.insert(source, action).is_none() {
            self.just_pressed.insert(action);
        }
    }

    pub fn release(&mut self, source: InputSource) {
        self.held.remove(&source);
    }

    /// Forget this frame's edges
    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
    }

    pub fn reset(&mut self) {
        self.held.clear();
        self.just_pressed.clear();
    }

    /// Horizontal axis from the movement actions, in [-1, 1]
    pub fn horizontal_axis(&self) -> f32 {
        let mut horizontal = 0.0;
        if self.is_pressed(Action::MoveLeft) {
            horizontal -= 1.0;
        }
        if self.is_pressed(Action::MoveRight) {
            horizontal += 1.0;
        }
        horizontal
    }
}
