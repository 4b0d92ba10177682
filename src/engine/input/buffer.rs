// Jump buffer: remembers an early jump press for a short window

use crate::core::math::decay_timer;

/// Time-based buffer for a single edge-triggered input
///
/// Armed on the press edge, counts down with simulation time and is never
/// negative. Consumers clear it once the buffered press has been honored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpBuffer {
    window: f32,
    remaining: f32,
}

impl JumpBuffer {
    pub fn new(window: f32) -> Self {
        Self {
            window: window.max(0.0),
            remaining: 0.0,
        }
    }

    /// Re-arm the buffer to its full window
    pub fn arm(&mut self) {
        self.remaining = self.window;
    }

    /// Count the buffer down by `dt`
    pub fn decay(&mut self, dt: f32) {
        self.remaining = decay_timer(self.remaining, dt);
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn clear(&mut self) {
        self.remaining = 0.0;
    }
}

impl Default for JumpBuffer {
    fn default() -> Self {
        Self::new(0.1)
    }
}
