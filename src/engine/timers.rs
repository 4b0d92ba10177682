// Deferred continuations keyed to simulation time
//
// A timed sequence (respawn invulnerability, death grace, hit flash) is an
// entry here: a countdown plus the action to resume with once it expires.
// The queue is advanced by the fixed-tick driver, so pausing the simulation
// clock also freezes every pending continuation.

use crate::core::math::decay_timer;

/// A single pending continuation
#[derive(Debug, Clone)]
struct Deferred<A> {
    remaining: f32,
    action: A,
}

/// Queue of actions waiting for their deadline
#[derive(Debug, Clone)]
pub struct DeferredQueue<A> {
    pending: Vec<Deferred<A>>,
}

impl<A> DeferredQueue<A> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Schedule `action` to fire after `delay` seconds of simulation time
    pub fn schedule(&mut self, delay: f32, action: A) {
        self.pending.push(Deferred {
            remaining: delay.max(0.0),
            action,
        });
    }

    /// Advance all countdowns and return the actions that came due,
    /// in the order they were scheduled
    pub fn advance(&mut self, dt: f32) -> Vec<A> {
        for entry in &mut self.pending {
            entry.remaining = decay_timer(entry.remaining, dt);
        }

        let mut due = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].remaining <= 0.0 {
                due.push(self.pending.remove(i).action);
            } else {
                i += 1;
            }
        }
        due
    }
}

impl<A> Default for DeferredQueue<A> {
    fn default() -> Self {
        Self::new()
    }
}
