// Movement & jump state machine
//
// Pure bookkeeping: the controller feeds it the probe result and the tick
// length, and applies the returned velocity and jump decision to the body.

use crate::core::math::{clamp_axis, decay_timer};
use crate::engine::input::JumpBuffer;

/// Where the character stands with respect to jumping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovementPhase {
    /// Standing on ground this tick
    Grounded,
    /// Just left the ground, a jump still counts as a ground jump
    AirborneCoyote,
    /// Airborne with air jumps left
    AirborneJumping,
    /// Airborne, coyote expired and no air jumps left
    AirborneSpent,
}

impl MovementPhase {
    pub fn is_airborne(&self) -> bool {
        !matches!(self, Self::Grounded)
    }

    /// Animation state an animator would switch on
    pub fn animation_name(&self) -> &'static str {
        if self.is_airborne() {
            "airborne"
        } else {
            "grounded"
        }
    }
}

/// Which rule granted a jump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKind {
    /// Grounded or within coyote time; no air-jump budget spent
    Ground,
    /// Spent one air jump
    Air,
}

/// Tuning the state machine needs, copied out of `ControllerConfig`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementTuning {
    pub move_speed: f32,
    pub max_air_jumps: u32,
    pub coyote_time: f32,
}

/// Result of one fixed tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    /// Horizontal velocity to apply; vertical velocity is left alone
    pub horizontal_velocity: f32,
    pub jump: Option<JumpKind>,
    /// The character touched down this tick
    pub landed: bool,
}

/// Per-character movement state
#[derive(Debug, Clone)]
pub struct MovementState {
    horizontal_axis: f32,
    facing_right: bool,
    is_grounded: bool,
    air_jumps_used: u32,
    coyote_timer: f32,
    jump_buffer: JumpBuffer,
    /// Jump edge seen by the frame loop, waiting for the next tick
    jump_latched: bool,
}

impl MovementState {
    pub fn new(jump_buffer_time: f32) -> Self {
        Self {
            horizontal_axis: 0.0,
            facing_right: true,
            is_grounded: false,
            air_jumps_used: 0,
            coyote_timer: 0.0,
            jump_buffer: JumpBuffer::new(jump_buffer_time),
            jump_latched: false,
        }
    }

    pub fn facing_right(&self) -> bool {
        self.facing_right
    }

    pub fn air_jumps_used(&self) -> u32 {
        self.air_jumps_used
    }

    pub fn coyote_timer(&self) -> f32 {
        self.coyote_timer
    }

    pub fn jump_buffer_timer(&self) -> f32 {
        self.jump_buffer.remaining()
    }

    /// Store the frame's horizontal intent
    pub fn set_horizontal_axis(&mut self, axis: f32) {
        self.horizontal_axis = clamp_axis(axis);
    }

    /// Record a jump press edge: latch it for the next tick and arm the buffer
    pub fn press_jump(&mut self) {
        self.jump_latched = true;
        self.jump_buffer.arm();
    }

    /// Flip facing when the axis points the other way. Returns true on a flip.
    pub fn update_facing(&mut self) -> bool {
        if self.horizontal_axis > 0.0 && !self.facing_right {
            self.facing_right = true;
            true
        } else if self.horizontal_axis < 0.0 && self.facing_right {
            self.facing_right = false;
            true
        } else {
            false
        }
    }

    /// Advance one fixed tick
    pub fn tick(&mut self, grounded: bool, dt: f32, tuning: &MovementTuning) -> TickOutcome {
        let horizontal_velocity = self.horizontal_axis * tuning.move_speed;

        let landed = grounded && !self.is_grounded;
        self.is_grounded = grounded;

        if grounded {
            self.air_jumps_used = 0;
            self.coyote_timer = tuning.coyote_time;
        } else {
            self.coyote_timer = decay_timer(self.coyote_timer, dt);
        }

        self.jump_buffer.decay(dt);

        let requested = self.jump_latched || self.jump_buffer.is_active();
        self.jump_latched = false;

        let jump = if !requested {
            None
        } else if self.is_grounded || self.coyote_timer > 0.0 {
            Some(JumpKind::Ground)
        } else if self.air_jumps_used < tuning.max_air_jumps {
            self.air_jumps_used += 1;
            Some(JumpKind::Air)
        } else {
            None
        };

        if jump.is_some() {
            // One press, one jump
            self.coyote_timer = 0.0;
            self.jump_buffer.clear();
        }

        TickOutcome {
            horizontal_velocity,
            jump,
            landed,
        }
    }

    /// Current phase for cosmetic consumers
    pub fn phase(&self, max_air_jumps: u32) -> MovementPhase {
        if self.is_grounded {
            MovementPhase::Grounded
        } else if self.coyote_timer > 0.0 {
            MovementPhase::AirborneCoyote
        } else if self.air_jumps_used < max_air_jumps {
            MovementPhase::AirborneJumping
        } else {
            MovementPhase::AirborneSpent
        }
    }

    /// Neutral jump state after a respawn; facing and configuration survive
    pub fn reset_for_respawn(&mut self) {
        self.is_grounded = false;
        self.air_jumps_used = 0;
        self.coyote_timer = 0.0;
        self.jump_buffer.clear();
        self.jump_latched = false;
    }
}
