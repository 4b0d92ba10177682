// Simulation clock with a fixed timestep and variable frame rate
//
// Every fixed-tick consumer (ground probing, movement, deferred timers)
// reads its delta from this one object. Pausing the clock halts them all
// at once; nothing else in the game keeps its own pause flag.

use std::time::{Duration, Instant};

/// Target simulation rate (60 ticks per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
const FIXED_TIMESTEP_DURATION: Duration = Duration::from_micros(16_667); // ~1/60 second

/// Maximum number of fixed steps per frame to prevent spiral of death
const MAX_STEPS_PER_FRAME: u32 = 5;

/// Fixed-step accumulator driven by frame times
#[derive(Debug)]
pub struct SimulationClock {
    /// Accumulated time not yet consumed by fixed steps
    accumulator: Duration,

    /// Time of last frame
    last_frame_time: Instant,

    paused: bool,
}

impl SimulationClock {
    pub fn new() -> Self {
        Self {
            accumulator: Duration::ZERO,
            last_frame_time: Instant::now(),
            paused: false,
        }
    }

    /// Begin a new frame using the wall clock, returns the number of fixed steps to run
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.advance(frame_time)
    }

    /// Feed an explicit frame duration, returns the number of fixed steps to run
    pub fn advance(&mut self, frame_time: Duration) -> u32 {
        if self.paused {
            return 0;
        }

        self.accumulator += frame_time;

        let mut steps = 0;
        while self.accumulator >= FIXED_TIMESTEP_DURATION && steps < MAX_STEPS_PER_FRAME {
            self.accumulator -= FIXED_TIMESTEP_DURATION;
            steps += 1;
        }

        // Drop the backlog instead of carrying it into the next frame
        if steps == MAX_STEPS_PER_FRAME && self.accumulator >= FIXED_TIMESTEP_DURATION {
            log::debug!(
                "Simulation fell behind, dropping {:?} of accumulated time",
                self.accumulator
            );
            self.accumulator = Duration::ZERO;
        }

        steps
    }

    /// Fixed step length in seconds
    pub fn fixed_timestep(&self) -> f32 {
        FIXED_TIMESTEP
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Simulation paused");
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Reset accumulator to prevent update burst
            self.accumulator = Duration::ZERO;
            self.last_frame_time = Instant::now();
            log::info!("Simulation resumed");
        }
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new()
    }
}
