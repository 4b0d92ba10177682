// Engine modules: simulation clock, deferred timers, input, physics

pub mod clock;
pub mod input;
pub mod physics;
pub mod timers;
