// Input handling
//
// Raw winit events are mapped through an `InputConfig` onto `Action`s.
// Once per rendered frame the `InputSampler` turns the action state into a
// `FrameIntent`: the horizontal axis plus edge-triggered jump, attack,
// shoot and pause presses. The `JumpBuffer` keeps an early jump press
// alive for a short window so the simulation can still honor it a few
// ticks later.
//
// ## Usage
//
// ```rust
// let mut sampler = InputSampler::new(InputConfig::default());
//
// // In the event loop
// sampler.process_keyboard_event(&key_event);
//
// // Once per frame
// let intent = sampler.sample();
// if intent.jump_edge {
//     // Arm the jump buffer
// }
// ```

pub mod action;
pub mod buffer;
pub mod config;
pub mod sampler;
pub mod state;

pub use buffer::JumpBuffer;
pub use config::InputConfig;
pub use sampler::{FrameIntent, InputSampler};
