// Input sampler: raw device events in, one intent snapshot per frame out

use super::action::{Action, InputSource};
use super::config::InputConfig;
use super::state::ActionState;
use crate::core::math::clamp_axis;
use winit::event::{ElementState, KeyEvent, MouseButton};
use winit::keyboard::PhysicalKey;

/// What the player asked for during one rendered frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameIntent {
    /// Horizontal movement in [-1, 1]
    pub horizontal_axis: f32,
    /// Jump pressed since the last sample (once per physical press)
    pub jump_edge: bool,
    /// Attack pressed since the last sample (once per physical press)
    pub attack_edge: bool,
    /// Shoot pressed since the last sample (once per physical press)
    pub shoot_edge: bool,
    /// Pause pressed since the last sample
    pub pause_edge: bool,
}

/// Turns winit events into per-frame `FrameIntent`s
#[derive(Debug, Default)]
pub struct InputSampler {
    config: InputConfig,
    state: ActionState,
}

impl InputSampler {
    pub fn new(config: InputConfig) -> Self {
        Self {
            config,
            state: ActionState::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(key_code) = event.physical_key {
            self.handle_source(
                InputSource::key(key_code),
                event.state == ElementState::Pressed,
                event.repeat,
            );
        }
    }

    /// Process a mouse button event from winit
    pub fn process_mouse_button(&mut self, state: ElementState, button: MouseButton) {
        self.handle_source(
            InputSource::mouse(button),
            state == ElementState::Pressed,
            false,
        );
    }

    /// Apply a press or release of a physical source
    pub fn handle_source(&mut self, source: InputSource, pressed: bool, repeat: bool) {
        let Some(action) = self.config.action_for(source) else {
            return;
        };

        if pressed {
            // OS key repeat is not a new physical press
            if !repeat {
                self.state.press(source, action);
            }
        } else {
            self.state.release(source);
        }
    }

    /// Produce this frame's intent and start a new frame
    pub fn sample(&mut self) -> FrameIntent {
        let intent = FrameIntent {
            horizontal_axis: clamp_axis(self.state.horizontal_axis()),
            jump_edge: self.state.just_pressed(Action::Jump),
            attack_edge: self.state.just_pressed(Action::Attack),
            shoot_edge: self.state.just_pressed(Action::Shoot),
            pause_edge: self.state.just_pressed(Action::Pause),
        };
        self.state.end_frame();
        intent
    }

    /// Drop held keys, e.g. when the window loses focus
    pub fn reset(&mut self) {
        self.state.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::KeyCode;

    fn key(code: KeyCode) -> InputSource {
        InputSource::key(code)
    }

    #[test]
    fn test_idle_sample() {
        let mut sampler = InputSampler::default();
        assert_eq!(sampler.sample(), FrameIntent::default());
    }

    #[test]
    fn test_jump_edge_fires_once_per_press() {
        let mut sampler = InputSampler::default();
        sampler.handle_source(key(KeyCode::Space), true, false);

        assert!(sampler.sample().jump_edge);
        // Still held, OS repeats arrive
        sampler.handle_source(key(KeyCode::Space), true, true);
        assert!(!sampler.sample().jump_edge);
        assert!(!sampler.sample().jump_edge);

        sampler.handle_source(key(KeyCode::Space), false, false);
        sampler.handle_source(key(KeyCode::Space), true, false);
        assert!(sampler.sample().jump_edge);
    }

    #[test]
    fn test_attack_edge_from_mouse() {
        let mut sampler = InputSampler::default();
        sampler.process_mouse_button(ElementState::Pressed, MouseButton::Left);
        let intent = sampler.sample();
        assert!(intent.attack_edge);
        assert!(!intent.jump_edge);
    }

    #[test]
    fn test_shoot_edge_separate_from_attack() {
        let mut sampler = InputSampler::default();
        sampler.process_mouse_button(ElementState::Pressed, MouseButton::Right);
        let intent = sampler.sample();
        assert!(intent.shoot_edge);
        assert!(!intent.attack_edge);

        sampler.handle_source(key(KeyCode::KeyK), true, false);
        assert!(sampler.sample().shoot_edge);
    }

    #[test]
    fn test_second_jump_key_while_first_held_is_new_edge() {
        let mut sampler = InputSampler::default();
        sampler.handle_source(key(KeyCode::Space), true, false);
        assert!(sampler.sample().jump_edge);

        sampler.handle_source(key(KeyCode::ArrowUp), true, false);
        assert!(sampler.sample().jump_edge);
    }

    #[test]
    fn test_releasing_one_of_two_left_keys_keeps_moving() {
        let mut sampler = InputSampler::default();
        sampler.handle_source(key(KeyCode::ArrowLeft), true, false);
        sampler.handle_source(key(KeyCode::KeyA), true, false);
        sampler.handle_source(key(KeyCode::KeyA), false, false);
        assert_eq!(sampler.sample().horizontal_axis, -1.0);

        sampler.handle_source(key(KeyCode::ArrowLeft), false, false);
        assert_eq!(sampler.sample().horizontal_axis, 0.0);
    }

    #[test]
    fn test_horizontal_axis() {
        let mut sampler = InputSampler::default();
        sampler.handle_source(key(KeyCode::KeyD), true, false);
        assert_eq!(sampler.sample().horizontal_axis, 1.0);

        sampler.handle_source(key(KeyCode::KeyA), true, false);
        assert_eq!(sampler.sample().horizontal_axis, 0.0);

        sampler.handle_source(key(KeyCode::KeyD), false, false);
        assert_eq!(sampler.sample().horizontal_axis, -1.0);
    }

    #[test]
    fn test_two_keys_for_same_direction_stay_in_range() {
        let mut sampler = InputSampler::default();
        sampler.handle_source(key(KeyCode::KeyA), true, false);
        sampler.handle_source(key(KeyCode::ArrowLeft), true, false);
        assert_eq!(sampler.sample().horizontal_axis, -1.0);
    }

    #[test]
    fn test_unbound_source_ignored() {
        let mut sampler = InputSampler::default();
        sampler.handle_source(key(KeyCode::KeyQ), true, false);
        assert_eq!(sampler.sample(), FrameIntent::default());
    }

    #[test]
    fn test_pause_edge() {
        let mut sampler = InputSampler::default();
        sampler.handle_source(key(KeyCode::Escape), true, false);
        assert!(sampler.sample().pause_edge);
    }

    #[test]
    fn test_reset_releases_everything() {
        let mut sampler = InputSampler::default();
        sampler.handle_source(key(KeyCode::KeyD), true, false);
        sampler.reset();
        assert_eq!(sampler.sample().horizontal_axis, 0.0);
    }
}
