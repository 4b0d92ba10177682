// Game action definitions and default bindings

use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Everything the player can ask the character (or the game) to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement
    MoveLeft,
    MoveRight,
    Jump,

    // Combat
    Attack,
    Shoot,

    // Meta
    Pause,
}

/// A physical input: keyboard key or mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard(KeyCode),
    Mouse(MouseButton),
}

impl InputSource {
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }

    pub fn mouse(button: MouseButton) -> Self {
        Self::Mouse(button)
    }
}

/// Default keyboard/mouse bindings for the character
pub fn default_bindings() -> Vec<(InputSource, Action)> {
    vec![
        // WASD-style movement plus arrows
        (InputSource::key(KeyCode::KeyA), Action::MoveLeft),
        (InputSource::key(KeyCode::KeyD), Action::MoveRight),
        (InputSource::key(KeyCode::ArrowLeft), Action::MoveLeft),
        (InputSource::key(KeyCode::ArrowRight), Action::MoveRight),
        (InputSource::key(KeyCode::Space), Action::Jump),
        (InputSource::key(KeyCode::KeyW), Action::Jump),
        (InputSource::key(KeyCode::ArrowUp), Action::Jump),
        // Melee
        (InputSource::key(KeyCode::KeyJ), Action::Attack),
        (InputSource::mouse(MouseButton::Left), Action::Attack),
        // Ranged
        (InputSource::key(KeyCode::KeyK), Action::Shoot),
        (InputSource::mouse(MouseButton::Right), Action::Shoot),
        // Meta
        (InputSource::key(KeyCode::Escape), Action::Pause),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_source_keyboard_creation() {
        let source = InputSource::key(KeyCode::KeyA);
        assert_eq!(source, InputSource::Keyboard(KeyCode::KeyA));
    }

    #[test]
    fn test_input_source_mouse_creation() {
        let source = InputSource::mouse(MouseButton::Left);
        assert_eq!(source, InputSource::Mouse(MouseButton::Left));
    }

    #[test]
    fn test_default_bindings_cover_every_action() {
        let bindings = default_bindings();
        for action in [
            Action::MoveLeft,
            Action::MoveRight,
            Action::Jump,
            Action::Attack,
            Action::Shoot,
            Action::Pause,
        ] {
            assert!(
                bindings.iter().any(|(_, a)| *a == action),
                "{action:?} has no default binding"
            );
        }
    }

    #[test]
    fn test_no_duplicate_sources() {
        let mut seen = std::collections::HashSet::new();
        for (source, _) in default_bindings() {
            assert!(seen.insert(source), "Duplicate input source {source:?}");
        }
    }
}
