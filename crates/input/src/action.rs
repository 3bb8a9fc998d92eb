use tabletop_scene::CameraMovement;

/// Keys the demo listens to. The windowing layer maps its own key codes
/// onto these and drops everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    F,
    F1,
    Escape,
}

/// A high-level action produced from input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Camera movement key went down.
    Move(CameraMovement),
    /// Show or hide the debug overlay.
    ToggleOverlay,
    /// Switch the camera flashlight on or off.
    ToggleSpotlight,
    /// Close the window.
    Quit,
    /// Key released or not bound to anything that fires on press.
    Noop,
}

/// Movement direction bound to `key`, if any.
pub fn movement_for_key(key: Key) -> Option<CameraMovement> {
    match key {
        Key::W => Some(CameraMovement::Forward),
        Key::S => Some(CameraMovement::Backward),
        Key::A => Some(CameraMovement::Left),
        Key::D => Some(CameraMovement::Right),
        _ => None,
    }
}

/// Action fired by a key transition. Only presses fire.
pub fn action_for_key(key: Key, pressed: bool) -> Action {
    if !pressed {
        return Action::Noop;
    }
    if let Some(movement) = movement_for_key(key) {
        return Action::Move(movement);
    }
    match key {
        Key::F1 => Action::ToggleOverlay,
        Key::F => Action::ToggleSpotlight,
        Key::Escape => Action::Quit,
        _ => Action::Noop,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wasd_moves() {
        assert_eq!(
            action_for_key(Key::W, true),
            Action::Move(CameraMovement::Forward)
        );
        assert_eq!(
            action_for_key(Key::A, true),
            Action::Move(CameraMovement::Left)
        );
        assert_eq!(
            action_for_key(Key::S, true),
            Action::Move(CameraMovement::Backward)
        );
        assert_eq!(
            action_for_key(Key::D, true),
            Action::Move(CameraMovement::Right)
        );
    }

    #[test]
    fn toggles_and_quit() {
        assert_eq!(action_for_key(Key::F1, true), Action::ToggleOverlay);
        assert_eq!(action_for_key(Key::F, true), Action::ToggleSpotlight);
        assert_eq!(action_for_key(Key::Escape, true), Action::Quit);
    }

    #[test]
    fn releases_do_nothing() {
        for key in [Key::W, Key::F, Key::F1, Key::Escape] {
            assert_eq!(action_for_key(key, false), Action::Noop);
        }
    }
}
