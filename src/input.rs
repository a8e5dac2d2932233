//! Keyboard state table
//!
//! The browser delivers `keydown`/`keyup` events between frames. `KeyState`
//! folds them into two sets: keys currently held, and keys pressed since the
//! last frame (edge-triggered actions like jump or special attack).

/// Logical keys consumed by the games
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// ArrowUp / W
    Up,
    /// ArrowDown / S
    Down,
    /// ArrowLeft / A
    Left,
    /// ArrowRight / D
    Right,
    /// Space
    Action,
}

const KEY_COUNT: usize = 5;

impl Key {
    #[cfg(test)]
    const ALL: [Key; KEY_COUNT] = [Key::Up, Key::Down, Key::Left, Key::Right, Key::Action];

    /// Map a DOM `KeyboardEvent.key` value. Letters match case-insensitively.
    pub fn from_dom(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Key::Up),
            "ArrowDown" => Some(Key::Down),
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            " " | "Spacebar" => Some(Key::Action),
            _ => match key.to_ascii_lowercase().as_str() {
                "w" => Some(Key::Up),
                "s" => Some(Key::Down),
                "a" => Some(Key::Left),
                "d" => Some(Key::Right),
                _ => None,
            },
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Held and freshly-pressed keys
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    held: [bool; KEY_COUNT],
    pressed: [bool; KEY_COUNT],
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key going down. OS auto-repeat counts as a fresh press.
    pub fn key_down(&mut self, key: Key) {
        self.held[key.index()] = true;
        self.pressed[key.index()] = true;
    }

    pub fn key_up(&mut self, key: Key) {
        self.held[key.index()] = false;
    }

    /// Feed a raw DOM key value; unknown keys are ignored
    pub fn dom_key_down(&mut self, key: &str) -> bool {
        match Key::from_dom(key) {
            Some(k) => {
                self.key_down(k);
                true
            }
            None => false,
        }
    }

    pub fn dom_key_up(&mut self, key: &str) -> bool {
        match Key::from_dom(key) {
            Some(k) => {
                self.key_up(k);
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn is_held(&self, key: Key) -> bool {
        self.held[key.index()]
    }

    #[inline]
    pub fn was_pressed(&self, key: Key) -> bool {
        self.pressed[key.index()]
    }

    /// Clear one-shot presses after a frame consumed them
    pub fn end_frame(&mut self) {
        self.pressed = [false; KEY_COUNT];
    }

    /// Drop everything (window lost focus, game restarted)
    pub fn release_all(&mut self) {
        self.held = [false; KEY_COUNT];
        self.pressed = [false; KEY_COUNT];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dom_mapping() {
        assert_eq!(Key::from_dom("ArrowUp"), Some(Key::Up));
        assert_eq!(Key::from_dom("w"), Some(Key::Up));
        assert_eq!(Key::from_dom("W"), Some(Key::Up));
        assert_eq!(Key::from_dom("S"), Some(Key::Down));
        assert_eq!(Key::from_dom("a"), Some(Key::Left));
        assert_eq!(Key::from_dom("ArrowRight"), Some(Key::Right));
        assert_eq!(Key::from_dom(" "), Some(Key::Action));
        assert_eq!(Key::from_dom("Escape"), None);
        assert_eq!(Key::from_dom("q"), None);
    }

    #[test]
    fn test_press_is_one_shot_hold_persists() {
        let mut keys = KeyState::new();
        keys.key_down(Key::Up);
        assert!(keys.was_pressed(Key::Up));
        assert!(keys.is_held(Key::Up));

        keys.end_frame();
        assert!(!keys.was_pressed(Key::Up));
        assert!(keys.is_held(Key::Up));

        keys.key_up(Key::Up);
        assert!(!keys.is_held(Key::Up));
    }

    #[test]
    fn test_press_survives_release_before_frame() {
        // Tap shorter than a frame still registers
        let mut keys = KeyState::new();
        keys.key_down(Key::Action);
        keys.key_up(Key::Action);
        assert!(keys.was_pressed(Key::Action));
        assert!(!keys.is_held(Key::Action));
    }

    #[test]
    fn test_unknown_dom_keys_ignored() {
        let mut keys = KeyState::new();
        assert!(!keys.dom_key_down("Tab"));
        assert!(Key::ALL.iter().all(|k| !keys.is_held(*k)));
    }
}
