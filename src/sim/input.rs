//! Polled keys and the key-to-velocity mapping

use serde::{Deserialize, Serialize};

/// Logical keys the game polls each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    /// Return to the menu
    Menu,
    /// Start a level from the menu
    Start,
}

/// Synchronous "is this key held right now" query
pub trait KeyPoller {
    fn is_key_down(&self, key: Key) -> bool;
}

/// How held direction keys combine into a velocity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MovementMode {
    /// Only the highest-priority held key counts: left, right, up, down, then menu.
    /// Diagonal movement is impossible in this mode.
    #[default]
    Priority,
    /// Every held direction contributes and the menu key is checked on its own
    Combined,
}

/// Result of polling input for one frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Steering {
    /// World units per second, y up
    pub velocity: [f32; 2],
    pub menu_requested: bool,
}

/// Maps the held keys to a velocity of magnitude `speed` per axis
pub fn steer(input: &dyn KeyPoller, speed: f32, mode: MovementMode) -> Steering {
    let mut steering = Steering::default();

    match mode {
        MovementMode::Priority => {
            if input.is_key_down(Key::Left) {
                steering.velocity[0] -= speed;
            } else if input.is_key_down(Key::Right) {
                steering.velocity[0] += speed;
            } else if input.is_key_down(Key::Up) {
                steering.velocity[1] += speed;
            } else if input.is_key_down(Key::Down) {
                steering.velocity[1] -= speed;
            } else if input.is_key_down(Key::Menu) {
                steering.menu_requested = true;
            }
        }
        MovementMode::Combined => {
            if input.is_key_down(Key::Left) {
                steering.velocity[0] -= speed;
            }
            if input.is_key_down(Key::Right) {
                steering.velocity[0] += speed;
            }
            if input.is_key_down(Key::Up) {
                steering.velocity[1] += speed;
            }
            if input.is_key_down(Key::Down) {
                steering.velocity[1] -= speed;
            }
            steering.menu_requested = input.is_key_down(Key::Menu);
        }
    }

    steering
}

/// A fixed set of held keys, handy for tests and scripted playthroughs
#[derive(Debug, Clone, Default)]
pub struct HeldKeys(Vec<Key>);

impl HeldKeys {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn of(keys: &[Key]) -> Self {
        Self(keys.to_vec())
    }
}

impl KeyPoller for HeldKeys {
    fn is_key_down(&self, key: Key) -> bool {
        self.0.contains(&key)
    }
}
