//! Physical keys and their game bindings

use serde::{Deserialize, Serialize};

use crate::sim::Key;

/// Keyboard key the collector tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCode {
    Space,
    Enter,
    Escape,
    Backquote,

    A,
    D,
    M,
    P,
    S,
    W,

    Left,
    Right,
    Up,
    Down,

    Other,
}

impl KeyCode {
    /// Name shown to the player in prompts
    pub fn label(self) -> &'static str {
        match self {
            Self::Space => "Space",
            Self::Enter => "Enter",
            Self::Escape => "Esc",
            Self::Backquote => "`",
            Self::A => "A",
            Self::D => "D",
            Self::M => "M",
            Self::P => "P",
            Self::S => "S",
            Self::W => "W",
            Self::Left => "Left",
            Self::Right => "Right",
            Self::Up => "Up",
            Self::Down => "Down",
            Self::Other => "?",
        }
    }
}

/// Convert from winit key code
impl From<winit::keyboard::KeyCode> for KeyCode {
    fn from(key: winit::keyboard::KeyCode) -> Self {
        use winit::keyboard::KeyCode as WK;
        match key {
            WK::Space => Self::Space,
            WK::Enter => Self::Enter,
            WK::Escape => Self::Escape,
            WK::Backquote => Self::Backquote,

            WK::KeyA => Self::A,
            WK::KeyD => Self::D,
            WK::KeyM => Self::M,
            WK::KeyP => Self::P,
            WK::KeyS => Self::S,
            WK::KeyW => Self::W,

            WK::ArrowLeft => Self::Left,
            WK::ArrowRight => Self::Right,
            WK::ArrowUp => Self::Up,
            WK::ArrowDown => Self::Down,

            _ => Self::Other,
        }
    }
}

/// Which physical key drives each game key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub left: KeyCode,
    pub right: KeyCode,
    pub up: KeyCode,
    pub down: KeyCode,
    pub menu: KeyCode,
    pub start: KeyCode,
}

impl KeyBindings {
    pub fn code(&self, key: Key) -> KeyCode {
        match key {
            Key::Left => self.left,
            Key::Right => self.right,
            Key::Up => self.up,
            Key::Down => self.down,
            Key::Menu => self.menu,
            Key::Start => self.start,
        }
    }

    /// Title screen hint naming the bound keys
    pub fn menu_prompt(&self) -> String {
        let arrows = [KeyCode::Left, KeyCode::Right, KeyCode::Up, KeyCode::Down];
        let movement = if [self.left, self.right, self.up, self.down] == arrows {
            "arrows".to_string()
        } else {
            format!(
                "{}/{}/{}/{}",
                self.left.label(),
                self.right.label(),
                self.up.label(),
                self.down.label()
            )
        };
        format!(
            "Press {} to start, {} to move, {} for this menu",
            self.start.label(),
            movement,
            self.menu.label()
        )
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left: KeyCode::Left,
            right: KeyCode::Right,
            up: KeyCode::Up,
            down: KeyCode::Down,
            menu: KeyCode::M,
            start: KeyCode::S,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::menu::DEFAULT_PROMPT;

    #[test]
    fn test_default_prompt_matches_menu() {
        assert_eq!(KeyBindings::default().menu_prompt(), DEFAULT_PROMPT);
    }

    #[test]
    fn test_prompt_follows_rebound_keys() {
        let bindings = KeyBindings {
            left: KeyCode::A,
            right: KeyCode::D,
            up: KeyCode::W,
            down: KeyCode::S,
            menu: KeyCode::Escape,
            start: KeyCode::Enter,
        };
        assert_eq!(
            bindings.menu_prompt(),
            "Press Enter to start, A/D/W/S to move, Esc for this menu"
        );
    }
}
