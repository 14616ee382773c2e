//! Raw input state

use std::collections::HashMap;

use super::keys::{KeyBindings, KeyCode};
use crate::sim::{Key, KeyPoller};

/// Raw input state snapshot for a single frame
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub keyboard: KeyboardState,
}

/// Button press state with edge detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Released,
    /// Pressed this frame (edge)
    JustPressed,
    /// Held down (multiple frames)
    Pressed,
    /// Released this frame (edge)
    JustReleased,
}

impl ButtonState {
    /// Advance state for next frame (transitions edges to steady states)
    pub fn advance(self) -> Self {
        match self {
            Self::JustPressed => Self::Pressed,
            Self::JustReleased => Self::Released,
            state => state,
        }
    }

    /// Returns true if button is currently down (just pressed or held)
    pub fn is_down(self) -> bool {
        matches!(self, Self::JustPressed | Self::Pressed)
    }

    /// Returns true if button was just pressed this frame
    pub fn is_just_pressed(self) -> bool {
        matches!(self, Self::JustPressed)
    }

    /// Returns true if button was just released this frame
    pub fn is_just_released(self) -> bool {
        matches!(self, Self::JustReleased)
    }
}

/// Keyboard input state
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    keys: HashMap<KeyCode, ButtonState>,
    pub modifiers: Modifiers,
}

/// Keyboard modifiers
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl KeyboardState {
    /// Records a press; repeats of a held key keep it held
    pub fn press(&mut self, key: KeyCode) {
        let state = self.keys.entry(key).or_default();
        if !state.is_down() {
            *state = ButtonState::JustPressed;
        }
    }

    pub fn release(&mut self, key: KeyCode) {
        let state = self.keys.entry(key).or_default();
        if state.is_down() {
            *state = ButtonState::JustReleased;
        }
    }

    /// Releases every held key, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        for state in self.keys.values_mut() {
            if state.is_down() {
                *state = ButtonState::JustReleased;
            }
        }
    }

    pub fn state(&self, key: KeyCode) -> ButtonState {
        self.keys.get(&key).copied().unwrap_or_default()
    }

    pub fn is_down(&self, key: KeyCode) -> bool {
        self.state(key).is_down()
    }

    /// Number of keys currently held
    pub fn held_count(&self) -> usize {
        self.keys.values().filter(|state| state.is_down()).count()
    }

    fn advance_frame(&mut self) {
        for state in self.keys.values_mut() {
            *state = state.advance();
        }
        self.keys.retain(|_, state| *state != ButtonState::Released);
    }
}

impl InputState {
    /// Creates a new empty input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance all button states for next frame
    pub fn advance_frame(&mut self) {
        self.keyboard.advance_frame();
    }

    /// Views this state through `bindings` as game keys
    pub fn poller<'a>(&'a self, bindings: &'a KeyBindings) -> BoundKeys<'a> {
        BoundKeys {
            keyboard: &self.keyboard,
            bindings,
        }
    }
}

/// Keyboard state seen through a set of key bindings
pub struct BoundKeys<'a> {
    keyboard: &'a KeyboardState,
    bindings: &'a KeyBindings,
}

impl KeyPoller for BoundKeys<'_> {
    fn is_key_down(&self, key: Key) -> bool {
        self.keyboard.is_down(self.bindings.code(key))
    }
}
