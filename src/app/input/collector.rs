//! Raw input collection from winit events

use winit::event::{ElementState, WindowEvent};
use winit::keyboard::PhysicalKey;

use super::keys::KeyCode;
use super::state::{InputState, Modifiers};

/// Collects raw input from winit events and maintains InputState
pub struct InputCollector {
    state: InputState,
}

impl InputCollector {
    /// Creates a new input collector
    pub fn new() -> Self {
        Self {
            state: InputState::new(),
        }
    }

    /// Handle a winit window event
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::ModifiersChanged(modifiers_state) => {
                self.state.keyboard.modifiers = Modifiers {
                    shift: modifiers_state.state().shift_key(),
                    ctrl: modifiers_state.state().control_key(),
                    alt: modifiers_state.state().alt_key(),
                    meta: modifiers_state.state().super_key(),
                };
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let key = KeyCode::from(code);
                if key == KeyCode::Other {
                    return;
                }
                match event.state {
                    ElementState::Pressed => self.state.keyboard.press(key),
                    ElementState::Released => self.state.keyboard.release(key),
                }
            }

            // Key-up events are lost while unfocused
            WindowEvent::Focused(false) => {
                self.state.keyboard.release_all();
            }

            _ => {}
        }
    }

    /// Advance to next frame (transitions edge states to steady states)
    pub fn advance_frame(&mut self) {
        self.state.advance_frame();
    }

    /// Get current input state
    pub fn state(&self) -> &InputState {
        &self.state
    }

    /// Borrow state mutably
    pub fn state_mut(&mut self) -> &mut InputState {
        &mut self.state
    }
}

impl Default for InputCollector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_loss_releases_keys() {
        let mut collector = InputCollector::new();
        collector.state_mut().keyboard.press(KeyCode::Right);
        collector.advance_frame();
        assert!(collector.state().keyboard.is_down(KeyCode::Right));

        collector.handle_window_event(&WindowEvent::Focused(false));
        assert!(!collector.state().keyboard.is_down(KeyCode::Right));
    }
}
