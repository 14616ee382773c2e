//! Input handling system
//!
//! The game polls keys once per frame, so input is kept as a table of key
//! states rather than a stream of events:
//!
//! ```text
//! Raw Input (winit) → InputCollector → InputState
//!                                          ↓
//!                                  BoundKeys (KeyBindings)
//!                                          ↓
//!                                     sim::KeyPoller
//! ```
//!
//! # Usage
//!
//! ```ignore
//! // In window_event()
//! collector.handle_window_event(&event);
//!
//! // Each frame
//! world.tick(dt, &collector.state().poller(&config.keys));
//! collector.advance_frame();
//! ```

mod collector;
mod keys;
mod state;

pub use collector::InputCollector;
pub use keys::{KeyBindings, KeyCode};
pub use state::{BoundKeys, ButtonState, InputState, KeyboardState, Modifiers};
