//! Screens and navigation requests

use std::any::Any;

use super::input::KeyPoller;
use super::scene::Scene;

/// Which screen a running screen wants to be replaced with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenRequest {
    Menu,
    Level,
}

/// Trait that every screen implements
///
/// A screen owns all of its state and is advanced by the host once per
/// frame. It never replaces itself; it returns a [`ScreenRequest`] and the
/// host decides what happens next.
pub trait Screen {
    /// Returns the name/identifier of this screen
    fn name(&self) -> &str;

    /// Advances the screen by one frame
    ///
    /// # Arguments
    /// * `delta_time` - Time elapsed since last frame in seconds
    /// * `input` - Keys held during this frame
    fn update(&mut self, delta_time: f32, input: &dyn KeyPoller) -> Option<ScreenRequest>;

    /// Describes what to draw for the current state
    fn scene(&self) -> Scene;

    /// Called when the screen becomes the active one
    fn show(&mut self) {}

    /// Called before the screen is replaced
    fn hide(&mut self) {}

    /// Called when the application loses focus
    fn pause(&mut self) {}

    /// Called when the application regains focus
    fn resume(&mut self) {}

    /// Called when the window size changes
    fn resize(&mut self, _width: u32, _height: u32) {}

    /// Called once after `hide`, right before the screen is dropped
    fn dispose(&mut self) {}

    /// Allows downcasting to concrete types for specific queries
    fn as_any(&self) -> &dyn Any;
}
