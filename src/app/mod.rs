//! Game application module
//!
//! Handles windowing, rendering, asset loading and user input.

pub mod assets;
pub mod config;
pub mod debug_ui;
pub mod input;
pub mod renderer;
mod runner;
mod window;

pub use assets::{AssetError, AssetStore};
pub use config::{AppConfig, AssetConfig, StartScreen, WindowConfig};
pub use runner::App;
pub use window::window_attributes_from_config;
