//! Mouse & Cheese
//!
//! A small top-down game built with Rust, winit, and wgpu: steer the mouse
//! around a scrolling field until it reaches the cheese.

/// Game application - windowing, rendering, assets, and input handling
pub mod app;

/// Build-time information (git SHA, branch, timestamp, etc.)
pub mod build_info;

/// Startup self-checks
pub mod health;

/// Game simulation - screens, actors, animation, and the level loop
pub mod sim;
