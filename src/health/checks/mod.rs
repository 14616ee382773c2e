//! Built-in health checks for core systems

pub mod assets;
pub mod build_info;
pub mod config;
pub mod level;
pub mod system_info;

pub use assets::AssetsCheck;
pub use build_info::BuildInfoCheck;
pub use config::ConfigCheck;
pub use level::LevelCheck;
pub use system_info::SystemInfoCheck;
