//! Application configuration
//!
//! Supports multiple profiles (debug, release) with different settings.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use super::input::KeyBindings;
use crate::sim::{LevelConfig, ScreenRequest, TextureKey};

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width
    pub width: f64,
    /// Window height
    pub height: f64,
    /// Whether the window should be fullscreen
    pub fullscreen: bool,
    /// Whether the window should be resizable
    pub resizable: bool,
    /// Whether the window should be decorated (has title bar, borders, etc.)
    pub decorated: bool,
    /// Whether to enable vsync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Mouse & Cheese".to_string(),
            width: 640.0,
            height: 480.0,
            fullscreen: false,
            resizable: true,
            decorated: true,
            vsync: true,
        }
    }
}

/// Image files backing each texture
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Directory the file names below are relative to
    pub dir: PathBuf,
    pub background: String,
    pub target: String,
    /// Player animation frames, in order
    pub player: Vec<String>,
    pub banner: String,
}

impl AssetConfig {
    /// File names for `key`, one per animation frame
    pub fn files(&self, key: TextureKey) -> Vec<&str> {
        match key {
            TextureKey::Background => vec![self.background.as_str()],
            TextureKey::Target => vec![self.target.as_str()],
            TextureKey::Player => self.player.iter().map(String::as_str).collect(),
            TextureKey::Banner => vec![self.banner.as_str()],
        }
    }

    /// Resolves the asset directory
    ///
    /// Relative directories are looked up next to the executable first, then
    /// in the current directory.
    pub fn resolved_dir(&self) -> PathBuf {
        if self.dir.is_absolute() {
            return self.dir.clone();
        }

        if let Ok(exe_path) = std::env::current_exe()
            && let Some(exe_dir) = exe_path.parent()
        {
            let candidate = exe_dir.join(&self.dir);
            if candidate.exists() {
                return candidate;
            }
        }

        self.dir.clone()
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("assets"),
            background: "tiles-800-800.png".to_string(),
            target: "cheese.png".to_string(),
            player: (0..4).map(|i| format!("mouse{i}.png")).collect(),
            banner: "you-win.png".to_string(),
        }
    }
}

/// Which screen is shown first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StartScreen {
    Menu,
    #[default]
    Level,
}

impl From<StartScreen> for ScreenRequest {
    fn from(screen: StartScreen) -> Self {
        match screen {
            StartScreen::Menu => ScreenRequest::Menu,
            StartScreen::Level => ScreenRequest::Level,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// The active profile (debug, release, etc.)
    pub profile: String,
    /// Window configuration
    pub window: WindowConfig,
    pub assets: AssetConfig,
    pub level: LevelConfig,
    pub keys: KeyBindings,
    pub start_screen: StartScreen,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            profile: "release".to_string(),
            window: WindowConfig::default(),
            assets: AssetConfig::default(),
            level: LevelConfig::default(),
            keys: KeyBindings::default(),
            start_screen: StartScreen::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration based on the specified profile
    ///
    /// Profiles are loaded from config files in the following order:
    /// 1. config/{profile}.toml (profile-specific configuration)
    /// 2. Environment variables with prefix APP_ (e.g., APP_LEVEL__PLAYER_SPEED=450)
    ///
    /// Config files are searched for in:
    /// 1. Next to the executable (target/debug/config or target/release/config)
    /// 2. In the current directory (./config)
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        let config_dir = Self::find_config_dir().unwrap_or_else(|| PathBuf::from("config"));
        Self::load_from_dir(&config_dir, profile)
    }

    /// Loads `{dir}/{profile}.toml` layered under the environment
    pub fn load_from_dir(dir: &Path, profile: &str) -> Result<Self, ConfigError> {
        let profile_path = dir.join(profile);

        let config = Config::builder()
            .add_source(File::from(profile_path.as_path()).required(false))
            // Use __ as separator for nested fields (e.g., APP_WINDOW__WIDTH)
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override("profile", profile)?
            .build()?;

        let config: Self = config.try_deserialize()?;
        config
            .level
            .validate()
            .map_err(|e| ConfigError::Message(format!("invalid level configuration: {e}")))?;
        Ok(config)
    }

    /// Finds the config directory by searching in multiple locations
    fn find_config_dir() -> Option<PathBuf> {
        if let Ok(exe_path) = std::env::current_exe()
            && let Some(exe_dir) = exe_path.parent()
        {
            let config_dir = exe_dir.join("config");
            if config_dir.exists() {
                return Some(config_dir);
            }
        }

        let cwd_config = PathBuf::from("config");
        if cwd_config.exists() {
            return Some(cwd_config);
        }

        None
    }

    /// Loads configuration using the APP_PROFILE environment variable,
    /// defaulting to "release"
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let profile = std::env::var("APP_PROFILE").unwrap_or_else(|_| "release".to_string());
        Self::load(&profile)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::sim::MovementMode;

    #[test]
    fn test_missing_profile_uses_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = AppConfig::load_from_dir(dir.path(), "nope").expect("defaults load");

        assert_eq!(config.profile, "nope");
        assert_eq!(config.window.width, 640.0);
        assert_eq!(config.level, LevelConfig::default());
        assert_eq!(config.start_screen, StartScreen::Level);
        assert_eq!(config.assets.files(TextureKey::Player).len(), 4);
    }

    #[test]
    fn test_profile_overrides_level() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(
            dir.path().join("fast.toml"),
            "start_screen = \"menu\"\n\n[level]\nplayer_speed = 600.0\nmovement = \"combined\"\n",
        )
        .expect("write profile");

        let config = AppConfig::load_from_dir(dir.path(), "fast").expect("profile loads");
        assert_eq!(config.level.player_speed, 600.0);
        assert_eq!(config.level.movement, MovementMode::Combined);
        assert_eq!(config.level.view_size, [640.0, 480.0]);
        assert_eq!(ScreenRequest::from(config.start_screen), ScreenRequest::Menu);
    }

    #[test]
    fn test_invalid_level_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(
            dir.path().join("broken.toml"),
            "[level]\nview_size = [1000.0, 480.0]\n",
        )
        .expect("write profile");

        let err = AppConfig::load_from_dir(dir.path(), "broken").expect_err("must fail");
        assert!(err.to_string().contains("does not fit inside world"));
    }

    #[test]
    fn test_nan_speed_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("nan.toml"), "[level]\nplayer_speed = nan\n")
            .expect("write profile");

        let err = AppConfig::load_from_dir(dir.path(), "nan").expect_err("must fail");
        assert!(err.to_string().contains("player speed must be finite"));
    }
}
