//! Configuration system health check

use crate::app::AppConfig;
use crate::health::check::{CheckResult, Details, SystemCheck};

/// Checks that configuration can be loaded for all profiles
pub struct ConfigCheck {
    profiles: Vec<&'static str>,
}

impl ConfigCheck {
    /// Creates a new config check with default profiles
    pub fn new() -> Self {
        Self {
            profiles: vec!["debug", "release"],
        }
    }

    /// Creates a config check with custom profiles
    pub fn with_profiles(profiles: Vec<&'static str>) -> Self {
        Self { profiles }
    }
}

impl Default for ConfigCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for ConfigCheck {
    fn name(&self) -> &'static str {
        "Configuration"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates configuration profiles, including level tuning")
    }

    fn check(&self) -> CheckResult {
        let mut details = Details::new();

        for profile in &self.profiles {
            let config = match AppConfig::load(profile) {
                Ok(config) => config,
                Err(e) => {
                    details.fail(format!("Profile '{}': failed to load - {}", profile, e));
                    continue;
                }
            };

            let level = &config.level;
            details.pass(format!(
                "Profile '{}': window {}x{}, world {}x{}, speed {}, {:?} movement, starts on {:?}",
                profile,
                config.window.width,
                config.window.height,
                level.world_size[0],
                level.world_size[1],
                level.player_speed,
                level.movement,
                config.start_screen,
            ));
            if config.window.width < f64::from(level.view_size[0])
                || config.window.height < f64::from(level.view_size[1])
            {
                details.warn(format!(
                    "Profile '{}': window is smaller than the level view, the scene will be scaled down",
                    profile
                ));
            }
        }

        match AppConfig::load_from_env() {
            Ok(config) => {
                details.pass(format!("Environment config: profile '{}' loaded", config.profile))
            }
            Err(e) => details.warn(format!("Environment config: {}", e)),
        }

        details.finish(
            format!("{} profiles validated", self.profiles.len()),
            "Config loaded with warnings",
            "Failed to load one or more config profiles",
        )
    }
}
