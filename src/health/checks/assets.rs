//! Asset loading health check

use crate::app::{AppConfig, AssetConfig, AssetStore};
use crate::health::check::{CheckResult, Details, SystemCheck};
use crate::sim::{SpriteMetrics, TextureKey};

/// Checks that every configured texture decodes
pub struct AssetsCheck {
    config: Option<AssetConfig>,
}

impl AssetsCheck {
    /// Checks the assets named by the environment's configuration
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Checks a specific asset configuration
    pub fn with_config(config: AssetConfig) -> Self {
        Self {
            config: Some(config),
        }
    }
}

impl Default for AssetsCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for AssetsCheck {
    fn name(&self) -> &'static str {
        "Assets"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Decodes every texture and compares sizes with the shipped art")
    }

    fn check(&self) -> CheckResult {
        let (config, level) = match &self.config {
            Some(config) => (config.clone(), None),
            None => match AppConfig::load_from_env() {
                Ok(app) => (app.assets, Some(app.level)),
                Err(_) => (AssetConfig::default(), None),
            },
        };

        let mut details = Details::new();
        details.note(format!("Directory: {}", config.resolved_dir().display()));

        let store = match AssetStore::load(&config) {
            Ok(store) => store,
            Err(e) => {
                details.fail(e);
                return details.conclude("Failed to load assets");
            }
        };

        let metrics = store.metrics();
        let shipped = SpriteMetrics::default();

        for key in [
            TextureKey::Background,
            TextureKey::Target,
            TextureKey::Player,
            TextureKey::Banner,
        ] {
            let [w, h] = store.size(key);
            if metrics.size(key) == shipped.size(key) {
                let frames = store.frames(key).len();
                details.pass(format!("{:?}: {}x{} ({} frame(s))", key, w, h, frames));
            } else {
                details.warn(format!(
                    "{:?}: {}x{} differs from the shipped {:?}",
                    key,
                    w,
                    h,
                    shipped.size(key)
                ));
            }
        }

        // Uncovered world shows the clear color at the edges
        if let Some(level) = level {
            let [bg_w, bg_h] = metrics.size(TextureKey::Background);
            let [world_w, world_h] = level.world_size;
            if bg_w < world_w || bg_h < world_h {
                details.warn(format!(
                    "Background {}x{} does not cover world {}x{}",
                    bg_w, bg_h, world_w, world_h
                ));
            }
        }

        details.finish(
            format!("{} textures decoded", store.texture_count()),
            "Assets loaded with warnings",
            "Failed to load assets",
        )
    }
}
