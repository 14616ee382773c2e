//! Level tuning and sprite dimensions

use enum_map::{EnumMap, enum_map};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::animation::PlayMode;
use super::input::MovementMode;
use super::scene::TextureKey;

/// Tunable constants of the level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Size of the playable world
    pub world_size: [f32; 2],
    /// Size of the visible area, must fit inside the world
    pub view_size: [f32; 2],
    pub player_start: [f32; 2],
    pub target_position: [f32; 2],
    /// Player speed in world units per second
    pub player_speed: f32,
    /// Seconds each player animation frame is shown
    pub frame_duration: f32,
    pub play_mode: PlayMode,
    pub movement: MovementMode,
    /// Win banner position in UI units
    pub banner_position: [f32; 2],
    /// Elapsed-time label position in UI units
    pub timer_position: [f32; 2],
    pub timer_font_size: f32,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            world_size: [800.0, 500.0],
            view_size: [640.0, 480.0],
            player_start: [20.0, 20.0],
            target_position: [400.0, 300.0],
            player_speed: 300.0,
            frame_duration: 0.1,
            play_mode: PlayMode::LoopPingPong,
            movement: MovementMode::Priority,
            banner_position: [170.0, 60.0],
            timer_position: [500.0, 440.0],
            timer_font_size: 28.0,
        }
    }
}

/// Reasons a level configuration is rejected
#[derive(Debug, Error, PartialEq)]
pub enum LevelConfigError {
    #[error("{field} must be finite, got {value:?}")]
    NotFinite { field: &'static str, value: [f32; 2] },

    #[error("{field} must be positive, got {value:?}")]
    NonPositiveSize { field: &'static str, value: [f32; 2] },

    #[error("view {view:?} does not fit inside world {world:?}")]
    ViewLargerThanWorld { view: [f32; 2], world: [f32; 2] },

    #[error("player speed must be finite and not negative, got {0}")]
    NegativeSpeed(f32),

    #[error("frame duration must be finite and positive, got {0}")]
    NonPositiveFrameDuration(f32),
}

impl LevelConfig {
    /// Checks the invariants the level loop relies on
    pub fn validate(&self) -> Result<(), LevelConfigError> {
        for (field, value) in [
            ("world_size", self.world_size),
            ("view_size", self.view_size),
            ("player_start", self.player_start),
            ("target_position", self.target_position),
        ] {
            if !value.iter().all(|v| v.is_finite()) {
                return Err(LevelConfigError::NotFinite { field, value });
            }
        }
        for (field, value) in [("world_size", self.world_size), ("view_size", self.view_size)] {
            if value.iter().any(|&v| v <= 0.0) {
                return Err(LevelConfigError::NonPositiveSize { field, value });
            }
        }
        if self.view_size[0] > self.world_size[0] || self.view_size[1] > self.world_size[1] {
            return Err(LevelConfigError::ViewLargerThanWorld {
                view: self.view_size,
                world: self.world_size,
            });
        }
        if !self.player_speed.is_finite() || self.player_speed < 0.0 {
            return Err(LevelConfigError::NegativeSpeed(self.player_speed));
        }
        if !self.frame_duration.is_finite() || self.frame_duration <= 0.0 {
            return Err(LevelConfigError::NonPositiveFrameDuration(
                self.frame_duration,
            ));
        }
        Ok(())
    }
}

/// Pixel dimensions of each texture, which double as actor sizes
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteMetrics {
    sizes: EnumMap<TextureKey, [f32; 2]>,
    player_frames: usize,
}

impl SpriteMetrics {
    pub fn new(sizes: EnumMap<TextureKey, [f32; 2]>, player_frames: usize) -> Self {
        Self {
            sizes,
            player_frames: player_frames.max(1),
        }
    }

    pub fn size(&self, key: TextureKey) -> [f32; 2] {
        self.sizes[key]
    }

    /// Number of frames in the player animation
    pub fn player_frames(&self) -> usize {
        self.player_frames
    }
}

impl Default for SpriteMetrics {
    /// Dimensions of the art shipped in `assets/`
    fn default() -> Self {
        Self::new(
            enum_map! {
                TextureKey::Background => [800.0, 800.0],
                TextureKey::Target => [64.0, 64.0],
                TextureKey::Player => [48.0, 48.0],
                TextureKey::Banner => [300.0, 120.0],
            },
            4,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(LevelConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_view_must_fit_world() {
        let config = LevelConfig {
            view_size: [900.0, 480.0],
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LevelConfigError::ViewLargerThanWorld { .. })
        ));
    }

    #[test]
    fn test_speed_and_frame_duration() {
        let config = LevelConfig {
            player_speed: -1.0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(LevelConfigError::NegativeSpeed(-1.0)));

        let config = LevelConfig {
            frame_duration: 0.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(LevelConfigError::NonPositiveFrameDuration(0.0))
        );
    }

    #[test]
    fn test_nan_and_infinite_tuning_rejected() {
        let config = LevelConfig {
            player_speed: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LevelConfigError::NegativeSpeed(v)) if v.is_nan()
        ));

        let config = LevelConfig {
            player_speed: f32::INFINITY,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(LevelConfigError::NegativeSpeed(_))));

        let config = LevelConfig {
            frame_duration: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LevelConfigError::NonPositiveFrameDuration(v)) if v.is_nan()
        ));
    }

    #[test]
    fn test_sizes_must_be_finite_and_positive() {
        let config = LevelConfig {
            world_size: [f32::NAN, 500.0],
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LevelConfigError::NotFinite { field: "world_size", .. })
        ));

        let config = LevelConfig {
            player_start: [20.0, f32::INFINITY],
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LevelConfigError::NotFinite { field: "player_start", .. })
        ));

        let config = LevelConfig {
            view_size: [0.0, 480.0],
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LevelConfigError::NonPositiveSize { field: "view_size", .. })
        ));

        let config = LevelConfig {
            world_size: [-800.0, -500.0],
            view_size: [-900.0, -600.0],
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LevelConfigError::NonPositiveSize { field: "world_size", .. })
        ));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: LevelConfig = ::config::Config::builder()
            .add_source(::config::File::from_str(
                "player_speed = 450.0\nmovement = \"combined\"",
                ::config::FileFormat::Toml,
            ))
            .build()
            .and_then(|c| c.try_deserialize())
            .expect("valid toml");
        assert_eq!(config.player_speed, 450.0);
        assert_eq!(config.movement, MovementMode::Combined);
        assert_eq!(config.world_size, [800.0, 500.0]);
    }
}
