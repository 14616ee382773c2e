//! Level simulation health check

use crate::health::check::{CheckResult, Details, SystemCheck};
use crate::sim::input::HeldKeys;
use crate::sim::{Key, Level, LevelConfig, LevelState, SpriteMetrics, World};

const FRAME: f32 = 1.0 / 60.0;
const MAX_FRAMES: usize = 60 * 30;

/// Plays a scripted level headless: start, clamp, win, freeze
pub struct LevelCheck {
    config: LevelConfig,
}

impl LevelCheck {
    pub fn new() -> Self {
        Self {
            config: LevelConfig::default(),
        }
    }

    /// Checks a specific level configuration
    pub fn with_config(config: LevelConfig) -> Self {
        Self { config }
    }
}

impl Default for LevelCheck {
    fn default() -> Self {
        Self::new()
    }
}

/// The level, or a failure line if the world navigated away from it
fn active_level<'w>(world: &'w World, details: &mut Details) -> Option<&'w Level> {
    let level = world.level();
    if level.is_none() {
        details.fail(format!("Active screen is '{}'", world.screen().name()));
    }
    level
}

impl SystemCheck for LevelCheck {
    fn name(&self) -> &'static str {
        "Level Simulation"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Plays a scripted level: movement, world clamping, win and timer freeze")
    }

    fn check(&self) -> CheckResult {
        let mut details = Details::new();

        if let Err(e) = self.config.validate() {
            details.fail(e);
            return details.conclude("Level configuration invalid");
        }

        let mut world = World::new(self.config.clone(), SpriteMetrics::default());
        let Some(level) = active_level(&world, &mut details) else {
            return details.conclude("Level did not start");
        };
        if level.state() != LevelState::Playing || level.time_label() != "Time: 0" {
            details.fail(format!(
                "state {:?}, label {:?}",
                level.state(),
                level.time_label()
            ));
            return details.conclude("Level initialization failed");
        }
        details.pass("Level starts Playing with \"Time: 0\"");

        // Push against the left edge; the player must stay in the world
        let left = HeldKeys::of(&[Key::Left]);
        for _ in 0..120 {
            world.tick(FRAME, &left);
        }
        let Some(level) = active_level(&world, &mut details) else {
            return details.conclude("Level left unexpectedly");
        };
        let x = level.player().position[0];
        if x != 0.0 {
            details.fail(format!("x = {x}"));
            return details.conclude("Player escaped the world");
        }
        details.pass("Player clamped at the world edge");

        // Walk right then up until the bounding boxes overlap
        let target = level.target().bounding_rect();
        let mut frames = 0;
        while frames < MAX_FRAMES {
            let Some(level) = world.level() else { break };
            if level.state().is_won() {
                break;
            }
            let player = level.player().bounding_rect();
            let key = if player.x + player.width <= target.x {
                Key::Right
            } else {
                Key::Up
            };
            world.tick(FRAME, &HeldKeys::of(&[key]));
            frames += 1;
        }

        let Some(level) = active_level(&world, &mut details) else {
            return details.conclude("Level left unexpectedly");
        };
        if !level.state().is_won() {
            details.fail(format!(
                "Player at {:?} after {} frames",
                level.player().position,
                frames
            ));
            return details.conclude("Target never reached");
        }
        let won_at = level.elapsed();
        details.pass(format!(
            "Target reached after {:.2}s ({} frames)",
            won_at, frames
        ));

        for _ in 0..60 {
            world.tick(FRAME, &HeldKeys::none());
        }
        let Some(level) = active_level(&world, &mut details) else {
            return details.conclude("Level left unexpectedly");
        };
        if level.elapsed() != won_at {
            details.fail(format!("{} != {}", level.elapsed(), won_at));
            return details.conclude("Timer kept running after the win");
        }
        if !level.banner().is_visible() {
            details.fail("Banner is hidden");
            return details.conclude("Win banner missing");
        }
        details.pass(format!("Timer frozen at {:?}", level.time_label()));

        details.conclude("Level plays through to a win")
    }
}
