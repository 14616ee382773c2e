//! Game simulation module
//!
//! Handles screens, game state and logic. Nothing in here depends on the
//! window or the GPU, so every rule can be exercised headless.

pub mod actor;
pub mod animation;
pub mod camera;
pub mod config;
pub mod geometry;
pub mod input;
pub mod level;
pub mod menu;
pub mod scene;
pub mod screen;
pub mod tween;

use tracing::info;

pub use config::{LevelConfig, LevelConfigError, SpriteMetrics};
pub use input::{Key, KeyPoller, MovementMode};
pub use level::{Level, LevelState};
pub use menu::MenuScreen;
pub use scene::{Scene, Sprite, TextLabel, TextureKey};
pub use screen::{Screen, ScreenRequest};

/// Game world state
///
/// Hosts the active screen and decides which screen replaces it when a
/// screen asks to navigate away.
pub struct World {
    /// Total number of simulation ticks elapsed
    tick_count: u64,
    /// Total simulation time elapsed in seconds
    sim_time: f64,
    /// Time scale multiplier (1.0 = normal speed, 0.0 = frozen, 2.0 = 2x speed)
    time_scale: f32,
    /// Whether the simulation is paused
    paused: bool,
    level_config: LevelConfig,
    metrics: SpriteMetrics,
    menu_prompt: String,
    screen: Box<dyn Screen>,
}

impl World {
    /// Creates a world showing a fresh level
    pub fn new(level_config: LevelConfig, metrics: SpriteMetrics) -> Self {
        let mut screen: Box<dyn Screen> = Box::new(Level::new(level_config.clone(), &metrics));
        screen.show();
        Self {
            tick_count: 0,
            sim_time: 0.0,
            time_scale: 1.0,
            paused: false,
            level_config,
            metrics,
            menu_prompt: menu::DEFAULT_PROMPT.to_string(),
            screen,
        }
    }

    /// Builder method to set the menu's key hint
    ///
    /// Only menus opened afterwards show the new prompt.
    pub fn with_menu_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.menu_prompt = prompt.into();
        self
    }

    /// Builder method to choose the first screen
    pub fn with_start_screen(mut self, request: ScreenRequest) -> Self {
        self.navigate(request);
        self
    }

    /// Builder method to set the time scale
    pub fn with_time_scale(mut self, scale: f32) -> Self {
        self.time_scale = scale.max(0.0);
        self
    }

    /// Builder method to set the paused state
    pub fn with_paused(mut self, paused: bool) -> Self {
        self.paused = paused;
        self
    }

    /// Advances the active screen by one frame
    pub fn tick(&mut self, delta_time: f32, input: &dyn KeyPoller) {
        if self.paused {
            return;
        }

        let scaled_delta = delta_time * self.time_scale;
        self.tick_count += 1;
        self.sim_time += scaled_delta as f64;

        if let Some(request) = self.screen.update(scaled_delta, input) {
            self.navigate(request);
        }
    }

    /// Replaces the active screen with the one `request` names
    pub fn navigate(&mut self, request: ScreenRequest) {
        let next: Box<dyn Screen> = match request {
            ScreenRequest::Menu => Box::new(MenuScreen::new(
                &self.level_config,
                &self.metrics,
                self.menu_prompt.as_str(),
            )),
            ScreenRequest::Level => Box::new(Level::new(self.level_config.clone(), &self.metrics)),
        };
        self.replace_screen(next);
    }

    /// Swaps in `next`, running the lifecycle hooks of both screens
    pub fn replace_screen(&mut self, mut next: Box<dyn Screen>) {
        info!(from = self.screen.name(), to = next.name(), "Switching screen");
        self.screen.hide();
        self.screen.dispose();
        next.show();
        self.screen = next;
    }

    /// Returns the current tick count
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Returns the total simulation time in seconds
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    /// Sets the time scale multiplier
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    /// Returns the current time scale
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Pauses the simulation
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            self.screen.pause();
        }
    }

    /// Resumes the simulation
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            self.screen.resume();
        }
    }

    /// Returns whether the simulation is paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Forwards a window size change to the active screen
    pub fn resize(&mut self, width: u32, height: u32) {
        self.screen.resize(width, height);
    }

    /// Returns the active screen
    pub fn screen(&self) -> &dyn Screen {
        self.screen.as_ref()
    }

    /// Returns the level if it is the active screen
    pub fn level(&self) -> Option<&Level> {
        self.screen.as_any().downcast_ref::<Level>()
    }

    /// What to draw this frame
    pub fn scene(&self) -> Scene {
        self.screen.scene()
    }

    pub fn level_config(&self) -> &LevelConfig {
        &self.level_config
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(LevelConfig::default(), SpriteMetrics::default())
    }
}

#[cfg(test)]
mod tests {
    use std::any::Any;
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::sim::camera::Bounds;
    use crate::sim::input::HeldKeys;

    /// Records lifecycle calls and asks for the menu on its first update
    struct Recorder {
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl Screen for Recorder {
        fn name(&self) -> &str {
            "recorder"
        }

        fn update(&mut self, _delta_time: f32, _input: &dyn KeyPoller) -> Option<ScreenRequest> {
            self.log.borrow_mut().push("update");
            Some(ScreenRequest::Menu)
        }

        fn scene(&self) -> Scene {
            Scene {
                clear_color: [0.0; 4],
                camera: Bounds::from_size([1.0, 1.0]),
                ui_size: [1.0, 1.0],
                world: Vec::new(),
                ui: Vec::new(),
                labels: Vec::new(),
            }
        }

        fn show(&mut self) {
            self.log.borrow_mut().push("show");
        }

        fn hide(&mut self) {
            self.log.borrow_mut().push("hide");
        }

        fn pause(&mut self) {
            self.log.borrow_mut().push("pause");
        }

        fn resume(&mut self) {
            self.log.borrow_mut().push("resume");
        }

        fn dispose(&mut self) {
            self.log.borrow_mut().push("dispose");
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn test_world_starts_on_level() {
        let world = World::default();
        assert_eq!(world.tick_count(), 0);
        assert_eq!(world.sim_time(), 0.0);
        assert_eq!(world.screen().name(), "level");
        assert!(world.level().is_some());
    }

    #[test]
    fn test_tick_scales_time() {
        let mut world = World::default().with_time_scale(2.0);
        world.tick(0.5, &HeldKeys::none());
        assert_eq!(world.tick_count(), 1);
        assert_eq!(world.sim_time(), 1.0);
        let level = world.level().expect("level active");
        assert_eq!(level.elapsed(), 1.0);
    }

    #[test]
    fn test_paused_world_does_not_advance() {
        let mut world = World::default().with_paused(true);
        world.tick(1.0, &HeldKeys::of(&[Key::Right]));
        assert_eq!(world.tick_count(), 0);
        assert_eq!(world.level().map(|l| l.player().position), Some([20.0, 20.0]));
    }

    #[test]
    fn test_menu_round_trip_starts_fresh_level() {
        let mut world = World::default();
        world.tick(1.0, &HeldKeys::none());
        world.tick(0.1, &HeldKeys::of(&[Key::Menu]));
        assert_eq!(world.screen().name(), "menu");
        assert!(world.level().is_none());

        world.tick(0.1, &HeldKeys::of(&[Key::Start]));
        let level = world.level().expect("level active");
        assert_eq!(level.elapsed(), 0.0);
        assert_eq!(level.player().position, [20.0, 20.0]);
    }

    #[test]
    fn test_start_screen_builder() {
        let world = World::default().with_start_screen(ScreenRequest::Menu);
        assert_eq!(world.screen().name(), "menu");
        assert_eq!(world.scene().labels[1].text, menu::DEFAULT_PROMPT);
    }

    #[test]
    fn test_menu_prompt_builder() {
        let world = World::default()
            .with_menu_prompt("Press Enter to start")
            .with_start_screen(ScreenRequest::Menu);
        assert_eq!(world.scene().labels[1].text, "Press Enter to start");
    }

    #[test]
    fn test_level_config_is_kept() {
        let config = LevelConfig {
            player_speed: 120.0,
            ..Default::default()
        };
        let world = World::new(config.clone(), SpriteMetrics::default());
        assert_eq!(world.level_config(), &config);
    }

    #[test]
    fn test_lifecycle_hooks() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut world = World::default();
        world.replace_screen(Box::new(Recorder { log: log.clone() }));

        world.pause();
        world.pause();
        world.resume();
        world.tick(0.1, &HeldKeys::none());

        assert_eq!(
            *log.borrow(),
            vec!["show", "pause", "resume", "update", "hide", "dispose"]
        );
        assert_eq!(world.screen().name(), "menu");
    }
}
