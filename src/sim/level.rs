//! The playable level: steer the player to the target
//!
//! Each frame runs, in order: input polling, actor updates, clamping the
//! player into the world, the win check, the elapsed-time counter and the
//! camera follow. Reaching the target switches [`LevelState`] from
//! `Playing` to `Won` exactly once, which starts the banner and target
//! animations and freezes the timer.

use std::any::Any;

use tracing::{info, trace};

use super::actor::Actor;
use super::animation::FrameAnimation;
use super::camera::Camera;
use super::config::{LevelConfig, SpriteMetrics};
use super::geometry::clamp;
use super::input::{KeyPoller, steer};
use super::scene::{Scene, TextLabel, TextureKey};
use super::screen::{Screen, ScreenRequest};
use super::tween::Action;

const CLEAR_COLOR: [f32; 4] = [0.8, 0.8, 1.0, 1.0];
const TIMER_COLOR: [f32; 4] = [0.0, 0.0, 0.5, 1.0];
const PULSE_RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
const PULSE_BLUE: [f32; 4] = [0.0, 0.0, 1.0, 1.0];

/// Progress of a single playthrough
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LevelState {
    #[default]
    Playing,
    Won,
}

impl LevelState {
    /// Moves `Playing` to `Won`
    ///
    /// Returns true only for the call that performed the transition.
    pub fn win(&mut self) -> bool {
        match self {
            LevelState::Playing => {
                *self = LevelState::Won;
                true
            }
            LevelState::Won => false,
        }
    }

    pub fn is_won(&self) -> bool {
        matches!(self, LevelState::Won)
    }
}

/// Text shown by the elapsed-time label, truncated to whole seconds
pub fn time_label(elapsed: f32) -> String {
    format!("Time: {}", elapsed as i32)
}

/// Banner animation: appear, fade in, then pulse red and blue forever
pub fn banner_animation() -> Action {
    Action::sequence(vec![
        Action::alpha(0.0, 0.0),
        Action::show(),
        Action::fade_in(2.0),
        Action::forever(Action::sequence(vec![
            Action::color(PULSE_RED, 1.0),
            Action::color(PULSE_BLUE, 1.0),
        ])),
    ])
}

/// Target animation: spin, shrink and fade out at the same time
pub fn vanish_animation() -> Action {
    Action::parallel(vec![
        Action::alpha(1.0, 0.0),
        Action::rotate_by(360.0, 1.0),
        Action::scale_to(0.0, 0.0, 2.0),
        Action::fade_out(1.0),
    ])
}

pub struct Level {
    config: LevelConfig,
    background: Actor,
    target: Actor,
    player: Actor,
    banner: Actor,
    camera: Camera,
    state: LevelState,
    elapsed: f32,
    time_label: String,
}

impl Level {
    /// Sets up a fresh playthrough
    pub fn new(config: LevelConfig, metrics: &SpriteMetrics) -> Self {
        let background = Actor::new(TextureKey::Background, metrics.size(TextureKey::Background));

        let target = Actor::new(TextureKey::Target, metrics.size(TextureKey::Target))
            .with_position(config.target_position)
            .with_centered_origin();

        let player = Actor::new(TextureKey::Player, metrics.size(TextureKey::Player))
            .with_animation(FrameAnimation::new(
                metrics.player_frames(),
                config.frame_duration,
                config.play_mode,
            ))
            .with_centered_origin()
            .with_position(config.player_start);

        let banner = Actor::new(TextureKey::Banner, metrics.size(TextureKey::Banner))
            .with_position(config.banner_position)
            .with_visible(false);

        let mut camera = Camera::new(config.view_size);
        camera.follow(player.pivot(), config.world_size);

        Self {
            config,
            background,
            target,
            player,
            banner,
            camera,
            state: LevelState::Playing,
            elapsed: 0.0,
            time_label: time_label(0.0),
        }
    }

    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    pub fn state(&self) -> LevelState {
        self.state
    }

    /// Seconds played before the target was reached (or so far)
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn time_label(&self) -> &str {
        &self.time_label
    }

    pub fn player(&self) -> &Actor {
        &self.player
    }

    pub fn target(&self) -> &Actor {
        &self.target
    }

    pub fn banner(&self) -> &Actor {
        &self.banner
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Keeps the whole player box inside the world
    fn clamp_player(&mut self) {
        let [world_w, world_h] = self.config.world_size;
        let [w, h] = self.player.size;
        self.player.position = [
            clamp(self.player.position[0], 0.0, world_w - w),
            clamp(self.player.position[1], 0.0, world_h - h),
        ];
    }

    fn reached_target(&self) -> bool {
        self.player
            .bounding_rect()
            .overlaps(&self.target.bounding_rect())
    }

    fn on_win(&mut self) {
        info!(
            elapsed = self.elapsed,
            player.x = self.player.position[0],
            player.y = self.player.position[1],
            "Target reached"
        );
        self.banner.add_action(banner_animation());
        self.target.add_action(vanish_animation());
    }
}

impl Screen for Level {
    fn name(&self) -> &str {
        "level"
    }

    fn update(&mut self, delta_time: f32, input: &dyn KeyPoller) -> Option<ScreenRequest> {
        let steering = steer(input, self.config.player_speed, self.config.movement);
        self.player.velocity = steering.velocity;

        self.background.act(delta_time);
        self.target.act(delta_time);
        self.player.act(delta_time);
        self.banner.act(delta_time);

        self.clamp_player();

        if self.reached_target() && self.state.win() {
            self.on_win();
        }

        if let LevelState::Playing = self.state {
            self.elapsed += delta_time;
            self.time_label = time_label(self.elapsed);
        }

        self.camera
            .follow(self.player.pivot(), self.config.world_size);

        trace!(
            player.x = self.player.position[0],
            player.y = self.player.position[1],
            camera.x = self.camera.center[0],
            camera.y = self.camera.center[1],
            "Level frame"
        );

        steering.menu_requested.then_some(ScreenRequest::Menu)
    }

    fn scene(&self) -> Scene {
        Scene {
            clear_color: CLEAR_COLOR,
            camera: self.camera.view_bounds(),
            ui_size: self.config.view_size,
            world: [&self.background, &self.target, &self.player]
                .into_iter()
                .filter_map(Actor::sprite)
                .collect(),
            ui: self.banner.sprite().into_iter().collect(),
            labels: vec![TextLabel {
                text: self.time_label.clone(),
                position: self.config.timer_position,
                size: self.config.timer_font_size,
                color: TIMER_COLOR,
            }],
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
