//! Title screen

use std::any::Any;

use super::actor::Actor;
use super::camera::Bounds;
use super::config::{LevelConfig, SpriteMetrics};
use super::input::{Key, KeyPoller};
use super::scene::{Scene, TextLabel, TextureKey};
use super::screen::{Screen, ScreenRequest};

const TITLE_COLOR: [f32; 4] = [0.0, 0.0, 0.5, 1.0];
const PROMPT_COLOR: [f32; 4] = [0.1, 0.1, 0.1, 1.0];

/// Menu prompt for the default key bindings
pub const DEFAULT_PROMPT: &str = "Press S to start, arrows to move, M for this menu";

/// Shows the title until the start key is pressed
pub struct MenuScreen {
    view_size: [f32; 2],
    background: Actor,
    prompt: String,
}

impl MenuScreen {
    pub fn new(config: &LevelConfig, metrics: &SpriteMetrics, prompt: impl Into<String>) -> Self {
        Self {
            view_size: config.view_size,
            background: Actor::new(TextureKey::Background, metrics.size(TextureKey::Background)),
            prompt: prompt.into(),
        }
    }
}

impl Screen for MenuScreen {
    fn name(&self) -> &str {
        "menu"
    }

    fn update(&mut self, delta_time: f32, input: &dyn KeyPoller) -> Option<ScreenRequest> {
        self.background.act(delta_time);
        input
            .is_key_down(Key::Start)
            .then_some(ScreenRequest::Level)
    }

    fn scene(&self) -> Scene {
        let [w, h] = self.view_size;
        Scene {
            clear_color: [0.8, 0.8, 1.0, 1.0],
            camera: Bounds::from_size(self.view_size),
            ui_size: self.view_size,
            world: self.background.sprite().into_iter().collect(),
            ui: Vec::new(),
            labels: vec![
                TextLabel {
                    text: "Mouse & Cheese".to_string(),
                    position: [w * 0.25, h * 0.6],
                    size: 48.0,
                    color: TITLE_COLOR,
                },
                TextLabel {
                    text: self.prompt.clone(),
                    position: [w * 0.12, h * 0.4],
                    size: 18.0,
                    color: PROMPT_COLOR,
                },
            ],
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::input::HeldKeys;

    fn menu() -> MenuScreen {
        MenuScreen::new(&LevelConfig::default(), &SpriteMetrics::default(), DEFAULT_PROMPT)
    }

    #[test]
    fn test_waits_for_start() {
        let mut menu = menu();
        assert_eq!(menu.update(0.016, &HeldKeys::none()), None);
        assert_eq!(menu.update(0.016, &HeldKeys::of(&[Key::Menu])), None);
        assert_eq!(
            menu.update(0.016, &HeldKeys::of(&[Key::Start])),
            Some(ScreenRequest::Level)
        );
    }

    #[test]
    fn test_scene_is_static() {
        let scene = menu().scene();
        assert_eq!(scene.camera, Bounds::from_size([640.0, 480.0]));
        assert_eq!(scene.labels.len(), 2);
        assert_eq!(scene.world.len(), 1);
    }

    #[test]
    fn test_prompt_is_shown() {
        let menu = MenuScreen::new(
            &LevelConfig::default(),
            &SpriteMetrics::default(),
            "Press Enter to start",
        );
        let scene = menu.scene();
        assert_eq!(scene.labels[1].text, "Press Enter to start");
    }
}
