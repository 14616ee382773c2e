//! Positioned, drawable entities

use super::animation::FrameAnimation;
use super::geometry::Rect;
use super::scene::{Sprite, TextureKey};
use super::tween::{Action, Appearance};

/// A drawable entity with a position, size, velocity and running actions
#[derive(Debug, Clone)]
pub struct Actor {
    /// Bottom-left corner in world units
    pub position: [f32; 2],
    pub size: [f32; 2],
    /// Pivot for rotation and scaling, relative to `position`
    pub origin: [f32; 2],
    /// World units per second
    pub velocity: [f32; 2],
    pub appearance: Appearance,
    texture: TextureKey,
    animation: Option<FrameAnimation>,
    animation_time: f32,
    actions: Vec<Action>,
}

impl Actor {
    /// Creates a static actor at the origin
    pub fn new(texture: TextureKey, size: [f32; 2]) -> Self {
        Self {
            position: [0.0, 0.0],
            size,
            origin: [0.0, 0.0],
            velocity: [0.0, 0.0],
            appearance: Appearance::default(),
            texture,
            animation: None,
            animation_time: 0.0,
            actions: Vec::new(),
        }
    }

    /// Builder method to set the position
    pub fn with_position(mut self, position: [f32; 2]) -> Self {
        self.position = position;
        self
    }

    /// Builder method to put the origin at the center of the actor
    pub fn with_centered_origin(mut self) -> Self {
        self.origin = [self.size[0] / 2.0, self.size[1] / 2.0];
        self
    }

    /// Builder method to attach a frame animation
    pub fn with_animation(mut self, animation: FrameAnimation) -> Self {
        self.animation = Some(animation);
        self
    }

    /// Builder method to set visibility
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.appearance.visible = visible;
        self
    }

    /// Attaches an action; it starts advancing on the next `act`
    pub fn add_action(&mut self, action: Action) {
        self.actions.push(action);
    }

    /// Number of actions that have not finished yet
    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    /// Advances the actor by `dt` seconds
    ///
    /// Actions run first and are dropped once finished, then the frame
    /// animation clock, then position integration.
    pub fn act(&mut self, dt: f32) {
        let appearance = &mut self.appearance;
        self.actions
            .retain_mut(|action| !action.act(dt, appearance).is_finished());

        if self.animation.is_some() {
            self.animation_time += dt;
        }

        self.position[0] += self.velocity[0] * dt;
        self.position[1] += self.velocity[1] * dt;
    }

    /// Unrotated, unscaled bounding box
    pub fn bounding_rect(&self) -> Rect {
        Rect::new(self.position[0], self.position[1], self.size[0], self.size[1])
    }

    /// The point the origin sits on in world space
    pub fn pivot(&self) -> [f32; 2] {
        [
            self.position[0] + self.origin[0],
            self.position[1] + self.origin[1],
        ]
    }

    /// Index of the animation frame to draw
    pub fn frame(&self) -> usize {
        self.animation
            .as_ref()
            .map_or(0, |anim| anim.frame_index(self.animation_time))
    }

    pub fn is_visible(&self) -> bool {
        self.appearance.visible
    }

    /// Snapshot for drawing, or `None` when hidden
    pub fn sprite(&self) -> Option<Sprite> {
        if !self.appearance.visible {
            return None;
        }

        Some(Sprite {
            texture: self.texture,
            frame: self.frame(),
            position: self.position,
            size: self.size,
            origin: self.origin,
            rotation: self.appearance.rotation,
            scale: self.appearance.scale,
            color: self.appearance.color,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::animation::PlayMode;

    #[test]
    fn test_act_integrates_velocity() {
        let mut actor = Actor::new(TextureKey::Player, [10.0, 10.0]).with_position([20.0, 20.0]);
        actor.velocity = [300.0, -100.0];
        actor.act(0.5);
        assert_eq!(actor.position, [170.0, -30.0]);
    }

    #[test]
    fn test_centered_origin_and_pivot() {
        let actor = Actor::new(TextureKey::Target, [64.0, 32.0])
            .with_position([400.0, 300.0])
            .with_centered_origin();
        assert_eq!(actor.origin, [32.0, 16.0]);
        assert_eq!(actor.pivot(), [432.0, 316.0]);
    }

    #[test]
    fn test_finished_actions_are_dropped() {
        let mut actor = Actor::new(TextureKey::Banner, [10.0, 10.0]);
        actor.add_action(Action::fade_out(1.0));
        actor.add_action(Action::forever(Action::rotate_by(90.0, 1.0)));
        assert_eq!(actor.action_count(), 2);

        actor.act(1.0);
        assert_eq!(actor.action_count(), 1);
        assert_eq!(actor.appearance.color[3], 0.0);
    }

    #[test]
    fn test_animation_frame_advances() {
        let mut actor = Actor::new(TextureKey::Player, [10.0, 10.0])
            .with_animation(FrameAnimation::new(4, 0.1, PlayMode::LoopPingPong));
        assert_eq!(actor.frame(), 0);
        actor.act(0.35);
        assert_eq!(actor.frame(), 3);
        actor.act(0.1);
        assert_eq!(actor.frame(), 2);
    }

    #[test]
    fn test_hidden_actor_has_no_sprite() {
        let actor = Actor::new(TextureKey::Banner, [10.0, 10.0]).with_visible(false);
        assert!(actor.sprite().is_none());
    }

    #[test]
    fn test_bounding_rect_ignores_scale() {
        let mut actor = Actor::new(TextureKey::Target, [64.0, 64.0]).with_position([1.0, 2.0]);
        actor.appearance.scale = [0.0, 0.0];
        assert_eq!(actor.bounding_rect(), Rect::new(1.0, 2.0, 64.0, 64.0));
    }
}
