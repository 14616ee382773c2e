//! Renderer-facing snapshot of a screen
//!
//! Screens describe what to draw each frame as plain data. The renderer
//! never sees actors or game state, only sprites and text labels.

use enum_map::Enum;
use serde::{Deserialize, Serialize};

use super::camera::Bounds;

/// Identifies a texture (or a set of animation frames) provided by the asset layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Enum)]
#[serde(rename_all = "snake_case")]
pub enum TextureKey {
    Background,
    Target,
    Player,
    Banner,
}

/// A textured quad
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub texture: TextureKey,
    /// Animation frame within the texture set
    pub frame: usize,
    /// Bottom-left corner before rotation and scaling
    pub position: [f32; 2],
    pub size: [f32; 2],
    pub origin: [f32; 2],
    /// Degrees, counter-clockwise around the origin
    pub rotation: f32,
    pub scale: [f32; 2],
    pub color: [f32; 4],
}

impl Sprite {
    /// Corners after scaling and rotating around the origin
    ///
    /// Order: bottom-left, bottom-right, top-right, top-left.
    pub fn corners(&self) -> [[f32; 2]; 4] {
        let pivot = [
            self.position[0] + self.origin[0],
            self.position[1] + self.origin[1],
        ];
        let local = [
            [-self.origin[0], -self.origin[1]],
            [self.size[0] - self.origin[0], -self.origin[1]],
            [self.size[0] - self.origin[0], self.size[1] - self.origin[1]],
            [-self.origin[0], self.size[1] - self.origin[1]],
        ];

        let (sin, cos) = self.rotation.to_radians().sin_cos();
        local.map(|[x, y]| {
            let x = x * self.scale[0];
            let y = y * self.scale[1];
            [pivot[0] + x * cos - y * sin, pivot[1] + x * sin + y * cos]
        })
    }

    /// True when the sprite would not produce any visible pixels
    pub fn is_degenerate(&self) -> bool {
        self.scale[0] == 0.0 || self.scale[1] == 0.0 || self.color[3] <= 0.0
    }
}

/// Text drawn in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub text: String,
    /// Bottom-left of the text in UI units (y up)
    pub position: [f32; 2],
    /// Glyph height in UI units
    pub size: f32,
    pub color: [f32; 4],
}

/// Everything a screen wants drawn this frame
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub clear_color: [f32; 4],
    /// World area the camera shows
    pub camera: Bounds,
    /// Size of the fixed UI layer, in UI units
    pub ui_size: [f32; 2],
    /// World-space sprites, back to front
    pub world: Vec<Sprite>,
    /// UI-space sprites, drawn over the world
    pub ui: Vec<Sprite>,
    pub labels: Vec<TextLabel>,
}
