//! Text labels painted over the scene image
//!
//! Labels live in the y-up UI frame of the scene. egui works in y-down
//! points, so positions are mapped into the rect the scene image occupies.

use egui::{Align2, Color32, FontId, Painter, Pos2, Rect};

use crate::sim::{Scene, TextLabel};

/// Maps a y-up UI point into `rect`
pub fn ui_to_screen(rect: Rect, ui_size: [f32; 2], point: [f32; 2]) -> Pos2 {
    let sx = rect.width() / ui_size[0].max(f32::EPSILON);
    let sy = rect.height() / ui_size[1].max(f32::EPSILON);
    Pos2::new(rect.left() + point[0] * sx, rect.bottom() - point[1] * sy)
}

fn color32(color: [f32; 4]) -> Color32 {
    let [r, g, b, a] = color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

fn paint_label(painter: &Painter, rect: Rect, ui_size: [f32; 2], label: &TextLabel) {
    let scale = rect.height() / ui_size[1].max(f32::EPSILON);
    painter.text(
        ui_to_screen(rect, ui_size, label.position),
        Align2::LEFT_BOTTOM,
        &label.text,
        FontId::proportional((label.size * scale).max(1.0)),
        color32(label.color),
    );
}

/// Paints every label of `scene` over the image drawn in `rect`
pub fn paint_labels(painter: &Painter, rect: Rect, scene: &Scene) {
    for label in &scene.labels {
        paint_label(painter, rect, scene.ui_size, label);
    }
}
