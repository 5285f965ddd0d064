use eframe::egui;

use crate::geometry::{CropRect, GeometryMode, plan_crops};
use crate::settings::CropSettings;

const PREVIEW_STROKE_WIDTH: f32 = 2.0;

/// Maps an image-space rectangle onto the screen, with the image's top-left
/// pixel drawn at `origin` at native size.
pub fn to_screen_rect(origin: egui::Pos2, rect: &CropRect) -> egui::Rect {
    egui::Rect::from_min_max(
        origin + egui::vec2(rect.left as f32, rect.top as f32),
        origin + egui::vec2(rect.right as f32, rect.bottom as f32),
    )
}

/// Screen rectangles for every preview crop around the pointer at `pointer`
/// (image pixel coordinates).
pub fn preview_rects(
    origin: egui::Pos2,
    pointer: (i64, i64),
    settings: &CropSettings,
) -> Vec<egui::Rect> {
    plan_crops(pointer.0, pointer.1, settings, GeometryMode::Preview)
        .iter()
        .map(|crop| to_screen_rect(origin, &crop.rect))
        .collect()
}

pub fn paint_previews(
    painter: &egui::Painter,
    origin: egui::Pos2,
    pointer: (i64, i64),
    settings: &CropSettings,
) {
    let stroke = egui::Stroke::new(PREVIEW_STROKE_WIDTH, egui::Color32::RED);
    for rect in preview_rects(origin, pointer, settings) {
        painter.rect_stroke(rect, 0.0, stroke);
    }
}
