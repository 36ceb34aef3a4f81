//! Conversions from the core palette colors into egui's color type.

use egui::Color32;
use shelf_core::palette::Rgb;

pub fn color32(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb.r, rgb.g, rgb.b)
}

pub fn color32_alpha(rgb: Rgb, opacity: f32) -> Color32 {
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(rgb.r, rgb.g, rgb.b, alpha)
}
