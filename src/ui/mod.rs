use eframe::egui::Color32;

use crate::color::Rgb;

pub mod panels;
pub mod plot;

pub(crate) fn egui_color(c: Rgb) -> Color32 {
    Color32::from_rgb(c.r, c.g, c.b)
}
