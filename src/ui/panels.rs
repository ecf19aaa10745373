use eframe::egui::{RichText, ScrollArea, Ui};

use super::egui_color;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Right side panel – series toggles
// ---------------------------------------------------------------------------

/// Render the series list with visibility checkboxes.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading(&state.style.legend_title);
    ui.separator();

    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.show_all();
        }
        if ui.small_button("None").clicked() {
            state.hide_all();
        }
    });

    let entries: Vec<_> = state
        .chart
        .lines
        .iter()
        .map(|l| (l.label.clone(), egui_color(l.color)))
        .collect();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (label, color) in &entries {
                let mut checked = state.is_visible(label);
                let text = RichText::new(label).color(*color);
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle(label);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title and line counts.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading(&state.chart.title);
        ui.separator();
        ui.label(format!(
            "{} lines, {} visible",
            state.chart.lines.len(),
            state.visible_lines().count()
        ));
    });
}
