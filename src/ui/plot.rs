use std::ops::RangeInclusive;

use eframe::egui::Ui;
use egui_plot::{
    Corner, GridInput, GridMark, Legend, Line, LineStyle, MarkerShape, Plot, PlotPoint,
    PlotPoints, Points,
};

use super::egui_color;
use crate::chart::{date_to_x, x_to_date, LineKind, Marker};
use crate::state::AppState;

/// Grid step of a yearly mark, in days.
const YEAR_STEP: f64 = 365.0;
/// Grid step of a monthly mark, in days.
const MONTH_STEP: f64 = 30.0;

fn marker_shape(marker: Marker) -> MarkerShape {
    match marker {
        Marker::Hexagon => MarkerShape::Circle,
        Marker::Square => MarkerShape::Square,
        Marker::TriangleUp => MarkerShape::Up,
        Marker::Pentagon => MarkerShape::Diamond,
        Marker::Cross => MarkerShape::Cross,
        Marker::Plus => MarkerShape::Plus,
    }
}

fn line_style(kind: LineKind) -> LineStyle {
    match kind {
        LineKind::Solid => LineStyle::Solid,
        LineKind::Dashed => LineStyle::dashed_loose(),
        LineKind::Dotted => LineStyle::dotted_dense(),
    }
}

// ---------------------------------------------------------------------------
// Chart plot (central panel)
// ---------------------------------------------------------------------------

/// Render the chart in the central panel.
pub fn chart_plot(ui: &mut Ui, state: &AppState) {
    let chart = &state.chart;
    let style = &state.style;

    let major: Vec<f64> = chart.major_ticks.iter().map(|d| date_to_x(*d)).collect();
    let minor: Vec<f64> = chart.minor_ticks.iter().map(|d| date_to_x(*d)).collect();

    let spacer = move |input: GridInput| {
        let (lo, hi) = input.bounds;
        let in_view = |x: &&f64| **x >= lo && **x <= hi;
        let mut marks: Vec<GridMark> = minor
            .iter()
            .filter(in_view)
            .map(|&value| GridMark {
                value,
                step_size: MONTH_STEP,
            })
            .collect();
        marks.extend(major.iter().filter(in_view).map(|&value| GridMark {
            value,
            step_size: YEAR_STEP,
        }));
        marks
    };

    let year_formatter = |mark: GridMark, _range: &RangeInclusive<f64>| {
        if mark.step_size < YEAR_STEP {
            return String::new();
        }
        x_to_date(mark.value)
            .map(|d| d.format("%Y").to_string())
            .unwrap_or_default()
    };

    let hover = |name: &str, value: &PlotPoint| {
        let date = x_to_date(value.x)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        if name.is_empty() {
            format!("{date}\n{:.1}", value.y)
        } else {
            format!("{name}\n{date}\n{:.1}", value.y)
        }
    };

    let line_width = style.line_width as f32;
    let marker_radius = style.marker_size as f32;

    Plot::new("chart_plot")
        .legend(Legend::default().position(Corner::LeftTop))
        .x_axis_label(chart.x_label.as_str())
        .y_axis_label(chart.y_label.as_str())
        .x_grid_spacer(spacer)
        .x_axis_formatter(year_formatter)
        .label_formatter(hover)
        .show_grid(style.grid)
        .include_x(date_to_x(chart.x_range.0))
        .include_x(date_to_x(chart.x_range.1))
        .include_y(chart.y_range.0)
        .include_y(chart.y_range.1)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for line in state.visible_lines() {
                let color = egui_color(line.color);
                let coords: Vec<[f64; 2]> = line
                    .points
                    .iter()
                    .map(|(d, v)| [date_to_x(*d), *v])
                    .collect();

                plot_ui.line(
                    Line::new(PlotPoints::from(coords.clone()))
                        .name(&line.label)
                        .color(color)
                        .width(line_width)
                        .style(line_style(line.line)),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from(coords))
                        .name(&line.label)
                        .color(color)
                        .shape(marker_shape(line.marker))
                        .radius(marker_radius)
                        .filled(true),
                );
            }
        });
}
