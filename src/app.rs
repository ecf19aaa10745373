use eframe::egui;

use crate::chart::Chart;
use crate::state::AppState;
use crate::style::PlotStyle;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct GeckoPlotApp {
    pub state: AppState,
}

impl GeckoPlotApp {
    pub fn new(chart: Chart, style: PlotStyle) -> Self {
        Self {
            state: AppState::new(chart, style),
        }
    }
}

impl eframe::App for GeckoPlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title and counts ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Right side panel: series toggles ----
        egui::SidePanel::right("series_panel")
            .default_width(200.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::chart_plot(ui, &self.state);
        });
    }
}

/// Open a window showing `chart` and block until it is closed.
pub fn show_window(chart: Chart, style: PlotStyle) -> eframe::Result {
    let (w, h) = style.figure_size;
    let width = 1200.0_f32;
    let height = (width * (h / w) as f32).clamp(400.0, 1000.0) + 60.0;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width, height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let title = chart.title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(GeckoPlotApp::new(chart, style)))),
    )
}
