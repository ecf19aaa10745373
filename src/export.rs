use std::borrow::Cow;
use std::path::Path;
use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate};
use eframe::egui;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::{register_font, FontStyle};
use thiserror::Error;

use crate::chart::{Chart, LineKind, PlotLine};
use crate::color::Rgb;
use crate::confirm::{check_target, Confirm, WriteDecision};
use crate::style::PlotStyle;

/// Font family every text element is drawn with.
const FONT_FAMILY: &str = "sans-serif";
/// Font from egui's built-in set used for file output.
const FONT_NAME: &str = "Ubuntu-Light";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("unsupported output format '.{0}' (use png, jpg, bmp or svg)")]
    UnsupportedFormat(String),

    #[error("checking output path: {0}")]
    Io(#[from] std::io::Error),

    #[error("figure is too large to render at {0} dpi")]
    TooLarge(u32),

    #[error("loading font: {0}")]
    Font(String),

    #[error("drawing chart: {0}")]
    Render(String),

    #[error("encoding image: {0}")]
    Encode(#[from] image::ImageError),
}

// ---------------------------------------------------------------------------
// Output format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
    Bmp,
    Svg,
}

impl OutputFormat {
    /// Pick the format from the path's extension.
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match ext.as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpg" | "jpeg" => Ok(OutputFormat::Jpeg),
            "bmp" => Ok(OutputFormat::Bmp),
            "svg" => Ok(OutputFormat::Svg),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }

    fn image_format(self) -> Option<image::ImageFormat> {
        match self {
            OutputFormat::Png => Some(image::ImageFormat::Png),
            OutputFormat::Jpeg => Some(image::ImageFormat::Jpeg),
            OutputFormat::Bmp => Some(image::ImageFormat::Bmp),
            OutputFormat::Svg => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// What happened to a save request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// The target exists and overwriting it was declined.
    Declined,
    /// The target exists and is not a regular file.
    Protected,
}

/// Save `chart` to `path`, asking `confirm` before replacing a file.
///
/// The format is checked before anything is asked.
pub fn save_chart(
    chart: &Chart,
    style: &PlotStyle,
    path: &Path,
    dpi: u32,
    confirm: &mut dyn Confirm,
) -> Result<SaveOutcome, ExportError> {
    let format = OutputFormat::from_path(path)?;

    match check_target(path, confirm)? {
        WriteDecision::Write => {}
        WriteDecision::Declined => return Ok(SaveOutcome::Declined),
        WriteDecision::NotAFile => return Ok(SaveOutcome::Protected),
    }

    render_to_file(chart, style, path, dpi, format)?;
    log::info!("Wrote {} ({format:?}, {dpi} dpi)", path.display());
    Ok(SaveOutcome::Saved)
}

/// Render unconditionally, replacing any existing file.
pub fn render_to_file(
    chart: &Chart,
    style: &PlotStyle,
    path: &Path,
    dpi: u32,
    format: OutputFormat,
) -> Result<(), ExportError> {
    let (width, height) = style.pixel_size(dpi).ok_or(ExportError::TooLarge(dpi))?;
    ensure_font()?;

    match format.image_format() {
        None => {
            let root = SVGBackend::new(path, (width, height)).into_drawing_area();
            draw_chart(&root, chart, style, dpi).map_err(|e| ExportError::Render(e.to_string()))?;
        }
        Some(image_format) => {
            let mut buffer = vec![0u8; width as usize * height as usize * 3];
            {
                let root = BitMapBackend::with_buffer(&mut buffer, (width, height))
                    .into_drawing_area();
                draw_chart(&root, chart, style, dpi)
                    .map_err(|e| ExportError::Render(e.to_string()))?;
            }
            image::save_buffer_with_format(
                path,
                &buffer,
                width,
                height,
                image::ColorType::Rgb8,
                image_format,
            )?;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Fonts
// ---------------------------------------------------------------------------

/// Register egui's bundled sans font with plotters, once per process.
fn ensure_font() -> Result<(), ExportError> {
    static REGISTERED: OnceLock<Result<(), String>> = OnceLock::new();
    REGISTERED
        .get_or_init(|| {
            let defs = egui::FontDefinitions::default();
            let data = defs
                .font_data
                .get(FONT_NAME)
                .ok_or_else(|| format!("font {FONT_NAME} is not bundled"))?;
            let bytes: &'static [u8] = match &data.font {
                Cow::Borrowed(bytes) => *bytes,
                Cow::Owned(bytes) => Box::leak(bytes.clone().into_boxed_slice()),
            };
            register_font(FONT_FAMILY, FontStyle::Normal, bytes)
                .map_err(|_| format!("font {FONT_NAME} could not be parsed"))
        })
        .clone()
        .map_err(ExportError::Font)
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

fn plotters_color(c: Rgb) -> RGBColor {
    RGBColor(c.r, c.g, c.b)
}

/// Vertical grid lines as `(date, major)`. A month start that is also a
/// year tick is drawn once, as major.
fn grid_lines(chart: &Chart) -> Vec<(NaiveDate, bool)> {
    chart
        .minor_ticks
        .iter()
        .filter(|d| !chart.major_ticks.contains(d))
        .map(|d| (*d, false))
        .chain(chart.major_ticks.iter().map(|d| (*d, true)))
        .collect()
}

fn year_label(date: &NaiveDate) -> String {
    if date.ordinal() == 1 {
        date.format("%Y").to_string()
    } else {
        String::new()
    }
}

fn marker_polygon(line: &PlotLine, radius: f64) -> Vec<(i32, i32)> {
    line.marker
        .outline(radius)
        .into_iter()
        .map(|(x, y)| (x.round() as i32, y.round() as i32))
        .collect()
}

fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    chart: &Chart,
    style: &PlotStyle,
    dpi: u32,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let px = |points: f64| PlotStyle::points_to_pixels(points, dpi);

    root.fill(&WHITE)?;

    let (x0, x1) = chart.x_range;
    let (y0, y1) = chart.y_range;

    let mut ctx = ChartBuilder::on(root)
        .caption(&chart.title, (FONT_FAMILY, px(style.title_font_size)))
        .margin(px(12.0) as u32)
        .x_label_area_size(px(style.tick_font_size + style.label_font_size + 12.0) as u32)
        .y_label_area_size(px(style.tick_font_size * 3.0 + style.label_font_size) as u32)
        .build_cartesian_2d((x0..x1).yearly(), y0..y1)?;

    {
        let mut mesh = ctx.configure_mesh();
        mesh.disable_x_mesh()
            .x_labels(chart.major_ticks.len().max(2))
            .x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str())
            .x_label_formatter(&year_label)
            .axis_desc_style((FONT_FAMILY, px(style.label_font_size)))
            .label_style((FONT_FAMILY, px(style.tick_font_size)))
            .bold_line_style(BLACK.mix(0.25))
            .light_line_style(BLACK.mix(0.08));
        if !style.grid {
            mesh.disable_y_mesh();
        }
        mesh.draw()?;
    }

    // Vertical lines follow the chart's own year and month ticks.
    if style.grid {
        ctx.draw_series(grid_lines(chart).into_iter().map(|(date, major)| {
            let color = if major { BLACK.mix(0.25) } else { BLACK.mix(0.08) };
            PathElement::new(vec![(date, y0), (date, y1)], color)
        }))?;
    }

    let line_px = px(style.line_width).max(1.0).round() as u32;
    let marker_px = px(style.marker_size).max(2.0);
    let dash = (line_px * 4).max(6);

    for line in &chart.lines {
        let color = plotters_color(line.color);
        let stroke = color.stroke_width(line_px);
        let points = line.points.clone();

        let anno = match line.line {
            LineKind::Solid => ctx.draw_series(LineSeries::new(points, stroke))?,
            LineKind::Dashed => {
                ctx.draw_series(DashedLineSeries::new(points, dash, dash / 2, stroke))?
            }
            LineKind::Dotted => {
                ctx.draw_series(DashedLineSeries::new(points, line_px, line_px * 2, stroke))?
            }
        };

        let outline = marker_polygon(line, marker_px);
        let legend_outline = outline.clone();
        anno.label(line.label.as_str()).legend(move |(x, y)| {
            EmptyElement::at((x + 10, y)) + Polygon::new(legend_outline.clone(), color.filled())
        });

        ctx.draw_series(
            line.points
                .iter()
                .map(|&p| EmptyElement::at(p) + Polygon::new(outline.clone(), color.filled())),
        )?;
    }

    ctx.configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .label_font((FONT_FAMILY, px(style.legend_font_size)))
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK.mix(0.4))
        .draw()?;

    root.present()?;
    Ok(())
}
