use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Output resolution used when none is given.
pub const DEFAULT_DPI: u32 = 96;
/// Highest DPI accepted for file output.
pub const MAX_DPI: u32 = 600;
/// Largest figure, in pixels, that file output will allocate.
pub const MAX_PIXELS: u64 = 100_000_000;

#[derive(Debug, Error)]
pub enum StyleError {
    #[error("reading style file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("parsing style file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// PlotStyle – everything the renderers need besides the data
// ---------------------------------------------------------------------------

/// Explicit chart theme, passed to the chart builder and both renderers.
///
/// Every field has a default, so a style file only needs the keys it
/// changes:
///
/// ```json
/// { "title": "Weigh-ins", "figure_size": [12.0, 6.0], "grid": false }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlotStyle {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub legend_title: String,
    /// Width and height in inches.
    pub figure_size: (f64, f64),
    /// Font sizes in points.
    pub title_font_size: f64,
    pub label_font_size: f64,
    pub tick_font_size: f64,
    pub legend_font_size: f64,
    /// Line width in points.
    pub line_width: f64,
    /// Marker radius in points.
    pub marker_size: f64,
    pub grid: bool,
    pub palette_saturation: f32,
    pub palette_lightness: f32,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            title: "Little Fat Geckos".into(),
            x_label: "Date".into(),
            y_label: "Mass (g)".into(),
            legend_title: "Gecko".into(),
            figure_size: (16.0, 9.0),
            title_font_size: 24.0,
            label_font_size: 20.0,
            tick_font_size: 16.0,
            legend_font_size: 16.0,
            line_width: 2.5,
            marker_size: 5.0,
            grid: true,
            palette_saturation: 0.65,
            palette_lightness: 0.55,
        }
    }
}

impl PlotStyle {
    /// Load overrides from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, StyleError> {
        let text = std::fs::read_to_string(path).map_err(|source| StyleError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| StyleError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Pixel size of the figure at `dpi`, or `None` when it exceeds
    /// [`MAX_PIXELS`].
    pub fn pixel_size(&self, dpi: u32) -> Option<(u32, u32)> {
        let (w, h) = self.figure_size;
        let dpi = dpi as f64;
        let width = (w * dpi).round().max(1.0);
        let height = (h * dpi).round().max(1.0);
        if !(width * height).is_finite() || width * height > MAX_PIXELS as f64 {
            return None;
        }
        Some((width as u32, height as u32))
    }

    /// Convert a length in points to pixels at `dpi`.
    pub fn points_to_pixels(points: f64, dpi: u32) -> f64 {
        points * dpi as f64 / 72.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_is_default() {
        assert_eq!(PlotStyle::from_json("{}").unwrap(), PlotStyle::default());
    }

    #[test]
    fn partial_json_overrides_only_given_keys() {
        let style =
            PlotStyle::from_json(r#"{ "title": "Weigh-ins", "figure_size": [8.0, 4.5] }"#).unwrap();
        assert_eq!(style.title, "Weigh-ins");
        assert_eq!(style.figure_size, (8.0, 4.5));
        assert_eq!(style.y_label, "Mass (g)");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(PlotStyle::from_json(r#"{ "colour": "red" }"#).is_err());
    }

    #[test]
    fn pixel_size_scales_with_dpi() {
        let style = PlotStyle::default();
        assert_eq!(style.pixel_size(96), Some((1536, 864)));
        assert_eq!(style.pixel_size(200), Some((3200, 1800)));
        assert_eq!(PlotStyle::points_to_pixels(72.0, 144), 144.0);
    }

    #[test]
    fn oversized_figures_have_no_pixel_size() {
        let style = PlotStyle::default();
        assert_eq!(style.pixel_size(MAX_DPI), Some((9600, 5400)));
        assert_eq!(style.pixel_size(20_000), None);

        let huge = PlotStyle {
            figure_size: (1.0e6, 1.0e6),
            ..PlotStyle::default()
        };
        assert_eq!(huge.pixel_size(1), None);
    }

    #[test]
    fn from_file_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = PlotStyle::from_file(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, StyleError::Io { .. }));
    }
}
