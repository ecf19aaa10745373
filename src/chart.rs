use chrono::{Datelike, NaiveDate};

use crate::color::{ColorMap, Rgb};
use crate::data::model::SeriesCollection;
use crate::style::PlotStyle;

// ---------------------------------------------------------------------------
// Markers and line styles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Hexagon,
    Square,
    TriangleUp,
    Pentagon,
    Cross,
    Plus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Solid,
    Dashed,
    Dotted,
}

/// Marker cycle for raw series.
pub const MARKERS: [Marker; 6] = [
    Marker::Hexagon,
    Marker::Square,
    Marker::TriangleUp,
    Marker::Pentagon,
    Marker::Cross,
    Marker::Plus,
];

/// Line-style cycle for raw series.
pub const LINES: [LineKind; 3] = [LineKind::Solid, LineKind::Dashed, LineKind::Dotted];

/// Marker and line used for every smoothed series.
pub const ROLLING_MARKER: Marker = Marker::Cross;
pub const ROLLING_LINE: LineKind = LineKind::Dashed;

/// Marker and line style of raw series `i`. The line style advances once
/// per full marker cycle, giving `MARKERS.len() * LINES.len()` distinct pairs.
pub fn series_style(i: usize) -> (Marker, LineKind) {
    (
        MARKERS[i % MARKERS.len()],
        LINES[(i / MARKERS.len()) % LINES.len()],
    )
}

impl Marker {
    /// Closed outline of the marker as offsets from its centre, for a marker
    /// of the given radius. The y axis points down (screen space).
    pub fn outline(self, radius: f64) -> Vec<(f64, f64)> {
        match self {
            Marker::Hexagon => regular_polygon(6, radius, 0.0),
            Marker::Pentagon => regular_polygon(5, radius, -90.0),
            Marker::TriangleUp => regular_polygon(3, radius, -90.0),
            Marker::Square => {
                let s = radius * 0.85;
                vec![(-s, -s), (s, -s), (s, s), (-s, s)]
            }
            Marker::Plus => plus_outline(radius, 0.0),
            Marker::Cross => plus_outline(radius, 45.0),
        }
    }
}

fn regular_polygon(sides: usize, radius: f64, start_deg: f64) -> Vec<(f64, f64)> {
    (0..sides)
        .map(|k| {
            let a = (start_deg + 360.0 * k as f64 / sides as f64).to_radians();
            (radius * a.cos(), radius * a.sin())
        })
        .collect()
}

/// Filled plus sign, optionally rotated (45° gives a filled "x").
fn plus_outline(radius: f64, rotate_deg: f64) -> Vec<(f64, f64)> {
    let w = radius * 0.35;
    let r = radius;
    let pts = [
        (-w, -r),
        (w, -r),
        (w, -w),
        (r, -w),
        (r, w),
        (w, w),
        (w, r),
        (-w, r),
        (-w, w),
        (-r, w),
        (-r, -w),
        (-w, -w),
    ];
    let (sin, cos) = rotate_deg.to_radians().sin_cos();
    pts.iter()
        .map(|&(x, y)| (x * cos - y * sin, x * sin + y * cos))
        .collect()
}

// ---------------------------------------------------------------------------
// Date axis helpers
// ---------------------------------------------------------------------------

/// Plot x coordinate for a date (days since 0001-01-01).
pub fn date_to_x(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

/// Nearest date for a plot x coordinate.
pub fn x_to_date(x: f64) -> Option<NaiveDate> {
    if !x.is_finite() || x.abs() > i32::MAX as f64 {
        return None;
    }
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
}

fn jan_first(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Whole-year bounds around `[min, max]`: Jan 1 of `min`'s year up to
/// Jan 1 of the year after `max`.
pub fn year_bounds(min: NaiveDate, max: NaiveDate) -> (NaiveDate, NaiveDate) {
    (jan_first(min.year()), jan_first(max.year() + 1))
}

/// Every Jan 1 in `[start, end]`.
pub fn year_ticks(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let first = if start.ordinal() == 1 { start.year() } else { start.year() + 1 };
    (first..=end.year()).map(jan_first).filter(|d| *d <= end).collect()
}

/// Every first-of-month in `[start, end]`.
pub fn month_ticks(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    let mut cur = NaiveDate::from_ymd_opt(start.year(), start.month(), 1);
    while let Some(d) = cur {
        if d > end {
            break;
        }
        if d >= start {
            out.push(d);
        }
        cur = d.checked_add_months(chrono::Months::new(1));
    }
    out
}

// ---------------------------------------------------------------------------
// Chart – backend-neutral description of what to draw
// ---------------------------------------------------------------------------

/// One plotted line with its markers.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotLine {
    pub label: String,
    pub points: Vec<(NaiveDate, f64)>,
    pub marker: Marker,
    pub line: LineKind,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub legend_title: String,
    pub lines: Vec<PlotLine>,
    pub x_range: (NaiveDate, NaiveDate),
    pub y_range: (f64, f64),
    /// Yearly major ticks.
    pub major_ticks: Vec<NaiveDate>,
    /// Monthly minor ticks.
    pub minor_ticks: Vec<NaiveDate>,
}

impl Chart {
    /// Build the chart for `collection`. `None` when there is nothing to plot.
    pub fn build(collection: &SeriesCollection, style: &PlotStyle) -> Option<Chart> {
        let (min, max) = collection.date_range()?;

        let mut lines = Vec::new();
        for (i, series) in collection.iter().enumerate() {
            let (marker, line) = series_style(i);
            lines.push(PlotLine {
                label: series.name.clone(),
                points: series.mass_points(),
                marker,
                line,
                color: Rgb::GRAY,
            });
            if let Some(points) = series.rolling_points() {
                lines.push(PlotLine {
                    label: format!("rolling {}", series.name),
                    points,
                    marker: ROLLING_MARKER,
                    line: ROLLING_LINE,
                    color: Rgb::GRAY,
                });
            }
        }

        let labels: Vec<String> = lines.iter().map(|l| l.label.clone()).collect();
        let colors = ColorMap::new(&labels, style.palette_saturation, style.palette_lightness);
        for line in &mut lines {
            line.color = colors.color_for(&line.label);
        }

        let x_range = year_bounds(min, max);
        let top = collection.max_value().unwrap_or(0.0);
        let y_range = (0.0, if top > 0.0 { top * 1.05 } else { 1.0 });

        Some(Chart {
            title: style.title.clone(),
            x_label: style.x_label.clone(),
            y_label: style.y_label.clone(),
            legend_title: style.legend_title.clone(),
            major_ticks: year_ticks(x_range.0, x_range.1),
            minor_ticks: month_ticks(x_range.0, x_range.1),
            lines,
            x_range,
            y_range,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;
    use crate::data::smooth::smooth_collection;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn collection(names: &[&str]) -> SeriesCollection {
        let mut c = SeriesCollection::new();
        for name in names {
            c.push_record(Record::new(*name, day(2020, 6, 1), 40.0));
        }
        c
    }

    #[test]
    fn x_range_rounds_out_to_whole_years() {
        assert_eq!(
            year_bounds(day(2019, 3, 1), day(2021, 7, 15)),
            (day(2019, 1, 1), day(2022, 1, 1))
        );
        assert_eq!(
            year_bounds(day(2020, 1, 1), day(2020, 1, 1)),
            (day(2020, 1, 1), day(2021, 1, 1))
        );
    }

    #[test]
    fn chart_bounds_cover_all_series() {
        let mut c = SeriesCollection::new();
        c.push_record(Record::new("a", day(2019, 3, 1), 30.0));
        c.push_record(Record::new("b", day(2021, 7, 15), 50.0));

        let chart = Chart::build(&c, &PlotStyle::default()).unwrap();
        assert_eq!(chart.x_range, (day(2019, 1, 1), day(2022, 1, 1)));
        assert_eq!(chart.y_range.0, 0.0);
        assert!((chart.y_range.1 - 52.5).abs() < 1e-9);
        assert_eq!(
            chart.major_ticks,
            vec![day(2019, 1, 1), day(2020, 1, 1), day(2021, 1, 1), day(2022, 1, 1)]
        );
        assert_eq!(chart.minor_ticks.len(), 37);
        assert_eq!(chart.minor_ticks[1], day(2019, 2, 1));
    }

    #[test]
    fn markers_and_lines_cycle_by_series_index() {
        let names: Vec<String> = (0..19).map(|i| format!("g{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let chart = Chart::build(&collection(&refs), &PlotStyle::default()).unwrap();

        let combos: Vec<(Marker, LineKind)> =
            chart.lines.iter().map(|l| (l.marker, l.line)).collect();
        for (i, a) in combos.iter().take(18).enumerate() {
            for b in &combos[i + 1..18] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(combos[0], (Marker::Hexagon, LineKind::Solid));
        assert_eq!(combos[5], (Marker::Plus, LineKind::Solid));
        assert_eq!(combos[6], (Marker::Hexagon, LineKind::Dashed));
        assert_ne!(combos[6], combos[0]);
        assert_eq!(combos[13], (Marker::Square, LineKind::Dotted));
        assert_eq!(combos[18], combos[0]);
    }

    #[test]
    fn rolling_lines_follow_their_series() {
        let mut c = collection(&["lu", "bojack"]);
        smooth_collection(&mut c, 2);
        let chart = Chart::build(&c, &PlotStyle::default()).unwrap();

        let labels: Vec<&str> = chart.lines.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["lu", "rolling lu", "bojack", "rolling bojack"]);
        assert_eq!(chart.lines[1].marker, ROLLING_MARKER);
        assert_eq!(chart.lines[1].line, ROLLING_LINE);
        assert_eq!(chart.lines[2].marker, Marker::Square);
        assert_ne!(chart.lines[0].color, chart.lines[1].color);
    }

    #[test]
    fn empty_collection_builds_nothing() {
        assert!(Chart::build(&SeriesCollection::new(), &PlotStyle::default()).is_none());
    }

    #[test]
    fn x_coordinates_round_trip_through_dates() {
        let d = day(2021, 7, 15);
        assert_eq!(x_to_date(date_to_x(d)), Some(d));
        assert_eq!(x_to_date(date_to_x(d) + 0.4), Some(d));
        assert_eq!(x_to_date(f64::NAN), None);
    }

    #[test]
    fn marker_outlines_have_expected_vertex_counts() {
        assert_eq!(Marker::Hexagon.outline(5.0).len(), 6);
        assert_eq!(Marker::Pentagon.outline(5.0).len(), 5);
        assert_eq!(Marker::TriangleUp.outline(5.0).len(), 3);
        assert_eq!(Marker::Square.outline(5.0).len(), 4);
        assert_eq!(Marker::Plus.outline(5.0).len(), 12);
        assert_eq!(Marker::Cross.outline(5.0).len(), 12);
    }
}
