use std::collections::BTreeSet;

use crate::chart::{Chart, PlotLine};
use crate::style::PlotStyle;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Chart being shown.
    pub chart: Chart,

    /// Theme the chart was built with.
    pub style: PlotStyle,

    /// Labels of plotted lines the user has hidden.
    pub hidden: BTreeSet<String>,
}

impl AppState {
    pub fn new(chart: Chart, style: PlotStyle) -> Self {
        Self {
            chart,
            style,
            hidden: BTreeSet::new(),
        }
    }

    pub fn is_visible(&self, label: &str) -> bool {
        !self.hidden.contains(label)
    }

    /// Lines currently drawn, in plotting order.
    pub fn visible_lines(&self) -> impl Iterator<Item = &PlotLine> {
        self.chart
            .lines
            .iter()
            .filter(|line| self.is_visible(&line.label))
    }

    /// Toggle a single line's visibility.
    pub fn toggle(&mut self, label: &str) {
        if !self.hidden.remove(label) {
            self.hidden.insert(label.to_string());
        }
    }

    /// Show every line.
    pub fn show_all(&mut self) {
        self.hidden.clear();
    }

    /// Hide every line.
    pub fn hide_all(&mut self) {
        self.hidden = self.chart.lines.iter().map(|l| l.label.clone()).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::group::group_records;
    use crate::data::model::Record;
    use crate::data::smooth::smooth_collection;
    use chrono::NaiveDate;

    fn state() -> AppState {
        let d = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let mut c = group_records(vec![Record::new("lu", d, 30.0), Record::new("bojack", d, 50.0)]);
        smooth_collection(&mut c, 2);
        let style = PlotStyle::default();
        AppState::new(Chart::build(&c, &style).unwrap(), style)
    }

    #[test]
    fn toggling_hides_and_restores_a_line() {
        let mut s = state();
        assert_eq!(s.visible_lines().count(), 4);

        s.toggle("rolling lu");
        let labels: Vec<&str> = s.visible_lines().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["lu", "bojack", "rolling bojack"]);

        s.toggle("rolling lu");
        assert!(s.is_visible("rolling lu"));
    }

    #[test]
    fn hide_all_then_show_all() {
        let mut s = state();
        s.hide_all();
        assert_eq!(s.visible_lines().count(), 0);
        s.show_all();
        assert_eq!(s.visible_lines().count(), 4);
    }
}
