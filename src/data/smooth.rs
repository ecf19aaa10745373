use super::model::SeriesCollection;

/// Default smoothing span, in samples.
pub const DEFAULT_SPAN: usize = 2;

/// Exponentially weighted moving average with `alpha = 2 / (span + 1)`.
///
/// Recursive (unadjusted) form: `r[0] = v[0]`,
/// `r[i] = alpha * v[i] + (1 - alpha) * r[i - 1]`. Values are taken in the
/// given order; nothing is sorted. `span` must be at least 1.
pub fn ewma(values: &[f64], span: usize) -> Vec<f64> {
    debug_assert!(span >= 1, "span must be at least 1");
    let alpha = 2.0 / (span as f64 + 1.0);

    let mut out = Vec::with_capacity(values.len());
    let mut prev: Option<f64> = None;
    for &v in values {
        let next = match prev {
            None => v,
            Some(p) => alpha * v + (1.0 - alpha) * p,
        };
        out.push(next);
        prev = Some(next);
    }
    out
}

/// Fill in `rolling` for every series in the collection.
pub fn smooth_collection(collection: &mut SeriesCollection, span: usize) {
    for series in collection.iter_mut() {
        let rolling = ewma(&series.masses(), span);
        log::debug!("{}: smoothed {} values (span {span})", series.name, rolling.len());
        series.rolling = Some(rolling);
    }
}
