use std::path::PathBuf;

use crate::data::group::group_records;
use crate::data::loader::{load_file, Layout};
use crate::data::model::{Record, SeriesCollection};
use crate::data::select::{select_series, SelectError};
use crate::data::smooth::smooth_collection;

/// How the loaded data is prepared for plotting.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub layout: Layout,
    /// Allow-list and order of identifiers; empty means all, as discovered.
    pub wanted: Vec<String>,
    /// EWMA span, or `None` to skip smoothing.
    pub span: Option<usize>,
}

/// Load every input, in order.
///
/// A file that cannot be loaded is reported and skipped; the rest still
/// load.
pub fn load_records(paths: &[PathBuf], layout: &Layout) -> Vec<Record> {
    let mut all = Vec::new();
    for path in paths {
        match load_file(path, layout) {
            Ok(records) => {
                log::info!("Loaded {} records from {}", records.len(), path.display());
                all.extend(records);
            }
            Err(e) => log::warn!("Ignoring {}: {e}", path.display()),
        }
    }
    all
}

/// Load, group, select and optionally smooth.
pub fn run(paths: &[PathBuf], options: &PipelineOptions) -> Result<SeriesCollection, SelectError> {
    let discovered = group_records(load_records(paths, &options.layout));
    log::debug!("Discovered series: {:?}", discovered.names());

    let mut selected = select_series(discovered, &options.wanted)?;
    if let Some(span) = options.span {
        smooth_collection(&mut selected, span);
    }
    Ok(selected)
}
