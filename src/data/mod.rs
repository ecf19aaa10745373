/// Data layer: records, loading, grouping, selection and smoothing.
///
/// Architecture:
/// ```text
///  .csv / .tsv  (one or many)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<Record>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  group    │  identifier → Series, first-seen order
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  select   │  allow-list → ordered SeriesCollection
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  smooth   │  optional EWMA per series
///   └──────────┘
/// ```

pub mod group;
pub mod loader;
pub mod model;
pub mod select;
pub mod smooth;
