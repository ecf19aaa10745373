use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// Record – one row of a source file
// ---------------------------------------------------------------------------

/// A single weigh-in.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Whitespace-trimmed identifier (the gecko's name).
    pub identifier: String,
    pub date: NaiveDate,
    /// Mass in grams.
    pub mass: f64,
}

impl Record {
    pub fn new(identifier: impl Into<String>, date: NaiveDate, mass: f64) -> Self {
        Self {
            identifier: identifier.into(),
            date,
            mass,
        }
    }
}

// ---------------------------------------------------------------------------
// Series – all records sharing one identifier
// ---------------------------------------------------------------------------

/// Records for one identifier, in source-file order.
///
/// `rolling` is filled in by the smoother and then holds exactly one value
/// per record.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub records: Vec<Record>,
    pub rolling: Option<Vec<f64>>,
}

impl Series {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            records: Vec::new(),
            rolling: None,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Mass column, in record order.
    pub fn masses(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.mass).collect()
    }

    /// `(date, mass)` pairs for plotting.
    pub fn mass_points(&self) -> Vec<(NaiveDate, f64)> {
        self.records.iter().map(|r| (r.date, r.mass)).collect()
    }

    /// `(date, rolling)` pairs, if the series has been smoothed.
    pub fn rolling_points(&self) -> Option<Vec<(NaiveDate, f64)>> {
        self.rolling.as_ref().map(|rolling| {
            self.records
                .iter()
                .zip(rolling.iter())
                .map(|(r, &v)| (r.date, v))
                .collect()
        })
    }

    /// Earliest and latest date in the series.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.records.first()?.date;
        Some(self.records.iter().fold((first, first), |(lo, hi), r| {
            (lo.min(r.date), hi.max(r.date))
        }))
    }
}

// ---------------------------------------------------------------------------
// SeriesCollection – ordered identifier → Series mapping
// ---------------------------------------------------------------------------

/// Ordered mapping from identifier to [`Series`].
///
/// Keys are unique. Iteration follows insertion order, which is either the
/// order identifiers were first seen or the order of an explicit allow-list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesCollection {
    series: Vec<Series>,
}

impl SeriesCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `record` to the series for its identifier, creating the series
    /// at the end if it is new.
    pub fn push_record(&mut self, record: Record) {
        match self.position(&record.identifier) {
            Some(idx) => self.series[idx].records.push(record),
            None => {
                let mut series = Series::new(record.identifier.clone());
                series.records.push(record);
                self.series.push(series);
            }
        }
    }

    /// Add a batch of records, keeping first-seen order of identifiers.
    pub fn insert_records(&mut self, records: impl IntoIterator<Item = Record>) {
        for record in records {
            self.push_record(record);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Series> {
        self.position(name).map(|idx| &self.series[idx])
    }

    /// Identifiers in collection order.
    pub fn names(&self) -> Vec<String> {
        self.series.iter().map(|s| s.name.clone()).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Series> {
        self.series.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Series> {
        self.series.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Total number of records over all series.
    pub fn record_count(&self) -> usize {
        self.series.iter().map(Series::len).sum()
    }

    /// Keep only the series named in `names`, reordered to match it.
    /// Names without a series are ignored.
    pub fn retain_ordered(&mut self, names: &[String]) {
        let mut remaining = std::mem::take(&mut self.series);
        for name in names {
            if let Some(idx) = remaining.iter().position(|s| &s.name == name) {
                self.series.push(remaining.swap_remove(idx));
            }
        }
    }

    /// Earliest and latest date over every series.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.series
            .iter()
            .filter_map(Series::date_range)
            .reduce(|(lo, hi), (a, b)| (lo.min(a), hi.max(b)))
    }

    /// Largest finite value over masses and rolling values.
    pub fn max_value(&self) -> Option<f64> {
        self.series
            .iter()
            .flat_map(|s| {
                s.records
                    .iter()
                    .map(|r| r.mass)
                    .chain(s.rolling.iter().flatten().copied())
            })
            .filter(|v| v.is_finite())
            .reduce(f64::max)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.series.iter().position(|s| s.name == name)
    }
}

impl<'a> IntoIterator for &'a SeriesCollection {
    type Item = &'a Series;
    type IntoIter = std::slice::Iter<'a, Series>;

    fn into_iter(self) -> Self::IntoIter {
        self.series.iter()
    }
}
