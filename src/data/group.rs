use super::model::{Record, SeriesCollection};

/// Partition records into one series per distinct identifier.
///
/// Identifiers appear in the order they were first seen; records keep their
/// relative order inside each series.
pub fn group_records(records: impl IntoIterator<Item = Record>) -> SeriesCollection {
    let mut collection = SeriesCollection::new();
    collection.insert_records(records);
    collection
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn rec(name: &str, day: u32, mass: f64) -> Record {
        Record::new(name, NaiveDate::from_ymd_opt(2020, 1, day).unwrap(), mass)
    }

    #[test]
    fn one_series_per_identifier_in_first_seen_order() {
        let records = vec![
            rec("murphey", 1, 40.0),
            rec("bojack", 1, 50.0),
            rec("murphey", 2, 41.0),
            rec("lu", 3, 30.0),
            rec("bojack", 4, 51.0),
        ];

        let collection = group_records(records.clone());

        assert_eq!(collection.names(), vec!["murphey", "bojack", "lu"]);
        assert_eq!(collection.record_count(), records.len());
        assert_eq!(collection.get("bojack").unwrap().masses(), vec![50.0, 51.0]);
        for series in &collection {
            assert!(series.records.iter().all(|r| r.identifier == series.name));
        }
    }

    #[test]
    fn disjoint_files_give_one_series_each() {
        let a = vec![rec("a", 1, 1.0), rec("a", 2, 2.0)];
        let b = vec![rec("b", 1, 3.0)];

        let collection = group_records(a.into_iter().chain(b));
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.record_count(), 3);
    }

    #[test]
    fn empty_input_gives_empty_collection() {
        assert!(group_records(Vec::new()).is_empty());
    }
}
