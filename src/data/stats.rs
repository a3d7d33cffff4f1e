//! Grouped descriptive statistics (count, mean, std, min, quartiles, max).

use std::collections::HashMap;

use super::model::{Column, View};
use crate::error::AggregateError;

/// Summary of one group's measure values.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n − 1). `None` for a single value.
    pub std: Option<f64>,
    pub min: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub max: f64,
}

impl Summary {
    /// Summarise `values`. Returns `None` when there is nothing to summarise.
    pub fn of(mut values: Vec<f64>) -> Option<Summary> {
        if values.is_empty() {
            return None;
        }
        values.sort_by(f64::total_cmp);
        let n = values.len();
        let mean = values.iter().sum::<f64>() / n as f64;
        let std = (n > 1).then(|| {
            let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (n - 1) as f64).sqrt()
        });
        Some(Summary {
            count: n,
            mean,
            std,
            min: values[0],
            p25: percentile(&values, 0.25),
            p50: percentile(&values, 0.50),
            p75: percentile(&values, 0.75),
            max: values[n - 1],
        })
    }
}

/// Linear interpolation between the closest order statistics of a sorted,
/// non-empty slice.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let idx = p * (sorted.len() - 1) as f64;
    let lo = idx.floor() as usize;
    let hi = idx.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = idx - lo as f64;
        (sorted[lo] + (sorted[hi] - sorted[lo]) * frac).clamp(sorted[lo], sorted[hi])
    }
}

/// One row of a [`StatisticsTable`].
#[derive(Debug, Clone, PartialEq)]
pub struct GroupStats {
    /// Values of the grouping columns, in the order they were requested.
    pub key: Vec<String>,
    pub summary: Summary,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsTable {
    pub group_columns: Vec<Column>,
    pub measure: Column,
    pub groups: Vec<GroupStats>,
}

impl StatisticsTable {
    /// Header labels of the rendered table.
    pub fn headers(&self) -> Vec<String> {
        self.group_columns
            .iter()
            .map(|c| c.id().to_string())
            .chain(
                ["count", "mean", "std", "min", "25%", "50%", "75%", "max"]
                    .into_iter()
                    .map(String::from),
            )
            .collect()
    }

    pub fn group(&self, key: &[&str]) -> Option<&GroupStats> {
        self.groups
            .iter()
            .find(|g| g.key.iter().map(String::as_str).eq(key.iter().copied()))
    }
}

/// Group `view` by `group_columns` and summarise `measure` per group.
///
/// Rows whose measure is empty don't count. Groups left with no values are
/// dropped. Groups appear in order of first occurrence in the view.
pub fn describe(
    view: &View<'_>,
    measure: Column,
    group_columns: &[Column],
) -> Result<StatisticsTable, AggregateError> {
    if let Some(col) = group_columns.iter().find(|c| !c.is_categorical()) {
        return Err(AggregateError::NotCategorical(col.id()));
    }
    if measure.is_categorical() {
        return Err(AggregateError::NotNumeric(measure.id()));
    }
    if view.is_empty() {
        return Err(AggregateError::EmptyView);
    }

    let mut order: Vec<Vec<&str>> = Vec::new();
    let mut values: HashMap<Vec<&str>, Vec<f64>> = HashMap::new();
    for row in view.rows() {
        let key: Vec<&str> = group_columns
            .iter()
            .filter_map(|c| row.category(*c))
            .collect();
        let bucket = values.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            Vec::new()
        });
        if let Some(v) = row.numeric(measure).filter(|v| !v.is_nan()) {
            bucket.push(v);
        }
    }

    let groups = order
        .into_iter()
        .filter_map(|key| {
            let summary = Summary::of(values.remove(&key)?)?;
            Some(GroupStats {
                key: key.into_iter().map(String::from).collect(),
                summary,
            })
        })
        .collect();

    Ok(StatisticsTable {
        group_columns: group_columns.to_vec(),
        measure,
        groups,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{filter, FilterSelection};
    use crate::data::model::{fixtures, Column, Dataset, Row};
    use proptest::prelude::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn north_only_scenario() {
        let ds = fixtures::north_south();
        let views = filter(&ds, &FilterSelection::new(["North"], Vec::<String>::new()));
        let table = describe(&views.region, Column::Production, &[Column::Region]).unwrap();

        assert_eq!(table.groups.len(), 1);
        let north = table.group(&["North"]).unwrap();
        assert_eq!(north.summary.count, 3);
        assert!(close(north.summary.mean, 12.0));
        assert!(close(north.summary.std.unwrap(), 2.0));
        assert_eq!(north.summary.min, 10.0);
        assert_eq!(north.summary.p25, 11.0);
        assert_eq!(north.summary.p50, 12.0);
        assert_eq!(north.summary.p75, 13.0);
        assert_eq!(north.summary.max, 14.0);
    }

    #[test]
    fn two_level_grouping_keeps_first_occurrence_order() {
        let ds = fixtures::mixed();
        let views = filter(&ds, &FilterSelection::new(["South", "North"], ["Maize", "Rice", "Sorghum"]));
        let table = describe(&views.combined, Column::Production, &[Column::Region, Column::Cereal]).unwrap();

        let keys: Vec<Vec<String>> = table.groups.iter().map(|g| g.key.clone()).collect();
        assert_eq!(
            keys,
            vec![
                vec!["North".to_string(), "Maize".to_string()],
                vec!["North".to_string(), "Sorghum".to_string()],
                vec!["South".to_string(), "Maize".to_string()],
                vec!["South".to_string(), "Rice".to_string()],
            ]
        );
        assert_eq!(
            table.headers(),
            ["Region", "Cereal", "count", "mean", "std", "min", "25%", "50%", "75%", "max"]
        );
    }

    #[test]
    fn interpolated_quartiles() {
        let s = Summary::of(vec![4.0, 1.0, 3.0, 2.0]).unwrap();
        assert!(close(s.p25, 1.75));
        assert!(close(s.p50, 2.5));
        assert!(close(s.p75, 3.25));
        assert!(close(s.mean, 2.5));
    }

    #[test]
    fn single_value_has_no_std() {
        let s = Summary::of(vec![7.0]).unwrap();
        assert_eq!(s.count, 1);
        assert_eq!(s.std, None);
        assert_eq!((s.min, s.p50, s.max), (7.0, 7.0, 7.0));
        assert!(Summary::of(Vec::new()).is_none());
    }

    #[test]
    fn null_measures_are_skipped_and_empty_groups_dropped() {
        let rows = vec![
            fixtures::row("North", "Maize", 2000, 1.0),
            fixtures::row("North", "Maize", 2001, 3.0),
            Row::new("North", "Maize", 2002),
            Row::new("South", "Maize", 2000),
        ];
        let ds = Dataset::from_rows(Column::ALL.to_vec(), rows);
        let table = describe(&ds.view(), Column::Production, &[Column::Region]).unwrap();

        assert_eq!(table.groups.len(), 1);
        assert_eq!(table.groups[0].key, vec!["North".to_string()]);
        assert_eq!(table.groups[0].summary.count, 2);
        assert!(close(table.groups[0].summary.mean, 2.0));
    }

    #[test]
    fn rejects_bad_input() {
        let ds = fixtures::mixed();
        let empty = filter(&ds, &FilterSelection::default());
        assert_eq!(
            describe(&empty.region, Column::Production, &[Column::Region]),
            Err(AggregateError::EmptyView)
        );
        assert_eq!(
            describe(&ds.view(), Column::Production, &[Column::Year]),
            Err(AggregateError::NotCategorical("Year"))
        );
        assert_eq!(
            describe(&ds.view(), Column::Cereal, &[Column::Region]),
            Err(AggregateError::NotNumeric("Cereal"))
        );
    }

    proptest! {
        #[test]
        fn counts_match_and_quantiles_are_ordered(
            values in proptest::collection::vec((0usize..3, 0usize..2, -1.0e6f64..1.0e6), 1..60)
        ) {
            let regions = ["North", "South", "East"];
            let cereals = ["Maize", "Rice"];
            let rows: Vec<Row> = values
                .iter()
                .enumerate()
                .map(|(i, (r, c, v))| fixtures::row(regions[*r], cereals[*c], 1900 + i as i32, *v))
                .collect();
            let ds = Dataset::from_rows(Column::ALL.to_vec(), rows);
            let table = describe(&ds.view(), Column::Production, &[Column::Region, Column::Cereal]).unwrap();

            let total: usize = table.groups.iter().map(|g| g.summary.count).sum();
            prop_assert_eq!(total, ds.len());
            for g in &table.groups {
                let expected = ds.rows.iter().filter(|r| r.region == g.key[0] && r.cereal == g.key[1]).count();
                prop_assert_eq!(g.summary.count, expected);
                let s = &g.summary;
                prop_assert!(s.min <= s.p25 && s.p25 <= s.p50 && s.p50 <= s.p75 && s.p75 <= s.max);
            }
        }
    }
}
