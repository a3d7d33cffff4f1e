//! Line-series projection of a view. Grouping and sorting only; drawing is
//! left to the front end.

use std::collections::HashMap;

use super::model::{Column, View};

/// One line of a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Values of the grouping columns, then the style column if any.
    pub key: Vec<String>,
    /// Value of the style column, used to vary markers or dashes.
    pub style: Option<String>,
    /// `[x, y]` points, ascending by x.
    pub points: Vec<[f64; 2]>,
}

impl Series {
    /// Legend label, e.g. `North / Maize`.
    pub fn label(&self) -> String {
        self.key.join(" / ")
    }

    /// Value of the first grouping column, which picks the colour.
    pub fn hue(&self) -> &str {
        self.key.first().map(String::as_str).unwrap_or_default()
    }

    /// Points with repeated x values replaced by their mean.
    pub fn mean_by_x(&self) -> Vec<[f64; 2]> {
        let mut out: Vec<[f64; 2]> = Vec::with_capacity(self.points.len());
        let mut run = 0usize;
        for &[x, y] in &self.points {
            match out.last_mut() {
                Some(last) if last[0] == x => {
                    run += 1;
                    last[1] += (y - last[1]) / run as f64;
                }
                _ => {
                    out.push([x, y]);
                    run = 1;
                }
            }
        }
        out
    }
}

/// Split `view` into one series per distinct combination of
/// `group_columns` (plus `style_column` when given).
///
/// Series appear in order of first occurrence. Rows with an empty x or y
/// are left out. An empty view yields no series.
pub fn project(
    view: &View<'_>,
    x_column: Column,
    y_column: Column,
    group_columns: &[Column],
    style_column: Option<Column>,
) -> Vec<Series> {
    let mut series: Vec<Series> = Vec::new();
    let mut index: HashMap<Vec<&str>, usize> = HashMap::new();

    for row in view.rows() {
        let mut key: Vec<&str> = group_columns
            .iter()
            .filter_map(|c| row.category(*c))
            .collect();
        let style = style_column.and_then(|c| row.category(c));
        key.extend(style);

        let slot = *index.entry(key.clone()).or_insert_with(|| {
            series.push(Series {
                key: key.iter().map(|s| s.to_string()).collect(),
                style: style.map(String::from),
                points: Vec::new(),
            });
            series.len() - 1
        });

        if let (Some(x), Some(y)) = (row.numeric(x_column), row.numeric(y_column)) {
            series[slot].points.push([x, y]);
        }
    }

    for s in &mut series {
        s.points.sort_by(|a, b| a[0].total_cmp(&b[0]));
    }
    series
}
