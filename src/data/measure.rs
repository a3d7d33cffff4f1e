use serde::{Deserialize, Serialize};

use super::model::Column;

/// Productivity measures offered in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProductivityMeasure {
    #[default]
    Production,
    CultivatedArea,
    Yield,
}

impl ProductivityMeasure {
    pub const ALL: [ProductivityMeasure; 3] = [
        ProductivityMeasure::Production,
        ProductivityMeasure::CultivatedArea,
        ProductivityMeasure::Yield,
    ];

    pub fn column(self) -> Column {
        match self {
            ProductivityMeasure::Production => Column::Production,
            ProductivityMeasure::CultivatedArea => Column::Area,
            ProductivityMeasure::Yield => Column::Yield,
        }
    }
}

/// Climate measures offered in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClimateMeasure {
    #[default]
    Precipitation,
    RainDays,
    MeanTemperature,
    MaxRelativeHumidity,
    MeanWindSpeed,
    Sunshine,
}

impl ClimateMeasure {
    pub const ALL: [ClimateMeasure; 6] = [
        ClimateMeasure::Precipitation,
        ClimateMeasure::RainDays,
        ClimateMeasure::MeanTemperature,
        ClimateMeasure::MaxRelativeHumidity,
        ClimateMeasure::MeanWindSpeed,
        ClimateMeasure::Sunshine,
    ];

    pub fn column(self) -> Column {
        match self {
            ClimateMeasure::Precipitation => Column::Precipitation,
            ClimateMeasure::RainDays => Column::RainDays,
            ClimateMeasure::MeanTemperature => Column::MeanTemp,
            ClimateMeasure::MaxRelativeHumidity => Column::MaxRelHumidity,
            ClimateMeasure::MeanWindSpeed => Column::MeanWind,
            ClimateMeasure::Sunshine => Column::Sunshine,
        }
    }
}

/// One productivity and one climate measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MeasureChoice {
    pub productivity: ProductivityMeasure,
    pub climate: ClimateMeasure,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_measure_maps_to_a_distinct_numeric_column() {
        let mut columns: Vec<Column> = ProductivityMeasure::ALL
            .iter()
            .map(|m| m.column())
            .chain(ClimateMeasure::ALL.iter().map(|m| m.column()))
            .collect();
        assert!(columns.iter().all(|c| !c.is_categorical() && *c != Column::Year));
        columns.sort();
        columns.dedup();
        assert_eq!(columns.len(), 9);
    }
}
