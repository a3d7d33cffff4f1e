use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single untyped cell as read from a source file
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring what spreadsheet, CSV and Parquet
/// readers hand back before the row is validated against the schema.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Try to interpret the value as an `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Column – the fixed set of logical fields
// ---------------------------------------------------------------------------

/// How a column's values are typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Category,
    Integer,
    Float,
}

/// Logical column identifiers. Source files may label them with either the
/// identifier itself or the French header of the source workbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Region,
    Cereal,
    Year,
    Production,
    Area,
    Yield,
    Precipitation,
    RainDays,
    MeanTemp,
    MaxRelHumidity,
    MeanWind,
    Sunshine,
}

impl Column {
    /// All columns in canonical order.
    pub const ALL: [Column; 12] = [
        Column::Region,
        Column::Cereal,
        Column::Year,
        Column::Production,
        Column::Area,
        Column::Yield,
        Column::Precipitation,
        Column::RainDays,
        Column::MeanTemp,
        Column::MaxRelHumidity,
        Column::MeanWind,
        Column::Sunshine,
    ];

    /// Stable identifier, also used as the export header.
    pub fn id(self) -> &'static str {
        match self {
            Column::Region => "Region",
            Column::Cereal => "Cereal",
            Column::Year => "Year",
            Column::Production => "Production_tonnes",
            Column::Area => "Area_ha",
            Column::Yield => "Yield_t_per_ha",
            Column::Precipitation => "Precipitation_mm",
            Column::RainDays => "RainDays",
            Column::MeanTemp => "MeanTemp_C",
            Column::MaxRelHumidity => "MaxRelHumidity_pct",
            Column::MeanWind => "MeanWind_mps",
            Column::Sunshine => "SunshineHours",
        }
    }

    /// Header used by the French source workbook.
    pub fn source_header(self) -> &'static str {
        match self {
            Column::Region => "Région",
            Column::Cereal => "Céréales",
            Column::Year => "Année",
            Column::Production => "Production (en tonnes)",
            Column::Area => "Superficie (en ha)",
            Column::Yield => "Rendement (tonne/ha)",
            Column::Precipitation => "Précipitations moyennes annuelles (en mm)",
            Column::RainDays => "Nombre de jours de pluie",
            Column::MeanTemp => "Températures moyennes annuelles (en C°)",
            Column::MaxRelHumidity => "Humidité relative maximale (en %)",
            Column::MeanWind => "Vent moyen annuel (en m/s)",
            Column::Sunshine => "Durée ensoleillement (en h/jr)",
        }
    }

    /// Resolve a header label to a column, ignoring case and surrounding
    /// whitespace.
    pub fn from_header(header: &str) -> Option<Column> {
        let header = header.trim();
        Column::ALL.into_iter().find(|c| {
            c.id().eq_ignore_ascii_case(header) || c.source_header().to_lowercase() == header.to_lowercase()
        })
    }

    pub fn kind(self) -> ColumnKind {
        match self {
            Column::Region | Column::Cereal => ColumnKind::Category,
            Column::Year | Column::RainDays => ColumnKind::Integer,
            _ => ColumnKind::Float,
        }
    }

    pub fn is_categorical(self) -> bool {
        self.kind() == ColumnKind::Category
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

// ---------------------------------------------------------------------------
// Row – one observation
// ---------------------------------------------------------------------------

/// One (region, cereal, year) observation. Measures are `None` when the
/// source cell was empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub region: String,
    pub cereal: String,
    pub year: i32,
    pub production: Option<f64>,
    pub area: Option<f64>,
    pub yield_t_per_ha: Option<f64>,
    pub precipitation: Option<f64>,
    pub rain_days: Option<f64>,
    pub mean_temp: Option<f64>,
    pub max_rel_humidity: Option<f64>,
    pub mean_wind: Option<f64>,
    pub sunshine: Option<f64>,
}

impl Row {
    /// A row with every measure empty.
    pub fn new(region: impl Into<String>, cereal: impl Into<String>, year: i32) -> Self {
        Row {
            region: region.into(),
            cereal: cereal.into(),
            year,
            production: None,
            area: None,
            yield_t_per_ha: None,
            precipitation: None,
            rain_days: None,
            mean_temp: None,
            max_rel_humidity: None,
            mean_wind: None,
            sunshine: None,
        }
    }

    /// Categorical value of `column`, `None` for numeric columns.
    pub fn category(&self, column: Column) -> Option<&str> {
        match column {
            Column::Region => Some(&self.region),
            Column::Cereal => Some(&self.cereal),
            _ => None,
        }
    }

    /// Numeric value of `column`. The year counts as numeric.
    pub fn numeric(&self, column: Column) -> Option<f64> {
        match column {
            Column::Region | Column::Cereal => None,
            Column::Year => Some(self.year as f64),
            Column::Production => self.production,
            Column::Area => self.area,
            Column::Yield => self.yield_t_per_ha,
            Column::Precipitation => self.precipitation,
            Column::RainDays => self.rain_days,
            Column::MeanTemp => self.mean_temp,
            Column::MaxRelHumidity => self.max_rel_humidity,
            Column::MeanWind => self.mean_wind,
            Column::Sunshine => self.sunshine,
        }
    }

    pub fn cell(&self, column: Column) -> CellValue {
        if let Some(s) = self.category(column) {
            return CellValue::String(s.to_string());
        }
        match (column.kind(), self.numeric(column)) {
            (_, None) => CellValue::Null,
            (ColumnKind::Integer, Some(v)) if v.fract() == 0.0 => CellValue::Integer(v as i64),
            (_, Some(v)) => CellValue::Float(v),
        }
    }

    pub(crate) fn numeric_mut(&mut self, column: Column) -> Option<&mut Option<f64>> {
        match column {
            Column::Production => Some(&mut self.production),
            Column::Area => Some(&mut self.area),
            Column::Yield => Some(&mut self.yield_t_per_ha),
            Column::Precipitation => Some(&mut self.precipitation),
            Column::RainDays => Some(&mut self.rain_days),
            Column::MeanTemp => Some(&mut self.mean_temp),
            Column::MaxRelHumidity => Some(&mut self.max_rel_humidity),
            Column::MeanWind => Some(&mut self.mean_wind),
            Column::Sunshine => Some(&mut self.sunshine),
            Column::Region | Column::Cereal | Column::Year => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed filter choices.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// All rows, in source order.
    pub rows: Vec<Row>,
    /// Columns in the order they appeared in the source.
    pub columns: Vec<Column>,
    /// Sorted distinct regions.
    pub regions: BTreeSet<String>,
    /// Sorted distinct cereals.
    pub cereals: BTreeSet<String>,
}

impl Dataset {
    /// Build the filter choices from the loaded rows.
    pub fn from_rows(columns: Vec<Column>, rows: Vec<Row>) -> Self {
        let regions = rows.iter().map(|r| r.region.clone()).collect();
        let cereals = rows.iter().map(|r| r.cereal.clone()).collect();
        Dataset {
            rows,
            columns,
            regions,
            cereals,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Inclusive (first, last) year, `None` for an empty dataset.
    pub fn year_span(&self) -> Option<(i32, i32)> {
        let first = self.rows.iter().map(|r| r.year).min()?;
        let last = self.rows.iter().map(|r| r.year).max()?;
        Some((first, last))
    }

    /// The whole dataset as a view.
    pub fn view(&self) -> View<'_> {
        View::of(&self.columns, &self.rows)
    }
}

// ---------------------------------------------------------------------------
// View – a read-only subset of rows
// ---------------------------------------------------------------------------

/// Borrowed subset of a dataset's rows, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct View<'a> {
    columns: &'a [Column],
    rows: Vec<&'a Row>,
}

impl<'a> View<'a> {
    pub fn new(columns: &'a [Column], rows: Vec<&'a Row>) -> Self {
        View { columns, rows }
    }

    /// View over every row of a slice.
    pub fn of(columns: &'a [Column], rows: &'a [Row]) -> Self {
        View {
            columns,
            rows: rows.iter().collect(),
        }
    }

    pub fn columns(&self) -> &'a [Column] {
        self.columns
    }

    pub fn rows(&self) -> &[&'a Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Detach the view from the dataset it borrows from.
    pub fn to_table(&self) -> Table {
        Table {
            columns: self.columns.to_vec(),
            rows: self.rows.iter().map(|r| (*r).clone()).collect(),
        }
    }
}

/// An owned copy of a view, kept by the front end between recomputes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn view(&self) -> View<'_> {
        View::of(&self.columns, &self.rows)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn row(region: &str, cereal: &str, year: i32, production: f64) -> Row {
        Row {
            region: region.to_string(),
            cereal: cereal.to_string(),
            year,
            production: Some(production),
            area: Some(production * 2.0),
            yield_t_per_ha: Some(0.5),
            precipitation: Some(800.0 + year as f64 % 10.0),
            rain_days: Some(60.0),
            mean_temp: Some(28.5),
            max_rel_humidity: Some(70.0),
            mean_wind: Some(2.5),
            sunshine: Some(8.0),
        }
    }

    /// North/South × Maize, 1996–1998, production [10,12,14] and [5,6,7].
    pub fn north_south() -> Dataset {
        let mut rows = Vec::new();
        for (i, year) in (1996..=1998).enumerate() {
            rows.push(row("North", "Maize", year, 10.0 + 2.0 * i as f64));
            rows.push(row("South", "Maize", year, 5.0 + i as f64));
        }
        Dataset::from_rows(Column::ALL.to_vec(), rows)
    }

    /// Two regions × two cereals × three years; North has no Rice.
    pub fn mixed() -> Dataset {
        let mut rows = Vec::new();
        for year in 2000..=2002 {
            let offset = (year - 2000) as f64;
            rows.push(row("North", "Maize", year, 100.0 + offset));
            rows.push(row("North", "Sorghum", year, 50.0 + offset));
            rows.push(row("South", "Maize", year, 80.0 + offset));
            rows.push(row("South", "Rice", year, 30.0 + offset));
        }
        Dataset::from_rows(Column::ALL.to_vec(), rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_resolve_from_either_label() {
        assert_eq!(Column::from_header("Production_tonnes"), Some(Column::Production));
        assert_eq!(Column::from_header(" Région "), Some(Column::Region));
        assert_eq!(Column::from_header("ANNÉE"), Some(Column::Year));
        assert_eq!(Column::from_header("Durée ensoleillement (en h/jr)"), Some(Column::Sunshine));
        assert_eq!(Column::from_header("Notes"), None);
    }

    #[test]
    fn integer_columns_render_as_integers() {
        let row = fixtures::row("North", "Maize", 1996, 10.5);
        assert_eq!(row.cell(Column::Year), CellValue::Integer(1996));
        assert_eq!(row.cell(Column::RainDays), CellValue::Integer(60));
        assert_eq!(row.cell(Column::Production), CellValue::Float(10.5));
        assert_eq!(row.cell(Column::Region), CellValue::String("North".into()));
    }

    #[test]
    fn dataset_collects_sorted_choices_and_span() {
        let ds = fixtures::mixed();
        assert_eq!(ds.regions.iter().collect::<Vec<_>>(), ["North", "South"]);
        assert_eq!(ds.cereals.iter().collect::<Vec<_>>(), ["Maize", "Rice", "Sorghum"]);
        assert_eq!(ds.year_span(), Some((2000, 2002)));
    }

    #[test]
    fn table_round_trips_through_view() {
        let ds = fixtures::north_south();
        let table = ds.view().to_table();
        assert_eq!(table.view(), ds.view());
    }
}
