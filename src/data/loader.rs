use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use once_cell::sync::OnceCell;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{CellValue, Column, ColumnKind, Dataset, Row};
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` / `.xlsm` – first worksheet, header row then one row per observation
/// * `.csv`            – same layout, comma separated
/// * `.parquet`        – one column per field
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "xlsx" | "xlsm" => load_xlsx(BufReader::new(File::open(path)?)),
        "csv" => load_csv(File::open(path)?),
        "parquet" | "pq" => load_parquet(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string())),
    }
}

/// A dataset file that is read at most once.
///
/// The first successful [`DatasetSource::load`] caches the parsed dataset;
/// later calls hand out the same shared instance without touching the disk.
#[derive(Debug)]
pub struct DatasetSource {
    path: PathBuf,
    cached: OnceCell<Arc<Dataset>>,
}

impl DatasetSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DatasetSource {
            path: path.into(),
            cached: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Arc<Dataset>, LoadError> {
        self.cached
            .get_or_try_init(|| {
                let dataset = load_file(&self.path)?;
                log::info!(
                    "Loaded {} rows from {} ({} regions, {} cereals)",
                    dataset.len(),
                    self.path.display(),
                    dataset.regions.len(),
                    dataset.cereals.len()
                );
                Ok(Arc::new(dataset))
            })
            .cloned()
    }
}

// ---------------------------------------------------------------------------
// Spreadsheet loader
// ---------------------------------------------------------------------------

/// Read the first worksheet of an xlsx workbook from any seekable reader.
pub fn load_xlsx<RS: Read + Seek>(reader: RS) -> Result<Dataset, LoadError> {
    let mut workbook: Xlsx<RS> = open_workbook_from_rs(reader)
        .map_err(|e: calamine::XlsxError| LoadError::Workbook(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(LoadError::NoWorksheet)?
        .map_err(|e| LoadError::Workbook(e.to_string()))?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .ok_or(LoadError::NoHeader)?
        .iter()
        .map(|c| c.to_string())
        .collect();

    let records = rows.map(|r| Ok::<Vec<CellValue>, LoadError>(r.iter().map(workbook_cell).collect()));
    build_dataset(&headers, records)
}

fn workbook_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Null,
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::String(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout:  header row with column names, one observation per line.
pub fn load_csv<R: Read>(reader: R) -> Result<Dataset, LoadError> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let records = reader.records().map(|result| -> Result<Vec<CellValue>, LoadError> {
        let record = result?;
        Ok(record.iter().map(text_cell).collect())
    });
    build_dataset(&headers, records)
}

/// Raw CSV text. Numbers are parsed per column in [`build_dataset`], so
/// categorical values keep their exact spelling.
fn text_cell(s: &str) -> CellValue {
    if s.trim().is_empty() {
        CellValue::Null
    } else {
        CellValue::String(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per field.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Dataset, LoadError> {
    let file = File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build()?;

    let mut records: Vec<Result<Vec<CellValue>, LoadError>> = Vec::new();
    for batch_result in reader {
        let batch = batch_result?;
        for row in 0..batch.num_rows() {
            let cells = batch
                .columns()
                .iter()
                .map(|col| extract_cell(col, row))
                .collect();
            records.push(Ok(cells));
        }
    }

    build_dataset(&headers, records)
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &ArrayRef, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    let value = match col.data_type() {
        DataType::Utf8 => col.as_string_opt::<i32>().map(|a| CellValue::String(a.value(row).to_string())),
        DataType::LargeUtf8 => col.as_string_opt::<i64>().map(|a| CellValue::String(a.value(row).to_string())),
        DataType::Int32 => col.as_primitive_opt::<Int32Type>().map(|a| CellValue::Integer(a.value(row) as i64)),
        DataType::Int64 => col.as_primitive_opt::<Int64Type>().map(|a| CellValue::Integer(a.value(row))),
        DataType::Float32 => col.as_primitive_opt::<Float32Type>().map(|a| CellValue::Float(a.value(row) as f64)),
        DataType::Float64 => col.as_primitive_opt::<Float64Type>().map(|a| CellValue::Float(a.value(row))),
        DataType::Boolean => col.as_boolean_opt().map(|a| CellValue::Bool(a.value(row))),
        _ => None,
    };
    value.unwrap_or_else(|| CellValue::String(format!("{:?}", col.data_type())))
}

// ---------------------------------------------------------------------------
// Shared row validation
// ---------------------------------------------------------------------------

/// Turn a header plus raw records into a validated [`Dataset`].
///
/// Headers are matched with [`Column::from_header`]; unknown columns are
/// ignored. Fully blank records are skipped. Row numbers in errors are
/// 1-based and count the header line.
fn build_dataset<I>(headers: &[String], records: I) -> Result<Dataset, LoadError>
where
    I: IntoIterator<Item = Result<Vec<CellValue>, LoadError>>,
{
    let mut positions: Vec<(Column, usize)> = Vec::new();
    for (idx, header) in headers.iter().enumerate() {
        if let Some(col) = Column::from_header(header) {
            if !positions.iter().any(|(c, _)| *c == col) {
                positions.push((col, idx));
            }
        }
    }
    if let Some(missing) = Column::ALL
        .into_iter()
        .find(|col| !positions.iter().any(|(c, _)| c == col))
    {
        return Err(LoadError::MissingColumn {
            column: missing.id(),
        });
    }

    let null = CellValue::Null;
    let mut seen = HashSet::new();
    let mut rows = Vec::new();

    for (n, record) in records.into_iter().enumerate() {
        let record = record?;
        if record.iter().all(CellValue::is_null) {
            continue;
        }
        let line = n + 2;
        let cell = |col: Column| {
            positions
                .iter()
                .find(|(c, _)| *c == col)
                .and_then(|(_, idx)| record.get(*idx))
                .unwrap_or(&null)
        };

        let region = text_value(cell(Column::Region), line, Column::Region)?;
        let cereal = text_value(cell(Column::Cereal), line, Column::Cereal)?;
        let year = year_value(cell(Column::Year), line)?;

        let mut row = Row::new(region, cereal, year);
        for col in Column::ALL {
            if let Some(slot) = row.numeric_mut(col) {
                *slot = numeric_value(cell(col), line, col)?;
            }
        }

        if !seen.insert((row.region.clone(), row.cereal.clone(), row.year)) {
            return Err(LoadError::DuplicateKey {
                region: row.region,
                cereal: row.cereal,
                year: row.year,
            });
        }
        rows.push(row);
    }

    let columns = positions.into_iter().map(|(c, _)| c).collect();
    Ok(Dataset::from_rows(columns, rows))
}

fn text_value(cell: &CellValue, line: usize, col: Column) -> Result<String, LoadError> {
    if cell.is_null() {
        return Err(LoadError::MissingValue {
            row: line,
            column: col.id(),
        });
    }
    Ok(match cell {
        CellValue::String(s) => s.trim().to_string(),
        other => other.to_string(),
    })
}

fn year_value(cell: &CellValue, line: usize) -> Result<i32, LoadError> {
    if cell.is_null() {
        return Err(LoadError::MissingValue {
            row: line,
            column: Column::Year.id(),
        });
    }
    cell.as_f64()
        .filter(|v| v.fract() == 0.0 && *v >= i32::MIN as f64 && *v <= i32::MAX as f64)
        .map(|v| v as i32)
        .ok_or_else(|| LoadError::InvalidCell {
            row: line,
            column: Column::Year.id(),
            value: cell.to_string(),
        })
}

fn numeric_value(cell: &CellValue, line: usize, col: Column) -> Result<Option<f64>, LoadError> {
    if cell.is_null() {
        return Ok(None);
    }
    let invalid = || LoadError::InvalidCell {
        row: line,
        column: col.id(),
        value: cell.to_string(),
    };
    let value = cell.as_f64().ok_or_else(invalid)?;
    if col.kind() == ColumnKind::Integer && value.fract() != 0.0 {
        return Err(invalid());
    }
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "Region,Cereal,Year,Production_tonnes,Area_ha,Yield_t_per_ha,Precipitation_mm,RainDays,MeanTemp_C,MaxRelHumidity_pct,MeanWind_mps,SunshineHours";

    fn write_temp(ext: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(&format!(".{ext}"))
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn csv_with_logical_headers() {
        let csv = format!(
            "{HEADER}\nNorth,Maize,1996,10,5,2,800.5,60,28.1,70,2.5,8\nSouth,Maize,1996,5,,1,700,55,29,65,3,7.5\n"
        );
        let ds = load_csv(csv.as_bytes()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.columns, Column::ALL.to_vec());
        assert_eq!(ds.rows[0].production, Some(10.0));
        assert_eq!(ds.rows[0].precipitation, Some(800.5));
        assert_eq!(ds.rows[1].area, None);
        assert_eq!(ds.rows[1].region, "South");
    }

    #[test]
    fn csv_with_french_headers_and_extra_columns() {
        let header = Column::ALL
            .iter()
            .rev()
            .map(|c| c.source_header())
            .chain(std::iter::once("Notes"))
            .collect::<Vec<_>>()
            .join(",");
        let csv = format!("{header}\n8,2.5,70,28.1,60,800,2,5,10,1996,Mil,Centre,ok\n");
        let ds = load_csv(csv.as_bytes()).unwrap();
        let row = &ds.rows[0];
        assert_eq!(row.region, "Centre");
        assert_eq!(row.cereal, "Mil");
        assert_eq!(row.year, 1996);
        assert_eq!(row.production, Some(10.0));
        assert_eq!(row.sunshine, Some(8.0));
        assert_eq!(ds.columns.first(), Some(&Column::Sunshine));
        assert_eq!(ds.columns.len(), 12);
    }

    #[test]
    fn missing_column_is_rejected() {
        let csv = "Region,Cereal,Year\nNorth,Maize,1996\n";
        let err = load_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn { column: "Production_tonnes" }));
    }

    #[test]
    fn duplicate_observation_is_rejected() {
        let csv = format!(
            "{HEADER}\nNorth,Maize,1996,1,1,1,1,1,1,1,1,1\nNorth,Maize,1996,2,2,2,2,2,2,2,2,2\n"
        );
        let err = load_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::DuplicateKey { year: 1996, .. }));
    }

    #[test]
    fn malformed_cells_are_rejected() {
        let csv = format!("{HEADER}\nNorth,Maize,199x,1,1,1,1,1,1,1,1,1\n");
        assert!(matches!(
            load_csv(csv.as_bytes()).unwrap_err(),
            LoadError::InvalidCell { row: 2, column: "Year", .. }
        ));

        let csv = format!("{HEADER}\nNorth,Maize,1996,lots,1,1,1,1,1,1,1,1\n");
        assert!(matches!(
            load_csv(csv.as_bytes()).unwrap_err(),
            LoadError::InvalidCell { column: "Production_tonnes", .. }
        ));

        let csv = format!("{HEADER}\n,Maize,1996,1,1,1,1,1,1,1,1,1\n");
        assert!(matches!(
            load_csv(csv.as_bytes()).unwrap_err(),
            LoadError::MissingValue { column: "Region", .. }
        ));
    }

    #[test]
    fn unsupported_extension() {
        let file = write_temp("txt", "hello");
        assert!(matches!(
            load_file(file.path()).unwrap_err(),
            LoadError::UnsupportedExtension(ext) if ext == "txt"
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_file(Path::new("/definitely/not/here.xlsx")).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }

    #[test]
    fn source_loads_once() {
        let file = write_temp("csv", &format!("{HEADER}\nNorth,Maize,1996,1,1,1,1,1,1,1,1,1\n"));
        let source = DatasetSource::new(file.path());
        let first = source.load().unwrap();

        // The cached copy survives the file going away.
        let path = file.path().to_path_buf();
        drop(file);
        assert!(!path.exists());
        let second = source.load().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn parquet_columns() {
        use arrow::array::{Float64Array, Int64Array, StringArray};
        use arrow::datatypes::{Field, Schema};
        use arrow::record_batch::RecordBatch;
        use parquet::arrow::ArrowWriter;

        let mut fields = vec![
            Field::new("Region", DataType::Utf8, false),
            Field::new("Cereal", DataType::Utf8, false),
            Field::new("Year", DataType::Int64, false),
        ];
        let mut arrays: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from(vec!["North", "South"])),
            Arc::new(StringArray::from(vec!["Maize", "Maize"])),
            Arc::new(Int64Array::from(vec![1996, 1996])),
        ];
        for col in &Column::ALL[3..] {
            if col.kind() == ColumnKind::Integer {
                fields.push(Field::new(col.id(), DataType::Int64, true));
                arrays.push(Arc::new(Int64Array::from(vec![Some(42), None])));
            } else {
                fields.push(Field::new(col.id(), DataType::Float64, true));
                arrays.push(Arc::new(Float64Array::from(vec![Some(1.5), None])));
            }
        }
        let schema = Arc::new(Schema::new(fields));
        let batch = RecordBatch::try_new(schema.clone(), arrays).unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.rows[0].year, 1996);
        assert_eq!(ds.rows[0].mean_wind, Some(1.5));
        assert_eq!(ds.rows[1].mean_wind, None);
        assert_eq!(ds.rows[0].rain_days, Some(42.0));
        assert_eq!(ds.rows[1].rain_days, None);
    }

    #[test]
    fn numeric_looking_names_keep_their_spelling() {
        let csv = format!(
            "{HEADER}\n007,1.50,1996,1,1,1,1,1,1,1,1,1\nInfinity,1e3,1997,2,2,2,2,2,2,2,2,2\n"
        );
        let ds = load_csv(csv.as_bytes()).unwrap();
        assert_eq!(ds.rows[0].region, "007");
        assert_eq!(ds.rows[0].cereal, "1.50");
        assert_eq!(ds.rows[1].region, "Infinity");
        assert_eq!(ds.rows[1].cereal, "1e3");
        assert_eq!(ds.rows[1].production, Some(2.0));
    }
}
