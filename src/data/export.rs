//! Single-sheet xlsx export of a view.

use rust_xlsxwriter::{DocProperties, ExcelDateTime, Format, Workbook};

use super::model::{CellValue, View};
use crate::error::SerializeError;

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// A ready-to-download export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportFile {
    pub file_name: &'static str,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

/// Write `view` as one worksheet named `sheet_name`: a bold header row of
/// column identifiers, then one row per observation in view order.
///
/// The document timestamp is fixed so identical views give identical bytes.
pub fn serialize(view: &View<'_>, sheet_name: &str) -> Result<Vec<u8>, SerializeError> {
    if view.is_empty() {
        return Err(SerializeError::EmptyView);
    }

    let mut workbook = Workbook::new();
    let created = ExcelDateTime::from_ymd(2000, 1, 1)?;
    workbook.set_properties(&DocProperties::new().set_creation_datetime(&created));

    let header = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_name)?;

    for (c, column) in view.columns().iter().enumerate() {
        sheet.write_string_with_format(0, c as u16, column.id(), &header)?;
    }
    for (r, row) in view.rows().iter().enumerate() {
        let line = r as u32 + 1;
        for (c, column) in view.columns().iter().enumerate() {
            let col = c as u16;
            match row.cell(*column) {
                CellValue::String(s) => {
                    sheet.write_string(line, col, &s)?;
                }
                CellValue::Integer(i) => {
                    sheet.write_number(line, col, i as f64)?;
                }
                CellValue::Float(v) => {
                    sheet.write_number(line, col, v)?;
                }
                CellValue::Bool(b) => {
                    sheet.write_boolean(line, col, b)?;
                }
                CellValue::Null => {}
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}
