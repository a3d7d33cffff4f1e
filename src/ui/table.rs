use eframe::egui::Ui;
use egui_extras::{Column as TableColumn, TableBuilder};

use cereal_dash::data::model::{CellValue, Table};
use cereal_dash::data::stats::StatisticsTable;
use cereal_dash::i18n::Locale;

const ROW_HEIGHT: f32 = 18.0;

fn format_float(v: f64) -> String {
    format!("{v:.2}")
}

fn format_cell(cell: &CellValue) -> String {
    match cell {
        CellValue::Float(v) => format_float(*v),
        CellValue::Null => String::new(),
        other => other.to_string(),
    }
}

/// The filtered rows, one column per field.
pub fn data_table(ui: &mut Ui, table: &Table, locale: Locale) {
    ui.push_id("data_table", |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .max_scroll_height(300.0)
            .columns(TableColumn::auto().at_least(60.0), table.columns.len())
            .header(ROW_HEIGHT + 4.0, |mut header| {
                for column in &table.columns {
                    header.col(|ui| {
                        ui.strong(locale.column_label(*column));
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, table.rows.len(), |mut row| {
                    let data = &table.rows[row.index()];
                    for column in &table.columns {
                        row.col(|ui| {
                            ui.label(format_cell(&data.cell(*column)));
                        });
                    }
                });
            });
    });
}

/// Grouped descriptive statistics.
pub fn stats_table(ui: &mut Ui, id: &str, stats: &StatisticsTable) {
    let headers = stats.headers();
    ui.push_id(id, |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .columns(TableColumn::auto().at_least(60.0), headers.len())
            .header(ROW_HEIGHT + 4.0, |mut header| {
                for h in &headers {
                    header.col(|ui| {
                        ui.strong(h);
                    });
                }
            })
            .body(|mut body| {
                for group in &stats.groups {
                    let s = &group.summary;
                    let numbers = [
                        s.count.to_string(),
                        format_float(s.mean),
                        s.std.map(format_float).unwrap_or_default(),
                        format_float(s.min),
                        format_float(s.p25),
                        format_float(s.p50),
                        format_float(s.p75),
                        format_float(s.max),
                    ];
                    body.row(ROW_HEIGHT, |mut row| {
                        for text in group.key.iter().chain(numbers.iter()) {
                            row.col(|ui| {
                                ui.label(text);
                            });
                        }
                    });
                }
            });
    });
}
