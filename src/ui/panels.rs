use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use cereal_dash::dashboard::{ChartPanel, PanelContent, PanelKind, TablePanel};
use cereal_dash::data::measure::{ClimateMeasure, ProductivityMeasure};
use cereal_dash::data::model::Column;
use cereal_dash::i18n::Locale;

use crate::state::AppState;
use crate::ui::{plot, table};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    let locale = state.locale;
    ui.heading(locale.filters_heading());
    ui.separator();

    let Some(dataset) = state.dataset.clone() else {
        ui.label(locale.no_dataset());
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Regions ----
            let header = format!(
                "{}  ({}/{})",
                locale.regions_prompt(),
                state.selection.regions.len(),
                dataset.regions.len()
            );
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("regions")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button(locale.select_all()).clicked() {
                            state.select_all_regions();
                        }
                        if ui.small_button(locale.select_none()).clicked() {
                            state.select_no_regions();
                        }
                    });
                    for region in &dataset.regions {
                        let mut checked = state.selection.regions.contains(region);
                        let text = RichText::new(region).color(state.region_colors.color_for(region));
                        if ui.checkbox(&mut checked, text).changed() {
                            state.toggle_region(region);
                        }
                    }
                });

            // ---- Cereals ----
            let header = format!(
                "{}  ({}/{})",
                locale.cereals_prompt(),
                state.selection.cereals.len(),
                dataset.cereals.len()
            );
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("cereals")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button(locale.select_all()).clicked() {
                            state.select_all_cereals();
                        }
                        if ui.small_button(locale.select_none()).clicked() {
                            state.select_no_cereals();
                        }
                    });
                    for cereal in &dataset.cereals {
                        let mut checked = state.selection.cereals.contains(cereal);
                        let text = RichText::new(cereal).color(state.cereal_colors.color_for(cereal));
                        if ui.checkbox(&mut checked, text).changed() {
                            state.toggle_cereal(cereal);
                        }
                    }
                });
            ui.separator();

            // ---- Measures ----
            ui.strong(locale.productivity_prompt());
            let current = state.measures.productivity;
            egui::ComboBox::from_id_salt("productivity")
                .selected_text(locale.column_label(current.column()))
                .show_ui(ui, |ui: &mut Ui| {
                    for m in ProductivityMeasure::ALL {
                        if ui
                            .selectable_label(current == m, locale.column_label(m.column()))
                            .clicked()
                        {
                            state.set_productivity(m);
                        }
                    }
                });

            ui.strong(locale.climate_prompt());
            let current = state.measures.climate;
            egui::ComboBox::from_id_salt("climate")
                .selected_text(locale.column_label(current.column()))
                .show_ui(ui, |ui: &mut Ui| {
                    for m in ClimateMeasure::ALL {
                        if ui
                            .selectable_label(current == m, locale.column_label(m.column()))
                            .clicked()
                        {
                            state.set_climate(m);
                        }
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    let current = state.locale;
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button(current.file_menu(), |ui: &mut Ui| {
            if ui.button(current.open_menu()).clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = state.dashboard.as_ref().is_some_and(|d| d.can_export());
            if ui.add_enabled(can_export, egui::Button::new(current.export_menu())).clicked() {
                save_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        let mut locale = state.locale;
        egui::ComboBox::from_id_salt("locale")
            .selected_text(locale.display_name())
            .show_ui(ui, |ui: &mut Ui| {
                for l in Locale::all() {
                    ui.selectable_value(&mut locale, *l, l.display_name());
                }
            });
        state.locale = locale;

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(current.dataset_summary(ds.len(), ds.regions.len(), ds.cereals.len()));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Central panel – table, download, charts
// ---------------------------------------------------------------------------

pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    let locale = state.locale;
    let Some(dashboard) = &state.dashboard else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading(locale.open_prompt());
        });
        return;
    };

    let mut export_clicked = false;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading(locale.title());
            ui.label(locale.instructions());
            ui.separator();

            let selection = &dashboard.selection;
            match &dashboard.table {
                TablePanel::SelectionRequired => {
                    ui.heading(locale.select_filter_notice());
                }
                TablePanel::NoData(_) => {
                    ui.heading(locale.table_caption(&selection.regions, &selection.cereals));
                    ui.colored_label(Color32::YELLOW, locale.no_data_notice());
                }
                TablePanel::Rows { table: rows, .. } => {
                    ui.heading(locale.table_caption(&selection.regions, &selection.cereals));
                    table::data_table(ui, rows, locale);
                }
            }

            ui.add_space(8.0);
            ui.label(locale.download_heading());
            if ui
                .add_enabled(dashboard.can_export(), egui::Button::new(locale.download_button()))
                .clicked()
            {
                export_clicked = true;
            }
            ui.separator();

            for panel in &dashboard.panels {
                chart_panel(ui, state, panel, dashboard.year_span);
                ui.separator();
            }
        });

    if export_clicked {
        save_file_dialog(state);
    }
}

fn chart_panel(ui: &mut Ui, state: &AppState, panel: &ChartPanel, span: Option<(i32, i32)>) {
    let locale = state.locale;
    ui.heading(locale.panel_heading(panel.kind));

    let PanelContent::Ready { series, stats } = &panel.content else {
        ui.colored_label(Color32::YELLOW, locale.no_data_notice());
        return;
    };

    let selection = &state.selection;
    let subject = match panel.kind {
        PanelKind::ProductivityByRegion | PanelKind::ClimateByRegion => {
            locale.subject(&selection.regions, None)
        }
        PanelKind::ProductivityByCereal => locale.subject(None, &selection.cereals),
        PanelKind::ProductivityByRegionAndCereal => {
            locale.subject(&selection.regions, &selection.cereals)
        }
    };

    let colors = match panel.kind.hue() {
        Column::Cereal => &state.cereal_colors,
        _ => &state.region_colors,
    };

    ui.label(locale.evolution_caption(panel.measure, span, &subject));
    plot::measure_chart(ui, panel.kind, panel.measure, series, colors, locale);
    ui.add_space(4.0);
    ui.label(locale.statistics_caption(panel.measure, &subject));
    table::stats_table(ui, &format!("stats_{:?}", panel.kind), stats);
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let locale = state.locale;
    let file = rfd::FileDialog::new()
        .set_title(locale.open_dialog_title())
        .add_filter(locale.supported_files(), &["xlsx", "xlsm", "csv", "parquet", "pq"])
        .add_filter("Excel", &["xlsx", "xlsm"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open(path);
    }
}

pub fn save_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title(state.locale.download_heading())
        .set_file_name(state.locale.export_file_name())
        .add_filter("Excel", &["xlsx"])
        .save_file();

    if let Some(path) = file {
        if let Err(e) = state.export_to(&path) {
            log::error!("Export failed: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
