//! One full recompute of everything the dashboard shows.
//!
//! [`Dashboard::build`] is a pure function of the dataset, the filter
//! selection and the measure choice. The table, each chart panel and the
//! export decide independently whether they have data; an empty view in one
//! never blanks out another.

use crate::data::chart::{project, Series};
use crate::data::export::{serialize, ExportFile, XLSX_MIME};
use crate::data::filter::{filter, FilterSelection, ViewKind};
use crate::data::measure::MeasureChoice;
use crate::data::model::{Column, Dataset, Table};
use crate::data::stats::{describe, StatisticsTable};
use crate::error::SerializeError;
use crate::i18n::Locale;

/// The chart + statistics blocks, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    ProductivityByRegion,
    ProductivityByCereal,
    ProductivityByRegionAndCereal,
    ClimateByRegion,
}

impl PanelKind {
    pub const ALL: [PanelKind; 4] = [
        PanelKind::ProductivityByRegion,
        PanelKind::ProductivityByCereal,
        PanelKind::ProductivityByRegionAndCereal,
        PanelKind::ClimateByRegion,
    ];

    pub fn view(self) -> ViewKind {
        match self {
            PanelKind::ProductivityByRegion | PanelKind::ClimateByRegion => ViewKind::Region,
            PanelKind::ProductivityByCereal => ViewKind::Cereal,
            PanelKind::ProductivityByRegionAndCereal => ViewKind::Combined,
        }
    }

    pub fn measure(self, measures: MeasureChoice) -> Column {
        match self {
            PanelKind::ClimateByRegion => measures.climate.column(),
            _ => measures.productivity.column(),
        }
    }

    /// Column that picks the line colour.
    pub fn hue(self) -> Column {
        match self {
            PanelKind::ProductivityByCereal => Column::Cereal,
            _ => Column::Region,
        }
    }

    /// Column that picks the line style, if any.
    pub fn style(self) -> Option<Column> {
        match self {
            PanelKind::ProductivityByRegionAndCereal => Some(Column::Cereal),
            _ => None,
        }
    }

    pub fn stats_groups(self) -> &'static [Column] {
        match self {
            PanelKind::ProductivityByCereal => &[Column::Cereal],
            PanelKind::ProductivityByRegionAndCereal => &[Column::Region, Column::Cereal],
            PanelKind::ProductivityByRegion | PanelKind::ClimateByRegion => &[Column::Region],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelContent {
    Ready {
        series: Vec<Series>,
        stats: StatisticsTable,
    },
    NoData,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPanel {
    pub kind: PanelKind,
    pub measure: Column,
    pub content: PanelContent,
}

/// What the data table area shows.
#[derive(Debug, Clone, PartialEq)]
pub enum TablePanel {
    /// Neither regions nor cereals are selected.
    SelectionRequired,
    /// The authoritative view has no rows.
    NoData(ViewKind),
    Rows { kind: ViewKind, table: Table },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub selection: FilterSelection,
    pub measures: MeasureChoice,
    pub year_span: Option<(i32, i32)>,
    pub table: TablePanel,
    pub panels: Vec<ChartPanel>,
}

impl Dashboard {
    pub fn build(dataset: &Dataset, selection: &FilterSelection, measures: MeasureChoice) -> Self {
        let views = filter(dataset, selection);
        log::debug!(
            "Recomputed views: region={} cereal={} combined={}",
            views.region.len(),
            views.cereal.len(),
            views.combined.len()
        );

        let table = match views.authoritative(selection) {
            None => TablePanel::SelectionRequired,
            Some((kind, view)) if view.is_empty() => {
                log::warn!("No rows for the {kind:?} view");
                TablePanel::NoData(kind)
            }
            Some((kind, view)) => TablePanel::Rows {
                kind,
                table: view.to_table(),
            },
        };

        let panels = PanelKind::ALL
            .into_iter()
            .map(|kind| {
                let view = views.get(kind.view());
                let measure = kind.measure(measures);
                let content = if view.is_empty() {
                    PanelContent::NoData
                } else {
                    match describe(view, measure, kind.stats_groups()) {
                        Ok(stats) => PanelContent::Ready {
                            series: project(view, Column::Year, measure, &[kind.hue()], kind.style()),
                            stats,
                        },
                        Err(e) => {
                            log::warn!("Statistics for {kind:?} unavailable: {e}");
                            PanelContent::NoData
                        }
                    }
                };
                ChartPanel {
                    kind,
                    measure,
                    content,
                }
            })
            .collect();

        Dashboard {
            selection: selection.clone(),
            measures,
            year_span: dataset.year_span(),
            table,
            panels,
        }
    }

    /// Whether the download control should be offered.
    pub fn can_export(&self) -> bool {
        matches!(self.table, TablePanel::Rows { .. })
    }

    /// Serialize the displayed table to a downloadable workbook.
    pub fn export(&self, locale: Locale) -> Result<ExportFile, SerializeError> {
        let TablePanel::Rows { table, .. } = &self.table else {
            return Err(SerializeError::EmptyView);
        };
        let bytes = serialize(&table.view(), locale.sheet_name())?;
        Ok(ExportFile {
            file_name: locale.export_file_name(),
            mime: XLSX_MIME,
            bytes,
        })
    }

    pub fn panel(&self, kind: PanelKind) -> Option<&ChartPanel> {
        self.panels.iter().find(|p| p.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_xlsx;
    use crate::data::measure::{ClimateMeasure, ProductivityMeasure};
    use crate::data::model::fixtures;
    use std::io::Cursor;

    fn no_cereal(regions: &[&str]) -> FilterSelection {
        FilterSelection::new(regions.iter().copied(), Vec::<String>::new())
    }

    #[test]
    fn nothing_selected_shows_notice_only() {
        let ds = fixtures::mixed();
        let dash = Dashboard::build(&ds, &FilterSelection::default(), MeasureChoice::default());

        assert_eq!(dash.table, TablePanel::SelectionRequired);
        assert!(!dash.can_export());
        assert!(matches!(dash.export(Locale::English), Err(SerializeError::EmptyView)));
        assert!(dash.panels.iter().all(|p| p.content == PanelContent::NoData));
    }

    #[test]
    fn region_only_scenario() {
        let ds = fixtures::north_south();
        let dash = Dashboard::build(&ds, &no_cereal(&["North"]), MeasureChoice::default());

        let TablePanel::Rows { kind, table } = &dash.table else {
            panic!("expected rows, got {:?}", dash.table);
        };
        assert_eq!(*kind, ViewKind::Region);
        assert_eq!(table.len(), 3);
        assert!(table.rows.iter().all(|r| r.region == "North"));

        let panel = dash.panel(PanelKind::ProductivityByRegion).unwrap();
        let PanelContent::Ready { series, stats } = &panel.content else {
            panic!("expected a chart");
        };
        assert_eq!(series.len(), 1);
        let north = stats.group(&["North"]).unwrap();
        assert_eq!(north.summary.count, 3);
        assert_eq!(north.summary.mean, 12.0);
        assert_eq!(north.summary.min, 10.0);
        assert_eq!(north.summary.max, 14.0);

        // The cereal and combined panels have nothing, the others still render.
        assert_eq!(dash.panel(PanelKind::ProductivityByCereal).unwrap().content, PanelContent::NoData);
        assert_eq!(
            dash.panel(PanelKind::ProductivityByRegionAndCereal).unwrap().content,
            PanelContent::NoData
        );
        assert!(matches!(
            dash.panel(PanelKind::ClimateByRegion).unwrap().content,
            PanelContent::Ready { .. }
        ));
    }

    #[test]
    fn empty_intersection_disables_export() {
        let ds = fixtures::north_south();
        let selection = FilterSelection::new(["North"], ["Rice"]);
        let dash = Dashboard::build(&ds, &selection, MeasureChoice::default());

        assert_eq!(dash.table, TablePanel::NoData(ViewKind::Combined));
        assert!(!dash.can_export());
        assert_eq!(
            dash.panel(PanelKind::ProductivityByRegionAndCereal).unwrap().content,
            PanelContent::NoData
        );
        assert!(matches!(
            dash.panel(PanelKind::ProductivityByRegion).unwrap().content,
            PanelContent::Ready { .. }
        ));
    }

    #[test]
    fn combined_panel_groups_by_both_and_styles_by_cereal() {
        let ds = fixtures::mixed();
        let selection = FilterSelection::new(["North", "South"], ["Maize", "Sorghum"]);
        let dash = Dashboard::build(&ds, &selection, MeasureChoice::default());

        let panel = dash.panel(PanelKind::ProductivityByRegionAndCereal).unwrap();
        let PanelContent::Ready { series, stats } = &panel.content else {
            panic!("expected a chart");
        };
        assert_eq!(series.len(), 3);
        assert!(series.iter().all(|s| s.style.is_some()));
        assert_eq!(stats.group_columns, vec![Column::Region, Column::Cereal]);
        assert_eq!(stats.groups.len(), 3);
    }

    #[test]
    fn measures_follow_the_choice() {
        let ds = fixtures::mixed();
        let measures = MeasureChoice {
            productivity: ProductivityMeasure::Yield,
            climate: ClimateMeasure::Sunshine,
        };
        let dash = Dashboard::build(&ds, &no_cereal(&["North"]), measures);

        assert_eq!(dash.panel(PanelKind::ProductivityByRegion).unwrap().measure, Column::Yield);
        assert_eq!(dash.panel(PanelKind::ClimateByRegion).unwrap().measure, Column::Sunshine);
    }

    #[test]
    fn export_matches_the_displayed_table() {
        let ds = fixtures::mixed();
        let selection = FilterSelection::new(Vec::<String>::new(), ["Rice"]);
        let dash = Dashboard::build(&ds, &selection, MeasureChoice::default());

        let file = dash.export(Locale::French).unwrap();
        assert_eq!(file.file_name, "donnees_filtrees.xlsx");
        assert_eq!(file.mime, XLSX_MIME);

        let TablePanel::Rows { table, .. } = &dash.table else {
            panic!("expected rows");
        };
        let back = load_xlsx(Cursor::new(file.bytes)).unwrap();
        assert_eq!(back.rows, table.rows);
    }

    #[test]
    fn rebuilding_is_deterministic() {
        let ds = fixtures::mixed();
        let selection = FilterSelection::new(["South"], ["Maize"]);
        let a = Dashboard::build(&ds, &selection, MeasureChoice::default());
        let b = Dashboard::build(&ds, &selection, MeasureChoice::default());
        assert_eq!(a, b);
    }
}
