//! English and French display text.

use serde::{Deserialize, Serialize};

use crate::dashboard::PanelKind;
use crate::data::model::Column;

/// Supported languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "fr")]
    French,
}

impl Locale {
    pub fn code(&self) -> &'static str {
        match self {
            Locale::English => "en",
            Locale::French => "fr",
        }
    }

    /// Name of the language in the language itself
    pub fn display_name(&self) -> &'static str {
        match self {
            Locale::English => "English",
            Locale::French => "Français",
        }
    }

    pub fn all() -> &'static [Locale] {
        &[Locale::English, Locale::French]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Locale::English),
            "fr" => Some(Locale::French),
            _ => None,
        }
    }

    pub fn column_label(&self, column: Column) -> &'static str {
        match self {
            Locale::English => match column {
                Column::Region => "Region",
                Column::Cereal => "Cereal",
                Column::Year => "Year",
                Column::Production => "Production (tonnes)",
                Column::Area => "Cultivated Area (ha)",
                Column::Yield => "Yield (tonne/ha)",
                Column::Precipitation => "Mean annual precipitation (mm)",
                Column::RainDays => "Rain-day count",
                Column::MeanTemp => "Mean annual temperature (°C)",
                Column::MaxRelHumidity => "Max relative humidity (%)",
                Column::MeanWind => "Mean annual wind speed (m/s)",
                Column::Sunshine => "Sunshine duration (h/day)",
            },
            Locale::French => column.source_header(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Locale::English => "Interactive Dashboard",
            Locale::French => "Tableau de Bord Interactif",
        }
    }

    pub fn instructions(&self) -> &'static str {
        match self {
            Locale::English => {
                "Filters are on the left: state variables (region and cereal), a productivity \
                 variable and a climate variable. Select the filters first, then explore the \
                 tables and charts below."
            }
            Locale::French => {
                "Les filtres sont à gauche : variables d'état (région et céréale), une variable \
                 de productivité et une variable climatique. Sélectionnez d'abord les filtres, \
                 puis explorez les tableaux et graphiques ci-dessous."
            }
        }
    }

    pub fn filters_heading(&self) -> &'static str {
        match self {
            Locale::English => "Filters",
            Locale::French => "Filtres",
        }
    }

    pub fn regions_prompt(&self) -> &'static str {
        match self {
            Locale::English => "Select one or more Regions",
            Locale::French => "Sélectionnez une ou plusieurs Régions",
        }
    }

    pub fn cereals_prompt(&self) -> &'static str {
        match self {
            Locale::English => "Select one or more Cereals",
            Locale::French => "Sélectionnez une ou plusieurs Céréales",
        }
    }

    pub fn productivity_prompt(&self) -> &'static str {
        match self {
            Locale::English => "Productivity variable",
            Locale::French => "Variable de productivité",
        }
    }

    pub fn climate_prompt(&self) -> &'static str {
        match self {
            Locale::English => "Climate variable",
            Locale::French => "Variable climatique",
        }
    }

    pub fn select_filter_notice(&self) -> &'static str {
        match self {
            Locale::English => "Please select at least one Region or Cereal.",
            Locale::French => "Veuillez sélectionner au moins une Région ou une Céréale.",
        }
    }

    pub fn no_data_notice(&self) -> &'static str {
        match self {
            Locale::English => "No data available for current selections.",
            Locale::French => "Aucune donnée disponible pour les sélections actuelles.",
        }
    }

    pub fn download_heading(&self) -> &'static str {
        match self {
            Locale::English => "Download filtered data",
            Locale::French => "Télécharger les données filtrées",
        }
    }

    pub fn download_button(&self) -> &'static str {
        match self {
            Locale::English => "Download in Excel",
            Locale::French => "Télécharger en Excel",
        }
    }

    pub fn sheet_name(&self) -> &'static str {
        match self {
            Locale::English => "filtered data",
            Locale::French => "Données filtrées",
        }
    }

    pub fn export_file_name(&self) -> &'static str {
        match self {
            Locale::English => "filtered_data.xlsx",
            Locale::French => "donnees_filtrees.xlsx",
        }
    }

    pub fn file_menu(&self) -> &'static str {
        match self {
            Locale::English => "File",
            Locale::French => "Fichier",
        }
    }

    pub fn open_menu(&self) -> &'static str {
        match self {
            Locale::English => "Open…",
            Locale::French => "Ouvrir…",
        }
    }

    pub fn export_menu(&self) -> &'static str {
        match self {
            Locale::English => "Export…",
            Locale::French => "Exporter…",
        }
    }

    pub fn open_dialog_title(&self) -> &'static str {
        match self {
            Locale::English => "Open cereal dataset",
            Locale::French => "Ouvrir un jeu de données céréalières",
        }
    }

    pub fn supported_files(&self) -> &'static str {
        match self {
            Locale::English => "Supported files",
            Locale::French => "Fichiers pris en charge",
        }
    }

    pub fn open_prompt(&self) -> &'static str {
        match self {
            Locale::English => "Open a dataset to begin  (File → Open…)",
            Locale::French => "Ouvrez un jeu de données pour commencer  (Fichier → Ouvrir…)",
        }
    }

    pub fn no_dataset(&self) -> &'static str {
        match self {
            Locale::English => "No dataset loaded.",
            Locale::French => "Aucun jeu de données chargé.",
        }
    }

    pub fn select_all(&self) -> &'static str {
        match self {
            Locale::English => "All",
            Locale::French => "Tout",
        }
    }

    pub fn select_none(&self) -> &'static str {
        match self {
            Locale::English => "None",
            Locale::French => "Aucun",
        }
    }

    /// Top bar summary, e.g. `540 rows, 5 regions, 4 cereals`.
    pub fn dataset_summary(&self, rows: usize, regions: usize, cereals: usize) -> String {
        match self {
            Locale::English => format!("{rows} rows, {regions} regions, {cereals} cereals"),
            Locale::French => format!("{rows} lignes, {regions} régions, {cereals} céréales"),
        }
    }

    fn and(&self) -> &'static str {
        match self {
            Locale::English => "and",
            Locale::French => "et",
        }
    }

    /// Caption above the data table, e.g. `Data table for North and Maize`.
    pub fn table_caption<'a, R, C>(&self, regions: R, cereals: C) -> String
    where
        R: IntoIterator<Item = &'a String>,
        C: IntoIterator<Item = &'a String>,
    {
        let prefix = match self {
            Locale::English => "Data table for",
            Locale::French => "Table de données pour",
        };
        format!("{prefix} {}", self.subject(regions, cereals))
    }

    pub fn panel_heading(&self, kind: PanelKind) -> &'static str {
        match (self, kind) {
            (Locale::English, PanelKind::ProductivityByRegion) => "Productivity Chart and Statistics by Region",
            (Locale::English, PanelKind::ProductivityByCereal) => "Productivity Chart and Statistics by Cereal",
            (Locale::English, PanelKind::ProductivityByRegionAndCereal) => {
                "Productivity Chart and Statistics by Region and Cereal"
            }
            (Locale::English, PanelKind::ClimateByRegion) => "Climate Chart and Statistics by Region",
            (Locale::French, PanelKind::ProductivityByRegion) => {
                "Graphique et Statistiques de productivité en fonction de la région"
            }
            (Locale::French, PanelKind::ProductivityByCereal) => {
                "Graphique et Statistiques de productivité en fonction de la céréale"
            }
            (Locale::French, PanelKind::ProductivityByRegionAndCereal) => {
                "Graphique et Statistiques de productivité en fonction de la région et de la céréale"
            }
            (Locale::French, PanelKind::ClimateByRegion) => {
                "Graphique et Statistiques de climat en fonction de la région"
            }
        }
    }

    /// `1. Evolution of <measure> (1996 - 2022) for <subject>`
    pub fn evolution_caption(&self, measure: Column, span: Option<(i32, i32)>, subject: &str) -> String {
        let label = self.column_label(measure);
        let span = span
            .map(|(a, b)| format!(" ({a} - {b})"))
            .unwrap_or_default();
        match self {
            Locale::English => format!("1. Evolution of {label}{span} for {subject}"),
            Locale::French => format!("1. Evolution de {label}{span} pour {subject}"),
        }
    }

    /// `2. Descriptive Statistics of <measure> for <subject>`
    pub fn statistics_caption(&self, measure: Column, subject: &str) -> String {
        let label = self.column_label(measure);
        match self {
            Locale::English => format!("2. Descriptive Statistics of {label} for {subject}"),
            Locale::French => format!("2. Statistiques Descriptives de {label} pour {subject}"),
        }
    }

    /// Comma-joined selections, with the conjunction between the two sets
    /// when both are present.
    pub fn subject<'a, R, C>(&self, regions: R, cereals: C) -> String
    where
        R: IntoIterator<Item = &'a String>,
        C: IntoIterator<Item = &'a String>,
    {
        let join = |it: &mut dyn Iterator<Item = &'a String>| {
            it.map(String::as_str).collect::<Vec<_>>().join(", ")
        };
        let regions = join(&mut regions.into_iter());
        let cereals = join(&mut cereals.into_iter());
        match (regions.is_empty(), cereals.is_empty()) {
            (false, false) => format!("{regions} {} {cereals}", self.and()),
            (false, true) => regions,
            _ => cereals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn codes_round_trip() {
        for locale in Locale::all() {
            assert_eq!(Locale::from_code(locale.code()), Some(*locale));
        }
        assert_eq!(Locale::from_code("de"), None);
    }

    #[test]
    fn captions_join_selections() {
        let regions = set(&["Centre", "Nord"]);
        let cereals = set(&["Maïs"]);
        assert_eq!(
            Locale::English.table_caption(&regions, &cereals),
            "Data table for Centre, Nord and Maïs"
        );
        assert_eq!(
            Locale::French.table_caption(&regions, &BTreeSet::new()),
            "Table de données pour Centre, Nord"
        );
        assert_eq!(Locale::English.subject(&BTreeSet::new(), &cereals), "Maïs");
    }

    #[test]
    fn evolution_caption_uses_the_data_span() {
        let caption = Locale::English.evolution_caption(Column::Production, Some((1996, 2022)), "North");
        assert_eq!(caption, "1. Evolution of Production (tonnes) (1996 - 2022) for North");
        let caption = Locale::French.statistics_caption(Column::Yield, "Nord");
        assert_eq!(caption, "2. Statistiques Descriptives de Rendement (tonne/ha) pour Nord");
    }

    #[test]
    fn export_names_are_localised() {
        assert_eq!(Locale::English.sheet_name(), "filtered data");
        assert_eq!(Locale::French.export_file_name(), "donnees_filtrees.xlsx");
    }

    #[test]
    fn menu_and_controls_are_localised() {
        for locale in Locale::all() {
            assert!(!locale.file_menu().is_empty());
            assert!(!locale.no_dataset().is_empty());
        }
        assert_eq!(Locale::French.file_menu(), "Fichier");
        assert_eq!(Locale::French.select_all(), "Tout");
        assert_eq!(Locale::English.export_menu(), "Export…");
        assert_eq!(
            Locale::French.dataset_summary(12, 2, 3),
            "12 lignes, 2 régions, 3 céréales"
        );
        assert_ne!(Locale::English.open_prompt(), Locale::French.open_prompt());
    }

    #[test]
    fn serde_uses_codes() {
        assert_eq!(serde_json::to_string(&Locale::French).unwrap(), "\"fr\"");
        let parsed: Locale = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(parsed, Locale::English);
    }
}
