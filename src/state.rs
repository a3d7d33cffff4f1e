use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use cereal_dash::config::DashboardConfig;
use cereal_dash::dashboard::Dashboard;
use cereal_dash::data::filter::FilterSelection;
use cereal_dash::data::loader::DatasetSource;
use cereal_dash::data::measure::{ClimateMeasure, MeasureChoice, ProductivityMeasure};
use cereal_dash::data::model::Dataset;
use cereal_dash::i18n::Locale;

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset (None until a file is opened).
    pub dataset: Option<Arc<Dataset>>,

    pub selection: FilterSelection,
    pub measures: MeasureChoice,
    pub locale: Locale,

    /// Output of the last recompute.
    pub dashboard: Option<Dashboard>,

    /// Colours per region and per cereal, fixed for the loaded dataset.
    pub region_colors: ColorMap,
    pub cereal_colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: &DashboardConfig) -> Self {
        let mut state = AppState {
            locale: config.locale,
            ..Default::default()
        };
        if let Some(path) = &config.dataset_path {
            state.open(path.clone());
        }
        state
    }

    /// Load a dataset file, reporting failures in the status line.
    pub fn open(&mut self, path: PathBuf) {
        let source = DatasetSource::new(path);
        match source.load() {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load {}: {e}", source.path().display());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest a newly loaded dataset, initialise filters and colours.
    pub fn set_dataset(&mut self, dataset: Arc<Dataset>) {
        self.selection = FilterSelection::initial(&dataset);
        self.region_colors = ColorMap::new(&dataset.regions);
        self.cereal_colors = ColorMap::new(&dataset.cereals);
        self.dataset = Some(dataset);
        self.status_message = None;
        self.recompute();
    }

    /// Rebuild every view from scratch after an input change.
    pub fn recompute(&mut self) {
        self.dashboard = self
            .dataset
            .as_deref()
            .map(|ds| Dashboard::build(ds, &self.selection, self.measures));
    }

    pub fn toggle_region(&mut self, region: &str) {
        self.selection.toggle_region(region);
        self.recompute();
    }

    pub fn toggle_cereal(&mut self, cereal: &str) {
        self.selection.toggle_cereal(cereal);
        self.recompute();
    }

    pub fn select_all_regions(&mut self) {
        if let Some(ds) = &self.dataset {
            self.selection.regions = ds.regions.clone();
            self.recompute();
        }
    }

    pub fn select_no_regions(&mut self) {
        self.selection.regions.clear();
        self.recompute();
    }

    pub fn select_all_cereals(&mut self) {
        if let Some(ds) = &self.dataset {
            self.selection.cereals = ds.cereals.clone();
            self.recompute();
        }
    }

    pub fn select_no_cereals(&mut self) {
        self.selection.cereals.clear();
        self.recompute();
    }

    pub fn set_productivity(&mut self, measure: ProductivityMeasure) {
        if self.measures.productivity != measure {
            self.measures.productivity = measure;
            self.recompute();
        }
    }

    pub fn set_climate(&mut self, measure: ClimateMeasure) {
        if self.measures.climate != measure {
            self.measures.climate = measure;
            self.recompute();
        }
    }

    /// Write the displayed table to `path` as xlsx.
    pub fn export_to(&self, path: &Path) -> Result<()> {
        let dashboard = self.dashboard.as_ref().context("no dataset loaded")?;
        let file = dashboard.export(self.locale).context("building workbook")?;
        std::fs::write(path, &file.bytes).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Exported {} bytes to {}", file.bytes.len(), path.display());
        Ok(())
    }
}
