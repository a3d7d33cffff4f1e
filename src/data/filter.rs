use std::collections::BTreeSet;

use super::model::{Dataset, Row, View};

// ---------------------------------------------------------------------------
// Filter selection: which regions and cereals are selected
// ---------------------------------------------------------------------------

/// Selected regions and cereals. An empty set selects nothing; it is never
/// a wildcard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub regions: BTreeSet<String>,
    pub cereals: BTreeSet<String>,
}

impl FilterSelection {
    pub fn new<R, C>(regions: R, cereals: C) -> Self
    where
        R: IntoIterator,
        R::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        FilterSelection {
            regions: regions.into_iter().map(Into::into).collect(),
            cereals: cereals.into_iter().map(Into::into).collect(),
        }
    }

    /// First region and first cereal in sorted order, the initial state of
    /// the sidebar.
    pub fn initial(dataset: &Dataset) -> Self {
        FilterSelection {
            regions: dataset.regions.iter().take(1).cloned().collect(),
            cereals: dataset.cereals.iter().take(1).cloned().collect(),
        }
    }

    /// Which view is shown as the data table and exported.
    ///
    /// * regions only → region view
    /// * cereals only → cereal view
    /// * both         → combined view
    /// * neither      → nothing; the user must pick a filter first
    pub fn authoritative(&self) -> Option<ViewKind> {
        match (self.regions.is_empty(), self.cereals.is_empty()) {
            (false, true) => Some(ViewKind::Region),
            (true, false) => Some(ViewKind::Cereal),
            (false, false) => Some(ViewKind::Combined),
            (true, true) => None,
        }
    }

    pub fn toggle_region(&mut self, region: &str) {
        toggle(&mut self.regions, region);
    }

    pub fn toggle_cereal(&mut self, cereal: &str) {
        toggle(&mut self.cereals, cereal);
    }

    fn admits_region(&self, row: &Row) -> bool {
        self.regions.contains(&row.region)
    }

    fn admits_cereal(&self, row: &Row) -> bool {
        self.cereals.contains(&row.cereal)
    }
}

fn toggle(set: &mut BTreeSet<String>, value: &str) {
    if !set.remove(value) {
        set.insert(value.to_string());
    }
}

/// The three derived views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Region,
    Cereal,
    Combined,
}

// ---------------------------------------------------------------------------
// Filtered views
// ---------------------------------------------------------------------------

/// Region-only, cereal-only and combined views for one selection.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredViews<'a> {
    pub region: View<'a>,
    pub cereal: View<'a>,
    pub combined: View<'a>,
}

impl<'a> FilteredViews<'a> {
    pub fn get(&self, kind: ViewKind) -> &View<'a> {
        match kind {
            ViewKind::Region => &self.region,
            ViewKind::Cereal => &self.cereal,
            ViewKind::Combined => &self.combined,
        }
    }

    /// The view the selection designates for display and export, or `None`
    /// when nothing is selected.
    pub fn authoritative(&self, selection: &FilterSelection) -> Option<(ViewKind, &View<'a>)> {
        selection.authoritative().map(|kind| (kind, self.get(kind)))
    }
}

/// Derive the three views of `dataset` for `selection`. Rows keep their
/// source order.
pub fn filter<'a>(dataset: &'a Dataset, selection: &FilterSelection) -> FilteredViews<'a> {
    let columns = dataset.columns.as_slice();
    let pick = |admit: &dyn Fn(&Row) -> bool| {
        View::new(columns, dataset.rows.iter().filter(|&r| admit(r)).collect())
    };

    FilteredViews {
        region: pick(&|r: &Row| selection.admits_region(r)),
        cereal: pick(&|r: &Row| selection.admits_cereal(r)),
        combined: pick(&|r: &Row| selection.admits_region(r) && selection.admits_cereal(r)),
    }
}
