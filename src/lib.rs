//! Cereal production and climate explorer.
//!
//! The [`data`] layer loads the dataset once and turns a region/cereal
//! selection into filtered views, grouped statistics, chart series and an
//! xlsx export. [`dashboard`] runs one full recompute per selection change.
//! The egui front end lives in the `cereal-dash` binary.

pub mod config;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod i18n;
