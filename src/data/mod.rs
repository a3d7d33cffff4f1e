/// Data layer: core types, loading, filtering, statistics, charts, export.
///
/// Architecture:
/// ```text
///  .xlsx / .csv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (once)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  selection → region / cereal / combined views
///   └──────────┘
///        │
///        ├──────────────┬──────────────┐
///        ▼              ▼              ▼
///   ┌─────────┐    ┌─────────┐    ┌─────────┐
///   │  stats   │    │  chart   │    │ export   │
///   └─────────┘    └─────────┘    └─────────┘
/// ```

pub mod chart;
pub mod export;
pub mod filter;
pub mod loader;
pub mod measure;
pub mod model;
pub mod stats;
