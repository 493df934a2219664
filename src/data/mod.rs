/// Data layer: launch records, loading, filtering and chart series.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate file → LaunchDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ LaunchDataset  │  Vec<LaunchRecord>, site list, payload bounds
///   └───────────────┘
///        │                         │
///        ▼                         ▼
///   ┌──────────┐  site      ┌───────────┐  payload + site
///   │ aggregate │ ◄──────── │  filter    │ ──────────────► scatter
///   └──────────┘            └───────────┘
/// ```
///
/// Everything below the loader is a pure function of the dataset and the
/// current selection.

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod scatter;
