/// Data layer: core types, ingestion, and the filter/aggregation pipeline.
///
/// Architecture:
/// ```text
///  .xlsx / .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  schema   │  required columns present? missing list halts here
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ normalize │  nulls → "Sin datos", filter columns → text
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  cascading equality stages → view (row indices)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  stats    │  KPIs, category counts, per-column summary
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod schema;
pub mod stats;
