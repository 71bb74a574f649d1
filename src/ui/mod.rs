/// Presentation layer: renders tables, KPIs, selectors, and charts from the
/// structures the data layer produces. Consumes views and aggregates; never
/// mutates the dataset.
pub mod charts;
pub mod panels;
