use super::model::{CellValue, Dataset};
use super::schema::filterable_columns;

/// Stand-in for a missing value in the filterable columns.
pub const SENTINEL: &str = "Sin datos";

/// String form a cell takes after normalization: the sentinel for nulls,
/// the display form otherwise. Option lists and aggregation both go
/// through this, so residual nulls in non-normalized columns land on the
/// sentinel as well.
pub fn normalized_text(cell: &CellValue) -> String {
    if cell.is_null() {
        SENTINEL.to_string()
    } else {
        cell.to_string()
    }
}

/// Produce a normalized copy of the dataset: in every filterable column,
/// `Null` becomes the sentinel and every other value is rewritten to its
/// text form. After this pass those columns compare and sort as plain
/// strings. Columns outside the filter stages keep their original types.
pub fn normalize(dataset: &Dataset) -> Dataset {
    let columns = filterable_columns(dataset);
    let mut normalized = dataset.clone();

    for row in &mut normalized.rows {
        for col in &columns {
            let value = row.entry(col.clone()).or_insert(CellValue::Null);
            let text = match &*value {
                CellValue::Null => SENTINEL.to_string(),
                other => other.to_string(),
            };
            *value = CellValue::Text(text);
        }
    }
    normalized
}
