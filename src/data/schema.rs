use thiserror::Error;

use super::model::Dataset;

// ---------------------------------------------------------------------------
// Column roles
// ---------------------------------------------------------------------------

/// Identity column: one value per client, used for distinct-client counts.
pub const COL_CLIENTE: &str = "Nombre Cliente";
/// Primary status column. Always required.
pub const COL_ESTATUS: &str = "Apagado Orlando";
/// Secondary status column. Optional: probed by name, never required.
pub const COL_HOSTING: &str = "WebHosting";

/// Columns a dataset must carry before the pipeline may advance.
pub const REQUIRED_COLUMNS: [&str; 2] = [COL_CLIENTE, COL_ESTATUS];

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Faltan las siguientes columnas: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Required columns absent from the dataset, in required-list order.
pub fn missing_columns(dataset: &Dataset) -> Vec<String> {
    REQUIRED_COLUMNS
        .iter()
        .filter(|col| !dataset.has_column(col))
        .map(|col| col.to_string())
        .collect()
}

/// Gate the pipeline: a dataset missing any required column never advances
/// past this point.
pub fn validate(dataset: &Dataset) -> Result<(), SchemaError> {
    let missing = missing_columns(dataset);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(SchemaError::MissingColumns(missing))
    }
}

/// Filter stages for this dataset, in pipeline order: identity first, then
/// the primary status, then the secondary status when the dataset has it.
pub fn filterable_columns(dataset: &Dataset) -> Vec<String> {
    let mut cols = vec![COL_CLIENTE.to_string(), COL_ESTATUS.to_string()];
    if dataset.has_column(COL_HOSTING) {
        cols.push(COL_HOSTING.to_string());
    }
    cols
}
