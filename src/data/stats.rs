use std::collections::{BTreeMap, BTreeSet};

use super::model::{CellValue, Dataset};
use super::normalize::normalized_text;
use super::schema::{COL_CLIENTE, COL_ESTATUS};

// ---------------------------------------------------------------------------
// KPI aggregation
// ---------------------------------------------------------------------------

/// The dashboard's KPI trio for one view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kpis {
    /// Rows in the view.
    pub total_records: usize,
    /// Distinct normalized client names in the view.
    pub distinct_clients: usize,
    /// Occurrences per primary-status value in the view.
    pub status_counts: BTreeMap<String, usize>,
}

/// Compute the KPI trio. Total over any view; the empty view yields zeros
/// and an empty count map.
pub fn kpis(dataset: &Dataset, view: &[usize]) -> Kpis {
    let distinct_clients: BTreeSet<String> = view
        .iter()
        .map(|&row| normalized_text(dataset.cell(row, COL_CLIENTE)))
        .collect();

    Kpis {
        total_records: view.len(),
        distinct_clients: distinct_clients.len(),
        status_counts: category_counts(dataset, view, COL_ESTATUS),
    }
}

/// Occurrence count per distinct normalized value of `column` in `view`.
pub fn category_counts(
    dataset: &Dataset,
    view: &[usize],
    column: &str,
) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for &row in view {
        *counts
            .entry(normalized_text(dataset.cell(row, column)))
            .or_insert(0) += 1;
    }
    counts
}

// ---------------------------------------------------------------------------
// Descriptive statistics (per-column summary of a view)
// ---------------------------------------------------------------------------

/// Descriptive statistics for one column of a view.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnStats {
    /// Every non-null cell is numeric (and there is at least one).
    /// `std` is the sample standard deviation, absent for a single value.
    Numeric {
        count: usize,
        mean: f64,
        std: Option<f64>,
        min: f64,
        q25: f64,
        median: f64,
        q75: f64,
        max: f64,
    },
    /// Anything else: count of non-null cells, distinct values, and the
    /// most frequent value with its frequency (absent when all cells are
    /// null).
    Categorical {
        count: usize,
        unique: usize,
        top: Option<(String, usize)>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub column: String,
    pub stats: ColumnStats,
}

/// Summarize every column of the view, in column order. `None` is the
/// explicit "no data" result for the empty view; this function never fails.
pub fn summarize(dataset: &Dataset, view: &[usize]) -> Option<Vec<ColumnSummary>> {
    if view.is_empty() {
        return None;
    }
    Some(
        dataset
            .columns
            .iter()
            .map(|column| ColumnSummary {
                column: column.clone(),
                stats: column_stats(dataset, view, column),
            })
            .collect(),
    )
}

fn column_stats(dataset: &Dataset, view: &[usize], column: &str) -> ColumnStats {
    let cells: Vec<&CellValue> = view
        .iter()
        .map(|&row| dataset.cell(row, column))
        .filter(|cell| !cell.is_null())
        .collect();

    let numeric: Vec<f64> = cells.iter().filter_map(|cell| cell.as_f64()).collect();
    if !numeric.is_empty() && numeric.len() == cells.len() {
        return numeric_stats(numeric);
    }

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for cell in &cells {
        *counts.entry(cell.to_string()).or_insert(0) += 1;
    }
    // Highest frequency wins; ties go to the lexicographically smaller value.
    let top = counts
        .iter()
        .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(a.0)))
        .map(|(value, freq)| (value.clone(), *freq));

    ColumnStats::Categorical {
        count: cells.len(),
        unique: counts.len(),
        top,
    }
}

fn numeric_stats(mut values: Vec<f64>) -> ColumnStats {
    values.sort_by(|a, b| a.total_cmp(b));
    let n = values.len();
    let mean = values.iter().sum::<f64>() / n as f64;
    let std = if n > 1 {
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        Some(var.sqrt())
    } else {
        None
    };

    ColumnStats::Numeric {
        count: n,
        mean,
        std,
        min: values[0],
        q25: percentile(&values, 0.25),
        median: percentile(&values, 0.5),
        q75: percentile(&values, 0.75),
        max: values[n - 1],
    }
}

/// Percentile over a sorted slice, linear interpolation between ranks.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        sorted[lo] + (pos - lo as f64) * (sorted[hi] - sorted[lo])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::full_view;
    use crate::data::model::Record;
    use crate::data::normalize::{normalize, SENTINEL};

    fn dataset(rows: Vec<Vec<(&str, CellValue)>>) -> Dataset {
        let columns: Vec<String> = rows[0].iter().map(|(c, _)| c.to_string()).collect();
        let records: Vec<Record> = rows
            .into_iter()
            .map(|cells| {
                cells
                    .into_iter()
                    .map(|(c, v)| (c.to_string(), v))
                    .collect()
            })
            .collect();
        normalize(&Dataset::from_rows(columns, records))
    }

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn kpis_count_records_clients_and_statuses() {
        // Identity [X, Y, X], status [Activo, null, Activo].
        let ds = dataset(vec![
            vec![(COL_CLIENTE, text("X")), (COL_ESTATUS, text("Activo"))],
            vec![(COL_CLIENTE, text("Y")), (COL_ESTATUS, CellValue::Null)],
            vec![(COL_CLIENTE, text("X")), (COL_ESTATUS, text("Activo"))],
        ]);
        let k = kpis(&ds, &full_view(&ds));

        assert_eq!(k.total_records, 3);
        assert_eq!(k.distinct_clients, 2);
        assert_eq!(
            k.status_counts,
            BTreeMap::from([("Activo".to_string(), 2), (SENTINEL.to_string(), 1)])
        );
    }

    #[test]
    fn empty_view_yields_zero_kpis_and_no_summary() {
        let ds = dataset(vec![vec![
            (COL_CLIENTE, text("X")),
            (COL_ESTATUS, text("Activo")),
        ]]);
        let empty: Vec<usize> = Vec::new();

        let k = kpis(&ds, &empty);
        assert_eq!(k.total_records, 0);
        assert_eq!(k.distinct_clients, 0);
        assert!(k.status_counts.is_empty());
        assert!(category_counts(&ds, &empty, COL_ESTATUS).is_empty());
        assert!(summarize(&ds, &empty).is_none());
    }

    #[test]
    fn numeric_column_gets_quartile_summary() {
        let ds = dataset(vec![
            vec![
                (COL_CLIENTE, text("A")),
                (COL_ESTATUS, text("Activo")),
                ("Monto", CellValue::Float(1.0)),
            ],
            vec![
                (COL_CLIENTE, text("B")),
                (COL_ESTATUS, text("Activo")),
                ("Monto", CellValue::Float(2.0)),
            ],
            vec![
                (COL_CLIENTE, text("C")),
                (COL_ESTATUS, text("Activo")),
                ("Monto", CellValue::Float(3.0)),
            ],
            vec![
                (COL_CLIENTE, text("D")),
                (COL_ESTATUS, text("Activo")),
                ("Monto", CellValue::Integer(4)),
            ],
        ]);
        let summary = summarize(&ds, &full_view(&ds)).unwrap();
        let monto = summary.iter().find(|s| s.column == "Monto").unwrap();

        match &monto.stats {
            ColumnStats::Numeric {
                count,
                mean,
                std,
                min,
                q25,
                median,
                q75,
                max,
            } => {
                assert_eq!(*count, 4);
                assert!((mean - 2.5).abs() < 1e-12);
                assert!((std.unwrap() - 1.2909944487358056).abs() < 1e-12);
                assert_eq!(*min, 1.0);
                assert!((q25 - 1.75).abs() < 1e-12);
                assert!((median - 2.5).abs() < 1e-12);
                assert!((q75 - 3.25).abs() < 1e-12);
                assert_eq!(*max, 4.0);
            }
            other => panic!("expected numeric stats, got {other:?}"),
        }
    }

    #[test]
    fn single_numeric_value_has_no_std() {
        let ds = dataset(vec![vec![
            (COL_CLIENTE, text("A")),
            (COL_ESTATUS, text("Activo")),
            ("Monto", CellValue::Integer(7)),
        ]]);
        let summary = summarize(&ds, &full_view(&ds)).unwrap();
        let monto = summary.iter().find(|s| s.column == "Monto").unwrap();
        match &monto.stats {
            ColumnStats::Numeric { count, std, .. } => {
                assert_eq!(*count, 1);
                assert!(std.is_none());
            }
            other => panic!("expected numeric stats, got {other:?}"),
        }
    }

    #[test]
    fn categorical_column_reports_top_and_unique() {
        let ds = dataset(vec![
            vec![(COL_CLIENTE, text("X")), (COL_ESTATUS, text("Activo"))],
            vec![(COL_CLIENTE, text("Y")), (COL_ESTATUS, text("Activo"))],
            vec![(COL_CLIENTE, text("X")), (COL_ESTATUS, text("Desactivado"))],
        ]);
        let summary = summarize(&ds, &full_view(&ds)).unwrap();
        let estatus = summary.iter().find(|s| s.column == COL_ESTATUS).unwrap();

        assert_eq!(
            estatus.stats,
            ColumnStats::Categorical {
                count: 3,
                unique: 2,
                top: Some(("Activo".to_string(), 2)),
            }
        );
    }

    #[test]
    fn all_null_column_summarizes_without_a_top_value() {
        let ds = dataset(vec![
            vec![
                (COL_CLIENTE, text("X")),
                (COL_ESTATUS, text("Activo")),
                ("Notas", CellValue::Null),
            ],
            vec![
                (COL_CLIENTE, text("Y")),
                (COL_ESTATUS, text("Activo")),
                ("Notas", CellValue::Null),
            ],
        ]);
        let summary = summarize(&ds, &full_view(&ds)).unwrap();
        let notas = summary.iter().find(|s| s.column == "Notas").unwrap();

        assert_eq!(
            notas.stats,
            ColumnStats::Categorical {
                count: 0,
                unique: 0,
                top: None,
            }
        );
    }

    #[test]
    fn mixed_numeric_and_text_column_is_categorical() {
        let ds = dataset(vec![
            vec![
                (COL_CLIENTE, text("X")),
                (COL_ESTATUS, text("Activo")),
                ("Ref", CellValue::Integer(1)),
            ],
            vec![
                (COL_CLIENTE, text("Y")),
                (COL_ESTATUS, text("Activo")),
                ("Ref", text("N/A")),
            ],
        ]);
        let summary = summarize(&ds, &full_view(&ds)).unwrap();
        let referencia = summary.iter().find(|s| s.column == "Ref").unwrap();
        assert!(matches!(
            referencia.stats,
            ColumnStats::Categorical { count: 2, .. }
        ));
    }
}
