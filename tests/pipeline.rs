//! End-to-end tests of the dashboard pipeline:
//! load → validate → normalize → filter → aggregate → color domain.

use std::collections::BTreeMap;
use std::io::Write;

use eframe::egui::Color32;

use tablero::color::ColorScheme;
use tablero::data::filter::{
    apply, apply_all, distinct_values, full_view, options_for, Selection, WILDCARD,
};
use tablero::data::loader::load_file;
use tablero::data::model::{CellValue, Dataset, Record};
use tablero::data::normalize::{normalize, SENTINEL};
use tablero::data::schema::{missing_columns, COL_CLIENTE, COL_ESTATUS, COL_HOSTING};
use tablero::data::stats::{category_counts, kpis, summarize};
use tablero::state::AppState;

fn record(cells: &[(&str, Option<&str>)]) -> Record {
    cells
        .iter()
        .map(|(col, val)| {
            (
                col.to_string(),
                match val {
                    Some(s) => CellValue::Text(s.to_string()),
                    None => CellValue::Null,
                },
            )
        })
        .collect()
}

/// Identity [X, Y, X], status [Activo, null, Activo].
fn scenario_dataset() -> Dataset {
    let ds = Dataset::from_rows(
        vec![COL_CLIENTE.to_string(), COL_ESTATUS.to_string()],
        vec![
            record(&[(COL_CLIENTE, Some("X")), (COL_ESTATUS, Some("Activo"))]),
            record(&[(COL_CLIENTE, Some("Y")), (COL_ESTATUS, None)]),
            record(&[(COL_CLIENTE, Some("X")), (COL_ESTATUS, Some("Activo"))]),
        ],
    );
    normalize(&ds)
}

#[test]
fn normalization_then_kpis() {
    let ds = scenario_dataset();
    assert_eq!(
        ds.cell(1, COL_ESTATUS),
        &CellValue::Text(SENTINEL.to_string())
    );

    let k = kpis(&ds, &full_view(&ds));
    assert_eq!(k.total_records, 3);
    assert_eq!(k.distinct_clients, 2);
    assert_eq!(
        k.status_counts,
        BTreeMap::from([("Activo".to_string(), 2), (SENTINEL.to_string(), 1)])
    );
}

#[test]
fn filtering_one_client_cascades_into_counts_and_options() {
    let ds = scenario_dataset();
    let view = apply(&ds, &full_view(&ds), COL_CLIENTE, "Y");

    assert_eq!(view.len(), 1);
    assert_eq!(
        category_counts(&ds, &view, COL_ESTATUS),
        BTreeMap::from([(SENTINEL.to_string(), 1)])
    );
    assert_eq!(
        options_for(&ds, &view, COL_ESTATUS),
        vec![WILDCARD.to_string(), SENTINEL.to_string()]
    );
}

#[test]
fn empty_view_flows_through_every_aggregate() {
    let ds = scenario_dataset();
    let filters = vec![
        Selection {
            column: COL_CLIENTE.to_string(),
            value: "Y".to_string(),
        },
        Selection {
            column: COL_ESTATUS.to_string(),
            value: "Activo".to_string(),
        },
    ];
    let view = apply_all(&ds, &filters);
    assert!(view.is_empty());

    let k = kpis(&ds, &view);
    assert_eq!(k.total_records, 0);
    assert_eq!(k.distinct_clients, 0);
    assert!(k.status_counts.is_empty());
    assert!(summarize(&ds, &view).is_none());
    assert!(ColorScheme::estatus()
        .domain(&distinct_values(&ds, &view, COL_ESTATUS))
        .is_empty());
}

#[test]
fn unanticipated_status_gets_fallback_color_in_sorted_domain() {
    let ds = normalize(&Dataset::from_rows(
        vec![COL_CLIENTE.to_string(), COL_ESTATUS.to_string()],
        vec![
            record(&[(COL_CLIENTE, Some("X")), (COL_ESTATUS, Some("Activo"))]),
            record(&[(COL_CLIENTE, Some("Y")), (COL_ESTATUS, Some("Pending"))]),
            record(&[(COL_CLIENTE, Some("Z")), (COL_ESTATUS, Some("Desactivado"))]),
        ],
    ));
    let values = distinct_values(&ds, &full_view(&ds), COL_ESTATUS);
    let domain = ColorScheme::estatus().domain(&values);

    let pending = domain.iter().position(|(v, _)| v == "Pending").unwrap();
    assert_eq!(pending, 2); // alphabetical: Activo, Desactivado, Pending
    assert_eq!(domain[pending].1, Color32::BLUE);
}

#[test]
fn validator_reports_missing_columns_and_blocks_loading() {
    let raw = Dataset::from_rows(
        vec!["WebHosting".to_string()],
        vec![record(&[("WebHosting", Some("Activo"))])],
    );
    assert_eq!(
        missing_columns(&raw),
        vec![COL_CLIENTE.to_string(), COL_ESTATUS.to_string()]
    );

    let mut state = AppState::default();
    let err = state.ingest(raw).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Faltan las siguientes columnas: Nombre Cliente, Apagado Orlando"
    );
    assert!(!state.is_loaded());
}

#[test]
fn csv_file_drives_the_whole_pipeline() {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(file, "Nombre Cliente,Apagado Orlando,WebHosting,Monto").unwrap();
    writeln!(file, "ACME,Activo,Activo,1200.5").unwrap();
    writeln!(file, "Borealis,,Inactivo,300").unwrap();
    writeln!(file, "ACME,Activo,,980").unwrap();
    file.flush().unwrap();

    let raw = load_file(file.path()).unwrap();
    let mut state = AppState::default();
    state.ingest(raw).unwrap();

    // Optional hosting column was probed and became the third stage.
    assert_eq!(state.stages.len(), 3);
    assert_eq!(state.stages[2].column, COL_HOSTING);

    state.set_choice(COL_CLIENTE, "ACME".to_string());
    assert_eq!(state.visible, vec![0, 2]);

    let ds = state.dataset.as_ref().unwrap();
    let k = kpis(ds, &state.visible);
    assert_eq!(k.total_records, 2);
    assert_eq!(k.distinct_clients, 1);
    assert_eq!(
        k.status_counts,
        BTreeMap::from([("Activo".to_string(), 2)])
    );

    // Hosting options cascade from the client-filtered view.
    assert_eq!(
        state.stages[2].options,
        vec![
            WILDCARD.to_string(),
            SENTINEL.to_string(),
            "Activo".to_string()
        ]
    );

    // The untouched numeric column still summarizes numerically.
    let summary = summarize(ds, &state.visible).unwrap();
    let monto = summary.iter().find(|s| s.column == "Monto").unwrap();
    assert!(matches!(
        monto.stats,
        tablero::data::stats::ColumnStats::Numeric { count: 2, .. }
    ));
}
