use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::stats::{self, ColumnStats, ColumnSummary};
use crate::state::{AppState, Tab};
use crate::ui::charts;

// ---------------------------------------------------------------------------
// Left side panel – KPIs and filter widgets
// ---------------------------------------------------------------------------

/// Render the KPI block and one selector per filter stage.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filtros Interactivos");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("Ningún archivo cargado.");
        return;
    };

    // ---- KPI block (always reflects the current view) ----
    let kpis = stats::kpis(dataset, &state.visible);
    ui.strong("KPIs Estratégicos");
    ui.label(format!("Total Registros: {}", kpis.total_records));
    ui.label(format!("Clientes Únicos: {}", kpis.distinct_clients));
    ui.label("Estatus 'Apagado Orlando':");
    for (status, count) in &kpis.status_counts {
        ui.label(format!("    {status}: {count}"));
    }
    ui.separator();

    // Clone the stages so we can mutate state after the loop.
    let stages = state.stages.clone();
    let mut pending: Option<(String, String)> = None;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for stage in &stages {
                ui.strong(format!("Filtrar por {}", stage.column));
                egui::ComboBox::from_id_salt(&stage.column)
                    .selected_text(&stage.choice)
                    .show_ui(ui, |ui: &mut Ui| {
                        for option in &stage.options {
                            if ui
                                .selectable_label(&stage.choice == option, option)
                                .clicked()
                            {
                                pending = Some((stage.column.clone(), option.clone()));
                            }
                        }
                    });
                ui.add_space(6.0);
            }
        });

    // One interaction → one full recomputation of the cascade.
    if let Some((column, choice)) = pending {
        state.set_choice(&column, choice);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("Archivo", |ui: &mut Ui| {
            if ui.button("Abrir…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} registros cargados, {} visibles",
                ds.len(),
                state.visible.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Central panel – tabbed dashboard
// ---------------------------------------------------------------------------

pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    if !state.is_loaded() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Por favor, cargue un archivo  (Archivo → Abrir…)");
        });
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        for (tab, label) in [
            (Tab::Datos, "Data Filtrada"),
            (Tab::Graficos, "Visualizaciones"),
            (Tab::Resumen, "Resumen y Recomendaciones"),
        ] {
            if ui.selectable_label(state.active_tab == tab, label).clicked() {
                state.active_tab = tab;
            }
        }
    });
    ui.separator();

    match state.active_tab {
        Tab::Datos => data_table(ui, state),
        Tab::Graficos => charts::charts_tab(ui, state),
        Tab::Resumen => summary_tab(ui, state),
    }
}

// ---------------------------------------------------------------------------
// Data tab – the current view as a table
// ---------------------------------------------------------------------------

fn data_table(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };

    ui.strong("Data Filtrada:");
    if state.visible.is_empty() {
        ui.label("Ningún registro coincide con los filtros.");
        return;
    }

    let columns = &dataset.columns;
    TableBuilder::new(ui)
        .striped(true)
        .columns(Column::auto().resizable(true), columns.len())
        .header(20.0, |mut header| {
            for col in columns {
                header.col(|ui| {
                    ui.strong(col);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, state.visible.len(), |mut row| {
                let idx = state.visible[row.index()];
                for col in columns {
                    row.col(|ui| {
                        ui.label(dataset.cell(idx, col).to_string());
                    });
                }
            });
        });
}

// ---------------------------------------------------------------------------
// Summary tab – describe-style statistics + recommendations
// ---------------------------------------------------------------------------

const STAT_HEADERS: [&str; 12] = [
    "Columna", "count", "unique", "top", "freq", "mean", "std", "min", "25%", "50%", "75%",
    "max",
];

fn summary_tab(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };

    ui.strong("Resumen Estadístico de la Data Filtrada:");
    match stats::summarize(dataset, &state.visible) {
        None => {
            ui.label("No hay datos para mostrar en el resumen estadístico.");
        }
        Some(summary) => summary_table(ui, &summary),
    }

    ui.separator();
    recommendations(ui);
}

fn summary_table(ui: &mut Ui, summary: &[ColumnSummary]) {
    TableBuilder::new(ui)
        .striped(true)
        .columns(Column::auto().resizable(true), STAT_HEADERS.len())
        .header(20.0, |mut header| {
            for h in STAT_HEADERS {
                header.col(|ui| {
                    ui.strong(h);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, summary.len(), |mut row| {
                let cells = summary_cells(&summary[row.index()]);
                for cell in cells {
                    row.col(|ui| {
                        ui.label(cell);
                    });
                }
            });
        });
}

/// One table row per column, pandas `describe(include='all')` shape:
/// inapplicable statistics show a dash.
fn summary_cells(summary: &ColumnSummary) -> [String; 12] {
    const NA: &str = "-";
    let na = || NA.to_string();
    match &summary.stats {
        ColumnStats::Categorical { count, unique, top } => [
            summary.column.clone(),
            count.to_string(),
            unique.to_string(),
            top.as_ref().map(|(v, _)| v.clone()).unwrap_or_else(na),
            top.as_ref()
                .map(|(_, freq)| freq.to_string())
                .unwrap_or_else(na),
            na(),
            na(),
            na(),
            na(),
            na(),
            na(),
            na(),
        ],
        ColumnStats::Numeric {
            count,
            mean,
            std,
            min,
            q25,
            median,
            q75,
            max,
        } => [
            summary.column.clone(),
            count.to_string(),
            na(),
            na(),
            na(),
            fmt_stat(*mean),
            std.map(fmt_stat).unwrap_or_else(na),
            fmt_stat(*min),
            fmt_stat(*q25),
            fmt_stat(*median),
            fmt_stat(*q75),
            fmt_stat(*max),
        ],
    }
}

fn fmt_stat(v: f64) -> String {
    format!("{v:.2}")
}

fn recommendations(ui: &mut Ui) {
    ui.strong("Recomendaciones Estratégicas:");
    ui.label(
        "• Verificar estados críticos: observe si existen muchos registros con \
         'Desactivado' o nuevos estados no contemplados (aparecen con el color \
         de reserva).",
    );
    ui.label(
        "• Monitorear WebHosting: correlacione el estado de WebHosting con la \
         actividad de los clientes para identificar cuellos de botella.",
    );
    ui.label(
        "• Segmentación de clientes: use \"Nombre Cliente\" para estrategias de \
         marketing y soporte específicas.",
    );
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Cargar archivo de clientes")
        .add_filter("Archivos soportados", &["xlsx", "csv", "json", "parquet", "pq"])
        .add_filter("Excel", &["xlsx"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.loading = true;
        match crate::data::loader::load_file(&path) {
            Ok(raw) => match state.ingest(raw) {
                Ok(()) => {
                    if let Some(ds) = &state.dataset {
                        log::info!(
                            "Loaded {} rows with columns {:?}",
                            ds.len(),
                            ds.columns
                        );
                    }
                }
                Err(e) => {
                    log::error!("Schema validation failed: {e}");
                    state.status_message = Some(e.to_string());
                    state.loading = false;
                }
            },
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error al cargar el archivo: {e:#}"));
                state.loading = false;
            }
        }
    }
}
