use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::color::ColorScheme;
use crate::data::filter::distinct_values;
use crate::data::model::Dataset;
use crate::data::schema::COL_HOSTING;
use crate::data::stats::category_counts;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Charts tab (central panel)
// ---------------------------------------------------------------------------

/// Bar chart per categorical column: the primary status always, the hosting
/// column when the dataset has it.
pub fn charts_tab(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };

    ui.strong("Distribución de 'Apagado Orlando'");
    category_bar_chart(
        ui,
        "chart_estatus",
        dataset,
        &state.visible,
        &ColorScheme::estatus(),
    );

    if dataset.has_column(COL_HOSTING) {
        ui.separator();
        ui.strong("Distribución de WebHosting");
        category_bar_chart(
            ui,
            "chart_hosting",
            dataset,
            &state.visible,
            &ColorScheme::hosting(),
        );
    }
}

/// One bar per category of the current view, at its position in the sorted
/// domain, filled with the domain color. The legend doubles as the
/// category/color key.
fn category_bar_chart(
    ui: &mut Ui,
    id: &str,
    dataset: &Dataset,
    view: &[usize],
    scheme: &ColorScheme,
) {
    let counts = category_counts(dataset, view, &scheme.column);
    let values = distinct_values(dataset, view, &scheme.column);
    let domain = scheme.domain(&values);

    if domain.is_empty() {
        ui.label("No hay datos para graficar.");
        return;
    }

    let labels: Vec<String> = domain.iter().map(|(value, _)| value.clone()).collect();

    Plot::new(id)
        .legend(Legend::default())
        .height(300.0)
        .y_axis_label("Cantidad")
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if idx >= 0.0 && (mark.value - idx).abs() < 1e-6 {
                labels.get(idx as usize).cloned().unwrap_or_default()
            } else {
                String::new()
            }
        })
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            for (i, (value, color)) in domain.iter().enumerate() {
                let count = counts.get(value).copied().unwrap_or(0);
                let bar = Bar::new(i as f64, count as f64).width(0.6).fill(*color);
                plot_ui.bar_chart(BarChart::new(vec![bar]).color(*color).name(value));
            }
        });
}
