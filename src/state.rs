use crate::data::filter::{self, WILDCARD};
use crate::data::model::Dataset;
use crate::data::normalize::normalize;
use crate::data::schema::{self, SchemaError};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Central panel tabs, mirroring the dashboard sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Datos,
    Graficos,
    Resumen,
}

/// One filter stage as the UI sees it: the column, the current choice, and
/// the option list computed from the view narrowed by all earlier stages.
#[derive(Debug, Clone)]
pub struct FilterStage {
    pub column: String,
    pub choice: String,
    pub options: Vec<String>,
}

/// The full UI state, independent of rendering.
///
/// Two-state machine: `dataset == None` is *Unloaded* (only loading a file
/// does anything), `Some` is *Loaded* and holds the validated, normalized
/// table. A failed validation never transitions.
pub struct AppState {
    /// Validated and normalized dataset (None until a file passes).
    pub dataset: Option<Dataset>,

    /// Filter stages in pipeline order: client, status, hosting if present.
    pub stages: Vec<FilterStage>,

    /// Indices of rows passing the current filters (cached).
    pub visible: Vec<usize>,

    /// Which central tab is active.
    pub active_tab: Tab,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            stages: Vec::new(),
            visible: Vec::new(),
            active_tab: Tab::default(),
            status_message: None,
            loading: false,
        }
    }
}

impl AppState {
    /// Ingest a raw dataset: validate the schema, normalize, reset every
    /// filter stage to the wildcard. On a schema error the state stays
    /// Unloaded and the previous dataset (if any) is untouched.
    pub fn ingest(&mut self, raw: Dataset) -> Result<(), SchemaError> {
        schema::validate(&raw)?;
        let dataset = normalize(&raw);

        self.stages = schema::filterable_columns(&dataset)
            .into_iter()
            .map(|column| FilterStage {
                column,
                choice: WILDCARD.to_string(),
                options: Vec::new(),
            })
            .collect();
        self.dataset = Some(dataset);
        self.status_message = None;
        self.loading = false;
        self.refilter();
        Ok(())
    }

    /// Recompute the cascade after any selection change: each stage's
    /// options come from the view narrowed by the stages before it, then
    /// its own choice narrows the view further. A choice that vanished
    /// from its options (upstream narrowed it away) resets to the
    /// wildcard before being applied.
    pub fn refilter(&mut self) {
        let Some(dataset) = &self.dataset else {
            self.visible.clear();
            return;
        };

        let mut view = filter::full_view(dataset);
        for stage in &mut self.stages {
            stage.options = filter::options_for(dataset, &view, &stage.column);
            if !stage.options.iter().any(|opt| opt == &stage.choice) {
                stage.choice = WILDCARD.to_string();
            }
            view = filter::apply(dataset, &view, &stage.column, &stage.choice);
        }
        self.visible = view;
    }

    /// Set one stage's choice and recompute the cascade.
    pub fn set_choice(&mut self, column: &str, choice: String) {
        if let Some(stage) = self.stages.iter_mut().find(|s| s.column == column) {
            stage.choice = choice;
        }
        self.refilter();
    }

    pub fn is_loaded(&self) -> bool {
        self.dataset.is_some()
    }
}
