use std::collections::BTreeMap;

use eframe::egui::Color32;

use crate::data::schema::{COL_ESTATUS, COL_HOSTING};

// ---------------------------------------------------------------------------
// Color scheme: fixed category colors + per-column fallback
// ---------------------------------------------------------------------------

/// Category→color assignment for one status column. Known categories keep
/// their operator-assigned colors; anything new falls back to a reserve
/// color that differs per column.
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub column: String,
    known: BTreeMap<String, Color32>,
    fallback: Color32,
}

const PINK: Color32 = Color32::from_rgb(0xff, 0x69, 0xb4);

impl ColorScheme {
    /// Scheme for the primary status column.
    pub fn estatus() -> Self {
        ColorScheme {
            column: COL_ESTATUS.to_string(),
            known: BTreeMap::from([
                ("Activo".to_string(), Color32::GREEN),
                ("Desactivado".to_string(), Color32::RED),
                ("Sin datos".to_string(), Color32::GRAY),
            ]),
            fallback: Color32::BLUE,
        }
    }

    /// Scheme for the optional web hosting column.
    pub fn hosting() -> Self {
        ColorScheme {
            column: COL_HOSTING.to_string(),
            known: BTreeMap::from([
                ("Activo".to_string(), Color32::BLUE),
                ("Inactivo".to_string(), Color32::ORANGE),
                ("Sin datos".to_string(), Color32::GRAY),
            ]),
            fallback: PINK,
        }
    }

    /// Look up the color for one category value.
    pub fn color_for(&self, value: &str) -> Color32 {
        self.known.get(value).copied().unwrap_or(self.fallback)
    }

    /// Build the ordered (category, color) domain for a view. `values` must
    /// be the distinct values of this column in the view, already in the
    /// filter engine's order (sentinel first, then ascending); the domain
    /// preserves that order one-to-one. Recomputed on every view change,
    /// never cached: categories come and go as the view narrows.
    pub fn domain(&self, values: &[String]) -> Vec<(String, Color32)> {
        values
            .iter()
            .map(|v| (v.clone(), self.color_for(v)))
            .collect()
    }
}
