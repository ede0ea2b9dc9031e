use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::config::DashboardConfig;
use crate::data::filter::{FilterSpec, Selection};
use crate::data::loader::{self, BackgroundLoader, LoadOutcome};
use crate::data::model::{Dataset, Field};
use crate::report::DashboardReport;
use crate::theme::Theme;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full session state, independent of rendering.
///
/// Owns the one loaded dataset. A new load replaces it wholesale; nothing
/// edits it in place.
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded dataset (None until user loads a file).
    pub dataset: Option<Dataset>,

    /// Path the current dataset came from.
    pub source_path: Option<PathBuf>,

    /// The four filter pickers.
    pub filters: FilterSpec,

    pub theme: Theme,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    pub loader: BackgroundLoader,
}

impl AppState {
    pub fn new(config: DashboardConfig, theme: Theme) -> Self {
        Self {
            config,
            dataset: None,
            source_path: None,
            filters: FilterSpec::default(),
            theme,
            status_message: None,
            loader: BackgroundLoader::default(),
        }
    }

    /// Start loading a file in the background.
    pub fn request_load<F>(&mut self, path: PathBuf, on_done: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.status_message = None;
        self.loader.spawn(path, on_done);
    }

    /// Pick up a finished load, if the newest one has arrived.
    pub fn poll_loader(&mut self) {
        if let Some(outcome) = self.loader.poll() {
            self.finish_load(outcome);
        }
    }

    pub fn finish_load(&mut self, outcome: LoadOutcome) {
        match outcome.result {
            Ok(dataset) => {
                if dataset.is_empty() {
                    log::warn!("{} has a header but no records", outcome.path.display());
                }
                log::info!(
                    "Loaded {} tomatoes from {} with columns {:?}",
                    dataset.len(),
                    outcome.path.display(),
                    dataset.columns
                );
                self.set_dataset(dataset, Some(outcome.path));
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Ingest a newly loaded dataset and reset the filters.
    pub fn set_dataset(&mut self, dataset: Dataset, source: Option<PathBuf>) {
        self.filters = FilterSpec::default();
        self.dataset = Some(dataset);
        self.source_path = source;
        self.status_message = None;
    }

    pub fn is_loading(&self) -> bool {
        self.loader.is_loading()
    }

    /// Set one picker, e.g. shift = "Tarde".
    pub fn set_filter(&mut self, field: Field, selection: Selection) {
        if let Some(slot) = self.filters.selection_mut(field) {
            *slot = selection;
        }
    }

    pub fn clear_filters(&mut self) {
        self.filters = FilterSpec::default();
    }

    /// Build the report for the current dataset and filters.
    pub fn report(&self) -> Option<DashboardReport<'_>> {
        self.dataset
            .as_ref()
            .map(|ds| DashboardReport::build(ds, &self.filters, &self.config))
    }

    /// Write the currently filtered rows to `path`.
    pub fn export_filtered(&mut self, path: &Path) {
        let outcome = match self.report() {
            Some(report) => report
                .export_csv()
                .context("serializing rows")
                .and_then(|text| loader::save_export(path, &text))
                .map(|()| report.rows.len()),
            None => return,
        };
        match outcome {
            Ok(n) => {
                log::info!("Exported {n} rows to {}", path.display());
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to export: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::codec::parse_csv;

    const CSV: &str = "id_tomate,turno,defecto,diametro_mm,peso_g\n\
        1,Mañana,No,60,110\n\
        2,Tarde,Sí,55,98\n";

    fn loaded_state() -> AppState {
        let mut state = AppState::new(DashboardConfig::default(), Theme::Light);
        state.set_dataset(parse_csv(CSV).unwrap(), None);
        state
    }

    #[test]
    fn no_report_without_dataset() {
        let state = AppState::new(DashboardConfig::default(), Theme::Dark);
        assert!(state.report().is_none());
        assert!(!state.is_loading());
    }

    #[test]
    fn filters_drive_the_report() {
        let mut state = loaded_state();
        state.set_filter(Field::Shift, Selection::Exact("Tarde".into()));
        let report = state.report().unwrap();
        assert_eq!(report.summary.count, 1);
        assert_eq!(report.summary.defect_pct_label(), "100.0%");

        state.set_filter(Field::Id, Selection::Exact("ignored".into()));
        state.clear_filters();
        assert_eq!(state.report().unwrap().summary.count, 2);
    }

    #[test]
    fn new_dataset_resets_filters() {
        let mut state = loaded_state();
        state.set_filter(Field::Defect, Selection::Exact("Sí".into()));
        state.set_dataset(parse_csv(CSV).unwrap(), None);
        assert!(state.filters.is_unconstrained());
    }

    #[test]
    fn failed_load_keeps_previous_dataset() {
        let mut state = loaded_state();
        state.finish_load(LoadOutcome {
            generation: 1,
            path: PathBuf::from("missing.csv"),
            result: Err(anyhow::anyhow!("boom")),
        });
        assert_eq!(state.dataset.as_ref().unwrap().len(), 2);
        assert!(state.status_message.as_deref().unwrap().contains("boom"));
    }

    #[test]
    fn export_writes_filtered_rows() {
        let mut state = loaded_state();
        state.set_filter(Field::Defect, Selection::Exact("No".into()));
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.csv");
        state.export_filtered(&out);

        let text = std::fs::read_to_string(&out).unwrap();
        assert_eq!(
            text,
            "\"id_tomate\",\"turno\",\"defecto\",\"diametro_mm\",\"peso_g\"\n\
             \"1\",\"Mañana\",\"No\",\"60\",\"110\""
        );
        assert!(state.status_message.is_none());
    }

    #[test]
    fn failed_export_sets_status() {
        let mut state = loaded_state();
        state.export_filtered(Path::new("/definitely/not/out.csv"));
        assert!(state.status_message.as_deref().unwrap().starts_with("Error:"));
    }
}
