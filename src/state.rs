use std::path::Path;

use crate::chart::figures::build_figures;
use crate::chart::{ChartStyle, Figure};
use crate::data::error::DataError;
use crate::data::loader::load_fringe;
use crate::data::model::Experiment;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// The run being viewed.
    pub experiment: Experiment,

    /// Figures derived from `experiment`, main chart first.
    pub figures: Vec<Figure>,

    /// Index into `figures` shown in the central panel.
    pub selected: usize,

    pub style: ChartStyle,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(experiment: Experiment, style: ChartStyle) -> Result<Self, DataError> {
        let figures = build_figures(&experiment, &style)?;
        Ok(Self {
            experiment,
            figures,
            selected: 0,
            style,
            status_message: None,
        })
    }

    pub fn selected_figure(&self) -> Option<&Figure> {
        self.figures.get(self.selected)
    }

    /// Show figure `index`; out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.figures.len() {
            self.selected = index;
        }
    }

    /// Whether extra fringe files can be attached to the current run.
    pub fn accepts_fringes(&self) -> bool {
        matches!(self.experiment, Experiment::BlochSiegert(_))
    }

    /// Load another fringe into a Bloch-Siegert sweep and show its figure.
    pub fn add_fringe(&mut self, path: &Path) {
        let Experiment::BlochSiegert(sweep) = &mut self.experiment else {
            self.status_message = Some("Fringe files only apply to Bloch-Siegert sweeps".to_string());
            return;
        };

        match load_fringe(path, sweep) {
            Ok(fringe) => {
                log::info!("Added fringe {} at {}", path.display(), fringe.sweep_value);
                sweep.fringes.push(fringe);
            }
            Err(e) => {
                log::error!("Failed to load fringe: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
                return;
            }
        }

        match build_figures(&self.experiment, &self.style) {
            Ok(figures) => {
                self.selected = figures.len().saturating_sub(1);
                self.figures = figures;
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to rebuild figures: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::{load_experiment, ExperimentKind};
    use std::fs;

    fn write(dir: &Path, name: &str, text: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, text).unwrap();
        path
    }

    fn sweep_state(dir: &Path) -> AppState {
        let sweep = write(
            dir,
            "linBlochSiegertRabi.txt",
            "#W0_VAL=100,INT_ID=0\n0.5,99.9,99.8\n1,99.7,99.6\n",
        );
        let experiment = load_experiment(ExperimentKind::BlochSiegertPulse, &sweep, &[]).unwrap();
        AppState::new(experiment, ChartStyle::default()).unwrap()
    }

    #[test]
    fn starts_on_main_figure() {
        let dir = tempfile::tempdir().unwrap();
        let state = sweep_state(dir.path());
        assert_eq!(state.selected, 0);
        assert_eq!(state.selected_figure().unwrap().id, "bloch_siegert_shift");
        assert!(state.accepts_fringes());
    }

    #[test]
    fn select_ignores_out_of_range() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = sweep_state(dir.path());
        state.select(7);
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn add_fringe_appends_and_selects_figure() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = sweep_state(dir.path());
        let fringe = write(dir.path(), "rf1.txt", "#pulseWidth=1\n99.5,0.1\n99.6,0.2\n");

        state.add_fringe(&fringe);

        assert!(state.status_message.is_none());
        assert_eq!(state.figures.len(), 2);
        assert_eq!(state.selected, 1);
        assert_eq!(state.selected_figure().unwrap().id, "fringe_0");
    }

    #[test]
    fn unmatched_fringe_sets_status() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = sweep_state(dir.path());
        let fringe = write(dir.path(), "rf9.txt", "#pulseWidth=9\n99.5,0.1\n");

        state.add_fringe(&fringe);

        let message = state.status_message.as_deref().unwrap();
        assert!(message.contains("rf9.txt"), "{message}");
        assert_eq!(state.figures.len(), 1);
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn ramsey_runs_reject_fringes() {
        let dir = tempfile::tempdir().unwrap();
        let scan = write(dir.path(), "circRamsey.txt", "#W0_VAL=100\n99,0.5\n100,1\n");
        let experiment = load_experiment(ExperimentKind::Ramsey, &scan, &[]).unwrap();
        let mut state = AppState::new(experiment, ChartStyle::default()).unwrap();

        assert!(!state.accepts_fringes());
        state.add_fringe(&scan);
        assert!(state.status_message.is_some());
        assert_eq!(state.figures.len(), 1);
    }
}
