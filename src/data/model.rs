use std::fmt;
use std::path::{Path, PathBuf};

use super::analysis;
use super::error::DataError;
use super::params::ParameterSet;
use super::table::DataTable;

// ---------------------------------------------------------------------------
// RF drive type
// ---------------------------------------------------------------------------

/// Which RF field the simulation applied, from the `INT_ID` header entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RfKind {
    Linear,
    Circular,
}

impl RfKind {
    /// `INT_ID == 1` marks a circular drive, anything else is linear.
    pub fn from_param(int_id: f64) -> Self {
        if int_id == 1.0 {
            RfKind::Circular
        } else {
            RfKind::Linear
        }
    }

    /// `None` when the header has no `INT_ID` entry.
    pub fn from_params(params: &ParameterSet) -> Option<Self> {
        params.get("INT_ID").map(Self::from_param)
    }
}

impl fmt::Display for RfKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RfKind::Linear => write!(f, "Linear RF"),
            RfKind::Circular => write!(f, "Circular RF"),
        }
    }
}

// ---------------------------------------------------------------------------
// Sweep axis of a Bloch-Siegert run
// ---------------------------------------------------------------------------

/// The parameter a Bloch-Siegert sweep varies.  Auxiliary fringe files carry
/// the same value in their header, which ties them back to a sweep row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepAxis {
    /// Initial RF phase, Ramsey fringes.
    Phase,
    /// π pulse width, Rabi fringes.
    PulseWidth,
}

impl SweepAxis {
    /// Column name in the sweep table and key in the fringe file header.
    pub fn key(self) -> &'static str {
        match self {
            SweepAxis::Phase => "phi",
            SweepAxis::PulseWidth => "pulseWidth",
        }
    }

    pub fn columns(self) -> [&'static str; 3] {
        [self.key(), "gridSearchMin", "polyFitMin"]
    }

    pub fn fringe_name(self) -> &'static str {
        match self {
            SweepAxis::Phase => "Ramsey fringe",
            SweepAxis::PulseWidth => "Rabi fringe",
        }
    }

    /// Header keys echoed in the run summary.
    fn summary_keys(self) -> &'static [&'static str] {
        match self {
            SweepAxis::Phase => &["W0_VAL", "PRECESS_TIME", "PULSE_TIME"],
            SweepAxis::PulseWidth => &["W0_VAL"],
        }
    }
}

// ---------------------------------------------------------------------------
// Auxiliary fringe
// ---------------------------------------------------------------------------

/// One fringe scan correlated to a row of its sweep table.
#[derive(Debug, Clone)]
pub struct Fringe {
    pub path: PathBuf,
    /// Value of the sweep parameter (`phi` or `pulseWidth`) for this scan.
    pub sweep_value: f64,
    pub w: Vec<f64>,
    pub z_prob: Vec<f64>,
    pub poly_fit_min: f64,
    pub grid_search_min: f64,
}

// ---------------------------------------------------------------------------
// Experiments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct BlochSiegertSweep {
    pub path: PathBuf,
    pub axis: SweepAxis,
    pub params: ParameterSet,
    pub w0: f64,
    pub rf: Option<RfKind>,
    pub table: DataTable,
    pub fringes: Vec<Fringe>,
}

impl BlochSiegertSweep {
    pub fn sweep_values(&self) -> Result<&[f64], DataError> {
        self.table.column(self.axis.key())
    }

    /// `W0_VAL - polyFitMin` for every sweep row.
    pub fn poly_fit_shift(&self) -> Result<Vec<f64>, DataError> {
        Ok(analysis::shift(self.w0, self.table.column("polyFitMin")?))
    }

    /// `W0_VAL - gridSearchMin` for every sweep row.
    pub fn grid_search_shift(&self) -> Result<Vec<f64>, DataError> {
        Ok(analysis::shift(self.w0, self.table.column("gridSearchMin")?))
    }
}

#[derive(Debug, Clone)]
pub struct RabiTrack {
    pub path: PathBuf,
    pub params: ParameterSet,
    pub rf: Option<RfKind>,
    /// Columns `time, xProb, yProb, zProb`.
    pub table: DataTable,
}

#[derive(Debug, Clone)]
pub struct RamseyScan {
    pub path: PathBuf,
    /// The header is optional for Ramsey scans.
    pub params: Option<ParameterSet>,
    pub rf: Option<RfKind>,
    /// Columns `freq, zProb`.
    pub table: DataTable,
}

/// A loaded simulation output, ready to be turned into figures.
#[derive(Debug, Clone)]
pub enum Experiment {
    BlochSiegert(BlochSiegertSweep),
    Rabi(RabiTrack),
    Ramsey(RamseyScan),
}

impl Experiment {
    pub fn path(&self) -> &Path {
        match self {
            Experiment::BlochSiegert(sweep) => &sweep.path,
            Experiment::Rabi(track) => &track.path,
            Experiment::Ramsey(scan) => &scan.path,
        }
    }

    pub fn params(&self) -> Option<&ParameterSet> {
        match self {
            Experiment::BlochSiegert(sweep) => Some(&sweep.params),
            Experiment::Rabi(track) => Some(&track.params),
            Experiment::Ramsey(scan) => scan.params.as_ref(),
        }
    }

    pub fn rows(&self) -> usize {
        match self {
            Experiment::BlochSiegert(sweep) => sweep.table.len(),
            Experiment::Rabi(track) => track.table.len(),
            Experiment::Ramsey(scan) => scan.table.len(),
        }
    }

    /// Human-readable description of the run, e.g. "Linear RF Ramsey fringe"
    /// followed by the key simulation parameters.
    pub fn summary(&self) -> Vec<String> {
        let (rf, noun, params, keys): (_, _, _, &[&str]) = match self {
            Experiment::BlochSiegert(sweep) => (
                sweep.rf,
                sweep.axis.fringe_name(),
                Some(&sweep.params),
                sweep.axis.summary_keys(),
            ),
            Experiment::Rabi(track) => (
                track.rf,
                "Rabi pulse",
                Some(&track.params),
                &["W_VAL", "W0_VAL", "WL_VAL", "PHI_VAL"],
            ),
            Experiment::Ramsey(scan) => (
                scan.rf,
                "Ramsey fringe",
                scan.params.as_ref(),
                &["W0_VAL", "WL_VAL", "PHI_VAL"],
            ),
        };

        let mut lines = Vec::new();
        if let Some(rf) = rf {
            lines.push(format!("{rf} {noun}"));
        }
        if let Some(params) = params {
            let present: Vec<(&str, f64)> = keys
                .iter()
                .filter_map(|k| params.get(k).map(|v| (*k, v)))
                .collect();
            if !present.is_empty() {
                let names: Vec<&str> = present.iter().map(|(k, _)| *k).collect();
                let values: Vec<String> = present.iter().map(|(_, v)| v.to_string()).collect();
                lines.push(format!("{{{}}}", names.join(", ")));
                lines.push(values.join("   "));
            }
        }
        lines.push(format!("{} rows from {}", self.rows(), self.path().display()));
        lines
    }
}
