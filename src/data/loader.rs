use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::error::DataError;
use super::model::{
    BlochSiegertSweep, Experiment, Fringe, RabiTrack, RamseyScan, RfKind, SweepAxis,
};
use super::params::parse_params;
use super::table::DataTable;

const FRINGE_COLUMNS: [&str; 2] = ["w", "zProb"];
const RABI_COLUMNS: [&str; 4] = ["time", "xProb", "yProb", "zProb"];
const RAMSEY_COLUMNS: [&str; 2] = ["freq", "zProb"];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// The kinds of simulation output the viewer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperimentKind {
    /// Bloch-Siegert shift against initial RF phase (`phi, gridSearchMin, polyFitMin`).
    BlochSiegertPhase,
    /// Bloch-Siegert shift against π pulse width (`pulseWidth, gridSearchMin, polyFitMin`).
    BlochSiegertPulse,
    /// Spin tracking during a Rabi pulse (`time, xProb, yProb, zProb`).
    Rabi,
    /// Ramsey fringe scan (`freq, zProb`).
    Ramsey,
}

/// Load a simulation output file.  `fringes` are auxiliary scans and only
/// apply to the Bloch-Siegert kinds.
pub fn load_experiment(kind: ExperimentKind, path: &Path, fringes: &[PathBuf]) -> Result<Experiment> {
    log::info!("Loading {}", path.display());

    if !fringes.is_empty()
        && !matches!(
            kind,
            ExperimentKind::BlochSiegertPhase | ExperimentKind::BlochSiegertPulse
        )
    {
        log::warn!("Ignoring {} fringe file(s) for {kind:?} data", fringes.len());
    }

    let experiment = match kind {
        ExperimentKind::BlochSiegertPhase => {
            Experiment::BlochSiegert(load_bloch_siegert(path, SweepAxis::Phase, fringes)?)
        }
        ExperimentKind::BlochSiegertPulse => {
            Experiment::BlochSiegert(load_bloch_siegert(path, SweepAxis::PulseWidth, fringes)?)
        }
        ExperimentKind::Rabi => Experiment::Rabi(load_rabi(path)?),
        ExperimentKind::Ramsey => Experiment::Ramsey(load_ramsey(path)?),
    };

    log::info!(
        "Loaded {} rows with parameters {}",
        experiment.rows(),
        experiment
            .params()
            .map_or_else(|| "<none>".to_string(), |p| p.to_string())
    );
    Ok(experiment)
}

/// Read the data rows, warning when a file carries nothing but comments.
fn read_table(path: &Path, names: &[&str]) -> Result<DataTable, DataError> {
    let table = DataTable::read(path, names)?;
    if table.is_empty() {
        log::warn!("{} has no data rows", path.display());
    }
    Ok(table)
}

// ---------------------------------------------------------------------------
// Bloch-Siegert sweeps
// ---------------------------------------------------------------------------

/// Header: `W0_VAL` (required), `INT_ID` and run constants.
/// Rows: `<sweep value>,gridSearchMin,polyFitMin`.
pub fn load_bloch_siegert(path: &Path, axis: SweepAxis, fringe_paths: &[PathBuf]) -> Result<BlochSiegertSweep> {
    let params = parse_params(path)?;
    let w0 = params.require("W0_VAL", path)?;
    let table = read_table(path, &axis.columns())?;

    let mut sweep = BlochSiegertSweep {
        path: path.to_path_buf(),
        axis,
        rf: RfKind::from_params(&params),
        params,
        w0,
        table,
        fringes: Vec::with_capacity(fringe_paths.len()),
    };

    for fringe_path in fringe_paths {
        let fringe = load_fringe(fringe_path, &sweep)?;
        sweep.fringes.push(fringe);
    }

    Ok(sweep)
}

/// Load one auxiliary fringe and look up the sweep row it belongs to.
///
/// Header: `phi=` or `pulseWidth=` matching the sweep axis.  Rows: `w,zProb`.
pub fn load_fringe(path: &Path, sweep: &BlochSiegertSweep) -> Result<Fringe> {
    log::info!("Loading {}", path.display());

    let key = sweep.axis.key();
    let params = parse_params(path)?;
    let sweep_value = params.require(key, path)?;
    let table = read_table(path, &FRINGE_COLUMNS)?;

    let row = sweep.table.find_row(key, sweep_value).with_context(|| {
        format!(
            "{} '{}' does not match any row of '{}'",
            sweep.axis.fringe_name(),
            path.display(),
            sweep.path.display()
        )
    })?;

    log::debug!("{} {key}={sweep_value} matches sweep row {row}", path.display());

    Ok(Fringe {
        path: path.to_path_buf(),
        sweep_value,
        w: table.column("w")?.to_vec(),
        z_prob: table.column("zProb")?.to_vec(),
        poly_fit_min: sweep.table.value("polyFitMin", row)?,
        grid_search_min: sweep.table.value("gridSearchMin", row)?,
    })
}

// ---------------------------------------------------------------------------
// Rabi / Ramsey
// ---------------------------------------------------------------------------

/// Header: `W_VAL, W0_VAL, WL_VAL, PHI_VAL, INT_ID`.  Rows: `time,xProb,yProb,zProb`.
pub fn load_rabi(path: &Path) -> Result<RabiTrack> {
    let params = parse_params(path)?;
    let table = read_table(path, &RABI_COLUMNS)?;
    Ok(RabiTrack {
        path: path.to_path_buf(),
        rf: RfKind::from_params(&params),
        params,
        table,
    })
}

/// Rows: `freq,zProb`.  The parameter header is optional here; a missing or
/// malformed one is reported and the scan is still loaded.
pub fn load_ramsey(path: &Path) -> Result<RamseyScan> {
    let params = match parse_params(path) {
        Ok(params) => Some(params),
        Err(e) => {
            log::warn!("Unable to read parameters: {:#}", anyhow::Error::from(e));
            None
        }
    };
    let table = read_table(path, &RAMSEY_COLUMNS)
        .with_context(|| format!("reading Ramsey scan '{}'", path.display()))?;
    Ok(RamseyScan {
        path: path.to_path_buf(),
        rf: params.as_ref().and_then(RfKind::from_params),
        params,
        table,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::error::DataError;
    use std::fs;

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    const PULSE_SWEEP: &str = "#W0_VAL=183.247172,INT_ID=0\n\
        #pulseWidth,gridMin,polyMin\n\
        1,183.2471,183.24712\n\
        1.05,183.2472,183.24715\n";

    #[test]
    fn loads_pulse_sweep_with_correlated_fringe() {
        let dir = tempfile::tempdir().unwrap();
        let sweep = write(dir.path(), "linBlochSiegertRabi.txt", PULSE_SWEEP);
        let fringe = write(
            dir.path(),
            "rf2.txt",
            "#pulseWidth=1.05\n#w,zProb\n183.2,0.9\n183.3,0.8\n",
        );

        let experiment =
            load_experiment(ExperimentKind::BlochSiegertPulse, &sweep, &[fringe.clone()]).unwrap();
        let Experiment::BlochSiegert(sweep) = experiment else {
            panic!("expected a Bloch-Siegert sweep");
        };

        assert_eq!(sweep.w0, 183.247172);
        assert_eq!(sweep.rf, Some(RfKind::Linear));
        assert_eq!(sweep.table.len(), 2);
        assert_eq!(sweep.fringes.len(), 1);

        let f = &sweep.fringes[0];
        assert_eq!(f.path, fringe);
        assert_eq!(f.sweep_value, 1.05);
        assert_eq!(f.w, vec![183.2, 183.3]);
        assert_eq!(f.z_prob, vec![0.9, 0.8]);
        assert_eq!(f.grid_search_min, 183.2472);
        assert_eq!(f.poly_fit_min, 183.24715);
    }

    #[test]
    fn phase_sweep_correlates_on_phi() {
        let dir = tempfile::tempdir().unwrap();
        let sweep = write(
            dir.path(),
            "sweep.txt",
            "#W0_VAL=10,PRECESS_TIME=180,PULSE_TIME=4.286,INT_ID=1\n0.0,1.0,1.1\n1.57,2.0,2.1\n",
        );
        let fringe = write(dir.path(), "ramsey.txt", "#phi=1.57\n9.9,0.5\n");

        let sweep = load_bloch_siegert(&sweep, SweepAxis::Phase, &[fringe]).unwrap();
        assert_eq!(sweep.rf, Some(RfKind::Circular));
        assert_eq!(sweep.fringes[0].grid_search_min, 2.0);
        assert_eq!(sweep.fringes[0].poly_fit_min, 2.1);
    }

    #[test]
    fn unmatched_fringe_fails() {
        let dir = tempfile::tempdir().unwrap();
        let sweep = write(dir.path(), "sweep.txt", PULSE_SWEEP);
        let fringe = write(dir.path(), "rf9.txt", "#pulseWidth=9.5\n183.2,0.9\n");

        let err = load_experiment(ExperimentKind::BlochSiegertPulse, &sweep, &[fringe]).unwrap_err();
        assert!(format!("{err:#}").contains("does not match any row"));
        assert!(matches!(
            err.root_cause().downcast_ref::<DataError>(),
            Some(DataError::NoMatchingRow { .. })
        ));
    }

    #[test]
    fn fringe_without_sweep_key_fails() {
        let dir = tempfile::tempdir().unwrap();
        let sweep = write(dir.path(), "sweep.txt", PULSE_SWEEP);
        let fringe = write(dir.path(), "rf1.txt", "#phi=1.0\n183.2,0.9\n");

        let err = load_experiment(ExperimentKind::BlochSiegertPulse, &sweep, &[fringe]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DataError>(),
            Some(DataError::MissingParameter { key, .. }) if key == "pulseWidth"
        ));
    }

    #[test]
    fn sweep_requires_w0() {
        let dir = tempfile::tempdir().unwrap();
        let sweep = write(dir.path(), "sweep.txt", "#INT_ID=0\n1,2,3\n");
        let err = load_experiment(ExperimentKind::BlochSiegertPhase, &sweep, &[]).unwrap_err();
        assert!(err.to_string().contains("W0_VAL"));
    }

    #[test]
    fn header_only_sweep_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let sweep = write(dir.path(), "sweep.txt", "#W0_VAL=10.0\n");
        let sweep = load_bloch_siegert(&sweep, SweepAxis::PulseWidth, &[]).unwrap();
        assert_eq!(sweep.params.get("W0_VAL"), Some(10.0));
        assert!(sweep.table.is_empty());
        assert_eq!(sweep.rf, None);
    }

    #[test]
    fn loads_rabi_track() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "circRabi.txt",
            "#W_VAL=20,W0_VAL=20,WL_VAL=1.57,PHI_VAL=0,INT_ID=1\n#time,xProb,yProb,zProb\n0,0.5,0.5,1\n0.01,0.51,0.49,0.99\n",
        );
        let Experiment::Rabi(track) = load_experiment(ExperimentKind::Rabi, &path, &[]).unwrap() else {
            panic!("expected a Rabi track");
        };
        assert_eq!(track.rf, Some(RfKind::Circular));
        assert_eq!(track.table.column("yProb").unwrap(), &[0.5, 0.49]);
    }

    #[test]
    fn malformed_rabi_header_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "rabi.txt", "#W_VAL20\n0,0.5,0.5,1\n");
        let err = load_experiment(ExperimentKind::Rabi, &path, &[]).unwrap_err();
        assert!(matches!(err.downcast_ref::<DataError>(), Some(DataError::Header { .. })));
    }

    #[test]
    fn ramsey_tolerates_missing_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "ramsey.txt", "180.0,0.9\n180.001,0.85\n");
        let Experiment::Ramsey(scan) = load_experiment(ExperimentKind::Ramsey, &path, &[]).unwrap() else {
            panic!("expected a Ramsey scan");
        };
        assert!(scan.params.is_none());
        assert_eq!(scan.table.len(), 2);
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");
        let err = load_experiment(ExperimentKind::Rabi, &path, &[]).unwrap_err();
        assert!(err.to_string().contains("absent.txt"));
    }
}
