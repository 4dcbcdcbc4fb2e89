use std::f64::consts::PI;

use eframe::egui::Color32;

use super::projection::{unit_cube_edges, Projection};
use super::{zip_points, ChartStyle, Figure, Series, TickStyle, GRID_SEARCH_COLOR, POLY_FIT_COLOR};
use crate::color::time_gradient;
use crate::data::analysis::prediction_curve;
use crate::data::error::DataError;
use crate::data::model::{BlochSiegertSweep, Experiment, Fringe, RabiTrack, RamseyScan, SweepAxis};

/// Number of colour bands along the projected Rabi trajectory.
const TRAJECTORY_BANDS: usize = 16;

/// Build every figure for an experiment, main chart first.
pub fn build_figures(experiment: &Experiment, style: &ChartStyle) -> Result<Vec<Figure>, DataError> {
    match experiment {
        Experiment::BlochSiegert(sweep) => bloch_siegert_figures(sweep, style),
        Experiment::Rabi(track) => rabi_figures(track, style),
        Experiment::Ramsey(scan) => Ok(vec![ramsey_figure(scan, style)?]),
    }
}

// ---------------------------------------------------------------------------
// Bloch-Siegert sweeps
// ---------------------------------------------------------------------------

fn bloch_siegert_figures(sweep: &BlochSiegertSweep, style: &ChartStyle) -> Result<Vec<Figure>, DataError> {
    let main = match sweep.axis {
        SweepAxis::Phase => phase_shift_figure(sweep, style)?,
        SweepAxis::PulseWidth => pulse_shift_figure(sweep, style)?,
    };

    let mut figures = vec![main];
    figures.extend(
        sweep
            .fringes
            .iter()
            .enumerate()
            .map(|(i, fringe)| fringe_figure(i, fringe, sweep.axis, style)),
    );
    Ok(figures)
}

fn phase_shift_figure(sweep: &BlochSiegertSweep, style: &ChartStyle) -> Result<Figure, DataError> {
    let phi = sweep.sweep_values()?;
    let mut figure = Figure::new("bloch_siegert_shift", "Bloch-Siegert shift for optimized Ramsey fringes")
        .labels("Initial phase angle [rad]", "Shift [rad/s]")
        .with(
            Series::line(zip_points(phi, &sweep.poly_fit_shift()?))
                .named("Polynomial fit")
                .color(POLY_FIT_COLOR),
        )
        .with(
            Series::line(zip_points(phi, &sweep.grid_search_shift()?))
                .named("Grid search")
                .color(GRID_SEARCH_COLOR),
        );
    figure.x_ticks = TickStyle::PiFractions(style.pi_denominator);
    Ok(figure)
}

fn pulse_shift_figure(sweep: &BlochSiegertSweep, style: &ChartStyle) -> Result<Figure, DataError> {
    let widths = sweep.sweep_values()?;
    let mut figure = Figure::new("bloch_siegert_shift", "Bloch-Siegert shift against π pulse width")
        .labels("π pulse width [s]", "Δ Bloch-Siegert [rad/s]")
        .with(
            Series::points(zip_points(widths, &sweep.poly_fit_shift()?))
                .named("Polynomial fit")
                .color(style.measurement_color),
        );

    if let Some((t_min, t_max)) = sweep.table.range(sweep.axis.key())? {
        if t_min > 0.0 {
            let upper = prediction_curve(t_min, t_max, sweep.w0);
            let lower = upper.iter().map(|&[t, y]| [t, -y]).collect();
            figure = figure
                .with(Series::line(upper).named("Bloch-Siegert prediction").color(style.prediction_color))
                .with(Series::line(lower).named("Bloch-Siegert prediction").color(style.prediction_color));
        } else {
            log::warn!("Skipping Bloch-Siegert prediction: pulse widths must be positive");
        }
    }
    Ok(figure)
}

fn fringe_figure(index: usize, fringe: &Fringe, axis: SweepAxis, style: &ChartStyle) -> Figure {
    let title = match axis {
        SweepAxis::Phase => format!("φ = {} rad", fringe.sweep_value),
        SweepAxis::PulseWidth => format!("t = {} s", fringe.sweep_value),
    };
    Figure::new(format!("fringe_{index}"), title)
        .labels("ω [rad/s]", "P(z)")
        .with(
            Series::line(zip_points(&fringe.w, &fringe.z_prob))
                .named(axis.fringe_name())
                .color(style.measurement_color),
        )
        .with(Series::vline(fringe.poly_fit_min).named("polyFitMin").color(POLY_FIT_COLOR))
        .with(Series::vline(fringe.grid_search_min).named("gridSearchMin").color(GRID_SEARCH_COLOR))
}

// ---------------------------------------------------------------------------
// Rabi tracks
// ---------------------------------------------------------------------------

fn rabi_figures(track: &RabiTrack, style: &ChartStyle) -> Result<Vec<Figure>, DataError> {
    let time = track.table.column("time")?;
    let x = track.table.column("xProb")?;
    let y = track.table.column("yProb")?;
    let z = track.table.column("zProb")?;

    let over_time = |id: &str, axis: &str, values: &[f64]| {
        let mut figure = Figure::new(id, format!("Odds of measuring spin up along {axis}"))
            .labels("time [s]", format!("P({axis})"))
            .with(Series::line(zip_points(time, values)).color(style.measurement_color));
        figure.x_ticks = TickStyle::PiFractions(style.pi_denominator);
        figure.bounds = Some([0.0, 2.0 * PI, 0.0, 1.0]);
        figure
    };

    Ok(vec![
        over_time("rabi_z", "z", z),
        trajectory_figure(x, y, z),
        over_time("rabi_x", "x", x),
        over_time("rabi_y", "y", y),
    ])
}

/// `(P(x), P(y), P(z))` seen from the default camera, inside the unit cube.
fn trajectory_figure(x: &[f64], y: &[f64], z: &[f64]) -> Figure {
    let projection = Projection::default();
    let mut figure = Figure::new("rabi_xyz", "Odds of measuring spin up along x, y, z")
        .labels("P(x), P(y)", "P(z)");
    figure.bare = true;

    for (a, b) in unit_cube_edges() {
        figure = figure.with(
            Series::line(vec![projection.project(a), projection.project(b)]).color(Color32::GRAY),
        );
    }

    let points: Vec<[f64; 2]> = x
        .iter()
        .zip(y)
        .zip(z)
        .map(|((&px, &py), &pz)| projection.project([px, py, pz]))
        .collect();
    if points.is_empty() {
        return figure;
    }

    let band = points.len().div_ceil(TRAJECTORY_BANDS);
    let colors = time_gradient(points.len().div_ceil(band));
    for (chunk, color) in points.chunks(band).zip(colors) {
        figure = figure.with(Series::points(chunk.to_vec()).color(color));
    }
    figure
}

// ---------------------------------------------------------------------------
// Ramsey scans
// ---------------------------------------------------------------------------

fn ramsey_figure(scan: &RamseyScan, style: &ChartStyle) -> Result<Figure, DataError> {
    Ok(Figure::new("ramsey", "Ramsey fringe")
        .labels("ω [rad/s]", "P(z)")
        .with(
            Series::line(zip_points(scan.table.column("freq")?, scan.table.column("zProb")?))
                .color(style.measurement_color),
        ))
}
