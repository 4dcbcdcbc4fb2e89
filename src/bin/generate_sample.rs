use std::f64::consts::PI;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

/// Unshifted resonance used by every sample run [rad/s].
const W0: f64 = 10.0;
/// Free precession time between the two Ramsey pulses [s].
const PRECESS_TIME: f64 = 2.0;

#[derive(Parser, Debug)]
#[command(about = "Write sample simulation output for every fringe-view subcommand")]
struct Args {
    /// Directory to write the files into (created if missing).
    #[arg(short, long, default_value = "sample_data")]
    out: PathBuf,
}

/// Minimal deterministic PRNG (splitmix64) for jitter on fitted minima.
struct Jitter {
    state: u64,
}

impl Jitter {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[-amplitude, amplitude)`.
    fn next(&mut self, amplitude: f64) -> f64 {
        let unit = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        amplitude * (2.0 * unit - 1.0)
    }
}

/// Writes `#KEY=VALUE,...` and then one CSV record per row.
///
/// Values use `Display`, the same formatting the fringe headers use, so a
/// sweep row and a fringe header holding the same number compare equal.
fn write_run(path: &Path, header: &[(&str, f64)], rows: &[Vec<f64>]) -> Result<()> {
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let pairs: Vec<String> = header.iter().map(|(k, v)| format!("{k}={v}")).collect();
    writeln!(file, "#{}", pairs.join(","))?;

    let mut writer = csv::Writer::from_writer(file);
    for row in rows {
        writer.write_record(row.iter().map(f64::to_string))?;
    }
    writer.flush()?;
    log::info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

fn steps(start: f64, end: f64, n: usize) -> impl Iterator<Item = f64> {
    let step = (end - start) / (n - 1) as f64;
    (0..n).map(move |i| start + step * i as f64)
}

// ---------------------------------------------------------------------------
// Rabi / Ramsey
// ---------------------------------------------------------------------------

/// Spin starting along +z under a circularly rotating field of strength `wc`
/// and frequency `w`, returned as spin-up probabilities along x, y and z.
fn circular_rabi(t: f64, w: f64, wc: f64, phi: f64) -> [f64; 3] {
    let detuning = w - W0;
    let omega = (detuning * detuning + wc * wc).sqrt();
    let (nx, nz) = (wc / omega, detuning / omega);

    // Rotate (0, 0, 1) about n = (nx, 0, nz) by omega·t in the rotating frame.
    let (sin, cos) = (omega * t).sin_cos();
    let rx = nz * nx * (1.0 - cos);
    let ry = -nx * sin;
    let rz = nz * nz + cos * (1.0 - nz * nz);

    // Back to the lab frame.
    let (sin_lab, cos_lab) = (w * t + phi).sin_cos();
    let sx = rx * cos_lab - ry * sin_lab;
    let sy = rx * sin_lab + ry * cos_lab;
    [(1.0 + sx) / 2.0, (1.0 + sy) / 2.0, (1.0 + rz) / 2.0]
}

fn write_rabi(dir: &Path) -> Result<()> {
    let (w, wl, phi) = (W0, 1.0, 0.0);
    let rows: Vec<Vec<f64>> = steps(0.0, 2.0 * PI, 1000)
        .map(|t| {
            let [x, y, z] = circular_rabi(t, w, wl, phi);
            vec![t, x, y, z]
        })
        .collect();
    write_run(
        &dir.join("circRabi.txt"),
        &[("W_VAL", w), ("W0_VAL", W0), ("WL_VAL", wl), ("PHI_VAL", phi), ("INT_ID", 1.0)],
        &rows,
    )
}

/// Spin-up probability after two π/2 pulses separated by `PRECESS_TIME`.
fn ramsey_z(freq: f64, resonance: f64) -> f64 {
    ((freq - resonance) * PRECESS_TIME / 2.0).sin().powi(2)
}

fn write_ramsey(dir: &Path) -> Result<()> {
    let rows: Vec<Vec<f64>> = steps(W0 - 5.0, W0 + 5.0, 501)
        .map(|f| vec![f, ramsey_z(f, W0)])
        .collect();
    write_run(
        &dir.join("circRamsey.txt"),
        &[
            ("W0_VAL", W0),
            ("WL_VAL", 0.5),
            ("PHI_VAL", 0.0),
            ("PRECESS_TIME", PRECESS_TIME),
            ("INT_ID", 1.0),
        ],
        &rows,
    )
}

// ---------------------------------------------------------------------------
// Bloch-Siegert sweeps
// ---------------------------------------------------------------------------

fn write_bloch_siegert_rabi(dir: &Path, jitter: &mut Jitter) -> Result<()> {
    let widths: Vec<f64> = (1..=12).map(|i| i as f64 * 0.25).collect();
    let mut rows = Vec::with_capacity(widths.len());
    let mut fringes = Vec::new();

    for (i, &t) in widths.iter().enumerate() {
        let expected = (2.0 * PI / t).powi(2) / (16.0 * W0);
        let grid = W0 - expected + jitter.next(0.01);
        let poly = W0 - expected + jitter.next(0.005);
        rows.push(vec![t, grid, poly]);
        if i % 4 == 0 {
            fringes.push((t, grid));
        }
    }

    write_run(
        &dir.join("linBlochSiegertRabi.txt"),
        &[("W0_VAL", W0), ("INT_ID", 0.0)],
        &rows,
    )?;

    for (n, (t, centre)) in fringes.into_iter().enumerate() {
        let wc = PI / t;
        let rows: Vec<Vec<f64>> = steps(centre - 3.0 * wc, centre + 3.0 * wc, 301)
            .map(|w| {
                let d2 = (w - centre).powi(2);
                let omega = (d2 + wc * wc).sqrt() / 2.0;
                vec![w, 1.0 - wc * wc / (d2 + wc * wc) * (omega * t).sin().powi(2)]
            })
            .collect();
        write_run(&dir.join(format!("rf{}.txt", n + 1)), &[("pulseWidth", t)], &rows)?;
    }
    Ok(())
}

fn write_bloch_siegert(dir: &Path, jitter: &mut Jitter) -> Result<()> {
    let pulse_time = 0.5;
    let amplitude = (2.0 * PI / pulse_time).powi(2) / (16.0 * W0);
    let phases: Vec<f64> = (0..=16).map(|k| k as f64 * PI / 8.0).collect();
    let mut rows = Vec::with_capacity(phases.len());
    let mut fringes = Vec::new();

    for (k, &phi) in phases.iter().enumerate() {
        let shift = amplitude * (1.0 + (2.0 * phi).cos()) / 2.0;
        let grid = W0 - shift + jitter.next(0.01);
        let poly = W0 - shift + jitter.next(0.005);
        rows.push(vec![phi, grid, poly]);
        if k % 4 == 0 {
            fringes.push((phi, grid));
        }
    }

    write_run(
        &dir.join("linBlochSiegert.txt"),
        &[
            ("W0_VAL", W0),
            ("PRECESS_TIME", PRECESS_TIME),
            ("PULSE_TIME", pulse_time),
            ("INT_ID", 0.0),
        ],
        &rows,
    )?;

    for (n, (phi, centre)) in fringes.into_iter().enumerate() {
        let rows: Vec<Vec<f64>> = steps(centre - PI, centre + PI, 301)
            .map(|w| vec![w, ramsey_z(w, centre)])
            .collect();
        write_run(&dir.join(format!("ramsey{}.txt", n + 1)), &[("phi", phi)], &rows)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();
    let args = Args::parse();

    fs::create_dir_all(&args.out).with_context(|| format!("creating {}", args.out.display()))?;

    let mut jitter = Jitter::new(42);
    write_rabi(&args.out)?;
    write_ramsey(&args.out)?;
    write_bloch_siegert_rabi(&args.out, &mut jitter)?;
    write_bloch_siegert(&args.out, &mut jitter)?;

    println!("Wrote sample runs to {}", args.out.display());
    Ok(())
}
