use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::data::loader::ExperimentKind;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Plot output of the neutron spin-tracking simulations: Bloch-Siegert sweeps, Rabi tracks and Ramsey fringes."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Viewer settings in TOML format (window size, colours, tick spacing)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the run summary and exit without opening a chart window
    #[arg(long, global = true)]
    pub no_gui: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Bloch-Siegert shift against initial RF phase (blochSiegert output).
    BlochSiegert(BlochSiegertArgs),
    /// Bloch-Siegert shift against π pulse width (blochSiegert_rabi output).
    BlochSiegertRabi(BlochSiegertRabiArgs),
    /// Spin-up probabilities along x, y and z during a Rabi pulse.
    Rabi(FileArgs),
    /// Spin-up probability along z across a Ramsey frequency scan.
    Ramsey(FileArgs),
    /// Print the parameter header of a data file.
    Params(ParamsArgs),
}

#[derive(Args, Debug)]
pub struct FileArgs {
    /// Simulation output file.
    #[arg(short, long, value_name = "PATH")]
    pub file: PathBuf,
}

#[derive(Args, Debug)]
pub struct BlochSiegertArgs {
    #[command(flatten)]
    pub input: FileArgs,

    /// Ramsey fringe file(s) to draw; each header carries its `phi`.
    #[arg(
        long = "ramsey-fringe",
        visible_alias = "rf",
        alias = "ramseyFringe",
        value_name = "PATH",
        num_args = 1..
    )]
    pub ramsey_fringe: Vec<PathBuf>,
}

#[derive(Args, Debug)]
pub struct BlochSiegertRabiArgs {
    #[command(flatten)]
    pub input: FileArgs,

    /// Rabi fringe file(s) to draw; each header carries its `pulseWidth`.
    #[arg(
        long = "rabi-fringe",
        visible_alias = "rabi",
        alias = "rabiFringe",
        value_name = "PATH",
        num_args = 1..
    )]
    pub rabi_fringe: Vec<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ParamsArgs {
    #[command(flatten)]
    pub input: FileArgs,

    /// Print as a JSON object instead of KEY=VALUE lines.
    #[arg(long)]
    pub json: bool,
}

/// What a plotting subcommand asks to load.
#[derive(Debug, PartialEq)]
pub struct PlotRequest<'a> {
    pub kind: ExperimentKind,
    pub file: &'a PathBuf,
    pub fringes: &'a [PathBuf],
}

impl Commands {
    /// `None` for subcommands that do not open charts.
    pub fn plot_request(&self) -> Option<PlotRequest<'_>> {
        let (kind, file, fringes): (_, _, &[PathBuf]) = match self {
            Commands::BlochSiegert(args) => (
                ExperimentKind::BlochSiegertPhase,
                &args.input.file,
                &args.ramsey_fringe,
            ),
            Commands::BlochSiegertRabi(args) => (
                ExperimentKind::BlochSiegertPulse,
                &args.input.file,
                &args.rabi_fringe,
            ),
            Commands::Rabi(args) => (ExperimentKind::Rabi, &args.file, &[]),
            Commands::Ramsey(args) => (ExperimentKind::Ramsey, &args.file, &[]),
            Commands::Params(_) => return None,
        };
        Some(PlotRequest { kind, file, fringes })
    }
}
