mod app;
mod chart;
mod cli;
mod color;
mod config;
mod data;
mod logging;
mod state;
mod ui;

use std::process::ExitCode;

use anyhow::{anyhow, Result};
use clap::Parser;
use eframe::egui;

use app::FringeViewApp;
use cli::{Cli, Commands};
use config::ViewerConfig;
use data::loader::load_experiment;
use data::params::parse_params;
use state::AppState;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => ViewerConfig::load(path)?,
        None => ViewerConfig::default(),
    };
    let style = config.chart_style()?;

    if let Commands::Params(args) = &cli.command {
        let params = parse_params(&args.input.file)?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&params)?);
        } else {
            for (key, value) in params.iter() {
                println!("{key}={value}");
            }
        }
        return Ok(());
    }

    let Some(request) = cli.command.plot_request() else {
        return Ok(());
    };

    let experiment = load_experiment(request.kind, request.file, request.fringes)?;
    for line in experiment.summary() {
        println!("{line}");
    }

    if cli.no_gui {
        return Ok(());
    }

    let title = format!("Fringe View – {}", experiment.path().display());
    let state = AppState::new(experiment, style)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(|_cc| Ok(Box::new(FringeViewApp::new(state)))),
    )
    .map_err(|e| anyhow!("failed to open chart window: {e}"))
}
