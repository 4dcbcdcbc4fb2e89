use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::Experiment;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – figure list and run parameters
// ---------------------------------------------------------------------------

/// Render the left panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Figures");
    ui.separator();

    let mut clicked = None;
    for (i, figure) in state.figures.iter().enumerate() {
        if ui.selectable_label(state.selected == i, &figure.title).clicked() {
            clicked = Some(i);
        }
    }
    if let Some(i) = clicked {
        state.select(i);
    }

    ui.add_space(8.0);

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let count = state.experiment.params().map_or(0, |p| p.len());
            egui::CollapsingHeader::new(RichText::new(format!("Parameters  ({count})")).strong())
                .id_salt("parameters")
                .default_open(true)
                .show(ui, |ui: &mut Ui| parameter_table(ui, &state.experiment));

            if let Experiment::BlochSiegert(sweep) = &state.experiment {
                let header = format!("{}s  ({})", sweep.axis.fringe_name(), sweep.fringes.len());
                egui::CollapsingHeader::new(RichText::new(header).strong())
                    .default_open(false)
                    .show(ui, |ui: &mut Ui| {
                        if sweep.fringes.is_empty() {
                            ui.label("None loaded.");
                        }
                        for fringe in &sweep.fringes {
                            ui.label(format!(
                                "{} = {}  ({})",
                                sweep.axis.key(),
                                fringe.sweep_value,
                                fringe.path.display()
                            ));
                        }
                    });
            }
        });
}

fn parameter_table(ui: &mut Ui, experiment: &Experiment) {
    let Some(params) = experiment.params().filter(|p| !p.is_empty()) else {
        ui.label("No parameter header.");
        return;
    };

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::auto())
        .column(Column::remainder())
        .header(18.0, |mut header| {
            header.col(|ui| {
                ui.strong("Key");
            });
            header.col(|ui| {
                ui.strong("Value");
            });
        })
        .body(|mut body| {
            for (key, value) in params.iter() {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.monospace(key);
                    });
                    row.col(|ui| {
                        ui.label(value.to_string());
                    });
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            let add = ui.add_enabled(state.accepts_fringes(), egui::Button::new("Add fringe file…"));
            if add.clicked() {
                add_fringe_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(headline) = state.experiment.summary().first() {
            ui.label(headline);
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn add_fringe_dialog(state: &mut AppState) {
    let files = rfd::FileDialog::new()
        .set_title("Add fringe files")
        .add_filter("Simulation output", &["txt", "csv"])
        .pick_files();

    for path in files.unwrap_or_default() {
        state.add_fringe(&path);
        if state.status_message.is_some() {
            break;
        }
    }
}
