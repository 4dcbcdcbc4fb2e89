use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct FringeViewApp {
    pub state: AppState,
}

impl FringeViewApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for FringeViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: figures and parameters ----
        egui::SidePanel::left("figure_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: selected figure ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.selected_figure() {
            Some(figure) => plot::figure_plot(ui, figure, &self.state.style),
            None => {
                ui.centered_and_justified(|ui| {
                    ui.heading("Nothing to plot");
                });
            }
        });
    }
}
