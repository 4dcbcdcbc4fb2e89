use eframe::egui::{Color32, Ui};
use egui_plot::{GridInput, GridMark, Legend, Line, Plot, PlotPoints, PlotUi, Points, VLine};

use crate::chart::ticks::{format_pi_tick, pi_grid_marks};
use crate::chart::{ChartStyle, Figure, Series, SeriesKind, TickStyle};

// ---------------------------------------------------------------------------
// Figure plot (central panel)
// ---------------------------------------------------------------------------

/// Render one figure in the central panel.
pub fn figure_plot(ui: &mut Ui, figure: &Figure, style: &ChartStyle) {
    ui.heading(&figure.title);

    let mut plot = Plot::new(&figure.id)
        .x_axis_label(figure.x_label.as_str())
        .y_axis_label(figure.y_label.as_str())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);

    if figure.has_legend() {
        plot = plot.legend(Legend::default());
    }

    if let TickStyle::PiFractions(denominator) = figure.x_ticks {
        plot = plot
            .x_grid_spacer(move |input: GridInput| pi_spacer(input, denominator))
            .x_axis_formatter(move |mark, _range| format_pi_tick(mark.value, denominator));
    }

    if let Some([x_min, x_max, y_min, y_max]) = figure.bounds {
        plot = plot
            .include_x(x_min)
            .include_x(x_max)
            .include_y(y_min)
            .include_y(y_max);
    }

    if figure.bare {
        plot = plot
            .show_axes(false)
            .show_grid(false)
            .data_aspect(1.0);
    }

    plot.show(ui, |plot_ui| {
        for series in &figure.series {
            draw_series(plot_ui, series, style);
        }
    });
}

fn pi_spacer(input: GridInput, denominator: u64) -> Vec<GridMark> {
    let (min, max) = input.bounds;
    pi_grid_marks(min, max, denominator)
        .into_iter()
        .map(|mark| GridMark {
            value: mark.value,
            step_size: mark.step,
        })
        .collect()
}

fn draw_series(plot_ui: &mut PlotUi, series: &Series, style: &ChartStyle) {
    let color = series.color.unwrap_or(Color32::LIGHT_BLUE);
    match &series.kind {
        SeriesKind::Line(points) => {
            let mut line = Line::new(PlotPoints::from(points.clone()))
                .color(color)
                .width(style.line_width);
            if let Some(name) = &series.name {
                line = line.name(name);
            }
            plot_ui.line(line);
        }
        SeriesKind::Points(points) => {
            let mut markers = Points::new(PlotPoints::from(points.clone()))
                .color(color)
                .radius(style.marker_radius);
            if let Some(name) = &series.name {
                markers = markers.name(name);
            }
            plot_ui.points(markers);
        }
        SeriesKind::VLine(x) => {
            let mut vline = VLine::new(*x).color(color).width(style.line_width);
            if let Some(name) = &series.name {
                vline = vline.name(name);
            }
            plot_ui.vline(vline);
        }
    }
}
