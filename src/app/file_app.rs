//! Single-file chart window.

use egui_plot::Plot;

use crate::browse::Series;

use super::{draw_series, series_color};

pub struct FilePlotApp {
    series: Series,
}

impl FilePlotApp {
    pub fn new(series: Series) -> Self {
        Self { series }
    }
}

impl eframe::App for FilePlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(format!("Heart rate (BPM): {}", self.series.label));
            Plot::new("file_plot")
                .x_axis_label("Sample number")
                .y_axis_label("BPM")
                .show(ui, |plot_ui| {
                    draw_series(plot_ui, &self.series, series_color(0), true);
                });
        });
    }
}
