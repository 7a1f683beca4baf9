//! eframe windows for the three front ends.
//!
//! | Sub-module      | Responsibility |
//! | --------------- | -------------- |
//! | [`live_app`]    | Rolling live chart fed by the serial session |
//! | [`browser_app`] | Directory file list with overlaid charts and Y range controls |
//! | [`file_app`]    | Single decoded file on one chart |
//! | [`run`]         | `run_*` entry points that open the native window |
//!
//! The windows only lay out widgets; decoding, buffering and range handling
//! live in the GUI-free modules of the crate.

mod browser_app;
mod file_app;
mod live_app;
mod run;

pub use browser_app::BrowserApp;
pub use file_app::FilePlotApp;
pub use live_app::LiveApp;
pub use run::{run_browser, run_file_plot, run_live};

use egui::Color32;
use egui_plot::{Line, PlotUi, Points};

use crate::browse::Series;

/// Distinct color for the series at `index`.
pub(crate) fn series_color(index: usize) -> Color32 {
    const PALETTE: [Color32; 10] = [
        Color32::from_rgb(31, 119, 180),
        Color32::from_rgb(255, 127, 14),
        Color32::from_rgb(44, 160, 44),
        Color32::from_rgb(214, 39, 40),
        Color32::from_rgb(148, 103, 189),
        Color32::from_rgb(140, 86, 75),
        Color32::from_rgb(227, 119, 194),
        Color32::from_rgb(127, 127, 127),
        Color32::from_rgb(188, 189, 34),
        Color32::from_rgb(23, 190, 207),
    ];
    PALETTE[index % PALETTE.len()]
}

/// Draw a decoded file as a line, optionally with a marker at every sample.
pub(crate) fn draw_series(plot_ui: &mut PlotUi, series: &Series, color: Color32, markers: bool) {
    let pts = series.plot_points();
    if markers {
        plot_ui.points(
            Points::new(series.label.as_str(), pts.clone())
                .radius(2.5)
                .color(color),
        );
    }
    plot_ui.line(Line::new(series.label.as_str(), pts).color(color).width(1.5));
}
