//! Entry points that open a native window and block until it is closed.

use crate::browse::Series;
use crate::config::LiveConfig;
use crate::live::LiveSession;

use super::{BrowserApp, FilePlotApp, LiveApp};

fn native_options(width: f32, height: f32) -> eframe::NativeOptions {
    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(egui::vec2(width, height)),
        ..Default::default()
    }
}

/// Show the live chart for an already started session.
///
/// The session is dropped, stopping the serial thread and closing the port,
/// when the window closes.
pub fn run_live(session: LiveSession, cfg: LiveConfig) -> eframe::Result<()> {
    let title = cfg.title.clone();
    let app = LiveApp::new(session, cfg);
    eframe::run_native(
        &title,
        native_options(800.0, 400.0),
        Box::new(|_cc| Ok(Box::new(app))),
    )
}

/// Show the directory browser.
pub fn run_browser(app: BrowserApp) -> eframe::Result<()> {
    eframe::run_native(
        "BPM File Viewer",
        native_options(1100.0, 600.0),
        Box::new(|_cc| Ok(Box::new(app))),
    )
}

/// Show one decoded file.
pub fn run_file_plot(series: Series) -> eframe::Result<()> {
    let title = format!("BPM - {}", series.label);
    eframe::run_native(
        &title,
        native_options(1000.0, 500.0),
        Box::new(|_cc| Ok(Box::new(FilePlotApp::new(series)))),
    )
}
