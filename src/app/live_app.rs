//! Live chart window.

use egui::Color32;
use egui_plot::{Line, Plot};

use crate::config::LiveConfig;
use crate::live::{LiveSession, ProducerState};

use super::series_color;

/// Rolling chart of the serial stream.
///
/// Each frame drains the sample channel into the window and redraws it. When
/// the producer stops the last window stays on screen and the reason is shown
/// in the status bar.
pub struct LiveApp {
    session: LiveSession,
    cfg: LiveConfig,
    /// Frozen points shown while paused. Samples keep being ingested meanwhile.
    snapshot: Option<Vec<[f64; 2]>>,
}

impl LiveApp {
    pub fn new(session: LiveSession, cfg: LiveConfig) -> Self {
        Self {
            session,
            cfg,
            snapshot: None,
        }
    }

    pub fn session(&self) -> &LiveSession {
        &self.session
    }

    pub fn is_paused(&self) -> bool {
        self.snapshot.is_some()
    }

    pub fn toggle_pause(&mut self) {
        if self.snapshot.is_some() {
            self.snapshot = None;
        } else {
            self.snapshot = Some(self.session.view().plot_points());
        }
    }

    /// Drain pending samples and return the points to draw this frame.
    pub fn refresh(&mut self) -> Vec<[f64; 2]> {
        self.session.view_mut().drain();
        match &self.snapshot {
            Some(points) => points.clone(),
            None => self.session.view().plot_points(),
        }
    }

    fn status_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            match self.session.view().state() {
                ProducerState::Running => {
                    ui.colored_label(Color32::LIGHT_GREEN, format!("● {}", self.cfg.port));
                }
                ProducerState::Stopped(reason) => {
                    let color = if reason.is_failure() {
                        Color32::LIGHT_RED
                    } else {
                        Color32::GRAY
                    };
                    ui.colored_label(color, format!("■ {}: {reason}", self.cfg.port));
                }
            }
            ui.separator();
            let view = self.session.view();
            ui.label(format!("samples: {}", view.received()));
            if let Some(v) = view.buffer().latest() {
                ui.label(format!("last: {v:.2}"));
            }
            ui.separator();
            if ui
                .button(if self.is_paused() { "Resume" } else { "Pause" })
                .clicked()
            {
                self.toggle_pause();
            }
            if ui.button("Clear").clicked() {
                self.session.view_mut().clear();
                self.snapshot = None;
            }
        });
    }
}

impl eframe::App for LiveApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let points = self.refresh();

        egui::TopBottomPanel::top("live_status").show(ctx, |ui| {
            self.status_bar(ui);
        });

        let x_max = self.cfg.capacity as f64;
        let (y_min, y_max) = (self.cfg.y_min, self.cfg.y_max);
        egui::CentralPanel::default().show(ctx, |ui| {
            Plot::new("live_plot")
                .allow_scroll(false)
                .allow_zoom(false)
                .allow_drag(false)
                .x_axis_label("Sample")
                .y_axis_label("ADC value")
                .show(ui, |plot_ui| {
                    plot_ui.set_plot_bounds_x(0.0..=x_max);
                    plot_ui.set_plot_bounds_y(y_min..=y_max);
                    plot_ui.line(Line::new("ADC Values", points).color(series_color(0)));
                });
        });

        ctx.request_repaint_after(self.cfg.refresh());
    }
}
