//! Directory browser window: file list on the right, overlaid chart in the middle.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use egui::Color32;
use egui_plot::{Legend, Plot};

use crate::browse::{list_sample_files, y_bounds, AxisRange, Overlay};
use crate::error::Result;
use crate::export::{save_series_csv, timestamped_file_name};

use super::{draw_series, series_color};

pub struct BrowserApp {
    dir: PathBuf,
    /// Text of the directory field; applied on "Open".
    pub dir_input: String,
    files: Vec<String>,
    selected: BTreeSet<String>,
    overlay: Overlay,
    pub auto_scale: bool,
    pub y_min_text: String,
    pub y_max_text: String,
    pub show_markers: bool,
    /// Last message for the status line, `Err` shown in red.
    status: Option<std::result::Result<String, String>>,
    /// Y range last forced onto the chart.
    applied_bounds: Option<AxisRange>,
    reset_view: bool,
}

impl BrowserApp {
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let files = list_sample_files(dir)?;
        tracing::info!(dir = %dir.display(), files = files.len(), "listed sample files");
        Ok(Self {
            dir: dir.to_path_buf(),
            dir_input: dir.display().to_string(),
            files,
            selected: BTreeSet::new(),
            overlay: Overlay::default(),
            auto_scale: true,
            y_min_text: String::new(),
            y_max_text: String::new(),
            show_markers: true,
            status: None,
            applied_bounds: None,
            reset_view: true,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selected.contains(name)
    }

    /// Switch to another directory. On failure the current listing is kept.
    pub fn load_directory(&mut self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        let files = list_sample_files(dir)?;
        tracing::info!(dir = %dir.display(), files = files.len(), "listed sample files");
        self.dir = dir.to_path_buf();
        self.dir_input = dir.display().to_string();
        self.files = files;
        self.selected.clear();
        self.overlay = Overlay::default();
        self.reset_view = true;
        Ok(())
    }

    /// Add or remove a file from the selection and re-decode the overlay.
    pub fn toggle_file(&mut self, name: &str) {
        if !self.selected.remove(name) {
            self.selected.insert(name.to_string());
        }
        self.reload_overlay();
    }

    /// Decode the selected files again, in list order.
    pub fn reload_overlay(&mut self) {
        let names: Vec<&String> = self
            .files
            .iter()
            .filter(|f| self.selected.contains(f.as_str()))
            .collect();
        self.overlay = Overlay::load(&self.dir, &names);
        self.reset_view = true;
        self.status = if self.overlay.errors.is_empty() {
            None
        } else {
            let msg = self
                .overlay
                .errors
                .iter()
                .map(|(name, err)| format!("{name}: {err}"))
                .collect::<Vec<_>>()
                .join("; ");
            Some(Err(msg))
        };
    }

    /// View reset due this frame, if any.
    ///
    /// Returns `Some` after the selection or the Y range changed, carrying the
    /// range to force (`None` inside means automatic bounds). Between changes
    /// the chart is left alone so it can be zoomed and dragged.
    pub fn take_view_reset(&mut self) -> Option<Option<AxisRange>> {
        let bounds = y_bounds(self.auto_scale, &self.y_min_text, &self.y_max_text);
        if bounds != self.applied_bounds {
            self.applied_bounds = bounds;
            self.reset_view = true;
        }
        std::mem::take(&mut self.reset_view).then_some(bounds)
    }

    /// Write the plotted series as CSV into the browsed directory.
    pub fn export_csv(&mut self) -> Result<PathBuf> {
        let path = self.dir.join(timestamped_file_name("bpm_export"));
        save_series_csv(&path, &self.overlay.series)?;
        Ok(path)
    }

    fn directory_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Directory:");
            let resp = ui.text_edit_singleline(&mut self.dir_input);
            let enter = resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Open").clicked() || enter {
                let target = PathBuf::from(self.dir_input.trim());
                if let Err(e) = self.load_directory(&target) {
                    self.status = Some(Err(e.to_string()));
                }
            }
            if ui.button("Refresh").clicked() {
                let current = self.dir.clone();
                if let Err(e) = self.load_directory(&current) {
                    self.status = Some(Err(e.to_string()));
                }
            }
        });
    }

    fn y_controls(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("y_controls").num_columns(2).show(ui, |ui| {
            ui.label("Min Y (BPM):");
            ui.add(egui::TextEdit::singleline(&mut self.y_min_text).desired_width(70.0));
            ui.end_row();
            ui.label("Max Y (BPM):");
            ui.add(egui::TextEdit::singleline(&mut self.y_max_text).desired_width(70.0));
            ui.end_row();
        });
        ui.checkbox(&mut self.auto_scale, "Auto scale");
        ui.checkbox(&mut self.show_markers, "Markers");
    }

    fn file_list(&mut self, ui: &mut egui::Ui) {
        let mut clicked: Option<String> = None;
        egui::ScrollArea::vertical().show(ui, |ui| {
            if self.files.is_empty() {
                ui.weak("no sample files");
            }
            for name in &self.files {
                if ui
                    .selectable_label(self.selected.contains(name.as_str()), name.as_str())
                    .clicked()
                {
                    clicked = Some(name.clone());
                }
            }
        });
        if let Some(name) = clicked {
            self.toggle_file(&name);
        }
    }
}

impl eframe::App for BrowserApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("browser_dir").show(ctx, |ui| {
            self.directory_bar(ui);
        });

        egui::TopBottomPanel::bottom("browser_status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!(
                    "{} file(s), {} plotted",
                    self.files.len(),
                    self.overlay.series.len()
                ));
                if ui
                    .add_enabled(!self.overlay.is_empty(), egui::Button::new("Export CSV"))
                    .clicked()
                {
                    self.status = Some(match self.export_csv() {
                        Ok(path) => Ok(format!("saved {}", path.display())),
                        Err(e) => Err(e.to_string()),
                    });
                }
                match &self.status {
                    Some(Ok(msg)) => {
                        ui.label(msg.as_str());
                    }
                    Some(Err(msg)) => {
                        ui.colored_label(Color32::LIGHT_RED, msg.as_str());
                    }
                    None => {}
                }
            });
        });

        egui::SidePanel::right("browser_files")
            .resizable(true)
            .default_width(240.0)
            .show(ctx, |ui| {
                self.y_controls(ui);
                ui.separator();
                self.file_list(ui);
            });

        let reset = self.take_view_reset();
        let title = if self.overlay.series.len() > 1 {
            "BPM file comparison"
        } else {
            "Chart BPM"
        };
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(title);
            let mut plot = Plot::new("browser_plot")
                .legend(Legend::default())
                .x_axis_label("Sample number")
                .y_axis_label("BPM");
            if reset.is_some() {
                plot = plot.reset();
            }
            plot.show(ui, |plot_ui| {
                for (i, series) in self.overlay.series.iter().enumerate() {
                    draw_series(plot_ui, series, series_color(i), self.show_markers);
                }
                if let Some(Some(range)) = reset {
                    plot_ui.set_plot_bounds_y(range.min..=range.max);
                }
            });
        });
    }
}
