//! Directory browsing and multi-file overlays for recorded sample files.

use std::path::{Path, PathBuf};

use crate::decode::read_sample_file;
use crate::error::{Error, Result};

/// File name suffixes accepted as sample files (compared case-insensitively).
pub const SAMPLE_EXTENSIONS: [&str; 4] = [".bin", ".dat", ".raw", ".txt"];

/// True if `name` carries one of the [`SAMPLE_EXTENSIONS`].
pub fn is_sample_file_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    SAMPLE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Fail unless `dir` exists and is a directory.
pub fn ensure_directory(dir: impl AsRef<Path>) -> Result<PathBuf> {
    let dir = dir.as_ref();
    if dir.is_dir() {
        Ok(dir.to_path_buf())
    } else {
        Err(Error::NotADirectory(dir.to_path_buf()))
    }
}

/// Sample files in `dir`, sorted by name. Subdirectories are skipped.
pub fn list_sample_files(dir: impl AsRef<Path>) -> Result<Vec<String>> {
    let dir = ensure_directory(dir)?;
    let entries = std::fs::read_dir(&dir).map_err(|e| Error::io(&dir, e))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(&dir, e))?;
        if entry.path().is_dir() {
            continue;
        }
        // Names that are not valid UTF-8 cannot be shown in the list anyway.
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if is_sample_file_name(&name) {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

/// One decoded file, ready to plot.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub values: Vec<f64>,
}

impl Series {
    /// Decode a sample file, labelled with its file name.
    ///
    /// A file without a single complete record is [`Error::EmptyFile`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let values = read_sample_file(path)?;
        if values.is_empty() {
            return Err(Error::EmptyFile(path.to_path_buf()));
        }
        let label = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { label, values })
    }

    /// `[sample number, bpm]` points.
    pub fn plot_points(&self) -> Vec<[f64; 2]> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, &v)| [i as f64, v])
            .collect()
    }
}

/// Several files decoded for display on one shared chart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overlay {
    pub series: Vec<Series>,
    /// Files that could not be read, with the error text.
    pub errors: Vec<(String, String)>,
}

impl Overlay {
    /// Decode each selected file independently.
    ///
    /// A failing file is recorded in `errors`; an empty file is skipped.
    pub fn load<S: AsRef<str>>(dir: impl AsRef<Path>, names: &[S]) -> Self {
        let dir = dir.as_ref();
        let mut overlay = Overlay::default();
        for name in names {
            let name = name.as_ref();
            match Series::load(dir.join(name)) {
                Ok(series) => overlay.series.push(series),
                Err(Error::EmptyFile(_)) => {
                    tracing::debug!(file = name, "skipping empty sample file");
                }
                Err(e) => {
                    tracing::warn!(file = name, error = %e, "failed to read sample file");
                    overlay.errors.push((name.to_string(), e.to_string()));
                }
            }
        }
        overlay
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Length of the longest series.
    pub fn max_len(&self) -> usize {
        self.series.iter().map(|s| s.values.len()).max().unwrap_or(0)
    }
}

/// A user-supplied vertical axis range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    /// `None` unless both bounds are finite numbers with `min < max`.
    pub fn new(min: f64, max: f64) -> Option<Self> {
        (min.is_finite() && max.is_finite() && min < max).then_some(Self { min, max })
    }

    /// Parse text field contents. Anything unusable yields `None`.
    pub fn parse(min: &str, max: &str) -> Option<Self> {
        let min = min.trim().parse::<f64>().ok()?;
        let max = max.trim().parse::<f64>().ok()?;
        Self::new(min, max)
    }
}

/// Y bounds to clip the chart to, or `None` for automatic scaling.
pub fn y_bounds(auto_scale: bool, min: &str, max: &str) -> Option<AxisRange> {
    if auto_scale {
        None
    } else {
        AxisRange::parse(min, max)
    }
}
