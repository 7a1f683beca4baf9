//! CSV export of the plotted series.
//!
//! Rows are aligned by sample index: `index,<label1>,<label2>,...`. A series
//! shorter than the longest one leaves its cells empty. Labels are quoted
//! the RFC 4180 way when they contain a separator, quote or line break.

use std::borrow::Cow;
use std::io::Write;
use std::path::Path;

use crate::browse::Series;
use crate::error::{Error, Result};

/// Quote a header cell if it would otherwise split or break the row.
pub fn csv_field(text: &str) -> Cow<'_, str> {
    if text.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", text.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(text)
    }
}

pub fn write_series_csv<W: Write>(mut w: W, series: &[Series]) -> std::io::Result<()> {
    write!(w, "index")?;
    for s in series {
        write!(w, ",{}", csv_field(&s.label))?;
    }
    writeln!(w)?;
    let rows = series.iter().map(|s| s.values.len()).max().unwrap_or(0);
    for i in 0..rows {
        write!(w, "{i}")?;
        for s in series {
            match s.values.get(i) {
                Some(v) => write!(w, ",{v}")?,
                None => write!(w, ",")?,
            }
        }
        writeln!(w)?;
    }
    w.flush()
}

pub fn save_series_csv(path: impl AsRef<Path>, series: &[Series]) -> Result<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path).map_err(|e| Error::io(path, e))?;
    write_series_csv(std::io::BufWriter::new(file), series).map_err(|e| Error::io(path, e))?;
    tracing::info!(path = %path.display(), series = series.len(), "exported CSV");
    Ok(())
}

/// File name for an export made now, e.g. `bpm_export_20250101_120000.csv`.
pub fn timestamped_file_name(prefix: &str) -> String {
    format!("{prefix}_{}.csv", chrono::Local::now().format("%Y%m%d_%H%M%S"))
}
