//! Plot one recorded BPM sample file.
//!
//! Usage: `bpm-plot <file>`. Exits with status 1 when the argument is
//! missing, the file cannot be read, or it holds no complete sample.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{anyhow, Context};
use bpmplot::{run_file_plot, Series};
use clap::{CommandFactory, Parser};

#[derive(Parser, Debug)]
#[command(name = "bpm-plot", version, about = "Plot heart rate (BPM) from a sample file")]
struct Cli {
    /// Sample file (2-byte little-endian records, BPM * 100)
    file: Option<PathBuf>,
}

fn run(path: &Path) -> anyhow::Result<()> {
    let series = Series::load(path).with_context(|| format!("loading {}", path.display()))?;
    tracing::info!(file = %path.display(), samples = series.values.len(), "plotting");
    run_file_plot(series).map_err(|e| anyhow!("window error: {e}"))
}

fn main() -> ExitCode {
    bpmplot::logging::init();
    let cli = Cli::parse();

    let Some(path) = cli.file else {
        eprintln!("{}", Cli::command().render_usage());
        return ExitCode::from(1);
    };

    match run(&path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}
