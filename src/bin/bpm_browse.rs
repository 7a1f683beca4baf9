//! Browse a directory of BPM sample files and overlay any selection.
//!
//! Usage: `bpm-browse [dir]`. Starts in the current directory when no path is
//! given; exits with status 1 if the path is not an existing directory.

use std::path::PathBuf;
use std::process::ExitCode;

use bpmplot::app::BrowserApp;
use bpmplot::run_browser;
use clap::{Parser, ValueHint};

#[derive(Parser, Debug)]
#[command(name = "bpm-browse", version, about = "BPM sample file viewer")]
struct Cli {
    /// Directory with .bin/.dat/.raw/.txt sample files
    #[arg(value_hint = ValueHint::DirPath)]
    dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    bpmplot::logging::init();
    let cli = Cli::parse();
    let dir = cli.dir.unwrap_or_else(|| PathBuf::from("."));

    let app = match BrowserApp::new(&dir) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };

    match run_browser(app) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("window error: {e}");
            ExitCode::from(1)
        }
    }
}
