//! Realtime EKG/ADC chart from a serial port.
//!
//! The device is expected to print one decimal number per line. Settings come
//! from the defaults, then an optional JSON file (`--config`), then flags.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use bpmplot::serial::list_ports;
use bpmplot::{run_live, LiveConfig, LiveSession};
use clap::{ArgAction, Parser, ValueHint};

#[derive(Parser, Debug)]
#[command(name = "ekg-live", version, about = "Realtime EKG/ADC serial plot")]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Serial device (default /dev/ttyUSB0)
    #[arg(short, long)]
    port: Option<String>,

    /// Baud rate (default 115200)
    #[arg(short, long)]
    baud: Option<u32>,

    /// Read timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Number of samples in the rolling window
    #[arg(long)]
    capacity: Option<usize>,

    /// Fixed lower bound of the Y axis
    #[arg(long, allow_negative_numbers = true)]
    y_min: Option<f64>,

    /// Fixed upper bound of the Y axis
    #[arg(long, allow_negative_numbers = true)]
    y_max: Option<f64>,

    /// Print the available serial ports and exit
    #[arg(long, action = ArgAction::SetTrue)]
    list_ports: bool,

    /// Print the effective configuration as JSON and exit
    #[arg(long, action = ArgAction::SetTrue)]
    print_config: bool,
}

impl Cli {
    fn live_config(&self) -> Result<LiveConfig> {
        let mut cfg = match &self.config {
            Some(path) => LiveConfig::load(path)?,
            None => LiveConfig::default(),
        };
        if let Some(port) = &self.port {
            cfg.port = port.clone();
        }
        if let Some(baud) = self.baud {
            cfg.baud_rate = baud;
        }
        if let Some(ms) = self.timeout_ms {
            cfg.timeout_ms = ms;
        }
        if let Some(capacity) = self.capacity {
            cfg.capacity = capacity;
        }
        if let Some(y) = self.y_min {
            cfg.y_min = y;
        }
        if let Some(y) = self.y_max {
            cfg.y_max = y;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

fn run(cli: Cli) -> Result<()> {
    if cli.list_ports {
        for name in list_ports()? {
            println!("{name}");
        }
        return Ok(());
    }

    let cfg = cli.live_config()?;
    if cli.print_config {
        println!("{}", cfg.to_json()?);
        return Ok(());
    }

    let session =
        LiveSession::open(&cfg).with_context(|| format!("opening serial port {}", cfg.port))?;
    run_live(session, cfg).map_err(|e| anyhow!("window error: {e}"))
}

fn main() -> ExitCode {
    bpmplot::logging::init();
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}
