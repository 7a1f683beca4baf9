//! bpmplot crate root: re-exports and module wiring.
//!
//! Plots heart-rate / ADC data with egui/eframe, either live from a serial
//! port or from recorded BPM sample files:
//! - `decode`: binary sample file decoder (`u16` LE, BPM * 100)
//! - `rolling`: fixed-capacity rolling window for the live chart
//! - `sink`: bounded channel between the serial thread and the UI
//! - `serial`: line reader that feeds the channel
//! - `live`: owned live session (producer thread + UI-side view)
//! - `browse`: directory listing and multi-file overlays
//! - `export`: CSV export of plotted series
//! - `app`: eframe windows and `run_*` entry points

pub mod app;
pub mod browse;
pub mod config;
pub mod decode;
pub mod error;
pub mod export;
pub mod live;
pub mod logging;
pub mod rolling;
pub mod serial;
pub mod sink;

// Public re-exports for a compact external API
pub use app::{run_browser, run_file_plot, run_live};
pub use browse::{list_sample_files, AxisRange, Overlay, Series};
pub use config::LiveConfig;
pub use decode::{decode_bytes, decode_samples, read_sample_file, BpmSamples};
pub use error::{Error, Result};
pub use live::{LiveSession, LiveView, ProducerState};
pub use rolling::RollingBuffer;
pub use sink::{channel_samples, LiveMessage, SampleSink, StopReason};
