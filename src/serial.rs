//! Serial line reader for the live view.
//!
//! The device prints one decimal number per line. The reader runs on its own
//! thread, forwards every value into a [`SampleSink`] and stops for good on
//! the first line that is not a number or on a connection failure. It never
//! retries; the reason it stopped is logged and sent to the UI.

use std::io::{self, BufRead, BufReader, ErrorKind};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};
use tracing::{debug, info, warn};

use crate::config::LiveConfig;
use crate::error::Result;
use crate::sink::{SampleSink, StopReason};

/// A non-empty line that did not parse as a number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub line: String,
}

/// Parse one received line.
///
/// Invalid UTF-8 is dropped and surrounding whitespace stripped. Returns
/// `Ok(None)` for blank lines.
pub fn parse_line(raw: &[u8]) -> std::result::Result<Option<f64>, ParseError> {
    let text = String::from_utf8_lossy(raw).replace(char::REPLACEMENT_CHARACTER, "");
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed.parse::<f64>().map(Some).map_err(|_| ParseError {
        line: trimmed.to_string(),
    })
}

/// Result of one [`LineReader::read_line`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// A complete line (terminator included when present).
    Line(Vec<u8>),
    /// The read timed out; any partial line is kept for the next call.
    TimedOut,
    Eof,
}

fn is_timeout(err: &io::Error) -> bool {
    matches!(err.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock)
}

/// Longest line kept before it is handed over unterminated.
pub const MAX_LINE_LEN: usize = 1024;

/// Newline framing over a blocking reader with a read timeout.
///
/// A line reaching [`MAX_LINE_LEN`] bytes without a newline is cut there and
/// returned unterminated.
pub struct LineReader<R> {
    reader: R,
    pending: Vec<u8>,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: Vec::new(),
        }
    }

    pub fn read_line(&mut self) -> io::Result<ReadOutcome> {
        loop {
            let available = match self.reader.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) if is_timeout(&e) => return Ok(ReadOutcome::TimedOut),
                Err(e) => return Err(e),
            };
            if available.is_empty() {
                // The stream ended, possibly mid-line.
                if self.pending.is_empty() {
                    return Ok(ReadOutcome::Eof);
                }
                return Ok(ReadOutcome::Line(std::mem::take(&mut self.pending)));
            }
            let room = MAX_LINE_LEN - self.pending.len();
            let (used, complete) = match available.iter().position(|&b| b == b'\n') {
                Some(i) if i < room => (i + 1, true),
                _ => {
                    let n = available.len().min(room);
                    (n, n == room)
                }
            };
            self.pending.extend_from_slice(&available[..used]);
            self.reader.consume(used);
            if complete {
                return Ok(ReadOutcome::Line(std::mem::take(&mut self.pending)));
            }
        }
    }

    /// Bytes of an incomplete line carried over from a timed-out read.
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }
}

/// Read lines until something stops the reader, forwarding values to `sink`.
///
/// The stop reason is sent as the final message and returned.
pub fn run_reader<R: BufRead>(reader: R, sink: &SampleSink, stop: &AtomicBool) -> StopReason {
    let reason = read_until_stopped(LineReader::new(reader), sink, stop);
    if reason.is_failure() {
        warn!(%reason, "serial reader stopped");
    } else {
        info!(%reason, "serial reader stopped");
    }
    sink.send_stopped(reason.clone());
    reason
}

fn read_until_stopped<R: BufRead>(
    mut lines: LineReader<R>,
    sink: &SampleSink,
    stop: &AtomicBool,
) -> StopReason {
    let mut count: u64 = 0;
    loop {
        if stop.load(Ordering::Relaxed) {
            return StopReason::Cancelled;
        }
        let raw = match lines.read_line() {
            Ok(ReadOutcome::Line(raw)) => raw,
            Ok(ReadOutcome::TimedOut) => continue,
            Ok(ReadOutcome::Eof) => return StopReason::Eof,
            Err(e) => return StopReason::io(&e),
        };
        match parse_line(&raw) {
            Ok(Some(value)) => {
                if sink.send_value(value).is_err() {
                    return StopReason::Disconnected;
                }
                count += 1;
                if count % 10_000 == 0 {
                    debug!(count, "samples received");
                }
            }
            Ok(None) => {}
            Err(ParseError { line }) => return StopReason::Parse { line },
        }
    }
}

/// Run [`run_reader`] on a dedicated thread.
pub fn spawn_reader<R>(
    reader: R,
    sink: SampleSink,
    stop: Arc<AtomicBool>,
) -> io::Result<JoinHandle<StopReason>>
where
    R: BufRead + Send + 'static,
{
    std::thread::Builder::new()
        .name("serial-reader".into())
        .spawn(move || run_reader(reader, &sink, &stop))
}

/// Open the configured serial port (8N1, no flow control).
pub fn open_port(cfg: &LiveConfig) -> Result<Box<dyn SerialPort>> {
    let port = serialport::new(cfg.port.as_str(), cfg.baud_rate)
        .timeout(cfg.timeout())
        .data_bits(DataBits::Eight)
        .stop_bits(StopBits::One)
        .parity(Parity::None)
        .flow_control(FlowControl::None)
        .open()?;
    info!(port = %cfg.port, baud = cfg.baud_rate, "opened serial port");
    Ok(port)
}

/// Open the port and wrap it for line reading.
pub fn open_reader(cfg: &LiveConfig) -> Result<BufReader<Box<dyn SerialPort>>> {
    Ok(BufReader::new(open_port(cfg)?))
}

/// Names of the serial ports present on this machine.
pub fn list_ports() -> Result<Vec<String>> {
    let ports = serialport::available_ports()?;
    Ok(ports.into_iter().map(|p| p.port_name).collect())
}
