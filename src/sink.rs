//! Channel types for feeding live samples into the plotter UI.
//!
//! The serial producer owns a [`SampleSink`] and the UI owns the matching
//! `Receiver<LiveMessage>`. The channel is bounded: a producer that gets too
//! far ahead of the redraw loop blocks until the UI has drained it.

use std::fmt;
use std::sync::mpsc::{sync_channel, Receiver, SendError, SyncSender};

/// Default number of in-flight messages between producer and UI.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 4096;

/// Why the producer stopped. Sent once, as the last message on the channel.
#[derive(Debug, Clone, PartialEq)]
pub enum StopReason {
    /// The stream ended.
    Eof,
    /// A non-empty line was not a number.
    Parse { line: String },
    /// The connection failed.
    Io { kind: std::io::ErrorKind, message: String },
    /// The other end of the channel went away.
    Disconnected,
    /// The owner asked the producer to stop.
    Cancelled,
}

impl StopReason {
    pub fn io(err: &std::io::Error) -> Self {
        StopReason::Io {
            kind: err.kind(),
            message: err.to_string(),
        }
    }

    /// True for the reasons that indicate a problem with the data source.
    pub fn is_failure(&self) -> bool {
        matches!(self, StopReason::Parse { .. } | StopReason::Io { .. })
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::Eof => write!(f, "end of stream"),
            StopReason::Parse { line } => write!(f, "not a number: {line:?}"),
            StopReason::Io { message, .. } => write!(f, "connection error: {message}"),
            StopReason::Disconnected => write!(f, "sample channel closed"),
            StopReason::Cancelled => write!(f, "stopped"),
        }
    }
}

/// Messages sent over the channel to drive the live view.
#[derive(Debug, Clone, PartialEq)]
pub enum LiveMessage {
    /// One decoded sample.
    Sample(f64),
    /// The producer has terminated; no further messages follow.
    Stopped(StopReason),
}

/// Producer-side handle of the sample channel.
#[derive(Clone)]
pub struct SampleSink {
    tx: SyncSender<LiveMessage>,
}

impl SampleSink {
    /// Send one sample, blocking while the channel is full.
    pub fn send_value(&self, value: f64) -> Result<(), SendError<LiveMessage>> {
        self.tx.send(LiveMessage::Sample(value))
    }

    /// Report termination. Errors are ignored: a missing receiver has nothing to report to.
    pub fn send_stopped(&self, reason: StopReason) {
        let _ = self.tx.send(LiveMessage::Stopped(reason));
    }
}

/// Create a bounded sample channel.
pub fn channel_samples(capacity: usize) -> (SampleSink, Receiver<LiveMessage>) {
    let (tx, rx) = sync_channel(capacity);
    (SampleSink { tx }, rx)
}
