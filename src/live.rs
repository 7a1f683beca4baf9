//! Live session: serial producer thread plus the UI-side rolling view.
//!
//! Lifecycle: open the port, start the producer, run the UI, then on drop
//! raise the stop flag, close the channel and join the producer. The port is
//! released when the producer thread returns.

use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::config::LiveConfig;
use crate::error::{Error, Result};
use crate::rolling::RollingBuffer;
use crate::serial;
use crate::sink::{channel_samples, LiveMessage, StopReason};

/// State of the producer as seen from the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum ProducerState {
    Running,
    Stopped(StopReason),
}

/// UI-side end of the live pipeline: receiver plus the displayed window.
pub struct LiveView {
    rx: Option<Receiver<LiveMessage>>,
    buffer: RollingBuffer,
    state: ProducerState,
    received: u64,
}

impl LiveView {
    /// The window starts zero-filled so the chart always spans `capacity` points.
    pub fn new(rx: Receiver<LiveMessage>, capacity: usize) -> Self {
        Self {
            rx: Some(rx),
            buffer: RollingBuffer::zeroed(capacity),
            state: ProducerState::Running,
            received: 0,
        }
    }

    /// Move every message that is available right now into the window.
    ///
    /// Never blocks. Returns the number of samples taken.
    pub fn drain(&mut self) -> usize {
        let Some(rx) = &self.rx else {
            return 0;
        };
        let mut taken = 0;
        loop {
            match rx.try_recv() {
                Ok(LiveMessage::Sample(v)) => {
                    self.buffer.push(v);
                    taken += 1;
                }
                Ok(LiveMessage::Stopped(reason)) => self.state = ProducerState::Stopped(reason),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    // Producer vanished without a goodbye (e.g. it panicked).
                    if self.state == ProducerState::Running {
                        self.state = ProducerState::Stopped(StopReason::Disconnected);
                    }
                    break;
                }
            }
        }
        self.received += taken as u64;
        taken
    }

    pub fn buffer(&self) -> &RollingBuffer {
        &self.buffer
    }

    /// Current window as `[slot, value]` points.
    pub fn plot_points(&self) -> Vec<[f64; 2]> {
        self.buffer.plot_points()
    }

    pub fn state(&self) -> &ProducerState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == ProducerState::Running
    }

    /// Total samples taken since construction.
    pub fn received(&self) -> u64 {
        self.received
    }

    /// Reset the window to zeros. Does not affect the producer.
    pub fn clear(&mut self) {
        self.buffer.clear(true);
    }

    /// Drop the receiver so a producer blocked on a full channel wakes up.
    fn disconnect(&mut self) {
        self.rx = None;
    }
}

/// Owned context of a running live plot.
pub struct LiveSession {
    view: LiveView,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<StopReason>>,
}

impl LiveSession {
    /// Start a producer over any line-oriented reader.
    pub fn start<R>(reader: R, capacity: usize, channel_capacity: usize) -> Result<Self>
    where
        R: BufRead + Send + 'static,
    {
        let (sink, rx) = channel_samples(channel_capacity);
        let stop = Arc::new(AtomicBool::new(false));
        let handle = serial::spawn_reader(reader, sink, stop.clone()).map_err(Error::Thread)?;
        Ok(Self {
            view: LiveView::new(rx, capacity),
            stop,
            handle: Some(handle),
        })
    }

    /// Open the configured serial port and start reading from it.
    pub fn open(cfg: &LiveConfig) -> Result<Self> {
        cfg.validate()?;
        let reader = serial::open_reader(cfg)?;
        Self::start(reader, cfg.capacity, cfg.channel_capacity)
    }

    pub fn view(&self) -> &LiveView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut LiveView {
        &mut self.view
    }

    /// Wait for the producer to finish on its own. Returns `None` if it was already joined.
    ///
    /// Only use this when the source is known to end; the channel must have
    /// room for everything the producer still has to send.
    pub fn wait(&mut self) -> Option<StopReason> {
        let handle = self.handle.take()?;
        handle.join().ok()
    }

    /// Stop the producer and release the port.
    pub fn shutdown(mut self) -> Option<StopReason> {
        self.stop_producer()
    }

    fn stop_producer(&mut self) -> Option<StopReason> {
        let handle = self.handle.take()?;
        self.stop.store(true, Ordering::Relaxed);
        self.view.disconnect();
        match handle.join() {
            Ok(reason) => Some(reason),
            Err(_) => {
                tracing::error!("serial reader thread panicked");
                None
            }
        }
    }
}

impl Drop for LiveSession {
    fn drop(&mut self) {
        self.stop_producer();
    }
}
