use bpmplot::live::{LiveSession, LiveView, ProducerState};
use bpmplot::sink::{channel_samples, StopReason};
use std::io::{self, BufReader, Cursor, Read};
use std::time::Duration;

/// Never produces data; every read times out after a short nap.
struct Silent;

impl Read for Silent {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        std::thread::sleep(Duration::from_millis(1));
        Err(io::Error::new(io::ErrorKind::TimedOut, "timed out"))
    }
}

/// Endless stream of `1\n`.
struct Endless;

impl Read for Endless {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        for (i, b) in buf.iter_mut().enumerate() {
            *b = if i % 2 == 0 { b'1' } else { b'\n' };
        }
        Ok(buf.len() - buf.len() % 2)
    }
}

#[test]
fn drain_moves_all_available_samples_into_window() {
    let (sink, rx) = channel_samples(16);
    let mut view = LiveView::new(rx, 4);
    for v in [1.0, 2.0, 3.0] {
        sink.send_value(v).unwrap();
    }
    assert_eq!(view.drain(), 3);
    assert_eq!(view.buffer().to_vec(), vec![0.0, 1.0, 2.0, 3.0]);
    assert_eq!(view.drain(), 0, "nothing new since last drain");
    assert!(view.is_running());
    assert_eq!(view.received(), 3);
}

#[test]
fn drain_records_stop_reason_and_keeps_window() {
    let (sink, rx) = channel_samples(16);
    let mut view = LiveView::new(rx, 3);
    sink.send_value(7.0).unwrap();
    sink.send_stopped(StopReason::Parse {
        line: "x".to_string(),
    });
    drop(sink);
    view.drain();
    assert_eq!(
        view.state(),
        &ProducerState::Stopped(StopReason::Parse {
            line: "x".to_string()
        })
    );
    assert_eq!(view.buffer().to_vec(), vec![0.0, 0.0, 7.0]);
    // Later frames keep showing the frozen window.
    view.drain();
    assert_eq!(view.plot_points(), vec![[0.0, 0.0], [1.0, 0.0], [2.0, 7.0]]);
}

#[test]
fn vanished_producer_counts_as_disconnected() {
    let (sink, rx) = channel_samples(4);
    let mut view = LiveView::new(rx, 2);
    drop(sink);
    view.drain();
    assert_eq!(view.state(), &ProducerState::Stopped(StopReason::Disconnected));
}

#[test]
fn session_reads_to_end_of_stream() {
    let mut session = LiveSession::start(Cursor::new(b"1\n2\n3\n".to_vec()), 5, 64).unwrap();
    assert_eq!(session.wait(), Some(StopReason::Eof));
    let view = session.view_mut();
    assert_eq!(view.drain(), 3);
    assert_eq!(view.buffer().to_vec(), vec![0.0, 0.0, 1.0, 2.0, 3.0]);
    assert_eq!(view.state(), &ProducerState::Stopped(StopReason::Eof));
}

#[test]
fn session_surfaces_parse_failure() {
    let mut session = LiveSession::start(Cursor::new(b"10\noops\n20\n".to_vec()), 3, 64).unwrap();
    session.wait();
    let view = session.view_mut();
    view.drain();
    assert_eq!(view.buffer().to_vec(), vec![0.0, 0.0, 10.0]);
    match view.state() {
        ProducerState::Stopped(reason) => assert!(reason.is_failure()),
        ProducerState::Running => panic!("producer should have stopped"),
    }
}

#[test]
fn shutdown_cancels_idle_producer() {
    let session = LiveSession::start(BufReader::new(Silent), 10, 16).unwrap();
    assert_eq!(session.shutdown(), Some(StopReason::Cancelled));
}

#[test]
fn shutdown_unblocks_producer_on_full_channel() {
    let session = LiveSession::start(BufReader::new(Endless), 10, 1).unwrap();
    std::thread::sleep(Duration::from_millis(20));
    let reason = session.shutdown().expect("producer joined");
    assert!(
        matches!(reason, StopReason::Disconnected | StopReason::Cancelled),
        "unexpected stop reason {reason:?}"
    );
}

#[test]
fn dropping_session_joins_producer() {
    let session = LiveSession::start(BufReader::new(Silent), 10, 16).unwrap();
    drop(session);
}
