use bpmplot::serial::*;
use bpmplot::sink::{channel_samples, LiveMessage, StopReason};
use std::collections::VecDeque;
use std::io::{self, BufReader, Cursor, Read};
use std::sync::atomic::AtomicBool;

/// Scripted serial port: each step is either data or an error.
struct Scripted(VecDeque<io::Result<Vec<u8>>>);

impl Scripted {
    fn new(steps: Vec<io::Result<Vec<u8>>>) -> Self {
        Scripted(steps.into())
    }
}

fn data(bytes: &[u8]) -> io::Result<Vec<u8>> {
    Ok(bytes.to_vec())
}

impl Read for Scripted {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.0.pop_front() {
            None => Ok(0),
            Some(Err(e)) => Err(e),
            Some(Ok(data)) => {
                let n = data.len().min(buf.len());
                buf[..n].copy_from_slice(&data[..n]);
                if n < data.len() {
                    self.0.push_front(Ok(data[n..].to_vec()));
                }
                Ok(n)
            }
        }
    }
}

fn timeout() -> io::Error {
    io::Error::new(io::ErrorKind::TimedOut, "timed out")
}

fn collect(rx: std::sync::mpsc::Receiver<LiveMessage>) -> (Vec<f64>, Vec<StopReason>) {
    let mut values = Vec::new();
    let mut stops = Vec::new();
    for msg in rx.try_iter() {
        match msg {
            LiveMessage::Sample(v) => values.push(v),
            LiveMessage::Stopped(r) => stops.push(r),
        }
    }
    (values, stops)
}

#[test]
fn parse_line_strips_whitespace() {
    assert_eq!(parse_line(b"  12.5\r\n"), Ok(Some(12.5)));
    assert_eq!(parse_line(b"-3\n"), Ok(Some(-3.0)));
    assert_eq!(parse_line(b"512"), Ok(Some(512.0)));
}

#[test]
fn parse_line_skips_blank_lines() {
    assert_eq!(parse_line(b"\n"), Ok(None));
    assert_eq!(parse_line(b" \t\r\n"), Ok(None));
    assert_eq!(parse_line(b""), Ok(None));
}

#[test]
fn parse_line_rejects_text() {
    assert_eq!(
        parse_line(b"abc\n"),
        Err(ParseError {
            line: "abc".to_string()
        })
    );
}

#[test]
fn parse_line_drops_invalid_utf8() {
    assert_eq!(parse_line(b"\xff42\n"), Ok(Some(42.0)));
}

#[test]
fn reader_forwards_values_until_eof() {
    let (sink, rx) = channel_samples(64);
    let stop = AtomicBool::new(false);
    let reason = run_reader(Cursor::new(b"1\n\n2.5\n 3 \n".to_vec()), &sink, &stop);
    assert_eq!(reason, StopReason::Eof);
    let (values, stops) = collect(rx);
    assert_eq!(values, vec![1.0, 2.5, 3.0]);
    assert_eq!(stops, vec![StopReason::Eof]);
}

#[test]
fn reader_stops_on_first_non_numeric_line() {
    let (sink, rx) = channel_samples(64);
    let stop = AtomicBool::new(false);
    let reason = run_reader(Cursor::new(b"1\n2\nERR\n3\n4\n".to_vec()), &sink, &stop);
    assert_eq!(
        reason,
        StopReason::Parse {
            line: "ERR".to_string()
        }
    );
    let (values, stops) = collect(rx);
    assert_eq!(values, vec![1.0, 2.0], "no values after the bad line");
    assert_eq!(stops.len(), 1);
    assert!(stops[0].is_failure());
}

#[test]
fn reader_survives_timeouts_without_losing_partial_line() {
    let port = Scripted::new(vec![
        data(b"12."),
        Err(timeout()),
        data(b"5\n"),
        Err(timeout()),
        Err(timeout()),
        data(b"7\n"),
    ]);
    let (sink, rx) = channel_samples(64);
    let stop = AtomicBool::new(false);
    let reason = run_reader(BufReader::new(port), &sink, &stop);
    assert_eq!(reason, StopReason::Eof);
    let (values, _) = collect(rx);
    assert_eq!(values, vec![12.5, 7.0]);
}

#[test]
fn line_reader_keeps_pending_bytes_across_timeout() {
    let port = Scripted::new(vec![data(b"4"), Err(timeout()), data(b"2\n")]);
    let mut lines = LineReader::new(BufReader::new(port));
    assert_eq!(lines.read_line().unwrap(), ReadOutcome::TimedOut);
    assert_eq!(lines.pending(), b"4");
    assert_eq!(lines.read_line().unwrap(), ReadOutcome::Line(b"42\n".to_vec()));
    assert_eq!(lines.read_line().unwrap(), ReadOutcome::Eof);
}

#[test]
fn last_line_without_newline_is_delivered() {
    let mut lines = LineReader::new(Cursor::new(b"5\n6".to_vec()));
    assert_eq!(lines.read_line().unwrap(), ReadOutcome::Line(b"5\n".to_vec()));
    assert_eq!(lines.read_line().unwrap(), ReadOutcome::Line(b"6".to_vec()));
    assert_eq!(lines.read_line().unwrap(), ReadOutcome::Eof);
}

#[test]
fn connection_error_stops_reader() {
    let port = Scripted::new(vec![
        data(b"1\n"),
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "device unplugged")),
        data(b"2\n"),
    ]);
    let (sink, rx) = channel_samples(64);
    let stop = AtomicBool::new(false);
    let reason = run_reader(BufReader::new(port), &sink, &stop);
    match &reason {
        StopReason::Io { kind, message } => {
            assert_eq!(*kind, io::ErrorKind::BrokenPipe);
            assert!(message.contains("unplugged"));
        }
        other => panic!("unexpected stop reason {other:?}"),
    }
    let (values, _) = collect(rx);
    assert_eq!(values, vec![1.0]);
}

#[test]
fn reader_stops_when_receiver_is_gone() {
    let (sink, rx) = channel_samples(4);
    drop(rx);
    let stop = AtomicBool::new(false);
    let reason = run_reader(Cursor::new(b"1\n2\n".to_vec()), &sink, &stop);
    assert_eq!(reason, StopReason::Disconnected);
}

#[test]
fn raised_stop_flag_cancels_before_reading() {
    let (sink, rx) = channel_samples(4);
    let stop = AtomicBool::new(true);
    let reason = run_reader(Cursor::new(b"1\n".to_vec()), &sink, &stop);
    assert_eq!(reason, StopReason::Cancelled);
    let (values, stops) = collect(rx);
    assert!(values.is_empty());
    assert_eq!(stops, vec![StopReason::Cancelled]);
}

#[test]
fn unterminated_input_is_cut_at_max_line_len() {
    let mut steps = Vec::new();
    for _ in 0..50 {
        steps.push(data(&[b'7'; 8192]));
        steps.push(Err(timeout()));
    }
    let mut lines = LineReader::new(BufReader::new(Scripted::new(steps)));
    for _ in 0..200 {
        match lines.read_line().unwrap() {
            ReadOutcome::Line(raw) => assert_eq!(raw.len(), MAX_LINE_LEN),
            ReadOutcome::TimedOut => {}
            ReadOutcome::Eof => break,
        }
        assert!(lines.pending().len() < MAX_LINE_LEN);
    }
}

#[test]
fn reader_stops_on_garbage_without_newlines() {
    let mut steps = Vec::new();
    for _ in 0..4 {
        steps.push(data(&[b'x'; 8192]));
        steps.push(Err(timeout()));
    }
    let (sink, rx) = channel_samples(64);
    let stop = AtomicBool::new(false);
    let reason = run_reader(BufReader::new(Scripted::new(steps)), &sink, &stop);
    match reason {
        StopReason::Parse { line } => assert_eq!(line.len(), MAX_LINE_LEN),
        other => panic!("unexpected stop reason {other:?}"),
    }
    let (values, _) = collect(rx);
    assert!(values.is_empty());
}
