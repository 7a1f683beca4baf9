//! Decoder for recorded BPM sample files.
//!
//! A sample file is a flat run of 2-byte little-endian `u16` records, each
//! holding BPM scaled by 100. There is no header and no checksum; the stream
//! ends at the first short read. A trailing odd byte is dropped.

use std::fs::File;
use std::io::{self, BufReader, ErrorKind, Read};
use std::path::Path;

use crate::error::{Error, Result};

/// Size in bytes of one encoded record.
pub const RECORD_SIZE: usize = 2;

/// Fixed-point scale factor: stored value = BPM * `BPM_SCALE`.
pub const BPM_SCALE: f64 = 100.0;

/// Convert one raw record to BPM.
#[inline]
pub fn decode_record(bytes: [u8; RECORD_SIZE]) -> f64 {
    u16::from_le_bytes(bytes) as f64 / BPM_SCALE
}

/// Lazy iterator over the samples of a byte stream.
///
/// Yields `Err` at most once; after an error or the end of the stream it
/// keeps returning `None`. Reopen the source to start over.
pub struct BpmSamples<R> {
    reader: R,
    done: bool,
}

impl<R: Read> BpmSamples<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            done: false,
        }
    }

    /// Fill one record, tolerating partial reads. `Ok(false)` means the
    /// stream ended before a full record was available.
    fn read_record(&mut self, buf: &mut [u8; RECORD_SIZE]) -> io::Result<bool> {
        let mut filled = 0;
        while filled < RECORD_SIZE {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => return Ok(false),
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(true)
    }
}

impl<R: Read> Iterator for BpmSamples<R> {
    type Item = io::Result<f64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let mut buf = [0u8; RECORD_SIZE];
        match self.read_record(&mut buf) {
            Ok(true) => Some(Ok(decode_record(buf))),
            Ok(false) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: Read> std::iter::FusedIterator for BpmSamples<R> {}

/// Decode a whole stream. On error the already decoded prefix is discarded.
pub fn decode_samples<R: Read>(reader: R) -> io::Result<Vec<f64>> {
    BpmSamples::new(reader).collect()
}

/// Decode an in-memory buffer.
pub fn decode_bytes(bytes: &[u8]) -> Vec<f64> {
    bytes
        .chunks_exact(RECORD_SIZE)
        .map(|c| decode_record([c[0], c[1]]))
        .collect()
}

/// Open and decode a sample file.
pub fn read_sample_file(path: impl AsRef<Path>) -> Result<Vec<f64>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let samples = decode_samples(BufReader::new(file)).map_err(|e| Error::io(path, e))?;
    tracing::debug!(path = %path.display(), samples = samples.len(), "decoded sample file");
    Ok(samples)
}
