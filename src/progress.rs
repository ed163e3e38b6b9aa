//! Byte-count progress reporting for the input source. Planet extracts run
//! to tens of gigabytes, so consumers usually want a cheap signal of how far
//! the frame reader has advanced.

use std::io::{self, Read};

/// Default reporting interval: 8 MiB.
pub const DEFAULT_INTERVAL: u64 = 8 * 1024 * 1024;

/// A [`Read`] adapter that invokes a callback every time the cumulative
/// number of bytes read crosses another multiple of `interval`. Wrap the
/// byte source with this before handing it to [`crate::Decoder::new`].
///
/// If one read crosses several multiples at once the callback still fires
/// only once, with the current total.
pub struct ProgressReader<R, F>
where
    R: Read,
    F: FnMut(u64),
{
    inner: R,
    callback: F,
    interval: u64,
    total_read: u64,
    next_threshold: u64,
}

impl<R, F> ProgressReader<R, F>
where
    R: Read,
    F: FnMut(u64),
{
    pub fn new(inner: R, callback: F) -> Self {
        Self::with_interval(inner, DEFAULT_INTERVAL, callback)
    }

    /// `interval` is in bytes; zero falls back to [`DEFAULT_INTERVAL`].
    pub fn with_interval(inner: R, interval: u64, callback: F) -> Self {
        let interval = if interval == 0 {
            DEFAULT_INTERVAL
        } else {
            interval
        };
        Self {
            inner,
            callback,
            interval,
            total_read: 0,
            next_threshold: interval,
        }
    }

    /// Total number of bytes read so far.
    pub fn total_read(&self) -> u64 {
        self.total_read
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R, F> Read for ProgressReader<R, F>
where
    R: Read,
    F: FnMut(u64),
{
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        if n > 0 {
            self.total_read = self.total_read.saturating_add(n as u64);
            if self.total_read >= self.next_threshold {
                (self.callback)(self.total_read);
                // Skip thresholds a large read jumped over in one go.
                let crossed = self.total_read / self.interval;
                self.next_threshold = (crossed + 1).saturating_mul(self.interval);
            }
        }
        Ok(n)
    }
}
