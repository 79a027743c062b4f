use std::io::{self, Read};

use serde::{Deserialize, Serialize};
use tessera_types::{ContentHash, Version};

/// Outcome of re-reading a stored snapshot and checking it against its
/// metadata record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyReport {
    pub version: Version,
    pub actual_hash: ContentHash,
    pub actual_size: u64,
}

impl VerifyReport {
    pub fn hash_matches(&self) -> bool {
        self.actual_hash == self.version.content_hash
    }

    pub fn size_matches(&self) -> bool {
        self.actual_size == self.version.size
    }

    /// Returns `true` if the stored bytes are exactly what was recorded.
    pub fn is_intact(&self) -> bool {
        self.hash_matches() && self.size_matches()
    }
}

/// Passes reads through while counting the bytes they yield.
pub(crate) struct CountingReader<R> {
    inner: R,
    bytes: u64,
}

impl<R: Read> CountingReader<R> {
    pub(crate) fn new(inner: R) -> Self {
        Self { inner, bytes: 0 }
    }

    pub(crate) fn bytes_read(&self) -> u64 {
        self.bytes
    }
}

impl<R: Read> Read for CountingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.bytes += n as u64;
        Ok(n)
    }
}
