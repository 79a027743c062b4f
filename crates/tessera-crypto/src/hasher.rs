use std::io::Read;

use sha2::{Digest, Sha256};
use tessera_types::ContentHash;

/// SHA-256 content hasher.
///
/// No domain separation is applied: the digest of a snapshot is the plain
/// SHA-256 of its bytes, so it can be checked with any standard tool.
#[derive(Clone, Default)]
pub struct ContentHasher {
    inner: Sha256,
}

impl ContentHasher {
    /// Create an incremental hasher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed more bytes into the digest.
    pub fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    /// Finish and return the digest.
    pub fn finalize(self) -> ContentHash {
        ContentHash::from_digest(self.inner.finalize().into())
    }

    /// Hash a complete byte slice.
    pub fn hash(data: &[u8]) -> ContentHash {
        ContentHash::from_digest(Sha256::digest(data).into())
    }

    /// Hash everything a reader yields.
    pub fn hash_reader<R: Read>(mut reader: R) -> Result<ContentHash, HasherError> {
        let mut hasher = Self::new();
        let mut buf = [0u8; 8192];
        loop {
            let n = reader.read(&mut buf).map_err(HasherError::Read)?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }
        Ok(hasher.finalize())
    }

    /// Verify that data produces the expected hash.
    pub fn verify(data: &[u8], expected: &ContentHash) -> bool {
        Self::hash(data) == *expected
    }
}

/// Errors from hashing operations.
#[derive(Debug, thiserror::Error)]
pub enum HasherError {
    #[error("failed to read input while hashing: {0}")]
    Read(#[source] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn hash_is_deterministic() {
        let data = b"hello world";
        assert_eq!(ContentHasher::hash(data), ContentHasher::hash(data));
    }

    #[test]
    fn different_content_produces_different_hashes() {
        assert_ne!(ContentHasher::hash(b"draft one"), ContentHasher::hash(b"draft two"));
    }

    #[test]
    fn known_sha256_vector() {
        // SHA-256("abc")
        let expected = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";
        assert_eq!(ContentHasher::hash(b"abc").to_hex(), expected);
    }

    #[test]
    fn empty_input_hash() {
        let expected = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
        assert_eq!(ContentHasher::hash(b"").to_hex(), expected);
    }

    #[test]
    fn incremental_matches_one_shot() {
        let mut hasher = ContentHasher::new();
        hasher.update(b"<p>chapter ");
        hasher.update(b"one</p>");
        assert_eq!(hasher.finalize(), ContentHasher::hash(b"<p>chapter one</p>"));
    }

    #[test]
    fn reader_matches_one_shot() {
        let data = vec![7u8; 20_000];
        let from_reader = ContentHasher::hash_reader(&data[..]).unwrap();
        assert_eq!(from_reader, ContentHasher::hash(&data));
    }

    #[test]
    fn verify_detects_tampering() {
        let hash = ContentHasher::hash(b"original");
        assert!(ContentHasher::verify(b"original", &hash));
        assert!(!ContentHasher::verify(b"tampered", &hash));
    }

    #[test]
    fn digest_hex_is_64_chars() {
        assert_eq!(hex::encode(ContentHasher::hash(b"x").as_bytes()).len(), 64);
    }

    proptest! {
        #[test]
        fn same_bytes_same_hash(data in proptest::collection::vec(any::<u8>(), 0..512)) {
            prop_assert_eq!(ContentHasher::hash(&data), ContentHasher::hash(&data.clone()));
        }
    }
}
