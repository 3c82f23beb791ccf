//! Content digests for generated-file banners.
//!
//! Generated files carry the SHA-256 of the canonical input they were
//! produced from instead of a timestamp, so regenerating from the same
//! input is byte-identical and stale output can still be detected.

use sha2::{Digest, Sha256};

/// A SHA-256 hex digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentDigest(String);

impl ContentDigest {
    /// Compute the SHA-256 digest of the given data.
    pub fn compute(data: &[u8]) -> Self {
        let digest = Sha256::digest(data);
        ContentDigest(digest.iter().map(|b| format!("{b:02x}")).collect())
    }

    /// First 12 hex characters, enough for a banner line.
    pub fn short(&self) -> &str {
        &self.0[..12]
    }
}
