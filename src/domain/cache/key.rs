//! Cache key derivation

use std::fmt;

use sha2::{Digest, Sha256};

/// Fixed-length digest identifying a cached text.
///
/// The raw text is hashed as-is; inputs that differ only in case or
/// whitespace get different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Hex-encoded SHA-256 of the UTF-8 bytes of `text`
    pub fn for_text(text: &str) -> Self {
        let digest = Sha256::digest(text.as_bytes());
        Self(hex::encode(digest))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
