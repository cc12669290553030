//! Key Derivation Module
//!
//! Turns a free-text question into a stable, fixed-width fingerprint.

use std::fmt;

use sha2::{Digest, Sha256};

/// Number of hex characters kept from the digest.
pub const FINGERPRINT_LEN: usize = 32;

/// Separator placed between title and content before hashing.
const SEPARATOR: char = '|';

// == Fingerprint ==
/// Deterministic identifier of a normalized question, used as the cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Returns the full hex representation.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the first eight characters, for log lines.
    pub fn short(&self) -> &str {
        &self.0[..8]
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// == Derive Key ==
/// Derives the fingerprint of a `(title, content)` pair.
///
/// Both parts are trimmed, joined with `|`, trimmed again and lowercased,
/// so casing and surrounding whitespace never produce distinct keys. Empty
/// content and absent content are the same thing.
pub fn derive_key(title: &str, content: &str) -> Fingerprint {
    let combined = format!("{}{}{}", title.trim(), SEPARATOR, content.trim());
    let normalized = combined.trim().to_lowercase();

    let mut hasher = Sha256::new();
    hasher.update(normalized.as_bytes());
    let digest = hex::encode(hasher.finalize());

    Fingerprint(digest[..FINGERPRINT_LEN].to_string())
}
