//! Canonical hashing: SHA-256 with domain separation.
//!
//! **Exactly one place defines canonical hashing.** Every digest in the
//! workspace is `sha256(domain_prefix || data)`, rendered as
//! `"sha256:<lowercase hex>"`.

use sha2::{Digest, Sha256};

pub use super::hash_domain::HashDomain;

/// Algorithm tag carried in every [`ContentHash`] produced here.
pub const HASH_ALGORITHM: &str = "sha256";

/// A content-addressed hash in `"algorithm:hex_digest"` form.
///
/// Invariant: exactly one `:` with non-empty text on both sides
/// (enforced by [`ContentHash::parse`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash(String);

impl ContentHash {
    /// Parse from `"algorithm:hex"` form.
    ///
    /// Returns `None` when the separator is missing or either side is empty.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.split_once(':') {
            Some((alg, digest)) if !alg.is_empty() && !digest.is_empty() && !digest.contains(':') => {
                Some(Self(s.to_string()))
            }
            _ => None,
        }
    }

    /// The algorithm portion (e.g. `"sha256"`).
    #[must_use]
    pub fn algorithm(&self) -> &str {
        self.0.split_once(':').map_or("", |(alg, _)| alg)
    }

    /// The hex digest portion.
    #[must_use]
    pub fn hex_digest(&self) -> &str {
        self.0.split_once(':').map_or("", |(_, digest)| digest)
    }

    /// The full `"algorithm:hex_digest"` string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hash `data` under `domain`.
#[must_use]
pub fn canonical_hash(domain: HashDomain, data: &[u8]) -> ContentHash {
    let mut hasher = Sha256::new();
    hasher.update(domain.as_bytes());
    hasher.update(data);
    ContentHash(format!("{HASH_ALGORITHM}:{}", hex::encode(hasher.finalize())))
}
