//! JWT token creation, validation, and fingerprinting.

pub mod claims;
pub mod decoder;
pub mod encoder;

pub use claims::{AccessClaims, RefreshClaims};
pub use decoder::JwtDecoder;
pub use encoder::{JwtEncoder, TokenPair};

use sha2::{Digest, Sha256};

/// SHA-256 hex fingerprint of a raw token.
///
/// This is what gets persisted in `refresh_tokens.token_hash`; the raw
/// token value never touches the database.
pub fn token_fingerprint(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        use std::fmt::Write;
        let _ = write!(out, "{byte:02x}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_sha256_hex() {
        // echo -n "token" | sha256sum
        assert_eq!(
            token_fingerprint("token"),
            "3c469e9d6c5875d37a43f353d4f88e61fcf812c66eee3457465a40b0da4153e0"
        );
        assert_eq!(token_fingerprint("").len(), 64);
    }

    #[test]
    fn test_distinct_tokens_distinct_fingerprints() {
        assert_ne!(token_fingerprint("a"), token_fingerprint("b"));
    }
}
