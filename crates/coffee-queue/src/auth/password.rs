//! Password digests.
//!
//! The username salts the digest, so two accounts sharing a password still store different
//! hashes.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Lowercase hex SHA-256 of `username:password`.
pub fn hash_password(username: &str, password: &str) -> String {
    format!("{:x}", Sha256::digest(format!("{username}:{password}").as_bytes()))
}

/// Checks `password` against a digest produced by [`hash_password`].
pub fn verify_password(username: &str, password: &str, expected_hash: &str) -> bool {
    constant_time_eq(
        hash_password(username, password).as_bytes(),
        expected_hash.as_bytes(),
    )
}

/// Constant-time byte comparison to prevent timing attacks. Differing lengths compare unequal.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_hex_and_salted() {
        let hash = hash_password("alice", "secret");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_ne!(hash, hash_password("bob", "secret"));
    }

    #[test]
    fn test_verify() {
        let hash = hash_password("alice", "secret");
        assert!(verify_password("alice", "secret", &hash));
        assert!(!verify_password("alice", "Secret", &hash));
        assert!(!verify_password("bob", "secret", &hash));
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"hello", b"hello"));
        assert!(!constant_time_eq(b"hello", b"world"));
        assert!(!constant_time_eq(b"hello", b"hell"));
        assert!(constant_time_eq(b"", b""));
    }

    #[test]
    fn test_verify_rejects_truncated_digest() {
        let hash = hash_password("alice", "secret");
        assert!(!verify_password("alice", "secret", &hash[..63]));
        assert!(!verify_password("alice", "secret", ""));
    }
}
