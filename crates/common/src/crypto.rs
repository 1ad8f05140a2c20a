//! Cryptographic utilities shared across Jobboard crates
//!
//! Provides salted hashing and verification using SHA-256 with random salts
//! and constant-time comparison to prevent timing attacks. The same scheme
//! backs both password storage and access-token storage.

use rand::Rng;
use sha2::{Digest, Sha256};

/// Hash a secret (password or raw token) with a fresh random salt.
///
/// The output format is `hex(salt):hex(sha256(secret || salt))`.
pub fn hash_secret(secret: &str) -> String {
    let salt: [u8; 32] = rand::thread_rng().gen();
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hasher.update(salt);
    let hash = hasher.finalize();
    format!("{}:{}", hex::encode(salt), hex::encode(hash))
}

/// Verify a secret against a stored hash using constant-time comparison.
///
/// The stored hash format is `hex(salt):hex(sha256(secret || salt))`.
pub fn verify_secret_hash(candidate: &str, stored_hash: &str) -> bool {
    // Parse stored hash: salt:hash
    let parts: Vec<&str> = stored_hash.split(':').collect();
    if parts.len() != 2 {
        return false;
    }

    let salt = match hex::decode(parts[0]) {
        Ok(salt) => salt,
        Err(_) => return false,
    };

    let hash = match hex::decode(parts[1]) {
        Ok(hash) => hash,
        Err(_) => return false,
    };

    // Compute hash of candidate with stored salt
    let mut hasher = Sha256::new();
    hasher.update(candidate.as_bytes());
    hasher.update(&salt);
    let candidate_hash = hasher.finalize();

    // Constant-time comparison to prevent timing attacks
    if hash.len() != candidate_hash.len() {
        return false;
    }

    let mut result = 0u8;
    for (a, b) in hash.iter().zip(candidate_hash.iter()) {
        result |= a ^ b;
    }
    result == 0
}

/// Compute a deterministic (unsalted) lookup prefix for a secret.
///
/// Salted hashes cannot be used as lookup keys, so token rows also store the
/// first 16 hex chars of an unsalted SHA-256 for O(1) candidate narrowing.
/// Never used for verification on its own.
pub fn compute_hash_prefix(secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)[..16].to_string()
}
