//! Password hashing and session token generation
//!
//! Passwords are stored as salted SHA-256 digests; the plain text never
//! leaves the registration/login/password-change handlers. Session tokens
//! are opaque UUIDv4 strings carried in a cookie and stored server-side.

use rand::Rng;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Generate a fresh random password salt (16 bytes, hex encoded)
pub fn generate_salt() -> String {
    let mut rng = rand::thread_rng();
    let bytes: [u8; 16] = rng.gen();
    hex_encode(&bytes)
}

/// Hash a password with the given salt
pub fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex_encode(&hasher.finalize())
}

/// Check a candidate password against a stored salt and digest
pub fn verify_password(salt: &str, stored_hash: &str, candidate: &str) -> bool {
    hash_password(salt, candidate) == stored_hash
}

/// Generate an opaque session token
pub fn generate_session_token() -> String {
    Uuid::new_v4().to_string()
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
