//! Anonymous session tokens and ownership checks.
//!
//! Visitors are identified by an opaque token carried in a cookie. The token
//! is the only proof of identity in the system: resources record the token of
//! the session that created them, and only a caller presenting the same token
//! may mutate them. There is no server-side session store.

use sha2::{Digest, Sha256};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE_NAME: &str = "session_id";

/// Session cookie lifetime: 30 days.
pub const SESSION_MAX_AGE_SECS: i64 = 60 * 60 * 24 * 30;

/// Length of a session token in characters.
pub const SESSION_TOKEN_LENGTH: usize = 32;

// ---------------------------------------------------------------------------
// Token generation
// ---------------------------------------------------------------------------

/// Generate a new session token: the first 32 hex characters of the SHA-256
/// digest of a random UUID.
pub fn generate_session_token() -> String {
    let mut digest = sha256_hex(Uuid::new_v4().to_string().as_bytes());
    digest.truncate(SESSION_TOKEN_LENGTH);
    digest
}

/// Check whether `value` has the shape of a token this module issues:
/// exactly 32 lowercase hex characters. Anything else is treated as no
/// session at all.
pub fn is_valid_token(value: &str) -> bool {
    value.len() == SESSION_TOKEN_LENGTH
        && value.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

fn sha256_hex(data: &[u8]) -> String {
    let hash = Sha256::digest(data);
    format!("{hash:x}")
}

// ---------------------------------------------------------------------------
// Ownership
// ---------------------------------------------------------------------------

/// Compare a caller's token against a stored owner token.
///
/// A resource without an owner token belongs to no one. The comparison never
/// short-circuits on the first differing byte.
pub fn is_owner(caller_token: &str, owner_token: Option<&str>) -> bool {
    let Some(owner) = owner_token else {
        return false;
    };
    if caller_token.len() != owner.len() {
        return false;
    }
    caller_token
        .bytes()
        .zip(owner.bytes())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
