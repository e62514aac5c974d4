//! # Ecrin Provider
//!
//! Cryptographic provider for Ecrin: stateful cipher and digest contexts
//! with an explicit open/close lifecycle.
//!
//! This crate plays the role of the "native" cryptographic library that the
//! handle engine wraps:
//!
//! - [`CipherCtx`] — AES in CBC mode with chaining state that persists
//!   across calls
//! - [`DigestCtx`] — SHA-256, plain or HMAC
//! - process-wide initialization control (version check, init-once flag,
//!   secure-memory policy)
//!
//! Algorithms are selected by integer id (the canonical numbering exported
//! here) so embedders can pass identifiers through untyped call boundaries.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cipher;
pub mod digest;
pub mod error;

pub use cipher::{CipherCtx, BLOCK_SIZE};
pub use digest::{digest_len, DigestCtx};
pub use error::ProviderError;

use std::sync::atomic::{AtomicBool, Ordering};

// ============================================================================
// Algorithm identifiers
// ============================================================================

/// AES with a 128-bit key.
pub const CIPHER_AES128: u32 = 7;
/// AES with a 192-bit key.
pub const CIPHER_AES192: u32 = 8;
/// AES with a 256-bit key.
pub const CIPHER_AES256: u32 = 9;

/// Cipher-block-chaining mode.
pub const CIPHER_MODE_CBC: u32 = 3;

/// SHA-256 message digest.
pub const MD_SHA256: u32 = 8;

/// Digest flag: run the digest as an HMAC (a key must be set before output
/// can be read).
pub const MD_FLAG_HMAC: u32 = 2;

// ============================================================================
// Process-wide control
// ============================================================================

/// Version of the linked provider.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

static INITIALIZED: AtomicBool = AtomicBool::new(false);
static SECURE_MEMORY: AtomicBool = AtomicBool::new(true);

/// Returns the provider version string.
pub fn version() -> &'static str {
    VERSION
}

/// Checks that the linked provider satisfies `required`, returning the
/// actual version.
///
/// With `None` this only reports the version, which is how embeddings record
/// that the version handshake happened.
pub fn check_version(required: Option<&str>) -> Result<&'static str, ProviderError> {
    if let Some(required) = required {
        if version_components(VERSION) < version_components(required) {
            return Err(ProviderError::VersionMismatch {
                found: VERSION,
                required: required.to_string(),
            });
        }
    }
    Ok(VERSION)
}

/// Whether [`finish_initialization`] has been called in this process.
pub fn is_initialized() -> bool {
    INITIALIZED.load(Ordering::Acquire)
}

/// Marks provider initialization as complete for the rest of the process
/// lifetime.
pub fn finish_initialization() {
    INITIALIZED.store(true, Ordering::Release);
}

/// Records that this process does not use the provider's locked-memory pool.
pub fn disable_secure_memory() {
    SECURE_MEMORY.store(false, Ordering::Release);
}

/// Whether the secure-memory pool is still enabled.
pub fn secure_memory_enabled() -> bool {
    SECURE_MEMORY.load(Ordering::Acquire)
}

/// Parses up to three leading numeric components of a version string.
/// Trailing pre-release tags ("0.1.0-alpha") are ignored.
fn version_components(v: &str) -> [u64; 3] {
    let mut out = [0u64; 3];
    for (slot, part) in out.iter_mut().zip(v.split('.').take(3)) {
        let digits: String = part.chars().take_while(|c| c.is_ascii_digit()).collect();
        *slot = digits.parse().unwrap_or(0);
    }
    out
}
