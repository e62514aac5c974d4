//! Module surface for embedding hosts: one-time provider initialization and
//! the exported constant table.
//!
//! Handle construction lives on [`Cipher::open`](crate::Cipher::open) and
//! [`Hash::open`](crate::Hash::open); this module carries everything else an
//! embedder registers at module scope.

use tracing::info;

use crate::error::Error;

/// Named integer identifiers exported to callers, so algorithm, mode and
/// flag selection never relies on provider-specific magic numbers.
pub mod consts {
    /// AES with a 128-bit key.
    pub const CIPHER_AES128: u32 = ecrin_provider::CIPHER_AES128;
    /// AES with a 192-bit key.
    pub const CIPHER_AES192: u32 = ecrin_provider::CIPHER_AES192;
    /// AES with a 256-bit key.
    pub const CIPHER_AES256: u32 = ecrin_provider::CIPHER_AES256;
    /// Cipher-block-chaining mode.
    pub const CIPHER_MODE_CBC: u32 = ecrin_provider::CIPHER_MODE_CBC;
    /// Digest flag selecting HMAC mode.
    pub const MD_FLAG_HMAC: u32 = ecrin_provider::MD_FLAG_HMAC;
    /// SHA-256 message digest.
    pub const MD_SHA256: u32 = ecrin_provider::MD_SHA256;
}

/// The fixed symbolic-name → id mapping, for embedders that register
/// constants dynamically into a host namespace.
pub fn constants() -> &'static [(&'static str, u32)] {
    &[
        ("CIPHER_AES128", consts::CIPHER_AES128),
        ("CIPHER_AES192", consts::CIPHER_AES192),
        ("CIPHER_AES256", consts::CIPHER_AES256),
        ("CIPHER_MODE_CBC", consts::CIPHER_MODE_CBC),
        ("MD_FLAG_HMAC", consts::MD_FLAG_HMAC),
        ("MD_SHA256", consts::MD_SHA256),
    ]
}

/// Performs one-time provider setup: version check, secure-memory opt-out,
/// and marking initialization complete.
///
/// Must be called at most once per process lifetime, before constructing
/// handles under a strict provider. Constructors do not auto-initialize.
///
/// # Errors
///
/// [`Error::Usage`] if the provider reports it was already initialized.
pub fn init() -> Result<(), Error> {
    if ecrin_provider::is_initialized() {
        return Err(Error::Usage("provider was already initialized".into()));
    }
    let version = ecrin_provider::check_version(None)?;
    // Explicit policy: this embedding does not use locked memory.
    ecrin_provider::disable_secure_memory();
    ecrin_provider::finish_initialization();
    info!(version, "provider initialized");
    Ok(())
}
