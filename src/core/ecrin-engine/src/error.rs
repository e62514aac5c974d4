//! Engine error taxonomy.
//!
//! Four kinds of failure, each surfaced immediately at the point of
//! detection, never retried, never swallowed. Every raise happens only
//! after resources allocated for the current call have been released.

use ecrin_provider::ProviderError;
use thiserror::Error;

/// Errors surfaced by the handle engine.
#[derive(Debug, Error)]
pub enum Error {
    /// Caller misuse: operating on a closed handle, re-initializing the
    /// provider, or reading a disabled algorithm.
    #[error("usage error: {0}")]
    Usage(String),

    /// The cryptographic provider rejected an operation. Wraps the
    /// provider's own tagged error and message.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// A temporary output buffer could not be allocated. There is no
    /// fallback allocator and no retry.
    #[error("failed to allocate a {len}-byte output buffer")]
    Resource {
        /// Requested buffer size in bytes.
        len: usize,
    },

    /// A defensive check tripped: the provider returned a null or
    /// wrongly-sized result where none should be possible. Indicates a
    /// provider/version mismatch.
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Usage error for a method call on an already-closed handle.
    pub(crate) fn closed(kind: &str) -> Self {
        Error::Usage(format!("{kind} handle is already closed"))
    }
}
