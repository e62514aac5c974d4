//! Provider error type.

use thiserror::Error;

/// Errors reported by the cryptographic provider.
///
/// Every variant carries the offending value so callers can surface the
/// provider's own error text verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The cipher algorithm id is not known to this provider.
    #[error("unknown cipher algorithm id {0}")]
    UnknownCipherAlgo(u32),

    /// The cipher mode id is not known to this provider.
    #[error("unknown cipher mode id {0}")]
    UnknownCipherMode(u32),

    /// The digest algorithm id is not known to this provider.
    #[error("unknown digest algorithm id {0}")]
    UnknownDigestAlgo(u32),

    /// Flag bits were set that this provider does not support.
    #[error("unsupported flag bits {0:#06x}")]
    UnsupportedFlags(u32),

    /// The key length does not match the configured algorithm.
    #[error("invalid key length {got} (expected {expected})")]
    InvalidKeyLength {
        /// Length of the supplied key in bytes.
        got: usize,
        /// Length required by the configured algorithm.
        expected: usize,
    },

    /// The IV length does not match the cipher block size.
    #[error("invalid IV length {got} (expected {expected})")]
    InvalidIvLength {
        /// Length of the supplied IV in bytes.
        got: usize,
        /// Length required by the configured mode.
        expected: usize,
    },

    /// Block-mode input whose length is not a multiple of the block size.
    #[error("input length {0} is not a multiple of the cipher block size")]
    UnalignedInput(usize),

    /// The output buffer is smaller than the input.
    #[error("output buffer of {got} bytes cannot hold {need} bytes")]
    ShortOutput {
        /// Capacity of the supplied output buffer.
        got: usize,
        /// Number of bytes the operation produces.
        need: usize,
    },

    /// The operation requires a key and none has been set.
    #[error("no key has been set on this context")]
    MissingKey,

    /// The operation is not valid in the context's current state.
    #[error("operation is not valid in the current context state")]
    BadState,

    /// The linked provider is older than the version the caller requires.
    #[error("provider version {found} does not satisfy required {required}")]
    VersionMismatch {
        /// Version of the linked provider.
        found: &'static str,
        /// Version the caller asked for.
        required: String,
    },
}
