//! Message-digest contexts: SHA-256, plain or HMAC.
//!
//! Digest output is owned by the context: `read` hands out a borrowed
//! buffer that stays valid until the next `write` or `reset`. Callers that
//! need the digest past that point copy it out.

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::error::ProviderError;
use crate::{MD_FLAG_HMAC, MD_SHA256};

type HmacSha256 = Hmac<Sha256>;

/// Output length in bytes of the digest algorithm `algo`, or `0` if the id
/// is unknown.
pub fn digest_len(algo: u32) -> usize {
    match algo {
        MD_SHA256 => 32,
        _ => 0,
    }
}

/// Accumulated digest state.
enum State {
    /// Plain hash.
    Plain(Sha256),
    /// HMAC mode before the key has arrived; writes are buffered and
    /// replayed into the MAC once `set_key` runs.
    MacPending(Vec<u8>),
    /// Keyed MAC. The key is retained so `reset` can rebuild the state.
    Mac {
        key: Zeroizing<Vec<u8>>,
        mac: HmacSha256,
    },
}

/// An opened digest context.
pub struct DigestCtx {
    algo: u32,
    hmac: bool,
    state: State,
    /// Finalized output from the last `read`, invalidated by `write`/`reset`.
    scratch: Option<Vec<u8>>,
}

impl DigestCtx {
    /// Opens a digest context for the given algorithm id.
    ///
    /// The only supported flag is [`MD_FLAG_HMAC`]; when set, a key must be
    /// supplied via [`DigestCtx::set_key`] before output can be read.
    pub fn open(algo: u32, flags: u32) -> Result<Self, ProviderError> {
        if digest_len(algo) == 0 {
            return Err(ProviderError::UnknownDigestAlgo(algo));
        }
        if flags & !MD_FLAG_HMAC != 0 {
            return Err(ProviderError::UnsupportedFlags(flags));
        }
        let hmac = flags & MD_FLAG_HMAC != 0;
        let state = if hmac {
            State::MacPending(Vec::new())
        } else {
            State::Plain(Sha256::new())
        };
        Ok(Self {
            algo,
            hmac,
            state,
            scratch: None,
        })
    }

    /// Installs the MAC key. Only valid on a context opened with
    /// [`MD_FLAG_HMAC`]; any data written before the key was set is folded
    /// into the MAC now.
    pub fn set_key(&mut self, key: &[u8]) -> Result<(), ProviderError> {
        if !self.hmac {
            return Err(ProviderError::BadState);
        }
        // HMAC accepts keys of any length, so this construction cannot fail.
        let mut mac = HmacSha256::new_from_slice(key).map_err(|_| ProviderError::BadState)?;
        if let State::MacPending(pending) = &self.state {
            mac.update(pending);
        }
        self.scratch = None;
        self.state = State::Mac {
            key: Zeroizing::new(key.to_vec()),
            mac,
        };
        Ok(())
    }

    /// Clears the accumulated digest state. The MAC key, if any, survives.
    pub fn reset(&mut self) {
        self.scratch = None;
        self.state = match &self.state {
            State::Plain(_) => State::Plain(Sha256::new()),
            State::MacPending(_) => State::MacPending(Vec::new()),
            State::Mac { key, .. } => match HmacSha256::new_from_slice(key) {
                Ok(mac) => State::Mac {
                    key: key.clone(),
                    mac,
                },
                // Unreachable: the key was accepted at set_key time.
                Err(_) => State::MacPending(Vec::new()),
            },
        };
    }

    /// Appends bytes to the running digest computation.
    pub fn write(&mut self, data: &[u8]) {
        self.scratch = None;
        match &mut self.state {
            State::Plain(hash) => hash.update(data),
            State::MacPending(pending) => pending.extend_from_slice(data),
            State::Mac { mac, .. } => mac.update(data),
        }
    }

    /// Returns the digest for `algo`, borrowed from the context.
    ///
    /// The buffer stays valid until the next `write` or `reset`. Reading
    /// does not consume the running state; further writes continue the
    /// computation. Returns `None` when `algo` is not computed by this
    /// context, and `MissingKey` in HMAC mode before the key has been set.
    pub fn read(&mut self, algo: u32) -> Result<Option<&[u8]>, ProviderError> {
        if algo != self.algo {
            return Ok(None);
        }
        let digest = match &self.state {
            State::Plain(hash) => hash.clone().finalize().to_vec(),
            State::MacPending(_) => return Err(ProviderError::MissingKey),
            State::Mac { mac, .. } => mac.clone().finalize().into_bytes().to_vec(),
        };
        Ok(Some(self.scratch.insert(digest).as_slice()))
    }

    /// The context's primary algorithm id.
    pub fn algo(&self) -> u32 {
        self.algo
    }

    /// Whether output for `algo` can be read from this context.
    pub fn is_enabled(&self, algo: u32) -> bool {
        algo == self.algo
    }
}

impl std::fmt::Debug for DigestCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DigestCtx")
            .field("algo", &self.algo)
            .field("hmac", &self.hmac)
            .finish_non_exhaustive()
    }
}
