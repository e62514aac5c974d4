//! Message-digest handle wrapper.
//!
//! A [`Hash`] owns one provider digest context. Unlike the cipher wrapper
//! it needs no pending-output slot: digest output memory belongs to the
//! provider, so `read` only copies the borrowed buffer out before anything
//! can invalidate it, and never frees it.

use ecrin_provider::{digest_len, DigestCtx};
use tracing::debug;

use crate::error::Error;

/// A handle to an opened message-digest context, plain or HMAC.
#[derive(Debug)]
pub struct Hash {
    ctx: Option<DigestCtx>,
}

impl Hash {
    /// Opens a digest context for the given algorithm id.
    ///
    /// Pass [`consts::MD_FLAG_HMAC`](crate::module::consts::MD_FLAG_HMAC)
    /// in `flags` for HMAC mode; a key must then be set before output can
    /// be read. On provider failure no handle is returned.
    pub fn open(algo: u32, flags: u32) -> Result<Self, Error> {
        let ctx = DigestCtx::open(algo, flags)?;
        debug!(algo, flags, "hash handle opened");
        Ok(Self { ctx: Some(ctx) })
    }

    /// Installs the MAC key. Fails when the handle was not opened in HMAC
    /// mode.
    pub fn set_key(&mut self, key: &[u8]) -> Result<(), Error> {
        self.ctx_mut()?.set_key(key)?;
        Ok(())
    }

    /// Clears the accumulated digest state. Only fails on a closed handle.
    pub fn reset(&mut self) -> Result<(), Error> {
        self.ctx_mut()?.reset();
        Ok(())
    }

    /// Appends bytes to the running computation. Only fails on a closed
    /// handle.
    pub fn write(&mut self, data: &[u8]) -> Result<(), Error> {
        self.ctx_mut()?.write(data);
        Ok(())
    }

    /// Returns the digest of everything written so far, using the handle's
    /// own algorithm.
    pub fn read(&mut self) -> Result<Vec<u8>, Error> {
        let algo = self.ctx_mut()?.algo();
        self.read_algo(algo)
    }

    /// Returns the digest for a specific algorithm id.
    ///
    /// The provider retains ownership of its output buffer, so the bytes
    /// are copied out immediately; nothing is freed here.
    pub fn read_algo(&mut self, algo: u32) -> Result<Vec<u8>, Error> {
        let ctx = self.ctx_mut()?;
        if !ctx.is_enabled(algo) {
            return Err(Error::Usage(format!(
                "algorithm {algo} is not enabled on this handle"
            )));
        }
        let expected = digest_len(algo);
        if expected == 0 {
            return Err(Error::Internal(format!(
                "invalid digest length for algorithm {algo}"
            )));
        }
        match ctx.read(algo)? {
            Some(bytes) if bytes.len() == expected => Ok(bytes.to_vec()),
            Some(bytes) => Err(Error::Internal(format!(
                "provider returned {} digest bytes, expected {expected}",
                bytes.len()
            ))),
            None => Err(Error::Internal("failed to obtain digest".into())),
        }
    }

    /// Releases the provider context. Idempotent; `Drop` calls this.
    pub fn close(&mut self) {
        if self.ctx.take().is_some() {
            debug!("hash handle closed");
        }
    }

    /// Whether the handle has been closed.
    pub fn is_closed(&self) -> bool {
        self.ctx.is_none()
    }

    fn ctx_mut(&mut self) -> Result<&mut DigestCtx, Error> {
        self.ctx.as_mut().ok_or_else(|| Error::closed("hash"))
    }
}

impl Drop for Hash {
    fn drop(&mut self) {
        self.close();
    }
}
