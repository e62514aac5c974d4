//! Symmetric-cipher handle wrapper.
//!
//! A [`Cipher`] owns one provider cipher context plus a pending-output slot
//! that holds the temporary buffer of an in-flight encrypt/decrypt call.
//! The slot guarantees that the buffer is released through a single place
//! on every exit path: success, provider failure, or finalization racing an
//! aborted call. Outside an in-flight call the slot is always empty.

use ecrin_provider::CipherCtx;
use tracing::debug;

use crate::error::Error;

enum Direction {
    Encrypt,
    Decrypt,
}

/// A handle to an opened symmetric-cipher context.
///
/// Obtained from [`Cipher::open`]; released by [`Cipher::close`] or by
/// dropping the handle. Methods take `&mut self`, so a handle cannot be
/// driven from two logical callers at once.
#[derive(Debug)]
pub struct Cipher {
    ctx: Option<CipherCtx>,
    pending_out: Option<Vec<u8>>,
}

impl Cipher {
    /// Opens a cipher context for the given algorithm and mode ids.
    ///
    /// On provider failure the partially-built handle is discarded and
    /// never returned; there is nothing for the caller to release.
    pub fn open(algo: u32, mode: u32) -> Result<Self, Error> {
        let ctx = CipherCtx::open(algo, mode, 0)?;
        debug!(algo, mode, "cipher handle opened");
        Ok(Self {
            ctx: Some(ctx),
            pending_out: None,
        })
    }

    /// Installs the encryption key.
    pub fn set_key(&mut self, key: &[u8]) -> Result<(), Error> {
        self.ctx_mut()?.set_key(key)?;
        Ok(())
    }

    /// Installs the IV, starting a new CBC chain.
    pub fn set_iv(&mut self, iv: &[u8]) -> Result<(), Error> {
        self.ctx_mut()?.set_iv(iv)?;
        Ok(())
    }

    /// Restores the context to its freshly-keyed state so the same key can
    /// be reused for an independent message (set a new IV afterwards).
    pub fn reset(&mut self) -> Result<(), Error> {
        self.ctx_mut()?.reset()?;
        Ok(())
    }

    /// Encrypts `plaintext`, returning a ciphertext of exactly the same
    /// length. Block-mode input must be block-aligned; no padding is done
    /// at this layer.
    pub fn encrypt(&mut self, plaintext: &[u8]) -> Result<Vec<u8>, Error> {
        self.run(plaintext, Direction::Encrypt)
    }

    /// Decrypts `ciphertext`, mirroring [`Cipher::encrypt`].
    pub fn decrypt(&mut self, ciphertext: &[u8]) -> Result<Vec<u8>, Error> {
        self.run(ciphertext, Direction::Decrypt)
    }

    fn run(&mut self, input: &[u8], direction: Direction) -> Result<Vec<u8>, Error> {
        let Self { ctx, pending_out } = self;
        let ctx = ctx.as_mut().ok_or_else(|| Error::closed("cipher"))?;

        let mut buf = Vec::new();
        buf.try_reserve_exact(input.len())
            .map_err(|_| Error::Resource { len: input.len() })?;
        buf.resize(input.len(), 0);

        // Park the buffer on the handle before calling out, so every exit
        // path below releases it through the same slot.
        let out = pending_out.insert(buf);
        let outcome = match direction {
            Direction::Encrypt => ctx.encrypt(out, input),
            Direction::Decrypt => ctx.decrypt(out, input),
        };
        match outcome {
            Ok(()) => Ok(pending_out.take().unwrap_or_default()),
            Err(err) => {
                *pending_out = None;
                Err(err.into())
            }
        }
    }

    /// Releases the provider context and any pending output buffer.
    ///
    /// Idempotent: closing an already-closed handle is a no-op. Later
    /// method calls fail with a usage error. `Drop` calls this.
    pub fn close(&mut self) {
        if self.ctx.take().is_some() {
            debug!("cipher handle closed");
        }
        self.pending_out = None;
    }

    /// Whether the handle has been closed.
    pub fn is_closed(&self) -> bool {
        self.ctx.is_none()
    }

    /// Size of the buffer currently parked in the pending-output slot.
    ///
    /// Always `None` between calls; exposed so tests can verify the
    /// release-on-error contract.
    pub fn pending_len(&self) -> Option<usize> {
        self.pending_out.as_ref().map(Vec::len)
    }

    fn ctx_mut(&mut self) -> Result<&mut CipherCtx, Error> {
        self.ctx.as_mut().ok_or_else(|| Error::closed("cipher"))
    }
}

impl Drop for Cipher {
    fn drop(&mut self) {
        self.close();
    }
}
