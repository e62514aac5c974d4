//! Stateful AES-CBC cipher contexts.
//!
//! A [`CipherCtx`] carries its chaining state across calls, so a message may
//! be fed through several `encrypt`/`decrypt` invocations and still produce
//! the same output as a single call. `set_iv` starts a new chain and `reset`
//! returns the context to the state right after `open` + `set_key`.

use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::{Aes128, Aes192, Aes256, Block};

use crate::error::ProviderError;
use crate::{CIPHER_AES128, CIPHER_AES192, CIPHER_AES256, CIPHER_MODE_CBC};

/// AES block size in bytes.
pub const BLOCK_SIZE: usize = 16;

/// Supported cipher algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CipherAlgo {
    Aes128,
    Aes192,
    Aes256,
}

impl CipherAlgo {
    fn from_id(id: u32) -> Result<Self, ProviderError> {
        match id {
            CIPHER_AES128 => Ok(Self::Aes128),
            CIPHER_AES192 => Ok(Self::Aes192),
            CIPHER_AES256 => Ok(Self::Aes256),
            _ => Err(ProviderError::UnknownCipherAlgo(id)),
        }
    }

    fn key_len(self) -> usize {
        match self {
            Self::Aes128 => 16,
            Self::Aes192 => 24,
            Self::Aes256 => 32,
        }
    }
}

/// An expanded AES key schedule.
enum KeySchedule {
    Aes128(Aes128),
    Aes192(Aes192),
    Aes256(Aes256),
}

impl KeySchedule {
    fn encrypt_block(&self, block: &mut Block) {
        match self {
            Self::Aes128(c) => c.encrypt_block(block),
            Self::Aes192(c) => c.encrypt_block(block),
            Self::Aes256(c) => c.encrypt_block(block),
        }
    }

    fn decrypt_block(&self, block: &mut Block) {
        match self {
            Self::Aes128(c) => c.decrypt_block(block),
            Self::Aes192(c) => c.decrypt_block(block),
            Self::Aes256(c) => c.decrypt_block(block),
        }
    }
}

/// An opened symmetric-cipher context.
///
/// Created without a key; `set_key` must be called before `encrypt` or
/// `decrypt`. The IV defaults to all zeroes. Dropping the context releases
/// it.
pub struct CipherCtx {
    algo: CipherAlgo,
    key: Option<KeySchedule>,
    iv: [u8; BLOCK_SIZE],
    chain: [u8; BLOCK_SIZE],
}

impl CipherCtx {
    /// Opens a cipher context for the given algorithm and mode ids.
    ///
    /// Only the AES family and CBC mode are supported; `flags` must be zero.
    pub fn open(algo: u32, mode: u32, flags: u32) -> Result<Self, ProviderError> {
        let algo = CipherAlgo::from_id(algo)?;
        if mode != CIPHER_MODE_CBC {
            return Err(ProviderError::UnknownCipherMode(mode));
        }
        if flags != 0 {
            return Err(ProviderError::UnsupportedFlags(flags));
        }
        Ok(Self {
            algo,
            key: None,
            iv: [0; BLOCK_SIZE],
            chain: [0; BLOCK_SIZE],
        })
    }

    /// Installs the encryption key. The length must match the algorithm
    /// exactly.
    pub fn set_key(&mut self, key: &[u8]) -> Result<(), ProviderError> {
        let expected = self.algo.key_len();
        if key.len() != expected {
            return Err(ProviderError::InvalidKeyLength {
                got: key.len(),
                expected,
            });
        }
        let invalid = |_| ProviderError::InvalidKeyLength {
            got: key.len(),
            expected,
        };
        let schedule = match self.algo {
            CipherAlgo::Aes128 => KeySchedule::Aes128(Aes128::new_from_slice(key).map_err(invalid)?),
            CipherAlgo::Aes192 => KeySchedule::Aes192(Aes192::new_from_slice(key).map_err(invalid)?),
            CipherAlgo::Aes256 => KeySchedule::Aes256(Aes256::new_from_slice(key).map_err(invalid)?),
        };
        self.key = Some(schedule);
        Ok(())
    }

    /// Installs the IV and restarts the chaining state from it.
    pub fn set_iv(&mut self, iv: &[u8]) -> Result<(), ProviderError> {
        if iv.len() != BLOCK_SIZE {
            return Err(ProviderError::InvalidIvLength {
                got: iv.len(),
                expected: BLOCK_SIZE,
            });
        }
        self.iv.copy_from_slice(iv);
        self.chain.copy_from_slice(iv);
        Ok(())
    }

    /// Returns the context to the state right after `open` + `set_key`:
    /// IV and chaining state cleared to zero, key kept.
    pub fn reset(&mut self) -> Result<(), ProviderError> {
        self.iv = [0; BLOCK_SIZE];
        self.chain = [0; BLOCK_SIZE];
        Ok(())
    }

    /// Encrypts `input` into `out` with CBC chaining.
    ///
    /// `input` must be a multiple of the block size and `out` must be at
    /// least as long as `input`. Exactly `input.len()` bytes are written.
    pub fn encrypt(&mut self, out: &mut [u8], input: &[u8]) -> Result<(), ProviderError> {
        self.checked(out, input)?;
        let key = self.key.as_ref().ok_or(ProviderError::MissingKey)?;
        for (src, dst) in input
            .chunks_exact(BLOCK_SIZE)
            .zip(out.chunks_exact_mut(BLOCK_SIZE))
        {
            let mut block = Block::clone_from_slice(src);
            for (b, c) in block.iter_mut().zip(self.chain.iter()) {
                *b ^= c;
            }
            key.encrypt_block(&mut block);
            self.chain.copy_from_slice(&block);
            dst.copy_from_slice(&block);
        }
        Ok(())
    }

    /// Decrypts `input` into `out`, mirroring [`CipherCtx::encrypt`].
    pub fn decrypt(&mut self, out: &mut [u8], input: &[u8]) -> Result<(), ProviderError> {
        self.checked(out, input)?;
        let key = self.key.as_ref().ok_or(ProviderError::MissingKey)?;
        for (src, dst) in input
            .chunks_exact(BLOCK_SIZE)
            .zip(out.chunks_exact_mut(BLOCK_SIZE))
        {
            let mut block = Block::clone_from_slice(src);
            key.decrypt_block(&mut block);
            for (b, c) in block.iter_mut().zip(self.chain.iter()) {
                *b ^= c;
            }
            self.chain.copy_from_slice(src);
            dst.copy_from_slice(&block);
        }
        Ok(())
    }

    /// Common precondition checks for encrypt/decrypt. Split out so both
    /// directions reject in the same order: key, alignment, output size.
    fn checked(&self, out: &[u8], input: &[u8]) -> Result<(), ProviderError> {
        self.key.as_ref().ok_or(ProviderError::MissingKey)?;
        if input.len() % BLOCK_SIZE != 0 {
            return Err(ProviderError::UnalignedInput(input.len()));
        }
        if out.len() < input.len() {
            return Err(ProviderError::ShortOutput {
                got: out.len(),
                need: input.len(),
            });
        }
        Ok(())
    }
}

impl std::fmt::Debug for CipherCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CipherCtx")
            .field("algo", &self.algo)
            .field("key", &self.key.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}
