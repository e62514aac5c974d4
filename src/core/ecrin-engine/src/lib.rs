//! # Ecrin Engine
//!
//! Leak-safe handle wrappers around the Ecrin cryptographic provider, built
//! to sit under an embedding host:
//!
//! - [`Cipher`] — symmetric encryption/decryption (AES-CBC) with a
//!   pending-output slot that guarantees the temporary buffer of an
//!   in-flight call is released on every exit path
//! - [`Hash`] — message digests (SHA-256) and HMAC
//! - [`module`] — one-time provider initialization and the exported
//!   name → id constant table
//!
//! ## Lifecycle
//!
//! Handles own their provider context exclusively. `close()` is explicit
//! and idempotent; dropping a handle closes it. A failed method call
//! releases everything it allocated before the error is returned and leaves
//! the handle valid for further use.
//!
//! ## Threading
//!
//! All operations are synchronous and run to completion. A handle is meant
//! for one logical caller at a time; `&mut self` receivers make concurrent
//! mutation a compile error rather than a documented obligation.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cipher;
pub mod error;
pub mod hash;
pub mod module;

pub use cipher::Cipher;
pub use error::Error;
pub use hash::Hash;
pub use module::{consts, constants, init};

pub use ecrin_provider::ProviderError;
