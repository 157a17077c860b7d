//! Reference DES implementation used by the framing layer and the CLI.
//!
//! This crate intentionally mirrors the FIPS 46-3 specification and provides:
//! - Key schedule deriving the 16 round keys.
//! - Single-block encryption and decryption.
//! - Public types shared across the workspace.
//!
//! DES has been broken for decades; the implementation aims for bit-exact
//! standard conformance and testability, not for cryptographic strength or
//! constant-time guarantees.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod bits;
mod cipher;
mod key;
mod tables;

pub use crate::cipher::{decrypt_block, encrypt_block, expand_key};
pub use crate::key::{DesKey, RoundKeys};
