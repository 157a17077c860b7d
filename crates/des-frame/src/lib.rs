//! Framed ECB/CBC file encryption over the DES block transform.
//!
//! DES works in fixed 64-bit blocks, so a bare mode of operation cannot
//! return a plaintext of exact length. This crate wraps the block transform
//! in a small frame: one encrypted header block carrying the plaintext byte
//! count is prepended to the data blocks, and the final data block is topped
//! up with random bytes. Decryption recovers the count from the header and
//! strips the padding exactly.
//!
//! The frame provides no authentication or integrity protection.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
mod frame;
mod mode;

pub use crate::error::FrameError;
pub use crate::frame::{decrypt, encrypt, BLOCK_BYTES, MAX_PLAINTEXT_LEN};
pub use crate::mode::Mode;
