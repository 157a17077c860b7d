//! Errors surfaced by the framing codec.

use thiserror::Error;

/// Failures detected while framing or unframing a file image.
///
/// All variants are detectable before any output is produced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    /// The plaintext, or the ciphertext payload, exceeds the 31-bit length
    /// cap of the header's length field.
    #[error("input too large: {0} bytes, the frame caps lengths below 2 GiB")]
    TooLarge(u64),

    /// The ciphertext is not a header block plus a whole number of 8-byte
    /// blocks.
    #[error("ciphertext is {0} bytes, expected a header plus whole 64-bit blocks")]
    Misaligned(u64),

    /// The decrypted header declares a length the payload cannot hold, which
    /// means the file was not produced by this frame (or the key is wrong).
    #[error("header declares {declared} plaintext bytes but the payload holds {payload}")]
    BadLength {
        /// Length recovered from the header block.
        declared: u32,
        /// Data bytes actually present after the header.
        payload: u64,
    },
}
