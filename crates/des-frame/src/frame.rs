//! The length-carrying frame around the block transform.
//!
//! A framed file is `⌈N/8⌉ + 1` blocks for a plaintext of N bytes: an
//! encrypted header whose low 32 bits hold N, followed by the data blocks.
//! Blocks are written big-endian, so byte 0 of a buffer is the most
//! significant byte of its block.

use des_core::RoundKeys;
use rand::RngCore;

use crate::error::FrameError;
use crate::mode::{BlockEngine, Mode};

/// Bytes per DES block.
pub const BLOCK_BYTES: usize = 8;

/// Longest plaintext the header's 32-bit length field is allowed to carry.
pub const MAX_PLAINTEXT_LEN: u64 = (1 << 31) - 1;

/// Encrypts `plaintext` into a framed ciphertext image.
///
/// The header's high 32 bits and the final block's padding bytes are drawn
/// from `rng`; everything else is deterministic in the key and mode.
pub fn encrypt<R: RngCore>(
    plaintext: &[u8],
    round_keys: &RoundKeys,
    mode: Mode,
    rng: &mut R,
) -> Result<Vec<u8>, FrameError> {
    let len = plaintext.len() as u64;
    if len > MAX_PLAINTEXT_LEN {
        return Err(FrameError::TooLarge(len));
    }

    let mut engine = BlockEngine::new(round_keys, mode);
    let mut out = Vec::with_capacity((plaintext.len() / BLOCK_BYTES + 2) * BLOCK_BYTES);

    let header = (u64::from(rng.next_u32()) << 32) | len;
    out.extend_from_slice(&engine.encrypt_next(header).to_be_bytes());

    let mut chunks = plaintext.chunks_exact(BLOCK_BYTES);
    for chunk in chunks.by_ref() {
        let block = u64::from_be_bytes(chunk.try_into().expect("chunk length is eight"));
        out.extend_from_slice(&engine.encrypt_next(block).to_be_bytes());
    }

    let tail = chunks.remainder();
    if !tail.is_empty() {
        // Plaintext occupies the high bytes, random padding the low ones.
        let mut padded = [0u8; BLOCK_BYTES];
        rng.fill_bytes(&mut padded);
        padded[..tail.len()].copy_from_slice(tail);
        let block = u64::from_be_bytes(padded);
        out.extend_from_slice(&engine.encrypt_next(block).to_be_bytes());
    }

    Ok(out)
}

/// Decrypts a framed ciphertext image, stripping the tail padding.
///
/// The ciphertext must be the header block plus a whole number of data
/// blocks, and the header's declared length must fit the payload with less
/// than one block of padding.
pub fn decrypt(
    ciphertext: &[u8],
    round_keys: &RoundKeys,
    mode: Mode,
) -> Result<Vec<u8>, FrameError> {
    let total = ciphertext.len() as u64;
    if total < BLOCK_BYTES as u64 || total % BLOCK_BYTES as u64 != 0 {
        return Err(FrameError::Misaligned(total));
    }
    let payload = total - BLOCK_BYTES as u64;
    if payload > MAX_PLAINTEXT_LEN {
        return Err(FrameError::TooLarge(payload));
    }

    let mut engine = BlockEngine::new(round_keys, mode);
    let (head, body) = ciphertext.split_at(BLOCK_BYTES);

    let header = engine.decrypt_next(u64::from_be_bytes(
        head.try_into().expect("header is eight bytes"),
    ));
    let declared = (header & 0xFFFF_FFFF) as u32;
    let padding = payload
        .checked_sub(u64::from(declared))
        .filter(|&p| p < BLOCK_BYTES as u64)
        .ok_or(FrameError::BadLength { declared, payload })? as usize;

    let block_count = body.len() / BLOCK_BYTES;
    let mut out = Vec::with_capacity(declared as usize);
    for (i, chunk) in body.chunks_exact(BLOCK_BYTES).enumerate() {
        let plain = engine.decrypt_next(u64::from_be_bytes(
            chunk.try_into().expect("chunk length is eight"),
        ));
        let bytes = plain.to_be_bytes();
        let keep = if i + 1 == block_count {
            BLOCK_BYTES - padding
        } else {
            BLOCK_BYTES
        };
        out.extend_from_slice(&bytes[..keep]);
    }

    Ok(out)
}
