//! Modes of operation wrapping the block transform.

use des_core::{decrypt_block, encrypt_block, RoundKeys};

/// Mode of operation for a whole-file transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Electronic codebook: every block is transformed independently.
    Ecb,
    /// Cipher block chaining, seeded with a 64-bit initialization vector.
    Cbc {
        /// Value XOR'd into the first block of the chain.
        iv: u64,
    },
}

/// Sequential block engine carrying the CBC chaining register.
///
/// The header block participates in the chain exactly like a data block, so
/// the engine is handed every block of a file in order, header first.
pub(crate) struct BlockEngine<'a> {
    round_keys: &'a RoundKeys,
    chain: Option<u64>,
}

impl<'a> BlockEngine<'a> {
    pub(crate) fn new(round_keys: &'a RoundKeys, mode: Mode) -> Self {
        let chain = match mode {
            Mode::Ecb => None,
            Mode::Cbc { iv } => Some(iv),
        };
        Self { round_keys, chain }
    }

    /// Encrypts the next block in sequence.
    pub(crate) fn encrypt_next(&mut self, block: u64) -> u64 {
        let input = match self.chain {
            Some(previous) => block ^ previous,
            None => block,
        };
        let ciphertext = encrypt_block(input, self.round_keys);
        if let Some(previous) = self.chain.as_mut() {
            *previous = ciphertext;
        }
        ciphertext
    }

    /// Decrypts the next block in sequence.
    ///
    /// The chain register holds the previous raw ciphertext block, not the
    /// recovered plaintext.
    pub(crate) fn decrypt_next(&mut self, block: u64) -> u64 {
        let output = decrypt_block(block, self.round_keys);
        match self.chain.as_mut() {
            Some(previous) => {
                let plaintext = output ^ *previous;
                *previous = block;
                plaintext
            }
            None => output,
        }
    }
}
