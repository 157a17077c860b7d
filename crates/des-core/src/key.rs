//! Key types for DES.

/// DES key wrapper.
///
/// All 64 bits are carried as given; the eight parity bits are discarded by
/// PC-1 during key expansion and are never validated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DesKey(pub u64);

impl From<u64> for DesKey {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<[u8; 8]> for DesKey {
    /// Interprets the bytes big-endian: byte 0 becomes the most significant
    /// key byte.
    fn from(value: [u8; 8]) -> Self {
        Self(u64::from_be_bytes(value))
    }
}

/// The 16 48-bit round keys derived from a [`DesKey`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundKeys(pub [u64; 16]);

impl RoundKeys {
    /// Returns the round key at the requested index (0..=15).
    #[inline]
    pub fn get(&self, round: usize) -> u64 {
        self.0[round]
    }
}
