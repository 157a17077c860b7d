//! DES key schedule and block encryption/decryption.

use crate::bits::{
    extract6, join56, join64, permute, rotl28, scol, split56, split64, srow, MASK32, MASK48,
};
use crate::key::{DesKey, RoundKeys};
use crate::tables::{E, FP, IP, P, PC1, PC2, ROTATIONS, SBOXES};

/// Derives the 16 round keys from a 64-bit key.
///
/// PC-1 drops the parity bits and splits the key into 28-bit halves; each
/// schedule step rotates both halves independently and compresses the joined
/// state through PC-2. Decryption reuses the same schedule in reverse order.
pub fn expand_key(key: &DesKey) -> RoundKeys {
    let (mut c, mut d) = split56(permute(key.0, &PC1, 64));

    let mut round_keys = [0u64; 16];
    for (i, round_key) in round_keys.iter_mut().enumerate() {
        c = rotl28(c, ROTATIONS[i]);
        d = rotl28(d, ROTATIONS[i]);
        *round_key = permute(join56(c, d), &PC2, 56);
    }

    RoundKeys(round_keys)
}

/// Runs the eight S-boxes over a 48-bit value, narrowing it to 32 bits.
fn substitute(input: u64) -> u64 {
    let mut out = 0u64;
    for i in 1..=8 {
        let group = extract6(input, i);
        out = (out << 4) | u64::from(SBOXES[i - 1][srow(group)][scol(group)]);
    }
    out
}

/// The round function: expand, mix the round key, substitute, permute.
fn feistel(right: u64, round_key: u64) -> u64 {
    let expanded = permute(right, &E, 32) & MASK48;
    permute(substitute(expanded ^ round_key), &P, 32) & MASK32
}

fn transform(block: u64, round_keys: &RoundKeys, decrypt: bool) -> u64 {
    let (mut left, mut right) = split64(permute(block, &IP, 64));

    for i in 0..16 {
        let round_key = round_keys.get(if decrypt { 15 - i } else { i });
        let mixed = left ^ feistel(right, round_key);
        left = right;
        right = mixed;
    }

    // The halves swap once more before the final permutation.
    permute(join64(right, left), &FP, 64)
}

/// Encrypts a single 64-bit block with pre-derived round keys.
pub fn encrypt_block(block: u64, round_keys: &RoundKeys) -> u64 {
    transform(block, round_keys, false)
}

/// Decrypts a single 64-bit block with pre-derived round keys.
pub fn decrypt_block(block: u64, round_keys: &RoundKeys) -> u64 {
    transform(block, round_keys, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    // The worked example from the standard's literature: this key over this
    // plaintext is the classic single-block known answer.
    const FIPS_KEY: u64 = 0x1334_5779_9BBC_DFF1;
    const FIPS_PLAIN: u64 = 0x0123_4567_89AB_CDEF;
    const FIPS_CIPHER: u64 = 0x85E8_1354_0F0A_B405;

    #[test]
    fn encrypt_matches_fips_vector() {
        let round_keys = expand_key(&DesKey(FIPS_KEY));
        assert_eq!(encrypt_block(FIPS_PLAIN, &round_keys), FIPS_CIPHER);
    }

    #[test]
    fn decrypt_matches_fips_vector() {
        let round_keys = expand_key(&DesKey(FIPS_KEY));
        assert_eq!(decrypt_block(FIPS_CIPHER, &round_keys), FIPS_PLAIN);
    }

    #[test]
    fn encrypt_low_parity_key_vector() {
        let round_keys = expand_key(&DesKey(0x0123_4567_89AB_CDEF));
        assert_eq!(
            encrypt_block(0x0123_4567_89AB_CDEF, &round_keys),
            0x56CC_09E7_CFDC_4CEF
        );
    }

    #[test]
    fn first_round_key_vector() {
        let round_keys = expand_key(&DesKey(0x0123_4567_89AB_CDEF));
        assert_eq!(round_keys.get(0), 0x0B02_679B_49A5);
        assert!(round_keys.0.iter().all(|&k| k <= 0xFFFF_FFFF_FFFF));
    }

    #[test]
    fn key_schedule_is_deterministic() {
        let key = DesKey(0xDEAD_BEEF_CAFE_F00D);
        assert_eq!(expand_key(&key), expand_key(&key));
    }

    #[test]
    fn parity_bits_do_not_affect_schedule() {
        // Flipping bit 0 (a parity bit under PC-1) leaves the schedule alone.
        assert_eq!(
            expand_key(&DesKey(0x0123_4567_89AB_CDEF)),
            expand_key(&DesKey(0x0123_4567_89AB_CDEE))
        );
    }

    #[test]
    fn encrypt_decrypt_round_trip_random() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let key = DesKey(rng.next_u64());
            let block = rng.next_u64();
            let round_keys = expand_key(&key);
            let ciphertext = encrypt_block(block, &round_keys);
            assert_eq!(decrypt_block(ciphertext, &round_keys), block);
        }
    }
}
