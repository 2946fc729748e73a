//! Reversible slug codec for shortlink identifiers.
//!
//! A slug is the 128-bit identifier of a shortlink written in base 57,
//! most significant digit first, always exactly [`SLUG_LENGTH`] symbols
//! long. The alphabet leaves out look-alike symbols (`0`, `1`, `I`, `O`, `l`)
//! so slugs survive being read aloud or retyped.
//!
//! ```ignore
//! let id = Uuid::new_v4();
//! let slug = slug::encode(id);
//! assert_eq!(slug.len(), slug::SLUG_LENGTH);
//! assert_eq!(slug::decode(&slug), Ok(id));
//! ```

use uuid::Uuid;

/// Symbols used by the encoding, in digit order.
pub const ALPHABET: &[u8; 57] = b"23456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Number of symbols in every slug.
///
/// 57^22 > 2^128 > 57^21, so 22 digits hold any 128-bit value.
pub const SLUG_LENGTH: usize = 22;

const BASE: u128 = ALPHABET.len() as u128;

const INVALID_DIGIT: u8 = u8::MAX;

/// Maps an input byte to its digit value, or [`INVALID_DIGIT`].
const DECODE_TABLE: [u8; 256] = {
    let mut table = [INVALID_DIGIT; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
};

/// The string is not the encoding of any identifier.
///
/// Carries no detail about which check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid slug")]
pub struct InvalidSlug;

/// Encodes an identifier as a fixed-width slug.
pub fn encode(id: Uuid) -> String {
    let mut value = id.as_u128();
    let mut digits = [ALPHABET[0]; SLUG_LENGTH];

    for slot in digits.iter_mut().rev() {
        *slot = ALPHABET[(value % BASE) as usize];
        value /= BASE;
    }

    digits.iter().map(|&b| b as char).collect()
}

/// Decodes a slug back to the identifier it encodes.
///
/// # Errors
///
/// Returns [`InvalidSlug`] if the input has the wrong length, contains a
/// symbol outside [`ALPHABET`], or encodes a value above `u128::MAX`.
pub fn decode(slug: &str) -> Result<Uuid, InvalidSlug> {
    if slug.len() != SLUG_LENGTH {
        return Err(InvalidSlug);
    }

    let mut value: u128 = 0;
    for byte in slug.bytes() {
        let digit = DECODE_TABLE[byte as usize];
        if digit == INVALID_DIGIT {
            return Err(InvalidSlug);
        }
        value = value
            .checked_mul(BASE)
            .and_then(|v| v.checked_add(u128::from(digit)))
            .ok_or(InvalidSlug)?;
    }

    Ok(Uuid::from_u128(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashSet;

    #[test]
    fn test_alphabet_has_no_duplicates_or_lookalikes() {
        let unique: HashSet<u8> = ALPHABET.iter().copied().collect();
        assert_eq!(unique.len(), ALPHABET.len());

        for ambiguous in [b'0', b'1', b'I', b'O', b'l'] {
            assert!(!ALPHABET.contains(&ambiguous));
        }
    }

    #[test]
    fn test_round_trip_random_ids() {
        let mut rng = StdRng::seed_from_u64(0x5106);
        for _ in 0..1_000 {
            let id = Uuid::from_u128(rng.random::<u128>());
            assert_eq!(decode(&encode(id)), Ok(id));
        }
    }

    #[test]
    fn test_round_trip_extremes() {
        for id in [
            Uuid::nil(),
            Uuid::from_u128(u128::MAX),
            Uuid::from_u128(1),
            Uuid::from_u128(56),
        ] {
            let slug = encode(id);
            assert_eq!(slug.len(), SLUG_LENGTH);
            assert_eq!(decode(&slug), Ok(id));
        }
    }

    #[test]
    fn test_nil_is_all_first_symbol() {
        assert_eq!(encode(Uuid::nil()), "2".repeat(SLUG_LENGTH));
    }

    #[test]
    fn test_fixed_width() {
        for _ in 0..100 {
            assert_eq!(encode(Uuid::new_v4()).len(), SLUG_LENGTH);
        }
    }

    #[test]
    fn test_encode_is_injective() {
        let slugs: HashSet<String> = (0..10_000).map(|_| encode(Uuid::new_v4())).collect();
        assert_eq!(slugs.len(), 10_000);
    }

    #[test]
    fn test_decode_rejects_empty() {
        assert_eq!(decode(""), Err(InvalidSlug));
    }

    #[test]
    fn test_decode_rejects_short_word() {
        assert_eq!(decode("invalid"), Err(InvalidSlug));
    }

    #[test]
    fn test_decode_rejects_wrong_length() {
        let slug = encode(Uuid::new_v4());
        assert_eq!(decode(&slug[1..]), Err(InvalidSlug));
        assert_eq!(decode(&format!("{slug}2")), Err(InvalidSlug));
    }

    #[test]
    fn test_decode_rejects_out_of_alphabet_symbols() {
        let mut slug = encode(Uuid::new_v4());
        slug.replace_range(0..1, "0");
        assert_eq!(decode(&slug), Err(InvalidSlug));

        assert_eq!(decode("lllllllllllllllllllll_"), Err(InvalidSlug));
        assert_eq!(decode("22222222222222222222-2"), Err(InvalidSlug));
    }

    #[test]
    fn test_decode_rejects_non_ascii() {
        // 20 ASCII symbols + one two-byte symbol = 22 bytes
        assert_eq!(decode("22222222222222222222é"), Err(InvalidSlug));
    }

    #[test]
    fn test_decode_rejects_value_above_u128() {
        assert_eq!(decode(&"z".repeat(SLUG_LENGTH)), Err(InvalidSlug));
    }

    #[test]
    fn test_max_id_is_largest_valid_slug() {
        let max = encode(Uuid::from_u128(u128::MAX));
        assert!(max.as_str() < "z".repeat(SLUG_LENGTH).as_str());
        assert_eq!(decode(&max), Ok(Uuid::from_u128(u128::MAX)));
    }
}
