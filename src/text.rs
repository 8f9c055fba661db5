//! Text <-> bits codec over the fixed 64-symbol alphabet.

use crate::bits::BitBuffer;
use crate::config::Parameters;

/// The 64-symbol alphabet. Position (by Unicode scalar value, not byte
/// offset) is the 6-bit code used on the wire.
pub const ALPHABET: &str = " abcdefghijklmnopqrstuvwxyz0123456789.-,:/()?!\"'#*+_%$&=<>[];@§\n";

const BITS_PER_CHAR: u32 = 6;

fn alphabet_chars() -> Vec<char> {
    ALPHABET.chars().collect()
}

/// Encodes `s` into a `max_text_len`-character, `6 * max_text_len`-bit
/// buffer: lower-case, strip non-alphabet characters, truncate, right-pad
/// with spaces.
pub fn encode(s: &str, params: &Parameters) -> BitBuffer {
    let alphabet = alphabet_chars();
    let lowered = s.to_lowercase();

    let mut chars: Vec<char> = lowered.chars().filter(|c| alphabet.contains(c)).collect();
    chars.truncate(params.max_text_len());
    chars.resize(params.max_text_len(), ' ');

    let mut buf = BitBuffer::with_capacity(params.max_text_len() * BITS_PER_CHAR as usize);
    for c in chars {
        let code = alphabet
            .iter()
            .position(|&a| a == c)
            .expect("char was filtered against the alphabet above") as u64;
        buf.append_value(code, BITS_PER_CHAR);
    }
    buf
}

/// Decodes a `6 * max_text_len`-bit buffer back to a string, right-trimmed
/// of trailing spaces.
pub fn decode(bits: &BitBuffer, params: &Parameters) -> String {
    let alphabet = alphabet_chars();
    let mut out = String::with_capacity(params.max_text_len());
    for i in 0..params.max_text_len() {
        let code = bits
            .value(i * BITS_PER_CHAR as usize, BITS_PER_CHAR)
            .unwrap_or(0) as usize;
        out.push(alphabet[code]);
    }
    out.trim_end_matches(' ').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphabet_has_64_symbols() {
        assert_eq!(alphabet_chars().len(), 64);
    }

    #[test]
    fn alphabet_starts_with_space() {
        assert_eq!(ALPHABET.chars().next(), Some(' '));
    }

    #[test]
    fn encode_result_length_matches_capacity() {
        let params = Parameters::default();
        let bits = encode("hello world", &params);
        assert_eq!(bits.size(), 6 * params.max_text_len());
    }

    #[test]
    fn round_trip_short_text() {
        let params = Parameters::default();
        let bits = encode("hello world", &params);
        assert_eq!(decode(&bits, &params), "hello world");
    }

    #[test]
    fn round_trip_empty_text_is_empty_after_trim() {
        let params = Parameters::default();
        let bits = encode("", &params);
        assert_eq!(decode(&bits, &params), "");
    }

    #[test]
    fn non_alphabet_characters_are_stripped_and_lowercased() {
        let params = Parameters::default();
        let bits = encode("\u{a1}This is a TEST phrase!", &params);
        // "this is a test phrase!" is 22 chars, truncated to max_text_len=16.
        assert_eq!(decode(&bits, &params), "this is a test p");
    }

    #[test]
    fn section_sign_round_trips() {
        let params = Parameters::default();
        let bits = encode("a§b", &params);
        assert_eq!(decode(&bits, &params), "a§b");
    }
}
