#![forbid(unsafe_code)]

//! Random glyph insertion for `--catify` mode
//!
//! Before every character of the output the decorator rolls a one-in-`rate`
//! chance of emitting its glyph first. The random source is injected, so a
//! seeded generator gives reproducible output.

use rand::Rng;

/// Inserts a glyph before characters at random
pub struct Decorator<R: Rng> {
    rng: R,
    glyph: String,
    rate: u32,
}

impl<R: Rng> Decorator<R> {
    /// Creates a decorator inserting `glyph` with probability `1 / rate`
    ///
    /// A rate of zero is treated as one (a glyph before every character).
    pub fn new(rng: R, glyph: char, rate: u32) -> Self {
        Decorator {
            rng,
            glyph: glyph.to_string(),
            rate: rate.max(1),
        }
    }

    pub fn glyph(&self) -> &str {
        &self.glyph
    }

    pub fn rate(&self) -> u32 {
        self.rate
    }

    /// Rolls the dice for one character
    pub fn should_insert(&mut self) -> bool {
        self.rng.gen_ratio(1, self.rate)
    }

    /// Append `chunk` to `out`, with glyphs interspersed
    ///
    /// Valid UTF-8 runs are decorated per character and invalid bytes per
    /// byte, so a glyph never lands inside a multibyte character. The
    /// glyph-free bytes of `out` always equal `chunk`.
    ///
    /// Returns the number of glyphs inserted.
    pub fn decorate_into(&mut self, chunk: &[u8], out: &mut Vec<u8>) -> usize {
        let mut inserted = 0;
        let mut buf = [0u8; 4];

        for piece in chunk.utf8_chunks() {
            for ch in piece.valid().chars() {
                inserted += self.maybe_insert(out);
                out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
            }
            for &byte in piece.invalid() {
                inserted += self.maybe_insert(out);
                out.push(byte);
            }
        }

        inserted
    }

    fn maybe_insert(&mut self, out: &mut Vec<u8>) -> usize {
        if self.should_insert() {
            out.extend_from_slice(self.glyph.as_bytes());
            1
        } else {
            0
        }
    }
}

/// Length of an incomplete UTF-8 sequence at the end of `bytes`
///
/// Returns 0 when `bytes` ends on a character boundary or with bytes that can
/// never start a valid sequence.
pub fn incomplete_utf8_tail(bytes: &[u8]) -> usize {
    let start = bytes.len().saturating_sub(3);

    for i in (start..bytes.len()).rev() {
        let byte = bytes[i];
        if byte & 0xC0 == 0x80 {
            continue;
        }
        let needed = match byte {
            0xC2..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF4 => 4,
            _ => return 0,
        };
        let have = bytes.len() - i;
        return if have < needed { have } else { 0 };
    }

    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn decorate(seed: u64, text: &str) -> (String, usize) {
        let mut decorator = Decorator::new(StdRng::seed_from_u64(seed), '*', 10);
        let mut out = Vec::new();
        let inserted = decorator.decorate_into(text.as_bytes(), &mut out);
        (String::from_utf8(out).unwrap(), inserted)
    }

    #[test]
    fn test_same_seed_same_output() {
        let text = "the quick brown fox jumps over the lazy dog\n".repeat(20);
        assert_eq!(decorate(42, &text), decorate(42, &text));
    }

    #[test]
    fn test_removing_glyphs_restores_input() {
        let text = "hello world\nsecond line\n".repeat(50);
        let (out, inserted) = decorate(7, &text);
        assert_eq!(out.replace('*', ""), text);
        assert_eq!(out.matches('*').count(), inserted);
    }

    #[test]
    fn test_glyph_never_splits_multibyte_chars() {
        let text = "日本語のテキスト🦀".repeat(100);
        let mut decorator = Decorator::new(StdRng::seed_from_u64(3), '🐱', 2);
        let mut out = Vec::new();
        decorator.decorate_into(text.as_bytes(), &mut out);

        let out = String::from_utf8(out).expect("decorated text stays valid UTF-8");
        assert_eq!(out.replace('🐱', ""), text);
    }

    #[test]
    fn test_invalid_utf8_passes_through() {
        let bytes = vec![0xff, 0xfe, b'a', 0x80, b'\n'];
        let mut decorator = Decorator::new(StdRng::seed_from_u64(1), '*', 1);
        let mut out = Vec::new();
        let inserted = decorator.decorate_into(&bytes, &mut out);

        assert_eq!(inserted, bytes.len());
        let stripped: Vec<u8> = out.into_iter().filter(|b| *b != b'*').collect();
        assert_eq!(stripped, bytes);
    }

    #[test]
    fn test_invalid_byte_does_not_spoil_valid_text() {
        let mut line = "café crème ".repeat(10).into_bytes();
        line.push(0xff);
        line.push(b'\n');

        let mut decorator = Decorator::new(StdRng::seed_from_u64(3), '*', 2);
        let mut out = Vec::new();
        decorator.decorate_into(&line, &mut out);

        let lossy = String::from_utf8_lossy(&out);
        assert_eq!(lossy.matches('\u{FFFD}').count(), 1);
        let stripped: Vec<u8> = out.into_iter().filter(|b| *b != b'*').collect();
        assert_eq!(stripped, line);
    }

    #[test]
    fn test_incomplete_utf8_tail() {
        let text = "aé日🦀".as_bytes();
        assert_eq!(incomplete_utf8_tail(text), 0);
        assert_eq!(incomplete_utf8_tail(&text[..2]), 1);
        assert_eq!(incomplete_utf8_tail(&text[..5]), 2);
        assert_eq!(incomplete_utf8_tail(&text[..9]), 3);
        assert_eq!(incomplete_utf8_tail(b""), 0);
        assert_eq!(incomplete_utf8_tail(&[b'a', 0xff]), 0);
    }

    #[test]
    fn test_rate_one_inserts_before_every_char() {
        let mut decorator = Decorator::new(StdRng::seed_from_u64(0), '*', 1);
        let mut out = Vec::new();
        let inserted = decorator.decorate_into("abc".as_bytes(), &mut out);
        assert_eq!(inserted, 3);
        assert_eq!(out, b"*a*b*c");
    }

    #[test]
    fn test_zero_rate_clamped() {
        let decorator = Decorator::new(StdRng::seed_from_u64(0), '*', 0);
        assert_eq!(decorator.rate(), 1);
        assert_eq!(decorator.glyph(), "*");
    }

    #[test]
    fn test_empty_chunk() {
        let (out, inserted) = decorate(5, "");
        assert!(out.is_empty());
        assert_eq!(inserted, 0);
    }

    #[test]
    fn test_insertion_rate_converges() {
        let mut decorator = Decorator::new(StdRng::seed_from_u64(2024), '*', 10);
        let samples = 200_000;
        let hits = (0..samples).filter(|_| decorator.should_insert()).count();

        // Expected 20_000; allow a generous margin
        assert!(
            (18_500..=21_500).contains(&hits),
            "insertion count {} far from 1 in 10",
            hits
        );
    }
}
