//! The display alphabet.
//!
//! Only uppercase ASCII letters and digits cycle through intermediate
//! glyphs during a reveal. Everything else (space, `:`, `-`, any other
//! character) is a non-cycling placeholder rendered verbatim.

use rand::Rng;

/// Glyphs a cell cycles through before settling on its target.
pub const FLIP_CHARS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// The glyph a freshly materialized cell shows before its first flip.
pub const BLANK: char = ' ';

/// Whether a character participates in glyph cycling.
pub fn cycles(ch: char) -> bool {
    ch.is_ascii_uppercase() || ch.is_ascii_digit()
}

/// Draws a uniformly random glyph from [`FLIP_CHARS`].
pub fn random_glyph<R: Rng + ?Sized>(rng: &mut R) -> char {
    let bytes = FLIP_CHARS.as_bytes();
    bytes[rng.random_range(0..bytes.len())] as char
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycling_classification() {
        assert!(cycles('A'));
        assert!(cycles('Z'));
        assert!(cycles('0'));
        assert!(cycles('9'));
        assert!(!cycles(' '));
        assert!(!cycles(':'));
        assert!(!cycles('-'));
        assert!(!cycles('a'));
        assert!(!cycles('!'));
    }

    #[test]
    fn test_random_glyph_stays_in_alphabet() {
        let mut rng = rand::rng();
        for _ in 0..100 {
            let glyph = random_glyph(&mut rng);
            assert!(FLIP_CHARS.contains(glyph));
        }
    }
}
