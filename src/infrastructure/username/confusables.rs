//! Built-in homoglyph table

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::domain::username::ConfusablesNormalizer;

/// Single code point look-alikes and their ASCII prototype.
///
/// A subset of the Unicode confusables skeleton data restricted to targets in
/// ASCII. Lowercase ASCII letters are never remapped and digits other than 0
/// and 1 are left for leet folding.
const CONFUSABLES: &[(char, char)] = &[
    // ASCII
    ('I', 'l'),
    ('1', 'l'),
    ('|', 'l'),
    ('0', 'O'),
    // Compatibility forms of 0 and 1; the decorative stage would otherwise
    // turn these into ASCII digits after this table has run
    ('\u{FF10}', 'O'),  // fullwidth
    ('\u{FF11}', 'l'),
    ('\u{2070}', 'O'),  // superscript
    ('\u{00B9}', 'l'),
    ('\u{2080}', 'O'),  // subscript
    ('\u{2081}', 'l'),
    ('\u{24EA}', 'O'),  // circled
    ('\u{2460}', 'l'),
    ('\u{1D7CE}', 'O'), // mathematical bold
    ('\u{1D7CF}', 'l'),
    ('\u{1D7D8}', 'O'), // double-struck
    ('\u{1D7D9}', 'l'),
    ('\u{1D7E2}', 'O'), // sans-serif
    ('\u{1D7E3}', 'l'),
    ('\u{1D7EC}', 'O'), // sans-serif bold
    ('\u{1D7ED}', 'l'),
    ('\u{1D7F6}', 'O'), // monospace
    ('\u{1D7F7}', 'l'),
    ('\u{1FBF0}', 'O'), // segmented
    ('\u{1FBF1}', 'l'),
    // Latin extensions and letterlike symbols
    ('\u{0131}', 'i'), // dotless i
    ('\u{0237}', 'j'), // dotless j
    ('\u{01C0}', 'l'), // dental click
    ('\u{0251}', 'a'), // alpha
    ('\u{0261}', 'g'), // script g
    ('\u{0269}', 'i'), // iota
    ('\u{2113}', 'l'), // script small l
    // Cyrillic capitals
    ('\u{0405}', 'S'),
    ('\u{0406}', 'l'),
    ('\u{0408}', 'J'),
    ('\u{0410}', 'A'),
    ('\u{0412}', 'B'),
    ('\u{0415}', 'E'),
    ('\u{041A}', 'K'),
    ('\u{041C}', 'M'),
    ('\u{041D}', 'H'),
    ('\u{041E}', 'O'),
    ('\u{0420}', 'P'),
    ('\u{0421}', 'C'),
    ('\u{0422}', 'T'),
    ('\u{0423}', 'Y'),
    ('\u{0425}', 'X'),
    ('\u{04C0}', 'l'),
    // Cyrillic small
    ('\u{0430}', 'a'),
    ('\u{0435}', 'e'),
    ('\u{043E}', 'o'),
    ('\u{0440}', 'p'),
    ('\u{0441}', 'c'),
    ('\u{0443}', 'y'),
    ('\u{0445}', 'x'),
    ('\u{0455}', 's'),
    ('\u{0456}', 'i'),
    ('\u{0458}', 'j'),
    ('\u{04BB}', 'h'),
    ('\u{04CF}', 'l'),
    ('\u{0501}', 'd'),
    ('\u{051B}', 'q'),
    ('\u{051D}', 'w'),
    // Greek capitals
    ('\u{0391}', 'A'),
    ('\u{0392}', 'B'),
    ('\u{0395}', 'E'),
    ('\u{0396}', 'Z'),
    ('\u{0397}', 'H'),
    ('\u{0399}', 'l'),
    ('\u{039A}', 'K'),
    ('\u{039C}', 'M'),
    ('\u{039D}', 'N'),
    ('\u{039F}', 'O'),
    ('\u{03A1}', 'P'),
    ('\u{03A4}', 'T'),
    ('\u{03A5}', 'Y'),
    ('\u{03A7}', 'X'),
    // Greek small
    ('\u{03B1}', 'a'),
    ('\u{03B3}', 'y'),
    ('\u{03B9}', 'i'),
    ('\u{03BA}', 'k'),
    ('\u{03BD}', 'v'),
    ('\u{03BF}', 'o'),
    ('\u{03C1}', 'p'),
    ('\u{03C5}', 'u'),
    // Armenian
    ('\u{0566}', 'q'),
    ('\u{0570}', 'h'),
    ('\u{0578}', 'n'),
    ('\u{057D}', 'u'),
    ('\u{0581}', 'g'),
    ('\u{0585}', 'o'),
    // Cherokee
    ('\u{13A0}', 'D'),
    ('\u{13A1}', 'R'),
    ('\u{13A2}', 'T'),
    ('\u{13A9}', 'Y'),
    ('\u{13AA}', 'A'),
    ('\u{13AB}', 'J'),
    ('\u{13AC}', 'E'),
    ('\u{13B3}', 'W'),
    ('\u{13B7}', 'M'),
    ('\u{13BB}', 'H'),
    ('\u{13C0}', 'G'),
    ('\u{13C3}', 'Z'),
    ('\u{13DA}', 'S'),
    ('\u{13DE}', 'L'),
    ('\u{13DF}', 'C'),
    ('\u{13E2}', 'P'),
    ('\u{13E6}', 'K'),
    ('\u{13F4}', 'B'),
    // Lisu
    ('\u{A4D0}', 'B'),
    ('\u{A4D1}', 'P'),
    ('\u{A4D2}', 'd'),
    ('\u{A4D3}', 'D'),
    ('\u{A4D4}', 'T'),
    ('\u{A4D6}', 'G'),
    ('\u{A4D7}', 'K'),
    ('\u{A4D9}', 'J'),
    ('\u{A4DA}', 'C'),
    ('\u{A4DC}', 'Z'),
    ('\u{A4DD}', 'F'),
    ('\u{A4DF}', 'M'),
    ('\u{A4E0}', 'N'),
    ('\u{A4E1}', 'L'),
    ('\u{A4E2}', 'S'),
    ('\u{A4E3}', 'R'),
    ('\u{A4E6}', 'V'),
    ('\u{A4E7}', 'H'),
    ('\u{A4EA}', 'W'),
    ('\u{A4EB}', 'X'),
    ('\u{A4EC}', 'Y'),
    ('\u{A4EE}', 'A'),
    ('\u{A4F0}', 'E'),
    ('\u{A4F2}', 'l'),
    ('\u{A4F3}', 'O'),
    ('\u{A4F4}', 'U'),
];

static BUILTIN: Lazy<HashMap<char, char>> = Lazy::new(|| CONFUSABLES.iter().copied().collect());

/// Per code point homoglyph collapse backed by a lookup table
#[derive(Debug, Clone)]
pub struct ConfusableTable {
    mappings: HashMap<char, char>,
}

impl ConfusableTable {
    /// Table with the built-in mappings
    pub fn builtin() -> Self {
        Self {
            mappings: BUILTIN.clone(),
        }
    }

    /// Add or override mappings
    pub fn with_extra(mut self, pairs: impl IntoIterator<Item = (char, char)>) -> Self {
        self.mappings.extend(pairs);
        self
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

impl Default for ConfusableTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ConfusablesNormalizer for ConfusableTable {
    fn collapse(&self, input: &str) -> String {
        input
            .chars()
            .map(|c| self.mappings.get(&c).copied().unwrap_or(c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_lookalikes() {
        let table = ConfusableTable::builtin();
        assert_eq!(table.collapse("PaypaI"), "Paypal");
        assert_eq!(table.collapse("G00g1e"), "GOOgle");
        assert_eq!(table.collapse("||ama"), "llama");
    }

    #[test]
    fn test_cyrillic_and_greek() {
        let table = ConfusableTable::builtin();
        // Cyrillic er, a, u, er, a followed by Latin l
        assert_eq!(table.collapse("\u{0440}\u{0430}\u{0443}\u{0440}\u{0430}l"), "paypal");
        // Greek capitals alpha, rho, rho, iota, epsilon
        assert_eq!(table.collapse("\u{0391}\u{03A1}\u{03A1}\u{0399}\u{0395}"), "APPlE");
    }

    #[test]
    fn test_stylized_zero_and_one() {
        let table = ConfusableTable::builtin();
        // Fullwidth, mathematical bold, superscript and subscript digits
        assert_eq!(table.collapse("G\u{FF10}\u{FF10}g\u{FF11}e"), "GOOgle");
        assert_eq!(table.collapse("G\u{1D7CE}\u{1D7CE}g\u{1D7CF}e"), "GOOgle");
        assert_eq!(table.collapse("\u{2070}\u{00B9}\u{2080}\u{2081}"), "OlOl");
    }

    #[test]
    fn test_lisu_capitals() {
        let table = ConfusableTable::builtin();
        assert_eq!(table.collapse("\u{A4D4}est"), "Test");
        assert_eq!(table.collapse("\u{A4D1}\u{A4EE}\u{A4EC}"), "PAY");
    }

    #[test]
    fn test_plain_lowercase_and_leet_digits_untouched() {
        let table = ConfusableTable::builtin();
        let plain = "abcdefghijklmnopqrstuvwxyz23456789";
        assert_eq!(table.collapse(plain), plain);
    }

    #[test]
    fn test_every_target_is_ascii() {
        for (from, to) in CONFUSABLES {
            assert!(to.is_ascii_alphanumeric(), "{from:?} maps to {to:?}");
            assert!(!from.is_ascii_lowercase(), "{from:?} is plain lowercase");
        }
    }

    #[test]
    fn test_extra_mappings() {
        let table = ConfusableTable::builtin().with_extra([('\u{1D00}', 'A')]);
        assert_eq!(table.collapse("\u{1D00}bc"), "Abc");
        assert_eq!(table.len(), CONFUSABLES.len() + 1);
    }
}
