//! Decorative text flattening

use unicode_normalization::UnicodeNormalization;
use unidecode::unidecode;

use crate::domain::username::DecorativeTextNormalizer;

/// Folds stylised alphabets to plain ASCII.
///
/// Compatibility composition handles fullwidth, mathematical, circled,
/// superscript and ligature forms. Transliteration then takes whatever is left
/// to its closest ASCII spelling. Symbols without a spelling (most emoji) are
/// dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransliteratingFlattener;

impl TransliteratingFlattener {
    pub fn new() -> Self {
        Self
    }
}

impl DecorativeTextNormalizer for TransliteratingFlattener {
    fn flatten(&self, input: &str) -> String {
        let composed: String = input.nfkc().collect();
        unidecode(&composed)
    }
}
