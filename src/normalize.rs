//! Text normalization and bidirectional-script reshaping.
//!
//! [`Normalizer`] canonicalizes Persian/Arabic text so that visually
//! identical words compare equal: Arabic Yeh and Kaf are unified to their
//! Persian forms, digits are optionally rewritten as Persian digits,
//! diacritics and tatweel are optionally stripped, and whitespace runs are
//! collapsed.

use regex::Regex;

use crate::config::NormalizerConfig;

const ARABIC_YEH: char = '\u{064A}';
const ARABIC_ALEF_MAKSURA: char = '\u{0649}';
const PERSIAN_YEH: char = '\u{06CC}';
const ARABIC_KAF: char = '\u{0643}';
const PERSIAN_KAF: char = '\u{06A9}';
const TATWEEL: char = '\u{0640}';

#[derive(Debug, Clone)]
pub struct Normalizer {
    persian_digits: bool,
    remove_diacritics: bool,
    whitespace: Regex,
}

impl Normalizer {
    pub fn new(config: &NormalizerConfig) -> Self {
        Self {
            persian_digits: config.persian_digits,
            remove_diacritics: config.remove_diacritics,
            whitespace: Regex::new(r"\s+").expect("valid regex"),
        }
    }

    pub fn normalize(&self, text: &str) -> String {
        let mapped: String = text
            .chars()
            .filter(|&c| !(self.remove_diacritics && (is_diacritic(c) || c == TATWEEL)))
            .map(|c| self.map_char(c))
            .collect();

        self.whitespace
            .replace_all(mapped.trim(), " ")
            .into_owned()
    }

    fn map_char(&self, c: char) -> char {
        match c {
            ARABIC_YEH | ARABIC_ALEF_MAKSURA => PERSIAN_YEH,
            ARABIC_KAF => PERSIAN_KAF,
            '0'..='9' if self.persian_digits => shift_digit(c, '0'),
            '\u{0660}'..='\u{0669}' if self.persian_digits => shift_digit(c, '\u{0660}'),
            _ => c,
        }
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(&NormalizerConfig::default())
    }
}

/// Map a digit from the block starting at `zero` onto Persian digits.
fn shift_digit(c: char, zero: char) -> char {
    let offset = c as u32 - zero as u32;
    char::from_u32('\u{06F0}' as u32 + offset).unwrap_or(c)
}

/// Arabic harakat, tanwin, shadda, sukun and superscript alef.
fn is_diacritic(c: char) -> bool {
    matches!(c, '\u{064B}'..='\u{065F}' | '\u{0670}')
}

/// Prepares text for display by a renderer that may not handle
/// right-to-left scripts.
pub trait Reshaper {
    fn reshape(&self, text: &str) -> String;
}

/// Leaves text untouched. SVG viewers perform Arabic joining and bidi
/// ordering themselves, so pre-shaping would apply both twice.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughReshaper;

impl Reshaper for PassthroughReshaper {
    fn reshape(&self, text: &str) -> String {
        text.to_string()
    }
}

/// True when the first strongly-directional character of `word` belongs
/// to a right-to-left script.
pub fn is_rtl(word: &str) -> bool {
    word.chars()
        .find(|c| c.is_alphabetic())
        .map(|c| {
            matches!(c,
                '\u{0590}'..='\u{08FF}'
                | '\u{FB1D}'..='\u{FDFF}'
                | '\u{FE70}'..='\u{FEFF}')
        })
        .unwrap_or(false)
}
