//! Question detection.

use crate::tokenize::Tokenizer;

/// Latin question mark and the Arabic/Persian question mark.
pub const QUESTION_MARKS: [char; 2] = ['?', '\u{061F}'];

/// True when any sentence of `text` contains a question mark.
///
/// Stops at the first qualifying sentence. Empty text has no sentences
/// and is never a question.
pub fn contains_question(tokenizer: &dyn Tokenizer, text: &str) -> bool {
    tokenizer
        .sent_tokenize(text)
        .into_iter()
        .any(|sentence| sentence.contains(&QUESTION_MARKS[..]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize::UnicodeTokenizer;

    fn is_q(text: &str) -> bool {
        contains_question(&UnicodeTokenizer, text)
    }

    #[test]
    fn test_empty_text_is_not_a_question() {
        assert!(!is_q(""));
        assert!(!is_q("   "));
    }

    #[test]
    fn test_latin_question_mark() {
        assert!(is_q("Are you coming?"));
        assert!(is_q("I'm here. Where are you? See you soon."));
    }

    #[test]
    fn test_persian_question_mark() {
        assert!(is_q("کجایی\u{061F}"));
        assert!(is_q("سلام. خوبی\u{061F} من خوبم."));
    }

    #[test]
    fn test_standalone_mark() {
        assert!(is_q("?"));
        assert!(is_q("\u{061F}"));
    }

    #[test]
    fn test_statement_is_not_a_question() {
        assert!(!is_q("Yes."));
        assert!(!is_q("See you tomorrow! Bring snacks."));
        assert!(!is_q("سلام دوست من"));
    }
}
