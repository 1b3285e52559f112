//! Character-class predicates shared by the scanner and the classifier.
//!
//! The operator, punctuation and whitespace classes are mutually exclusive,
//! which is what makes boundary detection deterministic.

/// Characters emitted on their own as Operator tokens
pub const OPERATOR_CHARS: [char; 11] = ['+', '-', '*', '/', '=', '%', '<', '>', '&', '|', '!'];

/// Characters emitted on their own as Punctuation tokens
pub const PUNCTUATION_CHARS: [char; 8] = ['{', '}', '[', ']', ',', ';', '(', ')'];

/// Letter, underscore, or `#`: may start an identifier-like token
pub fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || ch == '#'
}

pub fn is_operator_char(ch: char) -> bool {
    OPERATOR_CHARS.contains(&ch)
}

pub fn is_punctuation_char(ch: char) -> bool {
    PUNCTUATION_CHARS.contains(&ch)
}

/// The C `isspace` class: space, tab, newline, vertical tab, form feed, carriage return
pub fn is_whitespace_char(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

/// A character that closes the current candidate token
pub fn is_boundary_char(ch: char) -> bool {
    is_whitespace_char(ch) || is_operator_char(ch) || is_punctuation_char(ch)
}

/// A boundary character that is emitted immediately as a one-character token
pub fn is_single_char_token(ch: char) -> bool {
    is_operator_char(ch) || is_punctuation_char(ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classes_are_mutually_exclusive() {
        for byte in 0u8..=127 {
            let ch = byte as char;
            let memberships = [
                is_operator_char(ch),
                is_punctuation_char(ch),
                is_whitespace_char(ch),
                is_word_char(ch),
            ]
            .iter()
            .filter(|m| **m)
            .count();
            assert!(memberships <= 1, "{:?} belongs to {} classes", ch, memberships);
        }
    }

    #[test]
    fn test_word_chars() {
        assert!(is_word_char('a'));
        assert!(is_word_char('Z'));
        assert!(is_word_char('_'));
        assert!(is_word_char('#'));
        assert!(!is_word_char('1'));
        assert!(!is_word_char('"'));
        assert!(!is_word_char('é'));
    }

    #[test]
    fn test_whitespace_matches_c_isspace() {
        for ch in [' ', '\t', '\n', '\x0B', '\x0C', '\r'] {
            assert!(is_whitespace_char(ch), "{:?}", ch);
        }
        assert!(!is_whitespace_char('\u{00A0}'));
        assert!(!is_whitespace_char('a'));
    }

    #[test]
    fn test_boundaries() {
        assert!(is_boundary_char('+'));
        assert!(is_boundary_char(';'));
        assert!(is_boundary_char(' '));
        assert!(!is_boundary_char('"'));
        assert!(!is_boundary_char('.'));
        assert!(is_single_char_token('('));
        assert!(!is_single_char_token('\n'));
    }
}
