//! Character classes that decide which reader handles the next token.

pub const AMPERSAND: char = '&';
pub const PIPE: char = '|';
pub const SEMICOLON: char = ';';
pub const SPACE: char = ' ';
pub const TAB: char = '\t';
pub const SQUOTE: char = '\'';
pub const DQUOTE: char = '"';
pub const BACKSLASH: char = '\\';
pub const LF: char = '\n';
pub const CR: char = '\r';
pub const DOLLAR: char = '$';
pub const LPAREN: char = '(';
pub const RPAREN: char = ')';
pub const LBRACE: char = '{';
pub const RBRACE: char = '}';
pub const HASH: char = '#';

pub fn is_blank(c: char) -> bool {
    c == SPACE || c == TAB
}

pub fn is_newline(c: char) -> bool {
    c == CR || c == LF
}

/// Blank or newline: the separators skipped between tokens.
pub fn is_space(c: char) -> bool {
    is_blank(c) || is_newline(c)
}

pub fn is_quote(c: char) -> bool {
    c == SQUOTE || c == DQUOTE
}

pub fn is_dollar(c: char) -> bool {
    c == DOLLAR
}

pub fn is_paren_open(c: char) -> bool {
    c == LPAREN
}

pub fn is_paren_close(c: char) -> bool {
    c == RPAREN
}

pub fn is_brace_open(c: char) -> bool {
    c == LBRACE
}

pub fn is_brace_close(c: char) -> bool {
    c == RBRACE
}

/// Control characters folded into a single operator token when adjacent.
pub fn is_delimiter(c: char) -> bool {
    c == AMPERSAND || c == PIPE || c == SEMICOLON
}

pub fn is_comment_start(c: char) -> bool {
    c == HASH
}

/// Whether `c` ends an unquoted word.
///
/// `closer` is the character that closes the enclosing construct when the
/// word is read inside one (`)` for `$(...)` and `$((...))`); at top level it
/// is `None` and parens and braces are ordinary word characters. Inside a
/// construct `(` also ends the word so the enclosing frame can balance it.
/// `=` is never a boundary, so assignments like `VAR=value` stay whole.
pub fn is_word_boundary(c: char, closer: Option<char>) -> bool {
    is_space(c)
        || is_quote(c)
        || is_delimiter(c)
        || closer == Some(c)
        || (closer.is_some() && is_paren_open(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blanks_and_newlines_are_disjoint() {
        assert!(is_blank(' ') && is_blank('\t'));
        assert!(is_newline('\n') && is_newline('\r'));
        assert!(!is_blank('\n'));
        assert!(!is_newline(' '));
        assert!(is_space('\r'));
    }

    #[test]
    fn delimiters() {
        for c in ['&', '|', ';'] {
            assert!(is_delimiter(c), "{c:?}");
        }
        assert!(!is_delimiter('>'));
        assert!(!is_delimiter('<'));
    }

    #[test]
    fn quotes() {
        assert!(is_quote('\''));
        assert!(is_quote('"'));
        assert!(!is_quote('`'));
    }

    #[test]
    fn word_boundary_top_level() {
        assert!(is_word_boundary(' ', None));
        assert!(is_word_boundary(';', None));
        assert!(is_word_boundary('"', None));
        assert!(!is_word_boundary('=', None));
        assert!(!is_word_boundary(')', None));
        assert!(!is_word_boundary('}', None));
        assert!(!is_word_boundary('#', None));
    }

    #[test]
    fn word_boundary_nested() {
        assert!(is_word_boundary(')', Some(RPAREN)));
        assert!(is_word_boundary('(', Some(RPAREN)));
        assert!(!is_word_boundary('(', None));
        assert!(!is_word_boundary('}', Some(RPAREN)));
        assert!(!is_word_boundary('=', Some(RPAREN)));
    }

    #[test]
    fn openers_and_closers() {
        assert!(is_paren_open('(') && is_paren_close(')'));
        assert!(is_brace_open('{') && is_brace_close('}'));
        assert!(is_dollar('$'));
        assert!(is_comment_start('#'));
        assert!(!is_paren_open(')'));
        assert!(!is_brace_open('}'));
    }
}
