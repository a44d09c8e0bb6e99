//! Tokenizer for candidate input lines.
//!
//! Tokens are produced lazily, one call to [`next_token`] at a time. The
//! cursor is a byte offset, so tokenizing can restart from any saved
//! position.

use std::ops::Range;

use crate::grammar::Cfg;
use crate::symbol::END_MARKER;

/// Generic token for identifiers that are not keywords.
pub const IDENTIFIER: &str = "id";
/// Generic token for integers, used when the grammar declares it.
pub const INT_LITERAL: &str = "int_lit";

const TWO_CHAR_OPERATORS: [&str; 4] = ["==", "!=", "<=", ">="];
const SINGLE_CHAR_OPERATORS: &str = "(){}[];,=+-*/%<>.";

/// The set of terminal names a tokenizer can produce verbatim.
pub trait Vocabulary {
    /// Checks whether `name` is a terminal.
    fn has_terminal(&self, name: &str) -> bool;
}

impl Vocabulary for Cfg {
    fn has_terminal(&self, name: &str) -> bool {
        self.symbol(name).map_or(false, |sym| self.is_terminal(sym))
    }
}

impl<'s> Vocabulary for [&'s str] {
    fn has_terminal(&self, name: &str) -> bool {
        self.contains(&name)
    }
}

/// The lexical class of a token.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TokenKind {
    /// An operator or punctuation character, or a two-character operator.
    Punct,
    /// An identifier declared as a terminal.
    Keyword,
    /// Any other identifier.
    Identifier,
    /// A sequence of digits.
    Integer,
    /// A character that no other rule accepts.
    Unknown,
    /// End of input.
    End,
}

/// A token of candidate input.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Token<'a> {
    /// The lexical class.
    pub kind: TokenKind,
    /// The text the token was read from. Empty at the end of input.
    pub lexeme: &'a str,
    /// The name under which the grammar knows this token.
    pub name: &'a str,
    /// Byte range in the input.
    pub span: Range<usize>,
}

impl<'a> Token<'a> {
    /// Checks whether this is the end of input.
    pub fn is_end(&self) -> bool {
        self.kind == TokenKind::End
    }
}

/// Reads the token at `cursor` and returns it with the cursor just past
/// it. At the end of input, returns the end token and leaves the cursor
/// where it is.
pub fn next_token<'a, V>(input: &'a str, cursor: usize, vocabulary: &V) -> (Token<'a>, usize)
where
    V: Vocabulary + ?Sized,
{
    let rest = input.get(cursor..).unwrap_or("");
    let skipped = rest.len() - rest.trim_start().len();
    let start = cursor + skipped;
    let rest = &rest[skipped..];

    let mut chars = rest.chars();
    let Some(c) = chars.next() else {
        let end = Token {
            kind: TokenKind::End,
            lexeme: "",
            name: END_MARKER,
            span: start..start,
        };
        return (end, start);
    };

    let token = |kind, len: usize, name: Option<&'a str>| {
        let lexeme = &input[start..start + len];
        let token = Token {
            kind,
            lexeme,
            name: name.unwrap_or(lexeme),
            span: start..start + len,
        };
        (token, start + len)
    };

    if TWO_CHAR_OPERATORS.iter().any(|op| rest.starts_with(op)) {
        return token(TokenKind::Punct, 2, None);
    }
    if SINGLE_CHAR_OPERATORS.contains(c) {
        return token(TokenKind::Punct, 1, None);
    }
    if c.is_ascii_alphabetic() || c == '_' {
        let len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        let word = &rest[..len];
        return if vocabulary.has_terminal(word) {
            token(TokenKind::Keyword, len, None)
        } else {
            token(TokenKind::Identifier, len, Some(IDENTIFIER))
        };
    }
    if c.is_ascii_digit() {
        let len = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let name = if vocabulary.has_terminal(INT_LITERAL) {
            Some(INT_LITERAL)
        } else {
            None
        };
        return token(TokenKind::Integer, len, name);
    }
    token(TokenKind::Unknown, c.len_utf8(), None)
}

/// A lazy sequence of tokens ending with a single end token.
#[derive(Debug)]
pub struct Tokenizer<'a, V: ?Sized> {
    input: &'a str,
    cursor: usize,
    vocabulary: &'a V,
    finished: bool,
}

impl<'a, V: ?Sized> Clone for Tokenizer<'a, V> {
    fn clone(&self) -> Self {
        Tokenizer {
            input: self.input,
            cursor: self.cursor,
            vocabulary: self.vocabulary,
            finished: self.finished,
        }
    }
}

impl<'a, V> Tokenizer<'a, V>
where
    V: Vocabulary + ?Sized,
{
    /// Creates a tokenizer at the start of `input`.
    pub fn new(input: &'a str, vocabulary: &'a V) -> Self {
        Self::at(input, 0, vocabulary)
    }

    /// Creates a tokenizer that resumes at a saved cursor.
    pub fn at(input: &'a str, cursor: usize, vocabulary: &'a V) -> Self {
        Tokenizer {
            input,
            cursor,
            vocabulary,
            finished: false,
        }
    }

    /// Returns the byte offset of the next unread character.
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl<'a, V> Iterator for Tokenizer<'a, V>
where
    V: Vocabulary + ?Sized,
{
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if self.finished {
            return None;
        }
        let (token, cursor) = next_token(self.input, self.cursor, self.vocabulary);
        self.cursor = cursor;
        self.finished = token.is_end();
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_is_idempotent() {
        let vocabulary: &[&str] = &[];
        let (token, cursor) = next_token("  ", 0, vocabulary);
        assert!(token.is_end());
        assert_eq!(cursor, 2);
        let (again, cursor_again) = next_token("  ", cursor, vocabulary);
        assert!(again.is_end());
        assert_eq!(cursor_again, cursor);
    }

    #[test]
    fn unknown_multibyte_character() {
        let vocabulary: &[&str] = &[];
        let (token, cursor) = next_token("é", 0, vocabulary);
        assert_eq!(token.kind, TokenKind::Unknown);
        assert_eq!(token.name, "é");
        assert_eq!(cursor, 2);
    }
}
