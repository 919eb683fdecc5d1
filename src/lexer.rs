//! Byte-by-byte scanner producing [`Token`]s.
//!
//! Operator recognition is delegated to a [`PrefixMap`]: at each scan
//! position the remaining input is matched against the registered operator
//! set, and the longest hit decides how many bytes the punctuation token
//! consumes. No match means no known operator starts here, and the scanner
//! falls back to its other classification rules.

use memchr::memchr;

use crate::prefixmap::PrefixMap;
use crate::token::{SourcePosition, Token, TokenKind};

/// Default operator set: each operator maps to the number of bytes one match
/// of it consumes.
pub fn operator_table() -> PrefixMap<usize> {
    let mut table = PrefixMap::new();
    for op in [
        "+", "-", "*", "/", "%", "=", "<", ">", "!", "&", "|", "^", "~", "(", ")", "[", "]", "{",
        "}", ",", ";", ":", ".", "?", "==", "!=", "<=", ">=", "&&", "||", "<<", ">>", "+=", "-=",
        "*=", "/=", "%=", "&=", "|=", "^=", "->", "::", "++", "--", "<<=", ">>=", "...",
    ] {
        table.insert(op.as_bytes(), op.len());
    }
    table
}

/// An iterator over the tokens of a source string.
///
/// Columns are counted in bytes; the scanner classifies ASCII only and hands
/// anything else to the operator table or, failing that, to an `Invalid`
/// token covering one character.
pub struct Lexer<'a> {
    source: &'a str,
    offset: usize,
    position: SourcePosition,
    operators: PrefixMap<usize>,
}

impl<'a> Lexer<'a> {
    /// Scans `source` with the [default operator set](operator_table).
    pub fn new(source: &'a str) -> Self {
        Self::with_operators(source, operator_table())
    }

    /// Scans `source` with a caller-supplied operator table.
    pub fn with_operators(source: &'a str, operators: PrefixMap<usize>) -> Self {
        Lexer {
            source,
            offset: 0,
            position: SourcePosition::default(),
            operators,
        }
    }

    fn rest(&self) -> &'a [u8] {
        &self.source.as_bytes()[self.offset..]
    }

    fn skip_whitespace(&mut self) {
        while let Some(&byte) = self.source.as_bytes().get(self.offset) {
            match byte {
                b'\n' => {
                    self.offset += 1;
                    self.position.line += 1;
                    self.position.column = 0;
                }
                b' ' | b'\t' | b'\r' => {
                    self.offset += 1;
                    self.position.column += 1;
                }
                _ => break,
            }
        }
    }

    /// Consume `len` bytes as one token of `kind`. Tokens never span lines,
    /// so the column cursor moves by `len`.
    fn take(&mut self, kind: TokenKind, len: usize) -> Token<'a> {
        let start = self.offset;
        let position = self.position;
        self.offset += len;
        self.position.column += len as u32;
        Token::new(kind, &self.source[start..self.offset], position)
    }

    fn comment_len(&self) -> usize {
        match memchr(b'\n', self.rest()) {
            Some(end) => end,
            None => self.rest().len(),
        }
    }

    fn identifier_len(&self) -> usize {
        self.rest()
            .iter()
            .take_while(|byte| byte.is_ascii_alphanumeric() || **byte == b'_')
            .count()
    }

    fn number_len(&self) -> usize {
        self.rest()
            .iter()
            .take_while(|byte| byte.is_ascii_alphanumeric() || **byte == b'_' || **byte == b'.')
            .count()
    }

    /// Length of the string literal opening at the cursor and whether its
    /// closing quote was found before end of line. Backslash escapes the
    /// following byte.
    fn string_len(&self) -> (usize, bool) {
        let rest = self.rest();
        let mut index = 1;
        while index < rest.len() {
            match rest[index] {
                b'"' => return (index + 1, true),
                b'\n' => return (index, false),
                b'\\' if index + 1 < rest.len() && rest[index + 1] != b'\n' => index += 2,
                _ => index += 1,
            }
        }
        (rest.len(), false)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        self.skip_whitespace();
        let rest = self.rest();
        let &first = rest.first()?;
        let token = match first {
            b'/' if rest.get(1) == Some(&b'/') => {
                let len = self.comment_len();
                self.take(TokenKind::Comment, len)
            }
            b'"' => {
                let (len, terminated) = self.string_len();
                let kind = if terminated {
                    TokenKind::String
                } else {
                    TokenKind::Invalid
                };
                self.take(kind, len)
            }
            byte if byte == b'_' || byte.is_ascii_alphabetic() => {
                let len = self.identifier_len();
                self.take(TokenKind::Identifier, len)
            }
            byte if byte.is_ascii_digit() => {
                let len = self.number_len();
                self.take(TokenKind::Number, len)
            }
            _ => match self.operators.longest_match(rest) {
                Some(len) => self.take(TokenKind::Punctuation, len),
                None => {
                    // Consume a whole character so the slice stays valid
                    // UTF-8 even for multi-byte input the table cannot know.
                    let len = self.source[self.offset..]
                        .chars()
                        .next()
                        .map_or(1, char::len_utf8);
                    self.take(TokenKind::Invalid, len)
                }
            },
        };
        Some(token)
    }
}
