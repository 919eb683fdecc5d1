//! Token model and small string helpers for the scanner.

use std::borrow::Cow;
use std::fmt;

/// Position of a token's first byte in its source, 0-based line and column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourcePosition {
    pub line: u32,
    pub column: u32,
}

/// Classification attached to every token the scanner produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Invalid,
    Comment,
    Identifier,
    Punctuation,
    Number,
    String,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Invalid => "<invalid>",
            TokenKind::Comment => "comment",
            TokenKind::Identifier => "identifier",
            TokenKind::Punctuation => "punctuation",
            TokenKind::Number => "number",
            TokenKind::String => "string",
        };
        f.write_str(name)
    }
}

/// One scanned token: its kind, the source text it spans, where that text
/// starts, and the decoded literal value for the kinds that carry one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    kind: TokenKind,
    text: &'a str,
    position: SourcePosition,
    value: Option<Cow<'a, str>>,
}

impl<'a> Token<'a> {
    /// Builds a token and decodes its value. Comment, string and number
    /// tokens whose text does not actually parse as such degrade to
    /// [`TokenKind::Invalid`].
    pub fn new(kind: TokenKind, text: &'a str, position: SourcePosition) -> Self {
        let mut token = Token {
            kind,
            text,
            position,
            value: None,
        };
        match kind {
            TokenKind::Comment => token.decode_comment(),
            TokenKind::String => token.decode_string(),
            TokenKind::Number => token.decode_number(),
            _ => {}
        }
        token
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn position(&self) -> SourcePosition {
        self.position
    }

    /// Decoded literal value: the comment body, the unescaped string
    /// contents, or the number with digit separators removed. `None` for
    /// kinds that carry no value.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    fn decode_comment(&mut self) {
        match self.text.strip_prefix("//") {
            Some(body) => self.value = Some(Cow::Borrowed(body.trim())),
            None => self.kind = TokenKind::Invalid,
        }
    }

    fn decode_string(&mut self) {
        let body = self
            .text
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'));
        let Some(body) = body else {
            self.kind = TokenKind::Invalid;
            return;
        };
        if !body.contains('\\') {
            self.value = Some(Cow::Borrowed(body));
            return;
        }
        let mut decoded = String::with_capacity(body.len());
        let mut chars = body.chars();
        while let Some(c) = chars.next() {
            if c != '\\' {
                decoded.push(c);
                continue;
            }
            match chars.next() {
                Some('n') => decoded.push('\n'),
                Some('t') => decoded.push('\t'),
                Some('r') => decoded.push('\r'),
                Some('0') => decoded.push('\0'),
                Some('\\') => decoded.push('\\'),
                Some('"') => decoded.push('"'),
                _ => {
                    self.kind = TokenKind::Invalid;
                    return;
                }
            }
        }
        self.value = Some(Cow::Owned(decoded));
    }

    fn decode_number(&mut self) {
        if self.text.contains('_') {
            self.value = Some(Cow::Owned(self.text.replace('_', "")));
        } else {
            self.value = Some(Cow::Borrowed(self.text));
        }
    }
}

/// Splits `input` into `\n`-separated line views, keeping empty lines and
/// the segment after the final newline. The input must outlive the views.
pub fn split_to_lines(input: &str) -> Vec<&str> {
    input.split('\n').collect()
}
