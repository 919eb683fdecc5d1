//! Lexing toolkit built around a longest-prefix byte dictionary.
//!
//! The heart of the crate is [`prefixmap::PrefixMap`], a self-balancing byte
//! trie whose nodes store their children in open-addressing slot tables. It
//! answers, for arbitrary input, "what is the longest registered prefix that
//! matches the start of this input, and what value does it carry?"
//!
//! Around it sit the pieces that put the question to work: a token model
//! ([`token`]) and a scanner ([`lexer`]) that recognizes multi-byte operators
//! by asking the dictionary at every scan position.

pub mod lexer;
pub mod prefixmap;
pub mod token;

pub use lexer::Lexer;
pub use prefixmap::PrefixMap;
pub use token::{SourcePosition, Token, TokenKind};
