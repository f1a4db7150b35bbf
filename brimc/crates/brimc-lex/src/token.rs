//! Token records and the token arena.
//!
//! Tokens and their lexeme bytes live together in a [`TokenList`]: the
//! records in an index vector, the copied lexeme text in an append-only
//! string buffer. Both are addressed by stable indices, so nothing a token
//! hands out is invalidated when the list grows. The chronological `next`
//! link of the token stream is simply index order.

use bitflags::bitflags;
use brimc_util::define_idx;
use brimc_util::span::Span;
use brimc_util::IndexVec;

bitflags! {
    /// Classification and attribute bits of a token.
    ///
    /// Exactly one *type* bit group is set per token (an identifier, a
    /// number with its width refinement, an indent with its byte kind, a
    /// string, or a special). Attribute bits (`SUCCESSIVE`, the error bits)
    /// combine freely with the type.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct TokenFlags: u32 {
        /// Identifier: letters, `_`, digits after the first byte, and any
        /// non-ASCII bytes.
        const IDENTIFIER = 1 << 0;

        /// Numeric literal.
        const NUMBER = 1 << 1;
        /// Number refinement: integer (no decimal point).
        const INTEGER = 1 << 2;
        /// Number refinement: float (`f`-suffixed double).
        const FLOAT = 1 << 3;
        /// Number refinement: double (one decimal point).
        const DOUBLE = 1 << 4;

        /// Leading-whitespace token at the start of a line.
        const INDENT = 1 << 5;
        /// Indent refinement: run of spaces.
        const INDENT_SPACE = 1 << 6;
        /// Indent refinement: run of tabs.
        const INDENT_TAB = 1 << 7;

        /// String literal (`"…"`).
        const STRING = 1 << 8;
        /// String refinement: template literal (`` `…` ``), may span lines.
        const TEMPLATE_STRING = 1 << 9;

        /// One-byte punctuation token.
        const SPECIAL = 1 << 10;

        /// General error attribute.
        const ERROR = 1 << 11;
        /// String terminated by a newline or end of input.
        const ERROR_INCOMPLETE = 1 << 12;
        /// Number with a stray byte or a second decimal point.
        const ERROR_MALFORMED = 1 << 13;

        /// No whitespace between this token and the previous one; the
        /// parser fuses successive specials into multi-byte operators.
        const SUCCESSIVE = 1 << 14;
    }
}

define_idx!(TokenId);

/// A single token.
///
/// The lexeme text is not stored inline; `value` addresses the copied bytes
/// inside the owning [`TokenList`]. `span.end` is the position of the last
/// byte of the lexeme, so two tokens with no whitespace between them satisfy
/// `second.span.start.offset == first.span.end.offset + 1`.
#[derive(Clone, Copy, Debug)]
pub struct Token {
    /// Type and attribute bits.
    pub flags: TokenFlags,
    /// Byte range of the lexeme inside the token text buffer.
    pub value: TextRange,
    /// Source extent; for strings it covers the quotes, while `value`
    /// holds only the payload.
    pub span: Span,
}

impl Token {
    /// Byte length of the stored value.
    #[inline]
    pub fn len(&self) -> usize {
        self.value.len as usize
    }

    /// Returns true for zero-length values (only possible for strings).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.value.len == 0
    }

    /// Whether this is an indentation token.
    #[inline]
    pub fn is_indent(&self) -> bool {
        self.flags.contains(TokenFlags::INDENT)
    }

    /// Whether this is a one-byte punctuation token.
    #[inline]
    pub fn is_special(&self) -> bool {
        self.flags.contains(TokenFlags::SPECIAL)
    }

    /// Whether this is an identifier token.
    #[inline]
    pub fn is_identifier(&self) -> bool {
        self.flags.contains(TokenFlags::IDENTIFIER)
    }

    /// Whether the token follows its predecessor with no gap.
    #[inline]
    pub fn is_successive(&self) -> bool {
        self.flags.contains(TokenFlags::SUCCESSIVE)
    }
}

/// Range into the token text buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextRange {
    /// Start offset in the buffer.
    pub start: u32,
    /// Length in bytes.
    pub len: u32,
}

/// The token arena: token records plus their copied lexeme bytes.
///
/// Produced once per compile call by the lexer and consumed read-only by
/// the parser. Token values are stable for the lifetime of the list.
///
/// # Example
///
/// ```
/// use brimc_lex::{Lexer, TokenFlags};
/// use brimc_util::Handler;
///
/// let handler = Handler::new();
/// let tokens = Lexer::new("a := 55", &handler).tokenize();
///
/// let ids: Vec<_> = tokens.ids().collect();
/// assert_eq!(tokens.value(ids[0]), "a");
/// assert!(tokens.get(ids[0]).flags.contains(TokenFlags::IDENTIFIER));
/// ```
#[derive(Debug, Default)]
pub struct TokenList {
    text: String,
    tokens: IndexVec<TokenId, Token>,
}

impl TokenList {
    /// Create an empty token list.
    pub fn new() -> Self {
        Self {
            text: String::new(),
            tokens: IndexVec::new(),
        }
    }

    /// Create a token list with reserved capacities.
    pub fn with_capacity(tokens: usize, text: usize) -> Self {
        Self {
            text: String::with_capacity(text),
            tokens: IndexVec::with_capacity(tokens),
        }
    }

    /// Append a token, copying its lexeme into the text buffer.
    ///
    /// Sets the `SUCCESSIVE` attribute when both this token and the
    /// previously pushed one are non-indent and no byte separates them in
    /// the source.
    pub fn push(&mut self, mut flags: TokenFlags, lexeme: &str, span: Span) -> TokenId {
        if let Some(previous) = self.tokens.last() {
            if !previous.is_indent()
                && !flags.contains(TokenFlags::INDENT)
                && span.start.offset == previous.span.end.offset + 1
            {
                flags |= TokenFlags::SUCCESSIVE;
            }
        }

        let start = self.text.len() as u32;
        self.text.push_str(lexeme);
        let value = TextRange {
            start,
            len: lexeme.len() as u32,
        };

        self.tokens.push(Token { flags, value, span })
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true when no tokens were produced.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The token record for an id.
    #[inline]
    pub fn get(&self, id: TokenId) -> &Token {
        &self.tokens[id]
    }

    /// The lexeme text of a token.
    #[inline]
    pub fn value(&self, id: TokenId) -> &str {
        let range = self.tokens[id].value;
        &self.text[range.start as usize..(range.start + range.len) as usize]
    }

    /// First byte of a token's value, or NUL for empty values.
    #[inline]
    pub fn first_byte(&self, id: TokenId) -> u8 {
        self.value(id).as_bytes().first().copied().unwrap_or(0)
    }

    /// Id of the first token, if any.
    pub fn first(&self) -> Option<TokenId> {
        if self.tokens.is_empty() {
            None
        } else {
            Some(TokenId(0))
        }
    }

    /// The chronologically following token, while in bounds.
    #[inline]
    pub fn next(&self, id: TokenId) -> Option<TokenId> {
        self.tokens.next_index(id)
    }

    /// Iterate over token ids in source order.
    pub fn ids(&self) -> impl Iterator<Item = TokenId> + '_ {
        self.tokens.indices()
    }

    /// Iterate over (id, token) pairs in source order.
    pub fn iter(&self) -> impl Iterator<Item = (TokenId, &Token)> {
        self.tokens.iter_enumerated()
    }
}
