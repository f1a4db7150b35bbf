//! Core lexer implementation.
//!
//! The lexer is a single-pass, stateful tokenizer: it walks the byte cursor
//! once, classifies the current byte, and dispatches to a sub-lexer that
//! consumes exactly one token (or a run of whitespace or newlines). The
//! sub-lexers live in sibling modules: `indent` (newlines and
//! leading-whitespace indentation), `number`, `string`, and `ident`
//! (identifiers and one-byte specials).
//!
//! Multi-byte operators are *not* assembled here. The lexer only records
//! adjacency via the `SUCCESSIVE` flag; fusing `:` `=` into `:=` is the
//! parser's operator table's job.

mod ident;
mod indent;
mod number;
mod string;

use brimc_util::span::{Position, Span};
use brimc_util::Handler;

use crate::cursor::Cursor;
use crate::token::{TokenFlags, TokenId, TokenList};

/// Classification of punctuation bytes.
///
/// Covers the four ASCII punctuation ranges with `_` carved out (it belongs
/// to identifiers) and an optional extra exclusion for callers that treat
/// one special byte as ordinary (the number scanner excludes `.`).
#[inline]
pub fn is_special(byte: u8, exclude: u8) -> bool {
    if byte == exclude || byte == b'_' {
        return false;
    }
    matches!(byte, b'!'..=b'/' | b':'..=b'@' | b'['..=b'`' | b'{'..=b'~')
}

/// Newline bytes; `\r\n` is folded to one logical newline by the lexer.
#[inline]
pub fn is_newline(byte: u8) -> bool {
    byte == b'\n' || byte == b'\r'
}

/// Horizontal whitespace.
#[inline]
pub fn is_whitespace(byte: u8) -> bool {
    byte == b' ' || byte == b'\t'
}

/// Tuning knobs for a lexer instance.
///
/// The capacities mirror the token-block and text-block initial sizes of
/// the arena; growth past them is handled by the vectors.
#[derive(Clone, Copy, Debug)]
pub struct LexerOptions {
    /// Initial capacity of the token record vector.
    pub initial_token_capacity: usize,
    /// Initial capacity of the token text buffer, in bytes.
    pub initial_text_capacity: usize,
}

impl Default for LexerOptions {
    fn default() -> Self {
        Self {
            initial_token_capacity: 1000,
            initial_text_capacity: 2000,
        }
    }
}

/// The Brim lexer.
///
/// Transforms a source buffer into a [`TokenList`]. Lexing is total:
/// malformed numbers and unterminated strings produce error-flagged tokens
/// (and a diagnostic), never an abort.
///
/// # Example
///
/// ```
/// use brimc_lex::Lexer;
/// use brimc_util::Handler;
///
/// let handler = Handler::new();
/// let tokens = Lexer::new("a := 55", &handler).tokenize();
/// assert_eq!(tokens.len(), 4); // a, :, =, 55
/// ```
pub struct Lexer<'a> {
    /// Byte cursor over the source.
    cursor: Cursor<'a>,

    /// Token arena under construction.
    tokens: TokenList,

    /// Diagnostic collector.
    handler: &'a Handler,

    /// Current line number (1-based).
    current_line: u32,

    /// Byte offset just past the most recent newline; columns are computed
    /// relative to it.
    last_newline: usize,

    /// Set at file start and after every newline, cleared once the line has
    /// produced a token; governs indent emission.
    track_indents: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer with default options.
    pub fn new(source: &'a str, handler: &'a Handler) -> Self {
        Self::with_options(source, handler, LexerOptions::default())
    }

    /// Creates a lexer with explicit arena capacities.
    pub fn with_options(source: &'a str, handler: &'a Handler, options: LexerOptions) -> Self {
        Self {
            cursor: Cursor::new(source),
            tokens: TokenList::with_capacity(
                options.initial_token_capacity,
                options.initial_text_capacity,
            ),
            handler,
            current_line: 1,
            last_newline: 0,
            track_indents: true,
        }
    }

    /// Runs the lexer to completion and returns the finished token list.
    ///
    /// # Example
    ///
    /// ```
    /// use brimc_lex::Lexer;
    /// use brimc_util::Handler;
    ///
    /// let handler = Handler::new();
    /// let tokens = Lexer::new("x + 1", &handler).tokenize();
    /// let values: Vec<_> = tokens.ids().map(|id| tokens.value(id)).collect();
    /// assert_eq!(values, ["x", "+", "1"]);
    /// ```
    pub fn tokenize(mut self) -> TokenList {
        while !self.cursor.is_at_end() {
            let byte = self.cursor.current();

            if is_newline(byte) {
                self.lex_newline();
                continue;
            }

            if is_whitespace(byte) {
                self.lex_whitespace();
                continue;
            }

            if byte.is_ascii_digit() {
                self.lex_number();
                continue;
            }

            if is_special(byte, 0) {
                self.lex_special();
                continue;
            }

            self.lex_identifier();
        }

        self.tokens
    }

    /// Convenience: tokenize a source in one call.
    pub fn tokenize_source(source: &str, handler: &Handler) -> TokenList {
        Lexer::new(source, handler).tokenize()
    }

    /// Consumes a newline (folding `\r\n`), advancing the line counter and
    /// re-arming indent tracking. Emits no token.
    fn lex_newline(&mut self) {
        let byte = self.cursor.advance();
        if byte == b'\r' && self.cursor.current() == b'\n' {
            self.cursor.advance();
        }
        self.current_line += 1;
        self.last_newline = self.cursor.position();
        self.track_indents = true;
    }

    /// Source position of an already-consumed byte offset on the current
    /// line.
    ///
    /// The saturation covers one degenerate case: an unterminated template
    /// literal whose final byte is its own newline.
    fn location_of(&self, offset: usize) -> Position {
        Position::new(
            self.current_line,
            (offset.saturating_sub(self.last_newline) + 1) as u32,
            offset,
        )
    }

    /// Position of the last byte consumed so far.
    fn end_location(&self) -> Position {
        self.location_of(self.cursor.position() - 1)
    }

    /// Appends a token; the successive flag is derived inside the list.
    fn push_token(&mut self, flags: TokenFlags, lexeme: &str, span: Span) -> TokenId {
        self.tokens.push(flags, lexeme, span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> TokenList {
        let handler = Handler::new();
        Lexer::new(source, &handler).tokenize()
    }

    fn values(tokens: &TokenList) -> Vec<&str> {
        tokens.ids().map(|id| tokens.value(id)).collect()
    }

    #[test]
    fn test_is_special_ranges() {
        assert!(is_special(b'!', 0));
        assert!(is_special(b'/', 0));
        assert!(is_special(b':', 0));
        assert!(is_special(b'@', 0));
        assert!(is_special(b'[', 0));
        assert!(is_special(b'`', 0));
        assert!(is_special(b'{', 0));
        assert!(is_special(b'~', 0));
        assert!(!is_special(b'_', 0));
        assert!(!is_special(b'a', 0));
        assert!(!is_special(b'5', 0));
        assert!(!is_special(b'.', b'.'));
    }

    #[test]
    fn test_simple_binding() {
        let tokens = lex("a := 55");
        assert_eq!(values(&tokens), ["a", ":", "=", "55"]);
        let ids: Vec<_> = tokens.ids().collect();
        assert!(!tokens.get(ids[1]).is_successive());
        assert!(tokens.get(ids[2]).is_successive());
        assert!(!tokens.get(ids[3]).is_successive());
    }

    #[test]
    fn test_line_and_column_tracking() {
        let tokens = lex("a\nbb\n  c");
        let ids: Vec<_> = tokens.ids().collect();

        let a = tokens.get(ids[0]);
        assert_eq!((a.span.start.line, a.span.start.column), (1, 1));

        let bb = tokens.get(ids[1]);
        assert_eq!((bb.span.start.line, bb.span.start.column), (2, 1));
        assert_eq!((bb.span.end.line, bb.span.end.column), (2, 2));

        // indent on line 3, then c at column 3
        let indent = tokens.get(ids[2]);
        assert!(indent.is_indent());
        let c = tokens.get(ids[3]);
        assert_eq!((c.span.start.line, c.span.start.column), (3, 3));
    }

    #[test]
    fn test_crlf_is_one_newline() {
        let tokens = lex("a\r\nb");
        let ids: Vec<_> = tokens.ids().collect();
        assert_eq!(tokens.get(ids[1]).span.start.line, 2);
        assert_eq!(tokens.get(ids[1]).span.start.column, 1);
    }

    #[test]
    fn test_token_offsets_strictly_increase() {
        let tokens = lex("aa := bb + 2\n  cc := `x`\n");
        let mut previous_end: Option<usize> = None;
        for (_, token) in tokens.iter() {
            assert!(token.span.end.offset >= token.span.start.offset);
            if let Some(end) = previous_end {
                assert!(token.span.start.offset > end);
            }
            previous_end = Some(token.span.end.offset);
        }
    }

    #[test]
    fn test_successive_iff_adjacent() {
        let tokens = lex("a:=b c == d");
        for (id, token) in tokens.iter() {
            let expected = match id.0 {
                0 => false,
                _ => {
                    let prev = tokens.get(crate::token::TokenId(id.0 - 1));
                    !prev.is_indent()
                        && !token.is_indent()
                        && token.span.start.offset == prev.span.end.offset + 1
                },
            };
            assert_eq!(token.is_successive(), expected, "token {:?}", id);
        }
    }
}
