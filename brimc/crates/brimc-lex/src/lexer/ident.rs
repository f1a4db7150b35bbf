//! Identifier and special-byte lexing.
//!
//! Identifiers soak up everything that is not whitespace, a newline, or a
//! special byte (`_` and non-ASCII bytes included). Specials are emitted as
//! one-byte tokens; multi-byte operators are assembled later from the
//! `SUCCESSIVE` flag by the parser's operator table.

use brimc_util::span::Span;

use super::{is_newline, is_special, is_whitespace, Lexer};
use crate::token::TokenFlags;

impl<'a> Lexer<'a> {
    /// Lexes an identifier.
    pub(super) fn lex_identifier(&mut self) {
        let start_offset = self.cursor.position();
        let start = self.location_of(start_offset);

        self.cursor.advance();
        while !self.cursor.is_at_end() {
            let byte = self.cursor.current();
            if is_whitespace(byte) || is_newline(byte) || is_special(byte, 0) {
                break;
            }
            self.cursor.advance();
        }

        self.track_indents = false;

        let end = self.end_location();
        let lexeme = self.cursor.slice_from(start_offset);
        self.push_token(TokenFlags::IDENTIFIER, lexeme, Span::new(start, end));
    }

    /// Lexes a one-byte special token, or hands `"` and `` ` `` to the
    /// string sub-lexer.
    pub(super) fn lex_special(&mut self) {
        let byte = self.cursor.current();

        if byte == b'"' || byte == b'`' {
            self.lex_string();
            return;
        }

        let start_offset = self.cursor.position();
        let start = self.location_of(start_offset);
        self.cursor.advance();

        self.track_indents = false;

        let end = self.end_location();
        let lexeme = self.cursor.slice_from(start_offset);
        self.push_token(TokenFlags::SPECIAL, lexeme, Span::new(start, end));
    }
}
