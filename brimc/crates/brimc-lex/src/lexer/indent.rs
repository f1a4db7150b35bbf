//! Indentation lexing.
//!
//! Leading whitespace at the start of a line becomes a single indent token
//! whose kind follows the first byte (space or tab) and whose length is the
//! maximal run of that same byte. Whitespace anywhere else is discarded.

use brimc_util::span::Span;

use super::{is_newline, Lexer};
use crate::token::TokenFlags;

impl<'a> Lexer<'a> {
    /// Handles a whitespace byte: indentation at a line start, otherwise a
    /// single discarded byte.
    pub(super) fn lex_whitespace(&mut self) {
        if !self.track_indents {
            self.cursor.advance();
            return;
        }
        self.lex_indent();
    }

    /// Consumes a run of identical whitespace bytes at a line start.
    ///
    /// A run immediately followed by a newline belongs to a blank line and
    /// is suppressed. Emitting an indent token disarms indent tracking, so
    /// a line yields at most one indent token; a mixed `" \t"` prefix emits
    /// a token for the first run only.
    fn lex_indent(&mut self) {
        let first = self.cursor.current();
        let start_offset = self.cursor.position();

        while !self.cursor.is_at_end() && self.cursor.current() == first {
            self.cursor.advance();
        }

        if !self.cursor.is_at_end() && is_newline(self.cursor.current()) {
            // blank line
            return;
        }

        let mut flags = TokenFlags::INDENT;
        if first == b'\t' {
            flags |= TokenFlags::INDENT_TAB;
        } else {
            flags |= TokenFlags::INDENT_SPACE;
        }

        let start = self.location_of(start_offset);
        let end = self.end_location();
        let lexeme = self.cursor.slice_from(start_offset);
        self.push_token(flags, lexeme, Span::new(start, end));

        self.track_indents = false;
    }
}
