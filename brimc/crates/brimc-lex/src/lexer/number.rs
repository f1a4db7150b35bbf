//! Number literal lexing.
//!
//! A number begins at a decimal digit and ends at whitespace, a newline, or
//! any special byte other than `.`. It starts as an integer; one decimal
//! point promotes it to a double, and a trailing `f` on a double promotes
//! it to a float. Everything else encountered mid-number marks the token
//! malformed without ending it — lexing is total.

use brimc_util::span::Span;
use brimc_util::DiagnosticCode;

use super::{is_newline, is_special, is_whitespace, Lexer};
use crate::token::TokenFlags;

/// Whether a byte ends a number token (NUL covers end of input).
#[inline]
fn is_number_end(byte: u8) -> bool {
    byte == 0 || is_whitespace(byte) || is_newline(byte) || is_special(byte, b'.')
}

impl<'a> Lexer<'a> {
    /// Lexes a number literal.
    ///
    /// # Flag outcomes
    ///
    /// - `42` → NUMBER|INTEGER
    /// - `3.14` → NUMBER|DOUBLE
    /// - `3.14f` → NUMBER|FLOAT
    /// - `1.2.3` → NUMBER|DOUBLE|ERROR_MALFORMED
    /// - `12ab` → NUMBER|INTEGER|ERROR_MALFORMED
    pub(super) fn lex_number(&mut self) {
        let start_offset = self.cursor.position();
        let start = self.location_of(start_offset);

        let mut flags = TokenFlags::NUMBER | TokenFlags::INTEGER;
        self.cursor.advance();

        while !self.cursor.is_at_end() {
            let byte = self.cursor.current();

            if is_number_end(byte) {
                break;
            }

            if byte == b'.' {
                if flags.contains(TokenFlags::DOUBLE) {
                    flags |= TokenFlags::ERROR_MALFORMED;
                }
                flags.remove(TokenFlags::INTEGER);
                flags.insert(TokenFlags::DOUBLE);
                self.cursor.advance();
                continue;
            }

            if byte.is_ascii_digit() {
                self.cursor.advance();
                continue;
            }

            if byte == b'f'
                && flags.contains(TokenFlags::DOUBLE)
                && is_number_end(self.cursor.peek())
            {
                flags.remove(TokenFlags::DOUBLE);
                flags.insert(TokenFlags::FLOAT);
                self.cursor.advance();
                break;
            }

            // stray byte inside the number
            flags |= TokenFlags::ERROR_MALFORMED;
            self.cursor.advance();
        }

        self.track_indents = false;

        let end = self.end_location();
        let span = Span::new(start, end);
        let lexeme = self.cursor.slice_from(start_offset);

        if flags.contains(TokenFlags::ERROR_MALFORMED) {
            self.handler.emit(
                brimc_util::Diagnostic::error(
                    format!("malformed number literal `{}`", lexeme),
                    span,
                )
                .with_code(DiagnosticCode::MALFORMED_NUMBER),
            );
        }

        self.push_token(flags, lexeme, span);
    }
}
