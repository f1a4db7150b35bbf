//! String literal lexing.
//!
//! `"…"` strings must close before the next newline; `` `…` `` template
//! literals may span lines. The token's value is the payload between the
//! quotes; its span covers the quotes.

use brimc_util::span::Span;
use brimc_util::DiagnosticCode;

use super::{is_newline, Lexer};
use crate::token::TokenFlags;

impl<'a> Lexer<'a> {
    /// Lexes a string or template literal starting at the opening quote.
    ///
    /// An unterminated string — a plain string hitting a newline, or either
    /// kind hitting end of input — keeps the payload read so far and is
    /// flagged ERROR|ERROR_INCOMPLETE. The terminating newline is left for
    /// the main loop.
    pub(super) fn lex_string(&mut self) {
        let quote = self.cursor.current();
        let start_offset = self.cursor.position();
        let start = self.location_of(start_offset);

        let mut flags = TokenFlags::STRING;
        if quote == b'`' {
            flags |= TokenFlags::TEMPLATE_STRING;
        }

        self.cursor.advance();
        let payload_start = self.cursor.position();
        let payload_end;

        loop {
            if self.cursor.is_at_end() {
                flags |= TokenFlags::ERROR | TokenFlags::ERROR_INCOMPLETE;
                payload_end = self.cursor.position();
                break;
            }

            let byte = self.cursor.current();

            if byte == quote {
                payload_end = self.cursor.position();
                self.cursor.advance();
                break;
            }

            if is_newline(byte) {
                if !flags.contains(TokenFlags::TEMPLATE_STRING) {
                    flags |= TokenFlags::ERROR | TokenFlags::ERROR_INCOMPLETE;
                    payload_end = self.cursor.position();
                    break;
                }

                // newline inside a template literal is payload
                self.cursor.advance();
                if byte == b'\r' && self.cursor.current() == b'\n' {
                    self.cursor.advance();
                }
                self.current_line += 1;
                self.last_newline = self.cursor.position();
                continue;
            }

            self.cursor.advance();
        }

        self.track_indents = false;

        let end = self.end_location();
        let span = Span::new(start, end);
        let lexeme = self.cursor.slice(payload_start, payload_end);

        if flags.contains(TokenFlags::ERROR_INCOMPLETE) {
            self.handler.emit(
                brimc_util::Diagnostic::error("unterminated string literal", span)
                    .with_code(DiagnosticCode::UNTERMINATED_STRING),
            );
        }

        self.push_token(flags, lexeme, span);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{Token, TokenList};
    use brimc_util::Handler;

    fn lex(source: &str) -> TokenList {
        let handler = Handler::new();
        Lexer::new(source, &handler).tokenize()
    }

    fn first(tokens: &TokenList) -> (Token, String) {
        let id = tokens.first().unwrap();
        (*tokens.get(id), tokens.value(id).to_string())
    }

    #[test]
    fn test_plain_string() {
        let tokens = lex("\"hello\"");
        let (token, value) = first(&tokens);
        assert_eq!(token.flags, TokenFlags::STRING);
        assert_eq!(value, "hello");
        // span covers the quotes, value does not
        assert_eq!(token.span.start.offset, 0);
        assert_eq!(token.span.end.offset, 6);
        assert_eq!(token.len(), 5);
    }

    #[test]
    fn test_empty_string() {
        let tokens = lex("\"\"");
        let (token, value) = first(&tokens);
        assert_eq!(value, "");
        assert_eq!(token.len(), 0);
    }

    #[test]
    fn test_unterminated_at_newline() {
        let tokens = lex("\"abc\nx");
        let (token, value) = first(&tokens);
        assert!(token.flags.contains(TokenFlags::ERROR | TokenFlags::ERROR_INCOMPLETE));
        assert_eq!(value, "abc");
        // the x after the newline is still lexed
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn test_unterminated_at_eof() {
        let tokens = lex("\"abc");
        let (token, value) = first(&tokens);
        assert_eq!(
            token.flags,
            TokenFlags::STRING | TokenFlags::ERROR | TokenFlags::ERROR_INCOMPLETE
        );
        assert_eq!(value, "abc");
    }

    #[test]
    fn test_template_literal() {
        let tokens = lex("`hi`");
        let (token, value) = first(&tokens);
        assert_eq!(token.flags, TokenFlags::STRING | TokenFlags::TEMPLATE_STRING);
        assert_eq!(value, "hi");
    }

    #[test]
    fn test_template_spans_lines() {
        let tokens = lex("`a\nb` x");
        let (token, value) = first(&tokens);
        assert!(!token.flags.contains(TokenFlags::ERROR));
        assert_eq!(value, "a\nb");
        assert_eq!(token.span.start.line, 1);
        assert_eq!(token.span.end.line, 2);

        // column tracking stays correct after the embedded newline
        let ids: Vec<_> = tokens.ids().collect();
        let x = tokens.get(ids[1]);
        assert_eq!((x.span.start.line, x.span.start.column), (2, 4));
    }

    #[test]
    fn test_unterminated_reports_diagnostic() {
        let handler = Handler::new();
        Lexer::new("\"abc", &handler).tokenize();
        assert!(handler.has_errors());
    }
}
