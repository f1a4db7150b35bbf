//! Edge case tests for brimc-lex.

#[cfg(test)]
mod tests {
    use crate::{Lexer, TokenFlags, TokenList};
    use brimc_util::Handler;

    fn lex(source: &str) -> TokenList {
        let handler = Handler::new();
        Lexer::new(source, &handler).tokenize()
    }

    fn values(tokens: &TokenList) -> Vec<&str> {
        tokens.ids().map(|id| tokens.value(id)).collect()
    }

    fn non_indent_count(tokens: &TokenList) -> usize {
        tokens.iter().filter(|(_, t)| !t.is_indent()).count()
    }

    // ==================== EDGE CASES ====================

    #[test]
    fn test_edge_empty_source() {
        assert!(lex("").is_empty());
    }

    #[test]
    fn test_edge_whitespace_and_newlines_only() {
        let tokens = lex("  \n\t\n   \n");
        assert_eq!(non_indent_count(&tokens), 0);
    }

    #[test]
    fn test_edge_single_byte() {
        let tokens = lex("x");
        assert_eq!(values(&tokens), ["x"]);
    }

    #[test]
    fn test_edge_long_identifier() {
        let name = "a".repeat(10_000);
        let tokens = lex(&name);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens.value(tokens.first().unwrap()), name);
    }

    #[test]
    fn test_edge_every_multichar_operator_is_successive() {
        for op in [":=", "::", "+=", "++", "--", "<=", ">=", "==", "<<", ">>", "//"] {
            let tokens = lex(op);
            assert_eq!(tokens.len(), 2, "{}", op);
            let ids: Vec<_> = tokens.ids().collect();
            assert!(tokens.get(ids[1]).is_successive(), "{}", op);
        }
    }

    #[test]
    fn test_edge_operator_split_by_space_is_not_successive() {
        let tokens = lex(": =");
        let ids: Vec<_> = tokens.ids().collect();
        assert!(!tokens.get(ids[1]).is_successive());
    }

    #[test]
    fn test_edge_number_with_trailing_dot() {
        // `1.` is a double with nothing after the point
        let tokens = lex("1.");
        let token = tokens.get(tokens.first().unwrap());
        assert!(token.flags.contains(TokenFlags::DOUBLE));
        assert!(!token.flags.contains(TokenFlags::ERROR_MALFORMED));
    }

    #[test]
    fn test_edge_double_dot_number() {
        let tokens = lex("1.2.3");
        let token = tokens.get(tokens.first().unwrap());
        assert_eq!(
            token.flags,
            TokenFlags::NUMBER | TokenFlags::DOUBLE | TokenFlags::ERROR_MALFORMED
        );
    }

    #[test]
    fn test_edge_unterminated_string_at_eof() {
        let tokens = lex("\"abc");
        let token = tokens.get(tokens.first().unwrap());
        assert_eq!(
            token.flags,
            TokenFlags::STRING | TokenFlags::ERROR | TokenFlags::ERROR_INCOMPLETE
        );
    }

    #[test]
    fn test_edge_lone_quote() {
        let tokens = lex("\"");
        let token = tokens.get(tokens.first().unwrap());
        assert!(token.flags.contains(TokenFlags::ERROR_INCOMPLETE));
        assert_eq!(token.len(), 0);
    }

    #[test]
    fn test_edge_crlf_sequences() {
        let tokens = lex("a\r\nb\rc\nd");
        let ids: Vec<_> = tokens.ids().collect();
        let lines: Vec<_> = ids.iter().map(|id| tokens.get(*id).span.start.line).collect();
        assert_eq!(lines, [1, 2, 3, 4]);
    }

    #[test]
    fn test_edge_comment_tokens() {
        // `//` stays two successive specials; the parser skips the line
        let tokens = lex("// note\nx");
        let vals = values(&tokens);
        assert_eq!(vals, ["/", "/", "note", "x"]);
    }

    #[test]
    fn test_edge_sample_program() {
        let source = "\
increment :: function(a x) {\n\
    a + 1\n\
}\n";
        let tokens = lex(source);
        let vals: Vec<_> = tokens
            .iter()
            .filter(|(_, t)| !t.is_indent())
            .map(|(id, _)| tokens.value(id))
            .collect();
        assert_eq!(
            vals,
            ["increment", ":", ":", "function", "(", "a", "x", ")", "{", "a", "+", "1", "}"]
        );
    }

    #[test]
    fn test_edge_round_trip_without_whitespace() {
        // concatenating non-indent token values reproduces the source with
        // whitespace removed (no strings involved)
        let source = "a := b + 2 * (c.d) // tail";
        let tokens = lex(source);
        let joined: String = tokens
            .iter()
            .filter(|(_, t)| !t.is_indent())
            .map(|(id, _)| tokens.value(id))
            .collect();
        let stripped: String = source.chars().filter(|c| !c.is_whitespace()).collect();
        assert_eq!(joined, stripped);
    }
}
