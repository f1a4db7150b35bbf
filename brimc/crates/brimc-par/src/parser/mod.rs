//! The Brim parser.
//!
//! Recursive descent over the token list with a Pratt expression core. The
//! parser is permissive: a production that runs into something unexpected
//! reports a diagnostic, yields nothing, and lets the enclosing scope carry
//! on with whatever it already built. There is no panic-mode recovery and
//! nothing here ever aborts a compile.
//!
//! Layout mirrors the grammar: this module owns the parser state, cursor
//! discipline, and scope parsing; `expr` holds the Pratt expression loop;
//! `decl` the `:=`/`::` declarations; `flow` the control-flow forms.

mod decl;
mod expr;
mod flow;

use brimc_lex::{Token, TokenId, TokenList};
use brimc_util::span::Span;
use brimc_util::{Diagnostic, DiagnosticCode, Handler};

use crate::ast::{Ast, AstOptions, NodeId, NodeKind};
use crate::operators::{operator_for, Operator};

use flow::control_flow_kind;

/// Parser over a lexed token list.
///
/// Holds a "current token" cursor and the AST arena under construction.
/// One parser per compile call; [`Parser::parse`] consumes it and returns
/// the finished arena.
///
/// # Example
///
/// ```
/// use brimc_lex::Lexer;
/// use brimc_par::{ast::NodeKind, Parser};
/// use brimc_util::Handler;
///
/// let handler = Handler::new();
/// let tokens = Lexer::new("a := 55", &handler).tokenize();
/// let ast = Parser::new(&tokens, &handler).parse();
///
/// let scope = ast.first_child(ast.root()).unwrap();
/// assert_eq!(ast.kind(scope), NodeKind::Scope);
/// ```
pub struct Parser<'a> {
    /// Token stream from the lexer.
    tokens: &'a TokenList,

    /// Current position in the token stream.
    current: Option<TokenId>,

    /// AST arena under construction.
    ast: Ast,

    /// Diagnostic collector.
    handler: &'a Handler,
}

impl<'a> Parser<'a> {
    /// Create a parser with default arena options.
    pub fn new(tokens: &'a TokenList, handler: &'a Handler) -> Self {
        Self::with_options(tokens, handler, AstOptions::default())
    }

    /// Create a parser with an explicit arena capacity.
    pub fn with_options(tokens: &'a TokenList, handler: &'a Handler, options: AstOptions) -> Self {
        Self {
            tokens,
            current: tokens.first(),
            ast: Ast::with_options(options),
            handler,
        }
    }

    /// Parse the whole token stream into an AST.
    ///
    /// The file-level scope starts at the very first token and becomes the
    /// single child of the arena root.
    pub fn parse(mut self) -> Ast {
        let root = self.ast.root();
        let scope = self.ast.alloc(NodeKind::Scope, None);
        self.parse_scope_items(scope);
        self.ast.append(root, scope);
        self.ast
    }

    // =========================================================================
    // SCOPES
    // =========================================================================

    /// Parse a brace-delimited scope; the current token must be `{`.
    ///
    /// Returns `None` (and reports) when the opening brace is missing.
    pub(crate) fn parse_scope(&mut self) -> Option<NodeId> {
        let id = self.current?;
        if !self.at_special(id, b'{') {
            self.expected("`{` to open a scope", id);
            return None;
        }
        self.advance();

        let scope = self.ast.alloc(NodeKind::Scope, None);
        self.parse_scope_items(scope);
        Some(scope)
    }

    /// The scope item loop, shared by child scopes and the file level.
    ///
    /// Skips indent tokens, recurses into `{` scopes, dispatches control
    /// flow keywords, and parses everything else as one expression.
    /// Terminates on `}` (consuming it) or end of stream.
    fn parse_scope_items(&mut self, scope: NodeId) {
        while let Some(id) = self.current {
            let token = self.token(id);

            if token.is_indent() {
                self.advance();
                continue;
            }

            if token.is_special() {
                match self.tokens.first_byte(id) {
                    b'{' => {
                        if let Some(child) = self.parse_scope() {
                            self.ast.append(scope, child);
                        }
                        continue;
                    }
                    b'}' => {
                        self.advance();
                        return;
                    }
                    _ => {}
                }
            }

            if token.is_identifier() {
                if let Some(kind) = control_flow_kind(self.tokens.value(id)) {
                    if let Some(node) = self.parse_control_flow(kind) {
                        self.ast.append(scope, node);
                    }
                    continue;
                }
            }

            let before = self.current;
            if let Some(node) = self.parse_expression(Operator::empty(), 0) {
                self.ast.append(scope, node);
            }
            if self.current == before {
                // the production consumed nothing; skip the token rather
                // than spin on it
                self.advance();
            }
        }
    }

    // =========================================================================
    // CURSOR HELPERS
    // =========================================================================

    /// Advance the cursor by one token.
    #[inline]
    pub(crate) fn advance(&mut self) {
        self.current = self.current.and_then(|id| self.tokens.next(id));
    }

    /// Consume every token an operator was fused from.
    #[inline]
    pub(crate) fn consume_operator(&mut self, op: Operator) {
        for _ in 0..op.token_count() {
            self.advance();
        }
    }

    /// Token record for an id.
    #[inline]
    pub(crate) fn token(&self, id: TokenId) -> &'a Token {
        self.tokens.get(id)
    }

    /// The operator value of a token, with fusion.
    #[inline]
    pub(crate) fn operator_at(&self, id: TokenId) -> Operator {
        operator_for(self.tokens, id)
    }

    /// Whether a token is a specific special byte.
    #[inline]
    pub(crate) fn at_special(&self, id: TokenId, byte: u8) -> bool {
        self.token(id).is_special() && self.tokens.first_byte(id) == byte
    }

    /// Consume an expected special byte, reporting when it is absent.
    ///
    /// The cursor does not move on a mismatch; the caller's production
    /// continues with what it has.
    pub(crate) fn expect_special(&mut self, byte: u8, context: &str) {
        match self.current {
            Some(id) if self.at_special(id, byte) => self.advance(),
            Some(id) => self.expected(context, id),
            None => self.handler.emit(
                Diagnostic::warning(
                    format!("expected {} but the input ended", context),
                    self.end_span(),
                )
                .with_code(DiagnosticCode::EXPECTED_TOKEN),
            ),
        }
    }

    /// Skip tokens to the end of the current source line (comments).
    pub(crate) fn skip_comment_line(&mut self) {
        let Some(start) = self.current else { return };
        let line = self.token(start).span.start.line;
        while let Some(id) = self.current {
            if self.token(id).span.start.line != line {
                break;
            }
            self.advance();
        }
    }

    fn expected(&self, context: &str, at: TokenId) {
        self.handler.emit(
            Diagnostic::warning(
                format!(
                    "expected {}, found `{}`",
                    context,
                    self.tokens.value(at)
                ),
                self.token(at).span,
            )
            .with_code(DiagnosticCode::EXPECTED_TOKEN),
        );
    }

    fn end_span(&self) -> Span {
        match self.tokens.ids().last() {
            Some(id) => self.token(id).span,
            None => Span::DUMMY,
        }
    }
}
