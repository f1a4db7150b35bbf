//! Declaration parsing: `name := value`, `name :: value`,
//! `name :: function(…) { … }`, and `name :: struct { … }`.
//!
//! The expression parser dispatches here when it meets a `:=`/`::` after a
//! lead token; the lead becomes the bound name.

use crate::ast::{NodeId, NodeKind, NodeName};
use crate::operators::Operator;
use brimc_lex::TokenId;
use brimc_util::{Diagnostic, DiagnosticCode};

use super::Parser;

impl<'a> Parser<'a> {
    /// Parse the remainder of a declaration; the cursor sits on the `:` of
    /// the `:=`/`::` operator.
    ///
    /// `function` and `struct` forms are recognized only after `::`; every
    /// other right-hand side is a plain value binding. A right-hand side
    /// that starts on the next line (an indent token) abandons the
    /// declaration.
    pub(crate) fn parse_declaration(&mut self, name: TokenId) -> Option<NodeId> {
        let op_id = self.current?;
        let op = self.operator_at(op_id);
        let is_const = op.contains(Operator::ASSIGN_CONST);
        self.consume_operator(op);

        let value_id = self.current?;
        let value_token = self.token(value_id);
        if value_token.is_indent() {
            self.handler.emit(
                Diagnostic::warning(
                    "a declaration's value must start on the same line",
                    value_token.span,
                )
                .with_code(DiagnosticCode::EXPECTED_TOKEN),
            );
            return None;
        }

        if is_const && value_token.is_identifier() {
            match self.tokens.value(value_id) {
                "function" => return self.parse_function_declaration(name),
                "struct" => return self.parse_struct_declaration(name),
                _ => {}
            }
        }

        let statement = self
            .ast
            .alloc(NodeKind::Statement, Some(NodeName::Token(name)));
        if let Some(value) = self.parse_expression(Operator::empty(), 0) {
            self.ast.append(statement, value);
        }
        Some(statement)
    }

    /// `name :: function(params) { body }`
    ///
    /// Always yields a function node with its parameter list (when `(` was
    /// present) followed by a body scope. A missing `{` produces an empty
    /// body scope; whatever stood in its place is left for the enclosing
    /// scope to consume.
    fn parse_function_declaration(&mut self, name: TokenId) -> Option<NodeId> {
        self.advance(); // `function`

        let function = self
            .ast
            .alloc(NodeKind::Function, Some(NodeName::Token(name)));

        if let Some(arguments) = self.parse_function_parameters() {
            self.ast.append(function, arguments);
        }

        let body = match self.parse_scope() {
            Some(body) => body,
            None => self.ast.alloc(NodeKind::Scope, None),
        };
        self.ast.append(function, body);

        Some(function)
    }

    /// Parse `(name type, name type, …)` into an arguments node.
    ///
    /// Parameters are `name type` pairs on one line; one literal child per
    /// pair, named by the parameter name. A `,` (or the closing `)`) drops
    /// a pending name that never got its type.
    fn parse_function_parameters(&mut self) -> Option<NodeId> {
        let open = self.current?;
        if !self.at_special(open, b'(') {
            self.handler.emit(
                Diagnostic::warning(
                    "expected `(` after `function`",
                    self.token(open).span,
                )
                .with_code(DiagnosticCode::EXPECTED_TOKEN),
            );
            return None;
        }
        self.advance();

        let arguments = self.ast.alloc(NodeKind::Arguments, None);
        let mut pending: Option<TokenId> = None;

        while let Some(id) = self.current {
            let token = self.token(id);

            if token.is_indent() {
                self.advance();
                continue;
            }

            if token.is_special() {
                match self.tokens.first_byte(id) {
                    b')' => {
                        self.drop_pending_parameter(&mut pending);
                        self.advance();
                        break;
                    }
                    b',' => {
                        self.drop_pending_parameter(&mut pending);
                        self.advance();
                        continue;
                    }
                    _ => {
                        self.advance();
                        continue;
                    }
                }
            }

            match pending {
                None => pending = Some(id),
                Some(name_id) => {
                    if self.token(name_id).span.start.line == token.span.start.line {
                        let parameter = self
                            .ast
                            .alloc(NodeKind::Literal, Some(NodeName::Token(name_id)));
                        self.ast.append(arguments, parameter);
                        pending = None;
                    } else {
                        // the pair broke across lines; start over with this
                        // token as the next name
                        pending = Some(id);
                    }
                }
            }
            self.advance();
        }

        Some(arguments)
    }

    fn drop_pending_parameter(&mut self, pending: &mut Option<TokenId>) {
        if let Some(name_id) = pending.take() {
            self.handler.emit(
                Diagnostic::warning(
                    format!(
                        "parameter `{}` is missing a type",
                        self.tokens.value(name_id)
                    ),
                    self.token(name_id).span,
                )
                .with_code(DiagnosticCode::EXPECTED_TOKEN),
            );
        }
    }

    /// `name :: struct { field type; … }`
    ///
    /// Fields are `name type` pairs on one line, separated by `;` or a
    /// newline; indent tokens and `;` re-arm the readiness flag, so tokens
    /// trailing a completed field on the same line are ignored.
    fn parse_struct_declaration(&mut self, name: TokenId) -> Option<NodeId> {
        self.advance(); // `struct`

        let open = self.current?;
        if !self.at_special(open, b'{') {
            self.handler.emit(
                Diagnostic::warning(
                    "expected `{` after `struct`",
                    self.token(open).span,
                )
                .with_code(DiagnosticCode::EXPECTED_TOKEN),
            );
            return None;
        }
        self.advance();

        let node = self.ast.alloc(NodeKind::Struct, Some(NodeName::Token(name)));
        let mut field_name: Option<TokenId> = None;
        let mut ready = true;

        while let Some(id) = self.current {
            let token = self.token(id);

            if token.is_indent() {
                ready = true;
                self.advance();
                continue;
            }

            if token.is_special() {
                match self.tokens.first_byte(id) {
                    b';' => {
                        self.advance();
                        if let Some(lonely) = field_name {
                            self.handler.emit(
                                Diagnostic::warning(
                                    format!(
                                        "struct field `{}` is missing a type",
                                        self.tokens.value(lonely)
                                    ),
                                    self.token(lonely).span,
                                )
                                .with_code(DiagnosticCode::EXPECTED_TOKEN),
                            );
                            break;
                        }
                        ready = true;
                        continue;
                    }
                    b'}' => {
                        self.advance();
                        break;
                    }
                    _ => {
                        self.handler.emit(
                            Diagnostic::warning(
                                format!(
                                    "unexpected `{}` in struct body",
                                    self.tokens.value(id)
                                ),
                                token.span,
                            )
                            .with_code(DiagnosticCode::EXPECTED_TOKEN),
                        );
                        self.advance();
                        break;
                    }
                }
            }

            if ready {
                match field_name {
                    None => field_name = Some(id),
                    Some(fname) => {
                        if self.token(fname).span.start.line != token.span.start.line {
                            self.handler.emit(
                                Diagnostic::warning(
                                    "a struct field's name and type must share a line",
                                    token.span,
                                )
                                .with_code(DiagnosticCode::EXPECTED_TOKEN),
                            );
                            break;
                        }
                        let field = self
                            .ast
                            .alloc(NodeKind::StructField, Some(NodeName::Token(fname)));
                        self.ast.append(node, field);
                        field_name = None;
                        ready = false;
                    }
                }
            }
            self.advance();
        }

        Some(node)
    }
}
