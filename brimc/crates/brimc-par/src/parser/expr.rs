//! Expression parsing (Pratt / precedence climbing).
//!
//! The algorithm: parse a lead (prefix operator, grouping, or literal),
//! then loop over the operator of the current token, folding postfix and
//! infix applications into the running left-hand side while their binding
//! power clears `min_bp`. Declarations (`:=`, `::`) and calls are detected
//! inside the loop and dispatched out of it.
//!
//! `flags` is the context set; `Operator::CALL` marks argument position,
//! where a `,` ends the expression and is handed back to the call loop.

use crate::ast::{NodeId, NodeKind, NodeName};
use crate::operators::{
    infix_binding_power, postfix_binding_power, prefix_binding_power, Operator,
};
use brimc_lex::TokenId;
use brimc_util::{Diagnostic, DiagnosticCode};

use super::Parser;

impl<'a> Parser<'a> {
    /// Parse one expression at a minimum binding power.
    ///
    /// Returns `None` — attaching nothing to the tree — when no expression
    /// starts here: a brace, a comment line, or an invalid operator.
    pub(crate) fn parse_expression(&mut self, flags: Operator, min_bp: u8) -> Option<NodeId> {
        let lead = self.current?;
        let lead_token = self.token(lead);

        // braces never begin an expression; the scope parser owns them
        if lead_token.is_special() && matches!(self.tokens.first_byte(lead), b'{' | b'}') {
            return None;
        }

        let lead_op = self.operator_at(lead);

        if lead_op.is_comment() {
            self.skip_comment_line();
            return None;
        }

        self.advance();

        let mut lhs = if let Some(power) = prefix_binding_power(lead_op) {
            let node = self
                .ast
                .alloc(NodeKind::Expression, Some(NodeName::Token(lead)));
            if let Some(operand) = self.parse_expression(flags, power) {
                self.ast.append(node, operand);
            }
            node
        } else if lead_op == Operator::GROUPING {
            let node = self
                .ast
                .alloc(NodeKind::Expression, Some(NodeName::Token(lead)));
            if let Some(inner) = self.parse_expression(flags, 0) {
                self.ast.append(node, inner);
            }
            self.expect_special(b')', "`)` to close the grouping");
            node
        } else {
            self.ast
                .alloc(NodeKind::Literal, Some(NodeName::Token(lead)))
        };

        loop {
            let Some(op_id) = self.current else { break };
            let op = self.operator_at(op_id);

            if op.is_empty() {
                break;
            }

            if op.is_comment() {
                self.skip_comment_line();
                continue;
            }

            if let Some(power) = postfix_binding_power(op) {
                if power < min_bp {
                    break;
                }
                self.consume_operator(op);

                if op.base() == Operator::INDEX {
                    let node = self
                        .ast
                        .alloc(NodeKind::Expression, Some(NodeName::Static("INDEX_OPERATOR")));
                    self.ast.append(node, lhs);
                    if let Some(index) = self.parse_expression(flags, 0) {
                        self.ast.append(node, index);
                    }
                    self.expect_special(b']', "`]` to close the index");
                    lhs = node;
                } else {
                    let node = self
                        .ast
                        .alloc(NodeKind::Expression, Some(self.operator_name(op, op_id)));
                    self.ast.append(node, lhs);
                    lhs = node;
                }
                continue;
            }

            // in argument position a comma belongs to the call loop
            if flags.contains(Operator::CALL) && self.at_special(op_id, b',') {
                break;
            }

            if op.contains(Operator::INVALID) {
                self.handler.emit(
                    Diagnostic::error(
                        format!(
                            "`{}` is not an operator",
                            self.tokens.value(op_id)
                        ),
                        self.token(op_id).span,
                    )
                    .with_code(DiagnosticCode::INVALID_OPERATOR),
                );
                return None;
            }

            // `name := …` / `name :: …`: this was a declaration all along
            if op.is_declaration() {
                lhs = self.parse_declaration(lead)?;
                break;
            }

            if lead_token.is_identifier() && op == Operator::GROUPING {
                lhs = self.parse_call(lead, flags);
                continue;
            }

            let Some((left_power, right_power)) = infix_binding_power(op) else {
                break;
            };
            if left_power < min_bp {
                break;
            }
            self.consume_operator(op);

            if op.base() == Operator::TERNARY {
                let node = self
                    .ast
                    .alloc(NodeKind::Expression, Some(NodeName::Token(op_id)));
                self.ast.append(node, lhs);
                if let Some(middle) = self.parse_expression(flags, 0) {
                    self.ast.append(node, middle);
                }
                self.expect_special(b':', "`:` between ternary branches");
                if let Some(right) = self.parse_expression(flags, right_power) {
                    self.ast.append(node, right);
                }
                lhs = node;
            } else {
                let node = self
                    .ast
                    .alloc(NodeKind::Expression, Some(self.operator_name(op, op_id)));
                self.ast.append(node, lhs);
                if let Some(right) = self.parse_expression(flags, right_power) {
                    self.ast.append(node, right);
                }
                lhs = node;
            }
        }

        Some(lhs)
    }

    /// Parse a call after `identifier (`: the callee names the node, the
    /// arguments become its children.
    fn parse_call(&mut self, callee: TokenId, flags: Operator) -> NodeId {
        let call = self
            .ast
            .alloc(NodeKind::Call, Some(NodeName::Token(callee)));
        self.advance(); // `(`

        while let Some(id) = self.current {
            if self.at_special(id, b')') {
                break;
            }
            if self.at_special(id, b',') {
                self.advance();
                continue;
            }

            let before = self.current;
            if let Some(argument) = self.parse_expression(flags | Operator::CALL, 0) {
                self.ast.append(call, argument);
            }
            if self.current == before {
                self.advance();
            }
        }

        self.expect_special(b')', "`)` to close the call");
        call
    }

    /// Name for an operator-built node: the fused text for composites,
    /// the token's own value otherwise.
    fn operator_name(&self, op: Operator, token: TokenId) -> NodeName {
        match op.fused_text() {
            Some(text) => NodeName::Static(text),
            None => NodeName::Token(token),
        }
    }
}
