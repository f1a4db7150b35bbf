//! Control-flow parsing: `if`/`else`, `while`, `do … while`, `for`,
//! `continue`, `break`.
//!
//! Marker children (CONDITION, IF_TRUE, ELSE, ARGUMENTS, …) carry the kind
//! of their construct; conditions and `for` header slots all run through
//! the same expression parser at power 0.

use crate::ast::{NodeId, NodeKind, NodeName};
use crate::operators::Operator;
use brimc_util::{Diagnostic, DiagnosticCode};

use super::Parser;

/// Map a keyword to its control-flow node kind.
pub(crate) fn control_flow_kind(value: &str) -> Option<NodeKind> {
    match value {
        "if" => Some(NodeKind::If),
        "for" => Some(NodeKind::For),
        "do" => Some(NodeKind::DoWhile),
        "while" => Some(NodeKind::While),
        "continue" => Some(NodeKind::Continue),
        "break" => Some(NodeKind::Break),
        _ => None,
    }
}

impl<'a> Parser<'a> {
    /// Parse the control-flow form for `kind`; the cursor sits on the
    /// keyword.
    pub(crate) fn parse_control_flow(&mut self, kind: NodeKind) -> Option<NodeId> {
        self.advance(); // keyword

        let node = self.ast.alloc(kind, None);
        match kind {
            NodeKind::If => {
                self.parse_if(node);
                Some(node)
            }
            NodeKind::While => {
                self.parse_while(node);
                Some(node)
            }
            NodeKind::DoWhile => self.parse_do_while(node),
            NodeKind::For => {
                self.parse_for(node);
                Some(node)
            }
            // continue / break are standalone
            _ => Some(node),
        }
    }

    /// `if cond { … }` with an optional `else { … }` / `else if …`.
    fn parse_if(&mut self, node: NodeId) {
        let true_path = self
            .ast
            .alloc(NodeKind::If, Some(NodeName::Static("IF_TRUE")));
        let condition = self
            .ast
            .alloc(NodeKind::If, Some(NodeName::Static("CONDITION")));

        if let Some(expr) = self.parse_expression(Operator::empty(), 0) {
            self.ast.append(condition, expr);
        }
        self.ast.append(true_path, condition);
        if let Some(body) = self.parse_scope() {
            self.ast.append(true_path, body);
        }
        self.ast.append(node, true_path);

        let Some(id) = self.current else { return };
        if !(self.token(id).is_identifier() && self.tokens.value(id) == "else") {
            return;
        }
        self.advance(); // `else`

        let else_path = self.ast.alloc(NodeKind::If, Some(NodeName::Static("ELSE")));
        if let Some(next) = self.current {
            if self.at_special(next, b'{') {
                if let Some(body) = self.parse_scope() {
                    self.ast.append(else_path, body);
                }
            } else if self.token(next).is_identifier() && self.tokens.value(next) == "if" {
                if let Some(nested) = self.parse_control_flow(NodeKind::If) {
                    self.ast.append(else_path, nested);
                }
            }
        }
        self.ast.append(node, else_path);
    }

    /// `while cond { … }`
    fn parse_while(&mut self, node: NodeId) {
        let condition = self
            .ast
            .alloc(NodeKind::While, Some(NodeName::Static("CONDITION")));
        let expr = self.parse_expression(Operator::empty(), 0);
        let body = self.parse_scope();

        self.ast.append(node, condition);
        if let Some(expr) = expr {
            self.ast.append(condition, expr);
        }
        if let Some(body) = body {
            self.ast.append(node, body);
        }
    }

    /// `do { … } while cond`
    ///
    /// Yields nothing when the body brace or the trailing `while` keyword
    /// is missing.
    fn parse_do_while(&mut self, node: NodeId) -> Option<NodeId> {
        let open = self.current?;
        if !self.at_special(open, b'{') {
            self.handler.emit(
                Diagnostic::warning("expected `{` after `do`", self.token(open).span)
                    .with_code(DiagnosticCode::EXPECTED_TOKEN),
            );
            return None;
        }

        let body = self.parse_scope()?;

        let kw = self.current?;
        if !(self.token(kw).is_identifier() && self.tokens.value(kw) == "while") {
            self.handler.emit(
                Diagnostic::warning(
                    "expected `while` after the `do` body",
                    self.token(kw).span,
                )
                .with_code(DiagnosticCode::EXPECTED_TOKEN),
            );
            return None;
        }
        self.advance(); // `while`

        let condition = self
            .ast
            .alloc(NodeKind::DoWhile, Some(NodeName::Static("CONDITION")));
        self.ast.append(node, condition);
        if let Some(expr) = self.parse_expression(Operator::empty(), 0) {
            self.ast.append(condition, expr);
        }
        self.ast.append(node, body);
        Some(node)
    }

    /// `for init; cond; step { … }` or `for { … }`.
    ///
    /// Header slots are `;`-separated; a slot that closes without an
    /// expression leaves an ARGUMENT_PART_EMPTY placeholder.
    fn parse_for(&mut self, node: NodeId) {
        let has_header = match self.current {
            Some(id) => !self.at_special(id, b'{'),
            None => false,
        };

        if has_header {
            let arguments = self
                .ast
                .alloc(NodeKind::For, Some(NodeName::Static("ARGUMENTS")));
            let mut slot_filled = false;

            while let Some(id) = self.current {
                if self.at_special(id, b';') {
                    if !slot_filled {
                        let empty = self
                            .ast
                            .alloc(NodeKind::For, Some(NodeName::Static("ARGUMENT_PART_EMPTY")));
                        self.ast.append(arguments, empty);
                    }
                    slot_filled = false;
                    self.advance();
                    continue;
                }
                if self.at_special(id, b'{') {
                    break;
                }

                let before = self.current;
                if let Some(expr) = self.parse_expression(Operator::empty(), 0) {
                    let wrapper = self
                        .ast
                        .alloc(NodeKind::For, Some(NodeName::Static("ARGUMENT_EXPRESSION")));
                    self.ast.append(wrapper, expr);
                    self.ast.append(arguments, wrapper);
                    slot_filled = true;
                }
                if self.current == before {
                    self.advance();
                }
            }

            self.ast.append(node, arguments);
        }

        if let Some(body) = self.parse_scope() {
            self.ast.append(node, body);
        }
    }
}
