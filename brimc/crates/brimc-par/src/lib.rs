//! brimc-par - Parsing for the Brim language.
//!
//! ============================================================================
//! OVERVIEW
//! ============================================================================
//!
//! This crate turns the token list produced by `brimc-lex` into an abstract
//! syntax tree. Three pieces cooperate:
//!
//! - [`operators`]: the pure token → operator mapping. Multi-byte operators
//!   (`:=`, `==`, `<<`, `++`, the `//` comment sentinel) are fused here
//!   from successive special tokens; the lexer never splits or joins them.
//! - [`ast`]: the node arena. Nodes reference each other by arena index,
//!   so the tree can grow without ever moving or invalidating a node.
//! - [`parser`]: recursive descent for scopes, declarations, and control
//!   flow around a Pratt loop for expressions.
//!
//! The parser is deliberately permissive. A production that cannot finish
//! reports a diagnostic and yields nothing; the enclosing scope keeps the
//! children it already has and moves on. Error-flagged tokens from the
//! lexer flow through untouched — deciding what to do about them belongs
//! to later phases.
//!
//! ============================================================================
//! ENTRY POINT
//! ============================================================================
//!
//! [`parse`] runs both phases and hands back a [`Parse`] owning the token
//! arena, the node arena, and the collected diagnostics. Everything a
//! compile call allocates is released when the `Parse` drops.
//!
//! ```
//! use brimc_par::{ast::NodeKind, parse};
//!
//! let result = parse("a := 55");
//! assert!(result.ok());
//!
//! let ast = result.ast();
//! let scope = result.file_scope();
//! let statement = ast.first_child(scope).unwrap();
//! assert_eq!(ast.kind(statement), NodeKind::Statement);
//! assert_eq!(ast.name(statement, result.tokens()), Some("a"));
//! ```

pub mod ast;
pub mod operators;
mod parser;

mod edge_cases;

pub use parser::Parser;

use brimc_lex::{Lexer, TokenList};
use brimc_util::{Diagnostic, Handler, Level};

use ast::{Ast, NodeId};

/// Result of parsing a Brim source file.
///
/// Owns the token arena, the node arena, and the diagnostics of one
/// compile call; dropping it releases all three.
pub struct Parse {
    tokens: TokenList,
    ast: Ast,
    diagnostics: Vec<Diagnostic>,
}

impl Parse {
    /// The syntax tree.
    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    /// The token list the tree's names point into.
    pub fn tokens(&self) -> &TokenList {
        &self.tokens
    }

    /// Diagnostics collected while lexing and parsing.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Whether no error-level diagnostics were reported.
    pub fn ok(&self) -> bool {
        self.diagnostics.iter().all(|d| d.level != Level::Error)
    }

    /// The arena root node.
    pub fn root(&self) -> NodeId {
        self.ast.root()
    }

    /// The file-level scope (the root's single child).
    pub fn file_scope(&self) -> NodeId {
        self.ast.first_child(self.ast.root()).unwrap_or_else(|| self.ast.root())
    }

    /// Compact one-line rendering of the file scope, for tests and
    /// troubleshooting.
    pub fn debug_tree(&self) -> String {
        self.ast.debug_tree(self.file_scope(), &self.tokens)
    }
}

/// Lex and parse a source buffer.
///
/// Never fails: any input yields a tree (possibly just an empty file
/// scope) plus diagnostics describing whatever was wrong with it.
pub fn parse(source: &str) -> Parse {
    let handler = Handler::new();
    let tokens = Lexer::new(source, &handler).tokenize();
    let ast = Parser::new(&tokens, &handler).parse();
    Parse {
        tokens,
        ast,
        diagnostics: handler.take_diagnostics(),
    }
}
