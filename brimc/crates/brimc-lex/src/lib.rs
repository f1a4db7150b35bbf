//! brimc-lex - Lexical analysis for the Brim language.
//!
//! The lexer is a single-pass, byte-oriented tokenizer. It produces a
//! [`TokenList`] — token records plus their copied lexeme bytes, both in
//! stable arenas — and records two things other lexers usually resolve
//! themselves:
//!
//! - **Adjacency, not fusion.** `:=`, `==`, `<<`, `//` and friends are left
//!   as single-byte specials carrying the `SUCCESSIVE` flag; the parser's
//!   operator table fuses them. The lexer never has to decide whether `::`
//!   is one operator or two.
//! - **Indentation.** Leading whitespace becomes an indent token (space or
//!   tab kind, maximal same-byte run), at most one per line. The brace
//!   grammar ignores them beyond statement separation, but they are
//!   tracked for any future indentation-aware front end.
//!
//! Lexing is total: malformed numbers and unterminated strings yield
//! error-flagged tokens plus a diagnostic, and the lexer always reaches the
//! end of its input.
//!
//! # Example
//!
//! ```
//! use brimc_lex::{Lexer, TokenFlags};
//! use brimc_util::Handler;
//!
//! let handler = Handler::new();
//! let tokens = Lexer::new("x := 1.5", &handler).tokenize();
//!
//! let flags: Vec<_> = tokens.ids().map(|id| tokens.get(id).flags).collect();
//! assert!(flags[0].contains(TokenFlags::IDENTIFIER));
//! assert!(flags[2].contains(TokenFlags::SUCCESSIVE)); // `=` right after `:`
//! assert!(flags[3].contains(TokenFlags::DOUBLE));
//! ```

pub mod cursor;
pub mod lexer;
pub mod token;

mod edge_cases;

pub use cursor::Cursor;
pub use lexer::{is_newline, is_special, is_whitespace, Lexer, LexerOptions};
pub use token::{TextRange, Token, TokenFlags, TokenId, TokenList};
