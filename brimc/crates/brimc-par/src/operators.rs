//! The operator table.
//!
//! A pure mapping from a token — together with its successor — to an
//! [`Operator`] value, plus the binding-power queries the Pratt expression
//! parser consults. Two-byte operators are recognized here, not in the
//! lexer: the second token must be a special carrying the `SUCCESSIVE`
//! flag and the expected byte. `//` fuses to a bare `COMPOSITE` with no
//! base operator, which the parser treats as the comment sentinel.
//!
//! # Binding powers (higher binds tighter)
//!
//! | Query   | Operators                       | Powers  |
//! |---------|---------------------------------|---------|
//! | prefix  | `!` `~`                         | 9       |
//! | infix   | `?:`                            | (4, 3)  |
//! | infix   | `+` `-`                         | (5, 6)  |
//! | infix   | `*` `/` `==` `<` `>` `<<` `>>`  | (7, 8)  |
//! | infix   | `.`                             | (14,13) |
//! | postfix | `[` `++` `--`                   | 11      |
//!
//! Right-associativity of the ternary is the descending (4, 3) pair;
//! member access is right-tight so `a.b.c` groups as `a.(b.c)`.
//! Assignment forms (`=`, `+=`, …), comparisons with `=` (`<=`, `>=`),
//! and the logical/bitwise family (`&`, `|`, `^`, `&&`, `||`) carry no
//! binding power: an expression simply stops in front of them.

use bitflags::bitflags;
use brimc_lex::{TokenId, TokenList};

bitflags! {
    /// A base operator combined with attribute bits.
    ///
    /// The empty set is "no operator here" (closing delimiters, semicolons,
    /// non-special tokens). `COMPOSITE` marks an operator fused from two
    /// successive specials; `COMPOSITE` alone is the `//` comment sentinel.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Operator: u32 {
        /// Fused from two successive special tokens.
        const COMPOSITE = 1 << 0;

        const ADD = 1 << 1;
        const SUBTRACT = 1 << 2;
        const MULTIPLY = 1 << 3;
        const DIVIDE = 1 << 4;
        const INCREMENT = 1 << 5;
        const DECREMENT = 1 << 6;

        /// Plain `=` assignment.
        const ASSIGN = 1 << 7;
        /// The `:` of a declaration.
        const ASSIGN_TYPE = 1 << 8;
        /// The second `:` of a `::` const declaration.
        const ASSIGN_CONST = 1 << 9;

        const EQUAL = 1 << 10;
        const GREATER = 1 << 11;
        const LESS = 1 << 12;

        const AND = 1 << 13;
        const OR = 1 << 14;
        const NOT = 1 << 15;
        const XOR = 1 << 16;
        const BITWISE = 1 << 17;
        const LEFT_SHIFT = 1 << 18;
        const RIGHT_SHIFT = 1 << 19;

        const TERNARY = 1 << 20;
        const GROUPING = 1 << 21;
        /// Call context; also used as the in-call-arguments flag of the
        /// expression parser (arguments stop at commas).
        const CALL = 1 << 22;
        const INDEX = 1 << 23;
        const MEMBER = 1 << 24;

        /// Punctuation with no meaning in expression position.
        const INVALID = 1 << 30;
    }
}

impl Operator {
    /// The operator with the `COMPOSITE` attribute stripped.
    #[inline]
    pub fn base(self) -> Operator {
        self & !Operator::COMPOSITE
    }

    /// The `//` comment sentinel: composite with no base operator.
    #[inline]
    pub fn is_comment(self) -> bool {
        self == Operator::COMPOSITE
    }

    /// A `:=` or `::` declaration operator.
    #[inline]
    pub fn is_declaration(self) -> bool {
        self.contains(Operator::ASSIGN_TYPE)
            && (self.contains(Operator::ASSIGN) || self.contains(Operator::ASSIGN_CONST))
    }

    /// Number of tokens this operator spans in the stream.
    #[inline]
    pub fn token_count(self) -> usize {
        if self.contains(Operator::COMPOSITE) {
            2
        } else {
            1
        }
    }

    /// Fused textual form of a composite operator.
    pub fn fused_text(self) -> Option<&'static str> {
        if !self.contains(Operator::COMPOSITE) {
            return None;
        }
        let base = self.base();
        let text = if base == (Operator::ASSIGN_TYPE | Operator::ASSIGN) {
            ":="
        } else if base == (Operator::ASSIGN_TYPE | Operator::ASSIGN_CONST) {
            "::"
        } else if base == (Operator::ADD | Operator::ASSIGN) {
            "+="
        } else if base == (Operator::SUBTRACT | Operator::ASSIGN) {
            "-="
        } else if base == (Operator::MULTIPLY | Operator::ASSIGN) {
            "*="
        } else if base == (Operator::DIVIDE | Operator::ASSIGN) {
            "/="
        } else if base == Operator::INCREMENT {
            "++"
        } else if base == Operator::DECREMENT {
            "--"
        } else if base == Operator::EQUAL {
            "=="
        } else if base == (Operator::LESS | Operator::EQUAL) {
            "<="
        } else if base == (Operator::GREATER | Operator::EQUAL) {
            ">="
        } else if base == (Operator::LEFT_SHIFT | Operator::BITWISE) {
            "<<"
        } else if base == (Operator::RIGHT_SHIFT | Operator::BITWISE) {
            ">>"
        } else if base == Operator::AND {
            "&&"
        } else if base == Operator::OR {
            "||"
        } else if base.is_empty() {
            "//"
        } else {
            return None;
        };
        Some(text)
    }
}

/// Whether the token after `id` is a successive special with the expected
/// byte — the fusion test.
fn successor_is(tokens: &TokenList, id: TokenId, expected: u8) -> bool {
    match tokens.next(id) {
        Some(next) => {
            let token = tokens.get(next);
            token.is_special() && token.is_successive() && tokens.first_byte(next) == expected
        }
        None => false,
    }
}

/// Map a token (with its successor) to an operator value.
///
/// Non-special tokens and the closing delimiters `)`, `]`, `{`, `}`, `;`
/// map to no operator at all.
///
/// # Example
///
/// ```
/// use brimc_lex::Lexer;
/// use brimc_par::operators::{operator_for, Operator};
/// use brimc_util::Handler;
///
/// let handler = Handler::new();
/// let tokens = Lexer::new("a := 1", &handler).tokenize();
/// let colon = tokens.ids().nth(1).unwrap();
///
/// let op = operator_for(&tokens, colon);
/// assert!(op.is_declaration());
/// assert!(op.contains(Operator::COMPOSITE));
/// ```
pub fn operator_for(tokens: &TokenList, id: TokenId) -> Operator {
    let token = tokens.get(id);
    if !token.is_special() {
        return Operator::empty();
    }

    let assign_composite = Operator::ASSIGN | Operator::COMPOSITE;

    match tokens.first_byte(id) {
        b')' | b']' | b'{' | b'}' | b';' => Operator::empty(),

        b':' => {
            if successor_is(tokens, id, b'=') {
                Operator::ASSIGN_TYPE | assign_composite
            } else if successor_is(tokens, id, b':') {
                Operator::ASSIGN_TYPE | Operator::ASSIGN_CONST | Operator::COMPOSITE
            } else {
                Operator::ASSIGN_TYPE
            }
        }
        b'+' => {
            if successor_is(tokens, id, b'=') {
                Operator::ADD | assign_composite
            } else if successor_is(tokens, id, b'+') {
                Operator::INCREMENT | Operator::COMPOSITE
            } else {
                Operator::ADD
            }
        }
        b'-' => {
            if successor_is(tokens, id, b'=') {
                Operator::SUBTRACT | assign_composite
            } else if successor_is(tokens, id, b'-') {
                Operator::DECREMENT | Operator::COMPOSITE
            } else {
                Operator::SUBTRACT
            }
        }
        b'*' => {
            if successor_is(tokens, id, b'=') {
                Operator::MULTIPLY | assign_composite
            } else {
                Operator::MULTIPLY
            }
        }
        b'/' => {
            if successor_is(tokens, id, b'=') {
                Operator::DIVIDE | assign_composite
            } else if successor_is(tokens, id, b'/') {
                Operator::COMPOSITE
            } else {
                Operator::DIVIDE
            }
        }
        b'=' => {
            if successor_is(tokens, id, b'=') {
                Operator::EQUAL | Operator::COMPOSITE
            } else {
                Operator::ASSIGN
            }
        }
        b'<' => {
            if successor_is(tokens, id, b'=') {
                Operator::LESS | Operator::EQUAL | Operator::COMPOSITE
            } else if successor_is(tokens, id, b'<') {
                Operator::LEFT_SHIFT | Operator::BITWISE | Operator::COMPOSITE
            } else {
                Operator::LESS
            }
        }
        b'>' => {
            if successor_is(tokens, id, b'=') {
                Operator::GREATER | Operator::EQUAL | Operator::COMPOSITE
            } else if successor_is(tokens, id, b'>') {
                Operator::RIGHT_SHIFT | Operator::BITWISE | Operator::COMPOSITE
            } else {
                Operator::GREATER
            }
        }
        b'&' => {
            if successor_is(tokens, id, b'&') {
                Operator::AND | Operator::COMPOSITE
            } else {
                Operator::AND | Operator::BITWISE
            }
        }
        b'|' => {
            if successor_is(tokens, id, b'|') {
                Operator::OR | Operator::COMPOSITE
            } else {
                Operator::OR | Operator::BITWISE
            }
        }
        b'^' => Operator::XOR | Operator::BITWISE,
        b'!' => Operator::NOT,
        b'~' => Operator::NOT | Operator::BITWISE,
        b'?' => Operator::TERNARY,
        b'(' => Operator::GROUPING,
        b'[' => Operator::INDEX,
        b'.' => Operator::MEMBER,

        _ => Operator::INVALID,
    }
}

/// Prefix binding power, if the operator can lead an expression.
pub fn prefix_binding_power(op: Operator) -> Option<u8> {
    let base = op.base();
    if base == Operator::NOT || base == (Operator::NOT | Operator::BITWISE) {
        Some(9)
    } else {
        None
    }
}

/// Infix (left, right) binding powers.
pub fn infix_binding_power(op: Operator) -> Option<(u8, u8)> {
    let base = op.base();
    if base == Operator::TERNARY {
        Some((4, 3))
    } else if base == Operator::ADD || base == Operator::SUBTRACT {
        Some((5, 6))
    } else if base == Operator::MULTIPLY
        || base == Operator::DIVIDE
        || base == Operator::EQUAL
        || base == Operator::LESS
        || base == Operator::GREATER
        || base == (Operator::LEFT_SHIFT | Operator::BITWISE)
        || base == (Operator::RIGHT_SHIFT | Operator::BITWISE)
    {
        Some((7, 8))
    } else if base == Operator::MEMBER {
        Some((14, 13))
    } else {
        None
    }
}

/// Postfix binding power.
pub fn postfix_binding_power(op: Operator) -> Option<u8> {
    let base = op.base();
    if base == Operator::INDEX || base == Operator::INCREMENT || base == Operator::DECREMENT {
        Some(11)
    } else {
        None
    }
}
