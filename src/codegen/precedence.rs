//! Operator precedence for generated expressions.
//!
//! Higher numbers bind tighter. A sub-expression is wrapped in parentheses
//! only when it binds looser than the position it is substituted into.

use crate::block::ValueExpr;

/// Lowest precedence: any expression fits without parentheses.
pub const NONE: u8 = 0;
pub const ADDITIVE: u8 = 6;
pub const MULTIPLICATIVE: u8 = 7;
/// Literals, names and calls.
pub const ATOMIC: u8 = 9;

/// Generated code for a value expression and how tightly it binds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expr {
    pub code: String,
    pub precedence: u8,
}

impl Expr {
    pub fn atomic(code: String) -> Self {
        Self {
            code,
            precedence: ATOMIC,
        }
    }

    /// Renders the expression for a position requiring `required` precedence.
    pub fn in_position(self, required: u8) -> String {
        if self.precedence < required {
            format!("({})", self.code)
        } else {
            self.code
        }
    }
}

/// Generates a value expression. Every current value kind is an integer literal.
///
/// A negative literal is still atomic in the target language when used as a
/// call argument, which is the only position values are substituted into.
pub fn value_to_expr(value: &ValueExpr) -> Expr {
    Expr::atomic(value.degrees().to_string())
}
