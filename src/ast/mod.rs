//! Surface expression tree consumed by the type checker.
//!
//! The parser collaborator produces these nodes; the inference engine in
//! [`crate::types`] only walks them. Every node carries a [`Loc`] that is
//! used exclusively for diagnostics: a node whose location is the default
//! (all zeros) still type-checks, its errors just cannot point anywhere.

pub mod expression;

pub use expression::{
    Assign, BinOp, Binary, Block, BooleanLit, Call, Expr, FunctionBody, FunctionExpr, Ident, If,
    Let, NullLit, NumberLit, Param, ParamDefault, Return, StringLit, Throw, UndefinedLit,
};

use std::fmt;

/// A point in the source text. Lines are 1-based, columns 0-based,
/// matching what the language-server collaborator expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pos {
    pub line: usize,
    pub column: usize,
}

impl Pos {
    pub fn new(line: usize, column: usize) -> Self {
        Pos { line, column }
    }
}

/// Source region covered by a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Loc {
    pub start: Pos,
    pub end: Pos,
}

impl Loc {
    pub fn new(start: Pos, end: Pos) -> Self {
        Loc { start, end }
    }

    /// Single-line convenience: `line`, then start and end columns.
    pub fn line(line: usize, start_column: usize, end_column: usize) -> Self {
        Loc {
            start: Pos::new(line, start_column),
            end: Pos::new(line, end_column),
        }
    }

    /// True for nodes the parser produced without location information.
    pub fn is_unknown(&self) -> bool {
        *self == Loc::default()
    }
}

impl fmt::Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.start.line, self.start.column)
    }
}

/// A program is an ordered list of top-level expressions.
///
/// The driver in [`crate::types::check`] walks them in order; a failed
/// top-level does not stop the ones after it from being examined.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub body: Vec<Expr>,
}

impl Program {
    pub fn new(body: Vec<Expr>) -> Self {
        Program { body }
    }
}
