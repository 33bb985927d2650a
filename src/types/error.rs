//! # Type Error Definitions
//!
//! Errors produced by the inference engine:
//!
//! - A name is referenced or assigned but not bound (`UnboundVariable`)
//! - Two types cannot be reconciled (`TypeMismatch`)
//! - A type would have to contain itself (`SelfReference`)
//! - A construct the checker recognises but does not handle
//!   (`Unsupported`)
//!
//! ## Error Reporting
//!
//! Every error carries the [`Loc`] of the offending expression; the
//! `Display` implementation appends the location when one is attached.
//! [`Diagnostic`] is the flattened `(message, loc)` pair the
//! language-server collaborator consumes.
//!
//! ## Related Modules
//!
//! - [`crate::types::infer`] - inference that produces these errors
//! - [`crate::types::unify`] - unifier errors upgraded to `TypeError`
//! - [`crate::types::check`] - driver that batches them per program

use std::fmt;

use crate::ast::Loc;

use super::ty::{Type, TypeVar};
use super::unify::UnifyError;

/// Type error encountered during inference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// Reference to a name with no binding in scope.
    UnboundVariable { name: String, loc: Loc },

    /// Two types that had to be reconciled could not be.
    TypeMismatch {
        expected: Type,
        found: Type,
        loc: Loc,
        /// Optional note about where the requirement came from.
        context: Option<String>,
    },

    /// Unification would have produced a type containing itself.
    SelfReference { var: TypeVar, ty: Type, loc: Loc },

    /// A recognised construct the checker does not handle.
    Unsupported { message: String, loc: Loc },
}

impl TypeError {
    pub fn unbound_variable(name: String, loc: Loc) -> Self {
        TypeError::UnboundVariable { name, loc }
    }

    pub fn type_mismatch(expected: Type, found: Type, loc: Loc) -> Self {
        TypeError::TypeMismatch {
            expected,
            found,
            loc,
            context: None,
        }
    }

    /// Attach a context note (only affects `TypeMismatch`).
    pub fn with_context(mut self, context: String) -> Self {
        if let TypeError::TypeMismatch { context: ctx, .. } = &mut self {
            *ctx = Some(context);
        }
        self
    }

    pub fn self_reference(var: TypeVar, ty: Type, loc: Loc) -> Self {
        TypeError::SelfReference { var, ty, loc }
    }

    pub fn unsupported(message: impl Into<String>, loc: Loc) -> Self {
        TypeError::Unsupported {
            message: message.into(),
            loc,
        }
    }

    /// Upgrade a location-free unifier error with the source location
    /// of the expression that triggered it.
    pub fn from_unify_error(err: UnifyError, loc: Loc) -> Self {
        match err {
            UnifyError::Mismatch { expected, found } => {
                TypeError::type_mismatch(expected, found, loc)
            }
            UnifyError::OccursCheck { var, ty } => TypeError::self_reference(var, ty, loc),
        }
    }

    pub fn loc(&self) -> Loc {
        match self {
            TypeError::UnboundVariable { loc, .. }
            | TypeError::TypeMismatch { loc, .. }
            | TypeError::SelfReference { loc, .. }
            | TypeError::Unsupported { loc, .. } => *loc,
        }
    }
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = match self {
            TypeError::UnboundVariable { name, .. } => {
                format!("unbound variable: {}", name)
            }
            TypeError::TypeMismatch {
                expected,
                found,
                context,
                ..
            } => {
                let msg = format!(
                    "type mismatch: expected {}, found {}",
                    expected.pretty(),
                    found.pretty()
                );
                match context {
                    Some(ctx) => format!("{}\n  Note: {}", msg, ctx),
                    None => msg,
                }
            }
            TypeError::SelfReference { var, ty, .. } => {
                format!(
                    "type contains a reference to itself: {} = {}",
                    var,
                    ty.pretty()
                )
            }
            TypeError::Unsupported { message, .. } => {
                format!("unsupported: {}", message)
            }
        };
        let loc = self.loc();
        if loc.is_unknown() {
            write!(f, "Type error: {}", msg)
        } else {
            write!(f, "Type error: {} at {}", msg, loc)
        }
    }
}

impl std::error::Error for TypeError {}

/// The `(message, loc)` pair forwarded to the editor.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub message: String,
    pub loc: Loc,
}

impl From<&TypeError> for Diagnostic {
    fn from(err: &TypeError) -> Self {
        Diagnostic {
            message: err.to_string(),
            loc: err.loc(),
        }
    }
}

/// Flatten a batch of errors into the wire shape.
pub fn diagnostics(errors: &[TypeError]) -> Vec<Diagnostic> {
    errors.iter().map(Diagnostic::from).collect()
}
