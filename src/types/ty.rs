//! # Core Type System Definitions
//!
//! This module defines the building blocks of the inference engine:
//! types, type variables, and type schemes.
//!
//! ## Types
//!
//! A [`Type`] is one of:
//!
//! - **Named** - a nominal type, compared by name. The primitives the
//!   surface language produces from literals are `number`, `string`,
//!   `boolean`, `null` and `undefined`; callers may seed the environment
//!   with further nominal names.
//! - **Var** - a type variable, the currency of inference.
//! - **Function** - an ordered parameter list and a single result type.
//!   Arity is significant.
//! - **Union** - an ordered, non-empty list of alternatives. Unions are
//!   not normalised on construction: no deduplication, no flattening.
//!
//! ## Type Variables
//!
//! Type variables are placeholders unified with concrete types during
//! inference. Fresh ones are numbered by a per-inference counter and
//! print as `T0`, `T1`, ...; variables from caller-seeded schemes may
//! carry a readable name instead:
//!
//! ```text
//! TypeVar { id: 0, name: None }          // T0
//! TypeVar { id: 0, name: Some("x") }     // x
//! ```
//!
//! ## Type Schemes
//!
//! A [`TypeScheme`] quantifies a type over a set of variables. A scheme
//! with an empty variable list is a bare (monomorphic) type; only `let`
//! bindings produce quantified schemes:
//!
//! ```text
//! // the identity scheme, written ∀x. (x) => x:
//! TypeScheme {
//!     vars: [TypeVar "x"],
//!     ty: Function([Var "x"], Var "x"),
//! }
//! ```
//!
//! ## Related Modules
//!
//! - [`crate::types::infer`] - Type inference over these types
//! - [`crate::types::env`] - Environment storing type schemes
//! - [`crate::types::subst`] - Substitutions produced by unification

use std::fmt;

use indexmap::IndexSet;
use itertools::Itertools;
use vec1::Vec1;

/// Type variable, identified by a numeric id with an optional
/// human-readable name used only for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeVar {
    pub id: usize,
    pub name: Option<String>,
}

impl TypeVar {
    /// A fresh, unnamed variable. Prints as `T{id}`.
    pub fn new(id: usize) -> Self {
        Self { id, name: None }
    }

    /// A named variable, as seeded schemes use. Prints as its name.
    pub fn with_name(id: usize, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
        }
    }
}

impl fmt::Display for TypeVar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "T{}", self.id),
        }
    }
}

/// All types the engine can assign to an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// A nominal type; equality is by name.
    Named(String),
    /// A type variable.
    Var(TypeVar),
    /// `(params...) => result`; arity is significant.
    Function(Vec<Type>, Box<Type>),
    /// Ordered, non-empty alternatives. Never normalised.
    Union(Vec1<Type>),
}

impl Type {
    pub fn named(name: impl Into<String>) -> Self {
        Type::Named(name.into())
    }

    pub fn number() -> Self {
        Type::named("number")
    }

    pub fn string() -> Self {
        Type::named("string")
    }

    pub fn boolean() -> Self {
        Type::named("boolean")
    }

    pub fn null() -> Self {
        Type::named("null")
    }

    pub fn undefined() -> Self {
        Type::named("undefined")
    }

    pub fn function(params: Vec<Type>, result: Type) -> Self {
        Type::Function(params, Box::new(result))
    }

    /// Collapse a list of alternatives into one type. A single-element
    /// list is that element itself; an empty list collapses to
    /// `undefined`, the type of a block that produces nothing.
    pub fn union(mut types: Vec<Type>) -> Self {
        if types.len() == 1 {
            return types.remove(0);
        }
        match Vec1::try_from_vec(types) {
            Ok(alternatives) => Type::Union(alternatives),
            Err(_) => Type::undefined(),
        }
    }

    /// The set of variables occurring free in this type, in first-seen
    /// order. Named types contribute nothing.
    pub fn free_type_vars(&self) -> IndexSet<TypeVar> {
        match self {
            Type::Named(_) => IndexSet::new(),
            Type::Var(v) => {
                let mut set = IndexSet::new();
                set.insert(v.clone());
                set
            }
            Type::Function(params, result) => {
                let mut set = IndexSet::new();
                for param in params {
                    set.extend(param.free_type_vars());
                }
                set.extend(result.free_type_vars());
                set
            }
            Type::Union(alternatives) => {
                let mut set = IndexSet::new();
                for alt in alternatives.iter() {
                    set.extend(alt.free_type_vars());
                }
                set
            }
        }
    }

    /// Render this type with the diagnostic grammar: named types and
    /// variables as their name, unions as `A | B | C`, functions as
    /// `(A, B) => R`.
    pub fn pretty(&self) -> String {
        match self {
            Type::Named(name) => name.clone(),
            Type::Var(v) => v.to_string(),
            Type::Function(params, result) => {
                format!(
                    "({}) => {}",
                    params.iter().map(Type::pretty).join(", "),
                    result.pretty()
                )
            }
            Type::Union(alternatives) => alternatives.iter().map(Type::pretty).join(" | "),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.pretty())
    }
}

/// Polymorphic type scheme: a type quantified over `vars`.
///
/// An empty `vars` list is a bare type. Only `let` bindings generalise;
/// function parameters and assignable variables always carry bare types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeScheme {
    pub vars: Vec<TypeVar>,
    pub ty: Type,
}

impl TypeScheme {
    /// A scheme with no quantified variables.
    pub fn monomorphic(ty: Type) -> Self {
        TypeScheme {
            vars: Vec::new(),
            ty,
        }
    }

    /// A scheme quantified over the given variables.
    pub fn polymorphic(vars: Vec<TypeVar>, ty: Type) -> Self {
        TypeScheme { vars, ty }
    }

    /// Whether this scheme is a bare type. Assignment targets must be.
    pub fn is_monomorphic(&self) -> bool {
        self.vars.is_empty()
    }

    /// Free variables of the inner type minus the quantified ones.
    pub fn free_type_vars(&self) -> IndexSet<TypeVar> {
        let mut free = self.ty.free_type_vars();
        free.retain(|v| !self.vars.contains(v));
        free
    }
}
