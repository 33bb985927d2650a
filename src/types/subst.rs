//! # Type Substitutions
//!
//! A substitution is a finite mapping from type variables to types,
//! representing the assignments discovered during inference.
//!
//! ## Application
//!
//! Applying a substitution rewrites every free occurrence of a variable
//! in its domain:
//!
//! ```text
//! // Substitution: {T0 := number}
//!
//! apply(T0)                  → number
//! apply((T0) => T0)          → (number) => number
//! apply(T0 | undefined)      → number | undefined
//! apply(T1)                  → T1          // not in the domain
//! ```
//!
//! Application never rewrites under a scheme's quantifiers: when a
//! substitution is applied to a `TypeScheme`, the quantified variables
//! shadow any mapping of the same name.
//!
//! ## Composition
//!
//! `s1.compose(&s2)` builds the substitution that behaves like "apply
//! `s2` first, then `s1`":
//!
//! ```text
//! apply(compose(s1, s2), t) == apply(s1, apply(s2, t))
//! ```
//!
//! Inference composes newest-first, `s_new.compose(&s_old)`, so the
//! bindings discovered later refine the ones discovered earlier. On a
//! key collision the left-hand (newer) binding wins.
//!
//! ## Related Modules
//!
//! - [`crate::types::ty`] - the types substitutions apply to
//! - [`crate::types::unify`] - the producer of substitutions
//! - [`crate::types::env`] - environments substitutions are applied to

use std::collections::HashMap;

use super::ty::{Type, TypeScheme, TypeVar};

/// A mapping from type variables to types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution(pub HashMap<TypeVar, Type>);

impl Substitution {
    /// The empty substitution; applying it is the identity.
    pub fn empty() -> Self {
        Substitution(HashMap::new())
    }

    /// A substitution with a single mapping `var := ty`.
    pub fn singleton(var: TypeVar, ty: Type) -> Self {
        let mut map = HashMap::new();
        map.insert(var, ty);
        Substitution(map)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Apply this substitution to a type, replacing every variable in
    /// the domain with its mapped type.
    pub fn apply(&self, ty: &Type) -> Type {
        match ty {
            Type::Named(_) => ty.clone(),
            Type::Var(v) => self.0.get(v).cloned().unwrap_or_else(|| ty.clone()),
            Type::Function(params, result) => Type::function(
                params.iter().map(|p| self.apply(p)).collect(),
                self.apply(result),
            ),
            Type::Union(alternatives) => {
                Type::Union(alternatives.clone().mapped(|alt| self.apply(&alt)))
            }
        }
    }

    /// Apply this substitution to a scheme. The scheme's quantified
    /// variables shadow the substitution's domain.
    pub fn apply_scheme(&self, scheme: &TypeScheme) -> TypeScheme {
        let mut shadowed = self.clone();
        for var in &scheme.vars {
            shadowed.0.remove(var);
        }
        TypeScheme {
            vars: scheme.vars.clone(),
            ty: shadowed.apply(&scheme.ty),
        }
    }

    /// Compose with another substitution: `self.compose(&other)` applies
    /// `other` first, then `self`. On collision `self` wins.
    pub fn compose(&self, other: &Substitution) -> Substitution {
        let mut result = HashMap::new();

        for (var, ty) in &other.0 {
            result.insert(var.clone(), self.apply(ty));
        }

        for (var, ty) in &self.0 {
            result.insert(var.clone(), ty.clone());
        }

        Substitution(result)
    }
}
