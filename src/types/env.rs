//! # Type Environment
//!
//! The environment maps identifier names to type schemes. It is an
//! *ordered* mapping treated as an immutable snapshot: every update
//! returns a new environment that shadows only the affected binding,
//! so sibling branches of an `if` can never observe each other's
//! bindings.
//!
//! Polymorphism lives here too: looking up a `let`-bound name goes
//! through [`crate::types::infer::Infer`], which instantiates the
//! stored scheme with fresh variables on every reference. The
//! environment's free type variables decide what `let` may generalise:
//! a variable free in the environment is constrained by context and
//! must not be quantified.
//!
//! ## Related Modules
//!
//! - [`crate::types::ty`] - `Type` and `TypeScheme`
//! - [`crate::types::infer`] - inference threading environments
//! - [`crate::types::subst`] - substitution application

use indexmap::{IndexMap, IndexSet};

use super::subst::Substitution;
use super::ty::{TypeScheme, TypeVar};

/// Ordered mapping from names to type schemes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeEnv {
    bindings: IndexMap<String, TypeScheme>,
}

impl TypeEnv {
    /// An environment with no bindings.
    pub fn empty() -> Self {
        TypeEnv {
            bindings: IndexMap::new(),
        }
    }

    /// An environment seeded with the given bindings, in order.
    pub fn with_bindings(bindings: Vec<(String, TypeScheme)>) -> Self {
        TypeEnv {
            bindings: bindings.into_iter().collect(),
        }
    }

    /// Look up a name.
    pub fn lookup(&self, name: &str) -> Option<&TypeScheme> {
        self.bindings.get(name)
    }

    /// A new environment with `name` bound to `scheme`. An existing
    /// binding of the same name is shadowed, not modified.
    pub fn extend(&self, name: String, scheme: TypeScheme) -> TypeEnv {
        let mut bindings = self.bindings.clone();
        bindings.insert(name, scheme);
        TypeEnv { bindings }
    }

    /// Variables free in any binding's scheme, in first-seen order.
    pub fn free_type_vars(&self) -> IndexSet<TypeVar> {
        let mut free = IndexSet::new();
        for scheme in self.bindings.values() {
            free.extend(scheme.free_type_vars());
        }
        free
    }

    /// A new environment with the substitution applied to every scheme.
    pub fn apply_subst(&self, subst: &Substitution) -> TypeEnv {
        TypeEnv {
            bindings: self
                .bindings
                .iter()
                .map(|(name, scheme)| (name.clone(), subst.apply_scheme(scheme)))
                .collect(),
        }
    }

    /// Iterate over the bindings in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &TypeScheme)> {
        self.bindings.iter()
    }
}
