//! Shared fixtures for the end-to-end tests.

use tacit::types::env::TypeEnv;
use tacit::types::ty::{Type, TypeScheme, TypeVar};

/// The environment every scenario starts from:
///
/// ```text
/// ambig    : () => number | undefined
/// parseInt : (string, number | undefined) => number
/// identity : forall x. (x) => x
/// ```
pub fn seed_env() -> TypeEnv {
    let x = TypeVar::with_name(0, "x");
    TypeEnv::with_bindings(vec![
        (
            "ambig".to_string(),
            TypeScheme::monomorphic(Type::function(
                vec![],
                Type::union(vec![Type::number(), Type::undefined()]),
            )),
        ),
        (
            "parseInt".to_string(),
            TypeScheme::monomorphic(Type::function(
                vec![
                    Type::string(),
                    Type::union(vec![Type::number(), Type::undefined()]),
                ],
                Type::number(),
            )),
        ),
        (
            "identity".to_string(),
            TypeScheme::polymorphic(
                vec![x.clone()],
                Type::function(vec![Type::Var(x.clone())], Type::Var(x)),
            ),
        ),
    ])
}
