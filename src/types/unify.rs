use thiserror::Error;

use super::subst::Substitution;
use super::ty::{Type, TypeVar};

/// Errors raised while reconciling two types. These carry no source
/// location; the inference layer upgrades them at `Call` and `Assign`
/// boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnifyError {
    #[error("type mismatch: expected {expected}, found {found}")]
    Mismatch { expected: Type, found: Type },
    #[error("type contains a reference to itself: {var} = {ty}")]
    OccursCheck { var: TypeVar, ty: Type },
}

fn mismatch(expected: &Type, found: &Type) -> UnifyError {
    UnifyError::Mismatch {
        expected: expected.clone(),
        found: found.clone(),
    }
}

fn occurs_in(var: &TypeVar, ty: &Type) -> bool {
    match ty {
        Type::Named(_) => false,
        Type::Var(v) => v == var,
        Type::Function(params, result) => {
            params.iter().any(|p| occurs_in(var, p)) || occurs_in(var, result)
        }
        Type::Union(alternatives) => alternatives.iter().any(|alt| occurs_in(var, alt)),
    }
}

/// Find the most general substitution under which `left` accommodates
/// `right`.
///
/// The direction matters: `left` is the required side (a parameter type,
/// an assignment destination), `right` the provided side (an argument,
/// a right-hand side). The asymmetry only surfaces in the union rules:
/// a union slot accepts anything one of its alternatives accepts, while
/// a union value fits a non-union slot only if every alternative does.
pub fn unify(left: &Type, right: &Type) -> Result<Substitution, UnifyError> {
    match (left, right) {
        // Nominal types unify by name alone
        (Type::Named(l), Type::Named(r)) if l == r => Ok(Substitution::empty()),

        // Type variable on either side
        (Type::Var(v), ty) => var_bind(v, ty),
        (ty, Type::Var(v)) => var_bind(v, ty),

        // Function types. The required side may declare more parameters
        // than the provided side: a caller supplying fewer arguments is
        // checked against `undefined` at the call site, so the extras
        // are not unified here.
        (Type::Function(l_params, l_result), Type::Function(r_params, r_result)) => {
            let mut subst = Substitution::empty();
            for (l, r) in l_params.iter().zip(r_params.iter()) {
                let s = unify(&subst.apply(l), &subst.apply(r))?;
                subst = s.compose(&subst);
            }
            let s = unify(&subst.apply(l_result), &subst.apply(r_result))?;
            Ok(s.compose(&subst))
        }

        // Union against union: every alternative the provider might
        // produce must be one the required union accepts.
        (Type::Union(l_alts), Type::Union(r_alts)) => {
            if r_alts.len() > l_alts.len() {
                return Err(mismatch(left, right));
            }
            let mut subst = Substitution::empty();
            for alt in r_alts.iter() {
                let s = unify(left, alt)?;
                subst = s.compose(&subst);
            }
            Ok(subst)
        }

        // Union slot, single provided type: the first accepting
        // alternative wins, searched in order.
        (Type::Union(alternatives), provided) => {
            for alt in alternatives.iter() {
                if let Ok(subst) = unify(alt, provided) {
                    return Ok(subst);
                }
            }
            Err(mismatch(left, right))
        }

        // Single required type, union provided: every alternative must
        // fit the slot.
        (required, Type::Union(r_alts)) => {
            let mut subst = Substitution::empty();
            for alt in r_alts.iter() {
                let s = unify(required, alt)?;
                subst = s.compose(&subst);
            }
            Ok(subst)
        }

        _ => Err(mismatch(left, right)),
    }
}

fn var_bind(var: &TypeVar, ty: &Type) -> Result<Substitution, UnifyError> {
    if let Type::Var(v) = ty {
        if v == var {
            return Ok(Substitution::empty());
        }
    }

    // A self-reference hidden inside a union alternative suppresses the
    // binding but lets the unification proceed.
    if let Type::Union(alternatives) = ty {
        if alternatives.iter().any(|alt| occurs_in(var, alt)) {
            return Ok(Substitution::empty());
        }
    }

    if occurs_in(var, ty) {
        return Err(UnifyError::OccursCheck {
            var: var.clone(),
            ty: ty.clone(),
        });
    }

    Ok(Substitution::singleton(var.clone(), ty.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vec1::vec1;

    #[test]
    fn test_unify_identical_named() {
        for ty in [
            Type::number(),
            Type::string(),
            Type::boolean(),
            Type::null(),
            Type::undefined(),
        ] {
            assert_eq!(unify(&ty, &ty), Ok(Substitution::empty()));
        }
    }

    #[test]
    fn test_unify_named_mismatch() {
        let result = unify(&Type::number(), &Type::string());
        assert!(matches!(result, Err(UnifyError::Mismatch { .. })));
    }

    #[test]
    fn test_unify_var_with_named() {
        let var = TypeVar::new(0);
        let result = unify(&Type::Var(var.clone()), &Type::number());
        assert_eq!(result, Ok(Substitution::singleton(var, Type::number())));
    }

    #[test]
    fn test_unify_named_with_var() {
        let var = TypeVar::new(0);
        let result = unify(&Type::number(), &Type::Var(var.clone()));
        assert_eq!(result, Ok(Substitution::singleton(var, Type::number())));
    }

    #[test]
    fn test_unify_same_var() {
        let var = TypeVar::new(0);
        let result = unify(&Type::Var(var.clone()), &Type::Var(var));
        assert_eq!(result, Ok(Substitution::empty()));
    }

    #[test]
    fn test_unify_two_vars() {
        let var1 = TypeVar::new(0);
        let var2 = TypeVar::new(1);
        let result = unify(&Type::Var(var1.clone()), &Type::Var(var2.clone()));
        assert_eq!(result, Ok(Substitution::singleton(var1, Type::Var(var2))));
    }

    #[test]
    fn test_occurs_check_direct() {
        let var = TypeVar::new(0);
        let ty = Type::function(vec![Type::Var(var.clone())], Type::number());
        let result = unify(&Type::Var(var), &ty);
        assert!(matches!(result, Err(UnifyError::OccursCheck { .. })));
    }

    #[test]
    fn test_occurs_check_nested() {
        let var = TypeVar::new(0);
        let ty = Type::function(
            vec![Type::number()],
            Type::function(vec![Type::Var(var.clone())], Type::string()),
        );
        let result = unify(&Type::Var(var), &ty);
        assert!(matches!(result, Err(UnifyError::OccursCheck { .. })));
    }

    #[test]
    fn test_occurs_check_suppressed_under_union() {
        let var = TypeVar::new(0);
        let ty = Type::Union(vec1![Type::number(), Type::Var(var.clone())]);
        // The binding is suppressed rather than rejected.
        assert_eq!(unify(&Type::Var(var), &ty), Ok(Substitution::empty()));
    }

    #[test]
    fn test_var_binds_to_union_without_self_reference() {
        let var = TypeVar::new(0);
        let ty = Type::Union(vec1![Type::number(), Type::undefined()]);
        assert_eq!(
            unify(&Type::Var(var.clone()), &ty),
            Ok(Substitution::singleton(var, ty))
        );
    }

    #[test]
    fn test_unify_function_identical() {
        let ty = Type::function(vec![Type::number(), Type::string()], Type::boolean());
        assert_eq!(unify(&ty, &ty), Ok(Substitution::empty()));
    }

    #[test]
    fn test_unify_function_threads_substitution() {
        // (T0, T0) => T1 against (number, number) => string
        let var0 = TypeVar::new(0);
        let var1 = TypeVar::new(1);
        let left = Type::function(
            vec![Type::Var(var0.clone()), Type::Var(var0.clone())],
            Type::Var(var1.clone()),
        );
        let right = Type::function(vec![Type::number(), Type::number()], Type::string());
        let subst = unify(&left, &right).unwrap();
        assert_eq!(subst.apply(&Type::Var(var0)), Type::number());
        assert_eq!(subst.apply(&Type::Var(var1)), Type::string());
    }

    #[test]
    fn test_unify_function_required_side_may_be_longer() {
        // A two-parameter slot accepts a one-parameter provider; the
        // second parameter is left to the call site.
        let left = Type::function(vec![Type::string(), Type::number()], Type::boolean());
        let right = Type::function(vec![Type::string()], Type::boolean());
        assert_eq!(unify(&left, &right), Ok(Substitution::empty()));
    }

    #[test]
    fn test_unify_function_result_mismatch() {
        let left = Type::function(vec![Type::number()], Type::string());
        let right = Type::function(vec![Type::number()], Type::number());
        assert!(unify(&left, &right).is_err());
    }

    #[test]
    fn test_unify_function_against_named_fails() {
        let func = Type::function(vec![Type::number()], Type::number());
        assert!(unify(&Type::number(), &func).is_err());
        assert!(unify(&func, &Type::number()).is_err());
    }

    #[test]
    fn test_union_accepts_member() {
        let union = Type::Union(vec1![Type::number(), Type::undefined()]);
        assert_eq!(unify(&union, &Type::undefined()), Ok(Substitution::empty()));
        assert_eq!(unify(&union, &Type::number()), Ok(Substitution::empty()));
    }

    #[test]
    fn test_union_rejects_non_member() {
        let union = Type::Union(vec1![Type::number(), Type::undefined()]);
        assert!(unify(&union, &Type::string()).is_err());
    }

    #[test]
    fn test_union_first_accepting_alternative_wins() {
        let var1 = TypeVar::new(0);
        let var2 = TypeVar::new(1);
        let union = Type::Union(vec1![Type::Var(var1.clone()), Type::Var(var2.clone())]);
        let subst = unify(&union, &Type::number()).unwrap();
        assert_eq!(subst.apply(&Type::Var(var1)), Type::number());
        assert_eq!(subst.apply(&Type::Var(var2.clone())), Type::Var(var2));
    }

    #[test]
    fn test_union_into_non_union_slot_fails() {
        // A possibly-string value does not fit a number slot.
        let union = Type::Union(vec1![Type::number(), Type::string()]);
        assert!(unify(&Type::number(), &union).is_err());
    }

    #[test]
    fn test_union_into_non_union_slot_when_every_alternative_fits() {
        let union = Type::Union(vec1![Type::number(), Type::number()]);
        assert_eq!(unify(&Type::number(), &union), Ok(Substitution::empty()));
    }

    #[test]
    fn test_union_against_union_subset() {
        let left = Type::Union(vec1![Type::number(), Type::string(), Type::undefined()]);
        let right = Type::Union(vec1![Type::string(), Type::number()]);
        assert_eq!(unify(&left, &right), Ok(Substitution::empty()));
    }

    #[test]
    fn test_union_against_wider_union_fails() {
        let left = Type::Union(vec1![Type::number(), Type::string()]);
        let right = Type::Union(vec1![Type::number(), Type::string(), Type::null()]);
        assert!(unify(&left, &right).is_err());
    }

    #[test]
    fn test_union_against_identical_union() {
        let ty = Type::Union(vec1![Type::number(), Type::string()]);
        assert_eq!(unify(&ty, &ty), Ok(Substitution::empty()));
    }

    #[test]
    fn test_union_against_union_with_unacceptable_member_fails() {
        let left = Type::Union(vec1![Type::number(), Type::string()]);
        let right = Type::Union(vec1![Type::number(), Type::null()]);
        assert!(unify(&left, &right).is_err());
    }

    #[test]
    fn test_successful_unification_reconciles_both_sides() {
        // (T0) => number against (string) => T1: applying the result to
        // both sides must produce the same type.
        let var0 = TypeVar::new(0);
        let var1 = TypeVar::new(1);
        let left = Type::function(vec![Type::Var(var0)], Type::number());
        let right = Type::function(vec![Type::string()], Type::Var(var1));
        let subst = unify(&left, &right).unwrap();
        assert_eq!(subst.apply(&left), subst.apply(&right));
    }
}
