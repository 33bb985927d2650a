use std::collections::HashMap;

use log::debug;

use crate::ast::{Assign, BinOp, Binary, Call, Expr, FunctionBody, FunctionExpr, If, Let, Param};

use super::env::TypeEnv;
use super::error::TypeError;
use super::subst::Substitution;
use super::ty::{Type, TypeScheme, TypeVar};
use super::unify::unify;

/// The inference engine. Holds the fresh-variable counter; everything
/// else is threaded through as immutable values.
pub struct Infer {
    next_var: usize,
}

/// What a block produced: an early exit with a definite type, or a
/// fall-through carrying the union of partial-branch candidates when
/// any branch returned at all.
#[derive(Debug, Clone, PartialEq)]
enum BlockOutcome {
    Exit(Type),
    FallThrough(Option<Type>),
}

impl BlockOutcome {
    fn result_type(self) -> Option<Type> {
        match self {
            BlockOutcome::Exit(ty) => Some(ty),
            BlockOutcome::FallThrough(ty) => ty,
        }
    }
}

impl Infer {
    pub fn new() -> Self {
        Infer { next_var: 0 }
    }

    fn fresh_var(&mut self) -> TypeVar {
        let id = self.next_var;
        self.next_var += 1;
        TypeVar::new(id)
    }

    fn instantiate(&mut self, scheme: &TypeScheme) -> Type {
        let mapping: HashMap<_, _> = scheme
            .vars
            .iter()
            .map(|v| (v.clone(), Type::Var(self.fresh_var())))
            .collect();
        Substitution(mapping).apply(&scheme.ty)
    }

    fn generalize(&self, env: &TypeEnv, ty: &Type) -> TypeScheme {
        let free_in_env = env.free_type_vars();
        let vars: Vec<_> = ty
            .free_type_vars()
            .into_iter()
            .filter(|v| !free_in_env.contains(v))
            .collect();
        TypeScheme {
            vars,
            ty: ty.clone(),
        }
    }

    /// Infer the type of an expression. Statement forms that update the
    /// environment (`let`, assignment) are valid here too; their
    /// environment effect is simply discarded.
    pub fn infer_expr(
        &mut self,
        env: &TypeEnv,
        expr: &Expr,
    ) -> Result<(Substitution, Type), TypeError> {
        match expr {
            Expr::Number(_) => Ok((Substitution::empty(), Type::number())),
            Expr::String(_) => Ok((Substitution::empty(), Type::string())),
            Expr::Boolean(_) => Ok((Substitution::empty(), Type::boolean())),
            Expr::Null(_) => Ok((Substitution::empty(), Type::null())),
            Expr::Undefined(_) => Ok((Substitution::empty(), Type::undefined())),

            Expr::Ident(ident) => match env.lookup(&ident.name) {
                Some(scheme) => {
                    let ty = self.instantiate(scheme);
                    Ok((Substitution::empty(), ty))
                }
                None => Err(TypeError::unbound_variable(ident.name.clone(), ident.loc)),
            },

            Expr::Binary(binary) => self.infer_binary(env, binary),
            Expr::Call(call) => self.infer_call(env, call),
            Expr::Function(func) => self.infer_function(env, func),

            Expr::Let(let_stmt) => {
                let (subst, ty, _env) = self.infer_let(env, let_stmt)?;
                Ok((subst, ty))
            }
            Expr::Assign(assign) => {
                let (subst, ty, _env) = self.infer_assign(env, assign)?;
                Ok((subst, ty))
            }

            Expr::Block(block) => {
                let (subst, outcome) = self.infer_block(env, &block.body)?;
                let ty = outcome.result_type().unwrap_or_else(Type::undefined);
                Ok((subst, ty))
            }
            Expr::Return(ret) => self.infer_expr(env, &ret.value),
            Expr::If(if_stmt) => {
                let (subst, _all_return, ty) = self.infer_if(env, if_stmt)?;
                Ok((subst, ty.unwrap_or_else(Type::undefined)))
            }
            Expr::Throw(throw) => {
                let (subst, ty) = self.infer_expr(env, &throw.value)?;
                debug!("discarding type of thrown expression: {}", ty);
                Ok((subst, Type::undefined()))
            }
        }
    }

    /// Infer a statement, additionally returning the environment the
    /// next sibling statement must see.
    pub fn infer_statement(
        &mut self,
        env: &TypeEnv,
        stmt: &Expr,
    ) -> Result<(Substitution, Type, TypeEnv), TypeError> {
        match stmt {
            Expr::Let(let_stmt) => self.infer_let(env, let_stmt),
            Expr::Assign(assign) => self.infer_assign(env, assign),
            other => {
                let (subst, ty) = self.infer_expr(env, other)?;
                let env1 = env.apply_subst(&subst);
                Ok((subst, ty, env1))
            }
        }
    }

    fn infer_binary(
        &mut self,
        env: &TypeEnv,
        binary: &Binary,
    ) -> Result<(Substitution, Type), TypeError> {
        let (s1, left_ty) = self.infer_expr(env, &binary.lhs)?;
        let env1 = env.apply_subst(&s1);
        let (s2, right_ty) = self.infer_expr(&env1, &binary.rhs)?;
        let subst = s2.compose(&s1);

        let ty = match binary.op {
            // Overloaded `+`: numeric only when both sides are already
            // known numbers, string coercion otherwise. No unification
            // is attempted, so two unresolved variables coerce.
            BinOp::Add => {
                if subst.apply(&left_ty) == Type::number()
                    && subst.apply(&right_ty) == Type::number()
                {
                    Type::number()
                } else {
                    Type::string()
                }
            }
            BinOp::StrictEq => Type::boolean(),
        };

        Ok((subst, ty))
    }

    fn infer_let(
        &mut self,
        env: &TypeEnv,
        let_stmt: &Let,
    ) -> Result<(Substitution, Type, TypeEnv), TypeError> {
        let (subst, ty) = self.infer_expr(env, &let_stmt.value)?;
        let env1 = env.apply_subst(&subst);
        let scheme = self.generalize(&env1, &ty);
        let env2 = env1.extend(let_stmt.name.name.clone(), scheme);
        Ok((subst, Type::undefined(), env2))
    }

    fn infer_assign(
        &mut self,
        env: &TypeEnv,
        assign: &Assign,
    ) -> Result<(Substitution, Type, TypeEnv), TypeError> {
        let declared = match env.lookup(&assign.target.name) {
            Some(scheme) if scheme.is_monomorphic() => scheme.ty.clone(),
            Some(_) => {
                return Err(TypeError::unsupported(
                    format!(
                        "assignment to polymorphic binding `{}`",
                        assign.target.name
                    ),
                    assign.target.loc,
                ));
            }
            None => {
                return Err(TypeError::unbound_variable(
                    assign.target.name.clone(),
                    assign.target.loc,
                ));
            }
        };

        let (subst, value_ty) = self.infer_expr(env, &assign.value)?;
        let env1 = env.apply_subst(&subst);

        // Compatibility check only: the unifier's substitution is
        // dropped, so the declared type never changes.
        unify(&subst.apply(&declared), &value_ty)
            .map_err(|e| TypeError::from_unify_error(e, assign.target.loc))?;

        Ok((subst, declared, env1))
    }

    fn infer_function(
        &mut self,
        env: &TypeEnv,
        func: &FunctionExpr,
    ) -> Result<(Substitution, Type), TypeError> {
        let mut body_env = env.clone();
        let mut subst = Substitution::empty();
        let mut param_tys = Vec::with_capacity(func.params.len());

        for param in &func.params {
            match param {
                Param::Name(ident) => {
                    let ty = Type::Var(self.fresh_var());
                    body_env =
                        body_env.extend(ident.name.clone(), TypeScheme::monomorphic(ty.clone()));
                    param_tys.push(ty);
                }
                // A default value pins the parameter's type; no
                // variable is allocated.
                Param::Default(default) => {
                    let (s, ty) = self.infer_expr(&body_env, &default.value)?;
                    body_env = body_env.apply_subst(&s);
                    subst = s.compose(&subst);
                    body_env = body_env
                        .extend(default.name.name.clone(), TypeScheme::monomorphic(ty.clone()));
                    param_tys.push(ty);
                }
            }
        }

        let (body_subst, body_ty) = match &func.body {
            FunctionBody::Expr(expr) => self.infer_expr(&body_env, expr)?,
            FunctionBody::Block(block) => {
                let (s, outcome) = self.infer_block(&body_env, &block.body)?;
                let ty = outcome.result_type().unwrap_or_else(Type::undefined);
                (s, ty)
            }
        };
        let subst = body_subst.compose(&subst);

        let param_tys = param_tys.iter().map(|ty| subst.apply(ty)).collect();
        Ok((subst, Type::function(param_tys, body_ty)))
    }

    fn infer_call(&mut self, env: &TypeEnv, call: &Call) -> Result<(Substitution, Type), TypeError> {
        let (func_subst, func_ty) = self.infer_expr(env, &call.callee)?;
        let env1 = env.apply_subst(&func_subst);

        // Arguments are inferred independently in the post-callee
        // environment: an earlier argument never refines a later one.
        let mut subst = func_subst;
        let mut arg_tys = Vec::with_capacity(call.args.len());
        for arg in &call.args {
            let (s, ty) = self.infer_expr(&env1, arg)?;
            subst = s.compose(&subst);
            arg_tys.push(ty);
        }

        let result_ty = Type::Var(self.fresh_var());
        let applied_func = subst.apply(&func_ty);
        let expected = Type::function(arg_tys.clone(), result_ty.clone());
        let s = unify(&applied_func, &expected)
            .map_err(|e| TypeError::from_unify_error(e, call.loc))?;
        let mut subst = s.compose(&subst);

        // With the callee's shape known, check each declared parameter
        // against its argument; a missing argument is checked against
        // `undefined`, permitting variadic-style undersupply.
        if let Type::Function(params, _) = &applied_func {
            for (index, param) in params.iter().enumerate() {
                let param_ty = subst.apply(param);
                let (arg_ty, arg_loc) = match call.args.get(index) {
                    Some(arg) => (subst.apply(&arg_tys[index]), arg.loc()),
                    None => (Type::undefined(), call.loc),
                };
                let s = unify(&param_ty, &arg_ty)
                    .map_err(|e| TypeError::from_unify_error(e, arg_loc))?;
                subst = s.compose(&subst);
            }
        }

        let final_ty = subst.apply(&result_ty);
        Ok((subst, final_ty))
    }

    fn infer_block(
        &mut self,
        env: &TypeEnv,
        stmts: &[Expr],
    ) -> Result<(Substitution, BlockOutcome), TypeError> {
        let mut subst = Substitution::empty();
        let mut env = env.clone();
        let mut candidates: Vec<Type> = Vec::new();

        for stmt in stmts {
            match stmt {
                Expr::Return(ret) => {
                    let (s, ty) = self.infer_expr(&env, &ret.value)?;
                    let subst = s.compose(&subst);
                    let ty = subst.apply(&ty);
                    return Ok((subst, BlockOutcome::Exit(ty)));
                }

                Expr::Block(inner) => {
                    let (s, outcome) = self.infer_block(&env, &inner.body)?;
                    env = env.apply_subst(&s);
                    subst = s.compose(&subst);
                    if let BlockOutcome::Exit(ty) = outcome {
                        return Ok((subst, BlockOutcome::Exit(ty)));
                    }
                }

                Expr::If(if_stmt) => {
                    let (s, all_branches_return, branch_ty) = self.infer_if(&env, if_stmt)?;
                    env = env.apply_subst(&s);
                    subst = s.compose(&subst);
                    match (all_branches_return, branch_ty) {
                        (true, Some(ty)) => return Ok((subst, BlockOutcome::Exit(ty))),
                        (_, Some(ty)) => candidates.push(ty),
                        (_, None) => {}
                    }
                }

                Expr::Throw(throw) => {
                    let (s, ty) = self.infer_expr(&env, &throw.value)?;
                    env = env.apply_subst(&s);
                    subst = s.compose(&subst);
                    debug!("discarding type of thrown expression: {}", ty);
                }

                other => {
                    let (s, _ty, next_env) = self.infer_statement(&env, other)?;
                    subst = s.compose(&subst);
                    env = next_env;
                }
            }
        }

        // Control falls off the end. Partial branches contribute their
        // types; the fall-through itself contributes `undefined`.
        if candidates.is_empty() {
            Ok((subst, BlockOutcome::FallThrough(None)))
        } else {
            candidates.push(Type::undefined());
            let candidates = candidates.iter().map(|ty| subst.apply(ty)).collect();
            Ok((subst, BlockOutcome::FallThrough(Some(Type::union(candidates)))))
        }
    }

    fn infer_if(
        &mut self,
        env: &TypeEnv,
        if_stmt: &If,
    ) -> Result<(Substitution, bool, Option<Type>), TypeError> {
        // The condition's truthiness is unconstrained; it is inferred
        // only for its substitution.
        let (cond_subst, _cond_ty) = self.infer_expr(env, &if_stmt.cond)?;
        let env1 = env.apply_subst(&cond_subst);
        let mut subst = cond_subst;

        // Both branches see the post-condition environment; neither
        // observes the other's bindings.
        let (then_subst, then_outcome) = self.infer_block(&env1, &if_stmt.then_block.body)?;
        subst = then_subst.compose(&subst);
        let mut candidates = Vec::new();
        if let Some(ty) = then_outcome.result_type() {
            candidates.push(ty);
        }

        match &if_stmt.else_block {
            None => Ok((subst, false, candidates.into_iter().next())),
            Some(else_block) => {
                let (else_subst, else_outcome) = self.infer_block(&env1, &else_block.body)?;
                subst = else_subst.compose(&subst);
                if let Some(ty) = else_outcome.result_type() {
                    if !candidates.contains(&ty) {
                        candidates.push(ty);
                    }
                }
                let ty = match candidates.len() {
                    0 => None,
                    _ => Some(Type::union(candidates)),
                };
                Ok((subst, true, ty))
            }
        }
    }
}

impl Default for Infer {
    fn default() -> Self {
        Self::new()
    }
}
