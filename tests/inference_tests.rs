//! End-to-end inference scenarios against the shared seed environment.

mod common;

use pretty_assertions::assert_eq;

use common::seed_env;
use tacit::ast::{BinOp, Block, Expr, FunctionBody, Param};
use tacit::types::infer::Infer;
use tacit::types::ty::{Type, TypeVar};

#[test]
fn parse_int_with_missing_argument() {
    // parseInt("1"): the missing second argument is checked against
    // `undefined`, which the parameter's union accepts.
    let mut infer = Infer::new();
    let expr = Expr::call(Expr::ident("parseInt"), vec![Expr::string("1")]);
    let (_, ty) = infer.infer_expr(&seed_env(), &expr).unwrap();
    assert_eq!(ty, Type::number());
}

#[test]
fn parse_int_with_union_typed_argument() {
    // let x = ambig(); parseInt("1", x)
    let mut infer = Infer::new();
    let let_stmt = Expr::let_binding("x", Expr::call(Expr::ident("ambig"), vec![]));
    let (_, _, env) = infer.infer_statement(&seed_env(), &let_stmt).unwrap();
    assert_eq!(
        env.lookup("x").unwrap().ty,
        Type::union(vec![Type::number(), Type::undefined()])
    );

    let call = Expr::call(
        Expr::ident("parseInt"),
        vec![Expr::string("1"), Expr::ident("x")],
    );
    let (_, ty) = infer.infer_expr(&env, &call).unwrap();
    assert_eq!(ty, Type::number());
}

/// `let x = (a, b, c) => { let y = parseInt(b); a = 456; return c; }`
fn three_param_function() -> Expr {
    Expr::function(
        vec![Param::name("a"), Param::name("b"), Param::name("c")],
        FunctionBody::Block(Block::new(vec![
            Expr::let_binding("y", Expr::call(Expr::ident("parseInt"), vec![Expr::ident("b")])),
            Expr::assign("a", Expr::number(456.0)),
            Expr::ret(Expr::ident("c")),
        ])),
    )
}

#[test]
fn parameters_constrained_by_use_and_generalised() {
    // Expected shape: (T, string, T') => T', with both variables
    // quantified. `b` is pinned to string by parseInt; the assignment
    // to `a` checks compatibility without pinning it.
    let mut infer = Infer::new();
    let stmt = Expr::let_binding("x", three_param_function());
    let (_, _, env) = infer.infer_statement(&seed_env(), &stmt).unwrap();
    let scheme = env.lookup("x").unwrap();

    match &scheme.ty {
        Type::Function(params, result) => {
            assert_eq!(params.len(), 3);
            assert!(matches!(params[0], Type::Var(_)), "a stays generic");
            assert_eq!(params[1], Type::string());
            assert!(matches!(params[2], Type::Var(_)), "c stays generic");
            assert_eq!(params[2], **result, "the return type is c's");
            assert_ne!(params[0], params[2]);
        }
        other => panic!("expected a function type, got {}", other),
    }
    assert_eq!(scheme.vars.len(), 2);
}

#[test]
fn identity_returns_fresh_instantiation() {
    let mut infer = Infer::new();
    let stmt = Expr::let_binding("x", three_param_function());
    let (_, _, env) = infer.infer_statement(&seed_env(), &stmt).unwrap();
    let quantified: Vec<TypeVar> = env.lookup("x").unwrap().vars.clone();

    let call = Expr::call(Expr::ident("identity"), vec![Expr::ident("x")]);
    let (_, ty) = infer.infer_expr(&env, &call).unwrap();

    match &ty {
        Type::Function(params, result) => {
            assert_eq!(params.len(), 3);
            assert_eq!(params[1], Type::string());
            assert_eq!(params[2], **result);
            // Polymorphism at work: the instantiation uses fresh
            // variables, not the scheme's quantified ones.
            for param in [&params[0], &params[2]] {
                match param {
                    Type::Var(v) => assert!(!quantified.contains(v)),
                    other => panic!("expected a variable, got {}", other),
                }
            }
        }
        other => panic!("expected a function type, got {}", other),
    }
}

#[test]
fn branches_that_both_return_merge_into_a_union() {
    // (cond) => { if (cond) { return 1; } else { return "s"; } }
    let mut infer = Infer::new();
    let func = Expr::function(
        vec![Param::name("cond")],
        FunctionBody::Block(Block::new(vec![Expr::if_else(
            Expr::ident("cond"),
            Block::new(vec![Expr::ret(Expr::number(1.0))]),
            Block::new(vec![Expr::ret(Expr::string("s"))]),
        )])),
    );
    let (_, ty) = infer.infer_expr(&seed_env(), &func).unwrap();
    match ty {
        Type::Function(_, result) => {
            assert_eq!(*result, Type::union(vec![Type::number(), Type::string()]));
        }
        other => panic!("expected a function type, got {}", other),
    }
}

#[test]
fn partial_branch_coverage_contributes_undefined() {
    // (cond, x) => { if (cond) { return 1; } x = "s"; }
    let mut infer = Infer::new();
    let func = Expr::function(
        vec![Param::name("cond"), Param::name("x")],
        FunctionBody::Block(Block::new(vec![
            Expr::if_then(
                Expr::ident("cond"),
                Block::new(vec![Expr::ret(Expr::number(1.0))]),
            ),
            Expr::assign("x", Expr::string("s")),
        ])),
    );
    let (_, ty) = infer.infer_expr(&seed_env(), &func).unwrap();
    match ty {
        Type::Function(_, result) => {
            assert_eq!(
                *result,
                Type::union(vec![Type::number(), Type::undefined()])
            );
        }
        other => panic!("expected a function type, got {}", other),
    }
}

#[test]
fn let_bound_functions_are_polymorphic_per_use() {
    // let id = (x) => x; id(1); id("a")
    let mut infer = Infer::new();
    let stmt = Expr::let_binding(
        "id",
        Expr::function(
            vec![Param::name("x")],
            FunctionBody::Expr(Box::new(Expr::ident("x"))),
        ),
    );
    let (_, _, env) = infer.infer_statement(&seed_env(), &stmt).unwrap();

    let (_, at_number) = infer
        .infer_expr(&env, &Expr::call(Expr::ident("id"), vec![Expr::number(1.0)]))
        .unwrap();
    let (_, at_string) = infer
        .infer_expr(&env, &Expr::call(Expr::ident("id"), vec![Expr::string("a")]))
        .unwrap();

    assert_eq!(at_number, Type::number());
    assert_eq!(at_string, Type::string());
}

#[test]
fn plus_narrows_to_number_only_for_literal_numbers() {
    let mut infer = Infer::new();
    let both_numbers = Expr::binary(BinOp::Add, Expr::number(1.0), Expr::number(2.0));
    let mixed = Expr::binary(BinOp::Add, Expr::string("n = "), Expr::number(2.0));

    let (_, ty) = infer.infer_expr(&seed_env(), &both_numbers).unwrap();
    assert_eq!(ty, Type::number());
    let (_, ty) = infer.infer_expr(&seed_env(), &mixed).unwrap();
    assert_eq!(ty, Type::string());
}

#[test]
fn default_parameter_takes_its_default_type() {
    // (s = "fallback") => parseInt(s)
    let mut infer = Infer::new();
    let func = Expr::function(
        vec![Param::with_default("s", Expr::string("fallback"))],
        FunctionBody::Expr(Box::new(Expr::call(
            Expr::ident("parseInt"),
            vec![Expr::ident("s")],
        ))),
    );
    let (_, ty) = infer.infer_expr(&seed_env(), &func).unwrap();
    assert_eq!(ty, Type::function(vec![Type::string()], Type::number()));
}

#[test]
fn nullary_builtin_call() {
    let mut infer = Infer::new();
    let expr = Expr::call(Expr::ident("ambig"), vec![]);
    let (_, ty) = infer.infer_expr(&seed_env(), &expr).unwrap();
    assert_eq!(ty, Type::union(vec![Type::number(), Type::undefined()]));
}
