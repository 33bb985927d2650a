use std::process;

use tacit::ast::{BinOp, Block, Expr, FunctionBody, Param, Program};
use tacit::types::check::{check_program, diagnose_program};
use tacit::types::env::TypeEnv;
use tacit::types::ty::{Type, TypeScheme, TypeVar};

/// The environment a host would seed: a couple of built-ins plus the
/// polymorphic identity scheme.
fn seed_env() -> TypeEnv {
    let x = TypeVar::with_name(0, "x");
    TypeEnv::with_bindings(vec![
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

fn render_scheme(scheme: &TypeScheme) -> String {
    if scheme.is_monomorphic() {
        scheme.ty.pretty()
    } else {
        let vars: Vec<_> = scheme.vars.iter().map(|v| v.to_string()).collect();
        format!("forall {}. {}", vars.join(" "), scheme.ty.pretty())
    }
}

fn main() -> anyhow::Result<()> {
    // let double = (n = 0) => { return n + n; }
    // let pick = (flag) => { if (flag) { return 1; } else { return "one"; } }
    // let n = parseInt("42")
    // let same = identity(double)
    let program = Program::new(vec![
        Expr::let_binding(
            "double",
            Expr::function(
                vec![Param::with_default("n", Expr::number(0.0))],
                FunctionBody::Block(Block::new(vec![Expr::ret(Expr::binary(
                    BinOp::Add,
                    Expr::ident("n"),
                    Expr::ident("n"),
                ))])),
            ),
        ),
        Expr::let_binding(
            "pick",
            Expr::function(
                vec![Param::name("flag")],
                FunctionBody::Block(Block::new(vec![Expr::if_else(
                    Expr::ident("flag"),
                    Block::new(vec![Expr::ret(Expr::number(1.0))]),
                    Block::new(vec![Expr::ret(Expr::string("one"))]),
                )])),
            ),
        ),
        Expr::let_binding(
            "n",
            Expr::call(Expr::ident("parseInt"), vec![Expr::string("42")]),
        ),
        Expr::let_binding(
            "same",
            Expr::call(Expr::ident("identity"), vec![Expr::ident("double")]),
        ),
    ]);

    let env = match check_program(seed_env(), &program) {
        Ok(env) => env,
        Err(errors) => {
            for err in errors {
                eprintln!("{err}");
            }
            process::exit(1);
        }
    };

    for (name, scheme) in env.iter() {
        println!("{} : {}", name, render_scheme(scheme));
    }

    // A program that cannot check: the diagnostics the editor would see.
    let broken = Program::new(vec![
        Expr::let_binding("x", Expr::string("s")),
        Expr::assign("x", Expr::number(123.0)),
    ]);
    for diagnostic in diagnose_program(seed_env(), &broken) {
        println!("diagnostic: {}", diagnostic.message);
    }

    Ok(())
}
