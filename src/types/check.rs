//! Program driver: inference over a whole program.
//!
//! A single unresolvable constraint stops inference for the enclosing
//! top-level expression only; the remaining top-levels are still
//! examined, each contributing at most one error.

use crate::ast::Program;

use super::env::TypeEnv;
use super::error::{diagnostics, Diagnostic, TypeError};
use super::infer::Infer;

/// Type-check a program against a caller-seeded environment.
///
/// Top-level expressions are walked in order; `let` bindings extend the
/// environment for everything after them. A failed top-level leaves the
/// environment untouched and inference moves on to the next one.
pub fn check_program(seed: TypeEnv, program: &Program) -> Result<TypeEnv, Vec<TypeError>> {
    let mut infer = Infer::new();
    let mut env = seed;
    let mut errors = Vec::new();

    for expr in &program.body {
        match infer.infer_statement(&env, expr) {
            Ok((_, _, next_env)) => env = next_env,
            Err(err) => errors.push(err),
        }
    }

    if errors.is_empty() {
        Ok(env)
    } else {
        Err(errors)
    }
}

/// The language-server entry point: every error of the program in wire
/// shape, empty when the program checks.
pub fn diagnose_program(seed: TypeEnv, program: &Program) -> Vec<Diagnostic> {
    match check_program(seed, program) {
        Ok(_) => Vec::new(),
        Err(errors) => diagnostics(&errors),
    }
}
