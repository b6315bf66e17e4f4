//! Custom assertions for integration tests

use bolt_ir::shared::models::Program;
use bolt_ir::{CompilationOutput, Compiler, CompilerConfig, TypeEnvironment};
use std::collections::BTreeSet;

/// Assert that a string set holds exactly `expected`
pub fn assert_set(actual: &BTreeSet<String>, expected: &[&str]) {
    let expected: BTreeSet<String> = expected.iter().map(|s| s.to_string()).collect();
    assert_eq!(actual, &expected);
}

/// Assert that `needles` occur in `text` in the given order
pub fn assert_in_order(text: &str, needles: &[&str]) {
    let mut from = 0;
    for needle in needles {
        match text[from..].find(needle) {
            Some(at) => from += at + needle.len(),
            None => panic!("'{}' not found after offset {} in:\n{}", needle, from, text),
        }
    }
}

/// Compile with the default configuration and the program's own environment
pub fn compile_default(program: &Program) -> bolt_ir::Result<CompilationOutput> {
    let env = TypeEnvironment::from_program(program)?;
    Compiler::new(CompilerConfig::default(), &env).compile(program)
}
