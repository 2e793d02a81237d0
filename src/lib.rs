//! Compiler for NatReg, a small declarative language of named, composable
//! pieces that compiles down to a single regular-expression string.

pub mod ast;
pub mod diagnostics;
pub mod environment;
pub mod lexer;
pub mod operators;
pub mod overrides;
pub mod parser;
pub mod repl;
pub mod runtime;
pub mod stdlib;
pub mod value;

pub use diagnostics::{Diagnostic, DiagnosticKind, NatRegError, SourceSpan};
pub use environment::{Arity, Environment};
pub use repl::Repl;
pub use runtime::{compile, evaluate, Compiler};
pub use value::{Value, ValueKind};
