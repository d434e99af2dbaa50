//! Core library for the Tsapa scripting language: a line-oriented
//! interpreter that classifies each statement, evaluates it against three
//! binding layers, and hands back one value per line.

pub mod classifier;
pub mod diagnostics;
pub mod environment;
pub mod macros;
pub mod repl;
pub mod runtime;
pub mod stdlib;
pub mod value;

pub use diagnostics::{Diagnostic, DiagnosticKind, Result, TsapaError};
pub use repl::{LineOutcome, Repl};
pub use runtime::Interpreter;
pub use value::Value;
