//! Sigil-prefixed special forms (`!inspect`, `!scope`, ...).

use std::fmt::Write as _;

use tracing::debug;

use crate::{
    diagnostics::{DiagnosticKind, Result, TsapaError},
    environment::Scope,
    runtime::Interpreter,
    value::{Callable, Value},
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Identification string returned by `!version`.
pub fn identity() -> String {
    format!("This is Tsapa version {VERSION}.")
}

impl Interpreter {
    /// Dispatches one macro invocation; `rest` is the raw text after the name.
    pub fn expand_macro(&mut self, name: &str, rest: &str) -> Result<Value> {
        debug!(name, rest, "macro");
        match name {
            "inspect" => self.inspect(required(name, rest)?),
            "panic" => Err(TsapaError::new(DiagnosticKind::Runtime, rest)),
            "reflect" => self.reflect(required(name, rest)?),
            "trace" => {
                self.trace_enabled = true;
                let result = self.evaluate(rest, 0);
                self.trace_enabled = false;
                result
            }
            "scope" => Ok(Value::string(self.dump_scopes())),
            "version" | "tsapa" => Ok(Value::string(identity())),
            "exit" | "quit" => Err(TsapaError::Exit),
            _ => Err(TsapaError::new(
                DiagnosticKind::Macro,
                format!("no such macro definition: !{name}"),
            )),
        }
    }

    fn inspect(&mut self, target: &str) -> Result<Value> {
        let (label, value) = match self.scopes.persistent_get(target) {
            Some(value) => (target, value),
            None => ("reflected_object", self.evaluate(target, 0)?),
        };
        let mut report = format!("{}#{}: {}", value.type_name(), value.id(), value);
        for (name, field) in value.fields().iter() {
            let _ = write!(
                report,
                "\n{label}:{name}\t{field}\t({})",
                field.type_name()
            );
        }
        Ok(Value::string(report))
    }

    fn reflect(&self, target: &str) -> Result<Value> {
        let value = self.scopes.persistent_get(target).ok_or_else(|| {
            TsapaError::new(DiagnosticKind::Lookup, format!("{target} is inexistent"))
        })?;
        match value.as_callable() {
            Some(Callable::Interpreted(body)) => Ok(Value::string(body.clone())),
            _ => Err(TsapaError::new(
                DiagnosticKind::Type,
                format!(
                    "cannot reflect {target} ({target} is {}, not an interpreted callable)",
                    value.type_name()
                ),
            )),
        }
    }

    fn dump_scopes(&self) -> String {
        let mut out = String::new();
        let layers = [
            ("persistent", self.scopes.persistent()),
            ("temporary", self.scopes.temporary()),
            ("builtin", self.scopes.builtin()),
        ];
        for (idx, (label, scope)) in layers.into_iter().enumerate() {
            if idx > 0 {
                out.push('\n');
            }
            let _ = writeln!(out, "In ({label} scope):");
            write_scope(&mut out, scope);
        }
        out
    }
}

fn write_scope(out: &mut String, scope: &Scope) {
    for (name, value) in scope {
        let _ = writeln!(out, "{name}\t{}\t{value}", value.type_name());
    }
}

fn required<'a>(name: &str, rest: &'a str) -> Result<&'a str> {
    let rest = rest.trim();
    if rest.is_empty() {
        return Err(TsapaError::new(
            DiagnosticKind::Macro,
            format!("!{name} expects an argument"),
        ));
    }
    Ok(rest)
}
