use crate::{
    diagnostics::{DiagnosticKind, Result, TsapaError},
    environment::{Scope, Scopes},
    value::{Value, ValueKind},
};

const LHS: &str = "__x";
const RHS: &str = "__y";

/// Builds the builtin scope installed once at interpreter start.
pub fn builtins() -> Scope {
    let mut scope = Scope::new();
    scope.insert("none".into(), Value::none());
    scope.insert("add".into(), Value::native("add", &[LHS, RHS], builtin_add));
    scope.insert("sub".into(), Value::native("sub", &[LHS, RHS], builtin_sub));
    scope.insert("inc".into(), Value::native("inc", &[LHS], builtin_inc));
    scope
}

fn argument(scopes: &Scopes, param: &str, name: &str) -> Result<Value> {
    scopes.temporary_get(param).ok_or_else(|| {
        TsapaError::new(
            DiagnosticKind::Arity,
            format!("native function {name}: missing argument `{param}`"),
        )
    })
}

fn mismatch(name: &str, operands: &[&Value]) -> TsapaError {
    let kinds: Vec<&str> = operands.iter().map(|v| v.type_name()).collect();
    TsapaError::new(
        DiagnosticKind::Type,
        format!("native function {name}: type mismatch ({})", kinds.join(", ")),
    )
}

fn builtin_add(scopes: &Scopes) -> Result<Value> {
    let x = argument(scopes, LHS, "add")?;
    let y = argument(scopes, RHS, "add")?;
    match (x.kind(), y.kind()) {
        (ValueKind::Integer(a), ValueKind::Integer(b)) => Ok(Value::int(a.wrapping_add(*b))),
        (ValueKind::String(a), ValueKind::String(b)) => Ok(Value::string(format!("{a}{b}"))),
        (ValueKind::Float(a), ValueKind::Float(b)) => Ok(Value::float(a + b)),
        _ => Err(mismatch("add", &[&x, &y])),
    }
}

fn builtin_sub(scopes: &Scopes) -> Result<Value> {
    let x = argument(scopes, LHS, "sub")?;
    let y = argument(scopes, RHS, "sub")?;
    match (x.kind(), y.kind()) {
        (ValueKind::Integer(a), ValueKind::Integer(b)) => Ok(Value::int(a.wrapping_sub(*b))),
        (ValueKind::Float(a), ValueKind::Float(b)) => Ok(Value::float(a - b)),
        _ => Err(mismatch("sub", &[&x, &y])),
    }
}

fn builtin_inc(scopes: &Scopes) -> Result<Value> {
    let x = argument(scopes, LHS, "inc")?;
    match x.kind() {
        ValueKind::Integer(n) => Ok(Value::int(n.wrapping_add(1))),
        _ => Err(mismatch("inc", &[&x])),
    }
}
