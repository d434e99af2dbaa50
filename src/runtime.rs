use tracing::{debug, info, trace};

use crate::{
    classifier::{self, Statement},
    diagnostics::{Diagnostic, DiagnosticKind, Result, TsapaError},
    environment::Scopes,
    value::{Callable, Value},
};

pub struct Interpreter {
    pub(crate) scopes: Scopes,
    pub(crate) trace_enabled: bool,
    literal_counter: u64,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Self {
            scopes: Scopes::new(crate::stdlib::builtins()),
            trace_enabled: false,
            literal_counter: 0,
        }
    }

    /// Evaluates one input line as an outermost statement.
    pub fn eval_source(&mut self, source: &str) -> Result<Value> {
        self.evaluate(source, 0)
    }

    pub fn scopes(&self) -> &Scopes {
        &self.scopes
    }

    /// Maps one statement to a value.
    ///
    /// `depth` is 0 for a line handed in by the session. A call made at depth
    /// 0 clears temporary scope once it returns; deeper calls leave it alone.
    pub fn evaluate(&mut self, text: &str, depth: usize) -> Result<Value> {
        if self.trace_enabled {
            info!(target: "tsapa::trace", depth, statement = text, "evaluate");
        } else {
            trace!(depth, statement = text, "evaluate");
        }

        let text = self.lift_literals(text)?;
        let statement = classifier::classify(&text)?;
        trace!(kind = statement.label(), "classified");
        match statement {
            Statement::Comment | Statement::Empty => Ok(Value::none()),
            Statement::Sequence(parts) => {
                let mut last = Value::none();
                for part in parts {
                    last = self.evaluate(part, depth + 1)?;
                }
                Ok(last)
            }
            Statement::Assign { name, expr } => {
                let value = self.evaluate(expr, depth + 1)?;
                let text = value.to_string();
                self.scopes.assign(name, value);
                Ok(Value::string(text))
            }
            Statement::Extend {
                field,
                expr,
                target,
            } => {
                let object = self.scopes.resolve(target)?;
                let value = self.evaluate(expr, depth + 1)?;
                let text = value.to_string();
                object.set_field(field, value);
                Ok(Value::string(text))
            }
            Statement::FieldCall {
                receiver,
                field,
                args,
            } => {
                let object = self.scopes.resolve(receiver)?;
                let member = object.field(field).ok_or_else(|| {
                    let known: Vec<String> = object.fields().keys().cloned().collect();
                    TsapaError::from(
                        Diagnostic::new(
                            DiagnosticKind::Attribute,
                            format!("no such field or method: {receiver}:{field}"),
                        )
                        .with_note(format!("{receiver} has fields [{}]", known.join(", "))),
                    )
                })?;
                if member.as_callable().is_some() {
                    self.apply(&member, &args, depth)
                } else {
                    Ok(member)
                }
            }
            Statement::Call { callee, args } => {
                let function = self.scopes.resolve(callee)?;
                if function.as_callable().is_none() {
                    return Err(TsapaError::new(
                        DiagnosticKind::Type,
                        format!("{callee} is not callable"),
                    ));
                }
                self.apply(&function, &args, depth)
            }
            Statement::Copy { source } => Ok(self.scopes.resolve(source)?.shallow_copy()),
            Statement::Object => Ok(Value::object()),
            Statement::Block { params, body } => Ok(Value::block(
                params.into_iter().map(String::from).collect(),
                body,
            )),
            Statement::Integer(literal) => literal.parse().map(Value::int).map_err(|err| {
                TsapaError::new(
                    DiagnosticKind::Runtime,
                    format!("invalid integer literal `{literal}`: {err}"),
                )
            }),
            Statement::Float(literal) => literal.parse().map(Value::float).map_err(|err| {
                TsapaError::new(
                    DiagnosticKind::Runtime,
                    format!("invalid float literal `{literal}`: {err}"),
                )
            }),
            Statement::Boolean(value) => Ok(Value::bool(value)),
            Statement::Macro { name, rest } => self.expand_macro(name, rest),
            Statement::Identifier(name) => self.scopes.resolve(name),
            Statement::Parenthesized(inner) => self.evaluate(inner, depth + 1),
        }
    }

    /// Binds string literals into temporary scope under synthesized names.
    fn lift_literals(&mut self, text: &str) -> Result<String> {
        let scopes = &mut self.scopes;
        let counter = &mut self.literal_counter;
        classifier::extract_literals(text, |literal| {
            *counter += 1;
            let name = format!("_s_{counter}");
            scopes.bind_temporary(name.clone(), Value::string(literal));
            name
        })
    }

    /// Binds `args` to the callable's parameters and invokes it.
    fn apply(&mut self, callable: &Value, args: &[&str], depth: usize) -> Result<Value> {
        let result = self
            .bind_arguments(callable, args, depth)
            .and_then(|()| self.invoke(callable, depth));
        if depth == 0 {
            debug!(entries = self.scopes.temporary().len(), "clearing temporary scope");
            self.scopes.clear_temporary();
        }
        result
    }

    fn bind_arguments(&mut self, callable: &Value, args: &[&str], depth: usize) -> Result<()> {
        let params = callable.parameter_names();
        if args.len() > params.len() {
            return Err(TsapaError::new(
                DiagnosticKind::Arity,
                format!(
                    "too many arguments: expected {} but received {}",
                    params.len(),
                    args.len()
                ),
            ));
        }
        if args.len() < params.len() {
            return Err(TsapaError::new(
                DiagnosticKind::Arity,
                format!(
                    "too few arguments: expected {} but received {}",
                    params.len(),
                    args.len()
                ),
            ));
        }
        // All arguments are evaluated before any parameter is bound.
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.evaluate(arg, depth + 1)?);
        }
        for (param, value) in params.into_iter().zip(values) {
            self.scopes.bind_temporary(param, value);
        }
        Ok(())
    }

    /// Runs a callable whose arguments already sit in temporary scope.
    pub fn invoke(&mut self, callable: &Value, depth: usize) -> Result<Value> {
        match callable.as_callable() {
            Some(Callable::Native(native)) => (native.callback)(&self.scopes),
            Some(Callable::Interpreted(body)) => {
                let body = body.clone();
                self.evaluate(&body, depth + 1)
            }
            None => Err(TsapaError::new(
                DiagnosticKind::Type,
                format!("{} is not callable", callable.type_name()),
            )),
        }
    }
}
