use indexmap::IndexMap;

use crate::{
    diagnostics::{DiagnosticKind, Result, TsapaError},
    value::Value,
};

pub type Scope = IndexMap<String, Value>;

/// The three binding layers, resolved temporary → persistent → builtin.
pub struct Scopes {
    temporary: Scope,
    persistent: Scope,
    builtin: Scope,
}

impl Scopes {
    /// The builtin layer is fixed here and never mutated afterwards.
    pub fn new(builtin: Scope) -> Self {
        Self {
            temporary: Scope::new(),
            persistent: Scope::new(),
            builtin,
        }
    }

    pub fn resolve(&self, name: &str) -> Result<Value> {
        self.lookup(name).ok_or_else(|| {
            TsapaError::new(
                DiagnosticKind::Lookup,
                format!("no such object in current scope: `{name}`"),
            )
        })
    }

    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.temporary
            .get(name)
            .or_else(|| self.persistent.get(name))
            .or_else(|| self.builtin.get(name))
            .cloned()
    }

    /// Overwrites any prior persistent binding.
    pub fn assign(&mut self, name: impl Into<String>, value: Value) {
        self.persistent.insert(name.into(), value);
    }

    pub fn bind_temporary(&mut self, name: impl Into<String>, value: Value) {
        self.temporary.insert(name.into(), value);
    }

    pub fn clear_temporary(&mut self) {
        self.temporary.clear();
    }

    pub fn persistent_get(&self, name: &str) -> Option<Value> {
        self.persistent.get(name).cloned()
    }

    pub fn temporary_get(&self, name: &str) -> Option<Value> {
        self.temporary.get(name).cloned()
    }

    pub fn temporary(&self) -> &Scope {
        &self.temporary
    }

    pub fn persistent(&self) -> &Scope {
        &self.persistent
    }

    pub fn builtin(&self) -> &Scope {
        &self.builtin
    }
}
