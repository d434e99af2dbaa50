use std::{
    cell::{Ref, RefCell, RefMut},
    fmt,
    rc::Rc,
    sync::atomic::{AtomicU64, Ordering},
};

use indexmap::IndexMap;

use crate::{diagnostics::Result, environment::Scopes};

pub const ARGS_FIELD: &str = "_args";

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

pub type Fields = IndexMap<String, Value>;

/// Shared handle to a runtime object.
///
/// Cloning a `Value` clones the handle: both clones observe the same field
/// map. Use [`Value::shallow_copy`] to obtain a new identity.
#[derive(Clone)]
pub struct Value(pub Rc<Object>);

pub struct Object {
    id: u64,
    pub kind: ValueKind,
    fields: RefCell<Fields>,
}

#[derive(Clone)]
pub enum ValueKind {
    None,
    Integer(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    Struct,
    Callable(Callable),
    ParameterNames(Vec<String>),
}

/// Body of a callable: exactly one of a host handler or unevaluated source.
#[derive(Clone)]
pub enum Callable {
    Native(NativeFunction),
    Interpreted(String),
}

#[derive(Clone)]
pub struct NativeFunction {
    pub name: &'static str,
    /// Reads its arguments out of temporary scope.
    pub callback: fn(&Scopes) -> Result<Value>,
}

impl Value {
    pub fn new(kind: ValueKind) -> Self {
        Self::with_fields(kind, Fields::new())
    }

    fn with_fields(kind: ValueKind, fields: Fields) -> Self {
        Self(Rc::new(Object {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            kind,
            fields: RefCell::new(fields),
        }))
    }

    pub fn none() -> Self {
        Self::new(ValueKind::None)
    }

    pub fn int(value: i64) -> Self {
        Self::new(ValueKind::Integer(value))
    }

    pub fn float(value: f64) -> Self {
        Self::new(ValueKind::Float(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::new(ValueKind::String(value.into()))
    }

    pub fn bool(value: bool) -> Self {
        Self::new(ValueKind::Boolean(value))
    }

    pub fn object() -> Self {
        Self::new(ValueKind::Struct)
    }

    pub fn block(params: Vec<String>, body: impl Into<String>) -> Self {
        Self::callable(params, Callable::Interpreted(body.into()))
    }

    pub fn native(
        name: &'static str,
        params: &[&str],
        callback: fn(&Scopes) -> Result<Value>,
    ) -> Self {
        let params = params.iter().map(|p| p.to_string()).collect();
        Self::callable(params, Callable::Native(NativeFunction { name, callback }))
    }

    fn callable(params: Vec<String>, body: Callable) -> Self {
        let value = Self::new(ValueKind::Callable(body));
        value.set_field(ARGS_FIELD, Self::new(ValueKind::ParameterNames(params)));
        value
    }

    /// New identity with the same kind; the field map is copied, its values shared.
    pub fn shallow_copy(&self) -> Self {
        Self::with_fields(self.0.kind.clone(), self.fields().clone())
    }

    pub fn id(&self) -> u64 {
        self.0.id
    }

    pub fn kind(&self) -> &ValueKind {
        &self.0.kind
    }

    pub fn fields(&self) -> Ref<'_, Fields> {
        self.0.fields.borrow()
    }

    pub fn fields_mut(&self) -> RefMut<'_, Fields> {
        self.0.fields.borrow_mut()
    }

    pub fn field(&self, name: &str) -> Option<Value> {
        self.fields().get(name).cloned()
    }

    pub fn set_field(&self, name: impl Into<String>, value: Value) {
        self.fields_mut().insert(name.into(), value);
    }

    pub fn as_callable(&self) -> Option<&Callable> {
        match &self.0.kind {
            ValueKind::Callable(callable) => Some(callable),
            _ => None,
        }
    }

    pub fn parameter_names(&self) -> Vec<String> {
        match self.field(ARGS_FIELD) {
            Some(args) => match &args.0.kind {
                ValueKind::ParameterNames(names) => names.clone(),
                _ => Vec::new(),
            },
            None => Vec::new(),
        }
    }

    pub fn ptr_eq(&self, other: &Value) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn type_name(&self) -> &'static str {
        match &self.0.kind {
            ValueKind::None => "NoneType",
            ValueKind::Integer(_) => "IntegerType",
            ValueKind::Float(_) => "FloatType",
            ValueKind::String(_) => "StringType",
            ValueKind::Boolean(_) => "BooleanType",
            ValueKind::Struct => "StructType",
            ValueKind::Callable(_) => "CallableType",
            ValueKind::ParameterNames(_) => "ArgsType",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.kind {
            ValueKind::None => write!(f, "None"),
            ValueKind::Integer(n) => write!(f, "{n}"),
            ValueKind::Float(n) => write!(f, "{n:.6}"),
            ValueKind::String(s) => write!(f, "{s}"),
            ValueKind::Boolean(b) => write!(f, "{b}"),
            ValueKind::Struct => write!(f, "<StructType: object with fields>"),
            ValueKind::Callable(_) => write!(f, "<CallableType>"),
            ValueKind::ParameterNames(names) => write!(f, "[{}]", names.join(" ")),
        }
    }
}
