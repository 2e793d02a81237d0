use std::{fmt, rc::Rc};

use indexmap::IndexMap;

use crate::{
    diagnostics::{NatRegError, Result},
    value::Value,
};

/// Number of arguments a procedure accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    AtLeast(usize),
}

impl Arity {
    /// Accepts any argument count, arity checking disabled.
    pub const ANY: Arity = Arity::AtLeast(0);

    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exact(n) => write!(f, "{n}"),
            Arity::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

pub type Callback = Rc<dyn Fn(&[Value]) -> Result<Value>>;

/// A callable binding. Never emitted as regex; only invoked through [`Environment::resolve`].
#[derive(Clone)]
pub struct Procedure {
    pub arity: Arity,
    pub callback: Callback,
}

impl Procedure {
    pub fn new(arity: Arity, callback: impl Fn(&[Value]) -> Result<Value> + 'static) -> Self {
        Self {
            arity,
            callback: Rc::new(callback),
        }
    }

    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value> {
        if !self.arity.accepts(args.len()) {
            return Err(NatRegError::Arity {
                name: name.to_string(),
                expected: self.arity,
                actual: args.len(),
            });
        }
        (self.callback)(args)
    }
}

impl fmt::Debug for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<procedure/{}>", self.arity)
    }
}

#[derive(Debug, Clone)]
pub enum Binding {
    Value(Value),
    Procedure(Procedure),
}

/// Name to value/procedure mapping for one compilation run.
///
/// Names are matched exactly, case and single spaces included. Later
/// registrations overwrite earlier ones; nothing is ever removed.
#[derive(Debug, Default)]
pub struct Environment {
    bindings: IndexMap<String, Binding>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_value(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        tracing::trace!(%name, kind = value.kind_name(), "register value");
        self.bindings.insert(name, Binding::Value(value));
    }

    /// Registers one procedure under every alias in `names`.
    pub fn register_procedure<F>(&mut self, names: &[&str], arity: Arity, callback: F)
    where
        F: Fn(&[Value]) -> Result<Value> + 'static,
    {
        let procedure = Procedure::new(arity, callback);
        for name in names {
            self.bindings
                .insert((*name).to_string(), Binding::Procedure(procedure.clone()));
        }
    }

    /// Registers an externally supplied override. Bracketed text becomes a
    /// literal set, anything else a regex fragment.
    pub fn register_override(&mut self, name: impl Into<String>, raw: &str) {
        let value = match raw.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
            Some(characters) => Value::literal_set(characters),
            None => Value::regex(raw),
        };
        self.register_value(name, value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Resolves `name`, invoking it with `args` when it is a procedure.
    ///
    /// Arguments passed to a plain value are ignored.
    pub fn resolve(&self, name: &str, args: &[Value]) -> Result<Value> {
        tracing::trace!(%name, args = args.len(), "resolve");
        match self.bindings.get(name) {
            None => Err(NatRegError::MissingReference {
                name: name.to_string(),
            }),
            Some(Binding::Value(value)) => {
                if !args.is_empty() {
                    tracing::debug!(%name, args = args.len(), "ignoring arguments to a plain value");
                }
                Ok(value.clone())
            }
            Some(Binding::Procedure(procedure)) => procedure.call(name, args),
        }
    }
}
