//! Evaluation contexts and lambda scopes.

use crate::error::EvalError;
use crate::value::Value;
use indexmap::IndexMap;
use std::sync::Arc;

/// Caller-supplied name → value bindings. Immutable once shared with the
/// evaluator; cloning is cheap.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    vars: Arc<IndexMap<String, Value>>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the context with `name` bound to `value`, replacing any
    /// previous binding.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        Arc::make_mut(&mut self.vars).insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl From<IndexMap<String, Value>> for Context {
    fn from(vars: IndexMap<String, Value>) -> Self {
        Context {
            vars: Arc::new(vars),
        }
    }
}

impl FromIterator<(String, Value)> for Context {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Context::from(iter.into_iter().collect::<IndexMap<_, _>>())
    }
}

/// Builds a context from a JSON object, one binding per top-level key.
impl TryFrom<serde_json::Value> for Context {
    type Error = EvalError;

    fn try_from(json: serde_json::Value) -> Result<Self, Self::Error> {
        match Value::from(json) {
            Value::Map(map) => Ok(Context::from(map)),
            other => Err(EvalError::type_mismatch(format!(
                "Context must be built from an object, got {}",
                other.type_name()
            ))),
        }
    }
}

struct Binding {
    name: String,
    value: Value,
    parent: Option<Arc<Binding>>,
}

/// Lexical scope: the root context plus a persistent chain of lambda
/// parameter bindings. Binding never touches the parent scope.
#[derive(Clone)]
pub(crate) struct Scope {
    root: Context,
    locals: Option<Arc<Binding>>,
}

impl Scope {
    pub(crate) fn new(root: Context) -> Self {
        Scope { root, locals: None }
    }

    pub(crate) fn bind(&self, name: impl Into<String>, value: Value) -> Scope {
        Scope {
            root: self.root.clone(),
            locals: Some(Arc::new(Binding {
                name: name.into(),
                value,
                parent: self.locals.clone(),
            })),
        }
    }

    /// Innermost binding wins, then the root context.
    pub(crate) fn lookup(&self, name: &str) -> Option<&Value> {
        let mut binding = self.locals.as_deref();
        while let Some(b) = binding {
            if b.name == name {
                return Some(&b.value);
            }
            binding = b.parent.as_deref();
        }
        self.root.get(name)
    }
}
