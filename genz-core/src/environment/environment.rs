use std::collections::HashMap;

use crate::eval::prelude::RuntimeError;

use super::prelude::Value;

/// Variable bindings of a single run. Names are matched exactly and a name
/// holds at most one value; there is no scoping and no removal.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Environment {
    store: HashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            store: HashMap::new(),
        }
    }

    /// Binds `name`, replacing any previous value.
    pub fn store(&mut self, name: impl Into<String>, value: Value) {
        self.store.insert(name.into(), value);
    }

    pub fn lookup(&self, name: &str) -> Result<Value, RuntimeError> {
        self.get(name)
            .cloned()
            .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.to_string() })
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.store.get(name)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Bindings sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        let mut bindings = self.store.iter().collect::<Vec<_>>();
        bindings.sort_by(|(a, _), (b, _)| a.cmp(b));

        bindings.into_iter()
    }
}
