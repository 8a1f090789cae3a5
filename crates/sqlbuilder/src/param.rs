//! Parameter storage using Arc for clone-friendly statements.

use std::collections::HashMap;
use std::sync::Arc;
use tokio_postgres::types::ToSql;

/// A clone-friendly bind value using Arc.
///
/// The same value may be bound several times when a name appears in more
/// than one placeholder; cloning only bumps the reference count.
#[derive(Clone)]
pub struct Param(pub(crate) Arc<dyn ToSql + Send + Sync>);

impl Param {
    /// Create a new parameter from any ToSql value.
    pub fn new<T: ToSql + Send + Sync + 'static>(value: T) -> Self {
        Param(Arc::new(value))
    }

    /// Get a reference to the inner value as a ToSql trait object.
    pub fn as_ref(&self) -> &(dyn ToSql + Sync) {
        &*self.0 as &(dyn ToSql + Sync)
    }
}

// ToSql requires Debug, so the wrapped value can render itself.
impl std::fmt::Debug for Param {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(&*self.0, f)
    }
}

/// Named parameters supplied to [`Template::resolve`](crate::Template::resolve).
///
/// The key set doubles as the availability set for clause filtering: a
/// fragment is kept only when every name it references is present here.
/// Names are case-sensitive.
///
/// # Example
/// ```ignore
/// let params = Params::new().set("status", "active").set("min_age", 18_i32);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Params {
    values: HashMap<String, Param>,
}

impl Params {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value and return the set (consuming, for chained construction).
    pub fn set<T>(mut self, name: impl Into<String>, value: T) -> Self
    where
        T: ToSql + Send + Sync + 'static,
    {
        self.insert(name, value);
        self
    }

    /// Add or replace a value.
    pub fn insert<T>(&mut self, name: impl Into<String>, value: T) -> &mut Self
    where
        T: ToSql + Send + Sync + 'static,
    {
        self.values.insert(name.into(), Param::new(value));
        self
    }

    /// Add or replace a pre-wrapped value.
    pub fn insert_param(&mut self, name: impl Into<String>, param: Param) -> &mut Self {
        self.values.insert(name.into(), param);
        self
    }

    /// Look up a value by name.
    pub fn get(&self, name: &str) -> Option<&Param> {
        self.values.get(name)
    }

    /// Whether a value was supplied under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Supplied names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl<K: Into<String>> FromIterator<(K, Param)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, Param)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
