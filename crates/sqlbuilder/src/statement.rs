use crate::param::Param;
use tokio_postgres::types::ToSql;

/// A fully bound statement: SQL with dialect bind tokens, one type tag per
/// token, and the values in token order.
///
/// `params()[i]` belongs to the `i`-th bind token in `sql()`, reading left to
/// right, and `types()` holds the matching type tags.
#[derive(Debug, Clone)]
#[must_use]
pub struct ResolvedStatement {
    sql: String,
    types: String,
    params: Vec<Param>,
}

impl ResolvedStatement {
    pub(crate) fn new(sql: String, types: String, params: Vec<Param>) -> Self {
        Self { sql, types, params }
    }

    /// Access the SQL string.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Type tags, one character per bound value.
    pub fn types(&self) -> &str {
        &self.types
    }

    /// Bound values in placeholder order.
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Parameter refs compatible with `tokio-postgres`.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params.iter().map(Param::as_ref).collect()
    }

    /// Split into `(sql, types, params)`.
    pub fn into_parts(self) -> (String, String, Vec<Param>) {
        (self.sql, self.types, self.params)
    }
}
