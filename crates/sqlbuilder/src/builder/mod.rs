//! Clause registration and snippet lookup.
//!
//! A [`Builder`] collects named clause groups and literal snippets during a
//! configuration phase (`&mut self`), then serves them to any number of
//! [`Template`]s during resolution (`&self`). Templates borrow the builder,
//! so registration cannot interleave with resolution; share a configured
//! builder across threads with `Arc<Builder>`.
//!
//! # Example
//!
//! ```ignore
//! use sqlbuilder::{Builder, Params, dialect::Postgres};
//!
//! let mut b = Builder::new(Postgres);
//! b.add_column("id", &[])
//!     .add_column("name", &[])
//!     .add_and_where("status = @s:status@", &["status"])
//!     .add_or_where("name ILIKE @s:q@", &["q"])
//!     .add_or_where("email ILIKE @s:q@", &["q"])
//!     .add_order_by("id DESC", &[]);
//! b.add_paging(20, 40)?;
//!
//! let stmt = b
//!     .template("SELECT /** column **/ FROM users /** where **/ /** order by **/ /** paging **/")
//!     .resolve(&Params::new().set("q", "%bob%"))?;
//! ```

use crate::clause::{ClauseFormat, ClauseGroup};
use crate::config::BuilderConfig;
use crate::dialect::{Dialect, Postgres};
use crate::error::{TemplateError, TemplateResult};
use crate::logging::SqlLogger;
use crate::param::Params;
use crate::template::Template;
use std::collections::HashMap;

const COLUMN: &str = "COLUMN";
const WHERE: &str = "WHERE";
const ORDER_BY: &str = "ORDER BY";
const GROUP_BY: &str = "GROUP BY";
const HAVING: &str = "HAVING";
const INNER_JOIN: &str = "INNER JOIN";
const LEFT_JOIN: &str = "LEFT JOIN";
const RIGHT_JOIN: &str = "RIGHT JOIN";
const JOIN: &str = "JOIN";
const PAGING: &str = "PAGING";

/// Canonical form of a block / clause name: trimmed and upper-cased.
///
/// Every registration and lookup goes through this, so `where`, `Where `
/// and `WHERE` all address the same group.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_ascii_uppercase()
}

/// Registry of clause groups and snippets bound to one dialect.
#[derive(Debug)]
pub struct Builder {
    dialect: Box<dyn Dialect>,
    snippets: HashMap<String, String>,
    groups: HashMap<String, ClauseGroup>,
    logger: SqlLogger,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new(Postgres)
    }
}

impl Builder {
    /// Create a builder for the given dialect.
    pub fn new(dialect: impl Dialect + 'static) -> Self {
        Self::with_dialect(Box::new(dialect))
    }

    /// Create a builder from a boxed (possibly custom) dialect.
    pub fn with_dialect(dialect: Box<dyn Dialect>) -> Self {
        Self {
            dialect,
            snippets: HashMap::new(),
            groups: HashMap::new(),
            logger: SqlLogger::default(),
        }
    }

    /// Create a builder from configuration.
    pub fn from_config(config: &BuilderConfig) -> Self {
        Self {
            logger: SqlLogger::from_config(config),
            ..Self::with_dialect(config.dialect.build())
        }
    }

    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    /// Create a template bound to this builder.
    pub fn template(&self, sql: impl Into<String>) -> Template<'_> {
        Template::new(self, sql)
    }

    pub(crate) fn logger(&self) -> &SqlLogger {
        &self.logger
    }

    // ==================== Registration ====================

    /// Register (or overwrite) a literal snippet.
    ///
    /// A clause group registered under the same name takes precedence.
    pub fn add_snippet(&mut self, name: &str, text: impl Into<String>) -> &mut Self {
        self.snippets.insert(normalize_name(name), text.into());
        self
    }

    /// Append a fragment to the named clause group, creating it on first use.
    ///
    /// The format is fixed by the first registration for a name; later calls
    /// keep the existing format. The `PAGING` group is single-use: adding to it
    /// once it exists fails with [`TemplateError::DuplicateConfiguration`].
    pub fn add_clause(
        &mut self,
        name: &str,
        sql: impl Into<String>,
        params: &[&str],
        format: ClauseFormat,
        inclusive: bool,
    ) -> TemplateResult<&mut Self> {
        let key = normalize_name(name);
        if key == PAGING && self.groups.contains_key(PAGING) {
            return Err(TemplateError::duplicate_configuration(PAGING));
        }
        Ok(self.push_clause(key, sql, params, format, inclusive))
    }

    fn push_clause(
        &mut self,
        key: String,
        sql: impl Into<String>,
        params: &[&str],
        format: ClauseFormat,
        inclusive: bool,
    ) -> &mut Self {
        let group = self
            .groups
            .entry(key)
            .or_insert_with_key(|key| ClauseGroup::new(key.clone(), format.clone()));
        if *group.format() != format {
            self.logger.format_conflict(group.name());
        }
        group.add_fragment(sql, params, inclusive);
        self
    }

    /// Add a column to the `COLUMN` block (`a, b, c`).
    pub fn add_column(&mut self, sql: impl Into<String>, params: &[&str]) -> &mut Self {
        self.push_clause(
            COLUMN.to_string(),
            sql,
            params,
            ClauseFormat::new(", ", "", "\n"),
            false,
        )
    }

    /// Alias for [`add_and_where`](Self::add_and_where).
    pub fn add_where(&mut self, sql: impl Into<String>, params: &[&str]) -> &mut Self {
        self.add_and_where(sql, params)
    }

    /// Add a mandatory condition to the `WHERE` block.
    pub fn add_and_where(&mut self, sql: impl Into<String>, params: &[&str]) -> &mut Self {
        self.push_clause(WHERE.to_string(), sql, params, where_format(), false)
    }

    /// Add an alternative to the OR-ed group of the `WHERE` block.
    pub fn add_or_where(&mut self, sql: impl Into<String>, params: &[&str]) -> &mut Self {
        self.push_clause(WHERE.to_string(), sql, params, where_format(), true)
    }

    /// Add an expression to the `ORDER BY` block.
    pub fn add_order_by(&mut self, sql: impl Into<String>, params: &[&str]) -> &mut Self {
        self.push_clause(
            ORDER_BY.to_string(),
            sql,
            params,
            ClauseFormat::new(", ", "ORDER BY ", "\n"),
            false,
        )
    }

    /// Add an expression to the `GROUP BY` block.
    pub fn add_group_by(&mut self, sql: impl Into<String>, params: &[&str]) -> &mut Self {
        self.push_clause(
            GROUP_BY.to_string(),
            sql,
            params,
            ClauseFormat::new(", ", "GROUP BY ", "\n"),
            false,
        )
    }

    /// Add a mandatory condition to the `HAVING` block.
    pub fn add_having(&mut self, sql: impl Into<String>, params: &[&str]) -> &mut Self {
        self.push_clause(HAVING.to_string(), sql, params, having_format(), false)
    }

    /// Add an alternative to the OR-ed group of the `HAVING` block.
    pub fn add_or_having(&mut self, sql: impl Into<String>, params: &[&str]) -> &mut Self {
        self.push_clause(HAVING.to_string(), sql, params, having_format(), true)
    }

    /// Add `INNER JOIN <sql>` to the `INNER JOIN` block.
    pub fn add_inner_join(&mut self, sql: impl Into<String>, params: &[&str]) -> &mut Self {
        self.push_clause(INNER_JOIN.to_string(), sql, params, join_format("INNER JOIN "), false)
    }

    /// Add `LEFT JOIN <sql>` to the `LEFT JOIN` block.
    pub fn add_left_join(&mut self, sql: impl Into<String>, params: &[&str]) -> &mut Self {
        self.push_clause(LEFT_JOIN.to_string(), sql, params, join_format("LEFT JOIN "), false)
    }

    /// Add `RIGHT JOIN <sql>` to the `RIGHT JOIN` block.
    pub fn add_right_join(&mut self, sql: impl Into<String>, params: &[&str]) -> &mut Self {
        self.push_clause(RIGHT_JOIN.to_string(), sql, params, join_format("RIGHT JOIN "), false)
    }

    /// Add a complete join expression (including its keyword) to the `JOIN` block.
    pub fn add_join(&mut self, sql: impl Into<String>, params: &[&str]) -> &mut Self {
        self.push_clause(JOIN.to_string(), sql, params, join_format(""), false)
    }

    /// Register the `PAGING` block using the dialect's LIMIT/OFFSET syntax.
    ///
    /// Paging is single-use: a second call fails with
    /// [`TemplateError::DuplicateConfiguration`].
    pub fn add_paging(&mut self, limit: u64, offset: u64) -> TemplateResult<&mut Self> {
        let sql = self.dialect.limit_string(limit, offset);
        self.add_clause(PAGING, sql, &[], ClauseFormat::new("", "", "\n"), false)
    }

    // ==================== Lookup ====================

    /// Whether a clause group exists under `name`.
    pub fn has_group(&self, name: &str) -> bool {
        self.groups.contains_key(&normalize_name(name))
    }

    /// Whether a literal snippet exists under `name`.
    pub fn has_snippet(&self, name: &str) -> bool {
        self.snippets.contains_key(&normalize_name(name))
    }

    pub fn group(&self, name: &str) -> Option<&ClauseGroup> {
        self.groups.get(&normalize_name(name))
    }

    /// Expand a block name: clause group first, then literal snippet, else empty.
    pub fn resolve_snippet(&self, name: &str, params: &Params) -> String {
        let key = normalize_name(name);
        if let Some(group) = self.groups.get(&key) {
            return group.resolve(params);
        }
        self.snippets.get(&key).cloned().unwrap_or_default()
    }

    /// Bind token for the `index`-th (1-based) value, as rendered by the dialect.
    pub fn resolve_parameter(&self, index: usize, type_tag: char, name: &str) -> String {
        self.dialect.resolve_parameter(index, type_tag, name)
    }
}

fn where_format() -> ClauseFormat {
    ClauseFormat::new(" AND ", "WHERE ", "\n")
}

fn having_format() -> ClauseFormat {
    ClauseFormat::new("\nAND ", "HAVING ", "\n")
}

fn join_format(keyword: &str) -> ClauseFormat {
    ClauseFormat::new(format!("\n{keyword}"), keyword, "\n")
}
