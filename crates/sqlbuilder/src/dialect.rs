//! Database dialects.
//!
//! A [`Dialect`] owns the two pieces of syntax that differ between engines:
//! the LIMIT/OFFSET clause and the bind token written in place of each
//! `@T:name@` placeholder.
//!
//! # Example
//!
//! ```ignore
//! use sqlbuilder::dialect::{Dialect, MySql, Postgres};
//!
//! assert_eq!(Postgres.resolve_parameter(2, 's', "name"), "$2");
//! assert_eq!(MySql.limit_string(10, 20), "LIMIT 20, 10");
//! ```

use crate::error::{TemplateError, TemplateResult};
use serde::Deserialize;
use std::fmt::{self, Debug};
use std::str::FromStr;

/// Engine-specific SQL formatting.
///
/// Implementations must be pure: the same inputs always produce the same
/// output and no state is shared between calls.
pub trait Dialect: Debug + Send + Sync {
    /// Return the SQL snippet limiting the result to `limit` rows starting at `offset`.
    fn limit_string(&self, limit: u64, offset: u64) -> String;

    /// Return the bind token for the `index`-th (1-based) bound value.
    fn resolve_parameter(&self, index: usize, type_tag: char, name: &str) -> String;
}

/// PostgreSQL: `$1, $2, ...` placeholders and `LIMIT n OFFSET m`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Postgres;

impl Dialect for Postgres {
    fn limit_string(&self, limit: u64, offset: u64) -> String {
        if offset == 0 {
            format!("LIMIT {limit}")
        } else {
            format!("LIMIT {limit} OFFSET {offset}")
        }
    }

    fn resolve_parameter(&self, index: usize, _type_tag: char, _name: &str) -> String {
        format!("${index}")
    }
}

/// MySQL / MariaDB: positional `?` placeholders and `LIMIT offset, n`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MySql;

impl Dialect for MySql {
    fn limit_string(&self, limit: u64, offset: u64) -> String {
        if offset == 0 {
            format!("LIMIT {limit}")
        } else {
            format!("LIMIT {offset}, {limit}")
        }
    }

    fn resolve_parameter(&self, _index: usize, _type_tag: char, _name: &str) -> String {
        "?".to_string()
    }
}

/// SQLite: numbered `?1, ?2, ...` placeholders and `LIMIT n OFFSET m`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sqlite;

impl Dialect for Sqlite {
    fn limit_string(&self, limit: u64, offset: u64) -> String {
        if offset == 0 {
            format!("LIMIT {limit}")
        } else {
            format!("LIMIT {limit} OFFSET {offset}")
        }
    }

    fn resolve_parameter(&self, index: usize, _type_tag: char, _name: &str) -> String {
        format!("?{index}")
    }
}

/// Selector for the built-in dialects, usable from configuration files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialectKind {
    #[default]
    Postgres,
    #[serde(alias = "mariadb")]
    Mysql,
    Sqlite,
}

impl DialectKind {
    /// Instantiate the dialect.
    pub fn build(self) -> Box<dyn Dialect> {
        match self {
            DialectKind::Postgres => Box::new(Postgres),
            DialectKind::Mysql => Box::new(MySql),
            DialectKind::Sqlite => Box::new(Sqlite),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DialectKind::Postgres => "postgres",
            DialectKind::Mysql => "mysql",
            DialectKind::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DialectKind {
    type Err = TemplateError;

    fn from_str(s: &str) -> TemplateResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(DialectKind::Postgres),
            "mysql" | "mariadb" => Ok(DialectKind::Mysql),
            "sqlite" | "sqlite3" => Ok(DialectKind::Sqlite),
            other => Err(TemplateError::config(format!("unknown dialect '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn postgres_numbers_placeholders() {
        assert_eq!(Postgres.resolve_parameter(1, 'i', "id"), "$1");
        assert_eq!(Postgres.resolve_parameter(12, 's', "name"), "$12");
    }

    #[test]
    fn postgres_limit_omits_zero_offset() {
        assert_eq!(Postgres.limit_string(10, 0), "LIMIT 10");
        assert_eq!(Postgres.limit_string(10, 30), "LIMIT 10 OFFSET 30");
    }

    #[test]
    fn mysql_uses_positional_placeholders() {
        assert_eq!(MySql.resolve_parameter(1, 'i', "id"), "?");
        assert_eq!(MySql.resolve_parameter(7, 's', "name"), "?");
    }

    #[test]
    fn mysql_limit_puts_offset_first() {
        assert_eq!(MySql.limit_string(25, 0), "LIMIT 25");
        assert_eq!(MySql.limit_string(25, 50), "LIMIT 50, 25");
    }

    #[test]
    fn sqlite_numbers_placeholders() {
        assert_eq!(Sqlite.resolve_parameter(3, 'd', "price"), "?3");
        assert_eq!(Sqlite.limit_string(5, 5), "LIMIT 5 OFFSET 5");
    }

    #[test]
    fn kind_parses_aliases() {
        assert_eq!("PostgreSQL".parse::<DialectKind>().unwrap(), DialectKind::Postgres);
        assert_eq!(" pg ".parse::<DialectKind>().unwrap(), DialectKind::Postgres);
        assert_eq!("MariaDB".parse::<DialectKind>().unwrap(), DialectKind::Mysql);
        assert_eq!("sqlite3".parse::<DialectKind>().unwrap(), DialectKind::Sqlite);
    }

    #[test]
    fn kind_name_parses_back() {
        for kind in [DialectKind::Postgres, DialectKind::Mysql, DialectKind::Sqlite] {
            assert_eq!(kind.to_string(), kind.as_str());
            assert_eq!(kind.as_str().parse::<DialectKind>().unwrap(), kind);
        }
    }

    #[test]
    fn kind_rejects_unknown() {
        let err = "oracle".parse::<DialectKind>().unwrap_err();
        assert!(matches!(err, TemplateError::Config(_)));
    }

    #[test]
    fn kind_builds_matching_dialect() {
        assert_eq!(DialectKind::Mysql.build().resolve_parameter(1, 's', "x"), "?");
        assert_eq!(DialectKind::Sqlite.build().resolve_parameter(1, 's', "x"), "?1");
        assert_eq!(DialectKind::default().build().resolve_parameter(1, 's', "x"), "$1");
    }
}
