//! Convenient imports for typical `sqlbuilder` usage.
//!
//! ```ignore
//! use sqlbuilder::prelude::*;
//! ```

pub use crate::{
    Builder, BuilderConfig, Dialect, DialectKind, MySql, Params, Postgres, ResolvedStatement,
    Sqlite, Template, TemplateError, TemplateResult,
};
