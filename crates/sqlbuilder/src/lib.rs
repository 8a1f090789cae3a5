//! # sqlbuilder
//!
//! A SQL template engine: write the statement skeleton by hand, register the
//! clauses that may or may not apply, and let the supplied parameters decide
//! what ends up in the final SQL.
//!
//! ## Features
//!
//! - **Block placeholders**: `/** WHERE **/` expands to a clause group or snippet
//! - **Parameter placeholders**: `@i:user_id@` becomes `$1`, `?` or `?1` depending on the dialect
//! - **Conditional clauses**: a fragment is only emitted when all its parameters are supplied
//! - **OR groups**: optional fragments collapse into one `( a OR b )` alternative
//! - **Ordered binding**: values always line up with the bind tokens in the SQL
//! - **tokio-postgres ready**: `params_ref()` plugs straight into `Client::query`
//!
//! ## Example
//!
//! ```ignore
//! use sqlbuilder::prelude::*;
//!
//! let mut b = Builder::new(Postgres);
//! b.add_column("u.id", &[])
//!     .add_column("u.name", &[])
//!     .add_and_where("u.status = @s:status@", &["status"])
//!     .add_or_where("u.name ILIKE @s:q@", &["q"])
//!     .add_or_where("u.email ILIKE @s:q@", &["q"])
//!     .add_order_by("u.id", &[]);
//! b.add_paging(20, 0)?;
//!
//! let stmt = b
//!     .template("SELECT /** column **/ FROM users u\n/** where **//** order by **//** paging **/")
//!     .resolve(&Params::new().set("q", "%bob%"))?;
//!
//! // SELECT u.id, u.name
//! //  FROM users u
//! // WHERE ( u.name ILIKE $1 OR u.email ILIKE $2 )
//! // ORDER BY u.id
//! // LIMIT 20
//! let rows = client.query(stmt.sql(), &stmt.params_ref()).await?;
//! ```

pub mod builder;
pub mod clause;
pub mod config;
pub mod dialect;
pub mod error;
pub mod param;
pub mod prelude;
pub mod statement;
pub mod template;

mod logging;

pub use builder::{Builder, normalize_name};
pub use clause::{ClauseFormat, ClauseFragment, ClauseGroup};
pub use config::BuilderConfig;
pub use dialect::{Dialect, DialectKind, MySql, Postgres, Sqlite};
pub use error::{TemplateError, TemplateResult};
pub use param::{Param, Params};
pub use statement::ResolvedStatement;
pub use template::Template;
