//! SQL templates.
//!
//! A template is a SQL skeleton with two kinds of markup:
//!
//! - `/** NAME **/` block placeholders, replaced by the builder's clause group
//!   or snippet registered under `NAME` (case-insensitive, trimmed). Unknown
//!   names expand to nothing.
//! - `@T:name@` parameter placeholders, replaced by the dialect's bind token.
//!   `T` is a one-character type tag passed through to the result; `name`
//!   selects the value from the supplied [`Params`].
//!
//! Blocks are expanded first (one level, the inserted text is not rescanned
//! for blocks), then parameters are bound in a single left-to-right pass over
//! the assembled text. Values therefore always line up with the bind tokens
//! in the final SQL, whether a placeholder came from the skeleton or from an
//! expanded clause.
//!
//! # Example
//!
//! ```ignore
//! let mut b = Builder::new(Postgres);
//! b.add_and_where("age > @i:min_age@", &["min_age"]);
//!
//! let stmt = b
//!     .template("SELECT * FROM users /** where **/ AND team = @s:team@")
//!     .resolve(&Params::new().set("min_age", 18_i32).set("team", "core"))?;
//!
//! assert_eq!(stmt.sql(), "SELECT * FROM users WHERE age > $1\n AND team = $2");
//! assert_eq!(stmt.types(), "is");
//! ```

use crate::builder::Builder;
use crate::error::{TemplateError, TemplateResult};
use crate::param::Params;
use crate::statement::ResolvedStatement;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::OnceLock;

fn block_regex() -> &'static Regex {
    static BLOCK_RE: OnceLock<Regex> = OnceLock::new();
    BLOCK_RE
        .get_or_init(|| Regex::new(r"/\*\*(.+?)\*\*/").expect("invalid built-in block regex"))
}

fn param_regex() -> &'static Regex {
    static PARAM_RE: OnceLock<Regex> = OnceLock::new();
    PARAM_RE.get_or_init(|| {
        Regex::new(r"@([^@\n]):([^@]+?)@").expect("invalid built-in parameter regex")
    })
}

/// A SQL skeleton bound to a [`Builder`].
///
/// Resolving never mutates the template or the builder, so one template can
/// be resolved any number of times with different parameter sets.
#[derive(Debug, Clone)]
pub struct Template<'b> {
    builder: &'b Builder,
    sql: String,
}

impl<'b> Template<'b> {
    pub fn new(builder: &'b Builder, sql: impl Into<String>) -> Self {
        Self {
            builder,
            sql: sql.into(),
        }
    }

    /// The raw skeleton.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn builder(&self) -> &'b Builder {
        self.builder
    }

    /// Produce the final SQL, type tags and bound values.
    ///
    /// Fails with [`TemplateError::MissingParameter`] if a parameter
    /// placeholder names a value that is not in `params`.
    pub fn resolve(&self, params: &Params) -> TemplateResult<ResolvedStatement> {
        let expanded = self.expand_blocks(params);
        let stmt = self.bind_parameters(&expanded, params)?;
        self.builder.logger().resolved(&stmt);
        Ok(stmt)
    }

    fn expand_blocks(&self, params: &Params) -> Cow<'_, str> {
        block_regex().replace_all(&self.sql, |caps: &Captures<'_>| {
            let name = caps[1].trim();
            let expanded = self.builder.resolve_snippet(name, params);
            self.builder.logger().block(name, &expanded);
            expanded
        })
    }

    fn bind_parameters(&self, sql: &str, params: &Params) -> TemplateResult<ResolvedStatement> {
        let mut out = String::with_capacity(sql.len());
        let mut types = String::new();
        let mut values = Vec::new();
        let mut last = 0;

        for caps in param_regex().captures_iter(sql) {
            let marker = caps.get_match();
            let (_, [tag, name]) = caps.extract();
            // The tag group matches exactly one character.
            let type_tag = tag.chars().next().expect("parameter regex captures one tag character");

            let Some(value) = params.get(name) else {
                self.builder.logger().missing_parameter(name);
                return Err(TemplateError::missing_parameter(name));
            };

            types.push(type_tag);
            values.push(value.clone());

            out.push_str(&sql[last..marker.start()]);
            out.push_str(&self.builder.resolve_parameter(values.len(), type_tag, name));
            last = marker.end();
        }
        out.push_str(&sql[last..]);

        Ok(ResolvedStatement::new(out, types, values))
    }
}
