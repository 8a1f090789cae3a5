//! Clause groups: named collections of SQL fragments that resolve to a
//! single snippet depending on which parameters were supplied.
//!
//! A fragment is *available* when every parameter it references is present
//! (fragments referencing nothing are always available). Mandatory fragments
//! are joined with the group's joiner; available optional fragments are
//! OR-ed together into one parenthesised alternative appended after them.
//!
//! ```ignore
//! let mut group = ClauseGroup::new("WHERE", ClauseFormat::new(" AND ", "WHERE ", "\n"));
//! group.add_fragment("status = @s:status@", &["status"], false);
//! group.add_fragment("name LIKE @s:q@", &["q"], true);
//! group.add_fragment("email LIKE @s:q@", &["q"], true);
//!
//! // WHERE status = @s:status@ AND ( name LIKE @s:q@ OR email LIKE @s:q@ )
//! let sql = group.resolve(&Params::new().set("status", "active").set("q", "%bob%"));
//! ```

use crate::param::Params;

/// Joiner, prefix and postfix applied when a group resolves to something.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClauseFormat {
    pub joiner: String,
    pub prefix: String,
    pub postfix: String,
}

impl ClauseFormat {
    pub fn new(
        joiner: impl Into<String>,
        prefix: impl Into<String>,
        postfix: impl Into<String>,
    ) -> Self {
        Self {
            joiner: joiner.into(),
            prefix: prefix.into(),
            postfix: postfix.into(),
        }
    }
}

/// One SQL fragment and the parameter names it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClauseFragment {
    sql: String,
    params: Vec<String>,
    inclusive: bool,
}

impl ClauseFragment {
    /// Create a fragment. Duplicate parameter names are collapsed, keeping
    /// the first occurrence.
    pub fn new(sql: impl Into<String>, params: &[&str], inclusive: bool) -> Self {
        let mut names: Vec<String> = Vec::with_capacity(params.len());
        for &p in params {
            if !names.iter().any(|n| n == p) {
                names.push(p.to_string());
            }
        }
        Self {
            sql: sql.into(),
            params: names,
            inclusive,
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Referenced parameter names, in registration order.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// `true` for fragments that belong to the OR-ed alternative block.
    pub fn is_inclusive(&self) -> bool {
        self.inclusive
    }

    /// All-or-nothing: every referenced name must be supplied.
    pub fn is_available(&self, params: &Params) -> bool {
        self.params.iter().all(|name| params.contains(name))
    }
}

/// All fragments registered under one clause name.
#[derive(Debug, Clone)]
pub struct ClauseGroup {
    name: String,
    format: ClauseFormat,
    mandatory: Vec<ClauseFragment>,
    optional: Vec<ClauseFragment>,
}

impl ClauseGroup {
    /// Create an empty group. The format is fixed for the group's lifetime.
    pub fn new(name: impl Into<String>, format: ClauseFormat) -> Self {
        Self {
            name: name.into(),
            format,
            mandatory: Vec::new(),
            optional: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn format(&self) -> &ClauseFormat {
        &self.format
    }

    pub fn mandatory(&self) -> &[ClauseFragment] {
        &self.mandatory
    }

    pub fn optional(&self) -> &[ClauseFragment] {
        &self.optional
    }

    /// Check if no fragments have been added.
    pub fn is_empty(&self) -> bool {
        self.mandatory.is_empty() && self.optional.is_empty()
    }

    /// Append a fragment. Identical fragments are kept; order is preserved.
    pub fn add_fragment(
        &mut self,
        sql: impl Into<String>,
        params: &[&str],
        inclusive: bool,
    ) -> &mut Self {
        self.push(ClauseFragment::new(sql, params, inclusive))
    }

    /// Append a pre-built fragment.
    pub fn push(&mut self, fragment: ClauseFragment) -> &mut Self {
        if fragment.inclusive {
            self.optional.push(fragment);
        } else {
            self.mandatory.push(fragment);
        }
        self
    }

    /// Resolve the group against the supplied parameters.
    ///
    /// Returns an empty string when no fragment is available; prefix and
    /// postfix are only emitted around non-empty output.
    pub fn resolve(&self, params: &Params) -> String {
        let alternatives: Vec<&str> = self
            .optional
            .iter()
            .filter(|f| f.is_available(params))
            .map(ClauseFragment::sql)
            .collect();
        let alternative_block =
            (!alternatives.is_empty()).then(|| format!("( {} )", alternatives.join(" OR ")));

        let mut parts: Vec<&str> = self
            .mandatory
            .iter()
            .filter(|f| f.is_available(params))
            .map(ClauseFragment::sql)
            .collect();
        parts.extend(alternative_block.as_deref());

        if parts.is_empty() {
            return String::new();
        }

        format!(
            "{}{}{}",
            self.format.prefix,
            parts.join(self.format.joiner.as_str()),
            self.format.postfix
        )
    }
}
