use crate::dialect::DialectKind;
use crate::error::TemplateResult;
use serde::Deserialize;

/// Configuration for a [`Builder`](crate::Builder).
///
/// Can be built in code or loaded from TOML:
///
/// ```toml
/// dialect = "mysql"
/// log_statements = true
/// max_sql_length = 500
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Database dialect used for bind tokens and paging.
    pub dialect: DialectKind,
    /// Whether to emit `tracing` events for registration and resolution.
    pub log_statements: bool,
    /// Truncate logged SQL (in bytes). `None` means no truncation.
    pub max_sql_length: Option<usize>,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            dialect: DialectKind::Postgres,
            log_statements: true,
            max_sql_length: Some(200),
        }
    }
}

impl BuilderConfig {
    /// Create a new configuration with defaults (Postgres, logging on).
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from a TOML document. Missing keys use defaults.
    pub fn from_toml_str(raw: &str) -> TemplateResult<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Set the dialect.
    pub fn with_dialect(mut self, dialect: DialectKind) -> Self {
        self.dialect = dialect;
        self
    }

    /// Enable or disable all logging events.
    pub fn log_statements(mut self, enabled: bool) -> Self {
        self.log_statements = enabled;
        self
    }

    /// Set maximum SQL length to log.
    pub fn max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation in logs.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = BuilderConfig::new();
        assert_eq!(config.dialect, DialectKind::Postgres);
        assert!(config.log_statements);
        assert_eq!(config.max_sql_length, Some(200));
    }

    #[test]
    fn parses_toml() {
        let config = BuilderConfig::from_toml_str(
            r#"
            dialect = "mysql"
            log_statements = false
            max_sql_length = 80
            "#,
        )
        .unwrap();
        assert_eq!(config.dialect, DialectKind::Mysql);
        assert!(!config.log_statements);
        assert_eq!(config.max_sql_length, Some(80));
    }

    #[test]
    fn missing_keys_use_defaults() {
        let config = BuilderConfig::from_toml_str(r#"dialect = "sqlite""#).unwrap();
        assert_eq!(config.dialect, DialectKind::Sqlite);
        assert!(config.log_statements);
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let err = BuilderConfig::from_toml_str(r#"dialect = "oracle""#).unwrap_err();
        assert!(matches!(err, crate::TemplateError::Config(_)));
    }

    #[test]
    fn setters_chain() {
        let config = BuilderConfig::new()
            .with_dialect(DialectKind::Mysql)
            .log_statements(false)
            .no_truncate();
        assert_eq!(config.dialect, DialectKind::Mysql);
        assert!(!config.log_statements);
        assert_eq!(config.max_sql_length, None);
    }
}
