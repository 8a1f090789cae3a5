//! `tracing` events for registration and resolution.
//!
//! Enable via the crate feature `tracing` (on by default). Events are emitted
//! on target `sqlbuilder.sql`; without the feature every method is a no-op.
//! `BuilderConfig::log_statements(false)` silences every event.

use crate::config::BuilderConfig;
use crate::statement::ResolvedStatement;

pub(crate) fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

#[derive(Debug, Clone)]
pub(crate) struct SqlLogger {
    enabled: bool,
    max_sql_length: Option<usize>,
}

impl Default for SqlLogger {
    fn default() -> Self {
        Self::from_config(&BuilderConfig::default())
    }
}

impl SqlLogger {
    pub(crate) fn from_config(config: &BuilderConfig) -> Self {
        Self {
            enabled: config.log_statements,
            max_sql_length: config.max_sql_length,
        }
    }

    pub(crate) fn truncate_sql(&self, sql: &str) -> String {
        match self.max_sql_length {
            Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)),
            _ => sql.to_string(),
        }
    }

    pub(crate) fn resolved(&self, stmt: &ResolvedStatement) {
        if !self.enabled {
            return;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "sqlbuilder.sql",
            param_count = stmt.params().len(),
            types = stmt.types(),
            sql = %self.truncate_sql(stmt.sql()),
            "resolved statement",
        );
        #[cfg(not(feature = "tracing"))]
        let _ = stmt;
    }

    pub(crate) fn block(&self, name: &str, expanded: &str) {
        if !self.enabled {
            return;
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(
            target: "sqlbuilder.sql",
            block = name,
            bytes = expanded.len(),
            "expanded block",
        );
        #[cfg(not(feature = "tracing"))]
        let _ = (name, expanded);
    }

    pub(crate) fn missing_parameter(&self, name: &str) {
        if !self.enabled {
            return;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "sqlbuilder.sql", parameter = name, "missing parameter");
        #[cfg(not(feature = "tracing"))]
        let _ = name;
    }

    pub(crate) fn format_conflict(&self, group: &str) {
        if !self.enabled {
            return;
        }
        #[cfg(feature = "tracing")]
        tracing::warn!(
            target: "sqlbuilder.sql",
            group,
            "clause group already registered with a different format; keeping the first",
        );
        #[cfg(not(feature = "tracing"))]
        let _ = group;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_sql_bytes("SELECT 1", 100), "SELECT 1");
        assert_eq!(truncate_sql_bytes("SELECT 1", 6), "SELECT");
        // 'é' is two bytes; cutting inside it backs off to the boundary.
        assert_eq!(truncate_sql_bytes("é", 1), "");
    }

    #[test]
    fn logger_truncates_per_config() {
        let logger = SqlLogger::from_config(&BuilderConfig::new().max_sql_length(6));
        assert_eq!(logger.truncate_sql("SELECT * FROM t"), "SELECT...");

        let logger = SqlLogger::from_config(&BuilderConfig::new().no_truncate());
        assert_eq!(logger.truncate_sql("SELECT * FROM t"), "SELECT * FROM t");
    }

    #[cfg(feature = "tracing")]
    mod events {
        use crate::config::BuilderConfig;
        use crate::logging::SqlLogger;
        use crate::statement::ResolvedStatement;
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};
        use tracing::span::{Attributes, Id, Record};
        use tracing::{Event, Metadata, Subscriber};

        /// Counts events on the `sqlbuilder.sql` target.
        struct CountingSubscriber(Arc<AtomicUsize>);

        impl Subscriber for CountingSubscriber {
            fn enabled(&self, _: &Metadata<'_>) -> bool {
                true
            }

            fn new_span(&self, _: &Attributes<'_>) -> Id {
                Id::from_u64(1)
            }

            fn record(&self, _: &Id, _: &Record<'_>) {}

            fn record_follows_from(&self, _: &Id, _: &Id) {}

            fn event(&self, event: &Event<'_>) {
                if event.metadata().target() == "sqlbuilder.sql" {
                    self.0.fetch_add(1, Ordering::SeqCst);
                }
            }

            fn enter(&self, _: &Id) {}

            fn exit(&self, _: &Id) {}
        }

        fn count_events(logger: &SqlLogger) -> usize {
            let count = Arc::new(AtomicUsize::new(0));
            let subscriber = CountingSubscriber(Arc::clone(&count));
            tracing::subscriber::with_default(subscriber, || {
                let stmt = ResolvedStatement::new("SELECT 1".into(), String::new(), Vec::new());
                logger.resolved(&stmt);
                logger.block("where", "WHERE a = 1\n");
                logger.missing_parameter("a");
                logger.format_conflict("WHERE");
            });
            count.load(Ordering::SeqCst)
        }

        #[test]
        fn enabled_logger_emits_every_event() {
            let logger = SqlLogger::from_config(&BuilderConfig::new());
            assert_eq!(count_events(&logger), 4);
        }

        #[test]
        fn disabled_logger_emits_nothing() {
            let logger = SqlLogger::from_config(&BuilderConfig::new().log_statements(false));
            assert_eq!(count_events(&logger), 0);
        }
    }
}
