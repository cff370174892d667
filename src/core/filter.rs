//! Filter contract and the built-in filters

use super::log_level::LogLevel;
use super::namespace::Namespace;
use super::record::LogRecord;

/// Predicate deciding whether a record is admitted at its originating logger
pub trait Filter: Send + Sync {
    fn filter(&self, record: &LogRecord) -> bool;
}

/// Minimum-severity gate
///
/// Loggers do not compare levels on their own; attach this filter to get
/// threshold behaviour. Records whose level tag is outside the fixed set are
/// rejected unless `admit_unknown` is enabled.
#[derive(Debug, Clone, Copy)]
pub struct LevelFilter {
    min_level: LogLevel,
    admit_unknown: bool,
}

impl LevelFilter {
    pub fn new(min_level: LogLevel) -> Self {
        Self {
            min_level,
            admit_unknown: false,
        }
    }

    #[must_use]
    pub fn with_admit_unknown(mut self, admit: bool) -> Self {
        self.admit_unknown = admit;
        self
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }
}

impl Filter for LevelFilter {
    fn filter(&self, record: &LogRecord) -> bool {
        match record.log_level() {
            Some(level) => level >= self.min_level,
            None => self.admit_unknown,
        }
    }
}

/// Admits records whose source namespace is `namespace` or one of its descendants
#[derive(Debug, Clone)]
pub struct NamespaceFilter {
    namespace: Namespace,
}

impl NamespaceFilter {
    pub fn new(namespace: impl Into<Namespace>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }
}

impl Filter for NamespaceFilter {
    fn filter(&self, record: &LogRecord) -> bool {
        Namespace::from(record.name()).is_within(&self.namespace)
    }
}

/// Closure-backed filter
pub struct FnFilter<F> {
    predicate: F,
}

impl<F> FnFilter<F>
where
    F: Fn(&LogRecord) -> bool + Send + Sync,
{
    pub fn new(predicate: F) -> Self {
        Self { predicate }
    }
}

impl<F> Filter for FnFilter<F>
where
    F: Fn(&LogRecord) -> bool + Send + Sync,
{
    fn filter(&self, record: &LogRecord) -> bool {
        (self.predicate)(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, level: &str) -> LogRecord {
        LogRecord::new(name, level, "m", Vec::new())
    }

    #[test]
    fn test_level_filter_threshold() {
        let filter = LevelFilter::new(LogLevel::Warning);
        assert!(!filter.filter(&record("", "debug")));
        assert!(!filter.filter(&record("", "info")));
        assert!(filter.filter(&record("", "warning")));
        assert!(filter.filter(&record("", "error")));
    }

    #[test]
    fn test_level_filter_unknown_levels() {
        let strict = LevelFilter::new(LogLevel::Debug);
        assert_eq!(strict.min_level(), LogLevel::Debug);
        assert!(!strict.filter(&record("", "notice")));

        let lenient = strict.with_admit_unknown(true);
        assert_eq!(lenient.min_level(), LogLevel::Debug);
        assert!(lenient.filter(&record("", "notice")));
    }

    #[test]
    fn test_namespace_filter_subtree() {
        let filter = NamespaceFilter::new("db");
        assert!(filter.filter(&record("db", "info")));
        assert!(filter.filter(&record("db.pool", "info")));
        assert!(!filter.filter(&record("dbx", "info")));
        assert!(!filter.filter(&record("", "info")));
    }

    #[test]
    fn test_root_namespace_filter_admits_everything() {
        let filter = NamespaceFilter::new("");
        assert!(filter.filter(&record("", "info")));
        assert!(filter.filter(&record("a.b", "info")));
    }

    #[test]
    fn test_fn_filter() {
        let filter = FnFilter::new(|r: &LogRecord| r.msg().contains("keep"));
        assert!(filter.filter(&LogRecord::new("", "info", "keep me", Vec::new())));
        assert!(!filter.filter(&LogRecord::new("", "info", "drop me", Vec::new())));
    }
}
