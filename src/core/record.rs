//! Log record structure

use super::log_context::{FieldValue, LogContext};
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use std::cell::RefCell;

// Thread-local cache of the current thread's display name
thread_local! {
    static THREAD_LABEL_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Thread name if set, otherwise its id, computed once per thread
fn current_thread_label() -> String {
    THREAD_LABEL_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| {
                let thread = std::thread::current();
                thread
                    .name()
                    .map(String::from)
                    .unwrap_or_else(|| format!("{:?}", thread.id()))
            })
            .clone()
    })
}

/// Where a log call was made
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CallSite {
    pub file: Option<String>,
    pub line: Option<u32>,
    pub function: Option<String>,
}

impl CallSite {
    pub fn new(file: &str, line: u32, function: &str) -> Self {
        Self {
            file: Some(file.to_string()),
            line: Some(line),
            function: Some(function.to_string()),
        }
    }
}

/// Snapshot of one log event
///
/// Every field is fixed at construction. The only mutation is the rendered
/// message slot, which handlers fill after formatting; `msg` keeps the
/// caller's template so ancestor handlers render from the same input.
#[derive(Debug, Clone)]
pub struct LogRecord {
    name: String,
    level: String,
    site: CallSite,
    msg: String,
    args: Vec<FieldValue>,
    error: Option<String>,
    extra: Option<LogContext>,
    thread: String,
    created: DateTime<Utc>,
    rendered: Option<String>,
}

impl LogRecord {
    /// `name` is the full namespace of the originating logger; `level` is any
    /// level tag, not necessarily one of [`LogLevel`].
    pub fn new(
        name: impl Into<String>,
        level: impl Into<String>,
        msg: impl Into<String>,
        args: Vec<FieldValue>,
    ) -> Self {
        Self {
            name: name.into(),
            level: level.into(),
            site: CallSite::default(),
            msg: msg.into(),
            args,
            error: None,
            extra: None,
            thread: current_thread_label(),
            created: Utc::now(),
            rendered: None,
        }
    }

    #[must_use]
    pub fn with_site(mut self, site: CallSite) -> Self {
        self.site = site;
        self
    }

    /// Attach an error payload (`%(exc_info)s`)
    #[must_use]
    pub fn with_error(mut self, error: impl std::fmt::Display) -> Self {
        self.error = Some(error.to_string());
        self
    }

    #[must_use]
    pub fn with_extra(mut self, extra: LogContext) -> Self {
        self.extra = Some(extra);
        self
    }

    #[must_use]
    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = created;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> &str {
        &self.level
    }

    /// The level tag parsed into the fixed set, if it belongs to it
    pub fn log_level(&self) -> Option<LogLevel> {
        self.level.parse().ok()
    }

    pub fn site(&self) -> &CallSite {
        &self.site
    }

    /// The caller's original message template
    pub fn msg(&self) -> &str {
        &self.msg
    }

    pub fn args(&self) -> &[FieldValue] {
        &self.args
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn extra(&self) -> Option<&LogContext> {
        self.extra.as_ref()
    }

    pub fn thread(&self) -> &str {
        &self.thread
    }

    pub fn created(&self) -> &DateTime<Utc> {
        &self.created
    }

    /// The last rendered form if a handler formatted this record, else `msg`
    pub fn message(&self) -> &str {
        self.rendered.as_deref().unwrap_or(&self.msg)
    }

    pub fn is_rendered(&self) -> bool {
        self.rendered.is_some()
    }

    pub(crate) fn set_rendered(&mut self, rendered: String) {
        self.rendered = Some(rendered);
    }

    /// Look up a template field by name
    ///
    /// Built-in names map to record attributes; anything else is looked up in
    /// the extra structured data. `date` is resolved by the formatter.
    pub fn field(&self, name: &str) -> Option<FieldValue> {
        let value = match name {
            "name" => FieldValue::from(self.name.as_str()),
            "lvl" => FieldValue::from(self.level.as_str()),
            "msg" => FieldValue::from(self.msg.as_str()),
            "fn" => FieldValue::from(self.site.file.as_deref()),
            "lno" => FieldValue::from(self.site.line),
            "func" => FieldValue::from(self.site.function.as_deref()),
            "exc_info" => FieldValue::from(self.error.as_deref()),
            "extra" => match &self.extra {
                Some(extra) => FieldValue::String(extra.format_fields()),
                None => FieldValue::Null,
            },
            "thread" => FieldValue::from(self.thread.as_str()),
            other => return self.extra.as_ref().and_then(|e| e.get(other)).cloned(),
        };
        Some(value)
    }
}
