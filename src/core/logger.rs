//! Namespace logger
//!
//! A [`Logger`] is one node of the namespace tree owned by a
//! [`Registry`](super::registry::Registry). Dispatch runs in the calling
//! thread: the originating logger consults its own filters once, then every
//! logger on the path to the root hands the record to its handlers for as
//! long as `propagate` stays set.

use super::component::{IntoFilter, IntoHandler};
use super::error::{LoggerError, Result};
use super::filter::Filter;
use super::handler::Handler;
use super::log_context::FieldValue;
use super::log_level::LogLevel;
use super::namespace::Namespace;
use super::record::{CallSite, LogRecord};
use super::registry::{Registry, RegistryInner};
use parking_lot::RwLock;
use std::fmt;
use std::sync::{Arc, Weak};

/// Empty argument list for the level methods
pub const NO_ARGS: [FieldValue; 0] = [];

/// Builds the record for each log call
///
/// Install a custom factory with [`Logger::set_record_factory`] to attach
/// extra data or rewrite fields before dispatch.
pub trait RecordFactory: Send + Sync {
    fn make_record(
        &self,
        namespace: &str,
        level: &str,
        msg: String,
        args: Vec<FieldValue>,
        site: CallSite,
    ) -> LogRecord;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRecordFactory;

impl RecordFactory for DefaultRecordFactory {
    fn make_record(
        &self,
        namespace: &str,
        level: &str,
        msg: String,
        args: Vec<FieldValue>,
        site: CallSite,
    ) -> LogRecord {
        LogRecord::new(namespace, level, msg, args).with_site(site)
    }
}

struct LoggerState {
    level: Option<LogLevel>,
    propagate: bool,
    filters: Vec<Arc<dyn Filter>>,
    handlers: Vec<Arc<dyn Handler>>,
    factory: Arc<dyn RecordFactory>,
}

impl Default for LoggerState {
    fn default() -> Self {
        Self {
            level: None,
            propagate: true,
            filters: Vec::new(),
            handlers: Vec::new(),
            factory: Arc::new(DefaultRecordFactory),
        }
    }
}

pub struct Logger {
    namespace: Namespace,
    parent: Option<Arc<Logger>>,
    registry: Weak<RegistryInner>,
    state: RwLock<LoggerState>,
}

fn same_allocation<A: ?Sized, B: ?Sized>(a: &Arc<A>, b: &Arc<B>) -> bool {
    Arc::as_ptr(a).cast::<()>() == Arc::as_ptr(b).cast::<()>()
}

impl Logger {
    pub(crate) fn new(
        namespace: Namespace,
        parent: Option<Arc<Logger>>,
        registry: Weak<RegistryInner>,
    ) -> Self {
        Self {
            namespace,
            parent,
            registry,
            state: RwLock::new(LoggerState::default()),
        }
    }

    /// Last namespace segment, or `<root>`
    pub fn name(&self) -> &str {
        self.namespace.name()
    }

    /// Full dotted namespace; empty for the root
    pub fn namespace(&self) -> &str {
        self.namespace.as_str()
    }

    pub fn segments(&self) -> &[String] {
        self.namespace.segments()
    }

    pub fn parent(&self) -> Option<&Arc<Logger>> {
        self.parent.as_ref()
    }

    pub fn is_root(&self) -> bool {
        self.namespace.is_root()
    }

    /// Look up a descendant relative to this logger
    ///
    /// Fails only when the owning registry no longer exists.
    pub fn get_logger(&self, relative: impl Into<Namespace>) -> Result<Arc<Logger>> {
        let inner = self
            .registry
            .upgrade()
            .ok_or_else(|| LoggerError::registry_dropped(self.namespace.as_str()))?;
        let target = self.namespace.join(&relative.into());
        Ok(Registry::from_inner(inner).get_logger(target))
    }

    // Levels

    pub fn level(&self) -> Option<LogLevel> {
        self.state.read().level
    }

    /// `None` clears the level so it is inherited again
    pub fn set_level(&self, level: Option<LogLevel>) {
        self.state.write().level = level;
    }

    /// Set the level by name; names outside the fixed set are ignored
    pub fn set_level_name(&self, level: Option<&str>) {
        match level {
            None => self.set_level(None),
            Some(name) => {
                if let Ok(level) = name.parse::<LogLevel>() {
                    self.set_level(Some(level));
                }
            }
        }
    }

    /// Own level, else the nearest ancestor's
    pub fn effective_level(&self) -> Option<LogLevel> {
        match (self.level(), &self.parent) {
            (Some(level), _) => Some(level),
            (None, Some(parent)) => parent.effective_level(),
            (None, None) => None,
        }
    }

    pub fn propagate(&self) -> bool {
        self.state.read().propagate
    }

    pub fn set_propagate(&self, propagate: bool) {
        self.state.write().propagate = propagate;
    }

    // Filters

    /// Append a filter; a non-filter component is rejected and nothing changes
    pub fn add_filter<F: IntoFilter>(&self, filter: F) -> Result<()> {
        let filter = filter.into_filter()?;
        self.state.write().filters.push(filter);
        Ok(())
    }

    /// Remove the first registration of `filter`; absent filters are ignored
    pub fn remove_filter<F: ?Sized>(&self, filter: &Arc<F>) {
        let mut state = self.state.write();
        if let Some(index) = state.filters.iter().position(|f| same_allocation(f, filter)) {
            state.filters.remove(index);
        }
    }

    pub fn filters(&self) -> Vec<Arc<dyn Filter>> {
        self.state.read().filters.clone()
    }

    pub fn clear_filters(&self) {
        self.state.write().filters.clear();
    }

    // Handlers

    /// Append a handler; a non-handler component is rejected and nothing changes
    pub fn add_handler<H: IntoHandler>(&self, handler: H) -> Result<()> {
        let handler = handler.into_handler()?;
        self.push_handler(handler);
        Ok(())
    }

    pub(crate) fn push_handler(&self, handler: Arc<dyn Handler>) {
        self.state.write().handlers.push(handler);
    }

    /// Remove the first registration of `handler`; absent handlers are ignored
    pub fn remove_handler<H: ?Sized>(&self, handler: &Arc<H>) {
        let mut state = self.state.write();
        if let Some(index) = state.handlers.iter().position(|h| same_allocation(h, handler)) {
            state.handlers.remove(index);
        }
    }

    pub fn handlers(&self) -> Vec<Arc<dyn Handler>> {
        self.state.read().handlers.clone()
    }

    pub fn clear_handlers(&self) {
        self.state.write().handlers.clear();
    }

    // Dispatch

    /// True iff every filter on this logger admits the record
    pub fn filter(&self, record: &LogRecord) -> bool {
        let filters = self.filters();
        filters.iter().all(|f| f.filter(record))
    }

    /// Emit to this logger's handlers, then to the ancestors while
    /// `propagate` holds
    ///
    /// Ancestor filters are not consulted. The first handler error stops
    /// delivery of this record, including further propagation.
    pub fn handle(&self, record: &mut LogRecord) -> Result<()> {
        let (handlers, propagate) = {
            let state = self.state.read();
            (state.handlers.clone(), state.propagate)
        };
        for handler in &handlers {
            handler.emit(record)?;
        }
        match &self.parent {
            Some(parent) if propagate => parent.handle(record),
            _ => Ok(()),
        }
    }

    pub fn make_record(
        &self,
        level: &str,
        msg: impl Into<String>,
        args: Vec<FieldValue>,
        site: CallSite,
    ) -> LogRecord {
        let factory = self.state.read().factory.clone();
        factory.make_record(self.namespace.as_str(), level, msg.into(), args, site)
    }

    pub fn set_record_factory(&self, factory: Arc<dyn RecordFactory>) {
        self.state.write().factory = factory;
    }

    /// Log with any level tag; the tag is not validated and no severity
    /// gating takes place
    pub fn log<I>(&self, level: impl AsRef<str>, msg: impl Into<String>, args: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<FieldValue>,
    {
        let args = args.into_iter().map(Into::into).collect();
        self.log_at(level.as_ref(), msg, args, CallSite::default())
    }

    /// Log with explicit call-site metadata
    pub fn log_at(
        &self,
        level: &str,
        msg: impl Into<String>,
        args: Vec<FieldValue>,
        site: CallSite,
    ) -> Result<()> {
        let record = self.make_record(level, msg, args, site);
        self.log_record(record)
    }

    /// Filter then handle a record built elsewhere
    pub fn log_record(&self, mut record: LogRecord) -> Result<()> {
        if !self.filter(&record) {
            return Ok(());
        }
        self.handle(&mut record)
    }

    pub fn debug<I>(&self, msg: impl Into<String>, args: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<FieldValue>,
    {
        self.log(LogLevel::Debug, msg, args)
    }

    pub fn info<I>(&self, msg: impl Into<String>, args: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<FieldValue>,
    {
        self.log(LogLevel::Info, msg, args)
    }

    pub fn warning<I>(&self, msg: impl Into<String>, args: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<FieldValue>,
    {
        self.log(LogLevel::Warning, msg, args)
    }

    pub fn error<I>(&self, msg: impl Into<String>, args: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<FieldValue>,
    {
        self.log(LogLevel::Error, msg, args)
    }

    /// Flush every handler on this logger
    pub fn flush(&self) -> Result<()> {
        for handler in self.handlers() {
            handler.flush()?;
        }
        Ok(())
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("Logger")
            .field("namespace", &self.namespace.as_str())
            .field("level", &state.level)
            .field("propagate", &state.propagate)
            .field("filters", &state.filters.len())
            .field("handlers", &state.handlers.len())
            .finish()
    }
}
