//! Handler contract for log output destinations

use super::component::IntoFormatter;
use super::error::Result;
use super::record::LogRecord;
use crate::formatters::{default_formatter, Formatter};
use parking_lot::RwLock;
use std::sync::Arc;

/// Sink that formats and delivers a record
///
/// `emit` receives the record mutably so it can store the rendered line in
/// the record's message slot. Handlers are shared across loggers and
/// threads, so any internal state needs its own synchronisation.
pub trait Handler: Send + Sync {
    fn emit(&self, record: &mut LogRecord) -> Result<()>;

    fn name(&self) -> &str;

    /// The formatter attached to this handler
    fn formatter(&self) -> &FormatterSlot;

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    /// Render with the attached formatter and store the result on the record
    fn format(&self, record: &mut LogRecord) -> Result<()> {
        let rendered = self.formatter().get().format(record)?;
        record.set_rendered(rendered);
        Ok(())
    }

    fn set_formatter<F: IntoFormatter>(&self, formatter: F) -> Result<()>
    where
        Self: Sized,
    {
        self.formatter().set(formatter)
    }
}

/// Replaceable formatter reference held by a handler
///
/// Starts out pointing at the process-wide default formatter, which is shared
/// by every handler that never had one set.
pub struct FormatterSlot {
    current: RwLock<Arc<dyn Formatter>>,
}

impl FormatterSlot {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(default_formatter()),
        }
    }

    pub fn with(formatter: Arc<dyn Formatter>) -> Self {
        Self {
            current: RwLock::new(formatter),
        }
    }

    pub fn get(&self) -> Arc<dyn Formatter> {
        self.current.read().clone()
    }

    /// Replace the formatter; a non-formatter component leaves it unchanged
    pub fn set<F: IntoFormatter>(&self, formatter: F) -> Result<()> {
        let formatter = formatter.into_formatter()?;
        *self.current.write() = formatter;
        Ok(())
    }

    pub fn is_default(&self) -> bool {
        Arc::ptr_eq(&*self.current.read(), &default_formatter())
    }
}

impl Default for FormatterSlot {
    fn default() -> Self {
        Self::new()
    }
}
