//! In-memory capture handler
//!
//! Keeps every rendered line it receives, in order. Useful for tests and for
//! hosts that display recent log output themselves.

use crate::core::{FormatterSlot, Handler, LogRecord, Result};
use parking_lot::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedLine {
    pub namespace: String,
    pub level: String,
    pub line: String,
}

#[derive(Default)]
pub struct MemoryHandler {
    lines: Mutex<Vec<CapturedLine>>,
    formatter: FormatterSlot,
}

impl MemoryHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn captured(&self) -> Vec<CapturedLine> {
        self.lines.lock().clone()
    }

    /// Rendered lines only
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().iter().map(|c| c.line.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl Handler for MemoryHandler {
    fn emit(&self, record: &mut LogRecord) -> Result<()> {
        self.format(record)?;
        self.lines.lock().push(CapturedLine {
            namespace: record.name().to_string(),
            level: record.level().to_string(),
            line: record.message().to_string(),
        });
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }

    fn formatter(&self) -> &FormatterSlot {
        &self.formatter
    }
}
