//! Console handler implementation

use crate::core::{FormatterSlot, Handler, LogRecord, LoggerError, Result};
use std::io::Write;
use std::sync::Arc;

/// Output stream selected for a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsoleStream {
    /// Generic stream for level tags with no dedicated stream
    Log,
    Info,
    Warn,
    Error,
}

impl ConsoleStream {
    /// Fixed level-to-stream table; `None` means the generic log stream
    pub fn for_level(level: &str) -> Option<Self> {
        match level {
            "error" => Some(ConsoleStream::Error),
            "warning" => Some(ConsoleStream::Warn),
            "info" => Some(ConsoleStream::Info),
            _ => None,
        }
    }
}

/// Terminal abstraction the console handler writes through
pub trait Console: Send + Sync {
    fn write_line(&self, stream: ConsoleStream, line: &str) -> Result<()>;

    fn flush(&self) -> Result<()> {
        Ok(())
    }
}

/// Process stdout/stderr: log and info go to stdout, warn and error to stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct StdConsole;

impl Console for StdConsole {
    fn write_line(&self, stream: ConsoleStream, line: &str) -> Result<()> {
        match stream {
            ConsoleStream::Log | ConsoleStream::Info => {
                let mut stdout = std::io::stdout().lock();
                writeln!(stdout, "{}", line)
                    .map_err(|e| LoggerError::io_operation("writing to stdout", line, e))
            }
            ConsoleStream::Warn | ConsoleStream::Error => {
                let mut stderr = std::io::stderr().lock();
                writeln!(stderr, "{}", line)
                    .map_err(|e| LoggerError::io_operation("writing to stderr", line, e))
            }
        }
    }

    fn flush(&self) -> Result<()> {
        std::io::stdout()
            .flush()
            .map_err(|e| LoggerError::io_operation("flushing stdout", "console", e))?;
        std::io::stderr()
            .flush()
            .map_err(|e| LoggerError::io_operation("flushing stderr", "console", e))
    }
}

pub struct ConsoleHandler {
    console: Arc<dyn Console>,
    formatter: FormatterSlot,
}

impl ConsoleHandler {
    pub fn new() -> Self {
        Self::with_console(Arc::new(StdConsole))
    }

    /// Write through a custom console instead of the process streams
    pub fn with_console(console: Arc<dyn Console>) -> Self {
        Self {
            console,
            formatter: FormatterSlot::new(),
        }
    }
}

impl Default for ConsoleHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for ConsoleHandler {
    fn emit(&self, record: &mut LogRecord) -> Result<()> {
        self.format(record)?;
        match ConsoleStream::for_level(record.level()) {
            Some(stream) => self.console.write_line(stream, record.message()),
            None => {
                // Unmapped levels keep their tag visible
                let line = format!("{} {}", record.level(), record.message());
                self.console.write_line(ConsoleStream::Log, &line)
            }
        }
    }

    fn name(&self) -> &str {
        "console"
    }

    fn formatter(&self) -> &FormatterSlot {
        &self.formatter
    }

    fn flush(&self) -> Result<()> {
        self.console.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatters::TemplateFormatter;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct RecordingConsole {
        lines: Mutex<Vec<(ConsoleStream, String)>>,
        flushes: Mutex<usize>,
    }

    impl Console for RecordingConsole {
        fn write_line(&self, stream: ConsoleStream, line: &str) -> Result<()> {
            self.lines.lock().push((stream, line.to_string()));
            Ok(())
        }

        fn flush(&self) -> Result<()> {
            *self.flushes.lock() += 1;
            Ok(())
        }
    }

    fn handler() -> (Arc<RecordingConsole>, ConsoleHandler) {
        let console = Arc::new(RecordingConsole::default());
        let handler = ConsoleHandler::with_console(console.clone());
        handler
            .set_formatter(Arc::new(TemplateFormatter::new("%(msg)s")))
            .expect("formatter accepted");
        (console, handler)
    }

    #[test]
    fn test_level_routes_to_stream() {
        let (console, handler) = handler();
        for level in ["error", "warning", "info"] {
            let mut record = LogRecord::new("", level, "rar", Vec::new());
            handler.emit(&mut record).expect("emit");
        }

        let lines = console.lines.lock();
        assert_eq!(
            *lines,
            vec![
                (ConsoleStream::Error, "rar".to_string()),
                (ConsoleStream::Warn, "rar".to_string()),
                (ConsoleStream::Info, "rar".to_string()),
            ]
        );
    }

    #[test]
    fn test_unknown_level_falls_back_to_log_with_tag() {
        let (console, handler) = handler();
        let mut record = LogRecord::new("", "debug", "rar", Vec::new());
        handler.emit(&mut record).expect("emit");

        assert_eq!(
            console.lines.lock()[0],
            (ConsoleStream::Log, "debug rar".to_string())
        );
    }

    #[test]
    fn test_emit_stores_rendered_message() {
        let (_, handler) = handler();
        handler
            .set_formatter(Arc::new(TemplateFormatter::new("%(lvl)s: %(msg)s")))
            .expect("formatter accepted");
        let mut record = LogRecord::new("", "info", "hi", Vec::new());
        handler.emit(&mut record).expect("emit");

        assert_eq!(record.message(), "info: hi");
        assert_eq!(record.msg(), "hi");
    }

    #[test]
    fn test_format_error_propagates_and_writes_nothing() {
        let (console, handler) = handler();
        handler
            .set_formatter(Arc::new(TemplateFormatter::new("%s")))
            .expect("formatter accepted");
        let mut record = LogRecord::new("", "info", "hi", Vec::new());

        let result = handler.emit(&mut record);
        assert!(matches!(
            result,
            Err(LoggerError::InsufficientArguments { .. })
        ));
        assert!(console.lines.lock().is_empty());
    }

    #[test]
    fn test_new_handler_uses_default_formatter() {
        let handler = ConsoleHandler::new();
        assert!(handler.formatter().is_default());
        assert_eq!(handler.name(), "console");
    }

    #[test]
    fn test_flush_reaches_console() {
        let (console, handler) = handler();
        handler.flush().expect("flush");
        handler.flush().expect("flush");
        assert_eq!(*console.flushes.lock(), 2);
        assert!(StdConsole.flush().is_ok());
    }
}
