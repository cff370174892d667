//! # Rust Hierarchical Logger
//!
//! A namespace-based logging facility. Loggers are looked up by dotted name
//! from a [`Registry`], records flow through the originating logger's
//! filters and then up the tree to every ancestor's handlers, and handlers
//! render records with template formatters.
//!
//! ## Features
//!
//! - **Hierarchy**: one logger per namespace, ancestors created on demand,
//!   inherited effective levels
//! - **Dispatch**: per-logger filters, ordered handlers, opt-out propagation
//! - **Templates**: `%(field)s` record fields and `%s` positional arguments
//! - **Colour**: per-field ANSI styling, gated on terminal output
//! - **Thread Safe**: loggers and registries can be shared across threads
//!
//! ```
//! use rust_hierarchical_logger::prelude::*;
//! use std::sync::Arc;
//!
//! let registry = Registry::new();
//! let sink = Arc::new(MemoryHandler::new());
//! sink.set_formatter(Arc::new(TemplateFormatter::new("%(lvl)s %(name)s %(msg)s")))
//!     .unwrap();
//! registry.root().add_handler(sink.clone()).unwrap();
//!
//! registry.get_logger("app.db").warning("pool at %s%%", [90]).unwrap();
//! assert_eq!(sink.lines(), vec!["warning app.db pool at 90%"]);
//! ```
//!
//! Levels are informational: a logger never drops a record because of its
//! level. Add a [`LevelFilter`] for minimum-severity gating.

pub mod config;
pub mod core;
pub mod formatters;
pub mod handlers;
pub mod macros;

pub mod prelude {
    pub use crate::config::LoggingConfig;
    pub use crate::core::{
        get_logger, root_logger, CallSite, Component, FieldValue, Filter, FnFilter, Handler,
        LevelFilter, LogContext, LogLevel, LogRecord, Logger, LoggerError, NamespaceFilter,
        Registry, Result, TimestampFormat, NO_ARGS,
    };
    pub use crate::formatters::{ColorDefs, ColorFormatter, Formatter, TemplateFormatter};
    pub use crate::handlers::{ConsoleHandler, MemoryHandler};
}

pub use crate::config::{ConfiguredComponents, LoggingConfig};
pub use crate::core::{
    get_logger, root_logger, CallSite, Component, DefaultRecordFactory, FieldValue, Filter,
    FnFilter, FormatterSlot, Handler, IntoFilter, IntoFormatter, IntoHandler, LevelFilter,
    LogContext, LogLevel, LogRecord, Logger, LoggerError, Namespace, NamespaceFilter,
    RecordFactory, Registry, Result, TimestampFormat, NO_ARGS,
};
pub use crate::formatters::{
    default_formatter, ColorDef, ColorDefs, ColorFormatter, FieldTransform, Formatter, Style,
    StyleChain, TemplateFormatter,
};
pub use crate::handlers::{Console, ConsoleHandler, ConsoleStream, MemoryHandler, StdConsole};
