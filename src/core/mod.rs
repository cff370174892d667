//! Core logger types and traits

pub mod component;
pub mod error;
pub mod filter;
pub mod handler;
pub mod log_context;
pub mod log_level;
pub mod logger;
pub mod namespace;
pub mod record;
pub mod registry;
pub mod timestamp;

pub use component::{Component, IntoFilter, IntoFormatter, IntoHandler};
pub use error::{LoggerError, Result};
pub use filter::{Filter, FnFilter, LevelFilter, NamespaceFilter};
pub use handler::{FormatterSlot, Handler};
pub use log_context::{FieldValue, LogContext};
pub use log_level::LogLevel;
pub use logger::{DefaultRecordFactory, Logger, RecordFactory, NO_ARGS};
pub use namespace::Namespace;
pub use record::{CallSite, LogRecord};
pub use registry::{get_logger, root_logger, Registry};
pub use timestamp::TimestampFormat;
