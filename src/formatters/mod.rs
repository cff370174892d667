//! Record formatters

pub mod color;
pub mod template;

pub use color::{Attribute, ColorDef, ColorDefs, ColorFormatter, Style, StyleChain};
pub use template::{FieldTransform, Identity, TemplateFormatter};

use crate::core::{LogRecord, Result};
use std::sync::{Arc, OnceLock};

/// Renders a record into one output line
pub trait Formatter: Send + Sync {
    fn format(&self, record: &LogRecord) -> Result<String>;
}

static DEFAULT_FORMATTER: OnceLock<Arc<dyn Formatter>> = OnceLock::new();

/// The formatter shared by every handler that has not had one set
///
/// A [`TemplateFormatter`] with the default template and date format.
pub fn default_formatter() -> Arc<dyn Formatter> {
    DEFAULT_FORMATTER
        .get_or_init(|| Arc::new(TemplateFormatter::default()))
        .clone()
}
