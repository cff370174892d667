//! Template formatter
//!
//! A template mixes two placeholder grammars, expanded in two passes:
//!
//! 1. Named fields, `%(field)s`: `field` is a record attribute (`name`,
//!    `lvl`, `msg`, `fn`, `lno`, `func`, `exc_info`, `extra`, `thread`), the
//!    literal `date`, or a key of the record's extra data. Each value goes
//!    through a [`FieldTransform`] before substitution. Unresolved names stay
//!    in the output verbatim.
//! 2. Positional fields, `%s`: filled from the record arguments left to right
//!    over the output of the first pass, so placeholders inside the message
//!    body are filled too. Running out of arguments is an error; leftover
//!    arguments are ignored. `%%` renders a single `%`.
//!
//! The trailing specifier character is accepted but does not change
//! rendering.

use super::Formatter;
use crate::core::{LogRecord, LoggerError, Result, TimestampFormat};
use regex::{Captures, Regex};
use std::sync::LazyLock;

// Placeholder names and specifiers are ASCII word characters only
static NAMED_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"%%|%\(((?-u:\w)+)\)(?-u:\w)").expect("Invalid named field regex")
});

static POSITIONAL_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%(%|(?-u:\w))").expect("Invalid positional field regex"));

/// Per-field hook applied to every resolved named value
pub trait FieldTransform {
    fn transform(&self, field: &str, value: String) -> String;
}

/// Leaves every value untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl FieldTransform for Identity {
    fn transform(&self, _field: &str, value: String) -> String {
        value
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFormatter {
    template: String,
    date_format: TimestampFormat,
}

impl TemplateFormatter {
    pub const DEFAULT_TEMPLATE: &'static str = "%(date)s - %(lvl)s - %(name)s - %(msg)s";

    /// An empty template falls back to [`Self::DEFAULT_TEMPLATE`]
    pub fn new(template: impl Into<String>) -> Self {
        let template = template.into();
        Self {
            template: if template.is_empty() {
                Self::DEFAULT_TEMPLATE.to_string()
            } else {
                template
            },
            date_format: TimestampFormat::default(),
        }
    }

    /// Replace the date pattern; a custom pattern chrono cannot render is rejected
    pub fn with_date_format(mut self, format: impl Into<TimestampFormat>) -> Result<Self> {
        let format = format.into();
        format.validate()?;
        self.date_format = format;
        Ok(self)
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn date_format(&self) -> &TimestampFormat {
        &self.date_format
    }

    pub fn format_date(&self, record: &LogRecord) -> Result<String> {
        self.date_format.format(record.created())
    }

    /// Render `record`, passing every named value through `transform`
    pub fn render(&self, record: &LogRecord, transform: &dyn FieldTransform) -> Result<String> {
        let named = self.expand_named(record, transform)?;
        Self::expand_positional(&named, record)
    }

    fn expand_named(&self, record: &LogRecord, transform: &dyn FieldTransform) -> Result<String> {
        let mut failure = None;
        let expanded = NAMED_FIELD
            .replace_all(&self.template, |caps: &Captures<'_>| {
                let Some(field) = caps.get(1) else {
                    // `%%` is left for the positional pass
                    return caps[0].to_string();
                };
                let field = field.as_str();
                let value = if field == "date" {
                    match self.format_date(record) {
                        Ok(date) => Some(date),
                        Err(err) => {
                            failure.get_or_insert(err);
                            return String::new();
                        }
                    }
                } else {
                    record.field(field).map(|value| value.to_string())
                };
                match value {
                    Some(value) => transform.transform(field, value),
                    None => caps[0].to_string(),
                }
            })
            .into_owned();
        match failure {
            Some(err) => Err(err),
            None => Ok(expanded),
        }
    }

    fn expand_positional(text: &str, record: &LogRecord) -> Result<String> {
        let args = record.args();
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        let mut cursor = 0;

        for caps in POSITIONAL_FIELD.captures_iter(text) {
            let Some(whole) = caps.get(0) else { continue };
            out.push_str(&text[last..whole.start()]);
            last = whole.end();

            if &caps[1] == "%" {
                out.push('%');
                continue;
            }
            let arg = args
                .get(cursor)
                .ok_or_else(|| LoggerError::insufficient_arguments(cursor + 1, args.len()))?;
            out.push_str(&arg.to_string());
            cursor += 1;
        }

        out.push_str(&text[last..]);
        Ok(out)
    }
}

impl Default for TemplateFormatter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TEMPLATE)
    }
}

impl Formatter for TemplateFormatter {
    fn format(&self, record: &LogRecord) -> Result<String> {
        self.render(record, &Identity)
    }
}
