//! Erased plugin values and capability checks at registration time
//!
//! The typed API accepts any `Arc<T>` whose `T` implements the required
//! trait. Components assembled dynamically (declarative configuration,
//! host plugin tables) travel as [`Component`], and registering one with
//! the wrong capability fails with [`LoggerError::InvalidArgument`].

use super::error::{LoggerError, Result};
use super::filter::Filter;
use super::handler::Handler;
use crate::formatters::Formatter;
use std::fmt;
use std::sync::Arc;

#[derive(Clone)]
pub enum Component {
    Filter(Arc<dyn Filter>),
    Handler(Arc<dyn Handler>),
    Formatter(Arc<dyn Formatter>),
}

impl Component {
    pub fn kind(&self) -> &'static str {
        match self {
            Component::Filter(_) => "filter",
            Component::Handler(_) => "handler",
            Component::Formatter(_) => "formatter",
        }
    }

    fn mismatch(self, expected: &str) -> LoggerError {
        LoggerError::invalid_argument(
            expected,
            format!("component is a {}, not a {}", self.kind(), expected),
        )
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Component::{}", self.kind())
    }
}

/// Values accepted by `Logger::add_filter`
pub trait IntoFilter {
    fn into_filter(self) -> Result<Arc<dyn Filter>>;
}

impl<T: Filter + 'static> IntoFilter for Arc<T> {
    fn into_filter(self) -> Result<Arc<dyn Filter>> {
        Ok(self)
    }
}

impl IntoFilter for Arc<dyn Filter> {
    fn into_filter(self) -> Result<Arc<dyn Filter>> {
        Ok(self)
    }
}

impl IntoFilter for Component {
    fn into_filter(self) -> Result<Arc<dyn Filter>> {
        match self {
            Component::Filter(filter) => Ok(filter),
            other => Err(other.mismatch("filter")),
        }
    }
}

/// Values accepted by `Logger::add_handler`
pub trait IntoHandler {
    fn into_handler(self) -> Result<Arc<dyn Handler>>;
}

impl<T: Handler + 'static> IntoHandler for Arc<T> {
    fn into_handler(self) -> Result<Arc<dyn Handler>> {
        Ok(self)
    }
}

impl IntoHandler for Arc<dyn Handler> {
    fn into_handler(self) -> Result<Arc<dyn Handler>> {
        Ok(self)
    }
}

impl IntoHandler for Component {
    fn into_handler(self) -> Result<Arc<dyn Handler>> {
        match self {
            Component::Handler(handler) => Ok(handler),
            other => Err(other.mismatch("handler")),
        }
    }
}

/// Values accepted by `FormatterSlot::set`
pub trait IntoFormatter {
    fn into_formatter(self) -> Result<Arc<dyn Formatter>>;
}

impl<T: Formatter + 'static> IntoFormatter for Arc<T> {
    fn into_formatter(self) -> Result<Arc<dyn Formatter>> {
        Ok(self)
    }
}

impl IntoFormatter for Arc<dyn Formatter> {
    fn into_formatter(self) -> Result<Arc<dyn Formatter>> {
        Ok(self)
    }
}

impl IntoFormatter for Component {
    fn into_formatter(self) -> Result<Arc<dyn Formatter>> {
        match self {
            Component::Formatter(formatter) => Ok(formatter),
            other => Err(other.mismatch("formatter")),
        }
    }
}
