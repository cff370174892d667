//! Declarative logging configuration
//!
//! A [`LoggingConfig`] names formatters, filters and handlers by id and wires
//! them onto loggers keyed by namespace (`""` is the root). It deserialises
//! from JSON:
//!
//! ```
//! use rust_hierarchical_logger::{LoggingConfig, Registry};
//!
//! let config = LoggingConfig::from_json(r#"{
//!     "formatters": {
//!         "plain": {"kind": "template", "template": "%(lvl)s %(name)s %(msg)s"}
//!     },
//!     "filters": {
//!         "warnings": {"kind": "level", "level": "warning"}
//!     },
//!     "handlers": {
//!         "capture": {"kind": "memory", "formatter": "plain"}
//!     },
//!     "loggers": {
//!         "": {"handlers": ["capture"]},
//!         "db": {"level": "info", "filters": ["warnings"]}
//!     }
//! }"#).unwrap();
//!
//! let registry = Registry::new();
//! let built = config.apply(&registry).unwrap();
//! registry.get_logger("db").info("dropped", [0; 0]).unwrap();
//! registry.get_logger("db").error("kept", [0; 0]).unwrap();
//! assert_eq!(built.memory_handler("capture").unwrap().lines(), vec!["error db kept"]);
//! ```
//!
//! Components are built into [`Component`] values and attached through the
//! same entry points as the typed API, so naming a handler in a logger's
//! `filters` list fails with [`LoggerError::InvalidArgument`]. Unknown ids
//! fail with [`LoggerError::InvalidConfiguration`].

use crate::core::{
    Component, Filter, Handler, IntoFilter, IntoHandler, LevelFilter, LogLevel, LoggerError,
    NamespaceFilter, Registry, Result, TimestampFormat,
};
use crate::formatters::{ColorDefs, ColorFormatter, Formatter, TemplateFormatter};
use crate::handlers::{ConsoleHandler, MemoryHandler};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Keep the existing handlers and filters of configured loggers
    pub incremental: bool,
    pub formatters: BTreeMap<String, FormatterConfig>,
    pub filters: BTreeMap<String, FilterConfig>,
    pub handlers: BTreeMap<String, HandlerConfig>,
    pub loggers: BTreeMap<String, LoggerConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FormatterConfig {
    Template {
        #[serde(default)]
        template: String,
        #[serde(default)]
        date_format: TimestampFormat,
    },
    Color {
        #[serde(default)]
        template: String,
        #[serde(default)]
        date_format: TimestampFormat,
        /// Replaces the default `lvl` colours when present
        #[serde(default)]
        colors: Option<ColorDefs>,
        /// Overrides terminal detection when present
        #[serde(default)]
        enabled: Option<bool>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterConfig {
    Level {
        level: LogLevel,
        #[serde(default)]
        admit_unknown: bool,
    },
    Namespace {
        namespace: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HandlerConfig {
    Console {
        #[serde(default)]
        formatter: Option<String>,
    },
    Memory {
        #[serde(default)]
        formatter: Option<String>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Level name; names outside the fixed set are ignored with a warning
    pub level: Option<String>,
    pub propagate: Option<bool>,
    pub filters: Vec<String>,
    pub handlers: Vec<String>,
}

/// Everything [`LoggingConfig::apply`] built, by id
#[derive(Default)]
pub struct ConfiguredComponents {
    components: HashMap<String, Component>,
    memory: HashMap<String, Arc<MemoryHandler>>,
}

impl ConfiguredComponents {
    pub fn component(&self, id: &str) -> Option<&Component> {
        self.components.get(id)
    }

    /// Typed access to a configured memory handler
    pub fn memory_handler(&self, id: &str) -> Option<Arc<MemoryHandler>> {
        self.memory.get(id).cloned()
    }

    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.components.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    fn insert(&mut self, id: &str, component: Component) -> Result<()> {
        if self.components.contains_key(id) {
            return Err(LoggerError::config(
                id,
                format!("duplicate component id (already a {})", self.components[id].kind()),
            ));
        }
        self.components.insert(id.to_string(), component);
        Ok(())
    }

    fn lookup(&self, id: &str, referrer: &str) -> Result<Component> {
        self.components
            .get(id)
            .cloned()
            .ok_or_else(|| LoggerError::config(referrer, format!("unknown component id '{}'", id)))
    }
}

impl LoggingConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation("reading logging config", path.display().to_string(), e)
        })?;
        Self::from_json(&json)
    }

    /// Build every component and attach them to `registry`
    ///
    /// Every id is resolved before the first logger is touched, so a config
    /// that fails leaves the registry unchanged.
    pub fn apply(&self, registry: &Registry) -> Result<ConfiguredComponents> {
        let mut built = ConfiguredComponents::default();

        for (id, formatter) in &self.formatters {
            built.insert(id, Component::Formatter(formatter.build(id)?))?;
        }
        for (id, filter) in &self.filters {
            built.insert(id, Component::Filter(filter.build()))?;
        }
        for (id, handler) in &self.handlers {
            let component = match handler {
                HandlerConfig::Console { formatter } => {
                    let console = Arc::new(ConsoleHandler::new());
                    if let Some(formatter) = formatter {
                        console.set_formatter(built.lookup(formatter, id)?)?;
                    }
                    Component::Handler(console)
                }
                HandlerConfig::Memory { formatter } => {
                    let memory = Arc::new(MemoryHandler::new());
                    if let Some(formatter) = formatter {
                        memory.set_formatter(built.lookup(formatter, id)?)?;
                    }
                    built.memory.insert(id.clone(), memory.clone());
                    Component::Handler(memory)
                }
            };
            built.insert(id, component)?;
        }

        let mut resolved = Vec::with_capacity(self.loggers.len());
        for (namespace, config) in &self.loggers {
            let filters = config
                .filters
                .iter()
                .map(|id| built.lookup(id, namespace)?.into_filter())
                .collect::<Result<Vec<Arc<dyn Filter>>>>()?;
            let handlers = config
                .handlers
                .iter()
                .map(|id| built.lookup(id, namespace)?.into_handler())
                .collect::<Result<Vec<Arc<dyn Handler>>>>()?;
            resolved.push((namespace, config, filters, handlers));
        }

        for (namespace, config, filters, handlers) in resolved {
            let logger = registry.get_logger(namespace.as_str());
            if !self.incremental {
                logger.clear_filters();
                logger.clear_handlers();
            }
            if let Some(level) = &config.level {
                if level.parse::<LogLevel>().is_err() {
                    eprintln!(
                        "[LOGGER WARNING] Ignoring unknown level '{}' for logger '{}'",
                        level, namespace
                    );
                }
                logger.set_level_name(Some(level.as_str()));
            }
            if let Some(propagate) = config.propagate {
                logger.set_propagate(propagate);
            }
            for filter in filters {
                logger.add_filter(filter)?;
            }
            for handler in handlers {
                logger.add_handler(handler)?;
            }
        }

        Ok(built)
    }
}

impl FormatterConfig {
    fn build(&self, id: &str) -> Result<Arc<dyn Formatter>> {
        let template_formatter = |template: &str, date_format: &TimestampFormat| {
            TemplateFormatter::new(template)
                .with_date_format(date_format.clone())
                .map_err(|e| LoggerError::config(id, e.to_string()))
        };
        Ok(match self {
            FormatterConfig::Template {
                template,
                date_format,
            } => Arc::new(template_formatter(template.as_str(), date_format)?),
            FormatterConfig::Color {
                template,
                date_format,
                colors,
                enabled,
            } => {
                let base = template_formatter(template.as_str(), date_format)?;
                let mut formatter = ColorFormatter::new(base);
                if let Some(colors) = colors {
                    formatter = formatter.with_color_defs(colors.clone());
                }
                if let Some(enabled) = enabled {
                    formatter = formatter.with_enabled(*enabled);
                }
                Arc::new(formatter)
            }
        })
    }
}

impl FilterConfig {
    fn build(&self) -> Arc<dyn Filter> {
        match self {
            FilterConfig::Level {
                level,
                admit_unknown,
            } => Arc::new(LevelFilter::new(*level).with_admit_unknown(*admit_unknown)),
            FilterConfig::Namespace { namespace } => {
                Arc::new(NamespaceFilter::new(namespace.as_str()))
            }
        }
    }
}
