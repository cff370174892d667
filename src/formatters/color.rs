//! ANSI colour decoration for template fields
//!
//! [`ColorFormatter`] renders through a [`TemplateFormatter`] and styles the
//! named fields listed in its [`ColorDefs`]. A definition is either a style
//! chain applied to every value of the field, or a table from field value to
//! style chain. Styling is gated by a single `enabled` flag, which defaults to
//! whether stdout is a terminal.

use super::template::{FieldTransform, TemplateFormatter};
use super::Formatter;
use crate::core::{LogRecord, LoggerError, Result};
use colored::Color;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::io::IsTerminal;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};

const RESET: &str = "\x1b[0m";

/// Text attributes expressible as SGR codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Bold,
    Dimmed,
    Italic,
    Underline,
    Blink,
    Reversed,
    Hidden,
    Strikethrough,
}

impl Attribute {
    fn code(&self) -> u8 {
        match self {
            Attribute::Bold => 1,
            Attribute::Dimmed => 2,
            Attribute::Italic => 3,
            Attribute::Underline => 4,
            Attribute::Blink => 5,
            Attribute::Reversed => 7,
            Attribute::Hidden => 8,
            Attribute::Strikethrough => 9,
        }
    }

    fn parse(name: &str) -> Option<Self> {
        let attribute = match name {
            "bold" => Attribute::Bold,
            "dimmed" | "dim" => Attribute::Dimmed,
            "italic" => Attribute::Italic,
            "underline" => Attribute::Underline,
            "blink" => Attribute::Blink,
            "reversed" | "inverse" => Attribute::Reversed,
            "hidden" => Attribute::Hidden,
            "strikethrough" => Attribute::Strikethrough,
            _ => return None,
        };
        Some(attribute)
    }
}

/// One named style: a foreground colour, a background colour or an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Fg(Color),
    Bg(Color),
    Attr(Attribute),
}

impl Style {
    fn sgr(&self) -> String {
        match self {
            Style::Fg(color) => color.to_fg_str().to_string(),
            Style::Bg(color) => color.to_bg_str().to_string(),
            Style::Attr(attribute) => attribute.code().to_string(),
        }
    }

    pub fn apply(&self, value: &str) -> String {
        format!("\x1b[{}m{}{}", self.sgr(), value, RESET)
    }
}

fn parse_color(name: &str) -> Option<Color> {
    // colored spells bright variants with a space
    Color::from_str(&name.replace('_', " ")).ok()
}

impl FromStr for Style {
    type Err = LoggerError;

    /// `red`, `bright_blue`, `on_yellow`, `bold`, ...
    fn from_str(name: &str) -> Result<Self> {
        let lowered = name.trim().to_lowercase();
        if let Some(attribute) = Attribute::parse(&lowered) {
            return Ok(Style::Attr(attribute));
        }
        let style = match lowered.strip_prefix("on_") {
            Some(background) => parse_color(background).map(Style::Bg),
            None => parse_color(&lowered).map(Style::Fg),
        };
        style.ok_or_else(|| LoggerError::config("color", format!("unknown style '{}'", name)))
    }
}

/// Styles applied left to right
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct StyleChain {
    names: Vec<String>,
    styles: Vec<Style>,
}

impl StyleChain {
    pub fn parse<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<String> = names.into_iter().map(|n| n.as_ref().to_string()).collect();
        let styles = names
            .iter()
            .map(|name| name.parse())
            .collect::<Result<Vec<Style>>>()?;
        Ok(Self { names, styles })
    }

    pub fn styles(&self) -> &[Style] {
        &self.styles
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    pub fn apply(&self, value: String) -> String {
        self.styles
            .iter()
            .fold(value, |styled, style| style.apply(&styled))
    }
}

impl TryFrom<Vec<String>> for StyleChain {
    type Error = LoggerError;

    fn try_from(names: Vec<String>) -> Result<Self> {
        Self::parse(names)
    }
}

impl From<StyleChain> for Vec<String> {
    fn from(chain: StyleChain) -> Self {
        chain.names
    }
}

/// How one field is coloured
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorDef {
    /// Same chain for every value
    Chain(StyleChain),
    /// Chain chosen by the field's rendered value
    ByValue(HashMap<String, StyleChain>),
}

impl ColorDef {
    pub fn apply(&self, value: String) -> String {
        match self {
            ColorDef::Chain(chain) => chain.apply(value),
            ColorDef::ByValue(table) => match table.get(&value) {
                Some(chain) => chain.apply(value),
                None => value,
            },
        }
    }
}

/// Colour definitions keyed by template field name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorDefs(HashMap<String, ColorDef>);

impl ColorDefs {
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>, def: ColorDef) -> Self {
        self.0.insert(field.into(), def);
        self
    }

    pub fn get(&self, field: &str) -> Option<&ColorDef> {
        self.0.get(field)
    }
}

impl Default for ColorDefs {
    /// `lvl`: error red, warning yellow, info green
    fn default() -> Self {
        let lvl = [
            ("error", "red", Color::Red),
            ("warning", "yellow", Color::Yellow),
            ("info", "green", Color::Green),
        ]
        .into_iter()
        .map(|(value, name, color)| {
            let chain = StyleChain {
                names: vec![name.to_string()],
                styles: vec![Style::Fg(color)],
            };
            (value.to_string(), chain)
        })
        .collect();
        Self::empty().with_field("lvl", ColorDef::ByValue(lvl))
    }
}

/// Template formatter that colours selected fields
pub struct ColorFormatter {
    base: TemplateFormatter,
    defs: ColorDefs,
    enabled: AtomicBool,
}

impl ColorFormatter {
    pub fn new(base: TemplateFormatter) -> Self {
        Self {
            base,
            defs: ColorDefs::default(),
            enabled: AtomicBool::new(std::io::stdout().is_terminal()),
        }
    }

    #[must_use]
    pub fn with_color_defs(mut self, defs: ColorDefs) -> Self {
        self.defs = defs;
        self
    }

    #[must_use]
    pub fn with_enabled(self, enabled: bool) -> Self {
        self.set_enabled(enabled);
        self
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn base(&self) -> &TemplateFormatter {
        &self.base
    }

    pub fn color_defs(&self) -> &ColorDefs {
        &self.defs
    }
}

impl Default for ColorFormatter {
    fn default() -> Self {
        Self::new(TemplateFormatter::default())
    }
}

impl fmt::Debug for ColorFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColorFormatter")
            .field("base", &self.base)
            .field("defs", &self.defs)
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

impl FieldTransform for ColorFormatter {
    fn transform(&self, field: &str, value: String) -> String {
        if !self.is_enabled() {
            return value;
        }
        match self.defs.get(field) {
            Some(def) => def.apply(value),
            None => value,
        }
    }
}

impl Formatter for ColorFormatter {
    fn format(&self, record: &LogRecord) -> Result<String> {
        self.base.render(record, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red(value: &str) -> String {
        format!("\x1b[31m{}\x1b[0m", value)
    }

    #[test]
    fn test_style_parsing() {
        assert_eq!("red".parse::<Style>().expect("red"), Style::Fg(Color::Red));
        assert_eq!(
            "bright_blue".parse::<Style>().expect("bright_blue"),
            Style::Fg(Color::BrightBlue)
        );
        assert_eq!(
            "on_yellow".parse::<Style>().expect("on_yellow"),
            Style::Bg(Color::Yellow)
        );
        assert_eq!(
            "bold".parse::<Style>().expect("bold"),
            Style::Attr(Attribute::Bold)
        );
        assert!(matches!(
            "sparkly".parse::<Style>(),
            Err(LoggerError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_chain_applies_left_to_right() {
        let chain = StyleChain::parse(["red", "bold"]).expect("valid chain");
        assert_eq!(
            chain.styles(),
            [Style::Fg(Color::Red), Style::Attr(Attribute::Bold)]
        );
        assert_eq!(
            chain.apply("x".to_string()),
            format!("\x1b[1m{}\x1b[0m", red("x"))
        );
    }

    #[test]
    fn test_default_defs_style_levels() {
        let formatter = ColorFormatter::default().with_enabled(true);
        assert_eq!(formatter.transform("lvl", "error".to_string()), red("error"));
        assert_eq!(
            formatter.transform("lvl", "warning".to_string()),
            "\x1b[33mwarning\x1b[0m"
        );
        assert_eq!(
            formatter.transform("lvl", "info".to_string()),
            "\x1b[32minfo\x1b[0m"
        );
        assert_eq!(formatter.transform("lvl", "debug".to_string()), "debug");
        assert_eq!(formatter.transform("msg", "error".to_string()), "error");
    }

    #[test]
    fn test_accessors_expose_configuration() {
        let base = TemplateFormatter::new("%(lvl)s %(msg)s");
        let formatter = ColorFormatter::new(base.clone());
        assert_eq!(formatter.base(), &base);
        assert_eq!(formatter.color_defs(), &ColorDefs::default());
        assert!(formatter.color_defs().get("lvl").is_some());

        let formatter = formatter.with_color_defs(ColorDefs::empty());
        assert!(formatter.color_defs().get("lvl").is_none());
    }

    #[test]
    fn test_disabled_passes_through() {
        let formatter = ColorFormatter::default().with_enabled(false);
        assert_eq!(formatter.transform("lvl", "error".to_string()), "error");
    }

    #[test]
    fn test_custom_defs() {
        let defs: ColorDefs = serde_json::from_str(
            r#"{
                "simple": ["red"],
                "value": {"thing": ["green"], "other": []},
                "empty": []
            }"#,
        )
        .expect("valid defs");
        let formatter = ColorFormatter::default()
            .with_color_defs(defs)
            .with_enabled(true);

        assert_eq!(formatter.transform("simple", "blah".to_string()), red("blah"));
        assert_eq!(
            formatter.transform("value", "thing".to_string()),
            "\x1b[32mthing\x1b[0m"
        );
        assert_eq!(formatter.transform("value", "rar".to_string()), "rar");
        assert_eq!(formatter.transform("value", "other".to_string()), "other");
        assert_eq!(formatter.transform("empty", "thing".to_string()), "thing");
    }

    #[test]
    fn test_unknown_style_in_defs_fails_to_parse() {
        let result: std::result::Result<ColorDefs, _> =
            serde_json::from_str(r#"{"lvl": ["mauve"]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_format_colours_only_configured_field() {
        let formatter =
            ColorFormatter::new(TemplateFormatter::new("%(lvl)s %(name)s %(msg)s")).with_enabled(true);
        let record = LogRecord::new("error", "error", "error", Vec::new());
        assert_eq!(
            formatter.format(&record).expect("render"),
            format!("{} error error", red("error"))
        );
    }

    #[test]
    fn test_set_enabled_toggles() {
        let formatter = ColorFormatter::default().with_enabled(true);
        formatter.set_enabled(false);
        assert!(!formatter.is_enabled());
        let record = LogRecord::new("x", "error", "boom", Vec::new());
        assert_eq!(
            formatter.format(&record).expect("render"),
            TemplateFormatter::default()
                .format(&record)
                .expect("render plain")
        );
    }
}
