//! Dot-delimited logger namespaces
//!
//! Input is normalised on construction: segments are split on `.`, empty
//! segments are dropped, and the canonical form joins the rest with `.`.
//! The empty namespace is the root.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Namespace {
    dotted: String,
    segments: Vec<String>,
}

impl Namespace {
    /// Display name of the root logger
    pub const ROOT_NAME: &'static str = "<root>";

    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let segments: Vec<String> = segments
            .into_iter()
            .flat_map(|s| {
                s.as_ref()
                    .split('.')
                    .filter(|part| !part.is_empty())
                    .map(String::from)
                    .collect::<Vec<_>>()
            })
            .collect();
        Self {
            dotted: segments.join("."),
            segments,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.dotted
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Last segment, or [`Namespace::ROOT_NAME`] for the root
    pub fn name(&self) -> &str {
        self.segments
            .last()
            .map(String::as_str)
            .unwrap_or(Self::ROOT_NAME)
    }

    pub fn parent(&self) -> Option<Namespace> {
        match self.segments.split_last() {
            Some((_, rest)) => Some(Self::from_segments(rest)),
            None => None,
        }
    }

    /// `self` followed by the segments of `relative`
    pub fn join(&self, relative: &Namespace) -> Namespace {
        Self::from_segments(self.segments.iter().chain(relative.segments.iter()))
    }

    /// True if `self` equals `ancestor` or lies beneath it
    pub fn is_within(&self, ancestor: &Namespace) -> bool {
        self.segments.starts_with(&ancestor.segments)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dotted)
    }
}

impl From<&str> for Namespace {
    fn from(dotted: &str) -> Self {
        Self::from_segments([dotted])
    }
}

impl From<String> for Namespace {
    fn from(dotted: String) -> Self {
        Self::from(dotted.as_str())
    }
}

impl From<&String> for Namespace {
    fn from(dotted: &String) -> Self {
        Self::from(dotted.as_str())
    }
}

impl From<&Namespace> for Namespace {
    fn from(namespace: &Namespace) -> Self {
        namespace.clone()
    }
}

impl From<Option<&str>> for Namespace {
    fn from(dotted: Option<&str>) -> Self {
        dotted.map(Self::from).unwrap_or_default()
    }
}

impl From<&[&str]> for Namespace {
    fn from(segments: &[&str]) -> Self {
        Self::from_segments(segments)
    }
}

impl<const N: usize> From<[&str; N]> for Namespace {
    fn from(segments: [&str; N]) -> Self {
        Self::from_segments(segments)
    }
}

impl From<Vec<&str>> for Namespace {
    fn from(segments: Vec<&str>) -> Self {
        Self::from_segments(segments)
    }
}

impl From<Vec<String>> for Namespace {
    fn from(segments: Vec<String>) -> Self {
        Self::from_segments(segments)
    }
}
