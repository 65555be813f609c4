//! Accepted-type filter
//!
//! Mirrors the HTML `accept` attribute: a comma-separated list of exact MIME
//! types (`application/json`), wildcard subtypes (`image/*`) and file
//! extensions (`.png`). An empty filter accepts everything. Like the HTML
//! attribute, parsing never fails: an unusable token is kept and matches nothing.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// One accepted-type pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypePattern {
    /// `type/subtype`, matched exactly (ASCII case-insensitive)
    Exact(String),
    /// `type/*`, matched on the primary category
    Wildcard(String),
    /// `.ext`, matched against the end of the file name
    Extension(String),
    /// Token that is none of the above; never matches
    Unusable(String),
}

impl TypePattern {
    fn parse(raw: &str) -> Self {
        let token = raw.trim();
        let pattern = token.to_ascii_lowercase();
        if pattern.starts_with('.') {
            if pattern.len() < 2 {
                return TypePattern::unusable(token);
            }
            return TypePattern::Extension(pattern);
        }
        match pattern.split_once('/') {
            Some((category, "*")) if !category.is_empty() => {
                TypePattern::Wildcard(category.to_string())
            }
            Some((category, subtype))
                if !category.is_empty() && !subtype.is_empty() && !subtype.contains('/') =>
            {
                TypePattern::Exact(pattern)
            }
            _ => TypePattern::unusable(token),
        }
    }

    fn unusable(token: &str) -> Self {
        warn!(pattern = %token, "Accept pattern matches no type");
        TypePattern::Unusable(token.to_string())
    }

    pub fn is_usable(&self) -> bool {
        !matches!(self, TypePattern::Unusable(_))
    }

    fn matches(&self, name: &str, mime_type: &str) -> bool {
        match self {
            TypePattern::Exact(expected) => mime_type.eq_ignore_ascii_case(expected),
            TypePattern::Wildcard(category) => primary_category(mime_type)
                .map(|c| c.eq_ignore_ascii_case(category))
                .unwrap_or(false),
            TypePattern::Extension(ext) => name.to_ascii_lowercase().ends_with(ext.as_str()),
            TypePattern::Unusable(_) => false,
        }
    }
}

impl fmt::Display for TypePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypePattern::Exact(mime) => write!(f, "{}", mime),
            TypePattern::Wildcard(category) => write!(f, "{}/*", category),
            TypePattern::Extension(ext) => write!(f, "{}", ext),
            TypePattern::Unusable(token) => write!(f, "{}", token),
        }
    }
}

fn primary_category(mime_type: &str) -> Option<&str> {
    mime_type
        .split_once('/')
        .map(|(category, _)| category)
        .filter(|c| !c.is_empty())
}

/// Set of accepted-type patterns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeFilter {
    patterns: Vec<TypePattern>,
}

impl TypeFilter {
    /// Filter that accepts every file
    pub fn accept_all() -> Self {
        Self::default()
    }

    /// Parse a comma-separated accept string. Blank items are skipped, so `""`
    /// and `" , "` both parse to the accept-all filter. A filter made only of
    /// unusable tokens is not empty and accepts nothing.
    pub fn parse(accept: &str) -> Self {
        let patterns = accept
            .split(',')
            .filter(|item| !item.trim().is_empty())
            .map(TypePattern::parse)
            .collect();
        Self { patterns }
    }

    pub fn from_patterns(patterns: Vec<TypePattern>) -> Self {
        Self { patterns }
    }

    pub fn patterns(&self) -> &[TypePattern] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Whether a file with this name and declared type passes the filter.
    pub fn matches(&self, name: &str, mime_type: &str) -> bool {
        self.is_empty() || self.patterns.iter().any(|p| p.matches(name, mime_type))
    }
}

impl FromStr for TypeFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(TypeFilter::parse(s))
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self.patterns.iter().map(|p| p.to_string()).collect();
        write!(f, "{}", joined.join(","))
    }
}

impl Serialize for TypeFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TypeFilter {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(TypeFilter::parse(&raw))
    }
}
