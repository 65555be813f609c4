//! Collision-avoiding name resolution
//!
//! Given a candidate file name and the names already present at a destination,
//! produce a name that does not collide by appending or incrementing a numeric
//! `-N` suffix between the slug and the extension.
//!
//! Resolution is a single pass: the highest-sorted existing duplicate decides
//! the suffix, and the produced name is not checked again.

use crate::collate::locale_cmp;
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// A name split into slug and optional extension (extension keeps its dot)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameCandidate {
    pub slug: String,
    pub extension: Option<String>,
}

fn split_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^(.+?)(\.[A-Za-z0-9]+)?$").ok())
        .as_ref()
}

impl NameCandidate {
    /// Split at the last dot when what follows it is alphanumeric.
    ///
    /// Anything else (no dot, `foo.`, `foo.tar-gz`, empty) is kept whole as
    /// the slug with no extension.
    pub fn parse(name: &str) -> Self {
        match split_pattern().and_then(|p| p.captures(name)) {
            Some(caps) => Self {
                slug: caps
                    .get(1)
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default(),
                extension: caps.get(2).map(|m| m.as_str().to_string()),
            },
            None => Self {
                slug: name.to_string(),
                extension: None,
            },
        }
    }

    fn extension_str(&self) -> &str {
        self.extension.as_deref().unwrap_or("")
    }

    /// Matches the slug itself or `slug-<digits>`, followed by the same extension.
    fn duplicate_matcher(&self) -> Option<Regex> {
        let pattern = format!(
            r"^{}(?:-([0-9]+))?{}$",
            regex::escape(&self.slug),
            regex::escape(self.extension_str())
        );
        Regex::new(&pattern).ok()
    }

    fn with_suffix(&self, suffix: &str) -> String {
        format!("{}-{}{}", self.slug, suffix, self.extension_str())
    }
}

/// Add one to a run of ASCII digits, any length; leading zeros are dropped.
fn increment_digits(digits: &str) -> String {
    let trimmed = digits.trim_start_matches('0');
    let mut out: Vec<u8> = trimmed.bytes().collect();
    for digit in out.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            return String::from_utf8_lossy(&out).into_owned();
        }
    }
    out.insert(0, b'1');
    String::from_utf8_lossy(&out).into_owned()
}

/// Portion of a name before its first dot, used as the sort key.
fn sort_key(name: &str) -> &str {
    name.split('.').next().unwrap_or(name)
}

/// Resolve `name` against `existing`, returning a name with a fresh numeric suffix
/// when a duplicate is present.
///
/// ```
/// use intake::naming::resolve_name;
///
/// assert_eq!(resolve_name("photo.jpg", &[] as &[&str]), "photo.jpg");
/// assert_eq!(resolve_name("photo.jpg", &["photo.jpg"]), "photo-1.jpg");
/// assert_eq!(resolve_name("notes", &["notes", "notes-3"]), "notes-4");
/// ```
pub fn resolve_name<S: AsRef<str>>(name: &str, existing: &[S]) -> String {
    if existing.is_empty() {
        return name.to_string();
    }

    let candidate = NameCandidate::parse(name);
    let Some(matcher) = candidate.duplicate_matcher() else {
        return name.to_string();
    };

    let mut sorted: Vec<&str> = existing.iter().map(|s| s.as_ref()).collect();
    sorted.sort_by(|a, b| locale_cmp(sort_key(a), sort_key(b)));

    let duplicate = sorted
        .iter()
        .rev()
        .find_map(|existing_name| matcher.captures(existing_name));

    let Some(caps) = duplicate else {
        return name.to_string();
    };

    let current = caps.get(1).map(|m| m.as_str()).unwrap_or("0");
    let resolved = candidate.with_suffix(&increment_digits(current));
    debug!(
        name = %name,
        duplicate = %caps.get(0).map(|m| m.as_str()).unwrap_or_default(),
        resolved = %resolved,
        "Resolved name collision"
    );
    resolved
}

/// Strategy for turning a candidate name into one that is free at the destination.
pub trait NameResolver: Send + Sync {
    fn resolve(&self, name: &str, existing: &[String]) -> String;
}

/// Default resolver: numeric `-N` suffix via [`resolve_name`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SuffixResolver;

impl NameResolver for SuffixResolver {
    fn resolve(&self, name: &str, existing: &[String]) -> String {
        resolve_name(name, existing)
    }
}

/// Resolve several names for one destination.
///
/// Each resolved name joins the existing set before the next one is resolved,
/// so a drop holding two `photo.jpg` files yields `photo.jpg` and `photo-1.jpg`.
pub fn resolve_batch<R, I, S>(resolver: &R, names: I, existing: &[String]) -> Vec<String>
where
    R: NameResolver + ?Sized,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut taken: Vec<String> = existing.to_vec();
    let mut out = Vec::new();
    for name in names {
        let resolved = resolver.resolve(name.as_ref(), &taken);
        taken.push(resolved.clone());
        out.push(resolved);
    }
    out
}
