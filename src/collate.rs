//! Locale-aware string ordering
//!
//! Approximates root-locale collation with three comparison levels:
//!
//! 1. Primary: base characters (NFD, combining marks dropped), case-folded.
//!    Whitespace and punctuation sort before digits, digits before letters.
//! 2. Secondary: diacritics.
//! 3. Tertiary: case, lower before upper.
//!
//! Strings equal on all three levels fall back to byte order so the ordering
//! stays total and sorting is deterministic.

use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Primary weight class of a base character
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum CharClass {
    Ignorable,
    Symbol,
    Digit,
    Letter,
}

fn classify(c: char) -> CharClass {
    if c.is_whitespace() {
        CharClass::Ignorable
    } else if c.is_numeric() {
        CharClass::Digit
    } else if c.is_alphabetic() {
        CharClass::Letter
    } else {
        CharClass::Symbol
    }
}

/// One collation element: a base character plus the marks that decorated it.
struct Element {
    base: char,
    marks: Vec<char>,
}

fn elements(s: &str) -> Vec<Element> {
    let mut out: Vec<Element> = Vec::with_capacity(s.len());
    for c in s.nfd() {
        if is_combining_mark(c) {
            if let Some(last) = out.last_mut() {
                last.marks.push(c);
                continue;
            }
        }
        out.push(Element {
            base: c,
            marks: Vec::new(),
        });
    }
    out
}

fn primary_key(c: char) -> (CharClass, char) {
    let folded = c.to_lowercase().next().unwrap_or(c);
    (classify(c), folded)
}

fn compare_primary(a: &[Element], b: &[Element]) -> Ordering {
    let ka = a.iter().map(|e| primary_key(e.base));
    let kb = b.iter().map(|e| primary_key(e.base));
    ka.cmp(kb)
}

fn compare_secondary(a: &[Element], b: &[Element]) -> Ordering {
    let ka = a.iter().map(|e| e.marks.as_slice());
    let kb = b.iter().map(|e| e.marks.as_slice());
    ka.cmp(kb)
}

fn compare_tertiary(a: &[Element], b: &[Element]) -> Ordering {
    // `false` (lower case) orders before `true` (upper case)
    let ka = a.iter().map(|e| e.base.is_uppercase());
    let kb = b.iter().map(|e| e.base.is_uppercase());
    ka.cmp(kb)
}

/// Compare two strings the way a locale-aware sort would order them.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    let ea = elements(a);
    let eb = elements(b);
    compare_primary(&ea, &eb)
        .then_with(|| compare_secondary(&ea, &eb))
        .then_with(|| compare_tertiary(&ea, &eb))
        .then_with(|| a.cmp(b))
}
