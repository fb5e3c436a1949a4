// src/quotes.rs
//! Turns free-form model output into 1-3 clean quote strings.
//!
//! The model is asked for one `"text" (author)` per line, but nothing holds
//! it to that. Extraction runs as a chain of increasingly permissive stages,
//! each a pure function over the raw text:
//!
//! 1. [`extract_from_lines`] - line heuristics (drop preambles, strip list markers)
//! 2. [`extract_with_pattern`] - regex scan for quoted text plus optional author
//! 3. [`fallback_lines`] - any reasonably long line, verbatim
//!
//! A later stage only runs while fewer than [`MIN_QUOTES`] candidates exist,
//! and only ever adds to what earlier stages found.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

pub const MIN_QUOTES: usize = 2;
pub const MAX_QUOTES: usize = 3;
pub const FALLBACK_QUOTE: &str = "Unable to generate appropriate quotes at this time.";

/// Lines shorter than this need a `"` to count as a quote.
const MIN_UNQUOTED_LEN: usize = 20;

/// How far into a line a list marker's delimiter may sit.
const MARKER_SCAN_WINDOW: usize = 5;
const MARKER_DELIMITERS: [char; 4] = ['.', ')', '-', ' '];

/// Phrases that mark a line as commentary about the quotes rather than a quote.
const META_PHRASES: &[&str] = &[
    "here are",
    "based on",
    "tailored for",
    "mood of",
    "feeling",
    "quotes for",
    "suggestions:",
    "consider these",
];

static QUOTE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""([^"]+)"[^"]*\([^)]+\)|"([^"]+)""#).expect("valid regex")
});

/// Ordered quote list handed back to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QuoteResult(Vec<String>);

impl QuoteResult {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

/// Trimmed, non-blank lines. Cloning the iterator restarts the scan.
pub fn candidate_lines(raw: &str) -> impl Iterator<Item = &str> + Clone {
    raw.lines().map(str::trim).filter(|line| !line.is_empty())
}

fn is_meta_commentary(line: &str) -> bool {
    let lowered = line.to_lowercase();
    META_PHRASES.iter().any(|phrase| lowered.contains(phrase))
}

/// Drops a leading `1.`, `2)`, `-` or `•` style marker.
pub fn strip_list_marker(line: &str) -> &str {
    let has_marker = line.chars().next().is_some_and(|c| c.is_ascii_digit())
        || line.starts_with('-')
        || line.starts_with('•');
    if !has_marker {
        return line;
    }

    line.char_indices()
        .take(MARKER_SCAN_WINDOW)
        .find(|(_, c)| MARKER_DELIMITERS.contains(c))
        .map(|(idx, c)| line[idx + c.len_utf8()..].trim())
        .unwrap_or(line)
}

fn looks_like_quote(candidate: &str) -> bool {
    candidate.contains('"') || candidate.chars().count() > MIN_UNQUOTED_LEN
}

/// Stage 1: line heuristics.
pub fn extract_from_lines(raw: &str) -> Vec<String> {
    candidate_lines(raw)
        .filter(|line| !is_meta_commentary(line))
        .map(strip_list_marker)
        .filter(|cleaned| !cleaned.is_empty() && looks_like_quote(cleaned))
        .map(str::to_string)
        .collect()
}

fn find_author(raw: &str, quote_text: &str) -> Option<String> {
    let pattern = format!(r#""{}"[^"]*\(([^)]+)\)"#, regex::escape(quote_text));
    let author_pattern = Regex::new(&pattern).ok()?;
    author_pattern
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|author| author.as_str().to_string())
}

/// Stage 2: every `"quoted text"` in the raw output, re-joined with its
/// parenthesised author when one follows it.
pub fn extract_with_pattern(raw: &str) -> Vec<String> {
    QUOTE_PATTERN
        .captures_iter(raw)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|text| text.as_str())
        .filter(|text| !text.is_empty())
        .map(|text| match find_author(raw, text) {
            Some(author) => format!("\"{text}\" ({author})"),
            None => format!("\"{text}\""),
        })
        .collect()
}

/// Stage 3: first few long-enough lines, untouched.
pub fn fallback_lines(raw: &str) -> Vec<String> {
    candidate_lines(raw)
        .filter(|line| line.chars().count() > MIN_UNQUOTED_LEN)
        .take(MAX_QUOTES)
        .map(str::to_string)
        .collect()
}

fn push_unique(quotes: &mut Vec<String>, candidates: Vec<String>) {
    for candidate in candidates {
        if !quotes.contains(&candidate) {
            quotes.push(candidate);
        }
    }
}

/// Full chain. Never returns an empty list; the sentinel only appears when
/// no stage found anything.
pub fn extract_quotes(raw: &str) -> QuoteResult {
    let text = raw.trim();

    let mut quotes = extract_from_lines(text);
    if quotes.len() < MIN_QUOTES {
        push_unique(&mut quotes, extract_with_pattern(text));
    }
    quotes.truncate(MAX_QUOTES);

    if quotes.len() < MIN_QUOTES {
        push_unique(&mut quotes, fallback_lines(text));
        quotes.truncate(MAX_QUOTES);
    }
    if quotes.is_empty() {
        quotes.push(FALLBACK_QUOTE.to_string());
    }

    QuoteResult(quotes)
}
