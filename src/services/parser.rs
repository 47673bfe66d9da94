/// Recommendation text parser
///
/// Turns the loosely formatted, multi-line recommendation block produced by the
/// upstream text-generation service into structured records. Each non-blank line
/// is classified by the first matching pattern in [`LINE_PATTERNS`]; lines that
/// match nothing (summaries, commentary) are logged and dropped.
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::RecommendationRecord;

/// What a single line contributes to the output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Starts a new record
    Record(RecommendationRecord),
    /// Replaces the description of the latest record
    Continuation(String),
}

/// Line matcher tried in priority order
pub struct LinePattern {
    pub name: &'static str,
    regex: Regex,
    build: fn(&regex::Captures<'_>) -> LineKind,
}

impl LinePattern {
    fn classify(&self, line: &str) -> Option<LineKind> {
        self.regex.captures(line).map(|caps| (self.build)(&caps))
    }
}

fn capture(caps: &regex::Captures<'_>, name: &str) -> String {
    caps.name(name)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

fn described_record(caps: &regex::Captures<'_>) -> LineKind {
    LineKind::Record(RecommendationRecord::new(
        capture(caps, "song"),
        capture(caps, "artist"),
        capture(caps, "description"),
    ))
}

fn bare_record(caps: &regex::Captures<'_>) -> LineKind {
    LineKind::Record(RecommendationRecord::without_description(
        capture(caps, "song"),
        capture(caps, "artist"),
    ))
}

fn continuation(caps: &regex::Captures<'_>) -> LineKind {
    LineKind::Continuation(capture(caps, "description"))
}

/// Ordering decides disambiguation: a line like `1. "A" by B: c - d` must be
/// read by the colon pattern before the dash pattern sees it.
pub static LINE_PATTERNS: Lazy<Vec<LinePattern>> = Lazy::new(|| {
    vec![
        // 1. "Song" by Artist: Description
        LinePattern {
            name: "by_colon",
            regex: Regex::new(r#"[0-9]+\.\s"(?P<song>.+)" by (?P<artist>.+): (?P<description>.+)"#)
                .unwrap(),
            build: described_record,
        },
        // 1. "Song" by Artist - Description
        LinePattern {
            name: "by_dash",
            regex: Regex::new(r#"[0-9]+\.\s"(?P<song>.+)" by (?P<artist>.+) - (?P<description>.+)"#)
                .unwrap(),
            build: described_record,
        },
        // 1. "Song" - Artist
        LinePattern {
            name: "dash_artist",
            regex: Regex::new(r#"[0-9]+\.\s"(?P<song>.+)" - (?P<artist>.+)"#).unwrap(),
            build: bare_record,
        },
        // - Description for the previous song
        LinePattern {
            name: "continuation",
            regex: Regex::new(r"^\s*-\s(?P<description>.+)").unwrap(),
            build: continuation,
        },
    ]
});

/// Classifies one line, returning the first pattern that matches
pub fn classify_line(line: &str) -> Option<(&'static str, LineKind)> {
    LINE_PATTERNS
        .iter()
        .find_map(|pattern| pattern.classify(line).map(|kind| (pattern.name, kind)))
}

/// Parses the free-text recommendation block into records
///
/// Never fails: unparsable lines, and continuation lines that arrive before
/// any record, are skipped. Output order follows line order; the `N.` prefix
/// is not used for ordering and duplicates are kept.
pub fn format_recommendations(text: &str) -> Vec<RecommendationRecord> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    tracing::debug!(raw = %text, "Parsing recommendation text");

    let mut records: Vec<RecommendationRecord> = Vec::new();

    for line in text.lines().filter(|line| !line.trim().is_empty()) {
        match classify_line(line) {
            Some((_, LineKind::Record(record))) => records.push(record),
            Some((_, LineKind::Continuation(description))) => match records.last_mut() {
                Some(last) => last.description = description,
                None => {
                    tracing::warn!(line = %line, "Continuation line before any recommendation");
                }
            },
            None => {
                tracing::warn!(line = %line, "Unmatched recommendation line");
            }
        }
    }

    tracing::debug!(records = records.len(), "Recommendation text parsed");

    records
}
