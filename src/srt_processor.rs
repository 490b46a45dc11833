use std::fmt;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::timecode::TIME_RANGE_REGEX;

// @module: SRT parsing and annotated-text rendering

// @const: Block boundary, one or more blank lines tolerant of stray whitespace
static BLOCK_SPLIT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

// @struct: Single parsed SRT cue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleEntry {
    // @field: Sequence number as declared in the source, not validated against position
    pub index: usize,

    // @field: Start timestamp, kept in source form (separator preserved)
    pub start_time: String,

    // @field: End timestamp, kept in source form
    pub end_time: String,

    // @field: Full cue body, lines joined with a single space
    pub text: String,

    // @field: First body line when the cue had two or more lines
    pub original: Option<String>,

    // @field: Second body line when the cue had two or more lines
    pub translation: Option<String>,
}

impl SubtitleEntry {
    /// Creates a new single-line entry - used by tests and external consumers
    #[allow(dead_code)]
    pub fn new(index: usize, start_time: &str, end_time: &str, text: &str) -> Self {
        SubtitleEntry {
            index,
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            text: text.to_string(),
            original: None,
            translation: None,
        }
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.index)?;
        writeln!(f, "{} --> {}", self.start_time, self.end_time)?;
        writeln!(f, "{}", self.text)
    }
}

/// Counts of how a parse went, so callers can surface soft warnings
/// without the parser ever failing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseReport {
    /// Blocks seen in the input
    pub total_blocks: usize,
    /// Blocks dropped by the skip-malformed policy
    pub skipped_blocks: usize,
}

impl ParseReport {
    /// True when at least one block was dropped
    pub fn has_skips(&self) -> bool {
        self.skipped_blocks > 0
    }
}

/// Parse SRT text into an ordered list of entries.
///
/// Malformed blocks (fewer than three lines, a non-integer index line, or a
/// time line that does not match the range pattern) are skipped silently;
/// fully malformed or empty input yields an empty list, never an error.
pub fn parse_srt(content: &str) -> Vec<SubtitleEntry> {
    parse_srt_with_report(content).0
}

/// Parse SRT text, also reporting how many blocks were dropped.
pub fn parse_srt_with_report(content: &str) -> (Vec<SubtitleEntry>, ParseReport) {
    let mut entries = Vec::new();
    let mut report = ParseReport::default();

    let trimmed = content.trim();
    if trimmed.is_empty() {
        return (entries, report);
    }

    for block in BLOCK_SPLIT_REGEX.split(trimmed) {
        report.total_blocks += 1;
        match parse_block(block) {
            Some(entry) => entries.push(entry),
            None => {
                report.skipped_blocks += 1;
                debug!("Skipping malformed SRT block: {:?}", block.lines().next().unwrap_or(""));
            }
        }
    }

    (entries, report)
}

// @parses: One blank-line-delimited SRT block, None when structurally invalid
fn parse_block(block: &str) -> Option<SubtitleEntry> {
    let lines: Vec<&str> = block.trim().lines().map(str::trim).collect();
    if lines.len() < 3 {
        return None;
    }

    let index: usize = lines[0].parse().ok()?;

    let caps = TIME_RANGE_REGEX.captures(lines[1])?;
    let start_time = caps[1].to_string();
    let end_time = caps[2].to_string();

    let body = &lines[2..];
    if body.len() > 1 {
        // Heuristic carried from the source format: first body line is the
        // original, second is the translation. Lines beyond the second are
        // folded into `text` but not separately exposed.
        Some(SubtitleEntry {
            index,
            start_time,
            end_time,
            text: body.join(" "),
            original: non_empty(body[0]),
            translation: non_empty(body[1]),
        })
    } else {
        Some(SubtitleEntry {
            index,
            start_time,
            end_time,
            text: body[0].to_string(),
            original: None,
            translation: None,
        })
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() { None } else { Some(s.to_string()) }
}

/// Render entries as annotated labeled text, one block per entry.
///
/// Each block carries `Time:`, `Content:` and `Subtitle:` lines in fixed
/// order, with `Translation:` and `Original:` lines only when those fields
/// are present (`Original:` additionally only when it differs from the
/// joined text). Total function: the empty list yields the empty string.
pub fn convert_to_text(entries: &[SubtitleEntry]) -> String {
    let mut output = String::new();

    for entry in entries {
        output.push_str(&format!("Time: {} --> {}\n", entry.start_time, entry.end_time));
        output.push_str(&format!("Content: {}\n", entry.text));
        if let Some(translation) = &entry.translation {
            output.push_str(&format!("Translation: {}\n", translation));
        }
        if let Some(original) = &entry.original {
            if original != &entry.text {
                output.push_str(&format!("Original: {}\n", original));
            }
        }
        output.push_str(&format!("Subtitle: {}\n", entry.text));
        output.push('\n');
    }

    output.trim().to_string()
}
