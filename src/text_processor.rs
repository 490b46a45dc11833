use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::srt_processor::ParseReport;
use crate::timecode::{self, END_TIME_REGEX, TIME_RANGE_REGEX};

// @module: Annotated-text parsing, SRT rendering and timecode synthesis

static BLOCK_SPLIT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

// @struct: One entry of the annotated text dialect
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextEntry {
    // @field: Time range as `<start> --> <end>`, absent when the source had none
    pub time: Option<String>,

    // @field: Primary line from `Content:`, or the first unlabeled line
    pub content: Option<String>,

    // @field: Line from `Translation:`
    pub translation: Option<String>,

    // @field: Line from `Original:`
    pub original: Option<String>,

    // @field: Line from `Subtitle:`; takes precedence over `content` when rendering
    pub subtitle: Option<String>,
}

impl TextEntry {
    /// Primary text used for SRT rendering: `subtitle` when set, else `content`.
    pub fn primary_text(&self) -> Option<&str> {
        self.subtitle.as_deref().or(self.content.as_deref())
    }
}

/// Recognized line labels of the annotated dialect.
///
/// A closed enumeration rather than ad-hoc prefix tests, so adding another
/// label language means one more row in [`LABEL_TABLE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldLabel {
    Time,
    Content,
    Translation,
    Original,
    Subtitle,
}

// @const: Prefix lookup table, English and Chinese labels are synonyms
const LABEL_TABLE: &[(&str, FieldLabel)] = &[
    ("Time:", FieldLabel::Time),
    ("时间:", FieldLabel::Time),
    ("Content:", FieldLabel::Content),
    ("内容:", FieldLabel::Content),
    ("Translation:", FieldLabel::Translation),
    ("翻译:", FieldLabel::Translation),
    ("Original:", FieldLabel::Original),
    ("原文:", FieldLabel::Original),
    ("Subtitle:", FieldLabel::Subtitle),
    ("字幕:", FieldLabel::Subtitle),
];

// @matches: A line against the label table, returning the label and the
// remainder with the prefix and any following whitespace stripped
fn match_label(line: &str) -> Option<(FieldLabel, &str)> {
    LABEL_TABLE.iter().find_map(|(prefix, label)| {
        line.strip_prefix(prefix).map(|rest| (*label, rest.trim_start()))
    })
}

/// Parse annotated text into an ordered list of entries.
///
/// Blocks are blank-line delimited. Within a block, labeled lines assign
/// fields; the first unlabeled line becomes `content` when neither
/// `content` nor `subtitle` was set yet, later unlabeled lines are dropped.
/// A block only contributes an entry when `subtitle` or `content` ended up
/// non-empty. Never fails, for any input string.
pub fn parse_text(content: &str) -> Vec<TextEntry> {
    parse_text_with_report(content).0
}

/// Parse annotated text, also reporting how many blocks were dropped.
pub fn parse_text_with_report(content: &str) -> (Vec<TextEntry>, ParseReport) {
    let mut entries = Vec::new();
    let mut report = ParseReport::default();

    let trimmed = content.trim();
    if trimmed.is_empty() {
        return (entries, report);
    }

    for block in BLOCK_SPLIT_REGEX.split(trimmed) {
        report.total_blocks += 1;
        let entry = parse_block(block);
        if entry.subtitle.is_some() || entry.content.is_some() {
            entries.push(entry);
        } else {
            report.skipped_blocks += 1;
            debug!("Skipping annotated block with no subtitle or content");
        }
    }

    (entries, report)
}

fn parse_block(block: &str) -> TextEntry {
    let mut entry = TextEntry::default();

    for line in block.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match match_label(trimmed) {
            Some((FieldLabel::Time, _)) => {
                // Only a structurally valid range is accepted; anything else
                // leaves `time` as it was (silent skip, not an error)
                if let Some(caps) = TIME_RANGE_REGEX.captures(trimmed) {
                    entry.time = Some(format!("{} --> {}", &caps[1], &caps[2]));
                }
            }
            Some((FieldLabel::Content, rest)) => entry.content = non_empty(rest),
            Some((FieldLabel::Translation, rest)) => entry.translation = non_empty(rest),
            Some((FieldLabel::Original, rest)) => entry.original = non_empty(rest),
            Some((FieldLabel::Subtitle, rest)) => entry.subtitle = non_empty(rest),
            None => {
                // First unlabeled line wins as content, later ones are dropped
                if entry.content.is_none() && entry.subtitle.is_none() {
                    entry.content = Some(trimmed.to_string());
                }
            }
        }
    }

    entry
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() { None } else { Some(s.to_string()) }
}

/// Render entries as SRT text.
///
/// Entries missing a time range, or missing both `subtitle` and `content`,
/// are skipped. The body is the primary text, preceded by `original` or
/// followed by `translation` when either is set and differs from it
/// (`translation` is checked first, so both never apply). Output blocks are
/// renumbered sequentially from 1 and timestamps are normalized to the
/// comma millisecond separator SRT requires.
pub fn convert_to_srt(entries: &[TextEntry]) -> String {
    let mut output = String::new();
    let mut index = 1;

    for entry in entries {
        let Some(time) = &entry.time else { continue };
        let Some(text) = entry.primary_text() else { continue };

        let body = if let Some(translation) = entry.translation.as_deref().filter(|t| *t != text) {
            format!("{}\n{}", text, translation)
        } else if let Some(original) = entry.original.as_deref().filter(|o| *o != text) {
            format!("{}\n{}", original, text)
        } else {
            text.to_string()
        };

        let formatted_time = time.replace('.', ",");

        output.push_str(&format!("{}\n{}\n{}\n\n", index, formatted_time, body));
        index += 1;
    }

    output.trim().to_string()
}

/// Fill in missing time ranges with a fixed-duration running clock.
///
/// Untimed entries get `clock --> clock + duration` and advance the clock;
/// entries that already carry a time reset the clock to their end
/// timestamp, so synthesized gaps continue from the last explicit endpoint
/// instead of drifting independently. A best-effort timeline, not a
/// transcription-accurate one.
pub fn generate_time_codes(
    entries: &[TextEntry],
    start_time: &str,
    duration_per_entry_ms: u64,
) -> Vec<TextEntry> {
    let mut timed = entries.to_vec();
    // An unparseable start falls back to zero, keeping the no-error contract
    let mut clock = timecode::parse_timestamp(start_time).unwrap_or(0);

    for entry in &mut timed {
        match &entry.time {
            None => {
                // Saturate so an extreme duration clamps the timeline
                // instead of overflowing the clock
                let end = clock.saturating_add(duration_per_entry_ms);
                entry.time = Some(timecode::format_time_range(clock, end));
                clock = end;
            }
            Some(time) => {
                if let Some(caps) = END_TIME_REGEX.captures(time) {
                    if let Ok(end_ms) = timecode::parse_timestamp(&caps[1]) {
                        clock = end_ms;
                    }
                }
            }
        }
    }

    timed
}
