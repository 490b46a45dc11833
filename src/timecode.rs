/*!
 * Timestamp codec shared by the SRT and annotated-text pipelines.
 *
 * Converts between a millisecond count and the SRT display form
 * `HH:MM:SS,mmm`, and holds the timestamp patterns every other module
 * validates against before calling into the codec.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::SubtitleError;

// @const: Single timestamp, comma or dot millisecond separator
pub static TIMESTAMP_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{2}:\d{2}:\d{2}[,.]\d{3}").unwrap()
});

// @const: Timestamp range `start --> end`
pub static TIME_RANGE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2}:\d{2}:\d{2}[,.]\d{3})\s*-->\s*(\d{2}:\d{2}:\d{2}[,.]\d{3})").unwrap()
});

// @const: End timestamp extractor used by timecode synthesis
pub static END_TIME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"-->\s*(\d{2}:\d{2}:\d{2}[,.]\d{3})").unwrap()
});

/// Default start of a synthesized timeline
pub const DEFAULT_START_TIME: &str = "00:00:00,000";

/// Default duration assigned to an entry without explicit timing
pub const DEFAULT_ENTRY_DURATION_MS: u64 = 3000;

/// Parse an SRT timestamp (`HH:MM:SS,mmm` or `HH:MM:SS.mmm`) to milliseconds.
///
/// Splits on `:`, `,` and `.` into four integer groups and recombines them.
/// Field ranges are not validated (`00:99:00,000` parses to 99 minutes);
/// callers that need structural validation match against
/// [`TIMESTAMP_PATTERN`] first. A value too large for a u64 millisecond
/// count is an error, not an overflow.
pub fn parse_timestamp(timestamp: &str) -> Result<u64, SubtitleError> {
    let parts: Vec<&str> = timestamp.split(&[':', ',', '.'][..]).collect();

    if parts.len() != 4 {
        return Err(SubtitleError::InvalidTimestamp(timestamp.to_string()));
    }

    let mut fields = [0u64; 4];
    for (i, part) in parts.iter().enumerate() {
        fields[i] = part
            .trim()
            .parse()
            .map_err(|_| SubtitleError::InvalidTimestamp(timestamp.to_string()))?;
    }

    let [hours, minutes, seconds, millis] = fields;
    hours
        .checked_mul(3_600_000)
        .and_then(|ms| minutes.checked_mul(60_000).and_then(|m| ms.checked_add(m)))
        .and_then(|ms| seconds.checked_mul(1_000).and_then(|s| ms.checked_add(s)))
        .and_then(|ms| ms.checked_add(millis))
        .ok_or_else(|| SubtitleError::InvalidTimestamp(timestamp.to_string()))
}

/// Format a millisecond count as an SRT timestamp (`HH:MM:SS,mmm`).
///
/// Hours are rendered on two digits; values of 100 hours or more are
/// outside the supported input domain and simply widen the field.
pub fn format_timestamp(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
}

/// Format a time range the way SRT and the annotated dialect expect it.
pub fn format_time_range(start_ms: u64, end_ms: u64) -> String {
    format!("{} --> {}", format_timestamp(start_ms), format_timestamp(end_ms))
}
