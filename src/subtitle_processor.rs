use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;

use crate::errors::SubtitleError;
use crate::timestamp_format::TimestampFormat;

// @module: SBV subtitle parsing, merging and rendering

// @const: SBV timestamp regex (h:mm:ss.mmm,h:mm:ss.mmm)
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+):(\d{2}):(\d{2})\.(\d{3}),(\d+):(\d{2}):(\d{2})\.(\d{3})$").unwrap()
});

// @const: Separator used when merging texts of one time window
pub const MERGE_TEXT_SEPARATOR: &str = " ";

// @struct: Single subtitle entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubtitleEntry {
    // @field: Sequence number, 1-based
    #[serde(rename = "id")]
    pub seq_num: usize,

    // @field: Start time in ms
    #[serde(rename = "start")]
    pub start_time_ms: u64,

    // @field: End time in ms
    #[serde(rename = "end")]
    pub end_time_ms: u64,

    // @field: Subtitle text, lines joined with '\n'
    pub text: String,
}

impl SubtitleEntry {
    pub fn new(seq_num: usize, start_time_ms: u64, end_time_ms: u64, text: String) -> Self {
        SubtitleEntry {
            seq_num,
            start_time_ms,
            end_time_ms,
            text,
        }
    }

    /// Parse an SBV timestamp line into (start, end) milliseconds.
    ///
    /// Surrounding whitespace is ignored. `line_number` is only used for error reporting.
    pub fn parse_timestamp_pair(line: &str, line_number: usize) -> Result<(u64, u64), SubtitleError> {
        let trimmed = line.trim();
        let parse_error = |reason: &str| SubtitleError::Parse {
            line: line_number,
            content: line.to_string(),
            reason: reason.to_string(),
        };

        let caps = TIMESTAMP_REGEX
            .captures(trimmed)
            .ok_or_else(|| parse_error("expected a timestamp line like 0:00:01.000,0:00:03.000"))?;

        let start = Self::captures_to_ms(&caps, 1).map_err(|reason| parse_error(reason))?;
        let end = Self::captures_to_ms(&caps, 5).map_err(|reason| parse_error(reason))?;

        if end < start {
            return Err(parse_error("end time is before start time"));
        }

        Ok((start, end))
    }

    /// Convert four captured groups (h, mm, ss, mmm) starting at `start_idx` to milliseconds
    fn captures_to_ms(caps: &Captures, start_idx: usize) -> Result<u64, &'static str> {
        let component = |offset: usize| -> Result<u64, &'static str> {
            caps.get(start_idx + offset)
                .ok_or("missing timestamp component")?
                .as_str()
                .parse::<u64>()
                .map_err(|_| "timestamp component out of range")
        };

        let hours = component(0)?;
        let minutes = component(1)?;
        let seconds = component(2)?;
        let millis = component(3)?;

        if minutes >= 60 || seconds >= 60 {
            return Err("minutes and seconds must be below 60");
        }

        hours
            .checked_mul(3_600)
            .and_then(|h| h.checked_add(minutes * 60 + seconds))
            .and_then(|s| s.checked_mul(1_000))
            .and_then(|ms| ms.checked_add(millis))
            .ok_or("timestamp component out of range")
    }

    /// Whether a line (ignoring surrounding whitespace) is an SBV timestamp line
    pub fn is_timestamp_line(line: &str) -> bool {
        TIMESTAMP_REGEX.is_match(line.trim())
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let format = TimestampFormat::default();
        write!(
            f,
            "[{}\u{2013}{}] {}",
            format.format(self.start_time_ms),
            format.format(self.end_time_ms),
            self.text
        )
    }
}

/// Round milliseconds to the nearest whole second, halves rounding up
pub fn round_ms_to_seconds(ms: u64) -> u64 {
    ms.saturating_add(500) / 1_000
}

/// Collection of subtitle entries with metadata
#[derive(Debug, Clone)]
pub struct SubtitleCollection {
    /// Source filename
    pub source_file: PathBuf,

    /// List of subtitle entries, in document order
    pub entries: Vec<SubtitleEntry>,
}

impl SubtitleCollection {
    /// Create a new, empty subtitle collection
    pub fn new(source_file: PathBuf) -> Self {
        SubtitleCollection {
            source_file,
            entries: Vec::new(),
        }
    }

    /// Parse SBV content into a collection
    pub fn from_sbv(source_file: PathBuf, content: &str) -> Result<Self, SubtitleError> {
        let entries = Self::parse_sbv_string(content)?;
        Ok(SubtitleCollection { source_file, entries })
    }

    /// Parse SBV format string into subtitle entries.
    ///
    /// A record is a timestamp line followed by text lines, ended by a blank
    /// line, the next timestamp line, or the end of the document. Any other
    /// non-blank line where a timestamp is expected is a parse error.
    pub fn parse_sbv_string(content: &str) -> Result<Vec<SubtitleEntry>, SubtitleError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        let mut entries = Vec::new();
        let mut current: Option<(u64, u64)> = None;
        let mut text_lines: Vec<&str> = Vec::new();

        for (idx, line) in content.lines().enumerate() {
            let line_number = idx + 1;

            if line.trim().is_empty() {
                if let Some(times) = current.take() {
                    Self::finish_entry(&mut entries, times, &mut text_lines);
                }
                continue;
            }

            if SubtitleEntry::is_timestamp_line(line) {
                if let Some(times) = current.take() {
                    Self::finish_entry(&mut entries, times, &mut text_lines);
                }
                current = Some(SubtitleEntry::parse_timestamp_pair(line, line_number)?);
                continue;
            }

            if current.is_some() {
                text_lines.push(line.trim_end());
            } else {
                return Err(SubtitleError::Parse {
                    line: line_number,
                    content: line.to_string(),
                    reason: "expected a timestamp line like 0:00:01.000,0:00:03.000".to_string(),
                });
            }
        }

        // Add the last entry if there is one
        if let Some(times) = current.take() {
            Self::finish_entry(&mut entries, times, &mut text_lines);
        }

        debug!("Parsed {} subtitle entries", entries.len());
        Ok(entries)
    }

    fn finish_entry(entries: &mut Vec<SubtitleEntry>, (start, end): (u64, u64), text_lines: &mut Vec<&str>) {
        let seq_num = entries.len() + 1;
        if text_lines.is_empty() {
            warn!("Subtitle entry {} has no text", seq_num);
        }
        entries.push(SubtitleEntry::new(seq_num, start, end, text_lines.join("\n")));
        text_lines.clear();
    }

    /// Merge entries into fixed windows of `window_secs` seconds.
    ///
    /// Entries whose start falls in the same `[k*w, (k+1)*w)` bucket become one
    /// entry spanning the earliest start to the latest end, texts joined with
    /// [`MERGE_TEXT_SEPARATOR`]. Empty buckets are omitted and the result is
    /// renumbered from 1. A zero window is a pass-through.
    pub fn merge_by_window(entries: &[SubtitleEntry], window_secs: u64) -> Vec<SubtitleEntry> {
        if window_secs < 1 || entries.is_empty() {
            return entries.to_vec();
        }

        let window_ms = window_secs.saturating_mul(1_000);
        let mut buckets: BTreeMap<u64, Vec<&SubtitleEntry>> = BTreeMap::new();
        for entry in entries {
            buckets.entry(entry.start_time_ms / window_ms).or_default().push(entry);
        }

        let merged: Vec<SubtitleEntry> = buckets
            .into_values()
            .enumerate()
            .map(|(i, group)| {
                let start = group.iter().map(|e| e.start_time_ms).min().unwrap_or_default();
                let end = group.iter().map(|e| e.end_time_ms).max().unwrap_or_default();
                let text = group
                    .iter()
                    .map(|e| e.text.as_str())
                    .filter(|t| !t.is_empty())
                    .collect::<Vec<_>>()
                    .join(MERGE_TEXT_SEPARATOR);
                SubtitleEntry::new(i + 1, start, end, text)
            })
            .collect();

        debug!(
            "Merged {} entries into {} windows of {}s",
            entries.len(),
            merged.len(),
            window_secs
        );
        merged
    }

    /// Return a copy with entries merged into windows of `window_secs` seconds
    pub fn merged(&self, window_secs: u64) -> Self {
        SubtitleCollection {
            source_file: self.source_file.clone(),
            entries: Self::merge_by_window(&self.entries, window_secs),
        }
    }

    /// Serialize entries as a JSON array with `indent` spaces per level.
    ///
    /// With `round_to_seconds`, start and end are emitted as whole seconds.
    pub fn to_json(&self, indent: usize, round_to_seconds: bool) -> Result<String, serde_json::Error> {
        let entries: Vec<SubtitleEntry> = if round_to_seconds {
            self.entries
                .iter()
                .map(|e| SubtitleEntry {
                    start_time_ms: round_ms_to_seconds(e.start_time_ms),
                    end_time_ms: round_ms_to_seconds(e.end_time_ms),
                    ..e.clone()
                })
                .collect()
        } else {
            self.entries.clone()
        };

        let indent = " ".repeat(indent);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
        let mut buffer = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        entries.serialize(&mut serializer)?;

        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Render one `[start–end] text` line per entry.
    ///
    /// With `round_to_seconds`, timestamps are rounded to whole seconds before formatting.
    pub fn to_text(&self, format: &TimestampFormat, round_to_seconds: bool) -> String {
        self.entries
            .iter()
            .map(|entry| Self::format_entry_as_text(entry, format, round_to_seconds))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format a single entry as `[start–end] text`.
    ///
    /// Multi-line text is joined with spaces so every entry stays on one line.
    pub fn format_entry_as_text(entry: &SubtitleEntry, format: &TimestampFormat, round_to_seconds: bool) -> String {
        let adjust = |ms: u64| {
            if round_to_seconds {
                round_ms_to_seconds(ms) * 1_000
            } else {
                ms
            }
        };

        format!(
            "[{}\u{2013}{}] {}",
            format.format(adjust(entry.start_time_ms)),
            format.format(adjust(entry.end_time_ms)),
            entry.text.lines().collect::<Vec<_>>().join(" ")
        )
    }
}

impl fmt::Display for SubtitleCollection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Subtitle Collection")?;
        writeln!(f, "Source: {:?}", self.source_file)?;
        writeln!(f, "Entries: {}", self.entries.len())?;
        Ok(())
    }
}
