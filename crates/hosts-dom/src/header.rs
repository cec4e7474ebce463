//! Alias block headers
//!
//! The comment lines directly above a run of mappings describe the block:
//!
//! ```text
//! # [101] proj-01 - system ips
//! # anything after the first line is more note text
//! 127.0.0.1 localhost
//! ```
//!
//! The first line may open with `[id]` (or `[*]` for "no explicit id"),
//! followed by a one-word name, a divider (`- : | * #`) and the first line
//! of the note. Headers that do not follow this shape still decode, with
//! whatever could not be recognized going into the note.

use regex::Regex;
use std::sync::LazyLock;

static HEADER_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\[\s*(\d+|\*)\s*\]").expect("Invalid header id regex"));

const DIVIDERS: [&str; 5] = ["-", ":", "|", "*", "#"];

/// Separator used between note lines.
#[cfg(windows)]
pub const NOTE_LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
pub const NOTE_LINE_SEPARATOR: &str = "\n";

/// Decoded header of an alias block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    pub id: Option<u32>,
    pub name: Option<String>,
    pub note: String,
}

impl Header {
    /// True if nothing would be written for this header.
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.name.is_none() && self.note.is_empty()
    }
}

/// Decode header comment lines (text after the `#`).
///
/// When the first line carries no note text and more lines follow, the
/// empty first note line is dropped: `[4] dev` followed by `note` decodes to
/// the note `"note"`, not `"\nnote"`. [`encode`] depends on this to start a
/// note on the line after the id and name.
pub fn decode<S: AsRef<str>>(lines: &[S]) -> Header {
    let Some((first, rest)) = lines.split_first() else {
        return Header::default();
    };
    let first = first.as_ref();
    let mut header = Header::default();

    let remainder = match HEADER_ID_REGEX.captures(first) {
        Some(caps) => {
            // `*` and out-of-range numbers leave the id unset.
            header.id = caps[1].parse().ok();
            first[caps[0].len()..].trim()
        }
        None => first.trim(),
    };

    let fields: Vec<&str> = remainder.split_whitespace().collect();
    let first_note = match fields.as_slice() {
        [] => "",
        [name] => {
            header.name = Some(name.to_string());
            ""
        }
        [name, divider, ..] if DIVIDERS.contains(divider) => {
            header.name = Some(name.to_string());
            let after_name = remainder[name.len()..].trim_start();
            after_name[divider.len()..].trim()
        }
        _ => remainder,
    };

    let mut notes: Vec<&str> = Vec::with_capacity(lines.len());
    if !(first_note.is_empty() && !rest.is_empty()) {
        notes.push(first_note);
    }
    notes.extend(rest.iter().map(AsRef::as_ref));
    header.note = notes.join(NOTE_LINE_SEPARATOR);

    header
}

/// Encode a header into comment line texts (without the leading `# `).
///
/// Produces no lines for an empty header. The output decodes back to the
/// same id, name and note.
pub fn encode(header: &Header) -> Vec<String> {
    if header.is_empty() {
        return Vec::new();
    }

    let mut first = match header.id {
        Some(id) => format!("[{id}]"),
        None => "[*]".to_string(),
    };
    if let Some(name) = &header.name {
        first.push(' ');
        first.push_str(name);
    }

    let mut note_lines = header.note.lines();
    let mut lines = Vec::new();
    match note_lines.next() {
        Some(line) if header.name.is_some() && !line.trim().is_empty() => {
            first.push_str(" - ");
            first.push_str(line);
            lines.push(first);
        }
        Some(line) if header.name.is_none() && reads_as_note(line) => {
            first.push(' ');
            first.push_str(line);
            lines.push(first);
        }
        Some(line) => {
            lines.push(first);
            lines.push(line.to_string());
        }
        None => lines.push(first),
    }
    lines.extend(note_lines.map(str::to_string));

    lines
}

/// True if `text`, placed after `[id]`, decodes as a note rather than a name.
fn reads_as_note(text: &str) -> bool {
    let fields: Vec<&str> = text.split_whitespace().collect();
    match fields.as_slice() {
        [_, second, ..] => !DIVIDERS.contains(second),
        _ => false,
    }
}
