//! Token stream to text
//!
//! Two modes:
//!
//! - [`FormatMode::Keep`] writes parsed lines exactly as read. Synthesized
//!   mapping lines borrow the columns of the nearest preceding untouched
//!   mapping line, so an entry added to an aligned block stays aligned.
//! - [`FormatMode::ReFormat`] ignores the source text of mapping lines and
//!   aligns every one of them to columns computed over the whole stream.
//!
//! Comment, blank and unrecognized lines are written literally in both.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::layout::{Columns, Spacing};
use crate::token::{IpMapping, Token, TokenKind};

/// How mapping lines are laid out on output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatMode {
    /// Preserve untouched lines byte-for-byte.
    #[default]
    Keep,
    /// Re-align every mapping line.
    ReFormat,
}

impl std::fmt::Display for FormatMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Keep => write!(f, "keep"),
            Self::ReFormat => write!(f, "reformat"),
        }
    }
}

/// Line terminator style of a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    /// `CrLf` if the source contains any `\r\n`.
    pub fn detect(source: impl AsRef<[u8]>) -> Self {
        if source.as_ref().windows(2).any(|pair| pair == b"\r\n") {
            Self::CrLf
        } else {
            Self::Lf
        }
    }
}

/// Write `tokens` to `out`, one line per token.
///
/// Two parsed lines that were adjacent in the source keep the separator
/// they had. Every other line break in a [`LineEnding::CrLf`] document is
/// written as `\r\n` unless the preceding line already ends in `\r`. The
/// last line gets no terminator.
pub fn render<W: Write>(
    tokens: &[Token],
    mode: FormatMode,
    ending: LineEnding,
    out: &mut W,
) -> io::Result<()> {
    let spacing = Spacing::default();
    let global = match mode {
        FormatMode::ReFormat => Some(measure(tokens, &spacing)),
        FormatMode::Keep => None,
    };
    let mut observed: Option<Columns> = None;
    let mut previous: Option<Emitted> = None;

    for token in tokens {
        if let Some(prev) = previous {
            let adjacent = prev.line.is_some_and(|n| Some(n + 1) == token.line);
            if ending == LineEnding::CrLf && !adjacent && !prev.ends_with_cr {
                out.write_all(b"\r")?;
            }
            out.write_all(b"\n")?;
        }

        let source = token.source_bytes();
        let generated = match (&token.kind, source, global) {
            (TokenKind::Mapping(mapping), _, Some(columns)) => {
                Some(columns.render(mapping, &spacing))
            }
            (TokenKind::Mapping(mapping), Some(_), None) => {
                if !mapping.disabled {
                    let raw = token.raw.as_deref().unwrap_or_default();
                    observed = Columns::observe(raw, &spacing).or(observed);
                }
                None
            }
            (TokenKind::Mapping(mapping), None, None) => {
                let columns =
                    observed.unwrap_or_else(|| Columns::for_mapping(&spacing, mapping));
                Some(columns.render(mapping, &spacing))
            }
            (kind, source, _) => {
                observed = None;
                source.is_none().then(|| literal(kind))
            }
        };

        previous = Some(match (generated, source) {
            (Some(line), _) => {
                out.write_all(line.as_bytes())?;
                Emitted {
                    line: None,
                    ends_with_cr: false,
                }
            }
            (None, Some(bytes)) => {
                out.write_all(bytes)?;
                Emitted {
                    line: token.line,
                    ends_with_cr: bytes.ends_with(b"\r"),
                }
            }
            (None, None) => Emitted {
                line: None,
                ends_with_cr: false,
            },
        });
    }

    Ok(())
}

/// The line most recently written by [`render`].
#[derive(Clone, Copy)]
struct Emitted {
    /// Source line number, when the line was written from source text.
    line: Option<usize>,
    ends_with_cr: bool,
}

/// Render into bytes, keeping undecodable source lines as they were read.
pub fn render_to_bytes(tokens: &[Token], mode: FormatMode, ending: LineEnding) -> Vec<u8> {
    let mut buffer = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = render(tokens, mode, ending, &mut buffer);
    buffer
}

/// Render into a `String`. Undecodable source bytes are replaced.
pub fn render_to_string(tokens: &[Token], mode: FormatMode, ending: LineEnding) -> String {
    String::from_utf8_lossy(&render_to_bytes(tokens, mode, ending)).into_owned()
}

fn measure(tokens: &[Token], spacing: &Spacing) -> Columns {
    let mappings = tokens.iter().filter_map(|t| match &t.kind {
        TokenKind::Mapping(m) => Some(m),
        _ => None,
    });

    let (ip_width, aliases_width) = mappings.fold((0, 0), |(ip, aliases), m: &IpMapping| {
        (
            ip.max(m.ip_cell_width()),
            aliases.max(m.aliases_width(spacing.between_aliases)),
        )
    });

    Columns::from_widths(spacing, ip_width, aliases_width)
}

fn literal(kind: &TokenKind) -> String {
    match kind {
        TokenKind::Empty => String::new(),
        TokenKind::Comment(text) if text.is_empty() => "#".to_string(),
        TokenKind::Comment(text) => format!("# {text}"),
        TokenKind::Unrecognized(text) => text.clone(),
        TokenKind::Mapping(m) => {
            Columns::for_mapping(&Spacing::default(), m).render(m, &Spacing::default())
        }
    }
}
