//! Token types produced by the tokenizer and consumed by the renderer

use crate::ip::is_ip;

/// An IP address followed by one or more host aliases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpMapping {
    /// The address field, exactly as written.
    pub ip: String,
    /// Host names, in source order.
    pub aliases: Vec<String>,
    /// Trailing comment text without the `#`.
    pub comment: String,
    /// Rendered with a leading `# ` when set. The tokenizer never sets it;
    /// the document model does when lowering a commented-out entry.
    pub disabled: bool,
}

impl IpMapping {
    pub fn new(ip: impl Into<String>, aliases: Vec<String>) -> Self {
        Self {
            ip: ip.into(),
            aliases,
            comment: String::new(),
            disabled: false,
        }
    }

    /// Set the trailing comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Set the disabled flag.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Parse `IP alias... [# comment]` out of a line of text.
    ///
    /// Returns `None` when the first field is not an IP or no alias follows
    /// it. Used both for live lines and for the text of comment lines, so a
    /// commented-out mapping can be recognized.
    pub fn parse_fields(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        let ip_end = trimmed.find(char::is_whitespace)?;
        let ip = &trimmed[..ip_end];
        if !is_ip(ip) {
            return None;
        }

        let mut aliases = Vec::new();
        let mut comment = "";
        let mut rest = &trimmed[ip_end..];
        loop {
            rest = rest.trim_start();
            if rest.is_empty() {
                break;
            }
            if let Some(after_hash) = rest.strip_prefix('#') {
                comment = after_hash.trim();
                break;
            }
            let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            aliases.push(rest[..end].to_string());
            rest = &rest[end..];
        }

        if aliases.is_empty() {
            return None;
        }

        Some(Self::new(ip, aliases).with_comment(comment))
    }

    /// Width of the IP cell, including the `# ` prefix of a disabled line.
    pub fn ip_cell_width(&self) -> usize {
        let prefix = if self.disabled { 2 } else { 0 };
        prefix + self.ip.chars().count()
    }

    /// Width of the aliases joined by `separator_width` spaces.
    pub fn aliases_width(&self, separator_width: usize) -> usize {
        let names: usize = self.aliases.iter().map(|a| a.chars().count()).sum();
        names + separator_width * self.aliases.len().saturating_sub(1)
    }
}

/// What a line turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Blank or whitespace-only.
    Empty,
    /// A `#` line; holds the text after the leading `#` run, trimmed.
    Comment(String),
    /// An IP mapping line.
    Mapping(IpMapping),
    /// Anything else, kept as the line text so it is never regenerated.
    Unrecognized(String),
}

/// A single line of a hosts file.
///
/// Parsed tokens remember their 1-based line number and exact source text
/// (including a trailing `\r` for CRLF input). Synthesized tokens carry
/// neither and are rendered from `kind`.
///
/// A source line that is not valid UTF-8 is classified from its lossy
/// decoding, held in `raw`, while `bytes` keeps what was actually read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub line: Option<usize>,
    pub raw: Option<String>,
    pub bytes: Option<Vec<u8>>,
    pub kind: TokenKind,
}

impl Token {
    /// Build a token that has no source text.
    pub fn synthesized(kind: TokenKind) -> Self {
        Self {
            line: None,
            raw: None,
            bytes: None,
            kind,
        }
    }

    pub fn empty() -> Self {
        Self::synthesized(TokenKind::Empty)
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Self::synthesized(TokenKind::Comment(text.into()))
    }

    pub fn mapping(mapping: IpMapping) -> Self {
        Self::synthesized(TokenKind::Mapping(mapping))
    }

    /// True when this token was read from source and still has its text.
    pub fn is_parsed(&self) -> bool {
        self.raw.is_some()
    }

    /// Source bytes of a parsed line, exactly as read.
    pub fn source_bytes(&self) -> Option<&[u8]> {
        self.bytes
            .as_deref()
            .or_else(|| self.raw.as_deref().map(str::as_bytes))
    }

    /// Comment text, if this is a comment line.
    pub fn comment_text(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Comment(text) => Some(text),
            _ => None,
        }
    }
}
