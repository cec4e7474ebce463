//! Entries of an alias block

use hosts_syntax::{IpMapping, Token, TokenKind, ip};

use crate::error::{Error, Result};

/// Comment text marking a deliberately empty alias block.
pub const PLACEHOLDER_TEXT: &str = "<<placeholder>>";

/// One `IP alias...` line, possibly commented out.
///
/// An entry read from a file keeps its source token until one of its fields
/// changes; while it does, the line is written back unchanged in
/// [`hosts_syntax::FormatMode::Keep`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasEntry {
    ip: String,
    aliases: Vec<String>,
    note: String,
    disabled: bool,
    origin: Option<Token>,
}

impl AliasEntry {
    /// Create an entry for `ip`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIp`] if `ip` does not look like an address.
    pub fn new(ip: impl Into<String>) -> Result<Self> {
        let ip = ip.into();
        if !ip::is_ip(&ip) {
            return Err(Error::InvalidIp { value: ip });
        }
        Ok(Self {
            ip,
            aliases: Vec::new(),
            note: String::new(),
            disabled: false,
            origin: None,
        })
    }

    /// Create an entry for `ip` with the given aliases, dropping duplicates.
    pub fn with_aliases<I, S>(ip: impl Into<String>, aliases: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entry = Self::new(ip)?;
        for alias in aliases {
            entry.add_alias(alias.as_ref());
        }
        Ok(entry)
    }

    /// Wrap a parsed mapping, remembering the token it came from.
    pub(crate) fn from_token(mapping: IpMapping, disabled: bool, origin: Token) -> Self {
        Self {
            ip: mapping.ip,
            aliases: mapping.aliases,
            note: mapping.comment,
            disabled,
            origin: Some(origin),
        }
    }

    pub fn ip(&self) -> &str {
        &self.ip
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    /// True for entries recovered from a commented-out line.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// True once the entry no longer matches its source line.
    pub fn is_dirty(&self) -> bool {
        self.origin.is_none()
    }

    /// 1-based source line, if the entry is unchanged since parsing.
    pub fn line(&self) -> Option<usize> {
        self.origin.as_ref().and_then(|t| t.line)
    }

    /// Replace the address.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIp`] if `ip` does not look like an address.
    pub fn set_ip(&mut self, ip: impl Into<String>) -> Result<()> {
        let ip = ip.into();
        if !ip::is_ip(&ip) {
            return Err(Error::InvalidIp { value: ip });
        }
        if self.ip != ip {
            self.ip = ip;
            self.reset_formatting();
        }
        Ok(())
    }

    /// Returns true if `alias` is present, ignoring ASCII case.
    pub fn has_alias(&self, alias: &str) -> bool {
        self.aliases.iter().any(|a| a.eq_ignore_ascii_case(alias))
    }

    /// Append `alias`. Returns false if it was already present.
    pub fn add_alias(&mut self, alias: &str) -> bool {
        if self.has_alias(alias) {
            return false;
        }
        self.aliases.push(alias.to_string());
        self.reset_formatting();
        true
    }

    /// Remove `alias`. Returns false if it was not present.
    pub fn remove_alias(&mut self, alias: &str) -> bool {
        let before = self.aliases.len();
        self.aliases.retain(|a| !a.eq_ignore_ascii_case(alias));
        if self.aliases.len() == before {
            return false;
        }
        self.reset_formatting();
        true
    }

    pub fn set_note(&mut self, note: impl Into<String>) {
        let note = note.into();
        if self.note != note {
            self.note = note;
            self.reset_formatting();
        }
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        if self.disabled != disabled {
            self.disabled = disabled;
            self.reset_formatting();
        }
    }

    /// Forget the source line so the entry is regenerated on write.
    pub fn reset_formatting(&mut self) {
        self.origin = None;
    }

    /// Aliases that are loopback names the system depends on.
    pub fn system_aliases(&self) -> impl Iterator<Item = &str> {
        self.aliases
            .iter()
            .map(String::as_str)
            .filter(|alias| ip::is_system_alias(&self.ip, alias))
    }

    /// Returns true if the entry's address equals `ip`, compared as addresses.
    pub fn matches_ip(&self, ip: &str) -> bool {
        ip::same_ip(&self.ip, ip)
    }

    pub fn to_mapping(&self) -> IpMapping {
        IpMapping::new(self.ip.clone(), self.aliases.clone())
            .with_comment(self.note.clone())
            .with_disabled(self.disabled)
    }

    /// Lower to a mapping token, keeping the source text while it is valid.
    pub fn to_token(&self) -> Token {
        let kind = TokenKind::Mapping(self.to_mapping());
        match &self.origin {
            Some(origin) => Token {
                line: origin.line,
                raw: origin.raw.clone(),
                bytes: origin.bytes.clone(),
                kind,
            },
            None => Token::synthesized(kind),
        }
    }
}

/// Keeps an alias block with no entries visible in the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placeholder {
    origin: Option<Token>,
}

impl Placeholder {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_token(origin: Token) -> Self {
        Self {
            origin: Some(origin),
        }
    }

    pub fn to_token(&self) -> Token {
        self.origin
            .clone()
            .unwrap_or_else(|| Token::comment(PLACEHOLDER_TEXT))
    }
}

/// A line in the body of an alias block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Alias(AliasEntry),
    Placeholder(Placeholder),
}

impl Entry {
    pub fn as_alias(&self) -> Option<&AliasEntry> {
        match self {
            Self::Alias(entry) => Some(entry),
            Self::Placeholder(_) => None,
        }
    }

    pub fn as_alias_mut(&mut self) -> Option<&mut AliasEntry> {
        match self {
            Self::Alias(entry) => Some(entry),
            Self::Placeholder(_) => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }

    pub fn to_token(&self) -> Token {
        match self {
            Self::Alias(entry) => entry.to_token(),
            Self::Placeholder(placeholder) => placeholder.to_token(),
        }
    }
}

impl From<AliasEntry> for Entry {
    fn from(entry: AliasEntry) -> Self {
        Self::Alias(entry)
    }
}

impl From<Placeholder> for Entry {
    fn from(placeholder: Placeholder) -> Self {
        Self::Placeholder(placeholder)
    }
}
