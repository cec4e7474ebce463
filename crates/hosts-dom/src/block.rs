//! Blocks: contiguous groups of lines with one meaning

use hosts_syntax::{Token, TokenKind};

use crate::entry::{AliasEntry, Entry, Placeholder};
use crate::header::{self, Header};

/// A run of blank lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlankRun {
    tokens: Vec<Token>,
}

impl BlankRun {
    /// `count` new blank lines.
    pub fn new(count: usize) -> Self {
        Self {
            tokens: (0..count).map(|_| Token::empty()).collect(),
        }
    }

    pub(crate) fn from_tokens(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

/// A run of comment lines not attached to any mappings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRun {
    tokens: Vec<Token>,
}

impl CommentRun {
    /// New comment lines, one per item.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: lines.into_iter().map(Token::comment).collect(),
        }
    }

    pub(crate) fn from_tokens(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    /// Comment texts, without the `#`.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().filter_map(Token::comment_text)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

/// Lines that are neither blank, comments nor mappings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnrecognizedRun {
    tokens: Vec<Token>,
}

impl UnrecognizedRun {
    pub(crate) fn from_tokens(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    /// Line texts as they appeared in the source.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().filter_map(|t| match &t.kind {
            TokenKind::Unrecognized(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// 1-based line number of the first line.
    pub fn first_line(&self) -> Option<usize> {
        self.tokens.first().and_then(|t| t.line)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

/// Header lines of an alias block, or a marker that they must be rebuilt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderCache {
    Cached(Vec<Token>),
    Dirty,
}

/// A group of IP mappings with an optional id, name and note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasBlock {
    header: HeaderCache,
    entries: Vec<Entry>,
    id: Option<u32>,
    auto_id: Option<u32>,
    name: Option<String>,
    note: String,
    dirty: bool,
}

impl Default for AliasBlock {
    fn default() -> Self {
        Self::new()
    }
}

impl AliasBlock {
    /// An empty block with no header.
    pub fn new() -> Self {
        Self {
            header: HeaderCache::Dirty,
            entries: Vec::new(),
            id: None,
            auto_id: None,
            name: None,
            note: String::new(),
            dirty: true,
        }
    }

    /// Set the explicit id.
    pub fn with_id(mut self, id: u32) -> Self {
        self.set_id(Some(id));
        self
    }

    /// Set the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.set_name(Some(name.into()));
        self
    }

    /// Set the note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.set_note(note);
        self
    }

    /// Build a block from its header comment tokens and body tokens.
    pub(crate) fn from_tokens(header_tokens: Vec<Token>, body: Vec<Token>) -> Self {
        let Header { id, name, note } = {
            let lines: Vec<&str> = header_tokens.iter().filter_map(Token::comment_text).collect();
            header::decode(lines.as_slice())
        };

        let entries = body.into_iter().filter_map(entry_from_token).collect();

        Self {
            header: HeaderCache::Cached(header_tokens),
            entries,
            id,
            auto_id: None,
            name,
            note,
            dirty: false,
        }
    }

    /// Explicit id from the header.
    pub fn id(&self) -> Option<u32> {
        self.id
    }

    /// Explicit id, or the id assigned when the document was built.
    pub fn effective_id(&self) -> Option<u32> {
        self.id.or(self.auto_id)
    }

    pub(crate) fn auto_id(&self) -> Option<u32> {
        self.auto_id
    }

    pub(crate) fn set_auto_id(&mut self, auto_id: Option<u32>) {
        self.auto_id = auto_id;
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Note text; lines are joined with [`header::NOTE_LINE_SEPARATOR`].
    pub fn note(&self) -> &str {
        &self.note
    }

    /// True once anything in the block changed since parsing.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn header_cache(&self) -> &HeaderCache {
        &self.header
    }

    pub fn set_id(&mut self, id: Option<u32>) {
        self.id = id;
        self.invalidate_header();
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
        self.invalidate_header();
    }

    pub fn set_note(&mut self, note: impl Into<String>) {
        self.note = note.into();
        self.invalidate_header();
    }

    fn invalidate_header(&mut self) {
        self.header = HeaderCache::Dirty;
        self.dirty = true;
    }

    /// Returns true if `name` matches, ignoring ASCII case unless `exact`.
    pub fn name_matches(&self, name: &str, exact: bool) -> bool {
        match &self.name {
            Some(own) if exact => own == name,
            Some(own) => own.eq_ignore_ascii_case(name),
            None => false,
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Mutable access to one entry.
    ///
    /// Entries track their own changes, so this does not mark the block
    /// dirty.
    pub fn entry_mut(&mut self, index: usize) -> Option<&mut Entry> {
        self.entries.get_mut(index)
    }

    /// Alias entries, skipping placeholders.
    pub fn alias_entries(&self) -> impl Iterator<Item = &AliasEntry> {
        self.entries.iter().filter_map(Entry::as_alias)
    }

    pub fn alias_entries_mut(&mut self) -> impl Iterator<Item = &mut AliasEntry> {
        self.entries.iter_mut().filter_map(Entry::as_alias_mut)
    }

    /// Number of alias entries.
    pub fn alias_count(&self) -> usize {
        self.alias_entries().count()
    }

    pub fn has_placeholder(&self) -> bool {
        self.entries.iter().any(Entry::is_placeholder)
    }

    /// Index of the first alias entry with address `ip`.
    pub fn position_of_ip(&self, ip: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.as_alias().is_some_and(|a| a.matches_ip(ip)))
    }

    pub fn add_entry(&mut self, entry: impl Into<Entry>) {
        self.entries.push(entry.into());
        self.dirty = true;
    }

    /// Insert at `index`, or append if it is past the end.
    pub fn insert_entry(&mut self, index: usize, entry: impl Into<Entry>) {
        let index = index.min(self.entries.len());
        self.entries.insert(index, entry.into());
        self.dirty = true;
    }

    pub fn remove_entry(&mut self, index: usize) -> Option<Entry> {
        if index >= self.entries.len() {
            return None;
        }
        self.dirty = true;
        Some(self.entries.remove(index))
    }

    /// Keep only entries for which `keep` returns true.
    pub fn retain_entries<F>(&mut self, keep: F)
    where
        F: FnMut(&Entry) -> bool,
    {
        let before = self.entries.len();
        self.entries.retain(keep);
        if self.entries.len() != before {
            self.dirty = true;
        }
    }

    /// Remove every alias entry. Placeholders stay.
    pub fn clear_aliases(&mut self) {
        self.retain_entries(Entry::is_placeholder);
    }

    /// Drop placeholders when aliases exist; add one when none do.
    pub fn normalize(&mut self) {
        if self.alias_count() > 0 {
            if self.has_placeholder() {
                self.retain_entries(|e| !e.is_placeholder());
            }
        } else if !self.has_placeholder() {
            self.add_entry(Placeholder::new());
        }
    }

    /// Header lines as tokens, regenerated if the cache was invalidated.
    pub fn header_tokens(&self) -> Vec<Token> {
        match &self.header {
            HeaderCache::Cached(tokens) => tokens.clone(),
            HeaderCache::Dirty => {
                let header = Header {
                    id: self.id,
                    name: self.name.clone(),
                    note: self.note.clone(),
                };
                header::encode(&header).into_iter().map(Token::comment).collect()
            }
        }
    }

    /// Header and entry lines, in order.
    pub fn tokens(&self) -> Vec<Token> {
        let mut tokens = self.header_tokens();
        tokens.extend(self.entries.iter().map(Entry::to_token));
        tokens
    }
}

fn entry_from_token(token: Token) -> Option<Entry> {
    match &token.kind {
        TokenKind::Mapping(mapping) => {
            let mapping = mapping.clone();
            Some(AliasEntry::from_token(mapping, false, token).into())
        }
        TokenKind::Comment(text) if text == crate::entry::PLACEHOLDER_TEXT => {
            Some(Placeholder::from_token(token).into())
        }
        TokenKind::Comment(text) => {
            let mapping = hosts_syntax::IpMapping::parse_fields(text)?;
            Some(AliasEntry::from_token(mapping, true, token).into())
        }
        _ => None,
    }
}

/// A block of a hosts document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Blank(BlankRun),
    Comments(CommentRun),
    Unrecognized(UnrecognizedRun),
    Aliases(AliasBlock),
}

impl Block {
    pub fn as_aliases(&self) -> Option<&AliasBlock> {
        match self {
            Self::Aliases(block) => Some(block),
            _ => None,
        }
    }

    pub fn as_aliases_mut(&mut self) -> Option<&mut AliasBlock> {
        match self {
            Self::Aliases(block) => Some(block),
            _ => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Blank(_))
    }

    /// Lines of this block as tokens.
    pub fn tokens(&self) -> Vec<Token> {
        match self {
            Self::Blank(run) => run.tokens().to_vec(),
            Self::Comments(run) => run.tokens().to_vec(),
            Self::Unrecognized(run) => run.tokens().to_vec(),
            Self::Aliases(block) => block.tokens(),
        }
    }
}

impl From<AliasBlock> for Block {
    fn from(block: AliasBlock) -> Self {
        Self::Aliases(block)
    }
}

impl From<BlankRun> for Block {
    fn from(run: BlankRun) -> Self {
        Self::Blank(run)
    }
}

impl From<CommentRun> for Block {
    fn from(run: CommentRun) -> Self {
        Self::Comments(run)
    }
}
