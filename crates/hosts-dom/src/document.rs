//! The hosts document

use std::collections::HashSet;

use hosts_syntax::{FormatMode, LineEnding, Token, render_to_bytes, render_to_string, tokenize_bytes};

use crate::block::{AliasBlock, BlankRun, Block};
use crate::parser;

/// A parsed hosts file: an ordered list of blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    blocks: Vec<Block>,
    line_ending: LineEnding,
}

impl Document {
    /// An empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse hosts file text. Never fails; unknown lines are kept verbatim.
    pub fn parse(source: &str) -> Self {
        Self::from_bytes(source.as_bytes())
    }

    /// Parse raw file content. Lines that are not valid UTF-8 are still
    /// classified and are written back with their original bytes.
    pub fn from_bytes(source: &[u8]) -> Self {
        let tokens = tokenize_bytes(source);
        let token_count = tokens.len();
        let mut document = Self {
            blocks: parser::group(tokens),
            line_ending: LineEnding::detect(source),
        };
        document.assign_auto_ids();

        tracing::debug!(
            tokens = token_count,
            blocks = document.blocks.len(),
            alias_blocks = document.alias_blocks().count(),
            "Parsed hosts document"
        );
        document
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    pub fn block_mut(&mut self, index: usize) -> Option<&mut Block> {
        self.blocks.get_mut(index)
    }

    /// Alias blocks with their document index.
    pub fn alias_blocks(&self) -> impl Iterator<Item = (usize, &AliasBlock)> {
        self.blocks
            .iter()
            .enumerate()
            .filter_map(|(idx, b)| b.as_aliases().map(|a| (idx, a)))
    }

    pub fn alias_block(&self, index: usize) -> Option<&AliasBlock> {
        self.blocks.get(index).and_then(Block::as_aliases)
    }

    pub fn alias_block_mut(&mut self, index: usize) -> Option<&mut AliasBlock> {
        self.blocks.get_mut(index).and_then(Block::as_aliases_mut)
    }

    /// Append a block. Returns its index.
    pub fn add_block(&mut self, block: impl Into<Block>) -> usize {
        self.blocks.push(block.into());
        self.assign_auto_ids();
        self.blocks.len() - 1
    }

    /// Insert a block at `index`, or append if it is past the end.
    /// Returns the index it ended up at.
    pub fn insert_block(&mut self, index: usize, block: impl Into<Block>) -> usize {
        let index = index.min(self.blocks.len());
        self.blocks.insert(index, block.into());
        self.assign_auto_ids();
        index
    }

    /// Remove the block at `index`. Neighbouring blocks are left alone.
    pub fn remove_block(&mut self, index: usize) -> Option<Block> {
        if index >= self.blocks.len() {
            return None;
        }
        Some(self.blocks.remove(index))
    }

    /// Append an alias block as a new paragraph.
    ///
    /// A blank line separates it from preceding content, and a file that
    /// ended with a newline still does. Returns the block's index.
    pub fn push_alias_block(&mut self, block: AliasBlock) -> usize {
        let index = match self.blocks.last() {
            None => {
                self.blocks.push(block.into());
                self.blocks.push(BlankRun::new(1).into());
                0
            }
            Some(last) if last.is_blank() => {
                self.blocks.push(block.into());
                self.blocks.push(BlankRun::new(1).into());
                self.blocks.len() - 2
            }
            Some(_) => {
                self.blocks.push(BlankRun::new(1).into());
                self.blocks.push(block.into());
                self.blocks.len() - 1
            }
        };
        self.assign_auto_ids();
        index
    }

    /// Indices of alias blocks with effective id `id` or name `name`.
    ///
    /// Names match exactly when any block does; otherwise ignoring ASCII
    /// case. The result is the union of both criteria in document order.
    pub fn find_alias_blocks(&self, id: Option<u32>, name: Option<&str>) -> Vec<usize> {
        let exact = name.is_some_and(|name| {
            self.alias_blocks().any(|(_, b)| b.name_matches(name, true))
        });

        self.alias_blocks()
            .filter(|(_, block)| {
                let by_id = id.is_some() && block.effective_id() == id;
                let by_name = name.is_some_and(|name| block.name_matches(name, exact));
                by_id || by_name
            })
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Smallest positive id no alias block currently uses.
    pub fn next_free_id(&self) -> u32 {
        let used: HashSet<u32> = self
            .alias_blocks()
            .filter_map(|(_, b)| b.effective_id())
            .collect();
        (1..).find(|id| !used.contains(id)).unwrap_or(u32::MAX)
    }

    /// Entries whose address is `value`, or that list `value` as an alias.
    ///
    /// Returns `(block index, entry index)` pairs in document order.
    pub fn entries_by_ip_or_alias(&self, value: &str) -> Vec<(usize, usize)> {
        self.alias_blocks()
            .flat_map(|(block_idx, block)| {
                block
                    .entries()
                    .iter()
                    .enumerate()
                    .filter(|(_, entry)| {
                        entry
                            .as_alias()
                            .is_some_and(|a| a.matches_ip(value) || a.has_alias(value))
                    })
                    .map(move |(entry_idx, _)| (block_idx, entry_idx))
            })
            .collect()
    }

    /// Give every alias block a placeholder iff it has no alias entries.
    pub fn normalize(&mut self) {
        for block in self.blocks.iter_mut().filter_map(Block::as_aliases_mut) {
            block.normalize();
        }
        self.assign_auto_ids();
    }

    /// Assign auto-ids to alias blocks without an explicit id.
    ///
    /// An auto-id never equals an explicit id anywhere in the document or an
    /// auto-id of an earlier block. Existing auto-ids are kept unless they
    /// collide.
    fn assign_auto_ids(&mut self) {
        let mut used: HashSet<u32> = self
            .blocks
            .iter()
            .filter_map(Block::as_aliases)
            .filter_map(AliasBlock::id)
            .collect();
        let mut candidate = 1;

        for block in self.blocks.iter_mut().filter_map(Block::as_aliases_mut) {
            if block.id().is_some() {
                continue;
            }
            if let Some(existing) = block.auto_id() {
                if used.insert(existing) {
                    continue;
                }
            }
            while used.contains(&candidate) {
                candidate += 1;
            }
            used.insert(candidate);
            tracing::debug!(auto_id = candidate, "Assigned block id");
            block.set_auto_id(Some(candidate));
        }
    }

    /// Lower the document to a token stream.
    pub fn to_tokens(&self) -> Vec<Token> {
        self.blocks.iter().flat_map(Block::tokens).collect()
    }

    /// Render the document to text, replacing undecodable bytes.
    pub fn render(&self, mode: FormatMode) -> String {
        render_to_string(&self.to_tokens(), mode, self.line_ending)
    }

    /// Render the document to the exact bytes to be written.
    pub fn to_bytes(&self, mode: FormatMode) -> Vec<u8> {
        render_to_bytes(&self.to_tokens(), mode, self.line_ending)
    }
}
