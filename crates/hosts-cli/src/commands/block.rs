//! Block commands

use colored::Colorize;
use serde::Serialize;

use hosts_dom::{AliasBlock, Document};

use super::{block_not_found, find_blocks, single_line, system_marker};
use crate::cli::OutputFormat;
use crate::context::Context;
use crate::error::{CliError, Result};
use crate::output::{Table, structured};

const HEADERS: [&str; 6] = ["ID", "SYS", "NAME", "NOTE", "ALIASES", "SYSTEM ALIASES"];

/// One row of `block list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockRow {
    pub id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub note: String,
    pub aliases: usize,
    pub system_aliases: usize,
}

impl BlockRow {
    /// Counts cover enabled entries only.
    pub fn from_block(block: &AliasBlock) -> Self {
        let enabled = || block.alias_entries().filter(|e| !e.is_disabled());
        Self {
            id: block.effective_id(),
            name: block.name().map(str::to_string),
            note: block.note().to_string(),
            aliases: enabled().map(|e| e.aliases().len()).sum(),
            system_aliases: enabled().map(|e| e.system_aliases().count()).sum(),
        }
    }
}

pub fn block_rows(document: &Document) -> Vec<BlockRow> {
    document
        .alias_blocks()
        .map(|(_, block)| BlockRow::from_block(block))
        .collect()
}

/// Format `rows` for `block list`.
pub fn format_blocks(rows: &[BlockRow], format: OutputFormat, headers: bool) -> Result<String> {
    if let Some(text) = structured(&rows, format)? {
        return Ok(text);
    }
    if format == OutputFormat::Plain {
        return Ok(rows
            .iter()
            .map(|row| {
                let id = row.id.map(|id| id.to_string()).unwrap_or_default();
                format!("{}\t{}\n", id, row.name.as_deref().unwrap_or(""))
            })
            .collect());
    }

    let mut table = Table::new(HEADERS.to_vec());
    for row in rows {
        table.push(vec![
            row.id.map(|id| id.to_string()).unwrap_or_default(),
            system_marker(row.system_aliases, row.aliases).to_string(),
            row.name.clone().unwrap_or_default(),
            single_line(&row.note),
            row.aliases.to_string(),
            row.system_aliases.to_string(),
        ]);
    }

    let text = match format {
        OutputFormat::Short => table.render(&[0, 2], headers),
        OutputFormat::Wide => table.render(&[0, 1, 2, 3, 4, 5], headers),
        _ => table.render(&[0, 1, 2], headers),
    };
    Ok(text)
}

/// Run `block list`
pub fn run_block_list(ctx: &mut Context, format: OutputFormat, no_headers: bool) -> Result<()> {
    let document = ctx.load()?;
    let rows = block_rows(&document);
    print!("{}", format_blocks(&rows, format, !no_headers)?);
    Ok(())
}

/// Arguments of `block add`.
#[derive(Debug, Clone, Default)]
pub struct BlockSpec<'a> {
    pub key: Option<&'a str>,
    pub id: Option<u32>,
    pub name: Option<&'a str>,
    pub note: Option<&'a str>,
}

impl<'a> BlockSpec<'a> {
    /// Explicit flags win over the positional id-or-name.
    fn resolve(&self) -> (Option<u32>, Option<&'a str>) {
        let (key_id, key_name) = match self.key {
            Some(key) => match key.trim().parse::<u32>() {
                Ok(id) => (Some(id), None),
                Err(_) => (None, Some(key)),
            },
            None => (None, None),
        };
        (self.id.or(key_id), self.name.or(key_name))
    }
}

/// Create a block, or update the matching one when `force` is set.
///
/// Returns the index of the block in the document.
pub fn add_block(document: &mut Document, spec: &BlockSpec<'_>, force: bool) -> Result<usize> {
    let (id, name) = spec.resolve();
    let existing = if id.is_some() || name.is_some() {
        document.find_alias_blocks(id, name)
    } else {
        Vec::new()
    };

    match existing.as_slice() {
        [] => {
            let mut block = AliasBlock::new();
            if let Some(id) = id {
                block = block.with_id(id);
            }
            if let Some(name) = name {
                block = block.with_name(name);
            }
            if let Some(note) = spec.note {
                block = block.with_note(note);
            }
            let idx = document.push_alias_block(block);
            document.normalize();
            Ok(idx)
        }
        [idx] if force => {
            let idx = *idx;
            if let Some(block) = document.alias_block_mut(idx) {
                if let Some(id) = id.filter(|id| block.id() != Some(*id)) {
                    block.set_id(Some(id));
                }
                if let Some(name) = name.filter(|n| block.name() != Some(*n)) {
                    block.set_name(Some(name.to_string()));
                }
                if let Some(note) = spec.note.filter(|n| block.note() != *n) {
                    block.set_note(note);
                }
            }
            document.normalize();
            Ok(idx)
        }
        [_] => Err(CliError::user(
            "the block already exists; use --force to update it",
        )),
        _ => Err(CliError::user("too many blocks match")),
    }
}

/// Run `block add`
pub fn run_block_add(ctx: &mut Context, spec: &BlockSpec<'_>, force: bool) -> Result<()> {
    let mut document = ctx.load()?;
    let idx = add_block(&mut document, spec, force)?;
    ctx.save(&document)?;

    let label = document
        .alias_block(idx)
        .map(describe)
        .unwrap_or_default();
    println!("{} Block {} saved.", "OK".green().bold(), label.cyan());
    Ok(())
}

/// Remove the blocks matching `key` and the blank run after each.
///
/// Returns how many blocks were removed.
pub fn delete_block(document: &mut Document, key: &str, force: bool) -> Result<usize> {
    let matches = find_blocks(document, key);
    if matches.is_empty() {
        return if force { Ok(0) } else { Err(block_not_found(key)) };
    }
    if !force {
        if matches.len() > 1 {
            return Err(CliError::user(format!("too many blocks match '{key}'")));
        }
        let has_aliases = matches
            .iter()
            .filter_map(|&idx| document.alias_block(idx))
            .any(|block| block.alias_count() > 0);
        if has_aliases {
            return Err(CliError::user(format!(
                "block '{key}' has aliases; use --force to delete it"
            )));
        }
    }

    for &idx in matches.iter().rev() {
        document.remove_block(idx);
        if document.block(idx).is_some_and(|b| b.is_blank()) {
            document.remove_block(idx);
        }
    }
    Ok(matches.len())
}

/// Run `block delete`
pub fn run_block_delete(ctx: &mut Context, key: &str, force: bool) -> Result<()> {
    let mut document = ctx.load()?;
    let removed = delete_block(&mut document, key, force)?;
    if removed == 0 {
        println!("Nothing to delete.");
        return Ok(());
    }
    ctx.save(&document)?;
    println!(
        "{} Deleted {} block(s) matching {}.",
        "OK".green().bold(),
        removed,
        key.cyan()
    );
    Ok(())
}

/// Remove every alias entry from the blocks matching `key`.
///
/// Returns how many blocks were cleared.
pub fn clear_block(document: &mut Document, key: &str, force: bool) -> Result<usize> {
    let matches = find_blocks(document, key);
    if matches.is_empty() {
        return if force { Ok(0) } else { Err(block_not_found(key)) };
    }
    if !force {
        if matches.len() > 1 {
            return Err(CliError::user(format!("too many blocks match '{key}'")));
        }
        let has_system = matches
            .iter()
            .filter_map(|&idx| document.alias_block(idx))
            .flat_map(|block| block.alias_entries())
            .any(|entry| entry.system_aliases().next().is_some());
        if has_system {
            return Err(CliError::user("the block has system aliases"));
        }
    }

    for &idx in &matches {
        if let Some(block) = document.alias_block_mut(idx) {
            block.clear_aliases();
        }
    }
    document.normalize();
    Ok(matches.len())
}

/// Run `block clear`
pub fn run_block_clear(ctx: &mut Context, key: &str, force: bool) -> Result<()> {
    let mut document = ctx.load()?;
    let cleared = clear_block(&mut document, key, force)?;
    if cleared == 0 {
        println!("Nothing to clear.");
        return Ok(());
    }
    ctx.save(&document)?;
    println!("{} Cleared block {}.", "OK".green().bold(), key.cyan());
    Ok(())
}

/// `[id] name` for messages.
fn describe(block: &AliasBlock) -> String {
    let id = block
        .effective_id()
        .map(|id| format!("[{id}]"))
        .unwrap_or_default();
    match block.name() {
        Some(name) => format!("{id} {name}"),
        None => id,
    }
}
