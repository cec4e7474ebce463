//! Alias commands

use colored::Colorize;
use serde::Serialize;

use hosts_dom::{AliasBlock, AliasEntry, Block, Document, Entry};
use hosts_syntax::ip::same_ip;
use hosts_syntax::{TokenKind, is_ip, is_system_alias, tokenize};

use super::{block_label, block_not_found, find_blocks, single_line, system_marker};
use crate::cli::{Grouping, OutputFormat};
use crate::context::Context;
use crate::error::{CliError, Result};
use crate::output::{Table, structured};

const HEADERS: [&str; 7] = ["GRP", "SYS", "IP", "ALIAS", "NOTE", "BLOCK", "BLOCK NOTE"];

/// Block an alias row belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockRef {
    pub id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// One row of `alias list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AliasRow {
    pub ip: String,
    pub aliases: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub note: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
    pub block: BlockRef,
    #[serde(skip)]
    block_label: String,
    #[serde(skip)]
    block_note: String,
    #[serde(skip)]
    first_in_block: bool,
}

impl AliasRow {
    fn new(block: &AliasBlock, entry: &AliasEntry, aliases: Vec<String>) -> Self {
        Self {
            ip: entry.ip().to_string(),
            aliases,
            note: entry.note().to_string(),
            disabled: entry.is_disabled(),
            block: BlockRef {
                id: block.effective_id(),
                name: block.name().map(str::to_string),
            },
            block_label: block_label(block),
            block_note: single_line(block.note()),
            first_in_block: false,
        }
    }

    fn system_count(&self) -> usize {
        self.aliases
            .iter()
            .filter(|alias| is_system_alias(&self.ip, alias))
            .count()
    }

    /// Fold `other` into this row: new aliases are appended and notes joined.
    fn merge(&mut self, other: Self) {
        for alias in other.aliases {
            if !self.aliases.iter().any(|a| a.eq_ignore_ascii_case(&alias)) {
                self.aliases.push(alias);
            }
        }
        if !other.note.is_empty() {
            if !self.note.is_empty() {
                self.note.push_str(", ");
            }
            self.note.push_str(&other.note);
        }
    }
}

/// Rows for `alias list` over the alias blocks at `scope` (all if `None`).
pub fn alias_rows(
    document: &Document,
    scope: Option<&[usize]>,
    grouping: Grouping,
    include_disabled: bool,
) -> Vec<AliasRow> {
    let mut rows = Vec::new();

    for (idx, block) in document.alias_blocks() {
        if scope.is_some_and(|scope| !scope.contains(&idx)) {
            continue;
        }

        let entries = block
            .alias_entries()
            .filter(|e| include_disabled || !e.is_disabled());
        let mut block_rows: Vec<AliasRow> = Vec::new();
        for entry in entries {
            match grouping {
                Grouping::Raw => block_rows.push(AliasRow::new(block, entry, entry.aliases().to_vec())),
                Grouping::Ungroup => block_rows.extend(
                    entry
                        .aliases()
                        .iter()
                        .map(|alias| AliasRow::new(block, entry, vec![alias.clone()])),
                ),
                Grouping::Group => {
                    let row = AliasRow::new(block, entry, entry.aliases().to_vec());
                    match block_rows
                        .iter_mut()
                        .find(|r| r.disabled == row.disabled && same_ip(&r.ip, &row.ip))
                    {
                        Some(existing) => existing.merge(row),
                        None => block_rows.push(row),
                    }
                }
            }
        }

        if let Some(first) = block_rows.first_mut() {
            first.first_in_block = true;
        }
        rows.extend(block_rows);
    }
    rows
}

/// Format `rows` for `alias list`.
pub fn format_aliases(rows: &[AliasRow], format: OutputFormat, headers: bool) -> Result<String> {
    if let Some(text) = structured(&rows, format)? {
        return Ok(text);
    }
    if format == OutputFormat::Plain {
        return Ok(rows
            .iter()
            .map(|row| format!("{}\t{}\n", row.ip, row.aliases.join(" ")))
            .collect());
    }

    let mut table = Table::new(HEADERS.to_vec());
    for row in rows {
        let group = match (row.first_in_block, row.block.id) {
            (true, Some(id)) => format!("[{id}]"),
            _ => String::new(),
        };
        let ip = if row.disabled {
            format!("#{}", row.ip)
        } else {
            row.ip.clone()
        };
        table.push(vec![
            group,
            system_marker(row.system_count(), row.aliases.len()).to_string(),
            ip,
            row.aliases.join(", "),
            row.note.clone(),
            row.block_label.clone(),
            row.block_note.clone(),
        ]);
    }

    let text = match format {
        OutputFormat::Short => table.render(&[2, 3], headers),
        OutputFormat::Wide => table.render(&[0, 1, 2, 3, 4, 5, 6], headers),
        _ => table.render(&[0, 1, 2, 3], headers),
    };
    Ok(text)
}

/// Options of `alias list`.
#[derive(Debug, Clone, Copy)]
pub struct ListOptions<'a> {
    pub format: OutputFormat,
    pub grouping: Grouping,
    pub headers: bool,
    pub block: Option<&'a str>,
    pub include_disabled: bool,
}

/// Run `alias list`
pub fn run_alias_list(ctx: &mut Context, options: ListOptions<'_>) -> Result<()> {
    let document = ctx.load()?;
    let scope = match options.block {
        Some(key) => {
            let found = find_blocks(&document, key);
            if found.is_empty() {
                return Err(block_not_found(key));
            }
            Some(found)
        }
        None => None,
    };

    let rows = alias_rows(
        &document,
        scope.as_deref(),
        options.grouping,
        options.include_disabled,
    );
    print!("{}", format_aliases(&rows, options.format, options.headers)?);
    Ok(())
}

/// An IP and the aliases to add for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub ip: String,
    pub aliases: Vec<String>,
    pub note: String,
}

/// Entry from positional arguments: an IP followed by aliases.
pub fn entry_from_args(args: &[String], note: Option<&str>) -> Result<NewEntry> {
    let Some((ip, aliases)) = args.split_first().filter(|(_, aliases)| !aliases.is_empty())
    else {
        return Err(CliError::user(
            "expected an IP address followed by at least one alias",
        ));
    };
    if !is_ip(ip) {
        return Err(CliError::user(format!("'{ip}' is not an IP address")));
    }
    Ok(NewEntry {
        ip: ip.clone(),
        aliases: aliases.to_vec(),
        note: note.unwrap_or_default().to_string(),
    })
}

/// Entries read from text in hosts file syntax.
///
/// Blank and comment lines are skipped. A line that is neither fails the
/// whole input unless `force` is set, in which case it is skipped too.
pub fn entries_from_input(input: &str, force: bool) -> Result<Vec<NewEntry>> {
    let mut entries = Vec::new();
    for token in tokenize(input) {
        match token.kind {
            TokenKind::Mapping(mapping) if !mapping.disabled => entries.push(NewEntry {
                ip: mapping.ip,
                aliases: mapping.aliases,
                note: mapping.comment,
            }),
            TokenKind::Unrecognized(text) => {
                let line = token.line.unwrap_or_default();
                if !force {
                    return Err(CliError::user(format!("error in input line {line}")));
                }
                tracing::warn!(line, text = %text, "Skipping unrecognized input line");
            }
            _ => {}
        }
    }

    if entries.is_empty() {
        return Err(CliError::user("no IP aliases provided"));
    }
    Ok(entries)
}

/// Block the aliases go to.
///
/// A named block must exist unless `force` creates it. Without a name, the
/// last alias block is used if nothing but blank lines follows it.
fn target_block(document: &mut Document, key: Option<&str>, force: bool) -> Result<usize> {
    let Some(key) = key else {
        let last = document.alias_blocks().last().map(|(idx, _)| idx);
        return Ok(match last {
            Some(idx) if document.blocks()[idx + 1..].iter().all(Block::is_blank) => idx,
            _ => document.push_alias_block(AliasBlock::new()),
        });
    };

    match find_blocks(document, key).as_slice() {
        [idx] => Ok(*idx),
        [] if force => {
            let block = match key.trim().parse::<u32>() {
                Ok(id) => AliasBlock::new().with_id(id),
                Err(_) => AliasBlock::new().with_name(key),
            };
            tracing::info!(block = key, "Creating missing block");
            Ok(document.push_alias_block(block))
        }
        [] => Err(block_not_found(key)),
        _ => Err(CliError::user(format!("too many blocks match '{key}'"))),
    }
}

/// Add `entries` to the target block. Aliases for an IP that already has an
/// enabled entry in the block are merged into it.
///
/// Returns the block index and the number of aliases added.
pub fn add_aliases(
    document: &mut Document,
    entries: Vec<NewEntry>,
    key: Option<&str>,
    force: bool,
) -> Result<(usize, usize)> {
    let idx = target_block(document, key, force)?;
    let block = document
        .alias_block_mut(idx)
        .ok_or_else(|| block_not_found(key.unwrap_or_default()))?;

    let mut added = 0;
    for new in entries {
        let existing = block.entries().iter().position(|e| {
            e.as_alias()
                .is_some_and(|a| !a.is_disabled() && a.matches_ip(&new.ip))
        });

        match existing.and_then(|pos| block.entry_mut(pos)).and_then(Entry::as_alias_mut) {
            Some(entry) => {
                added += new.aliases.iter().filter(|a| entry.add_alias(a)).count();
                if entry.note().is_empty() && !new.note.is_empty() {
                    entry.set_note(new.note);
                }
            }
            None => {
                let mut entry = AliasEntry::with_aliases(new.ip, new.aliases)?;
                entry.set_note(new.note);
                added += entry.aliases().len();
                block.add_entry(entry);
            }
        }
    }

    document.normalize();
    Ok((idx, added))
}

/// Options of `alias add`.
#[derive(Debug, Clone, Copy)]
pub struct AddOptions<'a> {
    pub block: Option<&'a str>,
    pub note: Option<&'a str>,
    pub force: bool,
}

/// Run `alias add`
pub fn run_alias_add(ctx: &mut Context, args: &[String], options: AddOptions<'_>) -> Result<()> {
    let entries = if args.is_empty() {
        let input = std::io::read_to_string(std::io::stdin())?;
        entries_from_input(&input, options.force)?
    } else {
        vec![entry_from_args(args, options.note)?]
    };

    let mut document = ctx.load()?;
    let (idx, added) = add_aliases(&mut document, entries, options.block, options.force)?;
    ctx.save(&document)?;

    let label = document.alias_block(idx).map(block_label).unwrap_or_default();
    println!(
        "{} Added {} alias(es) to block {}.",
        "OK".green().bold(),
        added,
        label.cyan()
    );
    Ok(())
}

/// Delete `target` from the document.
///
/// An IP removes every entry with that address; an alias is removed from
/// the entries listing it, dropping entries left without aliases. System
/// aliases and multiple matches are refused unless `force` is set.
///
/// Returns how many entries were affected.
pub fn delete_aliases(
    document: &mut Document,
    target: &str,
    key: Option<&str>,
    force: bool,
) -> Result<usize> {
    let scope = match key {
        Some(key) => {
            let found = find_blocks(document, key);
            if found.is_empty() {
                return Err(block_not_found(key));
            }
            Some(found)
        }
        None => None,
    };
    let by_ip = is_ip(target);
    let view: &Document = document;

    let matches: Vec<(usize, usize)> = view
        .entries_by_ip_or_alias(target)
        .into_iter()
        .filter(|(b, _)| scope.as_ref().is_none_or(|scope| scope.contains(b)))
        .filter(|&(b, e)| {
            entry_at(view, b, e).is_some_and(|entry| {
                if by_ip {
                    entry.matches_ip(target)
                } else {
                    entry.has_alias(target)
                }
            })
        })
        .collect();

    if matches.is_empty() {
        return if force {
            Ok(0)
        } else {
            Err(CliError::user(format!("no entries match '{target}'")))
        };
    }

    if !force {
        let system = matches
            .iter()
            .filter_map(|&(b, e)| entry_at(view, b, e))
            .filter(|entry| {
                if by_ip {
                    entry.system_aliases().next().is_some()
                } else {
                    is_system_alias(entry.ip(), target)
                }
            })
            .count();
        if system > 0 {
            return Err(CliError::user(format!(
                "{system} of {} entries is system",
                matches.len()
            )));
        }
        if matches.len() > 1 {
            return Err(CliError::user(format!(
                "too many entries match '{target}'; use --force to delete them all"
            )));
        }
    }

    for &(b, e) in matches.iter().rev() {
        let Some(block) = document.alias_block_mut(b) else {
            continue;
        };
        let emptied = by_ip
            || block
                .entry_mut(e)
                .and_then(Entry::as_alias_mut)
                .is_some_and(|entry| {
                    entry.remove_alias(target);
                    entry.aliases().is_empty()
                });
        if emptied {
            block.remove_entry(e);
        }
    }

    document.normalize();
    Ok(matches.len())
}

fn entry_at(document: &Document, block: usize, entry: usize) -> Option<&AliasEntry> {
    document
        .alias_block(block)
        .and_then(|b| b.entries().get(entry))
        .and_then(Entry::as_alias)
}

/// Run `alias delete`
pub fn run_alias_delete(
    ctx: &mut Context,
    target: &str,
    block: Option<&str>,
    force: bool,
) -> Result<()> {
    let mut document = ctx.load()?;
    let affected = delete_aliases(&mut document, target, block, force)?;
    if affected == 0 {
        println!("Nothing to delete.");
        return Ok(());
    }
    ctx.save(&document)?;
    println!(
        "{} Deleted {} from {} entr{}.",
        "OK".green().bold(),
        target.cyan(),
        affected,
        if affected == 1 { "y" } else { "ies" }
    );
    Ok(())
}
