//! Command implementations for hostsctl

pub mod alias;
pub mod block;
pub mod database;

pub use alias::{run_alias_add, run_alias_delete, run_alias_list};
pub use block::{run_block_add, run_block_clear, run_block_delete, run_block_list};
pub use database::{run_backup, run_format, run_location, run_print, run_restore};

use hosts_dom::{AliasBlock, Document};

use crate::error::{CliError, Result};

/// Alias blocks selected by `key`: an id if it parses as one, and a name.
pub(crate) fn find_blocks(document: &Document, key: &str) -> Vec<usize> {
    let id = key.trim().parse::<u32>().ok();
    document.find_alias_blocks(id, Some(key))
}

/// Exactly one block selected by `key`.
pub(crate) fn find_single_block(document: &Document, key: &str) -> Result<usize> {
    match find_blocks(document, key).as_slice() {
        [] => Err(block_not_found(key)),
        [idx] => Ok(*idx),
        _ => Err(CliError::user(format!("too many blocks match '{key}'"))),
    }
}

pub(crate) fn block_not_found(key: &str) -> CliError {
    CliError::user(format!("aliases block '{key}' was not found"))
}

/// `+` when every alias is a system alias, `*` when some are.
pub(crate) fn system_marker(system: usize, total: usize) -> &'static str {
    if system == 0 {
        ""
    } else if system == total {
        "+"
    } else {
        "*"
    }
}

/// Name of a block, or its id when unnamed.
pub(crate) fn block_label(block: &AliasBlock) -> String {
    match block.name() {
        Some(name) => name.to_string(),
        None => block.effective_id().map(|id| id.to_string()).unwrap_or_default(),
    }
}

/// Multi-line notes shown on one line.
pub(crate) fn single_line(note: &str) -> String {
    note.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" / ")
}
