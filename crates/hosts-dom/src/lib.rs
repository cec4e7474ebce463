//! Block-structured model of an annotated hosts file.
//!
//! A [`Document`] is a list of [`Block`]s recovered from the line tokens of
//! `hosts-syntax`:
//!
//! ```text
//! # [10] staging - shared test boxes    ┐
//! 10.0.0.5   api.staging                │ Aliases (id 10, name "staging")
//! # 10.0.0.6 db.staging                 ┘   second entry is disabled
//!                                         Blank
//! # free-standing comment                 Comments
//! ```
//!
//! Blocks and entries remember the lines they were parsed from. Writing
//! with [`FormatMode::Keep`] reproduces every untouched line exactly and
//! regenerates only what was changed.

pub mod block;
pub mod document;
pub mod entry;
pub mod error;
pub mod header;
pub mod parser;
pub mod writer;

pub use block::{AliasBlock, BlankRun, Block, CommentRun, HeaderCache, UnrecognizedRun};
pub use document::Document;
pub use entry::{AliasEntry, Entry, PLACEHOLDER_TEXT, Placeholder};
pub use error::{Error, Result};
pub use header::Header;
pub use hosts_syntax::{FormatMode, LineEnding};
pub use writer::{read, write};
