//! Line-level syntax for annotated hosts files.
//!
//! A hosts file is read one physical line at a time. Every line is
//! classified into a [`Token`]:
//!
//! ```text
//! # [10] staging - shared test boxes     -> Comment
//! 10.0.0.5    api.staging  db.staging    -> Mapping
//!                                        -> Empty
//! this is not a hosts line               -> Unrecognized
//! ```
//!
//! Tokenizing never fails; anything that is not a comment, blank or mapping
//! becomes [`TokenKind::Unrecognized`] and is carried through verbatim.
//!
//! The [`render`] module turns a token stream back into text, either
//! reproducing the original lines ([`FormatMode::Keep`]) or recomputing
//! column alignment for every mapping line ([`FormatMode::ReFormat`]).

pub mod ip;
pub mod layout;
pub mod render;
pub mod token;
pub mod tokenizer;

pub use ip::{is_ip, is_ipv4, is_ipv6, is_system_alias};
pub use layout::{Columns, Spacing};
pub use render::{FormatMode, LineEnding, render, render_to_bytes, render_to_string};
pub use token::{IpMapping, Token, TokenKind};
pub use tokenizer::{classify, tokenize, tokenize_bytes};
