//! Grouping a token stream into blocks
//!
//! A single pass over the tokens with four states. Each state either
//! absorbs the next token or closes the current block, in which case the
//! token opens a new one:
//!
//! | state        | continues on                                   |
//! |--------------|------------------------------------------------|
//! | Unrecognized | unrecognized lines                             |
//! | Blank        | empty lines                                    |
//! | Comment      | comments; a mapping turns it into Alias        |
//! | Alias        | mappings, commented-out mappings, placeholders |
//!
//! Comments that run straight into a mapping become that block's header.

use hosts_syntax::{IpMapping, Token, TokenKind};

use crate::block::{AliasBlock, BlankRun, Block, CommentRun, UnrecognizedRun};
use crate::entry::PLACEHOLDER_TEXT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Unrecognized,
    Blank,
    Comment,
    Alias,
}

impl State {
    /// State a block opened by `kind` starts in.
    fn seed(kind: &TokenKind) -> Self {
        match kind {
            TokenKind::Empty => Self::Blank,
            TokenKind::Comment(text) if is_placeholder(text) => Self::Alias,
            TokenKind::Comment(_) => Self::Comment,
            TokenKind::Mapping(_) => Self::Alias,
            TokenKind::Unrecognized(_) => Self::Unrecognized,
        }
    }

    /// Next state if the current block absorbs `kind`, `None` if it closes.
    fn advance(self, kind: &TokenKind) -> Option<Self> {
        match (self, kind) {
            (Self::Unrecognized, TokenKind::Unrecognized(_)) => Some(Self::Unrecognized),
            (Self::Blank, TokenKind::Empty) => Some(Self::Blank),
            (Self::Comment, TokenKind::Comment(text)) if is_placeholder(text) => Some(Self::Alias),
            (Self::Comment, TokenKind::Comment(_)) => Some(Self::Comment),
            (Self::Comment, TokenKind::Mapping(_)) => Some(Self::Alias),
            (Self::Alias, TokenKind::Mapping(_)) => Some(Self::Alias),
            (Self::Alias, TokenKind::Comment(text))
                if is_placeholder(text) || IpMapping::parse_fields(text).is_some() =>
            {
                Some(Self::Alias)
            }
            _ => None,
        }
    }
}

fn is_placeholder(text: &str) -> bool {
    text == PLACEHOLDER_TEXT
}

/// The block being accumulated.
struct Open {
    state: State,
    tokens: Vec<Token>,
    /// Number of leading tokens that form an alias block's header.
    header_len: usize,
}

impl Open {
    fn new(token: Token) -> Self {
        Self {
            state: State::seed(&token.kind),
            tokens: vec![token],
            header_len: 0,
        }
    }

    fn finish(mut self) -> Block {
        match self.state {
            State::Unrecognized => Block::Unrecognized(UnrecognizedRun::from_tokens(self.tokens)),
            State::Blank => Block::Blank(BlankRun::from_tokens(self.tokens)),
            State::Comment => Block::Comments(CommentRun::from_tokens(self.tokens)),
            State::Alias => {
                let body = self.tokens.split_off(self.header_len);
                Block::Aliases(AliasBlock::from_tokens(self.tokens, body))
            }
        }
    }
}

/// Group tokens into blocks. Every token lands in exactly one block.
pub fn group(tokens: Vec<Token>) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut open: Option<Open> = None;

    for token in tokens {
        open = Some(match open.take() {
            None => Open::new(token),
            Some(mut current) => match current.state.advance(&token.kind) {
                Some(next) => {
                    if current.state == State::Comment && next == State::Alias {
                        current.header_len = current.tokens.len();
                    }
                    current.state = next;
                    current.tokens.push(token);
                    current
                }
                None => {
                    blocks.push(current.finish());
                    Open::new(token)
                }
            },
        });
    }

    if let Some(current) = open {
        blocks.push(current.finish());
    }

    blocks
}
