//! Line tokenizer
//!
//! Splits source bytes on `\n` and classifies each line. The split is total:
//! joining the source bytes of the produced tokens with `\n` gives back the
//! input byte-for-byte, including a final newline and any `\r` before it.

use crate::token::{IpMapping, Token, TokenKind};

/// Tokenize a complete hosts file.
///
/// Empty input yields no tokens. Input ending in `\n` yields a trailing
/// [`TokenKind::Empty`] token so the final newline survives a round trip.
pub fn tokenize(source: &str) -> Vec<Token> {
    tokenize_bytes(source.as_bytes())
}

/// Tokenize raw file content that may not be valid UTF-8.
///
/// Lines that fail to decode are classified from their lossy decoding and
/// keep their original bytes in [`Token::bytes`].
pub fn tokenize_bytes(source: &[u8]) -> Vec<Token> {
    if source.is_empty() {
        return Vec::new();
    }

    source
        .split(|&b| b == b'\n')
        .enumerate()
        .map(|(idx, line)| {
            let (raw, bytes) = match std::str::from_utf8(line) {
                Ok(text) => (text.to_string(), None),
                Err(_) => (String::from_utf8_lossy(line).into_owned(), Some(line.to_vec())),
            };
            Token {
                line: Some(idx + 1),
                kind: classify(&raw),
                raw: Some(raw),
                bytes,
            }
        })
        .collect()
}

/// Classify a single line (without its `\n` terminator).
pub fn classify(line: &str) -> TokenKind {
    let trimmed = line.trim();

    if trimmed.is_empty() {
        return TokenKind::Empty;
    }

    if trimmed.starts_with('#') {
        let text = trimmed.trim_start_matches('#').trim();
        return TokenKind::Comment(text.to_string());
    }

    match IpMapping::parse_fields(trimmed) {
        Some(mapping) => TokenKind::Mapping(mapping),
        None => TokenKind::Unrecognized(line.trim_end_matches('\r').to_string()),
    }
}
