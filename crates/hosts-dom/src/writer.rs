//! Reading and writing documents through `std::io`

use std::io::{Read, Write};

use hosts_syntax::{FormatMode, render};

use crate::document::Document;
use crate::error::{Error, Result};

/// Read and parse a whole hosts file from `reader`.
///
/// Only I/O failures are errors; content that is not valid UTF-8 is kept
/// byte-for-byte.
pub fn read<R: Read>(mut reader: R) -> Result<Document> {
    let mut source = Vec::new();
    reader.read_to_end(&mut source).map_err(Error::Read)?;
    Ok(Document::from_bytes(&source))
}

/// Serialize `document` to `writer` in the given mode.
pub fn write<W: Write>(mut writer: W, document: &Document, mode: FormatMode) -> Result<()> {
    let tokens = document.to_tokens();
    render(&tokens, mode, document.line_ending(), &mut writer).map_err(Error::Write)?;
    writer.flush().map_err(Error::Write)
}

impl Document {
    /// Serialize to `writer`; see [`write`].
    pub fn write<W: Write>(&self, writer: W, mode: FormatMode) -> Result<()> {
        write(writer, self, mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io;

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn read_then_write_round_trips() {
        let source = "# [1] base\n127.0.0.1 localhost\n\n";
        let doc = read(source.as_bytes()).unwrap();
        let mut out = Vec::new();
        doc.write(&mut out, FormatMode::Keep).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), source);
    }

    struct FailingSource;

    impl Read for FailingSource {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        }
    }

    #[test]
    fn non_utf8_content_round_trips() {
        let source = b"# caf\xe9\n127.0.0.1 localhost\n\xff junk\n";
        let doc = read(&source[..]).unwrap();
        assert_eq!(doc.alias_blocks().count(), 1);

        let mut out = Vec::new();
        doc.write(&mut out, FormatMode::Keep).unwrap();
        assert_eq!(out, source.to_vec());
    }

    #[test]
    fn source_failure_is_a_read_error() {
        let err = read(FailingSource).unwrap_err();
        assert!(matches!(err, Error::Read(_)));
    }

    #[test]
    fn sink_failure_is_a_write_error() {
        let doc = Document::parse("127.0.0.1 localhost");
        let err = write(FailingSink, &doc, FormatMode::Keep).unwrap_err();
        assert!(matches!(err, Error::Write(_)));
    }
}
