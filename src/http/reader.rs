//! Line-oriented reading primitives over a buffered byte stream.
//!
//! Both functions are tolerant of I/O failure: a read error is logged and
//! reported as "no more data", exactly like a closed stream. Callers that
//! expected content turn the missing line into a parse error of their own.

use std::io::{BufRead, Read};

/// Upper bound on a single line, terminator included.
pub const MAX_LINE_LEN: u64 = 8 * 1024;

/// Reads one line, stripping the trailing `\n` or `\r\n`.
///
/// Returns `None` when the stream is closed, when a read fails, or when the
/// line does not fit in [`MAX_LINE_LEN`] bytes. A final line without a
/// terminator is returned as-is.
pub fn read_line<R: BufRead>(reader: &mut R) -> Option<String> {
    let mut buf = Vec::new();

    let n = match reader.by_ref().take(MAX_LINE_LEN).read_until(b'\n', &mut buf) {
        Ok(n) => n,
        Err(e) => {
            tracing::warn!(error = %e, "failed to read line");
            return None;
        }
    };

    if n == 0 {
        return None;
    }

    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    } else if n as u64 == MAX_LINE_LEN {
        tracing::warn!(limit = MAX_LINE_LEN, "line exceeds limit");
        return None;
    }

    Some(String::from_utf8_lossy(&buf).into_owned())
}

/// Lines read up to a blank line.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LineBlock {
    pub lines: Vec<String>,
    /// `false` when the stream ended (or failed) before the blank line.
    pub terminated: bool,
}

/// Reads lines until the first empty line, reporting whether it was seen.
///
/// The terminating blank line is consumed but not returned.
pub fn read_block<R: BufRead>(reader: &mut R) -> LineBlock {
    let mut block = LineBlock::default();

    while let Some(line) = read_line(reader) {
        if line.is_empty() {
            block.terminated = true;
            break;
        }
        block.lines.push(line);
    }

    block
}

/// Reads lines until the first empty line or end of stream.
pub fn read_lines_until_blank<R: BufRead>(reader: &mut R) -> Vec<String> {
    read_block(reader).lines
}
