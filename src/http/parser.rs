use std::io::{self, BufRead, Read};
use std::sync::Arc;

use bytes::Bytes;
use thiserror::Error;

use crate::http::reader::{read_block, read_line};
use crate::http::request::{Header, Headers, Method, Request, RequestLine};
use crate::http::session::SessionStore;

#[derive(Debug, Error)]
pub enum ParseError {
    /// The request line is missing or is not `METHOD SP URI SP VERSION`.
    #[error("malformed request line: {0:?}")]
    MalformedRequestLine(String),

    #[error("unsupported method: {0}")]
    UnsupportedMethod(String),

    /// A header line without a `:` separator, or a header block that ends
    /// before its blank line.
    #[error("malformed header: {0:?}")]
    MalformedHeader(String),

    /// The stream ended before `Content-Length` bytes of body arrived.
    #[error("truncated body: expected {expected} bytes, received {received}")]
    TruncatedBody { expected: usize, received: usize },

    #[error("i/o error while reading body: {0}")]
    Io(#[from] io::Error),
}

/// Reads one request from `reader`: request line, headers, then exactly
/// `Content-Length` body bytes. Nothing past the body is consumed, and no
/// body is read unless the header block was closed by a blank line.
///
/// `sessions` is handed to the request for later session lookups; pass
/// `None` to run without sessions.
pub fn parse_http_request<R: BufRead>(
    reader: &mut R,
    sessions: Option<Arc<dyn SessionStore>>,
) -> Result<Request, ParseError> {
    let line = loop {
        match read_line(reader) {
            Some(line) if line.is_empty() => continue,
            Some(line) => break line,
            None => return Err(ParseError::MalformedRequestLine(String::new())),
        }
    };
    let request_line = parse_request_line(&line)?;
    tracing::debug!(request_line = %request_line, "parsed request line");

    let block = read_block(reader);
    if !block.terminated {
        return Err(ParseError::MalformedHeader(
            block.lines.last().cloned().unwrap_or_default(),
        ));
    }
    let headers = parse_headers(block.lines)?;
    for header in &headers {
        tracing::debug!(header = %header, "parsed header");
    }

    let body = read_body(reader, &headers)?;

    Ok(Request::new(request_line, headers, body, sessions))
}

/// Splits `METHOD SP URI SP VERSION` on single spaces.
pub fn parse_request_line(line: &str) -> Result<RequestLine, ParseError> {
    let malformed = || ParseError::MalformedRequestLine(line.to_string());

    let mut parts = line.split(' ');
    let method_str = parts.next().filter(|s| !s.is_empty()).ok_or_else(malformed)?;
    let uri = parts.next().filter(|s| !s.is_empty()).ok_or_else(malformed)?;
    let version = parts.next().filter(|s| !s.is_empty()).ok_or_else(malformed)?;

    if parts.next().is_some() {
        return Err(malformed());
    }

    let method: Method = method_str.parse()?;

    Ok(RequestLine::new(method, uri, version))
}

/// Splits each line on its first `:`. The key is kept verbatim, only the
/// value is trimmed.
pub fn parse_headers<I>(lines: I) -> Result<Headers, ParseError>
where
    I: IntoIterator<Item = String>,
{
    lines
        .into_iter()
        .map(|line| match line.split_once(':') {
            Some((key, value)) => Ok(Header::new(key, value.trim())),
            None => Err(ParseError::MalformedHeader(line)),
        })
        .collect()
}

fn read_body<R: BufRead>(reader: &mut R, headers: &Headers) -> Result<Bytes, ParseError> {
    let Some(raw) = headers.get("Content-Length") else {
        return Ok(Bytes::new());
    };

    let expected = match raw.parse::<usize>() {
        Ok(n) => n,
        Err(_) => {
            tracing::warn!(content_length = raw, "ignoring unparsable Content-Length");
            return Ok(Bytes::new());
        }
    };

    let mut body = Vec::with_capacity(expected.min(64 * 1024));
    reader.by_ref().take(expected as u64).read_to_end(&mut body)?;

    if body.len() < expected {
        return Err(ParseError::TruncatedBody {
            expected,
            received: body.len(),
        });
    }

    Ok(Bytes::from(body))
}
