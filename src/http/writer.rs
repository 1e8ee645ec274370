use std::io::Write;

use bytes::{BufMut, BytesMut};

use crate::http::response::StatusCode;

const HTTP_VERSION: &str = "HTTP/1.1";
const CRLF: &[u8] = b"\r\n";

/// Lays out status line, headers in the given order, blank line, body.
pub fn serialize_response(status: StatusCode, headers: &[(String, String)], body: &[u8]) -> BytesMut {
    let mut buf = BytesMut::with_capacity(128 + body.len());

    // Status line
    let status_line = format!(
        "{} {} {}",
        HTTP_VERSION,
        status.as_u16(),
        status.reason_phrase()
    );
    buf.put_slice(status_line.as_bytes());
    buf.put_slice(CRLF);

    // Headers
    for (k, v) in headers {
        buf.put_slice(k.as_bytes());
        buf.put_slice(b": ");
        buf.put_slice(v.as_bytes());
        buf.put_slice(CRLF);
    }

    // Header/body separator
    buf.put_slice(CRLF);

    // Body
    buf.put_slice(body);

    buf
}

pub struct ResponseWriter {
    buffer: BytesMut,
}

impl ResponseWriter {
    pub fn new(status: StatusCode, headers: &[(String, String)], body: &[u8]) -> Self {
        Self {
            buffer: serialize_response(status, headers, body),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Writes the whole message and flushes the sink.
    pub fn write_to<W: Write + ?Sized>(&self, sink: &mut W) -> std::io::Result<()> {
        sink.write_all(&self.buffer)?;
        sink.flush()
    }
}
