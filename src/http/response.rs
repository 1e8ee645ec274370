use std::io::{self, Write};
use std::sync::Arc;

use bytes::Bytes;

use crate::http::content::ContentLoader;
use crate::http::mime::content_type_for;
use crate::http::writer::ResponseWriter;

/// The statuses this server can answer with.
///
/// - `Ok` (200): Request successful
/// - `Found` (302): Redirect to the `Location` header
/// - `BadRequest` (400): Malformed request
/// - `NotFound` (404): Resource not found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 302 Found
    Found,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use webcore::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::Found.as_u16(), 302);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::Found => 302,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Found => "Found",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
        }
    }
}

/// A response under construction, bound to its output sink.
///
/// Headers and body are staged with [`add_header`](Self::add_header) and
/// friends. Each of `forward`, `send_redirect`, `response_body` and
/// `bad_request` picks the status, writes the whole message and consumes the
/// response, so nothing can be staged after the flush. They return the
/// status that was actually sent.
pub struct Response<W: Write> {
    sink: W,
    content: Arc<dyn ContentLoader>,
    headers: Vec<(String, String)>,
    body: Bytes,
}

impl<W: Write> Response<W> {
    pub fn new(sink: W, content: Arc<dyn ContentLoader>) -> Self {
        Self {
            sink,
            content,
            headers: Vec::new(),
            body: Bytes::new(),
        }
    }

    /// Adds or replaces a header.
    ///
    /// Names compare case-insensitively. A replaced header keeps its original
    /// position so the wire order is the order of first insertion.
    pub fn add_header(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        match self.headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(&key)) {
            Some(entry) => entry.1 = value,
            None => self.headers.push((key, value)),
        }
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Stages `Set-Cookie: name=value; Path=/`.
    pub fn set_cookie(&mut self, name: &str, value: &str) {
        self.add_header("Set-Cookie", format!("{}={}; Path=/", name, value));
    }

    /// Serves `path` from the content root matching its extension.
    ///
    /// Answers 200 with `Content-Type` and `Content-Length` set, or 404 with
    /// an empty body when the content does not exist.
    pub fn forward(mut self, path: &str) -> io::Result<StatusCode> {
        let (root, content_type) = content_type_for(path);

        match self.content.load(root, path) {
            Some(body) => {
                self.add_header("Content-Type", content_type);
                self.add_header("Content-Length", body.len().to_string());
                self.body = body;
                self.flush(StatusCode::Ok)
            }
            None => {
                tracing::warn!(path, ?root, "content not found");
                self.not_found()
            }
        }
    }

    /// Answers 302 with `Location: path`. An empty target answers 404.
    pub fn send_redirect(mut self, path: &str) -> io::Result<StatusCode> {
        if path.is_empty() {
            tracing::warn!("redirect without a target");
            return self.not_found();
        }

        self.add_header("Location", path);
        self.flush(StatusCode::Found)
    }

    /// Answers 200 with `body` and a matching `Content-Length`.
    pub fn response_body(mut self, body: impl Into<Bytes>) -> io::Result<StatusCode> {
        let body = body.into();
        self.add_header("Content-Length", body.len().to_string());
        self.body = body;
        self.flush(StatusCode::Ok)
    }

    /// Answers 400 with whatever was staged so far.
    pub fn bad_request(self) -> io::Result<StatusCode> {
        self.flush(StatusCode::BadRequest)
    }

    fn not_found(mut self) -> io::Result<StatusCode> {
        self.body = Bytes::new();
        self.add_header("Content-Length", "0");
        self.flush(StatusCode::NotFound)
    }

    fn flush(mut self, status: StatusCode) -> io::Result<StatusCode> {
        let writer = ResponseWriter::new(status, &self.headers, &self.body);
        writer.write_to(&mut self.sink)?;
        tracing::debug!(status = status.as_u16(), bytes = writer.as_bytes().len(), "response flushed");
        Ok(status)
    }
}
