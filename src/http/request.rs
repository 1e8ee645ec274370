use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use bytes::Bytes;

use crate::http::cookie::Cookies;
use crate::http::params;
use crate::http::parser::ParseError;
use crate::http::session::{Session, SessionError, SessionStore, SESSION_COOKIE_NAME};

/// HTTP request methods.
///
/// Matching is case-sensitive: `get` is not a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Create or submit data
    POST,
    /// PUT - Replace a resource
    PUT,
    /// DELETE - Delete a resource
    DELETE,
    /// HEAD - Like GET but without the response body
    HEAD,
    /// OPTIONS - Describe communication options
    OPTIONS,
    /// PATCH - Partial modification of a resource
    PATCH,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::HEAD => "HEAD",
            Method::OPTIONS => "OPTIONS",
            Method::PATCH => "PATCH",
        }
    }
}

impl FromStr for Method {
    type Err = ParseError;

    /// Parses an HTTP method token.
    ///
    /// # Example
    ///
    /// ```
    /// # use webcore::http::request::Method;
    /// assert_eq!("GET".parse::<Method>().ok(), Some(Method::GET));
    /// assert!("get".parse::<Method>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(Method::GET),
            "POST" => Ok(Method::POST),
            "PUT" => Ok(Method::PUT),
            "DELETE" => Ok(Method::DELETE),
            "HEAD" => Ok(Method::HEAD),
            "OPTIONS" => Ok(Method::OPTIONS),
            "PATCH" => Ok(Method::PATCH),
            _ => Err(ParseError::UnsupportedMethod(s.to_string())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The first line of a request: `METHOD SP URI SP VERSION`.
///
/// `path` never contains `?`; everything after the first `?` of the raw URI
/// lands in `query_string`, which is `Some("")` for a URI ending in a bare `?`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    pub method: Method,
    pub raw_uri: String,
    pub path: String,
    pub query_string: Option<String>,
    pub version: String,
}

impl RequestLine {
    pub fn new(method: Method, raw_uri: impl Into<String>, version: impl Into<String>) -> Self {
        let raw_uri = raw_uri.into();
        let (path, query_string) = match raw_uri.split_once('?') {
            Some((path, query)) => (path.to_string(), Some(query.to_string())),
            None => (raw_uri.clone(), None),
        };

        Self {
            method,
            raw_uri,
            path,
            query_string,
            version: version.into(),
        }
    }
}

impl fmt::Display for RequestLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.method, self.raw_uri, self.version)
    }
}

/// A single header as it arrived: key case preserved, value trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub key: String,
    pub value: String,
}

impl Header {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.value)
    }
}

/// Ordered header list. Duplicates are kept in arrival order.
///
/// Single-value lookups are case-insensitive and return the *last* match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<Header>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, header: Header) {
        self.entries.push(header);
    }

    /// Retrieves the last value sent under `name`, ignoring ASCII case.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|h| h.key.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    /// All values sent under `name`, in arrival order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |h| h.key.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Header> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<Header> for Headers {
    fn from_iter<I: IntoIterator<Item = Header>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = &'a Header;
    type IntoIter = std::slice::Iter<'a, Header>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// A fully parsed HTTP request.
///
/// Built once by [`Request::new`] and never mutated afterwards, so it can be
/// shared across threads freely. Cookies and parameters are derived at
/// construction; the session is looked up lazily through the store handle.
#[derive(Clone)]
pub struct Request {
    line: RequestLine,
    headers: Headers,
    cookies: Cookies,
    params: HashMap<String, String>,
    body: Bytes,
    sessions: Option<Arc<dyn SessionStore>>,
}

impl Request {
    /// Assembles a request from its parsed parts.
    ///
    /// Query parameters come from the request line; for POST requests with a
    /// form (or untyped) body, body parameters are overlaid on top of them.
    pub fn new(
        line: RequestLine,
        headers: Headers,
        body: Bytes,
        sessions: Option<Arc<dyn SessionStore>>,
    ) -> Self {
        let cookies = headers
            .get("Cookie")
            .map(Cookies::parse)
            .unwrap_or_default();

        let mut params = line
            .query_string
            .as_deref()
            .map(params::parse_pairs)
            .unwrap_or_default();

        if line.method == Method::POST && params::is_form_body(headers.get("Content-Type")) {
            params::merge(&mut params, params::parse_pairs_bytes(&body));
        }

        Self {
            line,
            headers,
            cookies,
            params,
            body,
            sessions,
        }
    }

    pub fn request_line(&self) -> &RequestLine {
        &self.line
    }

    pub fn method(&self) -> Method {
        self.line.method
    }

    pub fn path(&self) -> &str {
        &self.line.path
    }

    pub fn raw_uri(&self) -> &str {
        &self.line.raw_uri
    }

    pub fn query_string(&self) -> Option<&str> {
        self.line.query_string.as_deref()
    }

    pub fn version(&self) -> &str {
        &self.line.version
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Retrieves a header value by name, case-insensitively, last one wins.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key)
    }

    /// Retrieves the Content-Length header value and parses it as a usize.
    ///
    /// Returns 0 if the header is missing or not a valid number.
    pub fn content_length(&self) -> usize {
        self.header("Content-Length")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    }

    pub fn cookies(&self) -> &Cookies {
        &self.cookies
    }

    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name)
    }

    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// The body as text, with invalid UTF-8 replaced.
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Correlates this request with a server-side session.
    ///
    /// Looks up the id carried in the session cookie. When nothing matches and
    /// `create_if_absent` is set, a fresh session is registered and returned;
    /// sending its id back to the client is the caller's job.
    ///
    /// # Errors
    ///
    /// [`SessionError::FeatureDisabled`] if the request was parsed without a
    /// session store.
    pub fn session(&self, create_if_absent: bool) -> Result<Option<Arc<Session>>, SessionError> {
        let store = self.session_store()?;

        match self.existing_session(store) {
            Some(session) => Ok(Some(session)),
            None if create_if_absent => Ok(Some(Self::create_session(store))),
            None => Ok(None),
        }
    }

    /// Same as `session(true)`, which always yields a session.
    pub fn session_or_create(&self) -> Result<Arc<Session>, SessionError> {
        let store = self.session_store()?;

        Ok(self
            .existing_session(store)
            .unwrap_or_else(|| Self::create_session(store)))
    }

    fn session_store(&self) -> Result<&Arc<dyn SessionStore>, SessionError> {
        self.sessions.as_ref().ok_or(SessionError::FeatureDisabled)
    }

    fn existing_session(&self, store: &Arc<dyn SessionStore>) -> Option<Arc<Session>> {
        self.cookie(SESSION_COOKIE_NAME).and_then(|id| store.get(id))
    }

    fn create_session(store: &Arc<dyn SessionStore>) -> Arc<Session> {
        let session = store.create();
        tracing::debug!(session_id = %session.id(), "created session");
        session
    }
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("line", &self.line)
            .field("headers", &self.headers)
            .field("cookies", &self.cookies)
            .field("params", &self.params)
            .field("body_len", &self.body.len())
            .field("sessions", &self.sessions.is_some())
            .finish()
    }
}
