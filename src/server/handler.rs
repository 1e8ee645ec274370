use std::io::{self, Write};

use crate::http::request::{Method, Request};
use crate::http::response::{Response, StatusCode};
use crate::http::session::SESSION_COOKIE_NAME;

/// Sink type handed to handlers.
pub type Sink<'a> = &'a mut dyn Write;

/// Business logic: turns a parsed request into exactly one response.
pub trait Handler: Send + Sync {
    fn handle(&self, request: &Request, response: Response<Sink<'_>>) -> io::Result<StatusCode>;
}

/// Serves GET requests from the content roots. `/` maps to `/index.html`;
/// every other method is a bad request.
#[derive(Debug, Clone, Default)]
pub struct StaticFiles {
    sessions: bool,
}

impl StaticFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also correlate every request with a session, issuing the cookie for
    /// new ones.
    pub fn with_sessions(mut self) -> Self {
        self.sessions = true;
        self
    }
}

impl Handler for StaticFiles {
    fn handle(&self, request: &Request, mut response: Response<Sink<'_>>) -> io::Result<StatusCode> {
        if request.method() != Method::GET {
            return response.bad_request();
        }

        if self.sessions {
            match request.session_or_create() {
                Ok(session) if request.cookie(SESSION_COOKIE_NAME) != Some(session.id()) => {
                    response.set_cookie(SESSION_COOKIE_NAME, session.id());
                }
                Ok(_) => {}
                Err(e) => tracing::error!(error = %e, "session lookup failed"),
            }
        }

        let path = match request.path() {
            "/" => "/index.html",
            other => other,
        };
        response.forward(path)
    }
}
