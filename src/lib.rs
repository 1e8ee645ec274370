//! webcore - wire-level core of a small HTTP/1.1 server
//!
//! Parses requests from a byte stream, correlates sessions, and writes
//! responses back to a byte sink.

pub mod config;
pub mod http;
pub mod server;
