//! HTTP protocol implementation.
//!
//! # Architecture
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`reader`**: CRLF/LF line reading that treats I/O failure as end of stream
//! - **`parser`**: Request line, headers and body from a buffered stream
//! - **`request`**: The immutable request model and its accessors
//! - **`params`**: Query-string and form-body parameters
//! - **`cookie`**: `Cookie` header parsing
//! - **`session`**: Session store and cookie correlation
//! - **`response`**: Response builder bound to an output sink
//! - **`writer`**: Serializes a response to bytes
//! - **`mime`**: MIME type detection based on file extensions
//! - **`content`**: Content lookup for forwarded paths
//! - **`connection`**: The per-connection state machine
//!
//! # Data flow
//!
//! ```text
//!   byte stream
//!       │
//!       ▼
//!   reader ──▶ parser (request line, headers, body)
//!                 │
//!                 ├─▶ params, cookie
//!                 ▼
//!              Request ──▶ session store (lazy)
//!                 │
//!                 ▼
//!              handler ──▶ Response ──▶ writer ──▶ byte sink
//! ```
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Parse one request
//!        └──────┬──────┘
//!               ├─ parsed ──────▶ Processing ─┐ handler writes response
//!               └─ parse error ─▶ Rejecting  ─┤ 400 Bad Request
//!                                             ▼
//!                                          Closed
//! ```

pub mod connection;
pub mod content;
pub mod cookie;
pub mod mime;
pub mod params;
pub mod parser;
pub mod reader;
pub mod request;
pub mod response;
pub mod session;
pub mod writer;
