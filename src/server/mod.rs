//! Serving layer: accept loop, handlers and the shared per-server context.

pub mod handler;
pub mod listener;

use std::sync::Arc;

use crate::config::Config;
use crate::http::content::{ContentLoader, FileSystemLoader};
use crate::http::session::{MemorySessionStore, SessionStore};
use handler::{Handler, StaticFiles};

/// Everything a connection needs, shared by all connections.
#[derive(Clone)]
pub struct ServerContext {
    pub content: Arc<dyn ContentLoader>,
    /// `None` when sessions are disabled.
    pub sessions: Option<Arc<dyn SessionStore>>,
    pub handler: Arc<dyn Handler>,
}

impl ServerContext {
    /// Disk-backed content, an in-memory session store if enabled, and the
    /// static file handler.
    pub fn from_config(cfg: &Config) -> Self {
        let content = FileSystemLoader::new(&cfg.content.static_root, &cfg.content.template_root);

        let (sessions, handler): (Option<Arc<dyn SessionStore>>, StaticFiles) = if cfg.sessions.enabled {
            (Some(Arc::new(MemorySessionStore::new())), StaticFiles::new().with_sessions())
        } else {
            (None, StaticFiles::new())
        };

        Self {
            content: Arc::new(content),
            sessions,
            handler: Arc::new(handler),
        }
    }
}
