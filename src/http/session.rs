//! Server-side sessions correlated to clients by cookie.
//!
//! A [`SessionStore`] owns sessions keyed by id; requests only borrow them
//! through [`Request::session`](crate::http::request::Request::session).
//! [`MemorySessionStore`] is the in-process store, safe to share between
//! connection threads.

use std::any::Any;
use std::sync::Arc;
use std::time::SystemTime;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use thiserror::Error;
use uuid::Uuid;

/// Cookie carrying the session id.
pub const SESSION_COOKIE_NAME: &str = "JSESSIONID";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// A session was requested but the server runs without a session store.
    #[error("sessions are disabled: no session store configured")]
    FeatureDisabled,
}

type Attribute = Arc<dyn Any + Send + Sync>;

/// Server-side state for one client.
pub struct Session {
    id: String,
    created_at: SystemTime,
    attributes: DashMap<String, Attribute>,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            created_at: SystemTime::now(),
            attributes: DashMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> SystemTime {
        self.created_at
    }

    /// Stores `value` under `name`, replacing any previous value.
    pub fn set_attribute<T: Any + Send + Sync>(&self, name: impl Into<String>, value: T) {
        self.attributes.insert(name.into(), Arc::new(value));
    }

    /// Returns the attribute stored under `name` if it has type `T`.
    pub fn attribute<T: Any + Send + Sync>(&self, name: &str) -> Option<Arc<T>> {
        let value = self.attributes.get(name)?.value().clone();
        value.downcast::<T>().ok()
    }

    pub fn remove_attribute(&self, name: &str) -> bool {
        self.attributes.remove(name).is_some()
    }

    pub fn attribute_names(&self) -> Vec<String> {
        self.attributes.iter().map(|e| e.key().clone()).collect()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("created_at", &self.created_at)
            .field("attributes", &self.attribute_names())
            .finish()
    }
}

/// Session storage shared by every connection.
///
/// Implementations must tolerate concurrent `get` and `create` calls.
pub trait SessionStore: Send + Sync {
    fn get(&self, id: &str) -> Option<Arc<Session>>;

    /// Registers a new, empty session under a fresh unique id.
    fn create(&self) -> Arc<Session>;

    fn remove(&self, id: &str) -> Option<Arc<Session>>;
}

/// In-memory store backed by a sharded concurrent map.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: DashMap<String, Arc<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, id: &str) -> Option<Arc<Session>> {
        self.sessions.get(id).map(|entry| Arc::clone(entry.value()))
    }

    fn create(&self) -> Arc<Session> {
        loop {
            let id = Uuid::new_v4().to_string();
            if let Entry::Vacant(slot) = self.sessions.entry(id.clone()) {
                let session = Arc::new(Session::new(id));
                slot.insert(Arc::clone(&session));
                return session;
            }
        }
    }

    fn remove(&self, id: &str) -> Option<Arc<Session>> {
        self.sessions.remove(id).map(|(_, session)| session)
    }
}
