use std::io::Cursor;
use std::sync::Arc;
use std::thread;

use webcore::http::parser::parse_http_request;
use webcore::http::request::Request;
use webcore::http::session::{MemorySessionStore, Session, SessionError, SessionStore};

fn request_with(store: Option<Arc<dyn SessionStore>>, cookie: Option<&str>) -> Request {
    let raw = match cookie {
        Some(c) => format!("GET / HTTP/1.1\r\nCookie: {}\r\n\r\n", c),
        None => "GET / HTTP/1.1\r\n\r\n".to_string(),
    };
    parse_http_request(&mut Cursor::new(raw.into_bytes()), store).unwrap()
}

#[test]
fn test_session_without_store_fails_fast() {
    let req = request_with(None, None);

    assert_eq!(req.session(false).unwrap_err(), SessionError::FeatureDisabled);
    assert_eq!(req.session(true).unwrap_err(), SessionError::FeatureDisabled);
    assert!(req.session_or_create().is_err());
}

#[test]
fn test_session_absent_without_create() {
    let store = Arc::new(MemorySessionStore::new());
    let req = request_with(Some(store.clone()), Some("JSESSIONID=unknown"));

    assert!(req.session(false).unwrap().is_none());
    assert!(store.is_empty());
}

#[test]
fn test_session_created_and_registered() {
    let store = Arc::new(MemorySessionStore::new());
    let req = request_with(Some(store.clone()), None);

    let session = req.session(true).unwrap().unwrap();

    assert_eq!(store.len(), 1);
    let found = store.get(session.id()).unwrap();
    assert!(Arc::ptr_eq(&found, &session));
}

#[test]
fn test_session_found_by_cookie() {
    let store = Arc::new(MemorySessionStore::new());
    let existing = store.create();
    existing.set_attribute("user", "javajigi".to_string());

    let cookie = format!("theme=dark; JSESSIONID={}", existing.id());
    let req = request_with(Some(store.clone()), Some(&cookie));

    let session = req.session(false).unwrap().unwrap();
    assert_eq!(session.id(), existing.id());
    assert_eq!(
        session.attribute::<String>("user").as_deref().map(String::as_str),
        Some("javajigi")
    );

    let again = req.session_or_create().unwrap();
    assert!(Arc::ptr_eq(&again, &existing));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_session_attributes() {
    let session = Session::new("abc");

    session.set_attribute("count", 3u32);
    assert_eq!(session.attribute::<u32>("count").as_deref(), Some(&3));
    assert!(session.attribute::<String>("count").is_none());

    session.set_attribute("count", 4u32);
    assert_eq!(session.attribute::<u32>("count").as_deref(), Some(&4));
    assert_eq!(session.attribute_names(), vec!["count".to_string()]);

    assert!(session.remove_attribute("count"));
    assert!(!session.remove_attribute("count"));
    assert!(session.attribute::<u32>("count").is_none());
}

#[test]
fn test_session_ids_are_uuid_shaped_and_unique() {
    let store = MemorySessionStore::new();

    let a = store.create();
    let b = store.create();

    assert_ne!(a.id(), b.id());
    assert_eq!(a.id().len(), 36);
    assert_eq!(a.id().matches('-').count(), 4);
}

#[test]
fn test_session_remove() {
    let store = MemorySessionStore::new();
    let session = store.create();

    assert!(store.remove(session.id()).is_some());
    assert!(store.get(session.id()).is_none());
    assert!(store.remove(session.id()).is_none());
}

#[test]
fn test_session_store_concurrent_create_and_get() {
    let store = Arc::new(MemorySessionStore::new());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = store.clone();
            thread::spawn(move || {
                (0..50)
                    .map(|_| {
                        let session = store.create();
                        assert!(store.get(session.id()).is_some());
                        session.id().to_string()
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut ids: Vec<String> = handles.into_iter().flat_map(|h| h.join().unwrap()).collect();
    ids.sort();
    ids.dedup();

    assert_eq!(ids.len(), 400);
    assert_eq!(store.len(), 400);
}

#[test]
fn test_session_or_create_registers_new_session() {
    let store = Arc::new(MemorySessionStore::new());
    let req = request_with(Some(store.clone()), Some("JSESSIONID=stale"));

    let session = req.session_or_create().unwrap();

    assert_ne!(session.id(), "stale");
    assert_eq!(store.len(), 1);
    assert!(Arc::ptr_eq(&store.get(session.id()).unwrap(), &session));
}
