use std::io::Cursor;

use bytes::Bytes;
use webcore::http::parser::parse_http_request;
use webcore::http::request::{Header, Headers, Method, Request, RequestLine};

fn request(raw: &str) -> Request {
    parse_http_request(&mut Cursor::new(raw.as_bytes()), None).unwrap()
}

#[test]
fn test_request_header_retrieval() {
    let req = request("GET / HTTP/1.1\r\nHost: example.com\r\nContent-Type: application/json\r\n\r\n");

    assert_eq!(req.header("Host"), Some("example.com"));
    assert_eq!(req.header("Content-Type"), Some("application/json"));
    assert_eq!(req.header("Missing"), None);
}

#[test]
fn test_request_header_lookup_case_insensitive() {
    let req = request("POST /a HTTP/1.1\r\ncontent-length: 5\r\n\r\nx=abc");

    assert_eq!(req.header("Content-Length"), Some("5"));
    assert_eq!(req.content_length(), 5);
}

#[test]
fn test_request_duplicate_headers_last_wins() {
    let req = request("GET / HTTP/1.1\r\nAccept: text/html\r\nAccept: application/json\r\n\r\n");

    assert_eq!(req.header("accept"), Some("application/json"));
    let all: Vec<&str> = req.headers().get_all("Accept").collect();
    assert_eq!(all, vec!["text/html", "application/json"]);
    assert_eq!(req.headers().len(), 2);
}

#[test]
fn test_request_headers_keep_arrival_order_and_case() {
    let req = request("GET / HTTP/1.1\r\nX-B: 2\r\nx-a: 1\r\n\r\n");

    let keys: Vec<&str> = req.headers().iter().map(|h| h.key.as_str()).collect();
    assert_eq!(keys, vec!["X-B", "x-a"]);
}

#[test]
fn test_request_content_length_missing() {
    let req = request("GET / HTTP/1.1\r\n\r\n");

    assert_eq!(req.content_length(), 0);
}

#[test]
fn test_request_query_params() {
    let req = request("GET /user/create?userId=javajigi&password=password HTTP/1.1\r\n\r\n");

    assert_eq!(req.path(), "/user/create");
    assert_eq!(req.param("userId"), Some("javajigi"));
    assert_eq!(req.param("password"), Some("password"));
    assert_eq!(req.param("missing"), None);
}

#[test]
fn test_request_query_parsing_is_idempotent() {
    let first = request("GET /?a=1&b=2 HTTP/1.1\r\n\r\n");
    let second = request("GET /?a=1&b=2 HTTP/1.1\r\n\r\n");

    assert_eq!(first.params().len(), 2);
    assert_eq!(first.param("a"), Some("1"));
    assert_eq!(first.param("b"), Some("2"));
    assert_eq!(first.params(), second.params());
}

#[test]
fn test_request_query_pair_without_value() {
    let req = request("GET /?debug&page=3 HTTP/1.1\r\n\r\n");

    assert_eq!(req.param("debug"), Some(""));
    assert_eq!(req.param("page"), Some("3"));
}

#[test]
fn test_request_body_params_override_query() {
    let req = request("POST /form?x=1&y=q HTTP/1.1\r\nContent-Length: 7\r\n\r\nx=2&z=3");

    assert_eq!(req.param("x"), Some("2"));
    assert_eq!(req.param("y"), Some("q"));
    assert_eq!(req.param("z"), Some("3"));
}

#[test]
fn test_request_form_body_with_content_type() {
    let body = "userId=javajigi&name=Jae+Sung";
    let raw = format!(
        "POST /user/create HTTP/1.1\r\nContent-Type: application/x-www-form-urlencoded\r\nContent-Length: {}\r\n\r\n{}",
        body.len(),
        body
    );
    let req = request(&raw);

    assert_eq!(req.param("userId"), Some("javajigi"));
    assert_eq!(req.param("name"), Some("Jae Sung"));
}

#[test]
fn test_request_json_body_is_not_decoded_as_params() {
    let body = r#"{"a":"1"}"#;
    let raw = format!(
        "POST /api HTTP/1.1\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
        body.len(),
        body
    );
    let req = request(&raw);

    assert!(req.params().is_empty());
    assert_eq!(req.body_text(), body);
}

#[test]
fn test_request_put_body_is_not_decoded_as_params() {
    let req = request("PUT /item?x=1 HTTP/1.1\r\nContent-Length: 3\r\n\r\nx=2");

    assert_eq!(req.param("x"), Some("1"));
    assert_eq!(req.body().as_ref(), b"x=2");
}

#[test]
fn test_request_cookies_from_header() {
    let req = request("GET / HTTP/1.1\r\nCookie: logined=true; theme=dark\r\n\r\n");

    assert_eq!(req.cookie("logined"), Some("true"));
    assert_eq!(req.cookie("theme"), Some("dark"));
    assert_eq!(req.cookies().len(), 2);
}

#[test]
fn test_request_built_directly() {
    let line = RequestLine::new(Method::GET, "/index.html?lang=en", "HTTP/1.1");
    let headers: Headers = vec![Header::new("Host", "localhost")].into_iter().collect();

    let req = Request::new(line, headers, Bytes::new(), None);

    assert_eq!(req.raw_uri(), "/index.html?lang=en");
    assert_eq!(req.path(), "/index.html");
    assert_eq!(req.param("lang"), Some("en"));
    assert_eq!(req.request_line().to_string(), "GET /index.html?lang=en HTTP/1.1");
}

#[test]
fn test_request_shared_across_threads() {
    let req = std::sync::Arc::new(request("GET /?a=1 HTTP/1.1\r\n\r\n"));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let req = req.clone();
            std::thread::spawn(move || req.param("a").map(str::to_string))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().as_deref(), Some("1"));
    }
}

#[test]
fn test_request_method_from_string() {
    assert_eq!("GET".parse::<Method>().ok(), Some(Method::GET));
    assert_eq!("POST".parse::<Method>().ok(), Some(Method::POST));
    assert!("INVALID".parse::<Method>().is_err());
    assert!("get".parse::<Method>().is_err()); // Case-sensitive
    assert_eq!(Method::DELETE.to_string(), "DELETE");
}
