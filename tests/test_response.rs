use hearth::http::response::{HandlerResult, Response, ResponseBuilder, StatusCode};
use hearth::http::writer::serialize_response;

fn split_head_body(bytes: &[u8]) -> (String, Vec<u8>) {
    let pos = bytes
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("no header terminator");
    (
        String::from_utf8(bytes[..pos].to_vec()).unwrap(),
        bytes[pos + 4..].to_vec(),
    )
}

#[test]
fn test_status_code_table() {
    let table = [
        (200, "OK"),
        (204, "No Content"),
        (301, "Moved Permanently"),
        (302, "Found"),
        (304, "Not Modified"),
        (400, "Bad Request"),
        (401, "Unauthorized"),
        (403, "Forbidden"),
        (404, "Not Found"),
        (451, "Unavailable For Legal Reasons"),
        (500, "Internal Server Error"),
    ];

    for (code, reason) in table {
        let status = StatusCode::from_u16(code).unwrap();
        assert_eq!(status.as_u16(), code);
        assert_eq!(status.reason_phrase(), reason);
    }
}

#[test]
fn test_status_code_outside_table() {
    assert_eq!(StatusCode::from_u16(201), None);
    assert_eq!(StatusCode::from_u16(418), None);
    assert_eq!(StatusCode::from_u16(503), None);
}

#[test]
fn test_response_builder_defaults_content_type() {
    let response = ResponseBuilder::new(StatusCode::Ok).body("hi").build();

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.header("Content-Type"), Some("text/html"));
    assert_eq!(response.body, b"hi".to_vec());
}

#[test]
fn test_response_builder_headers_case_insensitive() {
    let response = Response::new(StatusCode::Ok)
        .header("Content-Type", "text/plain")
        .header("X-Custom", "value")
        .build();

    assert_eq!(response.headers.len(), 2);
    assert_eq!(response.header("content-type"), Some("text/plain"));
    assert_eq!(response.header("x-custom"), Some("value"));
}

#[test]
fn test_response_set_header() {
    let mut response = Response::ok("x");
    response.set_header("Cache-Control", "no-cache");

    assert_eq!(response.header("cache-control"), Some("no-cache"));
}

#[test]
fn test_serialize_exact_bytes() {
    let bytes = Response::ok("Welcome bob").to_bytes();

    assert_eq!(
        bytes,
        b"HTTP/1.1 200 OK\r\ncontent-type: text/html\r\nContent-Length: 11\r\n\r\nWelcome bob".to_vec()
    );
}

#[test]
fn test_serialize_content_length_matches_body() {
    let body = "<b>Response</b> with ünïcode".as_bytes().to_vec();
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("X-One", "1")
        .body(body.clone())
        .build();

    let (head, recovered) = split_head_body(&serialize_response(&response));

    assert!(head.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(head.contains(&format!("Content-Length: {}", body.len())));
    assert!(head.contains("x-one: 1"));
    assert_eq!(recovered, body);
}

#[test]
fn test_serialize_ignores_stored_content_length() {
    let response = Response::new(StatusCode::Ok)
        .header("Content-Length", "999")
        .body("abc")
        .build();

    let (head, _) = split_head_body(&response.to_bytes());

    assert!(head.contains("Content-Length: 3"));
    assert!(!head.contains("999"));
}

#[test]
fn test_serialize_empty_body() {
    let response = Response::new(StatusCode::NoContent).build();
    let bytes = response.to_bytes();

    assert!(bytes.starts_with(b"HTTP/1.1 204 No Content\r\n"));
    assert!(bytes.ends_with(b"Content-Length: 0\r\n\r\n"));
}

#[test]
fn test_error_response_uses_reason_phrase() {
    let response = Response::error(StatusCode::NotFound);

    assert_eq!(response.status, StatusCode::NotFound);
    assert_eq!(response.body, b"Not Found".to_vec());
}

#[test]
fn test_handler_result_wraps_plain_values() {
    let from_str: HandlerResult = "plain".into();
    let response = from_str.into_response();
    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.body, b"plain".to_vec());

    let from_bytes: HandlerResult = vec![1u8, 2, 3].into();
    assert_eq!(from_bytes.into_response().body, vec![1, 2, 3]);
}

#[test]
fn test_handler_result_keeps_response() {
    let redirect = Response::new(StatusCode::Found)
        .header("Location", "/login")
        .build();

    let result: HandlerResult = redirect.clone().into();
    assert_eq!(result.into_response(), redirect);
}
