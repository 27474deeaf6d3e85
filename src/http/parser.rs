use crate::http::buffer::ByteBuffer;
use crate::http::request::{Body, Method, Request};
use std::collections::HashMap;
use thiserror::Error;

const CRLF: &[u8] = b"\r\n";
const SEPARATOR: &[u8] = b"\r\n\r\n";
const HTTP_VERSION: &str = "HTTP/1.1";

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
const JSON: &str = "application/json";

/// Largest request line plus header block the parser will buffer.
pub const MAX_HEAD_SIZE: usize = 64 * 1024;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid request line: {line:?}")]
    InvalidRequestLine { line: String },

    #[error("{method} method not supported")]
    UnsupportedMethod { method: String },

    #[error("invalid header line: {line:?}")]
    InvalidHeader { line: String },

    #[error("invalid content-length: {value:?}")]
    InvalidContentLength { value: String },

    #[error("unsupported transfer-encoding: {encoding}")]
    UnsupportedTransferEncoding { encoding: String },

    #[error("request head exceeds {max_size} bytes")]
    HeadTooLarge { max_size: usize },

    #[error("body exceeds declared content-length of {expected} bytes")]
    BodyTooLong { expected: usize },

    #[error("request head is not valid utf-8")]
    InvalidEncoding,

    #[error("invalid json body: {source}")]
    InvalidJson {
        #[from]
        source: serde_json::Error,
    },
}

/// Advances `request` with whatever `buffer` currently holds.
///
/// Meant to be called again every time more bytes are appended to `buffer`.
/// Each phase (request line, headers, body) runs once, as soon as the bytes
/// it needs are present, and removes what it consumed from the buffer. A
/// call that cannot advance any phase leaves both arguments untouched.
pub fn parse_into(request: &mut Request, buffer: &mut ByteBuffer) -> Result<(), ParseError> {
    if request.finished {
        return Ok(());
    }

    if !request.has_request_line() {
        let Some(end) = buffer.find(CRLF) else {
            return check_head_size(buffer);
        };
        parse_request_line(request, &buffer.as_bytes()[..end])?;
        buffer.discard(end + CRLF.len());
    }

    if !request.has_headers() {
        let Some((end, marker_len)) = find_headers_end(buffer) else {
            return check_head_size(buffer);
        };
        parse_headers(request, &buffer.as_bytes()[..end])?;
        buffer.discard(end + marker_len);
        request.headers_done = true;

        if !has_body(request)? {
            request.finished = true;
            return Ok(());
        }
    }

    parse_body(request, buffer)
}

fn check_head_size(buffer: &ByteBuffer) -> Result<(), ParseError> {
    if buffer.len() > MAX_HEAD_SIZE {
        return Err(ParseError::HeadTooLarge {
            max_size: MAX_HEAD_SIZE,
        });
    }
    Ok(())
}

/// Locates the end of the header block. An empty block is just the CRLF
/// that follows the request line.
fn find_headers_end(buffer: &ByteBuffer) -> Option<(usize, usize)> {
    if buffer.starts_with(CRLF) {
        return Some((0, CRLF.len()));
    }
    buffer.find(SEPARATOR).map(|end| (end, SEPARATOR.len()))
}

fn parse_request_line(request: &mut Request, line: &[u8]) -> Result<(), ParseError> {
    let line = std::str::from_utf8(line).map_err(|_| ParseError::InvalidEncoding)?;
    let invalid = || ParseError::InvalidRequestLine {
        line: line.to_string(),
    };

    let mut parts = line.split(' ');
    let (Some(method), Some(target), Some(version), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };

    if method.is_empty() || !target.starts_with('/') || !version.eq_ignore_ascii_case(HTTP_VERSION) {
        return Err(invalid());
    }

    let method = Method::parse(method).ok_or_else(|| ParseError::UnsupportedMethod {
        method: method.to_ascii_uppercase(),
    })?;

    let target = target.split('#').next().unwrap_or(target);
    let (path, query) = target.split_once('?').unwrap_or((target, ""));

    request.method = Some(method);
    request.path = path.to_string();
    request.query_params = decode_pairs(query.as_bytes());
    Ok(())
}

fn parse_headers(request: &mut Request, head: &[u8]) -> Result<(), ParseError> {
    let head = std::str::from_utf8(head).map_err(|_| ParseError::InvalidEncoding)?;

    let mut headers = HashMap::new();
    for line in head.split("\r\n").filter(|l| !l.is_empty()) {
        let (name, value) = line.split_once(':').ok_or_else(|| ParseError::InvalidHeader {
            line: line.to_string(),
        })?;

        let name = name.trim();
        if name.is_empty() {
            return Err(ParseError::InvalidHeader {
                line: line.to_string(),
            });
        }

        headers.insert(name.to_ascii_lowercase(), value.trim().to_string());
    }

    request.headers = headers;
    Ok(())
}

fn has_body(request: &Request) -> Result<bool, ParseError> {
    if let Some(encoding) = request.header("transfer-encoding") {
        if !encoding.eq_ignore_ascii_case("identity") {
            return Err(ParseError::UnsupportedTransferEncoding {
                encoding: encoding.to_string(),
            });
        }
    }

    match request.content_length() {
        None => Ok(false),
        Some(Ok(_)) => Ok(true),
        Some(Err(_)) => Err(ParseError::InvalidContentLength {
            value: request.header("content-length").unwrap_or_default().to_string(),
        }),
    }
}

fn parse_body(request: &mut Request, buffer: &mut ByteBuffer) -> Result<(), ParseError> {
    let expected = match request.content_length() {
        Some(Ok(n)) => n,
        _ => return Ok(()),
    };

    if buffer.len() < expected {
        return Ok(());
    }
    if buffer.len() > expected {
        return Err(ParseError::BodyTooLong { expected });
    }

    let raw = buffer.consume(expected).to_vec();
    buffer.clear();

    request.body = decode_body(request.content_type(), &raw)?;
    request.body_raw = Some(raw);
    request.finished = true;
    Ok(())
}

/// Picks a decoder by media type. Requests without a content-type are
/// treated as form-encoded; unknown types are left undecoded.
fn decode_body(content_type: Option<&str>, raw: &[u8]) -> Result<Option<Body>, ParseError> {
    let content_type = content_type.unwrap_or(FORM_URLENCODED);

    if content_type.eq_ignore_ascii_case(FORM_URLENCODED) {
        Ok(Some(Body::Form(decode_pairs(raw))))
    } else if content_type.eq_ignore_ascii_case(JSON) {
        Ok(Some(Body::Json(serde_json::from_slice(raw)?)))
    } else {
        Ok(None)
    }
}

/// Decodes `a=1&a=2&b=3` into `{a: [1, 2], b: [3]}`. Pairs with an empty
/// value are dropped.
fn decode_pairs(input: &[u8]) -> HashMap<String, Vec<String>> {
    let mut pairs: HashMap<String, Vec<String>> = HashMap::new();
    for (name, value) in url::form_urlencoded::parse(input) {
        if value.is_empty() {
            continue;
        }
        pairs
            .entry(name.into_owned())
            .or_default()
            .push(value.into_owned());
    }
    pairs
}
