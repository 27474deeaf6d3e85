use std::collections::HashMap;

/// HTTP status codes the server knows how to send.
///
/// The set is closed: every variant has a reason phrase, and there is no way
/// to build a response with a code outside this table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 204 No Content
    NoContent,
    /// 301 Moved Permanently
    MovedPermanently,
    /// 302 Found
    Found,
    /// 304 Not Modified
    NotModified,
    /// 400 Bad Request
    BadRequest,
    /// 401 Unauthorized
    Unauthorized,
    /// 403 Forbidden
    Forbidden,
    /// 404 Not Found
    NotFound,
    /// 451 Unavailable For Legal Reasons
    UnavailableForLegalReasons,
    /// 500 Internal Server Error
    InternalServerError,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use hearth::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::NoContent => 204,
            StatusCode::MovedPermanently => 301,
            StatusCode::Found => 302,
            StatusCode::NotModified => 304,
            StatusCode::BadRequest => 400,
            StatusCode::Unauthorized => 401,
            StatusCode::Forbidden => 403,
            StatusCode::NotFound => 404,
            StatusCode::UnavailableForLegalReasons => 451,
            StatusCode::InternalServerError => 500,
        }
    }

    /// Looks a numeric code up in the table.
    ///
    /// ```
    /// # use hearth::http::response::StatusCode;
    /// assert_eq!(StatusCode::from_u16(302), Some(StatusCode::Found));
    /// assert_eq!(StatusCode::from_u16(418), None);
    /// ```
    pub fn from_u16(code: u16) -> Option<Self> {
        let status = match code {
            200 => StatusCode::Ok,
            204 => StatusCode::NoContent,
            301 => StatusCode::MovedPermanently,
            302 => StatusCode::Found,
            304 => StatusCode::NotModified,
            400 => StatusCode::BadRequest,
            401 => StatusCode::Unauthorized,
            403 => StatusCode::Forbidden,
            404 => StatusCode::NotFound,
            451 => StatusCode::UnavailableForLegalReasons,
            500 => StatusCode::InternalServerError,
            _ => return None,
        };
        Some(status)
    }

    /// Returns the reason phrase sent on the status line.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::NoContent => "No Content",
            StatusCode::MovedPermanently => "Moved Permanently",
            StatusCode::Found => "Found",
            StatusCode::NotModified => "Not Modified",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::Unauthorized => "Unauthorized",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "Not Found",
            StatusCode::UnavailableForLegalReasons => "Unavailable For Legal Reasons",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }
}

/// Content type used when the handler does not set one.
pub const DEFAULT_CONTENT_TYPE: &str = "text/html";

/// An HTTP response ready to be serialized.
///
/// Header names are stored lower-cased. `Content-Length` is not stored at
/// all; the writer computes it from `body` at serialization time.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```
/// # use hearth::http::response::{ResponseBuilder, StatusCode};
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .header("Content-Type", "application/json")
///     .body("{}")
///     .build();
/// assert_eq!(response.header("content-type"), Some("application/json"));
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    headers: HashMap<String, String>,
    body: Vec<u8>,
}

impl ResponseBuilder {
    pub fn new(status: StatusCode) -> Self {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), DEFAULT_CONTENT_TYPE.to_string());
        Self {
            status,
            headers,
            body: Vec::new(),
        }
    }

    /// Adds or replaces a header. Names are case-insensitive.
    pub fn header(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .insert(key.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn build(self) -> Response {
        Response {
            status: self.status,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Response {
    pub fn new(status: StatusCode) -> ResponseBuilder {
        ResponseBuilder::new(status)
    }

    /// Creates a 200 OK response with the given body.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        ResponseBuilder::new(StatusCode::Ok).body(body).build()
    }

    /// Minimal reply for an error status: the body is the reason phrase.
    pub fn error(status: StatusCode) -> Self {
        ResponseBuilder::new(status)
            .body(status.reason_phrase())
            .build()
    }

    pub fn set_header(&mut self, key: impl AsRef<str>, value: impl Into<String>) {
        self.headers
            .insert(key.as_ref().to_ascii_lowercase(), value.into());
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .get(&key.to_ascii_lowercase())
            .map(|v| v.as_str())
    }

    /// Serializes the response, status line through body.
    pub fn to_bytes(&self) -> Vec<u8> {
        crate::http::writer::serialize_response(self)
    }
}

/// What a handler hands back: either a complete response, or a plain body
/// that is sent as 200 OK.
#[derive(Debug, Clone, PartialEq)]
pub enum HandlerResult {
    Response(Response),
    Body(Vec<u8>),
}

impl HandlerResult {
    pub fn into_response(self) -> Response {
        match self {
            HandlerResult::Response(response) => response,
            HandlerResult::Body(body) => Response::ok(body),
        }
    }
}

impl From<Response> for HandlerResult {
    fn from(response: Response) -> Self {
        HandlerResult::Response(response)
    }
}

impl From<String> for HandlerResult {
    fn from(body: String) -> Self {
        HandlerResult::Body(body.into_bytes())
    }
}

impl From<&'static str> for HandlerResult {
    fn from(body: &'static str) -> Self {
        HandlerResult::Body(body.as_bytes().to_vec())
    }
}

impl From<Vec<u8>> for HandlerResult {
    fn from(body: Vec<u8>) -> Self {
        HandlerResult::Body(body)
    }
}
