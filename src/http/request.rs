use std::collections::HashMap;
use std::fmt;

/// HTTP request methods accepted by the server.
///
/// Anything else on the request line is rejected with 400 Bad Request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Submit data
    POST,
}

impl Method {
    /// Parses an HTTP method token, ignoring ASCII case.
    ///
    /// # Example
    ///
    /// ```
    /// # use hearth::http::request::Method;
    /// assert_eq!(Method::parse("gEt"), Some(Method::GET));
    /// assert_eq!(Method::parse("PUT"), None);
    /// ```
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_str() {
            "GET" => Some(Method::GET),
            "POST" => Some(Method::POST),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decoded request body. Which variant is produced depends on `content-type`.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// `application/x-www-form-urlencoded`: name to ordered values.
    Form(HashMap<String, Vec<String>>),
    /// `application/json`
    Json(serde_json::Value),
}

/// An HTTP request as it is assembled by the parser.
///
/// A connection owns exactly one `Request` per exchange. The parser fills it
/// in phase by phase; once `finished` is set it is handed to the router and
/// not touched by the parser again.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Request {
    /// Set once the request line has been parsed.
    pub method: Option<Method>,
    /// URL path without query string or fragment.
    pub path: String,
    pub query_params: HashMap<String, Vec<String>>,
    /// Filled by the router from the matched path template.
    pub path_params: HashMap<String, String>,
    /// Header names are lower-cased; a repeated header keeps its last value.
    pub headers: HashMap<String, String>,
    pub body_raw: Option<Vec<u8>>,
    pub body: Option<Body>,
    pub finished: bool,
    pub(crate) headers_done: bool,
}

impl Request {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a header by name, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(|v| v.as_str())
    }

    /// Whether the request line has been consumed.
    pub fn has_request_line(&self) -> bool {
        self.method.is_some()
    }

    /// Whether the header block has been consumed.
    pub fn has_headers(&self) -> bool {
        self.headers_done
    }

    /// Declared body length, or `None` when the request carries no body.
    ///
    /// An unparsable value is reported as `Some(Err(..))` so the parser can
    /// reject it.
    pub fn content_length(&self) -> Option<Result<usize, std::num::ParseIntError>> {
        self.header("content-length").map(|v| v.parse::<usize>())
    }

    /// Media type of the body with any parameters (`; charset=...`) removed.
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
            .map(|v| v.split(';').next().unwrap_or(v).trim())
    }

    /// First value of a query parameter.
    pub fn query(&self, name: &str) -> Option<&str> {
        self.query_params
            .get(name)
            .and_then(|values| values.first())
            .map(|v| v.as_str())
    }

    /// First value of a form field, when the body was form-encoded.
    pub fn form(&self, name: &str) -> Option<&str> {
        match &self.body {
            Some(Body::Form(fields)) => fields
                .get(name)
                .and_then(|values| values.first())
                .map(|v| v.as_str()),
            _ => None,
        }
    }

    pub fn path_param(&self, name: &str) -> Option<&str> {
        self.path_params.get(name).map(|v| v.as_str())
    }
}
