use crate::http::response::StatusCode;

/// Request methods as classified by the parser.
///
/// Only GET and HEAD are served. Every other token (and a request line that
/// could not be read at all) ends up as `Invalid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Unparseable request or unsupported verb
    Invalid,
    /// HEAD - Like GET but without the response body
    Head,
    /// GET - Retrieve a resource
    Get,
}

impl Method {
    /// Parses a method token. Case-sensitive.
    ///
    /// # Example
    ///
    /// ```
    /// # use staticd::http::request::Method;
    /// assert_eq!(Method::from_token("GET"), Method::Get);
    /// assert_eq!(Method::from_token("get"), Method::Invalid);
    /// ```
    pub fn from_token(s: &str) -> Self {
        match s {
            "GET" => Method::Get,
            "HEAD" => Method::Head,
            _ => Method::Invalid,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Invalid => "INVALID",
            Method::Head => "HEAD",
            Method::Get => "GET",
        }
    }
}

/// The classified result of parsing one request.
///
/// Built once by the parser, consumed by the response builder, then dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOutcome {
    pub method: Method,
    /// Drives the framing of the response.
    pub status: StatusCode,
    /// Whether the connection closes after the response is written.
    pub should_close: bool,
    /// Resource identifier relative to the document root. Empty when
    /// `method` is `Invalid`.
    pub path: String,
}

impl RequestOutcome {
    /// 400 for a request line that could not be parsed.
    pub fn bad_request() -> Self {
        Self::invalid(StatusCode::BadRequest)
    }

    /// 405 for a well-formed request with an unsupported verb.
    pub fn method_not_allowed() -> Self {
        Self::invalid(StatusCode::MethodNotAllowed)
    }

    /// 404; error responses always close the connection.
    pub fn not_found(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            status: StatusCode::NotFound,
            should_close: true,
            path: path.into(),
        }
    }

    pub fn ok(method: Method, path: impl Into<String>, should_close: bool) -> Self {
        Self {
            method,
            status: StatusCode::Ok,
            should_close,
            path: path.into(),
        }
    }

    fn invalid(status: StatusCode) -> Self {
        Self {
            method: Method::Invalid,
            status,
            should_close: true,
            path: String::new(),
        }
    }

    /// HEAD responses never carry a body.
    pub fn includes_body(&self) -> bool {
        self.method != Method::Head
    }
}
