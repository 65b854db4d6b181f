use crate::http::request::{Method, RequestOutcome};
use crate::resource::ResourceResolver;

/// Served when the request path is `/`.
pub const INDEX_FILE: &str = "index.html";

const CONNECTION_PREFIX: &str = "Connection: ";

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    /// No request line, a missing token, or bytes that are not UTF-8.
    InvalidRequest,
    /// The method token is neither GET nor HEAD.
    InvalidMethod,
}

/// The syntactic part of a request header block.
#[derive(Debug, PartialEq, Eq)]
pub struct RequestHead {
    pub method: Method,
    /// Relative resource identifier, `/` already mapped to `index.html`.
    pub path: String,
    /// The client sent `Connection: close`.
    pub close_requested: bool,
}

/// Parses a header block (terminator included) without looking at the
/// filesystem.
pub fn parse_request_head(buf: &[u8]) -> Result<RequestHead, ParseError> {
    let text = std::str::from_utf8(buf).map_err(|_| ParseError::InvalidRequest)?;
    let text = text.strip_prefix("\r\n").unwrap_or(text);

    let mut lines = text.split("\r\n");

    let request_line = lines
        .next()
        .filter(|l| !l.is_empty())
        .ok_or(ParseError::InvalidRequest)?;
    // Single spaces only; a doubled space yields an empty token.
    let mut parts = request_line.split(' ');
    let mut token = || parts.next().filter(|t| !t.is_empty());

    let method = match token() {
        Some(t) => Method::from_token(t),
        None => return Err(ParseError::InvalidRequest),
    };
    if method == Method::Invalid {
        return Err(ParseError::InvalidMethod);
    }

    let target = token().ok_or(ParseError::InvalidRequest)?;
    let path = if target == "/" {
        INDEX_FILE.to_string()
    } else {
        target.strip_prefix('/').unwrap_or(target).to_string()
    };

    let close_requested = lines
        .filter_map(|line| line.strip_prefix(CONNECTION_PREFIX))
        .any(|value| value == "close");

    Ok(RequestHead {
        method,
        path,
        close_requested,
    })
}

/// Classifies a header block into a [`RequestOutcome`].
///
/// Never fails: malformed input becomes a 400 or 405 outcome, a missing
/// resource a 404. Only an existing resource honours `Connection: close`;
/// every other outcome closes anyway.
pub async fn parse_request<R>(buf: &[u8], resolver: &R) -> RequestOutcome
where
    R: ResourceResolver,
{
    let head = match parse_request_head(buf) {
        Ok(head) => head,
        Err(ParseError::InvalidMethod) => return RequestOutcome::method_not_allowed(),
        Err(ParseError::InvalidRequest) => return RequestOutcome::bad_request(),
    };

    if !resolver.exists(&head.path).await {
        return RequestOutcome::not_found(head.method, head.path);
    }

    RequestOutcome::ok(head.method, head.path, head.close_requested)
}
