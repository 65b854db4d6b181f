use anyhow::Context;

use crate::http::request::RequestOutcome;
use crate::resource::ResourceResolver;

/// The only content type this server emits.
pub const CONTENT_TYPE: &str = "text/html";

/// Rendered for every error response; `{code}` and `{reason}` are substituted.
pub const ERROR_PAGE_TEMPLATE: &str = "<!DOCTYPE html>\n\
<html>\n\
<head><title>{code} {reason}</title></head>\n\
<body>\n\
<h1>{code} {reason}</h1>\n\
</body>\n\
</html>\n";

/// HTTP status codes the server can answer with.
///
/// - `Ok` (200): Resource served
/// - `BadRequest` (400): Request line could not be parsed
/// - `NotFound` (404): Resource does not exist
/// - `MethodNotAllowed` (405): Verb other than GET or HEAD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
    /// 405 Method Not Allowed
    MethodNotAllowed,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use staticd::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::MethodNotAllowed => 405,
        }
    }

    /// Reason phrase as it appears on the wire. Error reasons are upper case.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "BAD REQUEST",
            StatusCode::NotFound => "NOT FOUND",
            StatusCode::MethodNotAllowed => "METHOD NOT ALLOWED",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, StatusCode::Ok)
    }
}

/// Renders the error page for `status`.
pub fn render_error_page(status: StatusCode) -> String {
    ERROR_PAGE_TEMPLATE
        .replace("{code}", &status.as_u16().to_string())
        .replace("{reason}", status.reason_phrase())
}

/// A complete HTTP response ready to be serialized.
///
/// Headers keep insertion order. `Content-Length` may describe a body that
/// is not sent (HEAD).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: StatusCode,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```
/// # use staticd::http::response::{ResponseBuilder, StatusCode};
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .header("Content-Type", "text/html")
///     .body(b"<p>hi</p>".to_vec())
///     .build();
/// assert_eq!(response.header("Content-Length"), Some("9"));
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl ResponseBuilder {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Adds or replaces a header, keeping its original position on replace.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let (key, value) = (key.into(), value.into());
        match self.headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(&key)) {
            Some(slot) => slot.1 = value,
            None => self.headers.push((key, value)),
        }
        self
    }

    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Builds the final Response.
    ///
    /// Appends `Content-Length` from the body size unless one was set.
    pub fn build(mut self) -> Response {
        let has_length = self
            .headers
            .iter()
            .any(|(k, _)| k.eq_ignore_ascii_case("Content-Length"));
        if !has_length {
            self.headers
                .push(("Content-Length".to_string(), self.body.len().to_string()));
        }

        Response {
            status: self.status,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Response {
    /// Builds the response for a classified request.
    ///
    /// Fails only when the resource cannot be read after it was reported to
    /// exist.
    pub async fn for_outcome<R>(outcome: &RequestOutcome, resolver: &R) -> anyhow::Result<Self>
    where
        R: ResourceResolver,
    {
        if outcome.status.is_success() {
            let contents = resolver
                .open(&outcome.path)
                .await
                .with_context(|| format!("failed to open {}", outcome.path))?;
            Ok(Self::file(contents, outcome.includes_body(), outcome.should_close))
        } else {
            Ok(Self::error(outcome.status, outcome.includes_body()))
        }
    }

    /// 200 carrying (or, for HEAD, describing) `contents`.
    pub fn file(contents: Vec<u8>, include_body: bool, close: bool) -> Self {
        let mut builder = ResponseBuilder::new(StatusCode::Ok)
            .header("Content-Type", CONTENT_TYPE)
            .header("Content-Length", contents.len().to_string());
        if close {
            builder = builder.header("Connection", "close");
        }
        if include_body {
            builder = builder.body(contents);
        }
        builder.build()
    }

    /// Error page for `status`. The length of the rendered page is reported
    /// even when the body is left out.
    pub fn error(status: StatusCode, include_body: bool) -> Self {
        let page = render_error_page(status);
        let builder = ResponseBuilder::new(status)
            .header("Content-Type", CONTENT_TYPE)
            .header("Content-Length", page.len().to_string())
            .header("Connection", "close");
        if include_body {
            builder.body(page.into_bytes()).build()
        } else {
            builder.build()
        }
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}
