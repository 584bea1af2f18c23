use crate::http::error::HttpError;

/// HTTP status codes the server can answer with.
///
/// - `Ok` (200): Request successful
/// - `MovedPermanently` (301): Directory redirect
/// - `BadRequest` (400): Malformed request, or any internal failure
/// - `NotFound` (404): Static asset not found
/// - `MethodNotAllowed` (405): HTTP method not allowed on the route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 301 Moved Permanently
    MovedPermanently,
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
    /// # use roster::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::MovedPermanently => 301,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::MethodNotAllowed => 405,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use roster::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::MovedPermanently => "Moved Permanently",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
        }
    }
}

const BODY_400: &str = "\n<!doctype html>\n<h1>400 Bad request</h1>\n<p>Bad request.</p>";
const BODY_404: &str = "\n<!doctype html>\n<h1>404 Page not found</h1>\n<p>Page cannot be found.</p>";
const BODY_405: &str =
    "\n<!doctype html>\n<h1>405 Method not allowed</h1>\n<p>Method not allowed.</p>";

/// Represents a complete HTTP response ready to be sent to a client.
///
/// Headers keep insertion order. Every built response carries
/// `content-type`, an exact `content-length` and `connection: Close`.
#[derive(Debug)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// HTTP headers in emission order
    pub headers: Vec<(String, String)>,
    /// Response body as bytes
    pub body: Vec<u8>,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```
/// # use roster::http::response::{ResponseBuilder, StatusCode};
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .header("content-type", "application/json")
///     .body(b"[]".to_vec())
///     .build();
/// assert_eq!(response.header("content-length"), Some("2"));
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

fn set_header(headers: &mut Vec<(String, String)>, key: String, value: String) {
    match headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(&key)) {
        Some(slot) => slot.1 = value,
        None => headers.push((key, value)),
    }
}

impl ResponseBuilder {
    /// Creates a new response builder with the specified status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Adds or replaces a header (names compare case-insensitively).
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        set_header(&mut self.headers, key.into(), value.into());
        self
    }

    /// Sets the response body.
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Builds the final Response.
    ///
    /// `content-length` always reflects the body; a missing `content-type`
    /// defaults to `application/octet-stream`.
    pub fn build(mut self) -> Response {
        if !self.headers.iter().any(|(k, _)| k.eq_ignore_ascii_case("content-type")) {
            self.headers
                .insert(0, ("content-type".to_string(), "application/octet-stream".to_string()));
        }
        let len = self.body.len().to_string();
        set_header(&mut self.headers, "content-length".to_string(), len);
        set_header(&mut self.headers, "connection".to_string(), "Close".to_string());

        Response {
            status: self.status,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Response {
    /// Creates a 200 OK response with the given content type and body.
    pub fn ok(content_type: &str, body: impl Into<Vec<u8>>) -> Self {
        ResponseBuilder::new(StatusCode::Ok)
            .header("content-type", content_type)
            .body(body.into())
            .build()
    }

    /// Creates a 301 redirect to `location`.
    pub fn moved_permanently(location: impl Into<String>) -> Self {
        ResponseBuilder::new(StatusCode::MovedPermanently)
            .header("location", location)
            .header("content-type", "text/html")
            .build()
    }

    /// Canned 400 Bad Request response.
    pub fn bad_request() -> Self {
        Self::canned(StatusCode::BadRequest, BODY_400)
    }

    /// Canned 404 Not Found response.
    pub fn not_found() -> Self {
        Self::canned(StatusCode::NotFound, BODY_404)
    }

    /// Canned 405 Method Not Allowed response.
    pub fn method_not_allowed() -> Self {
        Self::canned(StatusCode::MethodNotAllowed, BODY_405)
    }

    /// Picks the canned response matching the error kind.
    pub fn from_error(error: &HttpError) -> Self {
        match error.status() {
            StatusCode::NotFound => Self::not_found(),
            StatusCode::MethodNotAllowed => Self::method_not_allowed(),
            _ => Self::bad_request(),
        }
    }

    fn canned(status: StatusCode, body: &str) -> Self {
        ResponseBuilder::new(status)
            .header("content-type", "text/html")
            .body(body.as_bytes().to_vec())
            .build()
    }

    /// Looks up a header value, ignoring ASCII case.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}
