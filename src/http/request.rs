use std::collections::HashMap;
use std::fmt;

use crate::http::error::HttpError;

/// HTTP request methods.
///
/// Only GET and POST are ever served; every other token is kept so the
/// router can answer it with 405 Method Not Allowed instead of 400.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Create or submit data
    POST,
    /// Any other token found in the method position
    Other(String),
}

/// Head of a parsed HTTP request.
///
/// The body is not part of the head: handlers that need it read exactly
/// `content-length` bytes from the stream themselves.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method (GET, POST, etc.)
    pub method: Method,
    /// The raw request target, query component included (e.g. "/app-json?number=1")
    pub target: String,
    /// HTTP version (always "HTTP/1.1" once parsed)
    pub version: String,
    /// Request headers, names lowercased, values trimmed
    pub headers: HashMap<String, String>,
}

/// Builder for constructing Request objects.
#[derive(Default)]
pub struct RequestBuilder {
    method: Option<Method>,
    target: Option<String>,
    version: Option<String>,
    headers: HashMap<String, String>,
}

impl Method {
    /// Parses an HTTP method token.
    ///
    /// Matching is case-sensitive; unknown tokens become `Method::Other`.
    ///
    /// # Example
    ///
    /// ```
    /// # use roster::http::request::Method;
    /// assert_eq!(Method::from_token("GET"), Method::GET);
    /// assert_eq!(Method::from_token("get"), Method::Other("get".to_string()));
    /// ```
    pub fn from_token(s: &str) -> Self {
        match s {
            "GET" => Method::GET,
            "POST" => Method::POST,
            other => Method::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::Other(s) => s,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Adds a header, normalizing the name the same way the parser does.
    pub fn header(mut self, key: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.headers
            .insert(key.as_ref().trim().to_lowercase(), value.as_ref().trim().to_string());
        self
    }

    pub fn build(self) -> Result<Request, &'static str> {
        Ok(Request {
            method: self.method.ok_or("method missing")?,
            target: self.target.ok_or("target missing")?,
            version: self.version.unwrap_or_else(|| "HTTP/1.1".to_string()),
            headers: self.headers,
        })
    }
}

impl Request {
    /// Retrieves a header value by name, ignoring ASCII case.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .get(&key.to_ascii_lowercase())
            .map(|v| v.as_str())
    }

    /// Path part of the target, without the query component.
    pub fn path(&self) -> &str {
        match self.target.split_once('?') {
            Some((path, _)) => path,
            None => &self.target,
        }
    }

    /// Query component of the target (text after the first `?`), if any.
    pub fn query(&self) -> Option<&str> {
        self.target.split_once('?').map(|(_, q)| q)
    }

    /// Parses the `content-length` header.
    ///
    /// Fails if the header is missing or not a base-10 number.
    pub fn content_length(&self) -> Result<usize, HttpError> {
        let raw = self
            .header("content-length")
            .ok_or_else(|| HttpError::bad_request("missing content-length header"))?;
        raw.parse()
            .map_err(|_| HttpError::bad_request(format!("invalid content-length: {}", raw)))
    }

    /// The `host` header, required to build redirect locations.
    pub fn host(&self) -> Result<&str, HttpError> {
        self.header("host")
            .ok_or_else(|| HttpError::bad_request("missing host header"))
    }
}
