use std::collections::HashMap;

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncReadExt};

use crate::http::error::HttpError;
use crate::http::request::{Method, Request};

/// Longest request or header line accepted, terminator included.
pub const MAX_LINE_LEN: usize = 8 * 1024;
/// Most header lines accepted in one request.
pub const MAX_HEADERS: usize = 100;
/// Largest body a handler will read.
pub const MAX_BODY_LEN: usize = 1024 * 1024;

const HTTP_VERSION: &str = "HTTP/1.1";

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed request line: {0:?}")]
    InvalidRequestLine(String),

    #[error("unsupported version: {0}")]
    InvalidVersion(String),

    #[error("malformed header line: {0:?}")]
    InvalidHeader(String),

    #[error("more than {MAX_HEADERS} header lines")]
    TooManyHeaders,

    #[error("line longer than {MAX_LINE_LEN} bytes")]
    LineTooLong,

    #[error("request is not valid UTF-8")]
    InvalidEncoding,

    #[error("body of {0} bytes exceeds the limit")]
    BodyTooLarge(usize),

    #[error("stream ended after {got} of {expected} body bytes")]
    IncompleteBody { expected: usize, got: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ParseError> for HttpError {
    fn from(e: ParseError) -> Self {
        HttpError::BadRequest(e.to_string())
    }
}

/// The three tokens of a request line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    pub method: Method,
    pub target: String,
    pub version: String,
}

impl RequestLine {
    /// Combines the request line with its parsed header block.
    pub fn into_request(self, headers: HashMap<String, String>) -> Request {
        Request {
            method: self.method,
            target: self.target,
            version: self.version,
            headers,
        }
    }
}

/// Reads one line and returns it decoded and trimmed.
///
/// End of stream yields an empty line.
async fn read_line<R>(reader: &mut R) -> Result<String, ParseError>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    (&mut *reader)
        .take(MAX_LINE_LEN as u64)
        .read_until(b'\n', &mut buf)
        .await?;

    if buf.len() == MAX_LINE_LEN && !buf.ends_with(b"\n") {
        return Err(ParseError::LineTooLong);
    }

    let line = String::from_utf8(buf).map_err(|_| ParseError::InvalidEncoding)?;
    Ok(line.trim().to_string())
}

/// Reads and validates the request line.
///
/// The line must split on whitespace into exactly three tokens and the
/// version must be exactly `HTTP/1.1`.
pub async fn read_request_line<R>(reader: &mut R) -> Result<RequestLine, ParseError>
where
    R: AsyncBufRead + Unpin,
{
    let line = read_line(reader).await?;
    let tokens: Vec<&str> = line.split_whitespace().collect();

    let &[method, target, version] = tokens.as_slice() else {
        return Err(ParseError::InvalidRequestLine(line.clone()));
    };

    if version != HTTP_VERSION {
        return Err(ParseError::InvalidVersion(version.to_string()));
    }

    Ok(RequestLine {
        method: Method::from_token(method),
        target: target.to_string(),
        version: version.to_string(),
    })
}

/// Reads header lines up to and including the blank terminator line.
///
/// Names are lowercased, names and values trimmed; a repeated header keeps
/// its last value. Nothing past the terminator is consumed.
pub async fn read_headers<R>(reader: &mut R) -> Result<HashMap<String, String>, ParseError>
where
    R: AsyncBufRead + Unpin,
{
    let mut headers = HashMap::new();

    for _ in 0..=MAX_HEADERS {
        let line = read_line(reader).await?;
        if line.is_empty() {
            return Ok(headers);
        }

        let (key, value) = line
            .split_once(':')
            .ok_or_else(|| ParseError::InvalidHeader(line.clone()))?;

        headers.insert(key.trim().to_lowercase(), value.trim().to_string());
    }

    Err(ParseError::TooManyHeaders)
}

/// Reads exactly `len` body bytes.
pub async fn read_body<R>(reader: &mut R, len: usize) -> Result<Vec<u8>, ParseError>
where
    R: AsyncRead + Unpin,
{
    if len > MAX_BODY_LEN {
        return Err(ParseError::BodyTooLarge(len));
    }

    let mut body = Vec::with_capacity(len);
    (&mut *reader).take(len as u64).read_to_end(&mut body).await?;

    if body.len() < len {
        return Err(ParseError::IncompleteBody {
            expected: len,
            got: body.len(),
        });
    }

    Ok(body)
}
