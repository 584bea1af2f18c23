//! URL-encoded key/value decoding for query strings and form bodies.
//!
//! Both inputs use the `application/x-www-form-urlencoded` shape:
//! `key=value` tokens joined by `&`, with `+` standing for a space and
//! `%XX` escapes for everything else.

use crate::http::error::HttpError;
use crate::store::{NewRecord, NumberFilter, QueryFilter};

/// Decodes one form-encoded token: `+` becomes a space, then `%XX`
/// escapes are resolved. Malformed escapes are kept literally and byte
/// sequences that are not UTF-8 become U+FFFD.
pub fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    let bytes = urlencoding::decode_binary(spaced.as_bytes());
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Splits `input` on `&` and decodes every token into a key/value pair.
///
/// Each token is decoded as a whole, trimmed, then split on its first `=`.
/// A token without `=` fails the whole input.
///
/// # Example
///
/// ```
/// # use roster::http::query::parse_pairs;
/// let pairs = parse_pairs("first=Mick&last=Jagger+Jr").unwrap();
/// assert_eq!(pairs[1], ("last".to_string(), "Jagger Jr".to_string()));
/// ```
pub fn parse_pairs(input: &str) -> Result<Vec<(String, String)>, HttpError> {
    input
        .split('&')
        .map(|token| {
            let decoded = decode_component(token);
            let (key, value) = decoded
                .trim()
                .split_once('=')
                .ok_or_else(|| HttpError::bad_request(format!("malformed pair: {:?}", token)))?;
            Ok((key.to_string(), value.to_string()))
        })
        .collect()
}

/// Decodes a `/app-add` form body into a new record.
///
/// The body must hold exactly two pairs; `first` and `last` must both be
/// present with non-empty values. Other keys and empty values are ignored.
pub fn parse_new_record(body: &str) -> Result<NewRecord, HttpError> {
    let body = body.trim();
    if body.split('&').count() != 2 {
        return Err(HttpError::bad_request("fail to complete"));
    }

    let mut first = None;
    let mut last = None;

    for (key, value) in parse_pairs(body)? {
        if value.is_empty() {
            continue;
        }
        match key.as_str() {
            "first" => first = Some(value),
            "last" => last = Some(value),
            _ => {}
        }
    }

    match (first, last) {
        (Some(first), Some(last)) => Ok(NewRecord { first, last }),
        _ => Err(HttpError::bad_request("fail to complete")),
    }
}

/// Decodes a listing query (`number`, `first`, `last`) into a filter.
///
/// Empty values are dropped. A `number` that is not a base-10 integer
/// fails the whole filter, as does an empty query.
pub fn parse_filter(query: &str) -> Result<QueryFilter, HttpError> {
    let query = query.trim();
    if query.is_empty() || query.starts_with('&') {
        return Err(HttpError::bad_request("empty filter"));
    }

    let mut filter = QueryFilter::default();

    for (key, value) in parse_pairs(query)? {
        if value.is_empty() {
            continue;
        }
        match key.as_str() {
            "number" => filter.number = Some(parse_number(&value)?),
            "first" => filter.first = Some(value),
            "last" => filter.last = Some(value),
            _ => {}
        }
    }

    Ok(filter)
}

/// Parses a record number: optional sign, then ASCII digits.
///
/// Integers no record id can take still parse, as `OutOfRange`.
pub fn parse_number(value: &str) -> Result<NumberFilter, HttpError> {
    let value = value.trim();
    let digits = value.strip_prefix(['+', '-']).unwrap_or(value);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(HttpError::bad_request(format!("invalid number: {:?}", value)));
    }

    if value.starts_with('-') && digits.bytes().any(|b| b != b'0') {
        return Ok(NumberFilter::OutOfRange);
    }
    Ok(digits.parse().map_or(NumberFilter::OutOfRange, NumberFilter::Id))
}
