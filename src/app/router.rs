//! Route selection
//!
//! Method checks use plain prefix matching on the raw target, so
//! `POST /app-index.css` is refused just like `POST /app-index`. The
//! endpoint handler itself is only chosen when the target names the
//! endpoint; everything else that passes the method check is a static asset.

use crate::http::error::HttpError;
use crate::http::request::Method;

pub const ADD_PREFIX: &str = "/app-add";
pub const INDEX_PREFIX: &str = "/app-index";
pub const JSON_PREFIX: &str = "/app-json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `POST /app-add`
    CreateRecord,
    /// `GET /app-index[?filter]`
    ListHtml,
    /// `GET /app-json[?filter]`
    ListJson,
    /// Any other target: static file or directory redirect
    Static,
}

/// Validates `method` against `target` and selects the route.
pub fn route(method: &Method, target: &str) -> Result<Route, HttpError> {
    if target.starts_with(ADD_PREFIX) {
        require(method, &[Method::POST])?;
        if path_of(target) == ADD_PREFIX {
            return Ok(Route::CreateRecord);
        }
        return Ok(Route::Static);
    }

    if target.starts_with(INDEX_PREFIX) {
        require(method, &[Method::GET])?;
        return Ok(endpoint_or_static(target, INDEX_PREFIX, Route::ListHtml));
    }

    if target.starts_with(JSON_PREFIX) {
        require(method, &[Method::GET])?;
        return Ok(endpoint_or_static(target, JSON_PREFIX, Route::ListJson));
    }

    require(method, &[Method::GET, Method::POST])?;
    if !target.starts_with('/') {
        return Err(HttpError::not_found(format!("invalid uri: {}", target)));
    }

    Ok(Route::Static)
}

fn require(method: &Method, allowed: &[Method]) -> Result<(), HttpError> {
    if allowed.contains(method) {
        Ok(())
    } else {
        Err(HttpError::method_not_allowed(format!("invalid method: {}", method)))
    }
}

fn path_of(target: &str) -> &str {
    target.split_once('?').map_or(target, |(path, _)| path)
}

fn endpoint_or_static(target: &str, prefix: &str, route: Route) -> Route {
    match &target[prefix.len()..] {
        "" => route,
        rest if rest.starts_with('?') => route,
        _ => Route::Static,
    }
}
