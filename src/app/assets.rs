//! Static files and directory redirects under the data root.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use crate::http::error::HttpError;
use crate::http::mime;
use crate::http::request::Request;
use crate::http::response::Response;

#[derive(Debug, Clone)]
pub struct Assets {
    root: PathBuf,
}

impl Assets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Maps a request path onto the data root.
    ///
    /// Returns `None` for paths that would climb out of the root.
    fn resolve(&self, url_path: &str) -> Option<PathBuf> {
        let mut pb = self.root.clone();
        for comp in Path::new(url_path.trim_start_matches('/')).components() {
            match comp {
                Component::Normal(s) => pb.push(s),
                Component::CurDir => {}
                _ => return None,
            }
        }
        Some(pb)
    }

    /// Serves a static asset request.
    ///
    /// A target ending in `/`, or naming a directory, is redirected to its
    /// `index.html`. The redirect location is built from the `host` header
    /// verbatim.
    pub async fn serve(&self, req: &Request) -> Result<Response, HttpError> {
        if req.target.ends_with('/') {
            return redirect(req.host()?, &format!("{}index.html", req.target));
        }

        let path = req.path();
        let resolved = self
            .resolve(path)
            .ok_or_else(|| HttpError::not_found(format!("invalid path: {}", path)))?;

        let is_dir = tokio::fs::metadata(&resolved)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false);
        if is_dir {
            return redirect(req.host()?, &format!("{}/index.html", path));
        }

        self.file(path).await
    }

    /// Returns the file at `url_path` with a content type from its extension.
    pub async fn file(&self, url_path: &str) -> Result<Response, HttpError> {
        let bytes = self.read(url_path).await?;
        Ok(Response::ok(mime::from_path(url_path), bytes))
    }

    /// Reads a file under the root as UTF-8 text.
    pub async fn read_to_string(&self, url_path: &str) -> Result<String, HttpError> {
        let bytes = self.read(url_path).await?;
        String::from_utf8(bytes)
            .map_err(|_| HttpError::bad_request(format!("{} is not valid UTF-8", url_path)))
    }

    async fn read(&self, url_path: &str) -> Result<Vec<u8>, HttpError> {
        let resolved = self
            .resolve(url_path)
            .ok_or_else(|| HttpError::not_found(format!("invalid path: {}", url_path)))?;

        tokio::fs::read(&resolved).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => HttpError::not_found(format!("no such file: {}", url_path)),
            _ => HttpError::from(e),
        })
    }
}

fn redirect(host: &str, location_path: &str) -> Result<Response, HttpError> {
    Ok(Response::moved_permanently(format!("http://{}{}", host, location_path)))
}
