//! Application layer
//!
//! Binds routes to handlers: static assets and redirects in [`assets`],
//! record endpoints in [`records`], route selection in [`router`].

pub mod assets;
pub mod records;
pub mod router;

pub use assets::Assets;
pub use router::{Route, route};

use std::path::PathBuf;
use std::sync::Arc;

use tokio::io::AsyncRead;

use crate::config::Config;
use crate::http::error::HttpError;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::store::{FileStore, RecordStore};

/// Shared state handed to every connection.
pub struct App {
    assets: Assets,
    store: Arc<dyn RecordStore>,
}

impl App {
    pub fn new(data_root: impl Into<PathBuf>, store: Arc<dyn RecordStore>) -> Self {
        Self {
            assets: Assets::new(data_root),
            store,
        }
    }

    /// Builds the app with a file-backed store as configured.
    pub fn from_config(cfg: &Config) -> Self {
        let store = FileStore::new(cfg.storage.db_path.clone());
        Self::new(cfg.storage.data_root.clone(), Arc::new(store))
    }

    pub fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }

    /// Runs the handler for `route`.
    ///
    /// `body` is the stream positioned just past the header block; only the
    /// create handler reads from it.
    pub async fn respond<R>(&self, route: Route, req: &Request, body: &mut R) -> Result<Response, HttpError>
    where
        R: AsyncRead + Unpin,
    {
        match route {
            Route::CreateRecord => records::create(&self.assets, &self.store, req, body).await,
            Route::ListHtml => Ok(records::list_html(&self.assets, &self.store, req.query()).await),
            Route::ListJson => records::list_json(&self.store, req.query()).await,
            Route::Static => self.assets.serve(req).await,
        }
    }
}
