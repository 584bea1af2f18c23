//! Record endpoints: create, HTML table listing, JSON listing.

use std::sync::Arc;

use tokio::io::AsyncRead;
use tracing::{debug, info, warn};

use crate::app::assets::Assets;
use crate::http::error::HttpError;
use crate::http::parser::read_body;
use crate::http::query;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::store::{QueryFilter, Record, RecordStore, StoreError};

/// Page served after a successful create.
pub const SUCCESS_PAGE: &str = "/app_add.html";
/// Template the HTML listing is rendered into.
pub const LIST_TEMPLATE: &str = "/app_list.html";
/// Placeholder replaced by the table rows.
pub const ROWS_PLACEHOLDER: &str = "{{students}}";

/// `POST /app-add`: reads the form body and appends a record.
///
/// Nothing is stored unless the body holds exactly `first` and `last`.
pub async fn create<R>(
    assets: &Assets,
    store: &Arc<dyn RecordStore>,
    req: &Request,
    body: &mut R,
) -> Result<Response, HttpError>
where
    R: AsyncRead + Unpin,
{
    let len = req.content_length()?;
    let raw = read_body(body, len).await?;
    let text = String::from_utf8(raw).map_err(|_| HttpError::bad_request("body is not valid UTF-8"))?;

    let new_record = query::parse_new_record(&text)?;
    let record = on_store(store, move |s| s.append(new_record)).await?;
    info!(id = record.id, first = %record.first, last = %record.last, "Record created");

    assets.file(SUCCESS_PAGE).await
}

/// `GET /app-index`: matching records as rows of an HTML table.
///
/// Failures degrade to an empty 200 body.
pub async fn list_html(assets: &Assets, store: &Arc<dyn RecordStore>, query: Option<&str>) -> Response {
    let filter = filter_from(query);

    let body = match render_table(assets, store, filter).await {
        Ok(page) => page.into_bytes(),
        Err(e) => {
            warn!(error = %e, "Listing page unavailable, sending empty body");
            Vec::new()
        }
    };

    Response::ok("text/html", body)
}

/// `GET /app-json`: matching records as a JSON array.
pub async fn list_json(store: &Arc<dyn RecordStore>, query: Option<&str>) -> Result<Response, HttpError> {
    let filter = filter_from(query);
    let records = on_store(store, move |s| s.query(&filter)).await?;
    Ok(Response::ok("application/json", serde_json::to_vec(&records)?))
}

/// Runs a store operation on the blocking pool; stores may touch the disk.
async fn on_store<T, F>(store: &Arc<dyn RecordStore>, op: F) -> Result<T, HttpError>
where
    F: FnOnce(&dyn RecordStore) -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    let store = Arc::clone(store);
    let result = tokio::task::spawn_blocking(move || op(store.as_ref()))
        .await
        .map_err(|e| HttpError::bad_request(format!("store task failed: {}", e)))?;
    Ok(result?)
}

/// A missing or malformed filter lists everything.
fn filter_from(query: Option<&str>) -> QueryFilter {
    let Some(raw) = query else {
        return QueryFilter::default();
    };

    query::parse_filter(raw).unwrap_or_else(|e| {
        debug!(query = raw, error = %e, "Ignoring malformed filter");
        QueryFilter::default()
    })
}

async fn render_table(
    assets: &Assets,
    store: &Arc<dyn RecordStore>,
    filter: QueryFilter,
) -> Result<String, HttpError> {
    let records = on_store(store, move |s| s.query(&filter)).await?;
    let rows: String = records.iter().map(table_row).collect();
    let template = assets.read_to_string(LIST_TEMPLATE).await?;
    Ok(template.replace(ROWS_PLACEHOLDER, &rows))
}

pub fn table_row(record: &Record) -> String {
    format!(
        "\n<tr>\n    <td>{}</td>\n    <td>{}</td>\n    <td>{}</td>\n</tr>\n",
        record.id, record.first, record.last
    )
}
