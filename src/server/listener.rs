use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::app::App;
use crate::config::Config;
use crate::http::connection::Connection;

/// Accepts connections forever, one task per connection.
///
/// Each connection carries exactly one request and is closed after the
/// response. Store mutations are serialized inside the store itself.
pub async fn run(cfg: &Config, app: Arc<App>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.server.listen_addr).await?;
    info!("Listening on {}", cfg.server.listen_addr);

    loop {
        let (socket, peer) = listener.accept().await?;
        info!("Accepted connection from {}", peer);

        let app = Arc::clone(&app);
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, peer, app);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {}", peer, e);
            }
            info!("Closed connection from {}", peer);
        });
    }
}
