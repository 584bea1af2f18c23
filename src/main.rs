use std::sync::Arc;

use roster::app::App;
use roster::config::Config;
use roster::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load()?;
    tracing::info!(
        data_root = %cfg.storage.data_root.display(),
        db_path = %cfg.storage.db_path.display(),
        "Configuration loaded"
    );

    let app = Arc::new(App::from_config(&cfg));

    tokio::select! {
        res = server::listener::run(&cfg, app) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
