use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::http::connection::Connection;
use crate::routes::Router;

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.listen_addr)
        .await
        .with_context(|| format!("failed to bind to {}", cfg.listen_addr))?;
    serve(listener, Router::from_config(cfg)).await
}

/// Accepts connections forever, one task per connection.
pub async fn serve(listener: TcpListener, router: Router) -> anyhow::Result<()> {
    info!("Listening on {}", listener.local_addr()?);
    match router.files().root() {
        Some(dir) => info!("Serving files from {}", dir.display()),
        None => info!("No directory configured, /files/ routes will answer 404"),
    }

    let router = Arc::new(router);

    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                tracing::warn!("Error accepting connection: {}", e);
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let router = Arc::clone(&router);
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, &router);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {}", peer, e);
            }
        });
    }
}
