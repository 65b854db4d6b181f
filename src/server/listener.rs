use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::http::connection::Connection;
use crate::resource::FsResolver;

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.server.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.server.listen_addr))?;
    let resolver = FsResolver::new(&cfg.static_files.root);
    info!(
        root = %resolver.root().display(),
        "Listening on {}", cfg.server.listen_addr
    );

    serve(listener, resolver, cfg.server.max_header_bytes).await
}

/// Accepts connections forever, one task per connection.
pub async fn serve(
    listener: TcpListener,
    resolver: FsResolver,
    max_header_bytes: Option<usize>,
) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = listener.accept().await?;
        info!("Accepted connection from {}", peer);

        let resolver = resolver.clone();
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, resolver, max_header_bytes);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {:#}", peer, e);
            }
        });
    }
}
