use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use cluster_discovery::discover::handlers;
use cluster_discovery::discover::service::DiscoveryService;
use cluster_discovery::storage::memory::ShardedStore;

/// The discovery service: hands out group tokens and tracks each group's
/// membership register.
#[derive(Parser, Debug)]
#[command(name = "discover")]
struct Args {
    /// Address to listen on.
    #[arg(long, default_value = "127.0.0.1:8000")]
    bind: SocketAddr,

    /// PID file. No pid file is created if omitted.
    #[arg(long)]
    pidfile: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();

    if let Some(path) = &args.pidfile {
        write_pid(path)?;
    }

    let store = Arc::new(ShardedStore::new());
    let service = DiscoveryService::new(store);

    let app = handlers::router(service);

    tracing::info!("Discovery service listening on {}", args.bind);

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("binding discovery service on {}", args.bind))?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn write_pid(path: &Path) -> Result<()> {
    let pid = std::process::id();
    std::fs::write(path, pid.to_string())
        .with_context(|| format!("writing pid file {}", path.display()))
}
