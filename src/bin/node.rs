use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use cluster_discovery::node::client::DiscoveryClient;
use cluster_discovery::node::handlers;
use cluster_discovery::node::monitor::HeartbeatMonitor;
use cluster_discovery::registry::types::NodeInfo;

/// A cluster member: joins a discovery group, then answers heartbeats while
/// monitoring its peers.
#[derive(Parser, Debug)]
#[command(name = "node")]
struct Args {
    /// Hostname used to register the node.
    #[arg(long, default_value = "localhost")]
    hostname: String,

    /// Port the node's interface runs on.
    #[arg(long, default_value_t = 8001)]
    port: u16,

    /// Discovery service base URL.
    #[arg(long, default_value = "http://localhost:8000/discover")]
    discover: String,

    /// Token of the cluster to join. A fresh group is created if omitted.
    #[arg(long)]
    token: Option<String>,

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

    let identity = NodeInfo::new(&args.hostname, args.port);
    let client = DiscoveryClient::new(&args.discover);

    // Bootstrap: obtain a token if none was supplied, register our identity,
    // and take the returned register as the initial cluster view. The node
    // cannot operate without that view, so any failure here is fatal.
    let token = match args.token {
        Some(token) => token,
        None => client.new_token().await?,
    };

    let view = client
        .register(&token, &identity)
        .await
        .context("initial registration failed")?;

    tracing::info!(
        "Joined group {} as {} ({} member(s))",
        token,
        identity.address(),
        view.nodes.len()
    );

    HeartbeatMonitor::new(identity.clone(), view).start();

    let app = handlers::router(Arc::new(identity.clone()));

    let addr = identity.address();
    tracing::info!("Node service listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding node service on {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn write_pid(path: &Path) -> Result<()> {
    let pid = std::process::id();
    std::fs::write(path, pid.to_string())
        .with_context(|| format!("writing pid file {}", path.display()))
}
