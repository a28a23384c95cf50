//! HTTP façade binary (spec §4, C8): serves the surface in spec §6 and, for
//! the default in-memory dispatcher, also drains the stage queue in the
//! background so a single process is enough to see a resource or search
//! through its whole pipeline. A deployment with an external broker
//! (`CELERY_BROKER_URL`) instead runs `knowledge-worker` as its own process
//! against a shared `TaskDispatch` adapter.

use clap::Parser;
use knowledge_service::infrastructure::bootstrap::build_default_registry;
use knowledge_service::infrastructure::config::ConfigLoader;
use knowledge_service::infrastructure::dispatcher::spawn_stage_worker;
use knowledge_service::server::{build_router, AppState};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Parser, Debug)]
#[command(name = "knowledge-server")]
#[command(about = "Knowledge Service HTTP API")]
#[command(version)]
struct Cli {
    /// Path to a TOML configuration file; falls back to embedded defaults
    /// and environment variables (spec §6 "Configuration").
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .json()
        .init();

    let cli = Cli::parse();
    let config = ConfigLoader::new().load(cli.config.as_deref())?;

    let (registry, dispatcher) = build_default_registry(&config);
    let registry = Arc::new(registry);
    spawn_stage_worker(dispatcher, registry.clone());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::from_shared(registry, config.clone());
    let router = build_router(state);

    tracing::info!(%addr, "knowledge-server listening");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
