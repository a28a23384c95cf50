//! Worker runtime binary (spec §4, C8): drains the stage queue and invokes
//! the named use case per message, standing in for the Celery-style worker
//! pool the source ran the pipeline on (spec §1 "Out of scope").
//!
//! With the default in-memory `TaskDispatch` this process has its own
//! queue and its own in-memory stores, isolated from any `knowledge-server`
//! process — useful standalone for a closed-loop demo or test harness, but
//! not a substitute for running `knowledge-server` alone (which already
//! drains its own queue in-process). A deployment that truly splits the
//! HTTP and worker roles across processes configures a `TaskDispatch` and
//! stores backed by real shared infrastructure (`CELERY_BROKER_URL`,
//! `POSTGRES_*`, `X_NEO4J_URI`) instead of the in-memory defaults.

use clap::Parser;
use knowledge_service::infrastructure::bootstrap::build_default_registry;
use knowledge_service::infrastructure::config::ConfigLoader;
use knowledge_service::infrastructure::dispatcher::spawn_stage_worker;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "knowledge-worker")]
#[command(about = "Knowledge Service pipeline worker")]
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

    tracing::info!("knowledge-worker draining the stage queue");
    spawn_stage_worker(dispatcher, registry).await?;
    Ok(())
}
