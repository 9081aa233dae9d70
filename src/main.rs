use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use reconciliation_engine::api::{AppState, create_router};
use reconciliation_engine::config::ConfigLoader;
use reconciliation_engine::ledger::InMemoryLedger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "reconciliation-engine")]
#[command(about = "Earnings, payroll summary and obligation ledger server")]
#[command(version)]
struct Cli {
    /// Configuration directory containing engine.yaml
    #[arg(long, env = "RECON_CONFIG", default_value = "./config/default")]
    config: String,

    /// Server bind address; overrides server.bind from engine.yaml
    #[arg(long)]
    bind: Option<String>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(format!("reconciliation_engine={}", log_level))
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let loader = ConfigLoader::load(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config))?;
    let addr = cli.bind.unwrap_or_else(|| loader.server().bind.clone());

    let seed = loader.seed().clone();
    tracing::info!(
        employees = seed.employees.len(),
        obligations = seed.obligations.len(),
        recurring_rules = seed.recurring_rules.len(),
        "Seeding ledger"
    );
    let store = Arc::new(InMemoryLedger::from_snapshot(seed));

    let router = create_router(AppState::new(loader, store));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;

    tracing::info!("Starting reconciliation engine");
    tracing::info!("Server bound to: {}", addr);
    tracing::info!("Health endpoint: http://{}/health", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
