//! websum server binary.
//!
//! The application logic is contained in lib.rs, and this file is responsible
//! for parsing arguments, wiring up logging, and handling top-level errors.

use std::path::PathBuf;

use clap::Parser;
use websum::{server, Config};

#[derive(Parser)]
#[command(name = "websum")]
#[command(author, version, about = "Web summarizer agent service", long_about = None)]
struct Cli {
    /// Address to listen on (overrides config and WEBSUM_BIND)
    #[arg(long)]
    bind: Option<String>,

    /// Path to a websum.toml config file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let bind = cli.bind.unwrap_or_else(|| config.server.bind.clone());

    let app = server::app(config)?;

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
