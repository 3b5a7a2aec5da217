//! Market Whisperer CLI — scan the tracked universe for earnings surprises,
//! filing sentiment, and insider buys, and render one table per scan.

use anyhow::Result;
use clap::{Parser, Subcommand};
use signal_pipeline::SignalPipeline;

mod table;

#[derive(Parser)]
#[command(
    name = "whisper",
    about = "Market signal scanner: earnings, filings, insider buys"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan today's earnings reports for EPS surprises.
    Earnings,
    /// Scan the latest event filings and score their headlines.
    Filings,
    /// Scan the latest insider open-market purchases.
    Insiders,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let pipeline = SignalPipeline::from_env();

    match cli.command {
        Commands::Earnings => table::render_earnings(&pipeline.scan_earnings().await),
        Commands::Filings => table::render_filings(&pipeline.scan_filings().await),
        Commands::Insiders => table::render_insiders(&pipeline.scan_insiders().await),
    }

    Ok(())
}
