use anyhow::Result;
use cambio::core::log::init_logging;
use clap::Parser;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long)]
    config_path: Option<String>,

    /// Override the listening port from config or the PORT variable
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = serve(&cli).await;

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

async fn serve(cli: &Cli) -> Result<()> {
    let mut config = cambio::config::AppConfig::load(cli.config_path.as_deref())?;
    if let Some(port) = cli.port {
        config.port = port;
    }
    cambio::run(config).await
}
