use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ranch_telemetry::{web, ConfigLoader, RanchConfig};

#[derive(Debug, Parser)]
#[command(author, version, about = "3 Strands ranch telemetry mock backend")]
struct Cli {
    /// Path to a YAML config file (defaults apply when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the listen host
    #[arg(long)]
    host: Option<String>,

    /// Override the listen port
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// Override the seed used to lay out the herd
    #[arg(long)]
    seed: Option<u64>,

    /// Override the dashboard build directory
    #[arg(long)]
    static_dir: Option<PathBuf>,
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => ConfigLoader::new(".").load(path)?,
        None => RanchConfig::default(),
    };
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(static_dir) = cli.static_dir {
        config.static_dir = static_dir;
    }

    init_logging(&config.log_level);
    web::run(config).await
}
