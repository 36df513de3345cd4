use std::path::PathBuf;

use clap::Parser;
use lantern::config::Config;
use lantern::server;

#[derive(Parser)]
#[command(name = "lantern", about = "A small HTTP/1.1 file and echo server")]
struct Cli {
    /// Directory served by the /files/ routes
    #[arg(long, visible_alias = "dir")]
    directory: Option<PathBuf>,

    /// Address to listen on (overrides LISTEN and the config file)
    #[arg(long)]
    listen: Option<String>,

    /// YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    let mut cfg = Config::load(cli.config.as_deref())?;
    if let Some(directory) = cli.directory {
        cfg = cfg.with_directory(directory);
    }
    if let Some(listen) = cli.listen {
        cfg = cfg.with_listen_addr(listen);
    }

    tokio::select! {
        res = server::listener::run(&cfg) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
