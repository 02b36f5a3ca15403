use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use rdraughts_server_tcp::{Overrides, init_tracing, install_metrics, resolve_config, run};

#[derive(Parser, Debug)]
#[command(author, version, about = "Draughts game server (line-delimited JSON over TCP)", long_about = None)]
struct Args {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address (overrides the config file)
    #[arg(long)]
    bind: Option<String>,

    /// Maximum number of concurrent matches
    #[arg(long)]
    max_matches: Option<usize>,

    /// Prometheus exporter address, e.g. 127.0.0.1:9090
    #[arg(long)]
    metrics_bind: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = resolve_config(&Overrides {
        config: args.config,
        bind: args.bind,
        max_matches: args.max_matches,
        metrics_bind: args.metrics_bind,
    })?;
    init_tracing(&config.log_filter)?;

    let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
    runtime.block_on(async {
        if let Some(addr) = &config.metrics_bind {
            install_metrics(addr)?;
        }
        run(config, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("failed to listen for ctrl-c: {e}");
                std::future::pending::<()>().await;
            }
        })
        .await
    })
}
