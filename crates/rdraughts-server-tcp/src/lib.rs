//! rdraughts-server-tcp
//!
//! `rdraughts-server` の TCP フロントエンド。設定の合成・ログ初期化・
//! サーバ起動をまとめる。CLI 引数の解析は `src/bin/main.rs`。

use std::future::Future;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use rdraughts_server::transport::serve;
use rdraughts_server::{MatchRegistry, ServerConfig};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

/// CLI から渡される設定の上書き
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub bind: Option<String>,
    pub max_matches: Option<usize>,
    pub metrics_bind: Option<String>,
}

/// 設定ファイル（指定時）を読み、CLI 指定で上書きする
pub fn resolve_config(overrides: &Overrides) -> Result<ServerConfig> {
    let mut config = match &overrides.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = &overrides.bind {
        config.bind = bind.clone();
    }
    if let Some(max) = overrides.max_matches {
        anyhow::ensure!(max > 0, "--max-matches must be at least 1");
        config.max_matches = max;
    }
    if let Some(addr) = &overrides.metrics_bind {
        config.metrics_bind = Some(addr.clone());
    }
    Ok(config)
}

/// tracing subscriber と log → tracing ブリッジを登録する。
/// `RUST_LOG` が設定されていればそれを優先する。
pub fn init_tracing(default_filter: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_filter))?;
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).with_target(true).finish();
    tracing::subscriber::set_global_default(subscriber).context("failed to install tracing subscriber")?;
    tracing_log::LogTracer::init().context("failed to install log bridge")?;
    Ok(())
}

/// Prometheus exporter を起動する
pub fn install_metrics(addr: &str) -> Result<()> {
    let addr: SocketAddr = addr.parse().with_context(|| format!("invalid metrics address {addr:?}"))?;
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .context("failed to install prometheus exporter")?;
    tracing::info!(%addr, "metrics exporter listening");
    Ok(())
}

/// 設定に従ってサーバを起動し、`shutdown` 完了まで待つ
pub async fn run(config: ServerConfig, shutdown: impl Future<Output = ()>) -> Result<()> {
    let listener =
        TcpListener::bind(&config.bind).await.with_context(|| format!("failed to bind {}", config.bind))?;
    let registry = Arc::new(MatchRegistry::new(config.max_matches));
    tracing::info!(max_matches = config.max_matches, "draughts server starting");
    serve(listener, registry, shutdown).await?;
    Ok(())
}
