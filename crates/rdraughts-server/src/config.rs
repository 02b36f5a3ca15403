//! サーバ設定
//!
//! TOML ファイルから読み込む。全フィールドに既定値があり、ファイル自体も省略できる。
//!
//! ```toml
//! bind = "0.0.0.0:4090"
//! max_matches = 256
//! log_filter = "info,rdraughts_server=debug"
//! metrics_bind = "127.0.0.1:9090"
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BIND: &str = "127.0.0.1:4090";
pub const DEFAULT_MAX_MATCHES: usize = 1024;
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// 待ち受けアドレス
    pub bind: String,
    /// 同時に保持する対局数の上限
    pub max_matches: usize,
    /// `EnvFilter` 形式のログフィルタ（`RUST_LOG` が優先）
    pub log_filter: String,
    /// Prometheus exporter の待ち受けアドレス。未指定なら exporter を起動しない
    pub metrics_bind: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: DEFAULT_BIND.to_string(),
            max_matches: DEFAULT_MAX_MATCHES,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            metrics_bind: None,
        }
    }
}

impl ServerConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: ServerConfig = toml::from_str(text).context("failed to parse server config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("invalid config file {}", path.display()))
    }

    fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.max_matches > 0, "max_matches must be at least 1");
        anyhow::ensure!(!self.bind.trim().is_empty(), "bind must not be empty");
        Ok(())
    }
}
