//! rdraughts-server
//!
//! ドラフツ対局サーバのトランスポート非依存部分。
//!
//! - [`registry`]: 対局 ID をキーにした対局レジストリ。対局ごとに 1 つのロックで
//!   指し手の適用を直列化する（プロセス全体で 1 局を共有する構成は取らない）
//! - [`protocol`]: JSON リクエスト / レスポンスの型
//! - [`handler`]: リクエストを対局操作に変換する同期ハンドラ
//! - [`config`]: TOML のサーバ設定
//! - `transport`（`tokio-transport` feature）: 1 行 1 JSON の TCP サーバループ

pub mod config;
pub mod error;
pub mod handler;
pub mod protocol;
pub mod registry;
#[cfg(feature = "tokio-transport")]
pub mod transport;

pub use config::ServerConfig;
pub use error::ApiError;
pub use handler::{handle, handle_line};
pub use protocol::{Request, Response, ResponseBody};
pub use registry::{MatchId, MatchRegistry, MatchSummary};
