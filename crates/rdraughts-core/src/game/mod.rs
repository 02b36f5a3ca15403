//! 対局（Match）
//!
//! 手番の状態機械。盤面と 2 人の対局者を持ち、指し手を盤面に委譲したあと
//! 駒一覧を再計算して終局判定を行う。
//!
//! - `InProgress` → `Over` の一方向のみ。終局後はどの操作でも再開しない
//! - 終局させた手では手番を交代しない（`current_player` は指した側のまま）

mod error;
mod player;
mod state;

pub use error::MoveError;
pub use player::Player;
pub use state::{GameStatus, Match};
