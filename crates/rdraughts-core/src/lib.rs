//! rdraughts-core
//!
//! English draughts（チェッカー）のルールエンジン。
//!
//! - [`types`]: 手番・マス・駒・指し手の基本型
//! - [`movegen`]: 駒ごとの移動先生成（兵は前方のみ、王は斜め 4 方向に複数マス）
//! - [`board`]: 8x8 盤面、合法性判定、取りと成り
//! - [`game`]: 手番の状態機械と終局判定
//! - [`notation`]: "A1"〜"H8" 表記との変換
//!
//! 連続跳び（1 手内での複数取り）は扱わない。取りはその 1 回で手番を終える。
//! 兵の取りも前方のみで、後退取りは生成しない。

pub mod board;
pub mod game;
pub mod movegen;
pub mod notation;
pub mod types;

pub use board::{Board, MoveEffect};
pub use game::{GameStatus, Match, MoveError, Player};
pub use types::{Color, Move, Piece, Square};
