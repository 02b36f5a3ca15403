//! 指し手生成
//!
//! 駒ごとの合法な移動先を生成する。盤面は変更しない。
//! 手番や駒の所有者のチェックは呼び出し側（`Match`）の責務。

mod generator;

pub use generator::{MoveList, generate_all, generate_moves, king_moves, man_moves};
