//! 基本型定義
//!
//! - `Color`: 手番（白/黒）
//! - `Square`: 盤内のマス
//! - `Piece`: 兵と王
//! - `Move`: 移動元と移動先
//! - `json`: フロントエンド向けの盤面 JSON 表現

mod color;
pub mod json;
mod mv;
mod piece;
mod square;

pub use color::{Color, ParseColorError};
pub use mv::Move;
pub use piece::Piece;
pub use square::Square;
