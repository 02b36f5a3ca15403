use serde::{Deserialize, Serialize};

use super::Color;

/// 盤面の 1 マス（駒がある場合のみ生成する）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CellJson {
    /// "white" | "black"
    pub color: Color,
    pub is_king: bool,
    /// "A1" ~ "H8" 形式
    pub position: String,
}

/// 盤面全体の状態
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoardStateJson {
    /// 8x8 のセル配列（行 0 = 8 段目）。空きマスは null
    pub board: Vec<Vec<Option<CellJson>>>,
    /// 手番: "white" | "black"
    pub current_player: Color,
    pub game_over: bool,
    pub winner: Option<Color>,
}
