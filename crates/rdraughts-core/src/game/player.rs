use crate::board::Board;
use crate::movegen::generate_all;
use crate::types::{Color, Move, Square};

/// 対局者
///
/// `pieces` は盤面から再計算される派生キャッシュで、正は常に `Board` 側。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    color: Color,
    pieces: Vec<Square>,
}

impl Player {
    pub fn new(color: Color) -> Self {
        Player {
            color,
            pieces: Vec::new(),
        }
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    /// 自駒のあるマス（行優先）
    pub fn pieces(&self) -> &[Square] {
        &self.pieces
    }

    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    pub fn has_pieces(&self) -> bool {
        !self.pieces.is_empty()
    }

    /// 盤面を全走査して自駒一覧を作り直す
    pub fn refresh(&mut self, board: &Board) {
        self.pieces.clear();
        self.pieces.extend(board.pieces(self.color).map(|(sq, _)| sq));
    }

    /// 全自駒の指し手の和集合
    pub fn all_possible_moves(&self, board: &Board) -> Vec<Move> {
        generate_all(board, self.color)
    }
}
