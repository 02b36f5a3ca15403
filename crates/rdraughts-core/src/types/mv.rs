//! 指し手（Move）

use std::fmt;

use super::Square;

/// 移動元と移動先の組
///
/// 取り駒の有無は盤面側が判定する。ここでは幾何情報のみを持つ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Move { from, to }
    }

    /// 行方向の移動距離
    #[inline]
    pub const fn row_distance(self) -> usize {
        self.from.row().abs_diff(self.to.row())
    }

    /// 1 マスずつの進行方向 (dr, dc)。斜め移動でなければ `None`
    pub fn direction(self) -> Option<(i32, i32)> {
        let dr = self.to.row() as i32 - self.from.row() as i32;
        let dc = self.to.col() as i32 - self.from.col() as i32;
        if dr == 0 || dr.abs() != dc.abs() {
            return None;
        }
        Some((dr.signum(), dc.signum()))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}
