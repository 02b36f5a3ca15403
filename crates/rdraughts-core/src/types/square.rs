//! マス（Square）

use std::fmt;

/// 盤のマス
///
/// 行 0 が最上段、列 0 が最左列。構築時に範囲チェックを行うため、
/// `Square` が存在する時点で常に盤内（0..8, 0..8）を指す。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// 一辺のマス数
    pub const SIZE: usize = 8;

    /// 全マス数
    pub const NUM: usize = Self::SIZE * Self::SIZE;

    /// 盤内なら `Some`。範囲外の座標は `None`
    #[inline]
    pub const fn new(row: i32, col: i32) -> Option<Square> {
        if row >= 0 && row < Self::SIZE as i32 && col >= 0 && col < Self::SIZE as i32 {
            Some(Square {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// 0..64 の行優先インデックスから生成
    #[inline]
    pub const fn from_index(index: usize) -> Option<Square> {
        if index < Self::NUM {
            Some(Square {
                row: (index / Self::SIZE) as u8,
                col: (index % Self::SIZE) as u8,
            })
        } else {
            None
        }
    }

    #[inline]
    pub const fn row(self) -> usize {
        self.row as usize
    }

    #[inline]
    pub const fn col(self) -> usize {
        self.col as usize
    }

    /// 行優先インデックス
    #[inline]
    pub const fn index(self) -> usize {
        self.row as usize * Self::SIZE + self.col as usize
    }

    /// 駒を置ける（暗い）マスかどうか: (row + col) が奇数
    #[inline]
    pub const fn is_playable(self) -> bool {
        (self.row + self.col) % 2 == 1
    }

    /// (dr, dc) だけずらしたマス。盤外なら `None`
    #[inline]
    pub const fn offset(self, dr: i32, dc: i32) -> Option<Square> {
        Square::new(self.row as i32 + dr, self.col as i32 + dc)
    }

    /// 行優先で全マスを列挙
    pub fn all() -> impl Iterator<Item = Square> {
        (0..Self::NUM).filter_map(Square::from_index)
    }

    /// 2 マスの中点。同一斜線上で距離が偶数のときのみ `Some`
    pub fn midpoint(self, other: Square) -> Option<Square> {
        let (r0, c0) = (self.row as i32, self.col as i32);
        let (r1, c1) = (other.row as i32, other.col as i32);
        if (r0 + r1) % 2 != 0 || (c0 + c1) % 2 != 0 {
            return None;
        }
        Square::new((r0 + r1) / 2, (c0 + c1) / 2)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", crate::notation::file_char(self.col()), crate::notation::rank_char(self.row()))
    }
}
