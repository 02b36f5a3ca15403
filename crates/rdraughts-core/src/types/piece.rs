//! 駒（Piece）

use super::Color;

/// 駒
///
/// 兵（Man）と王（King）の閉じた列挙。色は生成後に変わらない。
/// 成りは盤上の同じマスで `Man` を `King` に置き換えることで表現する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Piece {
    Man(Color),
    King(Color),
}

impl Piece {
    #[inline]
    pub const fn color(self) -> Color {
        match self {
            Piece::Man(c) | Piece::King(c) => c,
        }
    }

    #[inline]
    pub const fn is_king(self) -> bool {
        matches!(self, Piece::King(_))
    }

    /// 成った後の駒。王はそのまま
    #[inline]
    pub const fn crowned(self) -> Piece {
        Piece::King(self.color())
    }

    /// 盤面表示用の記号
    pub const fn symbol(self) -> char {
        match self {
            Piece::Man(Color::White) => '○',
            Piece::Man(Color::Black) => '●',
            Piece::King(Color::White) => '♔',
            Piece::King(Color::Black) => '♚',
        }
    }
}
