//! 座標表記
//!
//! "A1" 形式の 2 文字表記と `Square` の相互変換を行う。
//! 列は A〜H（左から右）、段は 1〜8 で 8 段目が行 0、1 段目が行 7。

use crate::types::{Move, Square};

/// 表記の解析エラー
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotationError {
    #[error("invalid square {0:?}: use A1-H8")]
    InvalidSquare(String),

    #[error("invalid move {0:?}: use <from>-<to>, e.g. A3-B4")]
    InvalidMove(String),
}

/// 列番号（0..8）を 'A'〜'H' に変換
#[inline]
pub(crate) fn file_char(col: usize) -> char {
    (b'A' + col as u8) as char
}

/// 行番号（0..8）を '8'〜'1' に変換
#[inline]
pub(crate) fn rank_char(row: usize) -> char {
    (b'8' - row as u8) as char
}

/// "A1" 形式のマスを解析する（列文字は大文字小文字を区別しない）
pub fn parse_square(s: &str) -> Result<Square, NotationError> {
    let mut chars = s.chars();
    let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
        return Err(NotationError::InvalidSquare(s.to_string()));
    };

    let col = match file.to_ascii_uppercase() {
        c @ 'A'..='H' => c as i32 - 'A' as i32,
        _ => return Err(NotationError::InvalidSquare(s.to_string())),
    };
    let row = match rank {
        '1'..='8' => '8' as i32 - rank as i32,
        _ => return Err(NotationError::InvalidSquare(s.to_string())),
    };

    Square::new(row, col).ok_or_else(|| NotationError::InvalidSquare(s.to_string()))
}

/// `Square` を "A1" 形式に変換
pub fn square_to_notation(sq: Square) -> String {
    sq.to_string()
}

/// "A3-B4" または "A3 B4" 形式の指し手を解析する
pub fn parse_move(s: &str) -> Result<Move, NotationError> {
    let trimmed = s.trim();
    let mut parts = trimmed.split(|c: char| c == '-' || c.is_whitespace()).filter(|p| !p.is_empty());
    let (Some(from), Some(to), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(NotationError::InvalidMove(s.to_string()));
    };
    Ok(Move::new(parse_square(from)?, parse_square(to)?))
}
