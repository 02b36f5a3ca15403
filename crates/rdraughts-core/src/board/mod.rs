//! 盤面
//!
//! 8x8 の配列で駒の配置を保持し、移動の合法性判定・取り・成りを行う。
//!
//! - 駒は暗いマス（(row + col) が奇数）にのみ置かれる
//! - 盤面は対局ごとに 1 つ生成され、指し手ごとにその場で更新される
//! - `copy()` は先読み用の独立したスナップショットを返す

mod display;

use crate::movegen::generate_moves;
use crate::types::{Color, Move, Piece, Square};

/// 指し手を適用した結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveEffect {
    pub mv: Move,
    /// 動かした駒（成る前）
    pub piece: Piece,
    /// 取った駒とそのマス
    pub captured: Option<(Square, Piece)>,
    /// この手で王に成ったか
    pub promoted: bool,
}

/// 盤面
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; Square::SIZE]; Square::SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Board {
    /// 駒のない盤面
    pub fn empty() -> Self {
        Board {
            squares: [[None; Square::SIZE]; Square::SIZE],
        }
    }

    /// 初期配置: 行 0〜2 に黒の兵、行 5〜7 に白の兵（暗いマスのみ）
    pub fn startpos() -> Self {
        let mut board = Self::empty();
        board.reset();
        board
    }

    /// 盤面を初期配置に戻す
    pub fn reset(&mut self) {
        for sq in Square::all() {
            let piece = match sq.row() {
                _ if !sq.is_playable() => None,
                0..=2 => Some(Piece::Man(Color::Black)),
                5..=7 => Some(Piece::Man(Color::White)),
                _ => None,
            };
            self.squares[sq.row()][sq.col()] = piece;
        }
    }

    #[inline]
    pub fn get_piece(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.row()][sq.col()]
    }

    /// 生の座標で参照する。盤外は `None`
    #[inline]
    pub fn piece_at(&self, row: i32, col: i32) -> Option<Piece> {
        Square::new(row, col).and_then(|sq| self.get_piece(sq))
    }

    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.get_piece(sq).is_none()
    }

    /// 駒を置く（既存の駒は上書き）
    #[inline]
    pub fn set_piece(&mut self, sq: Square, piece: Piece) {
        self.squares[sq.row()][sq.col()] = Some(piece);
    }

    /// 駒を取り除いて返す。空きマスなら `None`
    #[inline]
    pub fn remove_piece(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.row()][sq.col()].take()
    }

    /// 指定色の駒を行優先で列挙
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.get_piece(sq).filter(|p| p.color() == color).map(|p| (sq, p)))
    }

    pub fn count(&self, color: Color) -> usize {
        self.pieces(color).count()
    }

    /// 移動の合法性
    ///
    /// 移動元に駒があり、移動先が空いた暗いマスで、かつ現在の盤面で
    /// その駒の生成手に含まれる場合のみ true。
    pub fn is_valid_move(&self, from: Square, to: Square) -> bool {
        if self.get_piece(from).is_none() || !self.is_empty(to) || !to.is_playable() {
            return false;
        }
        generate_moves(self, from).contains(&Move::new(from, to))
    }

    /// 指し手を適用し、結果を返す。不正なら盤面を変更せず `None`
    ///
    /// 移動元と移動先の間にある相手駒を取り除き、兵が成る段に到達したら
    /// 同じマスで王に置き換える。成りは取りかどうかに関係なく発生する。
    /// 取りは行差がちょうど 2 の跳びに限らず、王の長い跳びでも間の相手駒を取る
    /// （行差 2 のときだけ取る旧来の挙動とは意図的に異なる）。
    pub fn apply_move(&mut self, from: Square, to: Square) -> Option<MoveEffect> {
        if !self.is_valid_move(from, to) {
            return None;
        }
        let mv = Move::new(from, to);
        let piece = self.remove_piece(from)?;
        self.set_piece(to, piece);

        let captured = if mv.row_distance() >= 2 { self.capture_between(mv, piece.color()) } else { None };

        let promoted = !piece.is_king() && to.row() == piece.color().promotion_row() as usize;
        if promoted {
            self.set_piece(to, piece.crowned());
        }

        log::trace!("applied {mv}: captured={captured:?} promoted={promoted}");
        Some(MoveEffect {
            mv,
            piece,
            captured,
            promoted,
        })
    }

    /// 指し手を適用する。適用できたら true
    pub fn move_piece(&mut self, from: Square, to: Square) -> bool {
        self.apply_move(from, to).is_some()
    }

    /// 先読み用の独立したスナップショット
    pub fn copy(&self) -> Board {
        self.clone()
    }

    /// 斜線上で `mv.from` と `mv.to` の間にある相手駒を取り除く。
    /// 生成手は 1 方向につき高々 1 枚しか跳ばないため、距離 2 の跳びでは中点の駒になる。
    fn capture_between(&mut self, mv: Move, mover: Color) -> Option<(Square, Piece)> {
        let (dr, dc) = mv.direction()?;
        let mut cur = mv.from.offset(dr, dc)?;
        while cur != mv.to {
            if self.get_piece(cur).is_some_and(|p| p.color() != mover) {
                let piece = self.remove_piece(cur)?;
                return Some((cur, piece));
            }
            cur = cur.offset(dr, dc)?;
        }
        None
    }
}
